use sched_sim::{
    Algorithm, Outcome, Process,
    sim::{bernoulli_processes, parse_processes, render_outcome, run_all},
};

fn workloads() -> Vec<Vec<Process>> {
    (0..8)
        .map(|seed| bernoulli_processes(120, 0.35, 0.4, 2, 7, seed))
        .chain([
            // Idle gaps and simultaneous arrivals
            parse_processes("1 0 3\n2 0 1\n3 9 4\n4 9 2\n5 30 1\n").unwrap(),
            parse_processes("0 0 9\n1 1 8\n2 2 2\n3 3 2\n4 4 5\n").unwrap(),
            // Zero bursts, alone and next to running work
            parse_processes("1 0 0\n2 0 3\n3 2 0\n4 2 2\n5 9 0\n").unwrap(),
        ])
        .collect()
}

fn algorithms() -> Vec<Algorithm> {
    let mut all = Algorithm::defaults().to_vec();
    all.extend([
        Algorithm::RoundRobin { quantum: 1 },
        Algorithm::RoundRobin { quantum: 5 },
        Algorithm::Sjf { alpha: 0.0 },
        Algorithm::Sjf { alpha: 1.0 },
    ]);
    all
}

fn check_outcome(processes: &[Process], outcome: &Outcome) {
    let total_burst: u64 = processes.iter().map(|p| p.burst_time).sum();
    assert_eq!(outcome.cpu_time, total_burst, "{} created or lost work", outcome.policy);
    assert_eq!(outcome.stats.len(), processes.len());

    for stats in &outcome.stats {
        let completion = stats
            .completion
            .unwrap_or_else(|| panic!("{}: process {} never finished", outcome.policy, stats.pid));
        // Single CPU without I/O: every tick between arrival and completion
        // is either spent running or counted as waiting, exactly once
        assert_eq!(
            completion - stats.arrival,
            stats.burst + stats.waited,
            "{}: waiting time of process {} double counted or lost",
            outcome.policy,
            stats.pid
        );
    }

    for pair in outcome.schedule.windows(2) {
        // A zero-burst process hands the CPU on within the same tick
        assert!(pair[0].time <= pair[1].time, "{}: switches out of order", outcome.policy);
        assert_ne!(pair[0].pid, pair[1].pid, "{}: switch to the running process", outcome.policy);
    }
}

#[test]
fn every_policy_conserves_work_and_counts_waiting_once() {
    for processes in workloads() {
        for algorithm in algorithms() {
            let outcome = algorithm.run(&processes).unwrap();
            check_outcome(&processes, &outcome);
        }
    }
}

#[test]
fn runs_are_deterministic_and_isolated() {
    for processes in workloads() {
        let before = processes.clone();
        let first = run_all(&algorithms(), &processes).unwrap();
        let second = run_all(&algorithms(), &processes).unwrap();

        assert_eq!(processes, before);
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.schedule, b.schedule);
            assert_eq!(a.stats, b.stats);
            assert_eq!(render_outcome(a), render_outcome(b));
        }
    }
}

#[test]
fn empty_input_yields_empty_schedules() {
    for outcome in run_all(&algorithms(), &[]).unwrap() {
        assert!(outcome.schedule.is_empty());
        assert_eq!(outcome.average_waiting_time(), 0.0);
        assert_eq!(outcome.cpu_time, 0);
    }
}

#[test]
fn single_process_never_waits() {
    let processes = [Process::new(42, 7, 5)];
    for algorithm in algorithms() {
        let outcome = algorithm.run(&processes).unwrap();
        assert_eq!(outcome.switches(), vec![(7, 42)]);
        assert_eq!(outcome.total_waiting_time(), 0);
        assert_eq!(outcome.makespan(), 12);
    }
}

#[test]
fn zero_burst_process_costs_nobody_a_tick() {
    let processes = parse_processes("1 0 0\n2 0 3\n").unwrap();
    for algorithm in algorithms() {
        let outcome = algorithm.run(&processes).unwrap();
        assert_eq!(outcome.switches(), vec![(0, 1), (0, 2)], "{algorithm}");
        assert_eq!(outcome.total_waiting_time(), 0, "{algorithm}");
        assert_eq!(outcome.stats[0].completion, Some(0), "{algorithm}");
        assert_eq!(outcome.makespan(), 3, "{algorithm}");
    }
}

#[test]
fn reference_workload_schedules() {
    let processes = parse_processes("1 0 5\n2 1 3\n").unwrap();
    let [fcfs, rr, srtf, sjf] = Algorithm::defaults().map(|a| a.run(&processes).unwrap());

    assert_eq!(render_outcome(&fcfs), "(0, 1)\n(5, 2)\naverage waiting time 2.00 \n");
    assert_eq!(
        render_outcome(&rr),
        "(0, 1)\n(2, 2)\n(4, 1)\n(6, 2)\n(7, 1)\naverage waiting time 3.00 \n"
    );
    // 3 < 4 remaining at t=1
    assert_eq!(
        render_outcome(&srtf),
        "(0, 1)\n(1, 2)\n(4, 1)\naverage waiting time 1.50 \n"
    );
    assert_eq!(render_outcome(&sjf), "(0, 1)\n(5, 2)\naverage waiting time 2.00 \n");
}

#[test]
fn duplicate_ids_fail_every_policy() {
    let processes = parse_processes("1 0 2\n1 3 2\n").unwrap();
    for algorithm in algorithms() {
        assert!(matches!(
            algorithm.run(&processes),
            Err(sched_sim::Error::DuplicateProcessId(1))
        ));
    }
}
