use super::Policy;
use crate::{
    core::{FifoQueue, ProcKey, SimState, Ticks},
    error::{Error, Result},
};

/// Round-Robin: strict FIFO ready queue, a running process goes back to the
/// tail once it has used `quantum` ticks.
#[derive(Debug)]
pub struct RoundRobin {
    quantum: Ticks,
    slice_left: Ticks,
    ready: FifoQueue,
}

impl RoundRobin {
    pub fn new(quantum: Ticks) -> Result<Self> {
        if quantum == 0 {
            return Err(Error::InvalidQuantum(quantum));
        }
        Ok(Self {
            quantum,
            slice_left: 0,
            ready: FifoQueue::default(),
        })
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        "RR"
    }

    fn enqueue(&mut self, _st: &SimState, proc: ProcKey) {
        self.ready.push_back(proc);
    }

    fn dispatch(&mut self, _st: &SimState) -> Option<ProcKey> {
        self.ready.pop_front()
    }

    fn queued(&self) -> usize {
        self.ready.len()
    }

    fn is_queued(&self, proc: ProcKey) -> bool {
        self.ready.contains(proc)
    }

    fn running(&mut self, _st: &mut SimState, _proc: ProcKey) {
        self.slice_left = self.quantum;
    }

    fn tick(&mut self, _st: &SimState, _proc: ProcKey) {
        self.slice_left = self.slice_left.saturating_sub(1);
    }

    fn slice_expired(&self, _st: &SimState, _proc: ProcKey) -> bool {
        self.slice_left == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Process, SimEvent, simulate};

    fn procs(list: &[(u64, u64, u64)]) -> Vec<Process> {
        list.iter()
            .map(|&(id, arrival, burst)| Process::new(id, arrival, burst))
            .collect()
    }

    #[test]
    fn zero_quantum_is_rejected() {
        assert!(matches!(RoundRobin::new(0), Err(Error::InvalidQuantum(0))));
    }

    #[test]
    fn two_processes_interleave() {
        let input = procs(&[(1, 0, 5), (2, 1, 3)]);
        let outcome = simulate(&input, RoundRobin::new(2).unwrap()).unwrap();

        assert_eq!(outcome.pids(), vec![1, 2, 1, 2, 1]);
        let times: Vec<u64> = outcome.schedule.iter().map(|e| e.time).collect();
        assert_eq!(times, vec![0, 2, 4, 6, 7]);
        assert_eq!(outcome.cpu_time, 8);
        assert_eq!(outcome.makespan(), 8);
        // 1 waits 2 + 1, 2 waits 1 + 2
        assert_eq!(outcome.total_waiting_time(), 6);
        assert!((outcome.average_waiting_time() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn lone_process_keeps_running_past_its_quantum() {
        let outcome = simulate(&procs(&[(1, 0, 5)]), RoundRobin::new(2).unwrap()).unwrap();

        assert_eq!(outcome.switches(), vec![(0, 1)]);
        assert_eq!(outcome.total_waiting_time(), 0);
        assert_eq!(outcome.stats[0].completion, Some(5));
        let requeues = outcome
            .events
            .iter()
            .filter(|e| matches!(e, SimEvent::Requeued { .. }))
            .count();
        assert_eq!(requeues, 2);
    }

    #[test]
    fn expired_process_queues_before_same_tick_arrival() {
        // At t=2 process 1 is requeued before 3 arrives, so 2 runs, then 1, then 3
        let input = procs(&[(1, 0, 4), (2, 0, 2), (3, 2, 1)]);
        let outcome = simulate(&input, RoundRobin::new(2).unwrap()).unwrap();

        assert_eq!(outcome.pids(), vec![1, 2, 1, 3]);
        assert_eq!(outcome.schedule[2].time, 4);
        assert_eq!(outcome.schedule[3].time, 6);
    }

    #[test]
    fn simultaneous_arrivals_enter_in_input_order() {
        let input = procs(&[(4, 0, 1), (9, 0, 1), (2, 0, 1)]);
        let outcome = simulate(&input, RoundRobin::new(3).unwrap()).unwrap();

        assert_eq!(outcome.pids(), vec![4, 9, 2]);
        assert_eq!(outcome.total_waiting_time(), 3);
    }
}
