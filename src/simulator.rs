//! Process and memory model behind the `osgame` sub-shell.
//!
//! Processes are just names with a memory quota. Memory requests always target
//! the most recently created process that is still alive; the commands never
//! name a process.

use crate::error::{MemoryOp, ShellError};
use std::fmt;
use std::str::FromStr;

/// Pool size, in MB, when nothing else is configured.
pub const DEFAULT_TOTAL_MEMORY: u64 = 1024;

/// Lines printed by the `interrupt` command.
pub const INTERRUPT_NARRATION: [&str; 3] = [
    "Simulating an interrupt...",
    "CPU pauses current tasks to handle urgent event.",
    "Interrupt handled, CPU resumes tasks.",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulatedProcess {
    pub name: String,
    /// Memory held by this process, in MB.
    pub allocated: u64,
}

/// Global memory accounting. `used` never exceeds `total`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryPool {
    total: u64,
    used: u64,
}

impl MemoryPool {
    pub fn new(total: u64) -> Self {
        Self { total, used: 0 }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn used(&self) -> u64 {
        self.used
    }

    pub fn free(&self) -> u64 {
        self.total - self.used
    }

    fn can_fit(&self, amount: u64) -> bool {
        self.used
            .checked_add(amount)
            .is_some_and(|wanted| wanted <= self.total)
    }

    fn release(&mut self, amount: u64) {
        self.used = self.used.saturating_sub(amount);
    }
}

/// Lifecycle of one game session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Active,
    Exited,
}

/// Result of a successful `use memory` / `free memory`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Allocation {
    pub process: String,
    pub amount: u64,
}

/// Subjects the `explain` command knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Topic {
    Process,
    Memory,
    Interrupt,
    Scheduler,
}

impl Topic {
    pub const ALL: [Topic; 4] = [
        Topic::Process,
        Topic::Memory,
        Topic::Interrupt,
        Topic::Scheduler,
    ];

    pub fn explanation(self) -> &'static str {
        match self {
            Topic::Process => {
                "A process is a running program instance. The OS manages processes via Process Control Blocks (PCBs)."
            }
            Topic::Memory => {
                "The OS allocates and frees memory to processes, managing RAM usage efficiently."
            }
            Topic::Interrupt => {
                "An interrupt is a signal that pauses the CPU to deal with urgent events like I/O or timers."
            }
            Topic::Scheduler => {
                "The scheduler decides which process the CPU runs next, managing multitasking."
            }
        }
    }
}

impl fmt::Display for Topic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Topic::Process => "process",
            Topic::Memory => "memory",
            Topic::Interrupt => "interrupt",
            Topic::Scheduler => "scheduler",
        };
        f.write_str(name)
    }
}

/// Returned for topics outside [`Topic::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownTopic;

impl FromStr for Topic {
    type Err = UnknownTopic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Topic::ALL
            .into_iter()
            .find(|t| t.to_string().eq_ignore_ascii_case(s))
            .ok_or(UnknownTopic)
    }
}

/// State of one `osgame` session.
#[derive(Debug, Clone)]
pub struct ResourceSimulator {
    pool: MemoryPool,
    /// Creation order; the last entry is the target of memory requests.
    processes: Vec<SimulatedProcess>,
    state: GameState,
}

impl ResourceSimulator {
    pub fn new(total_memory: u64) -> Self {
        Self {
            pool: MemoryPool::new(total_memory),
            processes: Vec::new(),
            state: GameState::Active,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// Leave the game. There is no way back to `Active`.
    pub fn exit(&mut self) {
        self.state = GameState::Exited;
    }

    pub fn pool(&self) -> MemoryPool {
        self.pool
    }

    pub fn processes(&self) -> &[SimulatedProcess] {
        &self.processes
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.processes.iter().position(|p| p.name == name)
    }

    pub fn create_process(&mut self, name: &str) -> Result<(), ShellError> {
        if self.position(name).is_some() {
            return Err(ShellError::ProcessExists(name.to_string()));
        }
        self.processes.push(SimulatedProcess {
            name: name.to_string(),
            allocated: 0,
        });
        log::debug!("process '{name}' created");
        Ok(())
    }

    /// Remove a process and hand its memory back. Returns the amount released.
    pub fn kill_process(&mut self, name: &str) -> Result<u64, ShellError> {
        let idx = self
            .position(name)
            .ok_or_else(|| ShellError::ProcessNotFound(name.to_string()))?;
        let process = self.processes.remove(idx);
        self.pool.release(process.allocated);
        log::debug!("process '{name}' killed, {} MB released", process.allocated);
        Ok(process.allocated)
    }

    /// Validation order matters: amount, then processes, then capacity.
    pub fn use_memory(&mut self, amount: i64) -> Result<Allocation, ShellError> {
        let amount = positive(amount)?;
        if self.processes.is_empty() {
            return Err(ShellError::NoProcesses(MemoryOp::Allocate));
        }
        if !self.pool.can_fit(amount) {
            log::debug!(
                "refusing {amount} MB, {} of {} MB in use",
                self.pool.used,
                self.pool.total
            );
            return Err(ShellError::OutOfMemory);
        }

        let target = self
            .processes
            .last_mut()
            .ok_or(ShellError::NoProcesses(MemoryOp::Allocate))?;
        target.allocated += amount;
        self.pool.used += amount;
        Ok(Allocation {
            process: target.name.clone(),
            amount,
        })
    }

    /// Frees at most what the target process holds; the returned amount is
    /// what was actually released.
    pub fn free_memory(&mut self, amount: i64) -> Result<Allocation, ShellError> {
        let requested = positive(amount)?;
        let target = self
            .processes
            .last_mut()
            .ok_or(ShellError::NoProcesses(MemoryOp::Free))?;

        let amount = requested.min(target.allocated);
        target.allocated -= amount;
        self.pool.release(amount);
        Ok(Allocation {
            process: target.name.clone(),
            amount,
        })
    }
}

fn positive(amount: i64) -> Result<u64, ShellError> {
    if amount <= 0 {
        return Err(ShellError::NonPositiveAmount);
    }
    Ok(amount as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use quickcheck_macros::quickcheck;

    fn allocated_sum(sim: &ResourceSimulator) -> u64 {
        sim.processes().iter().map(|p| p.allocated).sum()
    }

    #[test]
    fn test_new_simulator_is_active_and_empty() {
        let sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        assert_eq!(sim.state(), GameState::Active);
        assert_eq!(sim.pool().total(), 1024);
        assert_eq!(sim.pool().used(), 0);
        assert_eq!(sim.pool().free(), 1024);
        assert!(sim.processes().is_empty());
    }

    #[test]
    fn test_exit_is_terminal() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.exit();
        assert_eq!(sim.state(), GameState::Exited);
    }

    #[test]
    fn test_duplicate_process_rejected() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("p1").unwrap();
        sim.use_memory(10).unwrap();

        let err = sim.create_process("p1").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Duplicate);
        assert_eq!(sim.processes().len(), 1);
        assert_eq!(sim.processes()[0].allocated, 10);
    }

    #[test]
    fn test_use_memory_targets_latest_process() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("first").unwrap();
        sim.create_process("second").unwrap();

        let alloc = sim.use_memory(64).unwrap();
        assert_eq!(alloc.process, "second");
        assert_eq!(sim.processes()[0].allocated, 0);
        assert_eq!(sim.processes()[1].allocated, 64);

        sim.kill_process("second").unwrap();
        let alloc = sim.use_memory(8).unwrap();
        assert_eq!(alloc.process, "first");
    }

    #[test]
    fn test_use_memory_validation_order() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        assert_eq!(sim.use_memory(0).unwrap_err(), ShellError::NonPositiveAmount);
        assert_eq!(sim.use_memory(-5).unwrap_err(), ShellError::NonPositiveAmount);
        assert_eq!(
            sim.use_memory(5).unwrap_err(),
            ShellError::NoProcesses(MemoryOp::Allocate)
        );
        sim.create_process("p").unwrap();
        assert_eq!(sim.use_memory(2000).unwrap_err(), ShellError::OutOfMemory);
        assert_eq!(sim.pool().used(), 0);
    }

    #[test]
    fn test_use_memory_up_to_exact_capacity() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("p").unwrap();
        sim.use_memory(1000).unwrap();
        assert_eq!(sim.use_memory(25).unwrap_err().kind(), ErrorKind::Capacity);
        sim.use_memory(24).unwrap();
        assert_eq!(sim.pool().used(), 1024);
        assert_eq!(sim.pool().free(), 0);
    }

    #[test]
    fn test_free_memory_clamps_to_allocation() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("p").unwrap();
        sim.use_memory(100).unwrap();

        let freed = sim.free_memory(500).unwrap();
        assert_eq!(freed.amount, 100);
        assert_eq!(sim.processes()[0].allocated, 0);
        assert_eq!(sim.pool().used(), 0);

        let freed = sim.free_memory(1).unwrap();
        assert_eq!(freed.amount, 0);
    }

    #[test]
    fn test_free_memory_only_touches_latest_process() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("old").unwrap();
        sim.use_memory(50).unwrap();
        sim.create_process("new").unwrap();

        let freed = sim.free_memory(50).unwrap();
        assert_eq!(freed, Allocation { process: "new".into(), amount: 0 });
        assert_eq!(sim.pool().used(), 50);
    }

    #[test]
    fn test_free_memory_without_processes() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        assert_eq!(sim.free_memory(-1).unwrap_err(), ShellError::NonPositiveAmount);
        assert_eq!(
            sim.free_memory(1).unwrap_err(),
            ShellError::NoProcesses(MemoryOp::Free)
        );
    }

    #[test]
    fn test_kill_releases_memory() {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("p1").unwrap();
        sim.use_memory(100).unwrap();

        assert_eq!(sim.kill_process("p1").unwrap(), 100);
        assert_eq!(sim.pool().used(), 0);
        assert!(sim.processes().is_empty());
        assert_eq!(sim.kill_process("p1").unwrap_err().kind(), ErrorKind::NotFound);
    }

    #[test]
    fn test_topic_parsing() {
        assert_eq!("memory".parse::<Topic>(), Ok(Topic::Memory));
        assert_eq!("SCHEDULER".parse::<Topic>(), Ok(Topic::Scheduler));
        assert_eq!("paging".parse::<Topic>(), Err(UnknownTopic));
    }

    #[quickcheck]
    fn prop_used_memory_matches_allocations(ops: Vec<(u8, u8, i16)>) -> bool {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        for (op, who, amount) in ops {
            let name = format!("p{}", who % 4);
            let _ = match op % 4 {
                0 => sim.create_process(&name).map(|_| ()),
                1 => sim.use_memory(amount as i64).map(|_| ()),
                2 => sim.free_memory(amount as i64).map(|_| ()),
                _ => sim.kill_process(&name).map(|_| ()),
            };
            let pool = sim.pool();
            if pool.used() != allocated_sum(&sim) || pool.used() > pool.total() {
                return false;
            }
        }
        true
    }

    #[quickcheck]
    fn prop_rejected_allocation_leaves_state_unchanged(amount: u16) -> bool {
        let mut sim = ResourceSimulator::new(DEFAULT_TOTAL_MEMORY);
        sim.create_process("p").unwrap();
        sim.use_memory(1000).unwrap();
        let before = sim.processes().to_vec();
        match sim.use_memory(amount as i64) {
            Ok(_) => amount > 0 && amount <= 24,
            Err(_) => sim.processes() == before.as_slice() && sim.pool().used() == 1000,
        }
    }
}
