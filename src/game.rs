//! Commands of the `osgame` sub-shell.
//!
//! All of them operate on the [`ResourceSimulator`] of the running session. The
//! simulator does the bookkeeping; these commands validate the text the user
//! typed and narrate the outcome.

use crate::builtin::BuiltinCommand;
use crate::error::ShellError;
use crate::io_adapters::Terminal;
use crate::simulator::{INTERRUPT_NARRATION, ResourceSimulator, Topic};
use anyhow::Result;
use argh::FromArgs;

const HELP: &str = "
OS Learning Game Help:

This game simulates some core OS concepts.
Use commands to learn how the OS manages processes, memory, and interrupts.

Commands:
  create process <name>   - Simulate starting a new process
                            The OS tracks processes using Process Control Blocks (PCBs).
  kill process <name>     - Terminate a running process
                            OS frees resources when processes end.
  use memory <MB>         - Allocate memory to the last created process
                            OS manages RAM allocation and prevents crashes.
  free memory <MB>        - Free allocated memory from last created process
                            Memory is returned to the OS for reuse.
  interrupt               - Simulate an interrupt
                            Interrupts pause CPU tasks for urgent events.
  status                  - Show current OS state
                            Displays running processes and free memory.
  explain <topic>         - Learn detailed OS topics
                            Topics: process, memory, interrupt, scheduler
  exit                    - Quit the game and return to toyos
";

/// Checks the `process` / `memory` word that follows the verb.
fn expect_keyword(word: &str, keyword: &str, usage: &'static str) -> Result<(), ShellError> {
    if word.eq_ignore_ascii_case(keyword) {
        Ok(())
    } else {
        Err(ShellError::Usage(usage))
    }
}

/// Amounts are 32-bit signed integers; anything wider is not a valid amount.
fn parse_amount(text: &str) -> Result<i64, ShellError> {
    text.parse::<i32>()
        .map(i64::from)
        .map_err(|_| ShellError::InvalidMemoryAmount)
}

#[derive(FromArgs)]
/// Explain the game and list its commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "help"
    }

    fn usage() -> &'static str {
        "Usage: help"
    }

    fn execute(self, term: &mut dyn Terminal, _sim: &mut ResourceSimulator) -> Result<()> {
        writeln!(term, "{HELP}")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Start a simulated process.
pub struct CreateProcess {
    #[argh(positional)]
    /// the word "process".
    pub keyword: String,

    #[argh(positional)]
    /// name of the new process.
    pub process: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for CreateProcess {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "create"
    }

    fn usage() -> &'static str {
        "Usage: create process <processName>"
    }

    fn execute(self, term: &mut dyn Terminal, sim: &mut ResourceSimulator) -> Result<()> {
        expect_keyword(&self.keyword, "process", Self::usage())?;
        sim.create_process(&self.process)?;
        writeln!(term, "Process '{}' created.", self.process)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Terminate a simulated process and release its memory.
pub struct KillProcess {
    #[argh(positional)]
    /// the word "process".
    pub keyword: String,

    #[argh(positional)]
    /// name of the process to terminate.
    pub process: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for KillProcess {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "kill"
    }

    fn usage() -> &'static str {
        "Usage: kill process <processName>"
    }

    fn execute(self, term: &mut dyn Terminal, sim: &mut ResourceSimulator) -> Result<()> {
        expect_keyword(&self.keyword, "process", Self::usage())?;
        let freed = sim.kill_process(&self.process)?;
        writeln!(
            term,
            "Process '{}' terminated and freed {freed} MB memory.",
            self.process
        )?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Allocate memory to the most recently created process.
pub struct UseMemory {
    #[argh(positional)]
    /// the word "memory".
    pub keyword: String,

    #[argh(positional)]
    /// amount in MB.
    pub amount: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for UseMemory {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "use"
    }

    fn usage() -> &'static str {
        "Usage: use memory <MB>"
    }

    fn execute(self, term: &mut dyn Terminal, sim: &mut ResourceSimulator) -> Result<()> {
        expect_keyword(&self.keyword, "memory", Self::usage())?;
        let allocation = sim.use_memory(parse_amount(&self.amount)?)?;
        writeln!(
            term,
            "Allocated {} MB memory to process '{}'.",
            allocation.amount, allocation.process
        )?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Release memory from the most recently created process.
pub struct FreeMemory {
    #[argh(positional)]
    /// the word "memory".
    pub keyword: String,

    #[argh(positional)]
    /// amount in MB; capped at what the process holds.
    pub amount: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for FreeMemory {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "free"
    }

    fn usage() -> &'static str {
        "Usage: free memory <MB>"
    }

    fn execute(self, term: &mut dyn Terminal, sim: &mut ResourceSimulator) -> Result<()> {
        expect_keyword(&self.keyword, "memory", Self::usage())?;
        let freed = sim.free_memory(parse_amount(&self.amount)?)?;
        writeln!(
            term,
            "Freed {} MB memory from process '{}'.",
            freed.amount, freed.process
        )?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Show memory usage and running processes.
pub struct Status {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Status {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "status"
    }

    fn usage() -> &'static str {
        "Usage: status"
    }

    fn execute(self, term: &mut dyn Terminal, sim: &mut ResourceSimulator) -> Result<()> {
        let pool = sim.pool();
        writeln!(term)?;
        writeln!(term, "Total Memory: {} MB", pool.total())?;
        writeln!(term, "Used Memory: {} MB", pool.used())?;
        writeln!(term, "Free Memory: {} MB", pool.free())?;

        if sim.processes().is_empty() {
            writeln!(term, "No running processes.")?;
        } else {
            writeln!(term, "Processes:")?;
            for p in sim.processes() {
                writeln!(term, "- {}: {} MB allocated", p.name, p.allocated)?;
            }
        }
        writeln!(term)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Walk through how an interrupt is handled.
pub struct Interrupt {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Interrupt {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "interrupt"
    }

    fn usage() -> &'static str {
        "Usage: interrupt"
    }

    fn execute(self, term: &mut dyn Terminal, _sim: &mut ResourceSimulator) -> Result<()> {
        writeln!(term)?;
        for line in INTERRUPT_NARRATION {
            writeln!(term, "{line}")?;
        }
        writeln!(term)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Explain an OS topic.
pub struct Explain {
    #[argh(positional)]
    /// one of process, memory, interrupt, scheduler.
    pub topic: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for Explain {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "explain"
    }

    fn usage() -> &'static str {
        "Usage: explain <topic>"
    }

    fn execute(self, term: &mut dyn Terminal, _sim: &mut ResourceSimulator) -> Result<()> {
        writeln!(term)?;
        match self.topic.parse::<Topic>() {
            Ok(topic) => writeln!(term, "{}", topic.explanation())?,
            Err(_) => {
                let names: Vec<String> = Topic::ALL.iter().map(Topic::to_string).collect();
                writeln!(term, "Unknown topic. Try: {}", names.join(", "))?;
            }
        }
        writeln!(term)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Quit the game and return to the shell.
pub struct Exit {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Exit {
    type Context = ResourceSimulator;

    fn name() -> &'static str {
        "exit"
    }

    fn usage() -> &'static str {
        "Usage: exit"
    }

    fn execute(self, _term: &mut dyn Terminal, sim: &mut ResourceSimulator) -> Result<()> {
        sim.exit();
        Ok(())
    }
}
