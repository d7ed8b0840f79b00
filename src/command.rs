use crate::error::ShellError;
use crate::io_adapters::Terminal;
use anyhow::Result;

/// Object-safe trait for any command that can be executed by one of the shells.
///
/// `C` is the state the command works on: the shell [`Environment`] for
/// top-level commands, the [`ResourceSimulator`] inside `osgame`.
///
/// [`Environment`]: crate::env::Environment
/// [`ResourceSimulator`]: crate::simulator::ResourceSimulator
pub trait ExecutableCommand<C> {
    /// Executes the command.
    ///
    /// Domain failures are printed to `term` and are not returned; an `Err` here
    /// means the terminal itself could not be written to.
    fn execute(self: Box<Self>, term: &mut dyn Terminal, ctx: &mut C) -> Result<()>;
}

/// Factory that tries to create a command from a name and its arguments.
///
/// Returns `None` when the factory doesn't recognize the `name`. Names arrive
/// already lowercased.
pub trait CommandFactory<C> {
    /// Attempt to create a command instance for the provided name and arguments.
    fn try_create(&self, name: &str, args: &[&str]) -> Option<Box<dyn ExecutableCommand<C>>>;
}

/// Run `name` with the first factory that accepts it.
///
/// Unknown names are reported on `term` like any other command error.
pub fn dispatch<C>(
    factories: &[Box<dyn CommandFactory<C>>],
    name: &str,
    args: &[&str],
    term: &mut dyn Terminal,
    ctx: &mut C,
) -> Result<()> {
    for factory in factories {
        if let Some(cmd) = factory.try_create(name, args) {
            return cmd.execute(term, ctx);
        }
    }
    log::debug!("no command named {name:?}");
    writeln!(term, "{}", ShellError::UnknownCommand)?;
    Ok(())
}
