use crate::calc;
use crate::command::{CommandFactory, ExecutableCommand};
use crate::env::Environment;
use crate::error::ShellError;
use crate::interpreter::Factory;
use crate::io_adapters::Terminal;
use anyhow::Result;
use argh::{EarlyExit, FromArgs};

/// Built-in commands known to the shells at compile time.
///
/// Builtins are parsed using the [`argh`] crate (`FromArgs`) and executed
/// directly against their context. Arguments are always passed after `--`, so
/// text such as `-5` or `help` reaches the command as a plain positional.
pub trait BuiltinCommand: Sized + FromArgs {
    /// State the command operates on.
    type Context;

    /// Canonical lowercase name of the command, e.g. "create" or "ls".
    fn name() -> &'static str;

    /// Text printed when the arguments don't fit the command.
    fn usage() -> &'static str;

    /// Executes the command, writing its report to `term`.
    ///
    /// A [`ShellError`] returned here is printed for the user and swallowed by
    /// the caller; any other error is an output failure.
    fn execute(self, term: &mut dyn Terminal, ctx: &mut Self::Context) -> Result<()>;
}

impl<T: BuiltinCommand> ExecutableCommand<T::Context> for T {
    fn execute(self: Box<Self>, term: &mut dyn Terminal, ctx: &mut T::Context) -> Result<()> {
        match BuiltinCommand::execute(*self, term, ctx) {
            Ok(()) => Ok(()),
            Err(e) => match e.downcast::<ShellError>() {
                Ok(err) => {
                    log::debug!("{} failed: {:?}", T::name(), err.kind());
                    writeln!(term, "{err}")?;
                    Ok(())
                }
                Err(e) => Err(e),
            },
        }
    }
}

struct InvalidArgs {
    usage: &'static str,
}

impl<C> ExecutableCommand<C> for InvalidArgs {
    fn execute(self: Box<Self>, term: &mut dyn Terminal, _ctx: &mut C) -> Result<()> {
        writeln!(term, "{}", ShellError::Usage(self.usage))?;
        Ok(())
    }
}

impl<T: BuiltinCommand + 'static> CommandFactory<T::Context> for Factory<T> {
    fn try_create(
        &self,
        name: &str,
        args: &[&str],
    ) -> Option<Box<dyn ExecutableCommand<T::Context>>> {
        if name != T::name() {
            return None;
        }
        let mut argv = Vec::with_capacity(args.len() + 1);
        argv.push("--");
        argv.extend_from_slice(args);
        Some(match T::from_args(&[T::name()], &argv) {
            Ok(cmd) => Box::new(cmd),
            Err(EarlyExit { output, .. }) => {
                log::debug!("{name}: rejected arguments {args:?}: {output}");
                Box::new(InvalidArgs { usage: T::usage() })
            }
        })
    }
}

/// File names must not be empty, e.g. `create  x` with a doubled space.
fn require_name(name: &str, usage: &'static str) -> Result<(), ShellError> {
    if name.is_empty() {
        return Err(ShellError::Usage(usage));
    }
    Ok(())
}

const HELP: &str = "\
Available commands:
  help                 - Show available commands
  clear                - Clear the screen
  about                - Info about toyos
  echo <text>          - Repeat your input
  shutdown             - Halt the system
  create <file>        - Create a file
  write <file> <text>  - Write content to a file
  read <file>          - Read file content
  delete <file>        - Delete a file
  ls                   - List all files
  calc <n1> <op> <n2>  - Simple calculator (+ - * /)
  osgame               - Start the OS learning game";

#[derive(FromArgs)]
/// Show the available commands.
pub struct Help {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Help {
    type Context = Environment;

    fn name() -> &'static str {
        "help"
    }

    fn usage() -> &'static str {
        "Usage: help"
    }

    fn execute(self, term: &mut dyn Terminal, _env: &mut Environment) -> Result<()> {
        writeln!(term, "{HELP}")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Clear the screen.
pub struct Clear {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Clear {
    type Context = Environment;

    fn name() -> &'static str {
        "clear"
    }

    fn usage() -> &'static str {
        "Usage: clear"
    }

    fn execute(self, term: &mut dyn Terminal, _env: &mut Environment) -> Result<()> {
        term.clear_screen()?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Describe this system.
pub struct About {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for About {
    type Context = Environment;

    fn name() -> &'static str {
        "about"
    }

    fn usage() -> &'static str {
        "Usage: about"
    }

    fn execute(self, term: &mut dyn Terminal, _env: &mut Environment) -> Result<()> {
        writeln!(
            term,
            "toyos - a tiny teaching OS shell with an in-memory file system and an OS learning game."
        )?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Write the text after the command name back, exactly as typed.
pub struct Echo {
    #[argh(positional, greedy)]
    /// text to print; the pieces were split on single spaces and are rejoined with one.
    pub words: Vec<String>,
}

impl BuiltinCommand for Echo {
    type Context = Environment;

    fn name() -> &'static str {
        "echo"
    }

    fn usage() -> &'static str {
        "Usage: echo <text>"
    }

    fn execute(self, term: &mut dyn Terminal, _env: &mut Environment) -> Result<()> {
        writeln!(term, "{}", self.words.join(" "))?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Halt the system.
pub struct Shutdown {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for Shutdown {
    type Context = Environment;

    fn name() -> &'static str {
        "shutdown"
    }

    fn usage() -> &'static str {
        "Usage: shutdown"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        writeln!(term, "Shutting down...")?;
        log::info!("shutdown requested");
        env.should_exit = true;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Create an empty file.
pub struct CreateFile {
    #[argh(positional)]
    /// name of the file to create, or the word `file` followed by the name.
    pub name: String,

    #[argh(positional, greedy)]
    /// the name after `file`; otherwise ignored.
    pub rest: Vec<String>,
}

impl CreateFile {
    /// `create file a.txt` names `a.txt`; a lone `create file` names `file`.
    fn target(&self) -> &str {
        match self.rest.first() {
            Some(tail) if self.name.eq_ignore_ascii_case("file") => {
                tail.split(' ').next().unwrap_or(tail)
            }
            _ => &self.name,
        }
    }
}

impl BuiltinCommand for CreateFile {
    type Context = Environment;

    fn name() -> &'static str {
        "create"
    }

    fn usage() -> &'static str {
        "Usage: create <filename>"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        let name = self.target();
        require_name(name, Self::usage())?;
        env.files.create(name)?;
        writeln!(term, "File '{name}' created.")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Replace the content of a file.
pub struct WriteFile {
    #[argh(positional)]
    /// name of an existing file.
    pub name: String,

    #[argh(positional)]
    /// new content, kept verbatim.
    pub content: String,
}

impl BuiltinCommand for WriteFile {
    type Context = Environment;

    fn name() -> &'static str {
        "write"
    }

    fn usage() -> &'static str {
        "Usage: write <filename> <content>"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        require_name(&self.name, Self::usage())?;
        env.files.write(&self.name, &self.content)?;
        writeln!(term, "Content written to '{}'.", self.name)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Print the content of a file.
pub struct ReadFile {
    #[argh(positional)]
    /// name of the file to print.
    pub name: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for ReadFile {
    type Context = Environment;

    fn name() -> &'static str {
        "read"
    }

    fn usage() -> &'static str {
        "Usage: read <filename>"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        require_name(&self.name, Self::usage())?;
        let content = env.files.read(&self.name)?;
        writeln!(term, "Contents of '{}':", self.name)?;
        writeln!(term, "{content}")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Remove a file.
pub struct DeleteFile {
    #[argh(positional)]
    /// name of the file to remove.
    pub name: String,

    #[argh(positional, greedy)]
    /// ignored.
    pub _rest: Vec<String>,
}

impl BuiltinCommand for DeleteFile {
    type Context = Environment;

    fn name() -> &'static str {
        "delete"
    }

    fn usage() -> &'static str {
        "Usage: delete <filename>"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        require_name(&self.name, Self::usage())?;
        env.files.delete(&self.name)?;
        writeln!(term, "File '{}' deleted.", self.name)?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// List all files.
pub struct ListFiles {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for ListFiles {
    type Context = Environment;

    fn name() -> &'static str {
        "ls"
    }

    fn usage() -> &'static str {
        "Usage: ls"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        if env.files.is_empty() {
            writeln!(term, "No files found.")?;
            return Ok(());
        }
        writeln!(term, "Files:")?;
        for name in env.files.list() {
            writeln!(term, "- {name}")?;
        }
        Ok(())
    }
}

#[derive(FromArgs)]
/// Simple calculator: <num1> <operator> <num2>.
pub struct Calc {
    #[argh(positional, greedy)]
    /// the expression; pieces are rejoined with single spaces before evaluation.
    pub expr: Vec<String>,
}

impl BuiltinCommand for Calc {
    type Context = Environment;

    fn name() -> &'static str {
        "calc"
    }

    fn usage() -> &'static str {
        "Usage: calc <num1> <operator> <num2>\nExample: calc 5 + 3"
    }

    fn execute(self, term: &mut dyn Terminal, _env: &mut Environment) -> Result<()> {
        if self.expr.is_empty() {
            return Err(ShellError::Usage(Self::usage()).into());
        }
        let result = calc::evaluate(&self.expr.join(" "))?;
        writeln!(term, "Result: {result}")?;
        Ok(())
    }
}

#[derive(FromArgs)]
/// Start the OS learning game.
pub struct OsGame {
    #[argh(positional, greedy)]
    /// ignored.
    pub _args: Vec<String>,
}

impl BuiltinCommand for OsGame {
    type Context = Environment;

    fn name() -> &'static str {
        "osgame"
    }

    fn usage() -> &'static str {
        "Usage: osgame"
    }

    fn execute(self, term: &mut dyn Terminal, env: &mut Environment) -> Result<()> {
        let game = env.start_game();
        log::info!("game started with {} MB", game.pool().total());
        writeln!(term, "Welcome to the OS Learning Game!")?;
        writeln!(term, "Type 'help' for commands.")?;
        Ok(())
    }
}
