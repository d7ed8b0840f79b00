use crate::command::{self, CommandFactory};
use crate::config::Config;
use crate::env::Environment;
use crate::io_adapters::{AnsiTerminal, Color, Terminal};
use crate::lexer;
use crate::simulator::{GameState, ResourceSimulator};
use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

/// Factory allows creating instances of ExecutableCommand.
///
/// Only supports commands defined in this crate, see `BuiltinCommand`.
pub(crate) struct Factory<T> {
    _phantom: std::marker::PhantomData<T>,
}

impl<T> Default for Factory<T> {
    fn default() -> Self {
        Self {
            _phantom: std::marker::PhantomData,
        }
    }
}

const BANNER: [&str; 6] = [
    r"  _                        ",
    r" | |_ ___  _   _  ___  ___ ",
    r" | __/ _ \| | | |/ _ \/ __|",
    r" | || (_) | |_| | (_) \__ \",
    r"  \__\___/ \__, |\___/|___/",
    r"           |___/           ",
];

/// The toyos command shell.
///
/// The interpreter owns an [`Environment`] and two command tables: one for the
/// top-level shell and one for the `osgame` sub-shell. Each input line goes to
/// exactly one of them, depending on whether a game session is active.
///
/// Example
/// ```
/// use toyos::{Config, Interpreter, MemTerminal};
/// let mut sh = Interpreter::new(Config::default());
/// let mut term = MemTerminal::new();
/// sh.step("echo hello world", &mut term).unwrap();
/// assert_eq!(term.take(), "hello world\n");
/// ```
pub struct Interpreter {
    env: Environment,
    commands: Vec<Box<dyn CommandFactory<Environment>>>,
    game_commands: Vec<Box<dyn CommandFactory<ResourceSimulator>>>,
}

impl Interpreter {
    /// Create a shell with the default command tables.
    pub fn new(config: Config) -> Self {
        use crate::builtin::*;
        use crate::game;
        Self {
            env: Environment::new(config),
            commands: vec![
                Box::new(Factory::<Help>::default()),
                Box::new(Factory::<Clear>::default()),
                Box::new(Factory::<About>::default()),
                Box::new(Factory::<Echo>::default()),
                Box::new(Factory::<Shutdown>::default()),
                Box::new(Factory::<CreateFile>::default()),
                Box::new(Factory::<WriteFile>::default()),
                Box::new(Factory::<ReadFile>::default()),
                Box::new(Factory::<DeleteFile>::default()),
                Box::new(Factory::<ListFiles>::default()),
                Box::new(Factory::<Calc>::default()),
                Box::new(Factory::<OsGame>::default()),
            ],
            game_commands: vec![
                Box::new(Factory::<game::Help>::default()),
                Box::new(Factory::<game::CreateProcess>::default()),
                Box::new(Factory::<game::KillProcess>::default()),
                Box::new(Factory::<game::UseMemory>::default()),
                Box::new(Factory::<game::FreeMemory>::default()),
                Box::new(Factory::<game::Status>::default()),
                Box::new(Factory::<game::Interrupt>::default()),
                Box::new(Factory::<game::Explain>::default()),
                Box::new(Factory::<game::Exit>::default()),
            ],
        }
    }

    pub fn env(&self) -> &Environment {
        &self.env
    }

    /// False once `shutdown` has run.
    pub fn is_running(&self) -> bool {
        !self.env.should_exit
    }

    /// True while an `osgame` session is receiving the input.
    pub fn in_game(&self) -> bool {
        self.env.game.is_some()
    }

    pub fn prompt(&self) -> &'static str {
        if self.in_game() { "osgame> " } else { "toyos> " }
    }

    /// Splash screen and greeting shown once before the first prompt.
    pub fn greet(&self, term: &mut dyn Terminal) -> Result<()> {
        if self.env.config.banner {
            term.clear_screen()?;
            term.set_color(Color::Cyan)?;
            for line in BANNER {
                writeln!(term, "{line}")?;
            }
            term.set_color(Color::White)?;
            writeln!(term)?;
        }
        writeln!(term, "Welcome to toyos!")?;
        writeln!(term, "Type 'help' to see available commands.")?;
        writeln!(term)?;
        if self.env.config.banner {
            term.reset_color()?;
        }
        Ok(())
    }

    /// Handle one line of input.
    ///
    /// Blank lines do nothing. Lines are ignored after `shutdown`. Only failures
    /// to write to `term` are returned as errors.
    pub fn step(&mut self, line: &str, term: &mut dyn Terminal) -> Result<()> {
        if !self.is_running() {
            return Ok(());
        }
        log::trace!("line {line:?}");

        if let Some(game) = self.env.game.as_mut() {
            let Some(inv) = lexer::split_words(line) else {
                return Ok(());
            };
            log::debug!("osgame: {} {:?}", inv.name, inv.args);
            command::dispatch(&self.game_commands, &inv.name, &inv.args, term, game)?;
            if game.state() == GameState::Exited {
                self.env.game = None;
                log::info!("game session ended");
                writeln!(term, "Exiting OS Learning Game. Returning to toyos...")?;
            }
            return Ok(());
        }

        let Some(inv) = lexer::split_command_line(line) else {
            return Ok(());
        };
        log::debug!("shell: {} {:?}", inv.name, inv.args);
        command::dispatch(&self.commands, &inv.name, &inv.args, term, &mut self.env)
    }

    /// Interactive Read-Eval-Print Loop on the controlling terminal.
    ///
    /// Returns after `shutdown`, Ctrl-C or end of input.
    pub fn repl(&mut self) -> Result<()> {
        let mut rl = DefaultEditor::new()?;
        let mut term = AnsiTerminal::new(std::io::stdout());
        self.greet(&mut term)?;

        while self.is_running() {
            let readline = rl.readline(self.prompt());
            match readline {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.as_str())?;
                    }
                    self.step(&line, &mut term)?;
                    term.flush()?;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    println!("Shutting down...");
                    break;
                }
                Err(err) => return Err(err.into()),
            }
        }

        Ok(())
    }
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(Config::default())
    }
}
