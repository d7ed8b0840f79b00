//! A tiny operating-system simulator for the classroom.
//!
//! `toyos` is an interactive shell with an in-memory file store and a nested
//! "OS learning game" that models processes, memory allocation and interrupts
//! as simple textbook abstractions. Nothing touches the real filesystem or
//! spawns real processes; all state lives in one [`Interpreter`] and is gone
//! when it is dropped.
//!
//! The main entry point is [`Interpreter`]: feed it lines with
//! [`Interpreter::step`], or hand it the terminal with [`Interpreter::repl`].
//! Output always goes through a [`Terminal`], so tests can capture it with
//! [`MemTerminal`].

mod builtin;
mod calc;
pub mod command;
pub mod config;
pub mod env;
pub mod error;
mod game;
mod interpreter;
pub mod io_adapters;
pub mod lexer;
pub mod logging;
pub mod simulator;
pub mod vfs;

pub use config::{Args, Config};
pub use error::{ErrorKind, ShellError};
pub use interpreter::Interpreter;
pub use io_adapters::{AnsiTerminal, Color, MemTerminal, Terminal};
