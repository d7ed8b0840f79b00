use crate::config::Config;
use crate::simulator::ResourceSimulator;
use crate::vfs::FileStore;

/// Mutable state of one shell session, handed to every top-level command.
///
/// The environment contains:
/// - `files`: the virtual file store, alive for the whole session.
/// - `config`: settings the session was started with.
/// - `game`: the running `osgame` session, if any. While it is `Some`, input
///   lines are routed to the game instead of the shell.
/// - `should_exit`: set by `shutdown`; the REPL stops once it is true.
///
/// Fields are public to keep commands short.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub files: FileStore,
    pub config: Config,
    pub game: Option<ResourceSimulator>,
    pub should_exit: bool,
}

impl Environment {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// Begin a fresh game session sized from the config.
    ///
    /// Any state from an earlier session is discarded.
    pub fn start_game(&mut self) -> &mut ResourceSimulator {
        self.game
            .insert(ResourceSimulator::new(self.config.total_memory))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulator::GameState;

    #[test]
    fn test_start_game_uses_configured_memory() {
        let mut env = Environment::new(Config {
            total_memory: 64,
            ..Config::default()
        });
        let game = env.start_game();
        assert_eq!(game.pool().total(), 64);
        assert_eq!(game.state(), GameState::Active);
    }

    #[test]
    fn test_start_game_discards_previous_session() {
        let mut env = Environment::default();
        env.start_game().create_process("p1").unwrap();
        assert!(env.start_game().processes().is_empty());
    }
}
