use crate::simulator::DEFAULT_TOTAL_MEMORY;
use anyhow::{Result, bail};
use argh::FromArgs;
use log::LevelFilter;

#[derive(FromArgs, Debug)]
/// Interactive teaching shell with an in-memory file store and an OS learning game.
pub struct Args {
    #[argh(option, default = "DEFAULT_TOTAL_MEMORY")]
    /// memory available to the OS learning game, in MB. Defaults to 1024.
    pub total_memory: u64,

    #[argh(switch)]
    /// skip the splash screen on start-up.
    pub no_banner: bool,

    #[argh(switch, short = 'v')]
    /// log command dispatch to stderr.
    pub verbose: bool,

    #[argh(switch)]
    /// log everything, including each line read.
    pub trace: bool,
}

/// Settings for one shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Pool size handed to every new game session, in MB.
    pub total_memory: u64,
    pub banner: bool,
    pub log_level: LevelFilter,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            total_memory: DEFAULT_TOTAL_MEMORY,
            banner: true,
            log_level: LevelFilter::Warn,
        }
    }
}

impl TryFrom<Args> for Config {
    type Error = anyhow::Error;

    fn try_from(args: Args) -> Result<Self> {
        if args.total_memory == 0 {
            bail!("--total-memory must be greater than zero");
        }
        let log_level = if args.trace {
            LevelFilter::Trace
        } else if args.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Warn
        };
        Ok(Self {
            total_memory: args.total_memory,
            banner: !args.no_banner,
            log_level,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["toyos"], args).unwrap()
    }

    #[test]
    fn test_defaults() {
        let config = Config::try_from(parse(&[])).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_flags() {
        let config = Config::try_from(parse(&["--total-memory", "256", "--no-banner", "-v"])).unwrap();
        assert_eq!(config.total_memory, 256);
        assert!(!config.banner);
        assert_eq!(config.log_level, LevelFilter::Debug);

        let config = Config::try_from(parse(&["--trace", "--verbose"])).unwrap();
        assert_eq!(config.log_level, LevelFilter::Trace);
    }

    #[test]
    fn test_zero_memory_rejected() {
        assert!(Config::try_from(parse(&["--total-memory", "0"])).is_err());
    }

    #[test]
    fn test_bad_memory_value_is_an_argh_error() {
        let res = Args::from_args(&["toyos"], &["--total-memory", "lots"]);
        assert!(res.is_err());
    }
}
