use anyhow::Result;
use toyos::{Args, Config, Interpreter, logging};

fn main() -> Result<()> {
    let args: Args = argh::from_env();
    let config = Config::try_from(args)?;
    logging::init(config.log_level)?;
    log::debug!("starting with {config:?}");

    Interpreter::new(config).repl()
}
