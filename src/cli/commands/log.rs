use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print, last } = cmd
        && (*print || last.is_some())
    {
        let mut pool = super::open_pool(cfg)?;
        LogLogic::print_log(&mut pool, *last)?;
    }

    Ok(())
}
