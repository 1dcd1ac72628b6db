use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::utils::date::check_year;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        year,
        owner,
        format,
        file,
        force,
    } = cmd
    {
        let year = check_year(*year)?;
        let mut pool = DbPool::new(&cfg.database)?;
        ExportLogic::export(&mut pool, owner.target(), year, *format, file, *force)?;
    }
    Ok(())
}
