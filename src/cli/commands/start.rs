use crate::cli::commands::storage_for;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::{Intervals, Session, SystemClock};
use crate::errors::AppResult;
use crate::models::DayKey;
use crate::ui::messages::info;
use crate::ui::shell;
use crate::utils::format_hms;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Start { work, rest } = cmd {
        let work = work.unwrap_or(cfg.work_minutes);
        let rest = rest.unwrap_or(cfg.rest_minutes);

        // reject bad intervals before the day file is touched
        Intervals::from_minutes(work, rest)?;

        let day = DayKey::today();
        let storage = storage_for(cfg);
        let path = storage.path_for(&day);

        let mut session = Session::open(day, storage, SystemClock);
        session.configure(work, rest)?;

        let already = session.records().len();
        if already > 0 {
            info(format!("{already} records already logged for {day}."));
        }

        session.start()?;
        info(format!(
            "Working {work} min / resting {rest} min, first interval {}.",
            format_hms(session.remaining_seconds())
        ));

        shell::run(&mut session)?;
        info(format!("Log file: {}", path.display()));
    }
    Ok(())
}
