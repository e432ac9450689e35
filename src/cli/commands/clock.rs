use super::parse_category;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::clock::SessionClock;
use crate::core::context::{AppContext, short_id};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{error, info, success, warning};
use crate::utils::date::format_date_time;
use crate::utils::formatting::hours;
use crate::utils::time::{format_clock, format_duration};
use chrono::Local;
use std::io::{self, Write};

/// Clock in, wait for the user to finish, clock out.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Clock {
        title,
        organization,
        category,
    } = cmd
    {
        let mut ctx = AppContext::open(cfg)?;
        ctx.require_user()?;

        let category = match category {
            Some(c) => parse_category(c)?,
            None => cfg.default_category()?,
        };

        let mut clock = SessionClock::new();
        let session = clock.clock_in(title, organization, category)?;
        success(format!(
            "Clocked in: '{}' @ {} [{}] since {}",
            session.title,
            session.organization,
            session.category,
            format_date_time(&session.start_time)
        ));

        info("Type optional notes, then press Enter to clock out.");
        print!("> ");
        io::stdout().flush().ok();

        let mut notes = String::new();
        io::stdin().read_line(&mut notes)?;

        if let Some(elapsed) = clock.elapsed(Local::now()) {
            info(format!("Session time: {}", format_clock(elapsed.num_seconds())));
        }

        match clock.clock_out(&ctx.records, Some(notes.trim())) {
            Ok(done) => {
                success(format!(
                    "Clocked out after {} (record {}).",
                    format_duration(done.record.duration_minutes),
                    short_id(done.id.as_str())
                ));
            }
            Err(e) => {
                // the session is not kept: report and leave a trace in the audit log
                error(format!("Session could not be saved and was discarded: {}", e));
                let audited = DbPool::new(&cfg.database)
                    .map_err(AppError::from)
                    .and_then(|pool| ttlog(&pool.conn, "clock", e.kind(), &e.to_string()));
                if let Err(log_err) = audited {
                    warning(format!("Failed to record the discarded session in the log: {}", log_err));
                }
                return Err(e);
            }
        }

        ctx.records.poll();
        let stats = ctx.records.stats(Local::now());
        info(format!(
            "This week: {}  |  This month: {}  |  Total: {}",
            hours(stats.this_week_hours),
            hours(stats.this_month_hours),
            hours(stats.total_hours)
        ));
    }

    Ok(())
}
