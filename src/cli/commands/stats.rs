use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::{AppContext, short_id};
use crate::core::query::recent;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{header, info, warning};
use crate::utils::colors::{GREEN, RESET};
use crate::utils::formatting::pad_right;
use crate::utils::time::format_duration;
use chrono::Local;

/// Dashboard: totals plus the most recent sessions.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Stats { json } = cmd {
        let ctx = AppContext::open(cfg)?;
        let user = ctx.require_user()?;
        let stats = ctx.records.stats(Local::now());

        if *json {
            let out = serde_json::to_string_pretty(&stats)
                .map_err(|e| AppError::Other(e.to_string()))?;
            println!("{out}");
            return Ok(());
        }

        if ctx.records.is_degraded() {
            warning("Statistics are based on the last known records.");
        }

        header(format!("Service hours for {}", user));
        println!("{}{GREEN}{:.1}{RESET}", pad_right("Total hours:", 16), stats.total_hours);
        println!("{}{:.1}", pad_right("This week:", 16), stats.this_week_hours);
        println!("{}{:.1}", pad_right("This month:", 16), stats.this_month_hours);
        println!("{}{}", pad_right("Sessions:", 16), stats.completed_sessions);
        println!();

        let latest = recent(ctx.records.records(), cfg.recent_sessions);
        if latest.is_empty() {
            info("No sessions yet. Clock in or add one to get started.");
            return Ok(());
        }

        println!("Recent sessions:");
        for r in latest {
            println!(
                "  {}  {}  {} @ {} ({})",
                short_id(r.id.as_str()),
                r.start_time.format("%Y-%m-%d"),
                r.title,
                r.organization,
                format_duration(r.duration_minutes)
            );
        }
    }
    Ok(())
}
