use super::parse_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::{AppContext, short_id};
use crate::core::query::RecordQuery;
use crate::errors::AppResult;
use crate::ui::messages::{info, warning};
use crate::utils::table::{Column, Table};
use crate::utils::time::format_duration;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List {
        search,
        category,
        sort,
    } = cmd
    {
        let query = RecordQuery {
            search: search.clone(),
            category: parse_filter(category.as_ref())?,
            sort: *sort,
        };

        let ctx = AppContext::open(cfg)?;
        let user = ctx.require_user()?;

        if ctx.records.is_degraded() {
            warning("Showing the last known records: the live query is unavailable.");
        }

        let result = query.apply(ctx.records.records());
        if result.records.is_empty() {
            info(format!("No service records for {}.", user));
            return Ok(());
        }

        let mut table = Table::new(vec![
            Column::new("ID", 8),
            Column::new("DATE", 16),
            Column::new("TITLE", 28),
            Column::new("ORGANIZATION", 24),
            Column::new("CATEGORY", 17),
            Column::new("DURATION", 8),
        ]);

        for r in &result.records {
            table.add_row(vec![
                short_id(r.id.as_str()).to_string(),
                r.start_time.format("%Y-%m-%d %H:%M").to_string(),
                r.title.clone(),
                r.organization.clone(),
                r.category.label().to_string(),
                format_duration(r.duration_minutes),
            ]);
        }

        print!("{}", table.render(cfg.separator()));
        println!();
        println!(
            "{} session(s), {} total, {} average",
            result.records.len(),
            format_duration(u32::try_from(result.total_minutes).unwrap_or(u32::MAX)),
            format_duration(u32::try_from(result.average_minutes()).unwrap_or(u32::MAX))
        );
    }
    Ok(())
}
