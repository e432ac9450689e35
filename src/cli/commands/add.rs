use super::parse_category;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::entry::EntryForm;
use crate::errors::AppResult;
use crate::ui::messages::success;
use crate::utils::date::format_date_time;
use crate::utils::time::format_duration;

/// Log a completed session from the manual entry form.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        title,
        organization,
        description,
        date,
        start,
        duration,
        category,
        notes,
        supervisor,
        location,
    } = cmd
    {
        let category = match category {
            Some(c) => parse_category(c)?,
            None => cfg.default_category()?,
        };

        let form = EntryForm {
            title: title.clone(),
            organization: organization.clone(),
            description: description.clone(),
            date: date.clone(),
            start_time: start.clone(),
            duration: duration.clone(),
            category: Some(category),
            notes: notes.clone(),
            supervisor: supervisor.clone(),
            location: location.clone(),
        };

        // parse before opening the store: bad input never reaches it
        let record = form.to_record()?;

        let ctx = AppContext::open(cfg)?;
        ctx.require_user()?;
        let id = ctx.records.create(&record)?;

        success(format!(
            "Logged '{}' on {} ({}) as {}",
            record.title,
            format_date_time(&record.start_time),
            format_duration(record.duration_minutes),
            id
        ));
    }

    Ok(())
}
