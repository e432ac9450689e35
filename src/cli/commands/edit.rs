use super::parse_category;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::entry::EditForm;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Apply the edit form to an existing session.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
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
        let category = category.as_deref().map(parse_category).transpose()?;

        let form = EditForm {
            title: title.clone(),
            organization: organization.clone(),
            description: description.clone(),
            date: date.clone(),
            start_time: start.clone(),
            duration: duration.clone(),
            category,
            notes: notes.clone(),
            supervisor: supervisor.clone(),
            location: location.clone(),
        };

        let ctx = AppContext::open(cfg)?;
        ctx.require_user()?;

        let current = ctx.resolve(id)?;
        let patch = form.to_patch(current)?;

        if patch.is_empty() {
            info("Nothing to change.");
            return Ok(());
        }

        let record_id = current.id.clone();
        ctx.records.update(&record_id, &patch)?;
        success(format!("Record {} updated.", record_id));
    }

    Ok(())
}
