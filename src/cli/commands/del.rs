use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::ui::messages::{info, success, warning};
use crate::utils::date::format_date_time;

use std::io::{self, Write};

/// Ask a yes/no confirmation from the user
fn ask_confirmation(prompt: &str) -> bool {
    warning(prompt);
    print!("Confirm [y/N]: ");
    let _ = io::stdout().flush();

    let mut s = String::new();
    if io::stdin().read_line(&mut s).is_ok() {
        matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
    } else {
        false
    }
}

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let ctx = AppContext::open(cfg)?;
        ctx.require_user()?;

        let record = ctx.resolve(id)?;
        let prompt = format!(
            "Delete '{}' of {}? This action is irreversible.",
            record.title,
            format_date_time(&record.start_time)
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let record_id = record.id.clone();
        ctx.records.delete(&record_id)?;
        success(format!("Record {} has been deleted.", record_id));
    }

    Ok(())
}
