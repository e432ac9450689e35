use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::errors::AppResult;
use crate::models::ServiceRecord;
use crate::utils::colors::{CYAN, GREY, RESET, color_for_category};
use crate::utils::date::format_date_time;
use crate::utils::formatting::bold;
use crate::utils::time::format_duration;

const WRAP: usize = 72;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Show { id } = cmd {
        let ctx = AppContext::open(cfg)?;
        ctx.require_user()?;

        let record = ctx.resolve(id)?;
        print_record(record);
    }
    Ok(())
}

fn field(label: &str, value: Option<&str>) {
    match value {
        Some(v) if !v.trim().is_empty() => println!("{CYAN}{label:<13}{RESET} {v}"),
        _ => println!("{CYAN}{label:<13}{RESET} {GREY}--{RESET}"),
    }
}

fn print_record(r: &ServiceRecord) {
    println!("{}", bold(&r.title));
    println!(
        "{}{}{}  ·  {}",
        color_for_category(r.category),
        r.category,
        RESET,
        r.organization
    );
    println!();

    field("ID", Some(r.id.as_str()));
    field("Start", Some(&format_date_time(&r.start_time)));
    field("End", r.end_time.as_ref().map(format_date_time).as_deref());
    field("Duration", Some(&format_duration(r.duration_minutes)));
    field("Supervisor", r.supervisor.as_deref());
    field("Location", r.location.as_deref());

    println!();
    println!("{CYAN}Description{RESET}");
    for line in textwrap::wrap(&r.description, WRAP) {
        println!("  {line}");
    }

    if let Some(notes) = &r.notes {
        println!("{CYAN}Notes{RESET}");
        for line in textwrap::wrap(notes, WRAP) {
            println!("  {line}");
        }
    }
}
