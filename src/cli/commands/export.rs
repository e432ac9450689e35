use super::parse_filter;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::context::AppContext;
use crate::core::query::RecordQuery;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        search,
        category,
        force,
    } = cmd
    {
        let query = RecordQuery {
            search: search.clone(),
            category: parse_filter(category.as_ref())?,
            ..RecordQuery::default()
        };

        let ctx = AppContext::open(cfg)?;
        ctx.require_user()?;

        let result = query.apply(ctx.records.records());
        ExportLogic::export(&result.records, *format, file, *force)?;
    }

    Ok(())
}
