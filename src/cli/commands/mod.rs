pub mod add;
pub mod backup;
pub mod clock;
pub mod config;
pub mod db;
pub mod del;
pub mod edit;
pub mod export;
pub mod init;
pub mod list;
pub mod log;
pub mod show;
pub mod stats;

use crate::errors::{AppError, AppResult};
use crate::models::{Category, CategoryFilter};

pub(crate) fn parse_category(code: &str) -> AppResult<Category> {
    Category::from_code(code).ok_or_else(|| AppError::InvalidCategory(code.to_string()))
}

pub(crate) fn parse_filter(code: Option<&String>) -> AppResult<CategoryFilter> {
    match code {
        Some(c) => CategoryFilter::from_code(c).ok_or_else(|| AppError::InvalidCategory(c.clone())),
        None => Ok(CategoryFilter::All),
    }
}
