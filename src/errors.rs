//! Unified application error type.
//! All modules (store, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Record store / clock
    // ---------------------------
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Record not found: {0}")]
    NotFound(String),

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Invalid duration: {0}")]
    InvalidDuration(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// Short machine-friendly name of the error kind, used in audit log lines.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Persistence(_) => "persistence",
            AppError::InvalidState(_) => "invalid_state",
            AppError::Io(_) => "io",
            AppError::Db(_) | AppError::Migration(_) => "db",
            AppError::InvalidDate(_)
            | AppError::InvalidTime(_)
            | AppError::InvalidCategory(_)
            | AppError::InvalidDuration(_) => "parse",
            AppError::Config(_) | AppError::ConfigLoad => "config",
            AppError::Export(_) => "export",
            AppError::Other(_) => "other",
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
