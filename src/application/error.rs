use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Please enter customer name")]
    MissingCustomerName,

    #[error("Service provider not found: {0}")]
    ProviderNotFound(String),

    #[error("Service date {date} is before today ({today})")]
    ServiceDateInPast { date: NaiveDate, today: NaiveDate },

    #[error("Unknown category '{category}'. Valid categories: All, {}", .valid.join(", "))]
    UnknownCategory { category: String, valid: Vec<String> },

    #[error("{0} is not available yet")]
    FeatureUnavailable(&'static str),

    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}
