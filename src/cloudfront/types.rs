//! CloudFront data types

use std::fmt;

/// A distribution as shown before invalidating it
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Distribution {
    pub id: String,
    pub arn: String,
    pub comment: String,
    pub aliases: Vec<String>,
}

/// Entry of `ListDistributions`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DistributionSummary {
    pub id: String,
    pub aliases: Vec<String>,
}

/// One page of `ListDistributions`
#[derive(Debug, Clone, Default)]
pub struct DistributionPage {
    pub items: Vec<DistributionSummary>,
    pub next_marker: Option<String>,
}

/// Invalidation progress as reported by `GetInvalidation`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvalidationStatus {
    InProgress,
    Completed,
    Other(String),
}

impl InvalidationStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, InvalidationStatus::Completed)
    }
}

impl From<&str> for InvalidationStatus {
    fn from(s: &str) -> Self {
        match s {
            "InProgress" => InvalidationStatus::InProgress,
            "Completed" => InvalidationStatus::Completed,
            other => InvalidationStatus::Other(other.to_string()),
        }
    }
}

impl fmt::Display for InvalidationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidationStatus::InProgress => write!(f, "InProgress"),
            InvalidationStatus::Completed => write!(f, "Completed"),
            InvalidationStatus::Other(s) => write!(f, "{}", s),
        }
    }
}
