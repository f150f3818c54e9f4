use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Canonical feed identifiers used in statuses, logs, and the CLI `feeds`
/// listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedId {
    Markets,
    MacroSeries,
    Sentiment,
    Whale,
}

impl FeedId {
    pub const ALL: [Self; 4] = [
        Self::Markets,
        Self::MacroSeries,
        Self::Sentiment,
        Self::Whale,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Markets => "markets",
            Self::MacroSeries => "macro_series",
            Self::Sentiment => "sentiment",
            Self::Whale => "whale",
        }
    }
}

impl Display for FeedId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Feed-level error classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedErrorKind {
    Unavailable,
    NonSuccessStatus,
    Timeout,
    Decode,
    InvalidRequest,
}

/// Structured feed error used to mark a section degraded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedError {
    kind: FeedErrorKind,
    message: String,
    retryable: bool,
}

impl FeedError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Unavailable,
            message: message.into(),
            retryable: true,
        }
    }

    pub fn non_success_status(status: u16) -> Self {
        Self {
            kind: FeedErrorKind::NonSuccessStatus,
            message: format!("upstream returned non-success status {status}"),
            retryable: status >= 500 || status == 429,
        }
    }

    pub fn timeout(timeout_ms: u64) -> Self {
        Self {
            kind: FeedErrorKind::Timeout,
            message: format!("upstream did not respond within {timeout_ms}ms"),
            retryable: true,
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::Decode,
            message: message.into(),
            retryable: false,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            kind: FeedErrorKind::InvalidRequest,
            message: message.into(),
            retryable: false,
        }
    }

    pub const fn kind(&self) -> FeedErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn retryable(&self) -> bool {
        self.retryable
    }

    pub const fn code(&self) -> &'static str {
        match self.kind {
            FeedErrorKind::Unavailable => "feed.unavailable",
            FeedErrorKind::NonSuccessStatus => "feed.non_success_status",
            FeedErrorKind::Timeout => "feed.timeout",
            FeedErrorKind::Decode => "feed.decode",
            FeedErrorKind::InvalidRequest => "feed.invalid_request",
        }
    }
}

impl Display for FeedError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code())
    }
}

impl std::error::Error for FeedError {}

/// Per-section contribution state carried on every cycle report.
///
/// A degraded feed never aborts the cycle; the section it backs renders a
/// labeled fallback instead. Sections toggled off by configuration carry
/// `Disabled` with empty content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FeedStatus {
    Ok,
    Degraded { code: String, message: String },
    NoData,
    Disabled,
}

impl FeedStatus {
    pub fn degraded(error: &FeedError) -> Self {
        Self::Degraded {
            code: error.code().to_owned(),
            message: error.message().to_owned(),
        }
    }

    pub const fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::Degraded { .. })
    }

    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled)
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Ok => "ok",
            Self::Degraded { .. } => "degraded",
            Self::NoData => "no data",
            Self::Disabled => "disabled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_are_retryable() {
        assert!(FeedError::non_success_status(503).retryable());
        assert!(FeedError::non_success_status(429).retryable());
        assert!(!FeedError::non_success_status(404).retryable());
    }

    #[test]
    fn degraded_status_carries_code_and_message() {
        let status = FeedStatus::degraded(&FeedError::timeout(10_000));
        assert!(status.is_degraded());
        assert_eq!(
            status,
            FeedStatus::Degraded {
                code: "feed.timeout".to_owned(),
                message: "upstream did not respond within 10000ms".to_owned(),
            }
        );
    }
}
