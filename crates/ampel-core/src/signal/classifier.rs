use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use super::{BreadthRatio, RiskScore};

/// Tri-state recommendation output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Classification {
    Favorable,
    Watch,
    Caution,
}

impl Classification {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Favorable => "FAVORABLE",
            Self::Watch => "WATCH",
            Self::Caution => "CAUTION",
        }
    }
}

impl Display for Classification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classifier output bundled with its inputs for display/explanation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Assessment {
    pub classification: Classification,
    pub surfaced_score: i64,
    pub breadth: BreadthRatio,
}

impl Assessment {
    pub fn new(score: RiskScore, breadth: BreadthRatio) -> Self {
        let surfaced_score = i64::from(score.surfaced());
        Self {
            classification: classify(surfaced_score, breadth),
            surfaced_score,
            breadth,
        }
    }
}

/// Maps the surfaced risk score and breadth ratio to a classification.
///
/// Rules are evaluated in order, first match wins:
///   1. score >= 8 and breadth > 60  => CAUTION
///   2. score >= 6 or breadth > 40   => WATCH
///   3. otherwise                    => FAVORABLE
///
/// An indeterminate breadth makes every breadth comparison false, so the
/// function rules on the score alone. Pure and total: the score is taken
/// as any integer even though the scorer only surfaces 5-10.
pub fn classify(surfaced_score: i64, breadth: BreadthRatio) -> Classification {
    if surfaced_score >= 8 && breadth.exceeds(60.0) {
        Classification::Caution
    } else if surfaced_score >= 6 || breadth.exceeds(40.0) {
        Classification::Watch
    } else {
        Classification::Favorable
    }
}
