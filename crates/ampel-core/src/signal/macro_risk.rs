use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{MacroIndicator, MacroSeries};

/// Policy rate above this many percentage points reads as tight money.
pub const POLICY_RATE_TIGHT: f64 = 4.0;
/// Currency-strength index above this level reads as a strong dollar.
pub const CURRENCY_INDEX_STRONG: f64 = 102.0;
/// Inflation above this many percentage points reads as hot.
pub const INFLATION_HOT: f64 = 3.0;

/// Composite macro risk score. The raw sum of the threshold contributions
/// lies in [0,5]; the surfaced value adds a fixed +5 baseline so the score
/// reads on the user-facing 1-10 scale. The offset must be preserved
/// exactly for output compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u8")]
pub struct RiskScore(u8);

impl From<u8> for RiskScore {
    fn from(raw: u8) -> Self {
        Self::from_raw(raw)
    }
}

impl RiskScore {
    pub const BASELINE_OFFSET: u8 = 5;
    pub const RAW_MAX: u8 = 5;

    /// Raw scores above [`Self::RAW_MAX`] cannot arise from the scorer;
    /// clamp rather than panic when constructed directly.
    pub fn from_raw(raw: u8) -> Self {
        Self(raw.min(Self::RAW_MAX))
    }

    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Score as shown to users and fed to the classifier.
    pub const fn surfaced(self) -> u8 {
        self.0 + Self::BASELINE_OFFSET
    }
}

impl Display for RiskScore {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/10", self.surfaced())
    }
}

/// Qualitative direction annotation for one macro series. Informational
/// only; trends never feed back into the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendLabel {
    Rising,
    Falling,
    InsufficientData,
}

impl TrendLabel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rising => "rising",
            Self::Falling => "falling",
            Self::InsufficientData => "insufficient data",
        }
    }
}

impl Display for TrendLabel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trend labels for the three tracked series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MacroTrends {
    pub policy_rate: TrendLabel,
    pub inflation: TrendLabel,
    pub currency_index: TrendLabel,
}

/// Display hint derived from the surfaced score, mirroring the dashboard's
/// macro interpretation banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroInterpretation {
    /// Surfaced score >= 8: prefer defensive assets.
    Defensive,
    /// Surfaced score >= 6: stay selective with risk assets.
    Selective,
    /// Lower scores: environment friendly to risk assets.
    RiskFriendly,
}

impl MacroInterpretation {
    pub const fn from_score(score: RiskScore) -> Self {
        if score.surfaced() >= 8 {
            Self::Defensive
        } else if score.surfaced() >= 6 {
            Self::Selective
        } else {
            Self::RiskFriendly
        }
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Defensive => "high macro risk, prefer defensive assets",
            Self::Selective => "moderate macro risk, stay selective",
            Self::RiskFriendly => "low macro risk, environment favors risk assets",
        }
    }
}

/// Scorer output for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroAssessment {
    pub score: RiskScore,
    pub trends: MacroTrends,
    pub interpretation: MacroInterpretation,
    /// Series that were absent this cycle and contributed 0 to the score.
    pub missing: Vec<MacroIndicator>,
}

/// Derives the macro risk score and trend labels. A missing series drops
/// out of the summation with contribution 0; the scorer never fails.
pub fn assess_macro(
    policy_rate: Option<&MacroSeries>,
    inflation: Option<&MacroSeries>,
    currency_index: Option<&MacroSeries>,
) -> MacroAssessment {
    let mut raw = 0_u8;
    let mut missing = Vec::new();

    match policy_rate.and_then(MacroSeries::latest) {
        Some(latest) if latest > POLICY_RATE_TIGHT => raw += 2,
        Some(_) => {}
        None => missing.push(MacroIndicator::PolicyRate),
    }
    match currency_index.and_then(MacroSeries::latest) {
        Some(latest) if latest > CURRENCY_INDEX_STRONG => raw += 2,
        Some(_) => {}
        None => missing.push(MacroIndicator::CurrencyIndex),
    }
    match inflation.and_then(MacroSeries::latest) {
        Some(latest) if latest > INFLATION_HOT => raw += 1,
        Some(_) => {}
        None => missing.push(MacroIndicator::Inflation),
    }

    let score = RiskScore(raw);
    MacroAssessment {
        score,
        trends: MacroTrends {
            policy_rate: opt_trend(policy_rate),
            inflation: opt_trend(inflation),
            currency_index: opt_trend(currency_index),
        },
        interpretation: MacroInterpretation::from_score(score),
        missing,
    }
}

/// Trend label for one series: rising iff the latest value exceeds the
/// second-most-recent one, falling otherwise, insufficient data under two
/// points.
pub fn trend_label(series: &MacroSeries) -> TrendLabel {
    match (series.latest(), series.previous()) {
        (Some(latest), Some(previous)) => {
            if latest > previous {
                TrendLabel::Rising
            } else {
                TrendLabel::Falling
            }
        }
        _ => TrendLabel::InsufficientData,
    }
}

fn opt_trend(series: Option<&MacroSeries>) -> TrendLabel {
    series.map_or(TrendLabel::InsufficientData, trend_label)
}
