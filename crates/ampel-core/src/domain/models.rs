use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{UtcDateTime, ValidationError};

/// Canonical per-asset market record, created fresh each refresh cycle.
///
/// A market capitalization of 0 means "unknown" and must never be used as
/// a divisor downstream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSnapshot {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub price_usd: f64,
    pub change_24h_pct: Option<f64>,
    pub market_cap: f64,
    pub volume_24h: f64,
    pub circulating_supply: Option<f64>,
    pub total_supply: Option<f64>,
}

impl AssetSnapshot {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        symbol: impl Into<String>,
        price_usd: f64,
        change_24h_pct: Option<f64>,
        market_cap: f64,
        volume_24h: f64,
        circulating_supply: Option<f64>,
        total_supply: Option<f64>,
    ) -> Result<Self, ValidationError> {
        let id = id.into();
        if id.trim().is_empty() {
            return Err(ValidationError::EmptyAssetId);
        }
        let symbol = symbol.into();
        if symbol.trim().is_empty() {
            return Err(ValidationError::EmptyAssetSymbol);
        }

        validate_non_negative("price_usd", price_usd)?;
        validate_non_negative("market_cap", market_cap)?;
        validate_non_negative("volume_24h", volume_24h)?;
        validate_finite_optional("change_24h_pct", change_24h_pct)?;
        validate_optional_non_negative("circulating_supply", circulating_supply)?;
        validate_optional_non_negative("total_supply", total_supply)?;

        Ok(Self {
            id,
            name: name.into(),
            symbol,
            price_usd,
            change_24h_pct,
            market_cap,
            volume_24h,
            circulating_supply,
            total_supply,
        })
    }

    /// True when the asset moved down over the last 24 hours. Unknown
    /// movement counts as not-negative.
    pub fn is_in_the_red(&self) -> bool {
        self.change_24h_pct.is_some_and(|change| change < 0.0)
    }
}

/// Macro time series identifiers tracked by the risk scorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroIndicator {
    PolicyRate,
    Inflation,
    CurrencyIndex,
}

impl MacroIndicator {
    pub const ALL: [Self; 3] = [Self::PolicyRate, Self::Inflation, Self::CurrencyIndex];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::PolicyRate => "policy_rate",
            Self::Inflation => "inflation",
            Self::CurrencyIndex => "currency_index",
        }
    }
}

impl Display for MacroIndicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observation on the monthly macro axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacroPoint {
    pub month: UtcDateTime,
    pub value: f64,
}

/// Ordered macro time series, most recent observation last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MacroSeries {
    pub indicator: MacroIndicator,
    pub points: Vec<MacroPoint>,
}

impl MacroSeries {
    pub fn new(
        indicator: MacroIndicator,
        points: Vec<MacroPoint>,
    ) -> Result<Self, ValidationError> {
        for point in &points {
            if !point.value.is_finite() {
                return Err(ValidationError::NonFiniteValue { field: "value" });
            }
        }
        if points.windows(2).any(|pair| pair[0].month > pair[1].month) {
            return Err(ValidationError::UnorderedSeries {
                indicator: indicator.as_str(),
            });
        }

        Ok(Self { indicator, points })
    }

    pub fn latest(&self) -> Option<f64> {
        self.points.last().map(|point| point.value)
    }

    pub fn previous(&self) -> Option<f64> {
        let len = self.points.len();
        if len < 2 {
            return None;
        }
        Some(self.points[len - 2].value)
    }
}

/// Fear/greed style sentiment reading. Optional input to a cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentReading {
    pub value: u8,
    pub classification: String,
    pub as_of: UtcDateTime,
}

impl SentimentReading {
    pub fn new(
        value: i64,
        classification: impl Into<String>,
        as_of: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        if !(0..=100).contains(&value) {
            return Err(ValidationError::SentimentOutOfRange { value });
        }
        let classification = classification.into();
        if classification.trim().is_empty() {
            return Err(ValidationError::EmptySentimentClassification);
        }

        Ok(Self {
            value: value as u8,
            classification,
            as_of,
        })
    }
}

/// Large on-chain transfer record from the whale feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhaleTransfer {
    pub amount: f64,
    pub coin_symbol: String,
    pub from_label: String,
    pub to_label: String,
    pub amount_usd: f64,
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_finite_optional(field: &'static str, value: Option<f64>) -> Result<(), ValidationError> {
    match value {
        Some(value) if !value.is_finite() => Err(ValidationError::NonFiniteValue { field }),
        _ => Ok(()),
    }
}

fn validate_optional_non_negative(
    field: &'static str,
    value: Option<f64>,
) -> Result<(), ValidationError> {
    match value {
        Some(value) => validate_non_negative(field, value),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(change: Option<f64>) -> AssetSnapshot {
        AssetSnapshot::new(
            "ethereum",
            "Ethereum",
            "eth",
            2000.0,
            change,
            240_000_000_000.0,
            12_000_000_000.0,
            Some(120_000_000.0),
            Some(120_000_000.0),
        )
        .expect("snapshot is valid")
    }

    #[test]
    fn rejects_negative_price() {
        let err = AssetSnapshot::new(
            "ethereum", "Ethereum", "eth", -1.0, None, 0.0, 0.0, None, None,
        )
        .expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::NegativeValue { field: "price_usd" }
        );
    }

    #[test]
    fn rejects_nan_change() {
        let err = AssetSnapshot::new(
            "ethereum",
            "Ethereum",
            "eth",
            1.0,
            Some(f64::NAN),
            0.0,
            0.0,
            None,
            None,
        )
        .expect_err("must fail");
        assert_eq!(
            err,
            ValidationError::NonFiniteValue {
                field: "change_24h_pct"
            }
        );
    }

    #[test]
    fn unknown_change_is_not_in_the_red() {
        assert!(!snapshot(None).is_in_the_red());
        assert!(!snapshot(Some(0.0)).is_in_the_red());
        assert!(snapshot(Some(-0.1)).is_in_the_red());
    }

    #[test]
    fn series_rejects_unordered_points() {
        let later = UtcDateTime::parse("2024-02-01T00:00:00Z").expect("valid");
        let earlier = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("valid");
        let err = MacroSeries::new(
            MacroIndicator::PolicyRate,
            vec![
                MacroPoint {
                    month: later,
                    value: 5.0,
                },
                MacroPoint {
                    month: earlier,
                    value: 5.25,
                },
            ],
        )
        .expect_err("must fail");
        assert!(matches!(err, ValidationError::UnorderedSeries { .. }));
    }

    #[test]
    fn series_latest_and_previous() {
        let jan = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("valid");
        let feb = UtcDateTime::parse("2024-02-01T00:00:00Z").expect("valid");
        let series = MacroSeries::new(
            MacroIndicator::Inflation,
            vec![
                MacroPoint {
                    month: jan,
                    value: 3.5,
                },
                MacroPoint {
                    month: feb,
                    value: 3.1,
                },
            ],
        )
        .expect("series is valid");
        assert_eq!(series.latest(), Some(3.1));
        assert_eq!(series.previous(), Some(3.5));
    }

    #[test]
    fn sentiment_rejects_out_of_range_value() {
        let as_of = UtcDateTime::parse("2024-01-01T00:00:00Z").expect("valid");
        let err = SentimentReading::new(101, "Extreme Greed", as_of).expect_err("must fail");
        assert!(matches!(err, ValidationError::SentimentOutOfRange { value: 101 }));
    }
}
