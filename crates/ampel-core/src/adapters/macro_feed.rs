//! Macro indicator feed: three parallel numeric arrays on a monthly date
//! axis, most recent last, plus the bundled dataset used offline or when
//! no macro endpoint is configured.

use serde::Deserialize;
use time::{Date, Month, OffsetDateTime};

use crate::feed::FeedError;
use crate::{MacroIndicator, MacroPoint, MacroSeries, UtcDateTime};

/// The three series consumed by the macro risk scorer.
#[derive(Debug, Clone, PartialEq)]
pub struct MacroSet {
    pub policy_rate: MacroSeries,
    pub inflation: MacroSeries,
    pub currency_index: MacroSeries,
}

/// Wire shape: a monthly axis and three parallel value arrays.
#[derive(Debug, Deserialize)]
struct MacroPayload {
    months: Vec<String>,
    policy_rate: Vec<f64>,
    inflation: Vec<f64>,
    currency_index: Vec<f64>,
}

/// Parses a macro feed body. Each series pairs with the axis up to the
/// shorter length; a missing axis or unordered months is a decode error.
pub fn parse_macro(body: &str) -> Result<MacroSet, FeedError> {
    let payload: MacroPayload = serde_json::from_str(body)
        .map_err(|error| FeedError::decode(format!("macro body does not match shape: {error}")))?;

    let axis = parse_axis(&payload.months)?;
    Ok(MacroSet {
        policy_rate: build_series(MacroIndicator::PolicyRate, &axis, &payload.policy_rate)?,
        inflation: build_series(MacroIndicator::Inflation, &axis, &payload.inflation)?,
        currency_index: build_series(
            MacroIndicator::CurrencyIndex,
            &axis,
            &payload.currency_index,
        )?,
    })
}

fn parse_axis(months: &[String]) -> Result<Vec<UtcDateTime>, FeedError> {
    let format = time::format_description::parse("[year]-[month]-[day]")
        .map_err(|error| FeedError::decode(format!("bad axis format description: {error}")))?;

    months
        .iter()
        .map(|raw| {
            Date::parse(raw, &format)
                .map(UtcDateTime::from_date)
                .map_err(|_| FeedError::decode(format!("axis month '{raw}' is not YYYY-MM-DD")))
        })
        .collect()
}

fn build_series(
    indicator: MacroIndicator,
    axis: &[UtcDateTime],
    values: &[f64],
) -> Result<MacroSeries, FeedError> {
    let points = axis
        .iter()
        .zip(values)
        .map(|(month, value)| MacroPoint {
            month: *month,
            value: *value,
        })
        .collect();

    MacroSeries::new(indicator, points)
        .map_err(|error| FeedError::decode(format!("macro series rejected: {error}")))
}

// Twelve months of FED policy rate, CPI inflation, and DXY-style currency
// strength shipped with the binary for offline runs.
const BUNDLED_POLICY_RATE: [f64; 12] = [
    0.25, 0.25, 0.5, 1.0, 1.75, 2.5, 3.25, 4.0, 4.5, 5.0, 5.25, 5.5,
];
const BUNDLED_INFLATION: [f64; 12] = [
    1.6, 2.0, 2.5, 3.0, 4.5, 6.0, 8.0, 7.0, 6.5, 5.0, 3.5, 3.1,
];
const BUNDLED_CURRENCY_INDEX: [f64; 12] = [
    89.0, 90.0, 91.0, 93.0, 95.0, 97.0, 100.0, 102.0, 104.0, 106.0, 105.0, 103.0,
];

/// Bundled macro dataset on a monthly axis ending at the current month.
pub fn bundled_macro() -> MacroSet {
    let axis = monthly_axis(OffsetDateTime::now_utc().date(), BUNDLED_POLICY_RATE.len());

    let series = |indicator: MacroIndicator, values: &[f64]| {
        let points = axis
            .iter()
            .zip(values)
            .map(|(month, value)| MacroPoint {
                month: *month,
                value: *value,
            })
            .collect();
        MacroSeries::new(indicator, points).expect("bundled macro dataset is ordered")
    };

    MacroSet {
        policy_rate: series(MacroIndicator::PolicyRate, &BUNDLED_POLICY_RATE),
        inflation: series(MacroIndicator::Inflation, &BUNDLED_INFLATION),
        currency_index: series(MacroIndicator::CurrencyIndex, &BUNDLED_CURRENCY_INDEX),
    }
}

/// The last `len` month starts up to and including the month of `anchor`,
/// ascending.
fn monthly_axis(anchor: Date, len: usize) -> Vec<UtcDateTime> {
    let mut year = anchor.year();
    let mut month = anchor.month();
    let mut axis = Vec::with_capacity(len);

    for _ in 0..len {
        let start = Date::from_calendar_date(year, month, 1)
            .expect("day 1 exists in every month");
        axis.push(UtcDateTime::from_date(start));
        if month == Month::January {
            year -= 1;
        }
        month = month.previous();
    }

    axis.reverse();
    axis
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signal::{assess_macro, TrendLabel};

    #[test]
    fn parses_parallel_arrays() {
        let body = r#"{
            "months": ["2024-01-01", "2024-02-01", "2024-03-01"],
            "policy_rate": [5.25, 5.5, 5.5],
            "inflation": [3.1, 3.2, 3.5],
            "currency_index": [103.0, 104.0, 102.5]
        }"#;

        let set = parse_macro(body).expect("body matches shape");
        assert_eq!(set.policy_rate.points.len(), 3);
        assert_eq!(set.policy_rate.latest(), Some(5.5));
        assert_eq!(set.inflation.latest(), Some(3.5));
        assert_eq!(set.currency_index.previous(), Some(104.0));
    }

    #[test]
    fn shorter_series_pairs_up_to_axis_length() {
        let body = r#"{
            "months": ["2024-01-01", "2024-02-01", "2024-03-01"],
            "policy_rate": [5.25, 5.5],
            "inflation": [3.1, 3.2, 3.5],
            "currency_index": [103.0, 104.0, 102.5]
        }"#;

        let set = parse_macro(body).expect("body matches shape");
        assert_eq!(set.policy_rate.points.len(), 2);
    }

    #[test]
    fn rejects_bad_axis() {
        let body = r#"{
            "months": ["January"],
            "policy_rate": [5.25],
            "inflation": [3.1],
            "currency_index": [103.0]
        }"#;
        let error = parse_macro(body).expect_err("axis is unparseable");
        assert_eq!(error.code(), "feed.decode");
    }

    #[test]
    fn bundled_dataset_is_complete_and_ordered() {
        let set = bundled_macro();
        assert_eq!(set.policy_rate.points.len(), 12);
        assert_eq!(set.inflation.points.len(), 12);
        assert_eq!(set.currency_index.points.len(), 12);
        assert_eq!(set.policy_rate.latest(), Some(5.5));
    }

    #[test]
    fn bundled_dataset_scores_maximum_risk() {
        let set = bundled_macro();
        let assessment = assess_macro(
            Some(&set.policy_rate),
            Some(&set.inflation),
            Some(&set.currency_index),
        );
        // 5.5 > 4, 103 > 102, 3.1 > 3.
        assert_eq!(assessment.score.raw(), 5);
        assert_eq!(assessment.trends.policy_rate, TrendLabel::Rising);
        assert_eq!(assessment.trends.inflation, TrendLabel::Falling);
        assert_eq!(assessment.trends.currency_index, TrendLabel::Falling);
    }

    #[test]
    fn monthly_axis_crosses_year_boundary() {
        let anchor = Date::from_calendar_date(2024, Month::February, 15).expect("valid date");
        let axis = monthly_axis(anchor, 4);
        let formatted: Vec<String> = axis.iter().map(|ts| ts.format_rfc3339()).collect();
        assert_eq!(
            formatted,
            vec![
                "2023-11-01T00:00:00Z",
                "2023-12-01T00:00:00Z",
                "2024-01-01T00:00:00Z",
                "2024-02-01T00:00:00Z",
            ]
        );
    }
}
