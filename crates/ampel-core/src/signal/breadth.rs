use std::fmt::{Display, Formatter};

use serde::{Serialize, Serializer};

use crate::AssetSnapshot;

use super::round_dp;

/// Share of tracked assets in negative 24h movement, or an explicit
/// indeterminate state for an empty snapshot set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BreadthRatio {
    /// Percentage in [0,100], rounded to one decimal place.
    Percent(f64),
    Indeterminate,
}

impl BreadthRatio {
    /// Breadth comparisons against an indeterminate ratio are false; the
    /// classifier then rules on the risk score alone.
    pub fn exceeds(self, threshold: f64) -> bool {
        match self {
            Self::Percent(value) => value > threshold,
            Self::Indeterminate => false,
        }
    }

    pub fn percent(self) -> Option<f64> {
        match self {
            Self::Percent(value) => Some(value),
            Self::Indeterminate => None,
        }
    }
}

impl Display for BreadthRatio {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Percent(value) => write!(f, "{value:.1}%"),
            Self::Indeterminate => f.write_str("indeterminate"),
        }
    }
}

impl Serialize for BreadthRatio {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Percent(value) => serializer.serialize_f64(*value),
            Self::Indeterminate => serializer.serialize_str("indeterminate"),
        }
    }
}

/// Computes the breadth ratio over one cycle's snapshot set.
pub fn breadth_ratio(snapshots: &[AssetSnapshot]) -> BreadthRatio {
    if snapshots.is_empty() {
        return BreadthRatio::Indeterminate;
    }

    let negative = snapshots
        .iter()
        .filter(|snapshot| snapshot.is_in_the_red())
        .count();

    BreadthRatio::Percent(round_dp(
        negative as f64 / snapshots.len() as f64 * 100.0,
        1,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(change: Option<f64>) -> AssetSnapshot {
        AssetSnapshot::new(
            "asset", "Asset", "ast", 1.0, change, 0.0, 0.0, None, None,
        )
        .expect("snapshot is valid")
    }

    #[test]
    fn empty_set_is_indeterminate() {
        assert_eq!(breadth_ratio(&[]), BreadthRatio::Indeterminate);
        assert!(!BreadthRatio::Indeterminate.exceeds(0.0));
    }

    #[test]
    fn counts_only_present_negative_changes() {
        let snapshots = vec![
            snapshot(Some(-2.0)),
            snapshot(Some(1.5)),
            snapshot(None),
            snapshot(Some(-0.1)),
            snapshot(Some(0.0)),
            snapshot(Some(-7.3)),
        ];
        // 3 of 6 in the red.
        assert_eq!(breadth_ratio(&snapshots), BreadthRatio::Percent(50.0));
    }

    #[test]
    fn rounds_to_one_decimal() {
        let snapshots = vec![
            snapshot(Some(-1.0)),
            snapshot(Some(1.0)),
            snapshot(Some(1.0)),
        ];
        assert_eq!(breadth_ratio(&snapshots), BreadthRatio::Percent(33.3));
    }

    #[test]
    fn stays_within_bounds() {
        let all_red = vec![snapshot(Some(-1.0)); 7];
        assert_eq!(breadth_ratio(&all_red), BreadthRatio::Percent(100.0));

        let none_red = vec![snapshot(Some(1.0)); 7];
        assert_eq!(breadth_ratio(&none_red), BreadthRatio::Percent(0.0));
    }
}
