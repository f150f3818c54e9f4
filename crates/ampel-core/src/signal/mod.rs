//! Pure signal derivation: breadth, macro risk, radar ratios, and the
//! final traffic-light classification. Everything here is a deterministic
//! function of its inputs; no external state.

mod breadth;
mod classifier;
mod macro_risk;
mod radar;

pub use breadth::{breadth_ratio, BreadthRatio};
pub use classifier::{classify, Assessment, Classification};
pub use macro_risk::{
    assess_macro, trend_label, MacroAssessment, MacroInterpretation, MacroTrends, RiskScore,
    TrendLabel,
};
pub use radar::{radar_records, RadarRecord};

/// Rounds to `decimals` places, half away from zero. Display-facing ratios
/// are stored already rounded.
pub(crate) fn round_dp(value: f64, decimals: u32) -> f64 {
    let factor = 10_f64.powi(decimals as i32);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::round_dp;

    #[test]
    fn rounds_half_away_from_zero() {
        assert_eq!(round_dp(33.35, 1), 33.4);
        assert_eq!(round_dp(0.1234, 3), 0.123);
        assert_eq!(round_dp(99.995, 2), 100.0);
    }
}
