use crate::agent::Decision;
use serde::{Deserialize, Serialize};

/// Monotonic counters of sensing outcomes, one per [`Decision`] category,
/// accumulated across every tick. The pipeline never resets them; [`reset`]
/// is an explicit external operation.
///
/// [`reset`]: DecisionStats::reset
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecisionStats {
    pub straight: u64,
    pub left: u64,
    pub right: u64,
    pub indecisive: u64,
}

/// Per-category share of all recorded decisions.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct DecisionRatios {
    pub straight: f64,
    pub left: f64,
    pub right: f64,
    pub indecisive: f64,
}

impl DecisionStats {
    pub fn record(&mut self, decision: Decision) {
        match decision {
            Decision::Straight => self.straight += 1,
            Decision::Left => self.left += 1,
            Decision::Right => self.right += 1,
            Decision::Indecisive => self.indecisive += 1,
        }
    }

    pub fn total(&self) -> u64 {
        self.straight + self.left + self.right + self.indecisive
    }

    /// Each counter divided by the grand total. All zeros when nothing has
    /// been recorded; never divides by zero.
    pub fn ratios(&self) -> DecisionRatios {
        let total = self.total();
        if total == 0 {
            return DecisionRatios::default();
        }
        let total = total as f64;
        DecisionRatios {
            straight: self.straight as f64 / total,
            left: self.left as f64 / total,
            right: self.right as f64 / total,
            indecisive: self.indecisive as f64 / total,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_increments_the_matching_counter() {
        let mut stats = DecisionStats::default();
        stats.record(Decision::Left);
        stats.record(Decision::Left);
        stats.record(Decision::Indecisive);
        assert_eq!(stats.left, 2);
        assert_eq!(stats.indecisive, 1);
        assert_eq!(stats.total(), 3);
    }

    #[test]
    fn ratios_are_all_zero_before_any_decision() {
        let stats = DecisionStats::default();
        assert_eq!(stats.ratios(), DecisionRatios::default());
    }

    #[test]
    fn ratios_sum_to_one_once_populated() {
        let mut stats = DecisionStats::default();
        stats.record(Decision::Straight);
        stats.record(Decision::Left);
        stats.record(Decision::Right);
        stats.record(Decision::Indecisive);
        let ratios = stats.ratios();
        let sum = ratios.straight + ratios.left + ratios.right + ratios.indecisive;
        assert!((sum - 1.0).abs() < 1e-12);
        assert!((ratios.left - 0.25).abs() < 1e-12);
    }

    #[test]
    fn reset_clears_every_counter() {
        let mut stats = DecisionStats::default();
        stats.record(Decision::Right);
        stats.reset();
        assert_eq!(stats.total(), 0);
    }
}
