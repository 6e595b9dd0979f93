//! Roll resolver - d20 + skill against a target number
//!
//! Pure arithmetic and classification. Drawing the die is the caller's
//! job so that resolution stays deterministic for a given face.

use serde::{Deserialize, Serialize};

/// Faces on the check die
pub const CHECK_DIE_SIDES: i32 = 20;
/// Natural face that flags a critical failure
pub const CRITICAL_FAILURE_FACE: i32 = 1;
/// Natural face that flags a critical success
pub const CRITICAL_SUCCESS_FACE: i32 = CHECK_DIE_SIDES;

/// Classified result of a single roll, in text-selection priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutcomeType {
    CriticalSuccess,
    CriticalFailure,
    Success,
    Failure,
}

impl OutcomeType {
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::CriticalSuccess => "Critical Success!",
            Self::CriticalFailure => "Critical Failure!",
            Self::Success => "Success!",
            Self::Failure => "Failure!",
        }
    }
}

/// Arithmetic of one resolved roll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    pub die: i32,
    pub skill_value: i32,
    pub total: i32,
    pub target_number: i32,
    /// `total >= target_number`, never adjusted by critical faces
    pub success: bool,
    pub critical_success: bool,
    pub critical_failure: bool,
}

impl RollOutcome {
    /// Critical flags take priority over the numeric result
    pub fn outcome_type(&self) -> OutcomeType {
        if self.critical_success {
            OutcomeType::CriticalSuccess
        } else if self.critical_failure {
            OutcomeType::CriticalFailure
        } else if self.success {
            OutcomeType::Success
        } else {
            OutcomeType::Failure
        }
    }

    /// e.g. "d20(12) + 5 = 17 vs DC 15"
    pub fn breakdown(&self) -> String {
        format!(
            "d{}({}) + {} = {} vs DC {}",
            CHECK_DIE_SIDES, self.die, self.skill_value, self.total, self.target_number
        )
    }
}

/// Resolve a roll for an already drawn die face.
///
/// `skill_value` is not range checked; it is only added to the face.
/// The total saturates at the bounds of `i32`.
pub fn resolve_with_die(skill_value: i32, target_number: i32, die: i32) -> RollOutcome {
    let total = skill_value.saturating_add(die);
    RollOutcome {
        die,
        skill_value,
        total,
        target_number,
        success: total >= target_number,
        critical_success: die == CRITICAL_SUCCESS_FACE,
        critical_failure: die == CRITICAL_FAILURE_FACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arithmetic_holds_for_every_face() {
        for skill_value in [0, 1, 5, 20, 35] {
            for target_number in [1, 5, 15, 30] {
                for die in 1..=CHECK_DIE_SIDES {
                    let outcome = resolve_with_die(skill_value, target_number, die);
                    assert_eq!(outcome.total, die + skill_value);
                    assert_eq!(outcome.success, outcome.total >= target_number);
                    assert_eq!(outcome.critical_success, die == 20);
                    assert_eq!(outcome.critical_failure, die == 1);
                }
            }
        }
    }

    #[test]
    fn test_extreme_skill_values_saturate() {
        let outcome = resolve_with_die(i32::MAX, 10, 5);
        assert_eq!(outcome.total, i32::MAX);
        assert!(outcome.success);

        let outcome = resolve_with_die(i32::MIN, 10, 20);
        assert_eq!(outcome.total, i32::MIN + 20);
        assert!(!outcome.success);
        assert!(outcome.critical_success);
    }

    #[test]
    fn test_scenario_plain_success() {
        let outcome = resolve_with_die(5, 15, 12);
        assert_eq!(outcome.total, 17);
        assert!(outcome.success);
        assert!(!outcome.critical_success);
        assert!(!outcome.critical_failure);
        assert_eq!(outcome.outcome_type(), OutcomeType::Success);
    }

    #[test]
    fn test_scenario_natural_one_with_zero_skill() {
        let outcome = resolve_with_die(0, 10, 1);
        assert_eq!(outcome.total, 1);
        assert!(!outcome.success);
        assert!(outcome.critical_failure);
        assert_eq!(outcome.outcome_type(), OutcomeType::CriticalFailure);
    }

    #[test]
    fn test_natural_twenty_below_dc_keeps_numeric_failure() {
        // Critical success is flagged from the face alone and does not
        // force `success`.
        let outcome = resolve_with_die(2, 25, 20);
        assert_eq!(outcome.total, 22);
        assert!(!outcome.success);
        assert!(outcome.critical_success);
        assert_eq!(outcome.outcome_type(), OutcomeType::CriticalSuccess);
    }

    #[test]
    fn test_natural_one_can_still_clear_dc() {
        let outcome = resolve_with_die(14, 15, 1);
        assert!(outcome.success);
        assert!(outcome.critical_failure);
        assert_eq!(outcome.outcome_type(), OutcomeType::CriticalFailure);
    }

    #[test]
    fn test_breakdown() {
        assert_eq!(resolve_with_die(5, 15, 12).breakdown(), "d20(12) + 5 = 17 vs DC 15");
    }
}
