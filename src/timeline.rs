use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};

/// The six fulfillment milestones a deliverer walks through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum ChecklistStep {
    #[serde(rename = "Order Accepted")]
    OrderAccepted,
    #[serde(rename = "Venmo Payment Received")]
    VenmoPaymentReceived,
    #[serde(rename = "Shopping in U-Store")]
    Shopping,
    #[serde(rename = "Checked Out")]
    CheckedOut,
    #[serde(rename = "On Delivery")]
    OnDelivery,
    #[serde(rename = "Delivered")]
    Delivered,
}

impl ChecklistStep {
    pub const ALL: [ChecklistStep; 6] = [
        ChecklistStep::OrderAccepted,
        ChecklistStep::VenmoPaymentReceived,
        ChecklistStep::Shopping,
        ChecklistStep::CheckedOut,
        ChecklistStep::OnDelivery,
        ChecklistStep::Delivered,
    ];

    pub fn index(self) -> usize {
        match self {
            ChecklistStep::OrderAccepted => 0,
            ChecklistStep::VenmoPaymentReceived => 1,
            ChecklistStep::Shopping => 2,
            ChecklistStep::CheckedOut => 3,
            ChecklistStep::OnDelivery => 4,
            ChecklistStep::Delivered => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ChecklistStep::OrderAccepted => "Order Accepted",
            ChecklistStep::VenmoPaymentReceived => "Venmo Payment Received",
            ChecklistStep::Shopping => "Shopping in U-Store",
            ChecklistStep::CheckedOut => "Checked Out",
            ChecklistStep::OnDelivery => "On Delivery",
            ChecklistStep::Delivered => "Delivered",
        }
    }
}

/// Fulfillment progress for one order.
///
/// The completed steps always form a prefix of [`ChecklistStep::ALL`], so the
/// whole state is a single prefix length. Checking a step advances the prefix
/// by one, unchecking retreats it by one; anything else is rejected, which
/// rules out gap states entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timeline {
    completed: usize,
}

impl Timeline {
    pub fn is_done(&self, step: ChecklistStep) -> bool {
        step.index() < self.completed
    }

    /// True once the first step has been checked. The claim on an order
    /// becomes final at this point.
    pub fn started(&self) -> bool {
        self.completed > 0
    }

    pub fn is_complete(&self) -> bool {
        self.completed == ChecklistStep::ALL.len()
    }

    /// Mark `step` complete. Returns `Ok(false)` when the step was already
    /// done (idempotent), `Ok(true)` when the prefix advanced.
    pub fn check(&mut self, step: ChecklistStep) -> AppResult<bool> {
        if self.is_done(step) {
            return Ok(false);
        }
        if step.index() != self.completed {
            return Err(AppError::OutOfOrder(
                "Previous step must be completed first.",
            ));
        }
        self.completed += 1;
        Ok(true)
    }

    /// Unmark `step`. Only the most recently completed step may be taken
    /// back; unchecking below the top of the prefix would leave a later step
    /// done while an earlier one is not.
    pub fn uncheck(&mut self, step: ChecklistStep) -> AppResult<bool> {
        if !self.is_done(step) {
            return Ok(false);
        }
        if step.index() + 1 != self.completed {
            return Err(AppError::OutOfOrder(
                "Cannot uncheck step with completed next steps.",
            ));
        }
        self.completed -= 1;
        Ok(true)
    }

    pub fn entries(&self) -> impl Iterator<Item = (ChecklistStep, bool)> + '_ {
        ChecklistStep::ALL
            .into_iter()
            .map(|step| (step, self.is_done(step)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn done_steps(t: &Timeline) -> Vec<bool> {
        t.entries().map(|(_, done)| done).collect()
    }

    fn assert_prefix(t: &Timeline) {
        let states = done_steps(t);
        let first_false = states.iter().position(|d| !d).unwrap_or(states.len());
        assert!(
            states[first_false..].iter().all(|d| !d),
            "completed steps must form a prefix, got {states:?}"
        );
    }

    #[test]
    fn advances_in_order() {
        let mut t = Timeline::default();
        for step in ChecklistStep::ALL {
            assert!(!t.is_complete());
            assert!(t.check(step).unwrap());
            assert_prefix(&t);
        }
        assert!(t.is_complete());
    }

    #[test]
    fn checking_ahead_is_rejected_and_leaves_state_unchanged() {
        let mut t = Timeline::default();
        t.check(ChecklistStep::OrderAccepted).unwrap();
        let before = t;
        let err = t.check(ChecklistStep::Shopping).unwrap_err();
        assert!(matches!(err, AppError::OutOfOrder(_)));
        assert_eq!(t, before);
    }

    #[test]
    fn rechecking_a_done_step_is_a_noop() {
        let mut t = Timeline::default();
        t.check(ChecklistStep::OrderAccepted).unwrap();
        assert!(!t.check(ChecklistStep::OrderAccepted).unwrap());
        assert!(t.is_done(ChecklistStep::OrderAccepted));
    }

    #[test]
    fn uncheck_only_from_the_top() {
        let mut t = Timeline::default();
        t.check(ChecklistStep::OrderAccepted).unwrap();
        t.check(ChecklistStep::VenmoPaymentReceived).unwrap();
        t.check(ChecklistStep::Shopping).unwrap();

        let err = t.uncheck(ChecklistStep::OrderAccepted).unwrap_err();
        assert!(matches!(err, AppError::OutOfOrder(_)));
        assert!(t.is_done(ChecklistStep::Shopping));

        assert!(t.uncheck(ChecklistStep::Shopping).unwrap());
        assert!(!t.is_done(ChecklistStep::Shopping));
        assert_prefix(&t);
    }

    #[test]
    fn unchecking_an_undone_step_is_a_noop() {
        let mut t = Timeline::default();
        assert!(!t.uncheck(ChecklistStep::Delivered).unwrap());
    }

    #[test]
    fn prefix_invariant_holds_under_arbitrary_sequences() {
        // Drive the automaton with a fixed pseudo-random walk; the invariant
        // must hold after every operation, accepted or rejected.
        let mut t = Timeline::default();
        let mut seed: u64 = 0x5eed;
        for _ in 0..500 {
            seed = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
            let step = ChecklistStep::ALL[(seed >> 33) as usize % 6];
            if seed & 1 == 0 {
                let _ = t.check(step);
            } else {
                let _ = t.uncheck(step);
            }
            assert_prefix(&t);
        }
    }

    #[test]
    fn labels_match_the_store_checklist() {
        let labels: Vec<&str> = ChecklistStep::ALL.iter().map(|s| s.label()).collect();
        assert_eq!(
            labels,
            vec![
                "Order Accepted",
                "Venmo Payment Received",
                "Shopping in U-Store",
                "Checked Out",
                "On Delivery",
                "Delivered",
            ]
        );
    }
}
