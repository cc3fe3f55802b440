//! Fork acquisition ordering.
//!
//! With every philosopher grabbing its left fork first, the table can reach
//! a state where each seat holds one fork and waits forever for the other —
//! the classic cyclic-wait deadlock. Imposing a total order on acquisition
//! breaks the cycle: the wrap-around philosopher (forks `{N-1, 0}`) reaches
//! for fork 0 first, so at least one seat can always make progress.

/// The order in which a philosopher picks up its two forks.
///
/// Forks are released in the reverse order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcquisitionOrder {
    /// Index of the fork to acquire first.
    pub first: usize,
    /// Index of the fork to acquire second.
    pub second: usize,
}

/// Deterministic rule deciding fork acquisition order for a seat.
///
/// The rule must be a pure function of the two indices and must be applied
/// identically by every philosopher; it is the single deadlock-avoidance
/// invariant of the system.
pub trait AcquisitionPolicy: Send + Sync {
    /// Decide the acquisition order for a philosopher holding
    /// `left_fork` and `right_fork`.
    fn acquisition_order(&self, left_fork: usize, right_fork: usize) -> AcquisitionOrder;
}

/// Acquire the lower-numbered fork first.
///
/// Applied uniformly to all seats. Only the wrap-around seat actually has
/// `right < left`, but the uniform rule is equivalent and simpler to reason
/// about than special-casing that seat.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LowerIndexFirst;

impl AcquisitionPolicy for LowerIndexFirst {
    fn acquisition_order(&self, left_fork: usize, right_fork: usize) -> AcquisitionOrder {
        if left_fork <= right_fork {
            AcquisitionOrder {
                first: left_fork,
                second: right_fork,
            }
        } else {
            AcquisitionOrder {
                first: right_fork,
                second: left_fork,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lower_index_goes_first() {
        let policy = LowerIndexFirst;
        assert_eq!(
            policy.acquisition_order(1, 2),
            AcquisitionOrder { first: 1, second: 2 }
        );
        assert_eq!(
            policy.acquisition_order(4, 0),
            AcquisitionOrder { first: 0, second: 4 }
        );
    }

    #[test]
    fn decision_is_idempotent() {
        let policy = LowerIndexFirst;
        for left in 0..8 {
            for right in 0..8 {
                let once = policy.acquisition_order(left, right);
                let twice = policy.acquisition_order(left, right);
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn equal_indices_are_stable() {
        // A well-formed ring never produces this, but the function is total.
        let order = LowerIndexFirst.acquisition_order(3, 3);
        assert_eq!(order, AcquisitionOrder { first: 3, second: 3 });
    }
}
