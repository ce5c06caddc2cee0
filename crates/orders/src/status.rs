//! Order status lifecycle.

use serde::{Deserialize, Serialize};

use tradeloom_core::{DomainError, DomainResult};

/// Fulfilment lifecycle of a persisted order.
///
/// `Cancelled` is reachable from any non-terminal state; `Delivered` and
/// `Cancelled` are terminal. Only administrators write status; buyers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Approved,
    Packed,
    Shipped,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Position along the forward fulfilment sequence.
    fn fulfilment_rank(self) -> u8 {
        match self {
            OrderStatus::Pending => 0,
            OrderStatus::Approved => 1,
            OrderStatus::Packed => 2,
            OrderStatus::Shipped => 3,
            OrderStatus::Delivered => 4,
            // Cancellation sits outside the forward sequence; transitions into
            // it are decided before rank is consulted.
            OrderStatus::Cancelled => 5,
        }
    }
}

impl core::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Approved => "approved",
            OrderStatus::Packed => "packed",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// How status writes are policed.
///
/// The storefront historically accepted any administrator write from any
/// state; that behavior stays available as `Unrestricted`, while `ForwardOnly`
/// is the hardened default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransitionPolicy {
    /// Any status can be written over any other, including backwards moves.
    Unrestricted,
    /// Status may only move forward along the fulfilment sequence (skipping
    /// states is allowed), or to `Cancelled` from any non-terminal state.
    /// Terminal states never change.
    #[default]
    ForwardOnly,
}

/// Check whether `next` may replace `current` under `policy`.
pub fn ensure_transition(
    current: OrderStatus,
    next: OrderStatus,
    policy: TransitionPolicy,
) -> DomainResult<()> {
    match policy {
        TransitionPolicy::Unrestricted => Ok(()),
        TransitionPolicy::ForwardOnly => {
            if current.is_terminal() {
                return Err(DomainError::conflict(format!(
                    "order is already {current} and cannot change status"
                )));
            }
            if next == OrderStatus::Cancelled {
                return Ok(());
            }
            if next.fulfilment_rank() > current.fulfilment_rank() {
                Ok(())
            } else {
                Err(DomainError::conflict(format!(
                    "cannot move order from {current} to {next}"
                )))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_moves_are_allowed() {
        for (from, to) in [
            (OrderStatus::Pending, OrderStatus::Approved),
            (OrderStatus::Approved, OrderStatus::Packed),
            (OrderStatus::Packed, OrderStatus::Shipped),
            (OrderStatus::Shipped, OrderStatus::Delivered),
        ] {
            assert!(ensure_transition(from, to, TransitionPolicy::ForwardOnly).is_ok());
        }
    }

    #[test]
    fn skipping_states_forward_is_allowed() {
        assert!(
            ensure_transition(
                OrderStatus::Pending,
                OrderStatus::Shipped,
                TransitionPolicy::ForwardOnly
            )
            .is_ok()
        );
    }

    #[test]
    fn backward_moves_are_rejected() {
        let err = ensure_transition(
            OrderStatus::Shipped,
            OrderStatus::Pending,
            TransitionPolicy::ForwardOnly,
        )
        .unwrap_err();
        assert!(matches!(err, DomainError::Conflict(_)));
    }

    #[test]
    fn cancellation_is_reachable_from_any_non_terminal_state() {
        for from in [
            OrderStatus::Pending,
            OrderStatus::Approved,
            OrderStatus::Packed,
            OrderStatus::Shipped,
        ] {
            assert!(
                ensure_transition(from, OrderStatus::Cancelled, TransitionPolicy::ForwardOnly)
                    .is_ok()
            );
        }
    }

    #[test]
    fn terminal_states_never_change() {
        for from in [OrderStatus::Delivered, OrderStatus::Cancelled] {
            let err =
                ensure_transition(from, OrderStatus::Approved, TransitionPolicy::ForwardOnly)
                    .unwrap_err();
            assert!(matches!(err, DomainError::Conflict(_)));
        }
        assert!(
            ensure_transition(
                OrderStatus::Delivered,
                OrderStatus::Cancelled,
                TransitionPolicy::ForwardOnly
            )
            .is_err()
        );
    }

    #[test]
    fn unrestricted_policy_accepts_anything() {
        assert!(
            ensure_transition(
                OrderStatus::Delivered,
                OrderStatus::Pending,
                TransitionPolicy::Unrestricted
            )
            .is_ok()
        );
    }
}
