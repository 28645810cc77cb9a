//! Order status state machine.
//!
//! ```text
//! ordinato -> preparazione -> consegna -> consegnato
//!     \____________\_____________\______-> annullato
//! ```
//!
//! `consegnato` and `annullato` are terminal.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Placed by the customer.
    Ordinato,

    /// Being prepared by the restaurant.
    Preparazione,

    /// Out for delivery or ready for pickup.
    Consegna,

    /// Handed over to the customer.
    Consegnato,

    /// Cancelled before completion.
    Annullato,
}

impl OrderStatus {
    pub const ALL: [Self; 5] = [
        Self::Ordinato,
        Self::Preparazione,
        Self::Consegna,
        Self::Consegnato,
        Self::Annullato,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ordinato => "ordinato",
            Self::Preparazione => "preparazione",
            Self::Consegna => "consegna",
            Self::Consegnato => "consegnato",
            Self::Annullato => "annullato",
        }
    }

    /// Next status in the forward sequence.
    #[must_use]
    pub const fn successor(self) -> Option<Self> {
        match self {
            Self::Ordinato => Some(Self::Preparazione),
            Self::Preparazione => Some(Self::Consegna),
            Self::Consegna => Some(Self::Consegnato),
            Self::Consegnato | Self::Annullato => None,
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        self.successor().is_none()
    }

    /// Check a move to `target`: the successor, or cancellation from a non-terminal status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTransitionError::Terminal`] when `self` is terminal and
    /// [`StatusTransitionError::Invalid`] for any other target.
    pub fn transition(self, target: Self) -> Result<Self, StatusTransitionError> {
        if self.is_terminal() {
            return Err(StatusTransitionError::Terminal(self));
        }

        if target == Self::Annullato || self.successor() == Some(target) {
            return Ok(target);
        }

        Err(StatusTransitionError::Invalid {
            from: self,
            to: target,
        })
    }

    /// Move to the successor status.
    ///
    /// # Errors
    ///
    /// Returns [`StatusTransitionError::Terminal`] for terminal statuses.
    pub fn advance(self) -> Result<Self, StatusTransitionError> {
        self.successor()
            .ok_or(StatusTransitionError::Terminal(self))
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown order status `{0}`")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();

        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| UnknownStatus(value.to_string()))
    }
}

#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum StatusTransitionError {
    #[error("order is already {0}")]
    Terminal(OrderStatus),

    #[error("cannot move order from {from} to {to}")]
    Invalid { from: OrderStatus, to: OrderStatus },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forward_sequence_follows_the_table() {
        let mut status = OrderStatus::Ordinato;
        let mut seen = vec![status];

        while let Ok(next) = status.advance() {
            status = next;
            seen.push(status);
        }

        assert_eq!(
            seen,
            [
                OrderStatus::Ordinato,
                OrderStatus::Preparazione,
                OrderStatus::Consegna,
                OrderStatus::Consegnato
            ]
        );
    }

    #[test]
    fn terminal_statuses_cannot_advance() {
        for status in [OrderStatus::Consegnato, OrderStatus::Annullato] {
            assert!(status.is_terminal());
            assert_eq!(status.advance(), Err(StatusTransitionError::Terminal(status)));
            assert_eq!(
                status.transition(OrderStatus::Annullato),
                Err(StatusTransitionError::Terminal(status))
            );
        }
    }

    #[test]
    fn cancellation_is_allowed_from_any_open_status() {
        for status in OrderStatus::ALL.into_iter().filter(|s| !s.is_terminal()) {
            assert_eq!(
                status.transition(OrderStatus::Annullato),
                Ok(OrderStatus::Annullato)
            );
        }
    }

    #[test]
    fn skipping_or_going_back_is_invalid() {
        assert_eq!(
            OrderStatus::Ordinato.transition(OrderStatus::Consegna),
            Err(StatusTransitionError::Invalid {
                from: OrderStatus::Ordinato,
                to: OrderStatus::Consegna
            })
        );
        assert!(matches!(
            OrderStatus::Consegna.transition(OrderStatus::Preparazione),
            Err(StatusTransitionError::Invalid { .. })
        ));
        assert!(matches!(
            OrderStatus::Preparazione.transition(OrderStatus::Preparazione),
            Err(StatusTransitionError::Invalid { .. })
        ));
    }

    #[test]
    fn statuses_parse_from_their_names() {
        for status in OrderStatus::ALL {
            assert_eq!(status.as_str().parse::<OrderStatus>(), Ok(status));
        }

        assert_eq!("Preparazione ".parse::<OrderStatus>(), Ok(OrderStatus::Preparazione));
        assert!("spedito".parse::<OrderStatus>().is_err());
    }
}
