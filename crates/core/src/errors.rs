use thiserror::Error;

use crate::domain::lead::LeadStatus;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("invalid lead transition from {from:?} to {to:?}")]
    InvalidLeadTransition { from: LeadStatus, to: LeadStatus },
    #[error("domain invariant violation: {0}")]
    InvariantViolation(String),
}
