use std::collections::HashMap;

use async_trait::async_trait;
use heliodesk_api::{ApiClient, ApiError, Session};
use heliodesk_core::domain::lead::{Lead, LeadStatus};
use heliodesk_core::errors::DomainError;
use thiserror::Error;
use tracing::{info, warn};

/// Assignment lifecycle of a single lead on the board.
///
/// Local state only mutates after the backend confirms, so `Pending` doubles
/// as the double-submit guard: a second assign for the same lead is refused
/// while one is in flight.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AssignState {
    #[default]
    Idle,
    Pending,
    Committed,
    Failed,
}

/// The lead list plus the selection/detail view state the portal shows.
#[derive(Debug, Default)]
pub struct LeadBoard {
    leads: Vec<Lead>,
    selected: Option<i64>,
    detail_open: bool,
    assign_states: HashMap<i64, AssignState>,
}

impl LeadBoard {
    pub fn with_leads(leads: Vec<Lead>) -> Self {
        Self { leads, ..Self::default() }
    }

    /// Fetch-and-replace cycle: new collection, view state reset.
    pub fn replace(&mut self, leads: Vec<Lead>) {
        self.leads = leads;
        self.selected = None;
        self.detail_open = false;
        self.assign_states.clear();
    }

    pub fn leads(&self) -> &[Lead] {
        &self.leads
    }

    pub fn lead(&self, id: i64) -> Option<&Lead> {
        self.leads.iter().find(|lead| lead.id == id)
    }

    /// Select a lead and open its detail view. Returns false for ids not on
    /// the board.
    pub fn select(&mut self, id: i64) -> bool {
        if self.lead(id).is_none() {
            return false;
        }
        self.selected = Some(id);
        self.detail_open = true;
        true
    }

    pub fn selected(&self) -> Option<&Lead> {
        self.selected.and_then(|id| self.lead(id))
    }

    pub fn detail_open(&self) -> bool {
        self.detail_open
    }

    pub fn close_detail(&mut self) {
        self.detail_open = false;
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn assign_state(&self, id: i64) -> AssignState {
        self.assign_states.get(&id).copied().unwrap_or_default()
    }

    fn set_assign_state(&mut self, id: i64, state: AssignState) {
        self.assign_states.insert(id, state);
    }

    fn lead_mut(&mut self, id: i64) -> Option<&mut Lead> {
        self.leads.iter_mut().find(|lead| lead.id == id)
    }
}

#[derive(Debug, Error)]
pub enum AssignError {
    #[error("lead {0} is not on the board")]
    UnknownLead(i64),
    #[error("an employee must be chosen before assigning")]
    MissingEmployee,
    #[error("an assignment for lead {0} is already in flight")]
    AlreadyPending(i64),
    #[error(transparent)]
    Domain(#[from] DomainError),
    #[error(transparent)]
    Backend(#[from] ApiError),
}

impl AssignError {
    /// Operator-facing message: server messages pass through, everything
    /// else renders its own description.
    pub fn user_message(&self) -> String {
        match self {
            Self::Backend(error) => error.user_message(),
            other => other.to_string(),
        }
    }
}

/// Backend surface the workflow needs. `ApiClient` is the production
/// implementation; tests script the outcome.
#[async_trait]
pub trait AssignLeads: Send + Sync {
    async fn assign_lead(
        &self,
        lead_id: i64,
        employee_id: i64,
        bearer_token: &str,
    ) -> Result<(), ApiError>;
}

#[async_trait]
impl AssignLeads for ApiClient {
    async fn assign_lead(
        &self,
        lead_id: i64,
        employee_id: i64,
        bearer_token: &str,
    ) -> Result<(), ApiError> {
        ApiClient::assign_lead(self, lead_id, employee_id, bearer_token).await
    }
}

/// Assigns a selected lead to an employee and reconciles board state.
pub struct AssignmentWorkflow {
    bearer_token: String,
}

impl AssignmentWorkflow {
    pub fn new(session: &Session) -> Self {
        Self { bearer_token: session.bearer_token() }
    }

    /// Run one assignment. Exactly one backend call per invocation; local
    /// state changes only after the backend confirms success.
    pub async fn assign<B: AssignLeads + ?Sized>(
        &self,
        board: &mut LeadBoard,
        backend: &B,
        lead_id: i64,
        employee_id: Option<i64>,
    ) -> Result<(), AssignError> {
        let Some(employee_id) = employee_id else {
            return Err(AssignError::MissingEmployee);
        };
        let lead = board.lead(lead_id).ok_or(AssignError::UnknownLead(lead_id))?;
        if !lead.can_transition_to(LeadStatus::Assigned) {
            return Err(DomainError::InvalidLeadTransition {
                from: lead.status,
                to: LeadStatus::Assigned,
            }
            .into());
        }
        if board.assign_state(lead_id) == AssignState::Pending {
            return Err(AssignError::AlreadyPending(lead_id));
        }

        board.set_assign_state(lead_id, AssignState::Pending);
        match backend.assign_lead(lead_id, employee_id, &self.bearer_token).await {
            Ok(()) => {
                // The board is exclusively borrowed for the whole call, so the
                // transition re-check cannot fail after the gate above.
                let lead = board.lead_mut(lead_id).ok_or(AssignError::UnknownLead(lead_id))?;
                lead.transition_to(LeadStatus::Assigned)?;
                lead.assigned_to = Some(employee_id);
                board.close_detail();
                board.clear_selection();
                board.set_assign_state(lead_id, AssignState::Committed);
                info!(lead = lead_id, employee = employee_id, "lead assigned");
                Ok(())
            }
            Err(error) => {
                warn!(lead = lead_id, error = %error, "lead assignment failed");
                board.set_assign_state(lead_id, AssignState::Failed);
                Err(error.into())
            }
        }
    }
}
