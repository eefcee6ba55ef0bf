use crate::crm::error_message;
use crate::feed::query::LeadQuery;
use crate::feed::AssignAction;
use crate::notify::{Notifier, Toast};
use std::sync::Arc;

/// Lifecycle of a single assign request.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AssignState {
    #[default]
    Idle,
    Pending { lead_id: String },
    Succeeded { lead_id: String },
    Failed { lead_id: String, message: String },
}

/// What `ActionDispatcher::assign` ended in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignOutcome {
    pub lead_id: String,
    pub lead_name: String,
    pub state: AssignState,
}

impl AssignOutcome {
    pub fn succeeded(&self) -> bool {
        matches!(self.state, AssignState::Succeeded { .. })
    }
}

/// Runs "assign to me" for a row, reports the result, and refreshes the lead query on success.
#[derive(Clone)]
pub struct ActionDispatcher {
    action: Arc<dyn AssignAction>,
    notifier: Arc<dyn Notifier>,
    query: LeadQuery,
}

impl ActionDispatcher {
    pub fn new(action: Arc<dyn AssignAction>, notifier: Arc<dyn Notifier>, query: LeadQuery) -> Self {
        Self {
            action,
            notifier,
            query,
        }
    }

    pub async fn assign(&self, lead_id: &str, lead_name: &str) -> AssignOutcome {
        let mut state = AssignState::Pending {
            lead_id: lead_id.to_string(),
        };
        tracing::info!(lead_id, ?state, "assigning lead");

        state = match self.action.assign_to_me(lead_id).await {
            Ok(()) => {
                self.notifier.notify(Toast::success(
                    "Success",
                    format!("Lead \"{}\" has been assigned to you", lead_name),
                ));
                self.query.refresh().await;
                AssignState::Succeeded {
                    lead_id: lead_id.to_string(),
                }
            }
            Err(e) => {
                let code = e.body().and_then(|b| b.error_code.as_deref()).unwrap_or("-");
                tracing::error!(lead_id, code, error = %e, "assignment error");
                let message = error_message(&e);
                self.notifier.notify(Toast::error(
                    "Error",
                    format!("Failed to assign lead: {}", message),
                ));
                AssignState::Failed {
                    lead_id: lead_id.to_string(),
                    message,
                }
            }
        };
        tracing::info!(lead_id, ?state, "assignment finished");

        AssignOutcome {
            lead_id: lead_id.to_string(),
            lead_name: lead_name.to_string(),
            state,
        }
    }
}
