pub mod query;

use crate::crm::CrmError;
use crate::engine::Lead;
use async_trait::async_trait;

/// One emission of the lead query: the full list, or the error that replaced it.
pub type QueryResult = Result<Vec<Lead>, CrmError>;

/// Read side of the CRM: the ordered list of leads for the dashboard.
#[async_trait]
pub trait LeadSource: Send + Sync {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, CrmError>;
}

/// Write side of the CRM: make the current user the owner of a lead.
#[async_trait]
pub trait AssignAction: Send + Sync {
    async fn assign_to_me(&self, lead_id: &str) -> Result<(), CrmError>;
}
