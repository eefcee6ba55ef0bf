pub mod dispatch;

use crate::crm::error_message;
use crate::engine::filter::{self, FilterCriteria};
use crate::engine::{decorate, DisplayLead};
use crate::feed::QueryResult;
use crate::notify::{Notifier, Toast};
use std::collections::HashSet;

pub use dispatch::{ActionDispatcher, AssignOutcome, AssignState};

/// Lead list state: the decorated list, the visible subset, and the criteria between them.
///
/// `leads` is replaced wholesale on every query emission; `filtered` is recomputed
/// whenever either `leads` or a criterion changes.
#[derive(Debug, Clone)]
pub struct LeadDashboard {
    leads: Vec<DisplayLead>,
    filtered: Vec<DisplayLead>,
    criteria: FilterCriteria,
    is_loading: bool,
    pending: HashSet<String>,
}

impl Default for LeadDashboard {
    fn default() -> Self {
        Self::new(FilterCriteria::default())
    }
}

impl LeadDashboard {
    pub fn new(criteria: FilterCriteria) -> Self {
        Self {
            leads: Vec::new(),
            filtered: Vec::new(),
            criteria,
            is_loading: true,
            pending: HashSet::new(),
        }
    }

    /// Handle one emission of the lead query.
    pub fn on_query_result(&mut self, result: QueryResult, notifier: &dyn Notifier) {
        match result {
            Ok(raw) => {
                self.leads = raw.into_iter().map(decorate).collect();
                for lead in &mut self.leads {
                    lead.assign_disabled = self.pending.contains(lead.id());
                }
                self.apply_filters();
                self.is_loading = false;
                tracing::debug!(
                    total = self.leads.len(),
                    visible = self.filtered.len(),
                    "lead list replaced"
                );
            }
            Err(e) => {
                self.is_loading = false;
                let code = e.body().and_then(|b| b.error_code.as_deref()).unwrap_or("-");
                tracing::error!(code, error = %e, "error fetching leads");
                notifier.notify(Toast::error(
                    "Error",
                    format!("Failed to fetch leads: {}", error_message(&e)),
                ));
            }
        }
    }

    pub fn apply_filters(&mut self) {
        self.filtered = filter::filter(&self.leads, &self.criteria);
    }

    pub fn set_min_score(&mut self, min_score: u32) {
        self.criteria.min_score = min_score.min(filter::MAX_SCORE);
        self.apply_filters();
    }

    pub fn set_industry(&mut self, industry: &str) {
        self.criteria.industry = industry.to_string();
        self.apply_filters();
    }

    pub fn set_qualified_only(&mut self, qualified_only: bool) {
        self.criteria.qualified_only = qualified_only;
        self.apply_filters();
    }

    pub fn set_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
        self.apply_filters();
    }

    pub fn reset_filters(&mut self) {
        self.set_criteria(FilterCriteria::default());
    }

    /// Mark a row's assignment in flight. Returns false if it already is.
    pub fn begin_assign(&mut self, lead_id: &str) -> bool {
        if !self.pending.insert(lead_id.to_string()) {
            return false;
        }
        self.set_assign_disabled(lead_id, true);
        true
    }

    pub fn finish_assign(&mut self, lead_id: &str) {
        if self.pending.remove(lead_id) {
            self.set_assign_disabled(lead_id, false);
        }
    }

    /// A re-fetch was requested; cleared by the next emission.
    pub fn mark_loading(&mut self) {
        self.is_loading = true;
    }

    fn set_assign_disabled(&mut self, lead_id: &str, disabled: bool) {
        for lead in self
            .leads
            .iter_mut()
            .chain(self.filtered.iter_mut())
            .filter(|l| l.id() == lead_id)
        {
            lead.assign_disabled = disabled;
        }
    }

    pub fn leads(&self) -> &[DisplayLead] {
        &self.leads
    }

    pub fn filtered(&self) -> &[DisplayLead] {
        &self.filtered
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    pub fn find(&self, lead_id: &str) -> Option<&DisplayLead> {
        self.leads.iter().find(|l| l.id() == lead_id)
    }

    pub fn has_leads(&self) -> bool {
        !self.filtered.is_empty()
    }

    pub fn has_qualified_leads(&self) -> bool {
        filter::has_qualified_leads(&self.filtered)
    }

    pub fn results_label(&self) -> String {
        filter::results_label(self.filtered.len())
    }

    pub fn qualified_label(&self) -> String {
        filter::qualified_label(&self.filtered)
    }
}
