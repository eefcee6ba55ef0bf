//! End-to-end flow: query emission -> dashboard -> assign -> refresh.

use async_trait::async_trait;
use lead_desk::crm::demo::DemoCrm;
use lead_desk::crm::types::ErrorBody;
use lead_desk::crm::CrmError;
use lead_desk::dashboard::{ActionDispatcher, AssignState, LeadDashboard};
use lead_desk::engine::filter::FilterCriteria;
use lead_desk::engine::{Lead, ScoreClass};
use lead_desk::feed::query::LeadQuery;
use lead_desk::feed::{AssignAction, LeadSource};
use lead_desk::notify::{DismissMode, Notifier, RecordingNotifier, ToastVariant};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

fn lead(id: &str, name: &str, score: u32, industry: &str, qualified: bool) -> Lead {
    Lead {
        id: id.to_string(),
        name: name.to_string(),
        email: format!("{}@example.com", id.to_lowercase()),
        industry: industry.to_string(),
        qualified,
        score,
    }
}

/// Serves a fixed list and answers assigns with a scripted result.
struct MockCrm {
    leads: Vec<Lead>,
    fetch_error: Mutex<Option<CrmError>>,
    assign_error: Mutex<Option<CrmError>>,
    assigns: AtomicUsize,
}

impl MockCrm {
    fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads,
            fetch_error: Mutex::new(None),
            assign_error: Mutex::new(None),
            assigns: AtomicUsize::new(0),
        }
    }

    fn failing_assign(self, err: CrmError) -> Self {
        *self.assign_error.lock().unwrap() = Some(err);
        self
    }

    fn failing_fetch(self, err: CrmError) -> Self {
        *self.fetch_error.lock().unwrap() = Some(err);
        self
    }
}

#[async_trait]
impl LeadSource for MockCrm {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, CrmError> {
        match self.fetch_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(self.leads.clone()),
        }
    }
}

#[async_trait]
impl AssignAction for MockCrm {
    async fn assign_to_me(&self, _lead_id: &str) -> Result<(), CrmError> {
        self.assigns.fetch_add(1, Ordering::SeqCst);
        match self.assign_error.lock().unwrap().take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

fn sample() -> Vec<Lead> {
    vec![
        lead("00Q123", "Jane Doe", 95, "Technology", true),
        lead("00Q124", "John Roe", 85, "Finance", false),
        lead("00Q125", "Ann Poe", 50, "Technology", false),
        lead("00Q126", "Max Moe", 80, "Retail", true),
    ]
}

fn wire(crm: Arc<MockCrm>) -> (
    ActionDispatcher,
    LeadQuery,
    tokio::sync::mpsc::UnboundedReceiver<lead_desk::feed::QueryResult>,
    Arc<RecordingNotifier>,
) {
    let (query, rx) = LeadQuery::new(crm.clone());
    let rec = Arc::new(RecordingNotifier::new());
    let notifier: Arc<dyn Notifier> = rec.clone();
    let dispatcher = ActionDispatcher::new(crm, notifier, query.clone());
    (dispatcher, query, rx, rec)
}

#[tokio::test]
async fn test_successful_assign_notifies_and_refreshes_once() {
    let crm = Arc::new(MockCrm::new(sample()));
    let (dispatcher, query, mut rx, rec) = wire(crm.clone());

    let outcome = dispatcher.assign("00Q123", "Jane Doe").await;

    assert!(outcome.succeeded());
    assert_eq!(
        outcome.state,
        AssignState::Succeeded {
            lead_id: "00Q123".to_string()
        }
    );
    assert_eq!(crm.assigns.load(Ordering::SeqCst), 1);

    let toasts = rec.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Success");
    assert_eq!(toasts[0].variant, ToastVariant::Success);
    assert_eq!(toasts[0].mode, DismissMode::Dismissable);
    assert!(toasts[0].message.contains("Jane Doe"));
    assert_eq!(toasts[0].message, "Lead \"Jane Doe\" has been assigned to you");

    assert_eq!(query.fetch_count(), 1);
    assert_eq!(rx.recv().await.unwrap().unwrap().len(), 4);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_rejected_assign_reports_message_without_refresh() {
    let crm = Arc::new(MockCrm::new(sample()).failing_assign(CrmError::Rejected {
        body: ErrorBody::with_message("LIMIT_EXCEEDED"),
    }));
    let (dispatcher, query, mut rx, rec) = wire(crm);

    let outcome = dispatcher.assign("00Q124", "John Roe").await;

    assert!(!outcome.succeeded());
    assert_eq!(
        outcome.state,
        AssignState::Failed {
            lead_id: "00Q124".to_string(),
            message: "LIMIT_EXCEEDED".to_string(),
        }
    );
    let toasts = rec.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].variant, ToastVariant::Error);
    assert!(toasts[0].message.contains("LIMIT_EXCEEDED"));
    assert_eq!(toasts[0].message, "Failed to assign lead: LIMIT_EXCEEDED");

    assert_eq!(query.fetch_count(), 0);
    assert!(rx.try_recv().is_err());
}

#[tokio::test]
async fn test_assign_failure_without_body_uses_fallback() {
    let crm = Arc::new(MockCrm::new(sample()).failing_assign(CrmError::Api {
        status: 502,
        body: None,
    }));
    let (dispatcher, _query, _rx, rec) = wire(crm);

    dispatcher.assign("00Q125", "Ann Poe").await;

    assert_eq!(rec.toasts()[0].message, "Failed to assign lead: Unknown error occurred");
}

#[tokio::test]
async fn test_read_error_without_message_uses_fallback() {
    let crm = Arc::new(MockCrm::new(sample()).failing_fetch(CrmError::Api {
        status: 500,
        body: Some(ErrorBody::default()),
    }));
    let (_dispatcher, query, mut rx, _) = wire(crm);
    let rec = RecordingNotifier::new();
    let mut dash = LeadDashboard::default();

    query.load().await;
    dash.on_query_result(rx.recv().await.unwrap(), &rec);

    assert!(!dash.is_loading());
    assert!(dash.leads().is_empty());
    assert!(dash.filtered().is_empty());
    let toasts = rec.toasts();
    assert_eq!(toasts.len(), 1);
    assert_eq!(toasts[0].title, "Error");
    assert!(toasts[0].message.contains("Unknown error occurred"));

    // the next emission recovers
    query.refresh().await;
    dash.on_query_result(rx.recv().await.unwrap(), &rec);
    assert_eq!(dash.leads().len(), 4);
    assert_eq!(rec.toasts().len(), 1);
}

#[tokio::test]
async fn test_emission_decorates_and_filters() {
    let crm = Arc::new(MockCrm::new(sample()));
    let (_dispatcher, query, mut rx, _) = wire(crm);
    let rec = RecordingNotifier::new();
    let mut dash = LeadDashboard::new(FilterCriteria {
        min_score: 80,
        industry: String::new(),
        qualified_only: false,
    });

    query.load().await;
    dash.on_query_result(rx.recv().await.unwrap(), &rec);

    assert_eq!(dash.leads().len(), 4);
    let ids: Vec<_> = dash.filtered().iter().map(|l| l.id()).collect();
    assert_eq!(ids, vec!["00Q123", "00Q124", "00Q126"]);
    assert_eq!(dash.leads()[0].score_class, ScoreClass::High);
    assert_eq!(dash.leads()[1].score_class, ScoreClass::Medium);
    assert_eq!(dash.leads()[2].score_class, ScoreClass::Low);
    assert_eq!(dash.leads()[3].score_class, ScoreClass::Medium);
    assert_eq!(dash.leads()[1].status_label, "Not Qualified");
    assert_eq!(dash.results_label(), "3 Leads Found");
    assert_eq!(dash.qualified_label(), "2 Qualified");

    dash.set_criteria(FilterCriteria::default());
    assert_eq!(dash.filtered(), dash.leads());
}

#[tokio::test]
async fn test_demo_round_trip_removes_assigned_lead() {
    let demo = Arc::new(DemoCrm::new(sample()));
    let (query, mut rx) = LeadQuery::new(demo.clone());
    let rec = Arc::new(RecordingNotifier::new());
    let notifier: Arc<dyn Notifier> = rec.clone();
    let dispatcher = ActionDispatcher::new(demo, notifier, query.clone());
    let mut dash = LeadDashboard::default();

    query.load().await;
    dash.on_query_result(rx.recv().await.unwrap(), &*rec);
    assert_eq!(dash.filtered().len(), 4);

    assert!(dash.begin_assign("00Q124"));
    let outcome = dispatcher.assign("00Q124", "John Roe").await;
    dash.on_query_result(rx.recv().await.unwrap(), &*rec);
    dash.finish_assign(&outcome.lead_id);

    assert!(dash.find("00Q124").is_none());
    assert_eq!(dash.filtered().len(), 3);
    assert!(dash.filtered().iter().all(|l| !l.assign_disabled));
    assert_eq!(query.fetch_count(), 2);
}
