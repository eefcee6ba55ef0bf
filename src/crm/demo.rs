use super::CrmError;
use crate::engine::Lead;
use crate::feed::{AssignAction, LeadSource};
use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::Mutex;
use std::time::Duration;

/// In-memory CRM used by `--demo`. Assigned leads leave the queue.
pub struct DemoCrm {
    leads: Mutex<Vec<Lead>>,
    rejecting: HashSet<String>,
    latency: Duration,
}

impl DemoCrm {
    pub fn new(leads: Vec<Lead>) -> Self {
        Self {
            leads: Mutex::new(leads),
            rejecting: HashSet::new(),
            latency: Duration::ZERO,
        }
    }

    /// Sample queue with one lead that always fails assignment.
    pub fn sample() -> Self {
        let mut demo = Self::new(sample_leads());
        demo.rejecting.insert("00Q000000000007".to_string());
        demo.latency = Duration::from_millis(400);
        demo
    }

    pub fn reject(mut self, lead_id: &str) -> Self {
        self.rejecting.insert(lead_id.to_string());
        self
    }
}

#[async_trait]
impl LeadSource for DemoCrm {
    async fn fetch_leads(&self) -> Result<Vec<Lead>, CrmError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        Ok(self.leads.lock().unwrap_or_else(|e| e.into_inner()).clone())
    }
}

#[async_trait]
impl AssignAction for DemoCrm {
    async fn assign_to_me(&self, lead_id: &str) -> Result<(), CrmError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        if self.rejecting.contains(lead_id) {
            return Err(CrmError::rejected("LIMIT_EXCEEDED"));
        }
        let mut leads = self.leads.lock().unwrap_or_else(|e| e.into_inner());
        let Some(idx) = leads.iter().position(|l| l.id == lead_id) else {
            return Err(CrmError::rejected("Lead is no longer available"));
        };
        leads.remove(idx);
        Ok(())
    }
}

fn sample_leads() -> Vec<Lead> {
    let rows: [(&str, &str, &str, bool, u32); 10] = [
        ("Maya Chen", "Technology", "maya.chen@northwind.io", true, 96),
        ("Omar Haddad", "Finance", "omar@ledgerline.com", true, 88),
        ("Lucia Ferreira", "Healthcare", "lferreira@caremed.org", false, 72),
        ("Tom Becker", "Manufacturing", "t.becker@steelworks.de", true, 81),
        ("Priya Nair", "Retail", "priya@shopwise.in", false, 64),
        ("Jonas Berg", "Technology", "jonas.berg@cloudnest.se", false, 90),
        ("Aiko Tanaka", "Finance", "aiko.tanaka@fintrust.jp", true, 79),
        ("Samuel Okafor", "Healthcare", "sokafor@vitalis.ng", true, 93),
        ("Elena Rossi", "Retail", "elena@moda.it", false, 55),
        ("Diego Morales", "Manufacturing", "diego@fabrica.mx", true, 85),
    ];
    rows.iter()
        .enumerate()
        .map(|(i, (name, industry, email, qualified, score))| Lead {
            id: format!("00Q{:012}", i + 1),
            name: name.to_string(),
            email: email.to_string(),
            industry: industry.to_string(),
            qualified: *qualified,
            score: *score,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_assign_removes_lead() {
        let demo = DemoCrm::new(sample_leads());
        demo.assign_to_me("00Q000000000001").await.unwrap();
        let leads = demo.fetch_leads().await.unwrap();
        assert_eq!(leads.len(), 9);
        assert!(leads.iter().all(|l| l.id != "00Q000000000001"));
    }

    #[tokio::test]
    async fn test_rejecting_lead_keeps_queue() {
        let demo = DemoCrm::new(sample_leads()).reject("00Q000000000002");
        let err = demo.assign_to_me("00Q000000000002").await.unwrap_err();
        assert_eq!(super::super::error_message(&err), "LIMIT_EXCEEDED");
        assert_eq!(demo.fetch_leads().await.unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_unknown_lead() {
        let demo = DemoCrm::new(Vec::new());
        let err = demo.assign_to_me("nope").await.unwrap_err();
        assert!(matches!(err, CrmError::Rejected { .. }));
    }

    #[test]
    fn test_sample_ids_unique() {
        let leads = sample_leads();
        let ids: HashSet<_> = leads.iter().map(|l| l.id.clone()).collect();
        assert_eq!(ids.len(), leads.len());
        assert!(ids.contains("00Q000000000007"));
    }
}
