use serde::{Deserialize, Serialize};

/// A lead record as delivered by the CRM. Field names follow the CRM's API names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lead {
    #[serde(rename = "Id")]
    pub id: String,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Email", default)]
    pub email: String,
    #[serde(rename = "Industry", default)]
    pub industry: String,
    #[serde(rename = "Qualified__c", default)]
    pub qualified: bool,
    #[serde(rename = "Lead_Score__c", default)]
    pub score: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    Success,
    Weak,
}

impl StatusClass {
    pub fn css_class(self) -> &'static str {
        match self {
            StatusClass::Success => "slds-text-color_success",
            StatusClass::Weak => "slds-text-color_weak",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreClass {
    High,
    Medium,
    Low,
}

impl ScoreClass {
    pub fn css_class(self) -> &'static str {
        match self {
            ScoreClass::High => "slds-text-color_success",
            ScoreClass::Medium => "slds-text-color_warning",
            ScoreClass::Low => "slds-text-color_weak",
        }
    }
}

/// A lead plus the fields the table needs for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayLead {
    pub lead: Lead,
    pub status_label: &'static str,
    pub status_class: StatusClass,
    pub score_class: ScoreClass,
    pub assign_disabled: bool,
}

impl DisplayLead {
    pub fn id(&self) -> &str {
        &self.lead.id
    }

    pub fn name(&self) -> &str {
        &self.lead.name
    }

    pub fn score(&self) -> u32 {
        self.lead.score
    }

    pub fn industry(&self) -> &str {
        &self.lead.industry
    }

    pub fn qualified(&self) -> bool {
        self.lead.qualified
    }
}

/// Score thresholds are inclusive: 90 is high, 80 is medium.
pub fn score_class(score: u32) -> ScoreClass {
    if score >= 90 {
        ScoreClass::High
    } else if score >= 80 {
        ScoreClass::Medium
    } else {
        ScoreClass::Low
    }
}

pub fn status_label(qualified: bool) -> &'static str {
    if qualified {
        "Qualified"
    } else {
        "Not Qualified"
    }
}

pub fn status_class(qualified: bool) -> StatusClass {
    if qualified {
        StatusClass::Success
    } else {
        StatusClass::Weak
    }
}

/// Compute the derived display fields for a raw lead. Never fails.
pub fn decorate(lead: Lead) -> DisplayLead {
    DisplayLead {
        status_label: status_label(lead.qualified),
        status_class: status_class(lead.qualified),
        score_class: score_class(lead.score),
        assign_disabled: false,
        lead,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lead(score: u32, qualified: bool) -> Lead {
        Lead {
            id: "00Q1".to_string(),
            name: "Ada Lovelace".to_string(),
            email: "ada@example.com".to_string(),
            industry: "Technology".to_string(),
            qualified,
            score,
        }
    }

    #[test]
    fn test_score_class_thresholds() {
        assert_eq!(score_class(95), ScoreClass::High);
        assert_eq!(score_class(90), ScoreClass::High);
        assert_eq!(score_class(89), ScoreClass::Medium);
        assert_eq!(score_class(85), ScoreClass::Medium);
        assert_eq!(score_class(80), ScoreClass::Medium);
        assert_eq!(score_class(79), ScoreClass::Low);
        assert_eq!(score_class(50), ScoreClass::Low);
        assert_eq!(score_class(0), ScoreClass::Low);
    }

    #[test]
    fn test_status_fields_follow_qualification() {
        let q = decorate(lead(70, true));
        assert_eq!(q.status_label, "Qualified");
        assert_eq!(q.status_class, StatusClass::Success);

        let nq = decorate(lead(70, false));
        assert_eq!(nq.status_label, "Not Qualified");
        assert_eq!(nq.status_class, StatusClass::Weak);
    }

    #[test]
    fn test_assign_enabled_after_decorate() {
        assert!(!decorate(lead(99, true)).assign_disabled);
        assert!(!decorate(lead(10, false)).assign_disabled);
    }

    #[test]
    fn test_decorate_is_idempotent() {
        for score in [0, 50, 79, 80, 85, 89, 90, 95, 100] {
            for qualified in [true, false] {
                let once = decorate(lead(score, qualified));
                let twice = decorate(once.lead.clone());
                assert_eq!(once, twice);
            }
        }
    }

    #[test]
    fn test_css_classes() {
        assert_eq!(ScoreClass::High.css_class(), "slds-text-color_success");
        assert_eq!(ScoreClass::Medium.css_class(), "slds-text-color_warning");
        assert_eq!(ScoreClass::Low.css_class(), "slds-text-color_weak");
        assert_eq!(StatusClass::Weak.css_class(), "slds-text-color_weak");
    }

    #[test]
    fn test_lead_deserializes_with_missing_optional_fields() {
        let raw = r#"{"Id":"00Q9","Name":"Grace Hopper"}"#;
        let lead: Lead = serde_json::from_str(raw).unwrap();
        assert_eq!(lead.id, "00Q9");
        assert_eq!(lead.email, "");
        assert_eq!(lead.industry, "");
        assert_eq!(lead.score, 0);
        assert!(!lead.qualified);
    }
}
