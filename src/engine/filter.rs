use super::decorate::DisplayLead;

/// Upper bound for the minimum-score control.
pub const MAX_SCORE: u32 = 100;

/// Client-side filter criteria. Zero/empty/false mean "no filter".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterCriteria {
    pub min_score: u32,
    pub industry: String,
    pub qualified_only: bool,
}

impl FilterCriteria {
    pub fn is_active(&self) -> bool {
        self.min_score != 0 || !self.industry.is_empty() || self.qualified_only
    }

    /// Whether a single record passes all three predicates.
    pub fn matches(&self, record: &DisplayLead) -> bool {
        let score_match = self.min_score == 0 || record.score() >= self.min_score;
        let industry_match = self.industry.is_empty() || record.industry() == self.industry;
        let qualified_match = !self.qualified_only || record.qualified();
        score_match && industry_match && qualified_match
    }
}

/// Visible subset of `records` under `criteria`, in input order.
pub fn filter(records: &[DisplayLead], criteria: &FilterCriteria) -> Vec<DisplayLead> {
    records
        .iter()
        .filter(|r| criteria.matches(r))
        .cloned()
        .collect()
}

/// Parse the score control's text. Blank or non-numeric input disables the filter.
pub fn parse_min_score(input: &str) -> u32 {
    input
        .trim()
        .parse::<u32>()
        .map(|v| v.min(MAX_SCORE))
        .unwrap_or(0)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndustryOption {
    pub label: String,
    pub value: String,
}

impl IndustryOption {
    pub fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// "All Industries" first, then one option per named industry.
pub fn industry_options(industries: &[String]) -> Vec<IndustryOption> {
    let mut out = vec![IndustryOption::new("All Industries", "")];
    out.extend(
        industries
            .iter()
            .filter(|i| !i.is_empty())
            .map(|i| IndustryOption::new(i, i)),
    );
    out
}

pub fn default_industries() -> Vec<String> {
    ["Technology", "Finance", "Healthcare", "Manufacturing", "Retail"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

pub fn results_label(count: usize) -> String {
    format!("{} Lead{} Found", count, if count != 1 { "s" } else { "" })
}

pub fn qualified_label(records: &[DisplayLead]) -> String {
    let qualified = records.iter().filter(|r| r.qualified()).count();
    format!("{} Qualified", qualified)
}

pub fn has_qualified_leads(records: &[DisplayLead]) -> bool {
    records.iter().any(|r| r.qualified())
}
