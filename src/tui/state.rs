use super::input::TuiCommand;
use crate::config::DashboardConfig;
use crate::dashboard::{AssignOutcome, AssignState, LeadDashboard};
use crate::engine::filter::{self, industry_options, FilterCriteria, IndustryOption};
use crate::engine::DisplayLead;
use crate::feed::QueryResult;
use crate::notify::{Notifier, Toast};
use std::collections::VecDeque;
use std::time::{Duration, Instant};

const MAX_LOGS: usize = 200;
const MAX_TOASTS: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditScore,
}

/// Side effects the event loop must run after a command is applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Quit,
    Assign { lead_id: String, lead_name: String },
    Refresh,
}

#[derive(Debug, Clone)]
pub struct ToastEntry {
    pub toast: Toast,
    pub shown_at: Instant,
    pub time: String,
}

#[derive(Debug, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub dashboard: LeadDashboard,
    pub industry_options: Vec<IndustryOption>,
    pub industry_index: usize,
    pub score_step: u32,
    pub selected: usize,
    pub input_mode: InputMode,
    pub score_buffer: String,
    pub toasts: VecDeque<ToastEntry>,
    pub toast_ttl: Duration,
    pub logs: VecDeque<LogEntry>,
    pub demo_mode: bool,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: &DashboardConfig, demo_mode: bool) -> Self {
        let industry_options = industry_options(&config.industries);
        let criteria = FilterCriteria {
            min_score: config.default_min_score.min(filter::MAX_SCORE),
            industry: String::new(),
            qualified_only: config.qualified_only,
        };
        Self {
            dashboard: LeadDashboard::new(criteria),
            industry_options,
            industry_index: 0,
            score_step: config.score_step.max(1),
            selected: 0,
            input_mode: InputMode::Normal,
            score_buffer: String::new(),
            toasts: VecDeque::with_capacity(MAX_TOASTS),
            toast_ttl: Duration::from_secs(config.toast_ttl_s),
            logs: VecDeque::with_capacity(MAX_LOGS),
            demo_mode,
            start_time: Instant::now(),
        }
    }

    pub fn push_log(&mut self, level: &str, message: String) {
        let time = chrono::Local::now().format("%H:%M:%S").to_string();
        if self.logs.len() >= MAX_LOGS {
            self.logs.pop_front();
        }
        self.logs.push_back(LogEntry {
            time,
            level: level.to_string(),
            message,
        });
    }

    pub fn push_toast(&mut self, toast: Toast) {
        self.push_log(toast.variant.as_str(), format!("{}: {}", toast.title, toast.message));
        if self.toasts.len() >= MAX_TOASTS {
            self.toasts.pop_back();
        }
        self.toasts.push_front(ToastEntry {
            time: chrono::Local::now().format("%H:%M:%S").to_string(),
            shown_at: Instant::now(),
            toast,
        });
    }

    pub fn expire_toasts(&mut self, now: Instant) {
        let ttl = self.toast_ttl;
        self.toasts.retain(|t| now.duration_since(t.shown_at) < ttl);
    }

    pub fn clear_toasts(&mut self) {
        self.toasts.clear();
    }

    pub fn on_query_result(&mut self, result: QueryResult, notifier: &dyn Notifier) {
        let ok = result.is_ok();
        self.dashboard.on_query_result(result, notifier);
        if ok {
            self.push_log("INFO", self.dashboard.results_label());
        }
        self.clamp_selection();
    }

    pub fn on_assign_finished(&mut self, outcome: &AssignOutcome) {
        self.dashboard.finish_assign(&outcome.lead_id);
        match &outcome.state {
            AssignState::Succeeded { .. } => {
                self.push_log("INFO", format!("assigned {}", outcome.lead_name));
            }
            AssignState::Failed { message, .. } => {
                self.push_log("ERROR", format!("assign {} failed: {}", outcome.lead_name, message));
            }
            AssignState::Idle | AssignState::Pending { .. } => {}
        }
    }

    pub fn selected_lead(&self) -> Option<&DisplayLead> {
        self.dashboard.filtered().get(self.selected)
    }

    pub fn current_industry(&self) -> &IndustryOption {
        &self.industry_options[self.industry_index]
    }

    pub fn uptime(&self) -> String {
        let secs = self.start_time.elapsed().as_secs();
        let h = secs / 3600;
        let m = (secs % 3600) / 60;
        format!("{}h {:02}m", h, m)
    }

    fn clamp_selection(&mut self) {
        let len = self.dashboard.filtered().len();
        self.selected = self.selected.min(len.saturating_sub(1));
    }

    fn move_selection(&mut self, delta: isize) {
        let len = self.dashboard.filtered().len();
        if len == 0 {
            self.selected = 0;
            return;
        }
        let next = self.selected as isize + delta;
        self.selected = next.clamp(0, len as isize - 1) as usize;
    }

    fn cycle_industry(&mut self, forward: bool) {
        let n = self.industry_options.len();
        self.industry_index = if forward {
            (self.industry_index + 1) % n
        } else {
            (self.industry_index + n - 1) % n
        };
        let value = self.industry_options[self.industry_index].value.clone();
        self.dashboard.set_industry(&value);
    }

    fn step_min_score(&mut self, up: bool) {
        let current = self.dashboard.criteria().min_score;
        let next = if up {
            current.saturating_add(self.score_step)
        } else {
            current.saturating_sub(self.score_step)
        };
        self.dashboard.set_min_score(next);
    }

    /// Apply a key command to the view. Anything needing IO is returned as an `Effect`.
    pub fn apply(&mut self, cmd: TuiCommand) -> Option<Effect> {
        let effect = match cmd {
            TuiCommand::Quit => return Some(Effect::Quit),
            TuiCommand::MoveUp => {
                self.move_selection(-1);
                None
            }
            TuiCommand::MoveDown => {
                self.move_selection(1);
                None
            }
            TuiCommand::Top => {
                self.selected = 0;
                None
            }
            TuiCommand::Bottom => {
                self.selected = self.dashboard.filtered().len().saturating_sub(1);
                None
            }
            TuiCommand::Assign => self.begin_assign(),
            TuiCommand::Refresh => {
                self.push_log("INFO", "refreshing leads".to_string());
                self.dashboard.mark_loading();
                Some(Effect::Refresh)
            }
            TuiCommand::StartScoreEdit => {
                self.input_mode = InputMode::EditScore;
                let current = self.dashboard.criteria().min_score;
                self.score_buffer = if current == 0 { String::new() } else { current.to_string() };
                None
            }
            TuiCommand::ScoreInput(c) => {
                if c.is_ascii_digit() && self.score_buffer.len() < 3 {
                    self.score_buffer.push(c);
                }
                None
            }
            TuiCommand::ScoreBackspace => {
                self.score_buffer.pop();
                None
            }
            TuiCommand::CommitScore => {
                let score = filter::parse_min_score(&self.score_buffer);
                self.dashboard.set_min_score(score);
                self.input_mode = InputMode::Normal;
                self.score_buffer.clear();
                None
            }
            TuiCommand::CancelScoreEdit => {
                self.input_mode = InputMode::Normal;
                self.score_buffer.clear();
                None
            }
            TuiCommand::ScoreUp => {
                self.step_min_score(true);
                None
            }
            TuiCommand::ScoreDown => {
                self.step_min_score(false);
                None
            }
            TuiCommand::NextIndustry => {
                self.cycle_industry(true);
                None
            }
            TuiCommand::PrevIndustry => {
                self.cycle_industry(false);
                None
            }
            TuiCommand::ToggleQualified => {
                let next = !self.dashboard.criteria().qualified_only;
                self.dashboard.set_qualified_only(next);
                None
            }
            TuiCommand::ResetFilters => {
                self.dashboard.reset_filters();
                self.industry_index = 0;
                None
            }
            TuiCommand::ClearToasts => {
                self.clear_toasts();
                None
            }
        };
        self.clamp_selection();
        effect
    }

    fn begin_assign(&mut self) -> Option<Effect> {
        let (lead_id, lead_name) = {
            let lead = self.selected_lead()?;
            (lead.id().to_string(), lead.name().to_string())
        };
        if !self.dashboard.begin_assign(&lead_id) {
            self.push_log("WARN", format!("assignment already in flight for {}", lead_name));
            return None;
        }
        self.push_log("INFO", format!("assigning {}", lead_name));
        Some(Effect::Assign { lead_id, lead_name })
    }
}
