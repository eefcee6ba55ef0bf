pub mod decorate;
pub mod filter;

pub use decorate::{decorate, DisplayLead, Lead, ScoreClass, StatusClass};
pub use filter::{filter, FilterCriteria, IndustryOption};
