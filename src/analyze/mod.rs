//! Narrative analysis: requester collaborator + insight parser.

pub mod parser;
pub mod requester;
pub mod types;

pub use crate::analyze::parser::parse;
pub use crate::analyze::requester::{
    build_requester_from_config, DisabledRequester, DynRequester, MockRequester,
    NarrativeRequester, OpenAiRequester,
};
pub use crate::analyze::types::{default_insights, Analysis, TechnologyUsage, DEFAULT_INSIGHTS};
