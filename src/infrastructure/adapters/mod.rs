//! Adapters binding each route label to its backend

mod general;
mod retrieval;
mod structured;
mod web;

pub use general::GeneralAdapter;
pub use retrieval::{
    DEFAULT_DOMAIN_DESCRIPTION, DEFAULT_MAX_CONTEXT_CHARS, DEFAULT_TOP_K, RetrievalAdapter,
    RetrievalSettings,
};
pub use structured::StructuredAdapter;
pub use web::{DEFAULT_MAX_RESULTS, WebSearchAdapter};
