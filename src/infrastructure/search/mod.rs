//! Web search providers

mod duckduckgo;

pub use duckduckgo::{DEFAULT_DUCKDUCKGO_ENDPOINT, DuckDuckGoSearch, parse_results};
