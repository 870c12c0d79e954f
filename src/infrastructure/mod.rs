//! Infrastructure layer - External service implementations

pub mod adapters;
pub mod cache;
pub mod embedding;
pub mod http_client;
pub mod llm;
pub mod logging;
pub mod observability;
pub mod search;
pub mod services;
pub mod student;
pub mod vector_index;
