//! Student repository implementations

mod in_memory;
mod postgres;

pub use in_memory::InMemoryStudentRepository;
pub use postgres::{PostgresConfig, PostgresStudentRepository};
