//! Route labels and the answer returned to callers

mod label;
mod response;

pub use label::RouteLabel;
pub use response::{Answer, normalize_question};
