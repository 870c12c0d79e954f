//! `/ask` request types

use serde::Deserialize;

/// Query string of `GET /ask`. `question` is optional so that a missing
/// parameter reaches the handler and gets the same 400 as an empty one.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AskParams {
    pub question: Option<String>,
}
