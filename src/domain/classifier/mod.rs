//! Intent classification - maps a question to a route label

mod keyword;
mod rules;

use std::fmt::Debug;

pub use keyword::KeywordClassifier;
pub use rules::{ClassifierConfig, RuleGroup};

use crate::domain::route::RouteLabel;

/// Maps a question to exactly one route label. Total: never fails.
pub trait IntentClassifier: Send + Sync + Debug {
    fn classify(&self, question: &str) -> RouteLabel;

    /// Implementation name, for logs
    fn name(&self) -> &'static str;
}

#[cfg(test)]
pub mod mock {
    use super::*;

    /// Always answers with the same label
    #[derive(Debug)]
    pub struct FixedClassifier(pub RouteLabel);

    impl IntentClassifier for FixedClassifier {
        fn classify(&self, _question: &str) -> RouteLabel {
            self.0
        }

        fn name(&self) -> &'static str {
            "fixed"
        }
    }
}
