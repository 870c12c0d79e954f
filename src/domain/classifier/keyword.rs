//! Keyword rule-table classifier

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;

use super::{ClassifierConfig, IntentClassifier};
use crate::domain::route::RouteLabel;
use crate::domain::DomainError;

const MONTH_NAMES: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

#[derive(Debug)]
struct CompiledGroup {
    label: RouteLabel,
    keywords: Vec<String>,
    patterns: Vec<Regex>,
}

impl CompiledGroup {
    fn matches(&self, question: &str) -> bool {
        self.keywords.iter().any(|k| question.contains(k.as_str()))
            || self.patterns.iter().any(|p| p.is_match(question))
    }
}

/// Classifies questions by the first rule group with a matching keyword or
/// pattern. Date keywords are resolved once, at construction.
#[derive(Debug)]
pub struct KeywordClassifier {
    groups: Vec<CompiledGroup>,
}

impl KeywordClassifier {
    /// Builds the classifier, resolving date keywords against today's date
    pub fn new(config: &ClassifierConfig) -> Result<Self, DomainError> {
        Self::with_reference_date(config, Utc::now().date_naive())
    }

    /// Builds the classifier, resolving date keywords against `date`
    pub fn with_reference_date(
        config: &ClassifierConfig,
        date: NaiveDate,
    ) -> Result<Self, DomainError> {
        let mut groups = Vec::with_capacity(config.rules.len());

        for rule in &config.rules {
            let mut keywords: Vec<String> = rule
                .keywords
                .iter()
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect();

            if rule.include_current_date {
                keywords.push(date.year().to_string());
                keywords.push(MONTH_NAMES[date.month0() as usize].to_string());
            }

            let patterns = rule
                .patterns
                .iter()
                .map(|p| {
                    Regex::new(p).map_err(|e| {
                        DomainError::configuration(format!(
                            "Invalid classifier pattern '{}' for route {}: {}",
                            p, rule.label, e
                        ))
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;

            if keywords.is_empty() && patterns.is_empty() {
                return Err(DomainError::configuration(format!(
                    "Classifier rule for route {} has no keywords or patterns",
                    rule.label
                )));
            }

            groups.push(CompiledGroup {
                label: rule.label,
                keywords,
                patterns,
            });
        }

        Ok(Self { groups })
    }
}

impl IntentClassifier for KeywordClassifier {
    fn classify(&self, question: &str) -> RouteLabel {
        let question = question.to_lowercase();

        self.groups
            .iter()
            .find(|group| group.matches(&question))
            .map(|group| group.label)
            .unwrap_or(RouteLabel::General)
    }

    fn name(&self) -> &'static str {
        "keyword"
    }
}
