//! Rule table configuration for the keyword classifier

use serde::Deserialize;

use crate::domain::route::RouteLabel;

/// One rule group: if any keyword or pattern matches, the question takes `label`
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RuleGroup {
    pub label: RouteLabel,
    /// Case-insensitive substring matches
    #[serde(default)]
    pub keywords: Vec<String>,
    /// Regular expressions, matched against the lower-cased question
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Adds the current year and month name as keywords when the classifier is built
    #[serde(default)]
    pub include_current_date: bool,
}

impl RuleGroup {
    pub fn new(label: RouteLabel) -> Self {
        Self {
            label,
            keywords: Vec::new(),
            patterns: Vec::new(),
            include_current_date: false,
        }
    }

    pub fn with_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.keywords.extend(keywords.into_iter().map(Into::into));
        self
    }

    pub fn with_patterns<I, S>(mut self, patterns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.patterns.extend(patterns.into_iter().map(Into::into));
        self
    }

    pub fn with_current_date(mut self) -> Self {
        self.include_current_date = true;
        self
    }
}

/// Ordered rule groups; earlier groups take priority. Questions matching no
/// group fall back to [`RouteLabel::General`].
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ClassifierConfig {
    #[serde(default = "default_rules")]
    pub rules: Vec<RuleGroup>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

fn default_rules() -> Vec<RuleGroup> {
    vec![
        RuleGroup::new(RouteLabel::Structured).with_keywords(STUDENT_KEYWORDS.iter().copied()),
        RuleGroup::new(RouteLabel::Web)
            .with_keywords(LIVE_KEYWORDS.iter().copied())
            .with_patterns(FUTURE_PATTERNS.iter().copied())
            .with_current_date(),
        RuleGroup::new(RouteLabel::Retrieval).with_keywords(DOMAIN_KEYWORDS.iter().copied()),
    ]
}

const STUDENT_KEYWORDS: &[&str] = &[
    "student",
    "enrollment",
    "enrolled",
    "course",
    "class",
    "grade",
    "gpa",
    "learner",
    "pupil",
    "undergraduate",
    "graduate",
    "major",
    "minor",
    "average age",
    "who is taking",
    "who studies",
];

const LIVE_KEYWORDS: &[&str] = &[
    "today",
    "now",
    "current",
    "latest",
    "recent",
    "yesterday",
    "this week",
    "this month",
    "this year",
    "trending",
    "breaking",
    "live",
    "real-time",
    "news",
    "weather",
    "stock",
    "price",
    "election",
    "covid",
    "pandemic",
    "sports score",
    "match result",
    "currency rate",
    "exchange rate",
    "update",
];

const FUTURE_PATTERNS: &[&str] = &[
    r"\bwill\b",
    r"\bgoing to\b",
    r"\bforecast\b",
    r"\bpredict\b",
    r"\bexpect\b",
];

const DOMAIN_KEYWORDS: &[&str] = &[
    "crime",
    "criminal",
    "incident",
    "offense",
    "arrest",
    "robbery",
    "theft",
    "assault",
    "burglary",
    "homicide",
    "violation",
    "suspect",
    "victim",
    "report",
    "police",
    "investigation",
    "felony",
    "misdemeanor",
    "los angeles",
];
