//! Natural-language question to student query translation

use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

/// Rows returned when a list question gives no explicit bound
pub const DEFAULT_LIST_LIMIT: usize = 20;

pub const MAX_LIST_LIMIT: usize = 100;

/// Words that look like a course after "in" but refer to the whole collection
const COLLECTION_WORDS: &[&str] = &[
    "total",
    "all",
    "database",
    "the database",
    "system",
    "the system",
    "school",
    "the school",
    "records",
    "the records",
];

/// Words that may surround a bare count or list phrase. Anything else left
/// over is an unsupported filter.
const FILLER_WORDS: &[&str] = &[
    "how", "many", "count", "number", "of", "total", "list", "show", "display", "give", "me",
    "who", "which", "what", "all", "every", "the", "students", "student", "users", "pupils",
    "people", "learners", "are", "is", "there", "enrolled", "registered", "currently", "in",
    "do", "we", "have", "please",
];

/// Words that turn a course capture into a clause
const CLAUSE_WORDS: &[&str] = &[
    "are", "is", "was", "were", "have", "has", "had", "who", "that", "which", "with", "than",
    "older", "younger", "above", "below", "over", "more", "less", "most", "least",
];

static STATS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(statistics|stats|breakdown|distribution|(per|by|each|every) course)\b")
        .unwrap_or_else(|e| panic!("invalid statistics pattern: {e}"))
});

static AVERAGE_AGE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(average|mean|avg)\b.*\bage\b")
        .unwrap_or_else(|e| panic!("invalid average pattern: {e}"))
});

static ID_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:student|user)(?:\s+(?:id|number|no\.?))?\s*#?\s*(\d+)\b|\bid\s*#?\s*(\d+)\b")
        .unwrap_or_else(|e| panic!("invalid id pattern: {e}"))
});

static NAME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:named|called|name is|with (?:the )?name)\s+([a-z][a-z .'-]*?)\s*[?.!]*$")
        .unwrap_or_else(|e| panic!("invalid name pattern: {e}"))
});

static COUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(how many|count|number of|total)\b")
        .unwrap_or_else(|e| panic!("invalid count pattern: {e}"))
});

static LIST_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(list|show|display|who|which|all students|enrolled students)\b")
        .unwrap_or_else(|e| panic!("invalid list pattern: {e}"))
});

static COURSE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"\b(?:enrolled in|taking|studying|in|for)\s+(?:the\s+)?([a-z0-9][a-z0-9 +#&.-]*?)(?:\s+(?:course|class|program))?\s*[?.!]*$",
    )
    .unwrap_or_else(|e| panic!("invalid course pattern: {e}"))
});

static LIMIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:first|top|limit)\s+(\d+)\b")
        .unwrap_or_else(|e| panic!("invalid limit pattern: {e}"))
});

/// A query shape the structured adapter knows how to execute
#[derive(Debug, Clone, PartialEq)]
pub enum StudentQuery {
    CountAll,
    CountByCourse(String),
    ListAll { limit: usize },
    ListByCourse { course: String, limit: usize },
    FindByName(String),
    GetById(i32),
    AverageAge(Option<String>),
    CourseStatistics,
}

impl StudentQuery {
    /// Maps a question onto a recognized shape.
    ///
    /// Questions matching none of the shapes are rejected rather than guessed at.
    pub fn parse(question: &str) -> Result<Self, DomainError> {
        let text = question.trim().to_lowercase();

        if text.is_empty() {
            return Err(DomainError::rejected("student", "empty question"));
        }

        if AVERAGE_AGE_RE.is_match(&text) {
            if STATS_RE.is_match(&text) {
                return Ok(Self::CourseStatistics);
            }
            return Ok(Self::AverageAge(extract_course(&text)?));
        }

        if STATS_RE.is_match(&text) {
            return Ok(Self::CourseStatistics);
        }

        if let Some(id) = extract_id(&text)? {
            return Ok(Self::GetById(id));
        }

        if let Some(name) = NAME_RE
            .captures(&text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str().trim().to_string())
            .filter(|n| !n.is_empty())
        {
            return Ok(Self::FindByName(name));
        }

        if COUNT_RE.is_match(&text) {
            ensure_no_extra_filter(&text, question)?;
            return Ok(match extract_course(&text)? {
                Some(course) => Self::CountByCourse(course),
                None => Self::CountAll,
            });
        }

        if LIST_RE.is_match(&text) {
            ensure_no_extra_filter(&text, question)?;
            let limit = extract_limit(&text);
            return Ok(match extract_course(&text)? {
                Some(course) => Self::ListByCourse { course, limit },
                None => Self::ListAll { limit },
            });
        }

        Err(unrecognized(question))
    }
}

fn unrecognized(question: &str) -> DomainError {
    DomainError::rejected(
        "student",
        format!("unrecognized student question: '{}'", question.trim()),
    )
}

/// Rejects count and list questions that carry a condition other than a
/// course or a row limit, such as an age bound or a superlative.
fn ensure_no_extra_filter(text: &str, question: &str) -> Result<(), DomainError> {
    let rest = COURSE_RE.replace(text, " ");
    let rest = LIMIT_RE.replace_all(&rest, " ");

    let only_filler = rest
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .all(|w| FILLER_WORDS.contains(&w));

    if only_filler {
        Ok(())
    } else {
        Err(unrecognized(question))
    }
}

fn extract_course(text: &str) -> Result<Option<String>, DomainError> {
    let Some(course) = COURSE_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().trim_end_matches(['?', '.', '!']).trim().to_string())
    else {
        return Ok(None);
    };

    if course.is_empty() || COLLECTION_WORDS.contains(&course.as_str()) {
        return Ok(None);
    }

    if course.split_whitespace().any(|w| CLAUSE_WORDS.contains(&w)) {
        return Err(DomainError::rejected(
            "student",
            format!("unsupported condition in course filter: '{}'", course),
        ));
    }

    Ok(Some(course))
}

fn extract_id(text: &str) -> Result<Option<i32>, DomainError> {
    let Some(captures) = ID_RE.captures(text) else {
        return Ok(None);
    };

    match captures.get(1).or_else(|| captures.get(2)) {
        Some(m) => m.as_str().parse().map(Some).map_err(|_| {
            DomainError::rejected("student", format!("student id out of range: {}", m.as_str()))
        }),
        None => Ok(None),
    }
}

fn extract_limit(text: &str) -> usize {
    LIMIT_RE
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<usize>().ok())
        .map(|n| n.clamp(1, MAX_LIST_LIMIT))
        .unwrap_or(DEFAULT_LIST_LIMIT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(question: &str) -> StudentQuery {
        StudentQuery::parse(question).unwrap()
    }

    #[test]
    fn test_count_all() {
        assert_eq!(parse("How many students are enrolled?"), StudentQuery::CountAll);
        assert_eq!(
            parse("how many students are there in total?"),
            StudentQuery::CountAll
        );
    }

    #[test]
    fn test_count_by_course() {
        assert_eq!(
            parse("How many students are in Python?"),
            StudentQuery::CountByCourse("python".to_string())
        );
        assert_eq!(
            parse("count students enrolled in data science"),
            StudentQuery::CountByCourse("data science".to_string())
        );
    }

    #[test]
    fn test_list_all() {
        assert_eq!(
            parse("List all students"),
            StudentQuery::ListAll {
                limit: DEFAULT_LIST_LIMIT
            }
        );
        assert_eq!(
            parse("show the first 5 students"),
            StudentQuery::ListAll { limit: 5 }
        );
    }

    #[test]
    fn test_list_by_course() {
        assert_eq!(
            parse("Who is taking Data Science?"),
            StudentQuery::ListByCourse {
                course: "data science".to_string(),
                limit: DEFAULT_LIST_LIMIT
            }
        );
    }

    #[test]
    fn test_find_by_name() {
        assert_eq!(
            parse("Find student named Alice"),
            StudentQuery::FindByName("alice".to_string())
        );
    }

    #[test]
    fn test_get_by_id() {
        assert_eq!(parse("Show student 42"), StudentQuery::GetById(42));
        assert_eq!(parse("details for student id #7"), StudentQuery::GetById(7));
    }

    #[test]
    fn test_average_age() {
        assert_eq!(
            parse("What is the average age of students?"),
            StudentQuery::AverageAge(None)
        );
        assert_eq!(
            parse("What is the average age of students in Python?"),
            StudentQuery::AverageAge(Some("python".to_string()))
        );
    }

    #[test]
    fn test_course_statistics() {
        assert_eq!(
            parse("Show enrollment statistics by course"),
            StudentQuery::CourseStatistics
        );
        assert_eq!(
            parse("average age per course"),
            StudentQuery::CourseStatistics
        );
    }

    #[test]
    fn test_unrecognized_question_is_rejected() {
        let result = StudentQuery::parse("what grade did the student get");

        assert!(matches!(
            result,
            Err(DomainError::AdapterRejected { ref origin, .. }) if origin == "student"
        ));
    }

    fn assert_rejected(question: &str) {
        let result = StudentQuery::parse(question);

        assert!(
            matches!(result, Err(DomainError::AdapterRejected { ref origin, .. }) if origin == "student"),
            "expected rejection for {:?}, got {:?}",
            question,
            result
        );
    }

    #[test]
    fn test_unsupported_filters_are_rejected() {
        assert_rejected("How many students are older than 25?");
        assert_rejected("How many students have a GPA above 3.5?");
        assert_rejected("How many students failed the exam?");
        assert_rejected("How many students in Python are older than 25?");
        assert_rejected("List students with more than 3 courses");
    }

    #[test]
    fn test_superlatives_are_rejected() {
        assert_rejected("Which course has the most students?");
        assert_rejected("Who is the youngest student?");
    }

    #[test]
    fn test_out_of_range_id_is_rejected() {
        assert_rejected("Show student 99999999999");
    }

    #[test]
    fn test_filler_around_count_and_list_is_accepted() {
        assert_eq!(parse("how many students do we have"), StudentQuery::CountAll);
        assert_eq!(
            parse("Which students are enrolled in Python?"),
            StudentQuery::ListByCourse {
                course: "python".to_string(),
                limit: DEFAULT_LIST_LIMIT
            }
        );
    }

    #[test]
    fn test_limit_is_clamped() {
        assert_eq!(
            parse("list the top 1000 students"),
            StudentQuery::ListAll {
                limit: MAX_LIST_LIMIT
            }
        );
    }
}
