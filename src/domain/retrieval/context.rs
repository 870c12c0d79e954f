//! Context block assembly for retrieval-augmented prompts

use super::RetrievedRecord;

/// Context used when the index returns nothing
pub const NO_RECORDS_MARKER: &str = "No relevant records found.";

const SEPARATOR: &str = "\n\n";

/// Joins record texts in the given order, stopping before the block would
/// exceed `max_chars`. A first record longer than the limit is cut at a char
/// boundary so the block is never empty when records exist.
pub fn build_context(records: &[RetrievedRecord], max_chars: usize) -> String {
    if records.is_empty() {
        return NO_RECORDS_MARKER.to_string();
    }

    let mut context = String::new();

    for record in records {
        let text = record.text.trim();

        if text.is_empty() {
            continue;
        }

        let needed = if context.is_empty() {
            text.chars().count()
        } else {
            SEPARATOR.len() + text.chars().count()
        };

        if context.chars().count() + needed > max_chars {
            if context.is_empty() {
                context = text.chars().take(max_chars).collect();
            }
            break;
        }

        if !context.is_empty() {
            context.push_str(SEPARATOR);
        }
        context.push_str(text);
    }

    if context.is_empty() {
        NO_RECORDS_MARKER.to_string()
    } else {
        context
    }
}
