//! Resolving user-typed references to todos.
//!
//! A reference is a full id, a unique id prefix, or the exact text of a todo
//! (case-insensitive). Misses carry a "did you mean" suggestion drawn from the
//! todo texts.

use strsim::levenshtein;

use crate::item::TodoItem;
use crate::list::TodoList;

/// Maximum Levenshtein distance to consider a text as a suggestion.
const MAX_SUGGESTION_DISTANCE: usize = 3;

/// Errors from resolving a todo reference.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LookupError {
    /// Nothing matched.
    #[error("{}", format_not_found(reference, suggestion.as_deref()))]
    NotFound {
        /// The reference as typed.
        reference: String,
        /// A similar todo text, if one exists.
        suggestion: Option<String>,
    },

    /// An id prefix matched more than one todo.
    #[error("ambiguous reference '{reference}' matches {} todos: {}", candidates.len(), candidates.join(", "))]
    Ambiguous {
        /// The reference as typed.
        reference: String,
        /// Ids of the matching todos.
        candidates: Vec<String>,
    },
}

fn format_not_found(reference: &str, suggestion: Option<&str>) -> String {
    let base = format!("todo '{}' not found.", reference);
    match suggestion {
        Some(s) => format!("{} Did you mean '{}'?", base, s),
        None => base,
    }
}

/// Finds the todo a reference points at.
///
/// Resolution order: exact id, then exact text (case-insensitive, ignoring
/// surrounding whitespace, first match in list order), then unique id prefix.
///
/// # Errors
///
/// Returns `LookupError::Ambiguous` when an id prefix matches several todos and
/// `LookupError::NotFound` when nothing matches.
pub fn resolve<'a>(list: &'a TodoList, reference: &str) -> Result<&'a TodoItem, LookupError> {
    let reference = reference.trim();

    if let Some(item) = list.get(reference) {
        return Ok(item);
    }

    let lowered = reference.to_lowercase();
    if let Some(item) = list
        .iter()
        .find(|item| item.text.trim().to_lowercase() == lowered)
    {
        return Ok(item);
    }

    if !reference.is_empty() {
        let by_prefix: Vec<&TodoItem> = list
            .iter()
            .filter(|item| item.id.starts_with(reference))
            .collect();
        match by_prefix.as_slice() {
            [item] => return Ok(*item),
            [] => {}
            many => {
                return Err(LookupError::Ambiguous {
                    reference: reference.to_string(),
                    candidates: many.iter().map(|item| item.id.clone()).collect(),
                })
            }
        }
    }

    Err(LookupError::NotFound {
        reference: reference.to_string(),
        suggestion: find_similar_text(reference, list.iter().map(|item| item.text.trim())),
    })
}

/// Resolves several references, stopping at the first failure.
///
/// # Errors
///
/// Returns the first [`LookupError`] encountered.
pub fn resolve_all<'a, S: AsRef<str>>(
    list: &'a TodoList,
    references: &[S],
) -> Result<Vec<&'a TodoItem>, LookupError> {
    references
        .iter()
        .map(|reference| resolve(list, reference.as_ref()))
        .collect()
}

/// Finds the closest candidate text using Levenshtein distance.
///
/// Returns the best match if its edit distance is within the threshold and it
/// is not an exact match.
pub(crate) fn find_similar_text<'a>(
    query: &str,
    candidates: impl Iterator<Item = &'a str>,
) -> Option<String> {
    let query_lower = query.to_lowercase();

    let (best_match, best_distance) = candidates
        .filter(|text| !text.is_empty())
        .map(|text| (text.to_string(), levenshtein(&query_lower, &text.to_lowercase())))
        .min_by_key(|(_, d)| *d)?;

    if best_distance > 0 && best_distance <= MAX_SUGGESTION_DISTANCE {
        Some(best_match)
    } else {
        None
    }
}
