//! Dynamic predicate composition for list endpoints.
//!
//! Every entity surface offers the same listing semantics: a free-text search
//! term matched case-insensitively against a fixed set of searchable fields,
//! combined with exact-match filters over filterable fields. The predicate is
//! evaluated against JSON projections of stored documents, which keeps one
//! builder reusable across all entity types and lets fields address nested
//! paths such as `name.firstName`.

use std::cmp::Ordering;

use serde_json::Value;

/// A composable query predicate.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// Matches every document.
    All,
    /// Matches when every child matches.
    And(Vec<Predicate>),
    /// Matches when at least one child matches.
    Or(Vec<Predicate>),
    /// Case-insensitive substring match against a string field.
    Contains {
        /// Field path, possibly dotted.
        field: String,
        /// Search term.
        term: String,
    },
    /// Exact-match equality against a field, with loose numeric coercion.
    Eq {
        /// Field path, possibly dotted.
        field: String,
        /// Expected value.
        value: Value,
    },
}

impl Predicate {
    /// Evaluate the predicate against a document projection.
    #[must_use]
    pub fn matches(&self, doc: &Value) -> bool {
        match self {
            Self::All => true,
            Self::And(children) => children.iter().all(|child| child.matches(doc)),
            Self::Or(children) => children.iter().any(|child| child.matches(doc)),
            Self::Contains { field, term } => lookup_path(doc, field)
                .and_then(Value::as_str)
                .is_some_and(|text| text.to_lowercase().contains(&term.to_lowercase())),
            Self::Eq { field, value } => {
                lookup_path(doc, field).is_some_and(|found| loose_eq(found, value))
            }
        }
    }
}

/// Combine a search term and exact filters into one predicate.
///
/// The search term becomes an OR-group over `searchable_fields`; the filters
/// become an AND-group of equality clauses in entry order. When both groups
/// exist they are ANDed; when neither exists the predicate matches all
/// records. Absent filter values never produce a clause, so callers pass only
/// the filters actually present on the request.
#[must_use]
pub fn build_predicate(
    search_term: Option<&str>,
    searchable_fields: &[&str],
    filters: &[(String, Value)],
) -> Predicate {
    let mut groups = Vec::new();

    if let Some(term) = search_term.filter(|t| !t.is_empty()) {
        groups.push(Predicate::Or(
            searchable_fields
                .iter()
                .map(|field| Predicate::Contains {
                    field: (*field).to_owned(),
                    term: term.to_owned(),
                })
                .collect(),
        ));
    }

    if !filters.is_empty() {
        groups.push(Predicate::And(
            filters
                .iter()
                .map(|(field, value)| Predicate::Eq {
                    field: field.clone(),
                    value: value.clone(),
                })
                .collect(),
        ));
    }

    if groups.is_empty() {
        Predicate::All
    } else {
        Predicate::And(groups)
    }
}

/// Resolve a possibly dotted field path inside a document.
#[must_use]
pub fn lookup_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.')
        .try_fold(doc, |current, segment| current.get(segment))
}

/// Equality with the coercion the document store applied to query values.
///
/// Filter values arrive as query-string text, so a stored number compares
/// equal to its decimal string form.
#[must_use]
pub fn loose_eq(found: &Value, expected: &Value) -> bool {
    if found == expected {
        return true;
    }
    match (found, expected) {
        (Value::Number(number), Value::String(text))
        | (Value::String(text), Value::Number(number)) => text
            .parse::<f64>()
            .ok()
            .zip(number.as_f64())
            .is_some_and(|(a, b)| a == b),
        _ => false,
    }
}

/// Total order over JSON values used for dynamic sorting.
///
/// Missing values sort first; numbers order numerically, strings
/// lexicographically, and mixed types fall back to their type rank so the
/// order stays deterministic.
#[must_use]
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    match (left, right) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(a), Some(b)) => compare_present(a, b),
    }
}

fn compare_present(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => type_rank(a).cmp(&type_rank(b)),
    }
}

const fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}
