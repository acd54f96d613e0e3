//! Query engine: derive the display list from the catalog and the view state
//!
//! Pure functions. The source slice is never reordered; every call returns a
//! fresh sequence.

use std::cmp::Ordering;

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::record::Record;
use crate::state::{CategoryFilter, SortMode, ViewState};

/// Filter and sort `records` for display.
pub fn derive<'a>(records: &'a [Record], view: &ViewState) -> Vec<&'a Record> {
    derive_indices(records, view)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

/// Same as [`derive`], as positions into `records`.
pub fn derive_indices(records: &[Record], view: &ViewState) -> Vec<usize> {
    let term = view.search_term.to_lowercase();
    let mut indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, record)| matches_category(record, &view.category))
        .filter(|(_, record)| term.is_empty() || matches_term(record, &term))
        .map(|(index, _)| index)
        .collect();

    match view.sort {
        SortMode::NameAsc => {
            indices.sort_by(|&a, &b| compare_names(&records[a].name, &records[b].name))
        }
        SortMode::YearAsc => indices.sort_by_key(|&index| records[index].sort_year()),
        SortMode::YearDesc => indices.sort_by(|&a, &b| {
            records[b].sort_year().cmp(&records[a].sort_year())
        }),
        SortMode::None => {}
    }
    indices
}

pub fn matches_category(record: &Record, category: &CategoryFilter) -> bool {
    match category {
        CategoryFilter::All => true,
        CategoryFilter::Role(role) => record.has_role(role),
    }
}

/// `term` must already be lower-cased.
fn matches_term(record: &Record, term: &str) -> bool {
    record.name.to_lowercase().contains(term) || record.title.to_lowercase().contains(term)
}

/// Locale-style name ordering: letters compare without regard to accents or
/// case first, then unaccented before accented, then lower before upper case.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    primary_key(a)
        .cmp(&primary_key(b))
        .then_with(|| secondary_key(a).cmp(&secondary_key(b)))
        .then_with(|| tertiary_key(a).cmp(&tertiary_key(b)))
}

fn primary_key(name: &str) -> String {
    name.nfd()
        .filter(|ch| !is_combining_mark(*ch))
        .flat_map(char::to_lowercase)
        .collect()
}

fn secondary_key(name: &str) -> Vec<bool> {
    name.nfd().map(is_combining_mark).collect()
}

fn tertiary_key(name: &str) -> Vec<bool> {
    name.chars().map(char::is_uppercase).collect()
}
