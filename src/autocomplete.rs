//! Autocomplete suggestions for the search input

use crate::record::Record;

/// Upper bound on the suggestion list.
pub const SUGGESTION_LIMIT: usize = 20;

/// Records whose name contains `term` (case-insensitive), in catalog order.
/// Titles are not considered. An empty term yields nothing.
pub fn suggest<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    suggest_indices(records, term)
        .into_iter()
        .map(|index| &records[index])
        .collect()
}

pub fn suggest_indices(records: &[Record], term: &str) -> Vec<usize> {
    if term.is_empty() {
        return Vec::new();
    }
    let term = term.to_lowercase();
    records
        .iter()
        .enumerate()
        .filter(|(_, record)| record.name.to_lowercase().contains(&term))
        .map(|(index, _)| index)
        .take(SUGGESTION_LIMIT)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str, title: &str) -> Record {
        Record {
            name: name.into(),
            title: title.into(),
            ..Default::default()
        }
    }

    #[test]
    fn test_empty_term() {
        let records = vec![named("Ahri", "")];
        assert!(suggest(&records, "").is_empty());
    }

    #[test]
    fn test_name_only_in_source_order() {
        let records = vec![
            named("Zed", "Master of Shadows"),
            named("Nasus", "Curator of the Sands"),
            named("Shaco", "the Demon Jester"),
        ];

        let names: Vec<&str> = suggest(&records, "S")
            .iter()
            .map(|record| record.name.as_str())
            .collect();

        assert_eq!(names, vec!["Nasus", "Shaco"]);
    }

    #[test]
    fn test_bounded_to_limit() {
        let records: Vec<Record> = (0..1_500)
            .map(|i| named(&format!("Champion {i}"), ""))
            .collect();

        let suggestions = suggest(&records, "champ");

        assert_eq!(suggestions.len(), SUGGESTION_LIMIT);
        assert_eq!(suggestions[0].name, "Champion 0");
        assert_eq!(suggestions[19].name, "Champion 19");
    }
}
