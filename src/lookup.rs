//! First-match lookup over records returned by the API

use crate::error::{Error, Result};

/// Return the first record satisfying `predicate`, scanning in response order.
///
/// `what` and `key` only describe the search for the [`Error::NotFound`] message.
pub fn find_first<T, I, P>(records: I, what: &'static str, key: &str, mut predicate: P) -> Result<T>
where
    I: IntoIterator<Item = T>,
    P: FnMut(&T) -> bool,
{
    records
        .into_iter()
        .find(|record| predicate(record))
        .ok_or_else(|| Error::NotFound {
            what,
            key: key.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Record {
        index: usize,
        name: &'static str,
    }

    fn records(names: &[&'static str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(index, name)| Record { index, name })
            .collect()
    }

    #[test]
    fn test_no_match_is_not_found() {
        let err = find_first(records(&["a", "b"]), "record", "z", |r| r.name == "z").unwrap_err();
        assert!(matches!(err, Error::NotFound { what: "record", ref key } if key == "z"));
    }

    #[test]
    fn test_empty_is_not_found() {
        let err = find_first(Vec::<Record>::new(), "record", "a", |_| true).unwrap_err();
        assert_eq!(err.kind(), "not-found");
    }

    #[test]
    fn test_single_match() {
        let found = find_first(records(&["a", "b", "c"]), "record", "b", |r| r.name == "b").unwrap();
        assert_eq!(found, Record { index: 1, name: "b" });
    }

    #[test]
    fn test_earliest_match_wins() {
        let found = find_first(records(&["x", "dup", "y", "dup"]), "record", "dup", |r| r.name == "dup").unwrap();
        assert_eq!(found.index, 1);
    }
}
