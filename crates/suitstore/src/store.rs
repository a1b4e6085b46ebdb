//! In-memory record store.
//!
//! [`RecordStore`] owns the current collection of suits, in insertion order,
//! and guarantees that [`RecordStore::create`] never admits a second record
//! whose identifier matches an existing one ignoring case.
//!
//! Each mutating operation comes in two flavours: a `Result` form
//! ([`insert`](RecordStore::insert), [`replace`](RecordStore::replace),
//! [`remove`](RecordStore::remove)) that reports why it was rejected, and a
//! boolean form ([`create`](RecordStore::create),
//! [`update`](RecordStore::update), [`delete`](RecordStore::delete)) for
//! callers that only need to know whether it happened.

use tracing::debug;

use crate::error::{Error, Result};
use crate::record::SuitRecord;

/// The authoritative in-memory set of suit records.
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<SuitRecord>,
}

impl RecordStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record.
    ///
    /// # Errors
    ///
    /// Returns [`Error::BlankIdentifier`] if the identifier is blank, or
    /// [`Error::DuplicateIdentifier`] if a record with the same identifier
    /// (ignoring case) is already stored.
    pub fn insert(&mut self, record: SuitRecord) -> Result<()> {
        if record.has_blank_identifier() {
            return Err(Error::BlankIdentifier);
        }
        if self.find(&record.identifier).is_some() {
            return Err(Error::duplicate(record.identifier));
        }
        debug!("Adding suit {}", record.identifier);
        self.records.push(record);
        Ok(())
    }

    /// Add a record, returning whether it was accepted.
    pub fn create(&mut self, record: SuitRecord) -> bool {
        Self::accepted("create", self.insert(record))
    }

    /// A copy of every record, in insertion order.
    #[must_use]
    pub fn list(&self) -> Vec<SuitRecord> {
        self.records.clone()
    }

    /// Find the first record whose identifier matches, ignoring case.
    #[must_use]
    pub fn find(&self, identifier: &str) -> Option<&SuitRecord> {
        self.records
            .iter()
            .find(|record| record.matches_identifier(identifier))
    }

    /// Replace the record matching `identifier` with `new_record`.
    ///
    /// The replacement keeps the position of the record it replaces. Its own
    /// identifier is taken as given and is not checked against the lookup key
    /// or the rest of the store.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if nothing matches `identifier`.
    pub fn replace(&mut self, identifier: &str, new_record: SuitRecord) -> Result<()> {
        let slot = self
            .records
            .iter_mut()
            .find(|record| record.matches_identifier(identifier))
            .ok_or_else(|| Error::not_found(identifier))?;
        debug!("Replacing suit {} with {}", slot.identifier, new_record.identifier);
        *slot = new_record;
        Ok(())
    }

    /// Replace a record, returning whether a match was found.
    pub fn update(&mut self, identifier: &str, new_record: SuitRecord) -> bool {
        Self::accepted("update", self.replace(identifier, new_record))
    }

    /// Remove the first record matching `identifier` and return it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RecordNotFound`] if nothing matches `identifier`.
    pub fn remove(&mut self, identifier: &str) -> Result<SuitRecord> {
        let index = self
            .records
            .iter()
            .position(|record| record.matches_identifier(identifier))
            .ok_or_else(|| Error::not_found(identifier))?;
        let removed = self.records.remove(index);
        debug!("Removed suit {}", removed.identifier);
        Ok(removed)
    }

    /// Remove a record, returning whether a match was found.
    pub fn delete(&mut self, identifier: &str) -> bool {
        Self::accepted("delete", self.remove(identifier))
    }

    /// Records whose identifier or size contains `text`, ignoring case.
    ///
    /// An empty query matches everything.
    #[must_use]
    pub fn search(&self, text: &str) -> Vec<SuitRecord> {
        let needle = text.to_lowercase();
        self.records
            .iter()
            .filter(|record| {
                record.identifier.to_lowercase().contains(&needle)
                    || record.size.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    /// Swap in a whole new collection, discarding the current one.
    pub fn replace_all(&mut self, records: Vec<SuitRecord>) {
        debug!(
            "Replacing {} stored suits with {}",
            self.records.len(),
            records.len()
        );
        self.records = records;
    }

    /// Iterate over the stored records without copying.
    pub fn iter(&self) -> std::slice::Iter<'_, SuitRecord> {
        self.records.iter()
    }

    /// Number of stored records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the store holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn accepted<T>(operation: &str, result: Result<T>) -> bool {
        match result {
            Ok(_) => true,
            Err(e) => {
                debug!("Rejected {}: {}", operation, e);
                false
            }
        }
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a SuitRecord;
    type IntoIter = std::slice::Iter<'a, SuitRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::SuitKind;

    fn suit(id: &str) -> SuitRecord {
        SuitRecord::new(id, "M", 80.5, "2025-01-10")
    }

    fn create_test_store(ids: &[&str]) -> RecordStore {
        let mut store = RecordStore::new();
        for id in ids {
            assert!(store.create(suit(id)));
        }
        store
    }

    #[test]
    fn test_create_and_find() {
        let mut store = RecordStore::new();
        assert!(store.create(suit("T-01")));
        assert_eq!(store.len(), 1);

        let found = store.find("T-01").unwrap();
        assert_eq!(found.identifier, "T-01");
    }

    #[test]
    fn test_create_rejects_case_insensitive_duplicate() {
        let mut store = create_test_store(&["T-01"]);
        assert!(!store.create(suit("t-01")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_insert_reports_duplicate() {
        let mut store = create_test_store(&["T-01"]);
        let err = store.insert(suit("t-01")).unwrap_err();
        assert!(matches!(err, Error::DuplicateIdentifier { ref id } if id == "t-01"));
    }

    #[test]
    fn test_create_rejects_blank_identifier() {
        let mut store = RecordStore::new();
        assert!(!store.create(suit("")));
        assert!(!store.create(suit("   ")));
        assert!(store.is_empty());
        assert!(matches!(
            store.insert(suit(" ")),
            Err(Error::BlankIdentifier)
        ));
    }

    #[test]
    fn test_find_is_case_insensitive() {
        let store = create_test_store(&["Orion-7"]);
        assert!(store.find("orion-7").is_some());
        assert!(store.find("ORION-7").is_some());
        assert!(store.find("orion-8").is_none());
    }

    #[test]
    fn test_find_on_empty_store() {
        assert!(RecordStore::new().find("anything").is_none());
    }

    #[test]
    fn test_list_is_insertion_ordered_copy() {
        let store = create_test_store(&["C", "A", "B"]);
        let ids: Vec<_> = store.list().into_iter().map(|r| r.identifier).collect();
        assert_eq!(ids, ["C", "A", "B"]);

        let mut copy = store.list();
        copy.clear();
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_list_is_idempotent() {
        let store = create_test_store(&["A", "B"]);
        assert_eq!(store.list(), store.list());
    }

    #[test]
    fn test_list_empty() {
        assert!(RecordStore::new().list().is_empty());
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut store = create_test_store(&["A", "B", "C"]);
        let replacement = SuitRecord::new("B", "XL", 120.0, "2025-06-01");

        assert!(store.update("b", replacement.clone()));
        assert_eq!(store.len(), 3);
        assert_eq!(store.list()[1], replacement);
    }

    #[test]
    fn test_update_missing_identifier() {
        let mut store = create_test_store(&["A"]);
        assert!(!store.update("Z", suit("Z")));
        assert!(store.replace("Z", suit("Z")).unwrap_err().is_not_found());
        assert_eq!(store.list(), vec![suit("A")]);
    }

    #[test]
    fn test_update_may_change_identifier() {
        let mut store = create_test_store(&["A"]);
        assert!(store.update("A", suit("A-2")));
        assert!(store.find("A").is_none());
        assert!(store.find("a-2").is_some());
    }

    #[test]
    fn test_update_can_change_variant() {
        let mut store = create_test_store(&["A"]);
        assert!(store.update("A", suit("A").training("pool", "neoprene")));
        assert!(matches!(
            store.find("A").unwrap().kind,
            SuitKind::Training { .. }
        ));
    }

    #[test]
    fn test_delete_then_find() {
        let mut store = create_test_store(&["T-01", "T-02"]);
        assert!(store.delete("T-01"));
        assert!(store.find("T-01").is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_delete_missing() {
        let mut store = create_test_store(&["T-01"]);
        assert!(!store.delete("T-99"));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_remove_returns_record() {
        let mut store = create_test_store(&["T-01"]);
        let removed = store.remove("t-01").unwrap();
        assert_eq!(removed.identifier, "T-01");
    }

    #[test]
    fn test_example_scenario() {
        let mut store = RecordStore::new();
        assert!(store.create(SuitRecord::new("T-01", "M", 80.5, "2025-01-10")));
        assert!(!store.create(SuitRecord::new("t-01", "S", 60.0, "2025-02-01")));
        assert_eq!(store.find("T-01").unwrap().size, "M");
        assert!(store.delete("T-01"));
        assert!(store.find("T-01").is_none());
    }

    #[test]
    fn test_search_matches_identifier_and_size() {
        let mut store = RecordStore::new();
        store.create(SuitRecord::new("EVA-1", "Large", 100.0, "2025-01-01"));
        store.create(SuitRecord::new("TRN-2", "small", 50.0, "2025-01-01"));
        store.create(SuitRecord::new("EVA-3", "Medium", 75.0, "2025-01-01"));

        assert_eq!(store.search("eva").len(), 2);
        assert_eq!(store.search("SMALL").len(), 1);
        assert_eq!(store.search("").len(), 3);
        assert!(store.search("nothing").is_empty());
    }

    #[test]
    fn test_replace_all() {
        let mut store = create_test_store(&["A", "B"]);
        store.replace_all(vec![suit("Z")]);
        assert_eq!(store.len(), 1);
        assert!(store.find("A").is_none());
        assert!(store.find("Z").is_some());
    }

    #[test]
    fn test_iter() {
        let store = create_test_store(&["A", "B"]);
        let ids: Vec<&str> = (&store).into_iter().map(|r| r.identifier.as_str()).collect();
        assert_eq!(ids, ["A", "B"]);
        assert_eq!(store.iter().count(), 2);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        fn identifier() -> impl Strategy<Value = String> {
            "[a-cA-C]{1,2}-[0-2]"
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 128,
                ..ProptestConfig::default()
            })]

            /// No two stored identifiers are equal ignoring case, whatever
            /// sequence of creates was attempted.
            #[test]
            fn creates_never_store_duplicates(ids in prop::collection::vec(identifier(), 0..40)) {
                let mut store = RecordStore::new();
                for id in &ids {
                    let before = store.len();
                    let accepted = store.create(suit(id));
                    prop_assert_eq!(store.len(), before + usize::from(accepted));
                }

                let stored = store.list();
                for (i, a) in stored.iter().enumerate() {
                    for b in &stored[i + 1..] {
                        prop_assert!(!a.matches_identifier(&b.identifier));
                    }
                }
            }

            /// Update keeps the count, delete drops it by exactly one.
            #[test]
            fn update_and_delete_adjust_count(ids in prop::collection::vec(identifier(), 1..20)) {
                let mut store = RecordStore::new();
                for id in &ids {
                    store.create(suit(id));
                }
                let target = ids[0].to_uppercase();

                let before = store.len();
                prop_assert!(store.update(&target, suit(&ids[0])));
                prop_assert_eq!(store.len(), before);

                prop_assert!(store.delete(&target));
                prop_assert_eq!(store.len(), before - 1);
                prop_assert!(store.find(&target).is_none());
            }
        }
    }
}
