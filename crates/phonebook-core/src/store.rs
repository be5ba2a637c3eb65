//! Record store: the in-memory directory mirrored to a backend.
//!
//! The whole directory is loaded once by [`Store::open`] and rewritten in
//! full after every mutation. There is no batching and no locking; two
//! processes sharing a backing file race on save and the last writer wins.

use chrono::{Local, NaiveDateTime};
use tracing::{debug, info, warn};

use crate::backend::StorageBackend;
use crate::contact::Contact;
use crate::directory::{self, Pages};
use crate::error::{Error, Result};
use crate::schema::Field;

/// How [`Store::open`] obtained its initial directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Existing storage was read.
    Loaded,
    /// Storage was missing and an empty directory was written.
    Created,
}

/// Ordered contact directory bound to a storage backend.
#[derive(Debug)]
pub struct Store<B: StorageBackend> {
    backend: B,
    contacts: Vec<Contact>,
    outcome: LoadOutcome,
}

impl<B: StorageBackend> Store<B> {
    /// Load the directory from `backend`.
    ///
    /// Missing storage is initialized with an empty directory. Storage that
    /// exists but does not parse as a contact list fails with
    /// [`Error::CorruptData`] and is left untouched.
    pub fn open(mut backend: B) -> Result<Self> {
        let (contacts, outcome) = match backend.load()? {
            Some(content) => (decode(&content, &backend)?, LoadOutcome::Loaded),
            None => {
                info!(
                    "No contact data at {}, creating an empty directory",
                    backend.location().display()
                );
                backend.save(&encode(&[])?)?;
                (Vec::new(), LoadOutcome::Created)
            }
        };
        debug!(
            "Opened {} with {} contacts",
            backend.location().display(),
            contacts.len()
        );
        Ok(Self {
            backend,
            contacts,
            outcome,
        })
    }

    /// Rewrite storage with the full in-memory directory.
    pub fn save(&mut self) -> Result<()> {
        let content = encode(&self.contacts)?;
        self.backend.save(&content)?;
        debug!(
            "Saved {} contacts to {}",
            self.contacts.len(),
            self.backend.location().display()
        );
        Ok(())
    }

    /// Append a contact and persist.
    pub fn append(&mut self, contact: Contact) -> Result<()> {
        self.contacts.push(contact);
        self.save()
    }

    /// Check a user's edit selection before asking for the new value.
    ///
    /// The index is 1-based. Both an out-of-range index and an unknown field
    /// name yield [`Error::InvalidSelection`].
    pub fn validate_selection(&self, index: usize, field_name: &str) -> Result<Field> {
        self.check_index(index)?;
        Field::parse(field_name).ok_or_else(|| {
            warn!("Rejected edit of unknown field '{}'", field_name.trim());
            Error::unknown_field(field_name.trim())
        })
    }

    /// Set one field of the contact at the 1-based `index`, stamp it with the
    /// current local time, and persist.
    pub fn set_field(&mut self, index: usize, field: Field, value: impl Into<String>) -> Result<()> {
        self.set_field_at(index, field, value, Local::now().naive_local())
    }

    /// Like [`set_field`](Self::set_field) with an explicit timestamp.
    pub fn set_field_at(
        &mut self,
        index: usize,
        field: Field,
        value: impl Into<String>,
        now: NaiveDateTime,
    ) -> Result<()> {
        self.check_index(index)?;
        let contact = &mut self.contacts[index - 1];
        contact.set(field, value);
        contact.touch(now);
        self.save()
    }

    /// Resolve `field_name` and set it on the contact at `index`.
    pub fn edit(&mut self, index: usize, field_name: &str, value: impl Into<String>) -> Result<()> {
        let field = self.validate_selection(index, field_name)?;
        self.set_field(index, field, value)
    }

    /// Pages of the directory for interactive listing.
    pub fn list_all(&self, page_size: usize) -> Pages<'_> {
        directory::pages(&self.contacts, page_size)
    }

    /// Contacts whose named field equals `value` exactly.
    pub fn search(&self, field_name: &str, value: &str) -> Result<Vec<&Contact>> {
        let field = field_name.parse::<Field>()?;
        Ok(directory::search(&self.contacts, field, value))
    }

    /// Contact at the 1-based `index`.
    pub fn get(&self, index: usize) -> Option<&Contact> {
        index.checked_sub(1).and_then(|i| self.contacts.get(i))
    }

    /// All contacts in directory order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// Number of contacts.
    pub fn len(&self) -> usize {
        self.contacts.len()
    }

    /// Returns `true` if the directory holds no contacts.
    pub fn is_empty(&self) -> bool {
        self.contacts.is_empty()
    }

    /// Whether the store was loaded or freshly created.
    pub fn outcome(&self) -> LoadOutcome {
        self.outcome
    }

    /// The underlying backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index == 0 || index > self.contacts.len() {
            warn!(
                "Rejected selection of contact {index}, directory has {}",
                self.contacts.len()
            );
            return Err(Error::index_out_of_range(index, self.contacts.len()));
        }
        Ok(())
    }
}

/// Pretty JSON with two-space indent and literal UTF-8.
fn encode(contacts: &[Contact]) -> Result<String> {
    Ok(serde_json::to_string_pretty(contacts)?)
}

fn decode<B: StorageBackend>(content: &str, backend: &B) -> Result<Vec<Contact>> {
    serde_json::from_str(content).map_err(|e| Error::corrupt(e, backend.location()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use crate::error::SelectionFault;
    use chrono::NaiveDate;

    fn noon() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 31)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn two_contacts() -> Store<MemoryBackend> {
        let mut store = Store::open(MemoryBackend::new()).unwrap();
        store
            .append(Contact::new("Ivanov", "Ivan", "Ivanovich", "AcmeCo", "111", "222"))
            .unwrap();
        store
            .append(Contact::new("Petrov", "Petr", "Petrovich", "Other", "333", "444"))
            .unwrap();
        store
    }

    #[test]
    fn test_open_missing_creates_empty() {
        let store = Store::open(MemoryBackend::new()).unwrap();
        assert!(store.is_empty());
        assert_eq!(store.outcome(), LoadOutcome::Created);
        assert_eq!(store.backend().contents(), Some("[]"));
    }

    #[test]
    fn test_open_existing_loads() {
        let store = Store::open(MemoryBackend::with_contents("[]")).unwrap();
        assert_eq!(store.outcome(), LoadOutcome::Loaded);
        assert_eq!(store.backend().save_count(), 0);
    }

    #[test]
    fn test_open_corrupt_fails() {
        let err = Store::open(MemoryBackend::with_contents("{not json")).unwrap_err();
        assert!(matches!(err, Error::CorruptData { .. }));
    }

    #[test]
    fn test_open_wrong_shape_fails() {
        let err = Store::open(MemoryBackend::with_contents(r#"{"Фамилия": "A"}"#)).unwrap_err();
        assert!(matches!(err, Error::CorruptData { .. }));
    }

    #[test]
    fn test_append_persists() {
        let store = two_contacts();
        assert_eq!(store.len(), 2);
        assert_eq!(store.backend().save_count(), 3);
        let saved: Vec<Contact> =
            serde_json::from_str(store.backend().contents().unwrap()).unwrap();
        assert_eq!(saved, store.contacts());
    }

    #[test]
    fn test_encoding_is_pretty_and_literal() {
        let mut store = Store::open(MemoryBackend::new()).unwrap();
        store
            .append(Contact::new("Иванов", "Иван", "", "", "", ""))
            .unwrap();
        let text = store.backend().contents().unwrap();
        assert!(text.starts_with("[\n  {\n    \"Фамилия\": \"Иванов\""));
        assert!(!text.contains("\\u"));
        assert!(!text.contains("Обновлен"));
    }

    #[test]
    fn test_set_field_stamps_time() {
        let mut store = two_contacts();
        store
            .set_field_at(1, Field::Organization, "Acme", noon())
            .unwrap();
        let contact = store.get(1).unwrap();
        assert_eq!(contact.get(Field::Organization), "Acme");
        assert_eq!(contact.updated(), Some("31/12/2024 12:00"));
        assert!(store.get(2).unwrap().updated().is_none());
        assert!(store.backend().contents().unwrap().contains("\"Обновлен\": \"31/12/2024 12:00\""));
    }

    #[test]
    fn test_set_field_out_of_range_is_noop() {
        let mut store = two_contacts();
        let before = store.backend().contents().unwrap().to_string();
        let saves = store.backend().save_count();

        for index in [0, 3, 100] {
            let err = store.set_field(index, Field::WorkPhone, "x").unwrap_err();
            assert!(matches!(
                err,
                Error::InvalidSelection {
                    reason: SelectionFault::IndexOutOfRange { .. }
                }
            ));
        }

        assert_eq!(store.backend().contents().unwrap(), before);
        assert_eq!(store.backend().save_count(), saves);
    }

    #[test]
    fn test_validate_selection() {
        let store = two_contacts();
        assert_eq!(
            store.validate_selection(2, "рабочий телефон").unwrap(),
            Field::WorkPhone
        );
        assert!(store.validate_selection(3, "Имя").is_err());
        let err = store.validate_selection(1, "Адрес").unwrap_err();
        assert!(matches!(
            err,
            Error::InvalidSelection {
                reason: SelectionFault::UnknownField { .. }
            }
        ));
    }

    #[test]
    fn test_edit_unknown_field_leaves_store_unchanged() {
        let mut store = two_contacts();
        let before = store.contacts().to_vec();
        assert!(store.edit(1, "Телефон", "999").is_err());
        assert_eq!(store.contacts(), before.as_slice());
    }

    #[test]
    fn test_edit_normalizes_name() {
        let mut store = two_contacts();
        store.edit(2, "ЛИЧНЫЙ ТЕЛЕФОН", "555").unwrap();
        assert_eq!(store.get(2).unwrap().get(Field::PersonalPhone), "555");
        assert!(store.get(2).unwrap().updated().is_some());
    }

    #[test]
    fn test_search_by_name() {
        let store = two_contacts();
        let found = store.search("фамилия", "Petrov").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].get(Field::FirstName), "Petr");
        assert!(store.search("Фамилия", "X").unwrap().is_empty());
        assert!(store.search("Адрес", "X").is_err());
    }

    #[test]
    fn test_list_all_pages() {
        let store = two_contacts();
        let pages: Vec<_> = store.list_all(1).collect();
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].entries().next().unwrap().0, 2);
    }

    #[test]
    fn test_get_zero_is_none() {
        let store = two_contacts();
        assert!(store.get(0).is_none());
        assert!(store.get(3).is_none());
    }
}
