//! Visitor messages kept in browser storage.
//!
//! The whole list lives as one JSON array under [`STORAGE_KEY`], newest
//! first. Every change reads the list, edits it and writes all of it back.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FieldError;

pub const STORAGE_KEY: &str = "portfolio_guestbook";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuestbookEntry {
    pub id: u64,
    pub name: String,
    pub text: String,
    /// Already formatted for display.
    pub date: String,
}

pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, FieldError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), FieldError>;
}

#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, FieldError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// `window.localStorage`.
pub struct LocalStorage {
    storage: web_sys::Storage,
}

impl LocalStorage {
    pub fn new() -> Result<Self, FieldError> {
        let storage = crate::utils::window()?
            .local_storage()?
            .ok_or(FieldError::StorageUnavailable)?;
        Ok(LocalStorage { storage })
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, FieldError> {
        self.storage
            .get_item(key)
            .map_err(|err| FieldError::Storage(format!("{:?}", err)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FieldError> {
        self.storage
            .set_item(key, value)
            .map_err(|err| FieldError::Storage(format!("{:?}", err)))
    }
}

pub struct Guestbook<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> Guestbook<S> {
    pub fn new(store: S) -> Self {
        Guestbook { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// All entries, newest first. A missing key is an empty guestbook.
    pub fn entries(&self) -> Result<Vec<GuestbookEntry>, FieldError> {
        match self.store.get(STORAGE_KEY)? {
            Some(json) => serde_json::from_str(&json).map_err(FieldError::Corrupt),
            None => Ok(Vec::new()),
        }
    }

    fn write(&mut self, entries: &[GuestbookEntry]) -> Result<(), FieldError> {
        let json = serde_json::to_string(entries).map_err(FieldError::Encode)?;
        self.store.set(STORAGE_KEY, &json)
    }

    /// Adds a message at the top of the list. Returns `None` without touching
    /// storage when the name or the text is blank.
    pub fn post(
        &mut self,
        name: &str,
        text: &str,
        id: u64,
        date: &str,
    ) -> Result<Option<GuestbookEntry>, FieldError> {
        if name.trim().is_empty() || text.trim().is_empty() {
            return Ok(None);
        }
        let entry = GuestbookEntry {
            id,
            name: name.to_owned(),
            text: text.to_owned(),
            date: date.to_owned(),
        };
        let mut entries = self.entries()?;
        entries.insert(0, entry.clone());
        self.write(&entries)?;
        log::debug!("guestbook entry {} added, {} total", id, entries.len());
        Ok(Some(entry))
    }

    /// Removes the entry with `id`. Returns whether one was found.
    pub fn delete(&mut self, id: u64) -> Result<bool, FieldError> {
        let mut entries = self.entries()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        self.write(&entries)?;
        Ok(entries.len() != before)
    }
}

/// Escapes text for insertion into HTML.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guestbook() -> Guestbook<MemoryStore> {
        Guestbook::new(MemoryStore::new())
    }

    #[test]
    fn empty_storage_is_empty_guestbook() {
        assert!(guestbook().entries().unwrap().is_empty());
    }

    #[test]
    fn newest_entries_come_first() {
        let mut book = guestbook();
        book.post("Ada", "hello", 1, "1/2/2024").unwrap();
        book.post("Grace", "hi there", 2, "1/3/2024").unwrap();
        let ids: Vec<u64> = book.entries().unwrap().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn blank_fields_are_rejected() {
        let mut book = guestbook();
        assert_eq!(book.post("   ", "text", 1, "today").unwrap(), None);
        assert_eq!(book.post("name", "\n\t", 2, "today").unwrap(), None);
        assert_eq!(book.store().get(STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn text_is_stored_untrimmed() {
        let mut book = guestbook();
        let entry = book.post(" Ada ", "hi ", 5, "today").unwrap().unwrap();
        assert_eq!(entry.name, " Ada ");
        assert_eq!(book.entries().unwrap()[0].text, "hi ");
    }

    #[test]
    fn delete_rewrites_without_entry() {
        let mut book = guestbook();
        book.post("a", "one", 1, "d").unwrap();
        book.post("b", "two", 2, "d").unwrap();
        assert!(book.delete(1).unwrap());
        assert!(!book.delete(1).unwrap());
        let entries = book.entries().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, 2);
    }

    #[test]
    fn reads_the_stored_json_layout() {
        let mut store = MemoryStore::new();
        store
            .set(
                STORAGE_KEY,
                r#"[{"id":1700000000000,"name":"Lin","text":"nice site","date":"11/14/2023"}]"#,
            )
            .unwrap();
        let book = Guestbook::new(store);
        let entries = book.entries().unwrap();
        assert_eq!(entries[0].id, 1_700_000_000_000);
        assert_eq!(entries[0].date, "11/14/2023");
    }

    #[test]
    fn corrupt_storage_is_an_error() {
        let mut store = MemoryStore::new();
        store.set(STORAGE_KEY, "{not json").unwrap();
        let mut book = Guestbook::new(store);
        assert!(matches!(book.entries(), Err(FieldError::Corrupt(_))));
        assert!(book.post("a", "b", 1, "d").is_err());
        assert_eq!(
            book.store().get(STORAGE_KEY).unwrap().as_deref(),
            Some("{not json")
        );
    }

    // Accepts reads, refuses every write
    struct ReadOnlyStore(MemoryStore);

    impl KeyValueStore for ReadOnlyStore {
        fn get(&self, key: &str) -> Result<Option<String>, FieldError> {
            self.0.get(key)
        }

        fn set(&mut self, _key: &str, _value: &str) -> Result<(), FieldError> {
            Err(FieldError::Storage("quota exceeded".to_owned()))
        }
    }

    #[test]
    fn write_failures_are_not_reported_as_corrupt_data() {
        let mut book = Guestbook::new(ReadOnlyStore(MemoryStore::new()));
        match book.post("Ada", "hello", 1, "today") {
            Err(FieldError::Storage(message)) => assert_eq!(message, "quota exceeded"),
            other => panic!("expected a storage error, got {:?}", other),
        }
        assert!(matches!(book.delete(1), Err(FieldError::Storage(_))));
        assert!(book.entries().unwrap().is_empty());
    }

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }
}
