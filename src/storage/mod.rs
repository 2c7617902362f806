//! Filter storage.
//!
//! Per-chat trigger -> response mappings persisted to a flat JSON file.
//! The whole store is loaded once at startup, mutated in memory, and
//! rewritten to disk after every change. Triggers keep their insertion
//! order: it decides both listing order and match precedence.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Response kind of a filter entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    /// Literal reply text (default when the persisted entry has no type)
    #[default]
    Text,
    Photo,
    Sticker,
    Video,
    Animation,
    Document,
    Voice,
    Audio,
}

impl FilterKind {
    /// Name used in the /filters listing and the persisted file.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Photo => "photo",
            Self::Sticker => "sticker",
            Self::Video => "video",
            Self::Animation => "animation",
            Self::Document => "document",
            Self::Voice => "voice",
            Self::Audio => "audio",
        }
    }
}

/// A stored auto-reply.
///
/// `data` is the reply text for [`FilterKind::Text`] and a Telegram file id
/// for every media kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FilterEntry {
    #[serde(rename = "type", default)]
    pub kind: FilterKind,
    #[serde(default)]
    pub data: String,
}

impl FilterEntry {
    pub fn new(kind: FilterKind, data: impl Into<String>) -> Self {
        Self {
            kind,
            data: data.into(),
        }
    }

    /// Create a plain text entry.
    pub fn text(data: impl Into<String>) -> Self {
        Self::new(FilterKind::Text, data)
    }
}

/// Filters of one chat, keyed by lowercase trigger, in insertion order.
pub type ChatFilters = IndexMap<String, FilterEntry>;

/// In-memory view of the persisted filter file.
///
/// The file is the single source of truth between runs; while the process
/// lives, this struct is. An absent chat key and an empty mapping both mean
/// "no filters".
#[derive(Debug)]
pub struct FilterStore {
    path: PathBuf,
    chats: IndexMap<String, ChatFilters>,
}

impl FilterStore {
    /// Load the store from `path`.
    ///
    /// A missing file yields an empty store. So does malformed content:
    /// the parse failure is not surfaced to callers, but it is logged
    /// loudly because the next save will overwrite whatever was on disk.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let chats = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(chats) => chats,
                Err(e) => {
                    warn!(
                        "Discarding malformed filter file {}: {}",
                        path.display(),
                        e
                    );
                    IndexMap::new()
                }
            },
            Err(_) => IndexMap::new(),
        };

        Self { path, chats }
    }

    /// Serialize the whole store and overwrite the persisted file.
    ///
    /// No atomic-write or locking guarantee; updates arrive one at a time
    /// through the dispatcher, and the store mutex serializes writers.
    pub fn save(&self) -> Result<()> {
        let raw = serde_json::to_string_pretty(&self.chats)?;
        fs::write(&self.path, raw)
            .with_context(|| format!("failed to write {}", self.path.display()))
    }

    /// Insert or overwrite a filter. The caller lower-cases the trigger.
    pub fn set(&mut self, chat_id: &str, trigger: String, entry: FilterEntry) {
        self.chats
            .entry(chat_id.to_string())
            .or_default()
            .insert(trigger, entry);
    }

    /// Remove one filter, reporting whether it existed.
    pub fn remove(&mut self, chat_id: &str, trigger: &str) -> bool {
        self.chats
            .get_mut(chat_id)
            // shift_remove keeps the remaining triggers in order
            .map(|filters| filters.shift_remove(trigger).is_some())
            .unwrap_or(false)
    }

    /// Remove every filter of a chat. An absent chat is a no-op.
    pub fn clear(&mut self, chat_id: &str) {
        if let Some(filters) = self.chats.get_mut(chat_id) {
            filters.clear();
        }
    }

    /// Whether a chat has any filters.
    pub fn has_filters(&self, chat_id: &str) -> bool {
        self.chats
            .get(chat_id)
            .map(|filters| !filters.is_empty())
            .unwrap_or(false)
    }

    /// Triggers with their kinds, in insertion order.
    pub fn list(&self, chat_id: &str) -> Vec<(String, FilterKind)> {
        self.chats
            .get(chat_id)
            .map(|filters| {
                filters
                    .iter()
                    .map(|(trigger, entry)| (trigger.clone(), entry.kind))
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Find the first trigger contained in `text`, scanning in storage
    /// order.
    ///
    /// Matching is case-insensitive substring containment, so a trigger
    /// also matches inside longer words. At most one filter fires per
    /// message.
    pub fn find_match(&self, chat_id: &str, text: &str) -> Option<(&str, &FilterEntry)> {
        let body = text.to_lowercase();
        self.chats
            .get(chat_id)?
            .iter()
            .find(|(trigger, _)| body.contains(trigger.as_str()))
            .map(|(trigger, entry)| (trigger.as_str(), entry))
    }

    /// Number of chats with a (possibly empty) entry in the store.
    pub fn chat_count(&self) -> usize {
        self.chats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_at(dir: &tempfile::TempDir) -> FilterStore {
        FilterStore::load(dir.path().join("filters.json"))
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_at(&dir);
        assert_eq!(store.chat_count(), 0);
        assert!(!store.has_filters("100"));
    }

    #[test]
    fn test_load_malformed_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, "{not valid json").unwrap();

        let store = FilterStore::load(&path);
        assert_eq!(store.chat_count(), 0);
    }

    #[test]
    fn test_set_and_match() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.set("100", "hello".into(), FilterEntry::text("Hi there!"));

        let (trigger, entry) = store.find_match("100", "well hello world").unwrap();
        assert_eq!(trigger, "hello");
        assert_eq!(entry.data, "Hi there!");

        // Case-insensitive and substring-inside-word
        assert!(store.find_match("100", "HELLO").is_some());
        assert!(store.find_match("100", "othello fan").is_some());

        // Other chats are isolated
        assert!(store.find_match("200", "hello").is_none());
    }

    #[test]
    fn test_first_match_wins_in_storage_order() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.set("100", "world".into(), FilterEntry::text("first"));
        store.set("100", "hello".into(), FilterEntry::text("second"));

        // Both triggers are in the body; "world" was stored first
        let (trigger, entry) = store.find_match("100", "hello world").unwrap();
        assert_eq!(trigger, "world");
        assert_eq!(entry.data, "first");
    }

    #[test]
    fn test_set_overwrites_without_growing() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.set("100", "hello".into(), FilterEntry::text("old"));
        store.set("100", "hello".into(), FilterEntry::text("new"));

        assert_eq!(store.list("100").len(), 1);
        assert_eq!(store.find_match("100", "hello").unwrap().1.data, "new");
    }

    #[test]
    fn test_remove_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.set("100", "hello".into(), FilterEntry::text("hi"));

        assert!(store.remove("100", "hello"));
        assert!(!store.remove("100", "hello"));
        assert!(!store.remove("999", "hello"));
    }

    #[test]
    fn test_remove_preserves_order_of_rest() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.set("100", "a".into(), FilterEntry::text("1"));
        store.set("100", "b".into(), FilterEntry::text("2"));
        store.set("100", "c".into(), FilterEntry::text("3"));

        store.remove("100", "b");

        let triggers: Vec<String> = store.list("100").into_iter().map(|(t, _)| t).collect();
        assert_eq!(triggers, vec!["a", "c"]);
    }

    #[test]
    fn test_clear_absent_chat_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = store_at(&dir);
        store.clear("100");
        assert!(!store.has_filters("100"));
    }

    #[test]
    fn test_persistence_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");

        let mut store = FilterStore::load(&path);
        store.set("100", "hello".into(), FilterEntry::text("Hi there!"));
        store.set(
            "100",
            "catpic".into(),
            FilterEntry::new(FilterKind::Photo, "AgAD-file-id"),
        );
        store.save().unwrap();

        let reloaded = FilterStore::load(&path);
        assert_eq!(
            reloaded.list("100"),
            vec![
                ("hello".to_string(), FilterKind::Text),
                ("catpic".to_string(), FilterKind::Photo),
            ]
        );

        // save(load()) leaves the disk content unchanged
        let before = fs::read_to_string(&path).unwrap();
        reloaded.save().unwrap();
        let after = fs::read_to_string(&path).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_persisted_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");

        let mut store = FilterStore::load(&path);
        store.set("100", "hello".into(), FilterEntry::text("Hi there!"));
        store.save().unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["100"]["hello"]["type"], "text");
        assert_eq!(value["100"]["hello"]["data"], "Hi there!");
    }

    #[test]
    fn test_missing_type_defaults_to_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("filters.json");
        fs::write(&path, r#"{"100": {"hello": {"data": "Hi there!"}}}"#).unwrap();

        let store = FilterStore::load(&path);
        let (_, entry) = store.find_match("100", "hello").unwrap();
        assert_eq!(entry.kind, FilterKind::Text);
        assert_eq!(entry.data, "Hi there!");
    }
}
