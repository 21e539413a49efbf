//! Saved searches
//!
//! Stored in the user's settings blob:
//! `{"searches": {"<table>": {"<key>": {"search": [...], "sorting": {...}, "name": "..."}}}}`.
//! Other keys of the blob are left untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use uuid::Uuid;

use crate::prelude::*;
use ringo_types::item_store::ItemStore;
use ringo_types::list::{SearchTerm, Sorting};

const SEARCHES: &str = "searches";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSearch {
	pub search: Vec<SearchTerm>,
	pub sorting: Sorting,
	pub name: String,
}

fn table_entries(settings: &Value, table: &str) -> BTreeMap<String, SavedSearch> {
	let Some(entries) = settings.get(SEARCHES).and_then(|s| s.get(table)).and_then(Value::as_object) else {
		return BTreeMap::new();
	};
	entries
		.iter()
		.filter_map(|(key, entry)| match serde_json::from_value::<SavedSearch>(entry.clone()) {
			Ok(saved) => Some((key.clone(), saved)),
			Err(err) => {
				warn!("Ignoring malformed saved search {} in {}: {}", key, table, err);
				None
			}
		})
		.collect()
}

/// Mutable access to the saved searches of a table, created on demand
fn table_entries_mut<'a>(settings: &'a mut Value, table: &str) -> RgResult<&'a mut Map<String, Value>> {
	if !settings.is_object() {
		*settings = Value::Object(Map::new());
	}
	let root = settings.as_object_mut().ok_or_else(|| Error::Internal("settings is not an object".into()))?;
	let searches = root.entry(SEARCHES).or_insert_with(|| Value::Object(Map::new()));
	if !searches.is_object() {
		*searches = Value::Object(Map::new());
	}
	let tables = searches.as_object_mut().ok_or_else(|| Error::Internal("searches is not an object".into()))?;
	let entries = tables.entry(table).or_insert_with(|| Value::Object(Map::new()));
	if !entries.is_object() {
		*entries = Value::Object(Map::new());
	}
	entries.as_object_mut().ok_or_else(|| Error::Internal("saved searches are not an object".into()))
}

/// Saved searches of a user for a table, keyed by their generated key
pub async fn list(store: &dyn ItemStore, uid: UserId, table: &str) -> RgResult<BTreeMap<String, SavedSearch>> {
	let settings = store.read_user_settings(uid).await?;
	Ok(table_entries(&settings, table))
}

pub async fn load(store: &dyn ItemStore, uid: UserId, table: &str, key: &str) -> RgResult<Option<SavedSearch>> {
	let settings = store.read_user_settings(uid).await?;
	Ok(table_entries(&settings, table).remove(key))
}

/// Persist a search under a new key.
///
/// Returns `None` without storing anything if a saved search with the same
/// name already exists for the table.
pub async fn save(
	store: &dyn ItemStore,
	uid: UserId,
	table: &str,
	name: &str,
	search: &[SearchTerm],
	sorting: &Sorting,
) -> RgResult<Option<String>> {
	let mut settings = store.read_user_settings(uid).await?;
	if table_entries(&settings, table).values().any(|saved| saved.name == name) {
		debug!("Saved search '{}' already exists for {}", name, table);
		return Ok(None);
	}

	let key = Uuid::new_v4().to_string();
	let saved = SavedSearch { search: search.to_vec(), sorting: sorting.clone(), name: name.to_string() };
	table_entries_mut(&mut settings, table)?.insert(key.clone(), serde_json::to_value(saved)?);
	store.update_user_settings(uid, &settings).await?;
	info!(user = %uid, table, name, key = %key, "saved search stored");
	Ok(Some(key))
}

/// Remove a saved search, returns whether it existed
pub async fn delete(store: &dyn ItemStore, uid: UserId, table: &str, key: &str) -> RgResult<bool> {
	let mut settings = store.read_user_settings(uid).await?;
	let removed = table_entries_mut(&mut settings, table)?.remove(key).is_some();
	if removed {
		store.update_user_settings(uid, &settings).await?;
		info!(user = %uid, table, key, "saved search deleted");
	}
	Ok(removed)
}


// vim: ts=4
