//! Items: the persisted rows of a registered module

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::prelude::*;

/// Module specific field values of an item
pub type Fields = serde_json::Map<String, Value>;

/// Built-in fields every item carries next to its module specific fields
pub const BUILTIN_FIELDS: &[&str] = &["id", "uid", "gid", "created_at", "updated_at"];

/// Ownership assigned to a freshly created item
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Owner {
	pub uid: UserId,
	pub gid: Option<GroupId>,
}

#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
	pub id: ItemId,
	pub module: Box<str>,
	pub uid: Option<UserId>,
	pub gid: Option<GroupId>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
	#[serde(default)]
	pub fields: Fields,
}

impl Item {
	/// Value of a built-in or module specific field, `Null` if absent
	pub fn get(&self, field: &str) -> Value {
		match field {
			"id" => Value::from(self.id.0),
			"uid" => self.uid.map_or(Value::Null, |uid| Value::from(uid.0)),
			"gid" => self.gid.map_or(Value::Null, |gid| Value::from(gid.0)),
			"created_at" => Value::from(self.created_at.0),
			"updated_at" => Value::from(self.updated_at.0),
			_ => self.fields.get(field).cloned().unwrap_or(Value::Null),
		}
	}

	/// Apply a set of changes in place.
	///
	/// `uid` and `gid` update the ownership columns, the other built-in
	/// fields are read-only and ignored. Returns an error if an ownership
	/// value is neither null nor an integer.
	pub fn apply(&mut self, changes: &Fields) -> RgResult<()> {
		for (key, value) in changes {
			match key.as_str() {
				"uid" => self.uid = owner_id(value)?.map(UserId),
				"gid" => self.gid = owner_id(value)?.map(GroupId),
				"id" | "created_at" | "updated_at" => {}
				_ => {
					self.fields.insert(key.clone(), value.clone());
				}
			}
		}
		Ok(())
	}

	/// Changes from `changes` which actually differ from the current values
	pub fn diff(&self, changes: &Fields) -> Fields {
		changes.iter().filter(|(k, v)| self.get(k) != **v).map(|(k, v)| (k.clone(), v.clone())).collect()
	}
}

fn owner_id(value: &Value) -> RgResult<Option<i64>> {
	match value {
		Value::Null => Ok(None),
		Value::Number(n) => n.as_i64().map(Some).ok_or(Error::Parse),
		Value::String(s) if s.is_empty() => Ok(None),
		Value::String(s) => s.trim().parse().map(Some).map_err(|_| Error::Parse),
		_ => Err(Error::Parse),
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use serde_json::json;

	fn item() -> Item {
		let mut fields = Fields::new();
		fields.insert("name".into(), json!("Alpha"));
		Item {
			id: ItemId(7),
			module: "todos".into(),
			uid: Some(UserId(1)),
			gid: None,
			created_at: Timestamp(100),
			updated_at: Timestamp(100),
			fields,
		}
	}

	#[test]
	fn test_get_builtin_and_custom() {
		let item = item();
		assert_eq!(item.get("id"), json!(7));
		assert_eq!(item.get("gid"), Value::Null);
		assert_eq!(item.get("name"), json!("Alpha"));
		assert_eq!(item.get("missing"), Value::Null);
	}

	#[test]
	fn test_apply_ownership_and_readonly() {
		let mut item = item();
		let changes = json!({ "gid": "3", "id": 99, "name": "Beta" });
		item.apply(changes.as_object().unwrap()).unwrap();
		assert_eq!(item.gid, Some(GroupId(3)));
		assert_eq!(item.id, ItemId(7));
		assert_eq!(item.get("name"), json!("Beta"));

		let bad = json!({ "uid": [1] });
		assert!(item.apply(bad.as_object().unwrap()).is_err());
	}

	#[test]
	fn test_diff_drops_unchanged() {
		let item = item();
		let changes = json!({ "name": "Alpha", "done": true });
		let diff = item.diff(changes.as_object().unwrap());
		assert_eq!(diff.len(), 1);
		assert!(diff.contains_key("done"));
	}
}

// vim: ts=4
