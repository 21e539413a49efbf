//! Search, sort and query types shared by the list builder and the stores

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::prelude::*;

/// One entry of a search stack
#[skip_serializing_none]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchTerm {
	pub term: String,
	/// Restricts the match to one field; `None` matches any searchable column
	pub field: Option<String>,
	#[serde(default)]
	pub regex: bool,
}

impl SearchTerm {
	pub fn new(term: impl Into<String>, field: Option<&str>, regex: bool) -> Self {
		Self { term: term.into(), field: field.map(ToOwned::to_owned), regex }
	}
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
	#[default]
	Asc,
	Desc,
}

impl SortOrder {
	/// `"asc"` sorts ascending, any other value descending
	pub fn parse(s: &str) -> Self {
		if s == "asc" { SortOrder::Asc } else { SortOrder::Desc }
	}

	pub fn as_str(self) -> &'static str {
		match self {
			SortOrder::Asc => "asc",
			SortOrder::Desc => "desc",
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sorting {
	pub field: String,
	pub order: SortOrder,
}

impl Sorting {
	pub fn new(field: impl Into<String>, order: SortOrder) -> Self {
		Self { field: field.into(), order }
	}
}

impl Default for Sorting {
	fn default() -> Self {
		Self { field: "id".into(), order: SortOrder::Asc }
	}
}

/// Narrows a listing to the items a restricted user may see
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restriction {
	pub uid: UserId,
	pub gids: Vec<GroupId>,
}

/// Query handed to `ItemStore::list`
///
/// Without a sort the items are returned in id order. The total always
/// counts every matching item, regardless of the slice.
#[derive(Debug, Clone, Default)]
pub struct ListQuery {
	pub restrict: Option<Restriction>,
	pub sort: Option<Sorting>,
	/// `(offset, limit)`
	pub slice: Option<(usize, usize)>,
}


// vim: ts=4
