//! Sorting of listings

use serde_json::Value;
use std::cmp::Ordering;

use crate::params::ListParams;
use crate::saved::SavedSearch;
use ringo_types::item::Item;
use ringo_types::list::{SortOrder, Sorting};
use ringo_types::module::{ModuleDef, TableConfig};
use ringo_types::session::ListState;

/// Resolve the sorting of a list request.
///
/// Session value (or the table default), replaced by the sorting of a
/// selected saved search, then overridden by `sort_field` / `sort_order`.
/// The session keeps the request result, the defaults on reset, and its
/// own value when a saved search is selected.
pub fn handle_sorting(
	table: &TableConfig,
	state: &mut ListState,
	params: &ListParams,
	saved: Option<&SavedSearch>,
) -> Sorting {
	let default = table.default_sort();
	let base = match (&state.sort, params.is_reset()) {
		(Some(sort), false) => sort.clone(),
		_ => default.clone(),
	};

	let mut sorting = match saved {
		Some(saved) => saved.sorting.clone(),
		None => base.clone(),
	};
	if let Some(field) = params.sort_field.as_deref().filter(|f| !f.is_empty()) {
		sorting.field = field.to_string();
	}
	if let Some(order) = params.sort_order.as_deref() {
		sorting.order = SortOrder::parse(order);
	}

	state.sort = Some(if params.is_reset() {
		default
	} else if saved.is_some() {
		base
	} else {
		sorting.clone()
	});
	sorting
}

/// Orderable form of a field value: null < numbers < text
#[derive(Debug, Clone, PartialEq)]
pub enum SortKey {
	Null,
	Num(f64),
	Text(String),
}

impl SortKey {
	pub fn from_value(value: &Value) -> Self {
		match value {
			Value::Null => SortKey::Null,
			Value::Bool(b) => SortKey::Num(if *b { 1.0 } else { 0.0 }),
			Value::Number(n) => n.as_f64().map_or(SortKey::Null, SortKey::Num),
			Value::String(s) => SortKey::Text(s.clone()),
			other => SortKey::Text(other.to_string()),
		}
	}

	fn rank(&self) -> u8 {
		match self {
			SortKey::Null => 0,
			SortKey::Num(_) => 1,
			SortKey::Text(_) => 2,
		}
	}
}

impl Eq for SortKey {}

impl Ord for SortKey {
	fn cmp(&self, other: &Self) -> Ordering {
		match (self, other) {
			(SortKey::Num(a), SortKey::Num(b)) => a.total_cmp(b),
			// bytewise
			(SortKey::Text(a), SortKey::Text(b)) => a.as_bytes().cmp(b.as_bytes()),
			_ => self.rank().cmp(&other.rank()),
		}
	}
}

impl PartialOrd for SortKey {
	fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
		Some(self.cmp(other))
	}
}

/// Stable sort of id ordered items; ties keep id order in both directions
pub fn sort_items(module: &ModuleDef, items: Vec<Item>, sorting: &Sorting) -> Vec<Item> {
	let mut keyed: Vec<(SortKey, Item)> =
		items.into_iter().map(|item| (SortKey::from_value(&module.value(&item, &sorting.field)), item)).collect();
	keyed.sort_by(|(a, _), (b, _)| match sorting.order {
		SortOrder::Asc => a.cmp(b),
		SortOrder::Desc => b.cmp(a),
	});
	keyed.into_iter().map(|(_, item)| item).collect()
}


// vim: ts=4
