//! Request parameters of the list view

use serde::Deserialize;

/// Query or form parameters of a list request.
///
/// Flags like `reset` count when present, whatever their value.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
	/// Name of the submitting form, `search` for the search form
	pub form: Option<String>,
	pub search: Option<String>,
	pub field: Option<String>,
	pub reset: Option<String>,
	/// Key of a saved search to apply
	pub saved: Option<String>,
	/// Display name to save the current search under
	pub save: Option<String>,
	/// Key of a saved search to delete
	pub delete: Option<String>,
	pub enableregexpr: Option<String>,
	pub disableregexpr: Option<String>,
	pub sort_field: Option<String>,
	pub sort_order: Option<String>,
	pub pagination_page: Option<String>,
	pub pagination_size: Option<String>,
}

impl ListParams {
	pub fn is_search_form(&self) -> bool {
		self.form.as_deref() == Some("search")
	}

	pub fn is_reset(&self) -> bool {
		self.reset.is_some()
	}

	/// Selected saved search key, empty values are ignored
	pub fn saved_key(&self) -> Option<&str> {
		self.saved.as_deref().filter(|key| !key.is_empty())
	}
}

// vim: ts=4
