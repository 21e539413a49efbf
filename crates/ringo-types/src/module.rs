//! Module definitions
//!
//! A module is a registered entity type (users, roles, todos, ...). Its
//! definition is static configuration: enabled actions, declared fields and
//! the table configuration driving the list view.

use serde_json::Value;
use std::fmt::Debug;
use std::sync::Arc;

use crate::item::{BUILTIN_FIELDS, Item};
use crate::list::{SearchTerm, Sorting};
use crate::prelude::*;

/// Computes a derived value of an item
pub type ComputeFn = Arc<dyn Fn(&Item) -> Value + Send + Sync>;

/// Actions every module gets unless configured otherwise: (name, url pattern)
pub const DEFAULT_ACTIONS: &[(&str, &str)] = &[
	("list", "list"),
	("create", "create"),
	("read", "read/{id}"),
	("update", "update/{id}"),
	("delete", "delete/{id}"),
];

#[derive(Clone)]
pub enum FieldKind {
	/// Plain scalar stored with the item, sortable by the store
	Column,
	/// Derived from other values of the item
	Computed(ComputeFn),
	/// Link to items of another module
	Relation { module: Box<str> },
}

impl Debug for FieldKind {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::Column => write!(f, "Column"),
			Self::Computed(_) => f.debug_tuple("Computed").field(&"<function>").finish(),
			Self::Relation { module } => f.debug_struct("Relation").field("module", module).finish(),
		}
	}
}

#[derive(Debug, Clone)]
pub struct FieldDef {
	pub name: Box<str>,
	pub label: Box<str>,
	pub kind: FieldKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDef {
	pub name: Box<str>,
	pub url: Box<str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnConfig {
	pub name: Box<str>,
	pub label: Box<str>,
	pub searchable: bool,
}

impl ColumnConfig {
	pub fn new(name: impl Into<Box<str>>, label: impl Into<Box<str>>) -> Self {
		Self { name: name.into(), label: label.into(), searchable: true }
	}

	pub fn searchable(mut self, searchable: bool) -> Self {
		self.searchable = searchable;
		self
	}
}

/// List view configuration of a module
#[derive(Debug, Clone, Default)]
pub struct TableConfig {
	pub columns: Vec<ColumnConfig>,
	pub default_sort: Option<Sorting>,
	pub paginated: bool,
	/// Advanced overview flag; `None` follows the `layout.advanced_overviews` setting
	pub advanced: Option<bool>,
	pub default_search: Vec<SearchTerm>,
}

impl TableConfig {
	pub fn default_sort(&self) -> Sorting {
		self.default_sort.clone().unwrap_or_default()
	}

	pub fn is_advanced(&self, default: bool) -> bool {
		self.advanced.unwrap_or(default)
	}

	pub fn searchable_columns(&self) -> impl Iterator<Item = &str> {
		self.columns.iter().filter(|c| c.searchable).map(|c| c.name.as_ref())
	}
}

#[derive(Debug, Clone)]
pub struct ModuleDef {
	pub id: u32,
	/// Table name, also used in urls and as session namespace
	pub name: Box<str>,
	pub label: Box<str>,
	pub label_plural: Box<str>,
	/// Field used to render an item in messages
	pub title_field: Option<Box<str>>,
	pub actions: Vec<ActionDef>,
	pub fields: Vec<FieldDef>,
	pub table: TableConfig,
}

impl ModuleDef {
	pub fn new(id: u32, name: impl Into<Box<str>>, label: impl Into<Box<str>>) -> Self {
		let label = label.into();
		Self {
			id,
			name: name.into(),
			label_plural: format!("{}s", label).into(),
			label,
			title_field: None,
			actions: DEFAULT_ACTIONS
				.iter()
				.map(|(name, url)| ActionDef { name: (*name).into(), url: (*url).into() })
				.collect(),
			fields: Vec::new(),
			table: TableConfig::default(),
		}
	}

	pub fn label_plural(mut self, label_plural: impl Into<Box<str>>) -> Self {
		self.label_plural = label_plural.into();
		self
	}

	pub fn title_field(mut self, field: impl Into<Box<str>>) -> Self {
		self.title_field = Some(field.into());
		self
	}

	/// Restrict the enabled actions to the given subset of the defaults
	pub fn actions(mut self, names: &[&str]) -> Self {
		self.actions.retain(|action| names.contains(&action.name.as_ref()));
		self
	}

	/// Enable a custom action
	pub fn action(mut self, name: impl Into<Box<str>>, url: impl Into<Box<str>>) -> Self {
		self.actions.push(ActionDef { name: name.into(), url: url.into() });
		self
	}

	pub fn field(mut self, name: impl Into<Box<str>>, label: impl Into<Box<str>>, kind: FieldKind) -> Self {
		self.fields.push(FieldDef { name: name.into(), label: label.into(), kind });
		self
	}

	pub fn table(mut self, table: TableConfig) -> Self {
		self.table = table;
		self
	}

	pub fn has_action(&self, name: &str) -> bool {
		self.actions.iter().any(|action| action.name.as_ref() == name)
	}

	pub fn field_def(&self, name: &str) -> Option<&FieldDef> {
		self.fields.iter().find(|field| field.name.as_ref() == name)
	}

	/// Whether the field is a plain column the store can sort on
	pub fn is_column(&self, name: &str) -> bool {
		BUILTIN_FIELDS.contains(&name)
			|| matches!(self.field_def(name).map(|f| &f.kind), Some(FieldKind::Column))
	}

	/// Value of a field, resolving computed fields
	pub fn value(&self, item: &Item, field: &str) -> Value {
		match self.field_def(field).map(|f| &f.kind) {
			Some(FieldKind::Computed(compute)) => compute(item),
			_ => item.get(field),
		}
	}

	/// Display form of an item, used in flash messages
	pub fn title(&self, item: &Item) -> String {
		let value = self.title_field.as_deref().map(|field| self.value(item, field));
		match value {
			Some(Value::String(s)) if !s.is_empty() => s,
			Some(Value::Number(n)) => n.to_string(),
			_ => format!("{} {}", self.label, item.id),
		}
	}

	/// Url of an action of this module
	pub fn url(&self, action: &str, id: Option<ItemId>) -> Option<String> {
		let action = self.actions.iter().find(|a| a.name.as_ref() == action)?;
		let path = match id {
			Some(id) => action.url.replace("{id}", &id.to_string()),
			None => action.url.to_string(),
		};
		Some(format!("/{}/{}", self.name, path))
	}
}


// vim: ts=4
