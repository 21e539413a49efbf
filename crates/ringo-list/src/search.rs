//! Search stack handling and search filtering

use regex::Regex;
use serde_json::Value;

use crate::params::ListParams;
use crate::prelude::*;
use crate::saved::SavedSearch;
use ringo_types::item::Item;
use ringo_types::list::SearchTerm;
use ringo_types::module::{ModuleDef, TableConfig};
use ringo_types::session::ListState;

/// Resolve the search stack of a list request.
///
/// Starts from the stack stored in the session, or the table's default
/// search if there is none. The regex flag toggles are written to `state`,
/// the returned stack is not; it is persisted only after a listing turned
/// out non-empty.
pub fn get_search(
	table: &TableConfig,
	state: &mut ListState,
	params: &ListParams,
	saved: Option<&SavedSearch>,
) -> Vec<SearchTerm> {
	let mut stack = if state.search.is_empty() { table.default_search.clone() } else { state.search.clone() };

	if params.enableregexpr.is_some() {
		state.regexpr = true;
		return stack;
	}
	if params.disableregexpr.is_some() {
		state.regexpr = false;
		return stack;
	}

	if params.is_reset() {
		stack.clear();
	}

	if !params.is_search_form() {
		return stack;
	}

	if params.saved_key().is_some() {
		return saved.map_or(stack, |saved| saved.search.clone());
	}
	if params.save.is_some() || params.delete.is_some() {
		return stack;
	}

	let Some(term) = params.search.as_deref() else {
		return stack;
	};
	let field = params.field.as_deref().filter(|f| !f.is_empty());

	if term.is_empty() {
		if let Some(popped) = stack.pop() {
			debug!("Popping {:?} from search stack", popped);
		}
	} else if !stack.iter().any(|entry| entry.term == term && entry.field.as_deref() == field) {
		debug!("Adding search for {:?} in field {:?}", term, field);
		stack.push(SearchTerm::new(term, field, state.regexpr));
	}
	stack
}

enum Pattern {
	/// Lowercased needle, matched case-insensitively
	Plain(String),
	Regex(Regex),
	/// Invalid expression, matched literally and case-sensitively
	Literal(String),
}

struct CompiledTerm<'a> {
	field: Option<&'a str>,
	pattern: Pattern,
}

impl CompiledTerm<'_> {
	fn is_match(&self, text: &str) -> bool {
		match &self.pattern {
			Pattern::Plain(needle) => text.to_lowercase().contains(needle.as_str()),
			Pattern::Regex(re) => re.is_match(text),
			Pattern::Literal(needle) => text.contains(needle.as_str()),
		}
	}
}

/// Text form of a value used for matching
pub fn value_text(value: &Value) -> String {
	match value {
		Value::Null => String::new(),
		Value::String(s) => s.clone(),
		other => other.to_string(),
	}
}

/// Filter of a whole search stack; every term must match
pub struct SearchFilter<'a> {
	module: &'a ModuleDef,
	terms: Vec<CompiledTerm<'a>>,
	columns: Vec<&'a str>,
}

impl<'a> SearchFilter<'a> {
	pub fn new(module: &'a ModuleDef, stack: &'a [SearchTerm]) -> Self {
		let terms = stack
			.iter()
			.map(|term| {
				let pattern = if term.regex {
					match Regex::new(&term.term) {
						Ok(re) => Pattern::Regex(re),
						Err(err) => {
							debug!("Invalid search expression {:?}, matching literally: {}", term.term, err);
							Pattern::Literal(term.term.clone())
						}
					}
				} else {
					Pattern::Plain(term.term.to_lowercase())
				};
				CompiledTerm { field: term.field.as_deref(), pattern }
			})
			.collect();

		let mut columns: Vec<&str> = module.table.searchable_columns().collect();
		if module.table.columns.is_empty() {
			columns = module.fields.iter().map(|f| f.name.as_ref()).collect();
		}

		Self { module, terms, columns }
	}

	pub fn is_empty(&self) -> bool {
		self.terms.is_empty()
	}

	pub fn matches(&self, item: &Item) -> bool {
		self.terms.iter().all(|term| match term.field {
			Some(field) => term.is_match(&value_text(&self.module.value(item, field))),
			None => self.columns.iter().any(|col| term.is_match(&value_text(&self.module.value(item, col)))),
		})
	}
}


// vim: ts=4
