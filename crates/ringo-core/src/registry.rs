//! Module registry
//!
//! Static configuration registered once at startup: module definitions,
//! forms, lifecycle callbacks, value checkers and bundle handlers. The
//! registry is frozen into the app state and read without locking.

use std::collections::HashMap;
use std::sync::Arc;

use futures::future::BoxFuture;
use serde::Serialize;

use ringo_types::auth::User;
use ringo_types::item::Item;
use ringo_types::module::ModuleDef;
use ringo_types::session::SessionId;

use crate::form::FormDef;
use crate::prelude::*;
use crate::value_check::{OwnershipChecker, ValueChecker};

/// Lifecycle event of an item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Event {
	Create,
	Update,
	Delete,
}

impl Event {
	pub fn as_str(self) -> &'static str {
		match self {
			Event::Create => "create",
			Event::Update => "update",
			Event::Delete => "delete",
		}
	}
}

#[derive(Debug, Clone)]
pub struct EventContext {
	pub event: Event,
	pub user: Arc<User>,
	pub item: Item,
}

pub type EventHandler = Arc<dyn Fn(App, EventContext) -> BoxFuture<'static, RgResult<()>> + Send + Sync>;

/// Input of a bundle handler: the permitted items of the selection
#[derive(Debug, Clone)]
pub struct BundleContext {
	pub user: Arc<User>,
	pub sid: SessionId,
	pub module: Arc<ModuleDef>,
	pub action: String,
	pub items: Vec<Item>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BundleResult {
	/// Items the action was applied to
	pub items: Vec<ItemId>,
	pub redirect: Option<String>,
}

pub type BundleHandler =
	Arc<dyn Fn(App, BundleContext) -> BoxFuture<'static, RgResult<BundleResult>> + Send + Sync>;

/// Callback run after a successful save, may modify the item
pub type PostSaveCallback =
	Arc<dyn Fn(App, Arc<User>, Item) -> BoxFuture<'static, RgResult<Item>> + Send + Sync>;

#[derive(Default)]
pub struct Registry {
	modules: HashMap<Box<str>, Arc<ModuleDef>>,
	forms: HashMap<Box<str>, Arc<FormDef>>,
	events: HashMap<(Box<str>, Event), Vec<EventHandler>>,
	value_checkers: HashMap<Box<str>, Arc<dyn ValueChecker>>,
	bundle_handlers: HashMap<(Box<str>, Box<str>), BundleHandler>,
	default_bundle_handlers: HashMap<Box<str>, BundleHandler>,
	default_checker: Arc<OwnershipChecker>,
}

impl Registry {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn register_module(&mut self, module: ModuleDef) -> RgResult<()> {
		if self.modules.contains_key(&module.name) {
			return Err(Error::ConfigError(format!("Module '{}' already registered", module.name)));
		}
		if self.modules.values().any(|m| m.id == module.id) {
			return Err(Error::ConfigError(format!("Module id {} already registered", module.id)));
		}
		debug!("Registered module '{}' (id {})", module.name, module.id);
		self.modules.insert(module.name.clone(), Arc::new(module));
		Ok(())
	}

	pub fn register_form(&mut self, module: &str, form: FormDef) {
		self.forms.insert(module.into(), Arc::new(form));
	}

	pub fn on_event<F>(&mut self, module: &str, event: Event, handler: F)
	where
		F: Fn(App, EventContext) -> BoxFuture<'static, RgResult<()>> + Send + Sync + 'static,
	{
		self.events.entry((module.into(), event)).or_default().push(Arc::new(handler));
	}

	pub fn value_checker(&mut self, module: &str, checker: impl ValueChecker + 'static) {
		self.value_checkers.insert(module.into(), Arc::new(checker));
	}

	/// Register a bundle handler for one module, or the default for every
	/// module if `module` is `None`. Actions are matched case-insensitively.
	pub fn bundle_handler<F>(&mut self, module: Option<&str>, action: &str, handler: F)
	where
		F: Fn(App, BundleContext) -> BoxFuture<'static, RgResult<BundleResult>> + Send + Sync + 'static,
	{
		let action: Box<str> = action.to_lowercase().into();
		match module {
			Some(module) => {
				self.bundle_handlers.insert((module.into(), action), Arc::new(handler));
			}
			None => {
				self.default_bundle_handlers.insert(action, Arc::new(handler));
			}
		}
	}

	pub fn module(&self, name: &str) -> Option<Arc<ModuleDef>> {
		self.modules.get(name).cloned()
	}

	pub fn modules(&self) -> impl Iterator<Item = &Arc<ModuleDef>> {
		self.modules.values()
	}

	pub fn form(&self, module: &str) -> Option<Arc<FormDef>> {
		self.forms.get(module).cloned()
	}

	pub fn event_handlers(&self, module: &str, event: Event) -> &[EventHandler] {
		self.events.get(&(module.into(), event)).map(Vec::as_slice).unwrap_or_default()
	}

	pub fn value_checker_for(&self, module: &str) -> Arc<dyn ValueChecker> {
		match self.value_checkers.get(module) {
			Some(checker) => checker.clone(),
			None => self.default_checker.clone() as Arc<dyn ValueChecker>,
		}
	}

	/// Module specific handler first, then the default table
	pub fn resolve_bundle_handler(&self, module: &str, action: &str) -> RgResult<BundleHandler> {
		let action = action.to_lowercase();
		if let Some(handler) = self.bundle_handlers.get(&(module.into(), action.as_str().into())) {
			return Ok(handler.clone());
		}
		if let Some(handler) = self.default_bundle_handlers.get(action.as_str()) {
			return Ok(handler.clone());
		}
		error!(module, action = %action, "no bundle handler registered");
		Err(Error::ConfigError(format!("No bundle handler for '{}' in module '{}'", action, module)))
	}
}

impl std::fmt::Debug for Registry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Registry")
			.field("modules", &self.modules.keys().collect::<Vec<_>>())
			.field("forms", &self.forms.len())
			.field("events", &self.events.len())
			.field("bundle_handlers", &self.bundle_handlers.len())
			.field("default_bundle_handlers", &self.default_bundle_handlers.keys().collect::<Vec<_>>())
			.finish_non_exhaustive()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use futures::FutureExt;

	fn handler(tag: &'static str) -> impl Fn(App, BundleContext) -> BoxFuture<'static, RgResult<BundleResult>> {
		move |_app, _ctx| async move { Ok(BundleResult { items: vec![], redirect: Some(tag.into()) }) }.boxed()
	}

	#[test]
	fn test_duplicate_module() {
		let mut registry = Registry::new();
		registry.register_module(ModuleDef::new(1, "todos", "Todo")).unwrap();
		assert!(matches!(
			registry.register_module(ModuleDef::new(2, "todos", "Todo")),
			Err(Error::ConfigError(_))
		));
		assert!(matches!(
			registry.register_module(ModuleDef::new(1, "tags", "Tag")),
			Err(Error::ConfigError(_))
		));
		assert!(registry.module("todos").is_some());
		assert!(registry.module("tags").is_none());
	}

	#[test]
	fn test_bundle_handler_resolution() {
		let mut registry = Registry::new();
		registry.bundle_handler(None, "Delete", handler("default"));
		registry.bundle_handler(Some("todos"), "archive", handler("todos"));

		assert!(registry.resolve_bundle_handler("todos", "ARCHIVE").is_ok());
		assert!(registry.resolve_bundle_handler("todos", "delete").is_ok());
		assert!(registry.resolve_bundle_handler("tags", "delete").is_ok());
		assert!(matches!(registry.resolve_bundle_handler("tags", "archive"), Err(Error::ConfigError(_))));
	}

	#[test]
	fn test_event_handlers_per_module_and_event() {
		let mut registry = Registry::new();
		registry.on_event("todos", Event::Create, |_app, _ctx| async { Ok(()) }.boxed());
		assert_eq!(registry.event_handlers("todos", Event::Create).len(), 1);
		assert!(registry.event_handlers("todos", Event::Update).is_empty());
		assert!(registry.event_handlers("tags", Event::Create).is_empty());
	}
}

// vim: ts=4
