//! App state type

use std::collections::HashMap;
use std::sync::Arc;

use crate::cache::ReadCache;
use crate::prelude::*;
use crate::registry::Registry;
use crate::settings::{FrozenSettingsRegistry, Settings, SettingsRegistry};

use ringo_types::item_store::ItemStore;
use ringo_types::module::ModuleDef;
use ringo_types::session::SessionStore;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct AppState {
	pub opts: AppBuilderOpts,

	pub store: Arc<dyn ItemStore>,
	pub sessions: Arc<dyn SessionStore>,
	pub registry: Registry,
	pub cache: ReadCache,

	// Settings subsystem
	pub settings: Arc<Settings>,
	pub settings_registry: Arc<FrozenSettingsRegistry>,
}

pub type App = Arc<AppState>;

pub struct Adapters {
	pub store: Option<Arc<dyn ItemStore>>,
	pub sessions: Option<Arc<dyn SessionStore>>,
}

#[derive(Debug, Clone)]
pub struct AppBuilderOpts {
	pub listen: Box<str>,
	/// Login of the administrator created on first start
	pub admin_login: Box<str>,
}

impl Default for AppBuilderOpts {
	fn default() -> Self {
		Self { listen: "127.0.0.1:8080".into(), admin_login: "admin".into() }
	}
}

impl AppState {
	/// Freeze the settings registry, resolve the configured values and
	/// assemble the state
	pub fn new(
		opts: AppBuilderOpts,
		store: Arc<dyn ItemStore>,
		sessions: Arc<dyn SessionStore>,
		registry: Registry,
		settings_registry: SettingsRegistry,
		configured: &HashMap<String, String>,
	) -> RgResult<App> {
		let settings_registry = Arc::new(settings_registry.freeze());
		let settings = Arc::new(Settings::new(settings_registry.clone(), configured)?);
		let cache_size = usize::try_from(settings.get_int("cache.size")?)
			.map_err(|_| Error::ConfigError("cache.size out of range".into()))?;

		Ok(Arc::new(AppState {
			opts,
			store,
			sessions,
			registry,
			cache: ReadCache::new(cache_size),
			settings,
			settings_registry,
		}))
	}

	/// Registered module by table name
	pub fn module(&self, name: &str) -> RgResult<Arc<ModuleDef>> {
		self.registry.module(name).ok_or(Error::NotFound)
	}
}

impl std::fmt::Debug for AppState {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("AppState")
			.field("opts", &self.opts)
			.field("store", &self.store)
			.field("registry", &self.registry)
			.finish_non_exhaustive()
	}
}

// vim: ts=4
