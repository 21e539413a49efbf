//! App builder and server entry point

use std::{collections::HashMap, future::Future, pin::Pin, sync::Arc};

use crate::prelude::*;
use crate::{bootstrap, routes};
pub use ringo_core::app::{Adapters, App, AppBuilderOpts, AppState, VERSION};
use ringo_core::form::FormDef;
use ringo_core::registry::Registry;
use ringo_core::session::MemorySessionStore;
use ringo_core::settings::SettingsRegistry;
use ringo_types::item_store::ItemStore;
use ringo_types::module::ModuleDef;
use ringo_types::session::SessionStore;

type InitCallback = Box<dyn FnOnce(App) -> Pin<Box<dyn Future<Output = RgResult<()>> + Send>> + Send>;

pub struct AppBuilder {
	opts: AppBuilderOpts,
	adapters: Adapters,
	modules: Vec<ModuleDef>,
	registry: Registry,
	settings: HashMap<String, String>,
	on_init: Vec<InitCallback>,
}

impl AppBuilder {
	pub fn new() -> Self {
		// tests build several apps in one process
		let _ = tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.try_init();

		let mut registry = Registry::new();
		ringo_bundle::register(&mut registry);

		AppBuilder {
			opts: AppBuilderOpts::default(),
			adapters: Adapters { store: None, sessions: None },
			modules: Vec::new(),
			registry,
			settings: HashMap::new(),
			on_init: Vec::new(),
		}
	}

	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn admin_login(&mut self, login: impl Into<Box<str>>) -> &mut Self {
		self.opts.admin_login = login.into();
		self
	}

	pub fn store(&mut self, store: Arc<dyn ItemStore>) -> &mut Self {
		self.adapters.store = Some(store);
		self
	}
	pub fn sessions(&mut self, sessions: Arc<dyn SessionStore>) -> &mut Self {
		self.adapters.sessions = Some(sessions);
		self
	}

	/// Override the default of a registered setting
	pub fn setting(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.settings.insert(key.into(), value.into());
		self
	}

	pub fn module(&mut self, module: ModuleDef) -> &mut Self {
		self.modules.push(module);
		self
	}
	pub fn form(&mut self, module: &str, form: FormDef) -> &mut Self {
		self.registry.register_form(module, form);
		self
	}

	/// Register lifecycle callbacks, value checkers and bundle handlers
	pub fn configure(&mut self, f: impl FnOnce(&mut Registry)) -> &mut Self {
		f(&mut self.registry);
		self
	}

	pub fn on_init<F, Fut>(&mut self, f: F) -> &mut Self
	where
		F: FnOnce(App) -> Fut + Send + 'static,
		Fut: Future<Output = RgResult<()>> + Send + 'static,
	{
		self.on_init.push(Box::new(move |app| Box::pin(f(app))));
		self
	}

	/// Assemble the app state, bootstrap the store and run the init callbacks
	pub async fn build(self) -> RgResult<App> {
		let Some(store) = self.adapters.store else {
			error!("FATAL: No item store configured");
			return Err(Error::Internal("No item store configured".to_string()));
		};
		let sessions: Arc<dyn SessionStore> = match self.adapters.sessions {
			Some(sessions) => sessions,
			None => {
				info!("No session store configured, sessions are kept in memory");
				Arc::new(MemorySessionStore::new())
			}
		};

		let mut registry = self.registry;
		for module in self.modules {
			registry.register_module(module).inspect_err(|err| error!("FATAL: {}", err))?;
		}

		let mut settings_registry = SettingsRegistry::new();
		ringo_core::register_settings(&mut settings_registry)?;
		ringo_list::register_settings(&mut settings_registry)?;
		info!("Registered {} settings", settings_registry.len());

		let app = AppState::new(self.opts, store, sessions, registry, settings_registry, &self.settings)
			.inspect_err(|err| error!("FATAL: Invalid settings: {}", err))?;

		bootstrap::bootstrap(&app).await.inspect_err(|err| error!("FATAL: Bootstrap failed: {}", err))?;

		for callback in self.on_init {
			callback(app.clone()).await?;
		}

		Ok(app)
	}

	pub async fn run(self) -> RgResult<()> {
		info!(" ____  _");
		info!("|  _ \\(_)_ __   __ _  ___");
		info!("| |_) | | '_ \\ / _` |/ _ \\");
		info!("|  _ <| | | | | (_| | (_) |");
		info!("|_| \\_\\_|_| |_|\\__, |\\___/");
		info!("               |___/");
		info!("V{}", VERSION);
		info!("");

		let app = self.build().await?;
		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(&*app.opts.listen).await.map_err(|err| {
			error!("FATAL: Cannot listen on {}: {}", app.opts.listen, err);
			Error::Io(err)
		})?;
		info!("Listening on http://{}", app.opts.listen);

		axum::serve(listener, router).await?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
