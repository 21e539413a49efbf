use futures::FutureExt;
use serde_json::Value;
use std::{env, path, sync::Arc};

use ringo::AppBuilder;
use ringo::form::{FieldType, FormDef, FormField, Rule};
use ringo::registry::{BundleContext, BundleResult, Event, EventContext, Registry};
use ringo::prelude::*;
use ringo::types::item::Fields;
use ringo::types::list::{SortOrder, Sorting};
use ringo::types::module::{ColumnConfig, FieldKind, ModuleDef, TableConfig};
use ringo::types::session::Flash;
use ringo_store_sqlite::ItemStoreSqlite;

pub struct Config {
	pub listen: String,
	pub db_path: path::PathBuf,
}

fn todo_module() -> ModuleDef {
	ModuleDef::new(1, "todos", "Todo")
		.title_field("name")
		.field("name", "Name", FieldKind::Column)
		.field("priority", "Priority", FieldKind::Column)
		.field("done", "Done", FieldKind::Column)
		.field("tags", "Tags", FieldKind::Relation { module: "tags".into() })
		.table(TableConfig {
			columns: vec![
				ColumnConfig::new("name", "Name"),
				ColumnConfig::new("priority", "Priority").searchable(false),
				ColumnConfig::new("done", "Done").searchable(false),
			],
			default_sort: Some(Sorting::new("priority", SortOrder::Desc)),
			paginated: true,
			advanced: Some(true),
			default_search: Vec::new(),
		})
}

fn todo_form() -> FormDef {
	FormDef::new()
		.field(FormField::new("name", FieldType::Text).required().rule(Rule::MaxLength(80)))
		.field(FormField::new("priority", FieldType::Integer))
		.field(FormField::new("done", FieldType::Bool))
}

fn tag_module() -> ModuleDef {
	ModuleDef::new(2, "tags", "Tag")
		.title_field("name")
		.field("name", "Name", FieldKind::Column)
		.field("todos", "Todos", FieldKind::Relation { module: "todos".into() })
		.table(TableConfig { columns: vec![ColumnConfig::new("name", "Name")], ..TableConfig::default() })
}

/// Bundle action marking the selected todos as done
async fn mark_done(app: App, ctx: BundleContext) -> RgResult<BundleResult> {
	let changes: Fields = [("done".to_string(), Value::Bool(true))].into_iter().collect();
	let mut items = Vec::with_capacity(ctx.items.len());
	for item in &ctx.items {
		app.store.save(item, &changes).await?;
		items.push(item.id);
	}
	app.cache.invalidate();
	app.sessions.flash(&ctx.sid, Flash::success(format!("Marked {} todos as done.", items.len()))).await?;
	Ok(BundleResult { items, redirect: None })
}

async fn log_event(_app: App, ctx: EventContext) -> RgResult<()> {
	info!(user = %ctx.user.login, id = %ctx.item.id, "todo {}", ctx.event.as_str());
	Ok(())
}

fn configure(registry: &mut Registry) {
	registry.bundle_handler(Some("todos"), "done", |app, ctx| mark_done(app, ctx).boxed());
	for event in [Event::Create, Event::Update, Event::Delete] {
		registry.on_event("todos", event, |app, ctx| log_event(app, ctx).boxed());
	}
}

#[tokio::main]
async fn main() -> RgResult<()> {
	let config = Config {
		listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
		db_path: path::PathBuf::from(env::var("DB_PATH").unwrap_or_else(|_| "./data".to_string())),
	};

	let mut builder = AppBuilder::new();
	let store = ItemStoreSqlite::new(&config.db_path).await?;

	builder
		.listen(config.listen)
		.store(Arc::new(store))
		.module(todo_module())
		.module(tag_module())
		.form("todos", todo_form())
		.configure(configure)
		.on_init(|app| async move {
			// sessions are created programmatically, hand one out for the administrator
			let admin = app.store.read_user_by_login(&app.opts.admin_login).await?;
			let sid = app.sessions.create_session(admin.id).await?;
			info!("Administrator session: Authorization: Bearer {}", sid);
			Ok::<(), Error>(())
		});

	builder.run().await
}

// vim: ts=4
