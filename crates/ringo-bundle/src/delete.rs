//! Built-in `delete` bundle handler

use futures::FutureExt;

use crate::dispatch::clear_bundle;
use crate::prelude::*;
use ringo_core::message::{self, BUNDLE_DELETE_SUCCESS};
use ringo_core::registry::{BundleContext, BundleResult, Event, EventContext, Registry};
use ringo_types::session::Flash;

/// Register the default bundle handlers
pub fn register(registry: &mut Registry) {
	registry.bundle_handler(None, "delete", |app, ctx| delete_items(app, ctx).boxed());
}

async fn delete_items(app: App, ctx: BundleContext) -> RgResult<BundleResult> {
	let handlers = app.registry.event_handlers(&ctx.module.name, Event::Delete).to_vec();
	let mut deleted = Vec::with_capacity(ctx.items.len());
	for item in ctx.items {
		app.store.delete(&item).await?;
		deleted.push(item.id);
		for handler in &handlers {
			let event = EventContext { event: Event::Delete, user: ctx.user.clone(), item: item.clone() };
			handler(app.clone(), event).await?;
		}
	}
	app.cache.invalidate();

	// deleted ids would fail on the next dispatch
	clear_bundle(&app, &ctx.sid, &ctx.module.name).await?;

	let num = deleted.len().to_string();
	let text = message::render(BUNDLE_DELETE_SUCCESS, &[("num", num.as_str()), ("item_type", ctx.module.label.as_ref())]);
	app.sessions.flash(&ctx.sid, Flash::success(text)).await?;
	info!(user = %ctx.user.login, module = %ctx.module.name, count = deleted.len(), "bundle delete");

	Ok(BundleResult { items: deleted, redirect: ctx.module.url("list", None) })
}

// vim: ts=4
