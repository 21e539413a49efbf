//! Item loading through the shared read cache

use crate::prelude::*;
use ringo_types::item::Item;

/// Load an item, `Error::NotFound` if it does not exist
pub async fn load_item(app: &App, module: &str, id: ItemId) -> RgResult<Item> {
	if let Some(item) = app.cache.get(module, id) {
		return Ok(item);
	}
	let item = app.store.load(module, id).await?;
	app.cache.put(item.clone());
	Ok(item)
}

// vim: ts=4
