//! Relation links between items

use sqlx::{Row, SqlitePool};

use crate::utils::{collect_res, inspect};
use ringo_types::item::Item;
use ringo_types::prelude::*;

pub(crate) async fn link(db: &SqlitePool, parent: &Item, relation: &str, child: &Item) -> RgResult<()> {
	sqlx::query("INSERT OR IGNORE INTO relations (parent_id, relation, child_id) VALUES (?, ?, ?)")
		.bind(parent.id.0)
		.bind(relation)
		.bind(child.id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	debug!("Linked {} {} -[{}]-> {} {}", parent.module, parent.id, relation, child.module, child.id);
	Ok(())
}

pub(crate) async fn list_links(db: &SqlitePool, parent: &Item, relation: &str) -> RgResult<Vec<ItemId>> {
	let rows = sqlx::query("SELECT child_id FROM relations WHERE parent_id = ? AND relation = ? ORDER BY child_id")
		.bind(parent.id.0)
		.bind(relation)
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	collect_res(rows.iter().map(|row| row.try_get(0).map(ItemId)))
}

// vim: ts=4
