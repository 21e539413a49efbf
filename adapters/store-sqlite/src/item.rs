//! Item persistence
//!
//! Items of every module share one table; module specific fields are kept
//! in the `data` JSON column and sorted on with `json_extract`.

use sqlx::{QueryBuilder, Row, Sqlite, SqlitePool, sqlite::SqliteRow};

use crate::utils::{collect_res, inspect, map_res, push_in};
use ringo_types::item::{BUILTIN_FIELDS, Fields, Item, Owner};
use ringo_types::list::{ListQuery, Restriction, SortOrder};
use ringo_types::prelude::*;

const ITEM_COLUMNS: &str = "id, module, uid, gid, data, created_at, updated_at";

fn read_item(row: &SqliteRow) -> Result<Item, sqlx::Error> {
	let data: String = row.try_get("data")?;
	let fields: Fields = serde_json::from_str(&data).map_err(|err| sqlx::Error::Decode(Box::new(err)))?;
	Ok(Item {
		id: ItemId(row.try_get("id")?),
		module: row.try_get::<String, _>("module")?.into(),
		uid: row.try_get::<Option<i64>, _>("uid")?.map(UserId),
		gid: row.try_get::<Option<i64>, _>("gid")?.map(GroupId),
		created_at: Timestamp(row.try_get("created_at")?),
		updated_at: Timestamp(row.try_get("updated_at")?),
		fields,
	})
}

fn encode_fields(fields: &Fields) -> RgResult<String> {
	serde_json::to_string(fields).inspect_err(|err| warn!("Cannot encode item data: {}", err)).map_err(|_| Error::DbError)
}

pub(crate) async fn create(db: &SqlitePool, module: &str, owner: Owner, data: &Fields) -> RgResult<Item> {
	let now = Timestamp::now();
	let mut item = Item {
		id: ItemId(0),
		module: module.into(),
		uid: Some(owner.uid),
		gid: owner.gid,
		created_at: now,
		updated_at: now,
		fields: Fields::new(),
	};
	item.apply(data)?;

	let res = sqlx::query(
		"INSERT INTO items (module, uid, gid, data, created_at, updated_at)
		VALUES (?, ?, ?, ?, ?, ?) RETURNING id",
	)
	.bind(module)
	.bind(item.uid.map(|uid| uid.0))
	.bind(item.gid.map(|gid| gid.0))
	.bind(encode_fields(&item.fields)?)
	.bind(now.0)
	.bind(now.0)
	.fetch_one(db)
	.await;
	item.id = ItemId(map_res(res, |row| row.try_get(0))?);

	debug!("Created {} item {}", module, item.id);
	Ok(item)
}

pub(crate) async fn load(db: &SqlitePool, module: &str, id: ItemId) -> RgResult<Item> {
	let res = sqlx::query(&format!("SELECT {} FROM items WHERE id = ? AND module = ?", ITEM_COLUMNS))
		.bind(id.0)
		.bind(module)
		.fetch_one(db)
		.await;
	map_res(res, |row| read_item(&row))
}

/// Apply the changes to the stored state of the item
pub(crate) async fn save(db: &SqlitePool, item: &Item, changes: &Fields) -> RgResult<Item> {
	let mut item = load(db, &item.module, item.id).await?;
	item.apply(changes)?;
	item.updated_at = Timestamp::now();

	let res = sqlx::query("UPDATE items SET uid = ?, gid = ?, data = ?, updated_at = ? WHERE id = ? AND module = ?")
		.bind(item.uid.map(|uid| uid.0))
		.bind(item.gid.map(|gid| gid.0))
		.bind(encode_fields(&item.fields)?)
		.bind(item.updated_at.0)
		.bind(item.id.0)
		.bind(item.module.as_ref())
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}
	Ok(item)
}

pub(crate) async fn delete(db: &SqlitePool, item: &Item) -> RgResult<()> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	let res = sqlx::query("DELETE FROM items WHERE id = ? AND module = ?")
		.bind(item.id.0)
		.bind(item.module.as_ref())
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
	if res.rows_affected() == 0 {
		return Err(Error::NotFound);
	}

	sqlx::query("DELETE FROM relations WHERE parent_id = ? OR child_id = ?")
		.bind(item.id.0)
		.bind(item.id.0)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	debug!("Deleted {} item {}", item.module, item.id);
	Ok(())
}

fn push_filter<'a>(
	mut query: QueryBuilder<'a, Sqlite>,
	module: &str,
	restrict: Option<&Restriction>,
) -> QueryBuilder<'a, Sqlite> {
	query.push(" WHERE module = ").push_bind(module.to_string());
	if let Some(restrict) = restrict {
		query.push(" AND (uid = ").push_bind(restrict.uid.0);
		if !restrict.gids.is_empty() {
			let gids: Vec<i64> = restrict.gids.iter().map(|gid| gid.0).collect();
			query.push(" OR gid IN ");
			query = push_in(query, &gids);
		}
		query.push(")");
	}
	query
}

/// Permission filtered listing, sorted by a column and sliced.
///
/// Ties and unsorted listings are ordered by id. SQLite orders NULL before
/// numbers before text, text bytewise.
pub(crate) async fn list(db: &SqlitePool, module: &str, query: &ListQuery) -> RgResult<(Vec<Item>, usize)> {
	let mut count_query = push_filter(QueryBuilder::new("SELECT count(*) FROM items"), module, query.restrict.as_ref());
	let res = count_query.build().fetch_one(db).await;
	let total: i64 = map_res(res, |row| row.try_get(0))?;

	let mut select = push_filter(
		QueryBuilder::new(format!("SELECT {} FROM items", ITEM_COLUMNS)),
		module,
		query.restrict.as_ref(),
	);
	select.push(" ORDER BY ");
	if let Some(sort) = &query.sort {
		if BUILTIN_FIELDS.contains(&sort.field.as_str()) {
			select.push(&sort.field);
		} else {
			select.push("json_extract(data, ").push_bind(format!("$.\"{}\"", sort.field.replace('"', ""))).push(")");
		}
		select.push(match sort.order {
			SortOrder::Asc => " ASC, ",
			SortOrder::Desc => " DESC, ",
		});
	}
	select.push("id ASC");
	if let Some((offset, limit)) = query.slice {
		// SQLite reads a negative offset as 0, no table holds more than i64::MAX rows
		let Ok(offset) = i64::try_from(offset) else {
			debug!("Offset {} of {} listing past the end", offset, module);
			return Ok((Vec::new(), total as usize));
		};
		let limit = i64::try_from(limit).unwrap_or(i64::MAX);
		select.push(" LIMIT ").push_bind(limit).push(" OFFSET ").push_bind(offset);
	}

	let rows = select.build().fetch_all(db).await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	let items = collect_res(rows.iter().map(read_item))?;
	debug!("Listed {} of {} {} items", items.len(), total, module);
	Ok((items, total as usize))
}

// vim: ts=4
