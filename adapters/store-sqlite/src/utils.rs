//! Shared utilities for the SQLite store
//!
//! Error mapping helpers used across all domain modules.

use ringo_types::prelude::*;
use sqlx::sqlite::SqliteRow;

/// Build an IN clause with parameterized ids
pub(crate) fn push_in<'a>(
	mut query: sqlx::QueryBuilder<'a, sqlx::Sqlite>,
	values: &[i64],
) -> sqlx::QueryBuilder<'a, sqlx::Sqlite> {
	query.push("(");
	for (i, value) in values.iter().enumerate() {
		if i > 0 {
			query.push(", ");
		}
		query.push_bind(*value);
	}
	query.push(")");
	query
}

/// Log database error for debugging
pub(crate) fn inspect(err: &sqlx::Error) {
	warn!("DB: {:#?}", err);
}

/// Map a single-row query result, translating SQL errors to RgResult
pub(crate) fn map_res<T, F>(row: Result<SqliteRow, sqlx::Error>, f: F) -> RgResult<T>
where
	F: FnOnce(SqliteRow) -> Result<T, sqlx::Error>,
{
	match row {
		Ok(row) => f(row).inspect_err(inspect).map_err(|_| Error::DbError),
		Err(sqlx::Error::RowNotFound) => Err(Error::NotFound),
		Err(err) => {
			inspect(&err);
			Err(Error::DbError)
		}
	}
}

/// Collect an iterator of query results, translating errors
pub(crate) fn collect_res<T>(iter: impl Iterator<Item = Result<T, sqlx::Error>>) -> RgResult<Vec<T>> {
	let mut items = Vec::new();
	for item in iter {
		items.push(item.inspect_err(inspect).map_err(|_| Error::DbError)?);
	}
	Ok(items)
}

// vim: ts=4
