//! Row mapping for dynamically shaped queries.
//!
//! Queries are assembled from raw client input, so the column set of a
//! result is not known ahead of time (a `UNION SELECT` can change it).
//! Rows are therefore turned into JSON objects keyed by column name, the
//! way a driver for a dynamic language would hand them back.

use rusqlite::{Connection, OptionalExtension, Row, types::ValueRef};
use serde_json::{Map, Number, Value};

/// A result row keyed by column name. Later duplicate names win.
pub type JsonRow = Map<String, Value>;

/// Trait for constructing a typed value from a database row.
pub trait FromRow: Sized {
    fn from_row(row: &Row) -> rusqlite::Result<Self>;
}

fn column_value(row: &Row, idx: usize) -> rusqlite::Result<Value> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(n) => Value::from(n),
        ValueRef::Real(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        ValueRef::Text(t) => Value::String(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::String(hex::encode(b)),
    })
}

/// Run a query and return every row as a JSON object.
pub fn query_rows(conn: &Connection, sql: &str) -> crate::error::Result<Vec<JsonRow>> {
    let mut stmt = conn.prepare(sql)?;
    let names: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
    let rows = stmt
        .query_map([], |row| {
            let mut map = Map::with_capacity(names.len());
            for (idx, name) in names.iter().enumerate() {
                map.insert(name.clone(), column_value(row, idx)?);
            }
            Ok(map)
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(rows)
}

/// Query for a single optional typed result (first row wins).
pub fn query_one<T: FromRow>(conn: &Connection, sql: &str) -> crate::error::Result<Option<T>> {
    conn.query_row(sql, [], T::from_row)
        .optional()
        .map_err(Into::into)
}
