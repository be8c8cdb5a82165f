//! test_record table queries.

use chrono::DateTime;
use insertbench_core::errors::StorageError;
use insertbench_core::{Amount, Record, RecordStatus};
use rusqlite::{params, Connection};

use crate::sqlite_err;

/// Bound parameters per row.
pub const COLUMNS_PER_ROW: usize = 5;

/// SQLite's default host parameter limit (SQLITE_MAX_VARIABLE_NUMBER).
pub const MAX_HOST_PARAMETERS: usize = 32_766;

/// Most rows a single multi-row VALUES statement can carry.
pub const MAX_ROWS_PER_STATEMENT: usize = MAX_HOST_PARAMETERS / COLUMNS_PER_ROW;

const INSERT_SQL: &str = "INSERT INTO test_record (data1, data2, amount_cents, status, created_at)
     VALUES (?1, ?2, ?3, ?4, ?5)";

/// A raw test_record row, before conversion back into a [`Record`].
#[derive(Debug, Clone)]
pub struct RecordRow {
    pub id: i64,
    pub data1: String,
    pub data2: Option<String>,
    pub amount_cents: Option<i64>,
    pub status: String,
    pub created_at: i64,
}

impl RecordRow {
    pub fn into_record(self) -> Result<Record, StorageError> {
        let corrupt = |message: String| StorageError::SqliteError { message };
        let created_at = DateTime::from_timestamp_millis(self.created_at)
            .ok_or_else(|| corrupt(format!("row {}: created_at out of range", self.id)))?;
        let status: RecordStatus = self
            .status
            .parse()
            .map_err(|e| corrupt(format!("row {}: {e}", self.id)))?;
        let record = Record::new(self.data1, created_at)
            .map_err(|e| corrupt(format!("row {}: {e}", self.id)))?
            .with_secondary(self.data2)
            .with_amount(self.amount_cents.map(Amount::from_cents))
            .with_status(status);
        Ok(record.with_id(self.id))
    }
}

/// Insert one row with a freshly prepared statement (parse + bind + step).
pub fn insert_adhoc(conn: &Connection, record: &Record) -> Result<usize, StorageError> {
    conn.execute(
        INSERT_SQL,
        params![
            record.primary(),
            record.secondary(),
            record.amount().map(|a| a.cents()),
            record.status().as_str(),
            record.created_at().timestamp_millis(),
        ],
    )
    .map_err(sqlite_err)
}

/// Insert one row through the connection's statement cache.
/// Returns the number of rows changed.
pub fn insert_cached(conn: &Connection, record: &Record) -> Result<usize, StorageError> {
    let mut stmt = conn.prepare_cached(INSERT_SQL).map_err(sqlite_err)?;
    stmt.execute(params![
        record.primary(),
        record.secondary(),
        record.amount().map(|a| a.cents()),
        record.status().as_str(),
        record.created_at().timestamp_millis(),
    ])
    .map_err(sqlite_err)
}

/// Insert one row through the statement cache and return only its rowid.
/// The caller learns that the row landed, not how many rows changed.
pub fn insert_returning_rowid(conn: &Connection, record: &Record) -> Result<i64, StorageError> {
    let mut stmt = conn.prepare_cached(INSERT_SQL).map_err(sqlite_err)?;
    stmt.insert(params![
        record.primary(),
        record.secondary(),
        record.amount().map(|a| a.cents()),
        record.status().as_str(),
        record.created_at().timestamp_millis(),
    ])
    .map_err(sqlite_err)
}

/// Build `INSERT ... VALUES (?,?,?,?,?), ...` for `rows` rows.
pub fn multi_row_insert_sql(rows: usize) -> String {
    let group = "(?, ?, ?, ?, ?)";
    let mut sql = String::with_capacity(96 + rows * (group.len() + 2));
    sql.push_str("INSERT INTO test_record (data1, data2, amount_cents, status, created_at) VALUES ");
    for i in 0..rows {
        if i > 0 {
            sql.push_str(", ");
        }
        sql.push_str(group);
    }
    sql
}

/// Insert all `records` with one multi-row statement.
/// `records.len()` must not exceed [`MAX_ROWS_PER_STATEMENT`].
pub fn insert_multi_row(conn: &Connection, records: &[Record]) -> Result<usize, StorageError> {
    if records.is_empty() {
        return Ok(0);
    }
    if records.len() > MAX_ROWS_PER_STATEMENT {
        return Err(StorageError::SqliteError {
            message: format!(
                "{} rows exceed the {MAX_ROWS_PER_STATEMENT}-row statement limit",
                records.len()
            ),
        });
    }

    let mut stmt = conn
        .prepare_cached(&multi_row_insert_sql(records.len()))
        .map_err(sqlite_err)?;
    for (i, record) in records.iter().enumerate() {
        let base = i * COLUMNS_PER_ROW;
        stmt.raw_bind_parameter(base + 1, record.primary())
            .map_err(sqlite_err)?;
        stmt.raw_bind_parameter(base + 2, record.secondary())
            .map_err(sqlite_err)?;
        stmt.raw_bind_parameter(base + 3, record.amount().map(|a| a.cents()))
            .map_err(sqlite_err)?;
        stmt.raw_bind_parameter(base + 4, record.status().as_str())
            .map_err(sqlite_err)?;
        stmt.raw_bind_parameter(base + 5, record.created_at().timestamp_millis())
            .map_err(sqlite_err)?;
    }
    stmt.raw_execute().map_err(sqlite_err)
}

/// Count rows in test_record.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM test_record", [], |row| row.get(0))
        .map_err(sqlite_err)
}

/// Delete every row. Not reversible.
pub fn delete_all(conn: &Connection) -> Result<usize, StorageError> {
    conn.execute("DELETE FROM test_record", []).map_err(sqlite_err)
}

/// Load every row in id order.
pub fn load_all(conn: &Connection) -> Result<Vec<Record>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT id, data1, data2, amount_cents, status, created_at
             FROM test_record ORDER BY id",
        )
        .map_err(sqlite_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok(RecordRow {
                id: row.get(0)?,
                data1: row.get(1)?,
                data2: row.get(2)?,
                amount_cents: row.get(3)?,
                status: row.get(4)?,
                created_at: row.get(5)?,
            })
        })
        .map_err(sqlite_err)?;

    let mut result = Vec::new();
    for row in rows {
        result.push(row.map_err(sqlite_err)?.into_record()?);
    }
    Ok(result)
}
