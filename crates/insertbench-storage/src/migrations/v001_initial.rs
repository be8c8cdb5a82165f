//! V001: the benchmark table.

pub const MIGRATION_SQL: &str = r#"
-- Every strategy writes here; the engine empties it between trials.
-- created_at is epoch milliseconds (UTC); amount is integer cents.
CREATE TABLE IF NOT EXISTS test_record (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    data1 TEXT NOT NULL,
    data2 TEXT,
    amount_cents INTEGER,
    status TEXT NOT NULL DEFAULT 'ACTIVE',
    created_at INTEGER NOT NULL
) STRICT;
"#;
