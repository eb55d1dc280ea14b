//! SQL schema for the SQLite engine.
//!
//! Executed by [`crate::SqliteStore`]'s `initialize`. Every statement is
//! create-if-absent, so running it against an existing file is a no-op.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS students (
    id           INTEGER PRIMARY KEY AUTOINCREMENT,
    name         TEXT NOT NULL,
    email        TEXT UNIQUE,
    access_code  TEXT NOT NULL UNIQUE,   -- uppercase
    created_at   TEXT NOT NULL           -- RFC 3339 UTC
);

-- Seeded once from the curriculum; never written afterwards.
CREATE TABLE IF NOT EXISTS course_modules (
    id                INTEGER PRIMARY KEY AUTOINCREMENT,
    module_number     INTEGER NOT NULL,
    title             TEXT NOT NULL,
    total_units       INTEGER NOT NULL DEFAULT 0,
    duration_minutes  INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS progress (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id       INTEGER NOT NULL REFERENCES students(id),
    module_id        INTEGER NOT NULL REFERENCES course_modules(id),
    completed_units  INTEGER NOT NULL DEFAULT 0,
    percentage       INTEGER NOT NULL DEFAULT 0,
    last_updated     TEXT NOT NULL,      -- RFC 3339 UTC
    UNIQUE (student_id, module_id),
    CHECK  (percentage BETWEEN 0 AND 100),
    CHECK  (completed_units >= 0)
);

CREATE TABLE IF NOT EXISTS exam_status (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id      INTEGER NOT NULL REFERENCES students(id),
    scheduled_date  TEXT,                -- YYYY-MM-DD
    passed          INTEGER NOT NULL DEFAULT 0,
    attempt_number  INTEGER NOT NULL DEFAULT 1,
    notes           TEXT
);

CREATE INDEX IF NOT EXISTS progress_student_idx ON progress(student_id);
CREATE INDEX IF NOT EXISTS exam_student_idx     ON exam_status(student_id);

PRAGMA user_version = 1;
";
