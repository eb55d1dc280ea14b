//! SQL schema for the PostgreSQL engine.
//!
//! Column names and meanings match the SQLite engine. Ids are `BIGINT` so that
//! both engines hand out `i64`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS students (
    id           BIGSERIAL PRIMARY KEY,
    name         TEXT NOT NULL,
    email        TEXT UNIQUE,
    access_code  TEXT NOT NULL UNIQUE,
    created_at   TIMESTAMPTZ NOT NULL
);

CREATE TABLE IF NOT EXISTS course_modules (
    id                BIGSERIAL PRIMARY KEY,
    module_number     BIGINT NOT NULL,
    title             TEXT NOT NULL,
    total_units       BIGINT NOT NULL DEFAULT 0,
    duration_minutes  BIGINT NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS progress (
    id               BIGSERIAL PRIMARY KEY,
    student_id       BIGINT NOT NULL REFERENCES students(id),
    module_id        BIGINT NOT NULL REFERENCES course_modules(id),
    completed_units  BIGINT NOT NULL DEFAULT 0,
    percentage       BIGINT NOT NULL DEFAULT 0,
    last_updated     TIMESTAMPTZ NOT NULL,
    UNIQUE (student_id, module_id),
    CHECK  (percentage BETWEEN 0 AND 100),
    CHECK  (completed_units >= 0)
);

CREATE TABLE IF NOT EXISTS exam_status (
    id              BIGSERIAL PRIMARY KEY,
    student_id      BIGINT NOT NULL REFERENCES students(id),
    scheduled_date  DATE,
    passed          BOOLEAN NOT NULL DEFAULT false,
    attempt_number  BIGINT NOT NULL DEFAULT 1,
    notes           TEXT
);

CREATE INDEX IF NOT EXISTS progress_student_idx ON progress(student_id);
CREATE INDEX IF NOT EXISTS exam_student_idx     ON exam_status(student_id);
";
