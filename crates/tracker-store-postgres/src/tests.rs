//! Integration tests for `PgStore`.
//!
//! These need a live server and are skipped unless
//! `TRACKER_TEST_DATABASE_URL` is set. Each test works in its own freshly
//! created schema so tests can run in parallel against one database.

use std::{
  str::FromStr as _,
  sync::atomic::{AtomicU32, Ordering},
};

use chrono::NaiveDate;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracker_core::{
  Error as CoreError,
  model::{NewExamRecord, NewStudent, ProgressWrite},
  store::ProgressStore,
};

use crate::PgStore;

static SCHEMA_SEQ: AtomicU32 = AtomicU32::new(0);

/// A store bound to a new, empty schema; `None` when no database is configured.
async fn store() -> Option<PgStore> {
  let url = std::env::var("TRACKER_TEST_DATABASE_URL").ok()?;
  let schema = format!(
    "tracker_test_{}_{}",
    std::process::id(),
    SCHEMA_SEQ.fetch_add(1, Ordering::Relaxed)
  );

  let admin = PgPoolOptions::new()
    .max_connections(1)
    .connect(&url)
    .await
    .expect("connect");
  sqlx::raw_sql(&format!(
    "DROP SCHEMA IF EXISTS {schema} CASCADE; CREATE SCHEMA {schema};"
  ))
  .execute(&admin)
  .await
  .expect("create schema");
  admin.close().await;

  let options = PgConnectOptions::from_str(&url)
    .expect("connection string")
    .options([("search_path", schema.as_str())]);
  let pool = PgPoolOptions::new()
    .max_connections(2)
    .connect_with(options)
    .await
    .expect("connect to schema");

  let store = PgStore::from_pool(pool);
  store.initialize().await.expect("initialize");
  Some(store)
}

fn student(name: &str) -> NewStudent {
  NewStudent { name: name.into(), email: None, access_code: None }
}

#[tokio::test]
async fn initialize_seeds_curriculum_once() {
  let Some(s) = store().await else { return };
  s.initialize().await.unwrap();

  let modules = s.list_modules().await.unwrap();
  assert_eq!(modules.len(), 11);
  assert_eq!(modules[0].module_number, 1);
  assert_eq!(modules[10].title, "PMP Fast Track and Practice Exams");
  assert_eq!(s.database_kind(), "PostgreSQL");
}

#[tokio::test]
async fn students_sort_in_byte_order() {
  let Some(s) = store().await else { return };
  for name in ["Carol", "alice", "Bob", "Alice"] {
    s.add_student(student(name)).await.unwrap();
  }

  let names: Vec<String> =
    s.list_students().await.unwrap().into_iter().map(|st| st.name).collect();
  assert_eq!(names, ["Alice", "Bob", "Carol", "alice"]);
}

#[tokio::test]
async fn access_codes_and_emails_are_unique() {
  let Some(s) = store().await else { return };
  let input = NewStudent {
    name:        "Finn".into(),
    email:       Some("finn@example.com".into()),
    access_code: Some("fin1000".into()),
  };
  let created = s.add_student(input.clone()).await.unwrap();
  assert_eq!(created.access_code, "FIN1000");

  let found = s.get_student_by_access_code("Fin1000").await.unwrap();
  assert_eq!(found.map(|st| st.id), Some(created.id));

  let err = s.add_student(input).await.unwrap_err();
  assert!(matches!(CoreError::from(err), CoreError::UniqueViolation(_)));
}

#[tokio::test]
async fn upsert_is_last_write_wins() {
  let Some(s) = store().await else { return };
  let st = s.add_student(student("Lee")).await.unwrap();
  let module = s.list_modules().await.unwrap().remove(0);

  for (completed, percentage) in [(5, 22), (12, 52)] {
    s.upsert_progress(ProgressWrite {
      student_id: st.id,
      module_id: module.id,
      completed_units: completed,
      percentage,
    })
    .await
    .unwrap();
  }

  let records = s.get_progress(None).await.unwrap();
  assert_eq!(records.len(), 1);
  assert_eq!(records[0].completed_units, 12);
  assert_eq!(records[0].percentage, 52);
  assert_eq!(records[0].module_title, module.title);
}

#[tokio::test]
async fn dangling_reference_is_constraint_violation() {
  let Some(s) = store().await else { return };
  let err = s
    .upsert_progress(ProgressWrite {
      student_id:      9_999,
      module_id:       1,
      completed_units: 0,
      percentage:      0,
    })
    .await
    .unwrap_err();
  assert!(matches!(CoreError::from(err), CoreError::ConstraintViolation(_)));
}

#[tokio::test]
async fn exam_status_undated_last() {
  let Some(s) = store().await else { return };
  let st = s.add_student(student("Wes")).await.unwrap();

  let mut dated = NewExamRecord::new(st.id);
  dated.scheduled_date = NaiveDate::from_ymd_opt(2026, 5, 1);
  s.add_exam_record(NewExamRecord::new(st.id)).await.unwrap();
  s.add_exam_record(dated).await.unwrap();

  let entries = s.get_exam_status().await.unwrap();
  assert_eq!(entries.len(), 2);
  assert!(entries[0].exam.scheduled_date.is_some());
  assert!(entries[1].exam.scheduled_date.is_none());
  assert_eq!(entries[0].student_name, "Wes");
}

#[tokio::test]
async fn closed_pool_is_unavailable() {
  let Some(s) = store().await else { return };
  s.close().await;

  let err = s.list_students().await.unwrap_err();
  assert!(matches!(CoreError::from(err), CoreError::StorageUnavailable(_)));
}
