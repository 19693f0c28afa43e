use crate::pg_row::AFLamaranRow;
use app_error::AppError;
use database_entity::dto::{
  required_field_message, AFLamaran, LamaranParams, EMAIL_FIELD, FULL_NAME_FIELD, PHONE_FIELD,
};
use sqlx::postgres::PgDatabaseError;
use sqlx::{Executor, Postgres};
use tracing::instrument;
use uuid::Uuid;

const LAMARAN_TABLE: &str = "af_lamaran";

/// Creates the af_lamaran table when it does not exist yet. The empty-string
/// checks mirror [LamaranParams::check_required] so the table rejects partial
/// records even when written by other clients.
pub async fn create_lamaran_table_if_not_exists<'a, E: Executor<'a, Database = Postgres>>(
  executor: E,
) -> Result<(), sqlx::Error> {
  sqlx::query(
    r#"
      CREATE TABLE IF NOT EXISTS af_lamaran (
        lamaran_id UUID PRIMARY KEY,
        full_name TEXT NOT NULL CHECK (full_name <> ''),
        email TEXT NOT NULL CHECK (email <> ''),
        phone TEXT NOT NULL CHECK (phone <> ''),
        created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP
      )
    "#,
  )
  .execute(executor)
  .await?;
  Ok(())
}

#[instrument(level = "trace", skip(executor, params), err)]
pub async fn insert_lamaran<'a, E: Executor<'a, Database = Postgres>>(
  executor: E,
  lamaran_id: &Uuid,
  params: &LamaranParams,
) -> Result<AFLamaran, sqlx::Error> {
  let row = sqlx::query_as::<_, AFLamaranRow>(
    r#"
      INSERT INTO af_lamaran (lamaran_id, full_name, email, phone)
      VALUES ($1, $2, $3, $4)
      RETURNING lamaran_id, full_name, email, phone, created_at
    "#,
  )
  .bind(lamaran_id)
  .bind(&params.full_name)
  .bind(&params.email)
  .bind(&params.phone)
  .fetch_one(executor)
  .await?;
  Ok(row.into())
}

pub async fn select_lamaran<'a, E: Executor<'a, Database = Postgres>>(
  executor: E,
  lamaran_id: &Uuid,
) -> Result<Option<AFLamaran>, sqlx::Error> {
  let row = sqlx::query_as::<_, AFLamaranRow>(
    r#"
      SELECT lamaran_id, full_name, email, phone, created_at
      FROM af_lamaran
      WHERE lamaran_id = $1
    "#,
  )
  .bind(lamaran_id)
  .fetch_optional(executor)
  .await?;
  Ok(row.map(AFLamaran::from))
}

pub async fn ping<'a, E: Executor<'a, Database = Postgres>>(executor: E) -> Result<(), sqlx::Error> {
  sqlx::query("SELECT 1").execute(executor).await?;
  Ok(())
}

/// undefined_table
pub fn is_undefined_table(err: &sqlx::Error) -> bool {
  match err {
    sqlx::Error::Database(db_err) => db_err.code().as_deref() == Some("42P01"),
    _ => false,
  }
}

/// Converts an error raised while writing af_lamaran. Not-null and check
/// violations are reported against the field they guard, in the same shape
/// the validator uses.
pub fn lamaran_error(err: sqlx::Error) -> AppError {
  if let sqlx::Error::Database(db_err) = &err {
    if let Some(pg_err) = db_err.try_downcast_ref::<PgDatabaseError>() {
      let column = match pg_err.code() {
        "23502" => pg_err.column(),
        "23514" => pg_err.constraint().and_then(column_of_check_constraint),
        _ => None,
      };
      if let Some(field) = column.and_then(field_of_column) {
        return AppError::SchemaValidation(vec![required_field_message(field)]);
      }
    }
  }
  AppError::from(err)
}

/// `af_lamaran_email_check` -> `email`
fn column_of_check_constraint(constraint: &str) -> Option<&str> {
  constraint
    .strip_prefix(LAMARAN_TABLE)?
    .strip_prefix('_')?
    .strip_suffix("_check")
}

fn field_of_column(column: &str) -> Option<&'static str> {
  match column {
    "full_name" => Some(FULL_NAME_FIELD),
    "email" => Some(EMAIL_FIELD),
    "phone" => Some(PHONE_FIELD),
    _ => None,
  }
}
