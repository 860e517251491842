use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use snafu::ResultExt;
use sqlx::postgres::{PgColumn, PgPool, PgPoolOptions, PgRow};
use sqlx::{Column, Row as SqlxRow, TypeInfo};

use crate::error::{self as db_error, DbResult};
use crate::models::{ResultSet, Row, Value};

/// Value bound into a query placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlParam {
    Int(i64),
    Text(String),
}

/// Query execution seam against the MGI database. Reports only read;
/// `execute` exists for temporary-table setup statements.
#[async_trait]
pub trait QueryExecutor: Send + Sync {
    async fn fetch(&self, sql: &str, params: &[SqlParam]) -> DbResult<ResultSet>;
    async fn execute(&self, sql: &str) -> DbResult<u64>;
    async fn close(&self);
}

/// PostgreSQL-backed executor. Report runs are fully sequential, so the
/// pool is capped at a single connection; `close` releases it.
pub struct PgQueryExecutor {
    pool: PgPool,
}

impl PgQueryExecutor {
    pub async fn connect(database_url: &str) -> DbResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context(db_error::ConnectSnafu)?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl QueryExecutor for PgQueryExecutor {
    #[tracing::instrument(
        name = "QueryExecutor::fetch",
        level = "debug",
        skip(self, sql, params),
        err
    )]
    async fn fetch(&self, sql: &str, params: &[SqlParam]) -> DbResult<ResultSet> {
        let mut query = sqlx::query(sql);
        for param in params {
            query = match param {
                SqlParam::Int(v) => query.bind(*v),
                SqlParam::Text(v) => query.bind(v.clone()),
            };
        }
        let pg_rows = query
            .fetch_all(&self.pool)
            .await
            .context(db_error::QuerySnafu { query: sql })?;

        let columns = pg_rows.first().map_or_else(Vec::new, |row| {
            row.columns().iter().map(|c| c.name().to_string()).collect()
        });
        let mut result_set = ResultSet::new(columns);
        for pg_row in &pg_rows {
            result_set.push_row(decode_row(pg_row)?);
        }
        tracing::debug!(rows = result_set.len(), "fetched result set");
        Ok(result_set)
    }

    #[tracing::instrument(name = "QueryExecutor::execute", level = "debug", skip(self, sql), err)]
    async fn execute(&self, sql: &str) -> DbResult<u64> {
        let done = sqlx::query(sql)
            .execute(&self.pool)
            .await
            .context(db_error::QuerySnafu { query: sql })?;
        Ok(done.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}

fn decode_row(pg_row: &PgRow) -> DbResult<Row> {
    let mut row = Row::new();
    for column in pg_row.columns() {
        row.push(column.name(), decode_value(pg_row, column)?);
    }
    Ok(row)
}

fn decode_value(pg_row: &PgRow, column: &PgColumn) -> DbResult<Value> {
    let idx = column.ordinal();
    let ctx = db_error::DecodeColumnSnafu {
        column: column.name(),
    };
    let value = match column.type_info().name() {
        "INT2" => pg_row
            .try_get::<Option<i16>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, |v| Value::Int(i64::from(v))),
        "INT4" => pg_row
            .try_get::<Option<i32>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, |v| Value::Int(i64::from(v))),
        "INT8" => pg_row
            .try_get::<Option<i64>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, Value::Int),
        "FLOAT4" => pg_row
            .try_get::<Option<f32>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, |v| Value::Float(f64::from(v))),
        "FLOAT8" => pg_row
            .try_get::<Option<f64>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, Value::Float),
        "BOOL" => pg_row
            .try_get::<Option<bool>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, Value::Bool),
        "DATE" => pg_row
            .try_get::<Option<NaiveDate>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, Value::Date),
        "TIMESTAMP" => pg_row
            .try_get::<Option<NaiveDateTime>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, Value::DateTime),
        "TIMESTAMPTZ" => pg_row
            .try_get::<Option<DateTime<Utc>>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, |v| Value::DateTime(v.naive_utc())),
        // TEXT, VARCHAR, BPCHAR, NAME and anything else the schema may
        // surface decodes through its text representation
        _ => pg_row
            .try_get_unchecked::<Option<String>, _>(idx)
            .context(ctx)?
            .map_or(Value::Null, Value::Text),
    };
    Ok(value)
}
