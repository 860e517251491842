use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum DbError {
    #[snafu(display("Failed to connect to database: {source}"))]
    Connect { source: sqlx::Error },

    #[snafu(display("Query failed: {source}, query: {query}"))]
    Query { source: sqlx::Error, query: String },

    #[snafu(display("Failed to decode column {column}: {source}"))]
    DecodeColumn { column: String, source: sqlx::Error },

    #[snafu(display("No column named {name} in row"))]
    MissingColumn { name: String },
}

pub type DbResult<T> = std::result::Result<T, DbError>;
