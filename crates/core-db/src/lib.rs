pub mod error;
pub mod executor;
pub mod models;

pub use error::{DbError, DbResult};
pub use executor::{PgQueryExecutor, QueryExecutor, SqlParam};
pub use models::{ResultSet, Row, Value};
