use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum QcError {
    #[snafu(display("Query failed: {source}"))]
    Query { source: core_db::DbError },

    #[snafu(display("{source}"))]
    Report { source: core_report::ReportError },

    #[snafu(display("Remote configuration error: {source}"))]
    Config { source: core_config::ConfigError },

    #[snafu(display("PROJECT_LOGICAL_DB is not configured; the abandoned-allele report needs it"))]
    MissingLogicalDb,
}

pub type QcResult<T> = std::result::Result<T, QcError>;
