use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum ReportError {
    #[snafu(display("Could not open file for writing {path}: {source}"))]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },
}

pub type ReportResult<T> = std::result::Result<T, ReportError>;
