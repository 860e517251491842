pub mod error;
pub(crate) mod reports;
pub mod runner;

pub use error::{QcError, QcResult};
pub use runner::{ReportContext, ReportKind, run_report, run_reports};

#[cfg(test)]
mod tests;
