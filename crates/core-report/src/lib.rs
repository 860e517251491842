pub mod delimited;
pub mod error;
pub mod group;
pub mod html;
pub mod models;

pub use delimited::DelimitedReport;
pub use error::{ReportError, ReportResult};
pub use group::{DupGroup, GroupKey, group_rows, qualifying_groups};
pub use html::HtmlReport;
pub use models::{Field, ReportLine, passthrough};
