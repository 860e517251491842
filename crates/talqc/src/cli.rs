use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::filter::LevelFilter;

use qc_reports::ReportKind;

#[derive(Parser)]
#[command(version, about = "QC reports for the targeted allele load", long_about = None)]
pub struct CliOpts {
    #[arg(value_enum, help = "Reports to run; defaults to every report")]
    reports: Vec<ReportKind>,

    #[arg(
        long,
        env = "DATABASE_URL",
        hide_env_values = true,
        help = "PostgreSQL connection URL of the MGI database"
    )]
    pub database_url: String,

    #[arg(
        long,
        env = "RPTDIR",
        help = "Directory the report files are written to"
    )]
    pub rpt_dir: PathBuf,

    #[arg(
        long,
        env = "PROJECT_LOGICAL_DB",
        help = "Logical DB key scoping the abandoned-allele report"
    )]
    pub project_logical_db: Option<i64>,

    #[arg(
        long,
        env = "CONFIG_URL",
        help = "Remote key-value configuration endpoint used for hyperlink URLs"
    )]
    pub config_url: Option<String>,

    #[arg(
        long,
        value_enum,
        env = "TRACING_LEVEL",
        default_value = "info",
        help = "Tracing level, it can be overrided by *RUST_LOG* env var"
    )]
    pub tracing_level: TracingLevel,
}

impl CliOpts {
    #[must_use]
    pub fn reports(&self) -> Vec<ReportKind> {
        if self.reports.is_empty() {
            ReportKind::ALL.to_vec()
        } else {
            self.reports.clone()
        }
    }
}

#[derive(Debug, Clone, ValueEnum)]
pub enum TracingLevel {
    Off,
    Info,
    Debug,
    Trace,
}

#[allow(clippy::from_over_into)]
impl Into<LevelFilter> for TracingLevel {
    fn into(self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::OFF,
            Self::Info => LevelFilter::INFO,
            Self::Debug => LevelFilter::DEBUG,
            Self::Trace => LevelFilter::TRACE,
        }
    }
}

impl std::fmt::Display for TracingLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Off => write!(f, "off"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}
