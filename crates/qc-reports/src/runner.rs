use clap::ValueEnum;
use std::path::PathBuf;
use std::sync::Arc;

use core_config::RemoteConfig;
use core_db::QueryExecutor;

use crate::error::QcResult;
use crate::reports;

/// The named report configurations. Each legacy script revision with a
/// distinct query/threshold combination is its own kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, strum::Display)]
#[strum(serialize_all = "kebab-case")]
pub enum ReportKind {
    /// Allele/cell-line associations duplicated on (allele, MCL).
    DupMclAssoc,
    /// Alleles created by the targeted allele load that share a symbol.
    DupAllele,
    /// Approved alleles attached to the sentinel 'Orphaned' cell line.
    OrphanedApprovedAlleles,
    /// Alleles from the configured logical DB with zero cell lines.
    AbandonedAllele,
}

impl ReportKind {
    pub const ALL: [Self; 4] = [
        Self::DupMclAssoc,
        Self::DupAllele,
        Self::OrphanedApprovedAlleles,
        Self::AbandonedAllele,
    ];
}

/// Everything a report run needs: the query collaborator, the report
/// directory, and the optional per-run parameters.
pub struct ReportContext {
    pub executor: Arc<dyn QueryExecutor>,
    pub rpt_dir: PathBuf,
    pub project_logical_db: Option<i64>,
    pub links: Option<RemoteConfig>,
}

impl ReportContext {
    #[must_use]
    pub fn new(executor: Arc<dyn QueryExecutor>, rpt_dir: PathBuf) -> Self {
        Self {
            executor,
            rpt_dir,
            project_logical_db: None,
            links: None,
        }
    }

    #[must_use]
    pub const fn with_project_logical_db(mut self, logical_db: i64) -> Self {
        self.project_logical_db = Some(logical_db);
        self
    }

    #[must_use]
    pub fn with_links(mut self, links: RemoteConfig) -> Self {
        self.links = Some(links);
        self
    }
}

#[tracing::instrument(name = "run_report", level = "info", skip(ctx), err)]
pub async fn run_report(kind: ReportKind, ctx: &ReportContext) -> QcResult<()> {
    match kind {
        ReportKind::DupMclAssoc => reports::dup_mcl_assoc::run(ctx).await,
        ReportKind::DupAllele => reports::dup_allele::run(ctx).await,
        ReportKind::OrphanedApprovedAlleles => reports::orphaned_approved::run(ctx).await,
        ReportKind::AbandonedAllele => reports::abandoned_allele::run(ctx).await,
    }
}

/// Run the selected reports strictly in sequence, stopping at the first
/// failure.
pub async fn run_reports(kinds: &[ReportKind], ctx: &ReportContext) -> QcResult<()> {
    for kind in kinds {
        run_report(*kind, ctx).await?;
    }
    Ok(())
}
