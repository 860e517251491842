use snafu::ResultExt;

use core_db::SqlParam;
use core_report::{DelimitedReport, Field, ReportLine, passthrough};

use crate::error::{self as qc_error, QcResult};
use crate::runner::ReportContext;

/// Approved alleles whose association points at the sentinel 'Orphaned'
/// cell line.
pub(crate) const FILE_NAME: &str = "Orphaned_ApprovedAlleles.rpt";

const HEADERS: [&str; 2] = ["Allele MGI ID", "Allele Symbol"];

/// Vocabulary key of the Approved allele status.
const APPROVED_STATUS_KEY: i64 = 847_114;
/// Accession MGI type key for alleles.
const ALLELE_MGITYPE_KEY: i64 = 11;
/// Logical DB of MGI accession IDs themselves.
const MGI_LOGICALDB_KEY: i64 = 1;

const QUERY: &str = "select a.accid, aa.symbol \
     from all_allele aa, all_allele_cellline aac, all_cellline c, acc_accession a \
     where c.cellline = 'Orphaned' \
     and c._cellline_key = aac._mutantcellline_key \
     and aac._allele_key = aa._allele_key \
     and aa._allele_status_key = $1 \
     and aa._allele_key = a._object_key \
     and a._mgitype_key = $2 \
     and a._logicaldb_key = $3 \
     and a.prefixpart = 'MGI:' \
     and a.preferred = 1 \
     order by aa.symbol";

pub(crate) async fn run(ctx: &ReportContext) -> QcResult<()> {
    let results = ctx
        .executor
        .fetch(
            QUERY,
            &[
                SqlParam::Int(APPROVED_STATUS_KEY),
                SqlParam::Int(ALLELE_MGITYPE_KEY),
                SqlParam::Int(MGI_LOGICALDB_KEY),
            ],
        )
        .await
        .context(qc_error::QuerySnafu)?;

    let lines = passthrough(&results.rows, |row| {
        Ok(ReportLine::new(vec![
            Field::from(row.field("accid")?),
            Field::symbol(row.field("symbol")?.to_string()),
        ]))
    })
    .context(qc_error::QuerySnafu)?;

    let path = ctx.rpt_dir.join(FILE_NAME);
    DelimitedReport::new(&HEADERS, &lines)
        .write_to(&path)
        .context(qc_error::ReportSnafu)?;
    tracing::info!(
        rows = results.len(),
        lines = lines.len(),
        path = %path.display(),
        "wrote orphaned approved allele report"
    );
    Ok(())
}
