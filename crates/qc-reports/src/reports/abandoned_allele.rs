use snafu::{OptionExt, ResultExt};

use core_db::SqlParam;
use core_report::{DelimitedReport, Field, HtmlReport, ReportLine, passthrough};

use crate::error::{self as qc_error, QcResult};
use crate::reports::links::AlleleLinks;
use crate::runner::ReportContext;

/// Alleles a targeted allele load created and left with zero mutant
/// cell lines, suspected incomplete.
pub(crate) const FILE_NAME: &str = "AbandonedAllele.rpt";
pub(crate) const HTML_FILE_NAME: &str = "AbandonedAllele.html";

const TITLE: &str = "Abandoned Alleles";

const HEADERS: [&str; 5] = [
    "Allele symbol",
    "Allele key",
    "Creation date",
    "Modification date",
    "Project ID",
];

/// Accession MGI type key for alleles.
const ALLELE_MGITYPE_KEY: i64 = 11;

const QUERY: &str = "select a._allele_key, a.symbol, a.creation_date, a.modification_date, acc.accid \
     from acc_accession acc, all_allele a \
     where acc._logicaldb_key = $1 \
     and acc._mgitype_key = $2 \
     and acc._object_key = a._allele_key \
     and not exists (select 1 \
     from all_allele_cellline ac \
     where ac._allele_key = a._allele_key) \
     order by a.symbol";

pub(crate) async fn run(ctx: &ReportContext) -> QcResult<()> {
    let logical_db = ctx
        .project_logical_db
        .context(qc_error::MissingLogicalDbSnafu)?;

    let results = ctx
        .executor
        .fetch(
            QUERY,
            &[
                SqlParam::Int(logical_db),
                SqlParam::Int(ALLELE_MGITYPE_KEY),
            ],
        )
        .await
        .context(qc_error::QuerySnafu)?;

    let links = match &ctx.links {
        Some(config) => Some(AlleleLinks::from_config(config)?),
        None => None,
    };
    let lines = passthrough(&results.rows, |row| {
        let accid = row.field("accid")?.to_string();
        let project_field = links.as_ref().map_or_else(
            || Field::text(&accid),
            |links| Field::link(&accid, links.accession_url(&accid)),
        );
        Ok(ReportLine::new(vec![
            Field::symbol(row.field("symbol")?.to_string()),
            Field::from(row.field("_allele_key")?),
            Field::from(row.field("creation_date")?),
            Field::from(row.field("modification_date")?),
            project_field,
        ]))
    })
    .context(qc_error::QuerySnafu)?;

    let path = ctx.rpt_dir.join(FILE_NAME);
    DelimitedReport::new(&HEADERS, &lines)
        .write_to(&path)
        .context(qc_error::ReportSnafu)?;

    let html_path = ctx.rpt_dir.join(HTML_FILE_NAME);
    HtmlReport::new(TITLE, &HEADERS, &lines)
        .write_to(&html_path)
        .context(qc_error::ReportSnafu)?;

    tracing::info!(
        rows = results.len(),
        lines = lines.len(),
        path = %path.display(),
        "wrote abandoned allele report"
    );
    Ok(())
}
