use snafu::ResultExt;

use core_db::SqlParam;
use core_report::{DelimitedReport, Field, HtmlReport, ReportLine, passthrough};

use crate::error::{self as qc_error, QcResult};
use crate::reports::links::AlleleLinks;
use crate::runner::ReportContext;

/// Duplicate alleles the targeted allele loads may have created.
pub(crate) const FILE_NAME: &str = "duplicatedAllele.rpt";
pub(crate) const HTML_FILE_NAME: &str = "duplicatedAllele.html";

const TITLE: &str = "Duplicated Alleles";

const HEADERS: [&str; 2] = ["Allele symbol", "Allele key"];

/// User key the targeted allele load writes records under.
const TAL_LOAD_USER_KEY: i64 = 1466;

const QUERY: &str = "select a._allele_key, a.symbol \
     from all_allele a \
     where a._createdby_key = $1 \
     and exists (select 1 from all_allele a2 \
     where a2._allele_key != a._allele_key \
     and a2.symbol = a.symbol) \
     order by a.symbol";

pub(crate) async fn run(ctx: &ReportContext) -> QcResult<()> {
    let results = ctx
        .executor
        .fetch(QUERY, &[SqlParam::Int(TAL_LOAD_USER_KEY)])
        .await
        .context(qc_error::QuerySnafu)?;

    let links = match &ctx.links {
        Some(config) => Some(AlleleLinks::from_config(config)?),
        None => None,
    };
    let lines = passthrough(&results.rows, |row| {
        let symbol = row.field("symbol")?.to_string();
        let key = row.field("_allele_key")?.to_string();
        let symbol_field = links.as_ref().map_or_else(
            || Field::symbol(&symbol),
            |links| Field::link(&symbol, links.allele_url(&key)),
        );
        Ok(ReportLine::new(vec![symbol_field, Field::text(key)]))
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
        "wrote duplicated allele report"
    );
    Ok(())
}
