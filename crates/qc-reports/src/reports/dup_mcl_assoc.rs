use snafu::ResultExt;

use core_db::Row;
use core_report::{DelimitedReport, Field, GroupKey, ReportLine, group_rows, qualifying_groups};

use crate::error::{self as qc_error, QcResult};
use crate::runner::ReportContext;

/// Alleles with duplicate associations to the same mutant cell line.
pub(crate) const FILE_NAME: &str = "Dupe_MCL_assoc.rpt";

const HEADERS: [&str; 7] = [
    "cellline",
    "mutantcellline_key",
    "dup_count",
    "allele_key",
    "symbol",
    "assoc_creationdate",
    "assoc_createdby",
];

/// Associations duplicated on (allele, MCL) land in a temporary table
/// the main query joins back against.
const SETUP_SQL: [&str; 3] = [
    "select _allele_key, _mutantcellline_key \
     into temporary table dups \
     from all_allele_cellline \
     group by _allele_key, _mutantcellline_key \
     having count(*) > 1",
    "create index dups_idx1 on dups(_allele_key)",
    "create index dups_idx2 on dups(_mutantcellline_key)",
];

const QUERY: &str = "select aa.symbol, aa._allele_key, c.cellline, c._cellline_key, \
     aac.creation_date, u.login \
     from all_allele_cellline aac, dups d, all_allele aa, all_cellline c, mgi_user u \
     where aac._mutantcellline_key = d._mutantcellline_key \
     and aac._allele_key = d._allele_key \
     and aac._allele_key = aa._allele_key \
     and aac._mutantcellline_key = c._cellline_key \
     and aac._createdby_key = u._user_key \
     order by aa.symbol";

fn key_part(row: &Row, name: &str) -> String {
    row.get(name).map(ToString::to_string).unwrap_or_default()
}

fn group_key(row: &Row) -> GroupKey {
    vec![key_part(row, "symbol"), key_part(row, "cellline")]
}

pub(crate) async fn run(ctx: &ReportContext) -> QcResult<()> {
    for sql in SETUP_SQL {
        ctx.executor
            .execute(sql)
            .await
            .context(qc_error::QuerySnafu)?;
    }
    let results = ctx
        .executor
        .fetch(QUERY, &[])
        .await
        .context(qc_error::QuerySnafu)?;

    let groups = group_rows(&results.rows, group_key);
    let dups = qualifying_groups(groups, 2);

    let mut lines = Vec::new();
    for group in &dups {
        for row in &group.members {
            let line = ReportLine::new(vec![
                Field::from(row.field("cellline").context(qc_error::QuerySnafu)?),
                Field::from(row.field("_cellline_key").context(qc_error::QuerySnafu)?),
                Field::text(group.cardinality.to_string()),
                Field::from(row.field("_allele_key").context(qc_error::QuerySnafu)?),
                Field::symbol(
                    row.field("symbol")
                        .context(qc_error::QuerySnafu)?
                        .to_string(),
                ),
                Field::from(row.field("creation_date").context(qc_error::QuerySnafu)?),
                Field::from(row.field("login").context(qc_error::QuerySnafu)?),
            ]);
            lines.push(line);
        }
    }

    let path = ctx.rpt_dir.join(FILE_NAME);
    DelimitedReport::new(&HEADERS, &lines)
        .write_to(&path)
        .context(qc_error::ReportSnafu)?;
    tracing::info!(
        rows = results.len(),
        dup_groups = dups.len(),
        lines = lines.len(),
        path = %path.display(),
        "wrote duplicate MCL association report"
    );
    Ok(())
}
