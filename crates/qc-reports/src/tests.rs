#![allow(clippy::unwrap_used)]

use std::fs;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use mockall::mock;

use core_config::RemoteConfig;
use core_db::{DbResult, QueryExecutor, ResultSet, Row, SqlParam, Value};

use crate::error::QcError;
use crate::reports::{abandoned_allele, dup_allele, dup_mcl_assoc, orphaned_approved};
use crate::runner::{ReportContext, ReportKind, run_report, run_reports};

mock! {
    pub Executor {}

    #[async_trait]
    impl QueryExecutor for Executor {
        async fn fetch(&self, sql: &str, params: &[SqlParam]) -> DbResult<ResultSet>;
        async fn execute(&self, sql: &str) -> DbResult<u64>;
        async fn close(&self);
    }
}

fn timestamp(y: i32, m: u32, d: u32) -> Value {
    Value::DateTime(
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap(),
    )
}

fn assoc_row(symbol: &str, allele_key: i64, cellline: &str, cellline_key: i64) -> Row {
    Row::from_pairs([
        ("symbol", Value::from(symbol)),
        ("_allele_key", Value::Int(allele_key)),
        ("cellline", Value::from(cellline)),
        ("_cellline_key", Value::Int(cellline_key)),
        ("creation_date", timestamp(2013, 10, 31)),
        ("login", Value::from("tal_load")),
    ])
}

fn allele_row(symbol: &str, allele_key: i64) -> Row {
    Row::from_pairs([
        ("_allele_key", Value::Int(allele_key)),
        ("symbol", Value::from(symbol)),
    ])
}

fn abandoned_row(symbol: &str, allele_key: i64, accid: &str) -> Row {
    Row::from_pairs([
        ("_allele_key", Value::Int(allele_key)),
        ("symbol", Value::from(symbol)),
        ("creation_date", timestamp(2014, 3, 2)),
        ("modification_date", timestamp(2014, 3, 5)),
        ("accid", Value::from(accid)),
    ])
}

fn result_set(rows: Vec<Row>) -> ResultSet {
    let columns: Vec<String> = rows
        .first()
        .map(|row| row.names().map(ToString::to_string).collect())
        .unwrap_or_default();
    let mut set = ResultSet::new(columns);
    for row in rows {
        set.push_row(row);
    }
    set
}

fn context(executor: MockExecutor, rpt_dir: &std::path::Path) -> ReportContext {
    ReportContext::new(Arc::new(executor), rpt_dir.to_path_buf())
}

#[tokio::test]
async fn dup_mcl_assoc_reports_only_duplicated_pairs() {
    let rows = vec![
        assoc_row("A", 11, "X", 201),
        assoc_row("A", 11, "X", 201),
        assoc_row("B", 12, "Y", 202),
    ];
    let mut executor = MockExecutor::new();
    executor.expect_execute().times(3).returning(|_| Ok(0));
    executor
        .expect_fetch()
        .times(1)
        .returning(move |_, _| Ok(result_set(rows.clone())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path());
    run_report(ReportKind::DupMclAssoc, &ctx).await.unwrap();

    let content = fs::read_to_string(dir.path().join(dup_mcl_assoc::FILE_NAME)).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "cellline\tmutantcellline_key\tdup_count\tallele_key\tsymbol\tassoc_creationdate\tassoc_createdby"
    );
    // both members of the duplicated A/X pair, annotated with the true
    // group size; the singleton B/Y pair is excluded
    assert_eq!(lines.len(), 3);
    for line in &lines[1..] {
        assert_eq!(
            *line,
            "X\t201\t2\t11\tA\t2013-10-31 00:00:00\ttal_load"
        );
    }
}

#[tokio::test]
async fn dup_allele_writes_delimited_and_html_siblings() {
    let rows = vec![allele_row("Akt1<tm1>", 11), allele_row("Akt1<tm1>", 13)];
    let mut executor = MockExecutor::new();
    executor
        .expect_fetch()
        .withf(|_, params| params == [SqlParam::Int(1466)].as_slice())
        .times(1)
        .returning(move |_, _| Ok(result_set(rows.clone())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path())
        .with_links(RemoteConfig::parse("WI_URL\thttp://www.informatics.jax.org/\n"));
    run_report(ReportKind::DupAllele, &ctx).await.unwrap();

    let rpt = fs::read_to_string(dir.path().join(dup_allele::FILE_NAME)).unwrap();
    assert_eq!(
        rpt,
        "Allele symbol\tAllele key\nAkt1<tm1>\t11\nAkt1<tm1>\t13\n"
    );

    let html = fs::read_to_string(dir.path().join(dup_allele::HTML_FILE_NAME)).unwrap();
    assert!(html.contains("Akt1<sup>tm1</sup>"));
    assert!(html.contains(
        "<a href=\"http://www.informatics.jax.org/searches/allele.cgi?id=11\">"
    ));
    assert!(html.ends_with("</table>\n</body>\n</html>\n"));
}

#[tokio::test]
async fn dup_allele_degrades_to_plain_cells_without_link_config() {
    let rows = vec![allele_row("Akt1<tm1>", 11)];
    let mut executor = MockExecutor::new();
    executor
        .expect_fetch()
        .times(1)
        .returning(move |_, _| Ok(result_set(rows.clone())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path());
    run_report(ReportKind::DupAllele, &ctx).await.unwrap();

    let html = fs::read_to_string(dir.path().join(dup_allele::HTML_FILE_NAME)).unwrap();
    assert!(html.contains("Akt1<sup>tm1</sup>"));
    assert!(!html.contains("<a href"));
}

#[tokio::test]
async fn orphaned_approved_passes_every_row_through_in_order() {
    let rows = vec![
        Row::from_pairs([
            ("accid", Value::from("MGI:3837958")),
            ("symbol", Value::from("Akt1<tm1>")),
        ]),
        Row::from_pairs([
            ("accid", Value::from("MGI:3837959")),
            ("symbol", Value::from("Cdk5<tm2>")),
        ]),
    ];
    let mut executor = MockExecutor::new();
    executor
        .expect_fetch()
        .times(1)
        .returning(move |_, _| Ok(result_set(rows.clone())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path());
    run_report(ReportKind::OrphanedApprovedAlleles, &ctx)
        .await
        .unwrap();

    let content = fs::read_to_string(dir.path().join(orphaned_approved::FILE_NAME)).unwrap();
    assert_eq!(
        content,
        "Allele MGI ID\tAllele Symbol\nMGI:3837958\tAkt1<tm1>\nMGI:3837959\tCdk5<tm2>\n"
    );
}

#[tokio::test]
async fn abandoned_allele_binds_the_configured_logical_db() {
    let rows = vec![abandoned_row("Akt1<tm1>", 11, "KOMP-CSD-1")];
    let mut executor = MockExecutor::new();
    executor
        .expect_fetch()
        .withf(|_, params| params == [SqlParam::Int(125), SqlParam::Int(11)].as_slice())
        .times(1)
        .returning(move |_, _| Ok(result_set(rows.clone())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path()).with_project_logical_db(125);
    run_report(ReportKind::AbandonedAllele, &ctx).await.unwrap();

    let content = fs::read_to_string(dir.path().join(abandoned_allele::FILE_NAME)).unwrap();
    assert_eq!(
        content,
        "Allele symbol\tAllele key\tCreation date\tModification date\tProject ID\n\
         Akt1<tm1>\t11\t2014-03-02 00:00:00\t2014-03-05 00:00:00\tKOMP-CSD-1\n"
    );
}

#[tokio::test]
async fn abandoned_allele_with_no_matches_emits_header_only() {
    // the query already filters to alleles with zero cell lines, so an
    // empty result set is the "nothing abandoned" case
    let mut executor = MockExecutor::new();
    executor
        .expect_fetch()
        .times(1)
        .returning(|_, _| Ok(result_set(Vec::new())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path()).with_project_logical_db(125);
    run_report(ReportKind::AbandonedAllele, &ctx).await.unwrap();

    let content = fs::read_to_string(dir.path().join(abandoned_allele::FILE_NAME)).unwrap();
    assert_eq!(
        content,
        "Allele symbol\tAllele key\tCreation date\tModification date\tProject ID\n"
    );
}

#[tokio::test]
async fn abandoned_allele_requires_the_logical_db() {
    let executor = MockExecutor::new();
    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path());

    let err = run_report(ReportKind::AbandonedAllele, &ctx)
        .await
        .unwrap_err();
    assert!(matches!(err, QcError::MissingLogicalDb));
}

#[tokio::test]
async fn rerunning_an_unchanged_report_is_byte_identical() {
    let rows = vec![abandoned_row("Akt1<tm1>", 11, "KOMP-CSD-1")];
    let mut executor = MockExecutor::new();
    executor
        .expect_fetch()
        .times(2)
        .returning(move |_, _| Ok(result_set(rows.clone())));

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path()).with_project_logical_db(125);

    run_report(ReportKind::AbandonedAllele, &ctx).await.unwrap();
    let first = fs::read(dir.path().join(abandoned_allele::FILE_NAME)).unwrap();
    run_report(ReportKind::AbandonedAllele, &ctx).await.unwrap();
    let second = fs::read(dir.path().join(abandoned_allele::FILE_NAME)).unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn query_failures_surface_without_retry() {
    let mut executor = MockExecutor::new();
    executor.expect_fetch().times(1).returning(|_, _| {
        Err(core_db::DbError::MissingColumn {
            name: "symbol".to_string(),
        })
    });

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path());
    let err = run_report(ReportKind::DupAllele, &ctx).await.unwrap_err();
    assert!(err.to_string().starts_with("Query failed"));
}

#[tokio::test]
async fn run_reports_stops_at_the_first_failure() {
    // dup-allele fails; orphaned-approved must never be queried
    let mut executor = MockExecutor::new();
    executor.expect_fetch().times(1).returning(|_, _| {
        Err(core_db::DbError::MissingColumn {
            name: "symbol".to_string(),
        })
    });

    let dir = tempfile::tempdir().unwrap();
    let ctx = context(executor, dir.path());
    let outcome = run_reports(
        &[ReportKind::DupAllele, ReportKind::OrphanedApprovedAlleles],
        &ctx,
    )
    .await;
    assert!(outcome.is_err());
}
