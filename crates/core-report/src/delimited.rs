use snafu::ResultExt;
use std::fs;
use std::path::Path;

use crate::error::{self as report_error, ReportResult};
use crate::models::ReportLine;

/// Column delimiter of the `.rpt` files.
const COLUMN_DELIMITER: &str = "\t";
/// Record delimiter.
const RECORD_DELIMITER: char = '\n';

/// Tab-delimited artifact: a header line followed by one record per
/// line, newline-terminated.
pub struct DelimitedReport<'a> {
    headers: &'a [&'a str],
    lines: &'a [ReportLine],
}

impl<'a> DelimitedReport<'a> {
    #[must_use]
    pub const fn new(headers: &'a [&'a str], lines: &'a [ReportLine]) -> Self {
        Self { headers, lines }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(&self.headers.join(COLUMN_DELIMITER));
        out.push(RECORD_DELIMITER);
        for line in self.lines {
            let record: Vec<&str> = line.labels().collect();
            out.push_str(&record.join(COLUMN_DELIMITER));
            out.push(RECORD_DELIMITER);
        }
        out
    }

    pub fn write_to(&self, path: &Path) -> ReportResult<()> {
        let rendered = self.render();
        tracing::debug!(path = %path.display(), bytes = rendered.len(), "writing delimited report");
        fs::write(path, rendered).context(report_error::OutputWriteSnafu {
            path: path.display().to_string(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Field;

    const HEADERS: [&str; 2] = ["Allele symbol", "Allele key"];

    fn lines() -> Vec<ReportLine> {
        vec![
            ReportLine::new(vec![Field::symbol("Akt1<tm1>"), Field::text("11")]),
            ReportLine::new(vec![Field::symbol("Cdk5<tm2>"), Field::text("12")]),
        ]
    }

    #[test]
    fn renders_header_and_one_record_per_line() {
        let lines = lines();
        let rendered = DelimitedReport::new(&HEADERS, &lines).render();
        assert_eq!(
            rendered,
            "Allele symbol\tAllele key\nAkt1<tm1>\t11\nCdk5<tm2>\t12\n"
        );
    }

    #[test]
    fn round_trips_field_values_column_exact() {
        let lines = lines();
        let rendered = DelimitedReport::new(&HEADERS, &lines).render();

        let parsed: Vec<Vec<&str>> = rendered
            .lines()
            .skip(1)
            .map(|line| line.split('\t').collect())
            .collect();
        assert_eq!(
            parsed,
            [vec!["Akt1<tm1>", "11"], vec!["Cdk5<tm2>", "12"]]
        );
    }

    #[test]
    fn write_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("duplicatedAllele.rpt");
        let lines = lines();
        let report = DelimitedReport::new(&HEADERS, &lines);

        report.write_to(&path).unwrap();
        let first = fs::read(&path).unwrap();
        report.write_to(&path).unwrap();
        let second = fs::read(&path).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn write_failure_names_the_path() {
        let lines = lines();
        let report = DelimitedReport::new(&HEADERS, &lines);
        let err = report
            .write_to(Path::new("/nonexistent-rptdir/out.rpt"))
            .unwrap_err();
        assert!(
            err.to_string()
                .starts_with("Could not open file for writing /nonexistent-rptdir/out.rpt")
        );
    }
}
