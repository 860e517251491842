use snafu::ResultExt;
use std::fs;
use std::path::Path;

use crate::error::{self as report_error, ReportResult};
use crate::models::{Field, ReportLine};

/// Escape text destined for an HTML table cell or attribute.
#[must_use]
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Render an allele symbol for display. A balanced `<...>` span carries
/// the superscript part of the symbol and becomes a `<sup>` element with
/// its content escaped; unbalanced markers escape literally.
#[must_use]
pub fn render_symbol(symbol: &str) -> String {
    let mut out = String::with_capacity(symbol.len());
    let mut rest = symbol;
    while let Some(open) = rest.find('<') {
        let (head, tail) = rest.split_at(open);
        out.push_str(&escape(head));
        match tail[1..].find('>') {
            Some(close) if !tail[1..=close].contains('<') => {
                out.push_str("<sup>");
                out.push_str(&escape(&tail[1..=close]));
                out.push_str("</sup>");
                rest = &tail[close + 2..];
            }
            _ => {
                out.push_str("&lt;");
                rest = &tail[1..];
            }
        }
    }
    out.push_str(&escape(rest));
    out
}

fn render_field(field: &Field) -> String {
    match field {
        Field::Text(text) => escape(text),
        Field::Symbol(symbol) => render_symbol(symbol),
        Field::Link { label, url } => {
            format!("<a href=\"{}\">{}</a>", escape(url), render_symbol(label))
        }
    }
}

/// HTML sibling of a delimited report: a minimal table document with
/// header cells, one row per report line, and closing markup.
pub struct HtmlReport<'a> {
    title: &'a str,
    headers: &'a [&'a str],
    lines: &'a [ReportLine],
}

impl<'a> HtmlReport<'a> {
    #[must_use]
    pub const fn new(title: &'a str, headers: &'a [&'a str], lines: &'a [ReportLine]) -> Self {
        Self {
            title,
            headers,
            lines,
        }
    }

    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str("<html>\n<head>\n<title>");
        out.push_str(&escape(self.title));
        out.push_str("</title>\n</head>\n<body>\n<table border=\"1\">\n<tr>");
        for header in self.headers {
            out.push_str("<th>");
            out.push_str(&escape(header));
            out.push_str("</th>");
        }
        out.push_str("</tr>\n");
        for line in self.lines {
            out.push_str("<tr>");
            for field in line.fields() {
                out.push_str("<td>");
                out.push_str(&render_field(field));
                out.push_str("</td>");
            }
            out.push_str("</tr>\n");
        }
        out.push_str("</table>\n</body>\n</html>\n");
        out
    }

    pub fn write_to(&self, path: &Path) -> ReportResult<()> {
        let rendered = self.render();
        tracing::debug!(path = %path.display(), bytes = rendered.len(), "writing html report");
        fs::write(path, rendered).context(report_error::OutputWriteSnafu {
            path: path.display().to_string(),
        })
    }
}
