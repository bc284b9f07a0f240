// Copyright (c) The nextest Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Rendering a report as delimited text.
//!
//! Values are never quoted. Instead, every value is sanitized so that a rendered row always splits
//! back into exactly as many fields as the header has.

use super::{DefectAgeReport, ReportKind, ReportRows};
use itertools::Itertools;
use swrite::{SWrite, swriteln};

/// How rows are delimited.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DelimitedFormat {
    delimiter: char,
    substitute: char,
}

impl DelimitedFormat {
    /// Creates a new format.
    ///
    /// Occurrences of `delimiter` inside values are replaced with `substitute`. Both characters
    /// are expected to be validated by the caller: neither may be a line break, and they must
    /// differ.
    pub fn new(delimiter: char, substitute: char) -> Self {
        Self {
            delimiter,
            substitute,
        }
    }

    /// Returns the field delimiter.
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    /// Returns the character that replaces the delimiter inside values.
    pub fn substitute(&self) -> char {
        self.substitute
    }

    /// Renders `report` as a header row followed by one line per data row.
    pub fn render(&self, report: &DefectAgeReport) -> String {
        let mut out = String::new();
        self.write_row(&mut out, report_header(report.kind()));

        match report.rows() {
            ReportRows::Defects(rows) => {
                for row in rows {
                    self.write_row(
                        &mut out,
                        [
                            ReportField::Text(&row.class_name),
                            ReportField::Text(&row.test_name),
                            ReportField::Count(row.age.get()),
                            ReportField::Text(row.error_message.as_deref().unwrap_or_default()),
                            ReportField::Trace(row.short_trace.as_deref().unwrap_or_default()),
                        ],
                    );
                }
            }
            ReportRows::Summary(rows) => {
                for row in rows {
                    self.write_row(
                        &mut out,
                        [
                            ReportField::Text(&row.class_name),
                            ReportField::Text(&row.test_name),
                            ReportField::Count(row.defect_count),
                            ReportField::Count(row.total_runs),
                            ReportField::Count(row.defect_age()),
                        ],
                    );
                }
            }
        }

        out
    }

    fn write_row<'a>(&self, out: &mut String, fields: impl IntoIterator<Item = ReportField<'a>>) {
        let line = fields
            .into_iter()
            .map(|field| self.sanitize(field))
            .join(self.delimiter.encode_utf8(&mut [0; 4]));
        swriteln!(out, "{line}");
    }

    /// Sanitizes a single value so it can be written without quoting.
    ///
    /// The delimiter is replaced with the substitute and every run of CR/LF characters collapses
    /// to a single space. Traces are cut at their first line break first.
    fn sanitize(&self, field: ReportField<'_>) -> String {
        let text = match field {
            ReportField::Text(text) => text,
            ReportField::Trace(trace) => trace.lines().next().unwrap_or_default(),
            ReportField::Count(count) => return count.to_string(),
        };

        let mut out = String::with_capacity(text.len());
        let mut in_line_break = false;
        for c in text.chars() {
            if c == '\r' || c == '\n' {
                if !in_line_break {
                    out.push(' ');
                }
                in_line_break = true;
                continue;
            }
            in_line_break = false;
            out.push(if c == self.delimiter {
                self.substitute
            } else {
                c
            });
        }
        out
    }
}

impl Default for DelimitedFormat {
    fn default() -> Self {
        Self::new(',', ';')
    }
}

#[derive(Clone, Copy, Debug)]
enum ReportField<'a> {
    Text(&'a str),
    Trace(&'a str),
    Count(usize),
}

fn report_header(kind: ReportKind) -> impl Iterator<Item = ReportField<'static>> {
    kind.header().iter().map(|name| ReportField::Text(*name))
}
