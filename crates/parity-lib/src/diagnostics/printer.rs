//! Rendering of the problems found in one artifact.
//!
//! With the artifact's source, every diagnostic becomes an annotated snippet
//! and a closing line counts errors and warnings per file. Without it, each
//! diagnostic is one line of its `Display` form.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};
use rowan::TextRange;

use super::Diagnostics;
use super::message::{DiagnosticMessage, Severity};

pub struct DiagnosticsPrinter<'a> {
    diagnostics: &'a Diagnostics,
    source: Option<&'a str>,
    path: Option<&'a str>,
    colored: bool,
}

impl<'a> DiagnosticsPrinter<'a> {
    pub fn new(diagnostics: &'a Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    pub fn source(self, source: &'a str) -> Self {
        Self {
            source: Some(source),
            ..self
        }
    }

    /// File name shown in snippets, line output and the count line.
    pub fn path(self, path: &'a str) -> Self {
        Self {
            path: Some(path),
            ..self
        }
    }

    pub fn colored(self, colored: bool) -> Self {
        Self { colored, ..self }
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> fmt::Result {
        if self.diagnostics.is_empty() {
            return Ok(());
        }
        match self.source {
            Some(source) => self.format_snippets(source, w),
            None => self.format_lines(w),
        }
    }

    fn format_lines(&self, w: &mut impl Write) -> fmt::Result {
        for (i, diag) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            if let Some(path) = self.path {
                write!(w, "{path}: ")?;
            }
            write!(w, "{diag}")?;
        }
        Ok(())
    }

    fn format_snippets(&self, source: &str, w: &mut impl Write) -> fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };
        for diag in self.diagnostics.iter() {
            let report = [snippet_group(diag, source, self.path)];
            writeln!(w, "{}\n", renderer.render(&report))?;
        }
        writeln!(w, "{}", self.count_line())
    }

    /// `queries/highlights.scm: 1 error, 2 warnings`
    fn count_line(&self) -> String {
        let counts = [
            (self.diagnostics.count(Severity::Error), "error"),
            (self.diagnostics.count(Severity::Warning), "warning"),
        ]
        .into_iter()
        .filter(|(n, _)| *n > 0)
        .map(|(n, noun)| match n {
            1 => format!("1 {noun}"),
            n => format!("{n} {noun}s"),
        })
        .collect::<Vec<_>>()
        .join(", ");
        match self.path {
            Some(path) => format!("{path}: {counts}"),
            None => counts,
        }
    }
}

fn snippet_group<'s>(diag: &'s DiagnosticMessage, source: &'s str, path: Option<&'s str>) -> Group<'s> {
    let mut snippet = Snippet::source(source)
        .line_start(1)
        .annotation(AnnotationKind::Primary.span(span(diag.range, source.len())));
    if let Some(path) = path {
        snippet = snippet.path(path);
    }
    for related in &diag.related {
        snippet = snippet.annotation(
            AnnotationKind::Context
                .span(span(related.range, source.len()))
                .label(&related.message),
        );
    }
    let level = match diag.severity() {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    };
    level.primary_title(&diag.message).element(snippet)
}

/// An empty range still marks one character, except at the end of input.
fn span(range: TextRange, len: usize) -> Range<usize> {
    let range = Range::<usize>::from(range);
    if range.is_empty() {
        range.start..(range.start + 1).min(len)
    } else {
        range
    }
}
