//! Verification sessions: categories of checks evaluated over one snapshot.
//!
//! A session never stops at the first unmet expectation. Every check of every
//! category produces an [`Outcome`], and the [`Report`] passes only when all
//! of them do.

use std::fmt::{self, Write};

use parity_core::colors::Colors;
use parity_core::utils::suggest;
use serde::{Deserialize, Serialize};

use crate::artifacts::{ArtifactRole, Artifacts};
use crate::predicates;

/// Hints list at most this many sibling names.
const MAX_HINT_NAMES: usize = 5;

/// A single expectation about the artifacts.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Check {
    /// The reference grammar declares this exact scope.
    Scope { scope: String },
    /// The structural grammar declares this rule.
    Rule { rule: String },
    /// Some highlight pattern captures `node` as `@capture`.
    Capture { node: String, capture: String },
    /// Some highlight pattern restricts `@capture` with `(#predicate @capture "argument")`.
    Predicate {
        capture: String,
        predicate: String,
        argument: String,
    },
    /// The text predicates on `@capture` admit `text`.
    Accepts { capture: String, text: String },
    /// The raw artifact text contains `text`.
    Contains { artifact: ArtifactRole, text: String },
}

impl Check {
    /// Name of the predicate this check evaluates.
    pub fn predicate_name(&self) -> &'static str {
        match self {
            Check::Scope { .. } => "has_scope",
            Check::Rule { .. } => "has_rule",
            Check::Capture { .. } => "has_capture",
            Check::Predicate { .. } => "has_predicate",
            Check::Accepts { .. } => "capture_accepts",
            Check::Contains { .. } => "contains",
        }
    }

    pub fn evaluate(&self, artifacts: &Artifacts) -> bool {
        match self {
            Check::Scope { scope } => predicates::has_scope(&artifacts.reference, scope),
            Check::Rule { rule } => predicates::has_rule(&artifacts.grammar.grammar, rule),
            Check::Capture { node, capture } => {
                predicates::has_capture(&artifacts.highlights, node, capture)
            }
            Check::Predicate {
                capture,
                predicate,
                argument,
            } => predicates::has_predicate(&artifacts.highlights, capture, predicate, argument),
            Check::Accepts { capture, text } => {
                predicates::capture_accepts(&artifacts.highlights, capture, text)
            }
            Check::Contains { artifact, text } => {
                predicates::contains(artifacts.source(*artifact), text)
            }
        }
    }

    /// Near-miss explanation for a failed check.
    fn hint(&self, artifacts: &Artifacts) -> Option<String> {
        match self {
            Check::Scope { scope } => scope_hint(artifacts, scope),
            Check::Rule { rule } => rule_hint(artifacts, rule),
            Check::Capture { node, capture } => {
                capture_hint(artifacts, node, capture.trim_start_matches('@'))
            }
            Check::Predicate { capture, .. } | Check::Accepts { capture, .. } => {
                capture_name_hint(artifacts, capture.trim_start_matches('@'))
            }
            Check::Contains { .. } => None,
        }
    }
}

impl fmt::Display for Check {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.predicate_name();
        match self {
            Check::Scope { scope } => write!(f, "{name} {scope:?}"),
            Check::Rule { rule } => write!(f, "{name} {rule:?}"),
            Check::Capture { node, capture } => {
                write!(f, "{name} ({node}) @{}", capture.trim_start_matches('@'))
            }
            Check::Predicate {
                capture,
                predicate,
                argument,
            } => write!(
                f,
                "{name} (#{} @{} {argument:?})",
                predicate.trim_start_matches('#'),
                capture.trim_start_matches('@')
            ),
            Check::Accepts { capture, text } => {
                write!(f, "{name} @{} {text:?}", capture.trim_start_matches('@'))
            }
            Check::Contains { artifact, text } => {
                write!(f, "{name} {} {text:?}", artifact.as_str())
            }
        }
    }
}

fn scope_hint(artifacts: &Artifacts, scope: &str) -> Option<String> {
    let reference = &artifacts.reference;
    let scopes = reference.scopes();
    if let Some(close) = suggest(scope, scopes.iter().copied()) {
        return Some(format!("did you mean `{close}`?"));
    }
    let parent = scope.rsplit_once('.').map(|(parent, _)| parent)?;
    let siblings = reference.scopes_with_prefix(parent);
    if siblings.is_empty() {
        return None;
    }
    Some(format!("declared under `{parent}`: {}", name_list(&siblings)))
}

fn rule_hint(artifacts: &Artifacts, rule: &str) -> Option<String> {
    let grammar = &artifacts.grammar.grammar;
    if grammar.is_referenced(rule) {
        return Some(format!("`$.{rule}` is referenced but never declared"));
    }
    suggest(rule, grammar.rule_names()).map(|close| format!("did you mean `{close}`?"))
}

fn capture_hint(artifacts: &Artifacts, node: &str, capture: &str) -> Option<String> {
    let queries = &artifacts.highlights;
    let on_node: Vec<&str> = queries
        .captures_of(node)
        .map(|c| c.capture.as_str())
        .collect();
    if !on_node.is_empty() {
        let names: Vec<String> = on_node.iter().map(|c| format!("@{c}")).collect();
        let names: Vec<&str> = names.iter().map(String::as_str).collect();
        return Some(format!("`({node})` is captured as {}", name_list(&names)));
    }
    if let Some(close) = suggest(node, queries.captured_node_types()) {
        return Some(format!("did you mean `({close}) @{capture}`?"));
    }
    Some(format!("no pattern captures `({node})`"))
}

fn capture_name_hint(artifacts: &Artifacts, capture: &str) -> Option<String> {
    let names = artifacts.highlights.capture_names();
    if names.contains(&capture) {
        return None;
    }
    match suggest(capture, names) {
        Some(close) => Some(format!("no pattern captures `@{capture}`; did you mean `@{close}`?")),
        None => Some(format!("no pattern captures `@{capture}`")),
    }
}

fn name_list(names: &[&str]) -> String {
    let mut out = names
        .iter()
        .take(MAX_HINT_NAMES)
        .copied()
        .collect::<Vec<_>>()
        .join(", ");
    if names.len() > MAX_HINT_NAMES {
        write!(out, ", and {} more", names.len() - MAX_HINT_NAMES).expect("String write never fails");
    }
    out
}

/// A named group of checks (e.g. "keywords").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub checks: Vec<Check>,
}

impl Category {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            checks: Vec::new(),
        }
    }

    pub fn check(mut self, check: Check) -> Self {
        self.checks.push(check);
        self
    }
}

/// Result of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Outcome {
    pub category: String,
    pub check: Check,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Outcomes of a whole session, in category then check order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub outcomes: Vec<Outcome>,
}

impl Report {
    /// True iff every outcome passed. A report without outcomes passes.
    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.passed)
    }

    pub fn failures(&self) -> impl Iterator<Item = &Outcome> {
        self.outcomes.iter().filter(|o| !o.passed)
    }

    pub fn passed_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.passed).count()
    }

    pub fn failed_count(&self) -> usize {
        self.failures().count()
    }

    /// Human-readable report, one line per check grouped by category.
    pub fn render_text(&self, colored: bool) -> String {
        let mut out = String::new();
        self.format_text(Colors::new(colored), &mut out)
            .expect("String write never fails");
        out
    }

    fn format_text(&self, c: Colors, w: &mut impl Write) -> fmt::Result {
        let mut current: Option<&str> = None;
        for outcome in &self.outcomes {
            if current != Some(outcome.category.as_str()) {
                writeln!(w, "{}{}{}", c.blue, outcome.category, c.reset)?;
                current = Some(outcome.category.as_str());
            }
            if outcome.passed {
                writeln!(w, "  {}pass{}  {}", c.green, c.reset, outcome.check)?;
            } else {
                writeln!(w, "  {}FAIL{}  {}", c.red, c.reset, outcome.check)?;
            }
            if let Some(hint) = &outcome.hint {
                writeln!(w, "        {}hint: {}{}", c.dim, hint, c.reset)?;
            }
        }
        let failed = self.failed_count();
        let color = if failed == 0 { c.green } else { c.red };
        write!(
            w,
            "{}{} passed, {} failed{}",
            color,
            self.passed_count(),
            failed,
            c.reset
        )
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Evaluates categories of checks over one snapshot of the artifacts.
#[derive(Debug, Clone, Copy)]
pub struct Session<'a> {
    artifacts: &'a Artifacts,
}

impl<'a> Session<'a> {
    pub fn new(artifacts: &'a Artifacts) -> Self {
        Self { artifacts }
    }

    pub fn run(&self, categories: &[Category]) -> Report {
        let outcomes: Vec<Outcome> = categories
            .iter()
            .flat_map(|category| {
                category
                    .checks
                    .iter()
                    .map(move |check| self.evaluate(&category.name, check))
            })
            .collect();
        let report = Report { outcomes };
        tracing::info!(
            categories = categories.len(),
            passed = report.passed_count(),
            failed = report.failed_count(),
            "parity session finished"
        );
        report
    }

    pub fn evaluate(&self, category: &str, check: &Check) -> Outcome {
        let passed = check.evaluate(self.artifacts);
        tracing::debug!(category, %check, passed, "evaluated check");
        Outcome {
            category: category.to_string(),
            check: check.clone(),
            passed,
            hint: if passed {
                None
            } else {
                check.hint(self.artifacts)
            },
        }
    }
}
