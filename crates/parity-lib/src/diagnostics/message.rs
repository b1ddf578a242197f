use rowan::TextRange;

/// Diagnostic kinds, grouped by the artifact they are reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    // Highlight query syntax
    UnclosedTree,
    UnclosedAlternation,
    UnclosedString,
    EmptyTree,
    ExpectedNodeType,
    ExpectedFieldValue,
    CaptureWithoutTarget,
    UnexpectedToken,
    InvalidPredicateRegex,

    // grammar.js declarations
    MissingRulesObject,
    DuplicateRule,
    UnbalancedDelimiter,
}

impl DiagnosticKind {
    /// Default severity for this kind.
    ///
    /// Query syntax problems are errors in that document; everything that
    /// still leaves a usable declaration set is a warning.
    pub fn default_severity(&self) -> Severity {
        match self {
            Self::InvalidPredicateRegex
            | Self::MissingRulesObject
            | Self::DuplicateRule
            | Self::UnbalancedDelimiter => Severity::Warning,
            _ => Severity::Error,
        }
    }

    pub fn fallback_message(&self) -> &'static str {
        match self {
            Self::UnclosedTree => "missing closing `)`",
            Self::UnclosedAlternation => "missing closing `]`",
            Self::UnclosedString => "unterminated string literal",
            Self::EmptyTree => "empty `()` is not allowed",
            Self::ExpectedNodeType => "expected a node type",
            Self::ExpectedFieldValue => "expected a pattern after the field name",
            Self::CaptureWithoutTarget => "capture has no pattern to attach to",
            Self::UnexpectedToken => "unexpected token",
            Self::InvalidPredicateRegex => "predicate regex does not compile",
            Self::MissingRulesObject => "no `rules` object found",
            Self::DuplicateRule => "rule is declared more than once",
            Self::UnbalancedDelimiter => "unbalanced delimiter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Error,
    Warning,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelatedInfo {
    pub(crate) range: TextRange,
    pub(crate) message: String,
}

impl RelatedInfo {
    pub fn new(range: TextRange, message: impl Into<String>) -> Self {
        Self {
            range,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosticMessage {
    pub(crate) kind: DiagnosticKind,
    /// The range shown to the user (underlined in output).
    pub(crate) range: TextRange,
    pub(crate) message: String,
    pub(crate) related: Vec<RelatedInfo>,
}

impl DiagnosticMessage {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange, message: impl Into<String>) -> Self {
        Self {
            kind,
            range,
            message: message.into(),
            related: Vec::new(),
        }
    }

    pub fn kind(&self) -> DiagnosticKind {
        self.kind
    }

    pub fn range(&self) -> TextRange {
        self.range
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn severity(&self) -> Severity {
        self.kind.default_severity()
    }
}

impl std::fmt::Display for DiagnosticMessage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} at {}..{}: {}",
            self.severity(),
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            self.message
        )?;
        for related in &self.related {
            write!(
                f,
                " (related: {} at {}..{})",
                related.message,
                u32::from(related.range.start()),
                u32::from(related.range.end())
            )?;
        }
        Ok(())
    }
}
