use std::fmt;

use rowan::TextRange;

/// What went wrong. Declaration order is priority: when two diagnostics
/// collide, the one declared first is kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DiagnosticKind {
    UnclosedCall,

    ExpectedClause,
    ExpectedArgument,
    ExpectedFieldName,
    ExpectedValue,
    ExpectedArgList,

    UnexpectedToken,
    MissingSeparator,
    UnknownFunction,
    WrongArity,
    IdentifierAsValue,
    ValueAsField,
    StarNotAllowed,
    SortKeyOutsideSort,
    ExpectedFilter,
    MisplacedClause,
    InvalidLimit,

    RepeatedClause,
}

impl DiagnosticKind {
    pub fn severity(self) -> Severity {
        if self == Self::RepeatedClause {
            Severity::Warning
        } else {
            Severity::Error
        }
    }

    pub fn outranks(self, other: Self) -> bool {
        self < other
    }

    /// A missing `)` is usually a symptom of something reported at the same spot.
    pub(crate) fn is_unclosed(self) -> bool {
        self == Self::UnclosedCall
    }

    /// Something required was absent.
    pub(crate) fn is_missing(self) -> bool {
        matches!(
            self,
            Self::ExpectedClause
                | Self::ExpectedArgument
                | Self::ExpectedFieldName
                | Self::ExpectedValue
                | Self::ExpectedArgList
        )
    }

    pub fn hint(self) -> Option<&'static str> {
        Some(match self {
            Self::IdentifierAsValue => "quote it: `'value'`",
            Self::ExpectedArgList => "e.g., `count()`",
            Self::SortKeyOutsideSort => "`+field` and `-field` only work inside `sort(...)`",
            Self::MisplacedClause => {
                "`select`, `facets`, `sort`, `limit` and `count` must be top-level clauses"
            }
            _ => return None,
        })
    }

    pub fn summary(self) -> &'static str {
        use DiagnosticKind::*;
        match self {
            UnclosedCall => "missing closing `)`",
            ExpectedClause => "expected a clause",
            ExpectedArgument => "expected an argument",
            ExpectedFieldName => "expected a field name",
            ExpectedValue => "expected a value",
            ExpectedArgList => "expected `(`",
            UnexpectedToken => "unexpected token",
            MissingSeparator => "missing `,` between arguments",
            UnknownFunction => "unknown function",
            WrongArity => "wrong number of arguments",
            IdentifierAsValue => "identifier is not a value",
            ValueAsField => "literal is not a field name",
            StarNotAllowed => "`*` is not allowed here",
            SortKeyOutsideSort => "sort key outside of `sort`",
            ExpectedFilter => "expected a filter",
            MisplacedClause => "clause is not allowed here",
            InvalidLimit => "invalid limit",
            RepeatedClause => "clause repeated, the last one wins",
        }
    }

    /// The summary, or the summary with `detail` worked in.
    pub fn describe(self, detail: Option<&str>) -> String {
        let Some(detail) = detail else {
            return self.summary().to_owned();
        };
        match self {
            Self::UnknownFunction => format!("`{detail}` is not a known function"),
            Self::RepeatedClause => format!("`{detail}` repeated, the last one wins"),
            Self::UnclosedCall => format!("{}; {detail}", self.summary()),
            _ => format!("{}: {detail}", self.summary()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Severity::Error => "error",
            Severity::Warning => "warning",
        })
    }
}

/// A secondary span with a label, e.g. where an unclosed call was opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub(crate) range: TextRange,
    pub(crate) label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Diagnostic {
    pub(crate) kind: DiagnosticKind,
    pub(crate) range: TextRange,
    /// Other diagnostics starting strictly inside this range are cascades.
    pub(crate) shadow: TextRange,
    pub(crate) text: String,
    pub(crate) notes: Vec<Note>,
    pub(crate) hints: Vec<String>,
}

impl Diagnostic {
    pub(crate) fn new(kind: DiagnosticKind, range: TextRange) -> Self {
        Self {
            kind,
            range,
            shadow: range,
            text: kind.describe(None),
            notes: Vec::new(),
            hints: kind.hint().into_iter().map(String::from).collect(),
        }
    }

    pub(crate) fn severity(&self) -> Severity {
        self.kind.severity()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let span = |r: TextRange| (u32::from(r.start()), u32::from(r.end()));

        let (start, end) = span(self.range);
        write!(f, "{} at {start}..{end}: {}", self.severity(), self.text)?;
        for note in &self.notes {
            let (start, end) = span(note.range);
            write!(f, " (related: {} at {start}..{end})", note.label)?;
        }
        self.hints
            .iter()
            .try_for_each(|hint| write!(f, " (hint: {hint})"))
    }
}
