//! Parse error types.
//!
//! Every failure the runtime reports is a [`ParseError`]: a
//! [`ParseErrorKind`] plus where it happened (token position, span, and the
//! innermost grammar rule that was active).
//!
//! Kinds fall into three groups:
//! - recognition errors (`UnexpectedToken`, `NoViableAlternative`,
//!   `EndOfInput`), which a speculative trial absorbs and recovery mode
//!   turns into diagnostics;
//! - `TrialFailure`, the cheap stand-in raised while speculating, which never
//!   leaves a trial;
//! - abort errors (`Cancelled`, `StepBudgetExhausted`, `NestingTooDeep`,
//!   `Cursor`), which always propagate to the caller.

use rewind_ir::{Position, Span, TokenSet};
use std::fmt;

/// Result of a grammar rule procedure.
pub type PResult<T> = Result<T, ParseError>;

/// Misuse of cursor marks.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    /// The mark was already released, or its slot was reused by a newer mark.
    #[error("mark {slot} is stale (released or superseded)")]
    StaleMark { slot: u32 },
}

/// Misuse of the memo table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum MemoError {
    /// A `(rule, position)` outcome may be recorded once per parse.
    #[error("outcome of rule {rule} at position {position} was already recorded")]
    AlreadyRecorded { rule: u16, position: usize },
}

/// What went wrong.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    /// A required terminal did not match the current token.
    #[error("expected {}, found {found}", TokenSet::format_names(.expected))]
    UnexpectedToken {
        expected: Vec<&'static str>,
        found: String,
    },

    /// No alternative of a decision matched the upcoming tokens.
    #[error("no viable alternative at {found} while deciding {decision} (expected {})", TokenSet::format_names(.expected))]
    NoViableAlternative {
        decision: &'static str,
        expected: Vec<&'static str>,
        found: String,
    },

    /// Lookahead was requested past the final token.
    #[error("unexpected end of input")]
    EndOfInput,

    /// A speculative trial did not match. Never escapes a trial.
    #[error("speculative trial failed")]
    TrialFailure,

    /// The caller's cancel flag was raised.
    #[error("parse cancelled")]
    Cancelled,

    /// More rule invocations than the configured budget.
    #[error("step budget of {limit} rule invocations exhausted")]
    StepBudgetExhausted { limit: u64 },

    /// Rule nesting exceeded the configured limit.
    #[error("input nested deeper than {limit} rules")]
    NestingTooDeep { limit: usize },

    /// Internal misuse of cursor marks.
    #[error(transparent)]
    Cursor(#[from] CursorError),
}

impl ParseErrorKind {
    /// Short code used when rendering diagnostics.
    pub fn code(&self) -> &'static str {
        match self {
            ParseErrorKind::UnexpectedToken { .. } => "E1001",
            ParseErrorKind::NoViableAlternative { .. } => "E1002",
            ParseErrorKind::EndOfInput => "E1003",
            ParseErrorKind::TrialFailure => "E1004",
            ParseErrorKind::Cancelled => "E1101",
            ParseErrorKind::StepBudgetExhausted { .. } => "E1102",
            ParseErrorKind::NestingTooDeep { .. } => "E1103",
            ParseErrorKind::Cursor(_) => "E1901",
        }
    }
}

/// A parse failure with its location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Innermost rule active when the error was raised.
    pub rule: Option<&'static str>,
    /// Cursor position (index among default-channel tokens).
    pub position: usize,
    /// Span of the offending token.
    pub span: Span,
    /// Line/column of the offending token.
    pub pos: Position,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, position: usize, span: Span, pos: Position) -> Self {
        ParseError {
            kind,
            rule: None,
            position,
            span,
            pos,
        }
    }

    /// The cheap failure raised while speculating.
    #[cold]
    pub fn trial(position: usize) -> Self {
        ParseError::new(
            ParseErrorKind::TrialFailure,
            position,
            Span::DUMMY,
            Position::default(),
        )
    }

    /// Attach the active rule unless an inner rule already did.
    #[must_use]
    pub fn in_rule(mut self, rule: &'static str) -> Self {
        if self.rule.is_none() {
            self.rule = Some(rule);
        }
        self
    }

    /// True for kinds that trials and recovery must never absorb.
    pub fn is_abort(&self) -> bool {
        matches!(
            self.kind,
            ParseErrorKind::Cancelled
                | ParseErrorKind::StepBudgetExhausted { .. }
                | ParseErrorKind::NestingTooDeep { .. }
                | ParseErrorKind::Cursor(_)
        )
    }

    /// Display names of the accepted token kinds, if the kind carries them.
    pub fn expected(&self) -> &[&'static str] {
        match &self.kind {
            ParseErrorKind::UnexpectedToken { expected, .. }
            | ParseErrorKind::NoViableAlternative { expected, .. } => expected,
            _ => &[],
        }
    }

    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)?;
        if let Some(rule) = self.rule {
            write!(f, " (in {rule})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.kind)
    }
}
