//! Runtime for hand-written backtracking recursive-descent parsers.
//!
//! A grammar is written as one procedure per nonterminal. Each procedure runs
//! inside [`Parser::rule`], consumes tokens with [`Parser::expect`] and
//! [`Parser::bump`], and resolves its choice points with [`Parser::decide`]
//! against a static [`Decision`] table. The runtime supplies:
//!
//! - a token [`Cursor`] with non-LIFO [`Mark`]/rewind,
//! - a [`MemoTable`] of `(rule, position)` outcomes used during speculation,
//! - lookahead DFAs built from per-alternative lookahead paths,
//! - [`SemanticPredicate`]s over captured tokens (e.g. `>` `>` adjacency),
//! - strict or recovering error handling, and
//! - a pluggable [`TreeSink`] that receives committed parse events only.
//!
//! Speculation never leaks: [`Parser::speculate`] rewinds the cursor and
//! turns every recognition error into `false`. Only the abort errors
//! (cancellation, step budget, nesting limit) cross a trial boundary.

mod config;
mod cursor;
mod decision;
mod error;
mod memo;
mod observer;
mod parser;
mod predicate;
mod recovery;
mod stack;
mod tree;

pub use config::{CancelFlag, ParserConfig};
pub use cursor::{Cursor, Mark};
pub use decision::{AltSet, Alternative, Decision, DecisionBuilder, Prediction};
pub use error::{CursorError, MemoError, ParseError, ParseErrorKind, PResult};
pub use memo::{MemoLookup, MemoStats, MemoTable};
pub use observer::{NoopObserver, ObserverEvent, ParseObserver, RecordingObserver, TracingObserver};
pub use parser::{ParseOutput, ParseStats, Parser, Rule, RuleId};
pub use predicate::{adjacent, kinds_are, SemanticPredicate};
pub use recovery::synchronize;
pub use stack::ensure_sufficient_stack;
pub use tree::{Child, NodeId, NodeKind, NoopSink, SyntaxNode, SyntaxTree, TreeBuilder, TreeSink};

#[cfg(test)]
mod tests;
