//! Parse event observers.
//!
//! An observer sees everything the parser does, speculative work included:
//! rule entry and exit, decisions, trials, and errors. It is the hook for
//! debuggers and profilers; the tree sink only sees committed structure.

use crate::error::ParseError;
use tracing::span::EnteredSpan;
use tracing::{debug, trace, trace_span};

/// Callbacks for parse events. Every method defaults to doing nothing.
pub trait ParseObserver {
    /// `speculating` is true inside a trial.
    fn rule_enter(&mut self, _rule: &'static str, _position: usize, _speculating: bool) {}

    fn rule_exit(&mut self, _rule: &'static str, _position: usize, _success: bool) {}

    /// A decision settled on alternative `alt`.
    fn decision(&mut self, _decision: &'static str, _position: usize, _alt: usize) {}

    fn trial_start(&mut self, _position: usize) {}

    fn trial_end(&mut self, _position: usize, _success: bool) {}

    /// An error was raised in committed parsing (or recovered from).
    fn error(&mut self, _error: &ParseError) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopObserver;

impl ParseObserver for NoopObserver {}

/// Observer that mirrors rule nesting as `tracing` spans.
///
/// Each rule entry opens a `trace`-level span that stays entered until the
/// rule exits, so a hierarchical subscriber shows the call tree.
#[derive(Debug, Default)]
pub struct TracingObserver {
    spans: Vec<EnteredSpan>,
}

impl TracingObserver {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ParseObserver for TracingObserver {
    fn rule_enter(&mut self, rule: &'static str, position: usize, speculating: bool) {
        let span = trace_span!("rule", name = rule, pos = position, speculating).entered();
        self.spans.push(span);
    }

    fn rule_exit(&mut self, rule: &'static str, position: usize, success: bool) {
        trace!(name = rule, end = position, success, "exit");
        // Dropping the guard exits the span.
        self.spans.pop();
    }

    fn decision(&mut self, decision: &'static str, position: usize, alt: usize) {
        debug!(decision, pos = position, alt, "decided");
    }

    fn trial_start(&mut self, position: usize) {
        trace!(pos = position, "trial start");
    }

    fn trial_end(&mut self, position: usize, success: bool) {
        trace!(pos = position, success, "trial end");
    }

    fn error(&mut self, error: &ParseError) {
        debug!(code = error.kind.code(), pos = error.position, "{error}");
    }
}

/// A recorded parse event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ObserverEvent {
    RuleEnter {
        rule: &'static str,
        position: usize,
        speculating: bool,
    },
    RuleExit {
        rule: &'static str,
        position: usize,
        success: bool,
    },
    Decision {
        decision: &'static str,
        position: usize,
        alt: usize,
    },
    TrialStart {
        position: usize,
    },
    TrialEnd {
        position: usize,
        success: bool,
    },
    Error {
        message: String,
        position: usize,
    },
}

/// Observer that keeps every event in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingObserver {
    pub events: Vec<ObserverEvent>,
}

impl RecordingObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decisions as `(decision, alt)` pairs, in order.
    pub fn decisions(&self) -> Vec<(&'static str, usize)> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ObserverEvent::Decision { decision, alt, .. } => Some((*decision, *alt)),
                _ => None,
            })
            .collect()
    }

    /// Number of speculative trials started.
    pub fn trial_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, ObserverEvent::TrialStart { .. }))
            .count()
    }

    /// Names of rules entered outside any trial, in order.
    pub fn committed_rules(&self) -> Vec<&'static str> {
        self.events
            .iter()
            .filter_map(|event| match event {
                ObserverEvent::RuleEnter {
                    rule,
                    speculating: false,
                    ..
                } => Some(*rule),
                _ => None,
            })
            .collect()
    }
}

impl ParseObserver for RecordingObserver {
    fn rule_enter(&mut self, rule: &'static str, position: usize, speculating: bool) {
        self.events.push(ObserverEvent::RuleEnter {
            rule,
            position,
            speculating,
        });
    }

    fn rule_exit(&mut self, rule: &'static str, position: usize, success: bool) {
        self.events.push(ObserverEvent::RuleExit {
            rule,
            position,
            success,
        });
    }

    fn decision(&mut self, decision: &'static str, position: usize, alt: usize) {
        self.events.push(ObserverEvent::Decision {
            decision,
            position,
            alt,
        });
    }

    fn trial_start(&mut self, position: usize) {
        self.events.push(ObserverEvent::TrialStart { position });
    }

    fn trial_end(&mut self, position: usize, success: bool) {
        self.events.push(ObserverEvent::TrialEnd { position, success });
    }

    fn error(&mut self, error: &ParseError) {
        self.events.push(ObserverEvent::Error {
            message: error.message(),
            position: error.position,
        });
    }
}
