//! Parser configuration and cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Default limit on rule nesting.
pub const DEFAULT_MAX_DEPTH: usize = 1024;

/// Shared cancellation handle.
///
/// Clone it into the parser's config and keep a copy; calling
/// [`CancelFlag::cancel`] from any thread makes the parse stop with
/// `Cancelled` at the next rule entry.
#[derive(Clone, Debug, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a parse behaves on errors and how much work it may do.
#[derive(Clone, Debug)]
pub struct ParserConfig {
    /// Recover from errors in recoverable rules instead of failing.
    ///
    /// After the first diagnostic the parser resynchronizes on the failing
    /// rule's follow set. Later diagnostics may be artifacts of that
    /// resynchronization rather than independent mistakes.
    pub recover: bool,
    /// Memoize rule outcomes during speculation.
    pub memoize: bool,
    /// Maximum number of rule invocations, if any.
    pub max_steps: Option<u64>,
    /// Maximum rule nesting.
    pub max_depth: usize,
    pub cancel: Option<CancelFlag>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            recover: false,
            memoize: true,
            max_steps: None,
            max_depth: DEFAULT_MAX_DEPTH,
            cancel: None,
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_recovery(mut self, recover: bool) -> Self {
        self.recover = recover;
        self
    }

    #[must_use]
    pub fn with_memoization(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    #[must_use]
    pub fn with_max_steps(mut self, steps: u64) -> Self {
        self.max_steps = Some(steps);
        self
    }

    /// Set the nesting limit. Zero is raised to one so the root rule runs.
    #[must_use]
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth.max(1);
        self
    }

    #[must_use]
    pub fn with_cancel_flag(mut self, flag: CancelFlag) -> Self {
        self.cancel = Some(flag);
        self
    }

    #[inline]
    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelFlag::is_cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ParserConfig::default();
        assert!(!config.recover);
        assert!(config.memoize);
        assert_eq!(config.max_steps, None);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert!(!config.is_cancelled());
    }

    #[test]
    fn test_builders() {
        let config = ParserConfig::new()
            .with_recovery(true)
            .with_memoization(false)
            .with_max_steps(500)
            .with_max_depth(0);
        assert!(config.recover);
        assert!(!config.memoize);
        assert_eq!(config.max_steps, Some(500));
        assert_eq!(config.max_depth, 1);
    }

    #[test]
    fn test_cancel_flag_is_shared() {
        let flag = CancelFlag::new();
        let config = ParserConfig::new().with_cancel_flag(flag.clone());
        assert!(!config.is_cancelled());

        std::thread::spawn(move || flag.cancel())
            .join()
            .unwrap_or_default();
        assert!(config.is_cancelled());
    }
}
