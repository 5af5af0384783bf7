//! Parsing many files at once.
//!
//! Files are independent, so each one gets its own lexer and parser on the
//! rayon pool.

use crate::{parse, ParsedFile};
use rayon::prelude::*;
use rewind_parse::{ParseError, ParserConfig};

/// Parse every source with `config`, results in input order.
pub fn parse_all<T: AsRef<str> + Sync>(
    sources: &[T],
    config: &ParserConfig,
) -> Vec<Result<ParsedFile, ParseError>> {
    if sources.len() <= 1 {
        sources
            .iter()
            .map(|source| parse(source.as_ref(), config.clone()))
            .collect()
    } else {
        sources
            .par_iter()
            .map(|source| parse(source.as_ref(), config.clone()))
            .collect()
    }
}
