//! Diagnostic rendering with source snippets.

use ariadne::{Color, Config, Label, Report, ReportKind, Source};
use rewind_ir::Span;
use rewind_java::LexError;
use rewind_parse::ParseError;

/// One problem to show the user, lexical or syntactic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: &'static str,
    pub message: String,
    pub span: Span,
    /// Short text under the underlined span.
    pub label: String,
}

impl From<&ParseError> for Diagnostic {
    fn from(err: &ParseError) -> Self {
        let label = match err.rule {
            Some(rule) => format!("while parsing {rule}"),
            None => "here".to_string(),
        };
        Diagnostic {
            code: err.kind.code(),
            message: err.kind.to_string(),
            span: err.span,
            label,
        }
    }
}

impl From<&LexError> for Diagnostic {
    fn from(err: &LexError) -> Self {
        Diagnostic {
            code: err.code(),
            message: err.to_string(),
            span: err.span(),
            label: match err {
                LexError::TooLarge { .. } => "input stops being lexed here",
                _ => "not a Java token",
            }
            .to_string(),
        }
    }
}

/// Render `diagnostics` against `source`, in the order given.
pub fn render(
    path: &str,
    source: &str,
    diagnostics: &[Diagnostic],
    color: bool,
) -> std::io::Result<String> {
    let mut out = Vec::new();
    for diagnostic in diagnostics {
        let range = label_range(diagnostic.span, source.len());
        Report::build(ReportKind::Error, path, range.start)
            .with_config(Config::default().with_color(color))
            .with_code(diagnostic.code)
            .with_message(&diagnostic.message)
            .with_label(
                Label::new((path, range))
                    .with_message(&diagnostic.label)
                    .with_color(Color::Red),
            )
            .finish()
            .write((path, Source::from(source)), &mut out)?;
    }
    Ok(String::from_utf8_lossy(&out).into_owned())
}

/// The byte range to underline; an empty span widens to the character
/// after it so that end-of-input errors still point somewhere.
fn label_range(span: Span, len: usize) -> std::ops::Range<usize> {
    let range = span.to_range();
    let start = range.start.min(len);
    let end = range.end.clamp(start, len);
    if start == end && start < len {
        start..start + 1
    } else {
        start..end
    }
}
