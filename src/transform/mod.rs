//! Layout-only transform passes.
//!
//! Each pass takes `(commands, spans, params)`, rewrites the span
//! sequence in place, and leaves the command indices and the structural
//! invariants intact. Passes run sequentially in a caller-chosen order.

mod case;
mod heuristic;
mod indent;
mod loosen;
mod parens;
mod reflow;
mod squash;

pub use case::command_case;
pub use heuristic::argument_heuristic;
pub use indent::{reindent, reindent_arguments, reindent_rparen};
pub use loosen::loosen_loop_constructs;
pub use parens::space_before_parens;
pub use reflow::{argument_bin_pack, argument_per_line, reflow_arguments};
pub use squash::squash_empty_lines;

use crate::span::{Span, SpanKind};

/// Letter case applied to command names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterCase {
    Lower,
    Upper,
}

/// Whether a space separates a command name from its opening paren.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpaceBeforeParens {
    Never,
    /// Only for block commands (`if`, `endif`, `foreach`, ...).
    ControlStatements,
    Always,
}

/// Which argument-reflow policy to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReflowPolicy {
    None,
    OnePerLine,
    BinPack,
    Heuristic,
}

/// A span adjacency a transform cannot interpret. Fatal for the
/// document being processed; no partial output should be written.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransformError {
    #[error("command '{name}' not preceded by space or newline")]
    MissingIndentation { name: String },
    #[error("expected '(' after command name, got '{found}'")]
    ExpectedLParen { found: String },
    #[error("unexpected '{found}' in argument list")]
    UnexpectedSpan { found: String },
}

/// Commands that open an indented block.
pub(crate) const BLOCK_OPENERS: [&str; 5] = ["if", "foreach", "while", "macro", "function"];

/// Commands that close an indented block.
pub(crate) const BLOCK_CLOSERS: [&str; 5] =
    ["endif", "endforeach", "endwhile", "endmacro", "endfunction"];

/// Control-statement names for the paren-spacing policy.
pub(crate) const CONTROL_COMMANDS: [&str; 11] = [
    "if",
    "elseif",
    "endif",
    "foreach",
    "endforeach",
    "while",
    "endwhile",
    "macro",
    "endmacro",
    "function",
    "endfunction",
];

/// The indentation string of the line a command starts on.
///
/// Relies on the tokenizer invariant that a command name is preceded by
/// a Space span; a bare Newline (possible after hand-built span
/// sequences) counts as empty indentation.
pub(crate) fn command_indentation(
    spans: &[Span],
    name_index: usize,
) -> Result<String, TransformError> {
    if name_index == 0 {
        return Ok(String::new());
    }
    match spans[name_index - 1].kind {
        SpanKind::Newline => Ok(String::new()),
        SpanKind::Space => Ok(spans[name_index - 1].text.clone()),
        _ => Err(TransformError::MissingIndentation {
            name: spans[name_index].text.clone(),
        }),
    }
}

/// Walk from a command's name span to its matching closing paren.
/// Returns the RParen index, or `None` for unbalanced hand-built input.
pub(crate) fn matching_rparen(spans: &[Span], name_index: usize) -> Option<usize> {
    let mut depth = 0usize;
    for (i, span) in spans.iter().enumerate().skip(name_index + 1) {
        match span.kind {
            SpanKind::LParen => depth += 1,
            SpanKind::RParen => match depth {
                0 => return None,
                1 => return Some(i),
                _ => depth -= 1,
            },
            _ => {}
        }
    }
    None
}
