//! Lossless tokenizer and layout re-formatter for CMake-style
//! listfiles.
//!
//! The tokenizer splits a document into a flat sequence of [`Span`]s
//! that concatenate back to the input byte for byte. Transforms rewrite,
//! insert, and delete layout spans in place; the semantic content of the
//! document never changes, so serializing after any pipeline yields a
//! reformatted but equivalent listfile.
//!
//! # Quick start
//!
//! ## Round trip
//!
//! ```
//! use cmakefmt_rs::{serialize, tokenize};
//!
//! let input = "add_executable(app main.c)\n";
//! let spans = tokenize(input).unwrap();
//! assert_eq!(serialize(&spans), input);
//! ```
//!
//! ## Run a formatting pipeline
//!
//! ```
//! use cmakefmt_rs::transform::{LetterCase, command_case, reindent};
//! use cmakefmt_rs::{extract_commands, serialize, tokenize};
//!
//! let input = "IF(FOO)\nmessage(hello)\nENDIF()\n";
//! let mut spans = tokenize(input).unwrap();
//! let mut commands = extract_commands(&spans);
//! command_case(&mut commands, &mut spans, LetterCase::Lower);
//! reindent(&mut commands, &mut spans, "  ");
//! assert_eq!(serialize(&spans), "if(FOO)\n  message(hello)\nendif()\n");
//! ```

// Allow noisy pedantic lints that don't add value for
// a library crate.
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions
)]

pub mod command;
pub mod edit;
pub mod lexer;
pub mod span;
pub mod transform;

pub use command::{Command, extract_commands};
pub use edit::{delete_span, insert_spans};
pub use lexer::{ParseError, ParseErrorKind, tokenize};
pub use span::{Span, SpanKind, serialize};
pub use transform::TransformError;

/// Unified error type covering both tokenizing and transforming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A tokenizer error.
    #[error("{0}")]
    Parse(#[from] ParseError),
    /// A transform error.
    #[error("{0}")]
    Transform(#[from] TransformError),
}
