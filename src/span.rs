/// Span kinds produced by the tokenizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpanKind {
    /// Name of a top-level command invocation.
    CommandName,
    /// Identifier-shaped bare word inside an argument list.
    Identifier,
    /// Double-quoted argument (`"..."`), quotes included.
    QuotedArgument,
    /// Unquoted argument, possibly containing variable references
    /// or embedded quoted segments.
    UnquotedArgument,
    /// Newline (`\n`), never merged with adjacent spaces.
    Newline,
    /// Comment (`# ...`), newline excluded.
    Comment,
    /// Run of horizontal whitespace; may be empty when synthesized.
    Space,
    /// Opening parenthesis `(`.
    LParen,
    /// Closing parenthesis `)`.
    RParen,
}

/// A minimal lexical unit carrying its exact source text.
///
/// Concatenating the `text` of every span of a document, in order,
/// reproduces the original input byte for byte. Transforms may rewrite,
/// insert, or delete spans but must preserve this round-trip property
/// for the text they do not touch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub kind: SpanKind,
    pub text: String,
}

impl Span {
    pub fn new(kind: SpanKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// A space span with the given text (may be empty).
    pub fn space(text: impl Into<String>) -> Self {
        Self::new(SpanKind::Space, text)
    }

    /// A single `\n` newline span.
    #[must_use]
    pub fn newline() -> Self {
        Self::new(SpanKind::Newline, "\n")
    }
}

/// Concatenate the text of every span back into a document string.
#[must_use]
pub fn serialize(spans: &[Span]) -> String {
    let mut out = String::with_capacity(spans.iter().map(|s| s.text.len()).sum());
    for span in spans {
        out.push_str(&span.text);
    }
    out
}
