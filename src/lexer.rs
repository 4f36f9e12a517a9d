use std::fmt;

use crate::span::{Span, SpanKind};

/// Classifies a tokenizer error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Unterminated double-quoted argument.
    UnterminatedQuote,
    /// Variable reference whose closing marker never appears.
    UnterminatedVariableReference { close: char },
    /// Argument production consumed zero characters.
    EmptyArgument,
    /// Byte that cannot appear where a specific token is required.
    UnexpectedCharacter {
        expected: &'static str,
        found: char,
    },
    /// Input ended where a specific token is required.
    UnexpectedEof { expected: &'static str },
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnterminatedQuote => {
                write!(f, "unterminated quoted argument")
            }
            Self::UnterminatedVariableReference { close } => {
                write!(
                    f,
                    "unterminated variable reference, \
                     expected closing '{close}'"
                )
            }
            Self::EmptyArgument => {
                write!(f, "empty argument")
            }
            Self::UnexpectedCharacter { expected, found } => {
                write!(f, "expected {expected}, got '{found}'")
            }
            Self::UnexpectedEof { expected } => {
                write!(f, "expected {expected}, got end of input")
            }
        }
    }
}

/// Error produced while tokenizing a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct ParseError {
    pub kind: ParseErrorKind,
    /// Byte offset into the original input.
    pub offset: usize,
}

/// Tokenize a source string into a span sequence.
///
/// The result satisfies the round-trip property
/// (`serialize(&spans) == input`) and the structural invariants the
/// transforms rely on: every command name and every closing paren is
/// preceded by a Space span (possibly empty), and every newline is
/// followed by one.
///
/// # Errors
///
/// Returns `ParseError` on unterminated quotes or variable references,
/// unbalanced parentheses, and unexpected characters.
pub fn tokenize(input: &str) -> Result<Vec<Span>, ParseError> {
    Tokenizer::new(input).run()
}

struct Tokenizer<'a> {
    input: &'a [u8],
    pos: usize,
    spans: Vec<Span>,
}

impl<'a> Tokenizer<'a> {
    const fn new(input: &'a str) -> Self {
        Self {
            input: input.as_bytes(),
            pos: 0,
            spans: Vec::new(),
        }
    }

    fn run(mut self) -> Result<Vec<Span>, ParseError> {
        loop {
            self.lex_layout();
            let Some(c) = self.peek() else { break };

            if !(c.is_ascii_alphabetic() || c == b'_') {
                return Err(ParseError {
                    kind: ParseErrorKind::UnexpectedCharacter {
                        expected: "command name",
                        found: char::from(c),
                    },
                    offset: self.pos,
                });
            }

            // Command names are always preceded by a Space span, so
            // transforms can address the indentation as `name - 1`.
            if self.spans.last().is_none_or(|s| s.kind != SpanKind::Space) {
                self.spans.push(Span::space(""));
            }

            let start = self.pos;
            self.pos += 1;
            while self
                .peek()
                .is_some_and(|c| c.is_ascii_alphanumeric() || c == b'_')
            {
                self.pos += 1;
            }
            let name = self.text_from(start);
            self.spans.push(Span::new(SpanKind::CommandName, name));

            self.lex_layout();
            match self.peek() {
                Some(b'(') => {
                    self.spans.push(Span::new(SpanKind::LParen, "("));
                    self.pos += 1;
                }
                Some(c) => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnexpectedCharacter {
                            expected: "'('",
                            found: char::from(c),
                        },
                        offset: self.pos,
                    });
                }
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnexpectedEof { expected: "'('" },
                        offset: self.pos,
                    });
                }
            }

            self.argument_list()?;
        }

        Ok(self.spans)
    }

    /// Consume arguments up to and including the matching `)`.
    ///
    /// Bare parens inside an argument list open a nested list; the nested
    /// LParen/RParen spans belong to the enclosing command's layout, not
    /// to any argument.
    fn argument_list(&mut self) -> Result<(), ParseError> {
        loop {
            self.lex_layout();
            match self.peek() {
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnexpectedEof {
                            expected: "argument or ')'",
                        },
                        offset: self.pos,
                    });
                }
                Some(b')') => {
                    // Closing parens are always preceded by a Space span.
                    if self.spans.last().is_none_or(|s| s.kind != SpanKind::Space) {
                        self.spans.push(Span::space(""));
                    }
                    self.spans.push(Span::new(SpanKind::RParen, ")"));
                    self.pos += 1;
                    return Ok(());
                }
                Some(b'(') => {
                    self.spans.push(Span::new(SpanKind::LParen, "("));
                    self.pos += 1;
                    self.argument_list()?;
                }
                Some(_) => {
                    let span = self.read_argument()?;
                    self.spans.push(span);
                }
            }
        }
    }

    /// Whitespace, newlines, and comments between tokens. Newlines are
    /// their own spans and are always followed by a Space span (possibly
    /// empty), so the start of the next line is addressable.
    fn lex_layout(&mut self) {
        loop {
            match self.peek() {
                Some(b' ' | b'\t' | b'\r') => {
                    let start = self.pos;
                    while matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
                        self.pos += 1;
                    }
                    let text = self.text_from(start);
                    self.spans.push(Span::space(text));
                }
                Some(b'\n') => {
                    self.pos += 1;
                    self.spans.push(Span::newline());
                    if !matches!(self.peek(), Some(b' ' | b'\t' | b'\r')) {
                        self.spans.push(Span::space(""));
                    }
                }
                Some(b'#') => {
                    let start = self.pos;
                    while self.peek().is_some_and(|c| c != b'\n') {
                        self.pos += 1;
                    }
                    let text = self.text_from(start);
                    self.spans.push(Span::new(SpanKind::Comment, text));
                }
                _ => break,
            }
        }
    }

    fn read_argument(&mut self) -> Result<Span, ParseError> {
        let start = self.pos;

        let mut leading_quote_end = None;
        if self.peek() == Some(b'"') {
            self.read_quoted_segment()?;
            leading_quote_end = Some(self.pos);
        }

        loop {
            match self.peek() {
                None | Some(b' ' | b'\t' | b'\r' | b'\n' | b')' | b'#') => break,
                Some(b'\\') => {
                    // Two-character escape; the escaped byte is skipped,
                    // never inspected.
                    self.pos += 1;
                    if self.pos < self.input.len() {
                        self.pos += 1;
                    }
                }
                Some(b'"') => self.read_quoted_segment()?,
                Some(b'$') => self.read_variable_reference()?,
                Some(b'(') => self.read_balanced_parens()?,
                Some(_) => self.pos += 1,
            }
        }

        if self.pos == start {
            return Err(ParseError {
                kind: ParseErrorKind::EmptyArgument,
                offset: start,
            });
        }

        let text = self.text_from(start);
        let kind = if leading_quote_end == Some(self.pos) {
            SpanKind::QuotedArgument
        } else if is_identifier(&text) {
            SpanKind::Identifier
        } else {
            SpanKind::UnquotedArgument
        };
        Ok(Span::new(kind, text))
    }

    /// Balanced parens opened mid-argument belong to the argument text
    /// (`a(b)c` is one span); only a paren that starts where an argument
    /// would opens a layout group.
    fn read_balanced_parens(&mut self) -> Result<(), ParseError> {
        let opening = self.pos;
        self.pos += 1;
        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnexpectedEof { expected: "')'" },
                        offset: opening,
                    });
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if self.pos < self.input.len() {
                        self.pos += 1;
                    }
                }
                Some(b'(') => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(b')') => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        Ok(())
    }

    fn read_quoted_segment(&mut self) -> Result<(), ParseError> {
        let opening = self.pos;
        self.pos += 1;
        loop {
            match self.peek() {
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnterminatedQuote,
                        offset: opening,
                    });
                }
                Some(b'\\') => {
                    self.pos += 1;
                    if self.pos >= self.input.len() {
                        return Err(ParseError {
                            kind: ParseErrorKind::UnterminatedQuote,
                            offset: opening,
                        });
                    }
                    self.pos += 1;
                }
                Some(b'"') => {
                    self.pos += 1;
                    return Ok(());
                }
                Some(_) => self.pos += 1,
            }
        }
    }

    /// `$MARK ... ENDMARK` with `{`/`}`, `(`/`)`, or `<`/`>` markers.
    /// Markers nest, and a `$` inside the body starts a nested reference.
    /// A `$` not followed by a marker is an ordinary argument character.
    fn read_variable_reference(&mut self) -> Result<(), ParseError> {
        let dollar = self.pos;
        let close = match self.input.get(self.pos + 1) {
            Some(b'{') => b'}',
            Some(b'(') => b')',
            Some(b'<') => b'>',
            _ => {
                self.pos += 1;
                return Ok(());
            }
        };
        let open = self.input[self.pos + 1];
        self.pos += 2;

        let mut depth = 1usize;
        while depth > 0 {
            match self.peek() {
                None => {
                    return Err(ParseError {
                        kind: ParseErrorKind::UnterminatedVariableReference {
                            close: char::from(close),
                        },
                        offset: dollar,
                    });
                }
                Some(b'$') => self.read_variable_reference()?,
                Some(c) if c == open => {
                    depth += 1;
                    self.pos += 1;
                }
                Some(c) if c == close => {
                    depth -= 1;
                    self.pos += 1;
                }
                Some(_) => self.pos += 1,
            }
        }
        Ok(())
    }

    fn peek(&self) -> Option<u8> {
        self.input.get(self.pos).copied()
    }

    fn text_from(&self, start: usize) -> String {
        String::from_utf8_lossy(&self.input[start..self.pos]).into_owned()
    }
}

fn is_identifier(text: &str) -> bool {
    let mut bytes = text.bytes();
    bytes
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == b'_')
        && bytes.all(|c| c.is_ascii_alphanumeric() || c == b'_')
}
