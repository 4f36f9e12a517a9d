#![allow(dead_code)]

use cmakefmt_rs::{Command, Span, extract_commands, serialize, tokenize};

/// Tokenize, serialize, and assert the output is the input byte for
/// byte. Returns the spans for further inspection.
pub fn roundtrip(input: &str) -> Vec<Span> {
    let spans = tokenize(input).expect("tokenize failed");
    let output = serialize(&spans);
    assert_eq!(
        output, input,
        "round-trip mismatch:\n--- expected ---\n{input}\n--- got ---\n{output}"
    );
    spans
}

/// Tokenize `input`, hand spans and commands to `pipeline`, and
/// serialize the result.
pub fn transformed<F>(input: &str, pipeline: F) -> String
where
    F: FnOnce(&mut Vec<Command>, &mut Vec<Span>),
{
    let mut spans = tokenize(input).expect("tokenize failed");
    let mut commands = extract_commands(&spans);
    pipeline(&mut commands, &mut spans);
    serialize(&spans)
}
