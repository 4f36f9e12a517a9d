//! Property-based tests with proptest.
//!
//! Documents are generated from a grammar of well-formed invocations,
//! then checked for the core guarantees: lossless round-trips, command
//! indices that survive arbitrary layout edits, idempotent transforms,
//! and the bin-pack column bound.

use cmakefmt_rs::transform::{
    LetterCase, argument_bin_pack, command_case, reindent, squash_empty_lines,
};
use cmakefmt_rs::{
    Span, SpanKind, delete_span, extract_commands, insert_spans, serialize, tokenize,
};
use proptest::prelude::*;

// -- Document strategies --

fn command_name() -> impl Strategy<Value = String> {
    "[a-z_][a-z0-9_]{0,11}"
}

/// Option keywords, free-form values, and quoted strings, in the shapes
/// real listfiles use.
fn argument() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][A-Z_]{0,9}",
        "[a-z0-9][a-z0-9._-]{0,11}",
        "\\$\\{[a-z_]{1,8}\\}",
        "\"[a-zA-Z0-9 ._-]{0,14}\"",
    ]
}

/// Layout between two arguments.
fn separator() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(" ".to_owned()),
        1 => Just("  ".to_owned()),
        1 => Just("\n".to_owned()),
        1 => Just("\n    ".to_owned()),
    ]
}

fn leading() -> impl Strategy<Value = String> {
    prop_oneof![
        3 => Just(String::new()),
        1 => Just("  ".to_owned()),
        1 => Just("\n".to_owned()),
        1 => Just("\n\n".to_owned()),
    ]
}

fn invocation() -> impl Strategy<Value = String> {
    (
        leading(),
        command_name(),
        prop::collection::vec((separator(), argument()), 0..6),
    )
        .prop_map(|(lead, name, arguments)| {
            let mut text = format!("{lead}{name}(");
            for (i, (sep, argument)) in arguments.iter().enumerate() {
                if i > 0 {
                    text.push_str(sep);
                }
                text.push_str(argument);
            }
            text.push_str(")\n");
            text
        })
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(invocation(), 1..8).prop_map(|invocations| invocations.concat())
}

// -- Properties --

proptest! {
    #[test]
    fn tokenize_serialize_roundtrips(input in document()) {
        let spans = tokenize(&input).expect("generated document must tokenize");
        prop_assert_eq!(serialize(&spans), input);
    }

    /// Random layout edits through the mutation utilities never move a
    /// command off its name span or change which text its argument
    /// indices resolve to.
    #[test]
    fn edits_preserve_command_indices(
        input in document(),
        operations in prop::collection::vec((any::<bool>(), any::<prop::sample::Index>()), 1..20),
    ) {
        let mut spans = tokenize(&input).expect("generated document must tokenize");
        let mut commands = extract_commands(&spans);
        let arguments_before: Vec<Vec<String>> = commands
            .iter()
            .map(|c| c.arguments.iter().map(|&a| spans[a].text.clone()).collect())
            .collect();

        for (insert, position) in operations {
            if insert {
                let at = position.index(spans.len() + 1);
                insert_spans(&mut commands, &mut spans, at, vec![Span::space("  ")]);
            } else {
                let space_indices: Vec<usize> = spans
                    .iter()
                    .enumerate()
                    .filter(|(_, s)| s.kind == SpanKind::Space)
                    .map(|(i, _)| i)
                    .collect();
                if space_indices.is_empty() {
                    continue;
                }
                let at = space_indices[position.index(space_indices.len())];
                delete_span(&mut commands, &mut spans, at);
            }
        }

        for (command, before) in commands.iter().zip(&arguments_before) {
            prop_assert_eq!(spans[command.name].kind, SpanKind::CommandName);
            let after: Vec<String> = command
                .arguments
                .iter()
                .map(|&a| spans[a].text.clone())
                .collect();
            prop_assert_eq!(&after, before);
        }
    }

    #[test]
    fn reindent_is_idempotent(input in document()) {
        let mut spans = tokenize(&input).expect("generated document must tokenize");
        let mut commands = extract_commands(&spans);
        reindent(&mut commands, &mut spans, "  ");
        let once = serialize(&spans);
        reindent(&mut commands, &mut spans, "  ");
        prop_assert_eq!(serialize(&spans), once);
    }

    #[test]
    fn command_case_is_idempotent(input in document()) {
        let mut spans = tokenize(&input).expect("generated document must tokenize");
        let mut commands = extract_commands(&spans);
        command_case(&mut commands, &mut spans, LetterCase::Upper);
        let once = serialize(&spans);
        command_case(&mut commands, &mut spans, LetterCase::Upper);
        prop_assert_eq!(serialize(&spans), once);
    }

    #[test]
    fn squash_is_idempotent(input in document(), max_empty_lines in 0usize..3) {
        let mut spans = tokenize(&input).expect("generated document must tokenize");
        let mut commands = extract_commands(&spans);
        squash_empty_lines(&mut commands, &mut spans, max_empty_lines);
        let once = serialize(&spans);
        squash_empty_lines(&mut commands, &mut spans, max_empty_lines);
        prop_assert_eq!(serialize(&spans), once);
    }

    /// With no comments in play and every argument narrower than the
    /// limit, no packed line exceeds the limit.
    #[test]
    fn bin_pack_respects_the_column_limit(
        name in "[a-z_][a-z0-9_]{0,11}",
        arguments in prop::collection::vec("[A-Za-z0-9_.-]{1,12}", 1..10),
    ) {
        let input = format!("{name}({})\n", arguments.join(" "));
        let mut spans = tokenize(&input).expect("generated document must tokenize");
        let mut commands = extract_commands(&spans);
        argument_bin_pack(&mut commands, &mut spans, 30, "    ").expect("should transform");

        let output = serialize(&spans);
        for line in output.lines() {
            prop_assert!(
                line.len() <= 30,
                "line exceeds limit: {:?} in\n{}",
                line,
                output
            );
        }
    }

    /// The structural invariants hold after a full pipeline, not just
    /// after tokenizing.
    #[test]
    fn pipeline_preserves_structural_invariants(input in document()) {
        let mut spans = tokenize(&input).expect("generated document must tokenize");
        let mut commands = extract_commands(&spans);
        squash_empty_lines(&mut commands, &mut spans, 1);
        reindent(&mut commands, &mut spans, "  ");
        argument_bin_pack(&mut commands, &mut spans, 40, "    ").expect("should transform");

        for (i, span) in spans.iter().enumerate() {
            match span.kind {
                SpanKind::Newline => {
                    prop_assert_eq!(spans.get(i + 1).map(|s| s.kind), Some(SpanKind::Space));
                }
                SpanKind::RParen | SpanKind::CommandName => {
                    prop_assert!(i > 0);
                    prop_assert_eq!(spans[i - 1].kind, SpanKind::Space);
                }
                _ => {}
            }
        }
    }
}
