//! End-to-end pipelines: several transforms chained over one document,
//! checked against the exact expected output.

mod common;

use cmakefmt_rs::transform::{
    LetterCase, TransformError, argument_bin_pack, argument_per_line, command_case,
    loosen_loop_constructs, reindent, squash_empty_lines,
};
use cmakefmt_rs::{extract_commands, serialize, tokenize};
use common::transformed;

#[test]
fn lowercases_mixed_case_commands() {
    assert_eq!(
        transformed("UPPERCASE_COMMAND()\nmIxEdCaSe_CoMmAnD()", |commands, spans| {
            command_case(commands, spans, LetterCase::Lower);
        }),
        "uppercase_command()\nmixedcase_command()"
    );
}

#[test]
fn squashes_four_blank_lines_to_one() {
    assert_eq!(
        transformed("command()\n\n\n\n\ncommand()\n", |commands, spans| {
            squash_empty_lines(commands, spans, 1);
        }),
        "command()\n\ncommand()\n"
    );
}

#[test]
fn one_per_line_with_named_indent() {
    assert_eq!(
        transformed("command(ARG1 ARG2 ARG3)\n", |commands, spans| {
            argument_per_line(commands, spans, "INDENT ").expect("should transform");
        }),
        "command(\nINDENT ARG1\nINDENT ARG2\nINDENT ARG3\n)\n"
    );
}

#[test]
fn bin_pack_reference_output() {
    assert_eq!(
        transformed(
            "command(ARG1 ARG2 ARG3 ARG4 ARG5 ARG6\n    ARG7)\n",
            |commands, spans| {
                argument_bin_pack(commands, spans, 30, "    ").expect("should transform");
            },
        ),
        "command(ARG1 ARG2 ARG3 ARG4\n    ARG5 ARG6 ARG7)\n"
    );
}

#[test]
fn full_formatting_pipeline() {
    let input = concat!(
        "PROJECT(demo)\n",
        "\n",
        "\n",
        "\n",
        "IF(WIN32)\n",
        "ADD_EXECUTABLE(app main.c win32.c util.c extra.c)\n",
        "ENDIF(WIN32)\n",
    );
    let output = transformed(input, |commands, spans| {
        squash_empty_lines(commands, spans, 1);
        command_case(commands, spans, LetterCase::Lower);
        loosen_loop_constructs(commands, spans);
        reindent(commands, spans, "  ");
        argument_bin_pack(commands, spans, 30, "    ").expect("should transform");
    });
    assert_eq!(
        output,
        concat!(
            "project(demo)\n",
            "\n",
            "if(WIN32)\n",
            "  add_executable(app main.c\n",
            "      win32.c util.c extra.c)\n",
            "endif()\n",
        )
    );
}

#[test]
fn transform_errors_carry_the_offending_text() {
    let mut spans = tokenize("if((A AND B) OR C)\n").expect("should tokenize");
    let mut commands = extract_commands(&spans);
    let error = argument_bin_pack(&mut commands, &mut spans, 30, "    ")
        .expect_err("nested parens cannot be packed");
    assert_eq!(error, TransformError::UnexpectedSpan { found: "(".into() });
    assert_eq!(error.to_string(), "unexpected '(' in argument list");
}

#[test]
fn unified_error_wraps_both_stages() {
    let parse_error = tokenize("command(\"unterminated").expect_err("should fail");
    let unified: cmakefmt_rs::Error = parse_error.into();
    assert_eq!(
        unified.to_string(),
        "unterminated quoted argument at byte 8"
    );
}

#[test]
fn pipeline_preserves_argument_texts() {
    let input = "if(WIN32)\nadd_library(demo STATIC a.c b.c)\nendif()\n";
    let mut spans = tokenize(input).expect("should tokenize");
    let mut commands = extract_commands(&spans);
    let before: Vec<Vec<String>> = commands
        .iter()
        .map(|c| c.arguments.iter().map(|&a| spans[a].text.clone()).collect())
        .collect();

    squash_empty_lines(&mut commands, &mut spans, 1);
    reindent(&mut commands, &mut spans, "    ");
    argument_bin_pack(&mut commands, &mut spans, 40, "    ").expect("should transform");

    let after: Vec<Vec<String>> = commands
        .iter()
        .map(|c| c.arguments.iter().map(|&a| spans[a].text.clone()).collect())
        .collect();
    assert_eq!(before, after);
    assert!(serialize(&spans).contains("add_library(demo STATIC a.c b.c)"));
}
