use crate::command::Command;
use crate::edit::{delete_span, insert_spans};
use crate::span::{Span, SpanKind};
use crate::transform::{ReflowPolicy, TransformError, command_indentation};

/// Put every argument of every command on its own line, indented by the
/// command's indentation plus `argument_indent`. The closing paren moves
/// to its own line at the command's indentation. Parenthesized argument
/// groups stay intact and take a single line. Commands with no arguments
/// are left on one line.
pub fn argument_per_line(
    commands: &mut [Command],
    spans: &mut Vec<Span>,
    argument_indent: &str,
) -> Result<(), TransformError> {
    for index in 0..commands.len() {
        let name = commands[index].name;
        let command_indent = command_indentation(spans, name)?;

        let mut i = name + 1;
        while spans[i].kind != SpanKind::LParen {
            i += 1;
        }
        i += 1;

        let mut emitted = false;
        while spans[i].kind != SpanKind::RParen {
            match spans[i].kind {
                SpanKind::Space | SpanKind::Newline => {
                    delete_span(commands, spans, i);
                }
                SpanKind::LParen => {
                    insert_spans(
                        commands,
                        spans,
                        i,
                        vec![
                            Span::newline(),
                            Span::space(format!("{command_indent}{argument_indent}")),
                        ],
                    );
                    i += 2;
                    // Skip past the whole group, spacing and all.
                    let mut depth = 0usize;
                    loop {
                        match spans[i].kind {
                            SpanKind::LParen => depth += 1,
                            SpanKind::RParen => {
                                depth -= 1;
                                if depth == 0 {
                                    i += 1;
                                    break;
                                }
                            }
                            _ => {}
                        }
                        i += 1;
                    }
                    emitted = true;
                }
                _ => {
                    insert_spans(
                        commands,
                        spans,
                        i,
                        vec![
                            Span::newline(),
                            Span::space(format!("{command_indent}{argument_indent}")),
                        ],
                    );
                    i += 3;
                    emitted = true;
                }
            }
        }

        let closing = if emitted {
            vec![Span::newline(), Span::space(command_indent)]
        } else {
            vec![Span::space("")]
        };
        insert_spans(commands, spans, i, closing);
    }
    Ok(())
}

/// Greedily fill lines with as many arguments as fit under
/// `column_limit`.
pub fn argument_bin_pack(
    commands: &mut [Command],
    spans: &mut Vec<Span>,
    column_limit: usize,
    argument_indent: &str,
) -> Result<(), TransformError> {
    for index in 0..commands.len() {
        pack_command(commands, spans, index, column_limit, argument_indent, None)?;
    }
    Ok(())
}

/// Run the reflow policy selected on the command line.
pub fn reflow_arguments(
    commands: &mut [Command],
    spans: &mut Vec<Span>,
    policy: ReflowPolicy,
    column_limit: usize,
    argument_indent: &str,
) -> Result<(), TransformError> {
    match policy {
        ReflowPolicy::None => Ok(()),
        ReflowPolicy::OnePerLine => argument_per_line(commands, spans, argument_indent),
        ReflowPolicy::BinPack => argument_bin_pack(commands, spans, column_limit, argument_indent),
        ReflowPolicy::Heuristic => {
            super::heuristic::argument_heuristic(commands, spans, column_limit, argument_indent)
        }
    }
}

/// Reflow one command's argument list by greedy line fill.
///
/// Existing Space and Newline spans between arguments are deleted first;
/// comments stay where they are and anchor line breaks. An argument
/// followed on the same line by a comment (directly or after one space)
/// forms a single unit with it, and the line is considered full after
/// the unit. `forced`, when given, holds a per-argument width penalty in
/// argument order; a penalty of `column_limit` forces the argument onto
/// its own line.
///
/// The closing paren breaks onto a continuation line when the last line
/// would otherwise reach the limit. Equality counts as fitting.
pub(super) fn pack_command(
    commands: &mut [Command],
    spans: &mut Vec<Span>,
    index: usize,
    column_limit: usize,
    argument_indent: &str,
    forced: Option<&[usize]>,
) -> Result<(), TransformError> {
    let name = commands[index].name;
    let command_indent = command_indentation(spans, name)?;
    let mut line_width = command_indent.len() + spans[name].text.len();

    let mut i = name + 1;
    if spans[i].kind == SpanKind::Space {
        line_width += spans[i].text.len();
        i += 1;
    }
    if spans[i].kind != SpanKind::LParen {
        return Err(TransformError::ExpectedLParen {
            found: spans[i].text.clone(),
        });
    }
    line_width += 1;
    i += 1;

    let mut ordinal = 0usize;
    while spans[i].kind != SpanKind::RParen {
        match spans[i].kind {
            SpanKind::Space | SpanKind::Newline => {
                delete_span(commands, spans, i);
            }
            SpanKind::Comment => {
                insert_spans(
                    commands,
                    spans,
                    i,
                    vec![
                        Span::newline(),
                        Span::space(format!("{command_indent}{argument_indent}")),
                    ],
                );
                i += 3;
                line_width = column_limit;
            }
            SpanKind::QuotedArgument | SpanKind::UnquotedArgument | SpanKind::Identifier => {
                // A trailing same-line comment travels with the argument.
                let unit_len = if spans[i + 1].kind == SpanKind::Comment {
                    2
                } else if spans[i + 1].kind == SpanKind::Space
                    && spans[i + 2].kind == SpanKind::Comment
                {
                    3
                } else {
                    1
                };
                let attached_comment = unit_len > 1;

                let mut unit_width: usize = (0..unit_len).map(|k| spans[i + k].text.len()).sum();
                if ordinal != 0 {
                    unit_width += 1;
                }
                if let Some(widths) = forced {
                    unit_width += widths[ordinal];
                }

                if line_width + unit_width <= column_limit {
                    if ordinal != 0 {
                        insert_spans(commands, spans, i, vec![Span::space(" ")]);
                        i += 1;
                    }
                    line_width += unit_width;
                } else {
                    insert_spans(
                        commands,
                        spans,
                        i,
                        vec![
                            Span::newline(),
                            Span::space(format!("{command_indent}{argument_indent}")),
                        ],
                    );
                    i += 2;
                    line_width = command_indent.len() + argument_indent.len() + unit_width - 1;
                }

                if attached_comment {
                    line_width = column_limit;
                }
                i += unit_len;
                ordinal += 1;
            }
            _ => {
                return Err(TransformError::UnexpectedSpan {
                    found: spans[i].text.clone(),
                });
            }
        }
    }

    // The loop removed the space preceding the closing paren; put one
    // back, breaking the line first if the paren would reach the limit.
    let closing = if line_width + 1 >= column_limit {
        vec![
            Span::newline(),
            Span::space(format!("{command_indent}{argument_indent}")),
        ]
    } else {
        vec![Span::space("")]
    };
    insert_spans(commands, spans, i, closing);
    Ok(())
}
