use crate::command::Command;
use crate::edit::{delete_span, insert_spans};
use crate::span::{Span, SpanKind};

/// Delete trailing whitespace and cap runs of empty lines at
/// `max_empty_lines`.
///
/// A single pass over the whole document: a Space span directly before a
/// Newline is trailing whitespace and goes away, and a counter of
/// consecutive Newline spans drops every newline past the allowed run.
/// A second pass restores the empty indentation span each kept newline
/// must be followed by.
pub fn squash_empty_lines(commands: &mut [Command], spans: &mut Vec<Span>, max_empty_lines: usize) {
    let mut i = 0;
    let mut preceding_newlines = 0usize;
    while i < spans.len() {
        if i + 1 < spans.len()
            && spans[i].kind == SpanKind::Space
            && spans[i + 1].kind == SpanKind::Newline
        {
            delete_span(commands, spans, i);
        }
        if spans[i].kind == SpanKind::Newline {
            if preceding_newlines > max_empty_lines {
                delete_span(commands, spans, i);
            } else {
                i += 1;
            }
            preceding_newlines += 1;
            continue;
        }
        preceding_newlines = 0;
        i += 1;
    }

    let mut i = 0;
    while i < spans.len() {
        if spans[i].kind == SpanKind::Newline
            && spans.get(i + 1).is_none_or(|s| s.kind != SpanKind::Space)
        {
            insert_spans(commands, spans, i + 1, vec![Span::space("")]);
        }
        i += 1;
    }
}
