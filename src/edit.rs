//! Span-mutation utilities.
//!
//! Commands hold absolute indices into the span sequence, so every
//! insertion or deletion must ripple through the index fields of every
//! command at or past the mutation point. All transforms splice spans
//! exclusively through these two functions.

use crate::command::Command;
use crate::span::Span;

/// Insert `new_spans` before `index`, shifting every command index at or
/// past the insertion point.
pub fn insert_spans(commands: &mut [Command], spans: &mut Vec<Span>, index: usize, new_spans: Vec<Span>) {
    let shift = new_spans.len();
    spans.splice(index..index, new_spans);
    for command in commands.iter_mut() {
        if command.name >= index {
            command.name += shift;
        }
        for argument in &mut command.arguments {
            if *argument >= index {
                *argument += shift;
            }
        }
    }
}

/// Delete the span at `index`, shifting every command index past it.
///
/// If a command's argument list references the deleted span itself, the
/// reference is dropped (this happens when a transform removes an
/// argument outright, never for layout spans).
pub fn delete_span(commands: &mut [Command], spans: &mut Vec<Span>, index: usize) {
    spans.remove(index);
    for command in commands.iter_mut() {
        if command.name > index {
            command.name -= 1;
        }
        command.arguments.retain(|&a| a != index);
        for argument in &mut command.arguments {
            if *argument > index {
                *argument -= 1;
            }
        }
    }
}
