use crate::command::Command;
use crate::span::Span;
use crate::transform::TransformError;
use crate::transform::reflow::pack_command;

/// Bin-pack with a keyword-value wrapping rule layered on top.
///
/// Most invocations interleave UPPER_CASE option keywords with their
/// values and read fine tightly packed. A long run of free-form values
/// with no keywords in between (source file lists, link libraries) reads
/// better one per line, so any argument that closes a run of three
/// free-form arguments gets a width penalty that forces it to wrap.
///
/// Two escapes: the literal argument `COMMAND` introduces a shell
/// command line whose words are naturally free-form, so it switches the
/// rule off for the rest of the invocation; and the first argument of
/// `add_executable`/`add_library` is a target name, never wrapped.
pub fn argument_heuristic(
    commands: &mut [Command],
    spans: &mut Vec<Span>,
    column_limit: usize,
    argument_indent: &str,
) -> Result<(), TransformError> {
    for index in 0..commands.len() {
        let widths = forced_widths(spans, &commands[index], column_limit);
        pack_command(
            commands,
            spans,
            index,
            column_limit,
            argument_indent,
            Some(&widths),
        )?;
    }
    Ok(())
}

/// An option keyword rather than a free-form value. Digits make an
/// argument free-form (version numbers, flag values).
fn is_option_like(text: &str) -> bool {
    !text.is_empty()
        && text
            .bytes()
            .all(|b| b.is_ascii_uppercase() || b == b'_' || b == b'-')
}

/// Per-argument width penalties for one command, in argument order.
///
/// A rolling classifier consumes one argument at a time: a counter of
/// consecutive free-form arguments resets on every option keyword, and
/// an argument is penalized by `column_limit` once the counter reaches
/// three, so each forced argument is judged against its two
/// predecessors.
fn forced_widths(spans: &[Span], command: &Command, column_limit: usize) -> Vec<usize> {
    let name = spans[command.name].text.to_ascii_lowercase();
    let first_is_target = name == "add_executable" || name == "add_library";

    let mut widths = Vec::with_capacity(command.arguments.len());
    let mut consecutive_free = 0usize;
    let mut keyword_seen = false;
    for (ordinal, &argument) in command.arguments.iter().enumerate() {
        let text = &spans[argument].text;
        if text == "COMMAND" {
            keyword_seen = true;
        }
        if is_option_like(text) {
            consecutive_free = 0;
        } else {
            consecutive_free += 1;
        }

        let forced =
            !keyword_seen && consecutive_free >= 3 && !(first_is_target && ordinal == 0);
        widths.push(if forced { column_limit } else { 0 });
    }
    widths
}
