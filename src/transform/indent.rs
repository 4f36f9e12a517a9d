use crate::command::Command;
use crate::span::{Span, SpanKind};
use crate::transform::{
    BLOCK_CLOSERS, BLOCK_OPENERS, TransformError, command_indentation, matching_rparen,
};

/// Re-indent every command to its block nesting depth.
///
/// A flat signed counter threads across the commands in document order:
/// closers decrement before their own level is computed, openers
/// increment after, and `else`/`elseif` sit one level shallower than the
/// block body without touching the counter. Continuation lines keep any
/// manual indentation beyond the command's original one, and a block of
/// full-line comments directly above the command at the same original
/// indentation moves with it. Unbalanced blocks in malformed input clamp
/// at depth zero instead of failing.
pub fn reindent(commands: &mut [Command], spans: &mut [Span], indent_string: &str) {
    let mut level: i32 = 0;
    for command in commands.iter() {
        let name = command.name;
        let ident = spans[name].text.to_ascii_lowercase();

        if BLOCK_CLOSERS.contains(&ident.as_str()) {
            level -= 1;
        }

        let mut own = level;
        if ident == "else" || ident == "elseif" {
            own -= 1;
        }

        let new_indentation = indent_string.repeat(usize::try_from(own).unwrap_or(0));
        let old_indentation = spans[name - 1].text.clone();

        // The command invocation itself.
        spans[name - 1].text.clone_from(&new_indentation);

        // Continuation lines up to the matching closing paren. Lines that
        // were indented past the command keep the excess.
        if let Some(rparen) = matching_rparen(spans, name) {
            for i in name + 1..rparen {
                if spans[i].kind != SpanKind::Newline {
                    continue;
                }
                let extra = spans[i + 1]
                    .text
                    .strip_prefix(old_indentation.as_str())
                    .map(str::to_owned);
                if let Some(extra) = extra {
                    spans[i + 1].text = format!("{new_indentation}{extra}");
                }
            }
        }

        // Full-line comments directly above, at the same indentation.
        if let Some(mut p) = name.checked_sub(3) {
            while p >= 2
                && spans[p].kind == SpanKind::Comment
                && spans[p - 1].kind == SpanKind::Space
                && spans[p - 2].kind == SpanKind::Newline
                && spans[p - 1].text == old_indentation
            {
                spans[p - 1].text.clone_from(&new_indentation);
                match p.checked_sub(3) {
                    Some(next) => p = next,
                    None => break,
                }
            }
        }

        if BLOCK_OPENERS.contains(&ident.as_str()) {
            level += 1;
        }
    }
}

/// Re-indent continuation lines inside every command's argument list.
///
/// With `align_paren` the argument indent is derived per command as
/// `len(name) + 1` spaces, lining continuations up with the opening
/// paren; otherwise `argument_indent` is appended to the command's own
/// indentation. The line holding the closing paren is left alone (see
/// [`reindent_rparen`]).
pub fn reindent_arguments(
    commands: &mut [Command],
    spans: &mut [Span],
    align_paren: bool,
    argument_indent: &str,
) -> Result<(), TransformError> {
    for command in commands.iter() {
        let name = command.name;
        let command_indent = command_indentation(spans, name)?;
        let indent = if align_paren {
            " ".repeat(spans[name].text.len() + 1)
        } else {
            argument_indent.to_owned()
        };

        if let Some(rparen) = matching_rparen(spans, name) {
            for i in name + 1..rparen {
                if spans[i].kind == SpanKind::Newline && i + 2 != rparen {
                    spans[i + 1].text = format!("{command_indent}{indent}");
                }
            }
        }
    }
    Ok(())
}

/// Re-indent hanging closing parens to the command's own indentation
/// plus `rparen_indent`.
pub fn reindent_rparen(
    commands: &mut [Command],
    spans: &mut [Span],
    rparen_indent: &str,
) -> Result<(), TransformError> {
    for command in commands.iter() {
        let name = command.name;
        let command_indent = command_indentation(spans, name)?;

        if let Some(rparen) = matching_rparen(spans, name) {
            if rparen >= 2 && spans[rparen - 2].kind == SpanKind::Newline {
                spans[rparen - 1].text = format!("{command_indent}{rparen_indent}");
            }
        }
    }
    Ok(())
}
