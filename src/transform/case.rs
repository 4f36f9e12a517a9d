use crate::command::Command;
use crate::span::Span;
use crate::transform::LetterCase;

/// Rewrite every command name to the chosen letter case. ASCII only;
/// command names outside ASCII are left byte-for-byte as written.
pub fn command_case(commands: &mut [Command], spans: &mut [Span], case: LetterCase) {
    for command in commands.iter() {
        let text = &mut spans[command.name].text;
        *text = match case {
            LetterCase::Lower => text.to_ascii_lowercase(),
            LetterCase::Upper => text.to_ascii_uppercase(),
        };
    }
}
