use crate::command::Command;
use crate::edit::{delete_span, insert_spans};
use crate::span::{Span, SpanKind};
use crate::transform::{CONTROL_COMMANDS, SpaceBeforeParens};

/// Insert or remove the space between a command name and its opening
/// paren. `ControlStatements` applies the space to block commands only
/// and strips it everywhere else. An existing multi-space gap collapses
/// to a single space.
pub fn space_before_parens(
    commands: &mut [Command],
    spans: &mut Vec<Span>,
    policy: SpaceBeforeParens,
) {
    for index in 0..commands.len() {
        let name = commands[index].name;
        let ident = spans[name].text.to_ascii_lowercase();

        let want_space = match policy {
            SpaceBeforeParens::Always => true,
            SpaceBeforeParens::Never => false,
            SpaceBeforeParens::ControlStatements => CONTROL_COMMANDS.contains(&ident.as_str()),
        };

        if spans[name + 1].kind == SpanKind::Space {
            if want_space {
                spans[name + 1].text = " ".to_owned();
            } else {
                delete_span(commands, spans, name + 1);
            }
        } else if want_space {
            insert_spans(commands, spans, name + 1, vec![Span::space(" ")]);
        }
    }
}
