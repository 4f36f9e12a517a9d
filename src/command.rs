use crate::span::{Span, SpanKind};

/// One top-level `name(arguments...)` invocation, referencing positions
/// in a span sequence.
///
/// Commands hold absolute indices into the document. Every insertion or
/// deletion of spans must go through [`crate::edit`] so these indices
/// stay consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Index of the command's name span.
    pub name: usize,
    /// Indices of the command's argument spans, in document order.
    pub arguments: Vec<usize>,
}

/// Collect every top-level command invocation from a span sequence.
///
/// A single linear pass: each CommandName span starts a command; the
/// argument indices are the Quoted/Unquoted/Identifier spans up to the
/// matching RParen, at any paren depth (the language has no nested
/// command syntax, only nested parens inside one command's arguments).
#[must_use]
pub fn extract_commands(spans: &[Span]) -> Vec<Command> {
    let mut commands = Vec::new();
    let mut i = 0;
    while i < spans.len() {
        if spans[i].kind != SpanKind::CommandName {
            i += 1;
            continue;
        }

        let name = i;
        let mut arguments = Vec::new();
        i += 1;
        while i < spans.len() && spans[i].kind != SpanKind::LParen {
            i += 1;
        }

        let mut depth = 0usize;
        while i < spans.len() {
            match spans[i].kind {
                SpanKind::LParen => depth += 1,
                SpanKind::RParen => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                }
                SpanKind::QuotedArgument | SpanKind::UnquotedArgument | SpanKind::Identifier => {
                    arguments.push(i);
                }
                _ => {}
            }
            i += 1;
        }

        commands.push(Command { name, arguments });
        i += 1;
    }
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::tokenize;

    #[test]
    fn records_name_and_argument_indices() {
        let spans = tokenize("set(FOO 1)\nmessage(\"hi\")\n").expect("should tokenize");
        let commands = extract_commands(&spans);
        assert_eq!(commands.len(), 2);

        assert_eq!(spans[commands[0].name].text, "set");
        let args: Vec<_> = commands[0]
            .arguments
            .iter()
            .map(|&a| spans[a].text.as_str())
            .collect();
        assert_eq!(args, vec!["FOO", "1"]);

        assert_eq!(spans[commands[1].name].text, "message");
        assert_eq!(spans[commands[1].arguments[0]].text, "\"hi\"");
    }

    #[test]
    fn empty_argument_list() {
        let spans = tokenize("endif()\n").expect("should tokenize");
        let commands = extract_commands(&spans);
        assert_eq!(commands.len(), 1);
        assert!(commands[0].arguments.is_empty());
    }

    #[test]
    fn arguments_inside_nested_parens() {
        let spans = tokenize("if((A AND B) OR C)\n").expect("should tokenize");
        let commands = extract_commands(&spans);
        assert_eq!(commands.len(), 1);
        let args: Vec<_> = commands[0]
            .arguments
            .iter()
            .map(|&a| spans[a].text.as_str())
            .collect();
        assert_eq!(args, vec!["A", "AND", "B", "OR", "C"]);
    }

    #[test]
    fn comments_are_not_arguments() {
        let spans = tokenize("command(A # note\n B)\n").expect("should tokenize");
        let commands = extract_commands(&spans);
        let args: Vec<_> = commands[0]
            .arguments
            .iter()
            .map(|&a| spans[a].text.as_str())
            .collect();
        assert_eq!(args, vec!["A", "B"]);
    }
}
