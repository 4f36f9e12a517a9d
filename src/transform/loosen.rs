use crate::command::Command;
use crate::edit::{delete_span, insert_spans};
use crate::span::{Span, SpanKind};

const STRICT_CLOSERS: [&str; 6] = [
    "else",
    "endif",
    "endwhile",
    "endmacro",
    "endfunction",
    "endforeach",
];

/// Strip the redundant repeated condition from closing block commands.
///
/// Classic style repeats the opening condition, as in
/// `endif(CONDITION)`; current style leaves the parens empty. Comments
/// inside the argument list stay, along with the line break each one
/// ends with.
pub fn loosen_loop_constructs(commands: &mut [Command], spans: &mut Vec<Span>) {
    for index in 0..commands.len() {
        let name = commands[index].name;
        let ident = spans[name].text.to_ascii_lowercase();
        if !STRICT_CLOSERS.contains(&ident.as_str()) {
            continue;
        }

        let mut i = name + 1;
        while spans[i].kind != SpanKind::LParen {
            i += 1;
        }
        i += 1;
        while spans[i].kind != SpanKind::RParen {
            if spans[i].kind == SpanKind::Comment {
                i += 2;
            } else {
                delete_span(commands, spans, i);
            }
        }
        insert_spans(commands, spans, i, vec![Span::space("")]);
    }
}
