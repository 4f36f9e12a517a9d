//! CLI tool to re-format listfiles with an explicit transform pipeline.
//!
//! Each formatting option appends one transform to the pipeline; the
//! pipeline runs over every input file in the order the options were
//! given.

use std::fs;
use std::process::ExitCode;

use cmakefmt_rs::transform::{
    LetterCase, SpaceBeforeParens, TransformError, argument_bin_pack, argument_heuristic,
    argument_per_line, command_case, loosen_loop_constructs, reindent, reindent_arguments,
    reindent_rparen, space_before_parens, squash_empty_lines,
};
use cmakefmt_rs::{Command, Span, extract_commands, serialize, tokenize};

type TransformFn = Box<dyn Fn(&mut Vec<Command>, &mut Vec<Span>) -> Result<(), TransformError>>;

/// One formatting option: a `-flag=VALUE` (or bare `-flag`) record that
/// builds a pipeline stage from its value.
struct TransformOption {
    flag: &'static str,
    /// Value placeholder for the usage text; empty for switches.
    value: &'static str,
    help: &'static str,
    build: fn(&str) -> Result<TransformFn, String>,
}

static OPTIONS: [TransformOption; 11] = [
    TransformOption {
        flag: "-lowercase-commands",
        value: "",
        help: "Convert command names to lowercase.",
        build: |_| {
            Ok(Box::new(|commands, spans| {
                command_case(commands, spans, LetterCase::Lower);
                Ok(())
            }))
        },
    },
    TransformOption {
        flag: "-uppercase-commands",
        value: "",
        help: "Convert command names to uppercase.",
        build: |_| {
            Ok(Box::new(|commands, spans| {
                command_case(commands, spans, LetterCase::Upper);
                Ok(())
            }))
        },
    },
    TransformOption {
        flag: "-indent",
        value: "STRING",
        help: "Use STRING as one level of block indentation.",
        build: |value| {
            let indent = unescape(value);
            Ok(Box::new(move |commands, spans| {
                reindent(commands, spans, &indent);
                Ok(())
            }))
        },
    },
    TransformOption {
        flag: "-indent-arguments",
        value: "align-paren|STRING",
        help: "Align continuing arguments with the left paren, or indent them by STRING.",
        build: |value| {
            let (align_paren, indent) = if value == "align-paren" {
                (true, String::new())
            } else {
                (false, unescape(value))
            };
            Ok(Box::new(move |commands, spans| {
                reindent_arguments(commands, spans, align_paren, &indent)
            }))
        },
    },
    TransformOption {
        flag: "-indent-rparen",
        value: "STRING",
        help: "Use STRING for indenting hanging right-parens.",
        build: |value| {
            let indent = unescape(value);
            Ok(Box::new(move |commands, spans| {
                reindent_rparen(commands, spans, &indent)
            }))
        },
    },
    TransformOption {
        flag: "-argument-per-line",
        value: "STRING",
        help: "Put each argument on its own line, indented by STRING.",
        build: |value| {
            let indent = unescape(value);
            Ok(Box::new(move |commands, spans| {
                argument_per_line(commands, spans, &indent)
            }))
        },
    },
    TransformOption {
        flag: "-argument-bin-pack",
        value: "WIDTH[:INDENT]",
        help: "Greedily fill lines with arguments up to WIDTH columns.",
        build: |value| {
            let (width, indent) = parse_packing(value)?;
            Ok(Box::new(move |commands, spans| {
                argument_bin_pack(commands, spans, width, &indent)
            }))
        },
    },
    TransformOption {
        flag: "-argument-heuristic",
        value: "WIDTH[:INDENT]",
        help: "Bin-pack to WIDTH columns, wrapping runs of free-form arguments.",
        build: |value| {
            let (width, indent) = parse_packing(value)?;
            Ok(Box::new(move |commands, spans| {
                argument_heuristic(commands, spans, width, &indent)
            }))
        },
    },
    TransformOption {
        flag: "-space-before-parens",
        value: "always|never|control-statements",
        help: "Put or remove a space between command names and their parens.",
        build: |value| {
            let policy = match value {
                "always" => SpaceBeforeParens::Always,
                "never" => SpaceBeforeParens::Never,
                "control-statements" => SpaceBeforeParens::ControlStatements,
                _ => return Err(format!("'{value}' value invalid")),
            };
            Ok(Box::new(move |commands, spans| {
                space_before_parens(commands, spans, policy);
                Ok(())
            }))
        },
    },
    TransformOption {
        flag: "-squash-empty-lines",
        value: "MAX",
        help: "Delete trailing whitespace and allow at most MAX consecutive empty lines.",
        build: |value| {
            let max: usize = value
                .parse()
                .map_err(|_| format!("'{value}' value invalid"))?;
            Ok(Box::new(move |commands, spans| {
                squash_empty_lines(commands, spans, max);
                Ok(())
            }))
        },
    },
    TransformOption {
        flag: "-loosen-loop-constructs",
        value: "",
        help: "Strip repeated conditions from else/end* commands.",
        build: |_| {
            Ok(Box::new(|commands, spans| {
                loosen_loop_constructs(commands, spans);
                Ok(())
            }))
        },
    },
];

/// `\t` written on the command line becomes a real tab.
fn unescape(value: &str) -> String {
    value.replace("\\t", "\t")
}

fn parse_packing(value: &str) -> Result<(usize, String), String> {
    let (width, indent) = match value.split_once(':') {
        Some((width, indent)) => (width, unescape(indent)),
        None => (value, "    ".to_owned()),
    };
    let width = width
        .parse::<usize>()
        .map_err(|_| format!("'{value}' value invalid"))?;
    Ok((width, indent))
}

fn print_usage() {
    eprintln!("Usage: cmakefmt [options] [file ...]");
    eprintln!();
    eprintln!("Re-formats specified files. If -i is specified, formats files");
    eprintln!("in-place; otherwise, writes results to standard output.");
    eprintln!();
    eprintln!("Options:");

    let labels: Vec<String> = OPTIONS
        .iter()
        .map(|option| {
            if option.value.is_empty() {
                option.flag.to_owned()
            } else {
                format!("{}={}", option.flag, option.value)
            }
        })
        .collect();
    let width = labels.iter().map(String::len).max().unwrap_or(0);

    for (label, option) in labels.iter().zip(&OPTIONS) {
        eprintln!("  {label:width$}  {}", option.help);
    }
    eprintln!("  {:width$}  Re-format files in-place.", "-i");
}

/// Match one command-line argument against the option table. `Ok(None)`
/// means no option recognized the argument.
fn build_transform(arg: &str) -> Result<Option<TransformFn>, String> {
    for option in &OPTIONS {
        if option.value.is_empty() {
            if arg == option.flag {
                return (option.build)("").map(Some);
            }
            continue;
        }
        if arg == option.flag {
            return Err(format!("for the {} option: requires a value", option.flag));
        }
        let value = arg
            .strip_prefix(option.flag)
            .and_then(|rest| rest.strip_prefix('='));
        if let Some(value) = value {
            return (option.build)(value)
                .map(Some)
                .map_err(|e| format!("for the {} option: {e}", option.flag));
        }
    }
    Ok(None)
}

fn format_content(content: &str, pipeline: &[TransformFn]) -> Result<String, cmakefmt_rs::Error> {
    let mut spans = tokenize(content)?;
    let mut commands = extract_commands(&spans);
    for transform in pipeline {
        transform(&mut commands, &mut spans)?;
    }
    Ok(serialize(&spans))
}

fn main() -> ExitCode {
    let args: Vec<String> = std::env::args().collect();

    let mut in_place = false;
    let mut pipeline: Vec<TransformFn> = Vec::new();
    let mut files: Vec<String> = Vec::new();

    for arg in args.iter().skip(1) {
        if arg == "-h" || arg == "-help" || arg == "--help" {
            print_usage();
            return ExitCode::from(2);
        }
        if !arg.starts_with('-') {
            files.push(arg.clone());
            continue;
        }
        if arg == "-i" {
            in_place = true;
            continue;
        }
        match build_transform(arg) {
            Ok(Some(transform)) => pipeline.push(transform),
            Ok(None) => {
                eprintln!("cmakefmt: unrecognized option '{arg}'. Try: cmakefmt -help");
                return ExitCode::from(2);
            }
            Err(message) => {
                eprintln!("cmakefmt: {message}");
                return ExitCode::from(2);
            }
        }
    }

    if files.is_empty() {
        eprintln!("cmakefmt: no filenames specified. Try: cmakefmt -help");
        return ExitCode::from(2);
    }
    if pipeline.is_empty() {
        eprintln!("cmakefmt: no formatting options specified. Try: cmakefmt -help");
        return ExitCode::from(2);
    }

    let mut had_error = false;
    for path in &files {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        let formatted = match format_content(&content, &pipeline) {
            Ok(formatted) => formatted,
            Err(e) => {
                eprintln!("{path}: {e}");
                had_error = true;
                continue;
            }
        };

        if in_place {
            if let Err(e) = fs::write(path, &formatted) {
                eprintln!("{path}: {e}");
                had_error = true;
            }
        } else {
            print!("{formatted}");
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}
