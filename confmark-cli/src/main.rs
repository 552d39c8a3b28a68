// Command-line interface for confmark
//
// This binary converts between Markdown and the wiki storage format, and edits
// tables in storage documents without touching anything else on the page.
//
// Converting:
//
// The source format is detected from the file extension unless --from is given.
// Usage:
//  confmark <input> --to <format> [--from <format>] [-o <file>]          - Convert (default)
//  confmark convert <input> --to <format> [--from <format>] [-o <file>]  - Same as above (explicit)
//  confmark tables <file>                                                - JSON table summaries
//  confmark images <file> --page-id <id>                                 - JSON image references
//
// Editing:
//
// Every edit reads a storage document and writes the edited document to stdout,
// to -o <file>, or back to the input with --in-place. An edit the document's
// structure does not allow (merged cells, indexes out of range, no match) exits
// with status 2 and leaves every file untouched.
//  confmark insert-column <file> --table N --position P --name <header> [--default <v>]
//  confmark delete-column <file> --table N --position P
//  confmark insert-row <file> --table N --position P [--values <v>...] [--header]
//  confmark delete-row <file> --table N --row R
//  confmark update-cell <file> --table N --row R --column C --content <s> [--append]
//  confmark patch <file> --old <fragment> --new <replacement>
//  confmark insert <file> --markdown <s> [--prepend]

use clap::{Arg, ArgAction, ArgMatches, Command, ValueHint};
use confmark_babel::table::summarize_tables;
use confmark_babel::{
    extract_images, EditOp, FormatRegistry, ImageOptions, InsertPosition, MacroNames,
    TableOpResult,
};
use confmark_config::{ConfmarkConfig, Loader};
use serde::Serialize;
use std::fs;
use tracing::debug;
use tracing_subscriber::EnvFilter;

const SUBCOMMANDS: &[&str] = &[
    "convert",
    "tables",
    "images",
    "insert-column",
    "delete-column",
    "insert-row",
    "delete-row",
    "update-cell",
    "patch",
    "insert",
    "help",
];

/// Exit status for edits refused by the document's structure.
const EXIT_REFUSED: i32 = 2;

fn build_cli() -> Command {
    Command::new("confmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to wiki storage format and edit its tables")
        .long_about(
            "confmark converts between Markdown and the wiki storage format, and\n\
            applies minimal-diff edits to the tables of storage documents.\n\n\
            Examples:\n  \
            confmark notes.md --to storage                      # Compile Markdown (stdout)\n  \
            confmark page.xhtml --to markdown -o page.md        # Decompile to a file\n  \
            confmark tables page.xhtml                          # List tables as JSON\n  \
            confmark insert-column page.xhtml --table 0 --position 1 --name Owner --in-place",
        )
        .arg_required_else_help(true)
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a confmark.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Log table and conversion decisions to stderr")
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .long_about(
                    "Convert documents between formats.\n\n\
                    Supported formats:\n  \
                    - markdown: Markdown (.md, .markdown)\n  \
                    - storage:  Wiki storage format (.xhtml, .storage, .html)\n\n\
                    The source format is auto-detected from the file extension.\n\
                    Output goes to stdout by default, or use -o to specify a file.",
                )
                .arg(input_arg("Input file path"))
                .arg(
                    Arg::new("from")
                        .long("from")
                        .help("Source format (auto-detected from file extension if not specified)")
                        .value_hint(ValueHint::Other),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .help("Target format (required)")
                        .required(true)
                        .value_hint(ValueHint::Other),
                )
                .arg(output_arg()),
        )
        .subcommand(
            Command::new("tables")
                .about("List the tables of a storage document as JSON")
                .arg(input_arg("Storage document")),
        )
        .subcommand(
            Command::new("images")
                .about("List the images referenced by a storage document as JSON")
                .arg(input_arg("Storage document"))
                .arg(
                    Arg::new("page-id")
                        .long("page-id")
                        .help("Page id used to build attachment URLs")
                        .required(true),
                )
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .help("Wiki base URL (overrides images.base_url)")
                        .value_hint(ValueHint::Url),
                ),
        )
        .subcommand(
            edit_command("insert-column", "Insert a column into a table")
                .arg(index_arg("position", "Column index the new column takes"))
                .arg(
                    Arg::new("name")
                        .long("name")
                        .help("Header text of the new column")
                        .required(true),
                )
                .arg(
                    Arg::new("default")
                        .long("default")
                        .help("Value for the new data cells")
                        .default_value(""),
                )
                .arg(
                    Arg::new("header-style")
                        .long("header-style")
                        .help("Style attribute for the new header cell (copied from its neighbour otherwise)"),
                ),
        )
        .subcommand(
            edit_command("delete-column", "Delete a column from a table")
                .arg(index_arg("position", "Column index to delete")),
        )
        .subcommand(
            edit_command("insert-row", "Insert a row into a table")
                .arg(index_arg("position", "Row index the new row takes"))
                .arg(
                    Arg::new("values")
                        .long("values")
                        .help("Cell values (Markdown or markup)")
                        .num_args(0..)
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new("header")
                        .long("header")
                        .help("Emit header cells")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            edit_command("delete-row", "Delete a row from a table")
                .arg(index_arg("row", "Row index to delete")),
        )
        .subcommand(
            edit_command("update-cell", "Replace or extend the content of one cell")
                .arg(index_arg("row", "Row index"))
                .arg(index_arg("column", "Column index"))
                .arg(
                    Arg::new("content")
                        .long("content")
                        .help("New content (Markdown or markup)")
                        .required(true),
                )
                .arg(
                    Arg::new("append")
                        .long("append")
                        .help("Append to the existing content instead of replacing it")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            document_command("patch", "Replace the first exact occurrence of a fragment")
                .arg(
                    Arg::new("old")
                        .long("old")
                        .help("Fragment to replace, matched byte for byte")
                        .required(true),
                )
                .arg(
                    Arg::new("new")
                        .long("new")
                        .help("Replacement (Markdown unless it starts with '<')")
                        .required(true),
                ),
        )
        .subcommand(
            document_command("insert", "Compile Markdown and add it to the document")
                .arg(
                    Arg::new("markdown")
                        .long("markdown")
                        .help("Markdown to insert")
                        .required(true),
                )
                .arg(
                    Arg::new("prepend")
                        .long("prepend")
                        .help("Insert at the start instead of the end")
                        .action(ArgAction::SetTrue),
                ),
        )
}

fn input_arg(help: &'static str) -> Arg {
    Arg::new("input")
        .help(help)
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn output_arg() -> Arg {
    Arg::new("output")
        .long("output")
        .short('o')
        .help("Output file path (defaults to stdout)")
        .value_hint(ValueHint::FilePath)
}

fn index_arg(name: &'static str, help: &'static str) -> Arg {
    Arg::new(name)
        .long(name)
        .help(help)
        .required(true)
        .value_parser(clap::value_parser!(usize))
}

/// A command that rewrites a storage document.
fn document_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name)
        .about(about)
        .arg(input_arg("Storage document to edit"))
        .arg(output_arg())
        .arg(
            Arg::new("in-place")
                .long("in-place")
                .help("Write the edited document back to the input file")
                .action(ArgAction::SetTrue)
                .conflicts_with("output"),
        )
}

fn edit_command(name: &'static str, about: &'static str) -> Command {
    document_command(name, about).arg(index_arg("table", "Table index (0-based, document order)"))
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = build_cli();
    let matches = match cli.clone().try_get_matches_from(&args) {
        Ok(m) => m,
        Err(e) => {
            // A leading file argument means the implicit convert form.
            if args.len() > 1 && !args[1].starts_with('-') && !SUBCOMMANDS.contains(&args[1].as_str())
            {
                let mut new_args = vec![args[0].clone(), "convert".to_string()];
                new_args.extend_from_slice(&args[1..]);
                match cli.try_get_matches_from(&new_args) {
                    Ok(m) => m,
                    Err(e2) => e2.exit(),
                }
            } else {
                e.exit();
            }
        }
    };

    init_tracing(matches.get_flag("verbose"));
    let config = load_cli_config(
        matches.get_one::<String>("config").map(|s| s.as_str()),
        &flag_overrides(&matches),
    );
    let macros = MacroNames::from(&config.macros);

    match matches.subcommand() {
        Some(("convert", sub_matches)) => {
            let input = required(sub_matches, "input");
            let to = required(sub_matches, "to");
            let registry = FormatRegistry::with_macros(macros);

            let from = match sub_matches.get_one::<String>("from") {
                Some(f) => f.to_string(),
                None => match registry.detect_format_from_filename(input) {
                    Some(detected) => detected,
                    None => {
                        eprintln!("Error: Could not detect format from filename '{input}'");
                        eprintln!("Please specify --from explicitly");
                        std::process::exit(1);
                    }
                },
            };

            let output = sub_matches.get_one::<String>("output").map(|s| s.as_str());
            handle_convert_command(&registry, input, &from, to, output);
        }
        Some(("tables", sub_matches)) => {
            let source = read_input(required(sub_matches, "input"));
            print_json(&summarize_tables(&source), &config);
        }
        Some(("images", sub_matches)) => {
            let source = read_input(required(sub_matches, "input"));
            let page_id = required(sub_matches, "page-id");
            let options = ImageOptions::from(&config.images);
            print_json(&extract_images(&source, page_id, &options), &config);
        }
        Some((name, sub_matches)) if SUBCOMMANDS.contains(&name) && name != "help" => {
            let op = edit_op_from_matches(name, sub_matches);
            handle_edit_command(&op, sub_matches, &macros, &config);
        }
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .unwrap_or_else(|| {
            eprintln!("Error: --{name} is required");
            std::process::exit(1);
        })
}

fn index(matches: &ArgMatches, name: &str) -> usize {
    matches.get_one::<usize>(name).copied().unwrap_or_else(|| {
        eprintln!("Error: --{name} is required");
        std::process::exit(1);
    })
}

fn edit_op_from_matches(name: &str, matches: &ArgMatches) -> EditOp {
    match name {
        "insert-column" => EditOp::InsertColumn {
            table: index(matches, "table"),
            position: index(matches, "position"),
            header_name: required(matches, "name").to_string(),
            default_value: required(matches, "default").to_string(),
            header_style: matches.get_one::<String>("header-style").cloned(),
        },
        "delete-column" => EditOp::DeleteColumn {
            table: index(matches, "table"),
            position: index(matches, "position"),
        },
        "insert-row" => EditOp::InsertRow {
            table: index(matches, "table"),
            position: index(matches, "position"),
            values: matches
                .get_many::<String>("values")
                .map(|values| values.cloned().collect())
                .unwrap_or_default(),
            is_header: matches.get_flag("header"),
        },
        "delete-row" => EditOp::DeleteRow {
            table: index(matches, "table"),
            row: index(matches, "row"),
        },
        "update-cell" => EditOp::UpdateCell {
            table: index(matches, "table"),
            row: index(matches, "row"),
            column: index(matches, "column"),
            content: required(matches, "content").to_string(),
            append: matches.get_flag("append"),
        },
        "patch" => EditOp::Patch {
            old: required(matches, "old").to_string(),
            new: required(matches, "new").to_string(),
        },
        "insert" => EditOp::InsertContent {
            markdown: required(matches, "markdown").to_string(),
            position: if matches.get_flag("prepend") {
                InsertPosition::Prepend
            } else {
                InsertPosition::Append
            },
        },
        other => {
            eprintln!("Unknown edit '{other}'");
            std::process::exit(1);
        }
    }
}

/// Handle the convert command
fn handle_convert_command(
    registry: &FormatRegistry,
    input: &str,
    from: &str,
    to: &str,
    output: Option<&str>,
) {
    let source = read_input(input);

    let result = registry.convert(&source, from, to).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    });

    match output {
        Some(path) => write_output(path, &result),
        None => println!("{result}"),
    }
}

/// Apply one edit and write the document where the user asked.
///
/// Writing to a file reports the outcome as JSON on stdout; otherwise stdout
/// carries the edited document.
fn handle_edit_command(op: &EditOp, matches: &ArgMatches, macros: &MacroNames, config: &ConfmarkConfig) {
    let input = required(matches, "input");
    let source = read_input(input);

    let edited = op.apply_to(&source, macros).unwrap_or_else(|err| {
        eprintln!("Edit refused ({}): {err}", err.kind());
        std::process::exit(EXIT_REFUSED);
    });
    debug!(bytes_before = source.len(), bytes_after = edited.len(), "edit applied");

    let target = if matches.get_flag("in-place") {
        Some(input)
    } else {
        matches.get_one::<String>("output").map(|s| s.as_str())
    };

    match target {
        Some(path) => {
            write_output(path, &edited);
            print_json(&TableOpResult::ok(op.describe(), None), config);
        }
        None => print!("{edited}"),
    }
}

fn read_input(path: &str) -> String {
    fs::read_to_string(path).unwrap_or_else(|e| {
        eprintln!("Error reading file '{path}': {e}");
        std::process::exit(1);
    })
}

fn write_output(path: &str, contents: &str) {
    fs::write(path, contents).unwrap_or_else(|e| {
        eprintln!("Error writing file '{path}': {e}");
        std::process::exit(1);
    });
}

fn print_json<T: Serialize + ?Sized>(value: &T, config: &ConfmarkConfig) {
    let rendered = if config.output.pretty_json {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    match rendered {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error encoding JSON: {e}");
            std::process::exit(1);
        }
    }
}

/// Flags that stand in for configuration keys.
fn flag_overrides(matches: &ArgMatches) -> Vec<(&'static str, String)> {
    let mut overrides = Vec::new();
    if let Some(("images", sub_matches)) = matches.subcommand() {
        if let Some(base_url) = sub_matches.get_one::<String>("base-url") {
            overrides.push(("images.base_url", base_url.clone()));
        }
    }
    overrides
}

fn load_cli_config(explicit_path: Option<&str>, overrides: &[(&str, String)]) -> ConfmarkConfig {
    let loader = Loader::new().with_optional_file("confmark.toml");
    let mut loader = if let Some(path) = explicit_path {
        loader.with_file(path)
    } else {
        loader
    };

    for (key, value) in overrides {
        loader = loader.set_override(key, value.as_str()).unwrap_or_else(|err| {
            eprintln!("Invalid value for {key}: {err}");
            std::process::exit(1);
        });
    }

    loader.build().unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        std::process::exit(1);
    })
}
