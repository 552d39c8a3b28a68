use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the subcommands in src/main.rs; build scripts can't reach src/.
const EDIT_COMMANDS: &[(&str, &str)] = &[
    ("insert-column", "Insert a column into a table"),
    ("delete-column", "Delete a column from a table"),
    ("insert-row", "Insert a row into a table"),
    ("delete-row", "Delete a row from a table"),
    ("update-cell", "Replace or extend the content of one cell"),
    ("patch", "Replace the first exact occurrence of a fragment"),
    ("insert", "Compile Markdown and add it to the document"),
];

fn file_arg() -> Arg {
    Arg::new("input")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("confmark")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Convert Markdown to wiki storage format and edit its tables")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .global(true),
        )
        .subcommand(
            Command::new("convert")
                .about("Convert between document formats (default command)")
                .arg(file_arg())
                .arg(
                    Arg::new("from")
                        .long("from")
                        .value_parser(["markdown", "storage"]),
                )
                .arg(
                    Arg::new("to")
                        .long("to")
                        .value_parser(["markdown", "storage"]),
                )
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(
            Command::new("tables")
                .about("List the tables of a storage document as JSON")
                .arg(file_arg()),
        )
        .subcommand(
            Command::new("images")
                .about("List the images referenced by a storage document as JSON")
                .arg(file_arg())
                .arg(Arg::new("page-id").long("page-id"))
                .arg(
                    Arg::new("base-url")
                        .long("base-url")
                        .value_hint(ValueHint::Url),
                ),
        );

    for (name, about) in EDIT_COMMANDS {
        cmd = cmd.subcommand(
            Command::new(*name)
                .about(*about)
                .arg(file_arg())
                .arg(
                    Arg::new("output")
                        .long("output")
                        .short('o')
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("in-place")
                        .long("in-place")
                        .action(ArgAction::SetTrue),
                ),
        );
    }

    generate_to(Bash, &mut cmd, "confmark", &outdir)?;
    generate_to(Zsh, &mut cmd, "confmark", &outdir)?;
    generate_to(Fish, &mut cmd, "confmark", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
