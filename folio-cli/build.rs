use clap::{Arg, ArgAction, Command, ValueHint};
use clap_complete::{generate_to, shells::*};
use std::env;
use std::io::Error;

// Mirror of the command tree in src/main.rs
// Build scripts can't reach src/ modules, so the definitions are repeated here
const PROFILES: &[&str] = &["screen-html", "print-pdf"];

fn book() -> Arg {
    Arg::new("book")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn id() -> Arg {
    Arg::new("id").required(true).index(2)
}

fn main() -> Result<(), Error> {
    let outdir = match env::var_os("OUT_DIR") {
        None => return Ok(()),
        Some(outdir) => outdir,
    };

    let mut cmd = Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compose multi-chapter books with semantic styles and export them")
        .arg(
            Arg::new("config")
                .long("config")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("new")
                .arg(book())
                .arg(Arg::new("title").long("title"))
                .arg(Arg::new("force").long("force").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("info")
                .arg(book())
                .arg(Arg::new("json").long("json").action(ArgAction::SetTrue)),
        )
        .subcommand(
            Command::new("title")
                .arg(book())
                .arg(Arg::new("title").required(true).index(2)),
        )
        .subcommand(
            Command::new("chapter")
                .subcommand(
                    Command::new("add")
                        .arg(book())
                        .arg(Arg::new("title").long("title")),
                )
                .subcommand(Command::new("delete").arg(book()).arg(id()))
                .subcommand(
                    Command::new("rename")
                        .arg(book())
                        .arg(id())
                        .arg(Arg::new("title").required(true).index(3)),
                )
                .subcommand(
                    Command::new("show")
                        .arg(book())
                        .arg(id())
                        .arg(Arg::new("text").long("text").action(ArgAction::SetTrue)),
                )
                .subcommand(
                    Command::new("set").arg(book()).arg(id()).arg(
                        Arg::new("file")
                            .required(true)
                            .index(3)
                            .value_hint(ValueHint::FilePath),
                    ),
                )
                .subcommand(
                    Command::new("insert")
                        .arg(book())
                        .arg(id())
                        .arg(Arg::new("style").required(true).index(3)),
                ),
        )
        .subcommand(
            Command::new("toggle")
                .arg(book())
                .arg(Arg::new("chapter").long("chapter").required(true))
                .arg(Arg::new("start").long("start").required(true))
                .arg(Arg::new("length").long("length").required(true))
                .arg(Arg::new("style").long("style").required(true)),
        )
        .subcommand(
            Command::new("style")
                .subcommand(Command::new("list").arg(book()))
                .subcommand(
                    Command::new("set")
                        .arg(book())
                        .arg(Arg::new("key").required(true).index(2))
                        .arg(Arg::new("declarations").required(true).index(3)),
                )
                .subcommand(
                    Command::new("reset")
                        .arg(book())
                        .arg(Arg::new("key").required(true).index(2)),
                )
                .subcommand(Command::new("css").arg(book()))
                .subcommand(
                    Command::new("preview")
                        .arg(book())
                        .arg(Arg::new("key").required(true).index(2)),
                ),
        )
        .subcommand(
            Command::new("export")
                .arg(book())
                .arg(
                    Arg::new("profile")
                        .long("profile")
                        .value_parser(clap::builder::PossibleValuesParser::new(PROFILES)),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(Arg::new("pdf").long("pdf").action(ArgAction::SetTrue))
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "a4", "letter", "a5",
                        ])),
                )
                .arg(Arg::new("margin").long("margin"))
                .arg(
                    Arg::new("escape-titles")
                        .long("escape-titles")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("profiles"));

    generate_to(Bash, &mut cmd, "folio", &outdir)?;
    generate_to(Zsh, &mut cmd, "folio", &outdir)?;
    generate_to(Fish, &mut cmd, "folio", &outdir)?;

    println!("cargo:warning=Shell completions generated in {outdir:?}");

    Ok(())
}
