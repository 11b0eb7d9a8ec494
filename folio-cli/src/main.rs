// Command-line interface for folio
//
// A folio book is a single JSON file holding the title, the chapters (each a rich-text
// markup fragment) and the author's style overrides. Every command loads the book,
// applies one operation from folio-core and writes it back.
//
// Usage:
//  folio new <book.json> [--title <title>]
//  folio info <book.json> [--json]
//  folio title <book.json> <title>
//  folio chapter add|delete|rename|show|set|insert <book.json> ...
//  folio toggle <book.json> --chapter <id> --start <n> --length <n> --style <key>
//  folio style list|set|reset|css|preview <book.json> ...
//  folio export <book.json> [--profile screen-html|print-pdf] [-o <file>] [--pdf]
//  folio profiles
//
// Configuration is read from folio.toml in the working directory (if present) and from
// the file given with --config, layered over the built-in defaults.

mod print;
mod store;

use clap::{value_parser, Arg, ArgAction, ArgMatches, Command, ValueHint};
use folio_config::{ConfigError, FolioConfig, Loader};
use folio_core::{
    render_with_options, Book, BookError, BookStore, ChapterId, Profile,
    RenderOptions, RichFragment, Selection,
};
use std::fmt::Display;
use std::fs;
use std::io::{self, Write};
use std::process;
use store::JsonFileStore;

fn book_arg() -> Arg {
    Arg::new("book")
        .help("Path to the book JSON file")
        .required(true)
        .index(1)
        .value_hint(ValueHint::FilePath)
}

fn chapter_id_arg() -> Arg {
    Arg::new("id")
        .help("Chapter id")
        .required(true)
        .index(2)
        .value_parser(value_parser!(u64))
}

fn build_cli() -> Command {
    Command::new("folio")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Compose multi-chapter books with semantic styles and export them")
        .arg_required_else_help(true)
        .subcommand_required(true)
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("PATH")
                .help("Path to a folio.toml configuration file")
                .value_hint(ValueHint::FilePath)
                .global(true),
        )
        .subcommand(
            Command::new("new")
                .about("Create a book with one placeholder chapter")
                .arg(book_arg())
                .arg(
                    Arg::new("title")
                        .long("title")
                        .help("Book title (defaults to book.default_title)"),
                )
                .arg(
                    Arg::new("force")
                        .long("force")
                        .help("Overwrite an existing file")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("info")
                .about("Show title, chapters and word counts")
                .arg(book_arg())
                .arg(
                    Arg::new("json")
                        .long("json")
                        .help("Print the summary as JSON")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(
            Command::new("title")
                .about("Set the book title")
                .arg(book_arg())
                .arg(Arg::new("title").required(true).index(2)),
        )
        .subcommand(
            Command::new("chapter")
                .about("Add, delete, rename, show or edit chapters")
                .subcommand_required(true)
                .subcommand(
                    Command::new("add")
                        .about("Append a placeholder chapter and print its id")
                        .arg(book_arg())
                        .arg(Arg::new("title").long("title").help("Title for the new chapter")),
                )
                .subcommand(
                    Command::new("delete")
                        .about("Delete a chapter (the only chapter is kept)")
                        .arg(book_arg())
                        .arg(chapter_id_arg()),
                )
                .subcommand(
                    Command::new("rename")
                        .about("Rename a chapter")
                        .arg(book_arg())
                        .arg(chapter_id_arg())
                        .arg(Arg::new("title").required(true).index(3)),
                )
                .subcommand(
                    Command::new("show")
                        .about("Print a chapter's markup")
                        .arg(book_arg())
                        .arg(chapter_id_arg())
                        .arg(
                            Arg::new("text")
                                .long("text")
                                .help("Print the visible text instead of the markup")
                                .action(ArgAction::SetTrue),
                        ),
                )
                .subcommand(
                    Command::new("set")
                        .about("Replace a chapter's content with markup from a file")
                        .arg(book_arg())
                        .arg(chapter_id_arg())
                        .arg(
                            Arg::new("file")
                                .help("File holding the new markup")
                                .required(true)
                                .index(3)
                                .value_hint(ValueHint::FilePath),
                        ),
                )
                .subcommand(
                    Command::new("insert")
                        .about("Append the sample block of a semantic style")
                        .arg(book_arg())
                        .arg(chapter_id_arg())
                        .arg(Arg::new("style").required(true).index(3)),
                ),
        )
        .subcommand(
            Command::new("toggle")
                .about("Apply or remove a style over a character range of a chapter")
                .arg(book_arg())
                .arg(
                    Arg::new("chapter")
                        .long("chapter")
                        .required(true)
                        .value_parser(value_parser!(u64)),
                )
                .arg(
                    Arg::new("start")
                        .long("start")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(
                    Arg::new("length")
                        .long("length")
                        .required(true)
                        .value_parser(value_parser!(usize)),
                )
                .arg(Arg::new("style").long("style").required(true)),
        )
        .subcommand(
            Command::new("style")
                .about("Inspect and override named styles")
                .subcommand_required(true)
                .subcommand(
                    Command::new("list")
                        .about("List effective styles")
                        .arg(book_arg()),
                )
                .subcommand(
                    Command::new("set")
                        .about("Override a style's CSS declarations")
                        .arg(book_arg())
                        .arg(Arg::new("key").required(true).index(2))
                        .arg(Arg::new("declarations").required(true).index(3)),
                )
                .subcommand(
                    Command::new("reset")
                        .about("Drop a style override")
                        .arg(book_arg())
                        .arg(Arg::new("key").required(true).index(2)),
                )
                .subcommand(
                    Command::new("css")
                        .about("Print the effective stylesheet")
                        .arg(book_arg()),
                )
                .subcommand(
                    Command::new("preview")
                        .about("Print a preview page for one style")
                        .arg(book_arg())
                        .arg(Arg::new("key").required(true).index(2)),
                ),
        )
        .subcommand(
            Command::new("export")
                .about("Render the book as a self-contained document")
                .arg(book_arg())
                .arg(
                    Arg::new("profile")
                        .long("profile")
                        .help("Export profile (defaults to screen-html, or print-pdf with --pdf)")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "screen-html",
                            "print-pdf",
                        ])),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .value_name("FILE")
                        .help("Write to a file instead of stdout")
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("pdf")
                        .long("pdf")
                        .help("Print the print-pdf document to PDF with headless Chrome")
                        .action(ArgAction::SetTrue),
                )
                .arg(
                    Arg::new("page-size")
                        .long("page-size")
                        .help("Override export.print.page_size")
                        .value_parser(clap::builder::PossibleValuesParser::new([
                            "a4", "letter", "a5",
                        ])),
                )
                .arg(
                    Arg::new("margin")
                        .long("margin")
                        .help("Override export.print.margin"),
                )
                .arg(
                    Arg::new("escape-titles")
                        .long("escape-titles")
                        .help("Escape book and chapter titles")
                        .action(ArgAction::SetTrue),
                ),
        )
        .subcommand(Command::new("profiles").about("List the available export profiles"))
}

fn main() {
    let matches = build_cli().get_matches();

    let config = load_cli_config(&matches);
    init_logging(&config);

    match matches.subcommand() {
        Some(("new", sub)) => handle_new_command(sub, &config),
        Some(("info", sub)) => handle_info_command(sub),
        Some(("title", sub)) => {
            let title = required(sub, "title");
            update_book(sub, |book| {
                book.set_title(title);
                Ok::<_, BookError>(())
            });
        }
        Some(("chapter", sub)) => handle_chapter_command(sub),
        Some(("toggle", sub)) => handle_toggle_command(sub),
        Some(("style", sub)) => handle_style_command(sub),
        Some(("export", sub)) => handle_export_command(sub, &config),
        Some(("profiles", _)) => handle_profiles_command(),
        _ => {
            eprintln!("Unknown subcommand. Use --help for usage information.");
            process::exit(1);
        }
    }
}

fn load_cli_config(matches: &ArgMatches) -> FolioConfig {
    let mut loader = Loader::new().with_optional_file("folio.toml");
    if let Some(path) = matches.get_one::<String>("config") {
        loader = loader.with_file(path);
    }

    let loader = match matches.subcommand_matches("export") {
        Some(export) => export_overrides(loader, export),
        None => Ok(loader),
    };

    loader.and_then(Loader::build).unwrap_or_else(|err| {
        eprintln!("Failed to load configuration: {err}");
        process::exit(1);
    })
}

/// Export flags win over every configuration file
fn export_overrides(mut loader: Loader, matches: &ArgMatches) -> Result<Loader, ConfigError> {
    if let Some(size) = matches.get_one::<String>("page-size") {
        loader = loader.set_override("export.print.page_size", size.as_str())?;
    }
    if let Some(margin) = matches.get_one::<String>("margin") {
        loader = loader.set_override("export.print.margin", margin.as_str())?;
    }
    if matches.get_flag("escape-titles") {
        loader = loader.set_override("export.escape_titles", true)?;
    }
    Ok(loader)
}

fn init_logging(config: &FolioConfig) {
    let env = env_logger::Env::default().default_filter_or(config.log.level.as_str());
    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .init();
}

fn exit_with(err: impl Display) -> ! {
    eprintln!("Error: {err}");
    process::exit(1);
}

fn required<'a>(matches: &'a ArgMatches, name: &str) -> &'a str {
    matches
        .get_one::<String>(name)
        .map(|s| s.as_str())
        .expect("required argument")
}

fn chapter_id(matches: &ArgMatches) -> ChapterId {
    *matches.get_one::<u64>("id").expect("id is required")
}

fn open_store(matches: &ArgMatches) -> JsonFileStore {
    JsonFileStore::new(required(matches, "book"))
}

fn load_existing(store: &JsonFileStore) -> Book {
    match store.load_book() {
        Ok(Some(book)) => book,
        Ok(None) => exit_with(format!(
            "No book at {} (create one with `folio new`)",
            store.path().display()
        )),
        Err(err) => exit_with(err),
    }
}

fn save(store: &JsonFileStore, book: &Book) {
    store.save_book(book).unwrap_or_else(|err| exit_with(err));
}

/// Load the book, apply `edit`, save it back. Nothing is written if `edit` fails.
fn update_book<T, E: Display>(
    matches: &ArgMatches,
    edit: impl FnOnce(&mut Book) -> Result<T, E>,
) -> (Book, T) {
    let store = open_store(matches);
    let mut book = load_existing(&store);
    let result = edit(&mut book).unwrap_or_else(|err| exit_with(err));
    save(&store, &book);
    (book, result)
}

fn handle_new_command(matches: &ArgMatches, config: &FolioConfig) {
    let store = open_store(matches);
    if store.path().exists() && !matches.get_flag("force") {
        exit_with(format!(
            "{} already exists (use --force to overwrite)",
            store.path().display()
        ));
    }

    let title = matches
        .get_one::<String>("title")
        .cloned()
        .unwrap_or_else(|| config.book.default_title.clone());
    let book = Book::new(title);
    save(&store, &book);
    println!("Created '{}' at {}", book.title(), store.path().display());
}

fn handle_info_command(matches: &ArgMatches) {
    let store = open_store(matches);
    let book = load_existing(&store);

    let chapters: Vec<(ChapterId, &str, usize)> = book
        .chapters()
        .iter()
        .map(|chapter| {
            let words = chapter.content.plain_text().split_whitespace().count();
            (chapter.id, chapter.title.as_str(), words)
        })
        .collect();
    let overridden: Vec<String> = book
        .styles()
        .list_keys()
        .into_iter()
        .filter(|key| book.styles().is_overridden(key))
        .collect();

    if matches.get_flag("json") {
        let summary = serde_json::json!({
            "title": book.title(),
            "words": book.word_count(),
            "nextChapterId": book.next_chapter_id(),
            "overriddenStyles": overridden,
            "chapters": chapters
                .iter()
                .map(|(id, title, words)| serde_json::json!({ "id": id, "title": title, "words": words }))
                .collect::<Vec<_>>(),
        });
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(err) => exit_with(err),
        }
        return;
    }

    println!("Title: {}", book.title());
    println!("Chapters: {}", chapters.len());
    println!("Words: {}", book.word_count());
    if overridden.is_empty() {
        println!("Style overrides: none");
    } else {
        println!("Style overrides: {}", overridden.join(", "));
    }
    for (id, title, words) in chapters {
        println!("  {id:>3}  {title}  ({words} words)");
    }
}

fn handle_chapter_command(matches: &ArgMatches) {
    match matches.subcommand() {
        Some(("add", sub)) => {
            let title = sub.get_one::<String>("title").cloned();
            let (_, id) = update_book(sub, |book| {
                let id = book.add_chapter();
                if let Some(title) = title {
                    book.rename_chapter(id, title)?;
                }
                Ok::<_, BookError>(id)
            });
            println!("{id}");
        }
        Some(("delete", sub)) => {
            let id = chapter_id(sub);
            let (_, removed) = update_book(sub, |book| book.delete_chapter(id));
            if removed {
                println!("Deleted chapter {id}");
            } else {
                eprintln!("Chapter {id} is the only chapter and was kept");
            }
        }
        Some(("rename", sub)) => {
            let id = chapter_id(sub);
            let title = required(sub, "title");
            update_book(sub, |book| book.rename_chapter(id, title));
        }
        Some(("show", sub)) => {
            let id = chapter_id(sub);
            let book = load_existing(&open_store(sub));
            let chapter = book
                .chapter(id)
                .unwrap_or_else(|| exit_with(BookError::ChapterNotFound(id)));
            if sub.get_flag("text") {
                println!("{}", chapter.content.plain_text());
            } else {
                println!("{}", chapter.content.to_markup());
            }
        }
        Some(("set", sub)) => {
            let id = chapter_id(sub);
            let path = required(sub, "file");
            let markup = fs::read_to_string(path).unwrap_or_else(|err| {
                eprintln!("Error reading file '{path}': {err}");
                process::exit(1);
            });
            update_book(sub, |book| {
                book.set_chapter_content(id, RichFragment::parse(&markup))
            });
        }
        Some(("insert", sub)) => {
            let id = chapter_id(sub);
            let style = required(sub, "style");
            update_book(sub, |book| book.insert_style_block(id, style));
        }
        _ => exit_with("Unknown chapter command"),
    }
}

fn handle_toggle_command(matches: &ArgMatches) {
    let id = *matches.get_one::<u64>("chapter").expect("chapter is required");
    let start = *matches.get_one::<usize>("start").expect("start is required");
    let length = *matches.get_one::<usize>("length").expect("length is required");
    let style = required(matches, "style");

    let (book, _) = update_book(matches, |book| {
        book.toggle_style(id, Selection::new(start, length), style)
    });
    if let Some(chapter) = book.chapter(id) {
        println!("{}", chapter.content.to_markup());
    }
}

fn handle_style_command(matches: &ArgMatches) {
    match matches.subcommand() {
        Some(("list", sub)) => {
            let book = load_existing(&open_store(sub));
            let styles = book.styles();
            for rule in styles.effective_rules() {
                let marker = if styles.is_overridden(rule.key.as_str()) {
                    " (overridden)"
                } else {
                    ""
                };
                println!("{}\t{}{marker}", rule.key, rule.label);
            }
        }
        Some(("set", sub)) => {
            let key = required(sub, "key");
            let declarations = required(sub, "declarations");
            update_book(sub, |book| book.set_style(key, declarations));
        }
        Some(("reset", sub)) => {
            let key = required(sub, "key");
            let (_, existed) = update_book(sub, |book| book.reset_style(key));
            if !existed {
                eprintln!("Style '{key}' had no override");
            }
        }
        Some(("css", sub)) => {
            let book = load_existing(&open_store(sub));
            println!("{}", book.styles().export_css());
        }
        Some(("preview", sub)) => {
            let key = required(sub, "key");
            let book = load_existing(&open_store(sub));
            match book.styles().preview_document(key) {
                Some(page) => println!("{page}"),
                None => exit_with(format!("Unknown style '{key}'")),
            }
        }
        _ => exit_with("Unknown style command"),
    }
}

fn handle_profiles_command() {
    println!("Export profiles:\n");
    for profile in Profile::ALL {
        let renderer = profile.renderer();
        println!("  {:<12} - {}", renderer.name(), renderer.description());
    }
}

fn handle_export_command(matches: &ArgMatches, config: &FolioConfig) {
    let pdf = matches.get_flag("pdf");
    let profile = match matches.get_one::<String>("profile") {
        Some(name) => name.parse::<Profile>().unwrap_or_else(|err| exit_with(err)),
        None if pdf => Profile::PrintPdf,
        None => Profile::ScreenHtml,
    };
    if pdf && profile != Profile::PrintPdf {
        exit_with("--pdf only works with the print-pdf profile");
    }

    let output = matches.get_one::<String>("output");
    if pdf && output.is_none() {
        exit_with("PDF output requires an output file. Use -o <path>.");
    }

    let options = RenderOptions::from(&config.export);
    let book = load_existing(&open_store(matches));
    let document = render_with_options(&book, profile, &options);

    let bytes = if pdf {
        print::Printer::locate(&config.export.print)
            .and_then(|printer| printer.print(&document, options.page_size))
            .unwrap_or_else(|err| exit_with(err))
    } else {
        document.into_bytes()
    };

    match output {
        Some(path) => {
            fs::write(path, bytes).unwrap_or_else(|err| {
                eprintln!("Error writing file '{path}': {err}");
                process::exit(1);
            });
            log::info!("wrote {profile} export to {path}");
        }
        None => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(&bytes)
                .unwrap_or_else(|err| exit_with(err));
        }
    }
}
