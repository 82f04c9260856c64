use std::collections::HashMap;
use std::path::Path;

use clap::{Arg, ArgAction, Command};
use owo_colors::OwoColorize;
use tracing::{debug, Level};

use transtag::i18n::{self, Options, GETTEXT_FUNCTIONS};
use transtag::parsing;
use transtag::runtime::{Context, Value};

mod output;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let matches = Command::new("transtag")
        .version(VERSION)
        .propagate_version(true)
        .author("Andrew Cowie")
        .about("Translatable sections in templates.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("debug")
                .long("debug")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log diagnostic detail to standard error."),
        )
        .subcommand(
            Command::new("extract")
                .about("List the translatable messages in the given templates")
                .arg(
                    Arg::new("keyword")
                        .short('k')
                        .long("keyword")
                        .action(ArgAction::Append)
                        .help("Name of a translation function to look for. May be repeated; defaults to _, gettext, and ngettext."),
                )
                .arg(
                    Arg::new("comment-tag")
                        .short('c')
                        .long("comment-tag")
                        .action(ArgAction::Append)
                        .help("Prefix marking comments addressed to translators. Accepted, but comments are not yet collected."),
                )
                .arg(
                    Arg::new("option")
                        .short('o')
                        .long("option")
                        .action(ArgAction::Append)
                        .help("Extraction option as KEY=VALUE, for example trim_blocks=yes or block_start_string=<%."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .action(ArgAction::Append)
                        .help("The template files to extract messages from."),
                ),
        )
        .subcommand(
            Command::new("render")
                .about("Render the given template with untranslated messages")
                .arg(
                    Arg::new("set")
                        .short('s')
                        .long("set")
                        .action(ArgAction::Append)
                        .help("Variable available to the template, as NAME=VALUE."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The template file to render."),
                ),
        )
        .get_matches();

    let level = if matches.get_flag("debug") {
        Level::DEBUG
    } else {
        Level::WARN
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    match matches.subcommand() {
        Some(("extract", submatches)) => {
            let keywords: Vec<&str> = match submatches.get_many::<String>("keyword") {
                Some(values) => values
                    .map(String::as_str)
                    .collect(),
                None => GETTEXT_FUNCTIONS.to_vec(),
            };
            let comment_tags: Vec<&str> = submatches
                .get_many::<String>("comment-tag")
                .map(|values| {
                    values
                        .map(String::as_str)
                        .collect()
                })
                .unwrap_or_default();
            let options = pairs(submatches.get_many::<String>("option"));

            debug!(?keywords, ?options);

            let mut failed = false;
            for filename in submatches
                .get_many::<String>("filename")
                .into_iter()
                .flatten()
            {
                if !extract(Path::new(filename), &keywords, &comment_tags, &options) {
                    failed = true;
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
        Some(("render", submatches)) => {
            let variables = pairs(submatches.get_many::<String>("set"));
            if let Some(filename) = submatches.get_one::<String>("filename") {
                if !render(Path::new(filename), &variables) {
                    std::process::exit(1);
                }
            }
        }
        Some(_) => {
            println!("No valid subcommand was used")
        }
        None => {
            println!("usage: transtag [COMMAND] ...");
            println!("Try '--help' for more information.");
        }
    }
}

// Split KEY=VALUE arguments; an argument without '=' is a key with an
// empty value.
fn pairs<'a>(values: Option<impl Iterator<Item = &'a String>>) -> HashMap<String, String> {
    values
        .into_iter()
        .flatten()
        .map(|pair| match pair.split_once('=') {
            Some((key, value)) => (key.to_string(), value.to_string()),
            None => (pair.to_string(), String::new()),
        })
        .collect()
}

fn extract(
    filename: &Path,
    keywords: &[&str],
    comment_tags: &[&str],
    options: &HashMap<String, String>,
) -> bool {
    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}: {}: {}", "error".bright_red(), filename.display(), error);
            return false;
        }
    };

    let catalog = match i18n::babel_extract(content.as_slice(), keywords, comment_tags, options) {
        Ok(catalog) => catalog,
        Err(i18n::ExtractError::Template(error)) => {
            let error = transtag::error::TemplateError {
                filename: filename
                    .display()
                    .to_string(),
                ..error
            };
            eprintln!("{}", error.full_details());
            return false;
        }
        Err(error) => {
            eprintln!("{}: {}: {}", "error".bright_red(), filename.display(), error);
            return false;
        }
    };

    match output::via_template(&filename.to_string_lossy(), catalog.entries()) {
        Ok(text) => {
            print!("{}", text);
            true
        }
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            false
        }
    }
}

fn render(filename: &Path, variables: &HashMap<String, String>) -> bool {
    let options = Options::default();

    let result = parsing::load(filename)
        .map_err(|error| format!("{}: {}", filename.display(), error))
        .and_then(|bytes| {
            options
                .decode(&bytes)
                .map_err(|error| format!("{}: {}", filename.display(), error))
        });
    let source = match result {
        Ok(source) => source,
        Err(message) => {
            eprintln!("{}: {}", "error".bright_red(), message);
            return false;
        }
    };

    let environment = match options.environment() {
        Ok(environment) => environment,
        Err(error) => {
            eprintln!("{}: {}", "error".bright_red(), error);
            return false;
        }
    };

    let name = filename
        .display()
        .to_string();
    let template = match environment.parse(&source, Some(&name)) {
        Ok(template) => template,
        Err(error) => {
            eprintln!("{}", error.full_details());
            return false;
        }
    };

    let context: Context = variables
        .iter()
        .map(|(key, value)| (key.clone(), to_value(value)))
        .collect();

    match environment.render(&template, &context) {
        Ok(text) => {
            print!("{}", text);
            true
        }
        Err(error) => {
            eprintln!("{}: {}: {}", "error".bright_red(), name, error);
            false
        }
    }
}

fn to_value(text: &str) -> Value {
    match text {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => match text.parse::<i64>() {
            Ok(number) => Value::Integer(number),
            Err(_) => Value::String(text.to_string()),
        },
    }
}
