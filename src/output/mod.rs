//! Output generation for the transtag CLI application

use serde::Serialize;
use tinytemplate::TinyTemplate;
use tracing::debug;

use transtag::i18n::{CatalogEntry, Message};

static TEMPLATE: &'static str = "{filename}:{line}: {function} {message}\n";

#[derive(Serialize)]
struct Context<'a> {
    filename: &'a str,
    line: usize,
    function: &'a str,
    message: String,
}

/// Dynamic (non-literal) arguments are shown as `-`, and the arguments of
/// multi-argument calls are separated by `|`.
pub fn describe_message(message: &Message) -> String {
    let slot = |value: &Option<&str>| {
        value
            .map(str::to_string)
            .unwrap_or_else(|| "-".to_string())
    };

    match message {
        Message::Single(value) => slot(value),
        Message::Tuple(values) => values
            .iter()
            .map(slot)
            .collect::<Vec<String>>()
            .join("|"),
    }
}

pub fn via_template<'a>(
    filename: &str,
    entries: impl Iterator<Item = CatalogEntry<'a>>,
) -> Result<String, tinytemplate::error::Error> {
    let mut tt = TinyTemplate::new();
    tt.set_default_formatter(&tinytemplate::format_unescaped);
    tt.add_template("entry", TEMPLATE)?;

    let mut result = String::new();
    for entry in entries {
        let context = Context {
            filename,
            line: entry.line,
            function: entry.function,
            message: describe_message(&entry.message),
        };
        result.push_str(&tt.render("entry", &context)?);
    }

    debug!("Rendered {} bytes of output", result.len());
    Ok(result)
}
