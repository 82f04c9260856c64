//! The `{% trans %}` tag: translatable blocks compiled into calls to
//! `gettext` and `ngettext`.

use tracing::debug;

use crate::environment::Extension;
use crate::language::*;
use crate::lexing::TokenKind;
use crate::parsing::{Parser, ParsingError};
use crate::runtime::{Globals, RenderError, Value};

pub struct TransExtension;

impl Extension for TransExtension {
    fn name(&self) -> &'static str {
        "trans"
    }

    fn tags(&self) -> &'static [&'static str] {
        &["trans"]
    }

    /// Install pass-through translation functions so templates render
    /// their untranslated text when no catalog is configured.
    fn update_globals(&self, globals: &mut Globals) {
        globals.insert("_".to_string(), noop_gettext);
        globals.insert("gettext".to_string(), noop_gettext);
        globals.insert("ngettext".to_string(), noop_ngettext);
    }

    fn parse(&self, parser: &mut Parser<'_>) -> Result<Node, ParsingError> {
        parse_trans(parser)
    }
}

fn noop_gettext(args: &[Value]) -> Result<Value, RenderError> {
    match args {
        [message] => Ok(message.clone()),
        _ => Err(RenderError::ArgumentCount("gettext", 1, args.len())),
    }
}

fn noop_ngettext(args: &[Value]) -> Result<Value, RenderError> {
    match args {
        [singular, plural, count] => {
            let one = matches!(count, Value::Integer(1) | Value::Boolean(true));
            Ok(if one { singular.clone() } else { plural.clone() })
        }
        _ => Err(RenderError::ArgumentCount("ngettext", 3, args.len())),
    }
}

/// Double every percent sign so literal text survives `%` formatting.
pub fn escape_literal_percent(text: &str) -> String {
    text.replace('%', "%%")
}

/// Undo [`escape_literal_percent`] when nothing is referenced, since no
/// formatting will ever be applied to the message.
pub fn unescape_if_no_placeholders(text: &str, referenced: &[String]) -> String {
    if referenced.is_empty() {
        text.replace("%%", "%")
    } else {
        text.to_string()
    }
}

// Accumulated state while parsing one tag, handed through each phase.
struct Translation {
    line: usize,
    variables: Vec<(String, Node)>,
    referenced: Vec<String>,
    plural_expr: Option<Node>,
}

impl Translation {
    fn new(line: usize) -> Translation {
        Translation {
            line,
            variables: Vec::new(),
            referenced: Vec::new(),
            plural_expr: None,
        }
    }

    fn is_bound(&self, name: &str) -> bool {
        self.variables
            .iter()
            .any(|(existing, _)| existing == name)
    }

    fn reference(&mut self, names: &[String]) {
        for name in names {
            if !self
                .referenced
                .contains(name)
            {
                self.referenced
                    .push(name.clone());
            }
        }
    }

    // every placeholder needs a value, so free names load the variable of
    // the same name.
    fn complete_bindings(&mut self) {
        for name in &self.referenced {
            if !self
                .variables
                .iter()
                .any(|(existing, _)| existing == name)
            {
                self.variables
                    .push((name.clone(), Node::name(name, self.line)));
            }
        }
    }

    fn into_node(self, singular: String, plural: Option<(String, Node)>) -> Node {
        let line = self.line;

        let call = match plural {
            None => Node::call(
                Node::name("gettext", line),
                vec![Node::string(&singular, line)],
                line,
            ),
            Some((plural, count)) => Node::call(
                Node::name("ngettext", line),
                vec![
                    Node::string(&singular, line),
                    Node::string(&plural, line),
                    count,
                ],
                line,
            ),
        };

        let node = if self
            .variables
            .is_empty()
        {
            call
        } else {
            let items = self
                .variables
                .into_iter()
                .map(|(name, value)| Node::pair(Node::string(&name, line), value, line))
                .collect();
            Node::modulo(call, Node::Dict { items, line }, line)
        };

        Node::Output {
            nodes: vec![node],
            line,
        }
    }
}

/// Parse a translation block. The stream is positioned at the `trans`
/// keyword and is left after the closing `endtrans` statement.
pub fn parse_trans(parser: &mut Parser<'_>) -> Result<Node, ParsingError> {
    let line = parser
        .stream
        .next()
        .line;
    let mut translation = Translation::new(line);

    read_header(parser, &mut translation)?;

    let singular = read_singular(parser, &mut translation)?;
    let plural = read_plural(parser, &mut translation)?;

    translation.complete_bindings();

    let singular = unescape_if_no_placeholders(&singular, &translation.referenced);
    let plural = plural.map(|(text, count)| {
        (
            unescape_if_no_placeholders(&text, &translation.referenced),
            count,
        )
    });

    debug!(
        "Translation block at line {} with {} variable{}{}",
        line,
        translation
            .variables
            .len(),
        if translation
            .variables
            .len()
            == 1
        {
            ""
        } else {
            "s"
        },
        if plural.is_some() { ", pluralized" } else { "" }
    );

    Ok(translation.into_node(singular, plural))
}

fn read_header(parser: &mut Parser<'_>, translation: &mut Translation) -> Result<(), ParsingError> {
    // optional colon, no meaning
    parser
        .stream
        .skip_if(TokenKind::Colon);

    while !parser
        .stream
        .test(TokenKind::BlockEnd)
    {
        if !translation
            .variables
            .is_empty()
        {
            parser
                .stream
                .expect(TokenKind::Comma)?;
        }

        let name = parser
            .stream
            .expect(TokenKind::Name)?;
        if translation.is_bound(&name.value) {
            return Err(ParsingError::DuplicateVariable(
                translation.line,
                name.value,
            ));
        }

        let value = if parser
            .stream
            .skip_if(TokenKind::Assign)
        {
            parser.parse_expression()?
        } else {
            Node::name(&name.value, translation.line)
        };

        if translation
            .plural_expr
            .is_none()
        {
            translation.plural_expr = Some(value.clone());
        }

        translation
            .variables
            .push((name.value, value));
    }

    parser.end_statement()
}

fn read_singular(
    parser: &mut Parser<'_>,
    translation: &mut Translation,
) -> Result<String, ParsingError> {
    let (names, singular) = scan_body(parser, true)?;

    translation.reference(&names);
    if translation
        .plural_expr
        .is_none()
    {
        if let Some(first) = names.first() {
            translation.plural_expr = Some(Node::name(first, translation.line));
        }
    }

    Ok(singular)
}

// Returns the plural text and the expression counting it, if there was a
// pluralize section. Consumes the closing endtrans statement either way.
fn read_plural(
    parser: &mut Parser<'_>,
    translation: &mut Translation,
) -> Result<Option<(String, Node)>, ParsingError> {
    if !parser
        .stream
        .test_name("pluralize")
    {
        parser
            .stream
            .next();
        parser.end_statement()?;
        return Ok(None);
    }

    parser
        .stream
        .next();
    if !parser
        .stream
        .test(TokenKind::BlockEnd)
    {
        translation.plural_expr = Some(parser.parse_expression()?);
    }
    parser.end_statement()?;

    let count = translation
        .plural_expr
        .take()
        .ok_or(ParsingError::PluralizeWithoutVariables(translation.line))?;

    let (names, plural) = scan_body(parser, false)?;
    translation.reference(&names);

    parser
        .stream
        .next();
    parser.end_statement()?;

    Ok(Some((plural, count)))
}

/// Collect text up to the next `endtrans` (or `pluralize`, if allowed),
/// returning the names referenced in first-seen order and the message
/// with placeholders in `%(name)s` form. The stream is left at the
/// keyword that stopped the scan.
pub fn scan_body(
    parser: &mut Parser<'_>,
    allow_pluralize: bool,
) -> Result<(Vec<String>, String), ParsingError> {
    let mut referenced: Vec<String> = Vec::new();
    let mut buffer = String::new();

    loop {
        let token = parser
            .stream
            .current();
        let line = token.line;

        match token.kind {
            TokenKind::Data => {
                buffer.push_str(&escape_literal_percent(&token.value));
                parser
                    .stream
                    .next();
            }
            TokenKind::VariableBegin => {
                parser
                    .stream
                    .next();
                let name = parser
                    .stream
                    .expect(TokenKind::Name)?
                    .value;
                buffer.push_str(&format!("%({})s", name));
                if !referenced.contains(&name) {
                    referenced.push(name);
                }
                parser
                    .stream
                    .expect(TokenKind::VariableEnd)?;
            }
            TokenKind::BlockBegin => {
                parser
                    .stream
                    .next();
                let keyword = parser
                    .stream
                    .current();
                if keyword.test_name("endtrans") {
                    break;
                } else if keyword.test_name("pluralize") {
                    if allow_pluralize {
                        break;
                    }
                    return Err(ParsingError::MultiplePluralize(keyword.line));
                }
                return Err(ParsingError::ControlStructure(
                    keyword.line,
                    keyword.describe(),
                ));
            }
            TokenKind::Eof => return Err(ParsingError::UnclosedTranslation(line)),
            TokenKind::VariableEnd
            | TokenKind::BlockEnd
            | TokenKind::Name
            | TokenKind::String
            | TokenKind::Integer
            | TokenKind::Comma
            | TokenKind::Assign
            | TokenKind::Colon
            | TokenKind::LeftParen
            | TokenKind::RightParen => return Err(ParsingError::IllegalParserState(line)),
        }
    }

    Ok((referenced, buffer))
}
