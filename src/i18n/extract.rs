//! Finding calls to translation functions in a parsed template

use serde::Serialize;

use crate::language::*;

/// The only gettext functions really useful within a template.
pub const GETTEXT_FUNCTIONS: &[&str] = &["_", "gettext", "ngettext"];

/// The string arguments of a translation call. Arguments that aren't
/// string literals are `None`, so dynamic arguments can be told apart
/// from missing ones.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum Message<'a> {
    Single(Option<&'a str>),
    Tuple(Vec<Option<&'a str>>),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Extracted<'a> {
    pub line: usize,
    pub function: &'a str,
    pub message: Message<'a>,
}

/// Every call to one of the given functions anywhere in the tree, in
/// source order. Calls are reported once per call site, identical
/// messages included.
pub fn extract_from_ast<'a, S>(
    node: &'a Node,
    functions: &'a [S],
) -> impl Iterator<Item = Extracted<'a>> + 'a
where
    S: AsRef<str>,
{
    node.walk()
        .filter_map(move |node| extract_call(node, functions))
}

fn extract_call<'a, S>(node: &'a Node, functions: &[S]) -> Option<Extracted<'a>>
where
    S: AsRef<str>,
{
    let (target, args, line) = match node {
        Node::Call {
            node, args, line, ..
        } => (node, args, *line),
        _ => return None,
    };

    let function = match target.as_ref() {
        Node::Name { name, .. } => name.as_str(),
        _ => return None,
    };
    if !functions
        .iter()
        .any(|candidate| candidate.as_ref() == function)
    {
        return None;
    }

    let mut strings: Vec<Option<&'a str>> = args
        .iter()
        .map(|arg| match arg {
            Node::Const { value, .. } => value.as_str(),
            _ => None,
        })
        .collect();

    let message = if strings.len() == 1 {
        Message::Single(strings.remove(0))
    } else {
        Message::Tuple(strings)
    };

    Some(Extracted {
        line,
        function,
        message,
    })
}
