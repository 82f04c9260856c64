//! Evaluating a parsed template against a context of values

use std::collections::HashMap;
use std::fmt;

use crate::language::{Constant, Node};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Value {
    Undefined,
    None,
    Boolean(bool),
    Integer(i64),
    String(String),
    Map(Vec<(String, Value)>),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined | Value::None => Ok(()),
            Value::Boolean(value) => write!(f, "{}", value),
            Value::Integer(value) => write!(f, "{}", value),
            Value::String(value) => f.write_str(value),
            Value::Map(entries) => {
                write!(f, "{{")?;
                for (i, (key, value)) in entries
                    .iter()
                    .enumerate()
                {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "'{}': '{}'", key, value)?;
                }
                write!(f, "}}")
            }
        }
    }
}

impl From<&Constant> for Value {
    fn from(constant: &Constant) -> Value {
        match constant {
            Constant::String(value) => Value::String(value.clone()),
            Constant::Integer(value) => Value::Integer(*value),
            Constant::Boolean(value) => Value::Boolean(*value),
            Constant::None => Value::None,
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Value {
        Value::String(value.to_string())
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Value {
        Value::Integer(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    NotCallable(usize, String),
    ArgumentCount(&'static str, usize, usize),
    KeywordArguments(usize),
    NotFormattable(usize),
    MissingKey(String),
    UnsupportedFormat(String),
    UnsupportedNode(usize),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::NotCallable(line, name) => {
                write!(f, "line {}: '{}' is not callable", line, name)
            }
            RenderError::ArgumentCount(function, expected, found) => write!(
                f,
                "{}() takes {} argument{} but {} were given",
                function,
                expected,
                if *expected == 1 { "" } else { "s" },
                found
            ),
            RenderError::KeywordArguments(line) => {
                write!(f, "line {}: keyword arguments are not supported", line)
            }
            RenderError::NotFormattable(line) => {
                write!(f, "line {}: can only format a string with a mapping", line)
            }
            RenderError::MissingKey(key) => write!(f, "no value for placeholder '{}'", key),
            RenderError::UnsupportedFormat(spec) => {
                write!(f, "unsupported format specifier '%{}'", spec)
            }
            RenderError::UnsupportedNode(line) => {
                write!(f, "line {}: node cannot be evaluated", line)
            }
        }
    }
}

pub type Function = fn(&[Value]) -> Result<Value, RenderError>;

/// Functions callable by name from any template.
pub type Globals = HashMap<String, Function>;

/// Variables available to a single render.
pub type Context = HashMap<String, Value>;

pub fn render(template: &Node, context: &Context, globals: &Globals) -> Result<String, RenderError> {
    let mut output = String::new();
    render_node(template, context, globals, &mut output)?;
    Ok(output)
}

fn render_node(
    node: &Node,
    context: &Context,
    globals: &Globals,
    output: &mut String,
) -> Result<(), RenderError> {
    match node {
        Node::Template { body } => {
            for child in body {
                render_node(child, context, globals, output)?;
            }
        }
        Node::Output { nodes, .. } => {
            for child in nodes {
                render_node(child, context, globals, output)?;
            }
        }
        Node::TemplateData { data, .. } => output.push_str(data),
        _ => {
            let value = evaluate(node, context, globals)?;
            output.push_str(&value.to_string());
        }
    }
    Ok(())
}

pub fn evaluate(node: &Node, context: &Context, globals: &Globals) -> Result<Value, RenderError> {
    match node {
        Node::Name { name, .. } => Ok(context
            .get(name)
            .cloned()
            .unwrap_or(Value::Undefined)),
        Node::Const { value, .. } => Ok(Value::from(value)),
        Node::TemplateData { data, .. } => Ok(Value::String(data.clone())),
        Node::Call {
            node: target,
            args,
            kwargs,
            dyn_args,
            dyn_kwargs,
            line,
        } => {
            let function = match target.as_ref() {
                Node::Name { name, .. } => globals
                    .get(name)
                    .ok_or_else(|| RenderError::NotCallable(*line, name.clone()))?,
                _ => return Err(RenderError::UnsupportedNode(*line)),
            };
            if !kwargs.is_empty() || dyn_args.is_some() || dyn_kwargs.is_some() {
                return Err(RenderError::KeywordArguments(*line));
            }

            let values = args
                .iter()
                .map(|arg| evaluate(arg, context, globals))
                .collect::<Result<Vec<Value>, RenderError>>()?;
            function(&values)
        }
        Node::Dict { items, line } => {
            let mut entries = Vec::with_capacity(items.len());
            for item in items {
                match item {
                    Node::Pair { key, value, .. } => {
                        let key = evaluate(key, context, globals)?.to_string();
                        let value = evaluate(value, context, globals)?;
                        entries.push((key, value));
                    }
                    _ => return Err(RenderError::UnsupportedNode(*line)),
                }
            }
            Ok(Value::Map(entries))
        }
        Node::Mod { left, right, line } => {
            let left = evaluate(left, context, globals)?;
            let right = evaluate(right, context, globals)?;
            match (left, right) {
                (Value::String(format), Value::Map(mapping)) => {
                    Ok(Value::String(format_mapping(&format, &mapping)?))
                }
                _ => Err(RenderError::NotFormattable(*line)),
            }
        }
        Node::Template { .. } | Node::Output { .. } | Node::Keyword { .. } | Node::Pair { .. } => {
            Err(RenderError::UnsupportedNode(node.line()))
        }
    }
}

/// Substitute `%(name)s` placeholders from the mapping and collapse `%%`
/// to a single percent sign.
pub fn format_mapping(format: &str, mapping: &[(String, Value)]) -> Result<String, RenderError> {
    let mut result = String::with_capacity(format.len());
    let mut rest = format;

    while let Some(i) = rest.find('%') {
        result.push_str(&rest[..i]);
        rest = &rest[i + 1..];

        if let Some(after) = rest.strip_prefix('%') {
            result.push('%');
            rest = after;
            continue;
        }

        let placeholder = rest
            .strip_prefix('(')
            .and_then(|inner| inner.split_once(')'))
            .and_then(|(key, after)| {
                after
                    .strip_prefix('s')
                    .map(|after| (key, after))
            });

        match placeholder {
            Some((key, after)) => {
                let value = mapping
                    .iter()
                    .find(|(candidate, _)| candidate == key)
                    .map(|(_, value)| value)
                    .ok_or_else(|| RenderError::MissingKey(key.to_string()))?;
                result.push_str(&value.to_string());
                rest = after;
            }
            None => {
                let spec = rest
                    .chars()
                    .next()
                    .map(String::from)
                    .unwrap_or_default();
                return Err(RenderError::UnsupportedFormat(spec));
            }
        }
    }

    result.push_str(rest);
    Ok(result)
}
