//! Types representing an Abstract Syntax Tree for templates

/// Literal values that can appear directly in template source.
#[derive(Clone, Eq, Debug, PartialEq)]
pub enum Constant {
    String(String),
    Integer(i64),
    Boolean(bool),
    None,
}

impl Constant {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Constant::String(value) => Some(value),
            _ => None,
        }
    }
}

/// Nodes of a parsed template. Every node other than the root carries the
/// (one-origin) line in the source it came from.
#[derive(Clone, Eq, Debug, PartialEq)]
pub enum Node {
    Template {
        body: Vec<Node>,
    },
    Output {
        nodes: Vec<Node>,
        line: usize,
    },
    TemplateData {
        data: String,
        line: usize,
    },
    Name {
        name: String,
        line: usize,
    },
    Const {
        value: Constant,
        line: usize,
    },
    Call {
        node: Box<Node>,
        args: Vec<Node>,
        kwargs: Vec<Node>,
        dyn_args: Option<Box<Node>>,
        dyn_kwargs: Option<Box<Node>>,
        line: usize,
    },
    Keyword {
        key: String,
        value: Box<Node>,
        line: usize,
    },
    Pair {
        key: Box<Node>,
        value: Box<Node>,
        line: usize,
    },
    Dict {
        items: Vec<Node>,
        line: usize,
    },
    // string formatting, `left % right`
    Mod {
        left: Box<Node>,
        right: Box<Node>,
        line: usize,
    },
}

impl Node {
    pub fn name(name: &str, line: usize) -> Node {
        Node::Name {
            name: name.to_string(),
            line,
        }
    }

    pub fn string(value: &str, line: usize) -> Node {
        Node::Const {
            value: Constant::String(value.to_string()),
            line,
        }
    }

    /// A call with positional arguments only, which is all that
    /// translation blocks generate.
    pub fn call(node: Node, args: Vec<Node>, line: usize) -> Node {
        Node::Call {
            node: Box::new(node),
            args,
            kwargs: vec![],
            dyn_args: None,
            dyn_kwargs: None,
            line,
        }
    }

    pub fn pair(key: Node, value: Node, line: usize) -> Node {
        Node::Pair {
            key: Box::new(key),
            value: Box::new(value),
            line,
        }
    }

    pub fn modulo(left: Node, right: Node, line: usize) -> Node {
        Node::Mod {
            left: Box::new(left),
            right: Box::new(right),
            line,
        }
    }

    /// Source line of this node. The root template is considered to start
    /// on line 1.
    pub fn line(&self) -> usize {
        match self {
            Node::Template { .. } => 1,
            Node::Output { line, .. } => *line,
            Node::TemplateData { line, .. } => *line,
            Node::Name { line, .. } => *line,
            Node::Const { line, .. } => *line,
            Node::Call { line, .. } => *line,
            Node::Keyword { line, .. } => *line,
            Node::Pair { line, .. } => *line,
            Node::Dict { line, .. } => *line,
            Node::Mod { line, .. } => *line,
        }
    }

    /// Direct children, in source order.
    pub fn children(&self) -> Vec<&Node> {
        match self {
            Node::Template { body } => body
                .iter()
                .collect(),
            Node::Output { nodes, .. } => nodes
                .iter()
                .collect(),
            Node::TemplateData { .. } | Node::Name { .. } | Node::Const { .. } => vec![],
            Node::Call {
                node,
                args,
                kwargs,
                dyn_args,
                dyn_kwargs,
                ..
            } => {
                let mut children = vec![node.as_ref()];
                children.extend(args.iter());
                children.extend(kwargs.iter());
                children.extend(dyn_args.as_deref());
                children.extend(dyn_kwargs.as_deref());
                children
            }
            Node::Keyword { value, .. } => vec![value.as_ref()],
            Node::Pair { key, value, .. } => vec![key.as_ref(), value.as_ref()],
            Node::Dict { items, .. } => items
                .iter()
                .collect(),
            Node::Mod { left, right, .. } => vec![left.as_ref(), right.as_ref()],
        }
    }

    /// Visit this node and all of its descendants depth first, parents
    /// before children.
    pub fn walk(&self) -> Walk<'_> {
        Walk { stack: vec![self] }
    }
}

/// Pre-order iterator over a tree of nodes; see [`Node::walk`].
pub struct Walk<'a> {
    stack: Vec<&'a Node>,
}

impl<'a> Iterator for Walk<'a> {
    type Item = &'a Node;

    fn next(&mut self) -> Option<&'a Node> {
        let node = self
            .stack
            .pop()?;

        // reversed so that the first child is the next one popped
        self.stack
            .extend(
                node.children()
                    .into_iter()
                    .rev(),
            );

        Some(node)
    }
}

#[cfg(test)]
mod check {
    use super::*;

    #[test]
    fn walking_is_preorder() {
        let tree = Node::Template {
            body: vec![Node::Output {
                nodes: vec![
                    Node::call(
                        Node::name("gettext", 2),
                        vec![Node::string("a", 2)],
                        2,
                    ),
                    Node::TemplateData {
                        data: "x".to_string(),
                        line: 3,
                    },
                ],
                line: 2,
            }],
        };

        let lines: Vec<usize> = tree
            .walk()
            .map(|node| node.line())
            .collect();
        assert_eq!(lines, vec![1, 2, 2, 2, 2, 3]);

        let names: Vec<&str> = tree
            .walk()
            .filter_map(|node| match node {
                Node::Name { name, .. } => Some(name.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(names, vec!["gettext"]);
    }

    #[test]
    fn constant_strings() {
        assert_eq!(Constant::String("hello".to_string()).as_str(), Some("hello"));
        assert_eq!(Constant::Integer(1).as_str(), None);
        assert_eq!(Constant::None.as_str(), None);
    }
}
