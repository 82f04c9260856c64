use super::*;

// Parse the contents of a print statement as a single expression.
fn expression(source: &str) -> Result<Node, ParsingError> {
    let environment = Environment::new();
    let tokens = environment.tokenize(&format!("{{{{ {} }}}}", source))?;
    let mut parser = Parser::new(&environment, TokenStream::new(tokens));

    parser
        .stream
        .expect(TokenKind::VariableBegin)?;
    let node = parser.parse_expression()?;
    parser
        .stream
        .expect(TokenKind::VariableEnd)?;

    Ok(node)
}

fn template(source: &str) -> Result<Node, ParsingError> {
    let environment = Environment::new();
    let tokens = environment.tokenize(source)?;
    let mut parser = Parser::new(&environment, TokenStream::new(tokens));
    parser.parse()
}

#[test]
fn primary_expressions() {
    assert_eq!(expression("user"), Ok(Node::name("user", 1)));
    assert_eq!(expression("'hello'"), Ok(Node::string("hello", 1)));
    assert_eq!(
        expression("42"),
        Ok(Node::Const {
            value: Constant::Integer(42),
            line: 1
        })
    );
    assert_eq!(
        expression("True"),
        Ok(Node::Const {
            value: Constant::Boolean(true),
            line: 1
        })
    );
    assert_eq!(
        expression("false"),
        Ok(Node::Const {
            value: Constant::Boolean(false),
            line: 1
        })
    );
    assert_eq!(
        expression("none"),
        Ok(Node::Const {
            value: Constant::None,
            line: 1
        })
    );
    assert_eq!(expression("(user)"), Ok(Node::name("user", 1)));
}

#[test]
fn adjacent_strings() {
    assert_eq!(
        expression(r#"'Hello, ' "World""#),
        Ok(Node::string("Hello, World", 1))
    );
}

#[test]
fn calls() {
    assert_eq!(
        expression("_('Hello')"),
        Ok(Node::call(
            Node::name("_", 1),
            vec![Node::string("Hello", 1)],
            1
        ))
    );

    assert_eq!(
        expression("ngettext('one', 'many', n,)"),
        Ok(Node::call(
            Node::name("ngettext", 1),
            vec![
                Node::string("one", 1),
                Node::string("many", 1),
                Node::name("n", 1)
            ],
            1
        ))
    );

    // calls on the result of calls
    assert_eq!(
        expression("f()(x)"),
        Ok(Node::call(
            Node::call(Node::name("f", 1), vec![], 1),
            vec![Node::name("x", 1)],
            1
        ))
    );
}

#[test]
fn keyword_arguments() {
    assert_eq!(
        expression("gettext('%(n)s apples', n=count)"),
        Ok(Node::Call {
            node: Box::new(Node::name("gettext", 1)),
            args: vec![Node::string("%(n)s apples", 1)],
            kwargs: vec![Node::Keyword {
                key: "n".to_string(),
                value: Box::new(Node::name("count", 1)),
                line: 1,
            }],
            dyn_args: None,
            dyn_kwargs: None,
            line: 1,
        })
    );

    assert_eq!(
        expression("f(a=1, b)"),
        Err(ParsingError::InvalidExpression(
            1,
            "positional argument after keyword argument".to_string()
        ))
    );
}

#[test]
fn malformed_expressions() {
    assert_eq!(
        expression("f(a b)"),
        Err(ParsingError::Expected(
            1,
            TokenKind::Comma,
            "'b'".to_string()
        ))
    );
    assert_eq!(
        expression(","),
        Err(ParsingError::InvalidExpression(1, "','".to_string()))
    );
    assert_eq!(
        expression("(x"),
        Err(ParsingError::Expected(
            1,
            TokenKind::RightParen,
            "end of print statement".to_string()
        ))
    );
}

#[test]
fn outputs() {
    let result = template("Hello {{ user }}!\n");
    assert_eq!(
        result,
        Ok(Node::Template {
            body: vec![
                Node::Output {
                    nodes: vec![Node::TemplateData {
                        data: "Hello ".to_string(),
                        line: 1
                    }],
                    line: 1
                },
                Node::Output {
                    nodes: vec![Node::name("user", 1)],
                    line: 1
                },
                Node::Output {
                    nodes: vec![Node::TemplateData {
                        data: "!\n".to_string(),
                        line: 1
                    }],
                    line: 1
                },
            ]
        })
    );

    assert_eq!(template(""), Ok(Node::Template { body: vec![] }));
}

#[test]
fn statements_need_an_extension() {
    assert_eq!(
        template("\n{% trans %}"),
        Err(ParsingError::UnknownTag(2, "trans".to_string()))
    );
    assert_eq!(
        template("{% 'quoted' %}"),
        Err(ParsingError::Expected(
            1,
            TokenKind::Name,
            "string 'quoted'".to_string()
        ))
    );
}

#[test]
fn classifying_errors() {
    assert_eq!(
        ParsingError::DuplicateVariable(1, "x".to_string()).kind(),
        ErrorKind::Assertion
    );
    assert_eq!(ParsingError::MultiplePluralize(1).kind(), ErrorKind::Assertion);
    assert_eq!(
        ParsingError::UnclosedTranslation(1).kind(),
        ErrorKind::Syntax
    );
    assert_eq!(
        ParsingError::UnknownTag(3, "if".to_string()).line(),
        3
    );
}
