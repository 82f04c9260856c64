#[cfg(test)]
mod verify {
    use std::collections::HashMap;

    use transtag::environment::Environment;
    use transtag::i18n::TransExtension;
    use transtag::language::*;
    use transtag::parsing::{self, ParsingError};
    use transtag::runtime::Value;

    fn environment() -> Environment {
        Environment::new().with_extension(Box::new(TransExtension))
    }

    fn parse(source: &str) -> Result<Node, ParsingError> {
        parsing::parse(&environment(), source, None)
    }

    fn render(source: &str, variables: &[(&str, Value)]) -> String {
        let environment = environment();
        let template = environment
            .parse(source, None)
            .unwrap();
        let context: HashMap<String, Value> = variables
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        environment
            .render(&template, &context)
            .unwrap()
    }

    fn gettext(message: &str, line: usize) -> Node {
        Node::call(
            Node::name("gettext", line),
            vec![Node::string(message, line)],
            line,
        )
    }

    fn mapping(pairs: Vec<(&str, Node)>, line: usize) -> Node {
        Node::Dict {
            items: pairs
                .into_iter()
                .map(|(key, value)| Node::pair(Node::string(key, line), value, line))
                .collect(),
            line,
        }
    }

    fn output(node: Node, line: usize) -> Node {
        Node::Template {
            body: vec![Node::Output {
                nodes: vec![node],
                line,
            }],
        }
    }

    #[test]
    fn singular_only() {
        let result = parse("{% trans %}Hello 100%!{% endtrans %}");
        assert_eq!(result, Ok(output(gettext("Hello 100%!", 1), 1)));
    }

    #[test]
    fn implicit_bindings() {
        let result = parse("{% trans %}Hello {{ user }}!{% endtrans %}");
        assert_eq!(
            result,
            Ok(output(
                Node::modulo(
                    gettext("Hello %(user)s!", 1),
                    mapping(vec![("user", Node::name("user", 1))], 1),
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn percent_signs_stay_escaped_with_placeholders() {
        let result = parse("{% trans %}100% of {{ total }}{% endtrans %}");
        assert_eq!(
            result,
            Ok(output(
                Node::modulo(
                    gettext("100%% of %(total)s", 1),
                    mapping(vec![("total", Node::name("total", 1))], 1),
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn explicit_bindings() {
        let result = parse("{% trans user=_('Bob'), count %}{{ user }} has {{ other }}{% endtrans %}");

        // header bindings first, then names only seen in the body
        assert_eq!(
            result,
            Ok(output(
                Node::modulo(
                    gettext("%(user)s has %(other)s", 1),
                    mapping(
                        vec![
                            (
                                "user",
                                Node::call(Node::name("_", 1), vec![Node::string("Bob", 1)], 1)
                            ),
                            ("count", Node::name("count", 1)),
                            ("other", Node::name("other", 1)),
                        ],
                        1
                    ),
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn colon_after_keyword() {
        let with = parse("{% trans: user %}{{ user }}{% endtrans %}");
        let without = parse("{% trans user %}{{ user }}{% endtrans %}");
        assert!(with.is_ok());
        assert_eq!(with, without);
    }

    #[test]
    fn pluralizing_on_first_binding() {
        let result = parse("{% trans count=n %}One{% pluralize %}{{ count }} items{% endtrans %}");
        assert_eq!(
            result,
            Ok(output(
                Node::modulo(
                    Node::call(
                        Node::name("ngettext", 1),
                        vec![
                            Node::string("One", 1),
                            Node::string("%(count)s items", 1),
                            Node::name("n", 1),
                        ],
                        1
                    ),
                    mapping(vec![("count", Node::name("n", 1))], 1),
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn pluralizing_on_body_name() {
        let source = r#"
{% trans %}
{{ apples }} apple
{% pluralize %}
{{ apples }} apples
{% endtrans %}
        "#
        .trim_ascii();

        let result = parse(source).unwrap();
        let call = result
            .walk()
            .find(|node| matches!(node, Node::Call { .. }))
            .unwrap();

        match call {
            Node::Call { node, args, line, .. } => {
                assert_eq!(node.as_ref(), &Node::name("ngettext", 1));
                assert_eq!(args[2], Node::name("apples", 1));
                assert_eq!(*line, 1);
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn pluralizing_on_explicit_count() {
        let result = parse("{% trans %}a{% pluralize n %}b{% endtrans %}");
        assert_eq!(
            result,
            Ok(output(
                Node::call(
                    Node::name("ngettext", 1),
                    vec![
                        Node::string("a", 1),
                        Node::string("b", 1),
                        Node::name("n", 1)
                    ],
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn explicit_count_overrides_binding() {
        let result = parse("{% trans count=n %}{{ count }} a{% pluralize m %}{{ count }} b{% endtrans %}");
        assert_eq!(
            result,
            Ok(output(
                Node::modulo(
                    Node::call(
                        Node::name("ngettext", 1),
                        vec![
                            Node::string("%(count)s a", 1),
                            Node::string("%(count)s b", 1),
                            Node::name("m", 1),
                        ],
                        1
                    ),
                    mapping(vec![("count", Node::name("n", 1))], 1),
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn plural_percent_signs_without_placeholders() {
        let result = parse("{% trans %}5%{% pluralize n %}6%{% endtrans %}");
        assert_eq!(
            result,
            Ok(output(
                Node::call(
                    Node::name("ngettext", 1),
                    vec![
                        Node::string("5%", 1),
                        Node::string("6%", 1),
                        Node::name("n", 1)
                    ],
                    1
                ),
                1
            ))
        );
    }

    #[test]
    fn surrounding_text() {
        let result = parse("<p>{% trans %}Hi{% endtrans %}</p>").unwrap();
        assert_eq!(
            result
                .children()
                .len(),
            3
        );
    }

    #[test]
    fn rendering_untranslated() {
        assert_eq!(
            render(
                "{% trans %}Hello {{ user }}, 100% done{% endtrans %}",
                &[("user", Value::from("Bob"))]
            ),
            "Hello Bob, 100% done"
        );
        assert_eq!(
            render("{% trans %}Just 5%{% endtrans %}", &[]),
            "Just 5%"
        );

        let source = "{% trans count=n %}One item{% pluralize %}{{ count }} items{% endtrans %}";
        assert_eq!(render(source, &[("n", Value::from(1))]), "One item");
        assert_eq!(render(source, &[("n", Value::from(3))]), "3 items");
        assert_eq!(render(source, &[("n", Value::from(0))]), "0 items");
    }
}
