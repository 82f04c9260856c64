#[cfg(test)]
mod syntax {
    use transtag::environment::Environment;
    use transtag::i18n::TransExtension;
    use transtag::lexing::TokenKind;
    use transtag::parsing::{self, ErrorKind, ParsingError};

    /// Helper function to check that parsing fails with exactly the
    /// expected error
    fn expect_error(content: &str, expected: ParsingError) {
        let environment = Environment::new().with_extension(Box::new(TransExtension));
        let result = parsing::parse(&environment, content, None);
        match result {
            Ok(_) => panic!(
                "Expected parsing to fail, but it succeeded for input: {}",
                content
            ),
            Err(error) => {
                if error != expected {
                    panic!(
                        "Expected error {:?} but got: {:?} for input '{}'",
                        expected, error, content
                    );
                }
            }
        }
    }

    #[test]
    fn duplicate_variable() {
        expect_error(
            "{% trans x, x %}{{ x }}{% endtrans %}",
            ParsingError::DuplicateVariable(1, "x".to_string()),
        );
    }

    #[test]
    fn duplicate_variable_with_expression() {
        expect_error(
            r#"
Intro
{% trans user=name, user='Bob' %}
{% endtrans %}
            "#
            .trim_ascii(),
            ParsingError::DuplicateVariable(2, "user".to_string()),
        );
    }

    #[test]
    fn missing_comma() {
        expect_error(
            "{% trans a b %}{% endtrans %}",
            ParsingError::Expected(1, TokenKind::Comma, "'b'".to_string()),
        );
    }

    #[test]
    fn pluralize_without_variables() {
        expect_error(
            "{% trans %}one{% pluralize %}many{% endtrans %}",
            ParsingError::PluralizeWithoutVariables(1),
        );
    }

    #[test]
    fn multiple_pluralize() {
        expect_error(
            r#"
{% trans n %}
{{ n }} a
{% pluralize %}
{{ n }} b
{% pluralize %}
c
{% endtrans %}
            "#
            .trim_ascii(),
            ParsingError::MultiplePluralize(5),
        );
    }

    #[test]
    fn control_structure() {
        expect_error(
            "{% trans %}\n{% if x %}y{% endif %}{% endtrans %}",
            ParsingError::ControlStructure(2, "'if'".to_string()),
        );
    }

    #[test]
    fn unclosed_translation() {
        expect_error(
            "{% trans %}\nnever closed\n",
            ParsingError::UnclosedTranslation(3),
        );
    }

    #[test]
    fn expression_in_body() {
        expect_error(
            "{% trans %}{{ 'text' }}{% endtrans %}",
            ParsingError::Expected(1, TokenKind::Name, "string 'text'".to_string()),
        );
        expect_error(
            "{% trans %}{{ a b }}{% endtrans %}",
            ParsingError::Expected(1, TokenKind::VariableEnd, "'b'".to_string()),
        );
    }

    #[test]
    fn unterminated_endtrans() {
        expect_error(
            "{% trans %}text{% endtrans",
            ParsingError::UnclosedTag(1, TokenKind::BlockEnd),
        );
        expect_error(
            "{% trans %}text{% endtrans x %}",
            ParsingError::Expected(1, TokenKind::BlockEnd, "'x'".to_string()),
        );
    }

    #[test]
    fn errors_are_classified() {
        let environment = Environment::new().with_extension(Box::new(TransExtension));

        let error = environment
            .parse("{% trans x, x %}{% endtrans %}", Some("page.html"))
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Assertion);
        assert_eq!(error.filename, "page.html");
        assert_eq!(error.line, 1);
        assert_eq!(error.code, "{% trans x, x %}{% endtrans %}");

        let error = environment
            .parse("one\ntwo {% trans %}", None)
            .unwrap_err();
        assert_eq!(error.kind, ErrorKind::Syntax);
        assert_eq!(error.filename, "<template>");
        assert_eq!(error.line, 2);
        assert_eq!(error.code, "two {% trans %}");
    }
}
