#[cfg(test)]
mod verify {
    use std::collections::HashMap;

    use transtag::i18n::{babel_extract, Catalog, CatalogEntry, ExtractError, Message, GETTEXT_FUNCTIONS};
    use transtag::parsing::ErrorKind;

    fn options(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    fn catalog(source: &str, pairs: &[(&str, &str)]) -> Catalog {
        babel_extract(source.as_bytes(), GETTEXT_FUNCTIONS, &[], &options(pairs)).unwrap()
    }

    fn found(catalog: &Catalog) -> Vec<(usize, &str, Message<'_>)> {
        catalog
            .entries()
            .map(|entry| (entry.line, entry.function, entry.message))
            .collect()
    }

    fn single<'a>(line: usize, function: &'a str, text: &'a str) -> (usize, &'a str, Message<'a>) {
        (line, function, Message::Single(Some(text)))
    }

    #[test]
    fn translation_blocks_and_calls() {
        let source = r#"
<h1>{% trans %}Hello {{ user }}{% endtrans %}</h1>
<p>{{ _('Goodbye') }}</p>
<p>{{ gettext("Thanks") }}</p>
        "#
        .trim_ascii();

        assert_eq!(
            found(&catalog(source, &[])),
            vec![
                single(1, "gettext", "Hello %(user)s"),
                single(2, "_", "Goodbye"),
                single(3, "gettext", "Thanks"),
            ]
        );
    }

    #[test]
    fn plural_blocks() {
        let source = r#"
{% trans count=items %}
One item
{% pluralize %}
{{ count }} items
{% endtrans %}
        "#
        .trim_ascii();

        assert_eq!(
            found(&catalog(source, &[])),
            vec![(
                1,
                "ngettext",
                Message::Tuple(vec![
                    Some("\nOne item\n"),
                    Some("\n%(count)s items\n"),
                    None
                ])
            )]
        );
    }

    #[test]
    fn nested_calls() {
        let source = "{% trans who=_('Bob') %}Hi {{ who }}{% endtrans %}{{ gettext(_('inner')) }}";

        assert_eq!(
            found(&catalog(source, &[])),
            vec![
                single(1, "gettext", "Hi %(who)s"),
                single(1, "_", "Bob"),
                (1, "gettext", Message::Single(None)),
                single(1, "_", "inner"),
            ]
        );
    }

    #[test]
    fn restricted_keywords() {
        let source = "{{ _('a') }}{{ gettext('b') }}{{ pgettext('ctx', 'c') }}";
        let catalog = babel_extract(source.as_bytes(), &["gettext", "pgettext"], &[], &HashMap::new())
            .unwrap();

        let entries: Vec<CatalogEntry> = catalog
            .entries()
            .collect();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].function, "gettext");
        assert_eq!(entries[0].message, Message::Single(Some("b")));
        assert_eq!(entries[1].function, "pgettext");
        assert_eq!(
            entries[1].message,
            Message::Tuple(vec![Some("ctx"), Some("c")])
        );
    }

    #[test]
    fn custom_delimiters() {
        let source = "<% trans %>Hi ${ name }<% endtrans %>{{ not a tag }}";
        let pairs = [
            ("block_start_string", "<%"),
            ("block_end_string", "%>"),
            ("variable_start_string", "${"),
            ("variable_end_string", "}"),
        ];

        assert_eq!(
            found(&catalog(source, &pairs)),
            vec![single(1, "gettext", "Hi %(name)s")]
        );
    }

    #[test]
    fn line_statements() {
        let source = "<p>\n# trans\nHello\n# endtrans\n</p>\n";

        assert_eq!(
            found(&catalog(source, &[("line_statement_prefix", "#")])),
            vec![single(2, "gettext", "Hello\n")]
        );
    }

    #[test]
    fn trimming_blocks() {
        let source = "{% trans %}\nHello\n{% endtrans %}";

        assert_eq!(
            found(&catalog(source, &[])),
            vec![single(1, "gettext", "\nHello\n")]
        );
        assert_eq!(
            found(&catalog(source, &[("trim_blocks", "yes")])),
            vec![single(1, "gettext", "Hello\n")]
        );
    }

    #[test]
    fn encodings() {
        let source: &[u8] = b"{% trans %}caf\xe9{% endtrans %}";

        let catalog = babel_extract(source, GETTEXT_FUNCTIONS, &[], &options(&[("encoding", "latin-1")]))
            .unwrap();
        let entries: Vec<CatalogEntry> = catalog
            .entries()
            .collect();
        assert_eq!(entries[0].message, Message::Single(Some("caf\u{e9}")));

        let result = babel_extract(source, GETTEXT_FUNCTIONS, &[], &HashMap::new());
        assert!(matches!(result, Err(ExtractError::Undecodable(_))));
    }

    #[test]
    fn extensions_option() {
        let source = "{% trans %}x{% endtrans %}";

        assert_eq!(
            found(&catalog(source, &[("extensions", "i18n, trans")])),
            vec![single(1, "gettext", "x")]
        );

        let result = babel_extract(
            source.as_bytes(),
            GETTEXT_FUNCTIONS,
            &[],
            &options(&[("extensions", "jinja2.ext.loopcontrols")]),
        );
        assert!(matches!(
            result,
            Err(ExtractError::UnknownExtension(name)) if name == "jinja2.ext.loopcontrols"
        ));
    }

    #[test]
    fn template_errors() {
        let source = "Intro\n{% trans %}{% for x in y %}{% endtrans %}";
        let result = babel_extract(source.as_bytes(), GETTEXT_FUNCTIONS, &[], &HashMap::new());

        match result {
            Err(ExtractError::Template(error)) => {
                assert_eq!(error.line, 2);
                assert_eq!(error.kind, ErrorKind::Assertion);
                assert_eq!(error.filename, "<template>");
            }
            _ => panic!("Expected a template error"),
        }
    }

    #[test]
    fn repeated_extraction() {
        let source = "{{ _('same') }}{{ _('same') }}";
        let catalog = babel_extract(source.as_bytes(), GETTEXT_FUNCTIONS, &["NOTE:"], &HashMap::new())
            .unwrap();

        let first: Vec<CatalogEntry> = catalog
            .entries()
            .collect();
        let second: Vec<CatalogEntry> = catalog
            .entries()
            .collect();

        // reported once per call site, identical messages included
        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert!(first
            .iter()
            .all(|entry| entry
                .comments
                .is_empty()));
        assert_eq!(catalog.comment_tags(), &["NOTE:".to_string()]);
    }
}
