use crate::parsing::ParsingError;

/// Generate problem and detail messages for parsing errors
pub fn generate_error_message(error: &ParsingError) -> (String, String) {
    match error {
        ParsingError::IllegalParserState(_) => (
            "Illegal parser state".to_string(),
            "Internal parser error. This should not have happened! Sorry.".to_string(),
        ),
        ParsingError::Expected(_, kind, found) => (
            format!("Expected {}", kind),
            format!(
                "The parser was looking for {} but found {} instead.",
                kind, found
            ),
        ),
        ParsingError::UnexpectedEndOfInput(_, kind) => (
            "Unexpected end of template".to_string(),
            format!(
                "The template ended while the parser was still looking for {}.",
                kind
            ),
        ),
        ParsingError::UnclosedTag(_, kind) => (
            format!("Missing {}", kind),
            r#"
A tag was opened on this line but the template ended before the delimiter
that closes it was found.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::UnclosedComment(_) => (
            "Missing end of comment".to_string(),
            "A comment was opened on this line but never closed.".to_string(),
        ),
        ParsingError::UnterminatedString(_) => (
            "Unterminated string".to_string(),
            "String literals must end with the same quote character they begin with."
                .to_string(),
        ),
        ParsingError::InvalidCharacter(_, c) => (
            format!("Unexpected character '{}'", c),
            "This character is not allowed inside a tag.".to_string(),
        ),
        ParsingError::InvalidExpression(_, found) => (
            format!("Unexpected {}", found),
            "An expression was expected here.".to_string(),
        ),
        ParsingError::UnknownTag(_, name) => (
            format!("Unknown tag '{}'", name),
            format!(
                r#"
No extension is registered that handles '{}' statements. If this is meant to
be a translatable section, make sure the translation extension is loaded.
                "#,
                name
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::UnclosedTranslation(_) => (
            "Translatable section never closed".to_string(),
            r#"
The template ended inside a translatable section. Every {% trans %} must be
closed by a matching {% endtrans %}.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::DuplicateVariable(_, name) => (
            format!("Translatable variable '{}' defined twice", name),
            r#"
Each variable may be declared only once in the header of a translatable
section, whether or not it is given a value.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::MultiplePluralize(_) => (
            "Only one pluralize section allowed".to_string(),
            r#"
A translatable section has a singular form and, optionally, a single plural
form introduced by {% pluralize %}.
            "#
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::ControlStructure(_, found) => (
            "Control structures not allowed in translatable sections".to_string(),
            format!(
                r#"
Found {} where only text, {{{{ variable }}}} placeholders, {{% pluralize %}}
or {{% endtrans %}} may appear. Move the control structure outside the
translatable section.
                "#,
                found
            )
            .trim_ascii()
            .to_string(),
        ),
        ParsingError::PluralizeWithoutVariables(_) => (
            "Pluralize without variables".to_string(),
            r#"
There is nothing to count to choose between the singular and plural forms.
Declare a variable in the trans tag, use a placeholder in the singular text,
or give the count explicitly as in {% pluralize count %}.
            "#
            .trim_ascii()
            .to_string(),
        ),
    }
}
