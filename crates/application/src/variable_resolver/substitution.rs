//! Template substitution of resolved values into a document body.

use indexmap::IndexMap;

use blockmark_domain::UnknownTokenPolicy;
use blockmark_domain::sentinel::unknown_reference;

use super::parser::{parse_references, reference_token};

/// Replaces every `{{key}}` token in `body` with its resolved value.
///
/// Keys are matched verbatim against the exact token text, so `{{ key }}`
/// with inner spaces is not replaced here. Tokens for keys missing from
/// `values` stay in the output unchanged.
#[must_use]
pub fn substitute(body: &str, values: &IndexMap<String, String>) -> String {
    let mut result = body.to_string();
    for (key, value) in values {
        let token = reference_token(key);
        if result.contains(&token) {
            result = result.replace(&token, value);
        }
    }
    result
}

/// Substitutes resolved values, then applies `policy` to leftover tokens.
///
/// With [`UnknownTokenPolicy::Flag`], each remaining token whose trimmed
/// name is not a resolved key becomes `[Unknown: <name>]`. With
/// [`UnknownTokenPolicy::Keep`] this is identical to [`substitute`].
#[must_use]
pub fn substitute_with_policy(
    body: &str,
    values: &IndexMap<String, String>,
    policy: UnknownTokenPolicy,
) -> String {
    let substituted = substitute(body, values);
    match policy {
        UnknownTokenPolicy::Keep => substituted,
        UnknownTokenPolicy::Flag => flag_unknown(&substituted, values),
    }
}

fn flag_unknown(body: &str, values: &IndexMap<String, String>) -> String {
    let references = parse_references(body);
    if references.is_empty() {
        return body.to_string();
    }

    let mut result = String::with_capacity(body.len());
    let mut last_end = 0;
    for reference in &references {
        result.push_str(&body[last_end..reference.span.start]);
        if values.contains_key(&reference.name) {
            result.push_str(reference.token(body));
        } else {
            result.push_str(&unknown_reference(&reference.name));
        }
        last_end = reference.span.end;
    }
    result.push_str(&body[last_end..]);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn values(pairs: &[(&str, &str)]) -> IndexMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn test_substitute_all_occurrences() {
        let v = values(&[("name", "Gadget")]);
        assert_eq!(
            substitute("{{name}} and {{name}} again", &v),
            "Gadget and Gadget again"
        );
    }

    #[test]
    fn test_substitute_multiple_keys() {
        let v = values(&[("a", "1"), ("b", "2")]);
        assert_eq!(substitute("{{a}}+{{b}}={{c}}", &v), "1+2={{c}}");
    }

    #[test]
    fn test_keys_with_regex_metacharacters_are_literal() {
        let v = values(&[("a.b", "dot"), ("x+", "plus")]);
        assert_eq!(substitute("{{a.b}} {{axb}} {{x+}}", &v), "dot {{axb}} plus");
    }

    #[test]
    fn test_spaced_token_not_replaced_verbatim() {
        let v = values(&[("name", "Gadget")]);
        assert_eq!(substitute("{{ name }}", &v), "{{ name }}");
        assert_eq!(
            substitute_with_policy("{{ name }}", &v, UnknownTokenPolicy::Flag),
            "{{ name }}"
        );
    }

    #[test]
    fn test_flag_unknown_tokens() {
        let v = values(&[("known", "yes")]);
        assert_eq!(
            substitute_with_policy("{{known}} / {{missing}}", &v, UnknownTokenPolicy::Flag),
            "yes / [Unknown: missing]"
        );
    }

    #[test]
    fn test_flag_trims_unknown_names() {
        let v = IndexMap::new();
        assert_eq!(
            substitute_with_policy("{{ missing }}", &v, UnknownTokenPolicy::Flag),
            "[Unknown: missing]"
        );
    }

    #[test]
    fn test_keep_unknown_tokens() {
        let v = values(&[("known", "yes")]);
        assert_eq!(
            substitute_with_policy("{{known}} / {{missing}}", &v, UnknownTokenPolicy::Keep),
            "yes / {{missing}}"
        );
    }

    #[test]
    fn test_substitute_is_deterministic() {
        let v = values(&[("a", "1")]);
        let body = "x {{a}} {{b}}";
        let once = substitute_with_policy(body, &v, UnknownTokenPolicy::Flag);
        let twice = substitute_with_policy(body, &v, UnknownTokenPolicy::Flag);
        assert_eq!(once, twice);
    }
}
