//! Name tokenization.
//!
//! Splits member and type names into normalized tokens under a configured
//! convention, optionally transforming the whole name first. Tokenization is
//! deterministic and total: a non-empty name always yields at least one
//! token.

use structmap_model::{NameTransform, TokenizerStyle};

use crate::tokens::Tokens;

/// Tokenizes `name` under `style`, applying `transform` to the whole name
/// first.
pub fn tokenize(name: &str, style: &TokenizerStyle, transform: &NameTransform) -> Tokens {
    let name = apply_transform(name, transform);
    let parts = match style {
        TokenizerStyle::CamelCase => split_camel_case(&name),
        TokenizerStyle::Delimiter(delimiter) => split_delimited(&name, *delimiter),
    };
    if parts.is_empty() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Tokens::default();
        }
        return Tokens::new(vec![trimmed.to_string()]);
    }
    Tokens::new(parts)
}

fn apply_transform<'a>(name: &'a str, transform: &NameTransform) -> std::borrow::Cow<'a, str> {
    use std::borrow::Cow;
    match transform {
        NameTransform::None => Cow::Borrowed(name),
        NameTransform::StripPrefix(prefix) => match name.get(..prefix.len()) {
            Some(head) if name.len() > prefix.len() && head.eq_ignore_ascii_case(prefix) => {
                Cow::Owned(name[prefix.len()..].to_string())
            }
            _ => Cow::Borrowed(name),
        },
        NameTransform::StripSuffix(suffix) => {
            let split = name.len().saturating_sub(suffix.len());
            match name.get(split..) {
                Some(tail) if name.len() > suffix.len() && tail.eq_ignore_ascii_case(suffix) => {
                    Cow::Owned(name[..split].to_string())
                }
                _ => Cow::Borrowed(name),
            }
        }
    }
}

/// Splits on lower-to-upper transitions, the end of an uppercase run
/// followed by a lowercase letter, and letter/digit boundaries. Non
/// alphanumeric characters separate tokens and are dropped.
fn split_camel_case(name: &str) -> Vec<String> {
    let chars: Vec<char> = name.chars().collect();
    let mut parts = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            flush(&mut parts, &mut current);
            continue;
        }
        if !current.is_empty() {
            let prev = chars[i - 1];
            let boundary = (prev.is_lowercase() && ch.is_uppercase())
                || (prev.is_alphabetic() && ch.is_numeric())
                || (prev.is_numeric() && ch.is_alphabetic())
                || (prev.is_uppercase()
                    && ch.is_uppercase()
                    && chars.get(i + 1).is_some_and(|next| next.is_lowercase()));
            if boundary {
                flush(&mut parts, &mut current);
            }
        }
        current.push(ch);
    }
    flush(&mut parts, &mut current);
    parts
}

fn split_delimited(name: &str, delimiter: char) -> Vec<String> {
    name.split(delimiter)
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

fn flush(parts: &mut Vec<String>, current: &mut String) {
    if !current.is_empty() {
        parts.push(std::mem::take(current));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camel(name: &str) -> Vec<String> {
        tokenize(name, &TokenizerStyle::CamelCase, &NameTransform::None)
            .iter()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn splits_camel_case_transitions() {
        assert_eq!(camel("customerAddressStreet"), vec!["customer", "Address", "Street"]);
        assert_eq!(camel("OrderDTO"), vec!["Order", "DTO"]);
        assert_eq!(camel("street"), vec!["street"]);
    }

    #[test]
    fn splits_acronym_followed_by_word() {
        assert_eq!(camel("HTTPServer"), vec!["HTTP", "Server"]);
        assert_eq!(camel("XMLHttpRequest"), vec!["XML", "Http", "Request"]);
    }

    #[test]
    fn splits_digit_boundaries() {
        assert_eq!(camel("address1Line"), vec!["address", "1", "Line"]);
        assert_eq!(camel("line2"), vec!["line", "2"]);
    }

    #[test]
    fn delimiter_style_splits_and_drops_empties() {
        let tokens = tokenize(
            "customer__address_street",
            &TokenizerStyle::underscore(),
            &NameTransform::None,
        );
        let parts: Vec<&str> = tokens.iter().collect();
        assert_eq!(parts, vec!["customer", "address", "street"]);
    }

    #[test]
    fn all_delimiter_name_falls_back_to_whole_name() {
        let tokens = tokenize("___", &TokenizerStyle::underscore(), &NameTransform::None);
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens.get(0), Some("___"));
    }

    #[test]
    fn prefix_transform_strips_case_insensitively() {
        let tokens = tokenize(
            "getCustomerName",
            &TokenizerStyle::CamelCase,
            &NameTransform::StripPrefix("get".to_string()),
        );
        let parts: Vec<&str> = tokens.iter().collect();
        assert_eq!(parts, vec!["Customer", "Name"]);
    }

    #[test]
    fn transform_never_empties_the_name() {
        let tokens = tokenize(
            "get",
            &TokenizerStyle::CamelCase,
            &NameTransform::StripPrefix("get".to_string()),
        );
        assert_eq!(tokens.get(0), Some("get"));

        let tokens = tokenize(
            "Dto",
            &TokenizerStyle::CamelCase,
            &NameTransform::StripSuffix("dto".to_string()),
        );
        assert_eq!(tokens.get(0), Some("Dto"));
    }

    #[test]
    fn suffix_transform_strips_type_suffix() {
        let tokens = tokenize(
            "OrderDto",
            &TokenizerStyle::CamelCase,
            &NameTransform::StripSuffix("Dto".to_string()),
        );
        let parts: Vec<&str> = tokens.iter().collect();
        assert_eq!(parts, vec!["Order"]);
    }
}
