//! Parameter-name extraction for producer declarations.
//!
//! Dependency names can be inferred from the textual parameter list of a
//! producer, captured at the registration site (the `factory!` and
//! `constructed!` macros in `armature-injector` stringify the closure they
//! are given and hand the text to [`parameter_names`]). This crate owns the
//! parser: it accepts a parenthesized list (`(a, b)`) or a closure-style
//! list (`|a, b|`, with or without a trailing body) and returns the
//! declared names in order.
//!
//! Inference is a convenience layer. The primary registration API takes
//! explicit dependency lists and never goes through this crate.

mod error;

pub use error::ExtractError;

/// Extracts the ordered parameter names from a producer's declared
/// parameter list.
///
/// Names are trimmed of surrounding whitespace, `: Type` annotations are
/// ignored, and a single trailing comma is tolerated. An empty list
/// (`()`, `||`) yields an empty vector.
///
/// # Errors
///
/// Fails when no parameter list can be located, the list is unterminated,
/// a name between commas is empty, or a name is not a valid identifier.
pub fn parameter_names(producer: &str) -> Result<Vec<String>, ExtractError> {
    let list = locate_list(producer)?;
    split_names(list, producer)
}

/// Finds the text between the first pair of parentheses or pipes,
/// whichever delimiter opens first. A closure body may contain calls, so
/// `|a, b| build(a)` must read the pipes, not the body's parentheses.
fn locate_list(producer: &str) -> Result<&str, ExtractError> {
    let trimmed = producer.trim();

    let (open, close) = match (trimmed.find('('), trimmed.find('|')) {
        (Some(paren), Some(pipe)) if pipe < paren => (pipe, '|'),
        (Some(paren), _) => (paren, ')'),
        (None, Some(pipe)) => (pipe, '|'),
        (None, None) => {
            return Err(ExtractError::MissingParameterList {
                producer: producer.to_string(),
            });
        }
    };

    let rest = &trimmed[open + 1..];
    let end = rest
        .find(close)
        .ok_or_else(|| ExtractError::UnterminatedParameterList {
            producer: producer.to_string(),
        })?;
    Ok(&rest[..end])
}

fn split_names(list: &str, producer: &str) -> Result<Vec<String>, ExtractError> {
    if list.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut segments: Vec<&str> = list.split(',').collect();
    if segments.last().is_some_and(|last| last.trim().is_empty()) {
        segments.pop();
    }

    let mut names = Vec::with_capacity(segments.len());
    for segment in segments {
        // `name: Type` declares the dependency `name`.
        let name = segment.split(':').next().unwrap_or_default().trim();
        if name.is_empty() {
            return Err(ExtractError::EmptyParameterName {
                producer: producer.to_string(),
            });
        }
        if !is_identifier(name) {
            return Err(ExtractError::InvalidParameterName {
                name: name.to_string(),
            });
        }
        names.push(name.to_string());
    }
    Ok(names)
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parenthesized_list_yields_names_in_order() {
        let names = parameter_names("(request, config, storage)").unwrap();
        assert_eq!(names, vec!["request", "config", "storage"]);
    }

    #[test]
    fn closure_style_list_yields_names_in_order() {
        let names = parameter_names("|url_table, promise| build(url_table)").unwrap();
        assert_eq!(names, vec!["url_table", "promise"]);
    }

    #[test]
    fn closure_body_calls_do_not_leak_their_arguments() {
        let names = parameter_names("|store, path| lookup(store, path)").unwrap();
        assert_eq!(names, vec!["store", "path"]);

        let names = parameter_names("|store| store.get(key)").unwrap();
        assert_eq!(names, vec!["store"]);
    }

    #[test]
    fn surrounding_whitespace_is_trimmed() {
        let names = parameter_names("(  a ,\tb , c )").unwrap();
        assert_eq!(names, vec!["a", "b", "c"]);
    }

    #[test]
    fn type_annotations_are_ignored() {
        let names = parameter_names("(store: Arc<Store>, path: String)").unwrap();
        assert_eq!(names, vec!["store", "path"]);
    }

    #[test]
    fn empty_lists_yield_no_names() {
        assert_eq!(parameter_names("()").unwrap(), Vec::<String>::new());
        assert_eq!(parameter_names("||").unwrap(), Vec::<String>::new());
        assert_eq!(parameter_names("(   )").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn trailing_comma_is_tolerated() {
        let names = parameter_names("(a, b,)").unwrap();
        assert_eq!(names, vec!["a", "b"]);
    }

    #[test]
    fn missing_list_is_rejected() {
        let err = parameter_names("just a name").unwrap_err();
        assert!(matches!(err, ExtractError::MissingParameterList { .. }));
    }

    #[test]
    fn unterminated_list_is_rejected() {
        let err = parameter_names("(a, b").unwrap_err();
        assert!(matches!(err, ExtractError::UnterminatedParameterList { .. }));

        let err = parameter_names("|a, b").unwrap_err();
        assert!(matches!(err, ExtractError::UnterminatedParameterList { .. }));
    }

    #[test]
    fn interior_empty_name_is_rejected() {
        let err = parameter_names("(a,,b)").unwrap_err();
        assert!(matches!(err, ExtractError::EmptyParameterName { .. }));
    }

    #[test]
    fn non_identifier_name_is_rejected() {
        let err = parameter_names("(a, 2nd)").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::InvalidParameterName { ref name } if name == "2nd"
        ));
    }

    #[test]
    fn underscore_prefixed_names_are_accepted() {
        let names = parameter_names("(_unused, _also_unused)").unwrap();
        assert_eq!(names, vec!["_unused", "_also_unused"]);
    }
}
