//! Purpose: Depth-first traversal of a JSON document, emitting error records.
//! Exports: `parse_errors`.
//! Role: Entry point tying the matcher, shape table, and report together.
//! Invariants: Shape-trial failures never abort the walk; a committed descent must succeed.
//! Invariants: One report per call, returned stably sorted by ascending message count.
//! Invariants: Error-shaped values under non-matching keys are skipped, not descended.

use serde_json::{Map, Value};
use tracing::trace;

use crate::core::error::{Error, ErrorKind};
use crate::core::matcher::contains_error_token;
use crate::core::report::ErrorReport;
use crate::core::shape::{Shape, classify};
use crate::json;

/// Extract error messages from a JSON document whose top level is an object.
///
/// Keys and rendered values containing the token `error` (case-insensitive)
/// mark error payloads; everything else is either descended into or skipped.
/// The returned report is stably sorted by ascending message count, so
/// children-only records come first.
///
/// Fails with [`ErrorKind::Parse`] when the document is not a JSON object and
/// with [`ErrorKind::Structure`] when a value committed to descent cannot be
/// walked as an object or array of objects.
pub fn parse_errors(document: &str) -> Result<ErrorReport, Error> {
    let object: Map<String, Value> = json::parse::from_str(document).map_err(|err| {
        Error::new(ErrorKind::Parse)
            .with_message("document is not a JSON object")
            .with_source(err)
    })?;

    let mut report = ErrorReport::new();
    walk(&object, &mut report, "")?;
    trace!(records = report.len(), ?report, "walk complete");
    Ok(report.sorted_by_message_count())
}

fn walk(object: &Map<String, Value>, report: &mut ErrorReport, parent: &str) -> Result<(), Error> {
    for (key, value) in object {
        // Error text sitting one level inside a non-error-named wrapper key:
        // the rendered value carries the token even though the key does not.
        // Only a bare string transfers here, labeled with the walker's parent.
        if contains_error_token(&value.to_string()) {
            if let Some(decoded) = Shape::Text.try_decode(value) {
                trace!(key = %key, parent = %parent, "error token in string value");
                decoded.transfer(report, parent);
                continue;
            }
        }

        if contains_error_token(key) {
            match classify(value) {
                Some(decoded) => {
                    trace!(
                        key = %key,
                        shape = decoded.shape().name(),
                        "error token in key"
                    );
                    decoded.transfer(report, parent);
                }
                None => trace!(key = %key, "error token in key but no shape matched"),
            }
            continue;
        }

        if value.is_null() {
            trace!(key = %key, "null value, skipping");
            continue;
        }

        match classify(value) {
            Some(decoded) if decoded.is_terminal() => {
                trace!(key = %key, shape = decoded.shape().name(), "terminal leaf");
            }
            Some(decoded) => {
                // Shaped like errors but not named as errors: deliberately
                // skipped rather than descended into.
                trace!(
                    key = %key,
                    shape = decoded.shape().name(),
                    "error-shaped value under non-matching key, skipping"
                );
            }
            None => descend(key, value, report)?,
        }
    }
    Ok(())
}

fn descend(key: &str, value: &Value, report: &mut ErrorReport) -> Result<(), Error> {
    match value {
        Value::Object(nested) => {
            trace!(key = %key, "descending into object");
            walk(nested, report, key)
        }
        Value::Array(items) => {
            trace!(key = %key, items = items.len(), "descending into array");
            for item in items {
                let Value::Object(nested) = item else {
                    return Err(Error::new(ErrorKind::Structure)
                        .with_message("array element is not an object")
                        .with_key(key));
                };
                walk(nested, report, key)?;
            }
            Ok(())
        }
        // Scalars always classify as terminal shapes and never reach here.
        _ => Err(Error::new(ErrorKind::Internal)
            .with_message("unclassified scalar reached descent")
            .with_key(key)),
    }
}

#[cfg(test)]
mod tests {
    use super::parse_errors;
    use crate::core::error::ErrorKind;

    #[test]
    fn wrapper_string_value_uses_parent_label() {
        let report =
            parse_errors(r#"{"data": {"status": "Error: connection refused"}}"#).unwrap();
        assert_eq!(report.len(), 1);
        assert_eq!(report.records()[0].parent, "data");
        assert_eq!(report.records()[0].messages, vec!["Error: connection refused"]);
    }

    #[test]
    fn terminal_leaves_never_transfer_under_error_keys() {
        let report = parse_errors(r#"{"errorsCount": 3, "has_error": true}"#).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn null_values_are_skipped() {
        let report = parse_errors(r#"{"error_detail": null, "nothing": null}"#).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn error_key_with_unmatchable_shape_is_skipped_without_descent() {
        let report =
            parse_errors(r#"{"errors": {"base": {"deep": ["lost message"]}}}"#).unwrap();
        assert!(report.is_empty());
    }

    #[test]
    fn array_of_objects_walks_each_element_with_the_array_key() {
        let doc = r#"{
            "materials": [
                {"errors": {"destination": ["dir taken"]}},
                {"errors": {"destination": ["dir nested"]}}
            ]
        }"#;
        let report = parse_errors(doc).unwrap();
        assert_eq!(report.len(), 2);
        for record in report.records() {
            assert_eq!(record.parent, "materials");
            assert!(record.messages.is_empty());
        }
    }

    #[test]
    fn array_with_non_object_element_is_fatal() {
        let err = parse_errors(r#"{"payload": [1, 2, 3]}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Structure);
        assert!(err.to_string().contains("payload"));
    }

    #[test]
    fn non_object_top_level_is_fatal() {
        for doc in [r#"["not", "an", "object"]"#, r#""just text""#, "42", "{"] {
            let err = parse_errors(doc).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Parse);
        }
    }
}
