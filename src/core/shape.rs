//! Purpose: Trial-decode JSON values against the fixed, ordered table of error shapes.
//! Exports: `Shape`, `Decoded`, `classify`.
//! Role: Schema-free structural classification backing the walker's branch decisions.
//! Invariants: Trials are strict; a failed trial only means "try the next shape".
//! Invariants: Table order is fixed and the first successful decode wins.
//! Invariants: Transfers never append a record with neither messages nor children.

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde_json::Value;

use crate::core::report::{ErrorRecord, ErrorReport};

/// Scalar positions inside field maps. Arrays and objects are rejected so the
/// containing trial fails outright instead of partially matching.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub(crate) enum Scalar {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Null => f.write_str("null"),
            Scalar::Bool(value) => write!(f, "{value}"),
            Scalar::Number(value) => write!(f, "{value}"),
            // Strings render unquoted; child messages are human-readable text.
            Scalar::Text(value) => f.write_str(value),
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Shape {
    Boolean,
    Number,
    Text,
    TextList,
    RecordList,
    FieldMap,
}

impl Shape {
    /// Trial order. At most one of the error-bearing shapes can match a
    /// well-formed value, but booleans and numbers must be tried first so
    /// terminal leaves are recognized before any container trial.
    pub(crate) const ALL: [Shape; 6] = [
        Shape::Boolean,
        Shape::Number,
        Shape::Text,
        Shape::TextList,
        Shape::RecordList,
        Shape::FieldMap,
    ];

    pub(crate) fn name(self) -> &'static str {
        match self {
            Shape::Boolean => "boolean",
            Shape::Number => "number",
            Shape::Text => "string",
            Shape::TextList => "string-list",
            Shape::RecordList => "record-list",
            Shape::FieldMap => "field-map",
        }
    }

    pub(crate) fn try_decode(self, value: &Value) -> Option<Decoded> {
        match self {
            Shape::Boolean => bool::deserialize(value).ok().map(Decoded::Boolean),
            Shape::Number => serde_json::Number::deserialize(value)
                .ok()
                .map(Decoded::Number),
            Shape::Text => String::deserialize(value).ok().map(Decoded::Text),
            Shape::TextList => Vec::<String>::deserialize(value)
                .ok()
                .map(Decoded::TextList),
            Shape::RecordList => Vec::<BTreeMap<String, Scalar>>::deserialize(value)
                .ok()
                .map(Decoded::RecordList),
            Shape::FieldMap => BTreeMap::<String, Vec<Scalar>>::deserialize(value)
                .ok()
                .map(Decoded::FieldMap),
        }
    }
}

/// First shape in the table whose strict decode succeeds; `None` means the
/// value is a plain container the walker may descend into.
pub(crate) fn classify(value: &Value) -> Option<Decoded> {
    Shape::ALL.iter().find_map(|shape| shape.try_decode(value))
}

#[derive(Clone, Debug)]
pub(crate) enum Decoded {
    Boolean(bool),
    Number(serde_json::Number),
    Text(String),
    TextList(Vec<String>),
    RecordList(Vec<BTreeMap<String, Scalar>>),
    FieldMap(BTreeMap<String, Vec<Scalar>>),
}

impl Decoded {
    pub(crate) fn shape(&self) -> Shape {
        match self {
            Decoded::Boolean(_) => Shape::Boolean,
            Decoded::Number(_) => Shape::Number,
            Decoded::Text(_) => Shape::Text,
            Decoded::TextList(_) => Shape::TextList,
            Decoded::RecordList(_) => Shape::RecordList,
            Decoded::FieldMap(_) => Shape::FieldMap,
        }
    }

    /// Terminal shapes never warrant descent; booleans and numbers also never
    /// carry errors, regardless of the key or value heuristics.
    pub(crate) fn is_terminal(&self) -> bool {
        matches!(
            self,
            Decoded::Boolean(_) | Decoded::Number(_) | Decoded::Text(_) | Decoded::TextList(_)
        )
    }

    /// Append this value's error records to the report under `parent`.
    /// Booleans and numbers transfer nothing; empty lists and maps transfer
    /// nothing either, so no record ends up with neither messages nor children.
    pub(crate) fn transfer(self, report: &mut ErrorReport, parent: &str) {
        match self {
            Decoded::Boolean(_) | Decoded::Number(_) => {}
            Decoded::Text(message) => {
                report.push(ErrorRecord::from_messages(parent, vec![message]));
            }
            Decoded::TextList(messages) => {
                if !messages.is_empty() {
                    report.push(ErrorRecord::from_messages(parent, messages));
                }
            }
            Decoded::RecordList(entries) => {
                // One record for the whole list; later entries overwrite
                // earlier ones on shared field names.
                let mut children = BTreeMap::new();
                for entry in entries {
                    for (field, value) in entry {
                        children.insert(field, vec![value.to_string()]);
                    }
                }
                if !children.is_empty() {
                    report.push(ErrorRecord::from_children(parent, children));
                }
            }
            Decoded::FieldMap(fields) => {
                let children: BTreeMap<String, Vec<String>> = fields
                    .into_iter()
                    .map(|(field, values)| {
                        let messages = values.iter().map(Scalar::to_string).collect();
                        (field, messages)
                    })
                    .collect();
                if !children.is_empty() {
                    report.push(ErrorRecord::from_children(parent, children));
                }
            }
        }
    }
}
