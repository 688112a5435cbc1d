//! Purpose: Model the extracted error records and their presentation ordering.
//! Exports: `ErrorRecord`, `ErrorReport`.
//! Role: Result structure owned by one walk, read-only for consumers afterwards.
//! Invariants: Records carry messages or children, never neither.
//! Invariants: `flatten` output is lexicographically sorted; record order is
//! insertion order until `sorted_by_message_count` is applied.

use std::collections::BTreeMap;

use serde::Serialize;

/// One error-bearing node. `parent` is the enclosing key label (empty at the
/// document root); `messages` holds free-standing error strings, `children`
/// holds field-to-message-list pairs from field-keyed error maps.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct ErrorRecord {
    pub parent: String,
    pub children: BTreeMap<String, Vec<String>>,
    pub messages: Vec<String>,
}

impl ErrorRecord {
    pub(crate) fn from_messages(parent: &str, messages: Vec<String>) -> Self {
        Self {
            parent: parent.to_string(),
            children: BTreeMap::new(),
            messages,
        }
    }

    pub(crate) fn from_children(parent: &str, children: BTreeMap<String, Vec<String>>) -> Self {
        Self {
            parent: parent.to_string(),
            children,
            messages: Vec::new(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct ErrorReport {
    records: Vec<ErrorRecord>,
}

impl ErrorReport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, record: ErrorRecord) {
        self.records.push(record);
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Read-only view of the records in stored order.
    pub fn records(&self) -> &[ErrorRecord] {
        &self.records
    }

    /// Stable re-ordering by ascending message count; children-only records
    /// (zero messages) sort first.
    pub fn sorted_by_message_count(&self) -> ErrorReport {
        let mut records = self.records.clone();
        records.sort_by_key(|record| record.messages.len());
        ErrorReport { records }
    }

    /// Every message as one formatted line: `"[] <msg>"` for free-standing
    /// messages, `"[<parent>][<field>] <msg>"` for child messages. Lines are
    /// sorted lexicographically, not by source order.
    pub fn flatten(&self) -> Vec<String> {
        let mut lines = Vec::new();
        for record in &self.records {
            for message in &record.messages {
                lines.push(format!("[] {message}"));
            }
            for (field, messages) in &record.children {
                for message in messages {
                    lines.push(format!("[{}][{}] {}", record.parent, field, message));
                }
            }
        }
        lines.sort();
        lines
    }
}
