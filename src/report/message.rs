// src/report/message.rs
// =============================================================================
// A single report message: a template id plus named parameters.
//
// Parameters keep their insertion order, because the JSON report writes them
// as extra fields in that order after the fixed ones.
// =============================================================================

use super::category::MessageId;
use serde::ser::{Serialize, SerializeMap, Serializer};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportMessage {
    pub id: MessageId,
    pub params: Vec<(&'static str, String)>,
}

impl ReportMessage {
    pub fn new(id: MessageId) -> Self {
        ReportMessage {
            id,
            params: Vec::new(),
        }
    }

    /// Adds a named parameter, replacing the value if the name is already set.
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        let value = value.into();
        match self.params.iter_mut().find(|(key, _)| *key == name) {
            Some(slot) => slot.1 = value,
            None => self.params.push((name, value)),
        }
        self
    }

    #[cfg(test)]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Fills the message template with the parameters.
    pub fn expand(&self) -> String {
        expand_template(self.id.template(), &self.params)
    }
}

// Replaces every `{{name}}` in the template by the matching parameter.
//
// Unknown names expand to nothing; an unterminated `{{` is copied as-is.
pub fn expand_template(template: &str, params: &[(&'static str, String)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        match after.find("}}") {
            Some(end) => {
                let name = after[..end].trim();
                if let Some((_, value)) = params.iter().find(|(key, _)| *key == name) {
                    out.push_str(value);
                }
                rest = &after[end + 2..];
            }
            None => {
                out.push_str(&rest[start..]);
                rest = "";
            }
        }
    }
    out.push_str(rest);
    out
}

/// JSON view of one message, as written inside the `logs` array.
pub struct JsonLog<'a>(pub &'a ReportMessage);

impl Serialize for JsonLog<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let msg = self.0;
        let category = msg.id.category();

        let mut map = serializer.serialize_map(Some(4 + msg.params.len()))?;
        map.serialize_entry("check", category.as_str())?;
        map.serialize_entry("level", &category.severity())?;
        map.serialize_entry("code", &msg.id.code())?;
        map.serialize_entry("message", &msg.expand())?;
        for (name, value) in &msg.params {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
