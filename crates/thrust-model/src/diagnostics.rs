//! Accumulated non-fatal messages.

use serde::Serialize;

/// Ordered, de-duplicated batch of human-readable warnings.
///
/// Pipeline stages push into a batch instead of failing; the batch travels
/// next to the value it describes and is surfaced verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Diagnostics {
    messages: Vec<String>,
}

impl Diagnostics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a message unless an identical one is already present.
    pub fn push(&mut self, message: impl Into<String>) {
        let message = message.into();
        if !self.messages.contains(&message) {
            self.messages.push(message);
        }
    }

    pub fn extend<I, S>(&mut self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for message in messages {
            self.push(message);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.messages.iter().map(String::as_str)
    }

    pub fn into_vec(self) -> Vec<String> {
        self.messages
    }
}

impl From<Diagnostics> for Vec<String> {
    fn from(diagnostics: Diagnostics) -> Self {
        diagnostics.into_vec()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_deduplicates_and_keeps_first_order() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.push("b");
        diagnostics.push("a");
        diagnostics.push("b");
        assert_eq!(diagnostics.into_vec(), vec!["b", "a"]);
    }

    #[test]
    fn extend_accepts_owned_and_borrowed() {
        let mut diagnostics = Diagnostics::new();
        diagnostics.extend(["x", "y"]);
        diagnostics.extend(vec!["y".to_string(), "z".to_string()]);
        assert_eq!(diagnostics.len(), 3);
    }
}
