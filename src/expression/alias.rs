use aws_sdk_dynamodb::types::AttributeValue;
use std::collections::HashMap;

use crate::error::Error;

/// Placeholder table shared by every expression rendered through one
/// [`Builder`](super::Builder).
///
/// Names are deduplicated, values never are.
#[derive(Debug, Default)]
pub(crate) struct AliasList {
    names: Vec<String>,
    values: Vec<AttributeValue>,
}

impl AliasList {
    /// Alias a single attribute name, reusing an existing `#n` when possible
    pub(crate) fn name(&mut self, name: &str) -> String {
        let index = match self.names.iter().position(|n| n == name) {
            Some(index) => index,
            None => {
                self.names.push(name.to_string());
                self.names.len() - 1
            }
        };
        format!("#{index}")
    }

    /// Alias every segment of a document path
    ///
    /// `a.b[1].c` becomes `#0.#1[1].#2`. Index suffixes are only split off
    /// segments that end with `]`.
    pub(crate) fn path(&mut self, path: &str) -> Result<String, Error> {
        if path.is_empty() {
            return Err(Error::UnsetParameter("NameBuilder"));
        }

        let mut segments = Vec::new();
        for word in path.split('.') {
            if word.is_empty() {
                return Err(Error::InvalidParameter("NameBuilder"));
            }

            let (word, suffix) = match word.find('[') {
                Some(bracket) if word.ends_with(']') => word.split_at(bracket),
                _ => (word, ""),
            };

            if word.is_empty() {
                return Err(Error::InvalidParameter("NameBuilder"));
            }

            segments.push(format!("{}{suffix}", self.name(word)));
        }

        Ok(segments.join("."))
    }

    /// Allocate a fresh `:n` placeholder for a value
    pub(crate) fn value(&mut self, value: &AttributeValue) -> String {
        self.values.push(value.clone());
        format!(":{}", self.values.len() - 1)
    }

    pub(crate) fn into_maps(
        self,
    ) -> (HashMap<String, String>, HashMap<String, AttributeValue>) {
        let names = self
            .names
            .into_iter()
            .enumerate()
            .map(|(index, name)| (format!("#{index}"), name))
            .collect();
        let values = self
            .values
            .into_iter()
            .enumerate()
            .map(|(index, value)| (format!(":{index}"), value))
            .collect();
        (names, values)
    }
}
