use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::record::Fields;

/// How a text line is split into named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat {
    delimiter: char,
    fields: Vec<String>,
}

impl LineFormat {
    /// Field names must be unique, each one becomes its own output column.
    pub fn new(
        delimiter: char,
        fields: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        for name in fields.into_iter().map(Into::into) {
            if names.contains(&name) {
                return Err(Error::DuplicateField(name));
            }
            names.push(name);
        }

        Ok(Self {
            delimiter,
            fields: names,
        })
    }

    /// `"<thermistor> <photoresistor>"`, as printed by the first sketch.
    pub fn thermistor_photoresistor() -> Self {
        Self {
            delimiter: ' ',
            fields: vec!["thermistor".to_string(), "photoresistor".to_string()],
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn parse(&self, line: &str) -> Result<TextRecord> {
        let line = line.trim_end_matches(['\r', '\n']);
        let tokens: Vec<&str> = line.split(self.delimiter).map(str::trim).collect();

        if tokens.len() != self.fields.len() {
            return Err(Error::MalformedLine {
                line: line.to_string(),
                expected: self.fields.len(),
                got: tokens.len(),
            });
        }

        let fields = self
            .fields
            .iter()
            .cloned()
            .zip(tokens.into_iter().map(str::to_string))
            .collect();

        Ok(TextRecord { fields })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextRecord {
    fields: IndexMap<String, String>,
}

impl TextRecord {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields.get(name).map(String::as_str)
    }
}

impl Fields for TextRecord {
    fn names(&self) -> Vec<&str> {
        self.fields.keys().map(String::as_str).collect()
    }

    fn values(&self) -> Vec<String> {
        self.fields.values().cloned().collect()
    }

    fn value(&self, name: &str) -> Option<f64> {
        self.get(name)?.parse().ok()
    }
}
