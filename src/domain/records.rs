use serde::Serialize;
use std::collections::HashMap;

/// One CSV data row keyed by header name.
///
/// The column set comes from whatever header the file declares; nothing is
/// enforced. Lookups of undeclared columns return `None`, and
/// [`CsvRecord::text`] folds that to an empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CsvRecord {
    fields: HashMap<String, String>,
}

impl CsvRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Later inserts under the same name overwrite earlier ones.
    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    pub fn text(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for CsvRecord
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = CsvRecord::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_reads_as_empty() {
        let record: CsvRecord = [("date", "2024-01-01")].into_iter().collect();
        assert_eq!(record.get("pl"), None);
        assert_eq!(record.text("pl"), "");
        assert_eq!(record.text("date"), "2024-01-01");
    }

    #[test]
    fn test_duplicate_column_keeps_last_value() {
        let record: CsvRecord = [("qty", "1"), ("qty", "2")].into_iter().collect();
        assert_eq!(record.len(), 1);
        assert_eq!(record.text("qty"), "2");
    }
}
