//! Raw observation rows as delivered by the data-acquisition layer.

use std::collections::BTreeMap;

/// A single numeric cell: either a reading or an explicit missing marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue {
    Value(f64),
    Missing,
}

impl FieldValue {
    /// The reading, if present.
    pub fn value(self) -> Option<f64> {
        match self {
            Self::Value(v) => Some(v),
            Self::Missing => None,
        }
    }

    pub fn is_missing(self) -> bool {
        matches!(self, Self::Missing)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        Self::Value(v)
    }
}

impl From<Option<f64>> for FieldValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or(Self::Missing, Self::Value)
    }
}

/// One raw record: unparsed date and time strings plus named numeric fields.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservationRow {
    date: String,
    time: String,
    fields: BTreeMap<String, FieldValue>,
}

impl ObservationRow {
    pub fn new(
        date: impl Into<String>,
        time: impl Into<String>,
        fields: BTreeMap<String, FieldValue>,
    ) -> Self {
        Self {
            date: date.into(),
            time: time.into(),
            fields,
        }
    }

    /// Convenience constructor for a row with a single field.
    pub fn single(
        date: impl Into<String>,
        time: impl Into<String>,
        field: impl Into<String>,
        value: impl Into<FieldValue>,
    ) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), value.into());
        Self::new(date, time, fields)
    }

    pub fn date(&self) -> &str {
        &self.date
    }

    pub fn time(&self) -> &str {
        &self.time
    }

    /// Look up a field; `None` if the row has no such column.
    pub fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields.get(name).copied()
    }

    pub fn fields(&self) -> &BTreeMap<String, FieldValue> {
        &self.fields
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_value_conversions() {
        assert_eq!(FieldValue::from(2.5).value(), Some(2.5));
        assert_eq!(FieldValue::from(None).value(), None);
        assert!(FieldValue::from(None::<f64>).is_missing());
        assert!(!FieldValue::Value(-200.0).is_missing());
    }

    #[test]
    fn row_lookup_distinguishes_absent_and_missing() {
        let mut fields = BTreeMap::new();
        fields.insert("CO(GT)".to_string(), FieldValue::Value(2.6));
        fields.insert("NOx(GT)".to_string(), FieldValue::Missing);
        let row = ObservationRow::new("10/03/2004", "18.00.00", fields);

        assert_eq!(row.date(), "10/03/2004");
        assert_eq!(row.time(), "18.00.00");
        assert_eq!(row.field("CO(GT)"), Some(FieldValue::Value(2.6)));
        assert_eq!(row.field("NOx(GT)"), Some(FieldValue::Missing));
        assert_eq!(row.field("T"), None);
    }
}
