use searchsync_backend::Document;

use crate::record::Record;

/// Transform producing an indexable document body from a domain record.
///
/// Pure: no side effects assumed. The field-mapping logic behind an
/// implementation is outside this engine; the engine only counts the
/// resulting fields and ships the body.
pub trait Documentifier: Send + Sync {
    /// Display name, logged at run start.
    fn name(&self) -> &str;

    fn documentify(&self, record: &Record) -> Document;
}

/// Identity documentifier: passes the record's field payload through as the
/// document body.
#[derive(Debug, Default, Clone, Copy)]
pub struct FieldsDocumentifier;

impl Documentifier for FieldsDocumentifier {
    fn name(&self) -> &str {
        "FieldsDocumentifier"
    }

    fn documentify(&self, record: &Record) -> Document {
        record.fields.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use serde_json::json;

    #[test]
    fn test_fields_documentifier_passthrough() {
        let mut fields = Document::new();
        fields.insert("name".to_string(), json!("Ada"));
        fields.insert("email".to_string(), json!("ada@example.com"));

        let record =
            Record::new("id-1", "contacts", Utc::now(), Utc::now()).with_fields(fields.clone());

        let documentifier = FieldsDocumentifier;
        assert_eq!(documentifier.documentify(&record), fields);
        assert_eq!(documentifier.name(), "FieldsDocumentifier");
    }
}
