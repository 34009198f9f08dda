//! Projection of columnar result sets into flat records.
//!
//! Invariants:
//! - Output has one record per row when both inputs are non-empty, none otherwise.
//! - Value `i` of a row is stored under the name of field `i`.
//! - When two fields share a name, the later column wins.
//! - Short rows omit the missing tail; values past the last field are ignored.

use crate::models::{FieldDescriptor, FlatRecord, Value};

/// Zip each row with the field names to build one record per row.
pub fn project(fields: &[FieldDescriptor], rows: &[Vec<Value>]) -> Vec<FlatRecord> {
    if fields.is_empty() || rows.is_empty() {
        return Vec::new();
    }

    rows.iter()
        .map(|row| {
            fields
                .iter()
                .zip(row.iter())
                .map(|(field, value)| (field.name.clone(), value.clone()))
                .collect()
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FieldFlag;

    fn fields(names: &[&str]) -> Vec<FieldDescriptor> {
        names
            .iter()
            .map(|n| FieldDescriptor::new(*n, FieldFlag::Bucket))
            .collect()
    }

    #[test]
    fn test_empty_inputs_give_empty_output() {
        assert!(project(&[], &[vec![Value::from(1i64)]]).is_empty());
        assert!(project(&fields(&["a"]), &[]).is_empty());
    }

    #[test]
    fn test_duplicate_name_later_wins() {
        let records = project(
            &fields(&["x", "x"]),
            &[vec![Value::from("first"), Value::from("second")]],
        );
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["x"], Value::from("second"));
    }

    #[test]
    fn test_short_row_omits_tail() {
        let records = project(&fields(&["a", "b", "c"]), &[vec![Value::from(1i64)]]);
        assert_eq!(records[0].len(), 1);
        assert!(!records[0].contains_key("b"));
    }

    #[test]
    fn test_long_row_ignores_extra_values() {
        let records = project(
            &fields(&["a"]),
            &[vec![Value::from(1i64), Value::from(2i64)]],
        );
        assert_eq!(records[0].len(), 1);
        assert_eq!(records[0]["a"], Value::from(1i64));
    }

    #[test]
    fn test_empty_row_yields_empty_record() {
        let records = project(&fields(&["a"]), &[vec![]]);
        assert_eq!(records.len(), 1);
        assert!(records[0].is_empty());
    }
}
