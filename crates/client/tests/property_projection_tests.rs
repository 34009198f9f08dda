//! Property tests for the result projector.
//!
//! # Invariants
//! - One record per row when there is at least one field
//! - Record keys are the field names that had a value in that row
//! - Each key holds the value of the last column with that name

use pandora_client::models::{FieldDescriptor, FieldFlag, Value};
use pandora_client::project;
use proptest::prelude::*;

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z0-9]{0,8}".prop_map(Value::from),
    ]
}

fn fields_strategy() -> impl Strategy<Value = Vec<FieldDescriptor>> {
    prop::collection::vec(
        ("[a-d]", prop::bool::ANY).prop_map(|(name, metric)| {
            FieldDescriptor::new(
                name,
                if metric { FieldFlag::Metric } else { FieldFlag::Bucket },
            )
        }),
        0..6,
    )
}

fn rows_strategy() -> impl Strategy<Value = Vec<Vec<Value>>> {
    prop::collection::vec(prop::collection::vec(value_strategy(), 0..8), 0..6)
}

proptest! {
    #[test]
    fn prop_one_record_per_row(fields in fields_strategy(), rows in rows_strategy()) {
        let records = project(&fields, &rows);
        if fields.is_empty() || rows.is_empty() {
            prop_assert!(records.is_empty());
        } else {
            prop_assert_eq!(records.len(), rows.len());
        }
    }

    #[test]
    fn prop_keys_come_from_aligned_fields(fields in fields_strategy(), rows in rows_strategy()) {
        let records = project(&fields, &rows);
        for (record, row) in records.iter().zip(rows.iter()) {
            let aligned = fields.len().min(row.len());
            for key in record.keys() {
                prop_assert!(fields[..aligned].iter().any(|f| &f.name == key));
            }
            for field in &fields[..aligned] {
                prop_assert!(record.contains_key(&field.name));
            }
        }
    }

    #[test]
    fn prop_last_column_with_a_name_wins(fields in fields_strategy(), rows in rows_strategy()) {
        let records = project(&fields, &rows);
        for (record, row) in records.iter().zip(rows.iter()) {
            for (key, value) in record {
                let last = fields
                    .iter()
                    .zip(row.iter())
                    .filter(|(f, _)| &f.name == key)
                    .map(|(_, v)| v)
                    .last();
                prop_assert_eq!(Some(value), last);
            }
        }
    }

    #[test]
    fn prop_projection_is_deterministic(fields in fields_strategy(), rows in rows_strategy()) {
        let before = (fields.clone(), rows.clone());
        let first = project(&fields, &rows);
        let second = project(&fields, &rows);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(before, (fields, rows));
    }
}

#[test]
fn test_host_count_example() {
    let fields = vec![
        FieldDescriptor::new("host", FieldFlag::Bucket),
        FieldDescriptor::new("count", FieldFlag::Metric),
    ];
    let rows = vec![
        vec![Value::from("a"), Value::from(3i64)],
        vec![Value::from("b"), Value::from(5i64)],
    ];

    let records = project(&fields, &rows);
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["host"], Value::from("a"));
    assert_eq!(records[0]["count"], Value::from(3i64));
    assert_eq!(records[1]["host"], Value::from("b"));
    assert_eq!(records[1]["count"], Value::from(5i64));
}
