use serde_json::json;

use crate::table::{Entries, Error, RangeEntry, Table};

#[test]
fn string_entries_classify_as_list() {
	let table = Table::from_json(r#"{"dice": "1d6", "entries": ["a", "b", "c"]}"#).unwrap();
	assert_eq!(table.entries, Entries::List(vec!["a".to_owned(), "b".to_owned(), "c".to_owned()]));
	assert_eq!(table.dice_spec.as_deref(), Some("1d6"));
	assert_eq!(table.entries.kind(), "list");
}

#[test]
fn record_entries_classify_as_ranges() {
	let table = Table::from_json(
		r#"{"name": "Loot", "dice": "1d100", "entries": [
			{"min": 1, "max": 50, "text": "A"},
			{"min": 51, "max": 100, "text": "B"}
		]}"#,
	)
	.unwrap();

	assert_eq!(table.name.as_deref(), Some("Loot"));
	assert_eq!(table.entries.kind(), "range");
	let Entries::Ranges(entries) = &table.entries else {
		panic!("expected ranges");
	};
	assert_eq!(entries[0].bounds(), Some((1, 50)));
	assert_eq!(entries[1].text.as_deref(), Some("B"));
}

#[test]
fn classification_only_looks_at_first_entry() {
	let entries = Entries::classify(vec![json!("first"), json!({"min": 1, "max": 2, "text": "x"}), json!(null)]);
	let Entries::List(entries) = entries else {
		panic!("expected list");
	};
	assert_eq!(entries[0], "first");
	assert_eq!(entries[1], r#"{"max":2,"min":1,"text":"x"}"#);
	assert_eq!(entries[2], "null");

	let entries = Entries::classify(vec![json!({"min": 1, "max": 1, "text": "x"}), json!("stray")]);
	let Entries::Ranges(entries) = entries else {
		panic!("expected ranges");
	};
	assert_eq!(entries[1].bounds(), None);
	assert_eq!(entries[1].raw, json!("stray"));
}

#[test]
fn range_aliases_and_malformed_bounds() {
	let entry = RangeEntry::from_value(json!({"minimum": 3, "maximum": 4, "text": "ok"}));
	assert_eq!(entry.bounds(), Some((3, 4)));

	let entry = RangeEntry::from_value(json!({"min": 1.5, "max": 4, "text": "float"}));
	assert_eq!(entry.bounds(), None);
	assert!(!entry.contains(2));

	let entry = RangeEntry::from_value(json!({"min": "1", "max": 4}));
	assert_eq!(entry.min, None);
	assert_eq!(entry.text, None);
}

#[test]
fn whole_float_bounds_are_integers() {
	let entry = RangeEntry::from_value(json!({"min": 1.0, "max": 100.0, "text": "A"}));
	assert_eq!(entry.bounds(), Some((1, 100)));
	assert!(entry.contains(25));

	let entry = RangeEntry::from_value(json!({"min": -3.0, "max": 1e300}));
	assert_eq!(entry.min, Some(-3));
	assert_eq!(entry.max, None);
}

#[test]
fn non_string_text_is_kept_as_json() {
	let entry = RangeEntry::from_value(json!({"min": 1, "max": 1, "text": 42}));
	assert_eq!(entry.text.as_deref(), Some("42"));

	let entry = RangeEntry::from_value(json!({"min": 1, "max": 1, "text": null}));
	assert_eq!(entry.text, None);
}

#[test]
fn contains_is_inclusive() {
	let entry = RangeEntry::new(5, 10, "x");
	assert!(!entry.contains(4));
	assert!(entry.contains(5));
	assert!(entry.contains(10));
	assert!(!entry.contains(11));

	let negative = RangeEntry::new(-5, 0, "never");
	assert!(negative.contains(0));
	assert!(!negative.contains(1));
}

#[test]
fn missing_or_unparseable_dice_is_uniform() {
	let table = Table::from_json(r#"{"entries": ["x"]}"#).unwrap();
	assert_eq!(table.dice, None);
	assert_eq!(table.dice_spec, None);

	let table = Table::from_json(r#"{"dice": "d6", "entries": ["x"]}"#).unwrap();
	assert_eq!(table.dice, None);
	assert_eq!(table.dice_spec.as_deref(), Some("d6"));
}

#[test]
fn empty_tables_are_rejected() {
	assert!(matches!(Table::from_json(r#"{"dice": "1d6", "entries": []}"#), Err(Error::NoEntries)));
	assert!(matches!(Table::from_json(r#"{"dice": "1d6"}"#), Err(Error::NoEntries)));
}

#[test]
fn invalid_json_is_rejected() {
	assert!(matches!(Table::from_json(r#"{"entries": ["x",]}"#), Err(Error::Json(..))));
	assert!(matches!(Table::from_json(r#"{"dice": 6, "entries": ["x"]}"#), Err(Error::Json(..))));
	assert!(matches!(Table::from_json(r#""x""#), Err(Error::Json(..))));
}
