use std::collections::HashMap;

use serde_json::json;

use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Val as ValRoller},
		Dice, Rolled,
	},
	resolve::{resolve, resolve_roll, resolve_uniform, RollDescription, MISSING_TEXT, NO_MATCH},
	table::{Entries, RangeEntry, Table},
};

fn d6_list() -> Table {
	Table::new(Some("1d6"), Entries::List((1..=6).map(|n| format!("entry {n}")).collect()))
}

fn rolled(dice: Dice, total: u32) -> Rolled {
	Rolled::from_dice_and_rolls(dice, [total])
}

#[test]
fn list_roll_picks_entry_at_roll_minus_one() {
	let table = d6_list();
	for val in 1..=6 {
		let resolution = resolve(&table, &mut ValRoller(val));
		assert_eq!(resolution.text, format!("entry {val}"));
		assert_eq!(resolution.roll.to_string(), format!("{val} (1d6)"));
	}
}

#[test]
fn roll_description_keeps_written_spec() {
	let table = Table::new(Some(" 01d06 "), Entries::List((1..=6).map(|n| format!("entry {n}")).collect()));
	let resolution = resolve(&table, &mut ValRoller(3));
	assert_eq!(resolution.roll.to_string(), "3 (01d06)");

	let table = Table::new(None, Entries::List(vec!["a".into()]));
	assert_eq!(resolve_roll(&table, rolled(Dice::new(2, 4), 5)).roll.to_string(), "5 (2d4)");
}

#[test]
fn list_roll_past_end_clamps_to_last() {
	let table = d6_list();
	let resolution = resolve_roll(&table, rolled(Dice::new(1, 6), 7));
	assert_eq!(resolution.text, "entry 6");
	assert_eq!(resolution.roll.total(), Some(7));

	let table = Table::new(Some("1d100"), Entries::List(vec!["a".into(), "b".into()]));
	assert_eq!(resolve(&table, &mut ValRoller(100)).text, "b");
}

#[test]
fn list_roll_of_zero_clamps_to_first() {
	let table = d6_list();
	assert_eq!(resolve_roll(&table, rolled(Dice::new(1, 6), 0)).text, "entry 1");
}

#[test]
fn multiple_dice_are_summed() {
	let table = Table::new(Some("2d6"), Entries::List((1..=12).map(|n| n.to_string()).collect()));
	let resolution = resolve(&table, &mut IterRoller::new([3, 5]));
	assert_eq!(resolution.text, "8");
	assert_eq!(resolution.roll.to_string(), "8 (2d6)");
}

#[test]
fn range_roll_matches_containing_entry() {
	let table = Table::new(
		Some("1d100"),
		Entries::Ranges(vec![RangeEntry::new(1, 50, "A"), RangeEntry::new(51, 100, "B")]),
	);
	assert_eq!(resolve(&table, &mut ValRoller(25)).text, "A");
	assert_eq!(resolve(&table, &mut ValRoller(75)).text, "B");
	assert_eq!(resolve(&table, &mut ValRoller(50)).text, "A");
	assert_eq!(resolve(&table, &mut ValRoller(51)).text, "B");
}

#[test]
fn range_gap_gives_no_match_text() {
	let table = Table::new(Some("1d20"), Entries::Ranges(vec![RangeEntry::new(1, 10, "A")]));
	let resolution = resolve(&table, &mut ValRoller(15));
	assert_eq!(resolution.text, NO_MATCH);
	assert_eq!(resolution.roll.to_string(), "15 (1d20)");
}

#[test]
fn range_overlap_earliest_wins() {
	let table = Table::new(
		Some("1d10"),
		Entries::Ranges(vec![RangeEntry::new(1, 6, "first"), RangeEntry::new(5, 10, "second")]),
	);
	assert_eq!(resolve(&table, &mut ValRoller(5)).text, "first");
	assert_eq!(resolve(&table, &mut ValRoller(7)).text, "second");
}

#[test]
fn range_match_without_text() {
	let mut entry = RangeEntry::new(1, 6, "");
	entry.text = None;
	let table = Table::new(Some("1d6"), Entries::Ranges(vec![entry]));
	assert_eq!(resolve(&table, &mut ValRoller(3)).text, MISSING_TEXT);
}

#[test]
fn malformed_ranges_never_match() {
	let table = Table::new(
		Some("1d6"),
		Entries::classify(vec![
			json!({"min": "1", "max": 6, "text": "string bound"}),
			json!({"min": 6, "max": 1, "text": "inverted"}),
			json!({"min": 1, "max": 6, "text": "fine"}),
		]),
	);
	assert_eq!(resolve(&table, &mut ValRoller(3)).text, "fine");
}

#[test]
fn whole_float_bounds_match() {
	let table = Table::from_json(r#"{"dice": "1d100", "entries": [{"min": 1.0, "max": 100.0, "text": "A"}]}"#).unwrap();
	assert_eq!(resolve(&table, &mut ValRoller(25)).text, "A");
	assert!(table.validate().is_empty());
}

#[test]
fn uniform_list() {
	let table = Table::new(None, Entries::List(vec!["X".into(), "Y".into(), "Z".into()]));
	let resolution = resolve(&table, &mut ValRoller(1));
	assert_eq!(resolution.roll, RollDescription::Uniform);
	assert_eq!(resolution.roll.to_string(), "— (uniform)");
	assert_eq!(resolution.roll.total(), None);
	assert_eq!(resolution.text, "Y");
}

#[test]
fn uniform_is_roughly_even() {
	let table = Table::new(None, Entries::List(vec!["X".into(), "Y".into(), "Z".into()]));
	let mut roller = FastRandRoller::with_seed(0xd1ce);
	let mut counts: HashMap<String, u32> = HashMap::new();

	for _ in 0..30_000 {
		let resolution = resolve(&table, &mut roller);
		*counts.entry(resolution.text.into_owned()).or_default() += 1;
	}

	assert_eq!(counts.len(), 3);
	for (text, count) in counts {
		assert!((9000..=11000).contains(&count), "{text} came up {count} times");
	}
}

#[test]
fn uniform_index_out_of_bounds_is_clamped() {
	let table = Table::new(None, Entries::List(vec!["X".into(), "Y".into(), "Z".into()]));
	assert_eq!(resolve(&table, &mut ValRoller(3)).text, "Z");
	assert_eq!(resolve(&table, &mut ValRoller(u32::MAX)).text, "Z");
}

#[test]
fn uniform_ranges_ignore_bounds() {
	let table = Table::new(
		None,
		Entries::Ranges(vec![RangeEntry::new(1, 1, "one"), RangeEntry::new(90, 99, "many")]),
	);
	assert_eq!(resolve(&table, &mut ValRoller(1)).text, "many");
}

#[test]
fn uniform_range_without_text_shows_raw_entry() {
	let table = Table::new(None, Entries::classify(vec![json!({"min": 1, "max": 2}), json!(7)]));
	assert_eq!(resolve_uniform(&table, &mut ValRoller(0)).text, r#"{"max":2,"min":1}"#);
	assert_eq!(resolve_uniform(&table, &mut ValRoller(1)).text, "7");
}

#[test]
fn invalid_dice_resolves_uniformly() {
	let table = Table::new(Some("1d6+1"), Entries::List(vec!["only".into()]));
	assert_eq!(resolve(&table, &mut ValRoller(0)).roll, RollDescription::Uniform);
}

#[test]
fn empty_entries_still_produce_text() {
	let table = Table::new(Some("1d6"), Entries::List(Vec::new()));
	assert_eq!(resolve(&table, &mut ValRoller(2)).text, NO_MATCH);

	let table = Table::new(None, Entries::Ranges(Vec::new()));
	assert_eq!(resolve(&table, &mut ValRoller(0)).text, NO_MATCH);
}

#[test]
fn same_seed_same_resolution() {
	let table = Table::new(
		Some("3d20"),
		Entries::Ranges(vec![RangeEntry::new(3, 30, "low"), RangeEntry::new(31, 60, "high")]),
	);
	let uniform = Table::new(None, Entries::List((0..50).map(|n| n.to_string()).collect()));

	let mut first = FastRandRoller::with_seed(2024);
	let mut second = FastRandRoller::with_seed(2024);
	for _ in 0..100 {
		assert_eq!(resolve(&table, &mut first), resolve(&table, &mut second));
		assert_eq!(resolve(&uniform, &mut first), resolve(&uniform, &mut second));
	}
}
