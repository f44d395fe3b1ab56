//! Authoring checks for tables.
//!
//! Resolution is forgiving: out-of-range rolls are clamped, gaps produce a fallback text, and so on. These checks
//! report the same situations up front so table authors can fix them. Entry numbers in issues are 1-based, matching
//! how tables are usually written down.

use std::fmt;

use super::{Entries, RangeEntry, Table};
use crate::dice::Dice;

/// A probable mistake in a table
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Issue {
	/// A dice specification is present but isn't a rollable `NdM`, so the table silently rolls uniformly.
	InvalidDice(String),

	/// The dice can roll past the end of a list table; those rolls all land on the last entry.
	Clamped {
		/// Dice of the table
		dice: Dice,

		/// Number of entries in the list
		entries: usize,
	},

	/// List entries that no roll of the table's dice can reach.
	Unreachable {
		/// First unreachable entry
		first: usize,

		/// Last unreachable entry
		last: usize,
	},

	/// A range entry is missing a bound or has a non-integer one, so it never matches.
	Malformed {
		/// Entry number
		entry: usize,
	},

	/// A range entry has no text.
	MissingText {
		/// Entry number
		entry: usize,
	},

	/// A range entry's minimum is above its maximum, so it never matches.
	Inverted {
		/// Entry number
		entry: usize,

		/// Declared minimum
		min: i64,

		/// Declared maximum
		max: i64,
	},

	/// A range entry covers rolls the table's dice can't produce.
	OutOfBounds {
		/// Entry number
		entry: usize,

		/// Dice of the table
		dice: Dice,
	},

	/// Two range entries cover some of the same rolls; the earlier one always wins.
	Overlap {
		/// Earlier entry number
		first: usize,

		/// Later entry number
		second: usize,

		/// Lowest shared roll
		from: i64,

		/// Highest shared roll
		to: i64,
	},

	/// Rolls the table's dice can produce that no range entry covers.
	Gap {
		/// Lowest uncovered roll
		from: u64,

		/// Highest uncovered roll
		to: u64,
	},
}

impl fmt::Display for Issue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::InvalidDice(spec) => write!(
				f,
				"dice \"{spec}\" is not NdM with 1 to {} dice; entries are picked uniformly",
				Dice::MAX_COUNT
			),
			Self::Clamped { dice, entries } => write!(
				f,
				"{dice} can roll up to {}, but there are only {entries} entries; higher rolls use the last entry",
				dice.max_total()
			),
			Self::Unreachable { first, last } if first == last => write!(f, "entry {first} can never be rolled"),
			Self::Unreachable { first, last } => write!(f, "entries {first} to {last} can never be rolled"),
			Self::Malformed { entry } => write!(f, "entry {entry} is missing a whole-number min or max"),
			Self::MissingText { entry } => write!(f, "entry {entry} has no text"),
			Self::Inverted { entry, min, max } => write!(f, "entry {entry} has min {min} above max {max}"),
			Self::OutOfBounds { entry, dice } => write!(
				f,
				"entry {entry} covers rolls outside {dice} ({} to {})",
				dice.min_total(),
				dice.max_total()
			),
			Self::Overlap { first, second, from, to } if from == to => {
				write!(f, "entries {first} and {second} both cover {from}")
			}
			Self::Overlap { first, second, from, to } => {
				write!(f, "entries {first} and {second} both cover {from} to {to}")
			}
			Self::Gap { from, to } if from == to => write!(f, "no entry covers a roll of {from}"),
			Self::Gap { from, to } => write!(f, "no entry covers rolls {from} to {to}"),
		}
	}
}

/// Runs every check that applies to the table's encoding.
pub(super) fn table(table: &Table) -> Vec<Issue> {
	let mut issues = Vec::new();

	let unparsed = table
		.dice_spec
		.as_deref()
		.map(str::trim)
		.filter(|spec| table.dice.is_none() && !spec.is_empty());
	if let Some(spec) = unparsed {
		issues.push(Issue::InvalidDice(spec.to_owned()));
	}

	match &table.entries {
		Entries::List(entries) => {
			if let Some(dice) = table.dice {
				list(dice, entries.len(), &mut issues);
			}
		}
		Entries::Ranges(entries) => ranges(table.dice, entries, &mut issues),
	}

	issues
}

/// Checks which list positions the dice can and can't reach.
fn list(dice: Dice, len: usize, issues: &mut Vec<Issue>) {
	let len = u64::try_from(len).unwrap_or(u64::MAX);
	let (lowest, highest) = (dice.min_total(), dice.max_total());

	if highest > len {
		issues.push(Issue::Clamped {
			dice,
			entries: to_usize(len),
		});
	}
	// Low rolls can't reach the start of the list, and rolls past the end all land on the last entry
	let below = lowest.saturating_sub(1).min(len.saturating_sub(1));
	if below >= 1 {
		issues.push(Issue::Unreachable {
			first: 1,
			last: to_usize(below),
		});
	}
	if highest < len {
		issues.push(Issue::Unreachable {
			first: to_usize(highest.saturating_add(1)),
			last: to_usize(len),
		});
	}
}

/// Checks range entries individually, then pairwise for overlaps, then for coverage gaps.
fn ranges(dice: Option<Dice>, entries: &[RangeEntry], issues: &mut Vec<Issue>) {
	let mut usable = Vec::with_capacity(entries.len());

	for (idx, entry) in entries.iter().enumerate() {
		let number = idx.saturating_add(1);
		if entry.text.is_none() {
			issues.push(Issue::MissingText { entry: number });
		}

		let Some((min, max)) = entry.bounds() else {
			issues.push(Issue::Malformed { entry: number });
			continue;
		};
		if min > max {
			issues.push(Issue::Inverted { entry: number, min, max });
			continue;
		}
		if let Some(dice) = dice {
			if i128::from(min) < i128::from(dice.min_total()) || i128::from(max) > i128::from(dice.max_total()) {
				issues.push(Issue::OutOfBounds { entry: number, dice });
			}
		}

		usable.push((number, min, max));
	}

	for (pos, &(first, min_a, max_a)) in usable.iter().enumerate() {
		for &(second, min_b, max_b) in &usable[pos.saturating_add(1)..] {
			let (from, to) = (min_a.max(min_b), max_a.min(max_b));
			if from <= to {
				issues.push(Issue::Overlap { first, second, from, to });
			}
		}
	}

	// Uniform tables never look at the ranges, so coverage only matters with dice
	if let Some(dice) = dice {
		gaps(dice, &usable, issues);
	}
}

/// Sweeps the dice's possible totals looking for stretches no range covers.
fn gaps(dice: Dice, usable: &[(usize, i64, i64)], issues: &mut Vec<Issue>) {
	let (lowest, highest) = (i128::from(dice.min_total()), i128::from(dice.max_total()));

	let mut spans = usable
		.iter()
		.map(|&(_, min, max)| (i128::from(min), i128::from(max)))
		.collect::<Vec<_>>();
	spans.sort_unstable();

	let mut next = lowest;
	for (min, max) in spans {
		if next > highest {
			break;
		}
		if min > next {
			push_gap(next, (min - 1).min(highest), issues);
		}
		next = next.max(max + 1);
	}
	if next <= highest {
		push_gap(next, highest, issues);
	}
}

fn push_gap(from: i128, to: i128, issues: &mut Vec<Issue>) {
	// Both ends lie within the dice's totals, which are u64
	issues.push(Issue::Gap {
		from: u64::try_from(from).unwrap_or(u64::MAX),
		to: u64::try_from(to).unwrap_or(u64::MAX),
	});
}

fn to_usize(val: u64) -> usize {
	usize::try_from(val).unwrap_or(usize::MAX)
}
