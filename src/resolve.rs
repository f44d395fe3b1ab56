//! Mapping a roll (or a uniform pick) onto a table entry.
//!
//! Resolution never fails. Rolls past the end of a list are clamped onto it, rolls that no range covers produce
//! [`NO_MATCH`], and range entries without text fall back to something displayable.

use std::{borrow::Cow, fmt};

use crate::{
	dice::{Roller, Rolled},
	table::{Entries, Table},
};

/// Text produced when a roll doesn't fall within any range of a range table.
pub const NO_MATCH: &str = "No matching entry for that roll.";

/// Text produced when the range entry a roll landed on has no text of its own.
pub const MISSING_TEXT: &str = "—";

/// How the entry of a [`Resolution`] was chosen
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum RollDescription {
	/// The table's dice were rolled.
	Rolled {
		/// What came up
		rolled: Rolled,

		/// The table's dice specification as written (trimmed)
		spec: String,
	},

	/// The table has no dice, so an entry was picked uniformly.
	Uniform,
}

impl RollDescription {
	/// Total of the roll, if there was one.
	#[must_use]
	pub fn total(&self) -> Option<u64> {
		match self {
			Self::Rolled { rolled, .. } => Some(rolled.total()),
			Self::Uniform => None,
		}
	}
}

impl fmt::Display for RollDescription {
	/// Formats as `<total> (<dice spec>)` for rolls and `— (uniform)` for uniform picks.
	///
	/// # Examples
	/// ```
	/// use rolltable::{dice::{Dice, Rolled}, resolve::RollDescription};
	///
	/// let rolled = Rolled::from_dice_and_rolls(Dice::new(2, 6), [3, 4]);
	/// let roll = RollDescription::Rolled {
	/// 	rolled,
	/// 	spec: "2d6".to_owned(),
	/// };
	/// assert_eq!(roll.to_string(), "7 (2d6)");
	/// assert_eq!(RollDescription::Uniform.to_string(), "— (uniform)");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Rolled { rolled, spec } => write!(f, "{} ({spec})", rolled.total()),
			Self::Uniform => f.write_str("— (uniform)"),
		}
	}
}

/// Outcome of resolving a table
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Resolution<'t> {
	/// How the entry was chosen
	pub roll: RollDescription,

	/// Text to display
	pub text: Cow<'t, str>,
}

/// Resolves a table: rolls its dice (or picks uniformly if it has none) and maps the result onto an entry.
///
/// # Examples
/// ```
/// use rolltable::{dice::roller::Val as ValRoller, resolve::resolve, table::{Entries, Table}};
///
/// let table = Table::new(Some("1d4"), Entries::List(vec!["Copper".into(), "Silver".into(), "Gold".into()]));
///
/// let resolution = resolve(&table, &mut ValRoller(2));
/// assert_eq!(resolution.roll.to_string(), "2 (1d4)");
/// assert_eq!(resolution.text, "Silver");
///
/// // Rolling past the end lands on the last entry
/// assert_eq!(resolve(&table, &mut ValRoller(4)).text, "Gold");
/// ```
pub fn resolve<'t, R: Roller>(table: &'t Table, roller: &mut R) -> Resolution<'t> {
	let resolution = match table.dice {
		Some(dice) => resolve_roll(table, roller.roll(&dice)),
		None => resolve_uniform(table, roller),
	};

	tracing::debug!("Resolved {} table: {} => {}", table.entries.kind(), resolution.roll, resolution.text);
	resolution
}

/// Maps an already-made roll onto a table entry.
///
/// List tables use the entry at `total - 1`, clamped into the list. Range tables use the first entry whose range
/// contains the total, in declaration order. The roll is described with the table's dice specification as written.
///
/// # Examples
/// ```
/// use rolltable::{dice::{Dice, Rolled}, resolve::{resolve_roll, NO_MATCH}, table::{Entries, RangeEntry, Table}};
///
/// let table = Table::new(Some("1d20"), Entries::Ranges(vec![RangeEntry::new(1, 10, "Ambush")]));
///
/// let rolled = Rolled::from_dice_and_rolls(Dice::new(1, 20), [4]);
/// assert_eq!(resolve_roll(&table, rolled).text, "Ambush");
///
/// let rolled = Rolled::from_dice_and_rolls(Dice::new(1, 20), [15]);
/// assert_eq!(resolve_roll(&table, rolled).text, NO_MATCH);
/// ```
#[must_use]
pub fn resolve_roll(table: &Table, rolled: Rolled) -> Resolution<'_> {
	let total = rolled.total();
	let text = match &table.entries {
		Entries::List(entries) => {
			let idx = usize::try_from(total.saturating_sub(1)).unwrap_or(usize::MAX);
			entries
				.get(idx.min(entries.len().saturating_sub(1)))
				.map_or(Cow::Borrowed(NO_MATCH), |text| Cow::Borrowed(text.as_str()))
		}
		Entries::Ranges(entries) => entries.iter().find(|entry| entry.contains(total)).map_or(
			Cow::Borrowed(NO_MATCH),
			|entry| Cow::Borrowed(entry.text.as_deref().unwrap_or(MISSING_TEXT)),
		),
	};

	let spec = table
		.dice_spec
		.as_deref()
		.map(str::trim)
		.filter(|spec| !spec.is_empty())
		.map_or_else(|| rolled.dice.to_string(), ToOwned::to_owned);

	Resolution {
		roll: RollDescription::Rolled { rolled, spec },
		text,
	}
}

/// Picks an entry of a table uniformly, ignoring its dice.
///
/// Range entries without text are shown as their raw JSON.
///
/// # Examples
/// ```
/// use rolltable::{dice::roller::Max as MaxRoller, resolve::{resolve_uniform, RollDescription}, table::{Entries, Table}};
///
/// let table = Table::new(None, Entries::List(vec!["X".into(), "Y".into(), "Z".into()]));
///
/// let resolution = resolve_uniform(&table, &mut MaxRoller);
/// assert_eq!(resolution.roll, RollDescription::Uniform);
/// assert_eq!(resolution.text, "Z");
/// ```
pub fn resolve_uniform<'t, R: Roller>(table: &'t Table, roller: &mut R) -> Resolution<'t> {
	let len = table.entries.len();
	let idx = roller.pick_index(len).min(len.saturating_sub(1));

	let text = match &table.entries {
		Entries::List(entries) => entries
			.get(idx)
			.map_or(Cow::Borrowed(NO_MATCH), |text| Cow::Borrowed(text.as_str())),
		Entries::Ranges(entries) => entries.get(idx).map_or(Cow::Borrowed(NO_MATCH), |entry| {
			entry
				.text
				.as_deref()
				.map_or_else(|| Cow::Owned(entry.raw.to_string()), Cow::Borrowed)
		}),
	};

	Resolution {
		roll: RollDescription::Uniform,
		text,
	}
}
