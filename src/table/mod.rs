//! Roll tables, their two entry encodings, and loading them from JSON.

pub mod validate;

use std::{
	fs, io,
	path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::Value;

pub use self::validate::Issue;
use crate::{dice::Dice, parse::parse_dice};

/// A named collection of rollable outcomes.
///
/// The encoding of the entries is decided once when the table is built (see [`Entries::classify()`]) and never
/// re-inspected afterwards.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct Table {
	/// Name given inside the table file, if any
	pub name: Option<String>,

	/// Dice specification exactly as written, if any
	pub dice_spec: Option<String>,

	/// Parsed dice, or `None` when the table should be picked from uniformly
	pub dice: Option<Dice>,

	/// Outcomes that can be rolled
	pub entries: Entries,
}

impl Table {
	/// Creates a table from its dice specification and entries, parsing the specification.
	///
	/// # Examples
	/// ```
	/// use rolltable::{table::{Entries, Table}, Dice};
	///
	/// let table = Table::new(Some("1d6"), Entries::List(vec!["Rat".to_owned(), "Bat".to_owned()]));
	/// assert_eq!(table.dice, Some(Dice::new(1, 6)));
	///
	/// let table = Table::new(Some("lots"), Entries::List(vec!["Rat".to_owned()]));
	/// assert_eq!(table.dice, None);
	/// ```
	#[must_use]
	pub fn new(dice_spec: Option<&str>, entries: Entries) -> Self {
		Self {
			name: None,
			dice_spec: dice_spec.map(ToOwned::to_owned),
			dice: parse_dice(dice_spec),
			entries,
		}
	}

	/// Sets the table's name.
	#[must_use]
	pub fn with_name(mut self, name: impl Into<String>) -> Self {
		self.name = Some(name.into());
		self
	}

	/// Parses a table from its JSON representation.
	///
	/// # Errors
	/// If the JSON is invalid or doesn't describe a table, or the table has no entries, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use rolltable::table::{Entries, Table};
	///
	/// let table = Table::from_json(r#"{"dice": "1d100", "entries": [{"min": 1, "max": 100, "text": "Gold"}]}"#)?;
	/// assert!(matches!(table.entries, Entries::Ranges(..)));
	/// # Ok::<(), rolltable::table::Error>(())
	/// ```
	pub fn from_json(json: &str) -> Result<Self, Error> {
		let raw: RawTable = serde_json::from_str(json)?;
		if raw.entries.is_empty() {
			return Err(Error::NoEntries);
		}

		let mut table = Self::new(raw.dice.as_deref(), Entries::classify(raw.entries));
		table.name = raw.name;
		Ok(table)
	}

	/// Reads and parses a table file, logging any authoring issues found in it.
	///
	/// # Errors
	/// If the file can't be read or doesn't contain a valid table, an error variant naming the path is returned.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		let table = Self::from_json(&json).map_err(|source| LoadError::Invalid {
			path: path.to_path_buf(),
			source,
		})?;

		tracing::debug!(
			"Loaded {} table with {} entries from {}",
			table.entries.kind(),
			table.entries.len(),
			path.display()
		);
		for issue in table.validate() {
			tracing::warn!("{}: {}", path.display(), issue);
		}

		Ok(table)
	}

	/// Checks the table for authoring mistakes. Rolling never fails on these, but the results are probably not what
	/// the author intended.
	#[must_use]
	pub fn validate(&self) -> Vec<Issue> {
		validate::table(self)
	}
}

/// The entries of a [`Table`], in one of the two supported encodings
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Entries {
	/// Plain text outcomes keyed by position (roll 1 is the first entry)
	List(Vec<String>),

	/// Outcomes keyed by inclusive roll ranges
	Ranges(Vec<RangeEntry>),
}

impl Entries {
	/// Classifies raw JSON entries by looking at the first one: text means a positional list, anything else means a
	/// list of range records.
	///
	/// Non-text items in a positional list are kept as their JSON text.
	///
	/// # Examples
	/// ```
	/// use rolltable::table::Entries;
	/// use serde_json::json;
	///
	/// let entries = Entries::classify(vec![json!("Goblin"), json!(3)]);
	/// assert_eq!(entries, Entries::List(vec!["Goblin".to_owned(), "3".to_owned()]));
	///
	/// let entries = Entries::classify(vec![json!({"min": 1, "max": 2, "text": "Goblin"})]);
	/// assert!(matches!(entries, Entries::Ranges(..)));
	/// ```
	#[must_use]
	pub fn classify(raw: Vec<Value>) -> Self {
		if matches!(raw.first(), Some(Value::String(..))) {
			Self::List(raw.into_iter().map(value_to_text).collect())
		} else {
			Self::Ranges(raw.into_iter().map(RangeEntry::from_value).collect())
		}
	}

	/// Number of entries.
	#[must_use]
	pub fn len(&self) -> usize {
		match self {
			Self::List(entries) => entries.len(),
			Self::Ranges(entries) => entries.len(),
		}
	}

	/// Whether there are no entries at all.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Short name of the encoding, for logs and listings.
	#[must_use]
	pub const fn kind(&self) -> &'static str {
		match self {
			Self::List(..) => "list",
			Self::Ranges(..) => "range",
		}
	}
}

/// A single outcome of a range table, covering the rolls from `min` to `max` inclusive.
///
/// Entries with a missing or non-integer bound are kept (so uniform picks still see them) but never match a roll.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct RangeEntry {
	/// Lowest roll covered
	pub min: Option<i64>,

	/// Highest roll covered
	pub max: Option<i64>,

	/// Outcome text
	pub text: Option<String>,

	/// The entry as it appeared in the table file
	pub raw: Value,
}

impl RangeEntry {
	/// Creates a well-formed range entry.
	#[must_use]
	pub fn new(min: i64, max: i64, text: impl Into<String>) -> Self {
		let text = text.into();
		Self {
			min: Some(min),
			max: Some(max),
			raw: serde_json::json!({ "min": min, "max": max, "text": text }),
			text: Some(text),
		}
	}

	/// Reads a range entry from a JSON record, accepting `minimum`/`maximum` as aliases of `min`/`max`.
	///
	/// Bounds may be written as whole-valued floats (`1.0`), since JSON doesn't distinguish those from integers.
	///
	/// # Examples
	/// ```
	/// use rolltable::table::RangeEntry;
	/// use serde_json::json;
	///
	/// let entry = RangeEntry::from_value(json!({"minimum": 1.0, "maximum": 20, "text": "Ambush"}));
	/// assert_eq!(entry.bounds(), Some((1, 20)));
	///
	/// let entry = RangeEntry::from_value(json!({"min": 1.5, "max": 20, "text": "Ambush"}));
	/// assert_eq!(entry.bounds(), None);
	/// ```
	#[must_use]
	pub fn from_value(raw: Value) -> Self {
		let bound = |keys: [&str; 2]| keys.into_iter().find_map(|key| raw.get(key)).and_then(integer);
		let min = bound(["min", "minimum"]);
		let max = bound(["max", "maximum"]);
		let text = match raw.get("text") {
			None | Some(Value::Null) => None,
			Some(text) => Some(value_to_text(text.clone())),
		};

		Self { min, max, text, raw }
	}

	/// Both bounds, if the entry has them.
	#[must_use]
	pub const fn bounds(&self) -> Option<(i64, i64)> {
		match (self.min, self.max) {
			(Some(min), Some(max)) => Some((min, max)),
			_ => None,
		}
	}

	/// Checks whether a roll total falls within this entry's range.
	///
	/// # Examples
	/// ```
	/// use rolltable::table::RangeEntry;
	///
	/// let entry = RangeEntry::new(6, 6, "Owlbear");
	/// assert!(entry.contains(6));
	/// assert!(!entry.contains(7));
	/// ```
	#[must_use]
	pub fn contains(&self, roll: u64) -> bool {
		self.bounds()
			.is_some_and(|(min, max)| (i128::from(min)..=i128::from(max)).contains(&i128::from(roll)))
	}
}

/// JSON shape of a table file.
#[derive(Debug, Deserialize)]
struct RawTable {
	#[serde(default)]
	name: Option<String>,

	#[serde(default)]
	dice: Option<String>,

	#[serde(default)]
	entries: Vec<Value>,
}

/// Integer value of a JSON number, including floats with no fractional part that fit in an `i64`.
#[expect(clippy::cast_possible_truncation, reason = "Checked to be whole and in range first")]
fn integer(value: &Value) -> Option<i64> {
	// 2^63, the first whole float past i64::MAX
	const LIMIT: f64 = 9_223_372_036_854_775_808.0;

	value.as_i64().or_else(|| {
		value
			.as_f64()
			.filter(|val| val.fract() == 0.0 && (-LIMIT..LIMIT).contains(val))
			.map(|val| val as i64)
	})
}

/// Text of a JSON value: strings as-is, everything else as JSON.
fn value_to_text(value: Value) -> String {
	match value {
		Value::String(text) => text,
		other => other.to_string(),
	}
}

/// An error resulting from parsing a table
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The JSON was malformed or didn't have the shape of a table.
	#[error("invalid table JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// The table has nothing to roll on.
	#[error("table has no entries")]
	NoEntries,
}

/// An error resulting from loading a table or catalog file
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum LoadError {
	/// The file couldn't be read.
	#[error("failed to load {}: {source}", path.display())]
	Io {
		/// File that was being read
		path: PathBuf,

		/// Underlying I/O error
		source: io::Error,
	},

	/// The file was read but its contents are not usable.
	#[error("failed to load {}: {source}", path.display())]
	Invalid {
		/// File that was being parsed
		path: PathBuf,

		/// What was wrong with it
		source: Error,
	},
}

impl LoadError {
	/// File the error is about.
	#[must_use]
	pub fn path(&self) -> &Path {
		match self {
			Self::Io { path, .. } | Self::Invalid { path, .. } => path,
		}
	}
}
