//! The catalog of tables: categories of sections of tables, and loading all of them into a [`Library`].
//!
//! A catalog file looks like this, with table paths relative to the catalog file:
//!
//! ```json
//! {
//! 	"categories": [
//! 		{
//! 			"label": "Magic & Miscellany",
//! 			"sections": [
//! 				{
//! 					"label": "Scrolls",
//! 					"tables": [
//! 						{ "name": "Spell Scroll Level", "path": "magic/scrolls/spell_scroll_level.json" }
//! 					]
//! 				}
//! 			]
//! 		}
//! 	]
//! }
//! ```

mod library;

use std::{fs, path::Path};

use serde::Deserialize;

pub use self::library::{Library, LoadedTable};
use crate::table::{Error as TableError, LoadError};

/// Tree of every table available, in display order
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct Catalog {
	/// Top-level groupings
	#[serde(default)]
	pub categories: Vec<Category>,
}

/// Top-level grouping of sections
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct Category {
	/// Heading shown for the category
	pub label: String,

	/// Sections within the category
	#[serde(default)]
	pub sections: Vec<Section>,
}

/// Grouping of related tables. May be empty while its tables are still being written.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct Section {
	/// Heading shown for the section
	pub label: String,

	/// Tables within the section
	#[serde(default)]
	pub tables: Vec<TableRef>,
}

/// Where to find a table and what to call it
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[non_exhaustive]
pub struct TableRef {
	/// Display name, overriding the table's own name
	#[serde(default)]
	pub name: Option<String>,

	/// Path of the table file, relative to the catalog
	pub path: String,
}

impl Catalog {
	/// Parses a catalog from its JSON representation.
	///
	/// # Errors
	/// If the JSON is invalid or doesn't have the shape of a catalog, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use rolltable::catalog::Catalog;
	///
	/// let catalog = Catalog::from_json(r#"{"categories": [{"label": "Loot", "sections": [{"label": "Coins"}]}]}"#)?;
	/// assert_eq!(catalog.categories[0].sections[0].label, "Coins");
	/// assert_eq!(catalog.table_refs().count(), 0);
	/// # Ok::<(), rolltable::table::Error>(())
	/// ```
	pub fn from_json(json: &str) -> Result<Self, TableError> {
		Ok(serde_json::from_str(json)?)
	}

	/// Reads and parses a catalog file.
	///
	/// # Errors
	/// If the file can't be read or doesn't contain a valid catalog, an error variant naming the path is returned.
	pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
		let path = path.as_ref();
		let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
			path: path.to_path_buf(),
			source,
		})?;
		Self::from_json(&json).map_err(|source| LoadError::Invalid {
			path: path.to_path_buf(),
			source,
		})
	}

	/// Iterates over every table reference in display order, along with the category and section it's in.
	pub fn table_refs(&self) -> impl Iterator<Item = (&Category, &Section, &TableRef)> {
		self.categories.iter().flat_map(|category| {
			category
				.sections
				.iter()
				.flat_map(move |section| section.tables.iter().map(move |table| (category, section, table)))
		})
	}
}
