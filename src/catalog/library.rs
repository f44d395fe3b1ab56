use std::path::Path;

use super::Catalog;
use crate::table::{LoadError, Table};

/// A table loaded from the catalog, along with where it sits in it
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub struct LoadedTable {
	/// The table itself
	pub table: Table,

	/// Path the catalog gives for the table, which also identifies it
	pub path: String,

	/// Name to show: the catalog's name for it, else the table's own name, else its path
	pub display_name: String,

	/// Label of the category the table is in
	pub category: String,

	/// Label of the section the table is in
	pub section: String,
}

/// Every table of a catalog, loaded and ready to roll on
#[derive(Debug, Clone, Default)]
pub struct Library {
	catalog: Catalog,
	tables: Vec<LoadedTable>,
}

impl Library {
	/// Loads a catalog file and then every table it lists.
	///
	/// # Errors
	/// Loading stops at the first file that can't be read or parsed, returning an error naming it.
	pub fn open(catalog_path: impl AsRef<Path>) -> Result<Self, LoadError> {
		let catalog_path = catalog_path.as_ref();
		let catalog = Catalog::load(catalog_path)?;
		let base_dir = catalog_path.parent().unwrap_or_else(|| Path::new(""));
		Self::load(catalog, base_dir)
	}

	/// Loads every table listed in a catalog, resolving their paths against a base directory.
	///
	/// # Errors
	/// Loading stops at the first table that can't be read or parsed, returning an error naming it.
	pub fn load(catalog: Catalog, base_dir: impl AsRef<Path>) -> Result<Self, LoadError> {
		let base_dir = base_dir.as_ref();

		let tables = catalog
			.table_refs()
			.map(|(category, section, table_ref)| {
				let table = Table::load(base_dir.join(&table_ref.path))?;
				let display_name = table_ref
					.name
					.clone()
					.or_else(|| table.name.clone())
					.unwrap_or_else(|| table_ref.path.clone());

				Ok::<_, LoadError>(LoadedTable {
					table,
					path: table_ref.path.clone(),
					display_name,
					category: category.label.clone(),
					section: section.label.clone(),
				})
			})
			.collect::<Result<Vec<_>, _>>()?;

		tracing::debug!("Loaded {} tables from {}", tables.len(), base_dir.display());
		Ok(Self { catalog, tables })
	}

	/// Builds a library from tables that are already loaded, with an empty catalog.
	#[must_use]
	pub const fn from_tables(tables: Vec<LoadedTable>) -> Self {
		Self {
			catalog: Catalog { categories: Vec::new() },
			tables,
		}
	}

	/// The catalog the library was loaded from.
	#[must_use]
	pub const fn catalog(&self) -> &Catalog {
		&self.catalog
	}

	/// All loaded tables, in catalog order.
	#[must_use]
	pub fn tables(&self) -> &[LoadedTable] {
		&self.tables
	}

	/// Finds the position of a table by its exact path, or failing that by its display name (ignoring case).
	#[must_use]
	pub fn find(&self, query: &str) -> Option<usize> {
		self.tables
			.iter()
			.position(|loaded| loaded.path == query)
			.or_else(|| {
				let query = query.trim();
				self.tables
					.iter()
					.position(|loaded| loaded.display_name.eq_ignore_ascii_case(query))
			})
	}

	/// Finds a table by its exact path, or failing that by its display name (ignoring case).
	#[must_use]
	pub fn get(&self, query: &str) -> Option<&LoadedTable> {
		self.find(query).and_then(|idx| self.tables.get(idx))
	}
}

impl LoadedTable {
	/// Wraps a table that didn't come from a catalog, naming it after its own name or the given path.
	#[must_use]
	pub fn new(table: Table, path: impl Into<String>) -> Self {
		let path = path.into();
		Self {
			display_name: table.name.clone().unwrap_or_else(|| path.clone()),
			table,
			path,
			category: String::new(),
			section: String::new(),
		}
	}
}
