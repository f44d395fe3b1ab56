//! A rolling session: which table is selected, the random source, and what should be on screen.

use crate::{
	catalog::{Library, LoadedTable},
	dice::Roller,
	resolve::{resolve, Resolution},
};

/// Output shown after a table is selected and before it's rolled on.
pub const READY: &str = "Ready to roll.";

/// Table name shown when nothing is selected.
pub const NO_TABLE: &str = "—";

/// Everything a front end needs to draw
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[non_exhaustive]
pub struct View {
	/// Display name of the selected table
	pub table_name: String,

	/// `Dice: <spec>` before rolling, `Roll: <description>` after; empty for uniform tables before rolling
	pub roll_info: String,

	/// Text of the last roll, or [`READY`] after a selection change
	pub output: String,
}

/// Selection and rolling state over a [`Library`]
///
/// # Examples
/// ```
/// use rolltable::{
/// 	catalog::{Library, LoadedTable},
/// 	dice::roller::Val as ValRoller,
/// 	session::{Session, READY},
/// 	table::{Entries, Table},
/// };
///
/// let table = Table::new(Some("1d6"), Entries::List((1..=6).map(|n| format!("Room {n}")).collect()));
/// let library = Library::from_tables(vec![LoadedTable::new(table.with_name("Rooms"), "rooms.json")]);
///
/// let mut session = Session::new(&library, ValRoller(3));
/// assert_eq!(session.view().table_name, "Rooms");
/// assert_eq!(session.view().roll_info, "Dice: 1d6");
/// assert_eq!(session.view().output, READY);
///
/// session.roll();
/// assert_eq!(session.view().roll_info, "Roll: 3 (1d6)");
/// assert_eq!(session.view().output, "Room 3");
/// ```
#[derive(Debug)]
pub struct Session<'l, R> {
	library: &'l Library,
	current: Option<usize>,
	roller: R,
	view: View,
}

impl<'l, R: Roller> Session<'l, R> {
	/// Starts a session with the first table of the library selected. With no tables at all, nothing is selected and
	/// the output stays empty.
	pub fn new(library: &'l Library, roller: R) -> Self {
		let mut session = Self {
			library,
			current: None,
			roller,
			view: View::default(),
		};
		session.set_current((!library.tables().is_empty()).then_some(0));
		if session.current.is_some() {
			session.view.output = READY.to_owned();
		}
		session
	}

	/// Selects a table by path or display name and resets the output to [`READY`]. An unknown table clears the
	/// selection.
	pub fn select(&mut self, query: &str) -> Option<&'l LoadedTable> {
		let found = self.library.find(query);
		if found.is_none() {
			tracing::debug!("No table matches {query:?}");
		}
		self.set_current(found);
		self.view.output = READY.to_owned();
		self.current()
	}

	/// The selected table, if any.
	#[must_use]
	pub fn current(&self) -> Option<&'l LoadedTable> {
		let library: &'l Library = self.library;
		self.current.and_then(|idx| library.tables().get(idx))
	}

	/// Rolls on the selected table and updates the view with the result. Does nothing without a selection.
	pub fn roll(&mut self) -> Option<Resolution<'l>> {
		let loaded = self.current()?;
		let resolution = resolve(&loaded.table, &mut self.roller);

		self.view.roll_info = format!("Roll: {}", resolution.roll);
		self.view.output = resolution.text.clone().into_owned();
		Some(resolution)
	}

	/// What should currently be shown.
	#[must_use]
	pub const fn view(&self) -> &View {
		&self.view
	}

	/// The library the session selects from.
	#[must_use]
	pub const fn library(&self) -> &'l Library {
		self.library
	}

	/// Changes the selection and updates the header part of the view to match.
	fn set_current(&mut self, idx: Option<usize>) {
		self.current = idx;
		let current = self.current();

		self.view.table_name = current.map_or_else(|| NO_TABLE.to_owned(), |loaded| loaded.display_name.clone());
		self.view.roll_info = current
			.and_then(|loaded| loaded.table.dice_spec.as_deref())
			.map(str::trim)
			.filter(|spec| !spec.is_empty())
			.map_or_else(String::new, |spec| format!("Dice: {spec}"));
	}
}
