//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! Tables only ever roll a single plain `NdM` set, so this is deliberately small: [`Dice`] describes the set,
//! a [`Roller`] rolls it, and [`Rolled`] holds what came up.

pub mod roller;

use std::fmt;

pub use self::roller::Roller;

/// A set of one or more rollable dice with a specific number of sides.
///
/// Both fields are always positive when produced by the parser. Constructing a set with a zero count or zero sides
/// by hand is allowed; such a set rolls no dice or only zeroes respectively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Dice {
	/// Number of dice to roll
	pub count: u32,

	/// Number of sides for each die
	pub sides: u32,
}

impl Dice {
	/// Most dice a single set may hold for the parser to accept it. Every die is rolled and kept individually.
	pub const MAX_COUNT: u32 = 1000;

	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u32, sides: u32) -> Self {
		Self { count, sides }
	}

	/// Lowest total the dice can produce (every die showing 1).
	#[must_use]
	pub const fn min_total(&self) -> u64 {
		if self.sides == 0 {
			0
		} else {
			self.count as u64
		}
	}

	/// Highest total the dice can produce (every die showing its max).
	#[must_use]
	pub const fn max_total(&self) -> u64 {
		self.count as u64 * self.sides as u64
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}d{}", self.count, self.sides)
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Rolled {
	/// Each individual die value that was rolled
	pub rolls: Vec<u32>,

	/// Dice that were rolled to produce this
	pub dice: Dice,
}

impl Rolled {
	/// Calculates the total of all roll values.
	///
	/// The sum is done in `u64`, which can't overflow for any `u32` count of `u32`-sided dice.
	///
	/// # Examples
	/// ```
	/// use rolltable::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
	///
	/// let dice = Dice::new(4, 8);
	/// let rolled = FastRandRoller::default().roll(&dice);
	/// assert_eq!(rolled.total(), rolled.rolls.iter().map(|&val| u64::from(val)).sum::<u64>());
	/// ```
	#[must_use]
	pub fn total(&self) -> u64 {
		self.rolls.iter().map(|&val| u64::from(val)).sum()
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	#[must_use]
	pub fn from_dice_and_rolls(dice: Dice, rolls: impl IntoIterator<Item = u32>) -> Self {
		Self {
			rolls: rolls.into_iter().collect(),
			dice,
		}
	}
}

impl fmt::Display for Rolled {
	/// Formats the dice the roll is from followed by a list of all of the individual rolled dice and the total.
	///
	/// # Examples
	/// ```
	/// use rolltable::dice::{Dice, Rolled};
	///
	/// let rolled = Rolled::from_dice_and_rolls(Dice::new(3, 6), [2, 6, 3]);
	/// assert_eq!(rolled.to_string(), "3d6[2, 6, 3] = 11");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}[{}] = {}",
			self.dice,
			self.rolls.iter().map(ToString::to_string).collect::<Vec<_>>().join(", "),
			self.total()
		)
	}
}
