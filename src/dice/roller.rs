//! Abstractions for the random source behind every roll and uniform pick.

use std::iter::Peekable;

#[cfg(feature = "fastrand")]
use fastrand::Rng;

use super::{Dice, Rolled};

/// Rolls dice and picks table rows - what else is there to say?
///
/// Everything random in this crate goes through a roller, so swapping in a seeded or scripted one makes every
/// resolution reproducible.
pub trait Roller {
	/// Rolls a single die, producing a value in `1..=sides`.
	#[must_use]
	fn roll_die(&mut self, sides: u32) -> u32;

	/// Picks a uniformly random index in `0..len`.
	///
	/// Callers must still treat the result as untrusted; scripted rollers may return anything.
	#[must_use]
	fn pick_index(&mut self, len: usize) -> usize;

	/// Rolls every die in a set. See [`Rolled::total()`] for the sum.
	fn roll(&mut self, dice: &Dice) -> Rolled
	where
		Self: Sized,
	{
		let rolls = (0..dice.count).map(|_| self.roll_die(dice.sides)).collect();
		Rolled { rolls, dice: *dice }
	}
}

impl<R: Roller + ?Sized> Roller for &mut R {
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		(**self).roll_die(sides)
	}

	#[inline]
	fn pick_index(&mut self, len: usize) -> usize {
		(**self).pick_index(len)
	}
}

/// Generates rolls with random values using [fastrand]. Requires the `fastrand` feature (enabled by default).
///
/// # Examples
///
/// ## Default fastrand roller
/// ```
/// use rolltable::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let mut roller = FastRandRoller::default();
///
/// let dice = Dice::new(4, 6);
/// let total = roller.roll(&dice).total();
/// assert!((4..=24).contains(&total));
/// ```
///
/// ## Manually seeded fastrand roller
/// ```
/// use rolltable::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice};
///
/// let dice = Dice::new(4, 6);
/// let first = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// let second = FastRandRoller::with_seed(0x750c38d574400).roll(&dice);
/// assert_eq!(first, second);
/// ```
#[cfg(feature = "fastrand")]
#[derive(Debug, Clone, Default)]
pub struct FastRand(Rng);

#[cfg(feature = "fastrand")]
impl FastRand {
	/// Creates a new fastrand roller that uses the given RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub const fn new(rng: Rng) -> Self {
		Self(rng)
	}

	/// Creates a new fastrand roller that uses a pre-seeded RNG instance to generate rolls.
	#[must_use]
	#[inline]
	pub fn with_seed(seed: u64) -> Self {
		Self(Rng::with_seed(seed))
	}
}

#[cfg(feature = "fastrand")]
impl Roller for FastRand {
	/// Rolls a single die using the [`fastrand::Rng`] the roller was created with.
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		if sides > 0 {
			self.0.u32(1..=sides)
		} else {
			0
		}
	}

	#[inline]
	fn pick_index(&mut self, len: usize) -> usize {
		if len > 0 {
			self.0.usize(..len)
		} else {
			0
		}
	}
}

/// Generates rolls that always have a specific value.
///
/// The same value is used as the picked index for uniform selection.
///
/// # Examples
/// ```
/// use rolltable::dice::{roller::{Roller, Val as ValRoller}, Dice};
///
/// let mut roller = ValRoller(4);
///
/// let rolled = roller.roll(&Dice::new(3, 6));
/// assert_eq!(rolled.rolls, vec![4, 4, 4]);
/// assert_eq!(roller.pick_index(10), 4);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Val(pub u32);

impl Roller for Val {
	/// Rolls a single die, always with one specific value.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.0
	}

	#[inline]
	fn pick_index(&mut self, _len: usize) -> usize {
		usize::try_from(self.0).unwrap_or(usize::MAX)
	}
}

/// Generates rolls that always have their max value, and always picks the last index.
///
/// # Examples
/// ```
/// use rolltable::dice::{roller::{Max as MaxRoller, Roller}, Dice};
///
/// let mut roller = MaxRoller;
///
/// assert_eq!(roller.roll(&Dice::new(2, 20)).total(), 40);
/// assert_eq!(roller.pick_index(3), 2);
/// ```
#[derive(Debug, Default, Clone)]
#[expect(clippy::exhaustive_structs, reason = "Highly unlikely to change")]
pub struct Max;

impl Roller for Max {
	/// Rolls a single die, always with the max value (same as the number of sides).
	#[inline]
	fn roll_die(&mut self, sides: u32) -> u32 {
		sides
	}

	#[inline]
	fn pick_index(&mut self, len: usize) -> usize {
		len.saturating_sub(1)
	}
}

/// Generates rolls and picks from an iterator of values. Mainly useful for testing purposes.
///
/// # Examples
/// ```
/// use rolltable::dice::{roller::{Iter as IterRoller, Roller}, Dice};
///
/// let mut roller = IterRoller::new(vec![1, 2, 3, 4, 10]);
/// assert_eq!(roller.roll(&Dice::new(4, 6)).rolls, vec![1, 2, 3, 4]);
/// assert_eq!(roller.pick_index(20), 10);
/// assert!(!roller.can_roll());
/// ```
#[derive(Debug, Clone)]
pub struct Iter<I: Iterator<Item = u32>>(Peekable<I>);

impl<I: Iterator<Item = u32>> Iter<I> {
	/// Checks whether the iterator still has values available.
	#[inline]
	pub fn can_roll(&mut self) -> bool {
		self.0.peek().is_some()
	}

	/// Creates a new roller that uses the given iterator to provide roll values.
	#[must_use]
	#[inline]
	pub fn new(iter: impl IntoIterator<IntoIter = I>) -> Self {
		Self(iter.into_iter().peekable())
	}

	#[expect(
		clippy::expect_used,
		reason = "Mostly for testing, otherwise manual checking of can_roll() is expected"
	)]
	fn next_val(&mut self) -> u32 {
		self.0.next().expect("iterator is finished")
	}
}

impl<I: Iterator<Item = u32>> Roller for Iter<I> {
	/// Rolls a die with the value from the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	fn roll_die(&mut self, _sides: u32) -> u32 {
		self.next_val()
	}

	/// Picks the index given by the next iteration.
	///
	/// # Panics
	/// If the iterator has finished, this will panic.
	#[inline]
	fn pick_index(&mut self, _len: usize) -> usize {
		usize::try_from(self.next_val()).unwrap_or(usize::MAX)
	}
}
