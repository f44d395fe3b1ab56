//! Parser for the `NdM` dice notation used by tables.

use std::str::FromStr;

use chumsky::prelude::*;

use crate::dice::Dice;

/// Generates a parser for a run of ASCII digits as a positive `u32`.
fn positive<'src>(what: &'static str) -> impl Parser<'src, &'src str, u32, extra::Err<Rich<'src, char>>> + Clone {
	any::<&'src str, extra::Err<Rich<'src, char>>>()
		.filter(char::is_ascii_digit)
		.repeated()
		.at_least(1)
		.collect::<String>()
		.try_map(move |digits, span| {
			let val: u32 = digits
				.parse()
				.map_err(|err| Rich::custom(span, format!("{what}: {err}")))?;
			if val == 0 {
				return Err(Rich::custom(span, format!("{what}: must be at least 1")));
			}
			Ok(val)
		})
}

/// Generates a parser that handles a plain dice term like "1d6", "2d20" or "1d100" and expects end of input.
///
/// Unlike general dice notation there is no implied count (`d20` is rejected), no modifiers, and the `d` is
/// case-sensitive. The count is capped at [`Dice::MAX_COUNT`].
pub fn dice<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	positive("dice count")
		.try_map(|count, span| {
			if count > Dice::MAX_COUNT {
				return Err(Rich::custom(
					span,
					format!("dice count: at most {} dice can be rolled at once", Dice::MAX_COUNT),
				));
			}
			Ok(count)
		})
		.then_ignore(just('d'))
		.then(positive("dice sides"))
		.then_ignore(end())
		.map(|(count, sides)| Dice::new(count, sides))
}

/// Parses an optional dice specification, trimming surrounding whitespace first.
///
/// `None` is the "no dice" outcome: the table's entries should be picked uniformly instead of by roll. It is
/// returned for missing, empty, and malformed input alike, and for more than [`Dice::MAX_COUNT`] dice.
///
/// # Examples
/// ```
/// use rolltable::{parse::parse_dice, Dice};
///
/// assert_eq!(parse_dice(Some(" 2d20 ")), Some(Dice::new(2, 20)));
/// assert_eq!(parse_dice(Some("d20")), None);
/// assert_eq!(parse_dice(None), None);
/// ```
#[must_use]
pub fn parse_dice(spec: Option<&str>) -> Option<Dice> {
	let spec = spec?.trim();
	if spec.is_empty() {
		return None;
	}
	dice().parse(spec).into_result().ok()
}

/// An error from parsing a dice specification with [`FromStr`]
#[derive(thiserror::Error, Debug, Clone)]
#[error("{details}")]
pub struct Error {
	/// Description of everything that went wrong
	pub details: String,
}

impl FromStr for Dice {
	type Err = Error;

	/// Parses a dice specification, reporting why it isn't one if it fails.
	///
	/// # Examples
	/// ```
	/// use rolltable::Dice;
	///
	/// assert_eq!("3d6".parse::<Dice>()?, Dice::new(3, 6));
	/// assert!("3d0".parse::<Dice>().is_err());
	/// # Ok::<(), rolltable::parse::Error>(())
	/// ```
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		dice().parse(s.trim()).into_result().map_err(|errs| Error {
			details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
		})
	}
}
