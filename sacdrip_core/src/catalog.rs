/*!
# SACD Rip: Catalog
*/

use crate::SacdRipError;
use dactyl::traits::BytesToUnsigned;
use std::{
	fmt,
	ops::Range,
};



/// # Catalog.
///
/// The disc's program areas, in order.
pub trait Catalog {
	/// # Areas.
	fn areas(&self) -> &[Area];

	/// # Area.
	///
	/// Return the area at a given (zero-based) position, if any.
	fn area(&self, idx: u8) -> Option<&Area> { self.areas().get(usize::from(idx)) }
}



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Track Descriptor.
///
/// The location of a single track within a program area.
pub struct TrackDescriptor {
	number: u8,
	start: u32,
	len: u32,
}

impl TrackDescriptor {
	#[must_use]
	/// # New.
	///
	/// Track numbers are one-based.
	pub const fn new(number: u8, start: u32, len: u32) -> Self {
		Self { number, start, len }
	}

	#[must_use]
	/// # Track Number.
	pub const fn number(self) -> u8 { self.number }

	#[must_use]
	/// # Starting LSN.
	pub const fn start(self) -> u32 { self.start }

	#[must_use]
	/// # Length (Sectors).
	pub const fn len(self) -> u32 { self.len }

	#[must_use]
	/// # Is Empty?
	pub const fn is_empty(self) -> bool { self.len == 0 }

	#[must_use]
	/// # Sector Range.
	///
	/// Return the track's LSNs as an end-exclusive range, or `None` if the
	/// end would overflow.
	pub const fn sector_range(self) -> Option<Range<u32>> {
		match self.start.checked_add(self.len) {
			Some(end) => Some(self.start..end),
			None => None,
		}
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Program Area.
///
/// A region of the disc, such as the two-channel or multi-channel program,
/// with its own track list.
pub struct Area {
	tracks: Vec<TrackDescriptor>,
}

impl fmt::Display for Area {
	/// # Track Table.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		/// # Divider.
		const DIVIDER: &str = "--------------------------------\n";

		f.write_str("##    FIRST     LAST   LENGTH\n")?;
		f.write_str(DIVIDER)?;
		for t in &self.tracks {
			if t.is_empty() {
				writeln!(f, "{:02}  {:>7}  {:>7}  {:>7}", t.number(), t.start(), "-", 0)?;
			}
			else {
				writeln!(
					f,
					"{:02}  {:>7}  {:>7}  {:>7}",
					t.number(),
					t.start(),
					t.start().saturating_add(t.len() - 1),
					t.len(),
				)?;
			}
		}
		f.write_str(DIVIDER)
	}
}

impl From<Vec<TrackDescriptor>> for Area {
	#[inline]
	fn from(tracks: Vec<TrackDescriptor>) -> Self { Self { tracks } }
}

impl Area {
	#[must_use]
	/// # Tracks.
	pub fn tracks(&self) -> &[TrackDescriptor] { &self.tracks }

	#[must_use]
	/// # Track.
	///
	/// Return the track with the given number, if any.
	pub fn track(&self, number: u8) -> Option<TrackDescriptor> {
		self.tracks.iter().copied().find(|t| t.number() == number)
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Track Sheet.
///
/// A plain-text catalog, one track per line:
///
/// ```text
/// # AREA  START  LENGTH
/// 0       540    10235
/// 0       10775  8210
/// 1       40000  20450
/// ```
///
/// Tracks are numbered from one, per area, in the order listed. Blank lines
/// and anything following a `#` are ignored.
pub struct TrackSheet {
	areas: Vec<Area>,
}

impl Catalog for TrackSheet {
	#[inline]
	fn areas(&self) -> &[Area] { &self.areas }
}

impl TryFrom<&str> for TrackSheet {
	type Error = SacdRipError;

	fn try_from(src: &str) -> Result<Self, Self::Error> {
		let mut areas: Vec<Area> = Vec::new();
		for (idx, line) in src.lines().enumerate() {
			let line = line.split('#').next().unwrap_or_default();
			let mut parts = line.split_ascii_whitespace();
			let Some(area) = parts.next() else { continue; };

			let err = SacdRipError::TrackSheet(idx + 1);
			let area = u8::btou(area.as_bytes()).ok_or_else(|| err.clone())?;
			let start = parts.next()
				.and_then(|v| u32::btou(v.as_bytes()))
				.ok_or_else(|| err.clone())?;
			let len = parts.next()
				.and_then(|v| u32::btou(v.as_bytes()))
				.ok_or_else(|| err.clone())?;
			if parts.next().is_some() || start.checked_add(len).is_none() {
				return Err(err);
			}

			// Make room for the area if it's new.
			let area = usize::from(area);
			if areas.len() <= area { areas.resize_with(area + 1, Area::default); }

			let tracks = &mut areas[area].tracks;
			let number = u8::try_from(tracks.len() + 1).map_err(|_| err)?;
			tracks.push(TrackDescriptor::new(number, start, len));
		}

		if areas.is_empty() { Err(SacdRipError::Noop) }
		else { Ok(Self { areas }) }
	}
}
