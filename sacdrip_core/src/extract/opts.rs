/*!
# SACD Rip: Extraction Options
*/



/// # FLAG: Convert DST to DSD.
const FLAG_CONVERT: u8 = 0b0000_0001;

/// # FLAG: Verbose Log.
const FLAG_VERBOSE: u8 = 0b0000_0010;

/// # FLAG: Default.
const FLAG_DEFAULT: u8 = 0;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Extraction Options.
///
/// This struct holds the extraction-related options: which area and tracks to
/// work on, and whether or not to ask the writer for DST conversion.
///
/// Options are set using builder-style methods, like:
///
/// ```
/// use sacdrip_core::ExtractOptions;
///
/// let opts = ExtractOptions::default()
///     .with_area(1)
///     .with_track(3) // Order doesn't matter.
///     .with_track(2)
///     .with_track(15);
///
/// assert_eq!(opts.area(), 1);
/// assert_eq!(opts.tracks().collect::<Vec<u8>>(), &[2, 3, 15]);
/// ```
pub struct ExtractOptions {
	area: u8,
	flags: u8,
	tracks: TrackSet,
}

impl Default for ExtractOptions {
	fn default() -> Self {
		Self {
			area: 0,
			flags: FLAG_DEFAULT,
			tracks: TrackSet::default(),
		}
	}
}

macro_rules! with_flag {
	($fn:ident, $flag:ident, $($doc:literal),+ $(,)?) => (
		#[must_use]
		$(
			#[doc = $doc]
		)+
		pub const fn $fn(self, v: bool) -> Self {
			let flags =
				if v { self.flags | $flag }
				else { self.flags & ! $flag };

			Self {
				flags,
				..self
			}
		}
	)
}

/// ## Setters.
impl ExtractOptions {
	#[must_use]
	/// # Program Area.
	///
	/// Set the (zero-based) position of the program area to export. Discs
	/// conventionally list the two-channel area first and the multi-channel
	/// area second.
	///
	/// The default is `0`.
	pub const fn with_area(self, area: u8) -> Self {
		Self {
			area,
			..self
		}
	}

	with_flag!(
		with_convert,
		FLAG_CONVERT,
		"# Convert DST.",
		"",
		"When `true`, writers are asked to convert DST-compressed audio to",
		"plain DSD. Whether or not they can is up to them.",
		"",
		"The default is `false`.",
	);

	#[must_use]
	/// # Include Track.
	///
	/// Add a given (one-based) track number to the to-do list. Zero is
	/// silently ignored.
	///
	/// If no tracks are added, every track in the area will be exported.
	pub const fn with_track(self, track: u8) -> Self {
		Self {
			tracks: self.tracks.with(track),
			..self
		}
	}

	with_flag!(
		with_verbose,
		FLAG_VERBOSE,
		"# Verbose.",
		"",
		"When `true`, malformed sectors and per-track checksums are printed",
		"to STDOUT at the end of the run.",
		"",
		"The default is `false`.",
	);
}

macro_rules! get_flag {
	($fn:ident, $flag:ident, $title:literal) => (
		#[must_use]
		#[doc = concat!("# ", $title, "?")]
		pub const fn $fn(&self) -> bool { $flag == self.flags & $flag }
	);
}

/// # Getters.
impl ExtractOptions {
	get_flag!(convert, FLAG_CONVERT, "Convert DST");
	get_flag!(verbose, FLAG_VERBOSE, "Verbose");

	#[must_use]
	/// # Program Area.
	pub const fn area(&self) -> u8 { self.area }

	#[must_use]
	/// # Has Any Tracks?
	pub const fn has_tracks(&self) -> bool { ! self.tracks.is_empty() }

	#[must_use]
	/// # Has Track?
	pub const fn has_track(&self, track: u8) -> bool { self.tracks.contains(track) }

	#[must_use]
	/// # Tracks.
	///
	/// Return an iterator over the included track numbers, in order.
	pub const fn tracks(&self) -> ExtractOptionsTracks {
		ExtractOptionsTracks {
			set: self.tracks,
			pos: 1,
		}
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
/// # Track Set.
///
/// Areas can hold up to 255 tracks, numbered from one, so a 256-bit flag set
/// covers every combination. Aside from being `Copy`, this saves us the
/// trouble of having to sort/dedup some sort of vector-like structure.
struct TrackSet([u64; 4]);

impl TrackSet {
	/// # With Track.
	const fn with(self, track: u8) -> Self {
		if track == 0 { return self; }
		let mut set = self.0;
		set[(track >> 6) as usize] |= 1 << (track & 63);
		Self(set)
	}

	/// # Contains?
	const fn contains(self, track: u8) -> bool {
		track != 0 && 0 != self.0[(track >> 6) as usize] & (1 << (track & 63))
	}

	/// # Is Empty?
	const fn is_empty(self) -> bool {
		self.0[0] == 0 && self.0[1] == 0 && self.0[2] == 0 && self.0[3] == 0
	}
}



#[derive(Debug, Clone)]
/// # Extract Option Tracks.
///
/// This iterator converts the 256-bit monster flag back into individual `u8`
/// track numbers.
pub struct ExtractOptionsTracks {
	set: TrackSet,
	pos: u16,
}

impl Iterator for ExtractOptionsTracks {
	type Item = u8;

	fn next(&mut self) -> Option<Self::Item> {
		while let Ok(idx) = u8::try_from(self.pos) {
			self.pos += 1;
			if self.set.contains(idx) { return Some(idx); }
		}
		None
	}

	/// # Size Hint.
	///
	/// There will never be more than 255 tracks.
	fn size_hint(&self) -> (usize, Option<usize>) {
		(0, Some(256_usize.saturating_sub(usize::from(self.pos))))
	}
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_flags() {
		let opts = ExtractOptions::default();
		assert_eq!(opts.flags, FLAG_DEFAULT, "Default flags changed.");
		assert!(! opts.convert(), "Conversion should be off by default.");
		assert!(! opts.verbose(), "Verbosity should be off by default.");

		let opts = opts.with_convert(true).with_verbose(true);
		assert!(opts.convert() && opts.verbose(), "Flags weren't set.");

		let opts = opts.with_convert(false);
		assert!(! opts.convert(), "Convert wasn't unset.");
		assert!(opts.verbose(), "Verbose shouldn't have changed.");
	}

	#[test]
	fn t_tracks() {
		let opts = ExtractOptions::default();
		assert!(! opts.has_tracks(), "There shouldn't be any tracks.");
		assert_eq!(opts.tracks().count(), 0);

		// Zero is ignored; everything else sticks, once.
		let opts = opts.with_track(0);
		assert!(! opts.has_tracks(), "Zero shouldn't count.");
		let opts = opts
			.with_track(255)
			.with_track(64)
			.with_track(1)
			.with_track(63)
			.with_track(64)
			.with_track(128);
		assert!(opts.has_tracks(), "Tracks should be set.");
		assert!(opts.has_track(63) && opts.has_track(64), "Word boundaries are broken.");
		assert!(! opts.has_track(65), "Track 65 was never added.");
		assert_eq!(opts.tracks().collect::<Vec<u8>>(), [1, 63, 64, 128, 255]);
	}
}
