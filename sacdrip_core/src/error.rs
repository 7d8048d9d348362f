/*!
# SACD Rip: Errors
*/

use fyi_msg::Msg;
use std::{
	error::Error,
	fmt,
};



#[cfg(feature = "bin")]
/// # Help Text.
const HELP: &str = concat!(r"
SACD Rip v", env!("CARGO_PKG_VERSION"), r"
Extract the audio tracks of a Super Audio CD image, one file per track.

USAGE:
    sacdrip [OPTIONS] -i <PATH> -s <PATH> [OUTFILE]

SOURCE:
    -i, --input <PATH>
                      The disc image to read sectors from.
    -s, --sheet <PATH>
                      The track sheet describing the image's program areas
                      and tracks, one track per line, like:
                      <AREA> <START SECTOR> <LENGTH IN SECTORS>

SELECTION:
        --two-channel Export the two-channel area's tracks. Equivalent to
                      -a 0. (default)
    -m, --multi-channel
                      Export the multi-channel area's tracks. Equivalent to
                      -a 1.
    -a, --area <NUM>  Export the tracks of the area at this (zero-based)
                      position in the track sheet. [default: 0]
    -t, --tracks <NUM(s),RNG>
                      Export one or more specific tracks (rather than the
                      whole area). Multiple tracks can be separated by commas
                      (2,3), specified as an inclusive range (2-3), and/or
                      given their own -t/--track (-t 2 -t 3).
                      [default: the whole area]

OUTPUT:
    -c, --convert-dst Ask the writer to convert DST audio to plain DSD. The
                      built-in raw writer cannot, so such tracks will fail.
    [OUTFILE]         The base output path. Tracks are saved alongside it as
                      <DIR>/trackNN.<FILE>. [default: ./sacd.raw]

MISCELLANEOUS:
    -h, --help        Print help information to STDOUT and exit.
    -P, --print       Print the selected area's track table to STDERR and
                      exit (without extracting anything).
    -v, --verbose     Print malformed sector and per-track checksum details
                      to STDOUT, so it can e.g. be piped to a file for review,
                      like: sacdrip -v … > issues.log
    -V, --version     Print version information to STDOUT and exit.

EARLY EXIT:
    Press CTRL+C to stop early. The track being extracted will be discarded;
    tracks already finished are kept.
");



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Malformed Sector Details.
pub enum SectorFault {
	/// # Header counts overrun the sector.
	Sections,

	/// # Packet lengths overrun the sector.
	Packets,
}

impl SectorFault {
	#[must_use]
	/// # As Str.
	pub const fn as_str(self) -> &'static str {
		match self {
			Self::Sections => "packet/frame info overruns the sector",
			Self::Packets => "packet data overruns the sector",
		}
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Errors.
pub enum SacdRipError {
	/// # No such area.
	Area(u8),

	/// # Bug!
	Bug(&'static str),

	/// # Writer conversion unsupported.
	Convert,

	/// # Unable to create writer.
	Create(String),

	/// # Invalid disc image path.
	Device(String),

	/// # Unable to open disc image.
	DeviceOpen(String),

	/// # User Abort.
	Killed,

	/// # Malformed sector.
	Malformed(SectorFault),

	/// # Noop.
	Noop,

	/// # No Track.
	NoTrack(u8),

	/// # Sector read error.
	Read(u32),

	/// # Numbers can't be converted to the necessary types.
	Overflow,

	/// # Track sheet syntax.
	TrackSheet(usize),

	/// # Writing to disk.
	Write(String),

	#[cfg(feature = "bin")]
	/// # Invalid CLI arg.
	CliArg(String),

	#[cfg(feature = "bin")]
	/// # CLI Parsing failure.
	CliParse(&'static str),

	#[cfg(feature = "bin")]
	/// # Print Help (Not an Error).
	PrintHelp,

	#[cfg(feature = "bin")]
	/// # Print Version (Not an Error).
	PrintVersion,
}

impl Error for SacdRipError {}

impl From<SectorFault> for SacdRipError {
	#[inline]
	fn from(err: SectorFault) -> Self { Self::Malformed(err) }
}

impl From<SacdRipError> for Msg {
	#[inline]
	fn from(src: SacdRipError) -> Self { Self::error(src.to_string()) }
}

impl fmt::Display for SacdRipError {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Area(n) => write!(f, "There is no program area #{n} on this disc."),
			Self::Bug(s) => write!(f, "Bug: {s}."),
			Self::Convert => f.write_str("This writer cannot convert DST to DSD."),
			Self::Create(s) => write!(f, "Unable to create {s}."),
			Self::Device(s) => write!(f, "Invalid disc image path {s}."),
			Self::DeviceOpen(s) => write!(f, "Unable to open {s}."),
			Self::Killed => f.write_str("User abort."),
			Self::Malformed(s) => write!(f, "Malformed sector: {}.", s.as_str()),
			Self::Noop => f.write_str("There's nothing to do!"),
			Self::NoTrack(n) => write!(f, "There is no track #{n} in this area."),
			Self::Read(n) => write!(f, "Unable to read sector {n}."),
			Self::Overflow => f.write_str("The numbers are too big for this system architecture."),
			Self::TrackSheet(n) => write!(f, "Invalid track sheet entry on line {n}."),
			Self::Write(s) => write!(f, "Unable to write to {s}."),

			#[cfg(feature = "bin")]
			Self::CliArg(s) => write!(f, "Invalid CLI option: {s}"),

			#[cfg(feature = "bin")]
			Self::CliParse(s) => write!(f, "Unable to parse {s}."),

			#[cfg(feature = "bin")]
			Self::PrintHelp => f.write_str(HELP),

			#[cfg(feature = "bin")]
			Self::PrintVersion => f.write_str(concat!("SACD Rip v", env!("CARGO_PKG_VERSION"))),
		}
	}
}
