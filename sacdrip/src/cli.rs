/*!
# SACD Rip: CLI
*/

use argyle::Argument;
use dactyl::traits::BytesToUnsigned;
use sacdrip_core::{
	DiscImage,
	ExtractOptions,
	SacdRipError,
	TrackSheet,
};
use std::{
	fs::File,
	io::BufReader,
	path::PathBuf,
};



/// # Options Return Type.
///
/// The options, image, track sheet, output base, and print-only flag.
pub(super) type Parsed = (
	ExtractOptions,
	DiscImage<BufReader<File>>,
	TrackSheet,
	PathBuf,
	bool,
);



/// # Parse Options.
pub(super) fn parse() -> Result<Parsed, SacdRipError> {
	let args = argyle::args()
		.with_keywords(include!(concat!(env!("OUT_DIR"), "/argyle.rs")));

	let mut opts = ExtractOptions::default();
	let mut print = false;
	let mut input = None;
	let mut sheet = None;
	let mut output = None;
	let mut tracks = String::new();
	for arg in args {
		match arg {
			Argument::Key("-c" | "--convert-dst") => { opts = opts.with_convert(true); },
			Argument::Key("-h" | "--help") => return Err(SacdRipError::PrintHelp),
			Argument::Key("-m" | "--multi-channel") => { opts = opts.with_area(1); },
			Argument::Key("-P" | "--print") => { print = true; },
			Argument::Key("--two-channel") => { opts = opts.with_area(0); },
			Argument::Key("-v" | "--verbose") => { opts = opts.with_verbose(true); },
			Argument::Key("-V" | "--version") => return Err(SacdRipError::PrintVersion),

			Argument::KeyWithValue("-a" | "--area", s) => {
				let s = u8::btou(s.trim().as_bytes())
					.ok_or(SacdRipError::CliParse("-a/--area"))?;
				opts = opts.with_area(s);
			},
			Argument::KeyWithValue("-i" | "--input", s) => { input.replace(s); },
			Argument::KeyWithValue("-s" | "--sheet", s) => { sheet.replace(s); },
			Argument::KeyWithValue("-t" | "--track" | "--tracks", s) => {
				if ! tracks.is_empty() { tracks.push(','); }
				tracks.push_str(&s);
			},

			// The output base; there can be only one.
			Argument::Other(s) =>
				if output.is_none() { output.replace(s); }
				else { return Err(SacdRipError::CliArg(s)); },

			_ => {},
		}
	}

	// Parse the tracks, if any.
	opts = parse_extract_option_tracks(opts, &tracks)?;

	// Load the track sheet.
	let sheet = sheet.ok_or(SacdRipError::CliParse("-s/--sheet"))?;
	let sheet = std::fs::read_to_string(&sheet)
		.map_err(|_| SacdRipError::CliArg(sheet))
		.and_then(|raw| TrackSheet::try_from(raw.as_str()))?;

	// Open the image.
	let image = input.ok_or(SacdRipError::CliParse("-i/--input"))
		.and_then(DiscImage::open)?;

	Ok((
		opts,
		image,
		sheet,
		output.map_or_else(PathBuf::new, PathBuf::from),
		print,
	))
}



/// # Parse Extraction Tracks.
///
/// Tracks may be listed individually or as inclusive ranges, separated by
/// commas, like `1,3-5`.
fn parse_extract_option_tracks(mut opts: ExtractOptions, tracks: &str)
-> Result<ExtractOptions, SacdRipError> {
	for v in tracks.split(',') {
		let v = v.trim();
		if v.is_empty() { continue; }

		// It might be a range.
		if let Some((a, b)) = v.split_once('-') {
			let a = u8::btou(a.trim().as_bytes())
				.ok_or(SacdRipError::CliParse("-t/--tracks"))?;
			let b = u8::btou(b.trim().as_bytes())
				.ok_or(SacdRipError::CliParse("-t/--tracks"))?;

			// Add them all!
			if a <= b {
				for idx in a..=b { opts = opts.with_track(idx); }
			}
			else { return Err(SacdRipError::CliParse("-t/--tracks")); }
		}
		// Otherwise it should be a single number.
		else {
			let v = u8::btou(v.as_bytes()).ok_or(SacdRipError::CliParse("-t/--tracks"))?;
			opts = opts.with_track(v);
		}
	}

	Ok(opts)
}
