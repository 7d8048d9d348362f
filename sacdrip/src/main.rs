/*!
# SACD Rip
*/

#![forbid(unsafe_code)]

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![expect(clippy::redundant_pub_crate, reason = "Unresolvable.")]



mod cli;

use dactyl::NiceElapsed;
use fyi_msg::{
	Msg,
	Progless,
};
use oxford_join::OxfordJoin;
use sacdrip_core::{
	Catalog,
	ExtractLog,
	ExtractOptions,
	ExtractSummary,
	Extractor,
	KillSwitch,
	RawDump,
	SacdRipError,
	TrackOutcome,
	track_path,
};
use std::{
	path::Path,
	process::ExitCode,
	time::Instant,
};



/// # Main.
///
/// This lets us bubble up startup errors so they can be pretty-printed.
fn main() -> ExitCode {
	match main__() {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::FAILURE,
		Err(e @ (SacdRipError::PrintHelp | SacdRipError::PrintVersion)) => {
			println!("{e}");
			ExitCode::SUCCESS
		},
		Err(e) => {
			Msg::from(e).eprint();
			ExitCode::FAILURE
		},
	}
}

#[inline]
/// # Actual Main.
///
/// This does all the stuff, returning `false` if any tracks failed.
fn main__() -> Result<bool, SacdRipError> {
	let (opts, image, sheet, output, print) = cli::parse()?;

	// Show the track table.
	let area = sheet.area(opts.area()).ok_or(SacdRipError::Area(opts.area()))?;
	Msg::custom("Area", 199, opts.area().to_string().as_str()).eprint();
	eprintln!("{area}");

	// Go ahead and leave if there's no extracting to do.
	if print { return Ok(true); }

	// Set up progress and killswitch.
	let killed = KillSwitch::default();
	let progress = Progless::default();
	let k2 = killed.clone();
	ctrlc::set_handler(move || { k2.kill(); })
		.map_err(|_| SacdRipError::Bug("unable to intercept CTRL+C"))?;

	// Log header.
	if opts.verbose() { log_header(&opts, &output); }
	let mut log = ExtractLog::new(opts.verbose(), opts.area());

	// Extract!
	let now = Instant::now();
	let mut extractor = Extractor::new(image, RawDump::new(&output), opts);
	let summary = extractor.run(&sheet, Some(&progress), &killed)?;

	// Log the particulars.
	for (number, outcome) in summary.tracks() {
		match outcome {
			TrackOutcome::Exported(report) => { log.add_track(report); },
			TrackOutcome::Failed(e) => { log.add_failure(*number, e); },
			TrackOutcome::Skipped => {},
		}
	}
	drop(log);

	extract_summary(&summary, &output, now);
	if summary.killed() { Err(SacdRipError::Killed) }
	else { Ok(summary.is_ok()) }
}

/// # Log Header.
///
/// Print a few basic setup details for the log. Only applies when -v/--verbose
/// is set, and we're extracting something.
fn log_header(opts: &ExtractOptions, output: &Path) {
	use std::io::Write;

	let writer = std::io::stdout();
	let mut handle = writer.lock();
	let _res = writeln!(
		&mut handle,
		concat!("#####
## SACD Rip v", env!("CARGO_PKG_VERSION"), "
## Area:   {area}
## Output: {output}
##
## Malformed sectors are listed with the following fields, separated by two
## spaces:
##   * Track Number                   [2 digits]
##   * Logical Sector Number          [8 digits]
##   * Description
##
## Exported tracks are then listed with their sector counts and the CRC32
## of their packet data.
#####"),
		area=opts.area(),
		output=track_path(output, 0).to_string_lossy().replacen("track00.", "trackNN.", 1),
	);
	let _res = handle.flush();
}

/// # Extraction Summary.
///
/// Print the per-track results and the final tally to STDERR.
fn extract_summary(summary: &ExtractSummary, output: &Path, now: Instant) {
	for (number, outcome) in summary.tracks() {
		match outcome {
			TrackOutcome::Exported(report) => {
				let prefix = format!("Track {number:02}");
				let dst = track_path(output, *number);
				if report.malformed().is_empty() {
					Msg::custom(prefix.as_str(), 10, &*dst.to_string_lossy()).eprint();
				}
				else {
					Msg::custom(
						prefix.as_str(),
						11,
						format!(
							"{} ({} malformed sector(s) skipped)",
							dst.to_string_lossy(),
							report.malformed().len(),
						).as_str(),
					).eprint();
				}
			},
			TrackOutcome::Failed(e) => {
				let prefix = format!("Track {number:02}");
				Msg::custom(prefix.as_str(), 9, e.to_string().as_str()).eprint();
			},
			TrackOutcome::Skipped => {},
		}
	}

	let elapsed = NiceElapsed::from(now);
	if summary.is_ok() {
		Msg::success(format!(
			"{} track(s) extracted in {elapsed}.",
			summary.exported(),
		)).eprint();
	}
	else {
		let failed = summary.failures()
			.map(|(n, _)| format!("#{n:02}"))
			.collect::<Vec<_>>();
		Msg::warning(format!(
			"{} track(s) extracted, {} failed, {} skipped, in {elapsed}.",
			summary.exported(),
			summary.failed(),
			summary.skipped(),
		)).eprint();
		if ! failed.is_empty() {
			Msg::warning(format!("Check track(s) {}.", failed.oxford_and())).eprint();
		}
	}
}
