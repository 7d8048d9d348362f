/*!
# SACD Rip: Log
*/

use crate::{
	SacdRipError,
	SectorFault,
	TrackReport,
};
use dactyl::NiceElapsed;
use std::{
	io::Write,
	time::Instant,
};
use utc2k::FmtUtc2k;



#[derive(Debug)]
/// # Extraction Log.
///
/// This holds the log-worthy details from an extraction run, printing them
/// en masse to STDOUT when dropped (if enabled).
///
/// Doing it this way, versus printing each line in realtime, keeps the output
/// from fighting with the progress bar.
pub struct ExtractLog {
	start: Option<(u8, Instant)>,
	err: Vec<(u8, SacdRipError, FmtUtc2k)>,
	state: Vec<(u8, u32, SectorFault)>,
	crc: Vec<(u8, u32, u32)>,
}

impl Drop for ExtractLog {
	/// # Final Print Maybe.
	fn drop(&mut self) {
		if self.start.is_some() {
			let writer = std::io::stdout();
			let mut handle = writer.lock();
			let _res = self.flush(&mut handle);
		}
	}
}

impl ExtractLog {
	#[must_use]
	/// # New Instance.
	///
	/// A disabled log silently ignores everything sent its way.
	pub fn new(enabled: bool, area: u8) -> Self {
		Self {
			start: if enabled { Some((area, Instant::now())) } else { None },
			err: Vec::new(),
			state: Vec::new(),
			crc: Vec::new(),
		}
	}

	#[must_use]
	/// # Is Enabled?
	pub const fn is_enabled(&self) -> bool { self.start.is_some() }

	/// # Add Track.
	///
	/// Record the malformed sectors and checksum from an exported track.
	pub fn add_track(&mut self, report: &TrackReport) {
		if self.start.is_none() { return; }
		let number = report.number();
		self.state.extend(
			report.malformed().iter().map(|(lsn, fault)| (number, *lsn, *fault))
		);
		self.crc.push((number, report.sectors(), report.crc32()));
	}

	/// # Add Failure.
	pub fn add_failure(&mut self, number: u8, err: &SacdRipError) {
		if self.start.is_none() { return; }
		self.err.push((number, err.clone(), FmtUtc2k::now()));
	}

	/// # Flush.
	///
	/// Write everything collected so far to `handle`, and clear it. This is
	/// called automatically (for STDOUT) on drop.
	///
	/// ## Errors
	///
	/// Returns any I/O errors encountered along the way.
	pub fn flush<W: Write>(&mut self, handle: &mut W) -> std::io::Result<()> {
		// Header.
		let Some((area, start)) = self.start.take() else { return Ok(()); };
		writeln!(
			handle,
			r"##
## Area {area}: {}
## Malformed Sectors: {}
## Failed Tracks: {}
##",
			NiceElapsed::from(start),
			self.state.len(),
			self.err.len(),
		)?;

		// Track failures.
		if ! self.err.is_empty() {
			for (track, err, time) in self.err.drain(..) {
				writeln!(handle, r"## [{time}] Track {track:02}: {err}")?;
			}
			writeln!(handle, "##")?;
		}

		// Sector issues.
		if ! self.state.is_empty() {
			self.state.sort_unstable_by(|a, b| a.1.cmp(&b.1));
			for (track, lsn, fault) in self.state.drain(..) {
				writeln!(handle, r"{track:02}  {lsn:08}  {}", fault.as_str())?;
			}
			writeln!(handle, "##")?;
		}

		// Checksums.
		for (track, sectors, crc) in self.crc.drain(..) {
			writeln!(handle, r"{track:02}  {sectors:>8}  {crc:08x}")?;
		}

		handle.flush()
	}
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		AudioSector,
		KillSwitch,
		TrackDescriptor,
		export_track,
		extract::fixtures::{
			bad_sector,
			good_sector,
			MemDisc,
			SpyFactory,
		},
	};

	#[test]
	fn t_log() {
		let mut disc = MemDisc::new(10).with_sector(4, bad_sector());
		let mut factory = SpyFactory::default();
		let report = export_track(
			TrackDescriptor::new(7, 2, 4),
			0,
			false,
			&mut disc,
			&mut factory,
			None,
			&KillSwitch::default(),
		).expect("Export failed.");

		// The checksum covers the supplementary and padding packets too.
		let raw = good_sector();
		let data = AudioSector::try_from(&raw).expect("Sector failed to decode.").data();
		let mut crc = crc32fast::Hasher::new();
		for _ in 0..3 { crc.update(data); }
		assert_eq!(report.crc32(), crc.finalize(), "Wrong checksum.");

		let mut log = ExtractLog::new(true, 1);
		assert!(log.is_enabled());
		log.add_track(&report);
		log.add_failure(8, &SacdRipError::Read(9));

		let mut out = Vec::new();
		log.flush(&mut out).expect("Flush failed.");
		let out = String::from_utf8(out).expect("Log is not UTF-8.");

		assert!(out.contains("## Area 1:"), "Missing header:\n{out}");
		assert!(out.contains("## Malformed Sectors: 1\n"), "Wrong sector count:\n{out}");
		assert!(out.contains("## Failed Tracks: 1\n"), "Wrong failure count:\n{out}");
		assert!(out.contains("Track 08: "), "Missing failure:\n{out}");
		assert!(out.contains("07  00000004  packet data overruns the sector"), "Missing sector:\n{out}");
		assert!(
			out.contains(&format!("07         4  {:08x}", report.crc32())),
			"Missing checksum:\n{out}",
		);

		// Flushing empties it out.
		assert!(! log.is_enabled(), "The log should be spent.");
		let mut out = Vec::new();
		log.flush(&mut out).expect("Flush failed.");
		assert!(out.is_empty(), "Nothing should be left to write.");
	}

	#[test]
	fn t_log_disabled() {
		let mut log = ExtractLog::new(false, 0);
		log.add_failure(1, &SacdRipError::Killed);
		assert!(log.err.is_empty(), "Disabled logs shouldn't collect anything.");

		let mut out = Vec::new();
		log.flush(&mut out).expect("Flush failed.");
		assert!(out.is_empty(), "Disabled logs shouldn't write anything.");
	}
}
