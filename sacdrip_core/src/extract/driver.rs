/*!
# SACD Rip: Track Export
*/

use crate::{
	AudioSector,
	KillSwitch,
	SacdRipError,
	SECTOR_SIZE,
	SectorFault,
	SectorSource,
	TrackDescriptor,
	TrackWriter,
	WriterFactory,
};
use crc32fast::Hasher as Crc;
use fyi_msg::Progless;



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Track Report.
///
/// The vitals from a successful track export.
pub struct TrackReport {
	/// # Track Number.
	number: u8,

	/// # Sectors Read.
	sectors: u32,

	/// # Malformed (Skipped) Sectors.
	malformed: Vec<(u32, SectorFault)>,

	/// # Data Checksum.
	crc: u32,
}

impl TrackReport {
	#[must_use]
	/// # Track Number.
	pub const fn number(&self) -> u8 { self.number }

	#[must_use]
	/// # Sectors Read.
	pub const fn sectors(&self) -> u32 { self.sectors }

	#[must_use]
	#[allow(clippy::cast_possible_truncation)] // It can't exceed sectors.
	/// # Sectors Appended.
	///
	/// This is the total read, less any that were malformed.
	pub const fn appended(&self) -> u32 {
		self.sectors.saturating_sub(self.malformed.len() as u32)
	}

	#[must_use]
	/// # Malformed Sectors.
	///
	/// The LSN and problem for each sector that had to be skipped.
	pub fn malformed(&self) -> &[(u32, SectorFault)] { &self.malformed }

	#[must_use]
	/// # CRC32.
	///
	/// The checksum of every byte handed to the writer, i.e. the packet data
	/// of each well-formed sector, whatever its type.
	pub const fn crc32(&self) -> u32 { self.crc }
}



/// # Export Track.
///
/// Create a writer for the track, then read, decode, and append each of its
/// sectors, in order, finally closing the writer.
///
/// Exactly `track.len()` sectors are read, starting at `track.start()`.
///
/// Malformed sectors are skipped, and noted in the report, but do not stop
/// the export. Anything else that goes wrong after the writer has been
/// created aborts the track, discarding the writer.
///
/// The kill switch is checked before each sector is read.
///
/// ## Errors
///
/// This will return an error if the writer cannot be created, a sector cannot
/// be read or appended, the writer cannot be closed, or the user aborts.
pub fn export_track<S, F>(
	track: TrackDescriptor,
	area: u8,
	convert: bool,
	src: &mut S,
	factory: &mut F,
	progress: Option<&Progless>,
	killed: &KillSwitch,
) -> Result<TrackReport, SacdRipError>
where S: SectorSource + ?Sized, F: WriterFactory + ?Sized {
	// Don't bother with the writer if the range is nonsense.
	if track.sector_range().is_none() { return Err(SacdRipError::Overflow); }

	let mut writer = factory.create(track.number(), area, convert)?;
	match export_sectors(track, src, &mut writer, progress, killed) {
		Ok(report) => writer.close().map(|()| report),
		Err(e) => {
			writer.discard();
			Err(e)
		},
	}
}

/// # Export Sectors.
///
/// This is the read/decode/append loop for `export_track`. The writer is
/// closed (or discarded) by the caller.
fn export_sectors<S, W>(
	track: TrackDescriptor,
	src: &mut S,
	writer: &mut W,
	progress: Option<&Progless>,
	killed: &KillSwitch,
) -> Result<TrackReport, SacdRipError>
where S: SectorSource + ?Sized, W: TrackWriter {
	let rng = track.sector_range().ok_or(SacdRipError::Overflow)?;
	let mut buf = [0_u8; SECTOR_SIZE];
	let mut crc = Crc::new();
	let mut report = TrackReport {
		number: track.number(),
		sectors: 0,
		malformed: Vec::new(),
		crc: 0,
	};

	for lsn in rng {
		if killed.killed() { return Err(SacdRipError::Killed); }

		src.read_sector(lsn, &mut buf)?;
		report.sectors += 1;

		match AudioSector::try_from(&buf) {
			Ok(sector) => {
				writer.append(&sector)?;
				crc.update(sector.data());
			},
			Err(SacdRipError::Malformed(fault)) => { report.malformed.push((lsn, fault)); },
			Err(e) => return Err(e),
		}

		if let Some(p) = progress { p.increment(); }
	}

	report.crc = crc.finalize();
	Ok(report)
}
