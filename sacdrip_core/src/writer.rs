/*!
# SACD Rip: Output Writers
*/

use crate::{
	AudioSector,
	DEFAULT_OUTPUT,
	SacdRipError,
};
use std::{
	io::{
		BufWriter,
		Write,
	},
	path::{
		Path,
		PathBuf,
	},
};
use tempfile::NamedTempFile;



/// # Writer Factory.
///
/// This hands out one `TrackWriter` per exported track.
pub trait WriterFactory {
	/// # Writer Type.
	type Writer: TrackWriter;

	/// # Create.
	///
	/// Open a writer for the given (one-based) track number of the given
	/// area. If `convert` is `true`, DST-compressed audio should be converted
	/// to plain DSD on the way out.
	///
	/// ## Errors
	///
	/// Returns an error if the writer cannot be created, or `convert` is
	/// requested but unsupported.
	fn create(&mut self, track: u8, area: u8, convert: bool)
	-> Result<Self::Writer, SacdRipError>;
}

/// # Track Writer.
///
/// A writer lives for exactly one track. It is consumed by either `close`,
/// once every sector has been appended, or `discard`, if the export was cut
/// short.
pub trait TrackWriter: Sized {
	/// # Append.
	///
	/// Add a decoded sector's data to the output.
	///
	/// ## Errors
	///
	/// Returns an error if the data cannot be written.
	fn append(&mut self, sector: &AudioSector<'_>) -> Result<(), SacdRipError>;

	/// # Close.
	///
	/// Finalize the output.
	///
	/// ## Errors
	///
	/// Returns an error if the output cannot be finalized.
	fn close(self) -> Result<(), SacdRipError>;

	/// # Discard.
	///
	/// Close out a partially-written output. By default this just calls
	/// `close` and ignores the result.
	fn discard(self) { let _res = self.close(); }
}



/// # Track Path.
///
/// Work out the output path for a given track from the base path, like
/// `<DIR>/track<NN>.<FILE>`, where `<DIR>` is everything up to and including
/// the base's last slash, and `<FILE>` everything after it (or
/// `DEFAULT_OUTPUT` if there's nothing after it).
///
/// ```
/// use sacdrip_core::track_path;
///
/// assert_eq!(
///     track_path("/music/album.dff", 3),
///     std::path::Path::new("/music/track03.album.dff"),
/// );
/// ```
pub fn track_path<P>(base: P, number: u8) -> PathBuf
where P: AsRef<Path> {
	let base = base.as_ref().to_string_lossy();
	let (dir, file) = base.rfind('/')
		.map_or(("", &base[..]), |pos| base.split_at(pos + 1));
	let file = if file.is_empty() { DEFAULT_OUTPUT } else { file };
	PathBuf::from(format!("{dir}track{number:02}.{file}"))
}



#[derive(Debug, Clone)]
/// # Raw Dump.
///
/// This writer factory saves the packet data of each track's sectors
/// back-to-back with no container at all. Packets are passed through as-is,
/// whatever their type.
///
/// Output is written to a temporary file alongside the destination and only
/// moved into place on `close`, so a discarded track leaves nothing behind.
///
/// Raw dumps are bit-exact copies; DST conversion is not supported.
pub struct RawDump {
	base: PathBuf,
}

impl RawDump {
	#[must_use]
	/// # New.
	///
	/// Output paths are generated from `base` via `track_path`.
	pub fn new<P>(base: P) -> Self
	where P: AsRef<Path> {
		Self { base: base.as_ref().to_path_buf() }
	}
}

impl WriterFactory for RawDump {
	type Writer = RawDumpWriter;

	fn create(&mut self, track: u8, _area: u8, convert: bool)
	-> Result<Self::Writer, SacdRipError> {
		if convert { return Err(SacdRipError::Convert); }

		let dst = track_path(&self.base, track);
		let dir = dst.parent()
			.filter(|p| ! p.as_os_str().is_empty())
			.unwrap_or_else(|| Path::new("."));

		let tmp = tempfile::Builder::new()
			.prefix(".sacdrip")
			.tempfile_in(dir)
			.map_err(|_| SacdRipError::Create(dst.to_string_lossy().into_owned()))?;

		Ok(RawDumpWriter {
			file: BufWriter::new(tmp),
			dst,
		})
	}
}



#[derive(Debug)]
/// # Raw Dump Writer.
pub struct RawDumpWriter {
	file: BufWriter<NamedTempFile>,
	dst: PathBuf,
}

impl RawDumpWriter {
	#[must_use]
	/// # Destination.
	pub fn dst(&self) -> &Path { &self.dst }

	/// # Write Error.
	fn err(&self) -> SacdRipError {
		SacdRipError::Write(self.dst.to_string_lossy().into_owned())
	}
}

impl TrackWriter for RawDumpWriter {
	fn append(&mut self, sector: &AudioSector<'_>) -> Result<(), SacdRipError> {
		self.file.write_all(sector.data()).map_err(|_| self.err())
	}

	fn close(self) -> Result<(), SacdRipError> {
		let err = self.err();
		let tmp = self.file.into_inner().map_err(|_| err.clone())?;
		tmp.persist(&self.dst).map(|_| ()).map_err(|_| err)
	}

	/// # Discard.
	///
	/// Dropping the temporary file deletes it.
	fn discard(self) {}
}



#[cfg(test)]
mod test {
	use super::*;
	use crate::{
		DataType,
		SECTOR_SIZE,
		sector::test_sector,
	};

	#[test]
	fn t_track_path() {
		for (base, number, expected) in [
			("", 1, "track01.sacd.raw"),
			("out/", 2, "out/track02.sacd.raw"),
			("album.dff", 3, "track03.album.dff"),
			("/music/sacd/album.dff", 12, "/music/sacd/track12.album.dff"),
			("./a/b/x", 255, "./a/b/track255.x"),
		] {
			assert_eq!(
				track_path(base, number),
				PathBuf::from(expected),
				"Wrong path for {base:?} #{number}.",
			);
		}
	}

	#[test]
	fn t_raw_dump() {
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		let base = dir.path().join("album.dsd");
		let mut factory = RawDump::new(&base);

		let raw = test_sector(
			&[
				(true, DataType::Audio, 30),
				(false, DataType::Supplementary, 5),
				(false, DataType::Audio, 20),
				(false, DataType::Padding, 100),
			],
			1,
			true,
		);
		let sector = AudioSector::try_from(&raw).expect("Sector failed to decode.");

		// Two sectors' worth, then close.
		let mut writer = factory.create(1, 0, false).expect("Writer failed.");
		assert_eq!(writer.dst(), dir.path().join("track01.album.dsd"));
		writer.append(&sector).expect("Append failed.");
		writer.append(&sector).expect("Append failed.");
		assert!(! dir.path().join("track01.album.dsd").exists(), "Output should not exist until closed.");
		writer.close().expect("Close failed.");

		let out = std::fs::read(dir.path().join("track01.album.dsd")).expect("Read failed.");
		let mut expected = Vec::new();
		for _ in 0..2 {
			expected.extend_from_slice(&[1_u8; 30]);
			expected.extend_from_slice(&[2_u8; 5]);
			expected.extend_from_slice(&[3_u8; 20]);
			expected.extend_from_slice(&[4_u8; 100]);
		}
		assert_eq!(out, expected, "Every packet should be saved, in order.");

		// Discarding leaves nothing behind.
		let mut writer = factory.create(2, 0, false).expect("Writer failed.");
		writer.append(&sector).expect("Append failed.");
		writer.discard();
		let files: Vec<_> = std::fs::read_dir(dir.path())
			.expect("Read dir failed.")
			.filter_map(|e| e.ok().map(|e| e.file_name()))
			.collect();
		assert_eq!(files, ["track01.album.dsd"], "Discarded output lingers.");
	}

	#[test]
	fn t_raw_dump_other_type() {
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		let mut factory = RawDump::new(dir.path().join("album.dsd"));

		// One packet, no frames, with the type in bits 13-11.
		let mut raw = [0_u8; SECTOR_SIZE];
		raw[0] = 1;
		raw[1] = 0b1000_0000 | (2 << 3);
		raw[2] = 100;
		raw[3..103].fill(9);
		let sector = AudioSector::try_from(&raw).expect("Sector failed to decode.");
		assert_eq!(sector.packets()[0].data_type(), DataType::Other(1));

		let mut writer = factory.create(1, 0, false).expect("Writer failed.");
		writer.append(&sector).expect("Append failed.");
		writer.close().expect("Close failed.");

		let out = std::fs::read(dir.path().join("track01.album.dsd")).expect("Read failed.");
		assert_eq!(out, [9_u8; 100], "Untyped packets should still be saved.");
	}

	#[test]
	fn t_raw_dump_errors() {
		let dir = tempfile::tempdir().expect("Tempdir failed.");
		let mut factory = RawDump::new(dir.path().join("album.dsd"));
		assert!(matches!(factory.create(1, 0, true), Err(SacdRipError::Convert)));

		let mut factory = RawDump::new(dir.path().join("missing/album.dsd"));
		assert!(matches!(factory.create(1, 0, false), Err(SacdRipError::Create(_))));
	}
}
