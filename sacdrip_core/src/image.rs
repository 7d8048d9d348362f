/*!
# SACD Rip: Disc Images
*/

use crate::{
	RawSector,
	SacdRipError,
	SECTOR_SIZE,
};
use std::{
	fs::File,
	io::{
		BufReader,
		Read,
		Seek,
		SeekFrom,
	},
	path::Path,
};



/// # Sector Source.
///
/// Anything that can hand over a raw sector by logical sector number.
pub trait SectorSource {
	/// # Read Sector.
	///
	/// Read the sector at `lsn` into `buf`, replacing its contents.
	///
	/// ## Errors
	///
	/// Implementations should return `SacdRipError::Read` if the sector
	/// cannot be read in full.
	fn read_sector(&mut self, lsn: u32, buf: &mut RawSector) -> Result<(), SacdRipError>;
}

impl<T: SectorSource + ?Sized> SectorSource for &mut T {
	#[inline]
	fn read_sector(&mut self, lsn: u32, buf: &mut RawSector) -> Result<(), SacdRipError> {
		(**self).read_sector(lsn, buf)
	}
}



#[derive(Debug)]
/// # Disc Image.
///
/// A flat, headerless image of the disc's user data: sector `n` lives at
/// byte offset `n * 2048`.
pub struct DiscImage<R> {
	inner: R,
	sectors: u32,
}

impl DiscImage<BufReader<File>> {
	/// # Open.
	///
	/// Open an image file from disk.
	///
	/// ## Errors
	///
	/// This will return an error if the path is not a file or cannot be
	/// opened.
	pub fn open<P>(src: P) -> Result<Self, SacdRipError>
	where P: AsRef<Path> {
		let src = src.as_ref();
		let path = src.to_string_lossy().into_owned();
		if ! src.is_file() { return Err(SacdRipError::Device(path)); }

		File::open(src)
			.map_err(|_| SacdRipError::DeviceOpen(path.clone()))
			.and_then(|f| Self::new(BufReader::new(f)))
			.map_err(|_| SacdRipError::DeviceOpen(path))
	}
}

impl<R: Read + Seek> DiscImage<R> {
	/// # New.
	///
	/// Wrap an arbitrary reader. The total sector count is worked out from the
	/// stream length; a trailing partial sector is ignored.
	///
	/// ## Errors
	///
	/// This will return an error if the stream length cannot be determined
	/// or is too big.
	pub fn new(mut inner: R) -> Result<Self, SacdRipError> {
		let len = inner.seek(SeekFrom::End(0)).map_err(|_| SacdRipError::Read(0))?;
		let sectors = u32::try_from(len / SECTOR_SIZE as u64)
			.map_err(|_| SacdRipError::Overflow)?;
		Ok(Self { inner, sectors })
	}

	#[must_use]
	/// # Total Sectors.
	pub const fn sectors(&self) -> u32 { self.sectors }
}

impl<R: Read + Seek> SectorSource for DiscImage<R> {
	fn read_sector(&mut self, lsn: u32, buf: &mut RawSector) -> Result<(), SacdRipError> {
		if self.sectors <= lsn { return Err(SacdRipError::Read(lsn)); }

		self.inner.seek(SeekFrom::Start(u64::from(lsn) * SECTOR_SIZE as u64))
			.and_then(|_| self.inner.read_exact(buf))
			.map_err(|_| SacdRipError::Read(lsn))
	}
}
