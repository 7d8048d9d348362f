/*!
# SACD Rip: Test Fixtures
*/

use crate::{
	AudioSector,
	DataType,
	KillSwitch,
	RawSector,
	SacdRipError,
	SECTOR_SIZE,
	SectorSource,
	TrackWriter,
	WriterFactory,
	sector::test_sector,
};
use std::{
	cell::RefCell,
	collections::BTreeMap,
	rc::Rc,
};



/// # Malformed Sector.
///
/// A single packet claiming more data than the sector can hold.
pub(super) fn bad_sector() -> RawSector {
	let mut out = [0_u8; SECTOR_SIZE];
	out[0] = 0b0000_0001;
	out[1] = 0b0010_0111; // Audio, length 0x7FF.
	out[2] = 0xFF;
	out
}

/// # Good Sector.
///
/// An audio packet, a bit of supplementary data, and some padding. Every good
/// sector is identical.
pub(super) fn good_sector() -> RawSector {
	test_sector(
		&[
			(true, DataType::Audio, 64),
			(false, DataType::Supplementary, 8),
			(false, DataType::Padding, 16),
		],
		1,
		false,
	)
}



#[derive(Debug)]
/// # In-Memory Disc.
pub(super) struct MemDisc {
	sectors: BTreeMap<u32, RawSector>,
	total: u32,
	reads: Vec<u32>,
	fail: Option<u32>,
	kill: Option<(usize, KillSwitch)>,
}

impl MemDisc {
	/// # New.
	///
	/// Every sector starts out good.
	pub(super) fn new(total: u32) -> Self {
		Self {
			sectors: (0..total).map(|lsn| (lsn, good_sector())).collect(),
			total,
			reads: Vec::new(),
			fail: None,
			kill: None,
		}
	}

	/// # With Sector.
	pub(super) fn with_sector(mut self, lsn: u32, raw: RawSector) -> Self {
		self.sectors.insert(lsn, raw);
		self
	}

	/// # With Read Error.
	pub(super) fn with_read_error(self, lsn: u32) -> Self {
		Self { fail: Some(lsn), ..self }
	}

	/// # With Kill.
	///
	/// Flip the switch after the given number of reads.
	pub(super) fn with_kill_after(self, reads: usize, killed: KillSwitch) -> Self {
		Self { kill: Some((reads, killed)), ..self }
	}

	/// # Attempted Reads.
	pub(super) fn reads(&self) -> Vec<u32> { self.reads.clone() }
}

impl SectorSource for MemDisc {
	fn read_sector(&mut self, lsn: u32, buf: &mut RawSector) -> Result<(), SacdRipError> {
		self.reads.push(lsn);
		if let Some((after, killed)) = &self.kill {
			if self.reads.len() >= *after { killed.kill(); }
		}

		if self.fail == Some(lsn) || self.total <= lsn { return Err(SacdRipError::Read(lsn)); }
		let raw = self.sectors.get(&lsn).ok_or(SacdRipError::Read(lsn))?;
		buf.copy_from_slice(raw);
		Ok(())
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Writer Call.
pub(super) enum Call {
	/// # Track, Area, Convert.
	Create(u8, u8, bool),
	Append(u8),
	Close(u8),
	Discard(u8),
}

#[derive(Debug, Default)]
/// # Spy Factory.
///
/// This records every writer call, optionally failing some of them.
pub(super) struct SpyFactory {
	calls: Rc<RefCell<Vec<Call>>>,
	create_err: Option<u8>,
	append_err: Option<(u8, usize)>,
	close_err: Option<u8>,
}

impl SpyFactory {
	/// # Fail Creation.
	pub(super) fn with_create_error(self, track: u8) -> Self {
		Self { create_err: Some(track), ..self }
	}

	/// # Fail Append.
	///
	/// Allow `ok` successful appends for the track, then fail.
	pub(super) fn with_append_error(self, track: u8, ok: usize) -> Self {
		Self { append_err: Some((track, ok)), ..self }
	}

	/// # Fail Close.
	pub(super) fn with_close_error(self, track: u8) -> Self {
		Self { close_err: Some(track), ..self }
	}

	/// # Calls.
	pub(super) fn calls(&self) -> Vec<Call> { self.calls.borrow().clone() }

	/// # Successful Appends for Track.
	pub(super) fn appends(&self, track: u8) -> usize {
		self.calls.borrow().iter().filter(|&&c| c == Call::Append(track)).count()
	}

	/// # Close Count.
	pub(super) fn closes(&self) -> usize {
		self.calls.borrow().iter().filter(|c| matches!(c, Call::Close(_))).count()
	}

	/// # Discard Count.
	pub(super) fn discards(&self) -> usize {
		self.calls.borrow().iter().filter(|c| matches!(c, Call::Discard(_))).count()
	}
}

impl WriterFactory for SpyFactory {
	type Writer = SpyWriter;

	fn create(&mut self, track: u8, area: u8, convert: bool)
	-> Result<Self::Writer, SacdRipError> {
		self.calls.borrow_mut().push(Call::Create(track, area, convert));
		if self.create_err == Some(track) {
			return Err(SacdRipError::Create(format!("track{track:02}")));
		}

		Ok(SpyWriter {
			calls: Rc::clone(&self.calls),
			track,
			fail_after: self.append_err.and_then(|(t, ok)| if t == track { Some(ok) } else { None }),
			fail_close: self.close_err == Some(track),
			appended: 0,
		})
	}
}

#[derive(Debug)]
/// # Spy Writer.
pub(super) struct SpyWriter {
	calls: Rc<RefCell<Vec<Call>>>,
	track: u8,
	fail_after: Option<usize>,
	fail_close: bool,
	appended: usize,
}

impl SpyWriter {
	/// # Write Error.
	fn err(&self) -> SacdRipError { SacdRipError::Write(format!("track{:02}", self.track)) }
}

impl TrackWriter for SpyWriter {
	fn append(&mut self, _sector: &AudioSector<'_>) -> Result<(), SacdRipError> {
		if self.fail_after == Some(self.appended) { return Err(self.err()); }
		self.appended += 1;
		self.calls.borrow_mut().push(Call::Append(self.track));
		Ok(())
	}

	fn close(self) -> Result<(), SacdRipError> {
		self.calls.borrow_mut().push(Call::Close(self.track));
		if self.fail_close { Err(self.err()) }
		else { Ok(()) }
	}

	fn discard(self) {
		self.calls.borrow_mut().push(Call::Discard(self.track));
	}
}
