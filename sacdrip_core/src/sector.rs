/*!
# SACD Rip: Audio Sectors

Every audio sector begins with a one-byte header, followed by a run of
two-byte packet info entries, a run of three- or four-byte frame info entries,
and finally the packet data itself.

The header and packet info fields are bit-packed, most-significant bit first.
Everything here is pulled apart with explicit masks and shifts so the results
are the same on any host.
*/

use crate::{
	FRAME_INFO_SIZE_DSD,
	FRAME_INFO_SIZE_DST,
	MAX_FRAMES,
	MAX_PACKETS,
	PACKET_INFO_SIZE,
	RawSector,
	SacdRipError,
	SECTOR_HEADER_SIZE,
	SECTOR_SIZE,
	SectorFault,
};
use std::iter::FusedIterator;



/// # Header: DST Encoded.
const HEADER_DST: u8 =          0b1000_0000;

/// # Header: Frame Info Count.
const HEADER_FRAME_COUNT: u8 =  0b0011_1000;

/// # Header: Packet Info Count.
const HEADER_PACKET_COUNT: u8 = 0b0000_0111;

/// # Packet: Frame Start.
const PACKET_FRAME_START: u16 = 0b1000_0000_0000_0000;

/// # Packet: Data Type.
///
/// Bit 11 is reserved. Discs that put the type in bits 13-11 instead will
/// decode their audio packets as `DataType::Other`.
const PACKET_DATA_TYPE: u16 =   0b0111_0000_0000_0000;

/// # Packet: Length.
const PACKET_LENGTH: u16 =      0b0000_0111_1111_1111;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Sector Header.
///
/// ```text
/// 7   6   5 4 3        2 1 0
/// DST RES FRAME_COUNT  PACKET_COUNT
/// ```
pub struct SectorHeader(u8);

impl From<u8> for SectorHeader {
	#[inline]
	fn from(src: u8) -> Self { Self(src) }
}

impl SectorHeader {
	#[must_use]
	/// # DST Encoded?
	///
	/// Returns `true` if the sector's audio is DST-compressed rather than
	/// plain DSD.
	pub const fn dst_encoded(self) -> bool { HEADER_DST == self.0 & HEADER_DST }

	#[must_use]
	/// # Frame Info Count.
	pub const fn frame_info_count(self) -> u8 { (self.0 & HEADER_FRAME_COUNT) >> 3 }

	#[must_use]
	/// # Frame Info Size.
	///
	/// The per-entry size of the frame info records, which depends on the
	/// encoding.
	pub const fn frame_info_size(self) -> usize {
		if self.dst_encoded() { FRAME_INFO_SIZE_DST }
		else { FRAME_INFO_SIZE_DSD }
	}

	#[must_use]
	/// # Packet Info Count.
	pub const fn packet_info_count(self) -> u8 { self.0 & HEADER_PACKET_COUNT }
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Packet Data Type.
pub enum DataType {
	/// # Audio.
	Audio,

	/// # Supplementary Data.
	Supplementary,

	#[default]
	/// # Padding.
	Padding,

	/// # Anything Else.
	Other(u8),
}

impl DataType {
	#[must_use]
	/// # From Bits.
	///
	/// Only the lowest three bits are considered.
	pub const fn from_bits(src: u8) -> Self {
		match src & 0b111 {
			2 => Self::Audio,
			3 => Self::Supplementary,
			7 => Self::Padding,
			n => Self::Other(n),
		}
	}

	#[must_use]
	/// # As Bits.
	pub const fn as_bits(self) -> u8 {
		match self {
			Self::Audio => 2,
			Self::Supplementary => 3,
			Self::Padding => 7,
			Self::Other(n) => n & 0b111,
		}
	}
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Packet Info.
///
/// ```text
/// 15           14 13 12   11   10 … 0
/// FRAME_START  DATA_TYPE  RES  PACKET_LENGTH
/// ```
pub struct PacketInfo {
	frame_start: bool,
	data_type: DataType,
	len: u16,
}

impl From<[u8; 2]> for PacketInfo {
	#[inline]
	fn from(src: [u8; 2]) -> Self { Self::from_be_bytes(src) }
}

impl PacketInfo {
	#[must_use]
	#[allow(clippy::cast_possible_truncation)] // It's three bits.
	/// # From Big-Endian Bytes.
	pub const fn from_be_bytes(src: [u8; 2]) -> Self {
		let raw = u16::from_be_bytes(src);
		Self {
			frame_start: PACKET_FRAME_START == raw & PACKET_FRAME_START,
			data_type: DataType::from_bits(((raw & PACKET_DATA_TYPE) >> 12) as u8),
			len: raw & PACKET_LENGTH,
		}
	}

	#[must_use]
	/// # Frame Start?
	///
	/// Returns `true` if a new audio frame begins with this packet.
	pub const fn frame_start(self) -> bool { self.frame_start }

	#[must_use]
	/// # Data Type.
	pub const fn data_type(self) -> DataType { self.data_type }

	#[must_use]
	/// # Packet Length (Bytes).
	pub const fn len(self) -> u16 { self.len }

	#[must_use]
	/// # Is Empty?
	pub const fn is_empty(self) -> bool { self.len == 0 }
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # Frame Info.
///
/// The contents are opaque here; the bytes are kept exactly as found on the
/// disc. Plain DSD entries are three bytes, DST entries four.
pub struct FrameInfo {
	raw: [u8; FRAME_INFO_SIZE_DST],
	len: u8,
}

impl FrameInfo {
	#[allow(clippy::cast_possible_truncation)] // It's at most four.
	/// # From Slice.
	///
	/// The slice must be three or four bytes long.
	fn from_slice(src: &[u8]) -> Self {
		let mut raw = [0_u8; FRAME_INFO_SIZE_DST];
		let len = src.len().min(FRAME_INFO_SIZE_DST);
		raw[..len].copy_from_slice(&src[..len]);
		Self { raw, len: len as u8 }
	}

	#[must_use]
	/// # As Bytes.
	pub fn as_bytes(&self) -> &[u8] { &self.raw[..usize::from(self.len)] }
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Audio Sector.
///
/// This is the decoded form of a single raw sector. The packet and frame info
/// are unpacked into host-native values, while the packet data is borrowed
/// as-is from the raw buffer.
///
/// Use `AudioSector::try_from` to decode one.
pub struct AudioSector<'a> {
	/// # Raw Sector.
	raw: &'a RawSector,

	/// # Header.
	header: SectorHeader,

	/// # Packet Info.
	packets: [PacketInfo; MAX_PACKETS],

	/// # Frame Info.
	frames: [FrameInfo; MAX_FRAMES],

	/// # Payload Offset.
	offset: usize,
}

impl<'a> TryFrom<&'a RawSector> for AudioSector<'a> {
	type Error = SacdRipError;

	fn try_from(raw: &'a RawSector) -> Result<Self, Self::Error> {
		let header = SectorHeader::from(raw[0]);
		let packet_count = usize::from(header.packet_info_count());
		let frame_count = usize::from(header.frame_info_count());
		let frame_size = header.frame_info_size();

		// Make sure the info sections fit before touching them.
		let offset = check_sections(packet_count, frame_count, frame_size)?;

		// Packet info.
		let mut packets = [PacketInfo::default(); MAX_PACKETS];
		let mut pos = SECTOR_HEADER_SIZE;
		for p in packets.iter_mut().take(packet_count) {
			*p = PacketInfo::from_be_bytes([raw[pos], raw[pos + 1]]);
			pos += PACKET_INFO_SIZE;
		}

		// Frame info.
		let mut frames = [FrameInfo::default(); MAX_FRAMES];
		for f in frames.iter_mut().take(frame_count) {
			*f = FrameInfo::from_slice(&raw[pos..pos + frame_size]);
			pos += frame_size;
		}

		// The packet data has to fit in what's left.
		let data_len = packets.iter()
			.take(packet_count)
			.fold(0_usize, |acc, p| acc + usize::from(p.len()));
		if SECTOR_SIZE - offset < data_len { return Err(SectorFault::Packets.into()); }

		Ok(Self { raw, header, packets, frames, offset })
	}
}

impl<'a> AudioSector<'a> {
	#[must_use]
	/// # Header.
	pub const fn header(&self) -> SectorHeader { self.header }

	#[must_use]
	/// # Packet Info.
	pub fn packets(&self) -> &[PacketInfo] {
		&self.packets[..usize::from(self.header.packet_info_count())]
	}

	#[must_use]
	/// # Frame Info.
	pub fn frames(&self) -> &[FrameInfo] {
		&self.frames[..usize::from(self.header.frame_info_count())]
	}

	#[must_use]
	/// # Payload Offset.
	///
	/// The byte position within the raw sector where the packet data begins.
	pub const fn payload_offset(&self) -> usize { self.offset }

	#[must_use]
	/// # Payload.
	///
	/// Everything from the payload offset to the end of the sector, untouched.
	pub fn payload(&self) -> &'a [u8] { &self.raw[self.offset..] }

	#[must_use]
	/// # Packet Data.
	///
	/// Return an iterator over each packet's info paired with its data.
	pub fn packet_data(&self) -> PacketIter<'a> {
		PacketIter {
			packets: self.packets,
			len: usize::from(self.header.packet_info_count()),
			idx: 0,
			data: self.payload(),
		}
	}

	#[must_use]
	/// # Packet Data (All).
	///
	/// Return the bytes of every packet, back-to-back, exactly as they appear
	/// in the sector. Packets are not filtered by type; the unused tail of the
	/// sector is left off.
	pub fn data(&self) -> &'a [u8] {
		let len = self.packets().iter().fold(0_usize, |acc, p| acc + usize::from(p.len()));
		let payload = self.payload();
		&payload[..len.min(payload.len())]
	}
}



#[derive(Debug, Clone)]
/// # Packet Iterator.
///
/// Walk the packets of an `AudioSector`, yielding each info alongside the
/// slice of payload it describes.
pub struct PacketIter<'a> {
	packets: [PacketInfo; MAX_PACKETS],
	len: usize,
	idx: usize,
	data: &'a [u8],
}

impl<'a> Iterator for PacketIter<'a> {
	type Item = (PacketInfo, &'a [u8]);

	fn next(&mut self) -> Option<Self::Item> {
		if self.idx < self.len {
			let p = self.packets[self.idx];
			self.idx += 1;

			// Decoding already verified the lengths fit.
			let (chunk, rest) = self.data.split_at(usize::from(p.len()).min(self.data.len()));
			self.data = rest;
			Some((p, chunk))
		}
		else { None }
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.len();
		(len, Some(len))
	}
}

impl ExactSizeIterator for PacketIter<'_> {
	fn len(&self) -> usize { self.len - self.idx }
}

impl FusedIterator for PacketIter<'_> {}



/// # Check Sections.
///
/// Verify a header's packet info (`packets` two-byte entries) and frame info
/// (`frames` entries of `frame_size` bytes) fit within a single sector,
/// returning the offset at which the packet data begins.
///
/// ## Errors
///
/// Returns a malformed sector error if the sections would overrun the sector.
pub fn check_sections(packets: usize, frames: usize, frame_size: usize)
-> Result<usize, SacdRipError> {
	packets.checked_mul(PACKET_INFO_SIZE)
		.zip(frames.checked_mul(frame_size))
		.and_then(|(p, f)| p.checked_add(f))
		.and_then(|n| n.checked_add(SECTOR_HEADER_SIZE))
		.filter(|n| *n <= SECTOR_SIZE)
		.ok_or_else(|| SectorFault::Sections.into())
}



#[cfg(test)]
/// # Build a Test Sector.
///
/// Packets are given as `(frame_start, data_type, length)`. Each packet's
/// data is filled with its one-based index so the slices are easy to tell
/// apart; frame info entries are filled with `0xF0 + index`.
pub(crate) fn test_sector(packets: &[(bool, DataType, u16)], frames: usize, dst: bool)
-> RawSector {
	let mut out = [0_u8; SECTOR_SIZE];
	let packet_count = u8::try_from(packets.len()).unwrap_or(0) & 0b111;
	let frame_count = u8::try_from(frames).unwrap_or(0) & 0b111;
	out[0] = packet_count | (frame_count << 3);
	if dst { out[0] |= HEADER_DST; }

	let mut pos = SECTOR_HEADER_SIZE;
	for (start, kind, len) in packets.iter().copied() {
		let mut v = (u16::from(kind.as_bits()) << 12) | (len & PACKET_LENGTH);
		if start { v |= PACKET_FRAME_START; }
		out[pos..pos + 2].copy_from_slice(&v.to_be_bytes());
		pos += PACKET_INFO_SIZE;
	}

	let frame_size = if dst { FRAME_INFO_SIZE_DST } else { FRAME_INFO_SIZE_DSD };
	for idx in 0..frame_count {
		for b in &mut out[pos..pos + frame_size] { *b = 0xF0 + idx; }
		pos += frame_size;
	}

	for (idx, (_, _, len)) in (1_u8..).zip(packets.iter()) {
		let len = usize::from(*len);
		for b in &mut out[pos..pos + len] { *b = idx; }
		pos += len;
	}

	out
}
