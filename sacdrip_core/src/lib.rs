/*!
# SACD Rip: Library

This crate demultiplexes the audio sectors of a Super Audio CD image and
exports each track's raw bitstream to its own file.

The moving parts are:

* [`AudioSector`]: a byte-order-independent view of one raw 2048-byte sector;
* [`export_track`]: the per-track read/decode/append/close loop;
* [`Extractor`]: the per-area orchestrator, producing an [`ExtractSummary`].

Disc access, the track catalog, and output writing are pluggable via the
[`SectorSource`], [`Catalog`], and [`WriterFactory`] traits. Simple
file-backed implementations ([`DiscImage`], [`TrackSheet`], [`RawDump`]) are
provided for the binary.
*/

#![deny(unsafe_code)]

#![warn(
	clippy::filetype_is_file,
	clippy::integer_division,
	clippy::needless_borrow,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::suboptimal_flops,
	clippy::unneeded_field_pattern,
	macro_use_extern_crate,
	missing_copy_implementations,
	missing_debug_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unreachable_pub,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![allow(
	clippy::doc_markdown,
	clippy::module_name_repetitions,
	clippy::redundant_pub_crate,
)]

mod abort;
mod catalog;
mod error;
mod extract;
mod image;
mod sector;
mod writer;

pub use abort::KillSwitch;
pub use catalog::{
	Area,
	Catalog,
	TrackDescriptor,
	TrackSheet,
};
pub use error::{
	SacdRipError,
	SectorFault,
};
pub use extract::{
	driver::{
		export_track,
		TrackReport,
	},
	log::ExtractLog,
	opts::{
		ExtractOptions,
		ExtractOptionsTracks,
	},
	summary::{
		ExtractSummary,
		TrackOutcome,
	},
	Extractor,
};
pub use image::{
	DiscImage,
	SectorSource,
};
pub use sector::{
	AudioSector,
	DataType,
	FrameInfo,
	PacketInfo,
	PacketIter,
	SectorHeader,
	check_sections,
};
pub use writer::{
	RawDump,
	RawDumpWriter,
	track_path,
	TrackWriter,
	WriterFactory,
};



/// # Raw Sector.
pub type RawSector = [u8; SECTOR_SIZE];

/// # Bytes Per Sector.
///
/// Every logical sector of a Super Audio CD holds exactly this many bytes of
/// user data.
pub const SECTOR_SIZE: usize = 2048;

/// # Sector Header Size.
///
/// The audio sector header is a single bit-packed byte.
pub const SECTOR_HEADER_SIZE: usize = 1;

/// # Packet Info Size.
pub const PACKET_INFO_SIZE: usize = 2;

/// # Frame Info Size (DST).
///
/// DST-encoded sectors carry a four-byte frame info record.
pub const FRAME_INFO_SIZE_DST: usize = 4;

/// # Frame Info Size (Plain DSD).
///
/// Plain DSD sectors leave off the trailing byte.
pub const FRAME_INFO_SIZE_DSD: usize = 3;

/// # Maximum Packets Per Sector.
///
/// The header's packet count is three bits wide.
pub const MAX_PACKETS: usize = 7;

/// # Maximum Frames Per Sector.
///
/// The header's frame count is also three bits wide.
pub const MAX_FRAMES: usize = 7;

/// # Default Output File.
///
/// This is used as the `<file>` half of `track_path` when the output base
/// doesn't supply one.
pub const DEFAULT_OUTPUT: &str = "sacd.raw";
