/*!
# SACD Rip: Extraction
*/

pub(super) mod driver;
pub(super) mod log;
pub(super) mod opts;
pub(super) mod summary;
#[cfg(test)] mod fixtures;

use crate::{
	Catalog,
	export_track,
	ExtractOptions,
	ExtractSummary,
	KillSwitch,
	SacdRipError,
	SectorSource,
	TrackDescriptor,
	TrackOutcome,
	WriterFactory,
};
use fyi_msg::{
	Msg,
	Progless,
};



#[derive(Debug)]
/// # Extractor.
///
/// This coordinates the export of one program area's tracks, one after
/// another, from a sector source to a writer factory.
///
/// A failing track does not stop the run; its error is recorded in the
/// summary and the next track is attempted. An abort, on the other hand,
/// discards the track in progress and skips the rest.
pub struct Extractor<S, F> {
	src: S,
	factory: F,
	opts: ExtractOptions,
}

impl<S, F> Extractor<S, F>
where S: SectorSource, F: WriterFactory {
	#[must_use]
	/// # New.
	pub const fn new(src: S, factory: F, opts: ExtractOptions) -> Self {
		Self { src, factory, opts }
	}

	#[must_use]
	/// # Into Inner.
	///
	/// Return the source and factory.
	pub fn into_inner(self) -> (S, F) { (self.src, self.factory) }

	/// # Tracks.
	///
	/// Return the tracks that will be exported, in order: the ones asked for,
	/// or every track in the area if none were.
	///
	/// ## Errors
	///
	/// This will return an error if the area doesn't exist, a requested track
	/// isn't in it, or there's nothing to do.
	pub fn tracks<C>(&self, catalog: &C) -> Result<Vec<TrackDescriptor>, SacdRipError>
	where C: Catalog + ?Sized {
		let idx = self.opts.area();
		let area = catalog.area(idx).ok_or(SacdRipError::Area(idx))?;

		let out =
			if self.opts.has_tracks() {
				self.opts.tracks()
					.map(|n| area.track(n).ok_or(SacdRipError::NoTrack(n)))
					.collect::<Result<Vec<_>, _>>()?
			}
			else { area.tracks().to_vec() };

		if out.is_empty() { Err(SacdRipError::Noop) }
		else { Ok(out) }
	}

	/// # Run!
	///
	/// Export each selected track in turn, returning a summary of what
	/// happened to each.
	///
	/// If a progress bar is provided, it is reset to the total number of
	/// sectors to be read, retitled for each track, and finished at the end.
	///
	/// ## Errors
	///
	/// Errors are only returned if the track selection is invalid (see
	/// `Extractor::tracks`); per-track failures are reported in the summary.
	pub fn run<C>(
		&mut self,
		catalog: &C,
		progress: Option<&Progless>,
		killed: &KillSwitch,
	) -> Result<ExtractSummary, SacdRipError>
	where C: Catalog + ?Sized {
		let tracks = self.tracks(catalog)?;
		let area = self.opts.area();
		let convert = self.opts.convert();
		let mut summary = ExtractSummary::new(area);

		if let Some(p) = progress {
			let total = tracks.iter().fold(0_u32, |acc, t| acc.saturating_add(t.len()));
			let _res = p.reset(total);
		}

		for track in tracks {
			if killed.killed() {
				summary.push(track.number(), TrackOutcome::Skipped);
				continue;
			}

			if let Some(p) = progress { set_progress_title(p, track.number(), "Extracting…"); }
			let outcome = match export_track(
				track,
				area,
				convert,
				&mut self.src,
				&mut self.factory,
				progress,
				killed,
			) {
				Ok(report) => TrackOutcome::Exported(report),
				Err(e) => TrackOutcome::Failed(e),
			};
			summary.push(track.number(), outcome);
		}

		if let Some(p) = progress { p.finish(); }
		Ok(summary)
	}
}



/// # Set Progress Title.
fn set_progress_title(progress: &Progless, idx: u8, msg: &str) {
	progress.set_title(Some(Msg::custom(format!("Track {idx:02}").as_str(), 199, msg)));
}
