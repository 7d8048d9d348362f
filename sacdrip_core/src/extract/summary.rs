/*!
# SACD Rip: Extraction Summary
*/

use crate::{
	SacdRipError,
	TrackReport,
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Track Outcome.
pub enum TrackOutcome {
	/// # Exported.
	Exported(TrackReport),

	/// # Failed.
	///
	/// This covers writer creation failures as well as anything that went
	/// wrong mid-export.
	Failed(SacdRipError),

	/// # Skipped.
	///
	/// The track was never attempted because the run was aborted.
	Skipped,
}

impl TrackOutcome {
	#[must_use]
	/// # Is Exported?
	pub const fn is_exported(&self) -> bool { matches!(self, Self::Exported(_)) }

	#[must_use]
	/// # Is Failed?
	pub const fn is_failed(&self) -> bool { matches!(self, Self::Failed(_)) }

	#[must_use]
	/// # Is Skipped?
	pub const fn is_skipped(&self) -> bool { matches!(self, Self::Skipped) }
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
/// # Extraction Summary.
///
/// The outcome of each requested track, in the order they were processed.
pub struct ExtractSummary {
	area: u8,
	tracks: Vec<(u8, TrackOutcome)>,
}

impl ExtractSummary {
	/// # New.
	pub(crate) const fn new(area: u8) -> Self {
		Self { area, tracks: Vec::new() }
	}

	/// # Push.
	pub(crate) fn push(&mut self, number: u8, outcome: TrackOutcome) {
		self.tracks.push((number, outcome));
	}

	#[must_use]
	/// # Program Area.
	pub const fn area(&self) -> u8 { self.area }

	#[must_use]
	/// # Outcomes.
	pub fn tracks(&self) -> &[(u8, TrackOutcome)] { &self.tracks }

	#[must_use]
	/// # Track Outcome.
	pub fn track(&self, number: u8) -> Option<&TrackOutcome> {
		self.tracks.iter().find_map(|(n, o)| if *n == number { Some(o) } else { None })
	}

	#[must_use]
	/// # Total Tracks.
	pub fn len(&self) -> usize { self.tracks.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.tracks.is_empty() }

	#[must_use]
	/// # Exported Count.
	pub fn exported(&self) -> usize {
		self.tracks.iter().filter(|(_, o)| o.is_exported()).count()
	}

	#[must_use]
	/// # Failed Count.
	pub fn failed(&self) -> usize {
		self.tracks.iter().filter(|(_, o)| o.is_failed()).count()
	}

	#[must_use]
	/// # Skipped Count.
	pub fn skipped(&self) -> usize {
		self.tracks.iter().filter(|(_, o)| o.is_skipped()).count()
	}

	/// # Reports.
	///
	/// Return an iterator over the reports of the successfully-exported
	/// tracks.
	pub fn reports(&self) -> impl Iterator<Item=&TrackReport> {
		self.tracks.iter().filter_map(|(_, o)|
			if let TrackOutcome::Exported(r) = o { Some(r) } else { None }
		)
	}

	/// # Failures.
	///
	/// Return an iterator over the track numbers and errors of the tracks
	/// that failed.
	pub fn failures(&self) -> impl Iterator<Item=(u8, &SacdRipError)> {
		self.tracks.iter().filter_map(|(n, o)|
			if let TrackOutcome::Failed(e) = o { Some((*n, e)) } else { None }
		)
	}

	#[must_use]
	/// # Killed?
	///
	/// Returns `true` if the run was aborted.
	pub fn killed(&self) -> bool {
		self.tracks.iter().any(|(_, o)|
			o.is_skipped() || matches!(o, TrackOutcome::Failed(SacdRipError::Killed))
		)
	}

	#[must_use]
	/// # All Good?
	///
	/// Returns `true` if every track was exported.
	pub fn is_ok(&self) -> bool {
		self.tracks.iter().all(|(_, o)| o.is_exported())
	}
}
