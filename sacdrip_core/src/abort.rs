/*!
# SACD Rip: Kill Switch
*/

use std::sync::{
	Arc,
	atomic::{
		AtomicBool,
		Ordering::{
			Acquire,
			Release,
		},
	},
};



#[derive(Debug, Clone, Default)]
/// # Kill Switch.
///
/// This is a short-circuit for long-running extractions. The binary's CTRL-C
/// intercept flips it from another thread; the export loop checks it between
/// sectors so it can close out the current track before leaving.
pub struct KillSwitch(Arc<AtomicBool>);

impl KillSwitch {
	/// # Kill!
	pub fn kill(&self) { self.0.store(true, Release); }

	#[must_use]
	/// # Dead?
	pub fn killed(&self) -> bool { self.0.load(Acquire) }
}



#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn t_killswitch() {
		let a = KillSwitch::default();
		let b = a.clone();
		assert!(! a.killed(), "New switches should be alive.");
		b.kill();
		assert!(a.killed(), "Clones should share state.");
	}
}
