//! Sequential unlock policy.
//!
//! A week becomes accessible only once the immediately preceding week is
//! fully complete. The progress tracker creates and advances records
//! strictly in week order, so checking the direct predecessor is enough to
//! keep locking monotonic along the sequence.

use super::types::WeekProgress;

/// Returns true when `week_number` is accessible under `progress`.
///
/// Week 1 is always unlocked. Week n (n > 1) is unlocked iff a progress
/// record exists for week n-1 with 100% completion; a missing record locks
/// the week.
pub fn is_unlocked(week_number: u32, progress: &[WeekProgress]) -> bool {
	if week_number <= 1 {
		return true;
	}
	progress
		.iter()
		.find(|p| p.week_number == week_number - 1)
		.is_some_and(|p| p.completion_percentage >= 100.0)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn progress(entries: &[(u32, f64)]) -> Vec<WeekProgress> {
		entries
			.iter()
			.map(|&(week_number, completion_percentage)| WeekProgress {
				week_number,
				completion_percentage,
				completed_tasks: Vec::new(),
			})
			.collect()
	}

	#[test]
	fn week_one_is_always_unlocked() {
		assert!(is_unlocked(1, &[]));
		assert!(is_unlocked(1, &progress(&[(1, 0.0)])));
		assert!(is_unlocked(1, &progress(&[(1, 100.0), (2, 40.0)])));
	}

	#[test]
	fn unlocked_iff_predecessor_complete() {
		let p = progress(&[(1, 100.0), (2, 60.0)]);
		assert!(is_unlocked(2, &p));
		assert!(!is_unlocked(3, &p));

		let done = progress(&[(1, 100.0), (2, 100.0)]);
		assert!(is_unlocked(3, &done));
	}

	#[test]
	fn missing_predecessor_record_locks() {
		assert!(!is_unlocked(2, &[]));
		assert!(!is_unlocked(4, &progress(&[(1, 100.0), (2, 100.0)])));
	}

	#[test]
	fn partial_predecessor_locks() {
		assert!(!is_unlocked(2, &progress(&[(1, 99.9)])));
	}

	#[test]
	fn lock_is_monotonic_for_sequential_progress() {
		// Records are only ever created in order, so a locked week implies
		// every later week is locked too.
		let p = progress(&[(1, 100.0), (2, 100.0), (3, 45.0)]);
		let first_locked = (1..=10).find(|&n| !is_unlocked(n, &p)).unwrap();
		for n in first_locked..=10 {
			assert!(!is_unlocked(n, &p), "week {n} should be locked");
		}
	}

	#[test]
	fn unsorted_progress_is_keyed_by_week_number() {
		let p = progress(&[(3, 10.0), (1, 100.0), (2, 100.0)]);
		assert!(is_unlocked(2, &p));
		assert!(is_unlocked(3, &p));
		assert!(!is_unlocked(4, &p));
	}
}
