use anyhow::Result;
use log::debug;
use serde::Serialize;

use crate::model::{BookingStatus, Collection, StudentStatus};
use crate::session::SESSION_KEY;
use crate::store::Store;

/// Snapshot of collection counts and status breakdowns, for diagnosing
/// drift between what a page shows and what is actually persisted.
#[derive(Clone, Debug, Serialize)]
pub struct StorageReport {
    pub teachers: usize,
    pub students: usize,
    pub students_pending: usize,
    pub students_approved: usize,
    pub students_rejected: usize,
    pub students_unspecified: usize,
    pub events: usize,
    pub bookings: usize,
    pub bookings_pending: usize,
    pub bookings_confirmed: usize,
    pub bookings_cancelled: usize,
    pub messages: usize,
    pub messages_unread: usize,
    pub blogs: usize,
}

impl Store {
    pub fn report(&self) -> Result<StorageReport> {
        let students = self.students().all()?;
        let bookings = self.bookings().all()?;
        let messages = self.messages().all()?;

        let count_students =
            |status: StudentStatus| students.iter().filter(|s| s.status == status).count();
        let count_bookings =
            |status: BookingStatus| bookings.iter().filter(|b| b.status == status).count();

        let report = StorageReport {
            teachers: self.teachers().all()?.len(),
            students: students.len(),
            students_pending: count_students(StudentStatus::Pending),
            students_approved: count_students(StudentStatus::Approved),
            students_rejected: count_students(StudentStatus::Rejected),
            students_unspecified: count_students(StudentStatus::Unspecified),
            events: self.events().all()?.len(),
            bookings: bookings.len(),
            bookings_pending: count_bookings(BookingStatus::Pending),
            bookings_confirmed: count_bookings(BookingStatus::Confirmed),
            bookings_cancelled: count_bookings(BookingStatus::Cancelled),
            messages: messages.len(),
            messages_unread: messages.iter().filter(|m| !m.read).count(),
            blogs: self.blogs().all()?.len(),
        };

        debug!(
            "storage report: {} students ({} pending, {} approved, {} rejected, {} unspecified)",
            report.students,
            report.students_pending,
            report.students_approved,
            report.students_rejected,
            report.students_unspecified,
        );
        debug!(
            "storage report: {} bookings ({} pending, {} confirmed, {} cancelled), {} messages ({} unread)",
            report.bookings,
            report.bookings_pending,
            report.bookings_confirmed,
            report.bookings_cancelled,
            report.messages,
            report.messages_unread,
        );

        Ok(report)
    }

    /// Wipes every collection key and the session so the next loads
    /// reseed. The recovery hatch for corrupted or drifted state.
    pub fn reset(&self) -> Result<()> {
        for collection in Collection::ALL {
            self.kv().remove(collection.key())?;
        }
        self.kv().remove(SESSION_KEY)?;
        debug!("storage reset: all collections dropped");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_reflects_seed_data() -> Result<()> {
        let store = Store::open_memory()?;
        let report = store.report()?;

        assert_eq!(report.teachers, 2);
        assert_eq!(report.students, 3);
        assert_eq!(report.students_pending, 2);
        assert_eq!(report.students_approved, 1);
        assert_eq!(report.bookings, 2);
        assert_eq!(report.bookings_confirmed, 1);
        assert_eq!(report.messages_unread, 1);
        assert_eq!(report.blogs, 3);
        Ok(())
    }

    #[test]
    fn reset_reseeds_on_next_load() -> Result<()> {
        let store = Store::open_memory()?;

        // Drift from the seed state, then reset.
        store.students().delete("student-1")?;
        assert_eq!(store.students().all()?.len(), 2);

        store.reset()?;
        assert_eq!(store.students().all()?.len(), 3);
        Ok(())
    }
}
