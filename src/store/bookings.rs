use anyhow::Result;

use crate::model::{Booking, BookingStatus, Collection};
use crate::seed;
use crate::store::Store;

/// Court reservations. A booking starts `Pending` and an admin confirms or
/// cancels it. Dates and time slots are display strings compared verbatim;
/// slot uniqueness is a business rule the caller checks before creating,
/// via [`Bookings::slot_taken`].
pub struct Bookings<'a> {
    pub(super) store: &'a Store,
}

impl Bookings<'_> {
    pub fn all(&self) -> Result<Vec<Booking>> {
        self.store.kv().load(Collection::Bookings.key(), seed::bookings)
    }

    pub fn get(&self, id: &str) -> Result<Option<Booking>> {
        Ok(self.all()?.into_iter().find(|b| b.id == id))
    }

    pub fn save(&self, booking: &Booking) -> Result<Booking> {
        self.store.upsert(Collection::Bookings, self.all()?, booking)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.remove(Collection::Bookings, self.all()?, id)
    }

    pub fn by_date(&self, date: &str) -> Result<Vec<Booking>> {
        self.filtered(|b| b.date == date)
    }

    pub fn by_student(&self, student_id: &str) -> Result<Vec<Booking>> {
        self.filtered(|b| b.student_id == student_id)
    }

    pub fn by_teacher(&self, teacher_id: &str) -> Result<Vec<Booking>> {
        self.filtered(|b| b.teacher_id == teacher_id)
    }

    /// Whether a (date, time, court) slot already holds a live booking.
    /// Cancelled bookings free their slot.
    pub fn slot_taken(&self, date: &str, time: &str, court: &str) -> Result<bool> {
        Ok(self.all()?.iter().any(|b| {
            b.date == date && b.time == time && b.court == court
                && b.status != BookingStatus::Cancelled
        }))
    }

    pub fn confirm(&self, id: &str) -> Result<Option<Booking>> {
        self.set_status(id, BookingStatus::Confirmed)
    }

    pub fn cancel(&self, id: &str) -> Result<Option<Booking>> {
        self.set_status(id, BookingStatus::Cancelled)
    }

    fn set_status(&self, id: &str, status: BookingStatus) -> Result<Option<Booking>> {
        let mut bookings = self.all()?;
        let Some(booking) = bookings.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        booking.status = status;
        let updated = booking.clone();
        self.store.flush(Collection::Bookings, &bookings, id)?;
        Ok(Some(updated))
    }

    fn filtered(&self, keep: impl Fn(&Booking) -> bool) -> Result<Vec<Booking>> {
        Ok(self.all()?.into_iter().filter(|b| keep(b)).collect())
    }
}
