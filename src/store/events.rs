use anyhow::Result;

use crate::model::{Collection, Event};
use crate::notifier::ChangeKind;
use crate::seed;
use crate::store::Store;

/// Tournaments, clinics, leagues and open days. Besides CRUD, holds the
/// registration list per event: a growable list of student ids mutated
/// only through register/unregister, with duplicates prevented by id.
pub struct Events<'a> {
    pub(super) store: &'a Store,
}

impl Events<'_> {
    pub fn all(&self) -> Result<Vec<Event>> {
        self.store.kv().load(Collection::Events.key(), seed::events)
    }

    pub fn get(&self, id: &str) -> Result<Option<Event>> {
        Ok(self.all()?.into_iter().find(|e| e.id == id))
    }

    pub fn save(&self, event: &Event) -> Result<Event> {
        self.store.upsert(Collection::Events, self.all()?, event)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.remove(Collection::Events, self.all()?, id)
    }

    /// Adds a student to an event's registration list. Returns false when
    /// the event is unknown or the student is already registered, so
    /// calling twice leaves exactly one occurrence.
    pub fn register(&self, event_id: &str, student_id: &str) -> Result<bool> {
        let mut events = self.all()?;
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(false);
        };
        if event.registrations.iter().any(|r| r == student_id) {
            return Ok(false);
        }
        event.registrations.push(student_id.to_string());
        self.store.kv().save(Collection::Events.key(), &events)?;
        self.store.bus().notify(Collection::Events, ChangeKind::Updated, event_id);
        Ok(true)
    }

    /// Removes a student from an event's registration list. Returns false
    /// when the event is unknown or the student was not registered.
    pub fn unregister(&self, event_id: &str, student_id: &str) -> Result<bool> {
        let mut events = self.all()?;
        let Some(event) = events.iter_mut().find(|e| e.id == event_id) else {
            return Ok(false);
        };
        let before = event.registrations.len();
        event.registrations.retain(|r| r != student_id);
        if event.registrations.len() == before {
            return Ok(false);
        }
        self.store.kv().save(Collection::Events.key(), &events)?;
        self.store.bus().notify(Collection::Events, ChangeKind::Updated, event_id);
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registration_is_duplicate_proof() -> Result<()> {
        let store = Store::open_memory()?;

        assert!(store.events().register("event-1", "student-1")?);
        assert!(!store.events().register("event-1", "student-1")?);

        let event = store.events().get("event-1")?.unwrap();
        let occurrences = event
            .registrations
            .iter()
            .filter(|r| *r == "student-1")
            .count();
        assert_eq!(occurrences, 1);
        Ok(())
    }

    #[test]
    fn unregister_removes_and_reports() -> Result<()> {
        let store = Store::open_memory()?;

        store.events().register("event-1", "student-2")?;
        assert!(store.events().unregister("event-1", "student-2")?);
        assert!(!store.events().unregister("event-1", "student-2")?);
        assert!(!store.events().unregister("no-such-event", "student-2")?);

        let event = store.events().get("event-1")?.unwrap();
        assert!(event.registrations.is_empty());
        Ok(())
    }
}
