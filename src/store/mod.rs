use std::path::Path;
use std::sync::mpsc::Receiver;

use anyhow::Result;
use chrono::Utc;
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::kv::Kv;
use crate::model::Collection;
use crate::notifier::{ChangeBus, ChangeKind, StoreEvent};

mod blogs;
mod bookings;
mod debug;
mod events;
mod messages;
mod students;
mod teachers;

pub use blogs::Blogs;
pub use bookings::Bookings;
pub use debug::StorageReport;
pub use events::Events;
pub use messages::Messages;
pub use students::Students;
pub use teachers::Teachers;

/// Entry point: one SQLite-backed key-value core plus a change bus, handing
/// out per-entity repository views. Every view is a cheap borrow; the store
/// itself is `Clone` and safe to share.
#[derive(Clone)]
pub struct Store {
    kv: Kv,
    bus: ChangeBus,
}

impl Store {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Store {
            kv: Kv::open(path)?,
            bus: ChangeBus::new(),
        })
    }

    pub fn open_memory() -> Result<Self> {
        Ok(Store {
            kv: Kv::open_memory()?,
            bus: ChangeBus::new(),
        })
    }

    /// A store with no backing medium: loads return seed data, writes are
    /// dropped. For render contexts where storage is not available.
    pub fn detached() -> Self {
        Store {
            kv: Kv::detached(),
            bus: ChangeBus::new(),
        }
    }

    pub fn teachers(&self) -> Teachers<'_> {
        Teachers { store: self }
    }

    pub fn students(&self) -> Students<'_> {
        Students { store: self }
    }

    pub fn events(&self) -> Events<'_> {
        Events { store: self }
    }

    pub fn bookings(&self) -> Bookings<'_> {
        Bookings { store: self }
    }

    pub fn messages(&self) -> Messages<'_> {
        Messages { store: self }
    }

    pub fn blogs(&self) -> Blogs<'_> {
        Blogs { store: self }
    }

    pub fn sessions(&self) -> crate::session::Sessions<'_> {
        crate::session::Sessions::new(self)
    }

    /// Subscribe to mutation events. Dropped receivers are cleaned up
    /// lazily.
    pub fn observer(&self) -> Receiver<StoreEvent> {
        self.bus.observer()
    }

    /// Subscribe with a callback dispatched on a worker thread.
    pub fn observe(&self, callback: impl FnMut(StoreEvent) + Send + 'static) {
        self.bus.observe(callback)
    }

    /// Current version of a collection, for use with
    /// [`Store::save_all_if`]. None until the collection is first seeded.
    pub fn version(&self, collection: Collection) -> Result<Option<i64>> {
        self.kv.version(collection.key())
    }

    /// Compare-and-swap replacement of a whole collection: fails with
    /// [`crate::StoreError::Conflict`] when another writer got there
    /// first. The plain repository operations stay last-write-wins.
    pub fn save_all_if<T: Serialize>(
        &self,
        collection: Collection,
        items: &[T],
        expected_version: i64,
    ) -> Result<()> {
        self.kv.save_if(collection.key(), items, expected_version)
    }

    pub(crate) fn kv(&self) -> &Kv {
        &self.kv
    }

    pub(crate) fn bus(&self) -> &ChangeBus {
        &self.bus
    }

    /// Insert-or-replace by id. The entity is round-tripped through a JSON
    /// value so a missing id and created-at stamp can be filled in
    /// generically; an entity whose id matches an existing record replaces
    /// it in place, preserving array position, otherwise it is appended.
    pub(crate) fn upsert<T>(&self, collection: Collection, items: Vec<T>, entity: &T) -> Result<T>
    where
        T: Serialize + DeserializeOwned,
    {
        let mut values = to_values(items)?;
        let mut value = serde_json::to_value(entity)?;
        let id = ensure_id(&mut value)?;
        stamp_created_at(&mut value);

        let existing = values.iter().position(|v| value_id(v) == Some(id.as_str()));
        let kind = match existing {
            Some(index) => {
                values[index] = value.clone();
                ChangeKind::Updated
            }
            None => {
                values.push(value.clone());
                ChangeKind::Created
            }
        };

        self.kv.save(collection.key(), &values)?;
        self.bus.notify(collection, kind, &id);
        Ok(serde_json::from_value(value)?)
    }

    /// Hard delete by id. Returns whether the collection actually shrank.
    pub(crate) fn remove<T>(&self, collection: Collection, items: Vec<T>, id: &str) -> Result<bool>
    where
        T: Serialize,
    {
        let mut values = to_values(items)?;
        let before = values.len();
        values.retain(|v| value_id(v) != Some(id));
        if values.len() == before {
            return Ok(false);
        }

        self.kv.save(collection.key(), &values)?;
        self.bus.notify(collection, ChangeKind::Deleted, id);
        Ok(true)
    }

    /// Replace a collection wholesale after an in-place edit, notifying
    /// with an update event for the touched record.
    pub(crate) fn flush<T>(&self, collection: Collection, items: &[T], touched_id: &str) -> Result<()>
    where
        T: Serialize,
    {
        self.kv.save(collection.key(), items)?;
        self.bus.notify(collection, ChangeKind::Updated, touched_id);
        Ok(())
    }
}

fn to_values<T: Serialize>(items: Vec<T>) -> Result<Vec<Value>> {
    items
        .into_iter()
        .map(|item| Ok(serde_json::to_value(item)?))
        .collect()
}

fn value_id(value: &Value) -> Option<&str> {
    value.get("id").and_then(|id| id.as_str())
}

/// Keeps a caller-assigned id, generates a uuid-v7 for an empty or missing
/// one. Ids are never changed after this point.
fn ensure_id(value: &mut Value) -> Result<String> {
    match value.get("id").and_then(|id| id.as_str()) {
        Some(id) if !id.is_empty() => Ok(id.to_string()),
        _ => {
            let id = Uuid::now_v7().to_string();
            value["id"] = Value::String(id.clone());
            Ok(id)
        }
    }
}

/// Stamps a null created-at with now. Entities without the field (blog
/// posts) pass through untouched, and an already-stamped record keeps its
/// original timestamp.
fn stamp_created_at(value: &mut Value) {
    if let Some(created_at) = value.get_mut("createdAt") {
        if created_at.is_null() {
            *created_at = serde_json::json!(Utc::now());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Teacher;

    #[test]
    fn upsert_assigns_id_and_created_at_once() -> Result<()> {
        let store = Store::open_memory()?;

        let saved = store.teachers().save(&Teacher {
            name: "Lucía Fernández".to_string(),
            ..Default::default()
        })?;
        assert!(Uuid::parse_str(&saved.id).is_ok());
        let stamped = saved.created_at.expect("created_at stamped on insert");

        let mut renamed = saved.clone();
        renamed.name = "Lucía Fernández García".to_string();
        let updated = store.teachers().save(&renamed)?;
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.created_at, Some(stamped));
        Ok(())
    }

    #[test]
    fn upsert_replaces_in_place() -> Result<()> {
        let store = Store::open_memory()?;
        let teachers = store.teachers();

        let before = teachers.all()?;
        let mut first = before[0].clone();
        first.role = "Director Deportivo".to_string();
        teachers.save(&first)?;

        let after = teachers.all()?;
        assert_eq!(after.len(), before.len());
        // Array position preserved.
        assert_eq!(after[0].id, before[0].id);
        assert_eq!(after[0].role, "Director Deportivo");
        Ok(())
    }
}
