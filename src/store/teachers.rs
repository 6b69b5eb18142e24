use anyhow::Result;

use crate::model::{Collection, Teacher};
use crate::seed;
use crate::store::Store;

/// Coaching staff shown on the public site and managed from the admin
/// panel. Plain CRUD, no workflow.
pub struct Teachers<'a> {
    pub(super) store: &'a Store,
}

impl Teachers<'_> {
    pub fn all(&self) -> Result<Vec<Teacher>> {
        self.store.kv().load(Collection::Teachers.key(), seed::teachers)
    }

    pub fn get(&self, id: &str) -> Result<Option<Teacher>> {
        Ok(self.all()?.into_iter().find(|t| t.id == id))
    }

    pub fn save(&self, teacher: &Teacher) -> Result<Teacher> {
        self.store.upsert(Collection::Teachers, self.all()?, teacher)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.remove(Collection::Teachers, self.all()?, id)
    }
}
