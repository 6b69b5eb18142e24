use anyhow::Result;

use crate::model::{BlogPost, Collection};
use crate::seed;
use crate::store::Store;

/// Blog posts. A single `published` flag, no workflow: the public site
/// lists [`Blogs::published`], the admin panel works on everything.
pub struct Blogs<'a> {
    pub(super) store: &'a Store,
}

impl Blogs<'_> {
    pub fn all(&self) -> Result<Vec<BlogPost>> {
        self.store.kv().load(Collection::Blogs.key(), seed::blogs)
    }

    pub fn get(&self, id: &str) -> Result<Option<BlogPost>> {
        Ok(self.all()?.into_iter().find(|b| b.id == id))
    }

    pub fn published(&self) -> Result<Vec<BlogPost>> {
        Ok(self.all()?.into_iter().filter(|b| b.published).collect())
    }

    pub fn save(&self, post: &BlogPost) -> Result<BlogPost> {
        self.store.upsert(Collection::Blogs, self.all()?, post)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.remove(Collection::Blogs, self.all()?, id)
    }
}
