use anyhow::Result;

use crate::model::{Collection, ContactMessage};
use crate::seed;
use crate::store::Store;

/// Contact-form messages. `read` and `replied` are independent monotone
/// flags: the store only ever flips them to true, it never reverts them.
/// (The admin UI marks a message read before offering reply, but nothing
/// here enforces that ordering.)
pub struct Messages<'a> {
    pub(super) store: &'a Store,
}

impl Messages<'_> {
    pub fn all(&self) -> Result<Vec<ContactMessage>> {
        self.store.kv().load(Collection::Messages.key(), seed::messages)
    }

    pub fn get(&self, id: &str) -> Result<Option<ContactMessage>> {
        Ok(self.all()?.into_iter().find(|m| m.id == id))
    }

    pub fn save(&self, message: &ContactMessage) -> Result<ContactMessage> {
        self.store.upsert(Collection::Messages, self.all()?, message)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.remove(Collection::Messages, self.all()?, id)
    }

    pub fn unread(&self) -> Result<Vec<ContactMessage>> {
        Ok(self.all()?.into_iter().filter(|m| !m.read).collect())
    }

    pub fn mark_read(&self, id: &str) -> Result<Option<ContactMessage>> {
        self.flip(id, |m| m.read = true)
    }

    pub fn mark_replied(&self, id: &str) -> Result<Option<ContactMessage>> {
        self.flip(id, |m| m.replied = true)
    }

    fn flip(
        &self,
        id: &str,
        set: impl FnOnce(&mut ContactMessage),
    ) -> Result<Option<ContactMessage>> {
        let mut messages = self.all()?;
        let Some(message) = messages.iter_mut().find(|m| m.id == id) else {
            return Ok(None);
        };
        set(message);
        let updated = message.clone();
        self.store.flush(Collection::Messages, &messages, id)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn read_and_replied_flip_independently() -> Result<()> {
        let store = Store::open_memory()?;

        // message-2 seeds unread and unreplied.
        assert_eq!(store.messages().unread()?.len(), 1);

        let read = store.messages().mark_read("message-2")?.unwrap();
        assert!(read.read);
        assert!(!read.replied);
        assert!(store.messages().unread()?.is_empty());

        let replied = store.messages().mark_replied("message-2")?.unwrap();
        assert!(replied.read);
        assert!(replied.replied);

        assert!(store.messages().mark_read("missing")?.is_none());
        Ok(())
    }
}
