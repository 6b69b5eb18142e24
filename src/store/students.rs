use anyhow::Result;
use log::info;

use crate::model::{Collection, Student, StudentStatus};
use crate::seed;
use crate::store::Store;

/// Registered and prospective students. New registrations arrive as
/// `Pending` and an admin moves them to `Approved` or `Rejected`; records
/// predating the moderation workflow carry `Unspecified` and count as
/// approved until normalized.
pub struct Students<'a> {
    pub(super) store: &'a Store,
}

impl Students<'_> {
    pub fn all(&self) -> Result<Vec<Student>> {
        self.store.kv().load(Collection::Students.key(), seed::students)
    }

    pub fn get(&self, id: &str) -> Result<Option<Student>> {
        Ok(self.all()?.into_iter().find(|s| s.id == id))
    }

    /// Emails are unique by convention only; this returns the first match.
    pub fn get_by_email(&self, email: &str) -> Result<Option<Student>> {
        Ok(self.all()?.into_iter().find(|s| s.email == email))
    }

    pub fn save(&self, student: &Student) -> Result<Student> {
        self.store.upsert(Collection::Students, self.all()?, student)
    }

    pub fn delete(&self, id: &str) -> Result<bool> {
        self.store.remove(Collection::Students, self.all()?, id)
    }

    pub fn pending(&self) -> Result<Vec<Student>> {
        self.filtered(|s| s.status == StudentStatus::Pending)
    }

    pub fn approved(&self) -> Result<Vec<Student>> {
        self.filtered(|s| {
            matches!(s.status, StudentStatus::Approved | StudentStatus::Unspecified)
        })
    }

    pub fn rejected(&self) -> Result<Vec<Student>> {
        self.filtered(|s| s.status == StudentStatus::Rejected)
    }

    /// Writes a new status onto the record. No transition guard: the
    /// single-admin caller is trusted, only the enumerated values are
    /// representable. Returns None when the id is unknown.
    pub fn set_status(&self, id: &str, status: StudentStatus) -> Result<Option<Student>> {
        let mut students = self.all()?;
        let Some(student) = students.iter_mut().find(|s| s.id == id) else {
            return Ok(None);
        };
        student.status = status;
        let updated = student.clone();
        self.store.flush(Collection::Students, &students, id)?;
        Ok(Some(updated))
    }

    pub fn approve(&self, id: &str) -> Result<Option<Student>> {
        self.set_status(id, StudentStatus::Approved)
    }

    pub fn reject(&self, id: &str) -> Result<Option<Student>> {
        self.set_status(id, StudentStatus::Rejected)
    }

    /// One-shot migration: rewrites every `Unspecified` status to
    /// `Approved` and persists, so the implicit legacy default becomes
    /// explicit data. Returns how many records changed.
    pub fn normalize_legacy_statuses(&self) -> Result<usize> {
        let mut students = self.all()?;
        let mut changed = 0;
        for student in students.iter_mut() {
            if student.status == StudentStatus::Unspecified {
                student.status = StudentStatus::Approved;
                changed += 1;
            }
        }
        if changed > 0 {
            self.store.kv().save(Collection::Students.key(), &students)?;
            info!("normalized {} legacy student statuses to approved", changed);
        }
        Ok(changed)
    }

    fn filtered(&self, keep: impl Fn(&Student) -> bool) -> Result<Vec<Student>> {
        Ok(self.all()?.into_iter().filter(|s| keep(s)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Store;

    fn clear(store: &Store) -> Result<()> {
        for student in store.students().all()? {
            store.students().delete(&student.id)?;
        }
        Ok(())
    }

    #[test]
    fn moderation_moves_records_between_filters() -> Result<()> {
        let store = Store::open_memory()?;
        clear(&store)?;

        let ana = store.students().save(&Student {
            name: "Ana".to_string(),
            email: "ana@example.com".to_string(),
            status: StudentStatus::Pending,
            ..Default::default()
        })?;

        let pending = store.students().pending()?;
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].name, "Ana");

        store.students().approve(&ana.id)?;
        assert!(store.students().pending()?.is_empty());
        let approved = store.students().approved()?;
        assert_eq!(approved.len(), 1);
        assert_eq!(approved[0].name, "Ana");
        Ok(())
    }

    #[test]
    fn unknown_id_yields_none_not_error() -> Result<()> {
        let store = Store::open_memory()?;
        assert!(store.students().get("missing")?.is_none());
        assert!(store.students().approve("missing")?.is_none());
        Ok(())
    }

    #[test]
    fn legacy_records_count_as_approved_until_normalized() -> Result<()> {
        let store = Store::open_memory()?;
        clear(&store)?;

        store.students().save(&Student {
            name: "Histórico".to_string(),
            email: "historico@example.com".to_string(),
            status: StudentStatus::Unspecified,
            ..Default::default()
        })?;

        assert_eq!(store.students().approved()?.len(), 1);
        assert!(store.students().pending()?.is_empty());

        assert_eq!(store.students().normalize_legacy_statuses()?, 1);
        let all = store.students().all()?;
        assert_eq!(all[0].status, StudentStatus::Approved);

        // Second run finds nothing left to do.
        assert_eq!(store.students().normalize_legacy_statuses()?, 0);
        Ok(())
    }
}
