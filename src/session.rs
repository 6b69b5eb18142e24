use anyhow::Result;

use crate::model::{Role, User};
use crate::store::Store;

pub(crate) const SESSION_KEY: &str = "padel:current-user";

// Fixed back-office roster; there is no account management.
struct AdminAccount {
    id: &'static str,
    email: &'static str,
    password: &'static str,
    name: &'static str,
}

const ADMIN_ACCOUNTS: [AdminAccount; 2] = [
    AdminAccount {
        id: "admin-1",
        email: "hector@padelpro.com",
        password: "admin123",
        name: "Héctor Administrador",
    },
    AdminAccount {
        id: "admin-2",
        email: "admin@padelpro.com",
        password: "admin123",
        name: "Admin Principal",
    },
];

/// Sole owner of the current-user key: login writes it, logout clears it,
/// nothing else touches it. Hand the [`User`] to whatever needs it instead
/// of re-reading global state.
pub struct Sessions<'a> {
    store: &'a Store,
}

impl<'a> Sessions<'a> {
    pub(crate) fn new(store: &'a Store) -> Self {
        Sessions { store }
    }

    /// Checks the fixed roster (email compared case-insensitively) and
    /// persists the session on success. A bad credential pair is None,
    /// not an error.
    pub fn login(&self, email: &str, password: &str) -> Result<Option<User>> {
        let account = ADMIN_ACCOUNTS.iter().find(|a| {
            a.email.eq_ignore_ascii_case(email) && a.password == password
        });
        let Some(account) = account else {
            return Ok(None);
        };

        let user = User {
            id: account.id.to_string(),
            name: account.name.to_string(),
            email: account.email.to_string(),
            role: Role::Admin,
        };
        self.store.kv().put_object(SESSION_KEY, &user)?;
        Ok(Some(user))
    }

    pub fn current(&self) -> Result<Option<User>> {
        self.store.kv().get_object(SESSION_KEY)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.kv().remove(SESSION_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_sets_session_logout_clears_it() -> Result<()> {
        let store = Store::open_memory()?;
        let sessions = store.sessions();

        assert!(sessions.current()?.is_none());

        let user = sessions
            .login("ADMIN@padelpro.com", "admin123")?
            .expect("roster credentials accepted");
        assert!(user.is_admin());
        assert_eq!(sessions.current()?, Some(user));

        sessions.logout()?;
        assert!(sessions.current()?.is_none());
        Ok(())
    }

    #[test]
    fn wrong_credentials_are_rejected_quietly() -> Result<()> {
        let store = Store::open_memory()?;
        let sessions = store.sessions();

        assert!(sessions.login("admin@padelpro.com", "wrong")?.is_none());
        assert!(sessions.login("nobody@padelpro.com", "admin123")?.is_none());
        assert!(sessions.current()?.is_none());
        Ok(())
    }
}
