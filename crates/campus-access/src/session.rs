use campus_core::{Account, Identity, Role};

/// The process's authentication state.
///
/// Authenticated exactly when it holds an account snapshot, so
/// "authenticated without an account" cannot be represented.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    account: Option<Account>,
}

impl Session {
    /// A session with nobody signed in.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// A session signed in as `account`.
    pub fn authenticated_as(account: Account) -> Self {
        Self {
            account: Some(account),
        }
    }

    /// Returns true if somebody is signed in.
    pub fn is_authenticated(&self) -> bool {
        self.account.is_some()
    }

    /// Snapshot of the signed-in account.
    pub fn account(&self) -> Option<&Account> {
        self.account.as_ref()
    }

    /// Identity of the signed-in account.
    pub fn identity(&self) -> Option<&Identity> {
        self.account.as_ref().map(|a| &a.identity)
    }

    /// Role of the signed-in account.
    pub fn role(&self) -> Option<Role> {
        self.account.as_ref().map(Account::role)
    }
}
