use campus_core::{seed, Account, Identity};

use crate::collection;
use crate::error::StoreError;
use crate::keys;
use crate::traits::SharedStore;

/// Account collection keyed by identity.
///
/// Every mutation re-serializes the whole collection. When persisting
/// fails the in-memory collection is rolled back, so it always mirrors the
/// last successful write.
pub struct CredentialStore {
    kv: SharedStore,
    accounts: Vec<Account>,
}

impl CredentialStore {
    /// Creates an empty, unloaded store over `kv`.
    pub fn new(kv: SharedStore) -> Self {
        Self {
            kv,
            accounts: Vec::new(),
        }
    }

    /// Creates a store and loads it immediately.
    pub fn open(kv: SharedStore) -> Self {
        let mut store = Self::new(kv);
        store.load();
        store
    }

    /// Reloads accounts from storage, reseeding the built-in accounts if
    /// storage is empty or unreadable.
    pub fn load(&mut self) -> &[Account] {
        self.accounts = collection::load_or_seed(self.kv.as_ref(), keys::ACCOUNTS, seed::accounts);
        &self.accounts
    }

    /// Accounts in insertion order.
    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    /// Looks up an account by exact identity.
    pub fn find_by_identity(&self, identity: &Identity) -> Option<&Account> {
        self.accounts.iter().find(|a| &a.identity == identity)
    }

    /// Returns true if an account with `identity` exists.
    pub fn exists(&self, identity: &Identity) -> bool {
        self.find_by_identity(identity).is_some()
    }

    /// Appends a new account and persists the collection.
    ///
    /// # Errors
    ///
    /// - [`StoreError::DuplicateIdentity`] if the identity is taken; the
    ///   collection is left unchanged
    /// - [`StoreError::Io`] / [`StoreError::Serialize`] if persisting fails
    pub fn insert(&mut self, account: Account) -> Result<(), StoreError> {
        if self.exists(&account.identity) {
            return Err(StoreError::DuplicateIdentity(account.identity));
        }
        let identity = account.identity.clone();
        self.accounts.push(account);
        if let Err(e) = self.persist() {
            self.accounts.pop();
            return Err(e);
        }
        tracing::debug!(%identity, "inserted account");
        Ok(())
    }

    /// Replaces the account with the same identity and persists.
    ///
    /// # Errors
    ///
    /// - [`StoreError::AccountNotFound`] if no account has that identity
    /// - [`StoreError::Io`] / [`StoreError::Serialize`] if persisting fails
    pub fn update(&mut self, account: Account) -> Result<(), StoreError> {
        let Some(index) = self
            .accounts
            .iter()
            .position(|a| a.identity == account.identity)
        else {
            return Err(StoreError::AccountNotFound(account.identity));
        };
        let previous = std::mem::replace(&mut self.accounts[index], account);
        if let Err(e) = self.persist() {
            self.accounts[index] = previous;
            return Err(e);
        }
        Ok(())
    }

    fn persist(&self) -> Result<(), StoreError> {
        collection::write(self.kv.as_ref(), keys::ACCOUNTS, &self.accounts)
    }
}
