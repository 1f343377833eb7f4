/// Resource Lookup System
///
/// Maps a WebFinger resource URI to an account. Each URI scheme is handled
/// by one `LookupStrategy`; the `Resolver` dispatches on the scheme through
/// a `LookupRegistry`.

pub mod acct;
pub mod mailto;
pub mod resolver;
pub mod uri;

pub use acct::AcctStrategy;
pub use mailto::MailtoStrategy;
pub use resolver::{LookupRegistry, Resolver};
pub use uri::ResourceUri;

use crate::{db::Account, error::FingerResult};
use async_trait::async_trait;

/// Resolution logic bound to a single URI scheme
#[async_trait]
pub trait LookupStrategy: Send + Sync {
    /// Scheme this strategy accepts, e.g. `acct`
    fn scheme(&self) -> &str;

    /// Resolve a full resource URI to an account
    ///
    /// Returns `Ok(None)` when the URI is well formed but no account matches.
    /// Fails with `InvalidScheme` when `uri` carries a different scheme and
    /// with `InvalidToken` when the scheme-specific part cannot be used.
    async fn resolve(&self, uri: &str) -> FingerResult<Option<Account>>;
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::db::{create_memory_pool, SqliteAccountStore};

    /// Store holding `bob <bob@example.com>` and `alice` without email
    pub async fn seeded_store() -> SqliteAccountStore {
        let pool = create_memory_pool().await.unwrap();
        let store = SqliteAccountStore::new(pool);
        store
            .create_account("bob", Some("bob@example.com"))
            .await
            .unwrap();
        store.create_account("alice", None).await.unwrap();
        store
    }
}
