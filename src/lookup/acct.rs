/// `acct:` resource lookup (RFC 7565)
use crate::{
    db::{Account, AccountStore},
    error::{FingerError, FingerResult},
    lookup::{LookupStrategy, ResourceUri},
};
use async_trait::async_trait;
use std::sync::Arc;

pub const ACCT_SCHEME: &str = "acct";

/// Resolves `acct:<user>@<host>` to the account named `<user>`
///
/// The host is accepted as written; this server does not check that it
/// names itself.
#[derive(Clone)]
pub struct AcctStrategy {
    store: Arc<dyn AccountStore>,
}

impl AcctStrategy {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LookupStrategy for AcctStrategy {
    fn scheme(&self) -> &str {
        ACCT_SCHEME
    }

    async fn resolve(&self, uri: &str) -> FingerResult<Option<Account>> {
        let resource = ResourceUri::parse_with_scheme(uri, ACCT_SCHEME)?;
        let username = account_user(resource.path())?;

        self.store.find_by_username(username).await
    }
}

/// Extract the userpart of `<user>@<host>`
///
/// The path must hold exactly one `@`; the userpart is used as written.
fn account_user(path: &str) -> FingerResult<&str> {
    let mut parts = path.split('@');

    let user = match (parts.next(), parts.next(), parts.next()) {
        (Some(user), Some(_host), None) => user,
        _ => {
            return Err(FingerError::InvalidToken(format!(
                "expected <user>@<host>, got {:?}",
                path
            )))
        }
    };

    if user.is_empty() {
        return Err(FingerError::InvalidToken(format!(
            "empty user in {:?}",
            path
        )));
    }

    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup::test_support::seeded_store;

    async fn create_test_strategy() -> AcctStrategy {
        AcctStrategy::new(Arc::new(seeded_store().await))
    }

    #[tokio::test]
    async fn test_with_invalid_scheme() {
        let strategy = create_test_strategy().await;

        let result = strategy.resolve("mailto:user@example.com").await;
        assert!(matches!(result, Err(FingerError::InvalidScheme { .. })));
    }

    #[tokio::test]
    async fn test_with_invalid_uri() {
        let strategy = create_test_strategy().await;

        let result = strategy.resolve("acct:bob").await;
        assert!(matches!(result, Err(FingerError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_with_too_many_at_signs() {
        let strategy = create_test_strategy().await;

        for uri in ["acct:bob@example.com@other.com", "acct:@@", "acct:b@o@b"] {
            let result = strategy.resolve(uri).await;
            assert!(
                matches!(result, Err(FingerError::InvalidToken(_))),
                "{} should be rejected",
                uri
            );
        }
    }

    #[tokio::test]
    async fn test_with_empty_user() {
        let strategy = create_test_strategy().await;

        let result = strategy.resolve("acct:@example.com").await;
        assert!(matches!(result, Err(FingerError::InvalidToken(_))));
    }

    #[tokio::test]
    async fn test_with_missing_user() {
        let strategy = create_test_strategy().await;

        let got = strategy.resolve("acct:mike@example.com").await.unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_with_existing_user() {
        let strategy = create_test_strategy().await;

        let got = strategy.resolve("acct:bob@example.com").await.unwrap();
        assert_eq!(got.map(|account| account.username), Some("bob".to_string()));
    }

    #[tokio::test]
    async fn test_host_is_not_checked() {
        let strategy = create_test_strategy().await;

        let got = strategy.resolve("acct:bob@elsewhere.test").await.unwrap();
        assert!(got.is_some());
    }

    #[test]
    fn test_account_user_is_verbatim() {
        assert_eq!(account_user("bob@example.com").unwrap(), "bob");
        assert_eq!(
            account_user("juliet%40capulet.example@shoppingsite.example").unwrap(),
            "juliet%40capulet.example"
        );
    }

    #[tokio::test]
    async fn test_percent_escapes_are_not_decoded() {
        let strategy = create_test_strategy().await;

        let got = strategy.resolve("acct:b%6Fb@example.com").await.unwrap();
        assert!(got.is_none());
    }
}
