/// `mailto:` resource lookup
use crate::{
    db::{Account, AccountStore},
    error::{FingerError, FingerResult},
    lookup::{LookupStrategy, ResourceUri},
};
use async_trait::async_trait;
use std::sync::Arc;

pub const MAILTO_SCHEME: &str = "mailto";

/// Resolves `mailto:<address>` to the account registered with that address
#[derive(Clone)]
pub struct MailtoStrategy {
    store: Arc<dyn AccountStore>,
}

impl MailtoStrategy {
    pub fn new(store: Arc<dyn AccountStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl LookupStrategy for MailtoStrategy {
    fn scheme(&self) -> &str {
        MAILTO_SCHEME
    }

    async fn resolve(&self, uri: &str) -> FingerResult<Option<Account>> {
        let resource = ResourceUri::parse_with_scheme(uri, MAILTO_SCHEME)?;

        // The whole path is the address; it is not split on '@'
        let email = resource.path();
        if email.is_empty() {
            return Err(FingerError::InvalidToken(
                "mailto resource has no address".to_string(),
            ));
        }

        self.store.find_by_email(email).await
    }
}
