/// JSON Resource Descriptor (RFC 7033 section 4.4)
use crate::db::Account;
use serde::{Deserialize, Serialize};

/// Media type of WebFinger responses
pub const JRD_CONTENT_TYPE: &str = "application/jrd+json";

/// WebFinger response document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jrd {
    pub subject: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aliases: Option<Vec<String>>,
}

impl Jrd {
    /// Describe an account: `acct:<username>`, aliased by its email if any
    pub fn from_account(account: &Account) -> Self {
        Self {
            subject: format!("acct:{}", account.username),
            aliases: account
                .email()
                .map(|email| vec![format!("mailto:{}", email)]),
        }
    }
}

/// Build the document for a lookup outcome; `None` means nothing to describe
pub fn assemble(account: Option<Account>) -> Option<Jrd> {
    account.as_ref().map(Jrd::from_account)
}
