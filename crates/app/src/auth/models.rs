//! Auth data models.

use crate::{auth::TokenType, domain::users::records::UserRecord};

/// Result of a successful login.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub token_type: TokenType,

    /// Authenticated account, with its derived restaurant identifier filled in.
    pub user: UserRecord,
}
