//! Users Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::users::records::{UserRecord, UserUuid},
    store::StoreError,
};

mod file;
mod pg;

pub use file::FileUsersRepository;
pub use pg::PgUsersRepository;

#[automock]
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Find the account whose email or username matches `identifier`, ignoring case.
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, StoreError>;

    /// Insert a new account; a clashing username or email is [`StoreError::Duplicate`].
    async fn create_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    /// Replace the username and email of an existing account.
    async fn update_user(&self, user: &UserRecord) -> Result<(), StoreError>;

    async fn set_restaurant_id(
        &self,
        user: UserUuid,
        restaurant_id: &str,
    ) -> Result<(), StoreError>;
}
