//! JSON-file users repository.

use async_trait::async_trait;

use crate::{
    domain::users::{
        records::{UserRecord, UserUuid},
        repositories::UsersRepository,
    },
    store::{JsonCollection, JsonFileStore, StoreError},
};

#[derive(Debug, Clone)]
pub struct FileUsersRepository {
    users: JsonCollection<UserRecord>,
}

impl FileUsersRepository {
    #[must_use]
    pub fn new(store: &JsonFileStore) -> Self {
        Self {
            users: store.collection("users"),
        }
    }
}

fn clashes(existing: &UserRecord, candidate: &UserRecord) -> bool {
    existing.id != candidate.id
        && (existing.username.eq_ignore_ascii_case(&candidate.username)
            || existing.email.eq_ignore_ascii_case(&candidate.email))
}

#[async_trait]
impl UsersRepository for FileUsersRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .load()
            .await?
            .into_iter()
            .find(|user| user.is_identified_by(identifier)))
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, StoreError> {
        self.users
            .load()
            .await?
            .into_iter()
            .find(|record| record.id == user)
            .ok_or(StoreError::NotFound)
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.load().await?;

        if users
            .iter()
            .any(|existing| existing.id == user.id || clashes(existing, user))
        {
            return Err(StoreError::Duplicate);
        }

        users.push(user.clone());

        self.users.save(&users).await
    }

    async fn update_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let mut users = self.users.load().await?;

        if users.iter().any(|existing| clashes(existing, user)) {
            return Err(StoreError::Duplicate);
        }

        let record = users
            .iter_mut()
            .find(|record| record.id == user.id)
            .ok_or(StoreError::NotFound)?;

        record.username.clone_from(&user.username);
        record.email.clone_from(&user.email);

        self.users.save(&users).await
    }

    async fn set_restaurant_id(
        &self,
        user: UserUuid,
        restaurant_id: &str,
    ) -> Result<(), StoreError> {
        let mut users = self.users.load().await?;

        let record = users
            .iter_mut()
            .find(|record| record.id == user)
            .ok_or(StoreError::NotFound)?;

        record.restaurant_id = Some(restaurant_id.to_string());

        self.users.save(&users).await
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use tempfile::TempDir;
    use testresult::TestResult;

    use super::*;
    use crate::domain::users::records::Role;

    fn user(username: &str, email: &str) -> UserRecord {
        UserRecord {
            id: UserUuid::new(),
            username: username.to_string(),
            email: email.to_string(),
            password_hash: "hash".to_string(),
            role: Role::Cliente,
            restaurant_id: None,
            legacy_id: None,
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected_ignoring_case() -> TestResult {
        let dir = TempDir::new()?;
        let repository = FileUsersRepository::new(&JsonFileStore::open(dir.path()).await?);

        repository
            .create_user(&user("mario", "mario@example.com"))
            .await?;

        let result = repository
            .create_user(&user("luigi", "MARIO@example.com"))
            .await;

        assert!(
            matches!(result, Err(StoreError::Duplicate)),
            "expected Duplicate, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn restaurant_id_is_persisted() -> TestResult {
        let dir = TempDir::new()?;
        let repository = FileUsersRepository::new(&JsonFileStore::open(dir.path()).await?);
        let record = user("chef", "chef@example.com");

        repository.create_user(&record).await?;
        repository.set_restaurant_id(record.id, "r_1").await?;

        let stored = repository.get_user(record.id).await?;

        assert_eq!(stored.restaurant_id.as_deref(), Some("r_1"));

        Ok(())
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() -> TestResult {
        let dir = TempDir::new()?;
        let repository = FileUsersRepository::new(&JsonFileStore::open(dir.path()).await?);

        let result = repository.set_restaurant_id(UserUuid::new(), "r_1").await;

        assert!(
            matches!(result, Err(StoreError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }
}
