//! Auth service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{info, warn};

use crate::{
    auth::{AuthServiceError, PasswordHasher, Session, SessionClaims, TokenIssuer, TokenType},
    domain::users::{
        data::{NewUser, ProfileUpdate},
        derive_restaurant_id,
        records::{Role, UserRecord, UserUuid},
        repositories::UsersRepository,
    },
    settings::AuthSettings,
};

#[derive(Clone)]
pub struct StoreAuthService {
    users: Arc<dyn UsersRepository>,
    hasher: Arc<dyn PasswordHasher>,
    tokens: TokenIssuer,
    default_restaurant_id: Option<String>,
}

impl StoreAuthService {
    #[must_use]
    pub fn new(
        users: Arc<dyn UsersRepository>,
        hasher: Arc<dyn PasswordHasher>,
        settings: &AuthSettings,
    ) -> Self {
        Self {
            users,
            hasher,
            tokens: TokenIssuer::new(settings.jwt_secret.as_deref(), settings.jwt_expires_in),
            default_restaurant_id: settings.default_restaurant_id.clone(),
        }
    }

    fn derive(&self, user: &UserRecord) -> Option<String> {
        derive_restaurant_id(user, self.default_restaurant_id.as_deref())
    }

    /// Fill in a missing owner restaurant id, persisting it without failing the caller.
    async fn ensure_restaurant_id(&self, user: &mut UserRecord) {
        let Some(derived) = self.derive(user) else {
            return;
        };

        if user.restaurant_id.as_deref() == Some(derived.as_str()) {
            return;
        }

        match self.users.set_restaurant_id(user.id, &derived).await {
            Ok(()) => info!(user = %user.id, restaurant_id = %derived, "assigned restaurant id"),
            Err(error) => warn!(
                user = %user.id,
                restaurant_id = %derived,
                error = %error,
                "failed to persist derived restaurant id"
            ),
        }

        user.restaurant_id = Some(derived);
    }
}

fn required(field: &str, value: &str) -> Result<String, AuthServiceError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(AuthServiceError::Validation(format!("{field} is required")));
    }

    Ok(value.to_string())
}

fn email(value: &str) -> Result<String, AuthServiceError> {
    let value = required("email", value)?;

    if !value.contains('@') {
        return Err(AuthServiceError::Validation("email is not valid".to_string()));
    }

    Ok(value)
}

#[async_trait]
impl AuthService for StoreAuthService {
    async fn register(&self, user: NewUser) -> Result<UserRecord, AuthServiceError> {
        if user.password.is_empty() {
            return Err(AuthServiceError::Validation("password is required".to_string()));
        }

        let mut record = UserRecord {
            id: UserUuid::new(),
            username: required("username", &user.username)?,
            email: email(&user.email)?,
            password_hash: self.hasher.hash(&user.password)?,
            role: user.role,
            restaurant_id: None,
            legacy_id: user.legacy_id,
            created_at: Timestamp::now(),
        };

        record.restaurant_id = self.derive(&record);

        self.users.create_user(&record).await?;

        info!(user = %record.id, role = %record.role, "registered user");

        Ok(record)
    }

    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Session, AuthServiceError> {
        let mut user = self
            .users
            .find_by_identifier(identifier)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !self.hasher.verify(password, &user.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        self.ensure_restaurant_id(&mut user).await;

        let token = self.tokens.issue(&user, user.restaurant_id.as_deref())?;

        Ok(Session {
            token,
            token_type: self.tokens.token_type(),
            user,
        })
    }

    async fn save_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthServiceError> {
        let mut record = self.users.get_user(user).await?;

        if let Some(username) = update.username {
            record.username = required("username", &username)?;
        }

        if let Some(address) = update.email {
            record.email = email(&address)?;
        }

        self.users.update_user(&record).await?;
        self.ensure_restaurant_id(&mut record).await;

        Ok(record)
    }

    async fn resolve_restaurant_id(&self, user: UserUuid) -> Result<String, AuthServiceError> {
        let mut record = self.users.get_user(user).await?;

        if record.role != Role::Ristoratore {
            return Err(AuthServiceError::NotRestaurantOwner);
        }

        self.ensure_restaurant_id(&mut record).await;

        record
            .restaurant_id
            .ok_or(AuthServiceError::NotRestaurantOwner)
    }

    fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthServiceError> {
        Ok(self.tokens.verify(token)?)
    }

    fn issues_verifiable_tokens(&self) -> bool {
        self.tokens.token_type() == TokenType::Jwt
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Create an account. Owner accounts get their restaurant id derived immediately.
    async fn register(&self, user: NewUser) -> Result<UserRecord, AuthServiceError>;

    /// Check credentials by email or username and issue a session token.
    async fn authenticate(
        &self,
        identifier: &str,
        password: &str,
    ) -> Result<Session, AuthServiceError>;

    /// Update an account's username or email.
    async fn save_profile(
        &self,
        user: UserUuid,
        update: ProfileUpdate,
    ) -> Result<UserRecord, AuthServiceError>;

    /// Restaurant id an owner account acts for.
    async fn resolve_restaurant_id(&self, user: UserUuid) -> Result<String, AuthServiceError>;

    /// Claims of a signed token; opaque tokens never verify.
    fn verify_token(&self, token: &str) -> Result<SessionClaims, AuthServiceError>;

    /// Whether issued tokens can later be checked with [`AuthService::verify_token`].
    fn issues_verifiable_tokens(&self) -> bool;
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use testresult::TestResult;

    use super::*;
    use crate::{
        auth::Argon2PasswordHasher,
        domain::users::repositories::MockUsersRepository,
        store::StoreError,
        test::TestContext,
    };

    fn owner_with_legacy_id(hasher: &Argon2PasswordHasher) -> UserRecord {
        UserRecord {
            id: UserUuid::new(),
            username: "chef".to_string(),
            email: "chef@example.com".to_string(),
            password_hash: hasher.hash("segreta").expect("password hashes"),
            role: Role::Ristoratore,
            restaurant_id: None,
            legacy_id: Some(42),
            created_at: Timestamp::now(),
        }
    }

    #[tokio::test]
    async fn login_assigns_legacy_restaurant_id_idempotently() -> TestResult {
        let ctx = TestContext::new().await?;
        let user = owner_with_legacy_id(&Argon2PasswordHasher);

        ctx.repositories.users.create_user(&user).await?;

        let first = ctx.auth.authenticate("chef", "segreta").await?;
        let second = ctx.auth.authenticate("CHEF@example.com", "segreta").await?;
        let stored = ctx.repositories.users.get_user(user.id).await?;

        assert_eq!(first.user.restaurant_id.as_deref(), Some("r_42"));
        assert_eq!(second.user.restaurant_id.as_deref(), Some("r_42"));
        assert_eq!(stored.restaurant_id.as_deref(), Some("r_42"));
        assert_eq!(first.token_type, TokenType::Opaque);

        Ok(())
    }

    #[tokio::test]
    async fn persistence_failure_still_returns_derived_id() -> TestResult {
        let user = owner_with_legacy_id(&Argon2PasswordHasher);
        let found = user.clone();

        let mut users = MockUsersRepository::new();

        users
            .expect_find_by_identifier()
            .returning(move |_| Ok(Some(found.clone())));

        users
            .expect_set_restaurant_id()
            .times(1)
            .returning(|_, _| Err(StoreError::Io(std::io::Error::other("disk full"))));

        let service = StoreAuthService::new(
            Arc::new(users),
            Arc::new(Argon2PasswordHasher),
            &AuthSettings::default(),
        );

        let session = service.authenticate("chef", "segreta").await?;

        assert_eq!(session.user.restaurant_id.as_deref(), Some("r_42"));

        Ok(())
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await?;

        ctx.register("mario", Role::Cliente).await?;

        let result = ctx.auth.authenticate("mario", "sbagliata").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn unknown_identifier_is_invalid_credentials() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.auth.authenticate("nobody", "segreta").await;

        assert!(
            matches!(result, Err(AuthServiceError::InvalidCredentials)),
            "expected InvalidCredentials, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_registration_is_conflict() -> TestResult {
        let ctx = TestContext::new().await?;

        ctx.register("mario", Role::Cliente).await?;

        let result = ctx.register("MARIO", Role::Cliente).await;

        assert!(
            matches!(result, Err(AuthServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn registration_requires_fields() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .auth
            .register(NewUser {
                username: "  ".to_string(),
                email: "x@example.com".to_string(),
                password: "segreta".to_string(),
                role: Role::Cliente,
                legacy_id: None,
            })
            .await;

        assert!(
            matches!(result, Err(AuthServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn owner_registration_derives_restaurant_id() -> TestResult {
        let ctx = TestContext::new().await?;

        let owner = ctx.register("chef", Role::Ristoratore).await?;
        let customer = ctx.register("mario", Role::Cliente).await?;

        assert_eq!(owner.restaurant_id, Some(owner.id.to_string()));
        assert_eq!(customer.restaurant_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn profile_save_fills_missing_restaurant_id() -> TestResult {
        let ctx = TestContext::new().await?;
        let user = owner_with_legacy_id(&Argon2PasswordHasher);

        ctx.repositories.users.create_user(&user).await?;

        let saved = ctx
            .auth
            .save_profile(
                user.id,
                ProfileUpdate {
                    username: Some("chef2".to_string()),
                    email: None,
                },
            )
            .await?;

        assert_eq!(saved.username, "chef2");
        assert_eq!(saved.restaurant_id.as_deref(), Some("r_42"));
        assert_eq!(
            ctx.auth.resolve_restaurant_id(user.id).await?,
            "r_42".to_string()
        );

        Ok(())
    }

    #[tokio::test]
    async fn customers_cannot_resolve_a_restaurant() -> TestResult {
        let ctx = TestContext::new().await?;
        let customer = ctx.register("mario", Role::Cliente).await?;

        let result = ctx.auth.resolve_restaurant_id(customer.id).await;

        assert!(
            matches!(result, Err(AuthServiceError::NotRestaurantOwner)),
            "expected NotRestaurantOwner, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn signed_sessions_verify() -> TestResult {
        let ctx = TestContext::with_auth(AuthSettings {
            default_restaurant_id: Some("r_default".to_string()),
            jwt_secret: Some("secret".to_string()),
            jwt_expires_in: Duration::from_secs(3600),
        })
        .await?;

        ctx.register("chef", Role::Ristoratore).await?;

        let session = ctx.auth.authenticate("chef", "segreta").await?;
        let claims = ctx.auth.verify_token(&session.token)?;

        assert_eq!(session.token_type, TokenType::Jwt);
        assert!(ctx.auth.issues_verifiable_tokens());
        assert_eq!(claims.restaurant_id.as_deref(), Some("r_default"));

        Ok(())
    }
}
