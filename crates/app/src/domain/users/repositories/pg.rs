//! Postgres users repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    database::id_to_db,
    domain::users::{
        records::{Role, UserRecord, UserUuid},
        repositories::UsersRepository,
    },
    store::StoreError,
};

const FIND_USER_BY_IDENTIFIER_SQL: &str = include_str!("sql/find_user_by_identifier.sql");
const GET_USER_SQL: &str = include_str!("sql/get_user.sql");
const CREATE_USER_SQL: &str = include_str!("sql/create_user.sql");
const UPDATE_USER_SQL: &str = include_str!("sql/update_user.sql");
const SET_RESTAURANT_ID_SQL: &str = include_str!("sql/set_restaurant_id.sql");

#[derive(Debug, Clone)]
pub struct PgUsersRepository {
    pool: PgPool,
}

impl PgUsersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn affected_one(rows_affected: u64) -> Result<(), StoreError> {
    if rows_affected == 0 {
        return Err(StoreError::NotFound);
    }

    Ok(())
}

#[async_trait]
impl UsersRepository for PgUsersRepository {
    async fn find_by_identifier(&self, identifier: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(query_as::<Postgres, UserRecord>(FIND_USER_BY_IDENTIFIER_SQL)
            .bind(identifier.trim())
            .fetch_optional(&self.pool)
            .await?)
    }

    async fn get_user(&self, user: UserUuid) -> Result<UserRecord, StoreError> {
        Ok(query_as::<Postgres, UserRecord>(GET_USER_SQL)
            .bind(user.into_uuid())
            .fetch_one(&self.pool)
            .await?)
    }

    async fn create_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let legacy_id = user
            .legacy_id
            .map(|id| id_to_db(id, "legacy_id"))
            .transpose()?;

        query(CREATE_USER_SQL)
            .bind(user.id.into_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(user.restaurant_id.as_deref())
            .bind(legacy_id)
            .bind(SqlxTimestamp::from(user.created_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_user(&self, user: &UserRecord) -> Result<(), StoreError> {
        let rows_affected = query(UPDATE_USER_SQL)
            .bind(user.id.into_uuid())
            .bind(&user.username)
            .bind(&user.email)
            .execute(&self.pool)
            .await?
            .rows_affected();

        affected_one(rows_affected)
    }

    async fn set_restaurant_id(
        &self,
        user: UserUuid,
        restaurant_id: &str,
    ) -> Result<(), StoreError> {
        let rows_affected = query(SET_RESTAURANT_ID_SQL)
            .bind(user.into_uuid())
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        affected_one(rows_affected)
    }
}

impl<'r> FromRow<'r, PgRow> for UserRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let role: String = row.try_get("role")?;

        let role = role.parse::<Role>().map_err(|e| sqlx::Error::ColumnDecode {
            index: "role".to_string(),
            source: Box::new(e),
        })?;

        let legacy_id = row
            .try_get::<Option<i64>, _>("legacy_id")?
            .map(u64::try_from)
            .transpose()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "legacy_id".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: UserUuid::from_uuid(row.try_get("id")?),
            username: row.try_get("username")?,
            email: row.try_get("email")?,
            password_hash: row.try_get("password_hash")?,
            role,
            restaurant_id: row.try_get("restaurant_id")?,
            legacy_id,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
