//! Postgres meals repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar};

use crate::{
    database::{id_to_db, try_get_id},
    domain::meals::{
        data::MealFilter,
        records::{MealRecord, Origin},
        repositories::MealsRepository,
    },
    store::StoreError,
};

const LIST_MEALS_SQL: &str = include_str!("sql/list_meals.sql");
const GET_MEAL_SQL: &str = include_str!("sql/get_meal.sql");
const MAX_MEAL_ID_SQL: &str = include_str!("sql/max_meal_id.sql");
const INSERT_MEAL_SQL: &str = include_str!("sql/insert_meal.sql");
const UPDATE_MEAL_SQL: &str = include_str!("sql/update_meal.sql");
const DELETE_MEAL_SQL: &str = include_str!("sql/delete_meal.sql");

#[derive(Debug, Clone)]
pub struct PgMealsRepository {
    pool: PgPool,
}

impl PgMealsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MealsRepository for PgMealsRepository {
    async fn list_meals(&self, filter: &MealFilter) -> Result<Vec<MealRecord>, StoreError> {
        Ok(query_as::<Postgres, MealRecord>(LIST_MEALS_SQL)
            .bind(filter.restaurant_id())
            .bind(filter.tipologia())
            .bind(filter.search_pattern())
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_meal(&self, id: u64) -> Result<MealRecord, StoreError> {
        Ok(query_as::<Postgres, MealRecord>(GET_MEAL_SQL)
            .bind(id_to_db(id, "idmeals")?)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn max_meal_id(&self) -> Result<u64, StoreError> {
        let max = query_scalar::<Postgres, i64>(MAX_MEAL_ID_SQL).fetch_one(&self.pool).await?;

        u64::try_from(max).map_err(|e| {
            StoreError::from(sqlx::Error::ColumnDecode {
                index: "idmeals".to_string(),
                source: Box::new(e),
            })
        })
    }

    async fn insert_meal(&self, meal: &MealRecord) -> Result<(), StoreError> {
        query(INSERT_MEAL_SQL)
            .bind(id_to_db(meal.idmeals, "idmeals")?)
            .bind(&meal.restaurant_id)
            .bind(&meal.nome)
            .bind(meal.prezzo)
            .bind(meal.tipologia.as_deref())
            .bind(&meal.ingredienti)
            .bind(meal.origine.as_str())
            .bind(meal.descrizione.as_deref())
            .bind(meal.immagine.as_deref())
            .bind(SqlxTimestamp::from(meal.created_at))
            .bind(SqlxTimestamp::from(meal.updated_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_meal(&self, meal: &MealRecord) -> Result<(), StoreError> {
        let rows_affected = query(UPDATE_MEAL_SQL)
            .bind(id_to_db(meal.idmeals, "idmeals")?)
            .bind(&meal.restaurant_id)
            .bind(&meal.nome)
            .bind(meal.prezzo)
            .bind(meal.tipologia.as_deref())
            .bind(&meal.ingredienti)
            .bind(meal.origine.as_str())
            .bind(meal.descrizione.as_deref())
            .bind(meal.immagine.as_deref())
            .bind(SqlxTimestamp::from(meal.updated_at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_meal(&self, id: u64, restaurant_id: Option<String>) -> Result<(), StoreError> {
        let rows_affected = query(DELETE_MEAL_SQL)
            .bind(id_to_db(id, "idmeals")?)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }
}

impl<'r> FromRow<'r, PgRow> for MealRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let origine: String = row.try_get("origine")?;

        let origine = origine
            .parse::<Origin>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "origine".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            idmeals: try_get_id(row, "idmeals")?,
            restaurant_id: row.try_get("restaurant_id")?,
            nome: row.try_get("nome")?,
            prezzo: row.try_get("prezzo")?,
            tipologia: row.try_get("tipologia")?,
            ingredienti: row.try_get("ingredienti")?,
            origine,
            descrizione: row.try_get("descrizione")?,
            immagine: row.try_get("immagine")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
