//! Postgres restaurants repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as};

use crate::{
    domain::restaurants::{
        data::RestaurantFilter, records::RestaurantRecord, repositories::RestaurantsRepository,
    },
    store::{StoreError, like_pattern},
};

const LIST_RESTAURANTS_SQL: &str = include_str!("sql/list_restaurants.sql");
const GET_RESTAURANT_SQL: &str = include_str!("sql/get_restaurant.sql");
const INSERT_RESTAURANT_SQL: &str = include_str!("sql/insert_restaurant.sql");
const UPDATE_RESTAURANT_SQL: &str = include_str!("sql/update_restaurant.sql");
const DELETE_RESTAURANT_SQL: &str = include_str!("sql/delete_restaurant.sql");

#[derive(Debug, Clone)]
pub struct PgRestaurantsRepository {
    pool: PgPool,
}

impl PgRestaurantsRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RestaurantsRepository for PgRestaurantsRepository {
    async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        Ok(query_as::<Postgres, RestaurantRecord>(LIST_RESTAURANTS_SQL)
            .bind(filter.nome().map(like_pattern))
            .bind(filter.luogo().map(like_pattern))
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_restaurant(&self, restaurant_id: &str) -> Result<RestaurantRecord, StoreError> {
        Ok(query_as::<Postgres, RestaurantRecord>(GET_RESTAURANT_SQL)
            .bind(restaurant_id)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn insert_restaurant(&self, restaurant: &RestaurantRecord) -> Result<(), StoreError> {
        query(INSERT_RESTAURANT_SQL)
            .bind(&restaurant.restaurant_id)
            .bind(&restaurant.nome)
            .bind(restaurant.luogo.as_deref())
            .bind(restaurant.telefono.as_deref())
            .bind(restaurant.partita_iva.as_deref())
            .bind(restaurant.indirizzo.as_deref())
            .bind(&restaurant.tipologie)
            .bind(restaurant.orari.as_deref())
            .bind(restaurant.attivo)
            .bind(SqlxTimestamp::from(restaurant.created_at))
            .bind(SqlxTimestamp::from(restaurant.updated_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn update_restaurant(&self, restaurant: &RestaurantRecord) -> Result<(), StoreError> {
        let rows_affected = query(UPDATE_RESTAURANT_SQL)
            .bind(&restaurant.restaurant_id)
            .bind(&restaurant.nome)
            .bind(restaurant.luogo.as_deref())
            .bind(restaurant.telefono.as_deref())
            .bind(restaurant.partita_iva.as_deref())
            .bind(restaurant.indirizzo.as_deref())
            .bind(&restaurant.tipologie)
            .bind(restaurant.orari.as_deref())
            .bind(restaurant.attivo)
            .bind(SqlxTimestamp::from(restaurant.updated_at))
            .execute(&self.pool)
            .await?
            .rows_affected();

        if rows_affected == 0 {
            return Err(StoreError::NotFound);
        }

        Ok(())
    }

    async fn delete_restaurant(&self, restaurant_id: &str) -> Result<(), StoreError> {
        let rows_affected = query(DELETE_RESTAURANT_SQL)
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

impl<'r> FromRow<'r, PgRow> for RestaurantRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            restaurant_id: row.try_get("restaurant_id")?,
            nome: row.try_get("nome")?,
            luogo: row.try_get("luogo")?,
            telefono: row.try_get("telefono")?,
            partita_iva: row.try_get("partita_iva")?,
            indirizzo: row.try_get("indirizzo")?,
            tipologie: row.try_get("tipologie")?,
            orari: row.try_get("orari")?,
            attivo: row.try_get("attivo")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}
