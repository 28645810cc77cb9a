//! Postgres orders repository.

use async_trait::async_trait;
use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, PgPool, Postgres, Row, postgres::PgRow, query, query_as, query_scalar, types::Json,
};

use crate::{
    database::{id_to_db, try_get_id},
    domain::orders::{
        records::{Fulfillment, OrderItem, OrderRecord},
        repositories::OrdersRepository,
        status::OrderStatus,
    },
    store::StoreError,
};

const LIST_ORDERS_SQL: &str = include_str!("sql/list_orders.sql");
const GET_ORDER_SQL: &str = include_str!("sql/get_order.sql");
const MAX_ORDER_ID_SQL: &str = include_str!("sql/max_order_id.sql");
const INSERT_ORDER_SQL: &str = include_str!("sql/insert_order.sql");
const SET_ORDER_STATUS_SQL: &str = include_str!("sql/set_order_status.sql");

#[derive(Debug, Clone)]
pub struct PgOrdersRepository {
    pool: PgPool,
}

impl PgOrdersRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrdersRepository for PgOrdersRepository {
    async fn list_orders(
        &self,
        customer_id: Option<String>,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(LIST_ORDERS_SQL)
            .bind(customer_id)
            .fetch_all(&self.pool)
            .await?)
    }

    async fn get_order(&self, id: u64) -> Result<OrderRecord, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(GET_ORDER_SQL)
            .bind(id_to_db(id, "id")?)
            .fetch_one(&self.pool)
            .await?)
    }

    async fn max_order_id(&self) -> Result<u64, StoreError> {
        let max = query_scalar::<Postgres, i64>(MAX_ORDER_ID_SQL)
            .fetch_one(&self.pool)
            .await?;

        u64::try_from(max).map_err(|e| {
            StoreError::from(sqlx::Error::ColumnDecode {
                index: "id".to_string(),
                source: Box::new(e),
            })
        })
    }

    async fn insert_order(&self, order: &OrderRecord) -> Result<(), StoreError> {
        query(INSERT_ORDER_SQL)
            .bind(id_to_db(order.id, "id")?)
            .bind(&order.customer_id)
            .bind(order.restaurant_id.as_deref())
            .bind(Json(&order.items))
            .bind(order.total)
            .bind(order.status.as_str())
            .bind(Json(&order.fulfillment))
            .bind(SqlxTimestamp::from(order.created_at))
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn compare_and_set_status(
        &self,
        id: u64,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<OrderRecord>, StoreError> {
        Ok(query_as::<Postgres, OrderRecord>(SET_ORDER_STATUS_SQL)
            .bind(id_to_db(id, "id")?)
            .bind(expected.as_str())
            .bind(next.as_str())
            .fetch_optional(&self.pool)
            .await?)
    }
}

impl<'r> FromRow<'r, PgRow> for OrderRecord {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let status: String = row.try_get("status")?;

        let status = status
            .parse::<OrderStatus>()
            .map_err(|e| sqlx::Error::ColumnDecode {
                index: "status".to_string(),
                source: Box::new(e),
            })?;

        Ok(Self {
            id: try_get_id(row, "id")?,
            customer_id: row.try_get("customer_id")?,
            restaurant_id: row.try_get("restaurant_id")?,
            items: row.try_get::<Json<Vec<OrderItem>>, _>("items")?.0,
            total: row.try_get("total")?,
            status,
            fulfillment: row.try_get::<Json<Fulfillment>, _>("fulfillment")?.0,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
        })
    }
}
