//! JSON-file orders repository.

use async_trait::async_trait;

use crate::{
    domain::orders::{records::OrderRecord, repositories::OrdersRepository, status::OrderStatus},
    store::{JsonCollection, JsonFileStore, StoreError},
};

#[derive(Debug, Clone)]
pub struct FileOrdersRepository {
    orders: JsonCollection<OrderRecord>,
}

impl FileOrdersRepository {
    #[must_use]
    pub fn new(store: &JsonFileStore) -> Self {
        Self {
            orders: store.collection("orders"),
        }
    }
}

#[async_trait]
impl OrdersRepository for FileOrdersRepository {
    async fn list_orders(
        &self,
        customer_id: Option<String>,
    ) -> Result<Vec<OrderRecord>, StoreError> {
        let mut orders: Vec<_> = self
            .orders
            .load()
            .await?
            .into_iter()
            .filter(|order| {
                customer_id
                    .as_deref()
                    .is_none_or(|customer| order.customer_id == customer)
            })
            .collect();

        orders.sort_by(|a, b| b.id.cmp(&a.id));

        Ok(orders)
    }

    async fn get_order(&self, id: u64) -> Result<OrderRecord, StoreError> {
        self.orders
            .load()
            .await?
            .into_iter()
            .find(|order| order.id == id)
            .ok_or(StoreError::NotFound)
    }

    async fn max_order_id(&self) -> Result<u64, StoreError> {
        Ok(self
            .orders
            .load()
            .await?
            .iter()
            .map(|order| order.id)
            .max()
            .unwrap_or(0))
    }

    async fn insert_order(&self, order: &OrderRecord) -> Result<(), StoreError> {
        let mut orders = self.orders.load().await?;

        if orders.iter().any(|existing| existing.id == order.id) {
            return Err(StoreError::Duplicate);
        }

        orders.push(order.clone());

        self.orders.save(&orders).await
    }

    async fn compare_and_set_status(
        &self,
        id: u64,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<OrderRecord>, StoreError> {
        let mut orders = self.orders.load().await?;

        let Some(order) = orders
            .iter_mut()
            .find(|order| order.id == id && order.status == expected)
        else {
            return Ok(None);
        };

        order.status = next;

        let updated = order.clone();

        self.orders.save(&orders).await?;

        Ok(Some(updated))
    }
}
