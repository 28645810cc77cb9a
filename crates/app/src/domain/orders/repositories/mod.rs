//! Orders Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::orders::{records::OrderRecord, status::OrderStatus},
    store::StoreError,
};

mod file;
mod pg;

pub use file::FileOrdersRepository;
pub use pg::PgOrdersRepository;

#[automock]
#[async_trait]
pub trait OrdersRepository: Send + Sync {
    /// Orders, newest first, optionally limited to one customer.
    async fn list_orders(&self, customer_id: Option<String>)
    -> Result<Vec<OrderRecord>, StoreError>;

    async fn get_order(&self, id: u64) -> Result<OrderRecord, StoreError>;

    /// Largest order id, zero when there are none.
    async fn max_order_id(&self) -> Result<u64, StoreError>;

    /// Insert `order`; a taken id is [`StoreError::Duplicate`].
    async fn insert_order(&self, order: &OrderRecord) -> Result<(), StoreError>;

    /// Set the status to `next` only while it still equals `expected`.
    ///
    /// Returns `None` when the order is missing or its status has moved on.
    async fn compare_and_set_status(
        &self,
        id: u64,
        expected: OrderStatus,
        next: OrderStatus,
    ) -> Result<Option<OrderRecord>, StoreError>;
}
