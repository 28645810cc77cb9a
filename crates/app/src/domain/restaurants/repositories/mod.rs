//! Restaurants Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::restaurants::{data::RestaurantFilter, records::RestaurantRecord},
    store::StoreError,
};

mod file;
mod pg;

pub use file::FileRestaurantsRepository;
pub use pg::PgRestaurantsRepository;

#[automock]
#[async_trait]
pub trait RestaurantsRepository: Send + Sync {
    async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, StoreError>;

    async fn get_restaurant(&self, restaurant_id: &str) -> Result<RestaurantRecord, StoreError>;

    /// Insert a restaurant; a taken id or partita IVA is [`StoreError::Duplicate`].
    async fn insert_restaurant(&self, restaurant: &RestaurantRecord) -> Result<(), StoreError>;

    async fn update_restaurant(&self, restaurant: &RestaurantRecord) -> Result<(), StoreError>;

    async fn delete_restaurant(&self, restaurant_id: &str) -> Result<(), StoreError>;
}
