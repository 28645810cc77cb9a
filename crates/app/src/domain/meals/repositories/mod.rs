//! Meals Repositories

use async_trait::async_trait;
use mockall::automock;

use crate::{
    domain::meals::{data::MealFilter, records::MealRecord},
    store::StoreError,
};

mod file;
mod pg;

pub use file::FileMealsRepository;
pub use pg::PgMealsRepository;

#[automock]
#[async_trait]
pub trait MealsRepository: Send + Sync {
    /// Meals matching `filter`, ordered by `idmeals`.
    async fn list_meals(&self, filter: &MealFilter) -> Result<Vec<MealRecord>, StoreError>;

    async fn get_meal(&self, id: u64) -> Result<MealRecord, StoreError>;

    /// Largest `idmeals` in the whole catalog, zero when empty.
    async fn max_meal_id(&self) -> Result<u64, StoreError>;

    /// Insert `meal`; a taken `idmeals` is [`StoreError::Duplicate`].
    async fn insert_meal(&self, meal: &MealRecord) -> Result<(), StoreError>;

    async fn update_meal(&self, meal: &MealRecord) -> Result<(), StoreError>;

    /// Delete a meal, only when owned by `restaurant_id` if one is given.
    async fn delete_meal(&self, id: u64, restaurant_id: Option<String>) -> Result<(), StoreError>;
}
