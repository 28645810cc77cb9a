//! Meals service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::{debug, info};

use crate::{
    domain::meals::{
        data::{MealFilter, MealInput},
        errors::MealsServiceError,
        records::{COMMON_RESTAURANT_ID, MealRecord, Origin},
        repositories::MealsRepository,
    },
    store::{NEXT_ID_ATTEMPTS, StoreError},
};

#[derive(Clone)]
pub struct StoreMealsService {
    meals: Arc<dyn MealsRepository>,
}

impl StoreMealsService {
    #[must_use]
    pub fn new(meals: Arc<dyn MealsRepository>) -> Self {
        Self { meals }
    }

    /// Insert `meal` under `1 + max(idmeals)`, retrying when another writer claims the id first.
    async fn insert_with_next_id(&self, mut meal: MealRecord) -> Result<MealRecord, MealsServiceError> {
        for attempt in 1..=NEXT_ID_ATTEMPTS {
            meal.idmeals = self
                .meals
                .max_meal_id()
                .await?
                .checked_add(1)
                .ok_or(MealsServiceError::Conflict)?;

            match self.meals.insert_meal(&meal).await {
                Ok(()) => {
                    info!(
                        idmeals = meal.idmeals,
                        restaurant_id = %meal.restaurant_id,
                        "created meal"
                    );

                    return Ok(meal);
                }
                Err(StoreError::Duplicate) => {
                    debug!(attempt, idmeals = meal.idmeals, "meal id already taken, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(MealsServiceError::Conflict)
    }
}

fn required_restaurant(restaurant_id: &str) -> Result<&str, MealsServiceError> {
    let restaurant_id = restaurant_id.trim();

    if restaurant_id.is_empty() {
        return Err(MealsServiceError::Validation(
            "restaurantId is required".to_string(),
        ));
    }

    Ok(restaurant_id)
}

#[async_trait]
impl MealsService for StoreMealsService {
    async fn list_meals(&self, filter: MealFilter) -> Result<Vec<MealRecord>, MealsServiceError> {
        Ok(self.meals.list_meals(&filter).await?)
    }

    async fn list_common_meals(&self) -> Result<Vec<MealRecord>, MealsServiceError> {
        Ok(self
            .meals
            .list_meals(&MealFilter::for_restaurant(COMMON_RESTAURANT_ID))
            .await?)
    }

    async fn get_meal(&self, id: u64) -> Result<MealRecord, MealsServiceError> {
        Ok(self.meals.get_meal(id).await?)
    }

    async fn create_meal(&self, input: MealInput) -> Result<MealRecord, MealsServiceError> {
        let meal = input.into_new_meal(Timestamp::now())?;

        self.insert_with_next_id(meal).await
    }

    async fn import_common_meal(
        &self,
        restaurant_id: &str,
        common_id: u64,
    ) -> Result<MealRecord, MealsServiceError> {
        let restaurant_id = required_restaurant(restaurant_id)?;
        let common = self.meals.get_meal(common_id).await?;

        if !common.is_common() {
            return Err(MealsServiceError::NotFound);
        }

        let now = Timestamp::now();

        let copy = MealRecord {
            idmeals: 0,
            restaurant_id: restaurant_id.to_string(),
            origine: Origin::Comune,
            created_at: now,
            updated_at: now,
            ..common
        };

        self.insert_with_next_id(copy).await
    }

    async fn update_meal(
        &self,
        id: u64,
        input: MealInput,
    ) -> Result<MealRecord, MealsServiceError> {
        let mut meal = self.meals.get_meal(id).await?;

        input.apply(&mut meal)?;
        meal.updated_at = Timestamp::now();

        self.meals.update_meal(&meal).await?;

        Ok(meal)
    }

    async fn delete_meal(&self, id: u64) -> Result<(), MealsServiceError> {
        self.meals.delete_meal(id, None).await?;

        info!(idmeals = id, "deleted meal");

        Ok(())
    }

    async fn delete_restaurant_meal(
        &self,
        restaurant_id: &str,
        id: u64,
    ) -> Result<(), MealsServiceError> {
        let restaurant_id = required_restaurant(restaurant_id)?;

        self.meals
            .delete_meal(id, Some(restaurant_id.to_string()))
            .await?;

        info!(idmeals = id, restaurant_id, "deleted restaurant meal");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait MealsService: Send + Sync {
    /// Meals matching the filter, ordered by `idmeals`.
    async fn list_meals(&self, filter: MealFilter) -> Result<Vec<MealRecord>, MealsServiceError>;

    /// The shared catalog of common dishes.
    async fn list_common_meals(&self) -> Result<Vec<MealRecord>, MealsServiceError>;

    async fn get_meal(&self, id: u64) -> Result<MealRecord, MealsServiceError>;

    /// Create a meal under the next free catalog-wide id.
    async fn create_meal(&self, input: MealInput) -> Result<MealRecord, MealsServiceError>;

    /// Copy a common dish into a restaurant's menu as an independent record.
    async fn import_common_meal(
        &self,
        restaurant_id: &str,
        common_id: u64,
    ) -> Result<MealRecord, MealsServiceError>;

    /// Merge `input` into an existing meal.
    async fn update_meal(&self, id: u64, input: MealInput)
    -> Result<MealRecord, MealsServiceError>;

    /// Delete a meal by id alone.
    async fn delete_meal(&self, id: u64) -> Result<(), MealsServiceError>;

    /// Delete a meal only when `restaurant_id` owns it.
    async fn delete_restaurant_meal(
        &self,
        restaurant_id: &str,
        id: u64,
    ) -> Result<(), MealsServiceError>;
}
