//! JSON-file meals repository.

use async_trait::async_trait;

use crate::{
    domain::meals::{data::MealFilter, records::MealRecord, repositories::MealsRepository},
    store::{JsonCollection, JsonFileStore, StoreError},
};

#[derive(Debug, Clone)]
pub struct FileMealsRepository {
    meals: JsonCollection<MealRecord>,
}

impl FileMealsRepository {
    #[must_use]
    pub fn new(store: &JsonFileStore) -> Self {
        Self {
            meals: store.collection("meals"),
        }
    }
}

#[async_trait]
impl MealsRepository for FileMealsRepository {
    async fn list_meals(&self, filter: &MealFilter) -> Result<Vec<MealRecord>, StoreError> {
        let mut meals: Vec<_> = self
            .meals
            .load()
            .await?
            .into_iter()
            .filter(|meal| filter.matches(meal))
            .collect();

        meals.sort_by_key(|meal| meal.idmeals);

        Ok(meals)
    }

    async fn get_meal(&self, id: u64) -> Result<MealRecord, StoreError> {
        self.meals
            .load()
            .await?
            .into_iter()
            .find(|meal| meal.idmeals == id)
            .ok_or(StoreError::NotFound)
    }

    async fn max_meal_id(&self) -> Result<u64, StoreError> {
        Ok(self
            .meals
            .load()
            .await?
            .iter()
            .map(|meal| meal.idmeals)
            .max()
            .unwrap_or(0))
    }

    async fn insert_meal(&self, meal: &MealRecord) -> Result<(), StoreError> {
        let mut meals = self.meals.load().await?;

        if meals.iter().any(|existing| existing.idmeals == meal.idmeals) {
            return Err(StoreError::Duplicate);
        }

        meals.push(meal.clone());

        self.meals.save(&meals).await
    }

    async fn update_meal(&self, meal: &MealRecord) -> Result<(), StoreError> {
        let mut meals = self.meals.load().await?;

        let existing = meals
            .iter_mut()
            .find(|existing| existing.idmeals == meal.idmeals)
            .ok_or(StoreError::NotFound)?;

        *existing = meal.clone();

        self.meals.save(&meals).await
    }

    async fn delete_meal(&self, id: u64, restaurant_id: Option<String>) -> Result<(), StoreError> {
        let mut meals = self.meals.load().await?;
        let before = meals.len();

        meals.retain(|meal| {
            meal.idmeals != id
                || restaurant_id
                    .as_deref()
                    .is_some_and(|owner| meal.restaurant_id != owner)
        });

        if meals.len() == before {
            return Err(StoreError::NotFound);
        }

        self.meals.save(&meals).await
    }
}
