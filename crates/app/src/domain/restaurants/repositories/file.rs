//! JSON-file restaurants repository.

use async_trait::async_trait;

use crate::{
    domain::restaurants::{
        data::RestaurantFilter, records::RestaurantRecord, repositories::RestaurantsRepository,
    },
    store::{JsonCollection, JsonFileStore, StoreError},
};

#[derive(Debug, Clone)]
pub struct FileRestaurantsRepository {
    restaurants: JsonCollection<RestaurantRecord>,
}

impl FileRestaurantsRepository {
    #[must_use]
    pub fn new(store: &JsonFileStore) -> Self {
        Self {
            restaurants: store.collection("restaurants"),
        }
    }
}

fn same_partita_iva(existing: &RestaurantRecord, candidate: &RestaurantRecord) -> bool {
    existing.restaurant_id != candidate.restaurant_id
        && existing.partita_iva.is_some()
        && existing.partita_iva == candidate.partita_iva
}

#[async_trait]
impl RestaurantsRepository for FileRestaurantsRepository {
    async fn list_restaurants(
        &self,
        filter: &RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, StoreError> {
        let mut restaurants: Vec<_> = self
            .restaurants
            .load()
            .await?
            .into_iter()
            .filter(|restaurant| filter.matches(restaurant))
            .collect();

        restaurants.sort_by(|a, b| {
            a.nome
                .cmp(&b.nome)
                .then_with(|| a.restaurant_id.cmp(&b.restaurant_id))
        });

        Ok(restaurants)
    }

    async fn get_restaurant(&self, restaurant_id: &str) -> Result<RestaurantRecord, StoreError> {
        self.restaurants
            .load()
            .await?
            .into_iter()
            .find(|restaurant| restaurant.restaurant_id == restaurant_id)
            .ok_or(StoreError::NotFound)
    }

    async fn insert_restaurant(&self, restaurant: &RestaurantRecord) -> Result<(), StoreError> {
        let mut restaurants = self.restaurants.load().await?;

        if restaurants.iter().any(|existing| {
            existing.restaurant_id == restaurant.restaurant_id
                || same_partita_iva(existing, restaurant)
        }) {
            return Err(StoreError::Duplicate);
        }

        restaurants.push(restaurant.clone());

        self.restaurants.save(&restaurants).await
    }

    async fn update_restaurant(&self, restaurant: &RestaurantRecord) -> Result<(), StoreError> {
        let mut restaurants = self.restaurants.load().await?;

        if restaurants
            .iter()
            .any(|existing| same_partita_iva(existing, restaurant))
        {
            return Err(StoreError::Duplicate);
        }

        let existing = restaurants
            .iter_mut()
            .find(|existing| existing.restaurant_id == restaurant.restaurant_id)
            .ok_or(StoreError::NotFound)?;

        *existing = restaurant.clone();

        self.restaurants.save(&restaurants).await
    }

    async fn delete_restaurant(&self, restaurant_id: &str) -> Result<(), StoreError> {
        let mut restaurants = self.restaurants.load().await?;
        let before = restaurants.len();

        restaurants.retain(|restaurant| restaurant.restaurant_id != restaurant_id);

        if restaurants.len() == before {
            return Err(StoreError::NotFound);
        }

        self.restaurants.save(&restaurants).await
    }
}
