//! Restaurants service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    domain::restaurants::{
        data::{RestaurantDetails, RestaurantFilter},
        errors::RestaurantsServiceError,
        records::RestaurantRecord,
        repositories::RestaurantsRepository,
    },
    store::StoreError,
};

#[derive(Clone)]
pub struct StoreRestaurantsService {
    restaurants: Arc<dyn RestaurantsRepository>,
}

impl StoreRestaurantsService {
    #[must_use]
    pub fn new(restaurants: Arc<dyn RestaurantsRepository>) -> Self {
        Self { restaurants }
    }

    async fn insert(
        &self,
        restaurant_id: String,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let restaurant = details
            .into_record(restaurant_id, Timestamp::now())
            .ok_or_else(|| RestaurantsServiceError::Validation("nome is required".to_string()))?;

        self.restaurants.insert_restaurant(&restaurant).await?;

        info!(restaurant_id = %restaurant.restaurant_id, "created restaurant");

        Ok(restaurant)
    }

    async fn merge(
        &self,
        mut restaurant: RestaurantRecord,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        if details
            .restaurant_id
            .as_ref()
            .is_some_and(|id| *id != restaurant.restaurant_id)
        {
            return Err(RestaurantsServiceError::Validation(
                "restaurantId cannot be changed".to_string(),
            ));
        }

        details.apply(&mut restaurant);
        restaurant.updated_at = Timestamp::now();

        self.restaurants.update_restaurant(&restaurant).await?;

        Ok(restaurant)
    }
}

/// Time-based identifier for restaurants created without one.
fn generated_restaurant_id(now: Timestamp) -> String {
    format!("r{}", now.as_millisecond())
}

#[async_trait]
impl RestaurantsService for StoreRestaurantsService {
    async fn list_restaurants(
        &self,
        filter: RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, RestaurantsServiceError> {
        Ok(self.restaurants.list_restaurants(&filter).await?)
    }

    async fn get_restaurant(
        &self,
        restaurant_id: &str,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        Ok(self.restaurants.get_restaurant(restaurant_id).await?)
    }

    async fn create_restaurant(
        &self,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let restaurant_id = details
            .restaurant_id
            .clone()
            .unwrap_or_else(|| generated_restaurant_id(Timestamp::now()));

        self.insert(restaurant_id, details).await
    }

    async fn update_restaurant(
        &self,
        restaurant_id: &str,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        let restaurant = self.restaurants.get_restaurant(restaurant_id).await?;

        self.merge(restaurant, details).await
    }

    async fn upsert_restaurant(
        &self,
        restaurant_id: &str,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError> {
        match self.restaurants.get_restaurant(restaurant_id).await {
            Ok(restaurant) => self.merge(restaurant, details).await,
            Err(StoreError::NotFound) => {
                let details = RestaurantDetails {
                    restaurant_id: None,
                    ..details
                };

                self.insert(restaurant_id.to_string(), details).await
            }
            Err(error) => Err(error.into()),
        }
    }

    async fn delete_restaurant(&self, restaurant_id: &str) -> Result<(), RestaurantsServiceError> {
        self.restaurants.delete_restaurant(restaurant_id).await?;

        info!(restaurant_id, "deleted restaurant");

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait RestaurantsService: Send + Sync {
    async fn list_restaurants(
        &self,
        filter: RestaurantFilter,
    ) -> Result<Vec<RestaurantRecord>, RestaurantsServiceError>;

    async fn get_restaurant(
        &self,
        restaurant_id: &str,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Create a restaurant, generating `r<unix millis>` when no id is supplied.
    async fn create_restaurant(
        &self,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Merge `details` into an existing restaurant.
    async fn update_restaurant(
        &self,
        restaurant_id: &str,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    /// Merge into the restaurant when it exists, create it under `restaurant_id` otherwise.
    async fn upsert_restaurant(
        &self,
        restaurant_id: &str,
        details: RestaurantDetails,
    ) -> Result<RestaurantRecord, RestaurantsServiceError>;

    async fn delete_restaurant(&self, restaurant_id: &str) -> Result<(), RestaurantsServiceError>;
}
