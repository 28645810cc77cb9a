//! Orders service.

use std::sync::Arc;

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use rust_decimal::Decimal;
use rustc_hash::FxHashSet;
use tracing::{debug, info};

use crate::{
    domain::{
        meals::{
            data::{MAX_PRICE, MealFilter},
            repositories::MealsRepository,
        },
        orders::{
            data::{NewOrder, OrderFilter, OrderLine},
            errors::OrdersServiceError,
            records::{Fulfillment, OrderItem, OrderRecord},
            repositories::OrdersRepository,
            status::OrderStatus,
        },
    },
    store::{NEXT_ID_ATTEMPTS, StoreError},
};

#[derive(Clone)]
pub struct StoreOrdersService {
    orders: Arc<dyn OrdersRepository>,
    meals: Arc<dyn MealsRepository>,
}

impl StoreOrdersService {
    #[must_use]
    pub fn new(orders: Arc<dyn OrdersRepository>, meals: Arc<dyn MealsRepository>) -> Self {
        Self { orders, meals }
    }

    async fn insert_with_next_id(
        &self,
        mut order: OrderRecord,
    ) -> Result<OrderRecord, OrdersServiceError> {
        for attempt in 1..=NEXT_ID_ATTEMPTS {
            order.id = self
                .orders
                .max_order_id()
                .await?
                .checked_add(1)
                .ok_or(OrdersServiceError::Conflict)?;

            match self.orders.insert_order(&order).await {
                Ok(()) => return Ok(order),
                Err(StoreError::Duplicate) => {
                    debug!(attempt, id = order.id, "order id already taken, retrying");
                }
                Err(error) => return Err(error.into()),
            }
        }

        Err(OrdersServiceError::Conflict)
    }

    async fn set_status(
        &self,
        order: OrderRecord,
        next: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let updated = self
            .orders
            .compare_and_set_status(order.id, order.status, next)
            .await?
            .ok_or(OrdersServiceError::Conflict)?;

        info!(
            id = updated.id,
            from = %order.status,
            to = %updated.status,
            "order status changed"
        );

        Ok(updated)
    }

    async fn menu(&self, restaurant_id: &str) -> Result<FxHashSet<u64>, OrdersServiceError> {
        Ok(self
            .meals
            .list_meals(&MealFilter::for_restaurant(restaurant_id))
            .await?
            .into_iter()
            .map(|meal| meal.idmeals)
            .collect())
    }

    /// Whether `order` belongs to `restaurant_id`.
    ///
    /// Orders carrying a restaurant id are matched on it. Older orders are attributed when one
    /// of their items is still on the restaurant's menu.
    fn attributed_to(order: &OrderRecord, restaurant_id: &str, menu: &FxHashSet<u64>) -> bool {
        match &order.restaurant_id {
            Some(owner) => owner == restaurant_id,
            None => order
                .items
                .iter()
                .filter_map(|item| item.meal_id)
                .any(|meal_id| menu.contains(&meal_id)),
        }
    }
}

fn validate_lines(lines: &[OrderLine]) -> Result<Vec<&OrderLine>, OrdersServiceError> {
    let lines: Vec<_> = lines.iter().filter(|line| line.qty > 0).collect();

    if lines.is_empty() {
        return Err(OrdersServiceError::EmptyCart);
    }

    for line in &lines {
        if line.name.trim().is_empty() {
            return Err(OrdersServiceError::Validation(
                "every item needs a name".to_string(),
            ));
        }

        if line.unit_price.is_sign_negative() && !line.unit_price.is_zero() {
            return Err(OrdersServiceError::Validation(format!(
                "{} has a negative price",
                line.name
            )));
        }

        if line.unit_price > MAX_PRICE {
            return Err(OrdersServiceError::Validation(format!(
                "{} costs more than {MAX_PRICE}",
                line.name
            )));
        }
    }

    Ok(lines)
}

fn order_total(items: &[OrderItem]) -> Result<Decimal, OrdersServiceError> {
    items
        .iter()
        .try_fold(Decimal::ZERO, |total, item| {
            item.line_total().and_then(|line| total.checked_add(line))
        })
        .ok_or_else(|| OrdersServiceError::Validation("order total is too large".to_string()))
}

/// Restaurant shared by every line, if there is exactly one.
fn common_restaurant(lines: &[&OrderLine]) -> Option<String> {
    let mut restaurants = lines.iter().map(|line| line.restaurant_id.as_deref());
    let first = restaurants.next()??;

    restaurants
        .all(|restaurant| restaurant == Some(first))
        .then(|| first.to_string())
}

#[async_trait]
impl OrdersService for StoreOrdersService {
    async fn list_orders(&self, filter: OrderFilter) -> Result<Vec<OrderRecord>, OrdersServiceError> {
        let orders = self.orders.list_orders(filter.customer_id).await?;

        let Some(restaurant_id) = filter.restaurant_id else {
            return Ok(orders);
        };

        let menu = self.menu(&restaurant_id).await?;

        Ok(orders
            .into_iter()
            .filter(|order| Self::attributed_to(order, &restaurant_id, &menu))
            .collect())
    }

    async fn get_order(&self, id: u64) -> Result<OrderRecord, OrdersServiceError> {
        Ok(self.orders.get_order(id).await?)
    }

    async fn order_belongs_to(
        &self,
        order: &OrderRecord,
        restaurant_id: &str,
    ) -> Result<bool, OrdersServiceError> {
        let menu = if order.restaurant_id.is_some() {
            FxHashSet::default()
        } else {
            self.menu(restaurant_id).await?
        };

        Ok(Self::attributed_to(order, restaurant_id, &menu))
    }

    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError> {
        let customer_id = order.customer_id.trim();

        if customer_id.is_empty() {
            return Err(OrdersServiceError::Validation(
                "customerId is required".to_string(),
            ));
        }

        if let Fulfillment::Consegna { indirizzo } = &order.fulfillment
            && indirizzo.trim().is_empty()
        {
            return Err(OrdersServiceError::Validation(
                "delivery needs an address".to_string(),
            ));
        }

        let lines = validate_lines(&order.lines)?;
        let items: Vec<OrderItem> = lines.iter().map(|line| OrderItem::from(*line)).collect();
        let total = order_total(&items)?;

        let record = OrderRecord {
            id: 0,
            customer_id: customer_id.to_string(),
            restaurant_id: common_restaurant(&lines),
            items,
            total,
            status: OrderStatus::Ordinato,
            fulfillment: order.fulfillment,
            created_at: Timestamp::now(),
        };

        let created = self.insert_with_next_id(record).await?;

        info!(
            id = created.id,
            customer_id = %created.customer_id,
            total = %created.total,
            "order placed"
        );

        Ok(created)
    }

    async fn advance_status(&self, id: u64) -> Result<OrderRecord, OrdersServiceError> {
        let order = self.orders.get_order(id).await?;
        let next = order.status.advance()?;

        self.set_status(order, next).await
    }

    async fn cancel_order(&self, id: u64) -> Result<OrderRecord, OrdersServiceError> {
        self.transition_to(id, OrderStatus::Annullato).await
    }

    async fn transition_to(
        &self,
        id: u64,
        target: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError> {
        let order = self.orders.get_order(id).await?;
        let next = order.status.transition(target)?;

        self.set_status(order, next).await
    }
}

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Orders matching the filter, newest first.
    async fn list_orders(&self, filter: OrderFilter)
    -> Result<Vec<OrderRecord>, OrdersServiceError>;

    async fn get_order(&self, id: u64) -> Result<OrderRecord, OrdersServiceError>;

    /// Whether `order` is attributed to `restaurant_id`, as in restaurant listings.
    async fn order_belongs_to(
        &self,
        order: &OrderRecord,
        restaurant_id: &str,
    ) -> Result<bool, OrdersServiceError>;

    /// Snapshot checkout lines into a new `ordinato` order.
    async fn create_order(&self, order: NewOrder) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order to the next status in the forward sequence.
    async fn advance_status(&self, id: u64) -> Result<OrderRecord, OrdersServiceError>;

    /// Cancel an order that has not reached a terminal status.
    async fn cancel_order(&self, id: u64) -> Result<OrderRecord, OrdersServiceError>;

    /// Move an order to `target`, which must be its successor or `annullato`.
    async fn transition_to(
        &self,
        id: u64,
        target: OrderStatus,
    ) -> Result<OrderRecord, OrdersServiceError>;
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use testresult::TestResult;

    use super::*;
    use crate::{
        domain::{
            meals::data::MealInput,
            orders::repositories::MockOrdersRepository,
        },
        test::TestContext,
    };

    fn line(meal_id: u64, price: Decimal, qty: u32, restaurant: &str) -> OrderLine {
        OrderLine {
            meal_id: Some(meal_id),
            name: format!("piatto {meal_id}"),
            qty,
            unit_price: price,
            restaurant_id: Some(restaurant.to_string()),
        }
    }

    fn new_order(lines: Vec<OrderLine>) -> NewOrder {
        NewOrder {
            customer_id: "cliente-1".to_string(),
            lines,
            fulfillment: Fulfillment::Ritiro,
        }
    }

    #[tokio::test]
    async fn empty_cart_is_rejected() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx.orders.create_order(new_order(Vec::new())).await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );

        let result = ctx
            .orders
            .create_order(new_order(vec![line(1, Decimal::ONE, 0, "r_1")]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::EmptyCart)),
            "expected EmptyCart, got {result:?}"
        );
        assert!(ctx.orders.list_orders(OrderFilter::default()).await?.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn create_snapshots_lines_and_total() -> TestResult {
        let ctx = TestContext::new().await?;

        let first = ctx
            .orders
            .create_order(new_order(vec![
                line(1, Decimal::new(950, 2), 2, "r_1"),
                line(2, Decimal::new(3, 0), 1, "r_1"),
            ]))
            .await?;

        let second = ctx
            .orders
            .create_order(new_order(vec![line(1, Decimal::ONE, 1, "r_1")]))
            .await?;

        assert_eq!(first.id, 1);
        assert_eq!(second.id, 2);
        assert_eq!(first.total, Decimal::new(22, 0));
        assert_eq!(first.status, OrderStatus::Ordinato);
        assert_eq!(first.restaurant_id.as_deref(), Some("r_1"));
        assert_eq!(first.items.len(), 2);
        assert_eq!(ctx.orders.get_order(first.id).await?, first);

        Ok(())
    }

    #[tokio::test]
    async fn mixed_restaurants_leave_attribution_empty() -> TestResult {
        let ctx = TestContext::new().await?;

        let order = ctx
            .orders
            .create_order(new_order(vec![
                line(1, Decimal::ONE, 1, "r_1"),
                line(2, Decimal::ONE, 1, "r_2"),
            ]))
            .await?;

        assert_eq!(order.restaurant_id, None);

        Ok(())
    }

    #[tokio::test]
    async fn delivery_requires_an_address() -> TestResult {
        let ctx = TestContext::new().await?;

        let result = ctx
            .orders
            .create_order(NewOrder {
                fulfillment: Fulfillment::Consegna {
                    indirizzo: " ".to_string(),
                },
                ..new_order(vec![line(1, Decimal::ONE, 1, "r_1")])
            })
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn advance_walks_the_sequence_then_stops() -> TestResult {
        let ctx = TestContext::new().await?;

        let order = ctx
            .orders
            .create_order(new_order(vec![line(1, Decimal::ONE, 1, "r_1")]))
            .await?;

        let mut statuses = Vec::new();

        for _ in 0..3 {
            statuses.push(ctx.orders.advance_status(order.id).await?.status);
        }

        assert_eq!(
            statuses,
            [
                OrderStatus::Preparazione,
                OrderStatus::Consegna,
                OrderStatus::Consegnato
            ]
        );

        let result = ctx.orders.advance_status(order.id).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::TerminalState(OrderStatus::Consegnato))
            ),
            "expected TerminalState, got {result:?}"
        );
        assert_eq!(
            ctx.orders.get_order(order.id).await?.status,
            OrderStatus::Consegnato
        );

        Ok(())
    }

    #[tokio::test]
    async fn cancelled_orders_are_terminal() -> TestResult {
        let ctx = TestContext::new().await?;

        let order = ctx
            .orders
            .create_order(new_order(vec![line(1, Decimal::ONE, 1, "r_1")]))
            .await?;

        ctx.orders.advance_status(order.id).await?;

        let cancelled = ctx.orders.cancel_order(order.id).await?;

        assert_eq!(cancelled.status, OrderStatus::Annullato);

        let result = ctx.orders.advance_status(order.id).await;

        assert!(
            matches!(
                result,
                Err(OrdersServiceError::TerminalState(OrderStatus::Annullato))
            ),
            "expected TerminalState, got {result:?}"
        );
        assert_eq!(
            ctx.orders.get_order(order.id).await?.status,
            OrderStatus::Annullato
        );

        Ok(())
    }

    #[tokio::test]
    async fn transition_rejects_skipping_ahead() -> TestResult {
        let ctx = TestContext::new().await?;

        let order = ctx
            .orders
            .create_order(new_order(vec![line(1, Decimal::ONE, 1, "r_1")]))
            .await?;

        let result = ctx
            .orders
            .transition_to(order.id, OrderStatus::Consegnato)
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::InvalidTransition { .. })),
            "expected InvalidTransition, got {result:?}"
        );

        let moved = ctx
            .orders
            .transition_to(order.id, OrderStatus::Preparazione)
            .await?;

        assert_eq!(moved.status, OrderStatus::Preparazione);

        Ok(())
    }

    #[tokio::test]
    async fn lost_status_race_is_conflict() -> TestResult {
        let mut orders = MockOrdersRepository::new();

        orders.expect_get_order().returning(|id| {
            Ok(OrderRecord {
                id,
                customer_id: "cliente-1".to_string(),
                restaurant_id: None,
                items: Vec::new(),
                total: Decimal::ZERO,
                status: OrderStatus::Ordinato,
                fulfillment: Fulfillment::Ritiro,
                created_at: Timestamp::now(),
            })
        });

        orders
            .expect_compare_and_set_status()
            .returning(|_, _, _| Ok(None));

        let meals = crate::domain::meals::repositories::MockMealsRepository::new();
        let service = StoreOrdersService::new(Arc::new(orders), Arc::new(meals));

        let result = service.advance_status(7).await;

        assert!(
            matches!(result, Err(OrdersServiceError::Conflict)),
            "expected Conflict, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn restaurant_view_uses_stored_id_then_menu() -> TestResult {
        let ctx = TestContext::new().await?;

        let meal = ctx
            .meals
            .create_meal(MealInput::from_json(&json!({
                "restaurantId": "r_1",
                "nome": "Pizza",
                "prezzo": 9,
            }))?)
            .await?;

        let stored = ctx
            .orders
            .create_order(new_order(vec![line(500, Decimal::ONE, 1, "r_1")]))
            .await?;

        let legacy = OrderRecord {
            id: 90,
            customer_id: "cliente-2".to_string(),
            restaurant_id: None,
            items: vec![OrderItem {
                meal_id: Some(meal.idmeals),
                name: "Pizza".to_string(),
                qty: 1,
                unit_price: Decimal::new(9, 0),
            }],
            total: Decimal::new(9, 0),
            status: OrderStatus::Ordinato,
            fulfillment: Fulfillment::Ritiro,
            created_at: Timestamp::now(),
        };

        ctx.repositories.orders.insert_order(&legacy).await?;

        ctx.orders
            .create_order(new_order(vec![line(meal.idmeals, Decimal::ONE, 1, "r_2")]))
            .await?;

        let ids: Vec<u64> = ctx
            .orders
            .list_orders(OrderFilter {
                customer_id: None,
                restaurant_id: Some("r_1".to_string()),
            })
            .await?
            .iter()
            .map(|order| order.id)
            .collect();

        assert_eq!(ids, [legacy.id, stored.id]);

        let mine = ctx
            .orders
            .list_orders(OrderFilter {
                customer_id: Some("cliente-2".to_string()),
                restaurant_id: None,
            })
            .await?;

        assert_eq!(mine.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn overpriced_lines_are_rejected() -> TestResult {
        let ctx = TestContext::new().await?;

        let huge = Decimal::from_i128_with_scale(10_000_000_000_000_000_000_000_000_000, 0);

        let result = ctx
            .orders
            .create_order(new_order(vec![line(1, huge, 10, "r_1")]))
            .await;

        assert!(
            matches!(result, Err(OrdersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
        assert!(ctx.orders.list_orders(OrderFilter::default()).await?.is_empty());

        Ok(())
    }

    #[test]
    fn overflowing_total_is_validation() {
        let item = OrderItem {
            meal_id: Some(1),
            name: "Pizza".to_string(),
            qty: 10,
            unit_price: Decimal::MAX,
        };

        assert_eq!(item.line_total(), None);

        let result = order_total(&[
            OrderItem {
                qty: 1,
                ..item.clone()
            },
            OrderItem { qty: 1, ..item },
        ]);

        assert!(
            matches!(result, Err(OrdersServiceError::Validation(_))),
            "expected Validation, got {result:?}"
        );
    }

    #[tokio::test]
    async fn attribution_matches_stored_id_or_menu() -> TestResult {
        let ctx = TestContext::new().await?;

        let meal = ctx
            .meals
            .create_meal(MealInput::from_json(&json!({
                "restaurantId": "r_1",
                "nome": "Pizza",
                "prezzo": 9,
            }))?)
            .await?;

        let stored = ctx
            .orders
            .create_order(new_order(vec![line(500, Decimal::ONE, 1, "r_1")]))
            .await?;

        let legacy = OrderRecord {
            restaurant_id: None,
            items: vec![OrderItem {
                meal_id: Some(meal.idmeals),
                name: "Pizza".to_string(),
                qty: 1,
                unit_price: Decimal::new(9, 0),
            }],
            ..stored.clone()
        };

        assert!(ctx.orders.order_belongs_to(&stored, "r_1").await?);
        assert!(!ctx.orders.order_belongs_to(&stored, "r_2").await?);
        assert!(ctx.orders.order_belongs_to(&legacy, "r_1").await?);
        assert!(!ctx.orders.order_belongs_to(&legacy, "r_2").await?);

        Ok(())
    }
}
