//! List Orders Handler

use std::sync::Arc;

use salvo::prelude::*;

use forchetta_app::domain::orders::data::OrderFilter;

use crate::{
    extensions::*,
    orders::{errors::into_status_error, models::OrderResponse},
    state::State,
};

/// List Orders Handler
///
/// Newest first. A restaurant view includes older orders whose dishes are on its menu.
#[endpoint(
    tags("orders"),
    summary = "List Orders",
    parameters(
        ("customerId" = Option<String>, Query, description = "Placing customer"),
        ("restaurantId" = Option<String>, Query, description = "Fulfilling restaurant"),
    ),
)]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<Vec<OrderResponse>>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let filter = OrderFilter {
        customer_id: req.query::<String>("customerId"),
        restaurant_id: req.query::<String>("restaurantId"),
    };

    let orders = state
        .app
        .orders
        .list_orders(filter)
        .await
        .map_err(into_status_error)?;

    Ok(Json(orders.into_iter().map(OrderResponse::from).collect()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use forchetta_app::domain::orders::status::OrderStatus;

    use crate::{
        orders::models::tests::make_order,
        test_helpers::{Mocks, service},
    };

    use super::*;

    #[tokio::test]
    async fn test_restaurant_filter_is_forwarded() -> TestResult {
        let mut mocks = Mocks::new();

        mocks
            .orders
            .expect_list_orders()
            .once()
            .withf(|filter| {
                *filter
                    == OrderFilter {
                        customer_id: None,
                        restaurant_id: Some("r_1".to_string()),
                    }
            })
            .return_once(|_| {
                Ok(vec![
                    make_order(2, OrderStatus::Ordinato),
                    make_order(1, OrderStatus::Consegnato),
                ])
            });

        let mut res = TestClient::get("http://example.com/orders?restaurantId=r_1")
            .send(&service(mocks, Router::with_path("orders").get(handler)))
            .await;

        let body: Vec<OrderResponse> = res.take_json().await?;
        let ids: Vec<u64> = body.iter().map(|order| order.id).collect();

        assert_eq!(ids, vec![2, 1]);

        Ok(())
    }
}
