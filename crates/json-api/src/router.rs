//! App Router

use salvo::Router;

use crate::{auth, healthcheck, meals, orders, restaurants, users};

/// Every API route. Owner-only routes sit behind the auth gates; the rest are open.
pub(crate) fn app_router() -> Router {
    Router::new()
        .push(Router::with_path("health").get(healthcheck::handler))
        .push(Router::with_path("login").post(users::login::handler))
        .push(
            Router::with_path("users")
                .push(Router::with_path("register").post(users::register::handler))
                .push(Router::with_path("login").post(users::login::handler))
                .push(
                    Router::with_path("{id}")
                        .hoop(auth::middleware::handler)
                        .put(users::profile::handler),
                ),
        )
        .push(
            Router::with_path("meals")
                .get(meals::index::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .hoop(auth::middleware::owner)
                        .post(meals::create::handler),
                )
                .push(
                    Router::with_path("common-meals")
                        .get(meals::common::handler)
                        .push(
                            Router::with_path("{id}/import")
                                .hoop(auth::middleware::handler)
                                .hoop(auth::middleware::owner)
                                .post(meals::import::handler),
                        ),
                )
                .push(
                    Router::with_path("{id}").get(meals::get::handler).push(
                        Router::new()
                            .hoop(auth::middleware::handler)
                            .hoop(auth::middleware::owner)
                            .put(meals::update::handler)
                            .delete(meals::delete::handler),
                    ),
                )
                .push(
                    Router::with_path("{restaurant}/{id}")
                        .hoop(auth::middleware::handler)
                        .hoop(auth::middleware::owner)
                        .delete(meals::delete_scoped::handler),
                ),
        )
        .push(
            Router::with_path("restaurant")
                .get(restaurants::index::handler)
                .post(restaurants::create::handler)
                .push(
                    Router::new()
                        .hoop(auth::middleware::handler)
                        .hoop(auth::middleware::owner)
                        .put(restaurants::upsert::handler),
                )
                .push(
                    Router::with_path("{id}").get(restaurants::get::handler).push(
                        Router::new()
                            .hoop(auth::middleware::handler)
                            .hoop(auth::middleware::owner)
                            .put(restaurants::update::handler)
                            .delete(restaurants::delete::handler),
                    ),
                ),
        )
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .post(orders::create::handler)
                .push(Router::with_path("{id}").get(orders::get::handler))
                .push(
                    Router::with_path("{id}")
                        .hoop(auth::middleware::handler)
                        .hoop(auth::middleware::owner)
                        .put(orders::update::handler),
                ),
        )
}
