//! Per-entity route table. Paths are relative to the mount prefix (e.g. `/offices`).

use crate::handlers::entity::{create, delete, list, read, update};
use crate::repository::Repository;
use crate::routes::not_found;
use crate::schema::Entity;
use axum::{
    routing::{get, post},
    Router,
};

/// POST /create, GET /list, GET /get/:id, PUT|POST /update/:id, plus DELETE /delete/:id
/// for entities with hard delete enabled. A known path with the wrong method answers 404 like an unknown path.
pub fn resource_routes<E: Entity>(repo: Repository<E>) -> Router {
    let mut router = Router::new()
        .route("/create", post(create::<E>).fallback(not_found))
        .route("/list", get(list::<E>).fallback(not_found))
        .route("/get/:id", get(read::<E>).fallback(not_found))
        .route("/update/:id", post(update::<E>).put(update::<E>).fallback(not_found));
    if E::HARD_DELETE {
        router = router.route("/delete/:id", axum::routing::delete(delete::<E>).fallback(not_found));
    }
    router.with_state(repo)
}
