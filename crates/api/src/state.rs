/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// Configuration is consumed when the router is built, so only the pool is
/// needed per request. Cloning is cheap: the pool is reference-counted.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool. Handlers borrow a connection or open a
    /// transaction per operation; nothing is held across requests.
    pub pool: creatorhub_db::DbPool,
}
