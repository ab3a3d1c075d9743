//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods. Public
//! entry points take `&PgPool` and scope their own connection or
//! transaction; the `*_in_tx` / connection-level helpers let the creator
//! repository compose child-table statements inside one transaction.

pub mod creator_repo;
pub mod payment_method_repo;
pub mod portfolio_repo;
pub mod review_repo;
pub mod service_repo;

pub use creator_repo::CreatorRepo;
pub use payment_method_repo::PaymentMethodRepo;
pub use portfolio_repo::PortfolioRepo;
pub use review_repo::ReviewRepo;
pub use service_repo::ServiceRepo;
