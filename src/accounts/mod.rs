use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod error;
pub mod handlers;
mod password;
pub mod repo;
mod repo_types;
pub mod role;
pub mod store;

pub use repo::AccountRepository;
pub use store::PgAccountStore;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::account_routes())
}
