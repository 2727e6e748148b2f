pub mod handlers;
pub mod middleware;
pub mod state;

pub use middleware::AuthenticatedUser;
pub use state::AppState;
