pub mod handlers;
pub mod library;
pub mod routes;

pub use routes::create_router;
