//! HTTP service shell for the RAG agent

pub mod handlers;
pub mod lifecycle;
pub mod routes;
pub mod server;
pub mod types;

pub use handlers::AppState;
pub use lifecycle::AgentHandle;
pub use server::serve_api;
