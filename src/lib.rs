//! vivirag: RAG search agent for the Vivi IA SIAPE knowledge base
//!
//! The pipeline is strictly linear per question: semantic retrieval from a
//! Pinecone index, deterministic cleaning and context assembly, one Gemini
//! call writing the answer in the Vivi IA persona. An axum service shell
//! exposes the agent over HTTP with health and diagnostics probes.
//!
//! # Examples
//!
//! ```rust,no_run
//! use vivirag::config::AppConfig;
//! use vivirag::config::Credentials;
//! use vivirag::RagAgent;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = AppConfig::load()?;
//!     let credentials = Credentials::from_env()?;
//!     let agent = RagAgent::new(&config, &credentials).await?;
//!
//!     let resposta = agent.answer("Como funciona o SIAPE?").await;
//!     println!("{resposta}");
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod api;
pub mod compose;
pub mod config;
pub mod errors;
pub mod llm;
pub mod logging;
pub mod retrieval;

pub use agent::RagAgent;
pub use config::AppConfig;
pub use config::Credentials;
pub use errors::*;
