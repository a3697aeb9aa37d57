//! # Restful
//!
//! Maps plain controller types onto RESTful JSON routes for axum.
//!
//! A controller declares which capabilities it supports and the router wires
//! each one to its HTTP method and path:
//!
//! | Capability  | Route                   | Controller call            |
//! |-------------|-------------------------|----------------------------|
//! | [`Indexer`] | `GET /resource`         | `index()`                  |
//! | [`Shower`]  | `GET /resource/{id}`    | `show(id)`                 |
//! | [`Creator`] | `POST /resource`        | `create(&mut element)`     |
//! | [`Updater`] | `PUT /resource/{id}`    | `update(id, &mut element)` |
//! | [`Deleter`] | `DELETE /resource/{id}` | `delete(id)`               |
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use restful::prelude::*;
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Clone, Serialize, Deserialize)]
//! pub struct Product {
//!     name: String,
//!     price: f64,
//! }
//!
//! // 1. Declare the capabilities
//! #[derive(Controller)]
//! #[controller(index)]
//! pub struct ProductController;
//!
//! impl Resource for ProductController {
//!     type Element = Product;
//! }
//!
//! // 2. Implement them
//! #[async_trait]
//! impl Indexer for ProductController {
//!     async fn index(&self) -> ControllerResult<Vec<Product>> {
//!         Ok(vec![])
//!     }
//! }
//!
//! // 3. Mount and serve
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut router = Router::new();
//!     router.handle_resource("/products", Arc::new(ProductController))?;
//!
//!     let config = ServerConfig::from_config(&ConfigService::new())?;
//!     restful::server::serve(router, &config).await?;
//!     Ok(())
//! }
//! ```

// Lets `#[derive(Controller)]` expand to `::restful::...` inside this crate.
extern crate self as restful;

pub mod common;
pub mod config;
pub mod controller;
pub mod error;
pub mod exception;
pub mod handler;
pub mod router;
pub mod server;

// Re-export core types
pub use config::{ConfigService, ServerConfig};
pub use controller::{
    Capability, Controller, ControllerError, ControllerResult, Creator, Deleter, Indexer,
    JsonElement, Resource, Shower, Updater,
};
pub use error::{RestfulError, Result};
pub use exception::{ErrorKind, HandlerError};
pub use router::{Route, Router};

// Re-export macros
pub use restful_macro::Controller;

// Re-export commonly used types from dependencies
pub use async_trait::async_trait;
pub use axum;

/// Prelude module for convenient imports
///
/// ```
/// use restful::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::{ConfigService, ServerConfig};
    pub use crate::Controller;
    pub use crate::controller::{
        ControllerError, ControllerResult, Creator, Deleter, Indexer, Resource, Shower, Updater,
    };
    pub use crate::error::{RestfulError, Result};
    pub use crate::router::Router;
    pub use async_trait::async_trait;
    pub use std::sync::Arc;
}
