//! Capability traits implemented by controllers
//!
//! A controller is any type implementing [`Resource`] plus one or more of
//! [`Indexer`], [`Shower`], [`Creator`], [`Updater`] and [`Deleter`]. The
//! [`Controller`] trait tells the router which of those it supports; it is
//! normally derived:
//!
//! ```rust,ignore
//! #[derive(Controller)]
//! #[controller(index, show)]
//! pub struct ProductController {
//!     store: DashMap<String, Product>,
//! }
//!
//! impl Resource for ProductController {
//!     type Element = Product;
//! }
//!
//! #[async_trait]
//! impl Indexer for ProductController {
//!     async fn index(&self) -> ControllerResult<Vec<Product>> {
//!         Ok(self.store.iter().map(|entry| entry.value().clone()).collect())
//!     }
//! }
//! ```

use async_trait::async_trait;
use axum::http::Method;
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use strum_macros::{Display, EnumIter};
use thiserror::Error;

/// Result type returned by controller methods
pub type ControllerResult<T> = std::result::Result<T, ControllerError>;

/// Failure reported by a controller
#[derive(Debug, Error)]
pub enum ControllerError {
    /// No element exists under the given id
    #[error("no element with id `{0}`")]
    NotFound(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ControllerError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn failed(error: impl Into<anyhow::Error>) -> Self {
        Self::Other(error.into())
    }
}

/// Anything a controller can hand to the router
pub trait JsonElement: Serialize + DeserializeOwned + Send + Sync + 'static {}

impl<T> JsonElement for T where T: Serialize + DeserializeOwned + Send + Sync + 'static {}

/// Base trait of every controller
///
/// `Element` is the domain object the controller serves. The router only
/// ever serializes and deserializes it as JSON.
pub trait Resource: Send + Sync + 'static {
    type Element: JsonElement;
}

/// Lists every element (`GET /resource`)
#[async_trait]
pub trait Indexer: Resource {
    /// Returns an empty vector when there are no elements
    async fn index(&self) -> ControllerResult<Vec<Self::Element>>;
}

/// Fetches one element (`GET /resource/{id}`)
#[async_trait]
pub trait Shower: Resource {
    async fn show(&self, id: &str) -> ControllerResult<Self::Element>;
}

/// Creates an element from the request body (`POST /resource`)
#[async_trait]
pub trait Creator: Resource {
    /// Element the request body is decoded into
    ///
    /// When `Some`, fields missing from the body keep the template's values.
    fn template(&self) -> Option<Self::Element> {
        None
    }

    /// Stores the element and returns its new id
    ///
    /// Changes made to `element` are reflected in the response.
    async fn create(&self, element: &mut Self::Element) -> ControllerResult<String>;
}

/// Replaces an element from the request body (`PUT /resource/{id}`)
#[async_trait]
pub trait Updater: Resource {
    /// Element the request body is decoded into, see [`Creator::template`]
    fn template(&self) -> Option<Self::Element> {
        None
    }

    async fn update(&self, id: &str, element: &mut Self::Element) -> ControllerResult<()>;
}

/// Removes an element (`DELETE /resource/{id}`)
#[async_trait]
pub trait Deleter: Resource {
    /// Returns whether an element was removed
    async fn delete(&self, id: &str) -> ControllerResult<bool>;
}

/// Capability detection for the router
///
/// Each accessor returns `Some` when the controller implements the matching
/// capability trait. The router calls them once, at registration time.
/// Use `#[derive(Controller)]` rather than implementing this by hand.
pub trait Controller: Resource {
    fn as_indexer(self: Arc<Self>) -> Option<Arc<dyn Indexer<Element = Self::Element>>> {
        None
    }

    fn as_shower(self: Arc<Self>) -> Option<Arc<dyn Shower<Element = Self::Element>>> {
        None
    }

    fn as_creator(self: Arc<Self>) -> Option<Arc<dyn Creator<Element = Self::Element>>> {
        None
    }

    fn as_updater(self: Arc<Self>) -> Option<Arc<dyn Updater<Element = Self::Element>>> {
        None
    }

    fn as_deleter(self: Arc<Self>) -> Option<Arc<dyn Deleter<Element = Self::Element>>> {
        None
    }
}

/// The five capabilities, in registration order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, EnumIter)]
pub enum Capability {
    Indexer,
    Shower,
    Creator,
    Updater,
    Deleter,
}

impl Capability {
    /// HTTP method the capability is mounted on
    pub fn method(self) -> Method {
        match self {
            Capability::Indexer | Capability::Shower => Method::GET,
            Capability::Creator => Method::POST,
            Capability::Updater => Method::PUT,
            Capability::Deleter => Method::DELETE,
        }
    }

    /// Whether the capability is mounted on `path/{id}` rather than on `path`
    pub fn takes_id(self) -> bool {
        matches!(
            self,
            Capability::Shower | Capability::Updater | Capability::Deleter
        )
    }
}
