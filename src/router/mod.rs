//! Resource router
//!
//! [`Router`] keeps a dispatch table from `(method, path)` to the handlers
//! built in [`crate::handler`], and turns it into an [`axum::Router`] when
//! asked to serve.
//!
//! # Example
//! ```rust,ignore
//! let mut router = Router::new();
//! router
//!     .handle_resource("/products", Arc::new(ProductController::default()))?
//!     .handle_resource("/orders", Arc::new(OrderController::default()))?;
//!
//! let app = router.into_axum();
//! ```

use crate::controller::{Capability, Controller};
use crate::error::{RestfulError, Result};
use crate::exception::http::catch_panic_layer;
use crate::handler;
use axum::{
    body::Body,
    http::{Method, Request},
    response::Response,
    routing::MethodRouter,
};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::sync::{Arc, OnceLock};
use tower::ServiceExt;

/// One registered `(method, path)` pair
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Route {
    pub method: Method,
    pub path: String,
}

impl Route {
    fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.method, self.path)
    }
}

/// Routes HTTP requests to controllers registered as RESTful resources
#[derive(Default, Clone)]
pub struct Router {
    table: HashMap<Route, MethodRouter>,
    /// Built on first dispatch, dropped whenever the table changes
    app: OnceLock<axum::Router>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `controller` as the handler of the resource under `path`
    ///
    /// Capabilities are checked in the order Indexer, Shower, Creator,
    /// Updater, Deleter. Collection capabilities mount on `path`, the others
    /// on `path/{id}`. Registering the same route again replaces the previous
    /// handler.
    ///
    /// # Errors
    ///
    /// `InvalidPath` when `path` is not a valid mount point or its routes
    /// would clash with ones already registered, and `NoCapabilities` when the
    /// controller supports none of the five capabilities. The table is left
    /// unchanged in every case.
    pub fn handle_resource<C: Controller>(
        &mut self,
        path: &str,
        controller: Arc<C>,
    ) -> Result<&mut Self> {
        let (collection, item) = resource_paths(path)?;
        let mut mounted: Vec<(Capability, MethodRouter)> = Vec::new();

        if let Some(indexer) = Arc::clone(&controller).as_indexer() {
            mounted.push((Capability::Indexer, handler::index(indexer)));
        }
        if let Some(shower) = Arc::clone(&controller).as_shower() {
            mounted.push((Capability::Shower, handler::show(shower)));
        }
        if let Some(creator) = Arc::clone(&controller).as_creator() {
            mounted.push((Capability::Creator, handler::create(creator)));
        }
        if let Some(updater) = Arc::clone(&controller).as_updater() {
            mounted.push((Capability::Updater, handler::update(updater)));
        }
        if let Some(deleter) = controller.as_deleter() {
            mounted.push((Capability::Deleter, handler::delete(deleter)));
        }

        if mounted.is_empty() {
            let controller = std::any::type_name::<C>().to_string();
            tracing::error!(%controller, path, "Controller implements no REST capability");
            return Err(RestfulError::NoCapabilities { controller });
        }

        for (capability, _) in &mounted {
            let mount = if capability.takes_id() { &item } else { &collection };
            self.check_conflicts(path, mount)?;
        }

        self.app = OnceLock::new();
        for (capability, method_router) in mounted {
            let path = if capability.takes_id() { &item } else { &collection };
            let route = Route::new(capability.method(), path.as_str());
            tracing::debug!(%route, %capability, "Registered route");
            if self.table.insert(route.clone(), method_router).is_some() {
                tracing::warn!(%route, "Replaced previously registered handler");
            }
        }

        Ok(self)
    }

    /// Rejects `mount` when it captures a different parameter name than an
    /// already registered path at the same position after a shared prefix
    fn check_conflicts(&self, path: &str, mount: &str) -> Result<()> {
        for route in self.table.keys() {
            let clash = mount
                .split('/')
                .zip(route.path.split('/'))
                .find(|(ours, theirs)| ours != theirs)
                .filter(|(ours, theirs)| is_capture(ours) && is_capture(theirs));

            if let Some((ours, theirs)) = clash {
                tracing::error!(path, %route, "Route conflicts with a registered route");
                return Err(RestfulError::invalid_path(
                    path,
                    format!(
                        "`{}` captures `{}` where `{}` already captures `{}`",
                        mount, ours, route.path, theirs
                    ),
                ));
            }
        }
        Ok(())
    }

    /// Every registered route, sorted by path then method
    pub fn routes(&self) -> Vec<Route> {
        let mut routes: Vec<Route> = self.table.keys().cloned().collect();
        routes.sort_by(|a, b| {
            a.path
                .cmp(&b.path)
                .then_with(|| a.method.as_str().cmp(b.method.as_str()))
        });
        routes
    }

    /// Builds the axum router serving the dispatch table
    pub fn to_axum(&self) -> axum::Router {
        match self.app.get() {
            Some(app) => app.clone(),
            None => Self::build(&self.table),
        }
    }

    fn build(table: &HashMap<Route, MethodRouter>) -> axum::Router {
        let mut by_path: BTreeMap<&str, MethodRouter> = BTreeMap::new();
        for (route, method_router) in table {
            let merged = match by_path.remove(route.path.as_str()) {
                Some(existing) => existing.merge(method_router.clone()),
                None => method_router.clone(),
            };
            by_path.insert(route.path.as_str(), merged);
        }

        by_path
            .into_iter()
            .fold(axum::Router::new(), |app, (path, method_router)| {
                app.route(path, method_router)
            })
            .layer(catch_panic_layer())
    }

    pub fn into_axum(self) -> axum::Router {
        match self.app.into_inner() {
            Some(app) => app,
            None => Self::build(&self.table),
        }
    }

    /// Dispatches a single request
    ///
    /// Unmatched paths get axum's default `404`, unregistered methods on a
    /// known path get `405`. The axum router is built on the first call and
    /// reused until the next registration.
    pub async fn serve_http(&self, request: Request<Body>) -> Response {
        let app = self.app.get_or_init(|| Self::build(&self.table)).clone();
        match app.oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        }
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.routes())
            .finish()
    }
}

/// Collection and item paths for a resource mounted at `path`
///
/// Segments are literals or whole `{name}` captures; `id` is reserved for the
/// item route.
fn resource_paths(path: &str) -> Result<(String, String)> {
    if path.is_empty() {
        return Err(RestfulError::invalid_path(path, "path is empty"));
    }
    if !path.starts_with('/') {
        return Err(RestfulError::invalid_path(path, "path must start with `/`"));
    }

    let trimmed = path.trim_end_matches('/');
    let mut captures: Vec<&str> = Vec::new();
    for segment in trimmed.split('/').skip(1) {
        if segment.is_empty() {
            return Err(RestfulError::invalid_path(path, "path has an empty segment"));
        }
        if segment.starts_with(':') || segment.contains('*') {
            return Err(RestfulError::invalid_path(
                path,
                format!("segment `{}` is not supported, use `{{name}}` captures", segment),
            ));
        }
        if !is_capture(segment) {
            if segment.contains(['{', '}']) {
                return Err(RestfulError::invalid_path(
                    path,
                    format!("segment `{}` must be a literal or a whole `{{name}}` capture", segment),
                ));
            }
            continue;
        }

        let name = &segment[1..segment.len() - 1];
        if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(RestfulError::invalid_path(
                path,
                format!("capture `{}` needs an alphanumeric name", segment),
            ));
        }
        if name == "id" {
            return Err(RestfulError::invalid_path(path, "`{id}` is reserved for the item route"));
        }
        if captures.contains(&name) {
            return Err(RestfulError::invalid_path(
                path,
                format!("capture `{}` appears twice", segment),
            ));
        }
        captures.push(name);
    }

    if trimmed.is_empty() {
        Ok(("/".to_string(), "/{id}".to_string()))
    } else {
        Ok((trimmed.to_string(), format!("{}/{{id}}", trimmed)))
    }
}

fn is_capture(segment: &str) -> bool {
    segment.len() > 2 && segment.starts_with('{') && segment.ends_with('}')
}
