//! Handler factories
//!
//! Each factory binds one capability of one controller to an axum
//! [`MethodRouter`]. Handlers extract their inputs, call exactly one
//! controller method and answer `200` with a JSON body:
//!
//! | Capability | Route               | Body                   |
//! |------------|---------------------|------------------------|
//! | Indexer    | `GET path`          | `[element, ...]`       |
//! | Shower     | `GET path/{id}`     | `{"<id>": element}`    |
//! | Creator    | `POST path`         | `{"<new id>": element}`|
//! | Updater    | `PUT path/{id}`     | `{"<id>": element}`    |
//! | Deleter    | `DELETE path/{id}`  | `{"ok": bool}`         |
//!
//! Failures are returned as [`HandlerError`] and rendered at the boundary.

use crate::common::DeleteResponse;
use crate::common::response::keyed;
use crate::controller::{Creator, Deleter, Indexer, JsonElement, Shower, Updater};
use crate::exception::HandlerError;
use axum::{
    Json,
    body::Bytes,
    extract::{
        Path,
        rejection::{BytesRejection, PathRejection},
    },
    routing::{MethodRouter, delete as on_delete, get, post, put},
};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

mod body;

/// Every capture of the matched route; the item id sits under `id`
type PathId = Result<Path<HashMap<String, String>>, PathRejection>;
type Payload = Result<Bytes, BytesRejection>;

/// `GET path` handler listing every element
pub fn index<E: JsonElement>(indexer: Arc<dyn Indexer<Element = E>>) -> MethodRouter {
    get(move || {
        let indexer = Arc::clone(&indexer);
        async move { list_elements(indexer.as_ref()).await }
    })
}

/// `GET path/{id}` handler returning one element keyed by its id
pub fn show<E: JsonElement>(shower: Arc<dyn Shower<Element = E>>) -> MethodRouter {
    get(move |id: PathId| {
        let shower = Arc::clone(&shower);
        async move { show_element(shower.as_ref(), id).await }
    })
}

/// `POST path` handler creating an element from the request body
pub fn create<E: JsonElement>(creator: Arc<dyn Creator<Element = E>>) -> MethodRouter {
    post(move |payload: Payload| {
        let creator = Arc::clone(&creator);
        async move { create_element(creator.as_ref(), payload).await }
    })
}

/// `PUT path/{id}` handler replacing an element from the request body
pub fn update<E: JsonElement>(updater: Arc<dyn Updater<Element = E>>) -> MethodRouter {
    put(move |id: PathId, payload: Payload| {
        let updater = Arc::clone(&updater);
        async move { update_element(updater.as_ref(), id, payload).await }
    })
}

/// `DELETE path/{id}` handler
pub fn delete<E: JsonElement>(deleter: Arc<dyn Deleter<Element = E>>) -> MethodRouter {
    on_delete(move |id: PathId| {
        let deleter = Arc::clone(&deleter);
        async move { delete_element(deleter.as_ref(), id).await }
    })
}

async fn list_elements<E: JsonElement>(
    indexer: &dyn Indexer<Element = E>,
) -> Result<Json<Value>, HandlerError> {
    let elements = indexer.index().await?;
    tracing::debug!(count = elements.len(), "Indexed elements");
    Ok(Json(body::encode(&elements)?))
}

async fn show_element<E: JsonElement>(
    shower: &dyn Shower<Element = E>,
    id: PathId,
) -> Result<Json<Value>, HandlerError> {
    let id = resource_id(id)?;
    let element = shower.show(&id).await?;
    tracing::debug!(id = %id, "Showed element");
    Ok(Json(keyed(id, body::encode(&element)?)))
}

async fn create_element<E: JsonElement>(
    creator: &dyn Creator<Element = E>,
    payload: Payload,
) -> Result<Json<Value>, HandlerError> {
    let payload = payload.map_err(HandlerError::UnreadableBody)?;
    let mut element = body::decode(&payload, creator.template())?;
    let id = creator.create(&mut element).await?;
    if id.is_empty() {
        return Err(HandlerError::contract("Creator::create returned an empty id"));
    }
    tracing::debug!(id = %id, "Created element");
    Ok(Json(keyed(id, body::encode(&element)?)))
}

async fn update_element<E: JsonElement>(
    updater: &dyn Updater<Element = E>,
    id: PathId,
    payload: Payload,
) -> Result<Json<Value>, HandlerError> {
    let id = resource_id(id)?;
    let payload = payload.map_err(HandlerError::UnreadableBody)?;
    let mut element = body::decode(&payload, updater.template())?;
    updater.update(&id, &mut element).await?;
    tracing::debug!(id = %id, "Updated element");
    Ok(Json(keyed(id, body::encode(&element)?)))
}

async fn delete_element<E: JsonElement>(
    deleter: &dyn Deleter<Element = E>,
    id: PathId,
) -> Result<Json<DeleteResponse>, HandlerError> {
    let id = resource_id(id)?;
    let ok = deleter.delete(&id).await?;
    tracing::debug!(id = %id, ok, "Deleted element");
    Ok(Json(DeleteResponse { ok }))
}

fn resource_id(id: PathId) -> Result<String, HandlerError> {
    match id {
        Ok(Path(mut captures)) => captures.remove("id").ok_or(HandlerError::MissingId),
        Err(rejection) => {
            tracing::debug!(%rejection, "Rejected resource id");
            Err(HandlerError::MissingId)
        }
    }
}
