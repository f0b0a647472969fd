use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, patch};
use axum::{Json, Router};
use ior_common::{MaterialDraft, MaterialPatch, RequiredField};
use tokio::sync::RwLock;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::collection::MaterialCollection;

pub type SharedCollection = Arc<RwLock<MaterialCollection>>;

pub fn create_router(collection: SharedCollection) -> Router {
    Router::new()
        .route("/materials", get(list_materials).post(create_material))
        .route(
            "/materials/:id",
            patch(update_material).delete(delete_material),
        )
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(collection)
}

fn unprocessable(field: RequiredField) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        format!("{field} is required"),
    )
        .into_response()
}

fn not_found(id: &str) -> Response {
    warn!("material {id} not found");
    (StatusCode::NOT_FOUND, format!("material {id} not found")).into_response()
}

async fn list_materials(State(collection): State<SharedCollection>) -> Response {
    let collection = collection.read().await;
    Json(collection.list().to_vec()).into_response()
}

async fn create_material(
    State(collection): State<SharedCollection>,
    Json(draft): Json<MaterialDraft>,
) -> Response {
    if let Some(field) = draft.missing_required() {
        return unprocessable(field);
    }
    let material = collection.write().await.insert(draft);
    info!("created material {} ({})", material.id, material.name);
    (StatusCode::CREATED, Json(material)).into_response()
}

async fn update_material(
    State(collection): State<SharedCollection>,
    Path(id): Path<String>,
    Json(patch): Json<MaterialPatch>,
) -> Response {
    if let Some(field) = patch.blanks_required() {
        return unprocessable(field);
    }
    match collection.write().await.patch(&id, &patch) {
        Some(material) => {
            info!("updated material {id}");
            Json(material).into_response()
        }
        None => not_found(&id),
    }
}

async fn delete_material(
    State(collection): State<SharedCollection>,
    Path(id): Path<String>,
) -> Response {
    match collection.write().await.remove(&id) {
        Some(_) => {
            info!("deleted material {id}");
            StatusCode::OK.into_response()
        }
        None => not_found(&id),
    }
}

async fn health() -> &'static str {
    "ok"
}
