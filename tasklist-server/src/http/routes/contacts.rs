//! Contact endpoints - create and list only

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};

use crate::http::error::ApiError;
use crate::http::extractors::JsonFields;
use crate::http::AppState;
use crate::models::{Contact, NewContact};

/// GET /contacts - all contacts, newest first
async fn list_contacts(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<Contact>>, ApiError> {
    let store = state.store()?;
    let contacts = store
        .list_contacts()
        .await
        .map_err(ApiError::db("Failed to fetch contacts"))?;
    Ok(Json(contacts))
}

/// POST /contacts - body `{name, email}`
async fn create_contact(
    State(state): State<Arc<AppState>>,
    body: JsonFields,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let store = state.store()?;
    let contact = NewContact::from_json(body.get("name"), body.get("email"))?;

    let contact = store
        .create_contact(&contact)
        .await
        .map_err(ApiError::db("Failed to create contact"))?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// Contact routes
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/contacts", get(list_contacts).post(create_contact))
}
