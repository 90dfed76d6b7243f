//! `/api/popups` handlers
//!
//! The record id is accepted either as `?id=` or as a path segment.

use actix_web::{HttpResponse, web};
use popup_builder_app::AppState;
use popup_builder_core::CoreError;
use popup_builder_core::services::{list_query, parse_id};
use popup_builder_core::types::PopupPayload;
use serde::Deserialize;
use tracing_attributes::instrument;

use crate::error::ApiResult;

/// Query string of every `/api/popups` request.
#[derive(Debug, Default, Deserialize)]
pub struct PopupQuery {
    pub id: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
    pub search: Option<String>,
}

/// Parse a request body into a payload. Non-object JSON counts as empty.
fn payload(body: &[u8]) -> ApiResult<PopupPayload> {
    let value: serde_json::Value = serde_json::from_slice(body)
        .map_err(|e| CoreError::SerializationError(format!("Invalid request body: {e}")))?;
    Ok(PopupPayload::from(value))
}

/// `GET /api/popups`: one record with `?id=`, otherwise a page of records.
#[instrument(skip(state))]
pub async fn get_popups(
    state: web::Data<AppState>,
    query: web::Query<PopupQuery>,
) -> ApiResult<HttpResponse> {
    let query = query.into_inner();
    // an empty `?id=` lists, like no id at all
    if let Some(raw) = query.id.as_deref().filter(|s| !s.is_empty()) {
        let id = parse_id(Some(raw))?;
        let record = state.popup_service.get(id).await?;
        return Ok(HttpResponse::Ok().json(record));
    }

    let list = list_query(
        query.limit.as_deref(),
        query.offset.as_deref(),
        query.search.as_deref(),
    );
    let records = state.popup_service.list(&list).await?;
    Ok(HttpResponse::Ok().json(records))
}

/// `POST /api/popups`
#[instrument(skip_all)]
pub async fn create_popup(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let payload = payload(&body)?;
    let record = state.popup_service.create(&payload).await?;
    Ok(HttpResponse::Created().json(record))
}

/// `PUT /api/popups?id=`
#[instrument(skip(state, body))]
pub async fn update_popup(
    state: web::Data<AppState>,
    query: web::Query<PopupQuery>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_id(query.id.as_deref())?;
    update(&state, id, &body).await
}

/// `DELETE /api/popups?id=`
#[instrument(skip(state))]
pub async fn delete_popup(
    state: web::Data<AppState>,
    query: web::Query<PopupQuery>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(query.id.as_deref())?;
    delete(&state, id).await
}

/// `GET /api/popups/{id}`
#[instrument(skip(state))]
pub async fn get_popup_by_path(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(Some(path.as_str()))?;
    let record = state.popup_service.get(id).await?;
    Ok(HttpResponse::Ok().json(record))
}

/// `PUT /api/popups/{id}`
#[instrument(skip(state, body))]
pub async fn update_popup_by_path(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let id = parse_id(Some(path.as_str()))?;
    update(&state, id, &body).await
}

/// `DELETE /api/popups/{id}`
#[instrument(skip(state))]
pub async fn delete_popup_by_path(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_id(Some(path.as_str()))?;
    delete(&state, id).await
}

async fn update(state: &AppState, id: i32, body: &[u8]) -> ApiResult<HttpResponse> {
    let payload = payload(body)?;
    let record = state.popup_service.update(id, &payload).await?;
    Ok(HttpResponse::Ok().json(record))
}

async fn delete(state: &AppState, id: i32) -> ApiResult<HttpResponse> {
    let deleted = state.popup_service.delete(id).await?;
    Ok(HttpResponse::Ok().json(deleted))
}
