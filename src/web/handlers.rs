use axum::Json;
use axum::body::Bytes;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::Deserialize;
use tracing::debug;

use super::AppState;
use super::errors::AppError;
use super::store::StoredImage;
use crate::models::{NewTask, Task, TaskPatch, UploadedImage, normalize_name};

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParams {
    page: Option<usize>,
    page_size: Option<usize>,
}

fn not_found(id: u64) -> AppError {
    AppError::NotFound(format!("item not found: {id}"))
}

pub async fn list_items(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Query(params): Query<ListParams>,
) -> Result<Json<Vec<Task>>, AppError> {
    let page = params.page.unwrap_or(1);
    let page_size = params.page_size.unwrap_or(DEFAULT_PAGE_SIZE);
    if page == 0 || page_size == 0 {
        return Err(AppError::Validation(
            "page and pageSize must be at least 1".to_string(),
        ));
    }
    let store = state.lock()?;
    Ok(Json(store.list(&tenant, page, page_size)))
}

pub async fn create_item(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    Json(body): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>), AppError> {
    let name = normalize_name(&body.name)
        .ok_or_else(|| AppError::Validation("name must not be empty".to_string()))?;
    let task = state.lock()?.create(&tenant, name);
    debug!(%tenant, id = task.id, "created item");
    Ok((StatusCode::CREATED, Json(task)))
}

pub async fn get_item(
    State(state): State<AppState>,
    Path((tenant, id)): Path<(String, u64)>,
) -> Result<Json<Task>, AppError> {
    state
        .lock()?
        .get(&tenant, id)
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn update_item(
    State(state): State<AppState>,
    Path((tenant, id)): Path<(String, u64)>,
    Json(mut patch): Json<TaskPatch>,
) -> Result<Json<Task>, AppError> {
    if let Some(ref name) = patch.name {
        patch.name = Some(
            normalize_name(name)
                .ok_or_else(|| AppError::Validation("name must not be empty".to_string()))?,
        );
    }
    state
        .lock()?
        .update(&tenant, id, patch)
        .map(Json)
        .ok_or_else(|| not_found(id))
}

pub async fn delete_item(
    State(state): State<AppState>,
    Path((tenant, id)): Path<(String, u64)>,
) -> Result<StatusCode, AppError> {
    if state.lock()?.delete(&tenant, id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}

/// Accept a multipart upload with the file in the `image` field.
pub async fn upload_image(
    State(state): State<AppState>,
    Path(tenant): Path<String>,
    mut multipart: Multipart,
) -> Result<Json<UploadedImage>, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("image") {
            continue;
        }
        let original_name = field.file_name().unwrap_or("image").to_string();
        let content_type = match field.content_type() {
            Some(ct) => ct.to_string(),
            None => mime_guess::from_path(&original_name)
                .first_or_octet_stream()
                .to_string(),
        };
        let bytes: Bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("failed to read image: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("image is empty".to_string()));
        }

        let file_name = state.lock()?.put_image(
            &tenant,
            &original_name,
            StoredImage {
                content_type,
                bytes: bytes.to_vec(),
            },
        );
        let url = format!("{}/{tenant}/images/{file_name}", state.public_url);
        debug!(%tenant, %url, "stored image");
        return Ok(Json(UploadedImage { url }));
    }
    Err(AppError::Validation("missing image field".to_string()))
}

pub async fn get_image(
    State(state): State<AppState>,
    Path((tenant, file_name)): Path<(String, String)>,
) -> Result<Response, AppError> {
    let store = state.lock()?;
    let image = store
        .image(&tenant, &file_name)
        .ok_or_else(|| AppError::NotFound(format!("image not found: {file_name}")))?;
    Ok((
        [(header::CONTENT_TYPE, image.content_type.clone())],
        image.bytes.clone(),
    )
        .into_response())
}
