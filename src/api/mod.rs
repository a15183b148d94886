use std::sync::Arc;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::{Error, Operation, Result};
use crate::models::{NewTask, Task, TaskPatch, UploadedImage};

#[cfg(test)]
pub(crate) mod fake;

/// Hosted endpoint the client talks to when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "https://assignment-todolist-api.vercel.app/api";

/// Where the remote service lives and which tenant partition to use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub tenant_id: String,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, tenant_id: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        ApiConfig {
            base_url,
            tenant_id: tenant_id.into(),
        }
    }

    fn tenant_root(&self) -> String {
        format!("{}/{}", self.base_url, self.tenant_id)
    }

    pub fn items_url(&self) -> String {
        format!("{}/items", self.tenant_root())
    }

    pub fn item_url(&self, id: u64) -> String {
        format!("{}/items/{id}", self.tenant_root())
    }

    pub fn upload_url(&self) -> String {
        format!("{}/images/upload", self.tenant_root())
    }
}

/// The remote task store, one method per endpoint.
///
/// Every call either yields a fully decoded value or fails with
/// [`Error::RemoteOperationFailed`]. Nothing is retried.
#[async_trait]
pub trait TaskService: Send + Sync {
    /// Fetch one 1-based page. A page shorter than `page_size` means there is
    /// no more data.
    async fn list_tasks(&self, page: u32, page_size: u32) -> Result<Vec<Task>>;

    async fn create_task(&self, new_task: &NewTask) -> Result<Task>;

    async fn get_task(&self, id: u64) -> Result<Task>;

    /// Apply a partial update and return the full task as the server now has it.
    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task>;

    async fn delete_task(&self, id: u64) -> Result<()>;

    /// Upload an image and return the URL it can be fetched from.
    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage>;
}

#[async_trait]
impl<T: TaskService + ?Sized> TaskService for Arc<T> {
    async fn list_tasks(&self, page: u32, page_size: u32) -> Result<Vec<Task>> {
        (**self).list_tasks(page, page_size).await
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        (**self).create_task(new_task).await
    }

    async fn get_task(&self, id: u64) -> Result<Task> {
        (**self).get_task(id).await
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task> {
        (**self).update_task(id, patch).await
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        (**self).delete_task(id).await
    }

    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage> {
        (**self).upload_image(file_name, bytes).await
    }
}

/// [`TaskService`] over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskService {
    client: Client,
    config: ApiConfig,
}

impl HttpTaskService {
    pub fn new(config: ApiConfig) -> Self {
        HttpTaskService {
            client: Client::new(),
            config,
        }
    }

    /// Send a request and hand back the response only if its status is 2xx.
    async fn send(&self, operation: Operation, request: RequestBuilder) -> Result<Response> {
        let response = request.send().await.map_err(|e| {
            warn!(%operation, error = %e, "request did not complete");
            Error::remote(operation, None)
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(%operation, status = status.as_u16(), "remote service rejected request");
            return Err(Error::remote(operation, Some(status.as_u16())));
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(operation: Operation, response: Response) -> Result<T> {
        let status = response.status().as_u16();
        response.json::<T>().await.map_err(|e| {
            warn!(%operation, error = %e, "response body could not be decoded");
            Error::remote(operation, Some(status))
        })
    }

    fn json_request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder.header(CONTENT_TYPE, "application/json")
    }
}

#[async_trait]
impl TaskService for HttpTaskService {
    async fn list_tasks(&self, page: u32, page_size: u32) -> Result<Vec<Task>> {
        let url = self.config.items_url();
        debug!(%url, page, page_size, "listing tasks");
        let request = self
            .json_request(self.client.get(&url))
            .query(&[("page", page), ("pageSize", page_size)]);
        let response = self.send(Operation::List, request).await?;
        Self::decode(Operation::List, response).await
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        let url = self.config.items_url();
        debug!(%url, name = %new_task.name, "creating task");
        let request = self.client.post(&url).json(new_task);
        let response = self.send(Operation::Create, request).await?;
        Self::decode(Operation::Create, response).await
    }

    async fn get_task(&self, id: u64) -> Result<Task> {
        let url = self.config.item_url(id);
        debug!(%url, "fetching task");
        let request = self.json_request(self.client.get(&url));
        let response = self.send(Operation::Get, request).await?;
        Self::decode(Operation::Get, response).await
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let url = self.config.item_url(id);
        debug!(%url, ?patch, "updating task");
        let request = self.client.patch(&url).json(patch);
        let response = self.send(Operation::Update, request).await?;
        Self::decode(Operation::Update, response).await
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        let url = self.config.item_url(id);
        debug!(%url, "deleting task");
        let request = self.json_request(self.client.delete(&url));
        self.send(Operation::Delete, request).await?;
        Ok(())
    }

    async fn upload_image(&self, file_name: &str, bytes: Vec<u8>) -> Result<UploadedImage> {
        let url = self.config.upload_url();
        debug!(%url, file_name, size = bytes.len(), "uploading image");
        let mime = mime_guess::from_path(file_name).first_or_octet_stream();
        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime.as_ref())
            .map_err(|e| {
                warn!(error = %e, "image type rejected");
                Error::remote(Operation::Upload, None)
            })?;
        let form = reqwest::multipart::Form::new().part("image", part);
        let request = self.client.post(&url).multipart(form);
        let response = self.send(Operation::Upload, request).await?;
        Self::decode(Operation::Upload, response).await
    }
}
