//! Single-item view: memo and image editing, completion toggle, delete.

use serde::Serialize;
use tracing::{error, info};

use crate::api::TaskService;
use crate::error::{Error, Result};
use crate::models::{Task, TaskPatch, normalize_name};
use crate::notify::Notifier;

/// Where the front end should go after an action finishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    BackToList,
}

/// Editable copy of the fields the detail view can change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Draft {
    pub name: String,
    pub memo: String,
    pub image_url: Option<String>,
}

impl Draft {
    fn of(task: &Task) -> Self {
        Draft {
            name: task.name.clone(),
            memo: task.memo_text().to_string(),
            image_url: task.image_url.clone(),
        }
    }
}

pub struct ItemDetail<S, N> {
    service: S,
    notifier: N,
    task: Task,
    draft: Draft,
}

impl<S: TaskService, N: Notifier> ItemDetail<S, N> {
    /// Fetch a task and start editing it. A missing task fails like any
    /// other fetch.
    pub async fn open(service: S, notifier: N, id: u64) -> Result<Self> {
        match service.get_task(id).await {
            Ok(task) => {
                let draft = Draft::of(&task);
                Ok(ItemDetail {
                    service,
                    notifier,
                    task,
                    draft,
                })
            }
            Err(e) => {
                error!(id, error = %e, "could not open task");
                notifier.notify(&e);
                Err(e)
            }
        }
    }

    /// The task as last confirmed by the service.
    pub fn task(&self) -> &Task {
        &self.task
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_name(&mut self, name: &str) {
        self.draft.name = name.to_string();
    }

    pub fn set_memo(&mut self, memo: &str) {
        self.draft.memo = memo.to_string();
    }

    /// Whether the draft differs from the confirmed task.
    pub fn is_dirty(&self) -> bool {
        self.draft != Draft::of(&self.task)
    }

    /// Upload an image and point the draft at it. The task itself only changes
    /// on [`save`](Self::save).
    pub async fn attach_image(&mut self, file_name: &str, bytes: Vec<u8>) -> Result<String> {
        let uploaded = match self.service.upload_image(file_name, bytes).await {
            Ok(uploaded) => uploaded,
            Err(e) => return Err(self.report(e)),
        };
        info!(url = %uploaded.url, "attached image to draft");
        self.draft.image_url = Some(uploaded.url.clone());
        Ok(uploaded.url)
    }

    /// Flip completion. The draft is left as it is.
    pub async fn toggle(&mut self) -> Result<&Task> {
        let patch = TaskPatch::completion(!self.task.is_completed);
        let updated = match self.service.update_task(self.task.id, &patch).await {
            Ok(task) => task,
            Err(e) => return Err(self.report(e)),
        };
        self.task = updated;
        Ok(&self.task)
    }

    /// Send the draft's name, memo and image to the service.
    pub async fn save(&mut self) -> Result<Navigation> {
        let name = normalize_name(&self.draft.name).ok_or(Error::EmptyName)?;
        let patch = TaskPatch {
            name: Some(name),
            memo: Some(self.draft.memo.clone()),
            image_url: self.draft.image_url.clone(),
            is_completed: None,
        };
        let updated = match self.service.update_task(self.task.id, &patch).await {
            Ok(task) => task,
            Err(e) => return Err(self.report(e)),
        };
        info!(id = updated.id, "saved task");
        self.draft = Draft::of(&updated);
        self.task = updated;
        Ok(Navigation::BackToList)
    }

    pub async fn delete(&mut self) -> Result<Navigation> {
        if let Err(e) = self.service.delete_task(self.task.id).await {
            return Err(self.report(e));
        }
        info!(id = self.task.id, "deleted task");
        Ok(Navigation::BackToList)
    }

    fn report(&self, err: Error) -> Error {
        error!(id = self.task.id, error = %err, "remote operation failed");
        self.notifier.notify(&err);
        err
    }
}
