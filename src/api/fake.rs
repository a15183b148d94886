//! In-memory [`TaskService`] for unit tests.

use std::collections::HashSet;
use std::sync::Mutex;

use async_trait::async_trait;

use super::TaskService;
use crate::error::{Error, Operation, Result};
use crate::models::{NewTask, Task, TaskPatch, UploadedImage};

pub(crate) const TENANT: &str = "test";

#[derive(Default)]
struct Inner {
    tasks: Vec<Task>,
    next_id: u64,
    failing: HashSet<Operation>,
    list_requests: Vec<(u32, u32)>,
    calls: usize,
    endless: bool,
}

#[derive(Default)]
pub(crate) struct FakeService {
    inner: Mutex<Inner>,
}

impl FakeService {
    pub(crate) fn new() -> Self {
        let service = FakeService::default();
        service.inner.lock().unwrap().next_id = 1;
        service
    }

    /// Seed `todo` incomplete tasks followed by `done` completed ones.
    pub(crate) fn with_tasks(todo: usize, done: usize) -> Self {
        let service = FakeService::new();
        for i in 0..todo {
            service.seed(&format!("todo {i}"), false);
        }
        for i in 0..done {
            service.seed(&format!("done {i}"), true);
        }
        service
    }

    /// A service that answers every list request with a full page.
    pub(crate) fn endless() -> Self {
        let service = FakeService::new();
        service.inner.lock().unwrap().endless = true;
        service
    }

    pub(crate) fn seed(&self, name: &str, is_completed: bool) -> Task {
        let mut inner = self.inner.lock().unwrap();
        let task = Task {
            id: inner.next_id,
            tenant_id: TENANT.to_string(),
            name: name.to_string(),
            memo: None,
            image_url: None,
            is_completed,
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        task
    }

    pub(crate) fn fail(&self, op: Operation) {
        self.inner.lock().unwrap().failing.insert(op);
    }

    pub(crate) fn recover(&self, op: Operation) {
        self.inner.lock().unwrap().failing.remove(&op);
    }

    pub(crate) fn list_requests(&self) -> Vec<(u32, u32)> {
        self.inner.lock().unwrap().list_requests.clone()
    }

    /// Total number of calls made, failed ones included.
    pub(crate) fn calls(&self) -> usize {
        self.inner.lock().unwrap().calls
    }

    pub(crate) fn stored(&self, id: u64) -> Option<Task> {
        let inner = self.inner.lock().unwrap();
        inner.tasks.iter().find(|t| t.id == id).cloned()
    }

    fn enter(&self, op: Operation) -> Result<std::sync::MutexGuard<'_, Inner>> {
        let mut inner = self.inner.lock().unwrap();
        inner.calls += 1;
        if inner.failing.contains(&op) {
            return Err(Error::remote(op, Some(500)));
        }
        Ok(inner)
    }
}

#[async_trait]
impl TaskService for FakeService {
    async fn list_tasks(&self, page: u32, page_size: u32) -> Result<Vec<Task>> {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.list_requests.push((page, page_size));
        }
        let inner = self.enter(Operation::List)?;
        if inner.endless {
            let base = u64::from(page - 1) * u64::from(page_size);
            return Ok((1..=u64::from(page_size))
                .map(|n| Task {
                    id: base + n,
                    tenant_id: TENANT.to_string(),
                    name: format!("item {}", base + n),
                    memo: None,
                    image_url: None,
                    is_completed: false,
                })
                .collect());
        }
        let start = (page as usize - 1) * page_size as usize;
        Ok(inner
            .tasks
            .iter()
            .skip(start)
            .take(page_size as usize)
            .cloned()
            .collect())
    }

    async fn create_task(&self, new_task: &NewTask) -> Result<Task> {
        let mut inner = self.enter(Operation::Create)?;
        let task = Task {
            id: inner.next_id,
            tenant_id: TENANT.to_string(),
            name: new_task.name.clone(),
            memo: None,
            image_url: None,
            is_completed: false,
        };
        inner.next_id += 1;
        inner.tasks.push(task.clone());
        Ok(task)
    }

    async fn get_task(&self, id: u64) -> Result<Task> {
        let inner = self.enter(Operation::Get)?;
        inner
            .tasks
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| Error::remote(Operation::Get, Some(404)))
    }

    async fn update_task(&self, id: u64, patch: &TaskPatch) -> Result<Task> {
        let mut inner = self.enter(Operation::Update)?;
        let task = inner
            .tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| Error::remote(Operation::Update, Some(404)))?;
        if let Some(ref name) = patch.name {
            task.name = name.clone();
        }
        if let Some(ref memo) = patch.memo {
            task.memo = Some(memo.clone());
        }
        if let Some(ref url) = patch.image_url {
            task.image_url = Some(url.clone());
        }
        if let Some(done) = patch.is_completed {
            task.is_completed = done;
        }
        Ok(task.clone())
    }

    async fn delete_task(&self, id: u64) -> Result<()> {
        let mut inner = self.enter(Operation::Delete)?;
        let before = inner.tasks.len();
        inner.tasks.retain(|t| t.id != id);
        if inner.tasks.len() == before {
            return Err(Error::remote(Operation::Delete, Some(404)));
        }
        Ok(())
    }

    async fn upload_image(&self, file_name: &str, _bytes: Vec<u8>) -> Result<UploadedImage> {
        let _inner = self.enter(Operation::Upload)?;
        Ok(UploadedImage {
            url: format!("https://images.test/{file_name}"),
        })
    }
}
