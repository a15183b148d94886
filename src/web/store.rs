use std::collections::{BTreeMap, HashMap};

use crate::models::{Task, TaskPatch};

/// Items of one tenant, keyed by id. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
struct TenantItems {
    items: BTreeMap<u64, Task>,
    last_id: u64,
}

/// An uploaded image and its content type.
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub content_type: String,
    pub bytes: Vec<u8>,
}

/// Everything the stand-in service knows, across all tenants.
///
/// An image is dropped when the item it is attached to is deleted or given a
/// different image. Images uploaded but never attached stay until the process
/// exits.
#[derive(Debug, Default)]
pub struct Store {
    tenants: HashMap<String, TenantItems>,
    images: HashMap<(String, String), StoredImage>,
    image_count: u64,
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    fn tenant(&mut self, tenant: &str) -> &mut TenantItems {
        self.tenants.entry(tenant.to_string()).or_default()
    }

    /// One 1-based page of a tenant's items, newest first.
    pub fn list(&self, tenant: &str, page: usize, page_size: usize) -> Vec<Task> {
        let Some(items) = self.tenants.get(tenant) else {
            return Vec::new();
        };
        items
            .items
            .values()
            .rev()
            .skip(page.saturating_sub(1).saturating_mul(page_size))
            .take(page_size)
            .cloned()
            .collect()
    }

    pub fn create(&mut self, tenant: &str, name: String) -> Task {
        let items = self.tenant(tenant);
        items.last_id += 1;
        let task = Task {
            id: items.last_id,
            tenant_id: tenant.to_string(),
            name,
            memo: None,
            image_url: None,
            is_completed: false,
        };
        items.items.insert(task.id, task.clone());
        task
    }

    pub fn get(&self, tenant: &str, id: u64) -> Option<Task> {
        self.tenants.get(tenant)?.items.get(&id).cloned()
    }

    /// Apply the fields present in `patch`. Returns `None` for unknown ids.
    pub fn update(&mut self, tenant: &str, id: u64, patch: TaskPatch) -> Option<Task> {
        let task = self.tenants.get_mut(tenant)?.items.get_mut(&id)?;
        let replaced = match &patch.image_url {
            Some(url) if task.image_url.as_ref() != Some(url) => task.image_url.take(),
            _ => None,
        };
        if let Some(name) = patch.name {
            task.name = name;
        }
        if let Some(memo) = patch.memo {
            task.memo = Some(memo);
        }
        if let Some(url) = patch.image_url {
            task.image_url = Some(url);
        }
        if let Some(done) = patch.is_completed {
            task.is_completed = done;
        }
        let task = task.clone();
        if let Some(url) = replaced {
            self.forget_image(tenant, &url);
        }
        Some(task)
    }

    pub fn delete(&mut self, tenant: &str, id: u64) -> bool {
        let removed = self
            .tenants
            .get_mut(tenant)
            .and_then(|items| items.items.remove(&id));
        match removed {
            Some(task) => {
                if let Some(url) = task.image_url {
                    self.forget_image(tenant, &url);
                }
                true
            }
            None => false,
        }
    }

    /// Drop a stored image by the URL it was served under. URLs that do not
    /// point into this tenant's images are ignored.
    fn forget_image(&mut self, tenant: &str, url: &str) {
        let Some((prefix, file_name)) = url.rsplit_once("/images/") else {
            return;
        };
        if prefix.rsplit('/').next() == Some(tenant) {
            self.images
                .remove(&(tenant.to_string(), file_name.to_string()));
        }
    }

    /// Keep an uploaded image and return the file name it is served under.
    pub fn put_image(&mut self, tenant: &str, original_name: &str, image: StoredImage) -> String {
        self.image_count += 1;
        let file_name = format!("{}-{}", self.image_count, sanitize_file_name(original_name));
        self.images
            .insert((tenant.to_string(), file_name.clone()), image);
        file_name
    }

    pub fn image(&self, tenant: &str, file_name: &str) -> Option<&StoredImage> {
        self.images.get(&(tenant.to_string(), file_name.to_string()))
    }
}

/// Reduce an uploaded file name to characters safe in a URL path segment.
fn sanitize_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches('.').is_empty() {
        "image".to_string()
    } else {
        cleaned
    }
}
