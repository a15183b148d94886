//! In-memory list state: every task the tenant has, split into "to do" and
//! "done" and cut into pages.
//!
//! The board is a write-through cache. Mutations go to the remote service
//! first and the local copy is only touched once the service has answered
//! with the task as it now stands.

pub mod page;

use std::collections::HashSet;

use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::api::TaskService;
use crate::error::{Error, Result};
use crate::models::{NewTask, Section, Task, TaskPatch, normalize_name};
use crate::notify::Notifier;

/// Items per section page.
pub const DEFAULT_PAGE_SIZE: usize = 10;
/// Page size used while draining the remote list.
pub const DRAIN_PAGE_SIZE: u32 = 20;
/// Upper bound on list requests per drain, for services that never send a
/// short page.
pub const MAX_DRAIN_PAGES: u32 = 100;

/// How the two sections share page cursors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Pagination {
    /// "To do" and "done" page independently.
    #[default]
    PerSection,
    /// One cursor drives both sections.
    Unified,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Cursors {
    PerSection { todo: usize, done: usize },
    Unified(usize),
}

impl Cursors {
    fn first(pagination: Pagination) -> Self {
        match pagination {
            Pagination::PerSection => Cursors::PerSection { todo: 1, done: 1 },
            Pagination::Unified => Cursors::Unified(1),
        }
    }

    fn get(&self, section: Section) -> usize {
        match (*self, section) {
            (Cursors::PerSection { todo, .. }, Section::Todo) => todo,
            (Cursors::PerSection { done, .. }, Section::Done) => done,
            (Cursors::Unified(page), _) => page,
        }
    }

    fn set(&mut self, section: Section, page: usize) {
        match (self, section) {
            (Cursors::PerSection { todo, .. }, Section::Todo) => *todo = page,
            (Cursors::PerSection { done, .. }, Section::Done) => *done = page,
            (Cursors::Unified(shared), _) => *shared = page,
        }
    }
}

/// One rendered page of a section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow<'a> {
    pub section: Section,
    pub tasks: Vec<&'a Task>,
    pub page: usize,
    pub total_pages: usize,
    /// Size of the whole section, not just this page.
    pub total_items: usize,
    pub can_prev: bool,
    pub can_next: bool,
}

impl PageWindow<'_> {
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Drain the remote list page by page.
///
/// Pages are requested strictly one after another, starting at 1, until one
/// comes back shorter than [`DRAIN_PAGE_SIZE`] or [`MAX_DRAIN_PAGES`] pages
/// have been read. Ids already seen are skipped, so a list that shifts while
/// it is being read cannot produce duplicates.
pub async fn load_all_tasks<S: TaskService + ?Sized>(service: &S) -> Result<Vec<Task>> {
    let mut all = Vec::new();
    let mut seen = HashSet::new();
    for page in 1..=MAX_DRAIN_PAGES {
        let batch = service.list_tasks(page, DRAIN_PAGE_SIZE).await?;
        let short = batch.len() < DRAIN_PAGE_SIZE as usize;
        debug!(page, received = batch.len(), "drained list page");
        all.extend(batch.into_iter().filter(|t| seen.insert(t.id)));
        if short {
            return Ok(all);
        }
    }
    warn!(
        pages = MAX_DRAIN_PAGES,
        "stopped draining at the page cap without seeing a short page"
    );
    Ok(all)
}

/// The list view state controller.
pub struct Board<S, N> {
    service: S,
    notifier: N,
    tasks: Vec<Task>,
    page_size: usize,
    pagination: Pagination,
    cursors: Cursors,
}

impl<S: TaskService, N: Notifier> Board<S, N> {
    pub fn new(service: S, notifier: N) -> Self {
        Board {
            service,
            notifier,
            tasks: Vec::new(),
            page_size: DEFAULT_PAGE_SIZE,
            pagination: Pagination::default(),
            cursors: Cursors::first(Pagination::default()),
        }
    }

    /// Set the per-section page size. Zero is treated as one.
    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size.max(1);
        self.clamp_cursors();
        self
    }

    pub fn with_pagination(mut self, pagination: Pagination) -> Self {
        self.pagination = pagination;
        self.cursors = Cursors::first(pagination);
        self
    }

    /// Every task held, in no particular order.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Replace the held collection with a full drain of the remote list.
    ///
    /// On failure the previous collection and cursors are kept as they were.
    pub async fn load(&mut self) -> Result<usize> {
        let tasks = match load_all_tasks(&self.service).await {
            Ok(tasks) => tasks,
            Err(e) => return Err(self.report(e)),
        };
        info!(count = tasks.len(), "loaded tasks");
        self.tasks = tasks;
        self.cursors = Cursors::first(self.pagination);
        Ok(self.tasks.len())
    }

    /// All tasks of one section, newest (highest id) first.
    pub fn section(&self, section: Section) -> Vec<&Task> {
        let mut tasks: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.section() == section)
            .collect();
        tasks.sort_by(|a, b| b.id.cmp(&a.id));
        tasks
    }

    pub fn section_len(&self, section: Section) -> usize {
        self.tasks.iter().filter(|t| t.section() == section).count()
    }

    pub fn total_pages(&self, section: Section) -> usize {
        match self.pagination {
            Pagination::PerSection => page::total_pages(self.section_len(section), self.page_size),
            Pagination::Unified => self.unified_total_pages(),
        }
    }

    fn unified_total_pages(&self) -> usize {
        let todo = page::total_pages(self.section_len(Section::Todo), self.page_size);
        let done = page::total_pages(self.section_len(Section::Done), self.page_size);
        todo.max(done)
    }

    /// Current 1-based page of a section.
    pub fn page(&self, section: Section) -> usize {
        self.cursors.get(section)
    }

    pub fn can_advance(&self, section: Section) -> bool {
        self.page(section) < self.total_pages(section)
    }

    pub fn can_retreat(&self, section: Section) -> bool {
        self.page(section) > 1
    }

    /// Move a section forward one page. Does nothing and returns `false` when
    /// already on the last page.
    pub fn next_page(&mut self, section: Section) -> bool {
        if !self.can_advance(section) {
            return false;
        }
        let next = self.page(section) + 1;
        self.cursors.set(section, next);
        true
    }

    /// Move a section back one page. Does nothing and returns `false` on the
    /// first page.
    pub fn prev_page(&mut self, section: Section) -> bool {
        if !self.can_retreat(section) {
            return false;
        }
        let prev = self.page(section) - 1;
        self.cursors.set(section, prev);
        true
    }

    /// Jump to a page, clamped into the valid range. Returns the page landed on.
    pub fn go_to_page(&mut self, section: Section, page: usize) -> usize {
        let landed = page::clamp_page(page, self.total_pages(section));
        self.cursors.set(section, landed);
        landed
    }

    /// The currently visible page of a section.
    pub fn window(&self, section: Section) -> PageWindow<'_> {
        let all = self.section(section);
        let page = self.page(section);
        let total_pages = self.total_pages(section);
        PageWindow {
            section,
            tasks: page::window(&all, page, self.page_size).to_vec(),
            page,
            total_pages,
            total_items: all.len(),
            can_prev: page > 1,
            can_next: page < total_pages,
        }
    }

    /// Create a task from a user-entered name.
    ///
    /// The name is trimmed; a blank name is rejected before the service is
    /// called. The new task shows up at the top of the first "to do" page.
    pub async fn add(&mut self, raw_name: &str) -> Result<Task> {
        let name = normalize_name(raw_name).ok_or(Error::EmptyName)?;
        let created = match self.service.create_task(&NewTask { name }).await {
            Ok(task) => task,
            Err(e) => return Err(self.report(e)),
        };
        info!(id = created.id, "added task");
        self.tasks.retain(|t| t.id != created.id);
        self.tasks.insert(0, created.clone());
        self.cursors.set(Section::Todo, 1);
        Ok(created)
    }

    /// Flip a task's completion and adopt whatever the service sends back.
    pub async fn toggle(&mut self, id: u64) -> Result<Task> {
        let current = self.get(id).ok_or(Error::UnknownTask(id))?.is_completed;
        let patch = TaskPatch::completion(!current);
        let updated = match self.service.update_task(id, &patch).await {
            Ok(task) => task,
            Err(e) => return Err(self.report(e)),
        };
        info!(id, is_completed = updated.is_completed, "toggled task");
        self.replace(updated.clone());
        Ok(updated)
    }

    /// Swap in the server's copy of a task, keyed by id.
    fn replace(&mut self, task: Task) {
        match self.tasks.iter_mut().find(|t| t.id == task.id) {
            Some(slot) => *slot = task,
            None => self.tasks.push(task),
        }
        self.clamp_cursors();
    }

    fn clamp_cursors(&mut self) {
        for section in [Section::Todo, Section::Done] {
            let clamped = page::clamp_page(self.page(section), self.total_pages(section));
            self.cursors.set(section, clamped);
        }
    }

    /// Log a failed remote call, tell the user once, and hand the error back.
    fn report(&self, err: Error) -> Error {
        error!(error = %err, status = ?err.status(), "remote operation failed");
        self.notifier.notify(&err);
        err
    }
}
