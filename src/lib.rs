/// Remote data access: the `TaskService` trait and its HTTP implementation.
pub mod api;
/// List view state: partition, pagination, add and toggle.
pub mod board;
/// Single-item view: memo, image, toggle, delete.
pub mod detail;
pub mod error;
/// Tracing subscriber setup for the binary.
pub mod logging;
/// Data types: Task, NewTask, TaskPatch, UploadedImage, Section.
pub mod models;
/// How failures reach the user.
pub mod notify;
/// Axum-based in-memory stand-in for the remote service.
pub mod web;

pub use error::{Error, Operation, Result};
