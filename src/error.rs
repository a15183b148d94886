use std::fmt;

/// The remote operation an error came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    List,
    Create,
    Get,
    Update,
    Delete,
    Upload,
}

impl Operation {
    /// Fixed user-facing message for a failure of this operation.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::List => "failed to load the to-do list",
            Operation::Create => "failed to add the to-do item",
            Operation::Get => "failed to load the to-do item",
            Operation::Update => "failed to update the to-do item",
            Operation::Delete => "failed to delete the to-do item",
            Operation::Upload => "failed to upload the image",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Get => "get",
            Operation::Update => "update",
            Operation::Delete => "delete",
            Operation::Upload => "upload",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote service answered with a non-success status, or the request
    /// never completed, or the body could not be decoded.
    #[error("{message}")]
    RemoteOperationFailed {
        operation: Operation,
        status: Option<u16>,
        message: String,
    },
    #[error("task name must not be empty")]
    EmptyName,
    #[error("task not found: {0}")]
    UnknownTask(u64),
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("{0}")]
    Server(String),
}

impl Error {
    pub fn remote(operation: Operation, status: Option<u16>) -> Self {
        Error::RemoteOperationFailed {
            operation,
            status,
            message: operation.failure_message().to_string(),
        }
    }

    pub fn is_remote(&self) -> bool {
        matches!(self, Error::RemoteOperationFailed { .. })
    }

    /// HTTP status of a failed remote call, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::RemoteOperationFailed { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
