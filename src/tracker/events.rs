use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Identifier of a tracked file. The host reports filesystem paths, but nothing here ever
/// interprets them beyond equality.
pub type FileId = Arc<str>;

/// Editor activity as observed by the host, already stamped with a timestamp.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The foreground editor changed. `file` is absent when every editor was closed.
    FocusChanged {
        file: Option<FileId>,
        at: DateTime<Utc>,
    },
    DocumentChanged {
        file: FileId,
        at: DateTime<Utc>,
    },
    DocumentSaved {
        file: FileId,
    },
}

/// A single message from the host feed: either editor activity or a user-invoked command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostMessage {
    Event(EditorEvent),
    Command { name: Arc<str> },
}
