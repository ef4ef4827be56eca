//! Wire format of the host feed: one json object per line, tagged by `event`. Timestamps are
//! optional epoch milliseconds; events arriving without one are stamped on receipt, which is
//! what a live shim piping `Date.now()`-less events gets.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    tracker::events::{EditorEvent, HostMessage},
    utils::clock::Clock,
};

/// A single line from the editor shim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum HostNotification {
    /// The foreground editor changed. `file` is absent when no editor is active anymore.
    #[serde(rename = "focus")]
    FocusChanged {
        #[serde(default)]
        file: Option<Arc<str>>,
        #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
        at: Option<DateTime<Utc>>,
    },
    #[serde(rename = "edit")]
    DocumentChanged {
        file: Arc<str>,
        #[serde(default, with = "chrono::serde::ts_milliseconds_option")]
        at: Option<DateTime<Utc>>,
    },
    #[serde(rename = "save")]
    DocumentSaved { file: Arc<str> },
    #[serde(rename = "command")]
    CommandInvoked { name: Arc<str> },
}

impl HostNotification {
    /// Converts into an internal message, filling in the receipt time where the shim sent none.
    pub fn into_message(self, clock: &dyn Clock) -> HostMessage {
        match self {
            HostNotification::FocusChanged { file, at } => {
                HostMessage::Event(EditorEvent::FocusChanged {
                    file,
                    at: at.unwrap_or_else(|| clock.time()),
                })
            }
            HostNotification::DocumentChanged { file, at } => {
                HostMessage::Event(EditorEvent::DocumentChanged {
                    file,
                    at: at.unwrap_or_else(|| clock.time()),
                })
            }
            HostNotification::DocumentSaved { file } => {
                HostMessage::Event(EditorEvent::DocumentSaved { file })
            }
            HostNotification::CommandInvoked { name } => HostMessage::Command { name },
        }
    }
}
