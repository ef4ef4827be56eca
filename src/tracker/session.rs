use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};

use crate::utils::time::whole_seconds;

use super::{
    events::{EditorEvent, FileId},
    module::EventHandler,
    sink::LineSink,
};

/// Two edits further apart than this belong to different bursts.
pub const EDIT_BURST_GAP: Duration = Duration::seconds(3);

/// Per-session activity state. Owns the report sink and is mutated only through the event
/// handlers, one event at a time.
///
/// At most one file is active at any instant. When a file stops being active the elapsed
/// time since `active_since` is flushed into `time_spent`.
pub struct SessionTracker<S> {
    sink: S,
    current_file: Option<FileId>,
    active_since: Option<DateTime<Utc>>,
    time_spent: HashMap<FileId, Duration>,
    last_edit_at: Option<DateTime<Utc>>,
    edit_burst_count: u32,
}

impl<S: LineSink> SessionTracker<S> {
    pub fn new(sink: S) -> Self {
        Self {
            sink,
            current_file: None,
            active_since: None,
            time_spent: HashMap::new(),
            last_edit_at: None,
            edit_burst_count: 0,
        }
    }

    /// Flushes the outgoing file, then activates `file`. Absent `file` means every editor was
    /// closed, and no time accrues until the next focus event. A re-focus of the same file
    /// still flushes and restarts the timer, but only an actual file change clears the running
    /// edit burst.
    pub fn on_focus_change(&mut self, file: Option<FileId>, now: DateTime<Utc>) -> Result<()> {
        if let (Some(current), Some(since)) = (&self.current_file, self.active_since) {
            let total = self
                .time_spent
                .entry(current.clone())
                .or_insert_with(Duration::zero);
            *total += now - since;
            let line = format!("Time spent on {current}: {}s", whole_seconds(*total));
            self.sink.append(&line)?;
        }

        let changed = self.current_file.as_deref() != file.as_deref();
        match file {
            Some(file) => {
                self.sink.append(&format!("Switched to {file}"))?;
                self.current_file = Some(file);
                self.active_since = Some(now);
            }
            None => {
                self.current_file = None;
                self.active_since = None;
            }
        }
        if changed {
            self.edit_burst_count = 0;
            self.last_edit_at = None;
        }
        Ok(())
    }

    /// Counts edits to the active file. A gap above [EDIT_BURST_GAP] closes the previous burst:
    /// its full count is reported and the current edit starts a new burst of one.
    pub fn on_document_change(&mut self, file: FileId, now: DateTime<Utc>) -> Result<()> {
        if self.current_file.as_deref() != Some(&*file) {
            return Ok(());
        }

        if let Some(last) = self.last_edit_at {
            if now - last > EDIT_BURST_GAP {
                let line = format!("Edit burst ended: {} edits", self.edit_burst_count);
                self.sink.append(&line)?;
                self.edit_burst_count = 0;
            }
        }
        self.edit_burst_count += 1;
        self.last_edit_at = Some(now);
        Ok(())
    }

    pub fn on_document_save(&mut self, file: &str) -> Result<()> {
        self.sink.append(&format!("Saved {file}"))
    }

    /// Reports every accrued total, sorted by file id. The currently active file's in-progress
    /// time is not flushed, so it only shows up with whatever previous intervals accrued.
    pub fn emit_summary(&mut self) -> Result<()> {
        self.sink.append("SESSION SUMMARY")?;
        let mut entries = self.time_spent.iter().collect::<Vec<_>>();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        for (file, total) in entries {
            self.sink
                .append(&format!("{file} → {}s", whole_seconds(*total)))?;
        }
        Ok(())
    }

    /// Renders a host information message onto the output channel.
    pub fn notify(&mut self, message: &str) -> Result<()> {
        self.sink.append(message)
    }
}

impl<S: LineSink> EventHandler for SessionTracker<S> {
    fn handle_event(&mut self, event: EditorEvent) -> Result<()> {
        match event {
            EditorEvent::FocusChanged { file, at } => self.on_focus_change(file, at),
            EditorEvent::DocumentChanged { file, at } => self.on_document_change(file, at),
            EditorEvent::DocumentSaved { file } => self.on_document_save(&file),
        }
    }
}
