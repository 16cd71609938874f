//! JSON Event Sink
//!
//! Outputs upgrade events as NDJSON for CI/automation consumption.

use crate::domain::ports::{UpgradeEvent, UpgradeEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events
pub struct JsonEventSink {
    /// Command name stamped on every event
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl UpgradeEventSink for JsonEventSink {
    fn on_event(&self, event: UpgradeEvent) {
        let json = match event {
            UpgradeEvent::Started {
                component,
                from,
                to,
                artifact_count,
            } => {
                serde_json::json!({
                    "event": "start",
                    "command": self.command,
                    "component": component,
                    "from": from,
                    "to": to,
                    "artifact_count": artifact_count,
                })
            }

            UpgradeEvent::ArtifactMerged { path, conflicts } => {
                serde_json::json!({
                    "event": "item_merged",
                    "command": self.command,
                    "path": path.display().to_string(),
                    "conflicts": conflicts,
                })
            }

            UpgradeEvent::ArtifactResolved {
                path,
                resolved,
                remaining_conflicts,
            } => {
                serde_json::json!({
                    "event": "item_resolved",
                    "command": self.command,
                    "path": path.display().to_string(),
                    "resolved": resolved,
                    "remaining_conflicts": remaining_conflicts,
                })
            }

            UpgradeEvent::ArtifactWritten {
                path,
                has_conflicts,
            } => {
                serde_json::json!({
                    "event": "item_written",
                    "command": self.command,
                    "path": path.display().to_string(),
                    "has_conflicts": has_conflicts,
                })
            }

            UpgradeEvent::Committed {
                component,
                version,
                artifact_count,
            } => {
                serde_json::json!({
                    "event": "complete",
                    "command": self.command,
                    "status": "success",
                    "component": component,
                    "version": version,
                    "artifacts": artifact_count,
                })
            }

            UpgradeEvent::Incomplete {
                component,
                version,
                conflicted,
            } => {
                serde_json::json!({
                    "event": "complete",
                    "command": self.command,
                    "status": "incomplete",
                    "component": component,
                    "version": version,
                    "conflicted": conflicted
                        .iter()
                        .map(|p| p.display().to_string())
                        .collect::<Vec<_>>(),
                })
            }
        };

        self.write_event(json);
    }

    fn wants_detailed_events(&self) -> bool {
        true // JSON mode wants all events
    }
}
