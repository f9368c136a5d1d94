// Copyright (c) 2026 Robert L. Snyder, Sierra Vista, AZ
// Licensed under the MIT License. See LICENSE file in the project root for details.

//! File watcher for hot-reloading a view file.
//!
//! The parent directory is watched rather than the file itself, so editors
//! that save by writing a new file and renaming it are still picked up.

use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use anyhow::{anyhow, Result};
use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tracing::{debug, warn};

use super::ViewFile;

/// Events emitted by the view watcher
#[derive(Debug, Clone)]
pub enum ConfigEvent {
    /// View file changed and was reloaded and validated
    Reloaded(Box<ViewFile>),
    /// View file changed but failed to load or validate
    Error(String),
}

/// View file watcher with debouncing and validation
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    event_receiver: Receiver<ConfigEvent>,
    watched_path: PathBuf,
}

impl ConfigWatcher {
    /// Create a new watcher for a view file
    ///
    /// # Arguments
    /// * `path` - View file to watch
    /// * `debounce_ms` - Debounce duration in milliseconds (default: 250)
    pub fn new<P: AsRef<Path>>(path: P, debounce_ms: Option<u64>) -> Result<Self> {
        let watched_path = path.as_ref().to_path_buf();
        let debounce_duration = Duration::from_millis(debounce_ms.unwrap_or(250));

        let file_name = watched_path
            .file_name()
            .ok_or_else(|| anyhow!("Not a file path: {:?}", watched_path))?
            .to_os_string();
        let directory = match watched_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let (event_tx, event_rx): (Sender<ConfigEvent>, Receiver<ConfigEvent>) = mpsc::channel();
        let (notify_tx, notify_rx): (Sender<Event>, Receiver<Event>) = mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res {
                    let _ = notify_tx.send(event);
                }
            },
            Config::default(),
        )
        .map_err(|e| anyhow!("Failed to create file watcher: {}", e))?;

        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|e| anyhow!("Failed to watch directory {:?}: {}", directory, e))?;

        let reload_path = watched_path.clone();
        std::thread::spawn(move || {
            let mut last_event_time: Option<Instant> = None;

            loop {
                match notify_rx.recv_timeout(Duration::from_millis(50)) {
                    Ok(event) => {
                        let touches_view = event
                            .paths
                            .iter()
                            .any(|p| p.file_name() == Some(file_name.as_os_str()));
                        if !touches_view {
                            continue;
                        }
                        match event.kind {
                            EventKind::Create(_) | EventKind::Modify(_) => {
                                debug!(kind = ?event.kind, "view file changed");
                                last_event_time = Some(Instant::now());
                            }
                            EventKind::Remove(_) => {
                                warn!(path = ?reload_path, "view file removed");
                            }
                            _ => {}
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Timeout) => {
                        let settled = last_event_time
                            .map(|t| t.elapsed() >= debounce_duration)
                            .unwrap_or(false);
                        if settled {
                            last_event_time = None;
                            let event = match validate_config(&reload_path) {
                                Ok(file) => ConfigEvent::Reloaded(Box::new(file)),
                                Err(e) => ConfigEvent::Error(format!(
                                    "Failed to load {:?}: {:#}",
                                    reload_path, e
                                )),
                            };
                            if event_tx.send(event).is_err() {
                                break;
                            }
                        }
                    }
                    Err(mpsc::RecvTimeoutError::Disconnected) => {
                        // Watcher was dropped, exit thread
                        break;
                    }
                }
            }
        });

        Ok(Self {
            _watcher: watcher,
            event_receiver: event_rx,
            watched_path,
        })
    }

    /// Try to receive the next event (non-blocking)
    pub fn try_recv(&self) -> Option<ConfigEvent> {
        self.event_receiver.try_recv().ok()
    }

    /// Receive all pending events
    pub fn recv_all(&self) -> Vec<ConfigEvent> {
        let mut events = Vec::new();
        while let Some(event) = self.try_recv() {
            events.push(event);
        }
        events
    }

    /// Block until the next event is received
    pub fn recv(&self) -> Option<ConfigEvent> {
        self.event_receiver.recv().ok()
    }

    /// Get the path being watched
    pub fn watched_path(&self) -> &Path {
        &self.watched_path
    }
}

/// Load a view file and check it against the engine without rendering it
pub fn validate_config<P: AsRef<Path>>(path: P) -> Result<ViewFile> {
    let file = ViewFile::load(path)?;
    file.view.validate()?;
    Ok(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::io::Write;
    use tempfile::tempdir;

    #[test]
    fn test_validate_config() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("view.yaml");

        let yaml = r#"
view:
  tonality: "Eb"
  chord: "major7"
"#;

        fs::write(&file_path, yaml).unwrap();

        let file = validate_config(&file_path).unwrap();
        assert_eq!(file.view.tonality, "Eb");
        assert_eq!(file.view.chord, Some("major7".to_string()));
    }

    #[test]
    fn test_validate_invalid_config() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("invalid.yaml");

        fs::write(&file_path, "this is not valid yaml: [").unwrap();
        assert!(validate_config(&file_path).is_err());

        fs::write(&file_path, "view:\n  chord: \"power\"\n").unwrap();
        assert!(validate_config(&file_path).is_err());
    }

    #[test]
    fn test_watcher_creation() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("watch_test.yaml");
        fs::write(&file_path, "view: {}\n").unwrap();

        let watcher = ConfigWatcher::new(&file_path, Some(100));
        assert!(watcher.is_ok());

        let watcher = watcher.unwrap();
        assert_eq!(watcher.watched_path(), file_path.as_path());
    }

    /// Wait up to two seconds for an event matching `wanted`
    fn wait_for(watcher: &ConfigWatcher, wanted: impl Fn(&ConfigEvent) -> bool) -> Option<ConfigEvent> {
        let deadline = Instant::now() + Duration::from_secs(2);
        while Instant::now() < deadline {
            if let Some(event) = watcher.try_recv() {
                if wanted(&event) {
                    return Some(event);
                }
            } else {
                std::thread::sleep(Duration::from_millis(20));
            }
        }
        None
    }

    fn rewrite(path: &Path, contents: &[u8]) {
        let mut file = fs::OpenOptions::new()
            .write(true)
            .truncate(true)
            .open(path)
            .unwrap();
        file.write_all(contents).unwrap();
        file.flush().unwrap();
    }

    #[test]
    fn test_watcher_reloads_valid_edit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("detect_test.yaml");
        fs::write(&file_path, "view:\n  tonality: \"C\"\n").unwrap();

        let watcher = ConfigWatcher::new(&file_path, Some(100)).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        rewrite(&file_path, b"view:\n  tonality: \"G\"\n");

        match wait_for(&watcher, |e| matches!(e, ConfigEvent::Reloaded(_))) {
            Some(ConfigEvent::Reloaded(file)) => assert_eq!(file.view.tonality, "G"),
            other => panic!("expected a reload, got {:?}", other),
        }
    }

    #[test]
    fn test_watcher_reports_invalid_edit() {
        let dir = tempdir().unwrap();
        let file_path = dir.path().join("error_test.yaml");
        fs::write(&file_path, "view:\n  chord: \"major\"\n").unwrap();

        let watcher = ConfigWatcher::new(&file_path, Some(100)).unwrap();
        std::thread::sleep(Duration::from_millis(50));

        rewrite(&file_path, b"view:\n  chord: \"power\"\n");

        match wait_for(&watcher, |e| matches!(e, ConfigEvent::Error(_))) {
            Some(ConfigEvent::Error(message)) => {
                assert!(message.contains("Unknown chord type"), "{}", message)
            }
            other => panic!("expected an error event, got {:?}", other),
        }
    }
}
