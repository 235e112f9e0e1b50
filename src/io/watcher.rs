use std::path::{Path, PathBuf};
use std::sync::mpsc;

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};

/// A file system watcher for a local JSON project source.
///
/// Watches the parent directory rather than the file itself so editors that
/// save by rename are still seen.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: mpsc::Receiver<()>,
}

impl SourceWatcher {
    /// Start watching `file`.
    /// Returns a `SourceWatcher` whose `poll()` method should be called each tick.
    pub fn start(file: &Path) -> Result<Self, notify::Error> {
        let (tx, rx) = mpsc::channel();
        let target = absolute(file);
        let dir = target
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let target_name = target.file_name().map(|n| n.to_os_string());

        let mut watcher = RecommendedWatcher::new(
            move |result: Result<Event, notify::Error>| {
                let event = match result {
                    Ok(e) => e,
                    Err(e) => {
                        tracing::warn!("watch error: {}", e);
                        return;
                    }
                };

                match event.kind {
                    EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_) => {}
                    _ => return,
                }

                let relevant = event
                    .paths
                    .iter()
                    .any(|p| p.file_name().map(|n| n.to_os_string()) == target_name);
                if relevant {
                    let _ = tx.send(());
                }
            },
            Config::default(),
        )?;

        watcher.watch(&dir, RecursiveMode::NonRecursive)?;
        tracing::info!(path = %target.display(), "watching project source");
        Ok(SourceWatcher {
            _watcher: watcher,
            rx,
        })
    }

    /// Non-blocking poll. True if the file changed since the last poll;
    /// bursts of events collapse into one.
    pub fn poll(&self) -> bool {
        let mut changed = false;
        while self.rx.try_recv().is_ok() {
            changed = true;
        }
        changed
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(path))
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
