use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::Utc;
use tempfile::NamedTempFile;

use crate::model::config::SourceConfig;
use crate::model::record::{NewProject, ProjectRecord};

/// Error type for talking to a project source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server returned {status} for {url}")]
    Status { status: u16, url: String },
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not decode project list: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("{0}")]
    Rejected(String),
    #[error("io error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Something that can hand out the full project list and accept new projects.
///
/// Calls block; the TUI runs them on worker threads.
pub trait ProjectSource: Send + Sync {
    /// Fetch every project. No paging, no server-side filtering.
    fn fetch_all(&self) -> Result<Vec<ProjectRecord>, SourceError>;

    /// Create a project
    fn create(&self, project: &NewProject) -> Result<(), SourceError>;

    /// Human-readable location, shown in the title bar
    fn describe(&self) -> String;

    /// Local file backing this source, if any (watched for live reload)
    fn watch_path(&self) -> Option<&Path> {
        None
    }
}

// ---------------------------------------------------------------------------
// HTTP backend
// ---------------------------------------------------------------------------

/// The catalog REST backend: `GET /projects`, `POST /projects`
pub struct HttpSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpSource {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, SourceError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("catalog/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(HttpSource {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn projects_url(&self) -> String {
        format!("{}/projects", self.base_url)
    }
}

impl ProjectSource for HttpSource {
    fn fetch_all(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        let url = self.projects_url();
        let resp = self.client.get(&url).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    fn create(&self, project: &NewProject) -> Result<(), SourceError> {
        let url = self.projects_url();
        let resp = self.client.post(&url).json(project).send()?;
        let status = resp.status();
        if !status.is_success() {
            return Err(SourceError::Status {
                status: status.as_u16(),
                url,
            });
        }
        Ok(())
    }

    fn describe(&self) -> String {
        self.base_url.clone()
    }
}

// ---------------------------------------------------------------------------
// Local JSON file
// ---------------------------------------------------------------------------

/// A JSON array of project records on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSource { path: path.into() }
    }

    fn read_all(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        let text = fs::read_to_string(&self.path).map_err(|e| SourceError::ReadError {
            path: self.path.clone(),
            source: e,
        })?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(serde_json::from_str(&text)?)
    }
}

impl ProjectSource for FileSource {
    fn fetch_all(&self) -> Result<Vec<ProjectRecord>, SourceError> {
        self.read_all()
    }

    fn create(&self, project: &NewProject) -> Result<(), SourceError> {
        let mut records = if self.path.exists() {
            self.read_all()?
        } else {
            Vec::new()
        };
        if records.iter().any(|r| r.name == project.name) {
            return Err(SourceError::Rejected(format!(
                "a project named '{}' already exists",
                project.name
            )));
        }
        records.push(ProjectRecord::new(
            project.name.clone(),
            project.description.clone(),
            project.tech.clone(),
            Utc::now(),
        ));
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(&records)?;
        atomic_write(&self.path, content.as_bytes())?;
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    fn watch_path(&self) -> Option<&Path> {
        Some(&self.path)
    }
}

/// Write `content` to `path` atomically using a temp file + rename, so
/// readers (and the live-reload watcher) never see a half-written file.
pub fn atomic_write(path: &Path, content: &[u8]) -> io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}

/// Build the configured source. A local file wins over the HTTP URL.
pub fn build_source(config: &SourceConfig) -> Result<Box<dyn ProjectSource>, SourceError> {
    match &config.file {
        Some(path) => Ok(Box::new(FileSource::new(path))),
        None => Ok(Box::new(HttpSource::new(
            &config.url,
            Duration::from_secs(config.timeout_secs),
        )?)),
    }
}

/// Route for the "view project" action: `/projects/<name>`, prefixed with
/// the web base URL when one is configured.
pub fn project_route(web_url: Option<&str>, name: &str) -> String {
    let path = format!("/projects/{}", name);
    match web_url {
        Some(base) if !base.is_empty() => format!("{}{}", base.trim_end_matches('/'), path),
        _ => path,
    }
}
