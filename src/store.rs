//! Project persistence.
//!
//! `JsonProjectStore` keeps every project in a single JSON document and
//! rewrites the whole document on each save (temp file + rename). There are no
//! partial updates: the last full save wins.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::board::Board;
use crate::error::{BoardError, Result};
use crate::project::{Project, ProjectSummary};

/// Durable storage for boards, keyed by project id.
pub trait ProjectStore {
    fn load(&self, project_id: &str) -> Result<Project>;
    fn save(&self, project_id: &str, board: &Board) -> Result<()>;
    fn list(&self) -> Result<Vec<ProjectSummary>>;
    fn create(&self, project: Project) -> Result<()>;
    fn delete(&self, project_id: &str) -> Result<()>;
}

/// On-disk shape: every project in one document.
#[derive(Debug, Default, Serialize, Deserialize)]
struct ProjectsDocument {
    #[serde(default)]
    projects: Vec<Project>,
}

#[derive(Debug, Clone)]
pub struct JsonProjectStore {
    path: PathBuf,
}

impl JsonProjectStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonProjectStore { path: path.into() }
    }

    /// Store at `<dir>/projects.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join("projects.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_document(&self) -> Result<ProjectsDocument> {
        if !self.path.exists() {
            return Ok(ProjectsDocument::default());
        }
        let buf = fs::read_to_string(&self.path)?;
        let doc: ProjectsDocument = serde_json::from_str(&buf)
            .map_err(|e| BoardError::decode(format!("{}: {e}", self.path.display())))?;
        debug!(path = %self.path.display(), projects = doc.projects.len(), "loaded project document");
        Ok(doc)
    }

    fn write_document(&self, doc: &ProjectsDocument) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.path.with_extension("json.tmp");
        let data = serde_json::to_string_pretty(doc)?;
        fs::write(&tmp, data)?;
        fs::rename(&tmp, &self.path)?;
        debug!(path = %self.path.display(), projects = doc.projects.len(), "wrote project document");
        Ok(())
    }

    /// Copy the document to `<dir>/backup/<timestamp>_projects.json`.
    pub fn backup(&self) -> Result<PathBuf> {
        if !self.path.exists() {
            return Err(BoardError::not_found("project store", self.path.display().to_string()));
        }
        let parent = self.path.parent().unwrap_or_else(|| Path::new("."));
        let backup_dir = parent.join("backup");
        fs::create_dir_all(&backup_dir)?;

        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let file_name = self
            .path
            .file_name()
            .and_then(|name| name.to_str())
            .unwrap_or("projects.json");
        let backup_path = backup_dir.join(format!("{timestamp}_{file_name}"));
        fs::copy(&self.path, &backup_path)?;
        info!(backup = %backup_path.display(), "backed up project store");
        Ok(backup_path)
    }
}

impl ProjectStore for JsonProjectStore {
    fn load(&self, project_id: &str) -> Result<Project> {
        let project = self
            .read_document()?
            .projects
            .into_iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| BoardError::not_found("project", project_id))?;
        project.board.validate()?;
        Ok(project)
    }

    fn save(&self, project_id: &str, board: &Board) -> Result<()> {
        board.validate()?;
        let mut doc = self.read_document()?;
        let project = doc
            .projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| BoardError::not_found("project", project_id))?;
        project.board = board.clone();
        self.write_document(&doc)
    }

    fn list(&self) -> Result<Vec<ProjectSummary>> {
        let mut summaries: Vec<_> = self.read_document()?.projects.iter().map(Project::summary).collect();
        summaries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(summaries)
    }

    fn create(&self, project: Project) -> Result<()> {
        project.board.validate()?;
        let mut doc = self.read_document()?;
        if doc.projects.iter().any(|p| p.id == project.id) {
            return Err(BoardError::validation(
                "project",
                format!("'{}' already exists", project.id),
            ));
        }
        info!(project = %project.id, kind = ?project.board.kind(), "created project");
        doc.projects.push(project);
        self.write_document(&doc)
    }

    fn delete(&self, project_id: &str) -> Result<()> {
        let mut doc = self.read_document()?;
        let before = doc.projects.len();
        doc.projects.retain(|p| p.id != project_id);
        if doc.projects.len() == before {
            return Err(BoardError::not_found("project", project_id));
        }
        self.write_document(&doc)
    }
}
