//! In-memory resume workspaces. Nothing is persisted; a workspace lives for
//! the lifetime of the process.
//!
//! A workspace owns the canonical document and at most one open edit session
//! (`Idle` when `session` is `None`, `Editing` otherwise).

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::RwLock;
use tracing::info;
use uuid::Uuid;

use crate::editing::{EditError, EditOp, EditSession};
use crate::errors::AppError;
use crate::models::resume::ResumeDocument;
use crate::render::{project, to_markdown, RenderMode, RenderedResume};

#[derive(Debug, Clone)]
pub struct ResumeWorkspace {
    pub id: Uuid,
    document: ResumeDocument,
    session: Option<EditSession>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Snapshot returned to API callers.
#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceView {
    pub resume_id: Uuid,
    pub editing: bool,
    /// When the open edit session started, if any.
    pub editing_since: Option<DateTime<Utc>>,
    pub document: ResumeDocument,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ResumeWorkspace {
    pub fn new(document: ResumeDocument) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            document,
            session: None,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn document(&self) -> &ResumeDocument {
        &self.document
    }

    pub fn is_editing(&self) -> bool {
        self.session.is_some()
    }

    pub fn view(&self) -> WorkspaceView {
        WorkspaceView {
            resume_id: self.id,
            editing: self.is_editing(),
            editing_since: self.session.as_ref().map(EditSession::started_at),
            document: self.document().clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    pub fn begin_edit(&mut self) -> Result<&ResumeDocument, EditError> {
        if self.session.is_some() {
            return Err(EditError::AlreadyEditing);
        }
        let session = self.session.insert(EditSession::begin(&self.document));
        Ok(session.working_copy())
    }

    pub fn working_copy(&self) -> Result<&ResumeDocument, EditError> {
        self.session
            .as_ref()
            .map(EditSession::working_copy)
            .ok_or(EditError::NotEditing)
    }

    pub fn apply_edit(&mut self, op: EditOp) -> Result<bool, EditError> {
        self.session
            .as_mut()
            .ok_or(EditError::NotEditing)?
            .apply(op)
    }

    /// Replaces the canonical document with the working copy.
    pub fn commit_edit(&mut self) -> Result<&ResumeDocument, EditError> {
        let session = self.session.take().ok_or(EditError::NotEditing)?;
        self.document = session.commit();
        self.updated_at = Utc::now();
        info!("Committed edit session for resume {}", self.id);
        Ok(&self.document)
    }

    pub fn cancel_edit(&mut self) -> Result<&ResumeDocument, EditError> {
        let session = self.session.take().ok_or(EditError::NotEditing)?;
        session.cancel();
        info!("Cancelled edit session for resume {}", self.id);
        Ok(&self.document)
    }

    /// Projects the working copy when `editing` is requested and a session is
    /// open, otherwise the canonical document.
    pub fn render(&self, editing: bool) -> RenderedResume {
        match (&self.session, editing) {
            (Some(session), true) => project(session.working_copy(), RenderMode::Editing),
            _ => project(self.document(), RenderMode::Viewing),
        }
    }

    pub fn export_markdown(&self) -> Result<String, EditError> {
        if self.is_editing() {
            return Err(EditError::ExportWhileEditing);
        }
        Ok(to_markdown(&project(self.document(), RenderMode::Viewing)))
    }
}

#[derive(Debug, Default)]
pub struct ResumeStore {
    workspaces: RwLock<HashMap<Uuid, ResumeWorkspace>>,
}

impl ResumeStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert(&self, document: ResumeDocument) -> WorkspaceView {
        let workspace = ResumeWorkspace::new(document);
        let view = workspace.view();
        self.workspaces.write().await.insert(workspace.id, workspace);
        info!("Stored resume {}", view.resume_id);
        view
    }

    pub async fn read<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&ResumeWorkspace) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let workspaces = self.workspaces.read().await;
        let workspace = workspaces
            .get(&id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
        f(workspace)
    }

    pub async fn update<T>(
        &self,
        id: Uuid,
        f: impl FnOnce(&mut ResumeWorkspace) -> Result<T, AppError>,
    ) -> Result<T, AppError> {
        let mut workspaces = self.workspaces.write().await;
        let workspace = workspaces
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("Resume {id} not found")))?;
        f(workspace)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::editing::session::ScalarField;
    use crate::models::fixtures::sample_resume;
    use crate::models::resume::Section;

    fn rename(name: &str) -> EditOp {
        EditOp::SetScalarField {
            field: ScalarField::Name,
            value: name.to_string(),
        }
    }

    #[test]
    fn test_ops_require_open_session() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        assert_eq!(ws.apply_edit(rename("X")), Err(EditError::NotEditing));
        assert_eq!(ws.commit_edit().unwrap_err(), EditError::NotEditing);
        assert_eq!(ws.cancel_edit().unwrap_err(), EditError::NotEditing);
        assert_eq!(ws.working_copy().unwrap_err(), EditError::NotEditing);
    }

    #[test]
    fn test_nested_sessions_are_rejected() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        ws.begin_edit().unwrap();
        assert_eq!(ws.begin_edit().unwrap_err(), EditError::AlreadyEditing);
    }

    #[test]
    fn test_cancel_restores_canonical_and_returns_to_idle() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        ws.begin_edit().unwrap();
        ws.apply_edit(rename("John Roe")).unwrap();
        ws.apply_edit(EditOp::DeleteSection {
            section: Section::WorkExperience,
        })
        .unwrap();
        assert_eq!(ws.document(), &sample_resume());

        ws.cancel_edit().unwrap();
        assert!(!ws.is_editing());
        assert_eq!(ws.document(), &sample_resume());

        let fresh = ws.begin_edit().unwrap();
        assert_eq!(fresh.contact_info.name, "Jane Doe");
    }

    #[test]
    fn test_commit_replaces_canonical_document() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        ws.begin_edit().unwrap();
        ws.apply_edit(rename("John Roe")).unwrap();
        let expected = ws.working_copy().unwrap().clone();

        let committed = ws.commit_edit().unwrap().clone();
        assert_eq!(committed, expected);
        assert!(!ws.is_editing());

        // Later sessions do not leak into the committed document.
        ws.begin_edit().unwrap();
        ws.apply_edit(rename("Someone Else")).unwrap();
        assert_eq!(ws.document().contact_info.name, "John Roe");
    }

    #[test]
    fn test_view_reports_committed_document_and_session_start() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        assert!(ws.view().editing_since.is_none());

        ws.begin_edit().unwrap();
        ws.apply_edit(rename("Draft Name")).unwrap();
        let view = ws.view();
        assert!(view.editing);
        assert!(view.editing_since.is_some());
        assert_eq!(&view.document, ws.document());
        assert_eq!(view.document.contact_info.name, "Jane Doe");
    }

    #[test]
    fn test_render_uses_working_copy_only_when_editing() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        ws.begin_edit().unwrap();
        ws.apply_edit(rename("Draft Name")).unwrap();
        assert_eq!(ws.render(true).header.name, "Draft Name");
        assert_eq!(ws.render(false).header.name, "Jane Doe");
    }

    #[test]
    fn test_export_blocked_while_editing() {
        let mut ws = ResumeWorkspace::new(sample_resume());
        assert!(ws.export_markdown().is_ok());
        ws.begin_edit().unwrap();
        assert_eq!(
            ws.export_markdown().unwrap_err(),
            EditError::ExportWhileEditing
        );
        ws.commit_edit().unwrap();
        assert!(ws.export_markdown().is_ok());
    }

    #[tokio::test]
    async fn test_store_read_unknown_id_is_not_found() {
        let store = ResumeStore::new();
        let result = store.read(Uuid::new_v4(), |ws| Ok(ws.view())).await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_store_update_persists_changes() {
        let store = ResumeStore::new();
        let view = store.insert(sample_resume()).await;
        store
            .update(view.resume_id, |ws| {
                ws.begin_edit()?;
                Ok(())
            })
            .await
            .unwrap();
        let editing = store
            .read(view.resume_id, |ws| Ok(ws.is_editing()))
            .await
            .unwrap();
        assert!(editing);
    }
}
