//! An administrator's edit session: load, edit in memory, save.

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use crate::catalog::Catalog;
use crate::editor::MatrixEditor;
use crate::error::{PersistenceError, SessionError};
use crate::merge::merge_with_defaults;
use crate::persistence::{StoredVisibilitySettings, VisibilityRepository};

/// Where the session's starting matrix came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadSource {
    /// A stored document, merged with current defaults.
    Stored {
        updated_at: Option<DateTime<Utc>>,
        updated_by: Option<String>,
    },
    /// Nothing stored yet.
    Empty,
    /// Loading failed; the session shows defaults.
    Defaults { reason: String },
}

/// Edit session over the role visibility matrix.
#[derive(Debug)]
pub struct VisibilitySession {
    repository: VisibilityRepository,
    editor: MatrixEditor,
    source: LoadSource,
}

impl VisibilitySession {
    /// Load the stored matrix and start a clean editor over it.
    ///
    /// Storage failures do not fail the session: it falls back to defaults
    /// and records why in [`source`](Self::source).
    pub async fn open(catalog: Catalog, repository: VisibilityRepository) -> Self {
        let (editor, source) = load_editor(catalog, &repository).await;
        Self {
            repository,
            editor,
            source,
        }
    }

    /// Discard in-memory edits and load again from storage.
    ///
    /// A reload that succeeds lifts the save block left by a failed load.
    pub async fn reload(&mut self) {
        let (editor, source) = load_editor(*self.editor.catalog(), &self.repository).await;
        self.editor = editor;
        self.source = source;
    }

    pub fn editor(&self) -> &MatrixEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut MatrixEditor {
        &mut self.editor
    }

    pub fn source(&self) -> &LoadSource {
        &self.source
    }

    /// Whether the session started from defaults after a failed load.
    pub fn is_fallback(&self) -> bool {
        matches!(self.source, LoadSource::Defaults { .. })
    }

    /// Save is offered only while there are unsaved edits over a matrix that
    /// was actually loaded.
    pub fn can_save(&self) -> bool {
        self.editor.is_dirty() && !self.is_fallback()
    }

    /// Persist the whole matrix as `actor`.
    ///
    /// On failure the matrix and the dirty flag are left as they were so the
    /// save can be retried. A session running on fallback defaults never
    /// writes.
    pub async fn save(&mut self, actor: &str) -> Result<StoredVisibilitySettings, SessionError> {
        if let LoadSource::Defaults { reason } = &self.source {
            warn!(reason = %reason, "Refusing to save over unloaded role visibility");
            return Err(SessionError::LoadUnresolved {
                reason: reason.clone(),
            });
        }

        match self.repository.save(self.editor.matrix(), actor).await {
            Ok(stored) => {
                self.editor.mark_clean();
                self.source = LoadSource::Stored {
                    updated_at: stored.updated_at,
                    updated_by: stored.updated_by.clone(),
                };
                Ok(stored)
            }
            Err(source) => {
                warn!(error = %source, "Saving role visibility failed");
                Err(SessionError::WriteFailed { source })
            }
        }
    }
}

async fn load_editor(catalog: Catalog, repository: &VisibilityRepository) -> (MatrixEditor, LoadSource) {
    match repository.load().await {
        Ok(Some(stored)) => {
            let outcome = merge_with_defaults(&stored.role_settings, &catalog);
            if outcome.filled > 0 || outcome.pruned > 0 {
                info!(
                    filled = outcome.filled,
                    pruned = outcome.pruned,
                    "Stored role visibility reconciled with catalog"
                );
            }
            let source = LoadSource::Stored {
                updated_at: stored.updated_at,
                updated_by: stored.updated_by,
            };
            (MatrixEditor::new(catalog, outcome.matrix), source)
        }
        Ok(None) => (MatrixEditor::with_defaults(catalog), LoadSource::Empty),
        Err(e) => {
            match &e {
                PersistenceError::StorageUnavailable => {
                    warn!("Settings storage unavailable, using default role visibility")
                }
                _ => warn!(error = %e, "Failed to load role visibility, using defaults"),
            }
            (
                MatrixEditor::with_defaults(catalog),
                LoadSource::Defaults {
                    reason: e.to_string(),
                },
            )
        }
    }
}
