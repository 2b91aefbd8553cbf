/// Errors during project import. The building is never touched when one occurs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read {path}: {reason}")]
    Io { path: String, reason: String },

    #[error("failed to parse file: {0}")]
    ParseError(String),

    #[error("the project contains no floor")]
    EmptyProject,

    #[error("the project contains {count} plenums, at most one is allowed")]
    MultiplePlenums { count: usize },
}

impl LoadError {
    /// Short title for the user-facing alert.
    pub fn title(&self) -> &'static str {
        match self {
            LoadError::Io { .. } => "Fichier introuvable",
            LoadError::ParseError(_) => "Fichier invalide",
            LoadError::EmptyProject => "Projet vide",
            LoadError::MultiplePlenums { .. } => "Plusieurs plénums",
        }
    }
}

/// Errors during project export.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SaveError {
    #[error("failed to serialize project: {0}")]
    Serialize(String),

    #[error("failed to write {path}: {reason}")]
    Io { path: String, reason: String },
}

impl SaveError {
    pub fn title(&self) -> &'static str {
        "Erreur d'enregistrement"
    }
}
