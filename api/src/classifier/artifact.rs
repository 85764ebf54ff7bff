//! Loading a classifier from its persisted JSON artifact.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;

use super::forest::{ForestParams, RandomForest};
use super::linear::{LinearParams, LinearSvm, LogisticRegression};
use super::Classifier;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("cannot read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("model artifact is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model artifact is invalid: {0}")]
    Invalid(String),
}

/// On-disk model description, tagged by model family.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ModelArtifact {
    LogisticRegression(LinearParams),
    LinearSvm(LinearParams),
    RandomForest(ForestParams),
}

impl ModelArtifact {
    pub fn from_json(json: &str) -> Result<Self, LoadError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn into_classifier(self) -> Result<Arc<dyn Classifier>, LoadError> {
        let classifier: Arc<dyn Classifier> = match self {
            ModelArtifact::LogisticRegression(p) => Arc::new(LogisticRegression::from_params(p)?),
            ModelArtifact::LinearSvm(p) => Arc::new(LinearSvm::from_params(p)?),
            ModelArtifact::RandomForest(p) => Arc::new(RandomForest::from_params(p)?),
        };
        Ok(classifier)
    }
}

pub fn load_classifier(path: &Path) -> Result<Arc<dyn Classifier>, LoadError> {
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    ModelArtifact::from_json(&json)?.into_classifier()
}

/// Loads from `path`, or from its bare file name in the working directory when
/// `path` does not exist. Returns the path actually used.
pub fn load_with_fallback(path: &Path) -> Result<(PathBuf, Arc<dyn Classifier>), LoadError> {
    match load_classifier(path) {
        Ok(classifier) => Ok((path.to_path_buf(), classifier)),
        Err(LoadError::Io { source, .. }) if source.kind() == io::ErrorKind::NotFound => {
            let local = path
                .file_name()
                .map(PathBuf::from)
                .filter(|local| local != path);
            let Some(local) = local else {
                return Err(LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            };
            log::warn!(
                "model artifact {} not found, trying {} in the working directory",
                path.display(),
                local.display()
            );
            let classifier = load_classifier(&local)?;
            Ok((local, classifier))
        }
        Err(e) => Err(e),
    }
}
