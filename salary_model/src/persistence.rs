//! Whole-file JSON artifacts of fitted pipelines.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
};

use log::info;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

use crate::Result;

/// Where the two trained pipelines are written to and read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtifactPaths {
    pub regression: PathBuf,
    pub classification: PathBuf,
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self {
            regression: PathBuf::from("best_reg_model.json"),
            classification: PathBuf::from("best_clf_model.json"),
        }
    }
}

/// Serializes `artifact` to `path`, replacing whatever was there.
pub fn save<T: Serialize>(artifact: &T, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = BufWriter::new(File::create(path)?);

    serde_json::to_writer(&mut writer, artifact)?;
    writer.flush()?;

    info!("saved artifact to {}", path.display());
    Ok(())
}

/// Deserializes the artifact stored at `path`.
pub fn load<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);

    let artifact = serde_json::from_reader(reader)?;
    info!("loaded artifact from {}", path.display());

    Ok(artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SalaryErr;

    #[test]
    fn a_missing_artifact_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load::<ArtifactPaths>(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, SalaryErr::Io(_)));
    }

    #[test]
    fn a_truncated_artifact_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{\"regression\": ").unwrap();

        assert!(matches!(
            load::<ArtifactPaths>(&path),
            Err(SalaryErr::Json(_))
        ));
    }

    #[test]
    fn saving_overwrites_the_previous_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("paths.json");

        save(&ArtifactPaths::default(), &path).unwrap();
        let custom = ArtifactPaths {
            regression: "r.json".into(),
            classification: "c.json".into(),
        };
        save(&custom, &path).unwrap();

        assert_eq!(load::<ArtifactPaths>(&path).unwrap(), custom);
    }
}
