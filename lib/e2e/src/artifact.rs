use std::{
    fs, io,
    path::{Path, PathBuf},
};

use alloy::{hex, primitives::Bytes};
use serde::Deserialize;
use tracing::debug;

/// Errors raised while resolving a contract's compiled artifact.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    /// No `<name>.json` exists under the artifacts directory.
    #[error("no artifact for `{name}` under {}", .dir.display())]
    NotFound {
        /// Contract name.
        name: String,
        /// Directory that was searched.
        dir: PathBuf,
    },
    /// More than one `<name>.json` exists under the artifacts directory.
    #[error("several artifacts for `{name}`: {paths:?}")]
    Ambiguous {
        /// Contract name.
        name: String,
        /// Every matching artifact.
        paths: Vec<PathBuf>,
    },
    /// A file or directory could not be read.
    #[error("failed to read {}", .path.display())]
    Io {
        /// Offending path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
    /// The artifact is not a Hardhat or Foundry artifact.
    #[error("malformed artifact {}", .path.display())]
    Json {
        /// Offending artifact.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },
    /// The artifact carries no creation bytecode, as is the case for
    /// interfaces and abstract contracts.
    #[error("artifact {} has no creation bytecode", .path.display())]
    EmptyBytecode {
        /// Offending artifact.
        path: PathBuf,
    },
    /// The bytecode still contains library placeholders.
    #[error("artifact {} references unlinked libraries", .path.display())]
    UnlinkedLibrary {
        /// Offending artifact.
        path: PathBuf,
    },
    /// The bytecode is not valid hex.
    #[error("artifact {} holds invalid bytecode", .path.display())]
    Hex {
        /// Offending artifact.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: hex::FromHexError,
    },
}

/// The subset of a compiler artifact needed for deployment.
#[derive(Debug, Deserialize)]
struct Artifact {
    bytecode: ArtifactBytecode,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ArtifactBytecode {
    /// Hardhat: `"bytecode": "0x..."`.
    Hex(String),
    /// Foundry: `"bytecode": { "object": "0x...", ... }`.
    Object { object: String },
}

impl ArtifactBytecode {
    fn as_str(&self) -> &str {
        match self {
            Self::Hex(hex) | Self::Object { object: hex } => hex,
        }
    }
}

/// Handle used to create instances of a named contract from its compiled
/// artifact.
#[derive(Debug, Clone)]
pub struct ContractFactory {
    name: String,
    path: PathBuf,
    bytecode: Bytes,
}

impl ContractFactory {
    /// Looks up the artifact of contract `name` under `dir`.
    ///
    /// Both Hardhat (`artifacts/contracts/X.sol/X.json`) and Foundry
    /// (`out/X.sol/X.json`) layouts are understood. Debug files and
    /// `build-info` directories are skipped.
    ///
    /// # Errors
    ///
    /// May fail if the artifact is missing, ambiguous, unreadable or holds no
    /// deployable bytecode.
    pub fn from_artifacts(
        dir: impl AsRef<Path>,
        name: &str,
    ) -> Result<Self, ArtifactError> {
        let dir = dir.as_ref();
        let file_name = format!("{name}.json");

        let mut matches = Vec::new();
        find_artifacts(dir, &file_name, &mut matches)?;

        let path = match matches.len() {
            0 => {
                return Err(ArtifactError::NotFound {
                    name: name.to_string(),
                    dir: dir.to_path_buf(),
                })
            }
            1 => matches.remove(0),
            _ => {
                matches.sort();
                return Err(ArtifactError::Ambiguous {
                    name: name.to_string(),
                    paths: matches,
                });
            }
        };

        debug!(contract = name, artifact = %path.display(), "found artifact");
        Self::from_file(name, path)
    }

    /// Loads the artifact of contract `name` stored at `path`.
    ///
    /// # Errors
    ///
    /// May fail if the file is unreadable or holds no deployable bytecode.
    pub fn from_file(
        name: &str,
        path: impl Into<PathBuf>,
    ) -> Result<Self, ArtifactError> {
        let path = path.into();
        let content = fs::read_to_string(&path).map_err(|source| {
            ArtifactError::Io { path: path.clone(), source }
        })?;
        let artifact: Artifact =
            serde_json::from_str(&content).map_err(|source| {
                ArtifactError::Json { path: path.clone(), source }
            })?;

        let code = artifact.bytecode.as_str();
        let code = code.strip_prefix("0x").unwrap_or(code);
        if code.is_empty() {
            return Err(ArtifactError::EmptyBytecode { path });
        }
        // Both `__$<hash>$__` and the legacy `__Name___` placeholders.
        if code.contains("__") {
            return Err(ArtifactError::UnlinkedLibrary { path });
        }
        let bytecode = hex::decode(code).map_err(|source| {
            ArtifactError::Hex { path: path.clone(), source }
        })?;

        Ok(Self { name: name.to_string(), path, bytecode: bytecode.into() })
    }

    /// Contract name this factory creates.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the artifact the bytecode came from.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Creation bytecode.
    #[must_use]
    pub fn bytecode(&self) -> &Bytes {
        &self.bytecode
    }

    /// Creation bytecode followed by the abi-encoded constructor arguments.
    #[must_use]
    pub fn deploy_code(&self, constructor_args: &[u8]) -> Bytes {
        [self.bytecode.as_ref(), constructor_args].concat().into()
    }
}

fn find_artifacts(
    dir: &Path,
    file_name: &str,
    found: &mut Vec<PathBuf>,
) -> Result<(), ArtifactError> {
    let io_error =
        |source| ArtifactError::Io { path: dir.to_path_buf(), source };

    for entry in fs::read_dir(dir).map_err(io_error)? {
        let entry = entry.map_err(io_error)?;
        let path = entry.path();

        // Symlinks are never followed, so link cycles can't recurse.
        if entry.file_type().map_err(io_error)?.is_dir() {
            if entry.file_name() == "build-info" {
                continue;
            }
            find_artifacts(&path, file_name, found)?;
        } else if entry.file_name() == file_name {
            found.push(path);
        }
    }

    Ok(())
}
