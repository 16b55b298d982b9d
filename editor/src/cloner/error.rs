use thiserror::Error;
use unshare_core::material::MaterialHandle;

use crate::asset_database::AssetError;

/// Why a clone command, or one material inside it, did not produce a copy.
#[derive(Error, Debug)]
pub enum CloneError {
    /// No node is selected. The menu command is disabled in this state.
    #[error("no node selected")]
    NoSelection,
    /// The subtree has no renderer slot that references a persisted material.
    /// Informational, not a failure.
    #[error("no materials to clone")]
    NoMaterialsFound,
    /// The material is an asset but has no file path to duplicate next to.
    #[error("cannot resolve the storage path of {material}")]
    PathResolution { material: MaterialHandle },
    #[error("failed to create folder {path}: {source}")]
    FolderCreation {
        path: String,
        #[source]
        source: AssetError,
    },
    #[error(transparent)]
    Asset(#[from] AssetError),
}
