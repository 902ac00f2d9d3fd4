use std::io::Write;
use std::path::Path;

use jobsync_core::{JobDefinition, RegistryError};
use tempfile::NamedTempFile;

/// Payload file handed to the bridge via `--json-file`.
///
/// Owned by a single registry call. The file is deleted by [`Self::remove`]
/// or, if the call unwinds or its future is dropped, when the guard drops.
pub(crate) struct ScratchFile {
    file: NamedTempFile,
}

impl ScratchFile {
    /// Write `definition` as pretty JSON to a uniquely named file in `dir`,
    /// or in the system temp dir when `dir` is `None`.
    pub(crate) fn write(
        dir: Option<&Path>,
        definition: &JobDefinition,
    ) -> Result<Self, RegistryError> {
        let payload = definition
            .to_json_pretty()
            .map_err(|e| RegistryError::Scratch(std::io::Error::other(e)))?;

        let mut builder = tempfile::Builder::new();
        builder.prefix("jobsync-").suffix(".json");
        let mut file = match dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(RegistryError::Scratch)?;

        file.write_all(payload.as_bytes())
            .map_err(RegistryError::Scratch)?;
        file.flush().map_err(RegistryError::Scratch)?;

        tracing::debug!(path = %file.path().display(), "wrote scratch payload");
        Ok(Self { file })
    }

    pub(crate) fn path(&self) -> &Path {
        self.file.path()
    }

    /// Delete the file now. A failure is logged; the caller's outcome stands.
    pub(crate) fn remove(self) {
        let path = self.file.path().to_path_buf();
        if let Err(e) = self.file.close() {
            tracing::warn!(path = %path.display(), error = %e, "failed to remove scratch payload");
        }
    }
}
