use std::io::Write;
use std::path::Path;

use super::{Snapshot, SnapshotError};

/// Current packed-snapshot format version. Bump when `Snapshot` layout changes, since
/// bincode encodes fields positionally.
pub const PACK_VERSION: u32 = 1;

/// Envelope wrapping a snapshot with its format version.
#[derive(serde::Serialize, serde::Deserialize)]
pub struct PackedSnapshot {
    pub version: u32,
    pub snapshot: Snapshot,
}

/// Write `snapshot` to `target` atomically using bincode serialization.
///
/// Writes to a temp file in the target's directory first, then renames it into place.
pub fn save_packed(target: &Path, snapshot: &Snapshot) -> Result<(), SnapshotError> {
    let write_err = |source: std::io::Error| SnapshotError::Write {
        path: target.display().to_string(),
        source,
    };
    let dir = match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };

    let envelope = PackedSnapshot {
        version: PACK_VERSION,
        snapshot: snapshot.clone(),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(write_err)?;
    bincode::serde::encode_into_std_write(&envelope, &mut tmp, bincode::config::standard())?;
    tmp.as_file().flush().map_err(write_err)?;
    tmp.persist(target).map_err(|e| write_err(e.error))?;
    Ok(())
}

/// Load a packed snapshot, rejecting envelopes written by another format version.
pub fn load_packed(path: &Path) -> Result<Snapshot, SnapshotError> {
    let bytes = std::fs::read(path).map_err(|source| SnapshotError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let (envelope, _) = bincode::serde::decode_from_slice::<PackedSnapshot, _>(
        &bytes,
        bincode::config::standard(),
    )?;
    if envelope.version != PACK_VERSION {
        return Err(SnapshotError::VersionMismatch {
            found: envelope.version,
            expected: PACK_VERSION,
        });
    }
    Ok(envelope.snapshot)
}
