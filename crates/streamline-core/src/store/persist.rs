// ── JSON persistence ──
//
// The client list is stored as one pretty-printed JSON array in display
// order. Saves go through a sibling temp file and a rename so a crash
// mid-write never leaves a truncated file behind.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::DataStore;
use crate::error::CoreError;
use crate::model::Client;

fn persistence_error(path: &Path, source: std::io::Error) -> CoreError {
    CoreError::Persistence {
        path: path.to_path_buf(),
        source,
    }
}

/// Read clients from `path`. A missing file is an empty list.
pub fn load_clients(path: &Path) -> Result<Vec<Client>, CoreError> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!(path = %path.display(), "no client data file yet");
            return Ok(Vec::new());
        }
        Err(e) => return Err(persistence_error(path, e)),
    };

    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let clients: Vec<Client> =
        serde_json::from_str(&raw).map_err(|source| CoreError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    info!(path = %path.display(), count = clients.len(), "loaded clients");
    Ok(clients)
}

/// Write clients to `path` as pretty JSON, creating parent directories.
pub fn save_clients<'a>(
    path: &Path,
    clients: impl IntoIterator<Item = &'a Client>,
) -> Result<(), CoreError> {
    let clients: Vec<&Client> = clients.into_iter().collect();
    let mut body =
        serde_json::to_string_pretty(&clients).map_err(|source| CoreError::Serialization {
            path: path.to_path_buf(),
            source,
        })?;
    body.push('\n');

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| persistence_error(parent, e))?;
    }

    let tmp = temp_path(path);
    fs::write(&tmp, body).map_err(|e| persistence_error(&tmp, e))?;
    fs::rename(&tmp, path).map_err(|e| persistence_error(path, e))?;

    info!(path = %path.display(), count = clients.len(), "saved clients");
    Ok(())
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(ToOwned::to_owned).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

impl DataStore {
    /// Open the store persisted at `path` (empty if the file is absent).
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        load_clients(path).map(Self::with_clients)
    }

    /// Persist the current snapshot to `path`.
    pub fn save(&self, path: &Path) -> Result<(), CoreError> {
        let snapshot = self.clients_snapshot();
        save_clients(path, snapshot.iter().map(AsRef::as_ref))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::fixtures;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn demo() -> Vec<Client> {
        fixtures::demo_clients(Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap())
    }

    #[test]
    fn missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let clients = load_clients(&dir.path().join("clients.json")).unwrap();
        assert!(clients.is_empty());
    }

    #[test]
    fn round_trips_every_field() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("clients.json");
        let clients = demo();

        save_clients(&path, &clients).unwrap();
        let loaded = load_clients(&path).unwrap();

        assert_eq!(loaded, clients);
        assert_eq!(loaded[0].device_key.as_deref(), Some("123456"));
        assert!(!temp_path(&path).exists());
    }

    #[test]
    fn writes_wire_field_names() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        save_clients(&path, &demo()).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value[0];
        assert_eq!(first["fullName"], "John Smith");
        assert_eq!(first["duration"], 12);
        assert_eq!(first["packageType"], "VIP");
        assert_eq!(first["iptvApp"], "IBO Player");
        assert_eq!(first["status"], "Expiring Soon");
        assert_eq!(first["price"], "49.99");
        assert_eq!(first["macAddress"], "00:1A:2B:3C:4D:5E");
        assert!(value[1].get("macAddress").is_none());
    }

    #[test]
    fn malformed_file_is_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_clients(&path).unwrap_err();
        assert!(matches!(err, CoreError::Serialization { .. }));
    }

    #[test]
    fn store_load_and_save() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clients.json");
        DataStore::with_clients(demo()).save(&path).unwrap();

        let store = DataStore::load(&path).unwrap();
        let ids: Vec<String> = store
            .clients_snapshot()
            .iter()
            .map(|c| c.id.to_string())
            .collect();
        assert_eq!(ids, ["1", "2", "3"]);
    }
}
