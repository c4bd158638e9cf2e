use std::fs;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Anonymous participant identity, created once and reused forever.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub participant_id: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

/// One JSON file in the platform data directory holding the participant
/// id and the last-used display name. Read once at startup; the loaded
/// `Identity` is passed to whoever needs it.
pub struct IdentityStore {
    path: PathBuf,
}

impl IdentityStore {
    pub fn open_default() -> Self {
        let dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("bilim-check");
        Self {
            path: dir.join("identity.json"),
        }
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    /// Loads the stored identity, minting a fresh participant id when no
    /// usable file exists. A corrupt file is replaced rather than fatal.
    pub fn load_or_create(&self) -> io::Result<Identity> {
        if let Ok(raw) = fs::read_to_string(&self.path) {
            match serde_json::from_str::<Identity>(&raw) {
                Ok(identity) => return Ok(identity),
                Err(err) => log::warn!("identity file unreadable, minting a new one: {err}"),
            }
        }

        let identity = Identity {
            participant_id: format!("user_{}", Uuid::new_v4()),
            display_name: None,
        };
        self.save(&identity)?;
        Ok(identity)
    }

    /// Persists the display name so the next submission can prefill it.
    pub fn remember_name(&self, name: &str) -> io::Result<()> {
        let mut identity = self.load_or_create()?;
        identity.display_name = Some(name.to_string());
        self.save(&identity)
    }

    fn save(&self, identity: &Identity) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(identity).map_err(io::Error::other)?;
        fs::write(&self.path, json)
    }
}
