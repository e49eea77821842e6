use crate::error::{EditPixError, Result};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::PathBuf;

/// Capability that supplies the API credential at call time.
///
/// The client asks for the key on every generation call, so providers with
/// time-based expiry are re-checked each time rather than once at startup.
pub trait CredentialProvider: Send + Sync {
    /// Returns a usable API key, or `None` when absent or expired.
    fn api_key(&self) -> Option<String>;
}

/// Fixed key, handed over at construction.
pub struct StaticCredential {
    key: String,
}

impl StaticCredential {
    pub fn new(key: impl Into<String>) -> Self {
        StaticCredential { key: key.into() }
    }
}

impl CredentialProvider for StaticCredential {
    fn api_key(&self) -> Option<String> {
        if self.key.is_empty() {
            None
        } else {
            Some(self.key.clone())
        }
    }
}

/// Key read from an environment variable on each call.
pub struct EnvCredential {
    var: String,
}

impl EnvCredential {
    pub fn new() -> Self {
        Self::from_var("API_KEY")
    }

    pub fn from_var(var: impl Into<String>) -> Self {
        EnvCredential { var: var.into() }
    }
}

impl Default for EnvCredential {
    fn default() -> Self {
        Self::new()
    }
}

impl CredentialProvider for EnvCredential {
    fn api_key(&self) -> Option<String> {
        env::var(&self.var).ok().filter(|key| !key.is_empty())
    }
}

const OBFUSCATION_SALT: &str = "editpix_salt_2025";
const DEFAULT_EXPIRY_HOURS: i64 = 24;

#[derive(Debug, Serialize, Deserialize)]
struct StoredApiKey {
    encrypted_key: String,
    timestamp: DateTime<Utc>,
}

/// Key persisted to a local file with salted-base64 obfuscation and a
/// time-based expiry. Expired entries are cleared on read, so a long-lived
/// client never sends a stale key.
///
/// The obfuscation is not real encryption; it only keeps the key out of
/// casual plain-text view.
pub struct StoredCredential {
    path: PathBuf,
    expiry_hours: i64,
}

impl StoredCredential {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        StoredCredential {
            path: path.into(),
            expiry_hours: DEFAULT_EXPIRY_HOURS,
        }
    }

    pub fn with_expiry_hours(mut self, hours: i64) -> Self {
        self.expiry_hours = hours;
        self
    }

    /// Persist a key with the current timestamp.
    pub fn save(&self, api_key: &str) -> Result<()> {
        let record = StoredApiKey {
            encrypted_key: obfuscate(api_key),
            timestamp: Utc::now(),
        };
        let json = serde_json::to_string(&record)
            .map_err(|e| EditPixError::Config(format!("failed to encode stored key: {}", e)))?;
        fs::write(&self.path, json)
            .map_err(|e| EditPixError::Config(format!("failed to write key store: {}", e)))
    }

    /// Remove the persisted key, if any.
    pub fn clear(&self) {
        let _ = fs::remove_file(&self.path);
    }

    /// Time remaining before the stored key expires, or `None` when no
    /// unexpired key is stored.
    pub fn time_until_expiry(&self) -> Option<Duration> {
        let record = self.read_record()?;
        let remaining = Duration::hours(self.expiry_hours) - (Utc::now() - record.timestamp);
        if remaining > Duration::zero() {
            Some(remaining)
        } else {
            None
        }
    }

    fn read_record(&self) -> Option<StoredApiKey> {
        let raw = fs::read_to_string(&self.path).ok()?;
        serde_json::from_str(&raw).ok()
    }

    fn is_expired(&self, record: &StoredApiKey) -> bool {
        Utc::now() - record.timestamp > Duration::hours(self.expiry_hours)
    }
}

impl CredentialProvider for StoredCredential {
    fn api_key(&self) -> Option<String> {
        let record = self.read_record()?;
        if self.is_expired(&record) {
            self.clear();
            return None;
        }
        deobfuscate(&record.encrypted_key)
    }
}

fn obfuscate(api_key: &str) -> String {
    STANDARD.encode(format!("{0}:{1}:{0}", OBFUSCATION_SALT, api_key))
}

fn deobfuscate(encrypted: &str) -> Option<String> {
    let decoded = STANDARD.decode(encrypted).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let parts: Vec<&str> = decoded.split(':').collect();
    if parts.len() == 3 && parts[0] == OBFUSCATION_SALT && parts[2] == OBFUSCATION_SALT {
        Some(parts[1].to_string())
    } else {
        None
    }
}
