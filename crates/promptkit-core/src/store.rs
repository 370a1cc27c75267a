//! Saved prompt history.
//!
//! The [`PromptStore`] trait is the seam for "save to network". The only
//! implementation, [`LocalStore`], keeps one JSON file per wallet address under a
//! store directory and hands back a simulated transaction hash, so the rest of
//! the tool behaves as if the record had been written on-chain.
//!
//! ## Layout
//!
//! ```text
//! <store_dir>/
//! └── prompts_<address>.json    # [PromptRecord, ...] in save order
//! ```

use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tokio::sync::Mutex;

use crate::error::{PromptKitError, Result};
use crate::estimator;
use crate::template::Template;
use crate::wallet::{normalize_address, Wallet};

/// One saved prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub prompt_id: String,
    pub template_name: String,
    pub generated_prompt: String,
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub category: String,
}

impl PromptRecord {
    /// Build a record for `generated_prompt`, produced from `template` at `timestamp`.
    ///
    /// The id is `<timestamp>-<9 hex chars>`, derived from the template id and text.
    pub fn new(template: &Template, generated_prompt: impl Into<String>, timestamp: u64) -> Self {
        let generated_prompt = generated_prompt.into();
        let mut hasher = Sha256::new();
        hasher.update(template.id.as_bytes());
        hasher.update(generated_prompt.as_bytes());
        hasher.update(timestamp.to_be_bytes());
        let digest = hex::encode(hasher.finalize());

        Self {
            prompt_id: format!("{timestamp}-{}", &digest[..9]),
            template_name: template.name.clone(),
            generated_prompt,
            timestamp,
            category: template.category.clone(),
        }
    }

    /// Size of the record as serialized JSON, used for cost estimates.
    pub fn size_bytes(&self) -> usize {
        serde_json::to_vec(self).map(|v| v.len()).unwrap_or(0)
    }
}

/// Result of a successful save.
#[derive(Debug, Clone, Serialize)]
pub struct SaveReceipt {
    pub tx_hash: String,
    pub prompt_id: String,
    pub size_bytes: usize,
    /// Six-decimal cost string, see [`estimator::format_cost`].
    pub estimated_cost: String,
}

/// Every prompt history backend implements this trait.
#[async_trait]
pub trait PromptStore: Send + Sync {
    /// Backend name for user-facing output.
    fn name(&self) -> &'static str;

    /// Save `record` for `wallet`. `None` means no wallet is connected.
    async fn save(&self, wallet: Option<&Wallet>, record: PromptRecord) -> Result<SaveReceipt>;

    /// Records saved by `address`, newest first. Unknown addresses yield an empty list.
    async fn list(&self, address: &str) -> Result<Vec<PromptRecord>>;
}

/// JSON-file prompt store.
pub struct LocalStore {
    dir: PathBuf,
    // Serializes read-modify-write cycles within one process.
    lock: Mutex<()>,
}

impl LocalStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn file_for(&self, address: &str) -> PathBuf {
        self.dir.join(format!("prompts_{address}.json"))
    }

    async fn read_records(&self, path: &Path) -> Result<Vec<PromptRecord>> {
        let contents = match tokio::fs::read_to_string(path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        serde_json::from_str(&contents).map_err(|e| PromptKitError::StoreCorrupt {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

#[async_trait]
impl PromptStore for LocalStore {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn save(&self, wallet: Option<&Wallet>, record: PromptRecord) -> Result<SaveReceipt> {
        let wallet = wallet.ok_or(PromptKitError::WalletNotConnected)?;
        wallet.ensure_supported_network()?;

        let size_bytes = record.size_bytes();
        let estimated_cost = estimator::format_cost(estimator::estimate_storage_cost(size_bytes));
        tracing::debug!(size_bytes, %estimated_cost, "estimated storage cost");

        let _guard = self.lock.lock().await;
        let path = self.file_for(&wallet.address);
        let mut records = self.read_records(&path).await?;

        let tx_hash = simulated_tx_hash(&wallet.address, &record);
        let prompt_id = record.prompt_id.clone();
        records.push(record);

        tokio::fs::create_dir_all(&self.dir).await?;
        let json = serde_json::to_string_pretty(&records)
            .map_err(|e| PromptKitError::Other(e.into()))?;
        tokio::fs::write(&path, json).await?;

        tracing::info!(path = %path.display(), %tx_hash, "prompt saved");
        Ok(SaveReceipt {
            tx_hash,
            prompt_id,
            size_bytes,
            estimated_cost,
        })
    }

    async fn list(&self, address: &str) -> Result<Vec<PromptRecord>> {
        let address = normalize_address(address)?;
        let mut records = self.read_records(&self.file_for(&address)).await?;
        records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        Ok(records)
    }
}

/// `0x` + hex SHA-256 of address, record and timestamp.
fn simulated_tx_hash(address: &str, record: &PromptRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(address.as_bytes());
    hasher.update(record.prompt_id.as_bytes());
    hasher.update(record.generated_prompt.as_bytes());
    hasher.update(record.timestamp.to_be_bytes());
    format!("0x{}", hex::encode(hasher.finalize()))
}

/// Current time in milliseconds since the Unix epoch.
pub fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
