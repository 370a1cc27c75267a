//! Wallet identity used to gate and key saved prompts.
//!
//! There is no signing or chain access here: a wallet is an address plus the
//! chain id it claims to be on.

use serde::{Deserialize, Serialize};

use crate::error::{PromptKitError, Result};
use crate::network::Network;

/// A connected wallet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wallet {
    /// Lowercased `0x`-prefixed address.
    pub address: String,
    pub chain_id: u64,
}

impl Wallet {
    /// Validate `address` and connect on `chain_id`.
    pub fn connect(address: &str, chain_id: u64) -> Result<Self> {
        let address = normalize_address(address)?;
        tracing::info!(event = "wallet_connected", %address, chain_id);
        Ok(Self { address, chain_id })
    }

    /// Fail with [`PromptKitError::WrongNetwork`] unless on a supported chain.
    pub fn ensure_supported_network(&self) -> Result<()> {
        if Network::is_supported_chain(self.chain_id) {
            Ok(())
        } else {
            Err(PromptKitError::WrongNetwork {
                chain_id: self.chain_id,
            })
        }
    }

    /// `0x1234…abcd` form for terminal output.
    pub fn short_address(&self) -> String {
        format!("{}…{}", &self.address[..6], &self.address[self.address.len() - 4..])
    }
}

/// Check `0x` + 40 hex characters and lowercase the result.
pub fn normalize_address(address: &str) -> Result<String> {
    let trimmed = address.trim();
    let hex_part = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .ok_or_else(|| PromptKitError::InvalidWalletAddress(address.to_string()))?;

    if hex_part.len() != 40 || !hex_part.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(PromptKitError::InvalidWalletAddress(address.to_string()));
    }
    Ok(format!("0x{}", hex_part.to_ascii_lowercase()))
}
