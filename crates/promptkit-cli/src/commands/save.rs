use std::path::Path;
use std::time::Duration;

use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};

use promptkit_core::error::PromptKitError;
use promptkit_core::session::Session;
use promptkit_core::store::{self, LocalStore, PromptRecord, PromptStore};
use promptkit_core::wallet::Wallet;

use crate::output;
use crate::values::{self, ValueArgs};

/// Generate a prompt and record it in the wallet's history.
///
/// Saving requires a complete prompt (no preview gaps) and a wallet on a
/// supported network. The record lands in the local store; the transaction
/// hash in the receipt is simulated.
pub async fn run(
    config_path: &Path,
    id: &str,
    args: &ValueArgs,
    wallet_address: Option<&str>,
    chain_id: Option<u64>,
) -> Result<()> {
    let ctx = super::load_context(config_path)?;
    let network = ctx.config.network()?;
    let template = ctx.catalog.require(id)?;

    output::print_header(&format!("promptkit save: {id}"));

    let mut session = Session::start(template);
    values::fill_session(&mut session, args)?;

    output::print_step(1, 3, "Generating prompt");
    let validation = session.validate();
    if !validation.is_valid {
        for error in &validation.errors {
            output::print_error(error);
        }
        anyhow::bail!("missing required variables");
    }
    let prompt = session.generate();

    output::print_step(2, 3, "Connecting wallet");
    let wallet = match wallet_address {
        Some(address) => Some(Wallet::connect(address, chain_id.unwrap_or(network.chain_id))?),
        None => None,
    };
    if let Some(wallet) = &wallet {
        output::print_key_value("Wallet", &wallet.short_address());
        output::print_key_value("Chain", &wallet.chain_id.to_string());
    }

    output::print_step(3, 3, &format!("Saving to {}", network.display_name));
    let record = PromptRecord::new(session.template(), prompt, store::now_millis());
    let store = LocalStore::new(&ctx.config.store_dir);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::with_template("  {spinner} {msg}")?);
    spinner.set_message(format!("Writing to {} store", store.name()));
    spinner.enable_steady_tick(Duration::from_millis(80));
    let result = store.save(wallet.as_ref(), record).await;
    spinner.finish_and_clear();

    let receipt = match result {
        Ok(receipt) => receipt,
        Err(PromptKitError::WalletNotConnected) => {
            anyhow::bail!("please connect a wallet (--wallet or PROMPTKIT_WALLET) to save prompts")
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(
        event = "prompt_saved",
        template_name = %session.template().name,
        category = %session.template().category,
        tx_hash = %receipt.tx_hash
    );

    output::print_success(&format!("Saved! Tx: {}...", &receipt.tx_hash[..10]));
    output::print_key_value("Prompt id", &receipt.prompt_id);
    output::print_key_value(
        "Estimated cost",
        &format!("{} {} ({} bytes)", receipt.estimated_cost, network.currency, receipt.size_bytes),
    );
    output::print_key_value("Explorer", &network.tx_url(&receipt.tx_hash));
    output::print_key_value("Store", &store.dir().display().to_string());

    Ok(())
}
