//! Loading an optional paper bank from TOML.
//!
//! See `BankConfig` for the expected schema: a `[[papers]]` array whose
//! entries deserialize straight into `domain::Paper` (sections use the same
//! tagged shape as the JSON API).

use serde::Deserialize;
use tracing::{error, info};

use crate::domain::Paper;

#[derive(Clone, Debug, Deserialize, Default)]
pub struct BankConfig {
  #[serde(default)]
  pub papers: Vec<Paper>,
}

/// Attempt to load `BankConfig` from PAPER_BANK_PATH. On any parsing/IO
/// error, returns None — the built-in seed paper keeps the app useful.
pub fn load_bank_from_env() -> Option<BankConfig> {
  let path = std::env::var("PAPER_BANK_PATH").ok()?;
  match std::fs::read_to_string(&path) {
    Ok(s) => match toml::from_str::<BankConfig>(&s) {
      Ok(cfg) => {
        info!(target: "glosa_backend", %path, papers = cfg.papers.len(), "Loaded paper bank (TOML)");
        Some(cfg)
      }
      Err(e) => {
        error!(target: "glosa_backend", %path, error = %e, "Failed to parse TOML paper bank");
        None
      }
    },
    Err(e) => {
      error!(target: "glosa_backend", %path, error = %e, "Failed to read TOML paper bank file");
      None
    }
  }
}
