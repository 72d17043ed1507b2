// Copyright 2021-2022 Semantic Network Ltd.
// This file is part of jardeploy.

// jardeploy is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// jardeploy is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.

// You should have received a copy of the GNU General Public License
// along with jardeploy.  If not, see <http://www.gnu.org/licenses/>.

use crate::Result;
use ethcontract::{transport::DynTransport, Http, Web3};
use serde::{Deserialize, Serialize};
use std::{path::Path, time::Duration};

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
  pub eth_url: String,
  pub chain_id: u64,
  pub private_key: Option<String>,
  pub artifacts_dir: String,
  pub confirmations: usize,
  pub confirmation_timeout_secs: Option<u64>,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      eth_url: "http://localhost:8545".to_string(),
      chain_id: 1337,
      private_key: None,
      artifacts_dir: "artifacts".to_string(),
      confirmations: 0,
      confirmation_timeout_secs: None,
    }
  }
}

impl Config {
  pub fn confirmation_timeout(&self) -> Option<Duration> {
    self.confirmation_timeout_secs.map(Duration::from_secs)
  }

  /// Offline signing key, if one is configured.
  pub fn private_key(&self) -> Option<&str> {
    self
      .private_key
      .as_deref()
      .map(str::trim)
      .filter(|k| !k.is_empty())
  }
}

/// Loads `config/config.<network>.json`, then applies `JAR_*` environment overrides.
///
/// A network that was asked for explicitly must have its file; otherwise a
/// missing file falls back to the defaults with a warning.
pub fn load_config(network: &str, required: bool) -> Result<Config> {
  let fp = format!("config/config.{}.json", network);
  if !required && !Path::new(&fp).is_file() {
    log::warn!("{} not found, using default config", fp);
  }
  let mut settings = config::Config::default();
  settings.merge(config::File::with_name(fp.as_str()).required(required))?;
  settings.merge(config::Environment::with_prefix("JAR"))?;
  let conf = settings.try_into::<Config>()?;
  log::debug!(
    "loaded {} config: url {} chain {}",
    network,
    conf.eth_url,
    conf.chain_id
  );
  Ok(conf)
}

pub fn connect(conf: &Config) -> Result<Web3<DynTransport>> {
  let http = Http::new(conf.eth_url.as_str())?;
  Ok(Web3::new(DynTransport::new(http)))
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_file_falls_back_to_defaults() {
    let conf = load_config("no-such-network", false).unwrap();
    assert_eq!(conf.artifacts_dir, "artifacts");
    assert_eq!(conf.confirmations, 0);
  }

  #[test]
  fn explicit_network_needs_its_file() {
    assert!(matches!(
      load_config("no-such-network", true),
      Err(crate::error::Error::Config(_))
    ));
  }

  #[test]
  fn loads_bundled_localhost_file() {
    let conf = load_config("localhost", true).unwrap();
    assert_eq!(conf.chain_id, 1337);
  }

  #[test]
  fn blank_private_key_means_node_accounts() {
    let mut conf = Config::default();
    assert_eq!(conf.private_key(), None);
    conf.private_key = Some("  ".to_string());
    assert_eq!(conf.private_key(), None);
    conf.private_key = Some("0xabc".to_string());
    assert_eq!(conf.private_key(), Some("0xabc"));
  }

  #[test]
  fn timeout_is_opt_in() {
    let mut conf = Config::default();
    assert_eq!(conf.confirmation_timeout(), None);
    conf.confirmation_timeout_secs = Some(30);
    assert_eq!(conf.confirmation_timeout(), Some(Duration::from_secs(30)));
  }
}
