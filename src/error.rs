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

use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("environment error: {0}")]
  Environment(String),
  #[error("artifact for contract {name} not found under {dir:?}")]
  NotFound { name: String, dir: PathBuf },
  #[error("multiple artifacts for contract {name}: {paths:?}")]
  AmbiguousArtifact { name: String, paths: Vec<PathBuf> },
  #[error("contract {0} has no bytecode, it is abstract or an interface")]
  NotDeployable(String),
  #[error("artifact error: {0}")]
  Artifact(#[from] ethcontract_common::errors::ArtifactError),
  #[error("deployment error: {0}")]
  Deploy(#[from] ethcontract::errors::DeployError),
  #[error("web3 error: {0}")]
  Web3(#[from] ethcontract::web3::Error),
  #[error("ConfirmationTimeout: gave up after {0:?}, an already submitted deployment may still be mined")]
  ConfirmationTimeout(Duration),
  #[error("config error: {0}")]
  Config(#[from] config::ConfigError),
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),
}
