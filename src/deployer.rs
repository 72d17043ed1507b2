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

use crate::{error::Error, network::Network, utils, Result};
use ethcontract::Address;
use std::{io::Write, time::Duration};

pub const CONTRACT_NAME: &str = "EmergencyJar";

/// A confirmed deployment.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Deployment {
  pub contract: Address,
  pub owner: Address,
}

impl Deployment {
  pub fn report<W: Write>(&self, out: &mut W) -> Result<()> {
    writeln!(
      out,
      "{} deployed to:  {}",
      CONTRACT_NAME,
      utils::to_checksum(&self.contract)
    )?;
    writeln!(
      out,
      "{} owner address:  {}",
      CONTRACT_NAME,
      utils::to_checksum(&self.owner)
    )?;
    Ok(())
  }
}

pub struct Deployer<N> {
  network: N,
  confirmation_timeout: Option<Duration>,
}

impl<N: Network> Deployer<N> {
  pub fn new(network: N) -> Self {
    Self {
      network,
      confirmation_timeout: None,
    }
  }

  pub fn with_confirmation_timeout(mut self, timeout: Option<Duration>) -> Self {
    self.confirmation_timeout = timeout;
    self
  }

  pub fn network(&self) -> &N {
    &self.network
  }

  /// Deploys a fresh `EmergencyJar` from the first signer and writes the
  /// report to `out`. Nothing is written unless the deployment is confirmed.
  ///
  /// Every call submits a new deployment transaction.
  pub async fn run<W: Write>(&self, out: &mut W) -> Result<Deployment> {
    let owner = self
      .network
      .signers()
      .await?
      .into_iter()
      .next()
      .ok_or_else(|| Error::Environment("no signer configured".to_string()))?;
    log::info!("deployer address {:?}", owner.address());

    let factory = self.network.contract_factory(CONTRACT_NAME)?;
    let pending = self.network.deploy(factory, &owner);
    let contract = pending.confirmed(self.confirmation_timeout).await?;
    log::info!("{} confirmed at {:?}", CONTRACT_NAME, contract);

    let deployment = Deployment {
      contract,
      owner: owner.address(),
    };
    deployment.report(out)?;
    Ok(deployment)
  }
}
