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

use crate::{
  artifacts::{self, ContractFactory},
  config::Config,
  error::Error,
  Result,
};
use ethcontract::{
  contract::Instance, transport::DynTransport, web3::types::BlockNumber, Account, Address,
  PrivateKey, Web3, U256,
};
use futures::future::{FutureExt, LocalBoxFuture};
use std::{future::Future, path::PathBuf, str::FromStr, time::Duration};

pub type Signer = Account;

/// A submitted deployment whose address is only known once the network
/// confirms it.
pub struct PendingContract<'a> {
  confirmation: LocalBoxFuture<'a, Result<Address>>,
}

impl<'a> PendingContract<'a> {
  pub fn new<F>(confirmation: F) -> Self
  where
    F: Future<Output = Result<Address>> + 'a,
  {
    Self {
      confirmation: confirmation.boxed_local(),
    }
  }

  /// Waits for confirmation. With no timeout the wait is unbounded; an
  /// elapsed timeout stops waiting but cannot withdraw the transaction.
  pub async fn confirmed(self, timeout: Option<Duration>) -> Result<Address> {
    match timeout {
      Some(limit) => tokio::time::timeout(limit, self.confirmation)
        .await
        .map_err(|_| Error::ConfirmationTimeout(limit))?,
      None => self.confirmation.await,
    }
  }
}

/// What a deployment needs from the chain: who signs, what gets deployed, and
/// a way to submit it.
pub trait Network {
  type Factory;

  fn signers(&self) -> LocalBoxFuture<'_, Result<Vec<Signer>>>;

  fn contract_factory(&self, name: &str) -> Result<Self::Factory>;

  fn deploy(&self, factory: Self::Factory, deployer: &Signer) -> PendingContract<'_>;
}

/// JSON-RPC node plus a Hardhat artifacts directory.
#[derive(Clone)]
pub struct Web3Network {
  web3: Web3<DynTransport>,
  account: Option<Signer>,
  artifacts_dir: PathBuf,
  confirmations: usize,
}

impl Web3Network {
  pub fn new(web3: Web3<DynTransport>, conf: &Config) -> Result<Self> {
    let account = match conf.private_key() {
      Some(key) => {
        let priv_key = PrivateKey::from_str(key)
          .map_err(|e| Error::Environment(format!("couldnt parse private key: {}", e)))?;
        Some(Account::Offline(priv_key, Some(conf.chain_id)))
      }
      None => None,
    };
    Ok(Self {
      web3,
      account,
      artifacts_dir: PathBuf::from(&conf.artifacts_dir),
      confirmations: conf.confirmations,
    })
  }

  /// Next nonce for `address`, counting transactions still in the mempool so
  /// a rerun does not collide with an earlier deployment that is not mined yet.
  pub async fn pending_nonce(&self, address: Address) -> Result<U256> {
    let nonce = self
      .web3
      .eth()
      .transaction_count(address, Some(BlockNumber::Pending))
      .await?;
    Ok(nonce)
  }
}

impl Network for Web3Network {
  type Factory = ContractFactory;

  fn signers(&self) -> LocalBoxFuture<'_, Result<Vec<Signer>>> {
    async move {
      if let Some(account) = &self.account {
        return Ok(vec![account.clone()]);
      }
      // no key configured, fall back to the node's unlocked accounts
      let accounts = self.web3.eth().accounts().await?;
      Ok::<_, Error>(
        accounts
          .into_iter()
          .map(|address| Account::Local(address, None))
          .collect(),
      )
    }
    .boxed_local()
  }

  fn contract_factory(&self, name: &str) -> Result<ContractFactory> {
    artifacts::resolve(&self.artifacts_dir, name)
  }

  fn deploy(&self, factory: ContractFactory, deployer: &Signer) -> PendingContract<'_> {
    let from = deployer.clone();
    PendingContract::new(async move {
      let nonce = self.pending_nonce(from.address()).await?;
      log::info!(
        "deploying {} from {:?} with nonce {}",
        factory.name,
        from.address(),
        nonce
      );
      let instance = Instance::builder(self.web3.clone(), factory.contract, ())?
        .from(from)
        .nonce(nonce)
        .confirmations(self.confirmations)
        .deploy()
        .await?;
      Ok::<Address, Error>(instance.address())
    })
  }
}
