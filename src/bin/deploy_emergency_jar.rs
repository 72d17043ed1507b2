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

use anyhow::Context;
use jardeploy::{
  config,
  deployer::{Deployer, CONTRACT_NAME},
  network::Web3Network,
};

#[tokio::main]
async fn main() {
  dotenv::dotenv().ok();
  env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

  match run().await {
    Ok(()) => std::process::exit(0),
    Err(err) => {
      eprintln!("{:?}", err);
      std::process::exit(1);
    }
  }
}

async fn run() -> anyhow::Result<()> {
  let (net, explicit) = match std::env::var("NETWORK") {
    Ok(net) => (net, true),
    Err(_) => ("localhost".to_string(), false),
  };
  let conf = config::load_config(net.as_str(), explicit)
    .with_context(|| format!("could not load config for network {}", net))?;
  let web3 = config::connect(&conf).context("couldnt setup web3")?;
  let network = Web3Network::new(web3, &conf)?;

  let deployer = Deployer::new(network).with_confirmation_timeout(conf.confirmation_timeout());
  deployer
    .run(&mut std::io::stdout())
    .await
    .with_context(|| format!("failed to deploy {} on {}", CONTRACT_NAME, net))?;
  Ok(())
}
