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

//! Name-keyed lookup of compiled Hardhat artifacts.

use crate::{error::Error, Result};
use ethcontract_common::{artifact::truffle::TruffleLoader, Contract};
use std::{
  fs,
  path::{Path, PathBuf},
};

/// A compiled contract that is known to be deployable.
#[derive(Clone, Debug)]
pub struct ContractFactory {
  pub name: String,
  pub path: PathBuf,
  pub contract: Contract,
}

/// Resolves `name` under a Hardhat `artifacts` directory.
///
/// The conventional `contracts/<Name>.sol/<Name>.json` location wins, otherwise
/// the whole tree is searched and the name has to be unique.
pub fn resolve(dir: &Path, name: &str) -> Result<ContractFactory> {
  let path = locate(dir, name)?;
  log::debug!("loading artifact {:?}", path);
  let json = fs::read_to_string(&path)?;

  let raw: serde_json::Value = serde_json::from_str(&json)?;
  let bytecode = raw.get("bytecode").and_then(|b| b.as_str()).unwrap_or("");
  if bytecode.trim_start_matches("0x").is_empty() {
    return Err(Error::NotDeployable(name.to_string()));
  }

  let contract = TruffleLoader::new()
    .name(name)
    .load_contract_from_str(&json)?;
  Ok(ContractFactory {
    name: name.to_string(),
    path,
    contract,
  })
}

fn locate(dir: &Path, name: &str) -> Result<PathBuf> {
  let not_found = || Error::NotFound {
    name: name.to_string(),
    dir: dir.to_path_buf(),
  };
  if !dir.is_dir() {
    return Err(not_found());
  }

  let conventional = dir
    .join("contracts")
    .join(format!("{}.sol", name))
    .join(format!("{}.json", name));
  if conventional.is_file() {
    return Ok(conventional);
  }

  let file_name = format!("{}.json", name);
  let mut found = vec![];
  search(dir, &file_name, &mut found)?;
  found.sort();
  match found.len() {
    0 => Err(not_found()),
    1 => Ok(found.remove(0)),
    _ => Err(Error::AmbiguousArtifact {
      name: name.to_string(),
      paths: found,
    }),
  }
}

fn search(dir: &Path, file_name: &str, found: &mut Vec<PathBuf>) -> Result<()> {
  for entry in fs::read_dir(dir)? {
    let path = entry?.path();
    if path.is_dir() {
      // build-info holds whole compiler outputs, not per-contract artifacts
      if path.file_name().map_or(false, |n| n == "build-info") {
        continue;
      }
      search(&path, file_name, found)?;
    } else if path.file_name().map_or(false, |n| n == file_name) {
      found.push(path);
    }
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  const ARTIFACT: &str = r#"{
    "_format": "hh-sol-artifact-1",
    "contractName": "EmergencyJar",
    "sourceName": "contracts/EmergencyJar.sol",
    "abi": [],
    "bytecode": "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe",
    "deployedBytecode": "0x6080604052600080fdfe",
    "linkReferences": {},
    "deployedLinkReferences": {}
  }"#;

  fn write(root: &Path, rel: &str, body: &str) -> PathBuf {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, body).unwrap();
    path
  }

  #[test]
  fn resolves_conventional_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
      dir.path(),
      "contracts/EmergencyJar.sol/EmergencyJar.json",
      ARTIFACT,
    );
    write(
      dir.path(),
      "contracts/EmergencyJar.sol/EmergencyJar.dbg.json",
      r#"{"_format":"hh-sol-dbg-1","buildInfo":"../../build-info/x.json"}"#,
    );

    let factory = resolve(dir.path(), "EmergencyJar").unwrap();
    assert_eq!(factory.name, "EmergencyJar");
    assert_eq!(factory.path, path);
  }

  #[test]
  fn searches_nested_sources() {
    let dir = tempfile::tempdir().unwrap();
    let path = write(
      dir.path(),
      "contracts/jars/Jars.sol/EmergencyJar.json",
      ARTIFACT,
    );
    write(dir.path(), "build-info/EmergencyJar.json", "{}");

    let factory = resolve(dir.path(), "EmergencyJar").unwrap();
    assert_eq!(factory.path, path);
  }

  #[test]
  fn missing_artifact_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "contracts/Other.sol/Other.json", ARTIFACT);

    match resolve(dir.path(), "EmergencyJar") {
      Err(Error::NotFound { name, .. }) => assert_eq!(name, "EmergencyJar"),
      other => panic!("unexpected {:?}", other),
    }
    assert!(matches!(
      resolve(&dir.path().join("nope"), "EmergencyJar"),
      Err(Error::NotFound { .. })
    ));
  }

  #[test]
  fn duplicate_names_are_ambiguous() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "contracts/a/A.sol/EmergencyJar.json", ARTIFACT);
    write(dir.path(), "contracts/b/B.sol/EmergencyJar.json", ARTIFACT);

    match resolve(dir.path(), "EmergencyJar") {
      Err(Error::AmbiguousArtifact { paths, .. }) => assert_eq!(paths.len(), 2),
      other => panic!("unexpected {:?}", other),
    }
  }

  #[test]
  fn interfaces_are_not_deployable() {
    let dir = tempfile::tempdir().unwrap();
    let body = ARTIFACT.replace(
      "0x6080604052348015600f57600080fd5b50603f80601d6000396000f3fe",
      "0x",
    );
    write(
      dir.path(),
      "contracts/EmergencyJar.sol/EmergencyJar.json",
      &body,
    );

    assert!(matches!(
      resolve(dir.path(), "EmergencyJar"),
      Err(Error::NotDeployable(_))
    ));
  }
}
