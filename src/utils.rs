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

use ethcontract::Address;
use tiny_keccak::{Hasher, Keccak};

pub fn keccak256(bytes: &[u8]) -> [u8; 32] {
  let mut output = [0u8; 32];
  let mut hasher = Keccak::v256();
  hasher.update(bytes);
  hasher.finalize(&mut output);
  output
}

/// Renders an address in EIP-55 mixed-case checksum form, the way ethers.js
/// prints `contract.address`.
pub fn to_checksum(address: &Address) -> String {
  let lower = hex::encode(address.as_bytes());
  let hash = keccak256(lower.as_bytes());
  let mut out = String::with_capacity(42);
  out.push_str("0x");
  for (i, c) in lower.chars().enumerate() {
    let nibble = if i % 2 == 0 {
      hash[i / 2] >> 4
    } else {
      hash[i / 2] & 0x0f
    };
    if nibble >= 8 {
      out.push(c.to_ascii_uppercase());
    } else {
      out.push(c);
    }
  }
  out
}
