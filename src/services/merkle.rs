use crate::domain::primitives::{Address, Amount, Bytes32};
use sha3::{Digest, Keccak256};

pub fn keccak256(data: &[u8]) -> Bytes32 {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    Bytes32(hasher.finalize().into())
}

/// Hash an internal node. Children are sorted bytewise before hashing so a
/// verifier needs no left/right direction bits.
pub fn hash_pair(a: Bytes32, b: Bytes32) -> Bytes32 {
    let mut buf = [0u8; 64];
    if a <= b {
        buf[..32].copy_from_slice(&a.0);
        buf[32..].copy_from_slice(&b.0);
    } else {
        buf[..32].copy_from_slice(&b.0);
        buf[32..].copy_from_slice(&a.0);
    }
    keccak256(&buf)
}

/// Leaf commitment for one allocation. The entry is packed as three 32-byte
/// big-endian words (address, index, amount) and hashed twice, matching the
/// encoding the published manifests use.
pub fn leaf_hash(address: Address, index: u64, amount: Amount) -> Bytes32 {
    let mut enc = [0u8; 96];
    enc[12..32].copy_from_slice(address.as_bytes());
    enc[56..64].copy_from_slice(&index.to_be_bytes());
    enc[80..96].copy_from_slice(&amount.raw().to_be_bytes());
    keccak256(&keccak256(&enc).0)
}

/// Build every level of the tree, leaves first, root level last. An odd node
/// at the end of a level pairs with itself.
pub fn build_levels(leaves: &[Bytes32]) -> Vec<Vec<Bytes32>> {
    let mut levels = vec![leaves.to_vec()];
    while levels.last().map(|l| l.len()).unwrap_or(0) > 1 {
        let prev = &levels[levels.len() - 1];
        let mut next = Vec::with_capacity((prev.len() + 1) / 2);
        for pair in prev.chunks(2) {
            let left = pair[0];
            let right = if pair.len() == 2 { pair[1] } else { pair[0] };
            next.push(hash_pair(left, right));
        }
        levels.push(next);
    }
    levels
}

pub fn root_of(levels: &[Vec<Bytes32>]) -> anyhow::Result<Bytes32> {
    levels
        .last()
        .and_then(|l| l.first())
        .copied()
        .ok_or_else(|| anyhow::anyhow!("tree has no leaves"))
}

/// Collect the sibling path for the leaf at `index`. A node without a
/// sibling (odd tail) contributes itself, mirroring `build_levels`.
pub fn proof_for(levels: &[Vec<Bytes32>], index: usize) -> anyhow::Result<Vec<Bytes32>> {
    let leaf_count = levels.first().map(|l| l.len()).unwrap_or(0);
    if index >= leaf_count {
        anyhow::bail!("leaf index {} out of range ({} leaves)", index, leaf_count);
    }
    let mut proof = Vec::new();
    let mut pos = index;
    for level in &levels[..levels.len().saturating_sub(1)] {
        let sibling = pos ^ 1;
        let node = if sibling < level.len() {
            level[sibling]
        } else {
            level[pos]
        };
        proof.push(node);
        pos /= 2;
    }
    Ok(proof)
}

/// Fold the leaf up through the proof and compare with the expected root.
pub fn verify_proof(root: Bytes32, leaf: Bytes32, proof: &[Bytes32]) -> bool {
    let mut acc = leaf;
    for node in proof {
        acc = hash_pair(acc, *node);
    }
    acc == root
}
