//! The Maglev lookup table: owns the node set and the slot array, and
//! implements `init`/`add`/`remove`/`populate`, ported from
//! `original_source/src/maglev.c`.

use crate::error::MaglevError;
use crate::node::Node;

/// Sentinel meaning "no node owns this slot", matching the reference's
/// `UINT32_MAX`.
pub const UNASSIGNED: u32 = u32::MAX;

/// Table size used by the reference when `init` isn't given an explicit
/// size (`original_source/include/maglev.h`'s `DEFAULT_TABLE_SIZE`).
pub const DEFAULT_TABLE_SIZE: u32 = 65537;

/// Node-count ceiling used by the reference (`MAX_NODES`). Each table
/// instance can override this via `with_max_nodes`.
pub const DEFAULT_MAX_NODES: usize = 1000;

/// Per-node slot counts returned by `per_node_counts`, indexed the same
/// way as the node list, plus the number of still-`UNASSIGNED` slots.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotCounts {
    pub per_node: Vec<u32>,
    pub unassigned: u32,
}

/// An owned Maglev lookup table. Unlike the reference's process-wide
/// global, callers may hold as many independent tables as they like (see
/// spec.md §9's design note).
#[derive(Debug, Clone)]
pub struct MaglevTable {
    size: u32,
    slots: Vec<u32>,
    nodes: Vec<Node>,
    max_nodes: usize,
}

impl MaglevTable {
    /// Builds a table of size `next_prime(max(requested_size, 2))`, with
    /// no nodes and every slot `UNASSIGNED`.
    pub fn init(requested_size: u32) -> Self {
        Self::with_max_nodes(requested_size, DEFAULT_MAX_NODES)
    }

    /// `init` with the reference's own default size, for callers that
    /// don't have a specific size in mind.
    pub fn init_with_default_size() -> Self {
        Self::init(DEFAULT_TABLE_SIZE)
    }

    /// Like `init`, but with a caller-chosen node-count ceiling instead of
    /// the reference's fixed `MAX_NODES`.
    pub fn with_max_nodes(requested_size: u32, max_nodes: usize) -> Self {
        let size = next_prime(requested_size.max(2));
        MaglevTable {
            size,
            slots: vec![UNASSIGNED; size as usize],
            nodes: Vec::new(),
            max_nodes,
        }
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    pub fn find_index(&self, name: &str) -> Option<usize> {
        self.nodes.iter().position(|n| n.name() == name)
    }

    /// The node index stored at `slot`, or `None` if `slot` is out of
    /// range or `UNASSIGNED`.
    pub fn lookup(&self, slot: u32) -> Option<u32> {
        let value = *self.slots.get(slot as usize)?;
        if value == UNASSIGNED {
            None
        } else {
            Some(value)
        }
    }

    /// Raw slot array, including `UNASSIGNED` sentinels.
    pub fn slots(&self) -> &[u32] {
        &self.slots
    }

    /// Adds a node and repopulates the table. Rejects empty/duplicate
    /// names and a node count beyond the configured ceiling.
    pub fn add(&mut self, name: &str) -> Result<(), MaglevError> {
        if name.is_empty() {
            return Err(MaglevError::InvalidName {
                reason: "node name must not be empty",
            });
        }
        if self.find_index(name).is_some() {
            return Err(MaglevError::DuplicateName(name.to_string()));
        }
        if self.nodes.len() >= self.max_nodes {
            return Err(MaglevError::CapacityExceeded {
                max: self.max_nodes,
            });
        }

        let node = Node::create(name, self.size)?;
        self.nodes.push(node);
        self.populate();
        Ok(())
    }

    /// Removes a node if present, preserving the relative order of the
    /// survivors (left-compaction, as in the reference). Idempotent:
    /// removing an absent name succeeds without error.
    pub fn remove(&mut self, name: &str) {
        if let Some(index) = self.find_index(name) {
            self.nodes.remove(index);
            self.populate();
        }
    }

    /// Assignment counts per node index, plus the unassigned count. Sums
    /// to `size()`.
    pub fn per_node_counts(&self) -> SlotCounts {
        let mut per_node = vec![0u32; self.nodes.len()];
        let mut unassigned = 0u32;
        for &slot in &self.slots {
            if slot == UNASSIGNED {
                unassigned += 1;
            } else if let Some(count) = per_node.get_mut(slot as usize) {
                *count += 1;
            }
        }
        SlotCounts {
            per_node,
            unassigned,
        }
    }

    /// The core Maglev algorithm: round-robin fill of every slot from each
    /// active node's preference list, in node-list order.
    fn populate(&mut self) {
        self.slots.fill(UNASSIGNED);
        for node in &mut self.nodes {
            node.reset_cursor();
        }

        if self.nodes.is_empty() || self.nodes.iter().all(|n| !n.is_active()) {
            return;
        }

        let mut filled = 0u32;
        while filled < self.size {
            for index in 0..self.nodes.len() {
                if !self.nodes[index].is_active() {
                    continue;
                }

                while let Some(slot) = self.nodes[index].next_preferred_slot() {
                    if self.slots[slot as usize] == UNASSIGNED {
                        self.slots[slot as usize] = index as u32;
                        filled += 1;
                        break;
                    }
                }

                if filled == self.size {
                    return;
                }
            }
        }
    }
}

/// Trial-division primality check, matching the reference's `is_prime`.
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut i = 3u64;
    while i * i <= n as u64 {
        if n % (i as u32) == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Smallest prime `>= n`, matching the reference's `next_prime`.
pub fn next_prime(mut n: u32) -> u32 {
    while !is_prime(n) {
        n += 1;
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_prime_matches_reference_table() {
        assert_eq!(next_prime(0), 2);
        assert_eq!(next_prime(1), 2);
        assert_eq!(next_prime(2), 2);
        assert_eq!(next_prime(7), 7);
        assert_eq!(next_prime(8), 11);
        assert_eq!(next_prime(100), 101);
    }

    #[test]
    fn init_size_is_always_prime() {
        for requested in [0u32, 1, 2, 4, 100, 1000] {
            let table = MaglevTable::init(requested);
            assert!(is_prime(table.size()));
            assert!(table.size() >= 2);
        }
    }

    #[test]
    fn s1_fresh_table_is_unassigned() {
        let table = MaglevTable::init(7);
        assert_eq!(table.size(), 7);
        assert!(table.slots().iter().all(|&s| s == UNASSIGNED));
    }

    #[test]
    fn s2_single_node_owns_every_slot() {
        let mut table = MaglevTable::init(7);
        table.add("A").unwrap();
        assert!(table.slots().iter().all(|&s| s == 0));
    }

    #[test]
    fn s3_two_nodes_split_evenly() {
        let mut table = MaglevTable::init(7);
        table.add("A").unwrap();
        table.add("B").unwrap();
        let counts = table.per_node_counts();
        assert_eq!(counts.unassigned, 0);
        assert_eq!(counts.per_node.iter().sum::<u32>(), 7);
        assert!(counts.per_node.iter().all(|&c| c > 0));
        let spread = counts.per_node.iter().max().unwrap() - counts.per_node.iter().min().unwrap();
        assert!(spread <= 1);
    }

    #[test]
    fn s4_three_nodes_bounded_spread() {
        let mut table = MaglevTable::init(5);
        for name in ["x", "y", "z"] {
            table.add(name).unwrap();
        }
        let counts = table.per_node_counts();
        assert_eq!(counts.unassigned, 0);
        assert_eq!(counts.per_node.iter().sum::<u32>(), 5);
        assert!(counts.per_node.iter().all(|&c| c >= 1));
        let spread = counts.per_node.iter().max().unwrap() - counts.per_node.iter().min().unwrap();
        assert!(spread <= 1);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut table = MaglevTable::init(7);
        table.add("A").unwrap();
        let before = table.slots().to_vec();
        table.remove("ghost");
        table.remove("ghost");
        assert_eq!(table.slots(), before.as_slice());
    }

    #[test]
    fn add_then_remove_restores_prior_slots() {
        let mut table = MaglevTable::init(101);
        table.add("A").unwrap();
        table.add("B").unwrap();
        let before = table.slots().to_vec();
        table.add("C").unwrap();
        table.remove("C");
        assert_eq!(table.slots(), before.as_slice());
    }

    #[test]
    fn duplicate_add_is_rejected_and_leaves_table_unchanged() {
        let mut table = MaglevTable::init(7);
        table.add("A").unwrap();
        let before = table.slots().to_vec();
        let err = table.add("A").unwrap_err();
        assert_eq!(err, MaglevError::DuplicateName("A".to_string()));
        assert_eq!(table.slots(), before.as_slice());
    }

    #[test]
    fn capacity_exceeded_is_reported() {
        let mut table = MaglevTable::with_max_nodes(7, 1);
        table.add("A").unwrap();
        let err = table.add("B").unwrap_err();
        assert_eq!(err, MaglevError::CapacityExceeded { max: 1 });
    }

    #[test]
    fn all_inactive_nodes_leave_table_unassigned() {
        let mut table = MaglevTable::init(7);
        table.add("A").unwrap();
        table.add("B").unwrap();
        for node in table.nodes.iter_mut() {
            node.set_active(false);
        }
        table.populate();
        assert!(table.slots().iter().all(|&s| s == UNASSIGNED));
    }

    #[test]
    fn remove_compacts_node_indices() {
        let mut table = MaglevTable::init(11);
        table.add("A").unwrap();
        table.add("B").unwrap();
        table.add("C").unwrap();
        table.remove("A");
        assert_eq!(table.find_index("B"), Some(0));
        assert_eq!(table.find_index("C"), Some(1));
        // every slot must point at a valid index after compaction
        assert!(table.slots().iter().all(|&s| (s as usize) < table.node_count()));
    }
}
