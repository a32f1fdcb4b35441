//! A single backend node: its name, active flag, and the preference
//! permutation the populate round-robin consults.

use crate::error::MaglevError;
use crate::hash;

/// Upper bound on a node name's length, matching the reference's
/// `MAX_NODE_NAME_LEN` (`original_source/include/maglev.h`).
pub const MAX_NODE_NAME_LEN: usize = 256;

/// A node descriptor: name, activity flag, and its preference permutation
/// over `[0, table_size)` plus a cursor used during `populate`.
#[derive(Debug, Clone)]
pub struct Node {
    name: String,
    active: bool,
    preference: Vec<u32>,
    cursor: usize,
}

impl Node {
    /// Builds a node's preference permutation: `preference[i] = (offset +
    /// i * skip) mod table_size`, which is a permutation of `[0,
    /// table_size)` because `table_size` is prime and `skip` is in
    /// `[1, table_size)`.
    pub fn create(name: &str, table_size: u32) -> Result<Self, MaglevError> {
        if name.is_empty() {
            return Err(MaglevError::InvalidName {
                reason: "node name must not be empty",
            });
        }
        if name.len() >= MAX_NODE_NAME_LEN {
            return Err(MaglevError::InvalidName {
                reason: "node name exceeds the maximum length",
            });
        }

        let offset = hash::offset(name, table_size) as u64;
        let skip = hash::skip(name, table_size) as u64;
        let m = table_size as u64;

        let preference = (0..table_size as u64)
            .map(|i| ((offset + i * skip) % m) as u32)
            .collect();

        Ok(Node {
            name: name.to_string(),
            active: true,
            preference,
            cursor: 0,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    pub fn preference(&self) -> &[u32] {
        &self.preference
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Resets the cursor to the start of the preference list; called at
    /// the start of every `populate`.
    pub fn reset_cursor(&mut self) {
        self.cursor = 0;
    }

    /// Returns the next preferred slot and advances the cursor past it.
    /// `None` once the cursor has exhausted the permutation.
    pub fn next_preferred_slot(&mut self) -> Option<u32> {
        let slot = *self.preference.get(self.cursor)?;
        self.cursor += 1;
        Some(slot)
    }
}
