//! Owner identification and per-owner data storage.
//!
//! ## Owner
//!
//! The game is strictly two-sided: the human player and the scripted AI.
//!
//! ## OwnerMap
//!
//! Fixed two-slot storage indexable by `Owner`, used for gold totals,
//! setup queues and anything else kept per side.

use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};

/// The side a unit belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Owner {
    /// The local player.
    Human,
    /// The in-process scripted opponent.
    Ai,
}

impl Owner {
    /// Both owners, human first.
    pub const ALL: [Owner; 2] = [Owner::Human, Owner::Ai];

    /// The other side.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Owner::Human => Owner::Ai,
            Owner::Ai => Owner::Human,
        }
    }

    /// The two rows this owner may deploy into during setup.
    ///
    /// The AI always deploys on the far side regardless of how a
    /// presentation layer flips the board.
    #[must_use]
    pub const fn setup_rows(self) -> [u8; 2] {
        match self {
            Owner::Human => [0, 1],
            Owner::Ai => [8, 9],
        }
    }

    const fn index(self) -> usize {
        match self {
            Owner::Human => 0,
            Owner::Ai => 1,
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::Human => write!(f, "human"),
            Owner::Ai => write!(f, "ai"),
        }
    }
}

/// Per-owner data storage with O(1) access.
///
/// ## Example
///
/// ```
/// use galactic_gladiators::core::{Owner, OwnerMap};
///
/// let mut gold: OwnerMap<u32> = OwnerMap::default();
/// gold[Owner::Ai] += 3;
/// assert_eq!(gold[Owner::Human], 0);
/// assert_eq!(gold[Owner::Ai], 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OwnerMap<T> {
    data: [T; 2],
}

impl<T> OwnerMap<T> {
    /// Create a map with values from a factory function.
    pub fn new(factory: impl Fn(Owner) -> T) -> Self {
        Self {
            data: [factory(Owner::Human), factory(Owner::Ai)],
        }
    }

    /// Get a reference to an owner's data.
    #[must_use]
    pub fn get(&self, owner: Owner) -> &T {
        &self.data[owner.index()]
    }

    /// Get a mutable reference to an owner's data.
    pub fn get_mut(&mut self, owner: Owner) -> &mut T {
        &mut self.data[owner.index()]
    }

    /// Iterate over `(Owner, &T)` pairs, human first.
    pub fn iter(&self) -> impl Iterator<Item = (Owner, &T)> {
        Owner::ALL.into_iter().zip(self.data.iter())
    }

    /// Iterate over `(Owner, &mut T)` pairs, human first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (Owner, &mut T)> {
        Owner::ALL.into_iter().zip(self.data.iter_mut())
    }
}

impl<T> Index<Owner> for OwnerMap<T> {
    type Output = T;

    fn index(&self, owner: Owner) -> &Self::Output {
        self.get(owner)
    }
}

impl<T> IndexMut<Owner> for OwnerMap<T> {
    fn index_mut(&mut self, owner: Owner) -> &mut Self::Output {
        self.get_mut(owner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opponent() {
        assert_eq!(Owner::Human.opponent(), Owner::Ai);
        assert_eq!(Owner::Ai.opponent(), Owner::Human);
    }

    #[test]
    fn test_setup_rows() {
        assert_eq!(Owner::Human.setup_rows(), [0, 1]);
        assert_eq!(Owner::Ai.setup_rows(), [8, 9]);
    }

    #[test]
    fn test_owner_map_factory() {
        let map = OwnerMap::new(|owner| owner == Owner::Ai);
        assert!(!map[Owner::Human]);
        assert!(map[Owner::Ai]);

        let owners: Vec<_> = map.iter().map(|(owner, _)| owner).collect();
        assert_eq!(owners, vec![Owner::Human, Owner::Ai]);
    }

    #[test]
    fn test_owner_serde_lowercase() {
        let json = serde_json::to_string(&Owner::Ai).unwrap();
        assert_eq!(json, "\"ai\"");
        let back: Owner = serde_json::from_str("\"human\"").unwrap();
        assert_eq!(back, Owner::Human);
    }
}
