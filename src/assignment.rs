use std::collections::btree_map::Iter;
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::active::ActiveCapabilities;
use crate::character::CharacterId;
use crate::graph::{ConstraintGraph, GraphId, Slot, SlotId};
use crate::tag::Capability;

/// Globally unique address of a slot: the owning graph plus the slot within it.
///
/// Kept as a structured pair so that no choice of ids can make two different slots collide.
#[derive(Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct SlotKey {
    /// The owning graph.
    pub graph: GraphId,
    /// The slot within `graph`.
    pub slot: SlotId,
}

impl SlotKey {
    /// Address `slot` in `graph`.
    pub fn new(graph: impl Into<GraphId>, slot: impl Into<SlotId>) -> Self {
        Self { graph: graph.into(), slot: slot.into() }
    }
}

impl Display for SlotKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}[{}]", self.graph, self.slot)
    }
}

/// Resolve a key against the graphs of a call.
pub(crate) fn lookup_slot<'a>(graphs: &'a [ConstraintGraph], key: &SlotKey) -> Option<&'a Slot> {
    graphs.iter()
        .find(|graph| graph.id == key.graph)
        .and_then(|graph| graph.slot(&key.slot))
}

/// Reasons a direct edit of an [`Assignment`] may be refused.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum PlacementError {
    /// The key does not name a slot of any supplied graph.
    #[error("no slot {0}")]
    UnknownSlot(SlotKey),
    /// The character does not currently have the slot's capability enabled.
    #[error("character {character} does not have {required} active")]
    Inactive {
        /// The character that was being placed.
        character: CharacterId,
        /// The capability the slot needs.
        required: Capability,
    },
}

/// One entry of an [`Assignment`], as it is written out.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    /// Graph of the occupied slot.
    pub graph: GraphId,
    /// The occupied slot.
    pub slot: SlotId,
    /// Who sits there.
    pub character: CharacterId,
}

/// Slot → character mapping.
///
/// Every slot holds at most one character and every character sits in at most one slot.
/// Only occupied slots are stored.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(into = "Vec<Placement>", from = "Vec<Placement>")]
pub struct Assignment {
    placements: BTreeMap<SlotKey, CharacterId>,
}

impl Assignment {
    /// An assignment with nothing placed.
    pub fn new() -> Self {
        Default::default()
    }

    /// The character in `key`, if any.
    pub fn get(&self, key: &SlotKey) -> Option<CharacterId> {
        self.placements.get(key).copied()
    }

    /// Where `character` sits, if anywhere.
    pub fn slot_of(&self, character: CharacterId) -> Option<&SlotKey> {
        self.placements.iter()
            .find(|(_, placed)| **placed == character)
            .map(|(key, _)| key)
    }

    /// Whether `character` is placed anywhere.
    pub fn contains_character(&self, character: CharacterId) -> bool {
        self.slot_of(character).is_some()
    }

    /// All placements in key order.
    pub fn iter(&self) -> Iter<'_, SlotKey, CharacterId> {
        self.placements.iter()
    }

    /// Number of occupied slots.
    pub fn len(&self) -> usize {
        self.placements.len()
    }

    /// Whether nothing is placed.
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    // callers are responsible for exclusivity
    pub(crate) fn insert_unchecked(&mut self, key: SlotKey, character: CharacterId) {
        self.placements.insert(key, character);
    }

    /// Place `character` into `key` by hand, the way a user dropping a hero onto a slot would.
    ///
    /// The character is first removed from any other slot it occupies, then any current occupant of `key` is displaced and returned.
    /// Refused without changes if the slot does not exist or the character cannot currently fill it.
    pub fn place(
        &mut self,
        key: SlotKey,
        character: CharacterId,
        graphs: &[ConstraintGraph],
        active: &ActiveCapabilities,
    ) -> Result<Option<CharacterId>, PlacementError> {
        let slot = lookup_slot(graphs, &key).ok_or_else(|| PlacementError::UnknownSlot(key.clone()))?;
        if !active.allows(character, slot.required) {
            return Err(PlacementError::Inactive { character, required: slot.required });
        }

        self.release(character);
        Ok(self.placements.insert(key, character))
    }

    /// Empty `key`, returning whoever sat there.
    pub fn remove(&mut self, key: &SlotKey) -> Option<CharacterId> {
        self.placements.remove(key)
    }

    /// Take `character` out of whatever slot it occupies, returning that slot.
    pub fn release(&mut self, character: CharacterId) -> Option<SlotKey> {
        let key = self.slot_of(character)?.clone();
        self.placements.remove(&key);
        Some(key)
    }

    /// Drop every placement that is no longer valid under `active`, e.g. after a capability was toggled off.
    /// Placements in slots unknown to `graphs` are dropped as well.
    ///
    /// Returns the removed placements in key order.
    pub fn prune_inactive(&mut self, graphs: &[ConstraintGraph], active: &ActiveCapabilities) -> Vec<(SlotKey, CharacterId)> {
        let mut removed = Vec::new();
        self.placements.retain(|key, character| {
            let keep = lookup_slot(graphs, key).is_some_and(|slot| active.allows(*character, slot.required));
            if !keep {
                removed.push((key.clone(), *character));
            }
            keep
        });

        removed
    }

    /// The placements of one graph, keyed by slot id.
    pub fn for_graph(&self, graph: &GraphId) -> BTreeMap<SlotId, CharacterId> {
        self.placements.iter()
            .filter(|(key, _)| key.graph == *graph)
            .map(|(key, character)| (key.slot.clone(), *character))
            .collect()
    }
}

impl<'a> IntoIterator for &'a Assignment {
    type Item = (&'a SlotKey, &'a CharacterId);
    type IntoIter = Iter<'a, SlotKey, CharacterId>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

impl FromIterator<(SlotKey, CharacterId)> for Assignment {
    fn from_iter<T: IntoIterator<Item=(SlotKey, CharacterId)>>(iter: T) -> Self {
        Self { placements: iter.into_iter().collect() }
    }
}

impl From<Assignment> for Vec<Placement> {
    fn from(value: Assignment) -> Self {
        value.placements.into_iter()
            .map(|(SlotKey { graph, slot }, character)| Placement { graph, slot, character })
            .collect()
    }
}

impl From<Vec<Placement>> for Assignment {
    fn from(value: Vec<Placement>) -> Self {
        Self {
            placements: value.into_iter()
                .map(|Placement { graph, slot, character }| (SlotKey { graph, slot }, character))
                .collect(),
        }
    }
}
