use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::tag::{Capability, Faction};

/// Unique identifier of a [`Character`].
pub type CharacterId = u32;

/// A hero which may be placed into slots.
///
/// `factions` is a multiset; the same faction may appear more than once.
/// `capabilities` is everything the character *could* fill, regardless of what the caller currently has enabled.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Character {
    /// Unique among the characters of one call.
    pub id: CharacterId,
    /// Display name; never inspected by the optimizer.
    pub name: String,
    /// Faction tags, possibly repeated.
    pub factions: Vec<Faction>,
    /// Declared capabilities.
    pub capabilities: BTreeSet<Capability>,
}

impl Character {
    /// Construct a character from its parts.
    pub fn new(
        id: CharacterId,
        name: impl Into<String>,
        factions: impl IntoIterator<Item=Faction>,
        capabilities: impl IntoIterator<Item=Capability>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            factions: factions.into_iter().collect(),
            capabilities: capabilities.into_iter().collect(),
        }
    }

    /// Whether `capability` is among the declared capabilities of this character.
    #[inline]
    pub fn declares(&self, capability: Capability) -> bool {
        self.capabilities.contains(&capability)
    }
}

/// The characters owned by the caller, in caller order, with lookup by id.
///
/// Order matters: it is the pool order the optimizer scans, so it is part of what makes a run reproducible.
#[derive(Clone, Debug, Default)]
pub struct Roster {
    characters: Vec<Character>,
    by_id: HashMap<CharacterId, usize>,
}

impl Roster {
    /// Build a roster. Ids are expected to be unique; on a duplicate, lookups resolve to the first occurrence.
    pub fn new(characters: Vec<Character>) -> Self {
        let mut by_id = HashMap::with_capacity(characters.len());
        for (index, character) in characters.iter().enumerate() {
            by_id.entry(character.id).or_insert(index);
        }

        Self { characters, by_id }
    }

    /// Look up a character by id.
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.by_id.get(&id).map(|index| &self.characters[*index])
    }

    pub(crate) fn index_of(&self, id: CharacterId) -> Option<usize> {
        self.by_id.get(&id).copied()
    }

    pub(crate) fn at(&self, index: usize) -> &Character {
        &self.characters[index]
    }

    /// Whether a character with this id is present.
    pub fn contains(&self, id: CharacterId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// All characters in roster order.
    pub fn characters(&self) -> &[Character] {
        &self.characters
    }

    /// Number of characters.
    pub fn len(&self) -> usize {
        self.characters.len()
    }

    /// Whether the roster is empty.
    pub fn is_empty(&self) -> bool {
        self.characters.is_empty()
    }
}

impl FromIterator<Character> for Roster {
    fn from_iter<T: IntoIterator<Item=Character>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
