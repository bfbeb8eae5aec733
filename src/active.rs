use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::character::{Character, CharacterId};
use crate::tag::Capability;

/// Which of each character's declared capabilities are currently enabled.
///
/// A character absent from the map has nothing enabled and can never be placed.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ActiveCapabilities {
    enabled: HashMap<CharacterId, BTreeSet<Capability>>,
}

impl ActiveCapabilities {
    /// An empty mapping, i.e. nobody can be placed anywhere.
    pub fn new() -> Self {
        Default::default()
    }

    /// Enable every declared capability of every character.
    pub fn all_declared<'a>(characters: impl IntoIterator<Item=&'a Character>) -> Self {
        Self {
            enabled: characters.into_iter()
                .map(|character| (character.id, character.capabilities.clone()))
                .collect(),
        }
    }

    /// Replace the enabled set of one character.
    pub fn set(&mut self, id: CharacterId, capabilities: impl IntoIterator<Item=Capability>) -> &mut Self {
        self.enabled.insert(id, capabilities.into_iter().collect());
        self
    }

    /// Flip `capability` for `character`.
    ///
    /// Returns `Some(true)` if it is now enabled, `Some(false)` if it is now disabled,
    /// or `None` without changing anything if the character does not declare it.
    pub fn toggle(&mut self, character: &Character, capability: Capability) -> Option<bool> {
        if !character.declares(capability) {
            return None;
        }

        let enabled = self.enabled.entry(character.id).or_default();
        if enabled.remove(&capability) {
            Some(false)
        } else {
            enabled.insert(capability);
            Some(true)
        }
    }

    /// Whether `id` may currently fill a slot requiring `capability`.
    #[inline]
    pub fn allows(&self, id: CharacterId, capability: Capability) -> bool {
        self.enabled.get(&id).is_some_and(|enabled| enabled.contains(&capability))
    }

    /// The enabled set of one character, if any was recorded.
    pub fn get(&self, id: CharacterId) -> Option<&BTreeSet<Capability>> {
        self.enabled.get(&id)
    }
}
