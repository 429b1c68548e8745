//! Per-user game state: collection, partner, and onboarding status.
//!
//! Field names on the wire match the document layout used by the remote
//! store (`pokemon_inventory`, `trainerGender`, ...), so existing documents
//! deserialize unchanged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::catalog::{Catalog, ElementType, SpeciesInfo};
use crate::error::ValidationError;

pub const DEFAULT_TRAINER_NAME: &str = "Trainer";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvatarVariant {
    #[default]
    Male,
    Female,
}

impl std::str::FromStr for AvatarVariant {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(AvatarVariant::Male),
            "female" => Ok(AvatarVariant::Female),
            other => Err(ValidationError::InvalidValue {
                field: "avatar".into(),
                message: format!("expected 'male' or 'female', got '{other}'"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PokedexEntry {
    pub id: u32,
    pub name: String,
}

/// One owned individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Creature {
    #[serde(rename = "id")]
    pub instance_id: String,
    #[serde(rename = "pokedexId")]
    pub species_id: u32,
    #[serde(rename = "name")]
    pub base_species_name: String,
    pub current_name: String,
    #[serde(rename = "type")]
    pub elemental_type: ElementType,
    /// Wild catches carry a fractional share, so this is not an integer.
    #[serde(default)]
    pub exp: f64,
    pub stage: u8,
    #[serde(default)]
    pub is_partner: bool,
}

impl Creature {
    pub fn from_species(info: &SpeciesInfo, exp: f64, is_partner: bool) -> Self {
        Self {
            instance_id: Uuid::new_v4().to_string(),
            species_id: info.id,
            base_species_name: info.name.to_string(),
            current_name: info.name.to_string(),
            elemental_type: info.element,
            exp,
            stage: info.stage,
            is_partner,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default = "default_trainer_name")]
    pub trainer_name: String,
    #[serde(rename = "trainerGender", default)]
    pub avatar: AvatarVariant,
    #[serde(default)]
    pub is_profile_complete: bool,
    #[serde(default)]
    pub pokedex: Vec<PokedexEntry>,
    #[serde(rename = "pokemon_inventory", default)]
    pub inventory: Vec<Creature>,
    #[serde(default)]
    pub friends: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<serde_json::Value>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_trainer_name() -> String {
    DEFAULT_TRAINER_NAME.to_string()
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            user_id: None,
            trainer_name: default_trainer_name(),
            avatar: AvatarVariant::Male,
            is_profile_complete: false,
            pokedex: Vec::new(),
            inventory: Vec::new(),
            friends: Vec::new(),
            achievements: Vec::new(),
            created_at: Utc::now(),
        }
    }
}

impl Profile {
    /// Zero-value profile for a new user.
    pub fn new(trainer_name: impl Into<String>, user_id: Option<String>) -> Self {
        Self {
            user_id,
            trainer_name: trainer_name.into(),
            ..Self::default()
        }
    }

    pub fn partner(&self) -> Option<&Creature> {
        self.inventory.iter().find(|c| c.is_partner)
    }

    pub fn partner_mut(&mut self) -> Option<&mut Creature> {
        self.inventory.iter_mut().find(|c| c.is_partner)
    }

    pub fn has_species(&self, name: &str) -> bool {
        self.pokedex.iter().any(|p| p.name == name)
    }

    /// Register `info` in the pokedex. Returns `true` if it was new.
    pub fn register_species(&mut self, info: &SpeciesInfo) -> bool {
        if self.has_species(info.name) {
            return false;
        }
        self.pokedex.push(PokedexEntry {
            id: info.id,
            name: info.name.to_string(),
        });
        true
    }

    /// Pokedex sorted by species id, for display.
    pub fn sorted_pokedex(&self) -> Vec<PokedexEntry> {
        let mut entries = self.pokedex.clone();
        entries.sort_by_key(|p| p.id);
        entries
    }

    /// Finish onboarding with the chosen starter and avatar.
    ///
    /// The starter becomes the one partner creature, with zero exp.
    pub fn complete_with_starter(
        &mut self,
        catalog: &Catalog,
        starter: &str,
        avatar: AvatarVariant,
    ) -> Result<&Creature, ValidationError> {
        if self.is_profile_complete {
            return Err(ValidationError::ProfileAlreadyComplete);
        }
        let info = catalog
            .lookup_by_name(starter)
            .filter(|_| catalog.is_starter(starter))
            .ok_or_else(|| ValidationError::NotAStarter(starter.to_string()))?;

        self.pokedex = vec![PokedexEntry {
            id: info.id,
            name: info.name.to_string(),
        }];
        self.inventory = vec![Creature::from_species(info, 0.0, true)];
        self.avatar = avatar;
        self.is_profile_complete = true;
        tracing::info!(starter = info.name, "profile completed");
        Ok(&self.inventory[0])
    }

    /// Identifier other players use to add this trainer.
    pub fn share_id(&self) -> String {
        format!("local-user-{}", self.trainer_name)
    }

    /// Add a friend identifier. Returns `false` for blanks and duplicates.
    pub fn add_friend(&mut self, friend_id: &str) -> bool {
        let friend_id = friend_id.trim();
        if friend_id.is_empty() || self.friends.iter().any(|f| f == friend_id) {
            return false;
        }
        self.friends.push(friend_id.to_string());
        true
    }
}
