use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, VariantArray};

/// A group a character belongs to. Placed neighbors sharing factions generate synergy.
#[derive(Copy, Clone, VariantArray, Display, EnumString, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Faction {
    Protagonist,
    LegionOfGlory,
    EmpireHonor,
    OriginsOfLight,
    PrincessAlliance,
    MeteorStrike,
    YelessLegends,
    StrategicMasters,
    DarkReincarnation,
    TimeAndSpace,
    ReIncarnationTensei,
    Transcendence,
}

/// A class a character may fill. Every slot requires exactly one of these.
#[derive(Copy, Clone, VariantArray, Display, EnumString, Eq, PartialEq, Hash, Debug, Ord, PartialOrd, Serialize, Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum Capability {
    Infantry,
    Cavalry,
    Lancer,
    Archer,
    Flyer,
    Aquatic,
    Assassin,
    Mage,
    Holy,
    Demon,
    Dragon,
}
