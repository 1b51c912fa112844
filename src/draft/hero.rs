use crate::error::DraftError;
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Every selectable hero. Declaration order is the catalog order used for
/// pools, store rows and tie-breaking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Hero {
    Adagio,
    Alpha,
    Ardan,
    Baron,
    Blackfeather,
    Catherine,
    Celeste,
    Flicker,
    Fortress,
    Glaive,
    Grumpjaw,
    Gwen,
    Idris,
    Joule,
    Kestrel,
    Koshka,
    Krul,
    Lance,
    Lyra,
    Ozo,
    Petal,
    Phinn,
    Reim,
    Ringo,
    Rona,
    Samuel,
    Saw,
    Skaarf,
    Skye,
    Taka,
    Vox,
}

impl Hero {
    pub const ALL: [Hero; 31] = [
        Hero::Adagio,
        Hero::Alpha,
        Hero::Ardan,
        Hero::Baron,
        Hero::Blackfeather,
        Hero::Catherine,
        Hero::Celeste,
        Hero::Flicker,
        Hero::Fortress,
        Hero::Glaive,
        Hero::Grumpjaw,
        Hero::Gwen,
        Hero::Idris,
        Hero::Joule,
        Hero::Kestrel,
        Hero::Koshka,
        Hero::Krul,
        Hero::Lance,
        Hero::Lyra,
        Hero::Ozo,
        Hero::Petal,
        Hero::Phinn,
        Hero::Reim,
        Hero::Ringo,
        Hero::Rona,
        Hero::Samuel,
        Hero::Saw,
        Hero::Skaarf,
        Hero::Skye,
        Hero::Taka,
        Hero::Vox,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Hero::Adagio => "Adagio",
            Hero::Alpha => "Alpha",
            Hero::Ardan => "Ardan",
            Hero::Baron => "Baron",
            Hero::Blackfeather => "Blackfeather",
            Hero::Catherine => "Catherine",
            Hero::Celeste => "Celeste",
            Hero::Flicker => "Flicker",
            Hero::Fortress => "Fortress",
            Hero::Glaive => "Glaive",
            Hero::Grumpjaw => "Grumpjaw",
            Hero::Gwen => "Gwen",
            Hero::Idris => "Idris",
            Hero::Joule => "Joule",
            Hero::Kestrel => "Kestrel",
            Hero::Koshka => "Koshka",
            Hero::Krul => "Krul",
            Hero::Lance => "Lance",
            Hero::Lyra => "Lyra",
            Hero::Ozo => "Ozo",
            Hero::Petal => "Petal",
            Hero::Phinn => "Phinn",
            Hero::Reim => "Reim",
            Hero::Ringo => "Ringo",
            Hero::Rona => "Rona",
            Hero::Samuel => "Samuel",
            Hero::Saw => "SAW",
            Hero::Skaarf => "Skaarf",
            Hero::Skye => "Skye",
            Hero::Taka => "Taka",
            Hero::Vox => "Vox",
        }
    }

    /// Case-insensitive lookup by display name.
    pub fn from_name(name: &str) -> Result<Hero, DraftError> {
        let trimmed = name.trim();
        Hero::ALL
            .iter()
            .copied()
            .find(|h| h.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| DraftError::UnknownHero(trimmed.to_string()))
    }
}

impl fmt::Display for Hero {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Hero {
    type Err = DraftError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Hero::from_name(s)
    }
}

impl Serialize for Hero {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
