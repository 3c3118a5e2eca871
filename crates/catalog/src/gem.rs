use core::str::FromStr;

use serde::{Deserialize, Serialize};

use gemforge_core::{DomainError, GemId, UserId};

/// Gem category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum GemType {
    Diamond,
    Ruby,
    Emerald,
}

impl GemType {
    pub const ALL: [GemType; 3] = [GemType::Diamond, GemType::Ruby, GemType::Emerald];

    pub fn as_str(&self) -> &'static str {
        match self {
            GemType::Diamond => "DIAMOND",
            GemType::Ruby => "RUBY",
            GemType::Emerald => "EMERALD",
        }
    }
}

impl core::fmt::Display for GemType {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GemType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "DIAMOND" => Ok(GemType::Diamond),
            "RUBY" => Ok(GemType::Ruby),
            "EMERALD" => Ok(GemType::Emerald),
            other => Err(DomainError::validation(format!("unknown gem type '{other}'"))),
        }
    }
}

/// Gem clarity grade, ordinal 1–4 (SI < VS < VVS < FL).
///
/// Serialized as its numeric grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum GemClarity {
    Si = 1,
    Vs = 2,
    Vvs = 3,
    Fl = 4,
}

impl GemClarity {
    pub const ALL: [GemClarity; 4] = [
        GemClarity::Si,
        GemClarity::Vs,
        GemClarity::Vvs,
        GemClarity::Fl,
    ];

    pub fn grade(&self) -> u8 {
        *self as u8
    }
}

impl From<GemClarity> for u8 {
    fn from(value: GemClarity) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for GemClarity {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(GemClarity::Si),
            2 => Ok(GemClarity::Vs),
            3 => Ok(GemClarity::Vvs),
            4 => Ok(GemClarity::Fl),
            other => Err(DomainError::validation(format!(
                "clarity must be 1..=4, got {other}"
            ))),
        }
    }
}

/// Gem color grade. Priced for diamonds only; carried as data for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GemColor {
    D,
    E,
    G,
    F,
    H,
    I,
}

impl GemColor {
    pub const ALL: [GemColor; 6] = [
        GemColor::D,
        GemColor::E,
        GemColor::G,
        GemColor::F,
        GemColor::H,
        GemColor::I,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GemColor::D => "D",
            GemColor::E => "E",
            GemColor::G => "G",
            GemColor::F => "F",
            GemColor::H => "H",
            GemColor::I => "I",
        }
    }
}

impl core::fmt::Display for GemColor {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GemColor {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "D" => Ok(GemColor::D),
            "E" => Ok(GemColor::E),
            "G" => Ok(GemColor::G),
            "F" => Ok(GemColor::F),
            "H" => Ok(GemColor::H),
            "I" => Ok(GemColor::I),
            other => Err(DomainError::validation(format!("unknown color '{other}'"))),
        }
    }
}

/// Physical properties of a gem.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GemProperties {
    /// Size in carats. Must be positive.
    pub size: f64,
    pub clarity: GemClarity,
    /// Required for diamonds (pricing needs it); optional otherwise.
    pub color: Option<GemColor>,
}

impl GemProperties {
    /// Validate properties for a gem of the given type.
    pub fn validate(&self, kind: GemType) -> Result<(), DomainError> {
        if !(self.size > 0.0) {
            return Err(DomainError::validation("size must be positive"));
        }
        if kind == GemType::Diamond && self.color.is_none() {
            return Err(DomainError::validation("diamonds require a color grade"));
        }
        Ok(())
    }
}

/// A gem listing.
///
/// # Invariants
/// - Created by a seller; mutated and deleted only by `seller_id`.
/// - `properties` satisfies [`GemProperties::validate`] for `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gem {
    pub id: GemId,
    pub price: f64,
    pub available: bool,
    pub kind: GemType,
    pub seller_id: UserId,
    pub properties: GemProperties,
}

/// Listing filter for catalog queries.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GemFilter {
    /// Upper price bound (inclusive).
    pub price_lte: Option<f64>,
    /// Lower price bound (inclusive).
    pub price_gte: Option<f64>,
    /// Restrict to these kinds. Empty means all kinds; a non-empty filter
    /// also orders results by kind, then price descending.
    pub kinds: Vec<GemType>,
}

impl GemFilter {
    pub fn matches(&self, gem: &Gem) -> bool {
        if let Some(lte) = self.price_lte {
            if gem.price > lte {
                return false;
            }
        }
        if let Some(gte) = self.price_gte {
            if gem.price < gte {
                return false;
            }
        }
        if !self.kinds.is_empty() && !self.kinds.contains(&gem.kind) {
            return false;
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gem_type_round_trips_through_strings() {
        for kind in GemType::ALL {
            assert_eq!(kind.as_str().parse::<GemType>().unwrap(), kind);
        }
        assert!("OPAL".parse::<GemType>().is_err());
    }

    #[test]
    fn clarity_serializes_as_its_grade() {
        let json = serde_json::to_string(&GemClarity::Vvs).unwrap();
        assert_eq!(json, "3");

        let parsed: GemClarity = serde_json::from_str("4").unwrap();
        assert_eq!(parsed, GemClarity::Fl);

        assert!(serde_json::from_str::<GemClarity>("5").is_err());
        assert!(serde_json::from_str::<GemClarity>("0").is_err());
    }

    #[test]
    fn clarity_grades_are_ordered() {
        assert!(GemClarity::Si < GemClarity::Vs);
        assert!(GemClarity::Vvs < GemClarity::Fl);
        assert_eq!(GemClarity::Fl.grade(), 4);
    }

    #[test]
    fn diamond_without_color_fails_validation() {
        let props = GemProperties {
            size: 1.0,
            clarity: GemClarity::Vs,
            color: None,
        };

        assert!(props.validate(GemType::Ruby).is_ok());
        assert!(props.validate(GemType::Diamond).is_err());
    }

    #[test]
    fn non_positive_size_fails_validation() {
        let props = GemProperties {
            size: 0.0,
            clarity: GemClarity::Vs,
            color: Some(GemColor::D),
        };

        assert!(props.validate(GemType::Diamond).is_err());
    }

    #[test]
    fn filter_applies_price_bounds_and_kinds() {
        let gem = Gem {
            id: GemId::new(),
            price: 500.0,
            available: true,
            kind: GemType::Ruby,
            seller_id: UserId::new(),
            properties: GemProperties {
                size: 1.0,
                clarity: GemClarity::Si,
                color: None,
            },
        };

        assert!(GemFilter::default().matches(&gem));
        assert!(GemFilter {
            price_lte: Some(500.0),
            price_gte: Some(500.0),
            kinds: vec![GemType::Ruby],
        }
        .matches(&gem));
        assert!(!GemFilter {
            price_lte: Some(499.0),
            ..Default::default()
        }
        .matches(&gem));
        assert!(!GemFilter {
            price_gte: Some(501.0),
            ..Default::default()
        }
        .matches(&gem));
        assert!(!GemFilter {
            kinds: vec![GemType::Diamond, GemType::Emerald],
            ..Default::default()
        }
        .matches(&gem));
    }
}
