//! Species identifiers and initial concentrations.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::data::equation::EquationError;

/// Initial concentrations keyed by species, in mol/L.
///
/// Species absent from the mapping start at 0.0.
pub type InitialConcentrations = HashMap<Species, f64>;

/// A chemical species tracked by concentration.
///
/// The equation grammar supports only single-letter names, so a species is
/// identified by one uppercase ASCII letter. Construction goes through
/// [`TryFrom<char>`] or [`FromStr`] so an invalid symbol cannot enter the
/// data model; deserialization routes through the same check.
///
/// # Examples
///
/// ```
/// use kinetsol::data::Species;
///
/// let species: Species = "A".parse().unwrap();
/// assert_eq!(species.symbol(), 'A');
/// assert!("ab".parse::<Species>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "char", into = "char")]
pub struct Species(char);

impl Species {
    /// Single-letter symbol of this species
    pub fn symbol(&self) -> char {
        self.0
    }
}

impl TryFrom<char> for Species {
    type Error = EquationError;

    fn try_from(symbol: char) -> Result<Self, Self::Error> {
        if symbol.is_ascii_uppercase() {
            Ok(Species(symbol))
        } else {
            Err(EquationError::InvalidSpecies {
                symbol: symbol.to_string(),
            })
        }
    }
}

impl From<Species> for char {
    fn from(species: Species) -> Self {
        species.0
    }
}

impl FromStr for Species {
    type Err = EquationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(symbol), None) => Species::try_from(symbol),
            _ => Err(EquationError::InvalidSpecies {
                symbol: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_species_from_char() {
        assert!(Species::try_from('A').is_ok());
        assert!(Species::try_from('Z').is_ok());
        assert!(Species::try_from('a').is_err());
        assert!(Species::try_from('1').is_err());
        assert!(Species::try_from('+').is_err());
    }

    #[test]
    fn test_species_from_str() {
        let species: Species = "B".parse().unwrap();
        assert_eq!(species.symbol(), 'B');
        assert!("".parse::<Species>().is_err());
        assert!("AB".parse::<Species>().is_err());
    }

    #[test]
    fn test_species_ordering() {
        let a = Species::try_from('A').unwrap();
        let b = Species::try_from('B').unwrap();
        assert!(a < b);
        assert_eq!(a.to_string(), "A");
    }

    #[test]
    fn test_deserialization_validates_the_symbol() {
        let species: Species = serde_json::from_str("\"A\"").unwrap();
        assert_eq!(species.symbol(), 'A');
        assert_eq!(serde_json::to_string(&species).unwrap(), "\"A\"");
        assert!(serde_json::from_str::<Species>("\"a\"").is_err());
        assert!(serde_json::from_str::<Species>("\"+\"").is_err());
    }
}
