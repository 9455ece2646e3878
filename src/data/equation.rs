//! Parsing of reaction-equation strings.
//!
//! An equation such as `2A + B -> C` is split on a reaction arrow into a
//! reactant side and a product side, each parsed into a flattened list of
//! species occurrences. Three arrows are recognized:
//!
//! - `->` leaves reversibility to the caller-supplied flag
//! - `<->` and `⇌` force the reaction to be reversible
//!
//! `<->` and `⇌` are checked before `->` so the two-character arrow embedded
//! in `<->` cannot shadow the reversible form.

use std::collections::BTreeSet;
use std::iter;

use thiserror::Error;

use crate::data::species::Species;

/// Errors produced while parsing a reaction equation.
///
/// The network builder treats every variant as a reason to skip the
/// offending specification rather than failing the whole batch.
#[derive(Error, Debug, Clone)]
pub enum EquationError {
    /// No recognized arrow between reactants and products
    #[error("equation `{equation}` contains no reaction arrow (`->`, `<->` or `⇌`)")]
    MissingSeparator { equation: String },
    /// The arrow splits the string into other than exactly two sides
    #[error("equation `{equation}` splits into {count} sides, expected exactly two")]
    SideCount { equation: String, count: usize },
    /// A term names something other than a single uppercase letter
    #[error("`{symbol}` is not a single uppercase species symbol")]
    InvalidSpecies { symbol: String },
    /// A leading coefficient failed to parse or rounds past [`MAX_COEFFICIENT`]
    #[error("term `{term}` carries an unusable stoichiometric coefficient")]
    InvalidCoefficient { term: String },
}

/// Reaction arrow separating the two sides of an equation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arrow {
    /// `->`, reversibility is whatever the caller supplied
    Directional,
    /// `<->` or `⇌`, reversibility is forced true
    Reversible,
}

const REVERSIBLE_TOKENS: [&str; 2] = ["<->", "⇌"];
const DIRECTIONAL_TOKEN: &str = "->";

fn detect_arrow(equation: &str) -> Option<(&'static str, Arrow)> {
    for token in REVERSIBLE_TOKENS {
        if equation.contains(token) {
            return Some((token, Arrow::Reversible));
        }
    }
    if equation.contains(DIRECTIONAL_TOKEN) {
        return Some((DIRECTIONAL_TOKEN, Arrow::Directional));
    }
    None
}

/// A reaction equation split into flattened reactant and product lists.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedEquation {
    reactants: Vec<Species>,
    products: Vec<Species>,
    arrow: Arrow,
}

impl ParsedEquation {
    /// Reactant occurrences, one entry per unit of stoichiometric coefficient
    pub fn reactants(&self) -> &[Species] {
        &self.reactants
    }

    /// Product occurrences, one entry per unit of stoichiometric coefficient
    pub fn products(&self) -> &[Species] {
        &self.products
    }

    /// The arrow the equation was split on
    pub fn arrow(&self) -> Arrow {
        self.arrow
    }

    /// Resolves the effective reversibility flag.
    ///
    /// A reversible arrow overrides the supplied flag; a directional arrow
    /// leaves it as given.
    pub fn reversibility(&self, supplied: bool) -> bool {
        match self.arrow {
            Arrow::Reversible => true,
            Arrow::Directional => supplied,
        }
    }

    /// Consumes the parse into its (reactants, products) lists
    pub fn into_sides(self) -> (Vec<Species>, Vec<Species>) {
        (self.reactants, self.products)
    }
}

/// Parses a full reaction equation into its two sides.
///
/// # Arguments
///
/// * `equation` - Equation text, e.g. `"2A + B -> C"` or `"X + Y ⇌ Z"`
///
/// # Errors
///
/// Returns an [`EquationError`] when no arrow is present, when the arrow
/// does not split the text into exactly two sides, or when either side
/// contains an invalid term.
pub fn parse_equation(equation: &str) -> Result<ParsedEquation, EquationError> {
    let (token, arrow) = detect_arrow(equation).ok_or_else(|| EquationError::MissingSeparator {
        equation: equation.to_string(),
    })?;
    let sides: Vec<&str> = equation.split(token).collect();
    if sides.len() != 2 {
        return Err(EquationError::SideCount {
            equation: equation.to_string(),
            count: sides.len(),
        });
    }
    Ok(ParsedEquation {
        reactants: parse_side(sides[0])?,
        products: parse_side(sides[1])?,
        arrow,
    })
}

/// Largest stoichiometric coefficient accepted after rounding. Each unit of
/// coefficient becomes one entry in a flattened occurrence list.
pub const MAX_COEFFICIENT: usize = 1_000_000;

/// Parses one side of an equation into a flattened occurrence list.
///
/// Whitespace is stripped and terms are split on `+`. Each term is an
/// optional numeric coefficient followed by a species symbol; the
/// coefficient is rounded to the nearest integer and the species is
/// repeated that many times, so `2A + B` yields `[A, A, B]`. A coefficient
/// that rounds to 0 contributes no occurrences, and one that rounds past
/// [`MAX_COEFFICIENT`] is rejected. Empty terms are ignored, which makes an
/// empty side a valid (empty) list.
pub fn parse_side(side: &str) -> Result<Vec<Species>, EquationError> {
    let cleaned: String = side.chars().filter(|c| !c.is_whitespace()).collect();
    let mut occurrences = Vec::new();
    for term in cleaned.split('+') {
        if term.is_empty() {
            continue;
        }
        let boundary = term
            .find(|c: char| !c.is_ascii_digit() && c != '.')
            .unwrap_or(term.len());
        let (coefficient, symbol) = term.split_at(boundary);
        let count = if coefficient.is_empty() {
            1.0
        } else {
            coefficient
                .parse::<f64>()
                .map_err(|_| EquationError::InvalidCoefficient {
                    term: term.to_string(),
                })?
        };
        let count = count.round();
        if count > MAX_COEFFICIENT as f64 {
            return Err(EquationError::InvalidCoefficient {
                term: term.to_string(),
            });
        }
        let species: Species = symbol.parse()?;
        occurrences.extend(iter::repeat(species).take(count as usize));
    }
    Ok(occurrences)
}

/// Collects every species symbol mentioned anywhere in an equation string.
///
/// Scans for uppercase letters wherever they occur, ignoring digits, arrows
/// and operators, so it also answers "what species exist" for input that a
/// full parse would reject. The result is sorted and duplicate-free, and
/// parsing the same string twice gives the same answer.
pub fn parse_species(equation: &str) -> Vec<Species> {
    let found: BTreeSet<Species> = equation
        .chars()
        .filter_map(|symbol| Species::try_from(symbol).ok())
        .collect();
    found.into_iter().collect()
}

/// Union of species over several equations, sorted and duplicate-free.
pub fn collect_species<'a, I>(equations: I) -> Vec<Species>
where
    I: IntoIterator<Item = &'a str>,
{
    let found: BTreeSet<Species> = equations
        .into_iter()
        .flat_map(|equation| parse_species(equation))
        .collect();
    found.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(species: &[Species]) -> String {
        species.iter().map(|s| s.symbol()).collect()
    }

    #[test]
    fn test_parse_species_sorted_unique() {
        assert_eq!(symbols(&parse_species("2A + B -> C")), "ABC");
        assert_eq!(symbols(&parse_species("C + B -> A + B")), "ABC");
        assert_eq!(symbols(&parse_species("")), "");
    }

    #[test]
    fn test_parse_species_idempotent() {
        let first = parse_species("X + Y ⇌ Z");
        let second = parse_species("X + Y ⇌ Z");
        assert_eq!(first, second);
        assert_eq!(symbols(&first), "XYZ");
    }

    #[test]
    fn test_parse_species_ignores_noise() {
        assert_eq!(symbols(&parse_species("2a + 3B <-> c9D")), "BD");
    }

    #[test]
    fn test_parse_side_repeats_by_coefficient() {
        let side = parse_side("2A + B").unwrap();
        assert_eq!(symbols(&side), "AAB");
    }

    #[test]
    fn test_parse_side_rounds_fractional_coefficients() {
        assert_eq!(symbols(&parse_side("2.4A").unwrap()), "AA");
        assert_eq!(symbols(&parse_side("1.6B").unwrap()), "BB");
        assert_eq!(symbols(&parse_side("0.4C").unwrap()), "");
    }

    #[test]
    fn test_parse_side_empty_and_whitespace() {
        assert!(parse_side("").unwrap().is_empty());
        assert!(parse_side("  ").unwrap().is_empty());
        assert_eq!(symbols(&parse_side(" 2 A +  B ").unwrap()), "AAB");
    }

    #[test]
    fn test_parse_side_rejects_bad_terms() {
        assert!(matches!(
            parse_side("AB"),
            Err(EquationError::InvalidSpecies { .. })
        ));
        assert!(matches!(
            parse_side("2a"),
            Err(EquationError::InvalidSpecies { .. })
        ));
        assert!(matches!(
            parse_side("25"),
            Err(EquationError::InvalidSpecies { .. })
        ));
        assert!(matches!(
            parse_side("2.5.3A"),
            Err(EquationError::InvalidCoefficient { .. })
        ));
    }

    #[test]
    fn test_parse_side_caps_the_coefficient() {
        assert!(matches!(
            parse_side("20000000000000000000A"),
            Err(EquationError::InvalidCoefficient { .. })
        ));
        assert!(matches!(
            parse_side("1000001A"),
            Err(EquationError::InvalidCoefficient { .. })
        ));
        assert_eq!(parse_side("1000000A").unwrap().len(), MAX_COEFFICIENT);
    }

    #[test]
    fn test_parse_equation_directional() {
        let parsed = parse_equation("2A + B -> C").unwrap();
        assert_eq!(symbols(parsed.reactants()), "AAB");
        assert_eq!(symbols(parsed.products()), "C");
        assert_eq!(parsed.arrow(), Arrow::Directional);
        assert!(!parsed.reversibility(false));
        assert!(parsed.reversibility(true));
    }

    #[test]
    fn test_parse_equation_reversible_arrows() {
        for equation in ["X + Y <-> Z", "X + Y ⇌ Z"] {
            let parsed = parse_equation(equation).unwrap();
            assert_eq!(symbols(parsed.reactants()), "XY");
            assert_eq!(symbols(parsed.products()), "Z");
            assert_eq!(parsed.arrow(), Arrow::Reversible);
            assert!(parsed.reversibility(false));
        }
    }

    #[test]
    fn test_reversible_arrow_not_shadowed() {
        // the `->` embedded in `<->` must not win the split
        let parsed = parse_equation("A<->B").unwrap();
        assert_eq!(symbols(parsed.reactants()), "A");
        assert_eq!(symbols(parsed.products()), "B");
        assert_eq!(parsed.arrow(), Arrow::Reversible);
    }

    #[test]
    fn test_parse_equation_rejects_missing_arrow() {
        assert!(matches!(
            parse_equation("A + B"),
            Err(EquationError::MissingSeparator { .. })
        ));
    }

    #[test]
    fn test_parse_equation_rejects_extra_sides() {
        assert!(matches!(
            parse_equation("A -> B -> C"),
            Err(EquationError::SideCount { count: 3, .. })
        ));
    }

    #[test]
    fn test_parse_equation_allows_empty_product_side() {
        let parsed = parse_equation("A ->").unwrap();
        assert_eq!(symbols(parsed.reactants()), "A");
        assert!(parsed.products().is_empty());
    }

    #[test]
    fn test_collect_species_union() {
        let all = collect_species(["A -> B", "C <-> B", "2D -> A"]);
        assert_eq!(symbols(&all), "ABCD");
    }
}
