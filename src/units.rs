//! # Unit Synonym Table
//!
//! Maps the many ways a recipe spells a unit of measure — abbreviated,
//! pluralized, punctuated, capitalized — onto one canonical singular form.
//! "Tbsp.", "T" and "tablespoons" all standardize to "tablespoon", which is
//! what lets the label aligner match a raw token against the reference
//! `unit` field regardless of spelling.
//!
//! Unknown tokens pass through [`standardize`] unchanged, so unit
//! classification degrades to "not a known unit" rather than erroring.

use lazy_static::lazy_static;
use std::collections::HashMap;

/// Spelling variants → canonical singular form.
const UNIT_SYNONYMS: &[(&str, &str)] = &[
    ("T", "tablespoon"),
    ("T.", "tablespoon"),
    ("tbsp", "tablespoon"),
    ("tbsp.", "tablespoon"),
    ("Tbsp", "tablespoon"),
    ("Tbsp.", "tablespoon"),
    ("tablespoon", "tablespoon"),
    ("tablespoons", "tablespoon"),
    ("t", "teaspoon"),
    ("t.", "teaspoon"),
    ("tsp", "teaspoon"),
    ("tsp.", "teaspoon"),
    ("teaspoon", "teaspoon"),
    ("teaspoons", "teaspoon"),
    ("c", "cup"),
    ("C", "cup"),
    ("c.", "cup"),
    ("C.", "cup"),
    ("cup", "cup"),
    ("cups", "cup"),
    ("Cup", "cup"),
    ("Cups", "cup"),
    ("fl", "fluid"),
    ("fluid", "fluid"),
    ("fl oz", "fluid ounce"),
    ("fl.oz.", "fluid ounce"),
    ("fl.oz", "fluid ounce"),
    ("fluid ounce", "fluid ounce"),
    ("qt", "quart"),
    ("qt.", "quart"),
    ("quart", "quart"),
    ("quarts", "quart"),
    ("gal", "gallon"),
    ("gallon", "gallon"),
    ("gallons", "gallon"),
    ("ml", "milliliter"),
    ("mL", "milliliter"),
    ("milliliter", "milliliter"),
    ("milliliters", "milliliter"),
    ("millilitre", "milliliter"),
    ("millilitres", "milliliter"),
    ("l", "liter"),
    ("L", "liter"),
    ("liter", "liter"),
    ("liters", "liter"),
    ("litre", "liter"),
    ("litres", "liter"),
    ("g", "gram"),
    ("g.", "gram"),
    ("gram", "gram"),
    ("grams", "gram"),
    ("mg", "milligram"),
    ("milligram", "milligram"),
    ("milligrams", "milligram"),
    ("k", "kilogram"),
    ("kg", "kilogram"),
    ("kilogram", "kilogram"),
    ("kilograms", "kilogram"),
    ("oz", "ounce"),
    ("oz.", "ounce"),
    ("ounce", "ounce"),
    ("ounces", "ounce"),
    ("lb", "pound"),
    ("lbs", "pound"),
    ("lb.", "pound"),
    ("lbs.", "pound"),
    ("pound", "pound"),
    ("pounds", "pound"),
    ("in", "inch"),
    ("in.", "inch"),
    ("inch", "inch"),
    ("inches", "inch"),
    ("cm", "centimeter"),
    ("centimeter", "centimeter"),
    ("centimeters", "centimeter"),
    ("clove", "clove"),
    ("slice", "slice"),
    ("piece", "piece"),
    ("fillet", "fillet"),
    ("sprig", "sprig"),
    ("stick", "stick"),
    ("leave", "leaf"),
    ("package", "package"),
    ("can", "can"),
    ("bottle", "bottle"),
    ("handful", "handful"),
    ("dash", "dash"),
    ("pinch", "pinch"),
    ("cloves", "clove"),
    ("slices", "slice"),
    ("pieces", "piece"),
    ("fillets", "fillet"),
    ("sprigs", "sprig"),
    ("sticks", "stick"),
    ("leaves", "leaf"),
    ("packages", "package"),
    ("cans", "can"),
    ("bottles", "bottle"),
    ("handfuls", "handful"),
    ("dashes", "dash"),
    ("pinches", "pinch"),
];

lazy_static! {
    static ref UNITS: HashMap<&'static str, &'static str> =
        UNIT_SYNONYMS.iter().copied().collect();
}

/// Checks whether a token is a known unit spelling.
pub fn is_unit(token: &str) -> bool {
    UNITS.contains_key(token)
}

/// Converts a unit spelling into its canonical singular form.
///
/// Unknown tokens pass through unchanged.
///
/// # Example
///
/// ```rust
/// use ingredients_core::units::standardize;
///
/// assert_eq!(standardize("Tbsp."), "tablespoon");
/// assert_eq!(standardize("garlic"), "garlic");
/// ```
pub fn standardize<'a>(token: &'a str) -> &'a str {
    UNITS.get(token).copied().unwrap_or(token)
}
