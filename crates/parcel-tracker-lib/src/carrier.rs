//! Supported carriers and their tracker tokens.
//!
//! [`Carrier`] is the identifier clients send (`seven_eleven`, `family_mart`,
//! ...). [`CarrierToken`] is the identifier tracker backends understand. The
//! two sets are joined by [`Carrier::token`], an exhaustive `match`, so adding a
//! carrier without a token fails to compile.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Minimum Jaro-Winkler similarity for a carrier id to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.7;

/// Maximum number of suggestions attached to an unknown-carrier error.
const SUGGESTION_LIMIT: usize = 3;

/// Public carrier identifier accepted by the service and CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Carrier {
    /// 7-ELEVEN store-to-store parcels.
    SevenEleven,
    /// FamilyMart store-to-store parcels.
    FamilyMart,
    /// OK Mart store pickup.
    #[serde(rename = "okmart")]
    OkMart,
    /// Shopee store pickup.
    Shopee,
}

/// Carrier identifier used by tracker backends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CarrierToken {
    SevenEleven,
    FamilyMart,
    #[serde(rename = "OKMart")]
    OkMart,
    Shopee,
}

impl Carrier {
    /// Every supported carrier, in display order.
    pub const ALL: [Carrier; 4] = [
        Carrier::SevenEleven,
        Carrier::FamilyMart,
        Carrier::OkMart,
        Carrier::Shopee,
    ];

    /// Identifier used on the wire (query strings, JSON bodies, CLI flags).
    pub fn as_str(self) -> &'static str {
        match self {
            Carrier::SevenEleven => "seven_eleven",
            Carrier::FamilyMart => "family_mart",
            Carrier::OkMart => "okmart",
            Carrier::Shopee => "shopee",
        }
    }

    /// Tracker token for this carrier.
    pub fn token(self) -> CarrierToken {
        match self {
            Carrier::SevenEleven => CarrierToken::SevenEleven,
            Carrier::FamilyMart => CarrierToken::FamilyMart,
            Carrier::OkMart => CarrierToken::OkMart,
            Carrier::Shopee => CarrierToken::Shopee,
        }
    }

    /// Human-readable carrier name.
    pub fn display_name(self) -> &'static str {
        match self {
            Carrier::SevenEleven => "7-11",
            Carrier::FamilyMart => "FamilyMart",
            Carrier::OkMart => "OK Mart",
            Carrier::Shopee => "Shopee Store Pickup",
        }
    }

    /// Carrier ids that resemble `input`, best match first.
    pub fn suggestions(input: &str) -> Vec<String> {
        let needle = input.trim().to_lowercase();
        let mut scored: Vec<(f64, &'static str)> = Carrier::ALL
            .iter()
            .map(|c| (strsim::jaro_winkler(&needle, c.as_str()), c.as_str()))
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(SUGGESTION_LIMIT)
            .map(|(_, id)| id.to_string())
            .collect()
    }
}

impl CarrierToken {
    /// Token as sent to tracker backends.
    pub fn as_str(self) -> &'static str {
        match self {
            CarrierToken::SevenEleven => "SevenEleven",
            CarrierToken::FamilyMart => "FamilyMart",
            CarrierToken::OkMart => "OKMart",
            CarrierToken::Shopee => "Shopee",
        }
    }
}

impl fmt::Display for Carrier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for CarrierToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Carrier {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Carrier::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| Error::UnknownCarrier {
                name: s.to_string(),
                suggestions: Carrier::suggestions(s),
            })
    }
}

impl From<Carrier> for CarrierToken {
    fn from(value: Carrier) -> Self {
        value.token()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn mapping_is_total_and_injective() {
        let tokens: HashSet<CarrierToken> = Carrier::ALL.iter().map(|c| c.token()).collect();
        let carriers: HashSet<Carrier> = Carrier::ALL.into_iter().collect();
        assert_eq!(tokens.len(), carriers.len());
        assert_eq!(tokens.len(), 4);
    }

    #[test]
    fn token_strings_match_backend_names() {
        assert_eq!(Carrier::SevenEleven.token().as_str(), "SevenEleven");
        assert_eq!(Carrier::FamilyMart.token().as_str(), "FamilyMart");
        assert_eq!(Carrier::OkMart.token().as_str(), "OKMart");
        assert_eq!(Carrier::Shopee.token().as_str(), "Shopee");
    }

    #[test]
    fn parses_every_wire_id() {
        for carrier in Carrier::ALL {
            assert_eq!(carrier.as_str().parse::<Carrier>().unwrap(), carrier);
        }
    }

    #[test]
    fn serde_uses_wire_ids() {
        let json = serde_json::to_string(&Carrier::OkMart).unwrap();
        assert_eq!(json, "\"okmart\"");

        let parsed: Carrier = serde_json::from_str("\"seven_eleven\"").unwrap();
        assert_eq!(parsed, Carrier::SevenEleven);

        let token = serde_json::to_string(&CarrierToken::OkMart).unwrap();
        assert_eq!(token, "\"OKMart\"");
    }

    #[test]
    fn unknown_carrier_is_rejected_with_suggestion() {
        let err = "family-mart".parse::<Carrier>().unwrap_err();
        match err {
            Error::UnknownCarrier { name, suggestions } => {
                assert_eq!(name, "family-mart");
                assert_eq!(suggestions.first().map(String::as_str), Some("family_mart"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Shopee".parse::<Carrier>().is_err());
    }

    #[test]
    fn unrelated_input_has_no_suggestions() {
        assert!(Carrier::suggestions("xyz").is_empty());
    }
}
