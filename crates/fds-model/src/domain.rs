use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Regulatory domain keys every jurisdiction must carry.
///
/// The set is closed: the scorer reads exactly these seven keys. Documents may
/// hold additional domain keys, which are preserved but never required.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DomainKey {
    HousingRent,
    HousingBuy,
    Business,
    School,
    Speech,
    Privacy,
    Mobility,
}

impl DomainKey {
    /// All required domains in canonical reporting order.
    pub const REQUIRED: [DomainKey; 7] = [
        DomainKey::HousingRent,
        DomainKey::HousingBuy,
        DomainKey::Business,
        DomainKey::School,
        DomainKey::Speech,
        DomainKey::Privacy,
        DomainKey::Mobility,
    ];

    /// Returns the key as it appears in the persisted document.
    pub fn as_str(&self) -> &'static str {
        match self {
            DomainKey::HousingRent => "housing_rent",
            DomainKey::HousingBuy => "housing_buy",
            DomainKey::Business => "business",
            DomainKey::School => "school",
            DomainKey::Speech => "speech",
            DomainKey::Privacy => "privacy",
            DomainKey::Mobility => "mobility",
        }
    }
}

impl fmt::Display for DomainKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DomainKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DomainKey::REQUIRED
            .into_iter()
            .find(|key| key.as_str() == s.trim())
            .ok_or_else(|| format!("Unknown domain key: {s}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_required_key() {
        for key in DomainKey::REQUIRED {
            assert_eq!(key.as_str().parse::<DomainKey>(), Ok(key));
        }
        assert!("housing".parse::<DomainKey>().is_err());
    }

    #[test]
    fn serializes_as_snake_case() {
        let json = serde_json::to_string(&DomainKey::HousingBuy).unwrap();
        assert_eq!(json, "\"housing_buy\"");
    }
}
