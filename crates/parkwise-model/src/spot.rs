// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError(pub String);

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for ValidationError {}

/// Store-assigned spot identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotId(i64);

impl SpotId {
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Parses a path segment; anything but a plain integer is rejected.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        input
            .trim()
            .parse::<i64>()
            .map(Self)
            .map_err(|_| ValidationError(format!("spot id must be an integer: {input}")))
    }

    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl Display for SpotId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Human-facing spot label.
///
/// Labels are not unique in storage and are the soft join key between spots
/// and vehicle records, so they are kept byte for byte as supplied. The
/// registry accepts any label; `parse` only refuses the empty label, which
/// cannot select a spot on the occupancy side.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotNumber(String);

impl SpotNumber {
    #[must_use]
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("spot_number must not be empty".to_string()));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl Display for SpotNumber {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Free-form spot category such as `compact` or `ev`. Stored as supplied;
/// only the empty string is refused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpotType(String);

impl SpotType {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError("type must not be empty".to_string()));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for SpotType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Availability {
    #[serde(rename = "yes")]
    Available,
    #[serde(rename = "no")]
    Occupied,
}

impl Availability {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Available => "yes",
            Self::Occupied => "no",
        }
    }

    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        match input {
            "yes" => Ok(Self::Available),
            "no" => Ok(Self::Occupied),
            other => Err(ValidationError(format!(
                "is_available must be 'yes' or 'no', got '{other}'"
            ))),
        }
    }

    #[must_use]
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

impl Display for Availability {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkingSpot {
    pub id: SpotId,
    pub spot_number: SpotNumber,
    #[serde(rename = "type")]
    pub spot_type: SpotType,
    pub is_available: Availability,
}

/// Validated spot fields used by both create and full-replace update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewParkingSpot {
    pub spot_number: SpotNumber,
    pub spot_type: SpotType,
    pub is_available: Availability,
}

impl NewParkingSpot {
    pub fn new(
        spot_number: &str,
        spot_type: &str,
        is_available: Availability,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            spot_number: SpotNumber::new(spot_number),
            spot_type: SpotType::parse(spot_type)?,
            is_available,
        })
    }

    #[must_use]
    pub fn with_id(self, id: SpotId) -> ParkingSpot {
        ParkingSpot {
            id,
            spot_number: self.spot_number,
            spot_type: self.spot_type,
            is_available: self.is_available,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spot_type_only_rejects_empty() {
        assert!(SpotType::parse("").is_err());
        assert_eq!(SpotType::parse("   ").expect("type").as_str(), "   ");
        assert_eq!(SpotType::parse(" ev ").expect("type").as_str(), " ev ");
        let long = "t".repeat(200);
        assert_eq!(SpotType::parse(&long).expect("type").as_str(), long);
    }

    #[test]
    fn spot_number_parse_keeps_label_verbatim() {
        assert_eq!(SpotNumber::parse("A1 ").expect("label").as_str(), "A1 ");
        let long = "L".repeat(65);
        assert_eq!(SpotNumber::parse(&long).expect("label").as_str(), long);
        assert_eq!(
            SpotNumber::parse(" B2").expect("label"),
            SpotNumber::new(" B2")
        );
    }

    #[test]
    fn spot_id_parse_rejects_non_numeric_segments() {
        assert_eq!(SpotId::parse("42").expect("id").get(), 42);
        assert!(SpotId::parse("all").is_err());
        assert!(SpotId::parse("").is_err());
    }

    #[test]
    fn availability_boundary_strings() {
        assert_eq!(Availability::parse("yes"), Ok(Availability::Available));
        assert_eq!(Availability::parse("no"), Ok(Availability::Occupied));
        assert!(Availability::parse("YES").is_err());
        assert_eq!(Availability::Occupied.to_string(), "no");
    }

    #[test]
    fn registry_labels_are_not_validated() {
        let spot = NewParkingSpot::new("", "compact", Availability::Available).expect("spot");
        assert_eq!(spot.spot_number.as_str(), "");
        assert!(SpotNumber::parse("").is_err());
    }
}
