// SPDX-License-Identifier: Apache-2.0

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

use crate::{SpotNumber, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LicensePlate(String);

impl LicensePlate {
    /// Plates are matched exactly on exit and kept as supplied.
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        if input.is_empty() {
            return Err(ValidationError(
                "license_plate must not be empty".to_string(),
            ));
        }
        Ok(Self(input.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for LicensePlate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One parking session. A record is open while `exit_time` is unset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VehicleRecord {
    pub id: i64,
    pub spot_number: SpotNumber,
    pub license_plate: LicensePlate,
    pub entry_time: Option<NaiveDateTime>,
    pub exit_time: Option<NaiveDateTime>,
}

impl VehicleRecord {
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.exit_time.is_none()
    }
}
