// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

pub mod messages {
    pub const INVALID_INPUT: &str = "Invalid input";
    pub const INVALID_BODY: &str = "Invalid body";
    pub const INVALID_PARKING_SPOT: &str = "Invalid parking spot";
    pub const SPOT_NOT_FOUND: &str = "Parking spot not found";
    pub const SPOT_NOT_AVAILABLE: &str = "Parking spot is not available";
    pub const ACTIVE_ENTRY_NOT_FOUND: &str = "Active vehicle entry not found";
    pub const SPOT_CREATE_FAILED: &str = "Failed to create parking spot";
    pub const SPOT_SCAN_FAILED: &str = "Failed to scan parking spot";
    pub const ENTRY_SCAN_FAILED: &str = "Error scanning vehicle entry";
    pub const ENTRY_FAILED: &str = "Failed to record vehicle entry";
    pub const EXIT_FAILED: &str = "Failed to record vehicle exit";
    pub const INTERNAL: &str = "Internal server error";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ApiErrorCode {
    ValidationFailed,
    NotFound,
    Conflict,
    Internal,
}

impl ApiErrorCode {
    #[must_use]
    pub const fn http_status(self) -> u16 {
        match self {
            Self::ValidationFailed => 400,
            Self::NotFound => 404,
            Self::Conflict => 409,
            Self::Internal => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApiError {
    pub code: ApiErrorCode,
    pub message: String,
}

impl ApiError {
    #[must_use]
    pub fn new(code: ApiErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::ValidationFailed, message)
    }

    #[must_use]
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::NotFound, message)
    }

    #[must_use]
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Conflict, message)
    }

    #[must_use]
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ApiErrorCode::Internal, message)
    }

    #[must_use]
    pub const fn http_status(&self) -> u16 {
        self.code.http_status()
    }
}

impl Display for ApiError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}
