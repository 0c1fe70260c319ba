//! Unified error codes for the turno suite
//!
//! Error codes are shared between the client and the API so failures keep
//! their identity across the wire. Organized by category:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Reservation-block errors
//! - 4xxx: Reassignment errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unified error code enum
///
/// Represented as u16 values for efficient serialization and
/// cross-language compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Invalid request
    InvalidRequest = 4,
    /// Invalid format
    InvalidFormat = 5,
    /// Required field missing
    RequiredField = 6,
    /// Operation reported failure by the server
    OperationFailed = 7,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Token is invalid
    TokenInvalid = 1004,
    /// Session has expired
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Specific role required
    RoleRequired = 2002,
    /// Only the area administrator may perform this action
    AreaAdminRequired = 2003,

    // ==================== 3xxx: Reservation blocks ====================
    /// Block not found
    BlockNotFound = 3001,
    /// No blocks generated for the requested year
    NoBlocksForYear = 3002,
    /// Group not found
    GroupNotFound = 3003,
    /// Area not found
    AreaNotFound = 3004,
    /// Employee not found
    EmployeeNotFound = 3005,
    /// Employee is not assigned to the given block
    EmployeeNotInBlock = 3006,

    // ==================== 4xxx: Reassignment ====================
    /// Destination block is already full
    DestinationBlockFull = 4001,
    /// Destination block has already started
    DestinationBlockStarted = 4002,
    /// Origin and destination are the same block
    SameBlock = 4003,
    /// Employee state does not allow reassignment
    EmployeeNotEligible = 4004,

    // ==================== 9xxx: System ====================
    /// Internal server error
    InternalError = 9001,
    /// Network error
    NetworkError = 9002,
    /// Timeout
    TimeoutError = 9003,
}

impl ErrorCode {
    /// Get the default human-readable message for this error code
    pub fn message(&self) -> &'static str {
        match self {
            Self::Success => "Success",
            Self::Unknown => "Unknown error",
            Self::ValidationFailed => "Validation failed",
            Self::NotFound => "Resource not found",
            Self::InvalidRequest => "Invalid request",
            Self::InvalidFormat => "Invalid format",
            Self::RequiredField => "Required field missing",
            Self::OperationFailed => "Operation failed",

            Self::NotAuthenticated => "Not authenticated",
            Self::InvalidCredentials => "Invalid credentials",
            Self::TokenExpired => "Token expired",
            Self::TokenInvalid => "Invalid token",
            Self::SessionExpired => "Session expired",

            Self::PermissionDenied => "Permission denied",
            Self::RoleRequired => "Role required",
            Self::AreaAdminRequired => "Area administrator role required",

            Self::BlockNotFound => "Reservation block not found",
            Self::NoBlocksForYear => "No blocks generated for the requested year",
            Self::GroupNotFound => "Group not found",
            Self::AreaNotFound => "Area not found",
            Self::EmployeeNotFound => "Employee not found",
            Self::EmployeeNotInBlock => "Employee is not assigned to the origin block",

            Self::DestinationBlockFull => "Destination block has no free spaces",
            Self::DestinationBlockStarted => "Destination block has already started",
            Self::SameBlock => "Origin and destination block are the same",
            Self::EmployeeNotEligible => "Employee state does not allow reassignment",

            Self::InternalError => "Internal server error",
            Self::NetworkError => "Network error",
            Self::TimeoutError => "Operation timed out",
        }
    }

    /// Numeric representation
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{:04}", self.as_u16())
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code as u16
    }
}

/// Error returned when a u16 does not map to a known [`ErrorCode`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        let code = match value {
            0 => Self::Success,
            1 => Self::Unknown,
            2 => Self::ValidationFailed,
            3 => Self::NotFound,
            4 => Self::InvalidRequest,
            5 => Self::InvalidFormat,
            6 => Self::RequiredField,
            7 => Self::OperationFailed,

            1001 => Self::NotAuthenticated,
            1002 => Self::InvalidCredentials,
            1003 => Self::TokenExpired,
            1004 => Self::TokenInvalid,
            1005 => Self::SessionExpired,

            2001 => Self::PermissionDenied,
            2002 => Self::RoleRequired,
            2003 => Self::AreaAdminRequired,

            3001 => Self::BlockNotFound,
            3002 => Self::NoBlocksForYear,
            3003 => Self::GroupNotFound,
            3004 => Self::AreaNotFound,
            3005 => Self::EmployeeNotFound,
            3006 => Self::EmployeeNotInBlock,

            4001 => Self::DestinationBlockFull,
            4002 => Self::DestinationBlockStarted,
            4003 => Self::SameBlock,
            4004 => Self::EmployeeNotEligible,

            9001 => Self::InternalError,
            9002 => Self::NetworkError,
            9003 => Self::TimeoutError,

            other => return Err(InvalidErrorCode(other)),
        };
        Ok(code)
    }
}
