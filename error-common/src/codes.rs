// Error codes implementation
// This module contains standardized error codes for the LabCare Engine

pub mod validation {
    pub const INVALID_INPUT: &str = "VALIDATION_1001";
    pub const MISSING_REQUIRED_FIELD: &str = "VALIDATION_1002";
    pub const EMPTY_SELECTION: &str = "VALIDATION_1003";
    pub const NEGATIVE_AMOUNT: &str = "VALIDATION_1004";
}

pub mod auth {
    pub const TOKEN_REJECTED: &str = "AUTH_2001";
    pub const TOKEN_MISSING: &str = "AUTH_2002";
}

pub mod lookup {
    pub const NO_MATCH: &str = "LOOKUP_3001";
}

pub mod network {
    pub const REQUEST_FAILED: &str = "NET_4001";
    pub const TIMEOUT: &str = "NET_4002";
}

pub mod backend {
    pub const REQUEST_REJECTED: &str = "BACKEND_5001";
    pub const MALFORMED_RESPONSE: &str = "BACKEND_5002";
}

pub mod internal {
    pub const UNEXPECTED: &str = "INTERNAL_9001";
}
