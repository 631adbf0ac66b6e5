//! Canonical schema constants for structured logging
//!
//! These constants keep event fields consistent between the logging
//! macros, the engine layer and test assertions.

// Canonical field keys for structured logging
pub const FIELD_COMPONENT: &str = "component";
pub const FIELD_OP: &str = "op";
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

// Entity identifiers
pub const FIELD_USERNAME: &str = "username";
pub const FIELD_PRODUCT_ID: &str = "product_id";
pub const FIELD_BACKEND: &str = "backend";
pub const FIELD_TERM: &str = "term";

// Outcomes
pub const FIELD_AUTHENTICATED: &str = "authenticated";
pub const FIELD_MATCH_COUNT: &str = "match_count";
pub const FIELD_PRODUCT_COUNT: &str = "product_count";

// Error fields
pub const FIELD_ERR_KIND: &str = "err_kind";
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_DETAIL: &str = "err_detail";

// Canonical event names
pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";
