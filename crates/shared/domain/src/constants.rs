//! Domain-level constants.
//!
//! These constants define business rules shared by the client pages.

// =============================================================================
// User Types
// =============================================================================

/// Account that books conference rooms
pub const USER_TYPE_CLIENT: &str = "client";

/// Account that lists conference rooms
pub const USER_TYPE_HOST: &str = "host";

// =============================================================================
// Validation
// =============================================================================

/// Minimum password length accepted at registration
pub const MIN_PASSWORD_LENGTH: usize = 6;

// =============================================================================
// Notifications
// =============================================================================

/// How long a notification stays visible before it clears itself
pub const DEFAULT_NOTIFICATION_TIMEOUT_MS: u64 = 3000;
