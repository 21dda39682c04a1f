//! Exit codes for the resource binary
//!
//! One fixed code per failure class so the orchestrator can tell which
//! stage failed. The space is deliberately disjoint from HTTP status
//! codes; the originating status travels inside the error message
//! instead.

#![allow(dead_code)]

/// Success - operation completed without errors
pub const SUCCESS: i32 = 0;

/// General error - failure outside the modeled taxonomy
pub const ERROR: i32 = 1;

/// Input error - malformed request or invalid parameter combination
pub const INPUT_ERROR: i32 = 10;

/// Range error - candidate version fails the configured version range
pub const RANGE_ERROR: i32 = 11;

/// Dependency error - auxiliary repository registration failed
pub const DEPENDENCY_ERROR: i32 = 12;

/// Package error - packaging or archive inspection failed
pub const PACKAGE_ERROR: i32 = 13;

/// Sign error - key import failed or produced no key identifier
pub const SIGN_ERROR: i32 = 14;

/// Transport error - network failure or unexpected HTTP status
pub const TRANSPORT_ERROR: i32 = 15;

/// Rejected error - server accepted the upload but did not save it
pub const REJECTED_ERROR: i32 = 16;

/// Verify error - post-upload round trip failed or versions disagree
pub const VERIFY_ERROR: i32 = 17;

/// IO error - file not found, permission denied, etc.
pub const IO_ERROR: i32 = 18;
