//! Canonical structured event names used across `live-router`.

// Tenant registry events.
pub const REGISTRY_MISS: &str = "registry_miss";
pub const REGISTRY_FILL_START: &str = "registry_fill_start";
pub const REGISTRY_FILL_OK: &str = "registry_fill_ok";
pub const REGISTRY_FILL_FAILED: &str = "registry_fill_failed";
pub const REGISTRY_FILL_TIMEOUT: &str = "registry_fill_timeout";
pub const REGISTRY_FILL_COALESCED: &str = "registry_fill_coalesced";
pub const REGISTRY_FILL_DISCARDED: &str = "registry_fill_discarded";
pub const REGISTRY_PATTERN_SKIPPED: &str = "registry_pattern_skipped";
pub const REGISTRY_SAVE: &str = "registry_save";

// Background refresher events.
pub const REFRESHER_START: &str = "refresher_start";
pub const REFRESHER_STOP: &str = "refresher_stop";
pub const REFRESH_CYCLE_START: &str = "refresh_cycle_start";
pub const REFRESH_CYCLE_DONE: &str = "refresh_cycle_done";
pub const REFRESH_TENANT_FAILED: &str = "refresh_tenant_failed";
