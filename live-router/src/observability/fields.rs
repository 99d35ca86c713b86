/********************************************************************************
 * Copyright (c) 2026 Contributors to the Eclipse Foundation
 *
 * See the NOTICE file(s) distributed with this work for additional
 * information regarding copyright ownership.
 *
 * This program and the accompanying materials are made available under the
 * terms of the Apache License Version 2.0 which is available at
 * https://www.apache.org/licenses/LICENSE-2.0
 *
 * SPDX-License-Identifier: Apache-2.0
 ********************************************************************************/

//! Canonical component names, reason values and value-format helpers.

use std::time::Duration;

use crate::error::RoutingError;

pub const COMPONENT_TENANT_REGISTRY: &str = "tenant_registry";
pub const COMPONENT_REFRESHER: &str = "refresher";

pub const REASON_INVALID_PATTERN: &str = "invalid_pattern";
pub const REASON_FOREIGN_TENANT: &str = "foreign_tenant";
pub const REASON_STORAGE_ERROR: &str = "storage_error";
pub const REASON_STORAGE_TIMEOUT: &str = "storage_timeout";
pub const REASON_CANCELLED: &str = "cancelled";

pub fn duration_ms(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

/// Maps a routing error onto the `reason` value logged with it.
pub fn routing_error_reason(err: &RoutingError) -> &'static str {
    match err {
        RoutingError::InvalidPattern(_) => REASON_INVALID_PATTERN,
        RoutingError::Storage { .. } => REASON_STORAGE_ERROR,
        RoutingError::StorageTimeout { .. } => REASON_STORAGE_TIMEOUT,
    }
}

#[cfg(test)]
mod tests {
    use super::{duration_ms, routing_error_reason, REASON_STORAGE_TIMEOUT};
    use crate::error::RoutingError;
    use std::time::Duration;

    #[test]
    fn duration_ms_saturates() {
        assert_eq!(duration_ms(Duration::from_secs(60)), 60_000);
        assert_eq!(duration_ms(Duration::MAX), u64::MAX);
    }

    #[test]
    fn timeout_maps_to_timeout_reason() {
        let err = RoutingError::StorageTimeout {
            tenant_id: 1,
            timeout: Duration::from_secs(1),
        };
        assert_eq!(routing_error_reason(&err), REASON_STORAGE_TIMEOUT);
    }
}
