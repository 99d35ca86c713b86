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

//! Registry tuning knobs.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::observability::fields::duration_ms;

pub const DEFAULT_REFRESH_INTERVAL_MS: u64 = 60_000;
pub const DEFAULT_STORAGE_TIMEOUT_MS: u64 = 10_000;

#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
#[error("invalid registry config: {0}")]
pub struct ConfigError(pub &'static str);

#[derive(Deserialize, Serialize, Debug, Clone, Eq, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RegistryConfig {
    /// Period between background refresh cycles.
    #[serde(default = "default_refresh_interval_ms")]
    pub refresh_interval_ms: u64,
    /// Upper bound on one tenant's storage call, on the miss path and during refresh.
    #[serde(default = "default_storage_timeout_ms")]
    pub storage_timeout_ms: u64,
}

fn default_refresh_interval_ms() -> u64 {
    DEFAULT_REFRESH_INTERVAL_MS
}

fn default_storage_timeout_ms() -> u64 {
    DEFAULT_STORAGE_TIMEOUT_MS
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            refresh_interval_ms: DEFAULT_REFRESH_INTERVAL_MS,
            storage_timeout_ms: DEFAULT_STORAGE_TIMEOUT_MS,
        }
    }
}

impl RegistryConfig {
    pub fn new(refresh_interval: Duration, storage_timeout: Duration) -> Self {
        Self {
            refresh_interval_ms: duration_ms(refresh_interval),
            storage_timeout_ms: duration_ms(storage_timeout),
        }
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn storage_timeout(&self) -> Duration {
        Duration::from_millis(self.storage_timeout_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh_interval_ms == 0 {
            return Err(ConfigError("refresh_interval_ms must be greater than zero"));
        }
        if self.storage_timeout_ms == 0 {
            return Err(ConfigError("storage_timeout_ms must be greater than zero"));
        }
        Ok(())
    }
}
