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

//! [`RuleStorage`] backed by a JSON file.
//!
//! The file maps tenant ids to pattern/payload objects:
//!
//! ```json
//! { "1": { "stream/telegraf/*": { "output": "managed_stream" } } }
//! ```
//!
//! The file is re-read on every call, so edits show up on the next fill or refresh.

use async_trait::async_trait;
use live_router::{RuleEntry, RuleStorage, StorageError, TenantId};
use serde_json::Value;
use std::fs::{self, canonicalize};
use std::path::PathBuf;
use tracing::{debug, warn};

pub struct LiveRulesStaticFile {
    static_file: String,
}

impl LiveRulesStaticFile {
    pub fn new(static_file: String) -> Self {
        LiveRulesStaticFile { static_file }
    }

    fn read_document(&self) -> Result<Value, StorageError> {
        let rules_json_file = PathBuf::from(&self.static_file);
        let rules_json_file = canonicalize(&rules_json_file).map_err(|e| {
            StorageError::Unavailable(format!("Static rules file not found: {e:?}"))
        })?;
        debug!("rules_json_file: {rules_json_file:?}");

        let data = fs::read_to_string(rules_json_file)
            .map_err(|e| StorageError::Unavailable(format!("Unable to read file: {e:?}")))?;

        serde_json::from_str(&data)
            .map_err(|e| StorageError::Malformed(format!("Unable to parse JSON: {e:?}")))
    }
}

#[async_trait]
impl RuleStorage<Value> for LiveRulesStaticFile {
    async fn list_rules(&self, tenant_id: TenantId) -> Result<Vec<RuleEntry<Value>>, StorageError> {
        debug!("list_rules for tenant: {tenant_id}");

        let document = self.read_document()?;
        let tenants = document.as_object().ok_or_else(|| {
            StorageError::Malformed("top level must be an object keyed by tenant id".to_string())
        })?;

        let mut rules = Vec::new();
        for (key, patterns) in tenants {
            match key.parse::<TenantId>() {
                Ok(id) if id == tenant_id => {}
                Ok(_) => continue,
                Err(error) => {
                    warn!("Skipping tenant key '{key}': {error}");
                    continue;
                }
            }

            let Some(patterns) = patterns.as_object() else {
                return Err(StorageError::Malformed(format!(
                    "rules for tenant {tenant_id} must be an object"
                )));
            };
            for (pattern, payload) in patterns {
                debug!("pattern: {pattern}, payload: {payload}");
                rules.push(RuleEntry::new(tenant_id, pattern.clone(), payload.clone()));
            }
        }

        debug!("Finished reading {} rules for tenant {tenant_id}", rules.len());
        Ok(rules)
    }
}
