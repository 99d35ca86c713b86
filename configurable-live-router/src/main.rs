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

mod config;

use crate::config::Config;
use clap::Parser;
use live_router::{
    orgchannel, spawn_refresher, Channel, ChannelError, ConfigError, RoutingError,
    TenantRegistry,
};
use live_rules_static_file::LiveRulesStaticFile;
use serde_json::Value;
use std::fs;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

#[derive(Parser)]
#[command()]
struct RouterArgs {
    #[arg(short, long, value_name = "FILE")]
    config: String,

    /// Org-prefixed channels to resolve, e.g. `1/stream/telegraf/cpu`. Without any,
    /// the router keeps refreshing until interrupted.
    channels: Vec<String>,
}

#[derive(Debug, thiserror::Error)]
enum RouterError {
    #[error("unable to read config file: {0}")]
    ReadConfig(#[from] std::io::Error),
    #[error("unable to parse config file: {0}")]
    ParseConfig(#[from] json5::Error),
    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),
    #[error(transparent)]
    Channel(#[from] ChannelError),
    #[error(transparent)]
    Routing(#[from] RoutingError),
}

#[tokio::main]
async fn main() -> Result<(), RouterError> {
    let _ = tracing_subscriber::fmt::try_init();

    info!("Started configurable-live-router");

    let args = RouterArgs::parse();
    let contents = fs::read_to_string(&args.config)?;
    let config: Config = json5::from_str(&contents)?;
    config.registry.validate()?;

    let storage = Arc::new(LiveRulesStaticFile::new(config.rules.file_path));
    let registry = Arc::new(TenantRegistry::<Value>::new(storage, config.registry));

    if args.channels.is_empty() {
        let refresher = spawn_refresher(registry.clone(), CancellationToken::new());
        info!("No channels given, refreshing until interrupted");
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("Unable to listen for shutdown signal: {err}");
        }
        if let Err(err) = refresher.shutdown().await {
            error!("Refresher did not shut down cleanly: {err}");
        }
        return Ok(());
    }

    for raw in &args.channels {
        let (org_id, channel) = orgchannel::strip_org_id(raw)?;
        let channel = Channel::parse(channel)?;

        match registry.get(org_id, &channel.to_string()).await? {
            Some(rule) => println!("{raw}\t{rule}"),
            None => println!("{raw}\t<no rule>"),
        }
    }

    Ok(())
}
