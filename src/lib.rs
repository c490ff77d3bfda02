// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Meicaixa keeps the books of a Brazilian MEI micro-entrepreneur: business
//! and personal expenses, client revenue, investments, the monthly DRE and the
//! annual revenue limit.

pub mod cli;
pub mod commands;
pub mod db;
pub mod dre;
pub mod error;
pub mod models;
pub mod period;
pub mod reports;
pub mod store;
pub mod summary;
pub mod threshold;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Installs the global tracing subscriber once. `RUST_LOG` overrides the
/// default `meicaixa=info` filter.
pub fn init() {
    INIT_TRACING.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("meicaixa=info"));
        // A subscriber installed by the host wins.
        let _ = fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init();
        tracing::debug!("tracing initialized");
    });
}
