// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use crate::config::Config;
use crate::resolver::SecretResolver;

/// Shared, read-only request state.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub resolver: Arc<dyn SecretResolver>,
}

impl AppState {
    pub fn new(config: Config, resolver: Arc<dyn SecretResolver>) -> Self {
        Self {
            config: Arc::new(config),
            resolver,
        }
    }
}
