// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::auth::TokenGuard;
use crate::profile::ProfileDirectory;

#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<TokenGuard>,
    pub profiles: Arc<RwLock<ProfileDirectory>>,
}

impl AppState {
    pub fn new(guard: TokenGuard, profiles: ProfileDirectory) -> Self {
        Self {
            guard: Arc::new(guard),
            profiles: Arc::new(RwLock::new(profiles)),
        }
    }
}
