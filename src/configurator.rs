/*
 *
 *  *
 *  *      Copyright (c) 2018-2025, SnackCloud All rights reserved.
 *  *
 *  *   Redistribution and use in source and binary forms, with or without
 *  *   modification, are permitted provided that the following conditions are met:
 *  *
 *  *   Redistributions of source code must retain the above copyright notice,
 *  *   this list of conditions and the following disclaimer.
 *  *   Redistributions in binary form must reproduce the above copyright
 *  *   notice, this list of conditions and the following disclaimer in the
 *  *   documentation and/or other materials provided with the distribution.
 *  *   Neither the name of the www.snackcloud.cn developer nor the names of its
 *  *   contributors may be used to endorse or promote products derived from
 *  *   this software without specific prior written permission.
 *  *   Author: SnackCloud
 *  *
 *
 */
use std::collections::HashSet;

use tracing::debug;

use crate::config::PoolProperties;
use crate::context::AppContext;
use crate::errors::Result;

#[cfg(feature = "mysql-sync")]
use std::sync::Arc;

#[cfg(feature = "mysql-sync")]
use crate::config::Platform;
#[cfg(feature = "mysql-sync")]
use crate::errors::ShibaError;
#[cfg(feature = "mysql-sync")]
use crate::pool::DataSource;
#[cfg(feature = "mysql-sync")]
use crate::transaction::TransactionManager;

/// What a configuration run did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// A gate failed; nothing was built. Not an error.
    Inactive,
    /// A datasource from elsewhere already held the slot; this run built no
    /// pool of its own.
    Yielded,
    /// Pool built, initialized and registered.
    Configured,
}

/// Statements every new physical connection executes before it is handed
/// out. Only the `utf8mb4` character setting produces one; other encodings
/// deliberately add nothing.
pub fn connection_init_sqls(properties: &PoolProperties) -> HashSet<String> {
    let mut init_sqls = HashSet::with_capacity(1);
    if properties.default_character() == "utf8mb4" {
        init_sqls.insert("set names utf8mb4;".to_string());
    }
    init_sqls
}

/// Builds and registers the datasource and the transaction manager, governed
/// by applicability gates evaluated once at startup:
///
/// 1. pooled datasource support compiled into this build;
/// 2. URL, username and password all present in the properties;
/// 3. no datasource registered yet (first registration wins).
///
/// A failed gate is a silent pass, never an error; a failure while actually
/// building the pool propagates to the caller and is startup-fatal.
pub struct PoolConfigurator {
    properties: PoolProperties,
}

impl PoolConfigurator {
    pub fn new(properties: PoolProperties) -> Self {
        Self { properties }
    }

    pub fn properties(&self) -> &PoolProperties {
        &self.properties
    }

    pub fn configure(&self, ctx: &AppContext) -> Result<Outcome> {
        self.apply(ctx)
    }

    #[cfg(not(feature = "mysql-sync"))]
    fn apply(&self, _ctx: &AppContext) -> Result<Outcome> {
        debug!("No pooled datasource support in this build.");
        Ok(Outcome::Inactive)
    }

    #[cfg(feature = "mysql-sync")]
    fn apply(&self, ctx: &AppContext) -> Result<Outcome> {
        if !self.properties.is_complete() {
            return Ok(Outcome::Inactive);
        }

        let mut outcome = Outcome::Configured;
        if ctx.datasource().is_some() {
            debug!("No datasource built, one is already registered.");
            outcome = Outcome::Yielded;
        } else {
            let datasource = Arc::new(self.build_pool()?);
            datasource.init()?;
            if !ctx.register_datasource(Arc::clone(&datasource)) {
                debug!("No datasource built, one is already registered.");
                outcome = Outcome::Yielded;
            }
        }

        // The transaction manager wraps whichever datasource holds the
        // slot, including one supplied by another module.
        if let Some(datasource) = ctx.datasource() {
            if ctx.transaction_manager().is_none() {
                let manager = self.build_transaction_manager(Arc::clone(datasource));
                ctx.register_transaction_manager(Arc::new(manager));
            }
        }

        Ok(outcome)
    }

    /// Construct the pool from the properties: driver and credentials from
    /// configuration, active limit from `maxPoolWait`, everything else from
    /// the fixed tuning.
    #[cfg(feature = "mysql-sync")]
    pub fn build_pool(&self) -> Result<DataSource> {
        match self.properties.platform() {
            Platform::Mysql => {
                debug!(
                    driver = self.properties.driver_class_name(),
                    "building pooled datasource"
                );
                DataSource::new(self.properties.clone())
            }
            Platform::Unsupported(scheme) => Err(ShibaError::UnsupportedDriver(scheme)),
        }
    }

    #[cfg(feature = "mysql-sync")]
    pub fn build_transaction_manager(&self, datasource: Arc<DataSource>) -> TransactionManager {
        TransactionManager::new(datasource)
    }
}
