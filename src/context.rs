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
#[cfg(feature = "mysql-sync")]
use std::sync::Arc;

#[cfg(feature = "mysql-sync")]
use once_cell::sync::OnceCell;

#[cfg(feature = "mysql-sync")]
use crate::pool::DataSource;
#[cfg(feature = "mysql-sync")]
use crate::transaction::TransactionManager;

/// Application-lifetime registry for the pooled resources.
///
/// Holds at most one datasource and one transaction manager; the first
/// registration of each wins and later ones are rejected without error.
/// Consumers receive the handles from here instead of discovering them.
#[derive(Default)]
pub struct AppContext {
    #[cfg(feature = "mysql-sync")]
    datasource: OnceCell<Arc<DataSource>>,
    #[cfg(feature = "mysql-sync")]
    transaction_manager: OnceCell<Arc<TransactionManager>>,
}

impl AppContext {
    pub fn new() -> Self {
        AppContext::default()
    }

    /// Close the registered datasource. Runs the close step exactly once no
    /// matter how often the host calls it.
    pub fn shutdown(&self) {
        #[cfg(feature = "mysql-sync")]
        if let Some(datasource) = self.datasource.get() {
            datasource.close();
        }
    }
}

#[cfg(feature = "mysql-sync")]
impl AppContext {
    /// Register the datasource; `false` when a datasource already holds the
    /// slot, in which case the given one is dropped.
    pub fn register_datasource(&self, datasource: Arc<DataSource>) -> bool {
        self.datasource.set(datasource).is_ok()
    }

    pub fn datasource(&self) -> Option<&Arc<DataSource>> {
        self.datasource.get()
    }

    pub fn register_transaction_manager(&self, manager: Arc<TransactionManager>) -> bool {
        self.transaction_manager.set(manager).is_ok()
    }

    pub fn transaction_manager(&self) -> Option<&Arc<TransactionManager>> {
        self.transaction_manager.get()
    }
}
