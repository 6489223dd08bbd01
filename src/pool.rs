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

use std::time::Duration;

#[cfg(feature = "mysql-sync")]
use std::sync::atomic::{AtomicU64, Ordering};
#[cfg(feature = "mysql-sync")]
use std::sync::RwLock;

#[cfg(feature = "mysql-sync")]
use mysql::prelude::Queryable;
#[cfg(feature = "mysql-sync")]
use mysql::{Conn, Error, Opts, OptsBuilder};
#[cfg(feature = "mysql-sync")]
use tracing::debug;

#[cfg(feature = "mysql-sync")]
use crate::config::PoolProperties;
#[cfg(feature = "mysql-sync")]
use crate::configurator::connection_init_sqls;
#[cfg(feature = "mysql-sync")]
use crate::errors::{Result, ShibaError};

/// Query run to decide whether a connection is still usable.
pub const VALIDATION_QUERY: &str = "SELECT 'x'";

/// Operational settings applied to every pool this crate builds. These are
/// never taken from `PoolProperties`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PoolTuning {
    /// Longest a borrower waits for a free connection.
    pub max_wait: Duration,
    /// Cadence of the idle eviction sweep.
    pub eviction_run_interval: Duration,
    /// Idle time after which a connection becomes evictable.
    pub min_evictable_idle: Duration,
    pub validation_query: &'static str,
    pub test_while_idle: bool,
    pub test_on_borrow: bool,
    pub test_on_return: bool,
    pub stmt_cache_size: usize,
    pub stats_enabled: bool,
}

impl Default for PoolTuning {
    fn default() -> Self {
        PoolTuning {
            max_wait: Duration::from_millis(60000),
            eviction_run_interval: Duration::from_millis(6000),
            min_evictable_idle: Duration::from_millis(300000),
            validation_query: VALIDATION_QUERY,
            test_while_idle: true,
            test_on_borrow: false,
            test_on_return: false,
            stmt_cache_size: 20,
            stats_enabled: true,
        }
    }
}

/// Connection pool state
#[derive(Debug, Clone, Default)]
pub struct PoolStatus {
    pub size: usize,
    pub available: usize,
    pub acquired: u64,
    pub faults: u64,
}

#[cfg(feature = "mysql-sync")]
pub type MysqlPool = r2d2::Pool<MysqlConnectionManager>;
#[cfg(feature = "mysql-sync")]
pub type MysqlConnection = r2d2::PooledConnection<MysqlConnectionManager>;

#[cfg(feature = "mysql-sync")]
#[derive(Clone, Debug)]
pub struct MysqlConnectionManager {
    params: Opts,
}

#[cfg(feature = "mysql-sync")]
impl MysqlConnectionManager {
    pub fn new(properties: &PoolProperties, tuning: &PoolTuning) -> Result<Self> {
        let url_opts = Opts::from_url(properties.connection_url())
            .map_err(|e| ShibaError::UrlParseError(format!("Invalid MySQL URL: {}", e)))?;
        let mut opts = OptsBuilder::from_opts(url_opts).stmt_cache_size(tuning.stmt_cache_size);
        if !properties.username().is_empty() {
            opts = opts.user(Some(properties.username()));
        }
        if !properties.password().is_empty() {
            opts = opts.pass(Some(properties.password()));
        }
        // Statements every new physical connection runs before it is handed out
        let init_sqls = connection_init_sqls(properties);
        if !init_sqls.is_empty() {
            opts = opts.init(init_sqls.into_iter().collect::<Vec<String>>());
        }
        Ok(Self {
            params: Opts::from(opts),
        })
    }
}

#[cfg(feature = "mysql-sync")]
impl r2d2::ManageConnection for MysqlConnectionManager {
    type Connection = Conn;
    type Error = Error;

    fn connect(&self) -> std::result::Result<Conn, Error> {
        Conn::new(self.params.clone())
    }

    fn is_valid(&self, conn: &mut Conn) -> std::result::Result<(), Error> {
        match conn.ping() {
            Ok(_) => Ok(()),
            Err(_) => {
                // If the ping fails, try the validation query as a secondary check
                conn.query_drop(VALIDATION_QUERY).map_err(|e| {
                    tracing::warn!("Connection validation failed: {}", e);
                    e
                })
            }
        }
    }

    fn has_broken(&self, conn: &mut Conn) -> bool {
        conn.ping().is_err()
    }
}

///
/// Create a connection pool
///
/// properties Connection information, tuning the fixed operational settings
///
#[cfg(feature = "mysql-sync")]
pub fn init_mysql_pool(properties: &PoolProperties, tuning: &PoolTuning) -> Result<MysqlPool> {
    let max_active = properties.max_pool_wait();
    if max_active == 0 {
        return Err(ShibaError::PoolError(
            "maxPoolWait must be at least 1".to_string(),
        ));
    }
    if properties.min_pool_size() > max_active {
        return Err(ShibaError::PoolError(format!(
            "minPoolSize {} exceeds the active limit {}",
            properties.min_pool_size(),
            max_active
        )));
    }
    let manager = MysqlConnectionManager::new(properties, tuning)?;

    let pool = r2d2::Pool::builder()
        .max_size(max_active)
        .min_idle(Some(properties.min_pool_size()))
        .connection_timeout(tuning.max_wait)
        .idle_timeout(Some(tuning.min_evictable_idle))
        .test_on_check_out(tuning.test_on_borrow)
        .build(manager)
        .map_err(|e| {
            ShibaError::PoolError(format!("Failed to create MySQL connection pool: {}", e))
        })?;

    // Testing connections
    let mut conn = pool.get().map_err(|e| {
        ShibaError::PoolError(format!("Failed to get connection from pool: {}", e))
    })?;

    conn.query_drop(tuning.validation_query)
        .map_err(|e| ShibaError::DatabaseError(format!("MySQL connection test failed: {}", e)))?;

    Ok(pool)
}

/// The pooled datasource handed to the rest of the application.
///
/// Built once at startup from [`PoolProperties`] plus [`PoolTuning`];
/// `init` must run before first use and `close` runs once at shutdown.
#[cfg(feature = "mysql-sync")]
pub struct DataSource {
    pool: RwLock<Option<MysqlPool>>,
    properties: PoolProperties,
    tuning: PoolTuning,
    acquired: AtomicU64,
    faults: AtomicU64,
}

#[cfg(feature = "mysql-sync")]
impl DataSource {
    pub fn new(properties: PoolProperties) -> Result<Self> {
        let tuning = PoolTuning::default();
        let pool = init_mysql_pool(&properties, &tuning)?;
        Ok(DataSource {
            pool: RwLock::new(Some(pool)),
            properties,
            tuning,
            acquired: AtomicU64::new(0),
            faults: AtomicU64::new(0),
        })
    }

    /// Open the initial connections, bounded by the active limit. Each new
    /// physical connection has already run the connection-init statements.
    pub fn init(&self) -> Result<()> {
        let pool = self.shared()?;
        let initial = self
            .properties
            .initial_pool_size()
            .min(self.properties.max_pool_wait());
        let mut warmed = Vec::with_capacity(initial as usize);
        for _ in 0..initial {
            warmed.push(
                pool.get()
                    .map_err(|e| ShibaError::PoolError(e.to_string()))?,
            );
        }
        debug!(connections = warmed.len(), "datasource initialized");
        Ok(())
    }

    /// get a usable database connection from
    pub fn acquire(&self) -> Result<MysqlConnection> {
        let pool = self.shared()?;
        let mut pooled_conn = match pool.get() {
            Ok(pooled_conn) => pooled_conn,
            Err(e) => {
                self.fault();
                return Err(ShibaError::PoolError(e.to_string()));
            }
        };
        // Verify that the connection is still valid
        if pooled_conn.ping().is_err()
            && pooled_conn.query_drop(self.tuning.validation_query).is_err()
        {
            self.fault();
            return Err(ShibaError::ConnectionValidError);
        }
        if self.tuning.stats_enabled {
            self.acquired.fetch_add(1, Ordering::Relaxed);
        }
        Ok(pooled_conn)
    }

    /// Get the connection pool status
    pub fn status(&self) -> PoolStatus {
        let (size, available) = match self.shared() {
            Ok(pool) => {
                let state = pool.state();
                (state.connections as usize, state.idle_connections as usize)
            }
            Err(_) => (0, 0),
        };
        PoolStatus {
            size,
            available,
            acquired: self.acquired.load(Ordering::Relaxed),
            faults: self.faults.load(Ordering::Relaxed),
        }
    }

    /// Close connection pooling. The first call releases the pool and its
    /// connections; later calls are no-ops.
    pub fn close(&self) {
        let mut slot = match self.pool.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        if slot.take().is_some() {
            debug!("datasource closed, pooled connections released");
        }
    }

    pub fn is_closed(&self) -> bool {
        self.shared().is_err()
    }

    pub fn properties(&self) -> &PoolProperties {
        &self.properties
    }

    pub fn tuning(&self) -> &PoolTuning {
        &self.tuning
    }

    fn shared(&self) -> Result<MysqlPool> {
        let slot = match self.pool.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        slot.as_ref().cloned().ok_or(ShibaError::Closed)
    }

    fn fault(&self) {
        if self.tuning.stats_enabled {
            self.faults.fetch_add(1, Ordering::Relaxed);
        }
    }
}
