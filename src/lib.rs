// Copyright (c) 2021 shiba contributors
//
// Licensed under the Apache License, Version 2.0
// <LICENSE-APACHE or http://www.apache.org/licenses/LICENSE-2.0> or the MIT
// license <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. All files in the project carrying such notice may not be copied,
// modified, or distributed except according to those terms.

//! This crate offers:
//!
//! *   Auto-configuration of a pooled MySQL datasource from external settings;
//! *   A transaction manager facade over the configured pool.
//!
//! The configurator runs once at startup. It stays inactive unless the
//! settings carry a URL, username and password, yields when another module
//! already registered a datasource, and otherwise builds the pool with a
//! fixed set of operational defaults (borrow timeout, idle eviction,
//! validation query, statement cache) that configuration never overrides.
//!
//! ## Installation
//!
//! Put the desired version of the crate into the `dependencies` section of your `Cargo.toml`:
//!
//! ```toml
//! [dependencies]
//! shiba = "0.1"
//! ```
//!
//!
//! ## Feature.
//!
//! * ```mysql-sync``` - to use the pooled mysql datasource
//!
//!
//! ## Example
//!
//! ```rust,no_run
//! use shiba::prelude::*;
//!
//! fn main() {
//!     let properties = PoolProperties::new("jdbc:mysql://localhost:3306/shiba")
//!         .set_username("root".to_string())
//!         .set_password("password".to_string())
//!         .set_initial_pool_size(5)
//!         .set_min_pool_size(2)
//!         .set_max_pool_wait(10)
//!         .set_default_character("utf8mb4".to_string());
//!
//!     let ctx = AppContext::new();
//!     let outcome = PoolConfigurator::new(properties)
//!         .configure(&ctx)
//!         .expect("must be ok");
//!     println!("configured: {:?}", outcome);
//!
//!     // hand the context to the application, then at shutdown:
//!     ctx.shutdown();
//! }
//! ```
mod config;
mod configurator;
mod context;
mod errors;
pub mod pool;
#[cfg(feature = "mysql-sync")]
pub mod transaction;

pub mod prelude;

#[doc(inline)]
pub use config::{Platform, PoolProperties};
#[doc(inline)]
pub use configurator::{connection_init_sqls, Outcome, PoolConfigurator};
#[doc(inline)]
pub use context::AppContext;
#[doc(inline)]
pub use errors::{Result, ShibaError};
#[doc(inline)]
pub use pool::{PoolStatus, PoolTuning, VALIDATION_QUERY};
#[cfg(feature = "mysql-sync")]
#[doc(inline)]
pub use pool::{DataSource, MysqlConnection, MysqlConnectionManager, MysqlPool};
#[cfg(feature = "mysql-sync")]
#[doc(inline)]
pub use transaction::{Transaction, TransactionManager};
