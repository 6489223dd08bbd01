//!
//! Common Use.
//!
pub use crate::config::{Platform, PoolProperties};
pub use crate::configurator::{connection_init_sqls, Outcome, PoolConfigurator};
pub use crate::context::AppContext;
pub use crate::errors::{Result, ShibaError};
pub use crate::pool::{PoolStatus, PoolTuning};

#[cfg(feature = "mysql-sync")]
pub use crate::pool::{DataSource, MysqlConnection, MysqlConnectionManager, MysqlPool};
#[cfg(feature = "mysql-sync")]
pub use crate::transaction::{Transaction, TransactionManager};
#[cfg(feature = "mysql-sync")]
pub use mysql::prelude::Queryable;
