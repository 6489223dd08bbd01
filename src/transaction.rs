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
use std::sync::Arc;

use mysql::prelude::Queryable;

use crate::errors::Result;
use crate::pool::{DataSource, MysqlConnection};

/// Facade coordinating transaction boundaries around one datasource.
///
/// Created at most once per application; lifetime follows the owning
/// context, with no teardown of its own.
pub struct TransactionManager {
    datasource: Arc<DataSource>,
}

impl TransactionManager {
    pub fn new(datasource: Arc<DataSource>) -> Self {
        Self { datasource }
    }

    pub fn datasource(&self) -> &Arc<DataSource> {
        &self.datasource
    }

    pub fn begin(&self) -> Result<Transaction> {
        let mut conn = self.datasource.acquire()?;
        conn.query_drop("START TRANSACTION")?;
        Ok(Transaction {
            conn,
            committed: false,
            rolled_back: false,
        })
    }
}

pub struct Transaction {
    pub(crate) conn: MysqlConnection,
    pub(crate) committed: bool,
    pub(crate) rolled_back: bool,
}

#[allow(unused)]
impl Transaction {
    pub fn commit(&mut self) -> Result<()> {
        self.conn.query_drop("COMMIT")?;
        self.committed = true;
        Ok(())
    }

    pub fn rollback(&mut self) -> Result<()> {
        self.conn.query_drop("ROLLBACK")?;
        self.rolled_back = true;
        Ok(())
    }

    /// The underlying connection, for statements inside the transaction.
    pub fn connection(&mut self) -> &mut mysql::Conn {
        &mut self.conn
    }

    pub fn last_insert_id(&self) -> u64 {
        self.conn.last_insert_id()
    }

    pub fn affected_rows(&self) -> u64 {
        self.conn.affected_rows()
    }
}

impl Drop for Transaction {
    /// Will rollback transaction.
    fn drop(&mut self) {
        if !self.committed && !self.rolled_back {
            self.conn.query_drop("ROLLBACK").unwrap_or_default();
        }
    }
}
