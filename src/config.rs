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

use serde::Deserialize;
use url::Url;

/// Database platform resolved from the connection URL scheme.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Platform {
    Mysql,
    Unsupported(String),
}

/// Connection properties read from the host's settings source.
///
/// The serde surface keeps the external key names (`jdbcUrl`, `maxPoolWait`,
/// ...) so any settings layer producing camel-case keys deserializes
/// directly into it. `set_*` builders cover programmatic construction.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PoolProperties {
    driver_class_name: String,
    jdbc_url: String,
    username: String,
    password: String,
    initial_pool_size: u32,
    min_pool_size: u32,
    max_pool_wait: u32,
    default_character: String,
}

impl Default for PoolProperties {
    fn default() -> Self {
        PoolProperties {
            driver_class_name: String::default(),
            jdbc_url: String::default(),
            username: String::default(),
            password: String::default(),
            initial_pool_size: 0,
            min_pool_size: 0,
            max_pool_wait: 16,
            default_character: String::default(),
        }
    }
}

impl PoolProperties {
    pub fn new(jdbc_url: &str) -> Self {
        let mut properties = PoolProperties::default();
        properties.jdbc_url = jdbc_url.to_string();
        properties
    }

    /// The URL, username and password must all be present before any
    /// resource is built; anything less keeps the module inactive.
    pub fn is_complete(&self) -> bool {
        !self.jdbc_url.is_empty() && !self.username.is_empty() && !self.password.is_empty()
    }

    /// Connection URL with the `jdbc:` marker stripped, when present.
    pub fn connection_url(&self) -> &str {
        self.jdbc_url
            .strip_prefix("jdbc:")
            .unwrap_or(&self.jdbc_url)
    }

    /// Resolve the platform from the URL scheme.
    pub fn platform(&self) -> Platform {
        match Url::parse(self.connection_url()) {
            Ok(url) => match url.scheme() {
                "mysql" => Platform::Mysql,
                scheme => Platform::Unsupported(scheme.to_string()),
            },
            Err(_e) => Platform::Unsupported(self.connection_url().to_string()),
        }
    }

    pub fn set_driver_class_name(mut self, driver_class_name: String) -> Self {
        self.driver_class_name = driver_class_name;
        self
    }

    pub fn driver_class_name(&self) -> &str {
        &self.driver_class_name
    }

    pub fn set_jdbc_url(mut self, jdbc_url: String) -> Self {
        self.jdbc_url = jdbc_url;
        self
    }

    pub fn jdbc_url(&self) -> &str {
        &self.jdbc_url
    }

    pub fn set_username(mut self, username: String) -> Self {
        self.username = username;
        self
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn set_password(mut self, password: String) -> Self {
        self.password = password;
        self
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn set_initial_pool_size(mut self, initial_pool_size: u32) -> Self {
        self.initial_pool_size = initial_pool_size;
        self
    }

    pub fn initial_pool_size(&self) -> u32 {
        self.initial_pool_size
    }

    pub fn set_min_pool_size(mut self, min_pool_size: u32) -> Self {
        self.min_pool_size = min_pool_size;
        self
    }

    pub fn min_pool_size(&self) -> u32 {
        self.min_pool_size
    }

    pub fn set_max_pool_wait(mut self, max_pool_wait: u32) -> Self {
        self.max_pool_wait = max_pool_wait;
        self
    }

    /// Upstream fed this value to the pool's active-connection limit, not a
    /// wait time. That behavior is kept.
    pub fn max_pool_wait(&self) -> u32 {
        self.max_pool_wait
    }

    pub fn set_default_character(mut self, default_character: String) -> Self {
        self.default_character = default_character;
        self
    }

    pub fn default_character(&self) -> &str {
        &self.default_character
    }
}
