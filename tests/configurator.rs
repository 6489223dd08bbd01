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
//!
//! Tests.
//!
use std::time::Duration;

use shiba::prelude::*;

fn complete_properties() -> PoolProperties {
    PoolProperties::new("jdbc:mysql://localhost:3306/app")
        .set_username("root".to_string())
        .set_password("secret".to_string())
        .set_initial_pool_size(5)
        .set_min_pool_size(2)
        .set_max_pool_wait(10)
        .set_default_character("utf8mb4".to_string())
}

#[test]
fn test_settings_keys_deserialize() {
    let properties: PoolProperties = serde_json::from_str(
        r#"{
            "driverClassName": "com.mysql.jdbc.Driver",
            "jdbcUrl": "jdbc:mysql://localhost:3306/app",
            "username": "root",
            "password": "secret",
            "initialPoolSize": 5,
            "minPoolSize": 2,
            "maxPoolWait": 10,
            "defaultCharacter": "utf8mb4"
        }"#,
    )
    .expect("The settings surface should deserialize");

    assert_eq!(properties.driver_class_name(), "com.mysql.jdbc.Driver");
    assert_eq!(properties.jdbc_url(), "jdbc:mysql://localhost:3306/app");
    assert_eq!(properties.username(), "root");
    assert_eq!(properties.password(), "secret");
    assert_eq!(properties.initial_pool_size(), 5);
    assert_eq!(properties.min_pool_size(), 2);
    assert_eq!(properties.max_pool_wait(), 10);
    assert_eq!(properties.default_character(), "utf8mb4");
    assert!(properties.is_complete());
}

#[test]
fn test_missing_settings_keys_use_defaults() {
    let properties: PoolProperties =
        serde_json::from_str("{}").expect("Empty settings should deserialize");

    assert_eq!(properties.jdbc_url(), "");
    assert_eq!(properties.initial_pool_size(), 0);
    assert_eq!(properties.default_character(), "");
    assert!(!properties.is_complete(), "Empty settings cannot activate the module");
}

#[test]
fn test_init_sqls_for_utf8mb4() {
    let properties = complete_properties();
    let init_sqls = connection_init_sqls(&properties);

    assert_eq!(init_sqls.len(), 1);
    assert!(init_sqls.contains("set names utf8mb4;"));
}

#[test]
fn test_init_sqls_empty_for_everything_else() {
    for encoding in ["", "utf8", "latin1", "UTF8MB4", "utf8mb3"] {
        let properties = complete_properties().set_default_character(encoding.to_string());
        assert!(
            connection_init_sqls(&properties).is_empty(),
            "Encoding {:?} must not produce init statements",
            encoding
        );
    }
}

#[test]
fn test_fixed_tuning_defaults() {
    let tuning = PoolTuning::default();

    assert_eq!(tuning.max_wait, Duration::from_millis(60000));
    assert_eq!(tuning.eviction_run_interval, Duration::from_millis(6000));
    assert_eq!(tuning.min_evictable_idle, Duration::from_millis(300000));
    assert_eq!(tuning.validation_query, "SELECT 'x'");
    assert!(tuning.test_while_idle);
    assert!(!tuning.test_on_borrow);
    assert!(!tuning.test_on_return);
    assert_eq!(tuning.stmt_cache_size, 20);
    assert!(tuning.stats_enabled);
}

#[test]
fn test_platform_from_url_scheme() {
    assert_eq!(
        PoolProperties::new("mysql://localhost:3306/app").platform(),
        Platform::Mysql
    );
    assert_eq!(
        PoolProperties::new("jdbc:mysql://localhost:3306/app").platform(),
        Platform::Mysql,
        "The jdbc marker should be stripped before scheme resolution"
    );
    assert_eq!(
        PoolProperties::new("postgres://localhost/app").platform(),
        Platform::Unsupported("postgres".to_string())
    );
}

#[test]
fn test_connection_url_strips_jdbc_marker() {
    let properties = PoolProperties::new("jdbc:mysql://localhost:3306/app");
    assert_eq!(properties.connection_url(), "mysql://localhost:3306/app");

    let plain = PoolProperties::new("mysql://localhost:3306/app");
    assert_eq!(plain.connection_url(), "mysql://localhost:3306/app");
}

#[test]
fn test_incomplete_properties_stay_inactive() {
    let missing_url = complete_properties().set_jdbc_url(String::default());
    let missing_username = complete_properties().set_username(String::default());
    let missing_password = complete_properties().set_password(String::default());

    for properties in [missing_url, missing_username, missing_password] {
        let ctx = AppContext::new();
        let outcome = PoolConfigurator::new(properties)
            .configure(&ctx)
            .expect("An inactive module is a pass, not an error");
        assert_eq!(outcome, Outcome::Inactive);
    }
}

#[test]
fn test_builder_roundtrip() {
    let properties = PoolProperties::default()
        .set_driver_class_name("com.mysql.jdbc.Driver".to_string())
        .set_jdbc_url("mysql://db:3306/app".to_string())
        .set_username("app".to_string())
        .set_password("secret".to_string())
        .set_initial_pool_size(3)
        .set_min_pool_size(1)
        .set_max_pool_wait(7)
        .set_default_character("utf8".to_string());

    assert_eq!(properties.driver_class_name(), "com.mysql.jdbc.Driver");
    assert_eq!(properties.jdbc_url(), "mysql://db:3306/app");
    assert_eq!(properties.username(), "app");
    assert_eq!(properties.password(), "secret");
    assert_eq!(properties.initial_pool_size(), 3);
    assert_eq!(properties.min_pool_size(), 1);
    assert_eq!(properties.max_pool_wait(), 7);
    assert_eq!(properties.default_character(), "utf8");
}

#[test]
fn test_default_max_pool_wait() {
    assert_eq!(PoolProperties::default().max_pool_wait(), 16);
}

#[test]
fn test_shutdown_without_registration_is_a_noop() {
    let ctx = AppContext::new();
    ctx.shutdown();
    ctx.shutdown();
}
