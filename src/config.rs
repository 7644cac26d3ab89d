// src/config.rs

use std::{env, net::SocketAddr};

use dotenvy::dotenv;

pub const DEFAULT_SCHOOLS: &str = "Rysen Bikanagar,Rysen Bikaner,Rysen Deoli,Rysen Nimbhera";
pub const DEFAULT_TEST_MINUTES: i64 = 15;

#[derive(Debug, Clone)]
pub struct Config {
    /// SQLite URL. `None` keeps everything in process memory.
    pub database_url: Option<String>,
    pub jwt_secret: String,
    pub jwt_expiration: u64,
    pub admin_password: String,
    /// Fixed set of schools a test can be taken for.
    pub schools: Vec<String>,
    pub default_test_minutes: i64,
    pub bind_addr: SocketAddr,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let database_url = env::var("DATABASE_URL").ok().filter(|s| !s.trim().is_empty());

        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET must be set");

        let jwt_expiration = env::var("JWT_EXPIRATION")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(3600);

        let admin_password = env::var("ADMIN_PASSWORD").expect("ADMIN_PASSWORD must be set");

        let schools = parse_schools(
            &env::var("SCHOOLS").unwrap_or_else(|_| DEFAULT_SCHOOLS.to_string()),
        );

        let default_test_minutes = env::var("DEFAULT_TEST_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(DEFAULT_TEST_MINUTES);

        let bind_addr = env::var("BIND_ADDR")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

        let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        Self {
            database_url,
            jwt_secret,
            jwt_expiration,
            admin_password,
            schools,
            default_test_minutes,
            bind_addr,
            rust_log,
        }
    }

    pub fn is_known_school(&self, school: &str) -> bool {
        self.schools.iter().any(|s| s == school)
    }
}

/// Splits a comma separated list, dropping blanks and duplicates.
pub fn parse_schools(raw: &str) -> Vec<String> {
    let mut schools: Vec<String> = Vec::new();
    for name in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !schools.iter().any(|s| s == name) {
            schools.push(name.to_string());
        }
    }
    schools
}
