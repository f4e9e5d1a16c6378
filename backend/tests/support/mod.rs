#![allow(dead_code)]

use backend::auth::password::hash_password;
use backend::config::ServerConfig;
use backend::store::fixture::{self, Fixture};
use backend::store::{instances, tokens, users, Database};
use std::time::Duration;
use tempfile::TempDir;

/// Two modules, three professors and three offerings. `TT1` teaches nothing.
pub const CATALOGUE: &str = r#"{
    "professors": [
        {"professor_id": "JE1", "name": "J. Excellent"},
        {"professor_id": "VS1", "name": "V. Smart"},
        {"professor_id": "TT1", "name": "T. Terrible"}
    ],
    "modules": [
        {"code": "CD1", "name": "Computing for Dummies"},
        {"code": "PG1", "name": "Programming for the Gifted"}
    ],
    "module_instances": [
        {"module_code": "CD1", "year": 2017, "semester": 1, "professors": ["JE1", "VS1"]},
        {"module_code": "CD1", "year": 2018, "semester": 2, "professors": ["JE1"]},
        {"module_code": "PG1", "year": 2017, "semester": 2, "professors": ["VS1"]}
    ]
}"#;

/// A database in a temporary directory plus the configuration handed to the app.
pub struct TestContext {
    _dir: TempDir,
    pub database: Database,
    pub config: ServerConfig,
}

impl TestContext {
    pub fn new() -> Self {
        Self::with_config(ServerConfig::default())
    }

    pub fn with_token_ttl(ttl: Duration) -> Self {
        Self::with_config(ServerConfig {
            token_ttl: Some(ttl),
            ..ServerConfig::default()
        })
    }

    fn with_config(config: ServerConfig) -> Self {
        let dir = TempDir::new().expect("temp dir");
        let database = Database::open(dir.path().join("ratings.sqlite")).expect("open database");
        Self {
            _dir: dir,
            database,
            config,
        }
    }

    /// Same context with [`CATALOGUE`] loaded.
    pub fn seeded() -> Self {
        let context = Self::new();
        context.seed();
        context
    }

    pub fn seed(&self) {
        let catalogue: Fixture = serde_json::from_str(CATALOGUE).expect("catalogue parses");
        let mut conn = self.database.connect().expect("connect");
        fixture::apply(&mut conn, &catalogue).expect("apply catalogue");
    }

    /// Registers `username` directly in the store and returns a login token.
    pub fn login(&self, username: &str) -> String {
        let conn = self.database.connect().expect("connect");
        let user = users::create(
            &conn,
            username,
            &format!("{username}@example.com"),
            &hash_password("secret").expect("hash password"),
        )
        .expect("create user");
        tokens::get_or_create(&conn, user.id, self.config.token_ttl).expect("issue token")
    }

    pub fn instance_id(&self, module_code: &str, year: i32, semester: i32) -> i64 {
        let conn = self.database.connect().expect("connect");
        instances::find(&conn, module_code, year, semester)
            .expect("instance exists")
            .id
    }
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("Authorization", format!("Token {token}"))
}

/// Builds the full application over a [`TestContext`].
macro_rules! init_app {
    ($context:expr) => {
        actix_web::test::init_service(
            actix_web::App::new()
                .app_data(actix_web::web::Data::new($context.database.clone()))
                .app_data(actix_web::web::Data::new($context.config.clone()))
                .configure(backend::services::configure_app)
                .default_service(actix_web::web::route().to(backend::services::not_found)),
        )
        .await
    };
}
