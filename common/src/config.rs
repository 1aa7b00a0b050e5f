use once_cell::sync::OnceCell;
use std::env;

/// Runtime configuration loaded once from `.env` and the process environment.
#[derive(Debug)]
pub struct Config {
    pub env: String,
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub log_to_stdout: bool,
    pub mongodb_url: String,
    pub database_name: String,
    pub host: String,
    pub port: u16,
    pub admin_username: String,
    pub admin_password: String,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    /// Loads the configuration from `.env` and environment variables,
    /// initializing the singleton on first call.
    ///
    /// `MONGODB_URL` falls back to a local instance so a development
    /// checkout runs without any environment file; `APP_ENV=production`
    /// deployments are expected to set it explicitly.
    pub fn init() -> &'static Self {
        dotenvy::dotenv().ok();

        CONFIG.get_or_init(|| {
            let env_name = env::var("APP_ENV").unwrap_or_else(|_| "development".into());
            let project_name = env::var("PROJECT_NAME").unwrap_or_else(|_| "rollcall-api".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "api=info".into());
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "api.log".into());
            let log_to_stdout =
                env::var("LOG_TO_STDOUT").unwrap_or_else(|_| "false".into()) == "true";
            let mongodb_url = env::var("MONGODB_URL")
                .unwrap_or_else(|_| "mongodb://localhost:27017".into());
            let database_name =
                env::var("DATABASE_NAME").unwrap_or_else(|_| "training_db".into());
            let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
            let port = env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000);
            let admin_username = env::var("ADMIN_USERNAME").unwrap_or_default();
            let admin_password = env::var("ADMIN_PASSWORD").unwrap_or_default();

            Config {
                env: env_name,
                project_name,
                log_level,
                log_file,
                log_to_stdout,
                mongodb_url,
                database_name,
                host,
                port,
                admin_username,
                admin_password,
            }
        })
    }

    pub fn get() -> &'static Self {
        CONFIG.get().expect("Config not initialized")
    }

    pub fn is_production(&self) -> bool {
        self.env.eq_ignore_ascii_case("production")
    }
}
