use anyhow::anyhow;
use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub auth: AuthConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub worker_threads: Option<usize>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { host: default_host(), port: default_port(), worker_threads: Some(4) }
    }
}

fn default_host() -> String { "0.0.0.0".into() }
fn default_port() -> u16 { 5000 }

/// Connection settings for the document store.
///
/// Either `uri` is given in full, or it is assembled from `user`/`password`
/// and `cluster_host` (`DB_USER`/`DB_PASS` in the environment).
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_cluster_host")]
    pub cluster_host: String,
    #[serde(default = "default_db_name")]
    pub name: String,
    #[serde(default = "default_app_name")]
    pub app_name: String,
    #[serde(default = "default_max_pool_size")]
    pub max_pool_size: u32,
    #[serde(default = "default_min_pool_size")]
    pub min_pool_size: u32,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            uri: None,
            user: None,
            password: None,
            cluster_host: default_cluster_host(),
            name: default_db_name(),
            app_name: default_app_name(),
            max_pool_size: default_max_pool_size(),
            min_pool_size: default_min_pool_size(),
            connect_timeout_secs: default_connect_timeout(),
        }
    }
}

fn default_cluster_host() -> String { "clustertestashraf.z94m9ys.mongodb.net".into() }
fn default_db_name() -> String { "hairCut".into() }
fn default_app_name() -> String { "haircut-server".into() }
fn default_max_pool_size() -> u32 { 10 }
fn default_min_pool_size() -> u32 { 0 }
fn default_connect_timeout() -> u64 { 30 }

#[derive(Debug, Clone, Deserialize)]
pub struct AuthConfig {
    #[serde(default)]
    pub jwt_secret: String,
    #[serde(default = "default_token_ttl")]
    pub token_ttl_secs: u64,
    /// Put the bearer gate in front of the mutating routes. Off by default.
    #[serde(default)]
    pub protect_mutations: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl_secs: default_token_ttl(), protect_mutations: false }
    }
}

fn default_token_ttl() -> u64 { 24 * 60 * 60 }

pub fn load_default() -> Result<AppConfig> {
    let path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
    load_from_file(&path)
}

pub fn load_from_file(path: &str) -> Result<AppConfig> {
    let content = std::fs::read_to_string(path)?;
    parse(&content)
}

pub fn parse(content: &str) -> Result<AppConfig> {
    let cfg: AppConfig = toml::from_str(content)?;
    Ok(cfg)
}

impl AppConfig {
    /// Config file if present, otherwise defaults; then environment, then validation.
    pub fn load_and_validate() -> Result<Self> {
        let mut cfg = match load_default() {
            Ok(cfg) => cfg,
            Err(e) if is_missing_file(&e) => AppConfig::default(),
            Err(e) => return Err(e),
        };
        cfg.apply_env(|key| std::env::var(key).ok());
        cfg.normalize_and_validate()?;
        Ok(cfg)
    }

    /// Overlay environment values. `lookup` is injected so tests need not touch the process env.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(port) = lookup("PORT").and_then(|p| p.trim().parse::<u16>().ok()) {
            self.server.port = port;
        }
        if let Some(w) = lookup("TOKIO_WORKER_THREADS").and_then(|v| v.parse::<usize>().ok()) {
            self.server.worker_threads = Some(w);
        }
        if let Some(uri) = lookup("MONGODB_URI").filter(|v| !v.trim().is_empty()) {
            self.database.uri = Some(uri);
        }
        if let Some(user) = lookup("DB_USER") {
            self.database.user = Some(user);
        }
        if let Some(pass) = lookup("DB_PASS") {
            self.database.password = Some(pass);
        }
        if let Some(secret) = lookup("ACCESS_TOKEN_SECRET") {
            self.auth.jwt_secret = secret;
        }
        if let Some(flag) = lookup("PROTECT_MUTATIONS") {
            self.auth.protect_mutations = matches!(flag.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on");
        }
    }

    pub fn normalize_and_validate(&mut self) -> Result<()> {
        self.server.normalize()?;
        self.database.validate()?;
        self.auth.validate()?;
        Ok(())
    }
}

fn is_missing_file(e: &anyhow::Error) -> bool {
    e.downcast_ref::<std::io::Error>()
        .map(|io| io.kind() == std::io::ErrorKind::NotFound)
        .unwrap_or(false)
}

impl ServerConfig {
    fn normalize(&mut self) -> Result<()> {
        if self.host.trim().is_empty() {
            self.host = default_host();
        }
        if self.port == 0 {
            return Err(anyhow!("server.port must be in 1..=65535"));
        }
        match self.worker_threads {
            Some(0) | None => self.worker_threads = Some(4),
            Some(_) => {}
        }
        Ok(())
    }
}

impl DatabaseConfig {
    /// Full connection string, explicit `uri` first.
    pub fn connection_uri(&self) -> Result<String> {
        if let Some(uri) = self.uri.as_deref().filter(|u| !u.trim().is_empty()) {
            return Ok(uri.to_string());
        }
        match (self.user.as_deref(), self.password.as_deref()) {
            (Some(user), Some(pass)) => Ok(format!(
                "mongodb+srv://{}:{}@{}/?retryWrites=true&w=majority",
                urlencoding::encode(user),
                urlencoding::encode(pass),
                self.cluster_host
            )),
            _ => Err(anyhow!("database credentials missing; set MONGODB_URI or DB_USER and DB_PASS")),
        }
    }

    pub fn validate(&self) -> Result<()> {
        let uri = self.connection_uri()?;
        let lower = uri.to_lowercase();
        if !(lower.starts_with("mongodb://") || lower.starts_with("mongodb+srv://")) {
            return Err(anyhow!("database uri must start with mongodb:// or mongodb+srv://"));
        }
        if self.name.trim().is_empty() {
            return Err(anyhow!("database.name is empty"));
        }
        if self.max_pool_size < self.min_pool_size {
            return Err(anyhow!("database.max_pool_size must be >= min_pool_size"));
        }
        if self.connect_timeout_secs == 0 {
            return Err(anyhow!("database.connect_timeout_secs must be positive"));
        }
        Ok(())
    }
}

impl AuthConfig {
    pub fn validate(&self) -> Result<()> {
        if self.jwt_secret.is_empty() {
            return Err(anyhow!("auth.jwt_secret is empty; set ACCESS_TOKEN_SECRET"));
        }
        if self.token_ttl_secs == 0 {
            return Err(anyhow!("auth.token_ttl_secs must be positive"));
        }
        Ok(())
    }
}
