#[derive(Debug, Clone, PartialEq)]
pub struct DotEnvyConfig {
    pub server: Server,
    pub database: Database,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Server {
    pub port: u16,
    /// Request body limit in MiB.
    pub body_limit: u64,
    /// Per-request timeout in seconds.
    pub timeout: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Database {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub ssl_mode: String,
    pub pool_max_size: u32,
    /// Full connection string; takes precedence over the individual fields.
    pub url_override: Option<String>,
}

impl Database {
    /// Connection string handed to libpq. Built as a keyword/value DSN so
    /// credentials never need URL escaping.
    pub fn url(&self) -> String {
        if let Some(url) = &self.url_override {
            return url.clone();
        }

        format!(
            "host={} port={} user={} password={} dbname={} sslmode={}",
            quote_dsn_value(&self.host),
            self.port,
            quote_dsn_value(&self.user),
            quote_dsn_value(&self.password),
            quote_dsn_value(&self.name),
            quote_dsn_value(&self.ssl_mode),
        )
    }
}

/// libpq quoting: single quotes around the value, `\` and `'` backslash-escaped.
fn quote_dsn_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}
