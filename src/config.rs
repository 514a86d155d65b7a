use std::{env, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceKind {
    Routes,
    Schedules,
    Tickets,
    Users,
    Auth,
}

impl ServiceKind {
    pub const ALL: [ServiceKind; 5] = [
        ServiceKind::Routes,
        ServiceKind::Schedules,
        ServiceKind::Tickets,
        ServiceKind::Users,
        ServiceKind::Auth,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceKind::Routes => "routes",
            ServiceKind::Schedules => "schedules",
            ServiceKind::Tickets => "tickets",
            ServiceKind::Users => "users",
            ServiceKind::Auth => "auth",
        }
    }
}

impl FromStr for ServiceKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "routes" => Ok(ServiceKind::Routes),
            "schedules" => Ok(ServiceKind::Schedules),
            "tickets" => Ok(ServiceKind::Tickets),
            "users" => Ok(ServiceKind::Users),
            "auth" => Ok(ServiceKind::Auth),
            other => Err(anyhow::anyhow!("unknown service '{other}'")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_ttl_hours: i64,
    pub admin_username: String,
    pub admin_password: String,
    /// When false every endpoint is reachable without a token.
    pub require_admin_auth: bool,
    /// Empty means any origin is allowed.
    pub cors_origins: Vec<String>,
    pub services: Vec<ServiceKind>,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let jwt_secret = env::var("JWT_SECRET")
            .map_err(|_| anyhow::anyhow!("JWT_SECRET is not set"))?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_ttl_hours = env::var("JWT_TTL_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let admin_username = env::var("ADMIN_USERNAME").unwrap_or_else(|_| "admin".to_string());
        let admin_password =
            env::var("ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());
        let require_admin_auth = env::var("REQUIRE_ADMIN_AUTH")
            .map(|v| parse_flag(&v))
            .unwrap_or(false);
        let cors_origins = env::var("CORS_ORIGINS")
            .map(|v| split_list(&v))
            .unwrap_or_default();
        let services = match env::var("ENABLED_SERVICES") {
            Ok(v) if !v.trim().is_empty() => parse_services(&v)?,
            _ => ServiceKind::ALL.to_vec(),
        };

        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            jwt_ttl_hours,
            admin_username,
            admin_password,
            require_admin_auth,
            cors_origins,
            services,
        })
    }

    /// Defaults used by tests and local tooling that never reads the environment.
    pub fn for_tests(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            host: "127.0.0.1".to_string(),
            port: 0,
            jwt_secret: "test-secret".to_string(),
            jwt_ttl_hours: 1,
            admin_username: "admin".to_string(),
            admin_password: "admin123".to_string(),
            require_admin_auth: false,
            cors_origins: Vec::new(),
            services: ServiceKind::ALL.to_vec(),
        }
    }
}

pub fn parse_services(value: &str) -> anyhow::Result<Vec<ServiceKind>> {
    let mut services = Vec::new();
    for item in split_list(value) {
        let kind = item.parse::<ServiceKind>()?;
        if !services.contains(&kind) {
            services.push(kind);
        }
    }
    Ok(services)
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
