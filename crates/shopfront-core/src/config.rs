use crate::app_config::{AppConfig, ContactMailConfig, Environment, SmtpSecurity};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if required env vars are missing or values are invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Decoupled from the real environment so tests can drive it with a `HashMap`.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    use std::net::SocketAddr;
    use std::path::PathBuf;

    let require = |var: &str| -> Result<String, ConfigError> {
        lookup(var)
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
    };

    let optional = |var: &str| -> Option<String> { lookup(var).ok().filter(|v| !v.trim().is_empty()) };

    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let parse_addr = |var: &str, default: &str| -> Result<SocketAddr, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<SocketAddr>()
            .map_err(|e| ConfigError::InvalidEnvVar {
                var: var.to_string(),
                reason: e.to_string(),
            })
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        let raw = or_default(var, default);
        raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
            var: var.to_string(),
            reason: e.to_string(),
        })
    };

    let store_domain = normalize_store_domain(&require("SHOPIFY_STORE_DOMAIN")?);
    let storefront_access_token = require("SHOPIFY_STOREFRONT_ACCESS_TOKEN")?;
    let admin_access_token = optional("SHOPIFY_ADMIN_ACCESS_TOKEN");

    let env = parse_environment(&or_default("SHOPFRONT_ENV", "development"));
    let bind_addr = parse_addr("SHOPFRONT_BIND_ADDR", "0.0.0.0:3000")?;
    let log_level = or_default("SHOPFRONT_LOG_LEVEL", "info");
    let api_version = or_default("SHOPIFY_API_VERSION", "2025-01");
    let request_timeout_secs = parse_u64("SHOPFRONT_REQUEST_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("SHOPFRONT_USER_AGENT", "shopfront/0.1 (storefront)");
    let content_dir = PathBuf::from(or_default("SHOPFRONT_CONTENT_DIR", "./content/blog"));
    let seo_path = PathBuf::from(or_default("SHOPFRONT_SEO_PATH", "./content/seo.json"));
    let site_url = or_default("SHOPFRONT_SITE_URL", "http://localhost:3000")
        .trim_end_matches('/')
        .to_string();

    let contact_mail = match (
        optional("CONTACT_SMTP_HOST"),
        optional("CONTACT_TO_ADDRESS"),
        optional("CONTACT_FROM_ADDRESS"),
    ) {
        (Some(smtp_host), Some(to_address), Some(from_address)) => {
            let security = parse_smtp_security(&or_default("CONTACT_SMTP_SECURITY", "starttls"))?;
            let smtp_port = match optional("CONTACT_SMTP_PORT") {
                Some(raw) => raw.trim().parse::<u16>().map_err(|e| ConfigError::InvalidEnvVar {
                    var: "CONTACT_SMTP_PORT".to_string(),
                    reason: e.to_string(),
                })?,
                None => security.default_port(),
            };
            Some(ContactMailConfig {
                smtp_host,
                smtp_port,
                smtp_username: optional("CONTACT_SMTP_USERNAME"),
                smtp_password: optional("CONTACT_SMTP_PASSWORD"),
                security,
                to_address,
                from_address,
            })
        }
        _ => None,
    };

    Ok(AppConfig {
        env,
        bind_addr,
        log_level,
        store_domain,
        storefront_access_token,
        admin_access_token,
        api_version,
        request_timeout_secs,
        user_agent,
        content_dir,
        seo_path,
        site_url,
        contact_mail,
    })
}

/// Parse a string into an `Environment` variant.
///
/// Unrecognized values default to `Environment::Development`.
fn parse_environment(s: &str) -> Environment {
    match s {
        "production" => Environment::Production,
        "test" => Environment::Test,
        _ => Environment::Development,
    }
}

fn parse_smtp_security(s: &str) -> Result<SmtpSecurity, ConfigError> {
    match s.trim().to_ascii_lowercase().as_str() {
        "starttls" => Ok(SmtpSecurity::StartTls),
        "tls" => Ok(SmtpSecurity::Tls),
        "none" => Ok(SmtpSecurity::Plain),
        other => Err(ConfigError::InvalidEnvVar {
            var: "CONTACT_SMTP_SECURITY".to_string(),
            reason: format!("expected starttls, tls or none, got '{other}'"),
        }),
    }
}

/// Strips any scheme and trailing slash so `https://shop.example.com/` and
/// `shop.example.com` configure the same store.
fn normalize_store_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
