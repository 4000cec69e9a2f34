use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the SMTP connection is secured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SmtpSecurity {
    /// Plain connection upgraded with `STARTTLS`; port 587 by default.
    StartTls,
    /// TLS from the first byte; port 465 by default.
    Tls,
    /// No encryption. Local relays and test servers only.
    Plain,
}

impl SmtpSecurity {
    #[must_use]
    pub fn default_port(self) -> u16 {
        match self {
            SmtpSecurity::StartTls => 587,
            SmtpSecurity::Tls => 465,
            SmtpSecurity::Plain => 25,
        }
    }
}

/// SMTP settings for contact-form mail.
///
/// Only built when the host and both addresses are present; a partial
/// configuration is treated as "email not configured".
#[derive(Clone)]
pub struct ContactMailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: Option<String>,
    pub smtp_password: Option<String>,
    pub security: SmtpSecurity,
    pub to_address: String,
    pub from_address: String,
}

impl std::fmt::Debug for ContactMailConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContactMailConfig")
            .field("smtp_host", &self.smtp_host)
            .field("smtp_port", &self.smtp_port)
            .field("smtp_username", &self.smtp_username)
            .field(
                "smtp_password",
                &self.smtp_password.as_ref().map(|_| "[redacted]"),
            )
            .field("security", &self.security)
            .field("to_address", &self.to_address)
            .field("from_address", &self.from_address)
            .finish()
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Store domain without scheme, e.g. `"example.myshopify.com"`.
    pub store_domain: String,
    pub storefront_access_token: String,
    /// Admin token for discount introspection. `None` disables the discount feed.
    pub admin_access_token: Option<String>,
    pub api_version: String,
    pub request_timeout_secs: u64,
    pub user_agent: String,
    pub content_dir: PathBuf,
    pub seo_path: PathBuf,
    /// Public origin used for sitemap URLs, without a trailing slash.
    pub site_url: String,
    pub contact_mail: Option<ContactMailConfig>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("store_domain", &self.store_domain)
            .field("storefront_access_token", &"[redacted]")
            .field(
                "admin_access_token",
                &self.admin_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("api_version", &self.api_version)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("content_dir", &self.content_dir)
            .field("seo_path", &self.seo_path)
            .field("site_url", &self.site_url)
            .field("contact_mail", &self.contact_mail)
            .finish()
    }
}
