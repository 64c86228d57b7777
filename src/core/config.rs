use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub app: AppConfig,
    pub database: DatabaseConfig,
    pub generation: GenerationConfig,
    pub prompts: PromptConfig,
    pub swagger: SwaggerConfig,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub cors_allowed_origins: Vec<String>,
    pub max_request_body_size: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub acquire_timeout_secs: u64,
    pub idle_timeout_secs: u64,
    pub max_lifetime_secs: u64,
}

/// Credentials and model selection for the Gemini text-generation API
#[derive(Clone)]
pub struct GenerationConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
}

/// Location of prompt template overrides
#[derive(Debug, Clone)]
pub struct PromptConfig {
    pub template_dir: String,
}

#[derive(Debug, Clone)]
pub struct SwaggerConfig {
    pub username: Option<String>,
    pub password: Option<String>,
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        // .env is optional; a missing file is not an error
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                eprintln!("Warning: Error loading .env file: {}", e);
            }
        }

        Ok(Config {
            app: AppConfig::from_env()?,
            database: DatabaseConfig::from_env()?,
            generation: GenerationConfig::from_env()?,
            prompts: PromptConfig::from_env(),
            swagger: SwaggerConfig::from_env(),
        })
    }
}

/// Read an optional variable and parse it, falling back to `default` when unset
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> Result<T, String> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|_| format!("{} must be a valid number", name)),
        Err(_) => Ok(default),
    }
}

impl AppConfig {
    const DEFAULT_MAX_REQUEST_BODY_SIZE: usize = 50 * 1024 * 1024; // combined size of the uploaded PDFs

    pub fn from_env() -> Result<Self, String> {
        let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = parse_var("PORT", 3000u16)?;

        let cors_allowed_origins = parse_origins(
            &env::var("CORS_ALLOWED_ORIGINS").unwrap_or_else(|_| "*".to_string()),
        );

        let max_request_body_size =
            parse_var("MAX_REQUEST_BODY_SIZE", Self::DEFAULT_MAX_REQUEST_BODY_SIZE)?;

        Ok(Self {
            host,
            port,
            cors_allowed_origins,
            max_request_body_size,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Split a comma-separated origin list, dropping blanks
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

impl DatabaseConfig {
    const DEFAULT_MAX_CONNECTIONS: u32 = 10;
    const DEFAULT_MIN_CONNECTIONS: u32 = 1;
    const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 5;
    const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 600; // 10 minutes
    const DEFAULT_MAX_LIFETIME_SECS: u64 = 1800; // 30 minutes

    pub fn from_env() -> Result<Self, String> {
        let url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set".to_string())?;

        Ok(Self {
            url,
            max_connections: parse_var("DB_MAX_CONNECTIONS", Self::DEFAULT_MAX_CONNECTIONS)?,
            min_connections: parse_var("DB_MIN_CONNECTIONS", Self::DEFAULT_MIN_CONNECTIONS)?,
            acquire_timeout_secs: parse_var(
                "DB_ACQUIRE_TIMEOUT_SECS",
                Self::DEFAULT_ACQUIRE_TIMEOUT_SECS,
            )?,
            idle_timeout_secs: parse_var("DB_IDLE_TIMEOUT_SECS", Self::DEFAULT_IDLE_TIMEOUT_SECS)?,
            max_lifetime_secs: parse_var("DB_MAX_LIFETIME_SECS", Self::DEFAULT_MAX_LIFETIME_SECS)?,
        })
    }
}

impl GenerationConfig {
    pub const DEFAULT_MODEL: &'static str = "gemini-1.5-flash";
    pub const DEFAULT_BASE_URL: &'static str = "https://generativelanguage.googleapis.com";

    pub fn from_env() -> Result<Self, String> {
        let api_key = env::var("GEMINI_API_KEY")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .ok_or_else(|| "GEMINI_API_KEY environment variable is required".to_string())?;

        let model = env::var("GEMINI_MODEL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_MODEL.to_string());

        let base_url = env::var("GEMINI_BASE_URL")
            .ok()
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| Self::DEFAULT_BASE_URL.to_string());

        Ok(Self {
            api_key,
            model,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

// The API key never reaches the logs
impl std::fmt::Debug for GenerationConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenerationConfig")
            .field("api_key", &"***")
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .finish()
    }
}

impl PromptConfig {
    pub const DEFAULT_TEMPLATE_DIR: &'static str = "templates/prompts";

    pub fn from_env() -> Self {
        Self {
            template_dir: env::var("PROMPT_TEMPLATE_DIR")
                .unwrap_or_else(|_| Self::DEFAULT_TEMPLATE_DIR.to_string()),
        }
    }
}

impl SwaggerConfig {
    pub fn from_env() -> Self {
        // Only use credentials if they are non-empty
        let username = env::var("SWAGGER_USERNAME").ok().filter(|s| !s.is_empty());
        let password = env::var("SWAGGER_PASSWORD").ok().filter(|s| !s.is_empty());
        let title =
            env::var("SWAGGER_TITLE").unwrap_or_else(|_| "AI Equity Research API".to_string());
        let version = env::var("SWAGGER_VERSION").unwrap_or_else(|_| "0.1.0".to_string());
        let description = env::var("SWAGGER_DESCRIPTION").unwrap_or_else(|_| {
            "Upload quarterly documents and read AI-generated equity research reports".to_string()
        });

        Self {
            username,
            password,
            title,
            version,
            description,
        }
    }

    /// Returns credentials in "username:password" format if auth is enabled
    pub fn credentials(&self) -> Option<String> {
        match (&self.username, &self.password) {
            (Some(user), Some(pass)) => Some(format!("{}:{}", user, pass)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swagger(username: Option<&str>, password: Option<&str>) -> SwaggerConfig {
        SwaggerConfig {
            username: username.map(str::to_string),
            password: password.map(str::to_string),
            title: "t".to_string(),
            version: "v".to_string(),
            description: "d".to_string(),
        }
    }

    #[test]
    fn test_swagger_credentials_require_both_parts() {
        assert_eq!(
            swagger(Some("admin"), Some("secret")).credentials(),
            Some("admin:secret".to_string())
        );
        assert_eq!(swagger(Some("admin"), None).credentials(), None);
        assert_eq!(swagger(None, Some("secret")).credentials(), None);
    }

    #[test]
    fn test_parse_origins_trims_and_drops_blanks() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert_eq!(parse_origins("*"), vec!["*".to_string()]);
    }

    #[test]
    fn test_server_address() {
        let app = AppConfig {
            host: "0.0.0.0".to_string(),
            port: 8080,
            cors_allowed_origins: vec![],
            max_request_body_size: 1,
        };
        assert_eq!(app.server_address(), "0.0.0.0:8080");
    }

    #[test]
    fn test_generation_config_debug_hides_api_key() {
        let config = GenerationConfig {
            api_key: "very-secret".to_string(),
            model: GenerationConfig::DEFAULT_MODEL.to_string(),
            base_url: GenerationConfig::DEFAULT_BASE_URL.to_string(),
        };
        let rendered = format!("{:?}", config);
        assert!(!rendered.contains("very-secret"));
        assert!(rendered.contains("gemini-1.5-flash"));
    }
}
