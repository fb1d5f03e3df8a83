use std::time::Duration;

use vidsync_fal::api::{DEFAULT_POLL_INTERVAL, DEFAULT_QUEUE_URL};
use vidsync_fal::FalConfig;
use vidsync_speech::client::{
    DEFAULT_BASE_URL, DEFAULT_MODEL_ID, DEFAULT_VOICE_ID, DEFAULT_VOICE_PARAMETER,
};
use vidsync_speech::VoiceConfig;
use vidsync_storage::StorageConfig;

/// Variables that must be present and non-empty for the server to start.
pub const REQUIRED_VARS: [&str; 4] = [
    "SUPABASE_URL",
    "SUPABASE_KEY",
    "ELEVENLABS_API_KEY",
    "FAL_KEY",
];

/// Startup configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    Missing(Vec<&'static str>),

    #[error("{var} must be {expected}, got '{value}'")]
    Invalid {
        var: &'static str,
        value: String,
        expected: &'static str,
    },
}

/// Server configuration loaded once from environment variables and
/// immutable afterwards.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `9887`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// Credentials and settings for the external services.
    pub services: ServiceConfig,
}

/// Settings handed to the client adapters.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    pub storage: StorageConfig,
    pub fal: FalConfig,
    pub voice: VoiceConfig,
}

impl ServerConfig {
    /// Load configuration from the process environment.
    ///
    /// | Env Var                       | Default                                        |
    /// |-------------------------------|------------------------------------------------|
    /// | `HOST`                        | `0.0.0.0`                                      |
    /// | `PORT`                        | `9887`                                         |
    /// | `CORS_ORIGINS`                | `http://localhost:8080,http://127.0.0.1:8080`  |
    /// | `SOURCE_IMAGES_BUCKET`        | `user-images`                                  |
    /// | `GENERATED_AUDIO_BUCKET`      | `generated-audio`                              |
    /// | `FINAL_VIDEOS_BUCKET`         | `final-videos`                                 |
    /// | `ELEVENLABS_VOICE_ID`         | `default_voice_id`                             |
    /// | `ELEVENLABS_MODEL_ID`         | `eleven_monolingual_v1`                        |
    /// | `ELEVENLABS_STABILITY`        | `0.5`                                          |
    /// | `ELEVENLABS_SIMILARITY_BOOST` | `0.5`                                          |
    /// | `ELEVENLABS_BASE_URL`         | `https://api.elevenlabs.io`                    |
    /// | `FAL_QUEUE_URL`               | `https://queue.fal.run`                        |
    /// | `FAL_POLL_INTERVAL_MS`        | `1000`                                         |
    ///
    /// Plus the variables in [`REQUIRED_VARS`], which have no default.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary lookup function.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let or = |key: &str, default: &str| get(key).unwrap_or_else(|| default.to_string());

        let missing: Vec<&'static str> = REQUIRED_VARS
            .iter()
            .copied()
            .filter(|key| get(*key).is_none())
            .collect();
        if !missing.is_empty() {
            return Err(ConfigError::Missing(missing));
        }
        let required = |key: &str| get(key).unwrap_or_default();

        let cors_origins: Vec<String> = or(
            "CORS_ORIGINS",
            "http://localhost:8080,http://127.0.0.1:8080",
        )
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect();

        let storage = StorageConfig {
            base_url: required("SUPABASE_URL"),
            api_key: required("SUPABASE_KEY"),
            source_images_bucket: or("SOURCE_IMAGES_BUCKET", "user-images"),
            generated_audio_bucket: or("GENERATED_AUDIO_BUCKET", "generated-audio"),
            final_videos_bucket: or("FINAL_VIDEOS_BUCKET", "final-videos"),
        };

        let fal = FalConfig {
            api_key: required("FAL_KEY"),
            queue_url: or("FAL_QUEUE_URL", DEFAULT_QUEUE_URL),
            poll_interval: match get("FAL_POLL_INTERVAL_MS") {
                Some(v) => Duration::from_millis(parse("FAL_POLL_INTERVAL_MS", v, "a u64")?),
                None => DEFAULT_POLL_INTERVAL,
            },
        };

        let voice = VoiceConfig {
            api_key: required("ELEVENLABS_API_KEY"),
            base_url: or("ELEVENLABS_BASE_URL", DEFAULT_BASE_URL),
            voice_id: or("ELEVENLABS_VOICE_ID", DEFAULT_VOICE_ID),
            model_id: or("ELEVENLABS_MODEL_ID", DEFAULT_MODEL_ID),
            stability: voice_parameter("ELEVENLABS_STABILITY", get("ELEVENLABS_STABILITY"))?,
            similarity_boost: voice_parameter(
                "ELEVENLABS_SIMILARITY_BOOST",
                get("ELEVENLABS_SIMILARITY_BOOST"),
            )?,
        };

        Ok(Self {
            host: or("HOST", "0.0.0.0"),
            port: parse("PORT", or("PORT", "9887"), "a valid u16")?,
            cors_origins,
            services: ServiceConfig {
                storage,
                fal,
                voice,
            },
        })
    }
}

fn parse<T: std::str::FromStr>(
    var: &'static str,
    value: String,
    expected: &'static str,
) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::Invalid {
        var,
        value,
        expected,
    })
}

/// Voice-quality parameters are fractions in `[0, 1]`.
fn voice_parameter(var: &'static str, value: Option<String>) -> Result<f32, ConfigError> {
    let Some(value) = value else {
        return Ok(DEFAULT_VOICE_PARAMETER);
    };
    let expected = "a number between 0 and 1";
    let parsed: f32 = parse(var, value.clone(), expected)?;
    if (0.0..=1.0).contains(&parsed) {
        Ok(parsed)
    } else {
        Err(ConfigError::Invalid {
            var,
            value,
            expected,
        })
    }
}
