//! Session cookie settings read from the environment.
//!
//! Debug builds tolerate missing or malformed toggles, warning and falling
//! back to safe defaults. Release builds require every toggle to be present
//! and valid, and refuse ephemeral or short signing keys.

use std::path::PathBuf;

use actix_web::cookie::{Key, SameSite};
use mockable::Env;
use tracing::warn;
use zeroize::Zeroize;

const SESSION_KEY_DEFAULT_PATH: &str = "/var/run/secrets/session_key";
const SESSION_KEY_MIN_LEN: usize = 64;
const COOKIE_SECURE_ENV: &str = "SESSION_COOKIE_SECURE";
const SAMESITE_ENV: &str = "SESSION_SAMESITE";
const ALLOW_EPHEMERAL_ENV: &str = "SESSION_ALLOW_EPHEMERAL";
const KEY_FILE_ENV: &str = "SESSION_KEY_FILE";
const BOOL_EXPECTED: &str = "1|0|true|false|yes|no|y|n";
const SAMESITE_EXPECTED: &str = "Strict|Lax|None";

/// Build mode for session configuration validation.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BuildMode {
    /// Defaults with warnings.
    Debug,
    /// Explicit, valid toggles only.
    Release,
}

impl BuildMode {
    /// Determine the build mode from `cfg!(debug_assertions)`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use exam_registry::inbound::http::session_config::BuildMode;
    ///
    /// let mode = BuildMode::from_debug_assertions();
    /// assert_eq!(mode == BuildMode::Debug, cfg!(debug_assertions));
    /// ```
    #[must_use]
    pub fn from_debug_assertions() -> Self {
        if cfg!(debug_assertions) {
            Self::Debug
        } else {
            Self::Release
        }
    }
}

/// Validated cookie session settings.
pub struct SessionSettings {
    pub key: Key,
    pub cookie_secure: bool,
    pub same_site: SameSite,
}

/// Errors raised while validating session configuration.
#[derive(thiserror::Error, Debug)]
pub enum SessionConfigError {
    #[error("missing required environment variable: {name}")]
    MissingEnv { name: &'static str },
    #[error("invalid value for {name}='{value}'; expected {expected}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        expected: &'static str,
    },
    #[error("failed to read session key at {path}: {source}")]
    KeyRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("session key at {path} too short: need >= {min_len} bytes, got {length}")]
    KeyTooShort {
        path: PathBuf,
        length: usize,
        min_len: usize,
    },
    #[error("SESSION_SAMESITE=None requires SESSION_COOKIE_SECURE=1")]
    InsecureSameSiteNone,
    #[error("SESSION_ALLOW_EPHEMERAL must be 0 in release builds")]
    EphemeralNotAllowed,
}

/// Environment reader applying the leniency of one build mode.
struct Toggles<'a, E> {
    env: &'a E,
    mode: BuildMode,
}

impl<E: Env> Toggles<'_, E> {
    fn lenient(&self) -> bool {
        self.mode == BuildMode::Debug
    }

    /// Parse `name` with `parse`, substituting `fallback` in debug builds
    /// when the variable is missing or malformed.
    fn read<T: Copy>(
        &self,
        name: &'static str,
        expected: &'static str,
        fallback: T,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Result<T, SessionConfigError> {
        let Some(value) = self.env.string(name) else {
            if self.lenient() {
                warn!(variable = name, "session toggle not set; using default");
                return Ok(fallback);
            }
            return Err(SessionConfigError::MissingEnv { name });
        };
        match parse(&value) {
            Some(parsed) => Ok(parsed),
            None if self.lenient() => {
                warn!(variable = name, %value, "invalid session toggle; using default");
                Ok(fallback)
            }
            None => Err(SessionConfigError::InvalidEnv {
                name,
                value,
                expected,
            }),
        }
    }

    fn flag(&self, name: &'static str, fallback: bool) -> Result<bool, SessionConfigError> {
        self.read(name, BOOL_EXPECTED, fallback, parse_bool)
    }
}

/// Build session settings from environment variables and build mode.
///
/// # Examples
///
/// ```rust
/// use exam_registry::inbound::http::session_config::{BuildMode, session_settings_from_env};
/// use mockable::MockEnv;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let key_path = std::env::temp_dir().join("exam_registry_session_key_example");
/// std::fs::write(&key_path, vec![b'a'; 64])?;
///
/// let key_path = key_path.to_str().expect("valid path").to_owned();
/// let mut env = MockEnv::new();
/// env.expect_string().returning(move |name| match name {
///     "SESSION_KEY_FILE" => Some(key_path.clone()),
///     "SESSION_COOKIE_SECURE" => Some("1".to_owned()),
///     "SESSION_SAMESITE" => Some("Strict".to_owned()),
///     "SESSION_ALLOW_EPHEMERAL" => Some("0".to_owned()),
///     _ => None,
/// });
///
/// let settings = session_settings_from_env(&env, BuildMode::Release)?;
/// assert!(settings.cookie_secure);
/// # Ok(())
/// # }
/// ```
pub fn session_settings_from_env<E: Env>(
    env: &E,
    mode: BuildMode,
) -> Result<SessionSettings, SessionConfigError> {
    let toggles = Toggles { env, mode };
    let cookie_secure = toggles.flag(COOKIE_SECURE_ENV, true)?;
    let same_site = toggles.read(
        SAMESITE_ENV,
        SAMESITE_EXPECTED,
        SameSite::Lax,
        parse_same_site,
    )?;
    if same_site == SameSite::None && !cookie_secure {
        if !toggles.lenient() {
            return Err(SessionConfigError::InsecureSameSiteNone);
        }
        warn!("SESSION_SAMESITE=None without a secure cookie; browsers may reject it");
    }
    let allow_ephemeral = toggles.flag(ALLOW_EPHEMERAL_ENV, false)?;
    if allow_ephemeral && !toggles.lenient() {
        return Err(SessionConfigError::EphemeralNotAllowed);
    }
    let key = session_key(&toggles, allow_ephemeral)?;

    Ok(SessionSettings {
        key,
        cookie_secure,
        same_site,
    })
}

fn session_key<E: Env>(
    toggles: &Toggles<'_, E>,
    allow_ephemeral: bool,
) -> Result<Key, SessionConfigError> {
    let path = PathBuf::from(
        toggles
            .env
            .string(KEY_FILE_ENV)
            .unwrap_or_else(|| SESSION_KEY_DEFAULT_PATH.to_owned()),
    );

    let mut bytes = match std::fs::read(&path) {
        Ok(bytes) => bytes,
        Err(error) if toggles.lenient() || allow_ephemeral => {
            warn!(path = %path.display(), %error, "using temporary session key (dev only)");
            return Ok(Key::generate());
        }
        Err(source) => return Err(SessionConfigError::KeyRead { path, source }),
    };

    let length = bytes.len();
    let result = if length >= SESSION_KEY_MIN_LEN {
        Ok(Key::derive_from(&bytes))
    } else if toggles.lenient() {
        warn!(path = %path.display(), length, "session key too short; using temporary key");
        Ok(Key::generate())
    } else {
        Err(SessionConfigError::KeyTooShort {
            path,
            length,
            min_len: SESSION_KEY_MIN_LEN,
        })
    };
    bytes.zeroize();
    result
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "y" => Some(true),
        "0" | "false" | "no" | "n" => Some(false),
        _ => None,
    }
}

fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.to_ascii_lowercase().as_str() {
        "lax" => Some(SameSite::Lax),
        "strict" => Some(SameSite::Strict),
        "none" => Some(SameSite::None),
        _ => None,
    }
}
