use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Secret used to sign login tokens. Generated fresh at startup when
    /// unset, which invalidates outstanding tokens on restart.
    pub const SIGNING_KEY: &str = "NOTEWELL_SIGNING_KEY";
    /// Login token lifetime in seconds.
    pub const TOKEN_TTL_SECS: &str = "NOTEWELL_TOKEN_TTL_SECS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 8080;
    pub const DATABASE_URL: &str = "./.db/notewell.db";
    pub const TOKEN_TTL_SECS: i64 = 60;
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub database_url: String,
    /// Key material for the token signer. Owned here so nothing reads the
    /// environment after startup.
    pub signing_key: String,
    pub signing_key_from_env: bool,
    pub token_ttl_secs: i64,
}

impl Config {
    pub fn from_env() -> Self {
        let (signing_key, signing_key_from_env) = match env::var(env_vars::SIGNING_KEY) {
            Ok(key) if !key.trim().is_empty() => (key, true),
            _ => {
                log::info!(
                    "No {} set, generating one; login tokens will not survive a restart",
                    env_vars::SIGNING_KEY
                );
                (generate_signing_key(), false)
            }
        };

        Self {
            port: env::var(env_vars::PORT)
                .unwrap_or_else(|_| defaults::PORT.to_string())
                .parse()
                .expect("PORT must be a valid number"),
            database_url: env::var(env_vars::DATABASE_URL)
                .unwrap_or_else(|_| defaults::DATABASE_URL.to_string()),
            signing_key,
            signing_key_from_env,
            token_ttl_secs: env::var(env_vars::TOKEN_TTL_SECS)
                .unwrap_or_else(|_| defaults::TOKEN_TTL_SECS.to_string())
                .parse()
                .expect("NOTEWELL_TOKEN_TTL_SECS must be a valid number"),
        }
    }
}

/// 32 random bytes, hex-encoded
fn generate_signing_key() -> String {
    let mut buf = [0u8; 32];
    rand::RngCore::fill_bytes(&mut rand::thread_rng(), &mut buf);
    hex::encode(buf)
}
