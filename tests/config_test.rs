use std::{env, time::Duration};

use tracklift::config::*;

const VARS: [&str; 5] = [
    "SPOTIFY_API_AUTH_CLIENT_ID",
    "SPOTIFY_API_AUTH_CLIENT_SECRET",
    "SPOTIFY_API_REDIRECT_URI",
    "SERVER_ADDRESS",
    "REQUEST_TIMEOUT_SECS",
];

// Single test: the environment is process wide.
#[test]
fn test_config_from_env() {
    unsafe {
        for var in VARS {
            env::remove_var(var);
        }
    }

    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::Missing("SPOTIFY_API_AUTH_CLIENT_ID"))
    ));

    unsafe {
        env::set_var("SPOTIFY_API_AUTH_CLIENT_ID", "id");
        env::set_var("SPOTIFY_API_AUTH_CLIENT_SECRET", "secret");
        env::set_var("SPOTIFY_API_REDIRECT_URI", "http://localhost:8888/callback");
    }

    let config = Config::from_env().unwrap();
    assert_eq!(config.client_id, "id");
    assert_eq!(config.client_secret, "secret");
    assert_eq!(config.scope, DEFAULT_SCOPE);
    assert_eq!(config.playlist_id, DEFAULT_PLAYLIST_ID);
    assert_eq!(config.server_addr.port(), 8888);
    assert_eq!(config.request_timeout, Duration::from_secs(10));

    unsafe {
        env::set_var("SERVER_ADDRESS", "127.0.0.1:9999");
        env::set_var("REQUEST_TIMEOUT_SECS", "3");
    }
    let config = Config::from_env().unwrap();
    assert_eq!(config.server_addr.to_string(), "127.0.0.1:9999");
    assert_eq!(config.request_timeout, Duration::from_secs(3));

    unsafe {
        env::set_var("REQUEST_TIMEOUT_SECS", "0");
    }
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::Invalid { name: "REQUEST_TIMEOUT_SECS", .. })
    ));

    unsafe {
        env::set_var("REQUEST_TIMEOUT_SECS", "3");
        env::set_var("SERVER_ADDRESS", "not an address");
    }
    assert!(matches!(
        Config::from_env(),
        Err(ConfigError::Invalid { name: "SERVER_ADDRESS", .. })
    ));
}

#[test]
fn test_config_new_defaults() {
    let config = Config::new("id", "secret", "http://localhost/callback");

    assert_eq!(config.auth_url, DEFAULT_AUTH_URL);
    assert_eq!(config.token_url, DEFAULT_TOKEN_URL);
    assert_eq!(config.api_url, DEFAULT_API_URL);
    assert_eq!(config.public_dir.to_str(), Some(DEFAULT_PUBLIC_DIR));
}
