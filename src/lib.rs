//! tracklift
//!
//! A small web server that logs a browser into Spotify with the OAuth2
//! Authorization Code flow and then uses the session's access token to search
//! tracks and add them to a fixed playlist.
//!
//! # Modules
//!
//! - `api` - HTTP endpoints (`/login`, `/callback`, `/refresh_token`, `/add`,
//!   `/single-search`, `/search`, `/health`)
//! - `config` - configuration loaded once at startup
//! - `server` - router assembly and the listening loop
//! - `spotify` - token endpoint and Web API clients, batch search
//! - `types` - tokens, sessions and API payloads
//! - `utils` - random state, cookies and encoding helpers

pub mod api;
pub mod config;
pub mod server;
pub mod spotify;
pub mod types;
pub mod utils;

/// A convenient Result type alias for startup plumbing.
///
/// Request handling uses typed errors ([`api::ApiError`],
/// [`spotify::SpotifyError`]); everything that can only fail before the
/// server is up returns this.
pub type Res<T> = std::result::Result<T, Box<dyn std::error::Error + Send + Sync>>;

/// Prints an informational message with a blue bullet point.
///
/// # Example
///
/// ```
/// info!("Listening on {}", addr);
/// ```
#[macro_export]
macro_rules! info {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "o".blue().bold(), std::format_args!($($arg)*));
  })
}

/// Prints a success message with a green checkmark.
#[macro_export]
macro_rules! success {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "✓".green().bold(), std::format_args!($($arg)*));
  })
}

/// Prints an error message with a red exclamation mark and exits the program.
///
/// Only for failures before the server is up. Request handlers report with
/// [`warning!`] and answer the request instead.
#[macro_export]
macro_rules! error {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    eprintln!("[{}] {}", "!".red().bold(), std::format_args!($($arg)*));
    std::process::exit(1);
  })
}

/// Prints a warning message with a yellow exclamation mark.
///
/// Used for every failed request so the console shows what went wrong
/// upstream while the browser only gets the structured error.
#[macro_export]
macro_rules! warning {
  ($($arg:tt)*) => ({
    use colored::Colorize;
    println!("[{}] {}", "!".yellow().bold(), std::format_args!($($arg)*));
  })
}
