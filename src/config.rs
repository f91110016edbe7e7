//! Configuration and CLI argument handling

use std::path::PathBuf;
use clap::Parser;

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "turn-timer")]
#[command(about = "A state-managed HTTP server for multiplayer board game turn timers")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// File the setup preset is remembered in
    #[arg(long, default_value = "turn-timer-preset.json")]
    pub preset: PathBuf,

    /// Keep the preset in memory only
    #[arg(long)]
    pub no_persist: bool,

    /// Do not ring the terminal bell on low time
    #[arg(short, long)]
    pub mute: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["turn-timer"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.preset, PathBuf::from("turn-timer-preset.json"));
        assert!(!config.no_persist && !config.mute);
        assert_eq!(config.log_level(), "info");
    }

    #[test]
    fn flags() {
        let config = Config::try_parse_from([
            "turn-timer", "-p", "8080", "--preset", "/tmp/p.json", "--mute", "-v",
        ])
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.preset, PathBuf::from("/tmp/p.json"));
        assert!(config.mute);
        assert_eq!(config.log_level(), "debug");
    }
}
