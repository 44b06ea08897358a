//! Command-line argument definitions using clap.

use clap::Parser;
use std::path::PathBuf;

use crate::config::Config;

/// Album backup CLI.
#[derive(Parser, Debug)]
#[command(
    name = "album-backup",
    version,
    about = "Back up remote photo albums to local storage",
    long_about = "A CLI tool to mirror a page of remote photo albums to local storage.\n\n\
                  Every item's Original rendition is downloaded into one directory per album."
)]
pub struct Args {
    /// Page number of albums to back up.
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Number of albums per run.
    #[arg(short = 'n', long = "albums")]
    pub albums_per_run: Option<u32>,

    /// Backup root directory.
    #[arg(short = 'd', long = "directory")]
    pub backup_directory: Option<PathBuf>,

    /// Application API key.
    #[arg(long = "api-key", env = "ALBUM_BACKUP_API_KEY")]
    pub api_key: Option<String>,

    /// Access token.
    #[arg(short, long, env = "ALBUM_BACKUP_TOKEN")]
    pub token: Option<String>,

    /// Access token secret.
    #[arg(long = "token-secret", env = "ALBUM_BACKUP_TOKEN_SECRET")]
    pub token_secret: Option<String>,

    /// Maximum number of concurrent downloads.
    #[arg(short = 'j', long = "concurrency")]
    pub concurrency: Option<usize>,

    /// Download attempts per item.
    #[arg(long)]
    pub max_attempts: Option<u32>,

    /// Milliseconds to wait between download attempts.
    #[arg(long)]
    pub retry_delay_ms: Option<u64>,

    /// Cancel remaining downloads after this many seconds.
    #[arg(long = "deadline")]
    pub deadline_secs: Option<u64>,

    /// Path to configuration file.
    #[arg(short, long, default_value = "config.toml")]
    pub config: PathBuf,

    /// Write the merged configuration (including CLI-supplied tokens) back to the config file.
    #[arg(long)]
    pub save_config: bool,

    /// Exit non-zero when the run fails before downloading.
    #[arg(long)]
    pub strict_exit: bool,

    /// Hide per-item progress lines.
    #[arg(long, short)]
    pub quiet: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        // Account settings
        if let Some(api_key) = self.api_key {
            config.account.api_key = api_key;
        }

        if let Some(token) = self.token {
            config.account.token = token;
        }

        if let Some(token_secret) = self.token_secret {
            config.account.token_secret = token_secret;
        }

        // Options
        if let Some(page) = self.page {
            config.options.page = page;
        }

        if let Some(albums) = self.albums_per_run {
            config.options.albums_per_run = albums;
        }

        if let Some(dir) = self.backup_directory {
            config.options.backup_directory = Some(dir);
        }

        if let Some(concurrency) = self.concurrency {
            config.options.max_concurrent_downloads = concurrency;
        }

        if let Some(attempts) = self.max_attempts {
            config.options.max_attempts = attempts;
        }

        if let Some(delay) = self.retry_delay_ms {
            config.options.retry_delay_ms = delay;
        }

        if let Some(deadline) = self.deadline_secs {
            config.options.run_deadline_secs = Some(deadline);
        }

        if self.quiet {
            config.options.show_progress = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["album-backup"]).unwrap();
        let mut config = Config::default();
        args.merge_into_config(&mut config);

        assert_eq!(config.options.page, 1);
        assert_eq!(config.options.albums_per_run, 10);
        assert!(config.options.show_progress);
    }

    #[test]
    fn test_flags_override_config() {
        let args = Args::try_parse_from([
            "album-backup",
            "--page",
            "3",
            "--albums",
            "25",
            "-j",
            "4",
            "--deadline",
            "600",
            "--quiet",
        ])
        .unwrap();
        let mut config = Config::default();
        config.options.page = 2;
        args.merge_into_config(&mut config);

        assert_eq!(config.options.page, 3);
        assert_eq!(config.options.albums_per_run, 25);
        assert_eq!(config.options.max_concurrent_downloads, 4);
        assert_eq!(config.options.run_deadline_secs, Some(600));
        assert!(!config.options.show_progress);
    }

    #[test]
    fn test_exit_and_save_flags_default_off() {
        let args = Args::try_parse_from(["album-backup"]).unwrap();
        assert!(!args.save_config);
        assert!(!args.strict_exit);

        let args = Args::try_parse_from(["album-backup", "--save-config", "--strict-exit"]).unwrap();
        assert!(args.save_config);
        assert!(args.strict_exit);
    }

    #[test]
    fn test_saved_config_keeps_cli_tokens() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let args = Args::try_parse_from([
            "album-backup",
            "--api-key",
            "k-123",
            "--token",
            "t-456",
            "--token-secret",
            "s-789",
            "--save-config",
        ])
        .unwrap();

        let mut config = Config::default();
        args.merge_into_config(&mut config);
        config.save(&path).unwrap();

        let reloaded = Config::load(&path).unwrap();
        assert_eq!(reloaded.account.api_key, "k-123");
        assert_eq!(reloaded.account.token, "t-456");
        assert_eq!(reloaded.account.token_secret, "s-789");
    }
}
