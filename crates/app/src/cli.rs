//! Command-line arguments.

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use guesthouse_domain::resources::BookingStatus;

/// Guest House Booking client
#[derive(Parser, Debug)]
#[command(name = "guesthouse")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long)]
    pub debug: bool,

    /// Configuration file (TOML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override the API base URL
    #[arg(long, value_name = "URL")]
    pub api_url: Option<String>,

    /// Override the session storage file
    #[arg(long, value_name = "PATH")]
    pub storage: Option<PathBuf>,

    /// Keep the session in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "storage")]
    pub no_persist: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,
        /// Password (also: GUESTHOUSE_PASSWORD)
        #[arg(long, env = "GUESTHOUSE_PASSWORD", hide_env_values = true)]
        password: String,
        /// Path to continue to after login
        #[arg(long, value_name = "PATH")]
        return_to: Option<String>,
    },

    /// Create an account and log into it
    Register {
        #[arg(long)]
        username: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "GUESTHOUSE_PASSWORD", hide_env_values = true)]
        password: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Log out and forget the stored session
    Logout,

    /// Show the current session
    Whoami,

    /// Navigate to a client path and show what the guard decides
    Open {
        /// Path, e.g. `/admin/bookings`
        path: String,
    },

    /// Request a password-reset email
    ForgotPassword {
        #[arg(long)]
        email: String,
    },

    /// Set a new password with an emailed reset token
    ResetPassword {
        #[arg(long)]
        token: String,
        #[arg(long, env = "GUESTHOUSE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
    },

    /// List guest houses
    GuestHouses {
        /// Only those with free beds
        #[arg(long)]
        available: bool,
    },

    /// List your bookings
    MyBookings {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },

    /// Admin dashboard figures
    Stats {
        /// Report start (YYYY-MM-DD); requires --to
        #[arg(long, requires = "to")]
        from: Option<NaiveDate>,
        /// Report end (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<NaiveDate>,
    },
}

/// Booking status filter.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusArg {
    Pending,
    Confirmed,
    Canceled,
    Completed,
    Denied,
}

impl From<StatusArg> for BookingStatus {
    fn from(status: StatusArg) -> Self {
        match status {
            StatusArg::Pending => Self::Pending,
            StatusArg::Confirmed => Self::Confirmed,
            StatusArg::Canceled => Self::Canceled,
            StatusArg::Completed => Self::Completed,
            StatusArg::Denied => Self::Denied,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_open() {
        let cli = Cli::try_parse_from(["guesthouse", "open", "/admin/rooms"]).unwrap();
        match cli.command {
            Command::Open { path } => assert_eq!(path, "/admin/rooms"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_stats_range_needs_both_ends() {
        assert!(Cli::try_parse_from(["guesthouse", "stats", "--from", "2026-01-01"]).is_err());
        assert!(
            Cli::try_parse_from([
                "guesthouse",
                "stats",
                "--from",
                "2026-01-01",
                "--to",
                "2026-01-31"
            ])
            .is_ok()
        );
    }

    #[test]
    fn test_no_persist_conflicts_with_storage() {
        let cli = Cli::try_parse_from(["guesthouse", "--no-persist", "whoami"]).unwrap();
        assert!(cli.no_persist);
        assert!(
            Cli::try_parse_from([
                "guesthouse",
                "--no-persist",
                "--storage",
                "/tmp/s.json",
                "whoami"
            ])
            .is_err()
        );
    }
}
