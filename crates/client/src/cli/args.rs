//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use domain::USER_TYPE_CLIENT;

/// Where the session cookie is kept between runs by default
pub const DEFAULT_SESSION_FILE: &str = ".conferencehub-session";

/// ConferenceHub command-line client
#[derive(Parser, Debug)]
#[command(name = "conferencehub")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// API base URL (overrides API_BASE_URL)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// File the session cookie is saved to between runs
    #[arg(
        long,
        global = true,
        env = "CONFERENCEHUB_SESSION_FILE",
        default_value = DEFAULT_SESSION_FILE
    )]
    pub session_file: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log in with email and password
    Login(LoginArgs),

    /// Create a new account
    Register(RegisterArgs),

    /// Show the current session
    Whoami,

    /// End the current session
    Logout,

    /// Build a search path for the home page
    Search(SearchArgs),
}

/// Arguments for the login command
#[derive(Args, Debug)]
pub struct LoginArgs {
    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "", env = "CONFERENCEHUB_PASSWORD", hide_env_values = true)]
    pub password: String,
}

/// Arguments for the register command
#[derive(Args, Debug)]
pub struct RegisterArgs {
    #[arg(long, default_value = "")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub email: String,

    #[arg(long, default_value = "", env = "CONFERENCEHUB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Account type: client or host
    #[arg(long, default_value = USER_TYPE_CLIENT)]
    pub user_type: String,
}

/// Arguments for the search command
#[derive(Args, Debug)]
pub struct SearchArgs {
    #[arg(long, default_value = "")]
    pub location: String,

    /// Check-in date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub check_in: String,

    /// Check-out date (YYYY-MM-DD)
    #[arg(long, default_value = "")]
    pub check_out: String,

    #[arg(long, default_value = "")]
    pub guests: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    use domain::UserType;

    #[test]
    fn test_register_defaults_to_client() {
        let cli = Cli::try_parse_from([
            "conferencehub",
            "register",
            "--name",
            "Jane",
            "--email",
            "jane@example.com",
            "--password",
            "secret1",
        ])
        .unwrap();

        match cli.command {
            Commands::Register(args) => {
                assert_eq!(args.user_type.parse::<UserType>(), Ok(UserType::Client));
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "conferencehub",
            "whoami",
            "--verbose",
            "--api-url",
            "http://127.0.0.1:4000",
        ])
        .unwrap();

        assert!(cli.verbose);
        assert_eq!(cli.api_url.as_deref(), Some("http://127.0.0.1:4000"));
    }

    #[test]
    fn test_unknown_user_type_reaches_domain_parser() {
        let cli = Cli::try_parse_from(["conferencehub", "register", "--user-type", "admin"]).unwrap();

        match cli.command {
            Commands::Register(args) => assert!(args.user_type.parse::<UserType>().is_err()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_session_file_default_and_override() {
        let cli = Cli::try_parse_from(["conferencehub", "logout"]).unwrap();
        assert!(matches!(cli.command, Commands::Logout));
        if std::env::var_os("CONFERENCEHUB_SESSION_FILE").is_none() {
            assert_eq!(cli.session_file, PathBuf::from(DEFAULT_SESSION_FILE));
        }

        let cli = Cli::try_parse_from([
            "conferencehub",
            "whoami",
            "--session-file",
            "/tmp/hub-session",
        ])
        .unwrap();
        assert_eq!(cli.session_file, PathBuf::from("/tmp/hub-session"));
    }
}
