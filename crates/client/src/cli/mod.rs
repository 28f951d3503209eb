//! CLI module - Command-line interface for the client.
//!
//! Provides commands for:
//! - `login` - Log in and save the session cookie
//! - `register` - Create an account
//! - `whoami` - Show the session behind the saved cookie
//! - `logout` - End the session and delete the saved cookie
//! - `search` - Build a home page search path

pub mod args;

pub use args::{Cli, Commands};
