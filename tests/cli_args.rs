//! Integration tests for CLI argument handling
//!
//! Tests the word argument and the --book/--user flags from the command
//! line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_wordbook"))
        .args(args)
        .output()
        .expect("Failed to execute wordbook")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wordbook"), "Help should mention wordbook");
    assert!(stdout.contains("book"), "Help should mention --book flag");
    assert!(stdout.contains("user"), "Help should mention --user flag");
}

#[test]
fn test_version_flag_exits_successfully() {
    let output = run_cli(&["--version"]);
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("wordbook"));
}

#[test]
fn test_book_with_word_prints_error_and_exits() {
    let output = run_cli(&["hello", "--book"]);
    assert!(
        !output.status.success(),
        "Expected --book with a word to fail"
    );
    let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
    assert!(
        stderr.contains("book"),
        "Should print error message about --book: {}",
        stderr
    );
}

#[test]
fn test_unknown_flag_is_rejected() {
    let output = run_cli(&["--no-such-flag"]);
    assert!(!output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use wordbook::cli::{Cli, CliError, StartupConfig};

    #[test]
    fn test_cli_no_args_defaults() {
        let cli = Cli::parse_from(["wordbook"]);
        assert!(cli.word.is_none());
        assert!(!cli.book);
        assert_eq!(cli.user, "default");
    }

    #[test]
    fn test_cli_word_argument() {
        let cli = Cli::parse_from(["wordbook", "petrichor"]);
        assert_eq!(cli.word.as_deref(), Some("petrichor"));
    }

    #[test]
    fn test_cli_book_and_user_flags() {
        let cli = Cli::parse_from(["wordbook", "--book", "--user", "alice"]);
        assert!(cli.book);
        assert_eq!(cli.user, "alice");
    }

    #[test]
    fn test_startup_config_carries_word_and_user() {
        let cli = Cli::parse_from(["wordbook", "petrichor", "--user", "alice"]);
        let config = StartupConfig::from_cli(&cli).unwrap();
        assert_eq!(config.initial_word.as_deref(), Some("petrichor"));
        assert_eq!(config.user, "alice");
        assert!(!config.start_in_wordbook);
    }

    #[test]
    fn test_startup_config_rejects_book_with_word() {
        let cli = Cli::parse_from(["wordbook", "petrichor", "--book"]);
        let result = StartupConfig::from_cli(&cli);
        assert!(matches!(result, Err(CliError::BookWithWord)));
    }
}
