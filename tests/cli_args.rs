//! Integration tests for CLI argument handling
//!
//! Tests the --debug/--timeout flags and their validation from the command line.

use std::process::Command;

/// Helper to run the CLI with given args and capture output
fn run_cli(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_swapi-console"))
        .args(args)
        .output()
        .expect("Failed to execute swapi-console")
}

#[test]
fn test_help_flag_exits_successfully() {
    let output = run_cli(&["--help"]);
    assert!(
        output.status.success(),
        "Expected --help to exit successfully"
    );
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("swapi-console"), "Help should mention swapi-console");
    assert!(stdout.contains("--timeout"), "Help should mention --timeout flag");
    assert!(stdout.contains("--debug"), "Help should mention --debug flag");
}

#[test]
fn test_zero_timeout_prints_error_and_exits() {
    let output = run_cli(&["--timeout", "0"]);
    assert!(!output.status.success(), "Expected zero timeout to fail");
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Invalid timeout"),
        "Should print error message about the timeout: {}",
        stderr
    );
}

#[test]
fn test_non_numeric_timeout_is_rejected() {
    let output = run_cli(&["--timeout", "soon"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("invalid value"), "clap should reject: {}", stderr);
}

#[test]
fn test_bad_base_url_is_rejected() {
    let output = run_cli(&["--base-url", "swapi.dev/api"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid base URL"), "{}", stderr);
}

#[test]
fn test_debug_with_help_is_valid() {
    let output = run_cli(&["--debug", "--timeout", "250", "--help"]);
    assert!(output.status.success());
}

#[cfg(test)]
mod unit_tests {
    //! Unit tests for CLI parsing that don't require running the binary

    use clap::Parser;
    use swapi_console::cli::{Cli, CliError, Config, DEFAULT_TIMEOUT_MS};

    #[test]
    fn test_cli_no_args_is_quiet_with_default_timeout() {
        let cli = Cli::parse_from(["swapi-console"]);
        assert!(!cli.debug);
        assert_eq!(cli.timeout, DEFAULT_TIMEOUT_MS);
    }

    #[test]
    fn test_cli_debug_flag() {
        let cli = Cli::parse_from(["swapi-console", "--debug"]);
        let config = Config::from_cli(&cli).unwrap();
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_timeout_value() {
        let cli = Cli::parse_from(["swapi-console", "-t", "750"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.timeout_ms, 750);
    }

    #[test]
    fn test_cli_port_and_bind() {
        let cli = Cli::parse_from(["swapi-console", "--port", "8081", "--bind", "0.0.0.0"]);
        let config = Config::from_cli(&cli).unwrap();
        assert_eq!(config.listen.to_string(), "0.0.0.0:8081");
    }

    #[test]
    fn test_cli_zero_timeout_is_error() {
        let cli = Cli::parse_from(["swapi-console", "--timeout", "0"]);
        assert!(matches!(
            Config::from_cli(&cli),
            Err(CliError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn test_cli_rejects_unknown_flag() {
        assert!(Cli::try_parse_from(["swapi-console", "--plan"]).is_err());
    }
}
