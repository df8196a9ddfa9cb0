use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use healthconnect::api::{HttpSignupClient, SignupApi};
use healthconnect::app::App;
use healthconnect::config::Config;
use healthconnect::logging;
use healthconnect::signup::{validate, PasswordStrength, Role, SignupDraft};

/// Exit code when the submitted fields fail validation
const EXIT_INVALID_FIELDS: i32 = 2;

#[derive(Parser)]
#[command(name = "healthconnect")]
#[command(about = "HealthConnect account signup wizard")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Config file path
    #[arg(short, long)]
    config: Option<String>,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Score a password the way the wizard's meter does
    Strength {
        /// Password to score
        password: String,
    },

    /// Validate and submit a registration without the TUI
    Submit {
        #[arg(long)]
        first_name: String,

        #[arg(long)]
        last_name: String,

        #[arg(long)]
        email: String,

        /// Password (read from HEALTHCONNECT_PASSWORD when omitted)
        #[arg(long, env = "HEALTHCONNECT_PASSWORD", hide_env_values = true)]
        password: String,

        /// doctor, patient or visitor
        #[arg(long, value_parser = clap::value_parser!(Role))]
        role: Role,
    },

    /// Print the effective configuration as TOML
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration first (needed for logging setup)
    let config = Config::load(cli.config.as_deref())?;

    // No subcommand means the interactive wizard
    let is_tui_mode = cli.command.is_none();

    // File-based for TUI, stderr otherwise
    let logging_handle = logging::init_logging(&config, is_tui_mode, cli.debug)?;

    match cli.command {
        Some(Commands::Strength { password }) => cmd_strength(&password),
        Some(Commands::Submit {
            first_name,
            last_name,
            email,
            password,
            role,
        }) => {
            let draft = SignupDraft {
                first_name,
                last_name,
                email,
                password,
                role: Some(role),
            };
            cmd_submit(&config, draft).await?;
        }
        Some(Commands::Config) => {
            print!("{}", config.to_toml()?);
        }
        None => {
            run_tui(config, logging_handle.log_file_path).await?;
        }
    }

    Ok(())
}

async fn run_tui(config: Config, log_file_path: Option<PathBuf>) -> Result<()> {
    let mut app = App::new(config)?;
    let result = app.run().await;

    // Print log file path on exit if logs were written
    if let Some(log_path) = log_file_path {
        if let Ok(metadata) = log_path.metadata() {
            if metadata.len() > 0 {
                eprintln!("Session log: {}", log_path.display());
            }
        }
    }

    result
}

fn cmd_strength(password: &str) {
    let strength = PasswordStrength::evaluate(password);
    println!(
        "{} {}/5 {}",
        strength.bar(),
        strength.score(),
        strength.label()
    );
}

async fn cmd_submit(config: &Config, draft: SignupDraft) -> Result<()> {
    let data = match validate(&draft) {
        Ok(data) => data,
        Err(errors) => {
            for (field, message) in errors.iter() {
                eprintln!("{}: {}", field.key(), message);
            }
            std::process::exit(EXIT_INVALID_FIELDS);
        }
    };

    let client = HttpSignupClient::new(&config.api)?;
    tracing::info!(url = %client.signup_url(), "Submitting registration");

    match client.register(&data).await {
        Ok(()) => {
            println!("Registration Successful!");
            println!("Thank you for signing up.");
            println!();
            println!("Return to Home: {}", config.links.home_url);
            println!("Go to Login:    {}", config.links.login_url);
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "Failed to register");
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn submit_args(role: &str) -> Vec<&str> {
        vec![
            "healthconnect",
            "submit",
            "--first-name",
            "John",
            "--last-name",
            "Doe",
            "--email",
            "john.doe@example.com",
            "--password",
            "Abcdef1!",
            "--role",
            role,
        ]
    }

    #[test]
    fn test_submit_parses_role() {
        let cli = Cli::try_parse_from(submit_args("Patient")).unwrap();
        match cli.command {
            Some(Commands::Submit { role, .. }) => assert_eq!(role, Role::Patient),
            _ => panic!("expected submit command"),
        }
    }

    #[test]
    fn test_submit_rejects_unknown_role() {
        let err = match Cli::try_parse_from(submit_args("nurse")) {
            Ok(_) => panic!("nurse should not parse as a role"),
            Err(err) => err,
        };
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
        let message = err.to_string();
        assert!(message.contains("unknown role 'nurse'"), "{}", message);
        assert!(message.contains("doctor, patient, visitor"), "{}", message);
    }

    #[test]
    fn test_no_subcommand_runs_tui() {
        let cli = Cli::try_parse_from(["healthconnect", "--debug"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.debug);
    }
}
