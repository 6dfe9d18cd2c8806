//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use vaultx_core::{config, logging};

mod commands;

use commands::verify::VerifyOptions;

#[derive(Parser)]
#[command(name = "vaultx")]
#[command(version)]
#[command(about = "VaultX terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    verify: VerifyArgs,
}

/// Arguments of the interactive verification screen.
#[derive(clap::Args, Debug, Clone, Default)]
struct VerifyArgs {
    /// Phone number to prefill (defaults to the profile phone)
    #[arg(long, value_name = "PHONE")]
    phone: Option<String>,

    /// Language hint, used when neither config nor locale picks one
    #[arg(long, value_name = "LANG")]
    lang: Option<String>,

    /// Show the bottom tab bar
    #[arg(long)]
    tabs: bool,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Verify the profile phone number (interactive, default)
    Verify(VerifyArgs),

    /// Non-interactive SMS verification
    Sms {
        #[command(subcommand)]
        command: SmsCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },

    /// Inspect bundled translations
    Locales {
        #[command(subcommand)]
        command: LocalesCommands,
    },

    /// Manage the local profile
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
}

#[derive(clap::Subcommand)]
enum SmsCommands {
    /// Request a verification code
    Send {
        /// Phone number with country code, e.g. +15551234567
        #[arg(long, value_name = "PHONE")]
        phone: String,
    },
    /// Submit a received code
    Check {
        /// Phone number the code was sent to
        #[arg(long, value_name = "PHONE")]
        phone: String,
        /// The code from the SMS
        #[arg(long, value_name = "CODE")]
        code: String,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

#[derive(clap::Subcommand)]
enum LocalesCommands {
    /// List supported languages and their namespace coverage
    List,
    /// Print the strings of one language
    Show {
        /// Language code, e.g. es or pt_BR
        #[arg(value_name = "LANG")]
        lang: String,
        /// Namespace to print
        #[arg(long, short, default_value = "common")]
        namespace: String,
    },
}

#[derive(clap::Subcommand)]
enum ProfileCommands {
    /// Show the stored profile
    Show,
    /// Store a phone number (resets its verification)
    SetPhone {
        #[arg(value_name = "PHONE")]
        phone: String,
    },
    /// Store the bearer token sent to the backend
    SetToken {
        #[arg(value_name = "TOKEN")]
        token: String,
    },
    /// Delete the stored profile
    Reset,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;

    rt.block_on(async move { dispatch(cli).await })
}

async fn dispatch(cli: Cli) -> Result<()> {
    let config = config::Config::load().context("load config")?;

    // Held until exit; dropping it flushes the log file.
    let _log_guard = match logging::init(&config::paths::vaultx_home(), &config.logging) {
        Ok(guard) => Some(guard),
        Err(err) => {
            eprintln!("Warning: logging disabled: {err:#}");
            None
        }
    };

    let Cli { command, verify } = cli;

    // default to the verification screen
    let Some(command) = command else {
        return commands::verify::run(&config, &VerifyOptions::from(verify)).await;
    };

    match command {
        Commands::Verify(args) => commands::verify::run(&config, &VerifyOptions::from(args)).await,

        Commands::Sms { command } => match command {
            SmsCommands::Send { phone } => commands::sms::send(&config, &phone).await,
            SmsCommands::Check { phone, code } => {
                commands::sms::check(&config, &phone, &code).await
            }
        },

        Commands::Config { command } => match command {
            ConfigCommands::Path => {
                commands::config::path();
                Ok(())
            }
            ConfigCommands::Init => commands::config::init(),
        },

        Commands::Locales { command } => match command {
            LocalesCommands::List => {
                commands::locales::list();
                Ok(())
            }
            LocalesCommands::Show { lang, namespace } => {
                commands::locales::show(&lang, &namespace)
            }
        },

        Commands::Profile { command } => match command {
            ProfileCommands::Show => commands::profile::show(),
            ProfileCommands::SetPhone { phone } => commands::profile::set_phone(&config, &phone),
            ProfileCommands::SetToken { token } => commands::profile::set_token(&token),
            ProfileCommands::Reset => commands::profile::reset(),
        },
    }
}

impl From<VerifyArgs> for VerifyOptions {
    fn from(args: VerifyArgs) -> Self {
        Self {
            phone: args.phone,
            lang: args.lang,
            tabs: args.tabs,
        }
    }
}
