//! Template CLI - drive the auth and paywall flows from a terminal.

mod commands;
mod output;

use app_config_and_utils::{init_logging, Config, Paths};
use auth_engine::OAuthProvider;
use clap::{Parser, Subcommand};
use tracing::debug;

/// Template CLI - passwordless sign-in and in-app purchase flows.
#[derive(Parser)]
#[command(name = "template")]
#[command(about = "Template CLI for authentication and paywall flows")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in with an OAuth provider
    Oauth {
        #[command(subcommand)]
        command: OAuthCommands,
    },

    /// Sign in with an emailed one-time code
    Otp {
        #[command(subcommand)]
        command: OtpCommands,
    },

    /// Logout and clear session
    Logout {
        /// Only forget the local session; do not contact the backend
        #[arg(long)]
        local: bool,
    },

    /// Show backend mode and session status
    Status,

    /// Browse and buy products
    Paywall {
        #[command(subcommand)]
        command: PaywallCommands,
    },
}

#[derive(Subcommand)]
enum OAuthCommands {
    /// Print the authorize URL to open in a browser
    Url {
        /// Provider (apple, google, kakao)
        provider: OAuthProvider,
    },
    /// Complete sign-in from the redirect URI
    Callback {
        /// Redirect URI including query and fragment
        uri: String,
    },
}

#[derive(Subcommand)]
enum OtpCommands {
    /// Email a verification code
    Send {
        email: String,
    },
    /// Verify a 6-digit code
    Verify {
        email: String,
        code: String,
    },
}

#[derive(Subcommand)]
enum PaywallCommands {
    /// List products
    Products,
    /// Purchase a product
    Purchase {
        /// Product ID
        product_id: String,
    },
    /// Restore previous purchases
    Restore,
}

async fn run(cli: Cli, config: Config, paths: Paths) -> anyhow::Result<()> {
    let ctx = commands::Context::new(config, &paths)?;
    let format = &cli.format;

    match cli.command {
        Commands::Oauth { command } => match command {
            OAuthCommands::Url { provider } => commands::oauth_url(&ctx, provider, format).await,
            OAuthCommands::Callback { uri } => commands::oauth_callback(&ctx, &uri, format).await,
        },
        Commands::Otp { command } => match command {
            OtpCommands::Send { email } => commands::otp_send(&ctx, &email, format).await,
            OtpCommands::Verify { email, code } => {
                commands::otp_verify(&ctx, &email, &code, format).await
            }
        },
        Commands::Logout { local } => commands::logout(&ctx, local, format).await,
        Commands::Status => commands::status(&ctx, format).await,
        Commands::Paywall { command } => match command {
            PaywallCommands::Products => commands::paywall_products(&ctx, format).await,
            PaywallCommands::Purchase { product_id } => {
                commands::paywall_purchase(&ctx, &product_id, format).await
            }
            PaywallCommands::Restore => commands::paywall_restore(&ctx, format).await,
        },
    }
}

fn load_config() -> anyhow::Result<(Config, Paths)> {
    let paths = Paths::new()?;
    let config = Config::load(&paths)?;
    config.validate()?;
    Ok((config, paths))
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let (config, paths) = match load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| config.log_level.clone());
    init_logging(&level);
    debug!(
        auth_configured = !config.auth_base_url.trim().is_empty(),
        billing_sync_enabled = config.billing_sync_enabled,
        "Configuration loaded"
    );

    if let Err(e) = run(cli, config, paths).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
