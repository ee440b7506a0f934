use clap::{Parser, Subcommand};

use threads_auth::cli::auth_cmd;
use threads_auth::cli::output::{print_error, OutputMode};
use threads_auth::{config_from_env, AuthError, Endpoints, ThreadsAuthBroker};

#[derive(Parser)]
#[command(name = "threads-auth", version, about = "OAuth token broker for the Threads API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Override the Graph API base URL
    #[arg(long, global = true, env = "THREADS_GRAPH_BASE_URL")]
    graph_base_url: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the authorization URL and its CSRF state
    #[command(name = "login-url")]
    LoginUrl {
        /// Use this state instead of generating one
        #[arg(long)]
        state: Option<String>,
    },

    /// Authorize interactively and print the long-lived token
    Login {
        /// Print the URL instead of opening a browser
        #[arg(long)]
        no_browser: bool,
    },

    /// Complete a login from the URL the provider redirected to
    Callback {
        /// Full callback URL or its query string
        url: String,

        /// State returned by login-url
        #[arg(long)]
        state: String,
    },

    /// Exchange an authorization code for a short-lived token
    Exchange {
        /// Authorization code
        code: String,
    },

    /// Upgrade a short-lived token to a long-lived token
    Upgrade {
        /// Short-lived access token
        token: String,
    },

    /// Refresh a long-lived token before it expires
    Refresh {
        /// Long-lived access token
        token: String,
    },

    /// Show the profile behind an access token
    Me {
        /// Access token to validate
        #[arg(long, env = "THREADS_ACCESS_TOKEN", hide_env_values = true)]
        token: Option<String>,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("THREADS_AUTH_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let json = cli.json;

    if let Err(e) = run(cli).await {
        print_error(&e, json);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), AuthError> {
    let mut config = config_from_env()?;
    if let Some(ref base) = cli.graph_base_url {
        config = config.with_endpoints(Endpoints::with_graph_base(base));
    }
    let broker = ThreadsAuthBroker::new(config)?;
    let mode = OutputMode::from_flag(cli.json);

    match cli.command {
        Commands::LoginUrl { state } => {
            auth_cmd::run_login_url(&broker, state.as_deref(), mode);
            Ok(())
        }
        Commands::Login { no_browser } => auth_cmd::run_login(&broker, !no_browser, mode).await,
        Commands::Callback { url, state } => {
            auth_cmd::run_callback(&broker, &url, &state, mode).await
        }
        Commands::Exchange { code } => auth_cmd::run_exchange(&broker, &code, mode).await,
        Commands::Upgrade { token } => auth_cmd::run_upgrade(&broker, &token, mode).await,
        Commands::Refresh { token } => auth_cmd::run_refresh(&broker, &token, mode).await,
        Commands::Me { token } => auth_cmd::run_me(&broker, token.as_deref(), mode).await,
    }
}
