//! `aws-console` — opens the AWS web console signed in with a profile's
//! temporary credentials.
//!
//! 1. Resolves credentials for the given profile and region.
//! 2. Exchanges them for a signin token at the federation endpoint.
//! 3. Opens the resulting login URL in the browser, or prints it.

mod resolver;
mod sink;

use std::future::Future;
use std::io;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use console_federation::{Credentials, FederationClient, FederationConfig, FederationError};
use tracing::{error, info};

use crate::resolver::AwsProfileResolver;
use crate::sink::{BrowserSink, LoginSink, PrintSink};

/// Open the AWS console with the credentials of a named profile.
#[derive(Parser, Debug)]
#[command(name = "aws-console")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// AWS profile to take credentials from (e.g. `dev-admin`).
    profile: String,

    /// AWS region used while resolving the profile (e.g. `eu-west-1`).
    region: String,

    /// Print the login URL instead of opening a browser.
    #[arg(long)]
    print: bool,

    /// Do not open the logout page before the login URL.
    #[arg(long)]
    no_logout: bool,
}

/// Where the login URL goes, as chosen by the flags.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SinkKind {
    Print,
    Browser { logout_url: Option<String> },
}

impl SinkKind {
    fn into_sink(self) -> Box<dyn LoginSink> {
        match self {
            Self::Print => Box::new(PrintSink::new(io::stdout())),
            Self::Browser { logout_url } => Box::new(BrowserSink::system(logout_url)),
        }
    }
}

impl Cli {
    fn sink_kind(&self, config: &FederationConfig) -> SinkKind {
        if self.print {
            SinkKind::Print
        } else {
            SinkKind::Browser {
                logout_url: (!self.no_logout).then(|| config.logout_url.to_string()),
            }
        }
    }
}

/// Resolve credentials, exchange them, and hand the login URL to `sink`.
///
/// Stops at the first failure: the exchange never starts without
/// credentials and the sink never sees a URL unless the exchange succeeded.
async fn sign_in(
    credentials: impl Future<Output = Result<Credentials, FederationError>>,
    client: &FederationClient,
    sink: &mut dyn LoginSink,
) -> anyhow::Result<()> {
    let credentials = credentials.await.context("could not load credentials")?;
    info!(access_key_id = credentials.access_key_id(), "credentials resolved");

    let login_url = client
        .create_login_url(&credentials)
        .await
        .context("could not get login url")?;

    sink.deliver(&login_url).context("could not deliver login url")
}

async fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = FederationConfig::from_env().context("invalid federation configuration")?;
    info!(
        federation_url = %config.federation_url,
        destination = %config.destination,
        "federation endpoint configured"
    );

    let mut sink = cli.sink_kind(&config).into_sink();
    let client = FederationClient::new(config)?;
    let resolver = AwsProfileResolver::new(&cli.profile, &cli.region);

    sign_in(resolver.resolve(), &client, sink.as_mut()).await
}

/// Log a failed run and map it to the process exit status.
fn exit_code(result: anyhow::Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = format!("{e:#}");
            error!(error = %message, "console sign-in failed");
            ExitCode::FAILURE
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Structured logging on stderr so `--print` output stays clean.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    info!(profile = %cli.profile, region = %cli.region, "opening console");

    exit_code(run(&cli).await)
}
