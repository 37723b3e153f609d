use std::net::SocketAddr;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use logo_placer::config::PlacerConfig;
use logo_placer::processing::VariantPolicy;
use logo_placer::session::failure_response;
use logo_placer::{PlacementOutcome, PlacementRequest, PlacementSession, server};
use logo_scale::plan::ResizeFilter;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Place a logo in a clean corner of a photo:
/// - checks the top-left, then the top-right corner for a plain background
/// - picks the light or dark logo for contrast
/// - shrinks the logo to 75% once when nothing fits
#[derive(Parser, Debug)]
#[command(name = "logoplace")]
#[command(about = "🖼️  Place a logo on a photo where it stays legible")]
#[command(long_about = "Place a logo on a photo where it stays legible.
Image and logo references may be http(s) URLs, local paths, or base64 data URIs.
`place` handles one request and prints the JSON response; `serve` runs the HTTP service.")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Place a logo once and print the response.
    /// Exits 2 when no suitable location exists and 1 when processing fails.
    Place {
        /// Background image reference
        #[arg(short, long, help = "Image the logo is placed on")]
        image: String,

        /// Light logo reference (mandatory)
        #[arg(short, long, help = "Logo rendered for dark backgrounds")]
        logo: String,

        /// Dark logo reference
        #[arg(short, long, help = "Logo rendered for light backgrounds (defaults to --logo)")]
        dark_logo: Option<String>,

        #[command(flatten)]
        settings: Settings,
    },
    /// Serve POST /placeLogo and the generated images over HTTP
    Serve {
        /// Address to listen on
        #[arg(short, long, default_value = "127.0.0.1:3000")]
        bind: SocketAddr,

        #[command(flatten)]
        settings: Settings,
    },
}

#[derive(Args, Debug)]
struct Settings {
    /// Directory for generated images
    #[arg(short, long, default_value = "images")]
    output_dir: PathBuf,

    /// Origin of the returned image URLs
    #[arg(long, default_value = "http://localhost:3000/")]
    base_url: String,

    /// Route the output directory is served under
    #[arg(long, default_value = "images")]
    public_path: String,

    /// Per-channel colour tolerance for a corner to count as plain
    #[arg(short, long, default_value_t = 10)]
    tolerance: u8,

    /// Margin between logo and image edges, both axes
    #[arg(short, long, default_value_t = 5)]
    margin: u32,

    /// How background brightness picks the logo variant
    #[arg(long, value_enum, default_value_t = VariantPolicy::Contrast)]
    policy: VariantPolicy,

    /// Resampling filter used when shrinking the logo
    #[arg(long, value_enum, default_value_t = ResizeFilter::Lanczos3)]
    filter: ResizeFilter,

    /// HTTP fetch timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,
}

impl Settings {
    fn into_config(self) -> Result<PlacerConfig> {
        let config = PlacerConfig {
            margin_x: self.margin,
            margin_y: self.margin,
            tolerance: self.tolerance,
            variant_policy: self.policy,
            resize_filter: self.filter,
            output_dir: self.output_dir,
            public_base_url: self.base_url,
            public_path: self.public_path,
            fetch_timeout_secs: self.timeout,
            ..PlacerConfig::default()
        };
        config.validate().map_err(anyhow::Error::msg)?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("logo_placer=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    match Cli::parse().command {
        Command::Place {
            image,
            logo,
            dark_logo,
            settings,
        } => {
            let config = settings.into_config()?;
            let mut request = PlacementRequest::new(image, logo);
            if let Some(dark) = dark_logo {
                request = request.with_dark_logo(dark);
            }
            request.validate()?;

            let session = PlacementSession::builder().with_config(config).build()?;
            let (response, code) = match session.place(&request).await {
                Some(outcome @ PlacementOutcome::Placed(_)) => (outcome.to_response(), ExitCode::SUCCESS),
                Some(outcome @ PlacementOutcome::NoPlacementFound) => {
                    (outcome.to_response(), ExitCode::from(2))
                }
                None => (failure_response(), ExitCode::FAILURE),
            };

            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(code)
        }
        Command::Serve { bind, settings } => {
            let session = PlacementSession::builder()
                .with_config(settings.into_config()?)
                .build()?;
            let listener = tokio::net::TcpListener::bind(bind).await?;
            info!(addr = %listener.local_addr()?, "Logo placer listening");
            axum::serve(listener, server::router(session)).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
