use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use thumbframe::imaging::{Dimensions, RustBackend, plan_fit};
use thumbframe::request::RawParams;
use thumbframe::service::ThumbnailService;
use thumbframe::source::HttpFetcher;
use thumbframe::{config, output};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "thumbframe")]
#[command(about = "Fit an image into a fixed box, letterboxed, as JPEG")]
#[command(long_about = "\
Fit an image into a fixed box, letterboxed, as JPEG

The source is scaled down (never up) to fit inside WIDTHxHEIGHT, centred,
and the uncovered area is filled with the background colour.

Sources:
  file:///<path>     read <path> from disk (path taken verbatim)
  http(s)://...      fetched over the network

Run 'thumbframe gen-config' to generate a documented config.toml.
Set RUST_LOG=debug for per-request plans.")]
#[command(version)]
struct Cli {
    /// Directory containing config.toml
    #[arg(long, default_value = ".", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run one thumbnail request and write the JPEG
    Render {
        /// Source reference (file:///path or http(s) URL)
        #[arg(long)]
        url: Option<String>,
        /// Target width in pixels
        #[arg(long, allow_hyphen_values = true)]
        width: Option<String>,
        /// Target height in pixels
        #[arg(long, allow_hyphen_values = true)]
        height: Option<String>,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the fit plan for a source size and a frame, without any image
    Plan {
        #[arg(long)]
        source_width: u32,
        #[arg(long)]
        source_height: u32,
        #[arg(long)]
        width: u32,
        #[arg(long)]
        height: u32,
        /// Print the plan as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            url,
            width,
            height,
            output: output_path,
        } => {
            let service_config = config::load_config(&cli.config)?;
            let fetcher = HttpFetcher::new(service_config.fetch_limits())?;
            let service =
                ThumbnailService::new(RustBackend::new(), fetcher, service_config.render_config());

            let raw = RawParams {
                target: render_target(&url, &width, &height),
                url,
                width,
                height,
            };
            let response = service.handle(&raw);

            if response.is_success() {
                match &output_path {
                    Some(path) => std::fs::write(path, &response.body)?,
                    None => std::io::stdout().write_all(&response.body)?,
                }
            }
            output::print_response(&response, output_path.as_deref());
            if !response.is_success() {
                std::process::exit(1);
            }
        }
        Command::Plan {
            source_width,
            source_height,
            width,
            height,
            json,
        } => {
            if [source_width, source_height, width, height].contains(&0) {
                return Err("all dimensions must be positive".into());
            }
            let source = Dimensions {
                width: source_width,
                height: source_height,
            };
            let plan = plan_fit(source, width, height);
            if json {
                println!("{}", serde_json::to_string_pretty(&plan)?);
            } else {
                output::print_plan(source, width, height, &plan);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Rebuild the equivalent request target for error messages.
fn render_target(url: &Option<String>, width: &Option<String>, height: &Option<String>) -> String {
    let mut query = url::form_urlencoded::Serializer::new(String::new());
    for (key, value) in [("url", url), ("width", width), ("height", height)] {
        if let Some(value) = value {
            query.append_pair(key, value);
        }
    }
    format!("/thumbnail?{}", query.finish())
}
