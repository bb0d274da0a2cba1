mod page;
mod site_tracer;
mod sitemap;

use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use site_tracer::SiteTracer;
use url::Url;

fn parse_root(value: &str) -> Result<Url, String> {
    let url = Url::parse(value).map_err(|err| format!("{}: {}", value, err))?;
    if !url.has_host() {
        return Err(format!("{}: root URL needs a host", value));
    }
    Ok(url)
}

#[derive(Parser, Debug)]
#[command(version, about = "Maps the same-origin pages of a site with their links and assets")]
pub struct Cli {
    /// The absolute URL to begin from
    #[arg(short, long, value_parser = parse_root)]
    url: Url,
    /// Number of concurrent workers
    #[arg(short, long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..))]
    workers: u16,
    /// Per-request timeout in seconds
    #[arg(short, long, default_value_t = 3)]
    timeout: u64,
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => e.exit(),
    };
    if let Some(log_level) = &args.log_level {
        tracing_subscriber::fmt()
            .with_env_filter(format!("sitemapper={}", log_level))
            .with_writer(std::io::stderr)
            .compact()
            .init();
    }

    let client = match reqwest::Client::builder()
        .timeout(Duration::from_secs(args.timeout))
        .user_agent(concat!("sitemapper/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(client) => client,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        }
    };

    let st = SiteTracer {
        fetcher: client,
        worker_pool_size: args.workers,
    };
    match st.trace(&args.url).await {
        Ok(sitemap) => {
            if sitemap.is_empty() {
                tracing::warn!("No pages mapped from {}", args.url);
            }
            print!("{}", sitemap.to_listing());
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
