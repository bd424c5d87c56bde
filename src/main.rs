//! AutoTrader launcher binary
//!
//! One positional URL decides the mode: a scheme URL opens the browser
//! shell with the decoded session, anything else (or nothing) registers
//! this executable as the scheme handler. The process exits 0 on every
//! path; failures are logged.

use clap::Parser;
use tracing::{error, info};

use autotrader_shell::install;
use autotrader_shell::launch::{self, SCHEME_PREFIX};
use autotrader_shell::session;
use autotrader_shell::shell::{ShellConfig, ShellController};

/// AutoTrader launcher
#[derive(Parser, Debug)]
#[command(name = "autotrader")]
#[command(version)]
#[command(about = "Desktop launcher and scheme handler for the marketplace")]
struct Args {
    /// URL to open; an autotrader:// URL enters browser mode, anything
    /// else installs the scheme handler
    url: Option<String>,

    /// Path to Chrome/Chromium executable
    #[arg(long)]
    chrome_path: Option<String>,

    /// Override the user agent
    #[arg(long)]
    user_agent: Option<String>,

    /// Run the browser without a window
    #[arg(long)]
    headless: bool,

    /// Disable the Chromium sandbox
    #[arg(long)]
    no_sandbox: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    let filter = if args.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match args.url {
        Some(ref raw) if raw.starts_with(SCHEME_PREFIX) => {
            if let Err(err) = run_browser(raw, &args).await {
                error!("browser session failed: {err}");
            }
        }
        _ => run_install(),
    }
}

async fn run_browser(raw: &str, args: &Args) -> autotrader_shell::Result<()> {
    let (request, session_config) = launch::resolve(raw);

    let mut builder = ShellConfig::builder()
        .windowed(!args.headless)
        .sandbox(!args.no_sandbox)
        .proxy(session_config.proxy.clone());
    if let Some(ref path) = args.chrome_path {
        builder = builder.chrome_path(path);
    }
    if let Some(ref ua) = args.user_agent {
        builder = builder.user_agent(ua);
    }

    let controller = ShellController::launch(builder.build()).await?;
    let page = controller.new_page().await?;

    session::bootstrap(&page, &session_config, &request.target_url).await?;
    info!(url = %request.target_url, cookies = session_config.cookies.len(), "session started");

    controller.run_until_closed().await
}

fn run_install() {
    match install::platform_installer().and_then(|installer| installer.install()) {
        Ok(report) => {
            println!("URL scheme handler installed for {}.", report.platform);
            for artifact in &report.artifacts {
                println!("  wrote {artifact}");
            }
            println!("  command: {}", report.launch_command);
        }
        Err(err) => error!("installation failed: {err}"),
    }
}
