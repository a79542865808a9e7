use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};
use twodns_application::use_cases::ResolveEncodedNameUseCase;
use twodns_domain::CliOverrides;
use twodns_infrastructure::dns::DnsServerHandler;

mod bootstrap;
mod commands;
mod server;

#[derive(Parser)]
#[command(name = "twodns")]
#[command(version)]
#[command(about = "twodns - authoritative DNS server that answers from the query name itself")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE", global = true)]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long, global = true)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long, global = true)]
    bind: Option<String>,

    /// Zone suffix encoded names live under
    #[arg(short = 's', long, global = true)]
    suffix: Option<String>,

    /// TTL for synthesized records
    #[arg(long, global = true)]
    ttl: Option<u32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the DNS server (default)
    Serve,

    /// Build a name that resolves to the given data
    Encode {
        #[command(subcommand)]
        target: commands::EncodeTarget,
    },

    /// Show the records a name resolves to
    Decode {
        name: String,

        /// Print records as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the configuration and exit
    CheckConfig {
        /// Also write the effective configuration, overrides applied, to FILE
        #[arg(long, value_name = "FILE")]
        write: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind.clone(),
        suffix: cli.suffix.clone(),
        ttl: cli.ttl,
        log_level: cli.log_level.clone(),
        log_json: cli.log_json,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    match cli.command.unwrap_or(Command::Serve) {
        Command::Encode { target } => {
            println!("{}", commands::encode(&target, &config)?);
            return Ok(());
        }
        Command::Decode { name, json } => {
            println!("{}", commands::decode(&name, json, &config)?);
            return Ok(());
        }
        Command::CheckConfig { write } => {
            println!("{}", commands::check_config(&config, write.as_deref())?);
            return Ok(());
        }
        Command::Serve => {}
    }

    info!("Starting twodns v{}", env!("CARGO_PKG_VERSION"));
    info!(
        suffix = %config.zone.suffix,
        ttl = config.zone.default_ttl,
        json_records = config.zone.enable_json_records,
        ip_reflection = config.zone.enable_ip_reflection,
        dual_stack = config.zone.enable_dual_stack,
        "Zone configured"
    );

    ResolveEncodedNameUseCase::new().self_test(&config.zone)?;
    info!("Resolver self-test passed");

    let zone = Arc::new(config.zone.clone());
    let dns_handler = DnsServerHandler::new(zone);

    tokio::select! {
        result = server::start_dns_server(&config.server, dns_handler) => {
            if let Err(e) = &result {
                error!(error = %e, "DNS server error");
            }
            result?;
        }
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
        }
    }

    info!("Server shutdown complete");
    Ok(())
}
