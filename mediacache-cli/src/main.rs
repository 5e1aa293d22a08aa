//! Mediacache CLI
//!
//! Serves the image and video caches over HTTP and inspects them locally.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use mediacache_api::{ApiConfig, ApiServer};
use mediacache_core::{
    MediaKind, MediaResolver, DEFAULT_IMAGE_CACHE_DIR, DEFAULT_VIDEO_CACHE_DIR,
};

/// Mediacache - path-safe access to on-disk image and video caches
#[derive(Parser)]
#[command(name = "mediacache")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    log_json: bool,

    /// Image cache directory
    #[arg(long, global = true, env = "IMAGE_CACHE_DIR", default_value = DEFAULT_IMAGE_CACHE_DIR)]
    image_dir: PathBuf,

    /// Video cache directory
    #[arg(long, global = true, env = "VIDEO_CACHE_DIR", default_value = DEFAULT_VIDEO_CACHE_DIR)]
    video_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the API server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "PORT", default_value = "8000")]
        port: u16,
        /// Bind address
        #[arg(short, long, env = "BIND", default_value = "0.0.0.0")]
        bind: String,
    },

    /// Show how a request path would be resolved
    Resolve {
        /// Request path, as it would appear after /images/
        path: String,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show file counts and sizes for both caches
    Stats {
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env before clap reads the environment.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "mediacache=debug,info"
    } else {
        "mediacache=info,warn"
    };
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into());

    if cli.log_json {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    let config = ApiConfig::new(&cli.image_dir, &cli.video_dir);
    debug!(?config, "Loaded configuration");

    match cli.command {
        Commands::Serve { port, bind } => cmd_serve(config, port, &bind).await,
        Commands::Resolve { path, json } => cmd_resolve(config, &path, json).await,
        Commands::Stats { json } => cmd_stats(config, json).await,
    }
}

/// Run API server
async fn cmd_serve(config: ApiConfig, port: u16, bind: &str) -> Result<()> {
    config.validate().context("Invalid cache configuration")?;
    let addr = bind_addr(bind, port)?;

    println!("{}", "🚀 Starting mediacache server...".cyan().bold());
    println!("   {} {}", "Image cache:".dimmed(), config.image_cache_dir.display());
    println!("   {} {}", "Video cache:".dimmed(), config.video_cache_dir.display());
    println!("   {} http://{}", "Listening on:".green(), addr);
    println!("   {} http://{}/health", "Health check:".dimmed(), addr);
    println!("\n   Press Ctrl+C to stop.\n");

    let server = ApiServer::new(config);
    server.run(addr).await.context("Server terminated")?;

    Ok(())
}

/// Resolve a request path against the caches
async fn cmd_resolve(config: ApiConfig, path: &str, json: bool) -> Result<()> {
    let resolver = MediaResolver::new(config.cache_roots());

    let Some(plan) = resolver.plan(path) else {
        if json {
            println!("{}", serde_json::json!({ "request": path, "status": 404, "reason": "no usable filename" }));
        } else {
            println!("{} {:?}", "❌ No usable filename in".red().bold(), path);
        }
        return Ok(());
    };

    let outcome = resolver.resolve(path).await;

    if json {
        let value = match &outcome {
            Ok(media) => serde_json::json!({
                "request": path,
                "status": 200,
                "file_name": media.file_name,
                "kind": media.kind,
                "path": media.path,
                "content_type": media.content_type(),
                "bytes": media.len,
            }),
            Err(e) => {
                let status = if e.is_not_found() { 404 } else { 500 };
                serde_json::json!({
                    "request": path,
                    "status": status,
                    "file_name": plan.file_name,
                    "kind": plan.kind,
                    "path": plan.path,
                    "error": e.to_string(),
                })
            }
        };
        println!("{}", serde_json::to_string_pretty(&value)?);
        return Ok(());
    }

    println!("{} {:?}", "🔍 Request:".cyan().bold(), path);
    println!("   {} {}", "File name:".dimmed(), plan.file_name);
    println!("   {} {}", "Cache:".dimmed(), plan.kind.as_str());
    println!("   {} {}", "Lookup path:".dimmed(), plan.path.display());

    match outcome {
        Ok(media) => {
            println!("\n{}", "✅ Hit".green().bold());
            println!("   {} {}", "Content-Type:".dimmed(), media.content_type());
            println!("   {} {}", "Size:".dimmed(), format_bytes(media.len));
            for (name, value) in media.headers() {
                println!("   {} {}", format!("{}:", name).dimmed(), value);
            }
        }
        Err(e) if e.is_not_found() => {
            println!("\n{}", "⚠️  Miss (404)".yellow().bold());
            if plan.kind == MediaKind::Video {
                println!("   Videos are only looked up in the video cache.");
            }
        }
        Err(e) => {
            println!("\n{} {}", "❌ Error (500):".red().bold(), e);
        }
    }

    Ok(())
}

/// Show cache statistics
async fn cmd_stats(config: ApiConfig, json: bool) -> Result<()> {
    let resolver = MediaResolver::new(config.cache_roots());
    let stats = resolver.stats().await.context("Failed to scan cache directories")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "📊 Cache statistics".cyan().bold());
    for (label, dir) in [("Images", &stats.image), ("Videos", &stats.video)] {
        println!("\n   {} {}", format!("{}:", label).yellow(), dir.path.display());
        if dir.exists {
            println!("      {} files, {}", dir.file_count, format_bytes(dir.total_bytes));
        } else {
            println!("      {}", "directory does not exist".dimmed());
        }
    }
    println!(
        "\n   {} {} files, {}",
        "Total:".green(),
        stats.total_files(),
        format_bytes(stats.total_bytes())
    );

    Ok(())
}

/// Accepts IPv4 and IPv6 literals (`0.0.0.0`, `::`).
fn bind_addr(bind: &str, port: u16) -> Result<SocketAddr> {
    let ip: IpAddr = bind
        .parse()
        .with_context(|| format!("Invalid bind address: {}", bind))?;
    Ok(SocketAddr::new(ip, port))
}

fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} {}", bytes, UNITS[0])
    } else {
        format!("{:.1} {}", value, UNITS[unit])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_bind_addr_accepts_ipv4_and_ipv6() {
        assert_eq!(bind_addr("0.0.0.0", 8000).unwrap().to_string(), "0.0.0.0:8000");
        assert_eq!(bind_addr("::", 8000).unwrap().to_string(), "[::]:8000");
        assert_eq!(bind_addr("::1", 9000).unwrap().to_string(), "[::1]:9000");
        assert!(bind_addr("localhost", 8000).is_err());
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn test_parse_resolve() {
        let cli = Cli::try_parse_from([
            "mediacache",
            "--image-dir",
            "/tmp/img",
            "resolve",
            "../../etc/passwd",
        ])
        .unwrap();
        assert_eq!(cli.image_dir, PathBuf::from("/tmp/img"));
        assert!(matches!(cli.command, Commands::Resolve { ref path, json: false } if path == "../../etc/passwd"));
    }
}
