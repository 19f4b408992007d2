mod config;

use std::future::Future;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{info, warn};

use dash_link::{doctor as link_doctor, render::parse_incoming, server, LinkError, PathLink};
use dash_proto::wire::{PathUpdate, WsMessage};
use dash_sim::dashboard::Dashboard;
use dash_sim::routes::RouteRegistry;
use dash_sim::{doctor as sim_doctor, geo, history, seed};

use config::{load_config, Config};

#[derive(Debug, Parser)]
#[command(name = "dronedash", version, about = "dronedash - drone fleet dashboard model")]
struct Cli {
    #[arg(long)]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    Doctor,
    /// Run the telemetry/notification timers until Ctrl-C.
    Run {
        /// Stop after this many telemetry ticks.
        #[arg(long)]
        ticks: Option<u64>,
        /// Arm and take off before the timers start.
        #[arg(long)]
        takeoff: bool,
    },
    /// Print 24h of generated history as JSON lines.
    History,
    Routes { #[command(subcommand)] cmd: Option<RoutesCmd> },
    Link { #[command(subcommand)] cmd: LinkCmd },
}

#[derive(Debug, Subcommand)]
enum RoutesCmd {
    Activate { id: String },
    Complete { id: String },
    Cancel { id: String },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
enum LinkCmd {
    /// Connect, send the demo path.update and print replies.
    Send {
        #[arg(long)]
        url: Option<String>,
        /// How long to wait for replies after sending.
        #[arg(long, default_value_t = 3000)]
        wait_ms: u64,
    },
    /// Acknowledge path.update messages on /ws.
    Serve {
        #[arg(long)]
        bind: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cfg.logger.level)),
        )
        .init();

    match cli.cmd {
        Command::Doctor => doctor(&cfg)?,
        Command::Run { ticks, takeoff } => run(&cfg, ticks, takeoff).await?,
        Command::History => print_history(&cfg)?,
        Command::Routes { cmd } => routes(cmd)?,
        Command::Link { cmd } => link_cmd(&cfg, cmd).await?,
    }
    Ok(())
}

fn doctor(cfg: &Config) -> Result<()> {
    info!("doctor: starting");

    sim_doctor::check_intervals(&cfg.sim)?;
    sim_doctor::check_drone(&seed::drone(time::OffsetDateTime::now_utc()))?;
    sim_doctor::check_routes(&seed::routes())?;
    link_doctor::check_url(&cfg.link.url)?;
    link_doctor::check_bind(&cfg.link.bind)?;

    info!("doctor: OK");
    Ok(())
}

/// Resolves when `signal` fires. A failed handler never resolves, so the
/// caller keeps running instead of shutting down at once.
async fn until_signal<F>(signal: F)
where
    F: Future<Output = std::io::Result<()>>,
{
    if let Err(e) = signal.await {
        warn!("ctrl-c handler failed: {:#}", e);
        std::future::pending::<()>().await;
    }
}

async fn run(cfg: &Config, ticks: Option<u64>, takeoff: bool) -> Result<()> {
    info!("run: starting");

    let mut dash = Dashboard::new(cfg.sim.clone());
    if takeoff && !dash.control_mut().takeoff(Instant::now()) {
        warn!("run: takeoff ignored, already armed");
    }
    let summary = dash.run(until_signal(tokio::signal::ctrl_c()), ticks).await;

    let d = dash.telemetry().drone();
    println!("{}", serde_json::to_string_pretty(d)?);
    println!("{}", serde_json::to_string_pretty(dash.telemetry().environment())?);
    println!(
        "telemetry_ticks={} notifications={} unread={} phase={:?}",
        summary.telemetry_ticks,
        summary.notifications,
        dash.feed().unread_count(),
        dash.control().phase()
    );
    Ok(())
}

fn print_history(cfg: &Config) -> Result<()> {
    let mut rng = match cfg.sim.rng_seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_entropy(),
    };
    for sample in history::generate(&mut rng, time::OffsetDateTime::now_utc()) {
        println!("{}", serde_json::to_string(&sample)?);
    }
    Ok(())
}

fn routes(cmd: Option<RoutesCmd>) -> Result<()> {
    let mut reg = RouteRegistry::new(seed::routes());

    match cmd {
        None => {}
        Some(RoutesCmd::Activate { id }) => { reg.activate(&id)?; }
        Some(RoutesCmd::Complete { id }) => { reg.complete(&id)?; }
        Some(RoutesCmd::Cancel { id }) => { reg.cancel(&id)?; }
        Some(RoutesCmd::Delete { id }) => { reg.delete(&id)?; }
    }

    let selected = reg.selected().map(|r| r.id.clone());
    for r in reg.iter() {
        let mark = if selected.as_deref() == Some(r.id.as_str()) { "*" } else { " " };
        println!(
            "{} {} {:<10} wps={} path={:.2}km declared={}km eta={}min {}",
            mark,
            r.id,
            r.status.label(),
            r.waypoints.len(),
            geo::path_length_km(&r.waypoints),
            r.distance,
            r.estimated_time,
            r.name,
        );
    }
    if reg.active_count() > 1 {
        warn!("routes: {} routes are active", reg.active_count());
    }
    Ok(())
}

async fn link_cmd(cfg: &Config, cmd: LinkCmd) -> Result<()> {
    match cmd {
        LinkCmd::Send { url, wait_ms } => {
            let url = url.unwrap_or_else(|| cfg.link.url.clone());
            link_doctor::check_url(&url)?;

            let mut link = PathLink::new(url)?;
            link.connect().await.context("link connect")?;
            println!("status: {}", link.status().label());

            match link.send_path_update(&PathUpdate::demo()).await {
                Err(LinkError::NotConnected) => anyhow::bail!("not connected"),
                other => other?,
            }

            let wait = Duration::from_millis(wait_ms);
            loop {
                match tokio::time::timeout(wait, link.recv_display()).await {
                    Ok(Some(Ok(text))) => {
                        if let Some(WsMessage::Ack { count, .. }) = parse_incoming(&text) {
                            info!("link: server acknowledged {} points", count);
                        }
                        println!("{}", text);
                    }
                    Ok(Some(Err(e))) => {
                        println!("status: {}", link.status().label());
                        return Err(e.into());
                    }
                    Ok(None) => break,
                    Err(_) => {
                        link.close().await?;
                        break;
                    }
                }
            }
            println!("status: {}", link.status().label());
            Ok(())
        }
        LinkCmd::Serve { bind } => {
            let bind = bind.unwrap_or_else(|| cfg.link.bind.clone());
            let addr = link_doctor::check_bind(&bind)?;
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("bind {}", addr))?;
            server::serve(listener, until_signal(tokio::signal::ctrl_c())).await
        }
    }
}
