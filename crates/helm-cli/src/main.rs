mod console;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use console::{parse, ConsoleCmd, HELP};
use helm_ctrl::{encode, AuthorityGate, AxisState, ControlMode};
use helm_link::authority::AuthorityClient;
use helm_link::position::query_position;
use helm_link::sink::UdpCommandSink;
use helm_link::{doctor, streamer, LinkConfig};

#[derive(Debug, Parser)]
#[command(name = "helm", version, about = "Helm - manual setpoint console for a flight controller")]
struct Cli {
    #[arg(long)]
    config: String,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Validate the configuration.
    Doctor,
    /// Print the control-mode table (flags, axis labels, bounds).
    Modes,
    /// One-shot vehicle position query.
    Position,
    /// Start the publisher and the interactive operator console.
    Run,
}

#[derive(Debug, serde::Deserialize)]
struct Config {
    link: LinkConfig,
}

fn load_config(path: &str) -> Result<Config> {
    let s = std::fs::read_to_string(path).context("read config")?;
    Ok(toml::from_str(&s).context("parse config toml")?)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let cfg = load_config(&cli.config)?;

    match cli.cmd {
        Command::Doctor => {
            doctor::check_link(&cfg.link)?;
            info!("doctor: OK");
        }
        Command::Modes => print_modes(),
        Command::Position => {
            let addr = cfg.link.position_addr.as_ref().context("no link.position_addr configured")?;
            let fix = query_position(addr, cfg.link.request_timeout()).await?;
            println!("lat={:.6} lon={:.6} alt={:.1}m", fix.lat, fix.lon, fix.alt_m);
        }
        Command::Run => run(&cfg).await?,
    }
    Ok(())
}

fn print_modes() {
    for mode in ControlMode::ALL {
        println!("[{}] {:<42} flag=0x{:02X}", mode.index(), mode.describe(), mode.flag());
        for axis in 0..4 {
            let (lo, hi) = mode.bounds(axis);
            println!("      axis{} {:<8} [{:.3}, {:.3}]", axis, mode.label(axis), lo, hi);
        }
    }
}

async fn run(cfg: &Config) -> Result<()> {
    doctor::check_link(&cfg.link)?;
    info!("run: streaming to {} at {} Hz when started", cfg.link.setpoint_addr, cfg.link.rate_hz);

    let axes = AxisState::shared();
    let sink = UdpCommandSink::connect(&cfg.link.setpoint_addr).await?;
    let publisher = streamer::spawn(axes.clone(), sink, cfg.link.tick_period());

    let mut auth_client =
        AuthorityClient::new(cfg.link.authority_addr.clone(), cfg.link.request_timeout());
    let mut gate = AuthorityGate::new();

    println!("{}", HELP);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let cmd = match parse(line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        match cmd {
            ConsoleCmd::Mode(mode) => {
                axes.lock().unwrap().set_mode(mode);
                info!("mode: {} (flag=0x{:02X})", mode.describe(), mode.flag());
            }
            ConsoleCmd::Set(index, value) => {
                let mut st = axes.lock().unwrap();
                let mode = st.mode();
                if st.set_axis(mode, index, value) {
                    let stored = st.snapshot().axes[index];
                    println!("{} = {}", mode.label(index), stored);
                    if stored != value {
                        warn!("value {} clamped to {}", value, stored);
                    }
                } else {
                    warn!("write rejected (axis {}, value {})", index, value);
                }
            }
            ConsoleCmd::Zero(index) => {
                let mut st = axes.lock().unwrap();
                let mode = st.mode();
                st.zero_axis(mode, index);
                println!("{} = 0", mode.label(index));
            }
            ConsoleCmd::Start => publisher.start_streaming(),
            ConsoleCmd::Stop => publisher.stop_streaming(),
            ConsoleCmd::Auth | ConsoleCmd::Deauth => {
                let grant = cmd == ConsoleCmd::Auth;
                // State only changes on a confirmed ack; a failure here is
                // operator-visible and recoverable by re-requesting.
                match gate.request(&mut auth_client, grant).await {
                    Ok(state) => println!("authority: {:?}", state),
                    Err(e) => warn!("authority request failed, state unchanged: {}", e),
                }
            }
            ConsoleCmd::Status => {
                let snap = axes.lock().unwrap().snapshot();
                let cmd = encode(&snap);
                println!("mode: {} (flag=0x{:02X})", snap.mode.describe(), cmd.flag);
                for (axis, v) in cmd.axes.iter().enumerate() {
                    println!("  axis{} {:<8} = {}", axis, snap.mode.label(axis), v);
                }
                println!("streaming: {} ({} commands sent)", publisher.is_streaming(), publisher.emitted());
                println!("authority: {:?}", gate.state());
            }
            ConsoleCmd::Pos => match cfg.link.position_addr.as_ref() {
                Some(addr) => match query_position(addr, cfg.link.request_timeout()).await {
                    Ok(fix) => println!("lat={:.6} lon={:.6} alt={:.1}m", fix.lat, fix.lon, fix.alt_m),
                    Err(e) => warn!("position query failed: {:#}", e),
                },
                None => println!("no link.position_addr configured"),
            },
            ConsoleCmd::Help => println!("{}", HELP),
            ConsoleCmd::Exit => break,
        }
    }

    // Stop emitting, then join the publisher before the socket goes away.
    publisher.stop_streaming();
    publisher.shutdown().await;
    info!("exit");
    Ok(())
}
