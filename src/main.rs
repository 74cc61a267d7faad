//! seqbook - replay a command script through the matching engine.
//!
//! Every notification is printed as one line in arrival order, followed by
//! the replay receipt:
//!
//! ```text
//! $ seqbook book.txt
//! CreateOrder Accepted 6 2
//! CreateOrder Accepted 1100 1
//! 6 1100 FilledPartial FilledComplete 1 100
//! tokens 1..=2 commands 2 trades 1 rejections 0 root 3f9c...
//! ```

use std::fs;
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use seqbook::engine::{EngineConfig, NotificationHandler};
use seqbook::error::ScriptError;
use seqbook::replay::{parse_script, Command, Replayer};
use seqbook::types::price::from_fixed_trimmed;
use seqbook::types::{Order, OrderEvent, Trade};

#[derive(Parser, Debug, Clone)]
#[command(name = "seqbook")]
#[command(version)]
#[command(about = "Replay a token-sequenced order script", long_about = None)]
struct Cli {
    /// Script to replay, `-` for stdin
    script: PathBuf,

    /// Reject crossing limit orders instead of matching them
    #[arg(long, default_value_t = false)]
    no_matching: bool,

    /// Pre-allocated order slots
    #[arg(short = 'c', long, default_value_t = 1024)]
    capacity: usize,

    /// Log level
    #[arg(short = 'l', long, default_value = "info", value_parser = ["trace", "debug", "info", "warn", "error"])]
    log_level: String,

    /// Print only the receipt
    #[arg(short = 'q', long, default_value_t = false)]
    quiet: bool,
}

/// Prints every notification to stdout.
struct Printer {
    quiet: bool,
}

impl NotificationHandler for Printer {
    fn put_order(&mut self, event: OrderEvent) {
        if !self.quiet {
            println!("{event}");
        }
    }

    fn put_trade(&mut self, trade: Trade) {
        if !self.quiet {
            println!("{trade}");
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "replay failed");
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ScriptError> {
    let text = if cli.script.as_os_str() == "-" {
        io::read_to_string(io::stdin())?
    } else {
        fs::read_to_string(&cli.script)?
    };
    let commands = parse_script(&text)?;
    info!(path = %cli.script.display(), commands = commands.len(), "script loaded");

    let config = EngineConfig::default()
        .with_matching(!cli.no_matching)
        .with_order_capacity(cli.capacity);
    let mut replayer = Replayer::with_config(Printer { quiet: cli.quiet }, config);

    for command in &commands {
        let best = replayer.apply(command);
        if cli.quiet {
            continue;
        }
        match command {
            Command::BestAsk => println!("BestAsk {}", quote(best.as_ref())),
            Command::BestBid => println!("BestBid {}", quote(best.as_ref())),
            Command::Place { .. } | Command::Cancel { .. } => {}
        }
    }

    let receipt = replayer.receipt()?;
    info!(
        trades = receipt.trades,
        rejections = receipt.rejections,
        resting = replayer.book().order_count(),
        pending = replayer.book().pending_trigger_count(),
        "replay complete"
    );
    println!("{receipt}");
    Ok(())
}

fn quote(order: Option<&Order>) -> String {
    match order {
        Some(order) => format!(
            "{} {} {}",
            order.id,
            from_fixed_trimmed(order.price),
            from_fixed_trimmed(order.remaining)
        ),
        None => "none".to_string(),
    }
}

fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}
