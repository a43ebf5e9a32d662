#![forbid(unsafe_code)]
//! TicketChain command line: run the demo or issue a single ticket

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;
use std::time::Instant;
use ticketchain::blockchain::Blockchain;
use ticketchain::cli::{render_chain, render_receipt};
use ticketchain::config::load_config;
use ticketchain::issue_ticket;
use ticketchain::miner::expected_attempts;
use tracing::info;

#[derive(Parser)]
#[command(name = "ticketchain", version, about = "Proof-of-work ticket ledger")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, default_value = "ticketchain.toml")]
    config: PathBuf,

    /// Override the configured difficulty (leading hex zeros per block hash)
    #[arg(long)]
    difficulty: Option<u32>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Issue the configured demo tickets and print the explorer view
    Demo,
    /// Issue one ticket on a fresh ledger
    Issue {
        event: String,
        buyer: String,
        /// Print the receipt as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let mut config = load_config(&cli.config)?;
    if let Some(difficulty) = cli.difficulty {
        config.ledger.difficulty = difficulty;
        config.validate()?;
    }

    let mut chain = Blockchain::from_config(&config.ledger);
    info!(
        difficulty = chain.difficulty(),
        expected_attempts = expected_attempts(chain.difficulty()),
        "ledger ready"
    );

    match cli.command {
        Command::Demo => {
            for entry in &config.demo.events {
                let started = Instant::now();
                let receipt = issue_ticket(&mut chain, &entry.event, &entry.buyer);
                println!();
                print!("{}", render_receipt(&receipt));
                println!("  Mining Time: {:.3} seconds", started.elapsed().as_secs_f64());
            }
            println!();
            print!("{}", render_chain(&chain));
        }
        Command::Issue { event, buyer, json } => {
            let receipt = issue_ticket(&mut chain, &event, &buyer);
            if json {
                println!("{}", serde_json::to_string_pretty(&receipt)?);
            } else {
                print!("{}", render_receipt(&receipt));
            }
        }
    }

    if let Err(e) = chain.verify_chain() {
        eprintln!("{}", "Chain failed integrity audit".red().bold());
        return Err(e.into());
    }

    Ok(())
}
