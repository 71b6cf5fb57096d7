// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardroom terminal game.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]
use anyhow::Result;
use clap::Parser;
use log::error;
use std::time::Duration;

use cardroom_table::{TableConfig, core::poker::Chips};

mod terminal;

#[derive(Debug, Parser)]
struct Cli {
    /// The player name.
    #[clap(long, short, default_value = "You")]
    name: String,
    /// Chips each player starts with.
    #[clap(long, short, default_value_t = 200)]
    chips: u32,
    /// The small blind.
    #[clap(long, default_value_t = 1)]
    small_blind: u32,
    /// The big blind.
    #[clap(long, default_value_t = 2)]
    big_blind: u32,
    /// Number of seats at the table.
    #[clap(long, default_value_t = 3, value_parser = clap::value_parser!(u8).range(2..=9))]
    seats: u8,
    /// Number of hands to play, 0 to play until quit.
    #[clap(long, default_value_t = 0)]
    hands: u64,
    /// Pause before each bot action in milliseconds.
    #[clap(long, default_value_t = 600)]
    bot_delay_ms: u64,
    /// Fold the player if it does not act within this many seconds.
    #[clap(long)]
    action_timeout: Option<u64>,
    /// Let bots play all the seats.
    #[clap(long)]
    autoplay: bool,
}

#[tokio::main]
async fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_target(false)
        .format_timestamp_millis()
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        error!("{e}");
    }
}

async fn run(cli: Cli) -> Result<()> {
    let big_blind = Chips::new(cli.big_blind);
    let config = TableConfig {
        seats: cli.seats as usize,
        human_seat: (!cli.autoplay).then_some(0),
        player_name: cli.name,
        small_blind: Chips::new(cli.small_blind),
        big_blind,
        starting_chips: Chips::new(cli.chips),
        bot_min_chips: big_blind * 10,
        bot_delay: Duration::from_millis(cli.bot_delay_ms),
        action_timeout: cli.action_timeout.map(Duration::from_secs),
        ..TableConfig::default()
    };

    config.validate()?;

    let hands = (cli.hands > 0).then_some(cli.hands);
    terminal::run(config, hands).await
}
