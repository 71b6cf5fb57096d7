// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table configuration.
use anyhow::{Result, bail};
use std::time::Duration;

use cardroom_bot::BotConfig;
use cardroom_core::{poker::Chips, round::MAX_STREET_STEPS};

/// Bot names by seat order.
pub(crate) static NICKNAMES: &[&str] = &[
    "Alice", "Bob", "Carol", "Dave", "Frank", "Mike", "Olivia", "Sam",
];

/// The table configuration.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Number of seats.
    pub seats: usize,
    /// The human player seat, `None` for a table of bots.
    pub human_seat: Option<usize>,
    /// The human player name.
    pub player_name: String,
    /// The small blind.
    pub small_blind: Chips,
    /// The big blind.
    pub big_blind: Chips,
    /// Chips each player starts with and is replenished to.
    pub starting_chips: Chips,
    /// Bots below this stack are replenished between hands.
    pub bot_min_chips: Chips,
    /// Pause before each bot action.
    pub bot_delay: Duration,
    /// Fold a human that does not act in time, disabled if `None`.
    pub action_timeout: Option<Duration>,
    /// Actions allowed on a street before it is forced to end.
    pub max_street_steps: u32,
    /// The dealer button seat for the first hand.
    pub dealer: usize,
    /// The bots policy.
    pub bot: BotConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        let big_blind = Chips::new(2);
        Self {
            seats: 3,
            human_seat: Some(0),
            player_name: "You".to_string(),
            small_blind: Chips::new(1),
            big_blind,
            starting_chips: Chips::new(200),
            bot_min_chips: big_blind * 10,
            bot_delay: Duration::from_millis(600),
            action_timeout: None,
            max_street_steps: MAX_STREET_STEPS,
            dealer: 0,
            bot: BotConfig::default(),
        }
    }
}

impl TableConfig {
    /// Checks the configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.seats < 2 || self.seats > NICKNAMES.len() + 1 {
            bail!("Seats must be between 2 and {}", NICKNAMES.len() + 1);
        }

        if self.human_seat.is_some_and(|seat| seat >= self.seats) {
            bail!("Human seat is not at the table");
        }

        if self.small_blind.is_zero() || self.big_blind < self.small_blind {
            bail!("Invalid blinds {}/{}", self.small_blind, self.big_blind);
        }

        if self.starting_chips < self.big_blind {
            bail!("Starting chips must cover the big blind");
        }

        if self.dealer >= self.seats {
            bail!("Dealer seat {} is not at the table", self.dealer);
        }

        Ok(())
    }

    /// The name of the player at the given seat.
    pub fn player_name(&self, seat: usize) -> String {
        if self.human_seat == Some(seat) {
            return self.player_name.clone();
        }

        // Bots take names in seat order skipping the human seat.
        let idx = match self.human_seat {
            Some(human) if human < seat => seat - 1,
            _ => seat,
        };

        NICKNAMES
            .get(idx)
            .map(|n| n.to_string())
            .unwrap_or_else(|| format!("Bot {seat}"))
    }
}
