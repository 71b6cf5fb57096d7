// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table actor.
use anyhow::Result;
use log::{error, info};
use rand::rngs::StdRng;
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    time,
};

use cardroom_core::{action::Action, error::GameResult, poker::TableId, round::RoundState};

use crate::{config::TableConfig, events::TableEvent, state::State};

/// A table that runs hands between a human and bots.
///
/// The table state is owned by a task, commands are sent over a channel and
/// the table reports what happens with [TableEvent]s.
#[derive(Debug)]
pub struct Table {
    /// This table identifier.
    table_id: TableId,
    /// Channel for sending commands.
    commands_tx: mpsc::Sender<TableCommand>,
}

/// Command for the table task.
#[derive(Debug)]
enum TableCommand {
    /// Start a new hand.
    StartHand {
        resp_tx: oneshot::Sender<GameResult<()>>,
    },
    /// A player action.
    Action {
        seat: usize,
        action: Action,
        resp_tx: oneshot::Sender<GameResult<()>>,
    },
    /// Get a copy of the round state.
    Snapshot {
        resp_tx: oneshot::Sender<RoundState>,
    },
}

impl Table {
    /// Creates a new table and spawns its task.
    pub fn new(config: TableConfig, events_tx: mpsc::Sender<TableEvent>) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_state(State::new(config, events_tx)))
    }

    /// Creates a new table with user initialized randomness.
    pub fn with_rng(
        config: TableConfig,
        events_tx: mpsc::Sender<TableEvent>,
        rng: StdRng,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_state(State::with_rng(config, events_tx, rng)))
    }

    /// Spawns a task that runs the given state.
    pub fn from_state(state: State) -> Self {
        let (commands_tx, commands_rx) = mpsc::channel(128);
        let table_id = state.table_id();

        let mut task = TableTask { state, commands_rx };

        tokio::spawn(async move {
            if let Err(err) = task.run().await {
                error!("Table {table_id} error {err}");
            }

            info!("Table task for table {table_id} stopped");
        });

        Self {
            table_id,
            commands_tx,
        }
    }

    /// This table identifier.
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// Starts a new hand.
    ///
    /// Returns error if a hand is in progress or there are not enough players
    /// with chips.
    pub async fn start_hand(&self) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.commands_tx
            .send(TableCommand::StartHand { resp_tx })
            .await?;
        Ok(resp_rx.await??)
    }

    /// Submits an action for the given seat.
    ///
    /// Returns a [GameError](cardroom_core::error::GameError) if it is not the
    /// seat turn or the action is not legal.
    pub async fn submit_action(&self, seat: usize, action: Action) -> Result<()> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.commands_tx
            .send(TableCommand::Action {
                seat,
                action,
                resp_tx,
            })
            .await?;
        Ok(resp_rx.await??)
    }

    /// A copy of the round state.
    pub async fn snapshot(&self) -> Result<RoundState> {
        let (resp_tx, resp_rx) = oneshot::channel();
        self.commands_tx
            .send(TableCommand::Snapshot { resp_tx })
            .await?;
        Ok(resp_rx.await?)
    }
}

struct TableTask {
    /// The table state.
    state: State,
    /// Channel for receiving table commands.
    commands_rx: mpsc::Receiver<TableCommand>,
}

impl TableTask {
    const TICK: Duration = Duration::from_millis(500);

    async fn run(&mut self) -> Result<()> {
        let mut ticks = time::interval(Self::TICK);

        loop {
            tokio::select! {
                _ = ticks.tick() => {
                    self.state.tick().await?;
                }
                res = self.commands_rx.recv() => match res {
                    Some(TableCommand::StartHand { resp_tx }) => {
                        let res = self.state.start_hand().await;
                        let started = res.is_ok();
                        let _ = resp_tx.send(res);

                        if started {
                            self.state.play().await?;
                        }
                    }
                    Some(TableCommand::Action { seat, action, resp_tx }) => {
                        let res = self.state.submit_action(seat, action).await;
                        let accepted = res.is_ok();
                        let _ = resp_tx.send(res);

                        if accepted {
                            self.state.play().await?;
                        }
                    }
                    Some(TableCommand::Snapshot { resp_tx }) => {
                        let _ = resp_tx.send(self.state.round().clone());
                    }
                    // All table handles dropped.
                    None => break Ok(()),
                },
            }
        }
    }
}
