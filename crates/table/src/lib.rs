// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Cardroom table.
//!
//! A [Table] runs Texas Hold'em hands between a human player and bots. Each
//! table is a task that owns its [State], the human acts with
//! [Table::submit_action], the bots act through their
//! [Strategy](cardroom_bot::Strategy), and the table reports what happens as
//! [TableEvent]s.
#![warn(clippy::all, rust_2018_idioms, missing_docs)]

mod config;
pub use config::TableConfig;

mod events;
pub use events::TableEvent;

mod state;
pub use state::State;

mod table;
pub use table::Table;

pub use cardroom_bot as bot;
pub use cardroom_core as core;
