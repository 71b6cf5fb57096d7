// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Terminal I/O.
use anyhow::{Result, anyhow, bail};
use crossterm::style::Stylize;
use tokio::{
    io::{AsyncBufReadExt, BufReader, Lines, Stdin},
    sync::mpsc,
};

use cardroom_table::{
    Table, TableConfig, TableEvent,
    core::{
        action::{Action, LegalActions, PlayerAction},
        error::GameError,
        poker::{Card, Chips, PlayerCards},
    },
};

/// Runs hands until the player quits or the given number of hands is played.
pub async fn run(config: TableConfig, hands: Option<u64>) -> Result<()> {
    let human_seat = config.human_seat;
    let (events_tx, mut events_rx) = mpsc::channel(256);
    let table = Table::new(config, events_tx)?;

    let round = table.snapshot().await?;
    let names = round
        .players()
        .iter()
        .map(|p| p.name.clone())
        .collect::<Vec<_>>();

    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut played = 0;

    println!(
        "{}",
        format!("Blinds {}/{}", round.small_blind(), round.big_blind()).bold()
    );
    println!("{}", "Commands: f(old) c(heck/call) r(aise) <to> a(ll in) q(uit)".dark_grey());

    while hands.is_none_or(|n| played < n) {
        table.start_hand().await?;
        played += 1;

        loop {
            let event = events_rx
                .recv()
                .await
                .ok_or_else(|| anyhow!("Table closed"))?;

            if let Some(text) = format_event(&event, &names) {
                println!("{text}");
            }

            match event {
                TableEvent::BettingTurn { seat, legal, .. } if Some(seat) == human_seat => {
                    if !prompt(&table, seat, &legal, &mut input).await? {
                        return Ok(());
                    }
                }
                TableEvent::HandResolved { .. } => break,
                _ => {}
            }
        }

        let round = table.snapshot().await?;
        let stacks = round
            .players()
            .iter()
            .map(|p| format!("{} {}", p.name, p.chips))
            .collect::<Vec<_>>()
            .join(", ");
        println!("{}", stacks.dark_cyan());
    }

    Ok(())
}

/// Reads actions until one is accepted, returns false if the player quits.
async fn prompt(
    table: &Table,
    seat: usize,
    legal: &LegalActions,
    input: &mut Lines<BufReader<Stdin>>,
) -> Result<bool> {
    loop {
        println!("{}", format_legal(legal).yellow());

        let Some(line) = input.next_line().await? else {
            return Ok(false);
        };

        if line.trim() == "q" {
            return Ok(false);
        }

        let action = match parse_action(&line, legal) {
            Ok(action) => action,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        match table.submit_action(seat, action).await {
            Ok(()) => return Ok(true),
            Err(e) => {
                println!("{}", e.to_string().red());

                // The table has moved on, the player timed out.
                if matches!(
                    e.downcast_ref::<GameError>(),
                    Some(GameError::NotYourTurn { .. } | GameError::NoBettingRound)
                ) {
                    return Ok(true);
                }
            }
        }
    }
}

/// Parses a player command.
fn parse_action(line: &str, legal: &LegalActions) -> Result<Action> {
    let mut tokens = line.split_whitespace();
    let Some(cmd) = tokens.next() else {
        bail!("Enter an action");
    };

    let action = match cmd.to_lowercase().as_str() {
        "f" | "fold" => Action::Fold,
        "c" if legal.check => Action::Check,
        "c" | "call" => Action::Call,
        "check" => Action::Check,
        "a" | "allin" => {
            let range = legal.raise.ok_or_else(|| anyhow!("Cannot raise"))?;
            Action::Raise(range.max)
        }
        "r" | "raise" | "b" | "bet" => {
            let range = legal.raise.ok_or_else(|| anyhow!("Cannot raise"))?;
            let to = match tokens.next() {
                Some(amount) => Chips::new(amount.parse()?),
                None => range.min,
            };
            Action::Raise(to)
        }
        _ => bail!("Unknown command {cmd}"),
    };

    if !legal.allows(action) {
        bail!("Action {action} is not allowed");
    }

    Ok(action)
}

fn format_legal(legal: &LegalActions) -> String {
    let mut actions = vec!["fold".to_string()];
    if legal.check {
        actions.push("check".to_string());
    }

    if let Some(chips) = legal.call {
        actions.push(format!("call {chips}"));
    }

    if let Some(range) = legal.raise {
        actions.push(format!("raise {}..{}", range.min, range.max));
    }

    actions.join(" | ")
}

/// A card with its suit symbol, like `A♠`.
fn format_card(card: Card) -> String {
    format!("{}{}", card.rank(), card.suit().symbol())
}

fn format_event(event: &TableEvent, names: &[String]) -> Option<String> {
    let name = |seat: usize| names.get(seat).map(String::as_str).unwrap_or("?");

    let text = match event {
        TableEvent::HandStarted { hand, dealer, .. } => {
            format!("Hand {hand}, {} has the button", name(*dealer))
                .bold()
                .to_string()
        }
        TableEvent::CardsDealt {
            seat,
            cards: PlayerCards::Cards(c1, c2),
        } => format!(
            "{} dealt {} {}",
            name(*seat),
            format_card(*c1),
            format_card(*c2)
        )
        .green()
        .to_string(),
        TableEvent::ActionTaken {
            seat, action, bet, ..
        } => match action {
            PlayerAction::Fold | PlayerAction::Check => {
                format!("{} {}", name(*seat), action.label())
            }
            _ => format!("{} {} {bet}", name(*seat), action.label()),
        },
        TableEvent::StreetAdvanced { street, board } => {
            let board = board.iter().map(|c| format_card(*c)).collect::<Vec<_>>();
            format!("{street:?} {}", board.join(" ")).dark_green().to_string()
        }
        TableEvent::HandResolved {
            payouts, revealed, ..
        } => {
            let mut lines = revealed
                .iter()
                .map(|h| {
                    format!(
                        "{} shows {} {} {}",
                        name(h.seat),
                        format_card(h.cards.0),
                        format_card(h.cards.1),
                        h.value.rank()
                    )
                })
                .collect::<Vec<_>>();

            lines.extend(
                payouts
                    .iter()
                    .map(|p| format!("{} wins {}", name(p.seat), p.chips).magenta().to_string()),
            );
            lines.join("\n")
        }
        TableEvent::PlayerReplenished { seat, chips, .. } => {
            format!("{} rebuys to {chips}", name(*seat))
        }
        _ => return None,
    };

    Some(text)
}
