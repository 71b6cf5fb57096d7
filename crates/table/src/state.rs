// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Table state types.
use ahash::AHashMap;
use anyhow::{Result, anyhow};
use log::{debug, info, warn};
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::time::Instant;
use tokio::{sync::mpsc, time};

use cardroom_bot::{BotView, HeuristicBot, Strategy};
use cardroom_core::{
    action::Action,
    error::{GameError, GameResult},
    player::Player,
    poker::{Chips, Deck, TableId},
    round::{Phase, RoundState},
};

use crate::{config::TableConfig, events::TableEvent};

/// Internal table state.
///
/// The state owns the round state and drives a hand from the blinds to the
/// payouts: bots act in turn until a human has to act or the hand is over.
pub struct State {
    table_id: TableId,
    config: TableConfig,
    round: RoundState,
    deck: Deck,
    next_deck: Option<Deck>,
    bots: AHashMap<usize, Box<dyn Strategy>>,
    events_tx: mpsc::Sender<TableEvent>,
    hands: u64,
    action_timer: Option<Instant>,
    rng: StdRng,
}

impl State {
    /// Create a new state.
    pub fn new(config: TableConfig, events_tx: mpsc::Sender<TableEvent>) -> Self {
        Self::with_rng(config, events_tx, StdRng::from_os_rng())
    }

    /// Create a new state with user initialized randomness.
    pub fn with_rng(
        config: TableConfig,
        events_tx: mpsc::Sender<TableEvent>,
        mut rng: StdRng,
    ) -> Self {
        let players = (0..config.seats)
            .map(|seat| {
                let name = config.player_name(seat);
                if config.human_seat == Some(seat) {
                    Player::human(name, config.starting_chips)
                } else {
                    Player::bot(name, config.starting_chips)
                }
            })
            .collect();

        let bots = (0..config.seats)
            .filter(|seat| config.human_seat != Some(*seat))
            .map(|seat| {
                let bot_rng = StdRng::seed_from_u64(rng.random());
                let bot: Box<dyn Strategy> = Box::new(HeuristicBot::new(bot_rng, config.bot));
                (seat, bot)
            })
            .collect();

        let mut round = RoundState::new(players, config.small_blind, config.big_blind)
            .with_max_street_steps(config.max_street_steps);
        round.set_dealer(config.dealer);

        Self {
            table_id: TableId::new_id(),
            config,
            round,
            deck: Deck::default(),
            next_deck: None,
            bots,
            events_tx,
            hands: 0,
            action_timer: None,
            rng,
        }
    }

    /// This table identifier.
    pub fn table_id(&self) -> TableId {
        self.table_id
    }

    /// The round state.
    pub fn round(&self) -> &RoundState {
        &self.round
    }

    /// Number of hands started.
    pub fn hands(&self) -> u64 {
        self.hands
    }

    /// Replaces the strategy of a bot seat.
    pub fn set_strategy(&mut self, seat: usize, strategy: Box<dyn Strategy>) {
        if let Some(bot) = self.bots.get_mut(&seat) {
            *bot = strategy;
        }
    }

    /// Deals the next hand from the given deck instead of a shuffled one.
    pub fn stack_deck(&mut self, deck: Deck) {
        self.next_deck = Some(deck);
    }

    /// Starts a new hand: replenishes the players, moves the button, posts the
    /// blinds and deals the hole cards.
    ///
    /// Call [State::play] to run the hand until a human has to act.
    pub async fn start_hand(&mut self) -> GameResult<()> {
        if self.round.phase() != Phase::WaitForHand {
            return Err(GameError::HandInProgress);
        }

        self.replenish().await;

        // The first hand keeps the configured button.
        if self.hands > 0 {
            self.round.rotate_dealer();
        }

        self.round.start_hand()?;
        self.hands += 1;

        // A fresh deck for each hand.
        self.deck = match self.next_deck.take() {
            Some(deck) => deck,
            None => Deck::new_and_shuffled(&mut self.rng),
        };

        self.round.deal_hole_cards(&mut self.deck)?;

        info!(
            "Table {} hand {} dealer {}",
            self.table_id,
            self.hands,
            self.round.dealer()
        );

        let stacks = self.round.players().iter().map(|p| p.chips).collect();
        self.send(TableEvent::HandStarted {
            hand: self.hands,
            dealer: self.round.dealer(),
            stacks,
        })
        .await;

        for seat in 0..self.round.players().len() {
            let player = &self.round.players()[seat];
            if player.folded {
                continue;
            }

            let cards = if player.is_bot {
                player.hole_cards.covered()
            } else {
                player.hole_cards
            };

            self.send(TableEvent::CardsDealt { seat, cards }).await;
        }

        Ok(())
    }

    /// Handles an action from the player whose turn it is.
    ///
    /// The action is rejected if it is not the player turn, the seat is played
    /// by a bot or it is not legal, the state is left unchanged. Call
    /// [State::play] to continue the hand.
    pub async fn submit_action(&mut self, seat: usize, action: Action) -> GameResult<()> {
        if self.bots.contains_key(&seat) {
            return Err(GameError::BotSeat(seat));
        }

        self.apply(seat, action).await?;
        self.action_timer = None;
        Ok(())
    }

    /// Runs the hand until a human player has to act or the hand is over.
    pub async fn play(&mut self) -> Result<()> {
        loop {
            match self.round.phase() {
                Phase::WaitForHand => return Ok(()),
                Phase::Showdown | Phase::HandResolved => {
                    self.end_hand().await?;
                    return Ok(());
                }
                _ => {}
            }

            // Deal streets until there is someone to act or the hand is over.
            if self.round.is_street_complete() {
                let phase = self.round.advance(&mut self.deck)?;
                if let Some(street) = phase.street() {
                    debug!("Table {} dealt {street:?}", self.table_id);
                    self.send(TableEvent::StreetAdvanced {
                        street,
                        board: self.round.board().to_vec(),
                    })
                    .await;
                }
                continue;
            }

            let seat = self
                .round
                .current_player()
                .ok_or_else(|| anyhow!("No player to act"))?;
            let legal = self
                .round
                .legal_actions(seat)
                .ok_or_else(|| anyhow!("No legal actions for seat {seat}"))?;

            self.send(TableEvent::BettingTurn {
                seat,
                legal,
                amount_to_call: self.round.amount_to_call(seat),
            })
            .await;

            let delay = self.config.bot_delay;
            let action = match self.bots.get_mut(&seat) {
                Some(bot) => {
                    if !delay.is_zero() {
                        time::sleep(delay).await;
                    }

                    let view = BotView::from_round(&self.round, seat)
                        .ok_or_else(|| anyhow!("Seat {seat} has no cards"))?;
                    bot.decide(&view)
                }
                None => {
                    // Wait for the human player.
                    self.action_timer = self.config.action_timeout.map(|_| Instant::now());
                    return Ok(());
                }
            };

            if let Err(err) = self.apply(seat, action).await {
                warn!("Bot {seat} action {action} rejected: {err}");

                let fallback = if legal.check {
                    Action::Check
                } else {
                    Action::Fold
                };
                self.apply(seat, fallback).await?;
            }
        }
    }

    /// Folds a human player that has not acted in time.
    pub async fn tick(&mut self) -> Result<()> {
        let (Some(timeout), Some(timer)) = (self.config.action_timeout, self.action_timer) else {
            return Ok(());
        };

        if timer.elapsed() < timeout {
            return Ok(());
        }

        self.action_timer = None;
        if let Some(seat) = self.round.current_player() {
            info!("Table {} seat {seat} action timed out", self.table_id);
            self.submit_action(seat, Action::Fold).await?;
            self.play().await?;
        }

        Ok(())
    }

    async fn apply(&mut self, seat: usize, action: Action) -> GameResult<()> {
        self.round.submit(seat, action)?;

        let player = &self.round.players()[seat];
        let event = TableEvent::ActionTaken {
            seat,
            action: player.action,
            bet: player.street_bet,
            chips: player.chips,
            pot: self.round.pot(),
        };

        self.send(event).await;
        Ok(())
    }

    async fn end_hand(&mut self) -> Result<()> {
        let settlement = self.round.settle()?;

        for payout in &settlement.payouts {
            info!(
                "Table {} seat {} wins {}",
                self.table_id, payout.seat, payout.chips
            );
        }

        self.action_timer = None;
        self.send(TableEvent::HandResolved {
            winners: settlement.winners,
            payouts: settlement.payouts,
            revealed: settlement.revealed,
        })
        .await;

        Ok(())
    }

    /// Tops up busted humans and short bots to the starting chips.
    async fn replenish(&mut self) {
        for seat in 0..self.round.players().len() {
            let player = &self.round.players()[seat];
            let depleted = if player.is_bot {
                player.chips < self.config.bot_min_chips
            } else {
                player.chips == Chips::ZERO
            };

            if !depleted {
                continue;
            }

            if let Some(added) = self.round.top_up(seat, self.config.starting_chips) {
                info!("Table {} seat {seat} replenished with {added}", self.table_id);
                self.send(TableEvent::PlayerReplenished {
                    seat,
                    added,
                    chips: self.config.starting_chips,
                })
                .await;
            }
        }
    }

    async fn send(&mut self, event: TableEvent) {
        let _ = self.events_tx.send(event).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardroom_core::{
        action::PlayerAction,
        poker::{Card, PlayerCards},
        round::Payout,
    };
    use std::time::Duration;

    /// A bot that calls any bet.
    struct AlwaysCall;

    impl Strategy for AlwaysCall {
        fn decide(&mut self, view: &BotView) -> Action {
            if view.amount_to_call > Chips::ZERO {
                Action::Call
            } else {
                Action::Check
            }
        }
    }

    /// A bot that folds to any bet.
    struct AlwaysFold;

    impl Strategy for AlwaysFold {
        fn decide(&mut self, view: &BotView) -> Action {
            if view.amount_to_call > Chips::ZERO {
                Action::Fold
            } else {
                Action::Check
            }
        }
    }

    /// A bot that tries to check facing a bet.
    struct AlwaysCheck;

    impl Strategy for AlwaysCheck {
        fn decide(&mut self, _view: &BotView) -> Action {
            Action::Check
        }
    }

    fn config() -> TableConfig {
        TableConfig {
            bot_delay: Duration::ZERO,
            ..TableConfig::default()
        }
    }

    // Creates a `State` with seeded randomness.
    fn new_state(config: TableConfig) -> (State, mpsc::Receiver<TableEvent>) {
        let (events_tx, events_rx) = mpsc::channel(4096);
        let rng = StdRng::seed_from_u64(13);
        (State::with_rng(config, events_tx, rng), events_rx)
    }

    fn with_bots<F>(state: &mut State, f: F)
    where
        F: Fn() -> Box<dyn Strategy>,
    {
        for seat in 0..state.round().players().len() {
            state.set_strategy(seat, f());
        }
    }

    fn set_stacks(state: &mut State, stacks: &[u32]) {
        let players = stacks
            .iter()
            .enumerate()
            .map(|(seat, chips)| {
                let name = state.config.player_name(seat);
                let chips = Chips::new(*chips);
                if state.config.human_seat == Some(seat) {
                    Player::human(name, chips)
                } else {
                    Player::bot(name, chips)
                }
            })
            .collect::<Vec<_>>();

        state.round = RoundState::new(players, state.config.small_blind, state.config.big_blind);
    }

    /// Deck that deals the given cards in order.
    fn stacked(s: &str) -> Deck {
        let mut cards = s
            .split_whitespace()
            .map(|c| c.parse::<Card>().unwrap())
            .collect::<Vec<_>>();
        cards.reverse();
        Deck::from_cards(cards)
    }

    fn drain(rx: &mut mpsc::Receiver<TableEvent>) -> Vec<TableEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn chips(state: &State) -> Vec<u32> {
        state
            .round()
            .players()
            .iter()
            .map(|p| p.chips.amount())
            .collect()
    }

    // Hole cards are dealt from the seat after the dealer: seat 1, 2, 0 twice.
    const ACES_HOLD: &str = "7C 8H AS 2D 3S AH KD 9C 4H 5S JD";

    #[tokio::test]
    async fn aces_all_in_called_by_two_bots() {
        let (mut state, mut rx) = new_state(config());
        with_bots(&mut state, || Box::new(AlwaysCall));
        state.stack_deck(stacked(ACES_HOLD));

        state.start_hand().await.unwrap();
        state.play().await.unwrap();

        // Blinds posted, the human under the gun acts first.
        assert_eq!(chips(&state), vec![200, 199, 198]);
        assert_eq!(state.round().current_player(), Some(0));

        let events = drain(&mut rx);
        assert!(matches!(
            events[0],
            TableEvent::HandStarted {
                hand: 1,
                dealer: 0,
                ..
            }
        ));
        assert!(events.contains(&TableEvent::CardsDealt {
            seat: 0,
            cards: PlayerCards::Cards("AS".parse().unwrap(), "AH".parse().unwrap()),
        }));
        assert!(events.contains(&TableEvent::CardsDealt {
            seat: 1,
            cards: PlayerCards::Covered,
        }));
        assert!(matches!(
            events.last(),
            Some(TableEvent::BettingTurn { seat: 0, .. })
        ));

        state
            .submit_action(0, Action::Raise(Chips::new(200)))
            .await
            .unwrap();
        state.play().await.unwrap();

        assert_eq!(chips(&state), vec![600, 0, 0]);
        assert_eq!(state.round().phase(), Phase::WaitForHand);

        let events = drain(&mut rx);
        let streets = events
            .iter()
            .filter(|e| matches!(e, TableEvent::StreetAdvanced { .. }))
            .count();
        assert_eq!(streets, 3);

        let Some(TableEvent::HandResolved {
            winners,
            payouts,
            revealed,
        }) = events.last()
        else {
            panic!("Unexpected events {events:?}");
        };

        assert_eq!(winners, &vec![0]);
        assert_eq!(
            payouts,
            &vec![Payout {
                seat: 0,
                chips: Chips::new(600)
            }]
        );
        assert_eq!(revealed.len(), 3);

        // Busted bots are replenished on the next hand, the button moves.
        state.start_hand().await.unwrap();
        let events = drain(&mut rx);
        for seat in [1, 2] {
            assert!(events.contains(&TableEvent::PlayerReplenished {
                seat,
                added: Chips::new(200),
                chips: Chips::new(200),
            }));
        }
        assert_eq!(state.round().dealer(), 1);
        assert_eq!(state.hands(), 2);
    }

    #[tokio::test]
    async fn last_player_wins_without_showdown() {
        let (mut state, mut rx) = new_state(config());
        with_bots(&mut state, || Box::new(AlwaysFold));

        state.start_hand().await.unwrap();
        state.play().await.unwrap();
        state
            .submit_action(0, Action::Raise(Chips::new(10)))
            .await
            .unwrap();
        state.play().await.unwrap();

        assert_eq!(chips(&state), vec![203, 199, 198]);

        let events = drain(&mut rx);
        assert!(
            !events
                .iter()
                .any(|e| matches!(e, TableEvent::StreetAdvanced { .. }))
        );
        assert!(matches!(
            events.last(),
            Some(TableEvent::HandResolved { winners, revealed, .. })
                if winners == &vec![0] && revealed.is_empty()
        ));
    }

    #[tokio::test]
    async fn board_plays_splits_the_pot() {
        let config = TableConfig {
            human_seat: None,
            ..config()
        };
        let (mut state, mut rx) = new_state(config);
        with_bots(&mut state, || Box::new(AlwaysCall));
        state.stack_deck(stacked("2C 3H 4D 7S 8D 9C TC JD QH KC AD"));

        state.start_hand().await.unwrap();
        state.play().await.unwrap();

        // Everybody limps and the board straight ties the hand.
        assert_eq!(chips(&state), vec![200, 200, 200]);

        let events = drain(&mut rx);
        let Some(TableEvent::HandResolved { winners, .. }) = events.last() else {
            panic!("Unexpected events {events:?}");
        };
        assert_eq!(winners, &vec![0, 1, 2]);
    }

    #[tokio::test]
    async fn out_of_turn_action_is_rejected() {
        let (mut state, _rx) = new_state(config());
        with_bots(&mut state, || Box::new(AlwaysCall));

        state.start_hand().await.unwrap();
        state.play().await.unwrap();

        let pot = state.round().pot();
        assert_eq!(
            state.submit_action(1, Action::Call).await,
            Err(GameError::NotYourTurn {
                seat: 1,
                expected: Some(0)
            })
        );
        assert_eq!(
            state.submit_action(0, Action::Check).await,
            Err(GameError::CannotCheck {
                to_call: Chips::new(2)
            })
        );
        assert_eq!(state.round().pot(), pot);
        assert_eq!(state.round().current_player(), Some(0));

        // A hand cannot start while one is in progress.
        assert_eq!(state.start_hand().await, Err(GameError::HandInProgress));
    }

    #[tokio::test]
    async fn actions_for_bot_seats_are_rejected() {
        let config = TableConfig {
            dealer: 1,
            ..config()
        };
        let (mut state, _rx) = new_state(config);
        with_bots(&mut state, || Box::new(AlwaysCall));

        // With the button on seat 1 the dealer bot is first to act.
        state.start_hand().await.unwrap();
        assert_eq!(state.round().current_player(), Some(1));

        let pot = state.round().pot();
        assert_eq!(
            state.submit_action(1, Action::Fold).await,
            Err(GameError::BotSeat(1))
        );
        assert!(!state.round().player(1).unwrap().folded);
        assert_eq!(state.round().pot(), pot);

        // The bots play up to the human.
        state.play().await.unwrap();
        assert_eq!(state.round().current_player(), Some(0));
    }

    #[tokio::test]
    async fn replenish_short_bots_and_busted_humans() {
        let config = TableConfig {
            seats: 4,
            ..config()
        };
        let (mut state, mut rx) = new_state(config);
        with_bots(&mut state, || Box::new(AlwaysFold));

        // A busted human, a short bot, a bot at the minimum, a bot above it.
        set_stacks(&mut state, &[0, 5, 20, 150]);

        state.start_hand().await.unwrap();

        let replenished = drain(&mut rx)
            .into_iter()
            .filter(|e| matches!(e, TableEvent::PlayerReplenished { .. }))
            .collect::<Vec<_>>();
        assert_eq!(
            replenished,
            vec![
                TableEvent::PlayerReplenished {
                    seat: 0,
                    added: Chips::new(200),
                    chips: Chips::new(200),
                },
                TableEvent::PlayerReplenished {
                    seat: 1,
                    added: Chips::new(195),
                    chips: Chips::new(200),
                },
            ]
        );

        // Stacks before the blinds, seat 1 posts the small and seat 2 the big.
        let stacks = state
            .round()
            .players()
            .iter()
            .map(|p| (p.chips + p.hand_bet).amount())
            .collect::<Vec<_>>();
        assert_eq!(stacks, vec![200, 200, 20, 150]);
    }

    #[tokio::test]
    async fn human_with_chips_keeps_the_stack() {
        let (mut state, mut rx) = new_state(config());
        with_bots(&mut state, || Box::new(AlwaysFold));

        set_stacks(&mut state, &[7, 200, 200]);
        state.start_hand().await.unwrap();

        assert!(
            !drain(&mut rx)
                .iter()
                .any(|e| matches!(e, TableEvent::PlayerReplenished { .. }))
        );

        let human = state.round().player(0).unwrap();
        assert_eq!(human.chips + human.hand_bet, Chips::new(7));
    }

    #[tokio::test]
    async fn rejected_bot_action_falls_back() {
        let config = TableConfig {
            human_seat: None,
            ..config()
        };
        let (mut state, _rx) = new_state(config);
        with_bots(&mut state, || Box::new(AlwaysCheck));

        state.start_hand().await.unwrap();
        state.play().await.unwrap();

        // The dealer cannot check the big blind and folds, so does the small
        // blind, the big blind wins.
        assert_eq!(chips(&state), vec![200, 199, 201]);
    }

    #[tokio::test]
    async fn action_timeout_folds_human() {
        let config = TableConfig {
            action_timeout: Some(Duration::ZERO),
            ..config()
        };
        let (mut state, mut rx) = new_state(config);
        with_bots(&mut state, || Box::new(AlwaysCall));
        state.stack_deck(stacked(ACES_HOLD));

        state.start_hand().await.unwrap();
        state.play().await.unwrap();
        state.tick().await.unwrap();

        assert!(state.round().player(0).unwrap().folded);
        assert!(drain(&mut rx).iter().any(|e| matches!(
            e,
            TableEvent::ActionTaken {
                seat: 0,
                action: PlayerAction::Fold,
                ..
            }
        )));
    }

    #[tokio::test]
    async fn sessions_conserve_chips() {
        let config = TableConfig {
            human_seat: None,
            ..config()
        };
        let (mut state, mut rx) = new_state(config);

        let mut total = 600;
        for _ in 0..300 {
            state.start_hand().await.unwrap();
            state.play().await.unwrap();
            assert_eq!(state.round().phase(), Phase::WaitForHand);

            for event in drain(&mut rx) {
                if let TableEvent::PlayerReplenished { added, .. } = event {
                    total += added.amount();
                }
            }

            assert_eq!(chips(&state).iter().sum::<u32>(), total);
        }
    }
}
