// Copyright (C) 2025 Vince Vasta
// SPDX-License-Identifier: Apache-2.0

//! Hand round state and betting state machine.
//!
//! A [RoundState] is owned by the table orchestrator and moves through the
//! hand phases:
//!
//! ```text
//! PreflopBetting -> FlopBetting -> TurnBetting -> RiverBetting -> Showdown
//!        \______________\______________\_______________\________> HandResolved
//! ```
//!
//! Players act with [RoundState::submit], when a street completes the owner
//! calls [RoundState::advance] to deal the next street, and when the hand
//! reaches the showdown, or a single player is left, [RoundState::settle]
//! pays the pots.
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{
    action::{Action, LegalActions, PlayerAction, RaiseRange},
    error::{GameError, GameResult},
    player::Player,
    pots,
    poker::{Card, Chips, Deck, HandValue, PlayerCards},
};

/// Maximum number of actions on a single street before it is forced to end.
pub const MAX_STREET_STEPS: u32 = 60;

/// A betting street.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Street {
    /// Hole cards only.
    Preflop,
    /// Three board cards.
    Flop,
    /// Four board cards.
    Turn,
    /// Five board cards.
    River,
}

impl Street {
    /// The street after this one.
    pub fn next(&self) -> Option<Street> {
        match self {
            Street::Preflop => Some(Street::Flop),
            Street::Flop => Some(Street::Turn),
            Street::Turn => Some(Street::River),
            Street::River => None,
        }
    }

    /// The number of board cards dealt when this street starts.
    pub fn cards_dealt(&self) -> usize {
        match self {
            Street::Preflop => 0,
            Street::Flop => 3,
            Street::Turn | Street::River => 1,
        }
    }
}

/// The hand phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// No hand in progress.
    WaitForHand,
    /// Handle preflop betting.
    PreflopBetting,
    /// Handle flop betting.
    FlopBetting,
    /// Handle turn betting.
    TurnBetting,
    /// Handle river betting.
    RiverBetting,
    /// Compare hands and pay the pots.
    Showdown,
    /// One player left, the pot goes to that player.
    HandResolved,
}

impl Phase {
    /// The betting phase for a street.
    pub fn betting(street: Street) -> Phase {
        match street {
            Street::Preflop => Phase::PreflopBetting,
            Street::Flop => Phase::FlopBetting,
            Street::Turn => Phase::TurnBetting,
            Street::River => Phase::RiverBetting,
        }
    }

    /// The street for a betting phase.
    pub fn street(&self) -> Option<Street> {
        match self {
            Phase::PreflopBetting => Some(Street::Preflop),
            Phase::FlopBetting => Some(Street::Flop),
            Phase::TurnBetting => Some(Street::Turn),
            Phase::RiverBetting => Some(Street::River),
            _ => None,
        }
    }
}

/// The betting state of the current street.
///
/// `pending` holds the seats that still owe an action on this street, the
/// turn order comes from the seats order and not from the set order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BettingRoundState {
    /// The street being played.
    pub street: Street,
    /// Seats that still have to act.
    pub pending: BTreeSet<usize>,
    /// The highest street bet.
    pub current_bet: Chips,
    /// The minimum raise increment.
    pub min_raise: Chips,
    /// The seat to act.
    pub current_player: Option<usize>,
    /// The last seat that raised on this street.
    pub last_raiser: Option<usize>,
    /// Number of actions taken on this street.
    pub steps: u32,
}

impl BettingRoundState {
    fn new(street: Street) -> Self {
        Self {
            street,
            pending: BTreeSet::new(),
            current_bet: Chips::ZERO,
            min_raise: Chips::ZERO,
            current_player: None,
            last_raiser: None,
            steps: 0,
        }
    }
}

/// The state machine progress after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    /// The given seat is the next to act.
    NextToAct(usize),
    /// All players have acted, the street is over.
    StreetComplete,
    /// All players but one have folded.
    HandResolved,
}

/// A player hand shown at showdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RevealedHand {
    /// The player seat.
    pub seat: usize,
    /// The player hole cards.
    pub cards: (Card, Card),
    /// The best five cards hand.
    pub value: HandValue,
}

/// Chips paid to a player at the end of a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payout {
    /// The player seat.
    pub seat: usize,
    /// The chips won.
    pub chips: Chips,
}

/// The result of a hand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    /// The seats that won chips, in seat order.
    pub winners: Vec<usize>,
    /// The chips won by each winner.
    pub payouts: Vec<Payout>,
    /// The hands shown at showdown, empty when everybody else folded.
    pub revealed: Vec<RevealedHand>,
}

/// The table state of a hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundState {
    players: Vec<Player>,
    board: Vec<Card>,
    pot: Chips,
    dealer: usize,
    small_blind: Chips,
    big_blind: Chips,
    big_blind_seat: usize,
    phase: Phase,
    betting: BettingRoundState,
    max_street_steps: u32,
}

impl RoundState {
    /// Creates a state for the given players with the dealer button on seat 0.
    ///
    /// Panics if there are fewer than 2 players.
    pub fn new(players: Vec<Player>, small_blind: Chips, big_blind: Chips) -> Self {
        // There must be at least 2 seats.
        assert!(players.len() > 1, "at least 2 players");

        Self {
            players,
            board: Vec::with_capacity(5),
            pot: Chips::ZERO,
            dealer: 0,
            small_blind,
            big_blind,
            big_blind_seat: 0,
            phase: Phase::WaitForHand,
            betting: BettingRoundState::new(Street::Preflop),
            max_street_steps: MAX_STREET_STEPS,
        }
    }

    /// Sets the number of actions after which a street is forced to end.
    pub fn with_max_street_steps(mut self, steps: u32) -> Self {
        self.max_street_steps = steps.max(1);
        self
    }

    /// The players at the table.
    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// A player at the table.
    pub fn player(&self, seat: usize) -> Option<&Player> {
        self.players.get(seat)
    }

    /// The board cards.
    pub fn board(&self) -> &[Card] {
        &self.board
    }

    /// The chips committed in this hand.
    pub fn pot(&self) -> Chips {
        self.pot
    }

    /// The dealer button seat.
    pub fn dealer(&self) -> usize {
        self.dealer
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The current street betting state.
    pub fn betting(&self) -> &BettingRoundState {
        &self.betting
    }

    /// The seat whose turn it is.
    pub fn current_player(&self) -> Option<usize> {
        self.betting.current_player
    }

    /// The small blind amount.
    pub fn small_blind(&self) -> Chips {
        self.small_blind
    }

    /// The big blind amount.
    pub fn big_blind(&self) -> Chips {
        self.big_blind
    }

    /// Number of players still in the hand.
    pub fn count_active(&self) -> usize {
        self.players.iter().filter(|p| !p.folded).count()
    }

    /// Number of players who have chips.
    pub fn count_with_chips(&self) -> usize {
        self.players
            .iter()
            .filter(|p| p.chips > Chips::ZERO)
            .count()
    }

    /// Checks if the current street has no more players to act.
    pub fn is_street_complete(&self) -> bool {
        self.phase.street().is_some() && self.betting.pending.is_empty()
    }

    /// Checks if every player still in the hand matched the bet or is all in.
    pub fn bets_settled(&self) -> bool {
        self.players
            .iter()
            .filter(|p| p.can_act())
            .all(|p| p.street_bet == self.betting.current_bet)
    }

    /// The chips the given seat has to pay to call.
    pub fn amount_to_call(&self, seat: usize) -> Chips {
        self.players
            .get(seat)
            .map(|p| (self.betting.current_bet - p.street_bet).min(p.chips))
            .unwrap_or_default()
    }

    /// Moves the dealer button to the next player with chips.
    pub fn rotate_dealer(&mut self) {
        if let Some(seat) = self.next_seat(self.dealer, |p| p.chips > Chips::ZERO) {
            self.dealer = seat;
        }
    }

    /// Sets the dealer button seat.
    pub fn set_dealer(&mut self, seat: usize) {
        self.dealer = seat % self.players.len();
    }

    /// Tops up a player stack between hands, returns the chips added.
    pub fn top_up(&mut self, seat: usize, chips: Chips) -> Option<Chips> {
        if self.in_hand() {
            return None;
        }

        let player = self.players.get_mut(seat)?;
        if player.chips >= chips {
            return None;
        }

        let added = chips - player.chips;
        player.chips = chips;
        Some(added)
    }

    /// Starts a new hand: resets the players, posts the blinds and opens the
    /// preflop betting. Cards are dealt with [RoundState::deal_hole_cards].
    pub fn start_hand(&mut self) -> GameResult<()> {
        if self.in_hand() {
            return Err(GameError::HandInProgress);
        }

        if self.count_with_chips() < 2 {
            return Err(GameError::NotEnoughPlayers);
        }

        for player in &mut self.players {
            player.start_hand();
        }

        self.board.clear();
        self.pot = Chips::ZERO;

        // The button must be on a player in the hand.
        if self.players[self.dealer].folded {
            self.rotate_dealer();
        }

        // Heads up the dealer posts the small blind.
        let sb_seat = if self.count_active() == 2 {
            self.dealer
        } else {
            self.next_active(self.dealer)
        };
        let bb_seat = self.next_active(sb_seat);

        self.pot += self.players[sb_seat].bet(PlayerAction::SmallBlind, self.small_blind);
        self.pot += self.players[bb_seat].bet(PlayerAction::BigBlind, self.big_blind);
        self.big_blind_seat = bb_seat;

        debug!(
            "Hand started dealer {} small blind {} big blind {}",
            self.dealer, sb_seat, bb_seat
        );

        self.begin_street(Street::Preflop);
        Ok(())
    }

    /// Deals two cards to each player in the hand starting left of the dealer.
    pub fn deal_hole_cards(&mut self, deck: &mut Deck) -> GameResult<()> {
        let n = self.players.len();
        let mut hands = vec![Vec::with_capacity(2); n];

        for _ in 0..2 {
            for offset in 1..=n {
                let seat = (self.dealer + offset) % n;
                if !self.players[seat].folded {
                    hands[seat].push(deck.deal()?);
                }
            }
        }

        for (player, cards) in self.players.iter_mut().zip(hands) {
            if let [c1, c2] = cards.as_slice() {
                player.hole_cards = PlayerCards::Cards(*c1, *c2);
            }
        }

        Ok(())
    }

    /// Sets the hole cards for a player in the hand.
    pub fn set_hole_cards(&mut self, seat: usize, c1: Card, c2: Card) -> GameResult<()> {
        let player = self
            .players
            .get_mut(seat)
            .ok_or(GameError::InvalidSeat(seat))?;
        player.hole_cards = PlayerCards::Cards(c1, c2);
        Ok(())
    }

    /// The actions the given seat can take, `None` if it is not its turn.
    pub fn legal_actions(&self, seat: usize) -> Option<LegalActions> {
        if self.phase.street().is_none() || self.betting.current_player != Some(seat) {
            return None;
        }

        let player = self.players.get(seat)?;
        let current_bet = self.betting.current_bet;
        let to_call = current_bet - player.street_bet;
        let max = player.street_bet + player.chips;

        let raise = (max > current_bet).then(|| RaiseRange {
            min: (current_bet + self.betting.min_raise).min(max),
            max,
        });

        Some(LegalActions {
            check: to_call == Chips::ZERO,
            call: (to_call > Chips::ZERO).then(|| to_call.min(player.chips)),
            raise,
        })
    }

    /// Applies an action from the given seat.
    ///
    /// The action is validated before any change, an error leaves the state
    /// unchanged.
    pub fn submit(&mut self, seat: usize, action: Action) -> GameResult<Progress> {
        self.phase.street().ok_or(GameError::NoBettingRound)?;

        let player = self.players.get(seat).ok_or(GameError::InvalidSeat(seat))?;
        if player.folded {
            return Err(GameError::PlayerFolded(seat));
        }

        if self.betting.current_player != Some(seat) {
            return Err(GameError::NotYourTurn {
                seat,
                expected: self.betting.current_player,
            });
        }

        let current_bet = self.betting.current_bet;
        let to_call = current_bet - player.street_bet;

        match action {
            Action::Check if to_call > Chips::ZERO => {
                return Err(GameError::CannotCheck { to_call });
            }
            Action::Raise(target) => {
                if target <= current_bet {
                    return Err(GameError::RaiseNotAboveBet {
                        target,
                        current_bet,
                    });
                }

                let needed = target - player.street_bet;
                if needed > player.chips {
                    return Err(GameError::InsufficientChips {
                        target,
                        needed,
                        chips: player.chips,
                    });
                }

                // A short all in raise is allowed.
                let min = current_bet + self.betting.min_raise;
                if needed < player.chips && target < min {
                    return Err(GameError::RaiseTooSmall { target, min });
                }
            }
            _ => {}
        }

        debug!("Seat {seat} {action}");

        self.betting.steps += 1;
        let player = &mut self.players[seat];
        match action {
            Action::Fold => {
                player.fold();
                self.betting.pending.remove(&seat);
            }
            Action::Check => {
                player.action = PlayerAction::Check;
                self.betting.pending.remove(&seat);
            }
            Action::Call => {
                if to_call == Chips::ZERO {
                    player.action = PlayerAction::Check;
                } else {
                    self.pot += player.bet(PlayerAction::Call, current_bet);
                }
                self.betting.pending.remove(&seat);
            }
            Action::Raise(target) => {
                let label = if current_bet == Chips::ZERO {
                    PlayerAction::Bet
                } else {
                    PlayerAction::Raise
                };
                self.pot += player.bet(label, target);

                self.betting.min_raise = self.betting.min_raise.max(target - current_bet);
                self.betting.current_bet = target;
                self.betting.last_raiser = Some(seat);

                // Everybody else in the hand with chips must act again.
                self.betting.pending = self
                    .players
                    .iter()
                    .enumerate()
                    .filter(|(s, p)| *s != seat && p.can_act())
                    .map(|(s, _)| s)
                    .collect();
            }
        }

        Ok(self.progress(seat))
    }

    /// Moves to the next street once the current one is complete.
    ///
    /// Deals the board cards for the next street and opens its betting, after
    /// the river the hand moves to the showdown. With a single player left in
    /// the hand it moves to [Phase::HandResolved].
    pub fn advance(&mut self, deck: &mut Deck) -> GameResult<Phase> {
        let street = self.phase.street().ok_or(GameError::NoBettingRound)?;
        if !self.betting.pending.is_empty() {
            return Err(GameError::StreetInProgress);
        }

        if self.count_active() < 2 {
            self.phase = Phase::HandResolved;
            return Ok(self.phase);
        }

        match street.next() {
            Some(next) => {
                let cards = (0..next.cards_dealt())
                    .map(|_| deck.deal())
                    .collect::<Result<Vec<_>, _>>()?;
                self.board.extend(cards);
                self.begin_street(next);
            }
            None => {
                self.betting.current_player = None;
                self.phase = Phase::Showdown;
            }
        }

        Ok(self.phase)
    }

    /// Pays the pots and ends the hand.
    ///
    /// In [Phase::HandResolved] the last player gets the pot without showing
    /// cards, in [Phase::Showdown] the pots are split among the best hands.
    pub fn settle(&mut self) -> GameResult<Settlement> {
        let settlement = match self.phase {
            Phase::HandResolved => self.settle_uncontested()?,
            Phase::Showdown => self.settle_showdown()?,
            _ => return Err(GameError::HandInProgress),
        };

        let paid = settlement.payouts.iter().map(|p| p.chips).sum::<Chips>();
        debug_assert_eq!(paid, self.pot, "all the pot must be paid");

        for payout in &settlement.payouts {
            self.players[payout.seat].chips += payout.chips;
        }

        self.pot = Chips::ZERO;
        for player in &mut self.players {
            player.street_bet = Chips::ZERO;
        }

        self.betting = BettingRoundState::new(Street::Preflop);
        self.phase = Phase::WaitForHand;

        Ok(settlement)
    }

    fn settle_uncontested(&self) -> GameResult<Settlement> {
        let seat = self
            .players
            .iter()
            .position(|p| !p.folded)
            .ok_or(GameError::NotEnoughPlayers)?;

        Ok(Settlement {
            winners: vec![seat],
            payouts: vec![Payout {
                seat,
                chips: self.pot,
            }],
            revealed: Vec::new(),
        })
    }

    fn settle_showdown(&self) -> GameResult<Settlement> {
        // The last raiser on the river shows first, otherwise the first seat
        // after the dealer.
        let seats = self.players.len();
        let first = self
            .betting
            .last_raiser
            .unwrap_or((self.dealer + 1) % seats);

        let mut revealed = Vec::new();
        for seat in (first..first + seats).map(|s| s % seats) {
            let player = &self.players[seat];
            if player.folded {
                continue;
            }

            let (c1, c2) = player
                .hole_cards
                .cards()
                .ok_or(GameError::MissingCards(seat))?;

            let mut cards = vec![c1, c2];
            cards.extend_from_slice(&self.board);
            revealed.push(RevealedHand {
                seat,
                cards: (c1, c2),
                value: HandValue::eval(&cards),
            });
        }

        let mut won = vec![Chips::ZERO; self.players.len()];
        for pot in pots::side_pots(&self.players) {
            let best = revealed
                .iter()
                .filter(|h| pot.eligible.contains(&h.seat))
                .map(|h| &h.value)
                .max();

            let winners = revealed
                .iter()
                .filter(|h| pot.eligible.contains(&h.seat) && Some(&h.value) == best)
                .map(|h| h.seat)
                .collect::<Vec<_>>();

            for (seat, chips) in pots::split(pot.chips, &winners, self.dealer, self.players.len()) {
                won[seat] += chips;
            }
        }

        let payouts = won
            .into_iter()
            .enumerate()
            .filter(|(_, chips)| *chips > Chips::ZERO)
            .map(|(seat, chips)| Payout { seat, chips })
            .collect::<Vec<_>>();

        Ok(Settlement {
            winners: payouts.iter().map(|p| p.seat).collect(),
            payouts,
            revealed,
        })
    }

    /// Opens the betting for a street.
    fn begin_street(&mut self, street: Street) {
        if street != Street::Preflop {
            for player in &mut self.players {
                player.start_street();
            }
        }

        let current_bet = self
            .players
            .iter()
            .map(|p| p.street_bet)
            .max()
            .unwrap_or_default();

        let mut pending = self
            .players
            .iter()
            .enumerate()
            .filter(|(_, p)| p.can_act())
            .map(|(seat, _)| seat)
            .collect::<BTreeSet<_>>();

        // With one player left who can bet only a call is still owed.
        if pending.len() < 2 {
            pending.retain(|seat| self.players[*seat].street_bet < current_bet);
        }

        let anchor = if street == Street::Preflop {
            self.big_blind_seat
        } else {
            self.dealer
        };

        self.betting = BettingRoundState {
            street,
            current_player: self.next_pending(anchor, &pending),
            pending,
            current_bet,
            min_raise: self.big_blind,
            last_raiser: None,
            steps: 0,
        };

        self.phase = Phase::betting(street);
    }

    /// Computes the progress after the given seat acted.
    fn progress(&mut self, seat: usize) -> Progress {
        if self.count_active() < 2 {
            self.betting.pending.clear();
            self.betting.current_player = None;
            self.phase = Phase::HandResolved;
            return Progress::HandResolved;
        }

        if !self.betting.pending.is_empty() && self.betting.steps >= self.max_street_steps {
            warn!(
                "Street {:?} stalled after {} actions, forcing the next street",
                self.betting.street, self.betting.steps
            );
            self.betting.pending.clear();
        }

        match self.next_pending(seat, &self.betting.pending) {
            Some(next) => {
                self.betting.current_player = Some(next);
                Progress::NextToAct(next)
            }
            None => {
                self.betting.current_player = None;
                Progress::StreetComplete
            }
        }
    }

    fn in_hand(&self) -> bool {
        !matches!(self.phase, Phase::WaitForHand)
    }

    /// The first pending seat clockwise after `from`.
    fn next_pending(&self, from: usize, pending: &BTreeSet<usize>) -> Option<usize> {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|seat| pending.contains(seat))
    }

    /// The first player in the hand clockwise after `from`.
    fn next_active(&self, from: usize) -> usize {
        self.next_seat(from, |p| !p.folded).unwrap_or(from)
    }

    fn next_seat<F>(&self, from: usize, f: F) -> Option<usize>
    where
        F: Fn(&Player) -> bool,
    {
        let n = self.players.len();
        (1..=n)
            .map(|offset| (from + offset) % n)
            .find(|seat| f(&self.players[*seat]))
    }
}
