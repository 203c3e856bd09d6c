//! Round Settlement Module
//!
//! Settles a round of bets against one spin. Settlement is a pure function of
//! (balance, bets, spin source): the caller owns the balance and receives the
//! new value back, nothing is printed and no shared state is touched.

use crate::errors::GameError;
use crate::games::evaluator::evaluate;
use crate::games::rng::SpinSource;
use crate::games::types::Bet;
use crate::games::wheel::{self, Color, Outcome};
use serde::{Deserialize, Serialize};

/// Settlement of a single bet
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BetResult {
    pub bet: Bet,
    pub multiplier: u64,
    pub payout: u64,
}

impl BetResult {
    pub fn won(&self) -> bool {
        self.multiplier > 0
    }
}

/// Everything the caller needs to report a settled round
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SettlementResult {
    pub new_balance: u64,
    pub outcome: Outcome,
    /// In the order the bets were placed
    pub per_bet: Vec<BetResult>,
    pub total_stake: u64,
    pub total_winnings: u64,
}

impl SettlementResult {
    pub fn outcome_number(&self) -> u8 {
        self.outcome.number()
    }

    pub fn outcome_color(&self) -> Color {
        self.outcome.color()
    }

    /// Winnings minus stake; widened so any pair of `u64` totals fits
    pub fn net(&self) -> i128 {
        i128::from(self.total_winnings) - i128::from(self.total_stake)
    }

    pub fn is_bust(&self) -> bool {
        self.new_balance == 0
    }
}

/// Sum of stakes, failing on overflow
pub fn total_stake(bets: &[Bet]) -> Result<u64, GameError> {
    bets.iter()
        .try_fold(0u64, |acc, bet| acc.checked_add(bet.stake()))
        .ok_or(GameError::ArithmeticOverflow)
}

/// Settle `bets` against one draw from `spins`.
///
/// The aggregate stake is checked against `balance` before the wheel is spun;
/// on failure nothing is drawn and the caller's balance stands.
pub fn settle(
    balance: u64,
    bets: &[Bet],
    spins: &mut dyn SpinSource,
) -> Result<SettlementResult, GameError> {
    if bets.is_empty() {
        return Err(GameError::EmptyRound);
    }

    let total_stake = total_stake(bets)?;
    if total_stake > balance {
        return Err(GameError::InsufficientFunds {
            required: total_stake,
            available: balance,
        });
    }
    let committed = balance - total_stake;

    let outcome = wheel::draw(spins)?;

    let mut per_bet = Vec::with_capacity(bets.len());
    let mut total_winnings: u64 = 0;
    for bet in bets {
        let multiplier = evaluate(&bet.kind(), outcome);
        let payout = bet
            .stake()
            .checked_mul(multiplier)
            .ok_or(GameError::ArithmeticOverflow)?;
        total_winnings = total_winnings
            .checked_add(payout)
            .ok_or(GameError::ArithmeticOverflow)?;
        per_bet.push(BetResult {
            bet: *bet,
            multiplier,
            payout,
        });
    }

    let new_balance = committed
        .checked_add(total_winnings)
        .ok_or(GameError::ArithmeticOverflow)?;

    log::debug!(
        "Settled {} bet(s) on {}: staked {}, won {}, balance {} -> {}",
        per_bet.len(),
        outcome,
        total_stake,
        total_winnings,
        balance,
        new_balance
    );

    Ok(SettlementResult {
        new_balance,
        outcome,
        per_bet,
        total_stake,
        total_winnings,
    })
}

/// Bets being collected for one round against a starting balance
#[derive(Debug, Clone)]
pub struct Round {
    balance: u64,
    bets: Vec<Bet>,
    committed: u64,
}

impl Round {
    pub fn new(balance: u64) -> Self {
        Self {
            balance,
            bets: Vec::new(),
            committed: 0,
        }
    }

    /// Funds not yet committed to a bet this round
    pub fn remaining(&self) -> u64 {
        self.balance - self.committed
    }

    pub fn total_stake(&self) -> u64 {
        self.committed
    }

    pub fn bets(&self) -> &[Bet] {
        &self.bets
    }

    pub fn is_empty(&self) -> bool {
        self.bets.is_empty()
    }

    /// Add a bet; its stake may not exceed what is left this round.
    pub fn place(&mut self, bet: Bet) -> Result<(), GameError> {
        let remaining = self.remaining();
        if bet.stake() > remaining {
            return Err(GameError::InsufficientFunds {
                required: bet.stake(),
                available: remaining,
            });
        }
        self.committed += bet.stake();
        self.bets.push(bet);
        Ok(())
    }

    pub fn settle(&self, spins: &mut dyn SpinSource) -> Result<SettlementResult, GameError> {
        settle(self.balance, &self.bets, spins)
    }
}
