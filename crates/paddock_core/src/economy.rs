//! Currency, carried-resource mirror and upgrade levels
//!
//! The ledger is the single source of truth for the player's coins. Every
//! mutation is pushed to an optional [`CounterMirror`] (a HUD, a save file)
//! straight away. A failing mirror is logged and otherwise ignored: the
//! ledger never rolls back because a display could not keep up.

use std::collections::HashMap;
use std::fmt;
use serde::{Serialize, Deserialize};

/// Purchasable upgrade tracks
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UpgradeKind {
    /// Multiplies every hazard zone's damage
    HazardDamage,
    /// Shortens the creature spawn interval and raises the spawn cap
    SpawnRate,
    /// Unlocks the next hazard zone
    ZoneArea,
}

impl UpgradeKind {
    /// Every upgrade track
    pub const ALL: [UpgradeKind; 3] = [
        UpgradeKind::HazardDamage,
        UpgradeKind::SpawnRate,
        UpgradeKind::ZoneArea,
    ];

    /// Short display name
    pub fn name(&self) -> &'static str {
        match self {
            UpgradeKind::HazardDamage => "damage",
            UpgradeKind::SpawnRate => "spawn",
            UpgradeKind::ZoneArea => "area",
        }
    }
}

/// Error reported by a [`CounterMirror`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorError {
    message: String,
}

impl MirrorError {
    /// Create a mirror error with a message
    pub fn new(message: impl Into<String>) -> Self {
        Self { message: message.into() }
    }

    /// The error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for MirrorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Counter mirror error: {}", self.message)
    }
}

impl std::error::Error for MirrorError {}

/// Outside observer of the ledger's counters
pub trait CounterMirror {
    /// Called after every ledger mutation with the new meat and coin counts
    fn counters_changed(&mut self, meat: u32, coins: u64) -> Result<(), MirrorError>;
}

/// Point-in-time copy of the ledger state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub coins: u64,
    pub meat: u32,
    pub levels: Vec<(UpgradeKind, u32)>,
}

/// Coin balance, meat mirror and upgrade levels
#[derive(Default)]
pub struct EconomyLedger {
    coins: u64,
    meat: u32,
    /// Missing entries are level 1
    levels: HashMap<UpgradeKind, u32>,
    mirror: Option<Box<dyn CounterMirror>>,
}

impl fmt::Debug for EconomyLedger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EconomyLedger")
            .field("coins", &self.coins)
            .field("meat", &self.meat)
            .field("levels", &self.levels)
            .field("mirrored", &self.mirror.is_some())
            .finish()
    }
}

impl EconomyLedger {
    /// Create an empty ledger (no coins, every upgrade at level 1)
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach or replace the mirror
    pub fn set_mirror(&mut self, mirror: Box<dyn CounterMirror>) {
        self.mirror = Some(mirror);
    }

    /// Current coin balance
    #[inline]
    pub fn coins(&self) -> u64 {
        self.coins
    }

    /// Mirrored count of resources the player is carrying
    #[inline]
    pub fn meat(&self) -> u32 {
        self.meat
    }

    /// Current level of an upgrade track (starts at 1)
    pub fn upgrade_level(&self, kind: UpgradeKind) -> u32 {
        self.levels.get(&kind).copied().unwrap_or(1)
    }

    /// Add coins
    pub fn add_currency(&mut self, amount: u64) {
        self.coins = self.coins.saturating_add(amount);
        self.notify();
    }

    /// Deduct `cost` if the balance covers it
    ///
    /// Returns false (and changes nothing) when the balance is short.
    pub fn spend_if_affordable(&mut self, cost: u64) -> bool {
        if !self.debit(cost) {
            return false;
        }
        self.notify();
        true
    }

    /// Raise an upgrade track by one level, returning the new level
    pub fn increment_upgrade(&mut self, kind: UpgradeKind) -> u32 {
        let level = self.bump(kind);
        self.notify();
        level
    }

    /// Spend `cost` and raise `kind` by one level, or do neither
    pub fn buy_upgrade(&mut self, kind: UpgradeKind, cost: u64) -> bool {
        if !self.debit(cost) {
            log::debug!("Cannot afford {} upgrade: {} < {}", kind.name(), self.coins, cost);
            return false;
        }
        let level = self.bump(kind);
        log::info!("Bought {} upgrade for {} coins, now level {}", kind.name(), cost, level);
        self.notify();
        true
    }

    /// Mirror the number of resources the player carries
    pub fn set_meat(&mut self, count: u32) {
        self.meat = count;
        self.notify();
    }

    /// Convert carried value into coins
    ///
    /// Clears the meat mirror and returns the coins gained. A zero value is
    /// not a sale and leaves the ledger untouched.
    pub fn sell(&mut self, value: u64) -> u64 {
        if value == 0 {
            return 0;
        }
        self.coins = self.coins.saturating_add(value);
        self.meat = 0;
        log::info!("Sold goods for {} coins (balance {})", value, self.coins);
        self.notify();
        value
    }

    /// Copy out the current state
    pub fn snapshot(&self) -> LedgerSnapshot {
        LedgerSnapshot {
            coins: self.coins,
            meat: self.meat,
            levels: UpgradeKind::ALL
                .iter()
                .map(|kind| (*kind, self.upgrade_level(*kind)))
                .collect(),
        }
    }

    fn debit(&mut self, cost: u64) -> bool {
        match self.coins.checked_sub(cost) {
            Some(rest) => {
                self.coins = rest;
                true
            }
            None => false,
        }
    }

    fn bump(&mut self, kind: UpgradeKind) -> u32 {
        let level = self.levels.entry(kind).or_insert(1);
        *level = level.saturating_add(1);
        *level
    }

    fn notify(&mut self) {
        if let Some(mirror) = self.mirror.as_mut() {
            if let Err(err) = mirror.counters_changed(self.meat, self.coins) {
                log::warn!("{}", err);
            }
        }
    }
}
