//! Single-shot action engine shared by the demo screens.
//!
//! A screen is an [`ActionEngine`] over its own facts type plus a handful of
//! [`Action`] implementations. Every dispatch clears both messages, then either
//! commits the action and sets feedback, or rejects it and sets the error.
//! Nothing here performs I/O.

use crate::error::{Error, Result};
use log::{debug, info};
use std::collections::HashSet;
use std::fmt::Debug;
use std::hash::Hash;

pub mod demo;
pub mod escrow;
pub mod faucet;
pub mod minter;
pub mod nft_staking;
pub mod staking;

pub use demo::{DemoScreen, DemoStep, StepOutcome};
pub use escrow::EscrowScreen;
pub use faucet::{ClaimKind, FaucetScreen};
pub use minter::MinterScreen;
pub use nft_staking::NftStakingScreen;
pub use staking::{StakingScreen, Vote};

pub trait Action {
    type Facts;
    type Key: Eq + Hash + Clone + Debug;

    /// Key that may be committed at most once per session. `None` for repeatable actions.
    fn target(&self) -> Option<Self::Key> {
        None
    }

    /// Error text for a second commit of the same target.
    fn duplicate_message(&self) -> String {
        "This action has already been performed (Demo).".to_string()
    }

    /// Screen rules checked against the current facts.
    fn validate(&self, facts: &Self::Facts) -> Result<()>;

    /// Applies the effect and returns the success message. Only called after `validate`.
    fn commit(self, facts: &mut Self::Facts) -> String;
}

#[derive(Debug, Clone, PartialEq)]
pub struct ActionState<F, K: Eq + Hash> {
    pub facts: F,
    pub committed: HashSet<K>,
    pub feedback: Option<String>,
    pub error: Option<String>,
}

impl<F: Default, K: Eq + Hash> Default for ActionState<F, K> {
    fn default() -> Self {
        Self {
            facts: F::default(),
            committed: HashSet::new(),
            feedback: None,
            error: None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ActionEngine<F, K: Eq + Hash> {
    screen: &'static str,
    state: ActionState<F, K>,
}

impl<F, K> ActionEngine<F, K>
where
    F: Default + Debug,
    K: Eq + Hash + Clone + Debug,
{
    pub fn new(screen: &'static str) -> Self {
        Self {
            screen,
            state: ActionState::default(),
        }
    }

    pub fn screen(&self) -> &'static str {
        self.screen
    }

    pub fn state(&self) -> &ActionState<F, K> {
        &self.state
    }

    pub fn facts(&self) -> &F {
        &self.state.facts
    }

    pub fn feedback(&self) -> Option<&str> {
        self.state.feedback.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn is_committed(&self, key: &K) -> bool {
        self.state.committed.contains(key)
    }

    /// Checks an action without touching any state.
    pub fn validate<A>(&self, action: &A) -> Result<()>
    where
        A: Action<Facts = F, Key = K>,
    {
        action.validate(&self.state.facts)?;
        if let Some(key) = action.target() {
            if self.state.committed.contains(&key) {
                return Err(Error::ValidationError(action.duplicate_message()));
            }
        }
        Ok(())
    }

    /// Validates and commits. On rejection the facts are left untouched.
    pub fn dispatch<A>(&mut self, action: A) -> Result<()>
    where
        A: Action<Facts = F, Key = K>,
    {
        self.clear_messages();

        if let Err(e) = self.validate(&action) {
            self.reject(e.user_message());
            return Err(e);
        }

        let key = action.target();
        let message = action.commit(&mut self.state.facts);
        if let Some(key) = key {
            self.state.committed.insert(key);
        }
        info!("[{}] {}", self.screen, message);
        self.state.feedback = Some(message);
        Ok(())
    }

    pub fn reject(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        info!("[{}] rejected: {}", self.screen, reason);
        self.clear_messages();
        self.state.error = Some(reason);
    }

    pub fn reset(&mut self) {
        debug!("[{}] reset", self.screen);
        self.state = ActionState::default();
    }

    fn clear_messages(&mut self) {
        self.state.feedback = None;
        self.state.error = None;
    }
}
