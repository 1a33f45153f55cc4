use crate::actions::{Action, ActionEngine};
use crate::error::{Error, Result};

pub const MISSING_NFT_ID: &str = "Please enter an NFT ID to lock.";
pub const NOTHING_LOCKED: &str = "No NFT is currently locked.";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct EscrowFacts {
    pub locked: Option<String>,
}

pub struct Lock<'a>(pub &'a str);

impl Action for Lock<'_> {
    type Facts = EscrowFacts;
    type Key = ();

    fn validate(&self, facts: &EscrowFacts) -> Result<()> {
        if self.0.trim().is_empty() {
            return Err(Error::ValidationError(MISSING_NFT_ID.to_string()));
        }
        if let Some(locked) = &facts.locked {
            return Err(Error::ValidationError(format!(
                "NFT #{} is already locked in escrow (Demo).",
                locked
            )));
        }
        Ok(())
    }

    fn commit(self, facts: &mut EscrowFacts) -> String {
        let id = self.0.trim().to_string();
        let message = format!("NFT #{} is now locked in escrow (Demo).", id);
        facts.locked = Some(id);
        message
    }
}

pub struct Unlock;

impl Action for Unlock {
    type Facts = EscrowFacts;
    type Key = ();

    fn validate(&self, facts: &EscrowFacts) -> Result<()> {
        match facts.locked {
            Some(_) => Ok(()),
            None => Err(Error::ValidationError(NOTHING_LOCKED.to_string())),
        }
    }

    fn commit(self, facts: &mut EscrowFacts) -> String {
        let id = facts.locked.take().unwrap_or_default();
        format!("NFT #{} has been unlocked (Demo).", id)
    }
}

/// Holds at most one NFT at a time.
#[derive(Debug, Clone)]
pub struct EscrowScreen {
    engine: ActionEngine<EscrowFacts, ()>,
}

impl EscrowScreen {
    pub fn new() -> Self {
        Self {
            engine: ActionEngine::new("escrow"),
        }
    }

    pub fn lock(&mut self, nft_id: &str) -> Result<()> {
        self.engine.dispatch(Lock(nft_id))
    }

    pub fn unlock(&mut self) -> Result<()> {
        self.engine.dispatch(Unlock)
    }

    pub fn locked(&self) -> Option<&str> {
        self.engine.facts().locked.as_deref()
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn feedback(&self) -> Option<&str> {
        self.engine.feedback()
    }

    pub fn error(&self) -> Option<&str> {
        self.engine.error()
    }
}

impl Default for EscrowScreen {
    fn default() -> Self {
        Self::new()
    }
}
