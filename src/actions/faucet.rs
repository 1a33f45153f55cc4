use crate::actions::{Action, ActionEngine};
use crate::error::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ClaimKind {
    Tro,
    Nft,
}

impl fmt::Display for ClaimKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClaimKind::Tro => write!(f, "TRO"),
            ClaimKind::Nft => write!(f, "NFT"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct FaucetFacts {
    pub tro_claimed: bool,
    pub nft_claimed: bool,
}

pub struct Claim(pub ClaimKind);

impl Action for Claim {
    type Facts = FaucetFacts;
    type Key = ClaimKind;

    fn target(&self) -> Option<ClaimKind> {
        Some(self.0)
    }

    fn duplicate_message(&self) -> String {
        format!("You have already claimed {} (Demo).", self.0)
    }

    fn validate(&self, _facts: &FaucetFacts) -> Result<()> {
        Ok(())
    }

    fn commit(self, facts: &mut FaucetFacts) -> String {
        match self.0 {
            ClaimKind::Tro => facts.tro_claimed = true,
            ClaimKind::Nft => facts.nft_claimed = true,
        }
        format!("Successfully claimed {} (Demo).", self.0)
    }
}

/// One TRO claim and one NFT claim per session.
#[derive(Debug, Clone)]
pub struct FaucetScreen {
    engine: ActionEngine<FaucetFacts, ClaimKind>,
}

impl FaucetScreen {
    pub fn new() -> Self {
        Self {
            engine: ActionEngine::new("faucet"),
        }
    }

    pub fn claim(&mut self, kind: ClaimKind) -> Result<()> {
        self.engine.dispatch(Claim(kind))
    }

    pub fn has_claimed(&self, kind: ClaimKind) -> bool {
        self.engine.is_committed(&kind)
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

    pub fn engine(&self) -> &ActionEngine<FaucetFacts, ClaimKind> {
        &self.engine
    }
}

impl Default for FaucetScreen {
    fn default() -> Self {
        Self::new()
    }
}
