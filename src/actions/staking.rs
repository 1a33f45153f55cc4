use crate::actions::{Action, ActionEngine};
use crate::error::{Error, Result};
use crate::validation::validate_amount;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::fmt;

pub const INVALID_AMOUNT: &str = "Please enter a valid amount greater than 0.";
pub const ALREADY_VOTED: &str = "You have already voted on this proposal.";
pub const STAKE_TOO_LARGE: &str = "Amount exceeds the maximum stake (Demo).";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vote {
    Approve,
    Reject,
}

impl fmt::Display for Vote {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Vote::Approve => write!(f, "approve"),
            Vote::Reject => write!(f, "reject"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Proposal {
    pub id: u32,
    pub title: String,
    pub base_approve: u32,
    pub base_reject: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub approve: u32,
    pub reject: u32,
}

pub fn default_proposals() -> Vec<Proposal> {
    vec![
        Proposal {
            id: 1,
            title: "Increase rewards for NFT staking".to_string(),
            base_approve: 12,
            base_reject: 3,
        },
        Proposal {
            id: 2,
            title: "Add new LP token to whitelist".to_string(),
            base_approve: 7,
            base_reject: 5,
        },
    ]
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StakingFacts {
    pub staked: Decimal,
    pub votes: BTreeMap<u32, Vote>,
}

pub struct Stake<'a>(pub &'a str);

impl Action for Stake<'_> {
    type Facts = StakingFacts;
    type Key = u32;

    fn validate(&self, facts: &StakingFacts) -> Result<()> {
        let amount = validate_amount(self.0, INVALID_AMOUNT)?;
        if facts.staked.checked_add(amount).is_none() {
            return Err(Error::ValidationError(STAKE_TOO_LARGE.to_string()));
        }
        Ok(())
    }

    fn commit(self, facts: &mut StakingFacts) -> String {
        let amount = validate_amount(self.0, INVALID_AMOUNT).unwrap_or_default();
        facts.staked = facts.staked.checked_add(amount).unwrap_or(facts.staked);
        format!("Successfully staked {} TRO (Demo).", amount)
    }
}

pub struct Unstake<'a>(pub &'a str);

impl Action for Unstake<'_> {
    type Facts = StakingFacts;
    type Key = u32;

    fn validate(&self, facts: &StakingFacts) -> Result<()> {
        let amount = validate_amount(self.0, INVALID_AMOUNT)?;
        if amount > facts.staked {
            return Err(Error::ValidationError(format!(
                "Insufficient stake: only {} TRO staked (Demo).",
                facts.staked.normalize()
            )));
        }
        Ok(())
    }

    fn commit(self, facts: &mut StakingFacts) -> String {
        let amount = validate_amount(self.0, INVALID_AMOUNT).unwrap_or_default();
        facts.staked -= amount;
        format!("Successfully unstaked {} TRO (Demo).", amount)
    }
}

pub struct CastVote<'a> {
    pub proposal_id: u32,
    pub vote: Vote,
    pub proposals: &'a [Proposal],
}

impl Action for CastVote<'_> {
    type Facts = StakingFacts;
    type Key = u32;

    fn target(&self) -> Option<u32> {
        Some(self.proposal_id)
    }

    fn duplicate_message(&self) -> String {
        ALREADY_VOTED.to_string()
    }

    fn validate(&self, facts: &StakingFacts) -> Result<()> {
        if !self.proposals.iter().any(|p| p.id == self.proposal_id) {
            return Err(Error::ValidationError(format!(
                "Proposal #{} does not exist.",
                self.proposal_id
            )));
        }
        if facts.votes.contains_key(&self.proposal_id) {
            return Err(Error::ValidationError(ALREADY_VOTED.to_string()));
        }
        Ok(())
    }

    fn commit(self, facts: &mut StakingFacts) -> String {
        facts.votes.insert(self.proposal_id, self.vote);
        format!("You voted \"{}\" on Proposal #{} (Demo).", self.vote, self.proposal_id)
    }
}

/// TRO staking and governance demo.
#[derive(Debug, Clone)]
pub struct StakingScreen {
    engine: ActionEngine<StakingFacts, u32>,
    proposals: Vec<Proposal>,
}

impl StakingScreen {
    pub fn new() -> Self {
        Self::with_proposals(default_proposals())
    }

    pub fn with_proposals(proposals: Vec<Proposal>) -> Self {
        Self {
            engine: ActionEngine::new("staking"),
            proposals,
        }
    }

    pub fn stake(&mut self, amount: &str) -> Result<()> {
        self.engine.dispatch(Stake(amount))
    }

    pub fn unstake(&mut self, amount: &str) -> Result<()> {
        self.engine.dispatch(Unstake(amount))
    }

    pub fn vote(&mut self, proposal_id: u32, vote: Vote) -> Result<()> {
        self.engine.dispatch(CastVote {
            proposal_id,
            vote,
            proposals: &self.proposals,
        })
    }

    pub fn reset(&mut self) {
        self.engine.reset();
    }

    pub fn staked(&self) -> Decimal {
        self.engine.facts().staked.normalize()
    }

    pub fn proposals(&self) -> &[Proposal] {
        &self.proposals
    }

    pub fn vote_of(&self, proposal_id: u32) -> Option<Vote> {
        self.engine.facts().votes.get(&proposal_id).copied()
    }

    /// Base counts plus this session's vote.
    pub fn tally(&self, proposal_id: u32) -> Option<Tally> {
        let proposal = self.proposals.iter().find(|p| p.id == proposal_id)?;
        let vote = self.vote_of(proposal_id);
        Some(Tally {
            approve: proposal.base_approve + u32::from(vote == Some(Vote::Approve)),
            reject: proposal.base_reject + u32::from(vote == Some(Vote::Reject)),
        })
    }

    pub fn feedback(&self) -> Option<&str> {
        self.engine.feedback()
    }

    pub fn error(&self) -> Option<&str> {
        self.engine.error()
    }

    pub fn engine(&self) -> &ActionEngine<StakingFacts, u32> {
        &self.engine
    }
}

impl Default for StakingScreen {
    fn default() -> Self {
        Self::new()
    }
}
