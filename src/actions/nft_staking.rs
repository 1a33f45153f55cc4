use crate::actions::{Action, ActionEngine};
use crate::error::{Error, Result};
use crate::validation::validate_amount;

pub const REWARD_PER_NFT: u64 = 10;
/// Rewards needed for one special NFT.
pub const REWARDS_PER_SPECIAL_NFT: u64 = 100;
pub const INVALID_NFT_ID: &str = "Please enter a valid NFT ID (positive number).";
pub const ALREADY_STAKED: &str = "This NFT is already staked.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Collection {
    pub id: &'static str,
    pub name: &'static str,
}

pub const COLLECTIONS: [Collection; 2] = [
    Collection {
        id: "XARTSFT-45f597",
        name: "xArtists SFT",
    },
    Collection {
        id: "XARTNFT-63b9ea",
        name: "xArtists NFT",
    },
];

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StakedNft {
    pub collection: String,
    pub nft_id: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct NftStakingFacts {
    pub staked: Vec<StakedNft>,
}

pub struct StakeNft<'a> {
    pub collection: &'a str,
    pub nft_id: &'a str,
}

impl StakeNft<'_> {
    fn key(&self) -> StakedNft {
        StakedNft {
            collection: self.collection.to_string(),
            nft_id: self.nft_id.trim().to_string(),
        }
    }
}

impl Action for StakeNft<'_> {
    type Facts = NftStakingFacts;
    type Key = StakedNft;

    fn target(&self) -> Option<StakedNft> {
        Some(self.key())
    }

    fn duplicate_message(&self) -> String {
        ALREADY_STAKED.to_string()
    }

    fn validate(&self, _facts: &NftStakingFacts) -> Result<()> {
        validate_amount(self.nft_id, INVALID_NFT_ID)?;
        if !COLLECTIONS.iter().any(|c| c.id == self.collection) {
            return Err(Error::ValidationError(format!(
                "Unknown collection {}.",
                self.collection
            )));
        }
        Ok(())
    }

    fn commit(self, facts: &mut NftStakingFacts) -> String {
        let staked = self.key();
        let message = format!("Staked NFT #{} from {} (Demo).", staked.nft_id, staked.collection);
        facts.staked.push(staked);
        message
    }
}

#[derive(Debug, Clone)]
pub struct NftStakingScreen {
    engine: ActionEngine<NftStakingFacts, StakedNft>,
}

impl NftStakingScreen {
    pub fn new() -> Self {
        Self {
            engine: ActionEngine::new("nft-staking"),
        }
    }

    pub fn stake(&mut self, collection: &str, nft_id: &str) -> Result<()> {
        self.engine.dispatch(StakeNft { collection, nft_id })
    }

    pub fn staked(&self) -> &[StakedNft] {
        &self.engine.facts().staked
    }

    pub fn rewards(&self) -> u64 {
        self.staked().len() as u64 * REWARD_PER_NFT
    }

    pub fn special_nfts(&self) -> u64 {
        self.rewards() / REWARDS_PER_SPECIAL_NFT
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

impl Default for NftStakingScreen {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SFT: &str = "XARTSFT-45f597";
    const NFT: &str = "XARTNFT-63b9ea";

    #[test]
    fn test_stake_and_rewards() {
        let mut screen = NftStakingScreen::new();
        screen.stake(SFT, "42").unwrap();
        assert_eq!(screen.feedback(), Some("Staked NFT #42 from XARTSFT-45f597 (Demo)."));
        assert_eq!(screen.rewards(), 10);

        // Same id in the other collection is a different NFT.
        screen.stake(NFT, "42").unwrap();
        assert_eq!(screen.staked().len(), 2);
        assert_eq!(screen.rewards(), 20);
    }

    #[test]
    fn test_duplicate_pair_rejected() {
        let mut screen = NftStakingScreen::new();
        screen.stake(SFT, "7").unwrap();
        let err = screen.stake(SFT, "7").unwrap_err();
        assert!(matches!(err, Error::ValidationError(ref msg) if msg == ALREADY_STAKED));
        assert_eq!(screen.error(), Some(ALREADY_STAKED));
        assert_eq!(screen.rewards(), 10);
    }

    #[test]
    fn test_invalid_ids_rejected() {
        let mut screen = NftStakingScreen::new();
        for bad in ["", "0", "-1", "abc"] {
            assert!(screen.stake(SFT, bad).is_err(), "{:?} accepted", bad);
            assert_eq!(screen.error(), Some(INVALID_NFT_ID));
        }
        assert!(screen.stake("OTHER-000000", "1").is_err());
        assert!(screen.staked().is_empty());
        assert_eq!(screen.rewards(), 0);
    }

    #[test]
    fn test_special_nfts_follow_rewards() {
        let mut screen = NftStakingScreen::new();
        for id in 1..=9 {
            screen.stake(SFT, &id.to_string()).unwrap();
        }
        assert_eq!(screen.rewards(), 90);
        assert_eq!(screen.special_nfts(), 0);

        screen.stake(NFT, "10").unwrap();
        assert_eq!(screen.rewards(), 100);
        assert_eq!(screen.special_nfts(), 1);

        screen.reset();
        assert_eq!(screen.special_nfts(), 0);
    }

    #[test]
    fn test_reset_clears_rewards() {
        let mut screen = NftStakingScreen::new();
        screen.stake(SFT, "1").unwrap();
        screen.stake(NFT, "2").unwrap();
        screen.reset();
        assert_eq!(screen.rewards(), 0);
        assert_eq!(screen.feedback(), None);
        assert!(screen.stake(SFT, "1").is_ok());
    }
}
