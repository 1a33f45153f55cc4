use crate::actions::{Action, ActionEngine};
use crate::error::Result;
use crate::validation::{validate_percentage, validate_required};
use rust_decimal::Decimal;

pub const NAME_REQUIRED: &str = "NFT name is required.";
pub const INVALID_ROYALTIES: &str = "Royalties must be a number between 0 and 100.";

#[derive(Debug, Clone, PartialEq)]
pub struct MintedNft {
    pub name: String,
    pub royalties: Option<Decimal>,
    pub attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinterFacts {
    pub minted: Vec<MintedNft>,
}

pub struct Mint<'a> {
    pub name: &'a str,
    pub royalties: &'a str,
    pub attributes: &'a str,
}

impl Mint<'_> {
    fn parse(&self) -> Result<MintedNft> {
        let name = validate_required(self.name, NAME_REQUIRED)?;
        let royalties = validate_percentage(self.royalties, INVALID_ROYALTIES)?;
        Ok(MintedNft {
            name,
            royalties,
            attributes: parse_attributes(self.attributes),
        })
    }
}

impl Action for Mint<'_> {
    type Facts = MinterFacts;
    type Key = String;

    fn target(&self) -> Option<String> {
        Some(self.name.trim().to_string())
    }

    fn duplicate_message(&self) -> String {
        format!("NFT \"{}\" has already been minted (Demo).", self.name.trim())
    }

    fn validate(&self, _facts: &MinterFacts) -> Result<()> {
        self.parse().map(|_| ())
    }

    fn commit(self, facts: &mut MinterFacts) -> String {
        let message = format!("NFT \"{}\" minted! (Demo)", self.name.trim());
        if let Ok(nft) = self.parse() {
            facts.minted.push(nft);
        }
        message
    }
}

/// Splits a comma-separated attribute list, dropping blanks.
pub fn parse_attributes(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|a| !a.is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone)]
pub struct MinterScreen {
    engine: ActionEngine<MinterFacts, String>,
}

impl MinterScreen {
    pub fn new() -> Self {
        Self {
            engine: ActionEngine::new("minter"),
        }
    }

    pub fn mint(&mut self, name: &str, royalties: &str, attributes: &str) -> Result<()> {
        self.engine.dispatch(Mint {
            name,
            royalties,
            attributes,
        })
    }

    pub fn minted(&self) -> &[MintedNft] {
        &self.engine.facts().minted
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

impl Default for MinterScreen {
    fn default() -> Self {
        Self::new()
    }
}
