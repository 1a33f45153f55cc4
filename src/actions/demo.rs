//! Scripted walks through each demo screen, used by the `demo` subcommand.

use crate::actions::{ClaimKind, EscrowScreen, FaucetScreen, MinterScreen, NftStakingScreen, StakingScreen, Vote};
use crate::error::Result;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DemoScreen {
    Staking,
    Faucet,
    NftStaking,
    Escrow,
    Minter,
}

/// One scripted interaction and what the screen reported back.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoStep {
    pub action: String,
    pub outcome: StepOutcome,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    Feedback(String),
    Error(String),
    Info(String),
}

impl DemoStep {
    pub fn render(&self) -> String {
        match &self.outcome {
            StepOutcome::Feedback(msg) => format!("> {}\n  ok: {}", self.action, msg),
            StepOutcome::Error(msg) => format!("> {}\n  error: {}", self.action, msg),
            StepOutcome::Info(msg) => format!("> {}\n  {}", self.action, msg),
        }
    }
}

struct Transcript(Vec<DemoStep>);

impl Transcript {
    fn record(&mut self, action: impl Into<String>, result: Result<()>, feedback: Option<&str>, error: Option<&str>) {
        let outcome = match result {
            Ok(()) => StepOutcome::Feedback(feedback.unwrap_or_default().to_string()),
            Err(e) => StepOutcome::Error(error.map(str::to_string).unwrap_or_else(|| e.user_message())),
        };
        self.0.push(DemoStep {
            action: action.into(),
            outcome,
        });
    }

    fn note(&mut self, action: impl Into<String>, info: String) {
        self.0.push(DemoStep {
            action: action.into(),
            outcome: StepOutcome::Info(info),
        });
    }
}

pub fn run(screen: DemoScreen) -> Vec<DemoStep> {
    let mut t = Transcript(Vec::new());
    match screen {
        DemoScreen::Staking => staking(&mut t),
        DemoScreen::Faucet => faucet(&mut t),
        DemoScreen::NftStaking => nft_staking(&mut t),
        DemoScreen::Escrow => escrow(&mut t),
        DemoScreen::Minter => minter(&mut t),
    }
    t.0
}

fn staking(t: &mut Transcript) {
    let mut s = StakingScreen::new();
    let r = s.stake("100");
    t.record("stake 100", r, s.feedback(), s.error());
    let r = s.stake("0");
    t.record("stake 0", r, s.feedback(), s.error());
    let r = s.unstake("250");
    t.record("unstake 250", r, s.feedback(), s.error());
    let r = s.vote(1, Vote::Approve);
    t.record("vote approve on #1", r, s.feedback(), s.error());
    let r = s.vote(1, Vote::Reject);
    t.record("vote reject on #1", r, s.feedback(), s.error());
    for p in s.proposals() {
        if let Some(tally) = s.tally(p.id) {
            t.note(
                format!("tally #{}", p.id),
                format!("{}: {} approve / {} reject", p.title, tally.approve, tally.reject),
            );
        }
    }
    s.reset();
    t.note("reset", format!("staked {} TRO", s.staked()));
}

fn faucet(t: &mut Transcript) {
    let mut f = FaucetScreen::new();
    for kind in [ClaimKind::Tro, ClaimKind::Tro, ClaimKind::Nft, ClaimKind::Nft] {
        let r = f.claim(kind);
        t.record(format!("claim {}", kind), r, f.feedback(), f.error());
    }
    f.reset();
    let r = f.claim(ClaimKind::Tro);
    t.record("reset, claim TRO", r, f.feedback(), f.error());
}

fn nft_staking(t: &mut Transcript) {
    let mut n = NftStakingScreen::new();
    for (collection, id) in [
        ("XARTSFT-45f597", "42"),
        ("XARTSFT-45f597", "42"),
        ("XARTNFT-63b9ea", "42"),
        ("XARTNFT-63b9ea", "zero"),
    ] {
        let r = n.stake(collection, id);
        t.record(format!("stake {} #{}", collection, id), r, n.feedback(), n.error());
    }
    t.note(
        "rewards",
        format!("{} TRO, special NFTs: {} (Demo)", n.rewards(), n.special_nfts()),
    );
    n.reset();
    t.note("reset", format!("{} TRO (Demo)", n.rewards()));
}

fn escrow(t: &mut Transcript) {
    let mut e = EscrowScreen::new();
    let r = e.unlock();
    t.record("unlock", r, e.feedback(), e.error());
    let r = e.lock("");
    t.record("lock \"\"", r, e.feedback(), e.error());
    let r = e.lock("7");
    t.record("lock 7", r, e.feedback(), e.error());
    let r = e.lock("8");
    t.record("lock 8", r, e.feedback(), e.error());
    let r = e.unlock();
    t.record("unlock", r, e.feedback(), e.error());
}

fn minter(t: &mut Transcript) {
    let mut m = MinterScreen::new();
    for (name, royalties, attributes) in [
        ("", "5", ""),
        ("Genesis", "150", ""),
        ("Genesis", "5", "color:blue, rarity:rare"),
        ("Genesis", "", ""),
    ] {
        let r = m.mint(name, royalties, attributes);
        t.record(
            format!("mint {:?} royalties={:?}", name, royalties),
            r,
            m.feedback(),
            m.error(),
        );
    }
    m.reset();
    t.note("reset", format!("{} minted", m.minted().len()));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcomes(screen: DemoScreen) -> Vec<StepOutcome> {
        run(screen).into_iter().map(|s| s.outcome).collect()
    }

    #[test]
    fn test_staking_script() {
        let steps = outcomes(DemoScreen::Staking);
        assert_eq!(steps[0], StepOutcome::Feedback("Successfully staked 100 TRO (Demo).".into()));
        assert_eq!(steps[1], StepOutcome::Error("Please enter a valid amount greater than 0.".into()));
        assert!(matches!(steps[2], StepOutcome::Error(_)));
        assert_eq!(steps[4], StepOutcome::Error("You have already voted on this proposal.".into()));
        assert_eq!(
            steps[5],
            StepOutcome::Info("Increase rewards for NFT staking: 13 approve / 3 reject".into())
        );
        assert_eq!(steps.last(), Some(&StepOutcome::Info("staked 0 TRO".into())));
    }

    #[test]
    fn test_every_script_mixes_success_and_rejection() {
        for screen in [
            DemoScreen::Staking,
            DemoScreen::Faucet,
            DemoScreen::NftStaking,
            DemoScreen::Escrow,
            DemoScreen::Minter,
        ] {
            let steps = outcomes(screen);
            assert!(steps.iter().any(|o| matches!(o, StepOutcome::Feedback(_))), "{:?}", screen);
            assert!(steps.iter().any(|o| matches!(o, StepOutcome::Error(_))), "{:?}", screen);
        }
    }

    #[test]
    fn test_render() {
        let step = DemoStep {
            action: "claim TRO".into(),
            outcome: StepOutcome::Error("You have already claimed TRO (Demo).".into()),
        };
        assert_eq!(step.render(), "> claim TRO\n  error: You have already claimed TRO (Demo).");
    }
}
