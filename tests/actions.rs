use rust_decimal::Decimal;
use tro_dashboard::actions::staking::{Tally, ALREADY_VOTED, INVALID_AMOUNT};
use tro_dashboard::actions::{demo, ClaimKind, DemoScreen, FaucetScreen, StakingScreen, StepOutcome, Vote};
use tro_dashboard::Error;

#[test]
fn test_stake_then_invalid_stake() {
    let mut screen = StakingScreen::new();
    screen.stake("100").unwrap();
    assert_eq!(screen.staked(), Decimal::from(100));
    assert_eq!(screen.feedback(), Some("Successfully staked 100 TRO (Demo)."));

    assert!(matches!(screen.stake("0"), Err(Error::ValidationError(_))));
    assert_eq!(screen.error(), Some(INVALID_AMOUNT));
    assert_eq!(screen.staked(), Decimal::from(100));
}

#[test]
fn test_second_vote_on_same_proposal() {
    let mut screen = StakingScreen::new();
    screen.vote(1, Vote::Approve).unwrap();
    assert_eq!(screen.tally(1), Some(Tally { approve: 13, reject: 3 }));

    assert!(screen.vote(1, Vote::Reject).is_err());
    assert_eq!(screen.error(), Some(ALREADY_VOTED));
    assert_eq!(screen.tally(1), Some(Tally { approve: 13, reject: 3 }));
}

#[test]
fn test_screens_are_independent() {
    let mut faucet_a = FaucetScreen::new();
    let mut faucet_b = FaucetScreen::new();
    faucet_a.claim(ClaimKind::Tro).unwrap();
    assert!(faucet_b.claim(ClaimKind::Tro).is_ok());
    assert!(faucet_a.claim(ClaimKind::Tro).is_err());
}

#[test]
fn test_faucet_demo_transcript() {
    let outcomes: Vec<StepOutcome> = demo::run(DemoScreen::Faucet).into_iter().map(|s| s.outcome).collect();
    assert_eq!(
        outcomes,
        vec![
            StepOutcome::Feedback("Successfully claimed TRO (Demo).".into()),
            StepOutcome::Error("You have already claimed TRO (Demo).".into()),
            StepOutcome::Feedback("Successfully claimed NFT (Demo).".into()),
            StepOutcome::Error("You have already claimed NFT (Demo).".into()),
            StepOutcome::Feedback("Successfully claimed TRO (Demo).".into()),
        ]
    );
}
