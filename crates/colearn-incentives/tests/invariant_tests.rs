use colearn_incentives::{
    IncentiveMechanism, ManualClock, StakeConfig, StakingMechanism,
};
use colearn_types::{AccountAddress, TokenAmount};
use std::sync::Arc;

fn addr(byte: u8) -> AccountAddress {
    AccountAddress::from_bytes([byte; 32])
}

fn test_config() -> StakeConfig {
    StakeConfig {
        refund_wait_secs: 10,
        owner_claim_wait_secs: 100,
        any_address_claim_wait_secs: 200,
        cost_weight: 1,
        owner: addr(0xEE),
    }
}

/// Core invariants that must ALWAYS hold across operation sequences
#[tokio::test]
async fn test_good_count_invariant() {
    let clock = Arc::new(ManualClock::new(0));
    let mechanism = StakingMechanism::new(test_config(), clock.clone()).unwrap();

    println!("\n=== Testing Good-Count Invariant ===");

    let submitters: Vec<AccountAddress> = (1..=5).map(addr).collect();
    let payment = TokenAmount::from_units(10_000);

    // Invariant 1: counters start at zero
    assert_eq!(mechanism.total_good_count().await, 0);
    println!("✓ Invariant 1: counters start at zero");

    // Each submitter adds two points; the first of each pair gets refunded.
    let mut refundable = Vec::new();
    for (i, submitter) in submitters.iter().enumerate() {
        let (kept, _) = mechanism
            .handle_add_data(*submitter, payment, format!("kept {}", i).as_bytes(), 1)
            .await
            .unwrap();
        mechanism
            .handle_add_data(*submitter, payment, format!("dropped {}", i).as_bytes(), 1)
            .await
            .unwrap();
        refundable.push((kept, *submitter));
    }

    clock.set(50);
    for (id, submitter) in &refundable {
        mechanism.handle_refund(*id, *submitter, 1).await.unwrap();
    }

    // Invariant 2: the global total equals the sum of per-address counters
    let mut sum = 0;
    for submitter in &submitters {
        sum += mechanism.good_count(submitter).await;
    }
    assert_eq!(mechanism.total_good_count().await, sum);
    assert_eq!(sum, 5);
    println!("✓ Invariant 2: total == Σ per-address after refunds");

    // Failed operations must not move the counters.
    let (id, submitter) = refundable[0];
    assert!(mechanism.handle_refund(id, submitter, 1).await.is_err());
    assert_eq!(mechanism.total_good_count().await, 5);
    println!("✓ Invariant 3: failed claims leave counters untouched");

    println!("\n=== Good-Count Invariant Holds ===");
}

#[tokio::test]
async fn test_payouts_never_exceed_deposit() {
    let clock = Arc::new(ManualClock::new(0));
    let mechanism = StakingMechanism::new(test_config(), clock.clone()).unwrap();
    let author = addr(1);
    let reporter = addr(2);

    println!("\n=== Testing Deposit Conservation ===");

    // Reputation seed: reporter earns 1 of 2 good counts.
    let (seed_a, _) = mechanism
        .handle_add_data(reporter, TokenAmount::from_units(5000), b"seed a", 3)
        .await
        .unwrap();
    let (seed_b, _) = mechanism
        .handle_add_data(addr(3), TokenAmount::from_units(5000), b"seed b", 3)
        .await
        .unwrap();
    clock.set(20);
    mechanism.handle_refund(seed_a, reporter, 3).await.unwrap();
    mechanism.handle_refund(seed_b, addr(3), 3).await.unwrap();

    let deposit = TokenAmount::from_units(7001);
    let (id, _) = mechanism
        .handle_add_data(author, deposit, b"disputed", 1)
        .await
        .unwrap();

    let before = mechanism.total_claimable().await;

    clock.set(50);
    let reward = mechanism
        .handle_report(id, reporter, author, 0)
        .await
        .unwrap();

    clock.set(60);
    let refund = mechanism.handle_refund(id, author, 1).await.unwrap();

    // Invariant: what left the deposit is exactly what the claimants got.
    let paid = reward.checked_add(refund).unwrap();
    assert_eq!(paid, deposit);
    let after = mechanism.total_claimable().await;
    assert_eq!(before.checked_sub(after).unwrap(), paid);
    println!("✓ Invariant: reward {} + refund {} == deposit {}", reward, refund, deposit);

    let record = mechanism.submission(&id).await.unwrap();
    assert!(record.claimable_amount.is_zero());
    assert!(record.claimed_by_submitter);
    assert!(record.claimed_by_reporter);
    println!("✓ Invariant: record retained with both flags set");

    println!("\n=== Deposit Conservation Holds ===");
}

#[tokio::test]
async fn test_claim_flags_are_monotonic() {
    let clock = Arc::new(ManualClock::new(0));
    let mechanism = StakingMechanism::new(test_config(), clock.clone()).unwrap();
    let submitter = addr(1);

    let (id, _) = mechanism
        .handle_add_data(submitter, TokenAmount::from_units(4000), b"point", 1)
        .await
        .unwrap();

    clock.set(20);
    mechanism.handle_refund(id, submitter, 1).await.unwrap();
    assert!(mechanism.submission(&id).await.unwrap().claimed_by_submitter);

    // No later operation, successful or failed, may reset the flag.
    clock.set(500);
    let _ = mechanism.handle_refund(id, submitter, 1).await;
    let _ = mechanism.handle_report(id, addr(2), submitter, 0).await;
    assert!(mechanism.submission(&id).await.unwrap().claimed_by_submitter);
}

#[tokio::test]
async fn test_construction_rejects_misordered_waits() {
    let clock = Arc::new(ManualClock::new(0));
    let bad = StakeConfig {
        refund_wait_secs: 100,
        owner_claim_wait_secs: 50,
        any_address_claim_wait_secs: 200,
        cost_weight: 1,
        owner: addr(0xEE),
    };

    // Validation fails before any state is created.
    assert!(StakingMechanism::new(bad, clock).is_err());
}

#[tokio::test]
async fn test_rejected_operations_leave_no_trace() {
    let clock = Arc::new(ManualClock::new(0));
    let mechanism = StakingMechanism::new(test_config(), clock.clone()).unwrap();

    // Underpaid submission: nothing recorded, pricing clock unmoved.
    clock.set(100);
    assert!(mechanism
        .handle_add_data(addr(1), TokenAmount::from_units(1), b"cheap", 0)
        .await
        .is_err());
    assert_eq!(mechanism.submission_count().await, 0);
    assert_eq!(mechanism.last_update_time().await, 0);
    assert_eq!(mechanism.total_claimable().await, TokenAmount::ZERO);
}
