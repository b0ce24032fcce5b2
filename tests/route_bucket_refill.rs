use route_guard_core::RouteBucket;

#[test]
fn test_refill_adds_one_token_per_whole_interval() {
    let bucket = RouteBucket::new_at(10, 30, 0); // one token per 2000 ms

    for _ in 0..5 {
        assert!(bucket.take().granted);
    }
    assert_eq!(bucket.available(), 5);

    // 4000 ms = 2 whole intervals
    bucket.refill_at(4000);
    assert_eq!(bucket.available(), 7);
}

#[test]
fn test_refill_is_idempotent_at_a_fixed_instant() {
    let bucket = RouteBucket::new_at(10, 30, 0);

    for _ in 0..5 {
        assert!(bucket.take().granted);
    }

    bucket.refill_at(4000);
    assert_eq!(bucket.available(), 7);

    // A second call at the same instant sees zero elapsed time
    bucket.refill_at(4000);
    assert_eq!(bucket.available(), 7);
}

#[test]
fn test_drained_bucket_recovers_exactly_elapsed_over_interval() {
    // Capacity 100, 30 tokens/minute: one token per 2000 ms
    let bucket = RouteBucket::new_at(100, 30, 0);

    for _ in 0..100 {
        assert!(bucket.take().granted);
    }
    assert_eq!(bucket.available(), 0);

    // 10 seconds later: 10000 / 2000 = exactly 5 tokens, not more
    bucket.refill_at(10_000);
    assert_eq!(bucket.available(), 5);
}

#[test]
fn test_refill_increment_clamps_at_capacity() {
    let bucket = RouteBucket::new_at(10, 30, 0);

    for _ in 0..3 {
        assert!(bucket.take().granted);
    }
    assert_eq!(bucket.available(), 7);

    // 20000 ms would accrue 10 tokens; only 3 fit
    bucket.refill_at(20_000);
    assert_eq!(bucket.available(), 10);
}

#[test]
fn test_full_bucket_refill_only_realigns_timestamp() {
    let bucket = RouteBucket::new_at(2, 2000, 0); // one token per 30 ms
    assert_eq!(bucket.last_refill(), 0);

    // Full bucket: count untouched, window re-anchored to 45 - 45 % 30 = 30
    bucket.refill_at(45);
    assert_eq!(bucket.available(), 2);
    assert_eq!(bucket.last_refill(), 30);
}

#[test]
fn test_fractional_progress_accumulates_across_rapid_polls() {
    let bucket = RouteBucket::new_at(2, 2000, 0); // one token per 30 ms
    assert!(bucket.take().granted);
    assert!(bucket.take().granted);

    // Polling faster than the interval must not discard partial elapsed
    // time: the refill timestamp stays put until a token is earned
    bucket.refill_at(10);
    assert_eq!(bucket.available(), 0);
    assert_eq!(bucket.last_refill(), 0);

    bucket.refill_at(20);
    assert_eq!(bucket.available(), 0);
    assert_eq!(bucket.last_refill(), 0);

    // 30 ms of total elapsed time has accumulated: one token lands
    bucket.refill_at(30);
    assert_eq!(bucket.available(), 1);
    assert_eq!(bucket.last_refill(), 30);

    // Same pattern toward the second token
    bucket.refill_at(40);
    bucket.refill_at(50);
    assert_eq!(bucket.available(), 1);
    bucket.refill_at(60);
    assert_eq!(bucket.available(), 2);
}

#[test]
fn test_backward_clock_read_is_a_refill_noop() {
    let bucket = RouteBucket::new_at(5, 30, 10_000);
    assert_eq!(bucket.last_refill(), 10_000);
    assert!(bucket.take().granted);

    // A clock rewind reads as zero elapsed time rather than erroring
    bucket.refill_at(9_000);
    assert_eq!(bucket.available(), 4);
    assert_eq!(bucket.last_refill(), 10_000);

    // Once the clock passes the anchor again, accrual resumes normally
    bucket.refill_at(12_000);
    assert_eq!(bucket.available(), 5);
}
