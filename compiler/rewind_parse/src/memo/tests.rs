use super::*;

const EXPR: RuleId = RuleId::new(3);
const TYPE: RuleId = RuleId::new(4);

#[test]
fn test_lookup_unrecorded() {
    let mut memo = MemoTable::new(true);
    assert_eq!(memo.lookup(EXPR, 0), MemoLookup::NotRecorded);
    assert_eq!(memo.stats().misses, 1);
}

#[test]
fn test_record_then_lookup() {
    let mut memo = MemoTable::new(true);
    assert_eq!(memo.record(EXPR, 2, MemoLookup::Succeeded { end: 7 }), Ok(()));
    assert_eq!(memo.record(TYPE, 2, MemoLookup::Failed), Ok(()));

    assert_eq!(memo.lookup(EXPR, 2), MemoLookup::Succeeded { end: 7 });
    assert_eq!(memo.lookup(TYPE, 2), MemoLookup::Failed);
    assert_eq!(memo.lookup(EXPR, 3), MemoLookup::NotRecorded);
    assert_eq!(
        memo.stats(),
        MemoStats {
            hits: 2,
            misses: 1,
            records: 2
        }
    );
}

#[test]
fn test_second_record_is_rejected() {
    let mut memo = MemoTable::new(true);
    assert_eq!(memo.record(EXPR, 5, MemoLookup::Failed), Ok(()));
    assert_eq!(
        memo.record(EXPR, 5, MemoLookup::Succeeded { end: 9 }),
        Err(MemoError::AlreadyRecorded {
            rule: 3,
            position: 5
        })
    );
    // The first outcome stands.
    assert_eq!(memo.lookup(EXPR, 5), MemoLookup::Failed);
}

#[test]
fn test_disabled_table() {
    let mut memo = MemoTable::new(false);
    assert!(!memo.is_enabled());
    assert_eq!(memo.record(EXPR, 0, MemoLookup::Failed), Ok(()));
    assert_eq!(memo.record(EXPR, 0, MemoLookup::Failed), Ok(()));
    assert_eq!(memo.lookup(EXPR, 0), MemoLookup::NotRecorded);
    assert!(memo.is_empty());
    assert_eq!(memo.stats(), MemoStats::default());
}

#[test]
fn test_clear() {
    let mut memo = MemoTable::new(true);
    assert_eq!(memo.record(EXPR, 0, MemoLookup::Failed), Ok(()));
    assert_eq!(memo.len(), 1);
    memo.clear();
    assert!(memo.is_empty());
    assert_eq!(memo.lookup(EXPR, 0), MemoLookup::NotRecorded);
    assert_eq!(memo.record(EXPR, 0, MemoLookup::Failed), Ok(()));
}
