//! Integration tests for the blocking wrapper.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use rust_ask::mock::MockReader;
use rust_ask::{AskConfig, AskError, AskOptions, Asker, BlockingAsker, Session};

fn blocking(mock: &MockReader) -> BlockingAsker {
    BlockingAsker::from_asker(Asker::with_opener(AskConfig::default(), mock.opener())).unwrap()
}

#[test]
fn blocking_continue_prompt() {
    let mock = MockReader::with_lines(["foo", "", "Y", "N", "y"]);
    let answer = blocking(&mock)
        .ask_with("Continue [y/n]: ", AskOptions::new().accept_list(["y", "n"]))
        .unwrap();
    assert_eq!(answer, "y");
    assert_eq!(mock.read_count(), 5);
    assert_eq!(mock.close_count(), 1);
}

#[test]
fn blocking_scope_shares_one_session() {
    let mock = MockReader::with_lines(["1", "2", "3"]);
    let sum: Result<u32, AskError> = blocking(&mock).scoped(|scope| {
        let mut sum = 0;
        for _ in 0..3 {
            let answer = scope.ask("n? ")?;
            sum += answer.parse::<u32>().unwrap_or(0);
        }
        Ok(sum)
    });

    assert_eq!(sum.unwrap(), 6);
    assert_eq!(mock.close_count(), 1);
}

#[test]
fn blocking_scope_closes_after_panic() {
    let mock = MockReader::with_lines(["x"]);
    let asker = blocking(&mock);

    let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        asker.scoped(|scope| -> Result<(), AskError> {
            scope.ask("? ")?;
            panic!("interrupted")
        })
    }));
    assert!(outcome.is_err());
    assert_eq!(mock.close_count(), 1);
}

#[test]
fn blocking_nested_scope() {
    let mock = MockReader::with_lines(["a", "b"]);
    let answers = blocking(&mock)
        .scoped(|scope| {
            let a = scope.ask("? ")?;
            let b = scope.scoped(|inner| inner.ask("? "))?;
            Ok::<_, AskError>(format!("{a}{b}"))
        })
        .unwrap();
    assert_eq!(answers, "ab");
    assert_eq!(mock.close_count(), 1);
}

#[test]
fn blocking_properties_factory_runs_once_per_scope() {
    let built = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&built);
    let mock = MockReader::with_lines(["a", "b", "c"]);
    let asker = Asker::with_opener(AskConfig::default(), mock.opener())
        .properties(move |_: &Arc<Session>| counter.fetch_add(1, Ordering::SeqCst));
    let asker = BlockingAsker::from_asker(asker).unwrap();

    asker
        .scoped(|scope| {
            scope.ask("? ")?;
            scope.ask("? ")?;
            assert_eq!(**scope.properties(), 0);
            Ok::<_, AskError>(())
        })
        .unwrap();
    asker.ask("? ").unwrap();

    assert_eq!(built.load(Ordering::SeqCst), 2);
    assert_eq!(mock.close_count(), 2);
}
