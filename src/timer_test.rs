use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;

fn counter() -> Arc<AtomicUsize> {
    Arc::new(AtomicUsize::new(0))
}

fn bump(count: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
    let count = Arc::clone(count);
    async move {
        count.fetch_add(1, Ordering::SeqCst);
    }
}

async fn advance_ms(ms: u64) {
    tokio::time::sleep(Duration::from_millis(ms)).await;
}

// =============================================================================
// schedule
// =============================================================================

#[tokio::test(start_paused = true)]
async fn runs_once_after_delay() {
    let debounce = Debounce::new(Duration::from_millis(500));
    let count = counter();
    debounce.schedule(bump(&count));
    assert!(debounce.is_scheduled());

    advance_ms(499).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance_ms(2).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert!(!debounce.is_scheduled());
}

#[tokio::test(start_paused = true)]
async fn reschedule_restarts_the_delay() {
    let debounce = Debounce::new(Duration::from_millis(500));
    let count = counter();
    for _ in 0..5 {
        debounce.schedule(bump(&count));
        advance_ms(300).await;
    }
    assert_eq!(count.load(Ordering::SeqCst), 0);

    advance_ms(201).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

// =============================================================================
// cancel
// =============================================================================

#[tokio::test(start_paused = true)]
async fn cancel_prevents_run() {
    let debounce = Debounce::new(Duration::from_millis(500));
    let count = counter();
    debounce.schedule(bump(&count));
    assert!(debounce.cancel());
    assert!(!debounce.is_scheduled());

    advance_ms(1000).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn cancel_after_fire_reports_nothing_waiting() {
    let debounce = Debounce::new(Duration::from_millis(100));
    let count = counter();
    debounce.schedule(bump(&count));
    advance_ms(150).await;
    assert!(!debounce.cancel());
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn cancel_does_not_interrupt_running_future() {
    let debounce = Debounce::new(Duration::from_millis(100));
    let count = counter();
    let inner = Arc::clone(&count);
    debounce.schedule(async move {
        tokio::time::sleep(Duration::from_millis(1000)).await;
        inner.fetch_add(1, Ordering::SeqCst);
    });

    advance_ms(200).await;
    assert!(!debounce.cancel());
    advance_ms(1000).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_debounce_cancels() {
    let count = counter();
    {
        let debounce = Debounce::new(Duration::from_millis(100));
        debounce.schedule(bump(&count));
    }
    advance_ms(500).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}
