// Concurrent writers and subscribers on one container.
use observa_core::prelude::*;
use observa_core::ThreadContext;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

#[test]
fn concurrent_subscribe_and_set_keep_the_registry_consistent() {
    const WRITERS: usize = 8;
    const SUBSCRIBERS: usize = 8;
    const ROUNDS: usize = 100;

    let obs = MutableObservable::new(0usize);
    let delivered = Arc::new(AtomicUsize::new(0));
    let kept = Mutex::new(Vec::new());

    thread::scope(|s| {
        for w in 0..WRITERS {
            let obs = obs.clone();
            s.spawn(move || {
                for i in 0..ROUNDS {
                    obs.set(w * ROUNDS + i);
                }
            });
        }
        for n in 0..SUBSCRIBERS {
            let obs = obs.clone();
            let delivered = Arc::clone(&delivered);
            let kept = &kept;
            s.spawn(move || {
                for i in 0..ROUNDS {
                    let delivered = Arc::clone(&delivered);
                    let sub = obs.subscribe(move |_, _| {
                        delivered.fetch_add(1, Ordering::Relaxed);
                    });
                    // Keep every other subscription from even-numbered threads.
                    if n % 2 == 0 && i % 2 == 0 {
                        kept.lock().unwrap().push(sub);
                    }
                }
            });
        }
    });

    let kept = kept.into_inner().unwrap();
    let expected = (SUBSCRIBERS / 2) * (ROUNDS / 2);
    assert_eq!(kept.len(), expected);
    assert_eq!(obs.subscriber_count(), expected);
    assert!(delivered.load(Ordering::Relaxed) >= SUBSCRIBERS * ROUNDS);

    let mut ids: Vec<u64> = kept.iter().map(|d| d.id().get()).collect();
    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), expected);
}

#[test]
fn every_completed_subscription_sees_later_writes() {
    let obs = MutableObservable::new(0);
    let hits = Arc::new(AtomicUsize::new(0));
    let subs: Vec<_> = (0..16)
        .map(|_| {
            let hits = Arc::clone(&hits);
            obs.subscribe(move |_, old: Option<&i32>| {
                if old.is_some() {
                    hits.fetch_add(1, Ordering::SeqCst);
                }
            })
        })
        .collect();

    thread::scope(|s| {
        for v in 1..=4 {
            let obs = obs.clone();
            s.spawn(move || obs.set(v));
        }
    });

    assert_eq!(hits.load(Ordering::SeqCst), 16 * 4);
    drop(subs);
}

#[test]
fn old_and_new_pair_up_atomically() {
    let obs = MutableObservable::new(0u64);
    let pairs = Arc::new(Mutex::new(Vec::new()));
    let pairs_clone = Arc::clone(&pairs);
    let _sub = obs.subscribe(move |new: &u64, old: Option<&u64>| {
        if let Some(old) = old {
            pairs_clone.lock().unwrap().push((*old, *new));
        }
    });

    thread::scope(|s| {
        for t in 0..4u64 {
            let obs = obs.clone();
            s.spawn(move || {
                for i in 1..=50u64 {
                    obs.set(t * 1000 + i);
                }
            });
        }
    });

    // Each write's old value is the previous write's new value, so the
    // pairs form one chain from the initial value through every write.
    let pairs = pairs.lock().unwrap();
    assert_eq!(pairs.len(), 200);
    let mut olds: Vec<u64> = pairs.iter().map(|(o, _)| *o).collect();
    let mut news: Vec<u64> = pairs.iter().map(|(_, n)| *n).collect();
    olds.sort_unstable();
    news.push(0);
    news.sort_unstable();
    news.retain(|n| *n != *obs.get());
    assert_eq!(olds, news);
}

#[test]
fn thread_context_delivers_off_thread() {
    let obs = MutableObservable::new(1);
    let (tx, rx) = mpsc::channel();
    let tx = Mutex::new(tx);
    let _sub = obs.subscribe_on(Arc::new(ThreadContext), move |new: &i32, old: Option<&i32>| {
        let _ = tx.lock().unwrap().send((*new, old.copied()));
    });

    obs.set(2);
    let mut got = vec![
        rx.recv_timeout(Duration::from_secs(5)).expect("initial"),
        rx.recv_timeout(Duration::from_secs(5)).expect("change"),
    ];
    got.sort();
    assert_eq!(got, vec![(1, None), (2, Some(1))]);
}
