// Exercises the re-exported surface the way an application would.
use observa::prelude::*;
use observa::DisposeBag;
use std::sync::{Arc, Mutex};

#[test]
fn facade_exposes_core_types() {
    let state = MutableObservable::new(0u32);
    let view: ReadOnlyObservable<u32> = state.read_only();
    let seen = Arc::new(Mutex::new(Vec::new()));
    let mut bag = DisposeBag::new();

    let seen_clone = Arc::clone(&seen);
    view.subscribe(move |new: &u32, old: Option<&u32>| {
        seen_clone.lock().unwrap().push((*new, old.copied()));
    })
    .disposed_by(&mut bag);

    state.set(1);
    bag.dispose_all();
    state.set(2);
    assert_eq!(*seen.lock().unwrap(), vec![(0, None), (1, Some(0))]);
}

#[cfg(feature = "tokio")]
#[test]
fn facade_exposes_tokio_contexts() {
    use observa::tokio::LoopChannels;

    let LoopChannels {
        context,
        mut receiver,
    } = LoopChannels::new();
    let state = MutableObservable::new("off");
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_clone = Arc::clone(&seen);
    let _sub = state.subscribe_on(Arc::new(context), move |new: &&str, _old: Option<&&str>| {
        seen_clone.lock().unwrap().push(*new);
    });
    state.set("on");
    assert_eq!(receiver.run_pending(), 2);
    assert_eq!(*seen.lock().unwrap(), vec!["off", "on"]);
}
