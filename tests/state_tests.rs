// SharedState tests: concurrent publish/read never observes a torn snapshot

use docker_dashboard::models::{Row, Source};
use docker_dashboard::state::SharedState;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

fn rows(n: usize, tag: &str) -> Vec<Row> {
    (0..n)
        .map(|i| Row {
            name: format!("{tag}-{i}"),
            image: "img".into(),
            status: "running".into(),
            cpu: "0.0%".into(),
            mem: "0.0 MB".into(),
            source: Source::Local,
        })
        .collect()
}

#[test]
fn readers_see_whole_snapshots_only() {
    const SMALL: usize = 3;
    const LARGE: usize = 250;

    let state = Arc::new(SharedState::new());
    state.publish(rows(SMALL, "small"));
    let done = Arc::new(AtomicBool::new(false));

    let writer = {
        let state = state.clone();
        let done = done.clone();
        thread::spawn(move || {
            for i in 0..2_000 {
                if i % 2 == 0 {
                    state.publish(rows(LARGE, "large"));
                } else {
                    state.publish(rows(SMALL, "small"));
                }
            }
            done.store(true, Ordering::SeqCst);
        })
    };

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let state = state.clone();
            let done = done.clone();
            thread::spawn(move || {
                let mut observed = 0usize;
                while !done.load(Ordering::SeqCst) || observed == 0 {
                    let snap = state.snapshot();
                    assert!(snap.len() == SMALL || snap.len() == LARGE);
                    let prefix = if snap.len() == SMALL { "small-" } else { "large-" };
                    assert!(snap.rows().iter().all(|r| r.name.starts_with(prefix)));
                    observed += 1;
                }
            })
        })
        .collect();

    writer.join().unwrap();
    for r in readers {
        r.join().unwrap();
    }
    assert_eq!(state.snapshot().cycle(), 2_001);
}

#[test]
fn snapshot_copy_is_unaffected_by_later_publish() {
    let state = SharedState::new();
    state.publish(rows(2, "old"));
    let held = state.snapshot();
    state.publish(rows(5, "new"));
    assert_eq!(held.len(), 2);
    assert_eq!(held.rows()[0].name, "old-0");
    assert_eq!(state.snapshot().len(), 5);
}
