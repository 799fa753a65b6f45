use std::{sync::Arc, thread};

use shared_state::counters::{
    AtomicCounter, CounterGroups, IntCounter, PeriodicGroup, RealCounter, Resettable,
};

#[test]
fn concurrent_increments_are_never_lost() {
    const THREADS: u64 = 8;
    const INCREMENTS: u64 = 10_000;

    let counter = Arc::new(IntCounter::new("total_steps"));

    let handles: Vec<_> = (0..THREADS)
        .map(|_| {
            let counter = Arc::clone(&counter);
            thread::spawn(move || {
                for _ in 0..INCREMENTS {
                    counter.increment(1);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(counter.get(), THREADS * INCREMENTS);
}

#[test]
fn concurrent_real_increments_are_never_lost() {
    const THREADS: usize = 4;
    const INCREMENTS: usize = 5_000;

    let counter = Arc::new(RealCounter::new("total_reward"));

    thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..INCREMENTS {
                    counter.increment(0.5);
                }
            });
        }
    });

    assert_eq!(counter.get(), (THREADS * INCREMENTS) as f64 * 0.5);
}

#[test]
fn resets_racing_increments_conserve_the_total() {
    const THREADS: u64 = 4;
    const INCREMENTS: u64 = 20_000;

    let counter = IntCounter::new("n_episodes");

    let drained: u64 = thread::scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                for _ in 0..INCREMENTS {
                    counter.increment(1);
                }
            });
        }

        let reader = s.spawn(|| {
            let mut drained = 0;
            for _ in 0..1_000 {
                drained += counter.read_and_reset();
                thread::yield_now();
            }
            drained
        });

        reader.join().unwrap()
    });

    assert_eq!(drained + counter.read_and_reset(), THREADS * INCREMENTS);
    assert_eq!(counter.get(), 0);
}

#[test]
fn progress_only_grows_while_stats_are_drained() {
    let groups = CounterGroups::new();

    thread::scope(|s| {
        for _ in 0..3 {
            s.spawn(|| {
                for _ in 0..100 {
                    groups.progress.actor_step.step();
                    groups.actor_stats.total_steps.increment(1);
                }
            });
        }
    });

    assert_eq!(groups.actor_stats.drain().total_steps, 300);
    assert_eq!(groups.actor_stats.drain().total_steps, 0);
    assert_eq!(groups.progress.actor_step.get(), 300);
}
