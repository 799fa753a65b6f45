use std::{
    num::NonZeroUsize,
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use rand::{SeedableRng, rngs::StdRng};
use shared_state::{ReplayBuffer, Shape, Transition, TransitionShape};

const CAPACITY: usize = 4;
const WRITERS: u64 = 4;
const READERS: u64 = 4;
const APPENDS: u64 = 5_000;

fn record(value: f32) -> Transition {
    Transition {
        state: vec![value; 4],
        action: vec![value; 2],
        reward: vec![value; 2],
        next_state: vec![value; 4],
        terminal: vec![false; 2],
    }
}

fn is_uniform(t: &Transition) -> bool {
    let value = t.state[0];
    [&t.state, &t.action, &t.reward, &t.next_state]
        .iter()
        .all(|field| field.iter().all(|&v| v == value))
}

#[test]
fn overwritten_slots_are_never_sampled_torn() {
    let shape = TransitionShape::new(Shape::from([4]), Shape::from([2]), 2);
    let memory = ReplayBuffer::new(shape, NonZeroUsize::new(CAPACITY).unwrap());
    let writing = AtomicBool::new(true);

    thread::scope(|s| {
        let readers: Vec<_> = (0..READERS)
            .map(|seed| {
                let (memory, writing) = (&memory, &writing);
                s.spawn(move || {
                    let mut rng = StdRng::seed_from_u64(seed);
                    let mut sampled = 0usize;

                    while writing.load(Ordering::Acquire) {
                        assert!(memory.len() <= CAPACITY);
                        if let Some(batch) = memory.sample(2, &mut rng) {
                            assert!(batch.iter().all(is_uniform));
                            sampled += batch.len();
                        }
                    }
                    sampled
                })
            })
            .collect();

        let writers: Vec<_> = (0..WRITERS)
            .map(|w| {
                let memory = &memory;
                s.spawn(move || {
                    for i in 0..APPENDS {
                        let slot = memory.append(&record((w * APPENDS + i) as f32)).unwrap();
                        assert!(slot < CAPACITY);
                    }
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        writing.store(false, Ordering::Release);

        for reader in readers {
            reader.join().unwrap();
        }
    });

    assert_eq!(memory.len(), CAPACITY);

    let mut rng = StdRng::seed_from_u64(0);
    let batch = memory.sample(CAPACITY, &mut rng).unwrap();
    assert_eq!(batch.len(), CAPACITY);
    assert!(batch.iter().all(is_uniform));
}
