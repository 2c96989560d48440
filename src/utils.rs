use rand::prelude::IndexedRandom;
use std::time::Duration;

const DELAYS_MS: [u64; 3] = [1000, 1500, 2000];

/// Short randomized pause between consecutive API calls.
pub fn random_delay() {
    let delay = DELAYS_MS.choose(&mut rand::rng()).unwrap();
    std::thread::sleep(Duration::from_millis(*delay));
}
