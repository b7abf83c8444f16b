use std::cell::Cell;

thread_local! {
    static FORCED_SEED: Cell<Option<u64>> = const { Cell::new(None) };
}

/// Makes every following puzzle deterministic, starting from `seed`.
pub(crate) fn force_seed(seed: Option<u64>) {
    FORCED_SEED.with(|forced| forced.set(seed));
}

/// Seed for the next puzzle: the forced sequence if one was requested, random otherwise.
pub(crate) fn next_seed() -> u64 {
    FORCED_SEED.with(|forced| match forced.get() {
        Some(seed) => {
            forced.set(Some(seed.wrapping_add(1)));
            seed
        }
        None => js_random_seed(),
    })
}

/// Helper function to use JavaScript's Math.random
fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
        (256. * random()) as u8,
    ])
}
