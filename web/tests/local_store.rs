#![cfg(target_arch = "wasm32")]

use spotter_core::{KeyValueStore, Persist, Progress, StorageKey};
use spotter_web::{LocalStore, WebGame};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn progress_round_trips_through_local_storage() {
    let mut store = LocalStore;
    let mut progress = Progress::new(3);
    progress.save(&mut store);

    assert_eq!(store.read(Progress::KEY).as_deref(), Some("3"));
    assert_eq!(Progress::load_or_default(&store), progress);

    assert!(progress.complete_and_save(3, &mut store));
    assert_eq!(Progress::load_or_default(&store).current_level(), 4);
}

#[wasm_bindgen_test]
fn garbage_in_local_storage_falls_back_to_defaults() {
    let mut store = LocalStore;
    store.write(Progress::KEY, "not a level").unwrap();

    assert_eq!(Progress::load_or_default(&store), Progress::default());
}

#[wasm_bindgen_test]
fn winning_completes_the_progress_the_level_was_started_from() {
    let mut store = LocalStore;
    Progress::new(1).save(&mut store);
    let game = WebGame::journey(1).unwrap();

    // saved elsewhere while the level is being played
    Progress::new(5).save(&mut store);

    let snapshot: serde_json::Value = serde_json::from_str(&game.snapshot().unwrap()).unwrap();
    let size = snapshot["size"].as_u64().unwrap() as u8;
    for row in 0..size {
        for col in 0..size {
            let (r, c) = (usize::from(row), usize::from(col));
            if snapshot["base"][r][c] != snapshot["modified"][r][c] {
                game.click(row, col).unwrap();
            }
        }
    }

    let finished: serde_json::Value = serde_json::from_str(&game.snapshot().unwrap()).unwrap();
    assert_eq!(finished["outcome"], "Won");
    assert_eq!(store.read(Progress::KEY).as_deref(), Some("2"));
}
