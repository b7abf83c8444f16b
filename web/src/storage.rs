use gloo::storage::errors::StorageError;
use gloo::storage::{LocalStorage, Storage};
use gloo::utils::errors::JsError;
use spotter_core::KeyValueStore;
use wasm_bindgen::JsValue;

/// [`KeyValueStore`] backed by the page's `localStorage`. Values are kept as the
/// raw strings handed in, [`spotter_core::Persist`] owns the JSON encoding.
#[derive(Copy, Clone, Debug, Default)]
pub struct LocalStore;

impl KeyValueStore for LocalStore {
    type Error = StorageError;

    fn read(&self, key: &str) -> Option<String> {
        match LocalStorage::raw().get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("reading {} from localStorage failed: {:?}", key, err);
                None
            }
        }
    }

    fn write(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
        LocalStorage::raw()
            .set_item(key, value)
            .map_err(to_storage_error)
    }
}

fn to_storage_error(err: JsValue) -> StorageError {
    let err = JsError::try_from(err)
        .unwrap_or_else(|not_error| js_sys::Error::new(&not_error.to_string()).into());
    StorageError::JsError(err)
}
