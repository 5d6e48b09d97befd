use gloo::storage::{LocalStorage, Storage};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Key a value is stored under in `localStorage`.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
    fn local_save(&self);
}

impl<T> LocalOrDefault for T
where
    T: StorageKey + Default + Serialize + DeserializeOwned,
{
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("no stored {}: {:?}", T::KEY, err);
            T::default()
        })
    }

    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("could not save {} to local storage: {:?}", T::KEY, err);
        }
    }
}

/// Deal seed from `Math.random`, 32 bits per half.
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    let half = || (random() * f64::from(u32::MAX)) as u64;
    (half() << 32) | half()
}

/// Formats whole seconds as `m:ss`.
pub(crate) fn format_time(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
