use gloo::storage::{LocalStorage, Storage};
use serde::{Serialize, de::DeserializeOwned};
use sweeper_core as game;

/// Namespaced local storage slot for a persisted value.
pub(crate) trait StorageKey {
    const KEY: &'static str;
}

pub(crate) trait LocalOrDefault: Sized {
    fn local_or_default() -> Self;
}

impl<T: StorageKey + DeserializeOwned + Default> LocalOrDefault for T {
    fn local_or_default() -> Self {
        LocalStorage::get(T::KEY).unwrap_or_else(|err| {
            log::debug!("nothing usable stored at {}: {}", T::KEY, err);
            T::default()
        })
    }
}

pub(crate) trait LocalSave {
    fn local_save(&self);
}

impl<T: StorageKey + Serialize> LocalSave for T {
    fn local_save(&self) {
        if let Err(err) = LocalStorage::set(T::KEY, self) {
            log::error!("failed to save {}: {:?}", T::KEY, err);
        }
    }
}

impl StorageKey for game::Difficulty {
    const KEY: &'static str = "sweeper:difficulty";
}

/// Helper function to use JavaScript's Math.random
pub(crate) fn js_random_seed() -> u64 {
    use js_sys::Math::random;
    u64::from_be_bytes([(); 8].map(|_| (256. * random()) as u8))
}

/// Three-character counter text, shared by the mine counter and the clock.
pub(crate) fn format_for_counter(num: i32) -> String {
    match num {
        ..-99 => "-99".to_string(),
        -99..0 => format!("-{:02}", -num),
        0..1000 => format!("{:03}", num),
        1000.. => "999".to_string(),
    }
}

pub(crate) trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::FlagOutcome, E> {
    fn has_update(self) -> bool {
        self.is_ok_and(|outcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<game::RevealOutcome, E> {
    fn has_update(self) -> bool {
        self.is_ok_and(|outcome| outcome.has_update())
    }
}
