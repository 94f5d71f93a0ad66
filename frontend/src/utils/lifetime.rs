use leptos::*;

/// Tracks whether the owning component is still mounted. Async completions
/// check it so late results never reach disposed state.
#[derive(Clone, Copy)]
pub struct MountGuard {
    alive: StoredValue<bool>,
}

impl MountGuard {
    pub fn attach() -> Self {
        let alive = store_value(true);
        on_cleanup(move || alive.set_value(false));
        Self { alive }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.try_get_value().unwrap_or(false)
    }

    pub fn release(&self) {
        self.alive.set_value(false);
    }

    /// Runs `f` only while mounted.
    pub fn run<T>(&self, what: &str, f: impl FnOnce() -> T) -> Option<T> {
        if self.is_alive() {
            Some(f())
        } else {
            log::debug!("dropping {} result after unmount", what);
            None
        }
    }
}
