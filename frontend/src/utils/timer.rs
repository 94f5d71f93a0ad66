use std::time::Duration;

/// Runs `f` once after `delay` on the browser event loop. Host builds only
/// render markup, so nothing is scheduled there.
pub fn after(delay: Duration, f: impl FnOnce() + 'static) {
    #[cfg(target_arch = "wasm32")]
    {
        let millis = u32::try_from(delay.as_millis()).unwrap_or(u32::MAX);
        gloo_timers::callback::Timeout::new(millis, f).forget();
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = (delay, f);
    }
}
