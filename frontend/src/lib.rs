pub mod api;
pub mod components;
pub mod config;
pub mod pages;
pub mod router;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_support;

/// Browser entry point: logging, panic hook, runtime config, then the app.
#[cfg(target_arch = "wasm32")]
pub fn start() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Debug) {
        web_sys::console::warn_1(&format!("logger already set: {}", err).into());
    }
    log::info!("Starting payroll request frontend");

    // Base URL resolution is awaited by the API client, so mounting does not
    // wait for it.
    leptos::spawn_local(async move {
        config::init().await;
    });

    router::mount_app();
}
