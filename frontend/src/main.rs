fn main() {
    #[cfg(target_arch = "wasm32")]
    payroll_frontend::start();
}
