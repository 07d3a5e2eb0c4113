/// Serde default for the `is_active` / `is_available` style flags.
pub fn enabled() -> bool {
    true
}
