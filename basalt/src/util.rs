//! Small shared utilities: timestamps and diffusion seeds.

/// Timestamp format used across logs and generated-artifact names.
pub const TIMESTAMP_FORMAT: &str = "%y-%m-%d %H:%M:%S";

/// Upper bound (exclusive) for [`random_seed`], `i32::MAX`.
///
/// The service accepts seeds up to `u32::MAX`; generated seeds stay
/// within `i32` range.
pub const SEED_BOUND: u32 = 2_147_483_647;

/// Current local time rendered with [`TIMESTAMP_FORMAT`].
#[must_use]
pub fn current_timestamp() -> String {
    format_timestamp(TIMESTAMP_FORMAT)
}

/// Current local time rendered with a custom `chrono` format string.
#[must_use]
pub fn format_timestamp(format: &str) -> String {
    chrono::Local::now().format(format).to_string()
}

/// A uniformly random diffusion seed in `[0, SEED_BOUND)`.
#[must_use]
pub fn random_seed() -> u32 {
    fastrand::u32(0..SEED_BOUND)
}
