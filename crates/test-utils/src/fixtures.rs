//! Canned frame and run directory names.

/// Individual frame file names.
pub mod names {
    /// Single-level, 2025-06-01 00:00
    pub const SLP_00Z: &str = "slp_01-06-2025_00_00.png";
    /// Single-level, 2025-06-01 03:00
    pub const SLP_03Z: &str = "slp_01-06-2025_03_00.png";
    /// Single-level, next day
    pub const SLP_NEXT_DAY: &str = "slp_02-06-2025_00_00.png";
    /// Malformed name (no timestamp)
    pub const SLP_MALFORMED: &str = "slp_bad-name.png";
    /// Multi-level, 500 hPa
    pub const TEMP_500_00Z: &str = "u_temp_500_01-06-2025_00_00.png";
    /// Multi-level, 850 hPa
    pub const TEMP_850_00Z: &str = "u_temp_850_01-06-2025_00_00.png";
    /// Multi-level, 500 hPa three hours later
    pub const TEMP_500_03Z: &str = "u_temp_500_01-06-2025_03_00.png";
    /// Legacy colon-separated time
    pub const SLP_LEGACY_00Z: &str = "slp_01-06-2025_00:00.png";
}

/// Run directory names.
pub mod runs {
    pub const JUNE_1_00Z: &str = "2025060100";
    pub const JUNE_1_12Z: &str = "2025060112";
    pub const JUNE_2_00Z: &str = "2025060200";
    /// Ten digits but month 13
    pub const INVALID_DATE: &str = "2025130100";
}

/// Standard pressure levels rendered by the pipeline (hPa).
pub const PRESSURE_LEVELS: &[u32] = &[1000, 925, 850, 700, 500, 300, 250, 200];
