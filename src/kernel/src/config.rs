//! Compile-time kernel configuration.

use log::LevelFilter;

/// Most verbose level the kernel logger lets through.
pub const LOG_LEVEL: LevelFilter = if cfg!(feature = "log_debug") {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

/// Name printed in the banner.
pub const OS_NAME: &str = "PauyOS";

/// Version printed in the banner.
pub const OS_VERSION: &str = "1.0.0";

/// Columns of the text-mode screen.
pub const SCREEN_COLUMNS: usize = 80;

/// Rows of the text-mode screen.
pub const SCREEN_ROWS: usize = 25;

/// Row the cursor is placed on once the banner is printed.
pub const PROMPT_ROW: i32 = 3;

/// Last line written by `exit` before the processor halts.
pub const SHUTDOWN_MESSAGE: &str = "System has shut down";

/// Memory map entries recorded at boot; the rest are dropped with a warning.
pub const MAX_MEMORY_REGIONS: usize = 64;
