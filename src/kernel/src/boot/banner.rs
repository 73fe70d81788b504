//! Boot banner.

use crate::config::{OS_NAME, OS_VERSION};
use pauyos_hal::Console;

/// Print the PauyOS boot banner.
pub fn print_banner(console: &mut impl Console) {
    console.write_str(OS_NAME);
    console.write_str(" v");
    console.write_str(OS_VERSION);
    console.put_char(b'\n');
    console.write_str("Commands: echo <text>, clear, crash, exit\n");
}
