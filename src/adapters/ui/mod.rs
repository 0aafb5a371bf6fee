pub mod banner;
pub mod progress;
pub mod text_report;
pub mod tui;

pub use progress::{SilentProgress, SpinnerProgress};
pub use text_report::render_text;
pub use tui::TuiInputPort;

/// Applies the neon theme for inquire prompts and, in text mode, prints the banner.
/// Call once at startup (e.g. in main after tracing init).
pub fn init_ui(text_output: bool) {
    if text_output {
        banner::print_welcome();
    }
    tui::apply_theme();
}
