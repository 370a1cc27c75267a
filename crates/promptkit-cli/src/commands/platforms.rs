use console::style;

use promptkit_core::platform::PLATFORMS;

use crate::output;

/// List the AI platforms `generate --open` accepts.
pub fn run() {
    output::print_header("AI platforms");
    for p in PLATFORMS {
        println!("  {:<12} {:<12} {}", style(p.id).bold(), p.name, style(p.url).dim());
    }
    println!();
}
