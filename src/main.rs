//! rpayclock main entrypoint.

use rpayclock::run;
use rpayclock::ui::messages::error;

fn main() {
    println!();
    if let Err(e) = run() {
        error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
