//! crewtime main entrypoint.

use crewtime::run;
use crewtime::ui::messages;

fn main() {
    println!();
    if let Err(e) = run() {
        messages::error(format!("Error: {}", e));
        std::process::exit(1);
    }
}
