//! sitesheet main entrypoint.

use sitesheet::run;
use sitesheet::ui::messages;

fn main() {
    if let Err(e) = run() {
        messages::error(e);
        std::process::exit(1);
    }
}
