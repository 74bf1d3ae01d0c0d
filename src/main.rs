//! Desktop entrypoint; launches the grid UI.

fn main() {
    if let Err(err) = gridkit::gui::run() {
        eprintln!("gridkit error: {}", err);
        std::process::exit(1);
    }
}
