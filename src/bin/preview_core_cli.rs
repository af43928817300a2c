use std::process;

fn main() {
    preview_core::init();

    if let Err(err) = preview_core::cli::run_cli() {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}
