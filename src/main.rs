use std::process;

fn main() {
    if let Err(e) = bantam::cli::run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
