fn main() {
    if let Err(err) = orbitlay::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
