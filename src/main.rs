fn main() {
    if let Err(err) = venue_lens::run() {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}
