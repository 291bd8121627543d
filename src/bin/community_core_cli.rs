fn main() {
    community_core::init();
    if let Err(err) = community_core::cli::run_cli() {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
