fn main() {
    if let Err(error) = xbfload_cli::run() {
        tracing::error!(%error, "xbfload failed");
        std::process::exit(1);
    }
}
