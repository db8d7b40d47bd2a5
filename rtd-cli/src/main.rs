//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();
    if let Err(err) = rtd_cli::run() {
        eprintln!("rtd-routes: {err}");
        std::process::exit(1);
    }
}
