use std::env;

fn main() -> Result<(), std::io::Error> {
    env_logger::init();
    let args: Vec<String> = env::args().collect();

    let config;
    if args.len() > 1 {
        config = bmu::config::Config::from_args(&args);
    } else {
        config = bmu::config::Config::default();
    }
    bmu::run_threads::run_threads(config).expect("Shutting down");
    Ok(())
}
