mod inspect;

use std::env;
use std::io;
use std::process;

use log::{debug, error};

use self::inspect::logger;

fn main() {
    let args: Vec<String> = env::args().collect();

    let cfg = match inspect::parse_args(args) {
        Ok(cfg) => cfg,
        Err(msg) => {
            println!("Error: {}", msg);
            inspect::help();
            process::exit(1)
        }
    };

    logger::init(cfg.verbose);

    if cfg.version {
        println!("strings-rs {}", env!("CARGO_PKG_VERSION"));
        process::exit(0);
    }

    debug!("Starting strings-rs with {} input files", cfg.files.len());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = inspect::run(&cfg, &mut out) {
        error!("{e}");
        process::exit(1);
    }
}
