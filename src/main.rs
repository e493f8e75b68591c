use clap::error::ErrorKind;
use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;
use pwgen::{run, Args};
use std::process::exit;

fn main() {
    // anything clap rejects is a bad argument too, so it exits 1 like the rest
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let _ = e.print();
            exit(1);
        }
    };
    let level = match (args.silent, args.debug) {
        (true, _) => LevelFilter::Off,
        (_, true) => LevelFilter::Debug,
        _ => LevelFilter::Warn,
    };
    Builder::new().filter_level(level).init();

    if let Err(e) = run(args) {
        eprintln!("error: {e}");
        exit(1);
    }
}
