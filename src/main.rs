use anyhow::Result;
use clap::Parser;

use blockfall::config::{Args, Config};
use blockfall::{app, logging};

fn main() -> Result<()> {
    let args = Args::parse();
    if let Some(path) = &args.log_file {
        logging::init_to_file(path)?;
    }
    app::run(&Config::from(&args))
}
