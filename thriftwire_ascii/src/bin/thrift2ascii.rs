use std::error::Error;
use std::fs;
use std::io::{self, Read};

use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let args: Vec<String> = std::env::args().collect();

    let data = match args.get(1).map(|s| s.as_str()) {
        None | Some("-") => {
            let mut buffer = Vec::new();
            io::stdin().read_to_end(&mut buffer)?;
            buffer
        }
        Some(path) => fs::read(path)?,
    };
    tracing::debug!(len = data.len(), "read input");

    let ascii = thriftwire_ascii::binary2ascii(&data)?;
    println!("{}", ascii);
    Ok(())
}
