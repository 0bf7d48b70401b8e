//! Entry point for the `cafeteria` command-line interface.
#![forbid(unsafe_code)]

fn main() -> eyre::Result<()> {
    cafeteria_cli::init_logging();
    cafeteria_cli::run()?;
    Ok(())
}
