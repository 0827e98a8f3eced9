use anyhow::Result;
use safebeautyledger::ledger::openapi;

fn main() -> Result<()> {
    println!("{}", openapi::openapi().to_pretty_json()?);
    Ok(())
}
