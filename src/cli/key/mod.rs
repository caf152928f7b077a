//! Generate command - prints a key without storing it

use crate::infrastructure::api_key::ApiKeyGenerator;

pub fn generate() -> anyhow::Result<()> {
    println!("{}", ApiKeyGenerator::default().generate());
    Ok(())
}
