use std::error::Error;

use vergen::EmitBuilder;

fn main() -> Result<(), Box<dyn Error>> {
    EmitBuilder::builder()
        .build_timestamp()
        .cargo_opt_level()
        .cargo_target_triple()
        .emit()?;
    Ok(())
}
