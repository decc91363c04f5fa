use miette::Result;

use graal_ops::{ops_provision, ProjectContext};

pub fn exec(ctx: &ProjectContext) -> Result<()> {
    let handle = ops_provision::provision_toolchain(ctx)?;
    println!("{}", handle.home.display());
    Ok(())
}
