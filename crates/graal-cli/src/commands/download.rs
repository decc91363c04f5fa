use miette::Result;

use graal_ops::{ops_provision, ProjectContext};

pub fn exec(ctx: &ProjectContext) -> Result<()> {
    let archive = ops_provision::download_only(ctx)?;
    println!("{}", archive.display());
    Ok(())
}
