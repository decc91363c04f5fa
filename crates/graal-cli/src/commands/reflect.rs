use miette::Result;

use graal_ops::{ops_reflect, ProjectContext};
use graal_util::progress::status_warn;

pub fn exec(ctx: &ProjectContext) -> Result<()> {
    match ops_reflect::write_reflection_config(ctx)? {
        Some(path) => println!("{}", path.display()),
        None => status_warn("Skipping", "no reflection-classes configured"),
    }
    Ok(())
}
