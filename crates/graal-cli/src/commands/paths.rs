use console::Style;
use miette::Result;

use graal_ops::{ops_paths, ProjectContext};

pub fn exec(ctx: &ProjectContext) -> Result<()> {
    let paths = ops_paths::resolved_paths(ctx)?;
    let label = Style::new().bold();
    println!(
        "GraalVM {} (Java {}) for {}",
        paths.distribution.graal_version(),
        paths.distribution.java_version(),
        paths.distribution.platform()
    );
    for (name, value) in ops_paths::describe(&paths) {
        println!("{:>12} {value}", label.apply_to(name));
    }
    Ok(())
}
