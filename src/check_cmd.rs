use anyhow::{Context, Result};
use tracing::info_span;

use geonc_schema::Schema;

use crate::cli::CheckArgs;

pub fn run(args: CheckArgs) -> Result<()> {
    let _cmd = info_span!("check").entered();

    let schema = Schema::from_path(&args.schema)
        .with_context(|| format!("failed to load schema: {}", args.schema.display()))?;
    schema.validate()?;

    for dim in schema.dimensions() {
        println!("dim {} = {}", dim.name(), dim.size());
    }
    for var in schema.variables() {
        let shape = schema.shape_of(var.name())?;
        println!(
            "var {} {}({}) {:?} attrs={}",
            var.type_name(),
            var.name(),
            var.dims().join(", "),
            shape,
            var.attributes().len()
        );
    }
    println!("{}: ok", args.schema.display());
    Ok(())
}
