use anyhow::{Context, Result};
use tracing::{info, info_span, warn};

use geonc_io::Converter;
use geonc_schema::Schema;

use crate::cli::DefineArgs;
use crate::config::GeoncConfig;
use crate::convert;

pub fn run(args: DefineArgs) -> Result<()> {
    let _cmd = info_span!("define").entered();

    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config: {}", args.config.display()))?;
    let config: GeoncConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;

    let schema_path = args.schema.or(config.io.schema).ok_or_else(|| {
        anyhow::anyhow!("no schema path: set [io].schema in config or use --schema")
    })?;
    let output_path = args.output.or(config.io.output).ok_or_else(|| {
        anyhow::anyhow!("no output path: set [io].output in config or use --output")
    })?;
    let mode = convert::parse_mode(args.mode.as_deref().unwrap_or(&config.io.mode))?;

    let header = config
        .header
        .as_ref()
        .map(|h| -> Result<_> {
            Ok((convert::build_header(h)?, convert::build_header_variables(h)))
        })
        .transpose()
        .context("invalid [header] table")?;

    let schema = Schema::from_path(&schema_path)
        .with_context(|| format!("failed to load schema: {}", schema_path.display()))?;
    schema.validate()?;
    info!(
        schema = %schema_path.display(),
        n_dims = schema.dimensions().len(),
        n_vars = schema.variables().len(),
        "schema loaded"
    );

    let mut converter = Converter::new(schema, &output_path, mode)
        .with_context(|| format!("failed to open output: {}", output_path.display()))?;

    let report = converter.write_metadata()?;
    for issue in report.issues() {
        warn!("skipped attribute: {issue}");
    }

    if let Some((info, vars)) = &header {
        converter.write_header(info, vars)?;
    }

    info!(
        output = %output_path.display(),
        attributes = report.written(),
        skipped = report.issues().len(),
        "metadata written"
    );
    Ok(())
}
