use crate::cli::ComplexArgs;
use crate::error::Result;
use strandorder::engine::config::{ParseConfig, ParseConfigBuilder, ValidationMode};
use tracing::debug;

/// Resolves the parse configuration for one invocation.
///
/// Values from `--config` are taken first; `--strict` then forces strict
/// validation regardless of what the file says.
pub fn resolve_parse_config(args: &ComplexArgs) -> Result<ParseConfig> {
    let base = match &args.config {
        Some(path) => {
            debug!("Loading parse configuration from {:?}", path);
            ParseConfig::load(path)?
        }
        None => ParseConfig::default(),
    };

    let validation = if args.strict {
        ValidationMode::Strict
    } else {
        base.validation
    };

    let config = ParseConfigBuilder::new()
        .validation(validation)
        .default_tag(&base.default_tag)
        .build()?;
    debug!("Resolved parse configuration: {:?}", config);
    Ok(config)
}
