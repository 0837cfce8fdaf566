use std::path::PathBuf;

use clap::Parser;
use sql_powered::prelude::*;

#[derive(Parser, Debug)]
#[command(author, version, about = "Render a parameterized query as literal SQL")]
pub(crate) struct Args {
    /// Query template using `?` or `:name` placeholders.
    #[arg(long, short)]
    pub(crate) template: String,
    /// Positional parameter, repeat in placeholder order.
    #[arg(long = "param", short = 'p', conflicts_with = "named")]
    pub(crate) params: Vec<String>,
    /// Named parameter as `name=value`.
    #[arg(long, short = 'n', value_parser = parse_named)]
    pub(crate) named: Vec<(String, String)>,
    /// Print the whole debug record as JSON instead of just the rendered SQL.
    #[arg(long)]
    pub(crate) json: bool,
    #[arg(long)]
    pub(crate) log: Option<PathBuf>,
}

fn parse_named(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.is_empty() => Ok((name.to_string(), value.to_string())),
        _ => Err(format!("expected name=value, got `{raw}`")),
    }
}

/// Integers bind as integers, anything else as text.
fn to_param(raw: &str) -> Param {
    match raw.parse::<i64>() {
        Ok(value) => Param::from(value),
        Err(_) => Param::from(raw),
    }
}

impl Args {
    pub(crate) fn bound_params(&self) -> BoundParams {
        if self.named.is_empty() {
            BoundParams::positional(self.params.iter().map(|raw| to_param(raw)))
        } else {
            BoundParams::named(
                self.named
                    .iter()
                    .map(|(name, raw)| (name.clone(), to_param(raw))),
            )
        }
    }
}
