mod args;
mod logging;

use clap::Parser;
use sql_powered::prelude::*;

use crate::args::Args;

fn main() {
    let args = Args::parse();
    if let Err(err) = logging::init(args.log.as_deref()) {
        eprintln!("failed to open log file: {err}");
        std::process::exit(1);
    }

    let params = args.bound_params();
    tracing::info!(
        params = params.len(),
        positional = params.is_positional(),
        "rendering template"
    );

    if args.json {
        let mut parser = DebugParser::new();
        let record = parser.parse(&DebugEvent::Query {
            query: &args.template,
            params: &params,
        });
        match record.map(|record| serde_json::to_string_pretty(&record)) {
            Some(Ok(json)) => println!("{json}"),
            Some(Err(err)) => {
                tracing::error!("failed to encode debug record: {err}");
                std::process::exit(1);
            }
            None => {}
        }
    } else {
        println!("{}", render_demo_query(&args.template, &params));
    }
}
