use orcas_report::{ReportConfig, ReportDocumentInput, ReportEngine, ReportError};
use std::env;
use std::fs;
use std::time::Instant;

fn print_usage(program: &str) {
    eprintln!("Builds an ORCAS report PDF from a JSON report description.");
    eprintln!();
    eprintln!(
        "Usage: {} <path/to/report.json> <path/to/output.pdf> [--base64] [--config <config.json>] [--assets <dir>]",
        program
    );
    eprintln!();
    eprintln!("  --base64   write the document as base64 text instead of raw PDF bytes");
    eprintln!("  --config   JSON file overriding layout and typography defaults");
    eprintln!("  --assets   directory holding fonts/ (defaults to the bundled assets)");
}

struct CliArgs {
    input: String,
    output: String,
    base64: bool,
    config: Option<String>,
    assets: Option<String>,
}

fn parse_args(args: &[String]) -> Option<CliArgs> {
    let mut positional = Vec::new();
    let mut base64 = false;
    let mut config = None;
    let mut assets = None;
    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--base64" => base64 = true,
            "--config" => config = Some(iter.next()?.clone()),
            "--assets" => assets = Some(iter.next()?.clone()),
            flag if flag.starts_with("--") => return None,
            _ => positional.push(arg.clone()),
        }
    }
    if positional.len() != 2 {
        return None;
    }
    let output = positional.pop()?;
    let input = positional.pop()?;
    Some(CliArgs {
        input,
        output,
        base64,
        config,
        assets,
    })
}

#[tokio::main]
async fn main() -> Result<(), ReportError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("orcas-report");
    let Some(cli) = parse_args(&args) else {
        print_usage(program);
        std::process::exit(1);
    };

    let config = match &cli.config {
        Some(path) => ReportConfig::from_json_file(path)?,
        None => ReportConfig::default(),
    };
    let mut builder = ReportEngine::builder().with_config(config);
    if let Some(dir) = &cli.assets {
        builder = builder.with_asset_dir(dir);
    }
    let engine = builder.build();

    log::info!("Loading report description from {}", cli.input);
    let input: ReportDocumentInput = serde_json::from_str(&fs::read_to_string(&cli.input)?)?;

    let start = Instant::now();
    if cli.base64 {
        let encoded = engine.build_report_document(&input).await?;
        fs::write(&cli.output, encoded)?;
    } else {
        let bytes = engine.build_report_bytes(&input).await?;
        fs::write(&cli.output, bytes)?;
    }
    log::info!("Wrote {} in {:.2?}", cli.output, start.elapsed());
    Ok(())
}
