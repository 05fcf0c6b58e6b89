use clap::{Parser, ValueEnum};
use configmap_mcp::tools;

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Yaml,
    Json,
}

/// Print the definitions of every ConfigMap tool.
#[derive(Parser, Debug)]
struct Args {
    #[arg(long, value_enum, default_value_t = Format::Yaml)]
    format: Format,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let definitions = tools::definitions()?;

    match args.format {
        Format::Yaml => print!("{}", serde_yaml::to_string(&definitions)?),
        Format::Json => println!("{}", serde_json::to_string_pretty(&definitions)?),
    }

    Ok(())
}
