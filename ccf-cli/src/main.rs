//! CCF CLI - daily compound flood risk assessment from hourly coastal observations.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "ccf-cli",
    version,
    about = "Coastal compound flood risk toolkit",
    after_help = "Example: ccf-cli data/sample_chicago_1995.csv"
)]
struct Cli {
    #[command(flatten)]
    analyze: ccf_cmd::AnalyzeArgs,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("Analyzing {}", cli.analyze.input.display());
    ccf_cmd::run(cli.analyze)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn input_path_is_required() {
        let err = Cli::try_parse_from(["ccf-cli"]).err().unwrap();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_ne!(err.exit_code(), 0);
    }

    #[test]
    fn parses_options() {
        let cli = Cli::try_parse_from([
            "ccf-cli",
            "data/in.csv",
            "--output-dir",
            "out",
            "--config",
            "cfg.toml",
            "--tail",
            "7",
        ])
        .unwrap();
        assert_eq!(cli.analyze.input.to_str(), Some("data/in.csv"));
        assert_eq!(cli.analyze.output_dir.to_str(), Some("out"));
        assert_eq!(cli.analyze.config.as_deref().and_then(|p| p.to_str()), Some("cfg.toml"));
        assert_eq!(cli.analyze.tail, 7);
    }

    #[test]
    fn defaults_apply() {
        let cli = Cli::try_parse_from(["ccf-cli", "in.csv"]).unwrap();
        assert_eq!(cli.analyze.output_dir.to_str(), Some("output"));
        assert!(cli.analyze.config.is_none());
        assert_eq!(cli.analyze.tail, 14);
    }
}
