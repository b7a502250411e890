use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use holofolio_web::catalog::SiteContent;
use tracing_subscriber::EnvFilter;

mod check;
mod preview;

/// Companion tool for the holofolio portfolio page.
#[derive(Parser)]
#[command(name = "holofolio")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Directory the page and its assets are deployed from
    #[arg(short, long, global = true, default_value = ".")]
    site: PathBuf,

    /// Site content file (.yaml); defaults to the content built into the page
    #[arg(short, long, global = true)]
    content: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that every project asset exists and every link is a URL
    Check {
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Render one project's modal to a standalone HTML file
    Preview {
        /// Project identifier (the card's data-project value)
        project: String,

        /// Output directory for the rendered file
        #[arg(short, long, default_value = "output")]
        output: PathBuf,
    },
}

fn load_content(path: Option<&Path>) -> anyhow::Result<SiteContent> {
    match path {
        Some(path) => {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SiteContent::from_yaml(&yaml)
                .with_context(|| format!("failed to parse {}", path.display()))
        }
        None => Ok(SiteContent::embedded()?),
    }
}

fn run_check(content: &SiteContent, site: &Path, json: bool) -> anyhow::Result<()> {
    let report = check::check(content, site);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        for issue in &report.issues {
            println!("{issue}");
        }
        println!(
            "Checked {} project(s) and {} skill(s): {} issue(s)",
            report.projects,
            report.skills,
            report.issues.len()
        );
    }

    if !report.is_clean() {
        anyhow::bail!("{} issue(s) found in {}", report.issues.len(), site.display());
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let content = load_content(cli.content.as_deref())?;

    match cli.command {
        Commands::Check { json } => run_check(&content, &cli.site, json)?,
        Commands::Preview { project, output } => {
            let path = preview::preview(&content, &project, &cli.site, &output)?;
            println!("Rendered '{}' to {}", project, path.display());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_check_with_defaults() {
        let cli = Cli::try_parse_from(["holofolio", "check"]).unwrap();
        assert_eq!(cli.site, PathBuf::from("."));
        assert!(cli.content.is_none());
        assert!(matches!(cli.command, Commands::Check { json: false }));
    }

    #[test]
    fn cli_parses_check_json() {
        let cli = Cli::try_parse_from([
            "holofolio", "check", "--site", "public", "--content", "site.yaml", "--json",
        ])
        .unwrap();
        assert_eq!(cli.site, PathBuf::from("public"));
        assert_eq!(cli.content, Some(PathBuf::from("site.yaml")));
        assert!(matches!(cli.command, Commands::Check { json: true }));
    }

    #[test]
    fn cli_parses_preview_subcommand() {
        let cli = Cli::try_parse_from([
            "holofolio", "preview", "snake", "--output", "previews", "-s", "public",
        ])
        .unwrap();
        assert_eq!(cli.site, PathBuf::from("public"));
        match cli.command {
            Commands::Preview { project, output } => {
                assert_eq!(project, "snake");
                assert_eq!(output, PathBuf::from("previews"));
            }
            _ => panic!("Expected Preview command"),
        }
    }

    #[test]
    fn cli_preview_output_defaults() {
        let cli = Cli::try_parse_from(["holofolio", "preview", "clock"]).unwrap();
        match cli.command {
            Commands::Preview { output, .. } => assert_eq!(output, PathBuf::from("output")),
            _ => panic!("Expected Preview command"),
        }
    }

    #[test]
    fn cli_requires_subcommand() {
        assert!(Cli::try_parse_from(["holofolio"]).is_err());
    }

    #[test]
    fn cli_preview_requires_project() {
        assert!(Cli::try_parse_from(["holofolio", "preview"]).is_err());
    }

    #[test]
    fn load_content_defaults_to_embedded() {
        let content = load_content(None).unwrap();
        assert!(content.projects.contains_key("clock"));
        assert!(content.projects.contains_key("snake"));
    }

    #[test]
    fn load_content_reports_missing_file() {
        let err = load_content(Some(Path::new("does/not/exist.yaml"))).unwrap_err();
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
