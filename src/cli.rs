use std::path::PathBuf;

use clap::{Parser, Subcommand};
use contractor::config::ColorMode;
use contractor::Style;

/// Contractor - contract-driven components with merge-safe upgrades
#[derive(Parser, Debug)]
#[command(name = "contractor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Machine-readable output (NDJSON events / JSON results)
    #[arg(long, global = true)]
    pub json: bool,

    /// When to use colors
    #[arg(long, value_enum, global = true)]
    pub color: Option<ColorMode>,

    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Project root (defaults to the current directory)
    #[arg(long, global = true, value_name = "DIR")]
    pub project: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a component from its contract and start tracking it
    Install {
        /// Component name (e.g. Button)
        component: String,

        /// Contract version (defaults to the latest)
        #[arg(long)]
        version: Option<String>,

        /// Output style
        #[arg(long, value_enum)]
        style: Option<Style>,

        /// Output directory, relative to the project root
        #[arg(long, value_name = "DIR")]
        out: Option<PathBuf>,

        /// Overwrite an existing install
        #[arg(short, long)]
        force: bool,

        /// Skip interactive prompts
        #[arg(short, long)]
        yes: bool,
    },

    /// Move an installed component to a newer contract, keeping local edits
    Upgrade {
        component: String,

        /// Target version (defaults to the latest)
        #[arg(long)]
        to: Option<String>,

        /// Leave conflicts for manual resolution only
        #[arg(long)]
        no_semantic: bool,

        /// Merge and report without writing
        #[arg(long)]
        dry_run: bool,

        /// Do not write files that still contain conflicts
        #[arg(long)]
        no_write_conflicts: bool,
    },

    /// Preview the generated change between two contract versions
    Diff {
        component: String,

        /// Base version (defaults to the installed one)
        #[arg(long)]
        from: Option<String>,

        /// Target version (defaults to the latest)
        #[arg(long)]
        to: Option<String>,

        /// Context lines around each change
        #[arg(long, value_name = "N")]
        context: Option<usize>,

        /// Style to generate with (defaults to the installed one)
        #[arg(long, value_enum)]
        style: Option<Style>,
    },

    /// Show the state of installed components
    Status {
        /// Limit to one component
        component: Option<String>,
    },

    /// List available contract versions
    Versions { component: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_install() {
        let cli = Cli::try_parse_from([
            "contractor",
            "install",
            "Button",
            "--version",
            "1.2.0",
            "--style",
            "css-modules",
            "--out",
            "app/ui",
            "-y",
        ])
        .unwrap();

        if let Commands::Install {
            component,
            version,
            style,
            out,
            force,
            yes,
        } = cli.command
        {
            assert_eq!(component, "Button");
            assert_eq!(version.as_deref(), Some("1.2.0"));
            assert_eq!(style, Some(Style::CssModules));
            assert_eq!(out, Some(PathBuf::from("app/ui")));
            assert!(!force);
            assert!(yes);
        } else {
            panic!("Expected Install command");
        }
    }

    #[test]
    fn test_cli_parse_upgrade_flags() {
        let cli = Cli::try_parse_from([
            "contractor",
            "upgrade",
            "Button",
            "--to",
            "2.0.0",
            "--no-semantic",
            "--dry-run",
            "--no-write-conflicts",
        ])
        .unwrap();

        if let Commands::Upgrade {
            to,
            no_semantic,
            dry_run,
            no_write_conflicts,
            ..
        } = cli.command
        {
            assert_eq!(to.as_deref(), Some("2.0.0"));
            assert!(no_semantic);
            assert!(dry_run);
            assert!(no_write_conflicts);
        } else {
            panic!("Expected Upgrade command");
        }
    }

    #[test]
    fn test_cli_parse_diff() {
        let cli =
            Cli::try_parse_from(["contractor", "diff", "Button", "--from", "1.0.0", "--context", "1"])
                .unwrap();
        if let Commands::Diff {
            from, to, context, ..
        } = cli.command
        {
            assert_eq!(from.as_deref(), Some("1.0.0"));
            assert_eq!(to, None);
            assert_eq!(context, Some(1));
        } else {
            panic!("Expected Diff command");
        }
    }

    #[test]
    fn test_cli_status_component_is_optional() {
        let cli = Cli::try_parse_from(["contractor", "status"]).unwrap();
        assert!(matches!(cli.command, Commands::Status { component: None }));
    }

    #[test]
    fn test_cli_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "contractor",
            "versions",
            "Button",
            "--json",
            "-vv",
            "--color",
            "never",
            "--project",
            "web",
        ])
        .unwrap();
        assert!(cli.json);
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.color, Some(ColorMode::Never));
        assert_eq!(cli.project, Some(PathBuf::from("web")));
    }

    #[test]
    fn test_cli_rejects_unknown_style() {
        assert!(Cli::try_parse_from(["contractor", "install", "Button", "--style", "sass"]).is_err());
    }
}
