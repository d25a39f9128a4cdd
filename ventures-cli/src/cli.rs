//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::model::InquiryStatus;

/// Innovation-management dashboard for events, vendors and engagements.
#[derive(Debug, Parser)]
#[command(name = "ventures", version, about = "Ventures dashboard")]
pub struct Args {
    /// Use the built-in demo data even when a backend is configured.
    #[arg(long, global = true)]
    pub demo: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// KPI cards, stage heat map and funding tracker (default).
    Dashboard,

    /// Events with their registration counts.
    Events,

    /// Vendor inquiries, newest first.
    Inquiries,

    /// Vendor applications with the inquiring company.
    Applications,

    /// Engagement pipeline, most recently updated first.
    Engagements,

    /// Move an inquiry to a new status.
    SetStatus {
        /// Inquiry id.
        #[arg(value_name = "INQUIRY_ID")]
        id: i64,

        /// One of: new, reviewing, accepted, rejected.
        #[arg(value_name = "STATUS")]
        status: InquiryStatus,
    },

    /// Upload a file and print its public URL.
    Upload {
        /// File to upload.
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Object path inside the bucket. Defaults to the file name.
        #[arg(long, value_name = "PATH", conflicts_with = "application")]
        path: Option<String>,

        /// Attach the upload to this application as its pitch deck.
        #[arg(long, value_name = "ID")]
        application: Option<i64>,
    },
}

impl Args {
    pub fn command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Dashboard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Args {
        Args::try_parse_from(std::iter::once("ventures").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_to_dashboard() {
        let args = parse(&[]);
        assert!(!args.demo);
        assert_eq!(args.command(), Commands::Dashboard);
    }

    #[test]
    fn test_set_status_parses_status() {
        let args = parse(&["set-status", "3", "Accepted", "--demo"]);
        assert!(args.demo);
        assert_eq!(
            args.command(),
            Commands::SetStatus {
                id: 3,
                status: InquiryStatus::Accepted,
            }
        );
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result = Args::try_parse_from(["ventures", "set-status", "3", "archived"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_path_conflicts_with_application() {
        let result = Args::try_parse_from([
            "ventures",
            "upload",
            "deck.pdf",
            "--path",
            "a/b.pdf",
            "--application",
            "2",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_upload_options() {
        let args = parse(&["upload", "deck.pdf", "--application", "2"]);
        assert_eq!(
            args.command(),
            Commands::Upload {
                file: PathBuf::from("deck.pdf"),
                path: None,
                application: Some(2),
            }
        );
    }
}
