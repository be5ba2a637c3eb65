//! Command-line arguments.

use std::path::PathBuf;

use clap::Parser;

/// Phonebook - personal contact directory
#[derive(Parser, Debug)]
#[command(name = "phonebook")]
#[command(author, version, about = "Personal contact directory with a text menu", long_about = None)]
pub struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long, env = "PHONEBOOK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Backing JSON file holding the contacts
    #[arg(long, env = "PHONEBOOK_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Contacts shown per page before pausing
    #[arg(long, env = "PHONEBOOK_PAGE_SIZE", value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    pub page_size: Option<usize>,

    /// Enable debug logging on stderr
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags() {
        let args = Args::try_parse_from(["phonebook"]).unwrap();
        assert!(!args.verbose);
        assert!(args.config.is_none());
    }

    #[test]
    fn test_all_flags() {
        let args = Args::try_parse_from([
            "phonebook",
            "--config",
            "pb.toml",
            "--data-file",
            "contacts.json",
            "--page-size",
            "10",
            "-v",
        ])
        .unwrap();
        assert_eq!(args.config, Some(PathBuf::from("pb.toml")));
        assert_eq!(args.data_file, Some(PathBuf::from("contacts.json")));
        assert_eq!(args.page_size, Some(10));
        assert!(args.verbose);
    }

    #[test]
    fn test_zero_page_size_rejected() {
        assert!(Args::try_parse_from(["phonebook", "--page-size", "0"]).is_err());
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Args::command().debug_assert();
    }
}
