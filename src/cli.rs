//! Command-line interface for inkdown.

use clap::Parser;
use std::path::PathBuf;

use crate::config::FileConfig;
use crate::pipeline::RenderOptions;
use crate::table::TableStyle;

/// inkdown — render markdown as colorized terminal output
#[derive(Parser, Debug)]
#[command(name = "inkdown")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Markdown file to render (reads stdin when omitted)
    pub input: Option<PathBuf>,

    /// Output width in columns
    #[arg(long, value_name = "COLS")]
    pub width: Option<usize>,

    /// Left padding in columns
    #[arg(long, value_name = "COLS")]
    pub pad: Option<usize>,

    /// Suppress all color and attribute output
    #[arg(long)]
    pub no_color: bool,

    /// Disable the pattern grammar layer
    #[arg(long)]
    pub no_patterns: bool,

    /// Collapse pattern-matched numbered items to one truncated line
    #[arg(long)]
    pub truncate: bool,

    /// Use ASCII table borders
    #[arg(long)]
    pub ascii_tables: bool,
}

impl Cli {
    /// Merge CLI flags over the file config. Flags win.
    pub fn into_options(self, file: FileConfig) -> RenderOptions {
        let mut options = file.into_options();
        if let Some(width) = self.width {
            options.width = width;
        }
        if let Some(pad) = self.pad {
            options.pad = pad;
        }
        if self.no_color {
            options.no_color = true;
        }
        if self.no_patterns {
            options.patterns_enabled = false;
        }
        if self.truncate {
            options.truncate_mode = true;
        }
        if self.ascii_tables {
            options.table_style = TableStyle::Ascii;
        }
        options
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("inkdown").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_defaults_pass_through() {
        let options = parse(&[]).into_options(FileConfig::default());
        assert_eq!(options.width, 80);
        assert!(options.patterns_enabled);
        assert!(!options.no_color);
    }

    #[test]
    fn test_flags_override_file_config() {
        let file: FileConfig = serde_yaml_ng::from_str("width: 120\ncolor: true\n").unwrap();
        let options = parse(&["--width", "60", "--no-color"]).into_options(file);
        assert_eq!(options.width, 60);
        assert!(options.no_color);
    }

    #[test]
    fn test_file_config_used_when_flag_absent() {
        let file: FileConfig = serde_yaml_ng::from_str("width: 120\n").unwrap();
        let options = parse(&[]).into_options(file);
        assert_eq!(options.width, 120);
    }

    #[test]
    fn test_ascii_tables_flag() {
        let options = parse(&["--ascii-tables"]).into_options(FileConfig::default());
        assert_eq!(options.table_style, TableStyle::Ascii);
    }

    #[test]
    fn test_positional_input() {
        let cli = parse(&["notes.md"]);
        assert_eq!(cli.input.as_deref(), Some(std::path::Path::new("notes.md")));
    }
}
