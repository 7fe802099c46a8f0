use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "tbx",
    about = "TagBox — scoped, glossary-aware access to JSON documents",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Read the value at a path
    Get(GetArgs),
    /// Report whether a path holds a present value
    Has(GetArgs),
    /// Assign a JSON value at a path
    Set(SetArgs),
    /// Delete the value at a path
    Del(DelArgs),
    /// Print a document, optionally filtered
    Print(PrintArgs),
    /// Show the change records between two documents
    Diff(DiffArgs),
    /// Merge a document into another without deleting keys
    Merge(MergeArgs),
    /// Show the tags and identifiers of a document
    Tags(TagsArgs),
}

/// Tags applied to the box built from the input document.
#[derive(Args, Clone, Debug, Default)]
pub struct TagArgs {
    /// Dotted prefix applied to every path
    #[arg(long)]
    pub scope: Option<String>,
    /// Glossary as a JSON object, e.g. '{"x":"a"}'
    #[arg(long)]
    pub glossary: Option<String>,
    /// Explicit identifier
    #[arg(long)]
    pub id: Option<String>,
    /// Mark the box as a one-way notification
    #[arg(long)]
    pub notify: bool,
}

#[derive(Args)]
pub struct GetArgs {
    pub file: PathBuf,
    pub path: String,
    #[command(flatten)]
    pub tags: TagArgs,
}

#[derive(Args)]
pub struct SetArgs {
    pub file: PathBuf,
    pub path: String,
    /// JSON value; bare words are taken as strings
    pub value: String,
    /// Write the result back to the file
    #[arg(short, long)]
    pub write: bool,
    #[command(flatten)]
    pub tags: TagArgs,
}

#[derive(Args)]
pub struct DelArgs {
    pub file: PathBuf,
    pub path: String,
    #[arg(short, long)]
    pub write: bool,
    #[command(flatten)]
    pub tags: TagArgs,
}

#[derive(Args)]
pub struct PrintArgs {
    pub file: PathBuf,
    /// Only print these dotted paths (repeatable)
    #[arg(short, long = "path")]
    pub paths: Vec<String>,
    /// Keep top-level keys starting with '_'
    #[arg(long)]
    pub show_hidden: bool,
    #[arg(long)]
    pub pretty: bool,
}

#[derive(Args)]
pub struct DiffArgs {
    pub base: PathBuf,
    pub other: PathBuf,
    /// Show a line diff of the pretty-printed documents
    #[arg(long)]
    pub text: bool,
}

#[derive(Args)]
pub struct MergeArgs {
    pub base: PathBuf,
    pub other: PathBuf,
    /// Write the merged document back to BASE
    #[arg(short, long)]
    pub write: bool,
}

#[derive(Args)]
pub struct TagsArgs {
    pub file: PathBuf,
    #[command(flatten)]
    pub tags: TagArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_get() {
        let cli = Cli::try_parse_from(["tbx", "get", "doc.json", "a.b"]).unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("doc.json"));
            assert_eq!(args.path, "a.b");
            assert!(args.tags.scope.is_none());
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_get_with_tags() {
        let cli = Cli::try_parse_from([
            "tbx", "get", "doc.json", "c", "--scope", "a.b", "--glossary", r#"{"x":"a"}"#, "--notify",
        ])
        .unwrap();
        if let Command::Get(args) = cli.command {
            assert_eq!(args.tags.scope, Some("a.b".into()));
            assert_eq!(args.tags.glossary, Some(r#"{"x":"a"}"#.into()));
            assert!(args.tags.notify);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_set_write() {
        let cli = Cli::try_parse_from(["tbx", "set", "doc.json", "a.b", "42", "-w"]).unwrap();
        if let Command::Set(args) = cli.command {
            assert_eq!(args.value, "42");
            assert!(args.write);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_print_paths() {
        let cli = Cli::try_parse_from(["tbx", "print", "doc.json", "-p", "a.b.d", "--path", "x", "--show-hidden"]).unwrap();
        if let Command::Print(args) = cli.command {
            assert_eq!(args.paths, vec!["a.b.d", "x"]);
            assert!(args.show_hidden);
            assert!(!args.pretty);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_diff_text() {
        let cli = Cli::try_parse_from(["tbx", "diff", "a.json", "b.json", "--text"]).unwrap();
        if let Command::Diff(args) = cli.command {
            assert!(args.text);
        } else { panic!("wrong command"); }
    }

    #[test]
    fn parse_merge() {
        let cli = Cli::try_parse_from(["tbx", "merge", "a.json", "b.json"]).unwrap();
        assert!(matches!(cli.command, Command::Merge(_)));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::try_parse_from(["tbx", "--verbose", "tags", "doc.json"]).unwrap();
        assert!(cli.verbose);
    }

    #[test]
    fn parse_json_format() {
        let cli = Cli::try_parse_from(["tbx", "--format", "json", "has", "doc.json", "a"]).unwrap();
        assert!(matches!(cli.format, OutputFormat::Json));
        assert!(matches!(cli.command, Command::Has(_)));
    }
}
