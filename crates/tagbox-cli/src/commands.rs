use std::fs;
use std::path::Path;

use anyhow::{bail, Context};
use colored::Colorize;
use serde_json::{json, Value};
use tagbox_core::content::normalize;
use tagbox_core::{ChangeKind, ChangeRecord, RenderOptions, TagBox, TAG_ID};
use tagbox_diff::{diff_documents, DiffLine};
use tracing::{debug, info};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    let format = cli.format;
    match cli.command {
        Command::Get(args) => cmd_get(args, &format),
        Command::Has(args) => cmd_has(args, &format),
        Command::Set(args) => cmd_set(args),
        Command::Del(args) => cmd_del(args),
        Command::Print(args) => cmd_print(args),
        Command::Diff(args) => cmd_diff(args, &format),
        Command::Merge(args) => cmd_merge(args),
        Command::Tags(args) => cmd_tags(args, &format),
    }
}

fn cmd_get(args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let b = open_box(&args.file, &args.tags)?;
    let value = b.get(args.path.as_str())?;
    match format {
        OutputFormat::Json => println!("{}", json!({"path": args.path, "value": value})),
        OutputFormat::Text => match value {
            Some(v) => println!("{}", serde_json::to_string_pretty(v)?),
            None => println!("{}", "(not found)".dimmed()),
        },
    }
    Ok(())
}

fn cmd_has(args: GetArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let b = open_box(&args.file, &args.tags)?;
    let present = b.has(args.path.as_str());
    match format {
        OutputFormat::Json => println!("{}", json!({"path": args.path, "present": present})),
        OutputFormat::Text if present => println!("{} {}", "✓".green(), args.path),
        OutputFormat::Text => println!("{} {}", "✗".red(), args.path),
    }
    Ok(())
}

fn cmd_set(args: SetArgs) -> anyhow::Result<()> {
    let mut b = open_box(&args.file, &args.tags)?;
    b.set(args.path.as_str(), parse_value(&args.value))?;
    finish(&args.file, &b, args.write)
}

fn cmd_del(args: DelArgs) -> anyhow::Result<()> {
    let mut b = open_box(&args.file, &args.tags)?;
    if b.del(args.path.as_str()).is_none() {
        eprintln!("{} nothing at {}", "note:".yellow(), args.path);
    }
    finish(&args.file, &b, args.write)
}

fn cmd_print(args: PrintArgs) -> anyhow::Result<()> {
    let b = TagBox::new(load_document(&args.file)?);
    let opts = RenderOptions::new()
        .show_hidden(args.show_hidden)
        .paths(args.paths)
        .pretty(args.pretty);
    println!("{}", b.to_json_string(&opts)?);
    Ok(())
}

fn cmd_diff(args: DiffArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let base = TagBox::new(load_document(&args.base)?);
    let other = load_document(&args.other)?;

    if args.text {
        let text = diff_documents(base.payload(), &normalize(&other))?;
        if text.is_empty() {
            println!("No changes.");
        }
        for hunk in &text.hunks {
            println!(
                "{}",
                format!(
                    "@@ -{},{} +{},{} @@",
                    hunk.old_start, hunk.old_count, hunk.new_start, hunk.new_count
                )
                .cyan()
            );
            for line in &hunk.lines {
                match line {
                    DiffLine::Added(_) => println!("{}", line.to_string().green()),
                    DiffLine::Removed(_) => println!("{}", line.to_string().red()),
                    DiffLine::Context(_) => println!("{line}"),
                }
            }
        }
        return Ok(());
    }

    let changes = base.diff(&other);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&changes)?),
        OutputFormat::Text => {
            if changes.is_empty() {
                println!("No changes.");
            }
            for record in &changes {
                println!("{}", paint(record));
            }
            println!(
                "{} new, {} deleted, {} edited, {} array",
                changes.additions(),
                changes.deletions(),
                changes.edits(),
                changes.array_changes()
            );
        }
    }
    Ok(())
}

fn cmd_merge(args: MergeArgs) -> anyhow::Result<()> {
    let mut base = TagBox::new(load_document(&args.base)?);
    let other = load_document(&args.other)?;
    debug!(base = %args.base.display(), other = %args.other.display(), "merging documents");
    base.merge(&other)?;
    finish(&args.base, &base, args.write)
}

fn cmd_tags(args: TagsArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let b = open_box(&args.file, &args.tags)?;
    match format {
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(&json!({
                "id": b.get_id(),
                "sequence": b.sequence(),
                "tags": b.tags(),
            }))?
        ),
        OutputFormat::Text => {
            println!("Id: {}", b.get_id().yellow());
            println!("Sequence: {}", b.sequence().to_string().dimmed());
            println!("Notify: {}", b.get_notify_tag());
            println!("Scope: {}", b.get_scope_tag().unwrap_or("(none)").cyan());
            match b.get_glossary_tag() {
                Some(g) => println!("Glossary: {}", Value::Object(g.clone())),
                None => println!("Glossary: (none)"),
            }
        }
    }
    Ok(())
}

// ---- helpers ----

fn load_document(path: &Path) -> anyhow::Result<Value> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("{} is not valid JSON", path.display()))
}

fn open_box(path: &Path, tags: &TagArgs) -> anyhow::Result<TagBox> {
    let mut b = TagBox::new(load_document(path)?);
    apply_tags(&mut b, tags)?;
    debug!(
        file = %path.display(),
        sequence = %b.sequence().short_id(),
        tags = b.tags().len(),
        "opened document"
    );
    Ok(b)
}

fn apply_tags(b: &mut TagBox, tags: &TagArgs) -> anyhow::Result<()> {
    if let Some(scope) = &tags.scope {
        b.set_scope_tag(scope.as_str());
    }
    if let Some(raw) = &tags.glossary {
        let parsed = serde_json::from_str::<Value>(raw).context("--glossary is not valid JSON")?;
        let Value::Object(map) = parsed else {
            bail!("--glossary must be a JSON object");
        };
        b.set_glossary_tag(Some(map));
    }
    if let Some(id) = &tags.id {
        b.add_tag(TAG_ID, id.as_str());
    }
    if tags.notify {
        b.set_notify_tag(true);
    }
    Ok(())
}

/// JSON when it parses, otherwise the raw text as a string.
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_owned()))
}

fn finish(path: &Path, b: &TagBox, write: bool) -> anyhow::Result<()> {
    let text = serde_json::to_string_pretty(b.payload())?;
    if write {
        fs::write(path, format!("{text}\n"))
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(file = %path.display(), bytes = text.len() + 1, "wrote document");
        println!("{} Wrote {}", "✓".green().bold(), path.display());
    } else {
        println!("{text}");
    }
    Ok(())
}

fn paint(record: &ChangeRecord) -> String {
    let line = record.to_string();
    match record.kind() {
        ChangeKind::New => line.green().to_string(),
        ChangeKind::Deleted => line.red().to_string(),
        ChangeKind::Edited => line.yellow().to_string(),
        ChangeKind::ArrayChange => line.cyan().to_string(),
    }
}
