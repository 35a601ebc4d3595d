//! notedown CLI - Markdown note rendering tool

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use notedown::parser::parse_files;
use notedown::render::{self, RenderStats};
use notedown::{parse_file_with_options, Document, JsonFormat, ParseOptions, RenderOptions};

#[derive(Parser)]
#[command(name = "notedown")]
#[command(version)]
#[command(about = "Render Markdown notes to HTML, text, and JSON sections", long_about = None)]
struct Cli {
    /// Input Markdown file
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output file (stdout if not specified)
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a note to HTML
    Html {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Leave code blocks unhighlighted
        #[arg(long)]
        no_highlight: bool,

        /// Render $x$ spans as math
        #[arg(long)]
        math: bool,

        /// Escape raw HTML in the note
        #[arg(long)]
        escape_html: bool,

        /// Emit a complete HTML page instead of a fragment
        #[arg(long)]
        standalone: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Render a note to plain text
    Text {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Dump the scanned sections as JSON
    Json {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// List the scanned sections, one per line
    Sections {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show note statistics and outline
    Info {
        /// Input Markdown file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print statistics as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Convert many notes to HTML, text and JSON
    Convert {
        /// Input Markdown files
        #[arg(value_name = "FILE", required = true)]
        inputs: Vec<PathBuf>,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "notedown_output")]
        output: PathBuf,

        #[command(flatten)]
        source: SourceArgs,
    },

    /// Show version information
    Version,
}

/// How input files are read.
#[derive(Args, Clone, Copy, Default)]
struct SourceArgs {
    /// Turn literal \n escape sequences into newlines
    #[arg(long)]
    unescape_newlines: bool,

    /// Replace invalid UTF-8 instead of failing
    #[arg(long)]
    lenient: bool,
}

impl From<SourceArgs> for ParseOptions {
    fn from(args: SourceArgs) -> Self {
        let options = ParseOptions::new().with_unescape_newlines(args.unescape_newlines);
        if args.lenient {
            options.lenient()
        } else {
            options
        }
    }
}

type CliResult = Result<(), Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Html {
            input,
            output,
            no_highlight,
            math,
            escape_html,
            standalone,
            source,
        }) => {
            let options = RenderOptions::new()
                .with_highlight(!no_highlight)
                .with_math(math)
                .with_escape_html(escape_html);
            cmd_html(&input, output.as_deref(), source, &options, standalone)
        }
        Some(Commands::Text {
            input,
            output,
            source,
        }) => cmd_text(&input, output.as_deref(), source),
        Some(Commands::Json {
            input,
            output,
            compact,
            source,
        }) => cmd_json(&input, output.as_deref(), compact, source),
        Some(Commands::Sections { input, source }) => cmd_sections(&input, source),
        Some(Commands::Info {
            input,
            json,
            source,
        }) => cmd_info(&input, json, source),
        Some(Commands::Convert {
            inputs,
            output,
            source,
        }) => cmd_convert(&inputs, &output, source),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: render to HTML if input is provided
            if let Some(input) = cli.input {
                cmd_html(
                    &input,
                    cli.output.as_deref(),
                    SourceArgs::default(),
                    &RenderOptions::default(),
                    false,
                )
            } else {
                println!("{}", "Usage: notedown <FILE> [OUTPUT]".yellow());
                println!("       notedown --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn emit(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_html(
    input: &Path,
    output: Option<&Path>,
    source: SourceArgs,
    options: &RenderOptions,
    standalone: bool,
) -> CliResult {
    let doc = parse_file_with_options(input, source.into())?;
    let mut html = render::to_html(&doc, options)?;

    if standalone {
        html = standalone_page(&page_title(input, &doc), &html);
    }

    emit(output, &html)
}

fn cmd_text(input: &Path, output: Option<&Path>, source: SourceArgs) -> CliResult {
    let doc = parse_file_with_options(input, source.into())?;
    let text = render::to_text(&doc, &RenderOptions::default())?;
    emit(output, &text)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool, source: SourceArgs) -> CliResult {
    let doc = parse_file_with_options(input, source.into())?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    emit(output, &json)
}

fn cmd_sections(input: &Path, source: SourceArgs) -> CliResult {
    let doc = parse_file_with_options(input, source.into())?;

    for (i, section) in doc.iter().enumerate() {
        let level = section
            .level()
            .map(|level| format!(" h{}", level))
            .unwrap_or_default();
        println!(
            "{:>4}  {}{}  {}",
            (i + 1).to_string().dimmed(),
            section.kind().as_str().cyan(),
            level.cyan(),
            preview(section.content(), 60)
        );
    }

    Ok(())
}

fn cmd_info(input: &Path, json: bool, source: SourceArgs) -> CliResult {
    let doc = parse_file_with_options(input, source.into())?;
    let result = render::to_html_with_stats(&doc, &RenderOptions::new().with_highlight(false))?;
    let stats = result.stats;

    if json {
        println!("{}", serde_json::to_string_pretty(&stats)?);
        return Ok(());
    }

    println!("{}", "Note Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!("{}: {}", "Sections".bold(), doc.len());
    print_stats(&stats);

    let outline = doc.outline();
    if !outline.is_empty() {
        println!();
        println!("{}", "Outline".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        for item in &outline.items {
            print_outline_item(item, 0);
        }
    }

    Ok(())
}

fn print_stats(stats: &RenderStats) {
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraph lines".bold(), stats.text_count);
    println!(
        "{}: {} ({} lines)",
        "Code blocks".bold(),
        stats.code_count,
        stats.code_line_count
    );
    println!(
        "{}: {} ({} items)",
        "Lists".bold(),
        stats.list_count,
        stats.list_item_count
    );
    println!("{}: {}", "Quotes".bold(), stats.quote_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Dividers".bold(), stats.divider_count);
    println!("{}: {}", "Words".bold(), stats.word_count);
    println!("{}: {}", "Characters".bold(), stats.char_count);
}

fn print_outline_item(item: &notedown::OutlineItem, depth: usize) {
    println!("{}{} {}", "  ".repeat(depth), "•".dimmed(), item.title);
    for child in &item.children {
        print_outline_item(child, depth + 1);
    }
}

fn cmd_convert(inputs: &[PathBuf], output_dir: &Path, source: SourceArgs) -> CliResult {
    fs::create_dir_all(output_dir)?;

    let pb = ProgressBar::new(inputs.len() as u64 + 1);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing notes...");
    let parsed = parse_files(inputs, &source.into());
    pb.inc(1);

    let options = RenderOptions::default();
    let mut failed = 0;
    let mut used = HashSet::new();
    for (path, result) in parsed {
        pb.set_message(path.display().to_string());
        match result {
            Ok(doc) => {
                let stem = unique_stem(&path, &mut used);
                let written = write_outputs(&path, &stem, &doc, output_dir, &options)?;
                log::debug!("wrote {} outputs for {} as {}", written, path.display(), stem);
            }
            Err(e) => {
                failed += 1;
                pb.println(format!("{} {}: {}", "Skipped".yellow(), path.display(), e));
            }
        }
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    let converted = inputs.len() - failed;
    println!(
        "\n{} {} converted, {} failed -> {}",
        "Done!".green().bold(),
        converted,
        failed,
        output_dir.display()
    );

    if failed > 0 && converted == 0 {
        return Err("no input could be converted".into());
    }
    Ok(())
}

/// Output name for `input`: its file stem, suffixed with `-N` when an
/// earlier input in the same batch already took that name.
fn unique_stem(input: &Path, used: &mut HashSet<String>) -> String {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "note".to_string());

    let mut candidate = stem.clone();
    let mut n = 1;
    while !used.insert(candidate.clone()) {
        candidate = format!("{}-{}", stem, n);
        n += 1;
    }
    candidate
}

/// Write `<stem>.html`, `<stem>.txt` and `<stem>.json` for one note.
fn write_outputs(
    input: &Path,
    stem: &str,
    doc: &Document,
    output_dir: &Path,
    options: &RenderOptions,
) -> Result<usize, Box<dyn std::error::Error>> {
    let html = standalone_page(&page_title(input, doc), &render::to_html(doc, options)?);
    fs::write(output_dir.join(format!("{}.html", stem)), html)?;

    let text = render::to_text(doc, options)?;
    fs::write(output_dir.join(format!("{}.txt", stem)), text)?;

    let json = render::to_json(doc, JsonFormat::Pretty)?;
    fs::write(output_dir.join(format!("{}.json", stem)), json)?;

    Ok(3)
}

/// First title in the note, or the file stem.
fn page_title(input: &Path, doc: &Document) -> String {
    doc.iter()
        .find(|section| section.is_heading())
        .map(|section| section.content().to_string())
        .or_else(|| {
            input
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
        })
        .unwrap_or_default()
}

fn standalone_page(title: &str, body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{}</body>\n</html>\n",
        html_escape::encode_text(title),
        body
    )
}

/// First line of `content`, cut to `max` characters.
fn preview(content: &str, max: usize) -> String {
    let first = content.lines().next().unwrap_or_default();
    let mut out: String = first.chars().take(max).collect();
    if first.chars().count() > max || content.contains('\n') {
        out.push('…');
    }
    out
}

fn cmd_version() {
    println!("{} {}", "notedown".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Markdown note rendering tool");
    println!();
    println!("License: MIT");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preview() {
        assert_eq!(preview("short", 10), "short");
        assert_eq!(preview("abcdef", 3), "abc…");
        assert_eq!(preview("one\ntwo", 10), "one…");
        assert_eq!(preview("", 10), "");
    }

    #[test]
    fn test_page_title() {
        let doc = notedown::parse("text\n## Second\n# First");
        assert_eq!(page_title(Path::new("x.md"), &doc), "Second");

        let doc = notedown::parse("plain");
        assert_eq!(page_title(Path::new("dir/note.md"), &doc), "note");
    }

    #[test]
    fn test_standalone_page_escapes_title() {
        let page = standalone_page("a < b", "<p>x</p>\n");
        assert!(page.contains("<title>a &lt; b</title>"));
        assert!(page.ends_with("<p>x</p>\n</body>\n</html>\n"));

        let page = standalone_page("Q&A <draft>", "");
        assert!(page.contains("<title>Q&amp;A &lt;draft&gt;</title>"));
    }

    #[test]
    fn test_source_args_to_options() {
        let options: ParseOptions = SourceArgs {
            unescape_newlines: true,
            lenient: true,
        }
        .into();
        assert!(options.unescape_newlines);
        assert_eq!(options.error_mode, notedown::ErrorMode::Lenient);
    }

    #[test]
    fn test_convert_writes_three_files() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("note.md");
        fs::write(&input, "# Title\n\n- a\n- b\n").unwrap();
        let out = dir.path().join("out");

        cmd_convert(&[input], &out, SourceArgs::default()).unwrap();

        let html = fs::read_to_string(out.join("note.html")).unwrap();
        assert!(html.contains("<title>Title</title>"));
        assert!(html.contains("<h1>Title</h1>"));
        assert_eq!(
            fs::read_to_string(out.join("note.txt")).unwrap(),
            "Title\n\n- a\n- b"
        );
        assert!(fs::read_to_string(out.join("note.json"))
            .unwrap()
            .contains("\"listKind\": \"unordered\""));
    }

    #[test]
    fn test_convert_same_stem_in_different_dirs() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("a")).unwrap();
        fs::create_dir_all(dir.path().join("b")).unwrap();
        let first = dir.path().join("a").join("note.md");
        let second = dir.path().join("b").join("note.md");
        fs::write(&first, "# Alpha").unwrap();
        fs::write(&second, "# Beta").unwrap();
        let out = dir.path().join("out");

        cmd_convert(&[first, second], &out, SourceArgs::default()).unwrap();

        assert_eq!(fs::read_to_string(out.join("note.txt")).unwrap(), "Alpha");
        assert_eq!(fs::read_to_string(out.join("note-1.txt")).unwrap(), "Beta");
        assert!(out.join("note.html").exists());
        assert!(out.join("note-1.json").exists());
    }

    #[test]
    fn test_unique_stem() {
        let mut used = HashSet::new();
        assert_eq!(unique_stem(Path::new("x/note.md"), &mut used), "note");
        assert_eq!(unique_stem(Path::new("y/note.md"), &mut used), "note-1");
        assert_eq!(unique_stem(Path::new("note-1.md"), &mut used), "note-1-1");
        assert_eq!(unique_stem(Path::new("z/note.txt"), &mut used), "note-2");
    }

    #[test]
    fn test_convert_reports_total_failure() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing.md");
        assert!(cmd_convert(&[missing], &dir.path().join("out"), SourceArgs::default()).is_err());
    }
}
