//! flowdoc CLI - compose document scripts into Markdown, text, and JSON

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use flowdoc::render::{self, OutputFormat, RenderStats};
use flowdoc::{
    load_script, Document, DocumentScript, JsonFormat, PageBreakStyle, RenderOptions,
};

#[derive(Parser)]
#[command(name = "flowdoc")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Compose structured documents with linked tables of contents", long_about = None)]
struct Cli {
    /// Input script (JSON)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Output directory
    #[arg(value_name = "OUTPUT")]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a script to all formats (Markdown, text, JSON)
    Convert {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Page break rendering
        #[arg(long, value_enum, default_value = "rule")]
        page_breaks: BreakMode,
    },

    /// Render a script to Markdown
    #[command(alias = "md")]
    Markdown {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Include YAML frontmatter
        #[arg(short, long)]
        frontmatter: bool,

        /// Page break rendering
        #[arg(long, value_enum, default_value = "rule")]
        page_breaks: BreakMode,

        /// Wrap keep-together groups in HTML comments
        #[arg(long)]
        mark_groups: bool,

        /// Leave out the cover page
        #[arg(long)]
        no_cover: bool,

        /// Write text without escaping Markdown characters
        #[arg(long)]
        no_escape: bool,
    },

    /// Render a script to plain text
    Text {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Page break rendering
        #[arg(long, value_enum, default_value = "rule")]
        page_breaks: BreakMode,
    },

    /// Render a script to JSON (the content stream with group boundaries)
    Json {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Output compact JSON
        #[arg(long)]
        compact: bool,
    },

    /// List table of contents entries and their anchors
    Toc {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Check that every TOC link resolves to a heading
    Check {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show document information
    Info {
        /// Input script
        #[arg(value_name = "FILE")]
        input: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum BreakMode {
    /// Horizontal rule
    Rule,
    /// HTML page-break element
    Html,
    /// Drop page breaks
    Omit,
}

impl From<BreakMode> for PageBreakStyle {
    fn from(mode: BreakMode) -> Self {
        match mode {
            BreakMode::Rule => PageBreakStyle::Rule,
            BreakMode::Html => PageBreakStyle::Html,
            BreakMode::Omit => PageBreakStyle::Omit,
        }
    }
}

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Convert {
            input,
            output,
            page_breaks,
        }) => cmd_convert(&input, output.as_deref(), page_breaks),
        Some(Commands::Markdown {
            input,
            output,
            frontmatter,
            page_breaks,
            mark_groups,
            no_cover,
            no_escape,
        }) => {
            let options = RenderOptions::new()
                .with_frontmatter(frontmatter)
                .with_page_breaks(page_breaks.into())
                .with_group_markers(mark_groups)
                .with_cover(!no_cover)
                .with_escaping(!no_escape);
            cmd_markdown(&input, output.as_deref(), &options)
        }
        Some(Commands::Text {
            input,
            output,
            page_breaks,
        }) => cmd_text(&input, output.as_deref(), page_breaks),
        Some(Commands::Json {
            input,
            output,
            compact,
        }) => cmd_json(&input, output.as_deref(), compact),
        Some(Commands::Toc { input }) => cmd_toc(&input),
        Some(Commands::Check { input, json }) => cmd_check(&input, json),
        Some(Commands::Info { input }) => cmd_info(&input),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => {
            // Default behavior: convert if input is provided
            if let Some(input) = cli.input {
                cmd_convert(&input, cli.output.as_deref(), BreakMode::Rule)
            } else {
                println!("{}", "Usage: flowdoc <FILE> [OUTPUT]".yellow());
                println!("       flowdoc --help for more information");
                Ok(())
            }
        }
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn compose(input: &Path) -> CliResult<(DocumentScript, Document)> {
    let mut script = load_script(input)?;
    if script.metadata.created.is_none() {
        script.metadata = script.metadata.stamped();
    }
    let doc = script.compose()?;
    log::info!(
        "composed {} ({} stream items)",
        input.display(),
        doc.stream.len()
    );
    Ok((script, doc))
}

fn write_or_print(output: Option<&Path>, content: &str) -> CliResult {
    if let Some(path) = output {
        fs::write(path, content)?;
        println!("{} {}", "Saved to".green(), path.display());
    } else {
        println!("{}", content);
    }
    Ok(())
}

fn cmd_convert(input: &Path, output: Option<&Path>, page_breaks: BreakMode) -> CliResult {
    let output_dir = output.map(|p| p.to_path_buf()).unwrap_or_else(|| {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        PathBuf::from(format!("{}_output", stem))
    });

    fs::create_dir_all(&output_dir)?;

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")?
            .progress_chars("#>-"),
    );

    pb.set_message("Composing document...");
    let (_, doc) = compose(input)?;
    pb.inc(1);

    let render_options = RenderOptions::new()
        .with_frontmatter(true)
        .with_page_breaks(page_breaks.into());

    let stem = input.file_stem().unwrap_or_default().to_string_lossy();
    let mut written = Vec::new();
    for (format, message) in [
        (OutputFormat::Markdown, "Generating Markdown..."),
        (OutputFormat::Text, "Generating text..."),
        (OutputFormat::Json, "Generating JSON..."),
    ] {
        pb.set_message(message);
        let filename = format!("{}.{}", stem, format.extension());
        render::write_to(&doc, output_dir.join(&filename), format, &render_options)?;
        written.push(filename);
        pb.inc(1);
    }

    pb.finish_with_message("Done!");

    println!("\n{}", "Output files:".green().bold());
    for (i, filename) in written.iter().enumerate() {
        let branch = if i + 1 == written.len() { "└─" } else { "├─" };
        println!("  {} {}", branch.dimmed(), filename);
    }

    let report = doc.link_report();
    if !report.unresolved.is_empty() {
        println!(
            "\n{} {} unresolved link(s); run `flowdoc check` for details",
            "Warning:".yellow().bold(),
            report.unresolved.len()
        );
    }

    Ok(())
}

fn cmd_markdown(input: &Path, output: Option<&Path>, options: &RenderOptions) -> CliResult {
    let (_, doc) = compose(input)?;
    let markdown = render::to_markdown(&doc, options)?;
    write_or_print(output, &markdown)
}

fn cmd_text(input: &Path, output: Option<&Path>, page_breaks: BreakMode) -> CliResult {
    let (_, doc) = compose(input)?;
    let options = RenderOptions::new().with_page_breaks(page_breaks.into());
    let text = render::to_text(&doc, &options)?;
    write_or_print(output, &text)
}

fn cmd_json(input: &Path, output: Option<&Path>, compact: bool) -> CliResult {
    let (_, doc) = compose(input)?;

    let format = if compact {
        JsonFormat::Compact
    } else {
        JsonFormat::Pretty
    };

    let json = render::to_json(&doc, format)?;
    write_or_print(output, &json)
}

fn cmd_toc(input: &Path) -> CliResult {
    let (script, doc) = compose(input)?;

    println!("{}", "Table of Contents".cyan().bold());
    println!("{}", "─".repeat(60).dimmed());

    if script.toc.is_empty() {
        println!("{}", "(no entries)".dimmed());
        return Ok(());
    }

    for entry in &script.toc {
        let indent = if entry.is_sub_level { "    " } else { "" };
        let anchor = entry.anchor();
        let marker = if doc.resolve(&anchor).is_some() {
            "✓".green()
        } else {
            "✗".red()
        };
        println!(
            "{} {}{} {}  {}",
            marker,
            indent,
            entry.number.bold(),
            entry.title,
            anchor.href().dimmed()
        );
    }

    Ok(())
}

fn cmd_check(input: &Path, json: bool) -> CliResult {
    let (_, doc) = compose(input)?;
    let report = doc.link_report();

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{}", "Link Report".cyan().bold());
        println!("{}", "─".repeat(40).dimmed());
        println!("{}: {}", "Anchors".bold(), report.anchor_count);
        println!("{}: {}", "Links".bold(), report.link_count);

        for anchor in &report.unresolved {
            println!("{} {}", "unresolved".red(), anchor.href());
        }
        for anchor in &report.duplicates {
            println!("{} {}", "duplicate".yellow(), anchor.href());
        }
        if report.is_clean() {
            println!("{}", "All links resolve.".green().bold());
        }
    }

    if !report.unresolved.is_empty() {
        return Err(format!("{} unresolved link(s)", report.unresolved.len()).into());
    }
    Ok(())
}

fn cmd_info(input: &Path) -> CliResult {
    let (script, doc) = compose(input)?;
    let meta = &doc.metadata;

    println!("{}", "Document Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} x {} pt",
        "Page".bold(),
        doc.layout.width,
        doc.layout.height
    );

    let fields = [
        ("Title", &meta.title),
        ("Subtitle", &meta.subtitle),
        ("Version", &meta.version),
        ("Author", &meta.author),
        ("Classification", &meta.classification),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            println!("{}: {}", label.bold(), value);
        }
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let stats = RenderStats::collect(&doc);
    println!("{}: {}", "Instructions".bold(), script.body.len());
    println!("{}: {}", "TOC entries".bold(), script.toc.len());
    println!("{}: {}", "Headings".bold(), stats.heading_count);
    println!("{}: {}", "Paragraphs".bold(), stats.paragraph_count);
    println!("{}: {}", "Tables".bold(), stats.table_count);
    println!("{}: {}", "Code blocks".bold(), stats.code_block_count);
    println!("{}: {}", "Callouts".bold(), stats.callout_count);
    if stats.badge_row_count > 0 {
        println!("{}: {}", "Findings".bold(), stats.finding_count);
    }
    println!("{}: {}", "Keep-together groups".bold(), stats.group_count);
    println!("{}: {}", "Page breaks".bold(), stats.page_break_count);
    println!("{}: {}", "Words".bold(), stats.word_count);

    Ok(())
}

fn cmd_version() {
    println!("{} {}", "flowdoc".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Structured document composer");
    println!();
    println!("License: MIT");
}
