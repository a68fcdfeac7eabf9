//! pleading CLI - line-numbered legal filing layout

use std::fs;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use pleading::layout::load_citation_patterns;
use pleading::model::classify_headings;
use pleading::render::{ApproximateMetrics, TextCanvas};
use pleading::{
    build_index_pdf, build_pdf, read_text_file, AlignMode, Error, Exhibit, Filing, FilingInfo,
    HeadingStyle, JsonFormat, LayoutOptions, TableOfContents, TocStyle,
};

#[derive(Parser)]
#[command(name = "pleading")]
#[command(version)]
#[command(about = "Lay out a plain-text legal filing as numbered pleading pages", long_about = None)]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
struct Cli {
    #[command(flatten)]
    build: BuildArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the filing PDF and its table of contents (default)
    Build(BuildArgs),

    /// Show how a filing text is split into header, sections and title blocks
    Inspect {
        /// Filing text file
        #[arg(value_name = "FILE")]
        input: PathBuf,

        /// Print layout statistics as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a saved filing snapshot
    ShowSnapshot {
        /// Snapshot JSON file
        #[arg(value_name = "PATH")]
        path: PathBuf,
    },

    /// Show version information
    Version,
}

#[derive(Args, Clone)]
struct BuildArgs {
    /// Law firm name, printed along the left edge of every page
    #[arg(long, env = "PLEADING_FIRM_NAME", required = true)]
    firm_name: Option<String>,

    /// Case name, printed at the top of every page
    #[arg(long = "case", env = "PLEADING_CASE", required = true)]
    case_name: Option<String>,

    /// Filing body text file
    #[arg(short, long, value_name = "FILE", required = true)]
    file: Option<PathBuf>,

    /// Output PDF
    #[arg(short, long, value_name = "FILE", default_value = "filing.pdf")]
    output: PathBuf,

    /// Exhibits as caption-file/image-file pairs
    #[arg(long, num_args = 1.., value_name = "CAPTION_FILE IMAGE_FILE")]
    exhibits: Vec<PathBuf>,

    /// Table of contents PDF; a JSON listing is written next to it
    #[arg(long, value_name = "FILE", default_value = "index.pdf")]
    index: PathBuf,

    /// Save the parsed filing as a JSON snapshot
    #[arg(long, value_name = "PATH", num_args = 0..=1, default_missing_value = "filing.json")]
    snapshot: Option<PathBuf>,

    /// Cover page text file
    #[arg(long, value_name = "FILE")]
    cover: Option<PathBuf>,

    /// Citation patterns JSON file (`[{"pattern": "...", "group": 1}]`)
    #[arg(long, value_name = "FILE", env = "PLEADING_CITATIONS")]
    citations: Option<PathBuf>,

    /// Document title
    #[arg(long)]
    title: Option<String>,

    /// Court name
    #[arg(long)]
    court: Option<String>,

    /// Filing date (YYYY-MM-DD)
    #[arg(long, value_parser = parse_date)]
    date_filed: Option<NaiveDate>,

    /// Body line alignment
    #[arg(long, value_enum, default_value = "caps")]
    align: AlignArg,

    /// Never centre numbered or bulleted lines
    #[arg(long)]
    keep_list_markers_left: bool,

    /// Also write the numbered pages as plain text
    #[arg(long, value_name = "PATH")]
    text: Option<PathBuf>,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum AlignArg {
    /// Centre all-caps lines
    Caps,
    /// Centre lines in a run of short lines
    ShortRun,
    /// As short-run, and centre a short first line
    LeadShortRun,
    /// Never centre body lines
    Left,
}

impl From<AlignArg> for AlignMode {
    fn from(arg: AlignArg) -> Self {
        match arg {
            AlignArg::Caps => AlignMode::Caps,
            AlignArg::ShortRun => AlignMode::ShortRun,
            AlignArg::LeadShortRun => AlignMode::LeadShortRun,
            AlignArg::Left => AlignMode::Left,
        }
    }
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Build(args)) => cmd_build(&args),
        Some(Commands::Inspect { input, json }) => cmd_inspect(&input, json),
        Some(Commands::ShowSnapshot { path }) => cmd_show_snapshot(&path),
        Some(Commands::Version) => {
            cmd_version();
            Ok(())
        }
        None => cmd_build(&cli.build),
    };

    if let Err(e) = result {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

/// Pair up `--exhibits` arguments and read each caption.
fn load_exhibits(args: &[PathBuf]) -> Result<Vec<Exhibit>, Error> {
    if args.len() % 2 != 0 {
        return Err(Error::OddExhibitArguments(args.len()));
    }
    args.chunks(2)
        .map(|pair| {
            let caption = read_text_file(&pair[0])?;
            Ok(Exhibit::new(caption.trim(), &pair[1]))
        })
        .collect()
}

/// JSON listing written next to the index PDF, never the index itself.
fn index_json_path(index: &Path) -> PathBuf {
    let is_json = index
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if !is_json {
        return index.with_extension("json");
    }
    let stem = index.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default();
    index.with_file_name(format!("{}.entries.json", stem))
}

fn cmd_build(args: &BuildArgs) -> Result<(), Box<dyn std::error::Error>> {
    let (Some(firm_name), Some(case_name), Some(input)) = (&args.firm_name, &args.case_name, &args.file)
    else {
        return Err("--firm-name, --case and --file are required".into());
    };

    // Fail on bad arguments before any work is done
    let exhibits = load_exhibits(&args.exhibits)?;
    let citations = match &args.citations {
        Some(path) => load_citation_patterns(path)?,
        None => Vec::new(),
    };
    log::debug!(
        "{} exhibit(s), {} citation pattern(s)",
        exhibits.len(),
        citations.len()
    );
    let cover_lines: Vec<String> = match &args.cover {
        Some(path) => read_text_file(path)?.lines().map(String::from).collect(),
        None => Vec::new(),
    };

    let pb = ProgressBar::new(4);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    pb.set_message("Parsing filing...");
    let mut filing = pleading::parse_file(input)?.into_filing(case_name, firm_name);
    if let Some(title) = &args.title {
        filing.header = filing.header.with_document_title(title);
    }
    if let Some(court) = &args.court {
        filing.header = filing.header.with_court(court);
    }
    if let Some(date) = args.date_filed {
        filing.header = filing.header.with_date_filed(date);
    }
    for exhibit in exhibits {
        filing.add_exhibit(exhibit);
    }
    pb.inc(1);

    pb.set_message("Laying out pages...");
    let options = LayoutOptions::new()
        .with_align(args.align.into())
        .with_list_markers_left(args.keep_list_markers_left)
        .with_citations(citations);
    let info = FilingInfo::from_filing(&filing).with_cover_lines(cover_lines);
    let (pdf, result) = build_pdf(&filing, &info, &options)?;
    fs::write(&args.output, pdf)?;
    log::info!("wrote {} ({} pages)", args.output.display(), result.total_pages());
    pb.inc(1);

    pb.set_message("Writing table of contents...");
    let toc = TableOfContents::from_positions(
        &result.headings,
        &result.citations,
        &ApproximateMetrics,
        &TocStyle::from_layout(&options),
    );
    fs::write(&args.index, build_index_pdf(&toc, &info, &options)?)?;
    let index_json = index_json_path(&args.index);
    fs::write(&index_json, toc.to_json(JsonFormat::Pretty)?)?;
    log::info!(
        "wrote {} and {} ({} entries)",
        args.index.display(),
        index_json.display(),
        toc.entries().len()
    );
    pb.inc(1);

    pb.set_message("Writing extra outputs...");
    if let Some(path) = &args.text {
        fs::write(path, pleading::render::to_text(&filing, &info, &options)?)?;
    }
    if let Some(path) = &args.snapshot {
        filing.save_snapshot(path, JsonFormat::Pretty)?;
    }
    pb.inc(1);

    pb.finish_with_message("Done!");

    let stats = &result.stats;
    println!("\n{}", "Output files:".green().bold());
    println!("  {} {} ({} pages)", "├─".dimmed(), args.output.display(), result.total_pages());
    println!("  {} {} ({} entries)", "├─".dimmed(), args.index.display(), toc.entries().len());
    println!("  {} {}", "├─".dimmed(), index_json.display());
    if let Some(path) = &args.text {
        println!("  {} {}", "├─".dimmed(), path.display());
    }
    if let Some(path) = &args.snapshot {
        println!("  {} {}", "├─".dimmed(), path.display());
    }
    println!(
        "  {} {} lines, {} headings, {} citations",
        "└─".dimmed(),
        stats.last_line,
        stats.headings,
        stats.citations
    );
    if stats.placeholders > 0 {
        println!(
            "{} {} exhibit image(s) could not be loaded; placeholders were used",
            "Warning:".yellow().bold(),
            stats.placeholders
        );
    }

    Ok(())
}

fn cmd_inspect(input: &Path, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let parsed = pleading::parse_file(input)?;
    let filing: Filing = parsed.into_filing("", "");

    let mut canvas = TextCanvas::new();
    let result = pleading::compose(
        &filing,
        &FilingInfo::from_filing(&filing),
        &LayoutOptions::default(),
        &mut canvas,
    )?;

    if json {
        println!("{}", serde_json::to_string_pretty(&result.stats)?);
        return Ok(());
    }

    println!("{}", "Filing Structure".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    println!("{}: {}", "File".bold(), input.display());
    println!(
        "{}: {} lines",
        "Header".bold(),
        filing.header.content.lines().count()
    );
    println!("{}: {}", "Sections".bold(), filing.sections.len());
    for (key, style) in classify_headings(&filing.sections).iter() {
        let style = match style {
            HeadingStyle::Section => "section".normal(),
            HeadingStyle::Subsection => "subsection".dimmed(),
        };
        println!("  {} {} ({})", "•".dimmed(), key, style);
    }
    println!("{}: {}", "Title blocks".bold(), filing.documents.len());
    for text in filing.documents.values() {
        println!("  {} {}", "•".dimmed(), text.replace('\n', " / "));
    }

    println!();
    println!("{}", "Layout".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    let stats = &result.stats;
    println!("{}: {}", "Pages".bold(), result.total_pages());
    println!("{}: {}", "Title block pages".bold(), stats.title_block_pages);
    println!("{}: {}", "Numbered lines".bold(), stats.last_line);
    println!("{}: {}", "Headings".bold(), stats.headings);

    Ok(())
}

fn cmd_show_snapshot(path: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let filing = Filing::load_snapshot(path)?;
    println!("{}", filing);
    Ok(())
}

fn cmd_version() {
    println!("{} {}", "pleading".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Line-numbered legal filing layout");
    println!();
    println!("License: MIT");
}
