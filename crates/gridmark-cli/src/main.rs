//! gridmark CLI - marker decks and survey charts

use std::io;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use gridmark::prelude::*;
use gridmark::{
    chart_file_name, department_from_path, load_insights, statement_distribution, statements,
    Chart,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gridmark")]
#[command(
    author,
    version,
    about = "Grid-positioned project markers and survey charts"
)]
struct Cli {
    /// Log debug output (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a slide of grid-positioned project markers to a presentation
    Bullets(BulletArgs),

    /// Print the category averages of a survey workbook
    Scores {
        /// Survey workbook (xlsx)
        input: PathBuf,

        /// Question to score, e.g. "4" or "Question 4" (default: all)
        #[arg(short, long)]
        question: Vec<Question>,
    },

    /// Render the polar chart of category averages
    Polar(ChartArgs),

    /// Render one detailed polar chart per category
    #[command(alias = "detail")]
    Radar(ChartArgs),

    /// Render a department comparison for one statement
    Insights(InsightArgs),
}

#[derive(Args)]
struct BulletArgs {
    /// Presentation holding the lookup tables (pptx)
    input: PathBuf,

    /// Output presentation (default: updated_presentation.pptx next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// JSON run configuration; flags override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of grid rows
    #[arg(long)]
    rows: Option<u32>,

    /// Number of grid columns (at most 26)
    #[arg(long)]
    cols: Option<u32>,

    /// Cell width, in --unit
    #[arg(long)]
    cell_width: Option<f64>,

    /// Cell height, in --unit
    #[arg(long)]
    cell_height: Option<f64>,

    /// Unit of the cell size: cm or pt
    #[arg(long)]
    unit: Option<LengthUnit>,

    /// Marker diameter in points
    #[arg(long)]
    diameter: Option<f64>,

    /// Group markers of the same department
    #[arg(long)]
    group: bool,

    /// Do not link markers back to their source slide
    #[arg(long)]
    no_links: bool,

    /// One output slide per source slide
    #[arg(long)]
    per_slide: bool,

    /// Do not draw the grid table
    #[arg(long)]
    no_grid: bool,

    /// Log every dropped row
    #[arg(long)]
    warn_drops: bool,

    /// Report the placements without writing a file
    #[arg(long)]
    dry_run: bool,
}

#[derive(Args)]
struct ChartArgs {
    /// Survey workbook (xlsx)
    input: PathBuf,

    /// Question to chart, e.g. "4" or "Question 4"
    #[arg(short, long)]
    question: Question,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Image format: png or svg
    #[arg(short, long, default_value_t = ChartFormat::Png)]
    format: ChartFormat,

    /// Export resolution
    #[arg(long, default_value_t = 600)]
    dpi: u32,
}

#[derive(Args)]
struct InsightArgs {
    /// Department workbooks (xlsx)
    #[arg(required = true)]
    inputs: Vec<PathBuf>,

    /// Department name per workbook, in order (default: file name)
    #[arg(short, long)]
    department: Vec<String>,

    /// Statement to chart; without it the statements are listed
    #[arg(short, long)]
    statement: Option<String>,

    /// Output file (default: bar_chart_<statement>.<format>)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Image format when the output file does not name one
    #[arg(short, long, default_value_t = ChartFormat::Png)]
    format: ChartFormat,

    /// Export resolution
    #[arg(long, default_value_t = 600)]
    dpi: u32,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Commands::Bullets(args) => bullets(&args),
        Commands::Scores { input, question } => scores(&input, &question),
        Commands::Polar(args) => polar(&args),
        Commands::Radar(args) => radar(&args),
        Commands::Insights(args) => insights(&args),
    }
}

/// Config file first, then flags on top
fn bullet_options(args: &BulletArgs) -> Result<BulletOptions> {
    let mut options = match &args.config {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config '{}'", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("Invalid config '{}'", path.display()))?
        }
        None => BulletOptions::default(),
    };

    let grid = &mut options.grid;
    if let Some(rows) = args.rows {
        grid.rows = rows;
    }
    if let Some(cols) = args.cols {
        grid.cols = cols;
    }
    if let Some(width) = args.cell_width {
        grid.cell_width = width;
    }
    if let Some(height) = args.cell_height {
        grid.cell_height = height;
    }
    if let Some(unit) = args.unit {
        grid.unit = unit;
    }
    if let Some(diameter) = args.diameter {
        grid.marker_diameter = diameter;
    }

    if args.group {
        options.group_by_department = true;
    }
    if args.no_links {
        options.link_to_origin = false;
    }
    if args.per_slide {
        options.layout = SlideLayout::PerSourceSlide;
    }
    if args.no_grid {
        options.draw_grid = false;
    }
    if args.warn_drops {
        options.drop_policy = DropPolicy::Warn;
    }

    options.grid.validate().context("Invalid grid configuration")?;
    tracing::debug!(?options, "bullet options");
    Ok(options)
}

fn bullets(args: &BulletArgs) -> Result<()> {
    let options = bullet_options(args)?;
    let mut colors = DepartmentColorTable::new();

    if args.dry_run {
        let (run, writer) = preview_bullets(&args.input, &options, &mut colors)
            .with_context(|| format!("Failed to process '{}'", args.input.display()))?;

        for (i, slide) in writer.slides().iter().enumerate() {
            println!("Slide {} ({} markers)", i + 1, slide.markers.len());
            for marker in &slide.markers {
                println!("  {}\t{:.1}\t{:.1}\t{}", marker.label, marker.x, marker.y, marker.fill);
            }
            for group in &slide.groups {
                println!("  group {} ({} markers)", group.name, group.shapes.len());
            }
        }
        eprintln!("{} records, {} placed; {}", run.records, run.markers(), run.drops);
        return Ok(());
    }

    let deck = generate_bullet_deck(&args.input, args.output.as_deref(), &options, &mut colors)
        .with_context(|| format!("Failed to process '{}'", args.input.display()))?;

    eprintln!(
        "Placed {} markers on {} slide(s), wrote '{}'",
        deck.run.markers(),
        deck.run.slides.len(),
        deck.output.display()
    );
    if !deck.run.drops.is_empty() {
        eprintln!("Dropped: {}", deck.run.drops);
    }
    Ok(())
}

fn open_workbook(input: &Path) -> Result<SurveyWorkbook> {
    SurveyWorkbook::open(input).with_context(|| format!("Failed to open '{}'", input.display()))
}

fn scores(input: &Path, questions: &[Question]) -> Result<()> {
    let workbook = open_workbook(input)?;
    let questions = if questions.is_empty() {
        Question::ALL.to_vec()
    } else {
        questions.to_vec()
    };

    for question in questions {
        let scores = aggregate_question(&workbook, question)
            .with_context(|| format!("Failed to score {}", question))?;
        println!("{} - {}", question, question.title());
        for category in &scores.categories {
            println!("  {}\t{:.2}", category.name, category.average);
        }
    }
    Ok(())
}

fn write_chart(mut chart: Chart, dpi: u32, path: &Path, format: ChartFormat) -> Result<()> {
    chart.size = chart.size.with_dpi(dpi);
    SvgRenderer::new()
        .export(&chart, path, format)
        .with_context(|| format!("Failed to write '{}'", path.display()))?;
    tracing::info!("wrote {}", path.display());
    Ok(())
}

fn polar(args: &ChartArgs) -> Result<()> {
    let workbook = open_workbook(&args.input)?;
    let scores = aggregate_question(&workbook, args.question)
        .with_context(|| format!("Failed to score {}", args.question))?;

    let sheet = args.question.sheet_name();
    let path = args
        .output
        .join(chart_file_name("polar_chart", &[sheet.as_str()], args.format));
    write_chart(polar_chart(&scores), args.dpi, &path, args.format)
}

fn radar(args: &ChartArgs) -> Result<()> {
    let workbook = open_workbook(&args.input)?;
    let scores = aggregate_question(&workbook, args.question)
        .with_context(|| format!("Failed to score {}", args.question))?;

    let sheet = args.question.sheet_name();
    for (category, chart) in detail_charts(&scores) {
        let name = chart_file_name("radar_chart", &[sheet.as_str(), category.as_str()], args.format);
        write_chart(chart, args.dpi, &args.output.join(name), args.format)?;
    }
    Ok(())
}

fn insights(args: &InsightArgs) -> Result<()> {
    if !args.department.is_empty() && args.department.len() != args.inputs.len() {
        bail!(
            "{} department names for {} workbooks",
            args.department.len(),
            args.inputs.len()
        );
    }

    let inputs: Vec<(String, PathBuf)> = args
        .inputs
        .iter()
        .enumerate()
        .map(|(i, path)| {
            let name = args
                .department
                .get(i)
                .cloned()
                .unwrap_or_else(|| department_from_path(path));
            (name, path.clone())
        })
        .collect();
    let rows = load_insights(&inputs).context("Failed to read department workbooks")?;

    let Some(statement) = &args.statement else {
        for (i, statement) in statements(&rows).iter().enumerate() {
            println!("{}\t{}", i + 1, statement);
        }
        return Ok(());
    };

    let distribution = statement_distribution(&rows, statement);
    if distribution.is_empty() {
        bail!("No department answered '{}'", statement);
    }

    let (path, format) = match &args.output {
        Some(path) => (path.clone(), ChartFormat::from_path(path).unwrap_or(args.format)),
        None => (
            chart_file_name("bar_chart", &[statement.as_str()], args.format),
            args.format,
        ),
    };
    write_chart(insights_chart(statement, &distribution), args.dpi, &path, format)
}
