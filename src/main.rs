use clap::{Parser, ValueEnum};
use folio::text::{TextDocument, TextSurface};
use folio::{Margins, MediaSize, PipelineBuilder, PipelineError};
use log::info;
use std::path::PathBuf;

// Many small allocations per page; mimalloc keeps the heap from fragmenting.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum MarginsArg {
    None,
    Default,
}

/// Captures a plain-text document as a PDF.
#[derive(Debug, Parser)]
#[command(name = "folio", version)]
struct Cli {
    /// Text file to render. A leading "# " line becomes the title.
    input: PathBuf,

    /// Destination PDF. Its directory must already exist.
    output: PathBuf,

    /// Paper size: a3, a4, a5, letter or legal.
    #[arg(long, default_value = "a4")]
    media: String,

    #[arg(long, default_value_t = 1200)]
    dpi_x: u32,

    #[arg(long, default_value_t = 600)]
    dpi_y: u32,

    #[arg(long, value_enum, default_value_t = MarginsArg::None)]
    margins: MarginsArg,
}

#[tokio::main]
async fn main() -> Result<(), PipelineError> {
    env_logger::init();
    let cli = Cli::parse();

    let media = MediaSize::from_name(&cli.media)
        .ok_or_else(|| PipelineError::Config(format!("Unknown media size '{}'", cli.media)))?;
    let margins = match cli.margins {
        MarginsArg::None => Margins::None,
        MarginsArg::Default => Margins::Default,
    };

    println!("Loading document from {}", cli.input.display());
    let document = TextDocument::load(&cli.input)?;

    let pipeline = PipelineBuilder::new()
        .with_media_size(media)
        .with_resolution(cli.dpi_x, cli.dpi_y)
        .with_margins(margins)
        .build()?;
    info!("Page format: {:?}", pipeline.page_format());

    let surface = TextSurface::on_current_runtime(document)?;
    println!("Generating PDF to {}...", cli.output.display());
    let path = pipeline.render(surface, &cli.output).await?;

    println!("Successfully generated {}", path.display());
    Ok(())
}
