use std::fs::File;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use ascii_convert::{AsciiConverter, ConvertOptions, GlyphTable};
use clap::{Parser, Subcommand};
use image::Rgba;
use indicatif::{ProgressBar, ProgressStyle};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(author, version, about = "Convert images to ASCII text or glyph bitmaps")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the ASCII rendition to stdout for a quick preview
    Preview(PreviewArgs),
    /// Convert an image to ASCII text and write it to disk
    Convert(ConvertArgs),
    /// Re-render the image as a bitmap with a glyph drawn in each cell
    Bitmap(BitmapArgs),
    /// Convert every image in a directory to ASCII text files
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    /// Input image path
    input: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct ConvertArgs {
    /// Input image path
    input: PathBuf,
    /// Output file path
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct BitmapArgs {
    /// Input image path
    input: PathBuf,
    /// Output image path (format chosen by extension)
    #[arg(short, long)]
    output: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Directory of input images
    input: PathBuf,
    /// Output directory for text files
    #[arg(short, long)]
    out_dir: PathBuf,
    #[command(flatten)]
    settings: RenderSettings,
}

#[derive(Parser, Debug, Clone)]
struct RenderSettings {
    /// Glyph cell edge length in pixels
    #[arg(long, default_value_t = 18)]
    cell_size: u32,
    /// Explicit column count, overriding the cell-size derivation
    #[arg(long)]
    columns: Option<u32>,
    /// Dark-to-bright charset replacing the default glyph table
    #[arg(long)]
    charset: Option<String>,
    /// Render glyphs in neutral gray with luminance-scaled opacity
    #[arg(long, default_value_t = false)]
    grayscale: bool,
    /// Invert luminance before the glyph lookup
    #[arg(long, default_value_t = false)]
    invert: bool,
    /// Background fill as RRGGBB or RRGGBBAA hex (bitmap mode)
    #[arg(long)]
    background: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.command {
        Commands::Preview(args) => preview(args),
        Commands::Convert(args) => convert(args),
        Commands::Bitmap(args) => bitmap(args),
        Commands::Batch(args) => batch(args),
    }
}

fn preview(args: PreviewArgs) -> Result<()> {
    let converter = AsciiConverter::new(args.settings.to_options()?);
    let image = image::open(&args.input)
        .with_context(|| format!("failed to open image {:?}", args.input))?;
    let text = converter
        .to_text(&image)
        .with_context(|| format!("failed to render {:?}", args.input))?;
    print!("{}", text);
    Ok(())
}

fn convert(args: ConvertArgs) -> Result<()> {
    let converter = AsciiConverter::new(args.settings.to_options()?);
    let image = image::open(&args.input)
        .with_context(|| format!("failed to open image {:?}", args.input))?;
    let text = converter
        .to_text(&image)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    let mut file = File::create(&args.output)
        .with_context(|| format!("failed to create {:?}", args.output))?;
    file.write_all(text.as_bytes())?;
    Ok(())
}

fn bitmap(args: BitmapArgs) -> Result<()> {
    let converter = AsciiConverter::new(args.settings.to_options()?);
    let image = image::open(&args.input)
        .with_context(|| format!("failed to open image {:?}", args.input))?;
    let canvas = converter
        .to_bitmap(&image)
        .with_context(|| format!("failed to render {:?}", args.input))?;

    canvas.save(&args.output).with_context(|| format!("failed to save {:?}", args.output))?;
    Ok(())
}

fn batch(args: BatchArgs) -> Result<()> {
    let converter = AsciiConverter::new(args.settings.to_options()?);
    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create output directory {:?}", args.out_dir))?;

    let mut entries: Vec<PathBuf> = WalkDir::new(&args.input)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| entry.path().to_path_buf())
        .collect();
    entries.sort();
    if entries.is_empty() {
        anyhow::bail!("no image files found in {:?}", args.input);
    }

    let progress = ProgressBar::new(entries.len() as u64);
    progress.set_style(
        ProgressStyle::with_template(
            "{spinner} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} images",
        )
        .unwrap()
        .progress_chars("=> "),
    );

    for entry in entries {
        let image =
            image::open(&entry).with_context(|| format!("failed to open image {:?}", entry))?;
        let text = converter
            .to_text(&image)
            .with_context(|| format!("failed to render {:?}", entry))?;

        let stem = entry.file_stem().and_then(|stem| stem.to_str()).unwrap_or("image");
        let out_path = args.out_dir.join(format!("{}.txt", stem));
        let mut file = File::create(&out_path)
            .with_context(|| format!("failed to create {:?}", out_path))?;
        file.write_all(text.as_bytes())?;
        progress.inc(1);
    }

    progress.finish_with_message(format!("Text files written to {:?}", args.out_dir));
    Ok(())
}

impl RenderSettings {
    fn to_options(&self) -> Result<ConvertOptions> {
        let mut options = ConvertOptions::default();
        options.cell_size = self.cell_size.max(1);
        options.columns = self.columns;
        options.grayscale = self.grayscale;
        options.reversed_luminance = self.invert;
        if let Some(charset) = &self.charset {
            anyhow::ensure!(
                charset.chars().count() >= 2,
                "charset needs at least two characters"
            );
            options.glyphs = GlyphTable::from_charset(charset.clone());
        }
        if let Some(hex) = &self.background {
            options.background = Some(parse_color(hex)?);
        }
        Ok(options)
    }
}

fn parse_color(hex: &str) -> Result<Rgba<u8>> {
    let hex = hex.trim_start_matches('#');
    anyhow::ensure!(
        hex.len() == 6 || hex.len() == 8,
        "expected RRGGBB or RRGGBBAA, got {:?}",
        hex
    );

    let channel = |range: std::ops::Range<usize>| {
        u8::from_str_radix(&hex[range], 16).context("invalid hex digit in color")
    };
    let r = channel(0..2)?;
    let g = channel(2..4)?;
    let b = channel(4..6)?;
    let a = if hex.len() == 8 { channel(6..8)? } else { 255 };
    Ok(Rgba([r, g, b, a]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_and_without_alpha() {
        assert_eq!(parse_color("102030").unwrap(), Rgba([16, 32, 48, 255]));
        assert_eq!(parse_color("#ffffff80").unwrap(), Rgba([255, 255, 255, 128]));
        assert!(parse_color("xyz").is_err());
    }
}
