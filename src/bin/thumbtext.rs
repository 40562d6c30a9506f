use std::{fs, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

use thumbtext::{
    ColorPreset, FontPreset, GradientDirection, GradientSpec, OverlayEngine, Position,
    PositionPreset, TextSpec, TextStyle,
};

#[derive(Parser, Debug)]
#[command(name = "thumbtext", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Overlay styled text on an image and write the result as PNG.
    Text(TextArgs),
    /// Blend a contrast gradient band onto an image.
    Gradient(GradientArgs),
    /// Apply a JSON array of overlay specs in sequence.
    Batch(BatchArgs),
}

#[derive(Parser, Debug)]
struct TextArgs {
    /// Input image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Text to overlay.
    #[arg(long)]
    text: String,

    /// Anchor preset for the text block center.
    #[arg(long, value_enum, default_value_t = PositionChoice::BottomCenter)]
    position: PositionChoice,

    /// Custom anchor x ratio in [0,1]; overrides --position with --y.
    #[arg(long, requires = "y")]
    x: Option<f32>,

    /// Custom anchor y ratio in [0,1].
    #[arg(long, requires = "x")]
    y: Option<f32>,

    /// Font style preset.
    #[arg(long, value_enum, default_value_t = FontChoice::Impact)]
    font_preset: FontChoice,

    /// Color scheme preset.
    #[arg(long, value_enum, default_value_t = ColorChoice::WhiteShadow)]
    color_scheme: ColorChoice,

    /// Explicit font size in pixels (auto-sized when omitted).
    #[arg(long)]
    font_size: Option<u32>,

    /// Outline radius in pixels (0 disables).
    #[arg(long, default_value_t = 4)]
    stroke_width: i32,

    /// Drop shadow offset in pixels (0 disables).
    #[arg(long, default_value_t = 5)]
    shadow_offset: i32,

    /// Maximum text width as a ratio of image width.
    #[arg(long, default_value_t = 0.9)]
    max_width_ratio: f32,

    /// Directory of custom fonts tried before system fonts.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,

    /// Blend a bottom contrast gradient before drawing the text.
    #[arg(long)]
    gradient: bool,
}

#[derive(Parser, Debug)]
struct GradientArgs {
    /// Input image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Band edge.
    #[arg(long, value_enum, default_value_t = DirectionChoice::Bottom)]
    direction: DirectionChoice,

    /// Peak opacity in [0,1].
    #[arg(long, default_value_t = 0.6)]
    opacity: f32,

    /// Band height as a ratio of image height.
    #[arg(long, default_value_t = 0.3)]
    height_ratio: f32,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// Input image (PNG or JPEG).
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// JSON file holding an array of overlay specs.
    #[arg(long)]
    spec: PathBuf,

    /// Directory of custom fonts tried before system fonts.
    #[arg(long)]
    fonts_dir: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PositionChoice {
    TopLeft,
    TopCenter,
    TopRight,
    Center,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

impl From<PositionChoice> for PositionPreset {
    fn from(c: PositionChoice) -> Self {
        match c {
            PositionChoice::TopLeft => PositionPreset::TopLeft,
            PositionChoice::TopCenter => PositionPreset::TopCenter,
            PositionChoice::TopRight => PositionPreset::TopRight,
            PositionChoice::Center => PositionPreset::Center,
            PositionChoice::BottomLeft => PositionPreset::BottomLeft,
            PositionChoice::BottomCenter => PositionPreset::BottomCenter,
            PositionChoice::BottomRight => PositionPreset::BottomRight,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum FontChoice {
    Impact,
    Modern,
    Dramatic,
    Clean,
}

impl From<FontChoice> for FontPreset {
    fn from(c: FontChoice) -> Self {
        match c {
            FontChoice::Impact => FontPreset::Impact,
            FontChoice::Modern => FontPreset::Modern,
            FontChoice::Dramatic => FontPreset::Dramatic,
            FontChoice::Clean => FontPreset::Clean,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ColorChoice {
    WhiteShadow,
    YellowPop,
    RedAlert,
    BlueTrust,
    GreenSuccess,
}

impl From<ColorChoice> for ColorPreset {
    fn from(c: ColorChoice) -> Self {
        match c {
            ColorChoice::WhiteShadow => ColorPreset::WhiteShadow,
            ColorChoice::YellowPop => ColorPreset::YellowPop,
            ColorChoice::RedAlert => ColorPreset::RedAlert,
            ColorChoice::BlueTrust => ColorPreset::BlueTrust,
            ColorChoice::GreenSuccess => ColorPreset::GreenSuccess,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum DirectionChoice {
    Top,
    Bottom,
}

impl From<DirectionChoice> for GradientDirection {
    fn from(c: DirectionChoice) -> Self {
        match c {
            DirectionChoice::Top => GradientDirection::Top,
            DirectionChoice::Bottom => GradientDirection::Bottom,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Text(args) => run_text(args),
        Command::Gradient(args) => run_gradient(args),
        Command::Batch(args) => run_batch(args),
    }
}

fn engine_for(fonts_dir: Option<PathBuf>) -> OverlayEngine {
    match fonts_dir {
        Some(dir) => OverlayEngine::with_fonts_dir(dir),
        None => OverlayEngine::new(),
    }
}

fn run_text(args: TextArgs) -> anyhow::Result<()> {
    let image = fs::read(&args.in_path)
        .with_context(|| format!("read input image {}", args.in_path.display()))?;

    let position = match (args.x, args.y) {
        (Some(x), Some(y)) => Position::Custom { x, y },
        _ => Position::Preset(args.position.into()),
    };
    let style = TextStyle {
        position,
        font_preset: args.font_preset.into(),
        color_scheme: args.color_scheme.into(),
        custom_colors: None,
        font_size: args.font_size,
        stroke_width: args.stroke_width,
        shadow_offset: args.shadow_offset,
        max_width_ratio: args.max_width_ratio,
    };

    let engine = engine_for(args.fonts_dir);
    let gradient_spec = args.gradient.then(GradientSpec::default);
    let out = engine.compose_thumbnail(&image, &args.text, &style, gradient_spec.as_ref())?;

    fs::write(&args.out, out).with_context(|| format!("write output {}", args.out.display()))?;
    Ok(())
}

fn run_gradient(args: GradientArgs) -> anyhow::Result<()> {
    let image = fs::read(&args.in_path)
        .with_context(|| format!("read input image {}", args.in_path.display()))?;

    let spec = GradientSpec {
        direction: args.direction.into(),
        peak_opacity: args.opacity,
        band_height_ratio: args.height_ratio,
    };
    let out = OverlayEngine::new().apply_gradient(&image, &spec)?;

    fs::write(&args.out, out).with_context(|| format!("write output {}", args.out.display()))?;
    Ok(())
}

fn run_batch(args: BatchArgs) -> anyhow::Result<()> {
    let image = fs::read(&args.in_path)
        .with_context(|| format!("read input image {}", args.in_path.display()))?;
    let spec_json = fs::read_to_string(&args.spec)
        .with_context(|| format!("read overlay spec {}", args.spec.display()))?;
    let overlays: Vec<TextSpec> =
        serde_json::from_str(&spec_json).with_context(|| "parse overlay spec JSON")?;

    let engine = engine_for(args.fonts_dir);
    let out = engine.compose_text_overlays(&image, &overlays)?;

    fs::write(&args.out, out).with_context(|| format!("write output {}", args.out.display()))?;
    Ok(())
}
