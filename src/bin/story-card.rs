use anyhow::{bail, Context, Result};
use clap::Parser;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use story_card::layout::PunctuationRule;
use story_card::{CardConfig, Font, Story, StoryRenderer};

#[derive(Parser, Debug)]
#[command(name = "story-card")]
#[command(version)]
#[command(about = "Render a daily story into a shareable PNG card")]
struct Args {
    /// Font used for the body and the watermark
    #[arg(long)]
    regular_font: PathBuf,

    /// Font used for the title
    #[arg(long)]
    bold_font: PathBuf,

    /// A story record as served by the story API (JSON)
    #[arg(long, conflicts_with_all = ["title", "body_file"])]
    story: Option<PathBuf>,

    /// Title of the story
    #[arg(long)]
    title: Option<String>,

    /// File holding the body, one paragraph per line
    #[arg(long)]
    body_file: Option<PathBuf>,

    /// Where to write the PNG. Defaults to the share file name of the story record, or
    /// story.png
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also forbid breaks before closing and after opening brackets and quotes
    #[arg(long)]
    strict: bool,

    /// Leave body lines ragged instead of justifying them
    #[arg(long)]
    no_justify: bool,

    /// Caption drawn under the story
    #[arg(long)]
    watermark: Option<String>,
}

fn load_font(path: &Path) -> Result<Font> {
    let bytes = fs::read(path).with_context(|| format!("reading font {}", path.display()))?;
    let font = Font::load(bytes).with_context(|| format!("parsing font {}", path.display()))?;
    log::info!(
        "loaded {} ({}, family {}, weight {})",
        path.display(),
        font.name().unwrap_or_else(|| "unnamed".to_string()),
        font.family().unwrap_or_else(|| "unknown".to_string()),
        font.weight()
    );
    Ok(font)
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();

    let (title, body, default_output) = match (&args.story, &args.title) {
        (Some(path), _) => {
            let json = fs::read_to_string(path)
                .with_context(|| format!("reading story {}", path.display()))?;
            let story = Story::from_json(&json)
                .with_context(|| format!("parsing story {}", path.display()))?;
            let share = story.share_info();
            log::info!("{}: {}", share.url, share.text);
            (story.title, story.content, PathBuf::from(share.file_name))
        }
        (None, Some(title)) => {
            let body = match &args.body_file {
                Some(path) => fs::read_to_string(path)
                    .with_context(|| format!("reading body {}", path.display()))?,
                None => String::new(),
            };
            (title.clone(), body, PathBuf::from("story.png"))
        }
        (None, None) => bail!("either --story or --title is required"),
    };

    let mut config = CardConfig::new();
    config.justify(!args.no_justify);
    if args.strict {
        config.punctuation(PunctuationRule::Strict);
    }
    if let Some(watermark) = &args.watermark {
        config.watermark(watermark);
    }

    let regular = load_font(&args.regular_font)?;
    let bold = load_font(&args.bold_font)?;
    let renderer = StoryRenderer::new(regular, bold, config);

    let output = args.output.unwrap_or(default_output);
    let file = fs::File::create(&output)
        .with_context(|| format!("creating {}", output.display()))?;
    let mut writer = BufWriter::new(file);
    renderer
        .write(&title, &body, &mut writer)
        .with_context(|| format!("rendering {}", output.display()))?;
    writer
        .flush()
        .with_context(|| format!("writing {}", output.display()))?;

    println!("{}", output.display());
    Ok(())
}
