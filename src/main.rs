use std::{
    fs,
    io::{self, Read},
    path::PathBuf,
    time::Instant,
};

use clap::Parser;
use image::Rgba;
use tracing::Level;
use wordcloud::{
    Error, NoStemmer, Result, SnowballStemmer, StopwordFilter, WordCloud, WordTokenizer,
    DEFAULT_DELIMITERS,
};

/// Lays out the most frequent words of a text as a word cloud.
#[derive(Debug, Parser)]
#[clap(author, version, about)]
struct Cli {
    /// Text to read, standard input when omitted
    input: Option<PathBuf>,

    /// Number of words to keep after ranking
    #[clap(short = 'n', long, default_value_t = 15)]
    word_limit: usize,

    #[clap(long, default_value_t = 10.0)]
    min_font_size: f32,

    #[clap(long, default_value_t = 80.0)]
    max_font_size: f32,

    /// Stopword list, one word per line. Built-in English list when omitted
    #[clap(short, long)]
    stopwords: Option<PathBuf>,

    /// Characters that separate words
    #[clap(long, default_value = DEFAULT_DELIMITERS)]
    delimiters: String,

    /// Count every spelling separately
    #[clap(long)]
    no_stem: bool,

    /// Seed for reproducible layouts
    #[clap(long)]
    seed: Option<u64>,

    /// Give up on a word after this many moves
    #[clap(long, default_value_t = 100_000)]
    max_attempts: usize,

    /// TrueType/OpenType font used for measuring and drawing
    #[clap(short, long)]
    font: Option<PathBuf>,

    /// Write a PNG here, requires --font
    #[clap(short, long, requires = "font")]
    output: Option<PathBuf>,

    /// Any CSS colour
    #[clap(long, default_value = "black")]
    background: String,

    #[clap(long, default_value_t = 1.0)]
    scale: f32,

    /// More output on stderr, repeat for more
    #[clap(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn read_document(input: Option<&PathBuf>) -> Result<String> {
    match input {
        Some(path) => fs::read_to_string(path).map_err(|err| Error::io(err, path)),
        None => {
            let mut document = String::new();
            io::stdin()
                .read_to_string(&mut document)
                .map_err(|err| Error::io(err, "<stdin>"))?;
            Ok(document)
        }
    }
}

fn parse_color(value: &str) -> Result<Rgba<u8>> {
    let color = csscolorparser::parse(value)
        .map_err(|err| Error::invalid_parameter("background", &value, &err))?;

    Ok(Rgba(color.to_rgba8()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();

    let filter = match &cli.stopwords {
        Some(path) => StopwordFilter::load_or_empty(path),
        None => StopwordFilter::english(),
    };
    let tokenizer = WordTokenizer::default()
        .with_delimiters(&cli.delimiters)
        .with_filter(filter)
        .with_max_words(cli.word_limit);
    let tokenizer = if cli.no_stem {
        tokenizer.with_stemmer(NoStemmer)
    } else {
        tokenizer.with_stemmer(SnowballStemmer::default())
    };

    let mut wordcloud = WordCloud::default()
        .with_tokenizer(tokenizer)
        .with_font_sizes(cli.min_font_size, cli.max_font_size)
        .with_max_attempts(cli.max_attempts)
        .with_background_color(parse_color(&cli.background)?);
    if let Some(seed) = cli.seed {
        wordcloud = wordcloud.with_rng_seed(seed);
    }
    if let Some(font) = &cli.font {
        wordcloud = wordcloud.with_font_from_path(font)?;
    }

    let document = read_document(cli.input.as_ref())?;

    let now = Instant::now();
    let labels = wordcloud.layout_from_text(&document)?;
    tracing::info!("Placed {} words in {}ms", labels.len(), now.elapsed().as_millis());

    for label in &labels {
        let bb = label.bounding_box;
        println!(
            "{}\t{:.1}\t{:.1}\t{:.1}\t{:.1}\t{:.1}",
            label.text, label.font_size, bb.x0, bb.y0, bb.x1, bb.y1
        );
    }

    if let Some(path) = &cli.output {
        let image = wordcloud.render(&labels, cli.scale)?;
        image.save(path).map_err(|source| Error::ImageExport {
            path: path.clone(),
            source,
        })?;
        tracing::info!("Saved {}", path.display());
    }

    Ok(())
}
