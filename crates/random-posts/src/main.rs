//! Command line of `random-posts`.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use ecow::EcoString;
use lorem_html::{HtmlRandomizer, HtmlWriterOptions, RandomizerOptions};
use random_posts::model::{AuthorRef, ImageSize, ImageType};
use random_posts::validate::split_list;
use random_posts::{
    cleanup, generate, AssumeYes, Config, Confirm, ContentKind, LogProgress, MemoryHost,
    StdinConfirm,
};

#[derive(Debug, Clone, Parser)]
#[clap(name = "random-posts", author, version, about)]
struct Args {
    /// Path of the TOML config. Defaults to `random-posts.toml` if present.
    #[clap(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Path of the JSON content store.
    #[clap(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,
    /// Answers yes to every confirmation.
    #[clap(short, long, global = true)]
    yes: bool,
    /// Logs every step.
    #[clap(short, long, global = true)]
    verbose: bool,
    /// Mode of the binary
    #[clap(subcommand)]
    cmd: Commands,
}

#[derive(Debug, Clone, clap::Subcommand)]
#[clap(rename_all = "kebab-case")]
enum Commands {
    /// Generates marked posts, terms and featured images
    Generate(GenerateArgs),
    /// Removes marked posts and terms
    Cleanup(CleanupArgs),
    /// Prints a random HTML document
    Html(HtmlArgs),
    /// Lists the featured image types
    ImageTypes,
    /// Prints the effective config as TOML
    Config,
}

#[derive(Debug, Clone, clap::Args)]
struct GenerateArgs {
    /// The number of posts to generate.
    #[clap(value_name = "NUM_POSTS")]
    count: Option<u32>,
    /// The post type of the posts.
    #[clap(long = "type", value_name = "POST_TYPE")]
    post_type: Option<EcoString>,
    /// The post status to set the posts to.
    #[clap(long, value_name = "STATUS")]
    post_status: Option<EcoString>,
    /// A comma separated list of taxonomy slugs to generate terms for.
    #[clap(long, value_name = "SLUGS")]
    taxonomies: Option<String>,
    /// The amount of terms to generate for each taxonomy.
    #[clap(long, value_name = "N")]
    term_count: Option<u32>,
    /// The post author id, e-mail or login.
    #[clap(long, value_name = "AUTHOR")]
    post_author: Option<AuthorRef>,
    /// Adds a featured image to every post.
    #[clap(long)]
    featured_image: bool,
    /// A comma delimited width and height of featured images, e.g. `1024,768`.
    #[clap(long, value_name = "W,H")]
    image_size: Option<ImageSize>,
    /// The type of featured images, see `image-types`.
    #[clap(long, value_name = "TYPE")]
    image_type: Option<ImageType>,
    /// How post content is produced: `html` or `paragraphs`.
    #[clap(long, value_name = "KIND")]
    content: Option<ContentKind>,
    #[clap(flatten)]
    shape: ShapeArgs,
    /// Seed of the random source.
    #[clap(long)]
    seed: Option<u64>,
    /// Runs without saving the store.
    #[clap(long)]
    dry_run: bool,
}

#[derive(Debug, Clone, clap::Args)]
struct ShapeArgs {
    /// Upper bound of the HTML tree depth.
    #[clap(long, value_name = "N")]
    max_depth: Option<u32>,
    /// Upper bound of siblings at each level.
    #[clap(long, value_name = "N")]
    max_width: Option<u32>,
    /// Upper bound of words in a sentence.
    #[clap(long, value_name = "N")]
    max_length: Option<u32>,
    /// Prepends a login form to HTML content.
    #[clap(long)]
    login_form: bool,
}

#[derive(Debug, Clone, clap::Args)]
struct CleanupArgs {
    /// The post type of the posts to remove.
    #[clap(long = "type", value_name = "POST_TYPE")]
    post_type: Option<EcoString>,
    /// Deletes for good, skipping the trash.
    #[clap(long)]
    force_delete: bool,
    /// A comma separated list of taxonomy slugs to remove terms from.
    #[clap(long, value_name = "SLUGS")]
    taxonomies: Option<String>,
    /// Also removes featured images.
    #[clap(long)]
    media: bool,
    /// The post author id, e-mail or login.
    #[clap(long, value_name = "AUTHOR")]
    post_author: Option<AuthorRef>,
}

#[derive(Debug, Clone, clap::Args)]
struct HtmlArgs {
    #[clap(flatten)]
    shape: ShapeArgs,
    /// Seed of the random source.
    #[clap(long)]
    seed: Option<u64>,
    /// Prefixes `<!DOCTYPE html>`.
    #[clap(long)]
    doctype: bool,
}

/// The main entry point.
fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Starts logging
    let _ = logger(args.verbose, std::env::var("RUST_LOG").ok().as_deref()).try_init();

    let cwd = std::env::current_dir().context("failed to get the working directory")?;
    let mut config = Config::discover(args.config.as_deref(), &cwd)?;
    if let Some(store) = &args.store {
        config.store = Some(store.clone());
    }

    let mut confirm: Box<dyn Confirm> = if args.yes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm::stdio())
    };

    match args.cmd {
        Commands::Generate(cmd) => generate_main(config, cmd, confirm.as_mut()),
        Commands::Cleanup(cmd) => cleanup_main(config, cmd, confirm.as_mut()),
        Commands::Html(cmd) => html_main(config, cmd),
        Commands::ImageTypes => {
            let mut stdout = std::io::stdout().lock();
            for name in ImageType::names() {
                writeln!(stdout, "{name}").context("failed to write to stdout")?;
            }
            Ok(())
        }
        Commands::Config => {
            print!("{}", config.to_toml()?);
            Ok(())
        }
    }
}

/// Logs both crates at `Info`, or `Debug` when verbose. Directives from
/// `RUST_LOG` replace those defaults.
fn logger(verbose: bool, directives: Option<&str>) -> env_logger::Builder {
    use log::LevelFilter::*;

    let mut builder = env_logger::Builder::new();
    match directives {
        Some(directives) => {
            builder.parse_filters(directives);
        }
        None => {
            let level = if verbose { Debug } else { Info };
            builder
                .filter_module("random_posts", level)
                .filter_module("lorem_html", level);
        }
    }
    builder
}

fn generate_main(
    config: Config,
    args: GenerateArgs,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let store_path = config.store_path();
    let mut options = config.generate;
    if let Some(count) = args.count {
        options.count = count;
    }
    if let Some(post_type) = args.post_type {
        options.post_type = post_type;
    }
    if let Some(post_status) = args.post_status {
        options.post_status = post_status;
    }
    if let Some(taxonomies) = args.taxonomies {
        options.taxonomies = split_list(&taxonomies);
    }
    if let Some(term_count) = args.term_count {
        options.term_count = term_count;
    }
    if let Some(author) = args.post_author {
        options.author = author;
    }
    options.featured_image |= args.featured_image;
    if let Some(image_size) = args.image_size {
        options.image_size = image_size;
    }
    if let Some(image_type) = args.image_type {
        options.image_type = image_type;
    }
    if let Some(kind) = args.content {
        options.content.kind = kind;
    }
    apply_shape(&mut options.content, &args.shape);
    if args.seed.is_some() {
        options.seed = args.seed;
    }

    let mut host = MemoryHost::load_or_default(&store_path)
        .with_context(|| format!("failed to load store {}", store_path.display()))?;
    let report = generate(&mut host, &options, confirm, &mut LogProgress::default())?;

    if args.dry_run {
        log::info!("Dry run, {} was left untouched.", store_path.display());
    } else {
        host.save(&store_path)
            .with_context(|| format!("failed to save store {}", store_path.display()))?;
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn cleanup_main(
    config: Config,
    args: CleanupArgs,
    confirm: &mut dyn Confirm,
) -> anyhow::Result<()> {
    let store_path = config.store_path();
    let mut options = config.cleanup;
    if let Some(post_type) = args.post_type {
        options.post_type = post_type;
    }
    options.force_delete |= args.force_delete;
    if let Some(taxonomies) = args.taxonomies {
        options.taxonomies = split_list(&taxonomies);
    }
    options.media |= args.media;
    if let Some(author) = args.post_author {
        options.author = author;
    }

    let mut host = MemoryHost::load_or_default(&store_path)
        .with_context(|| format!("failed to load store {}", store_path.display()))?;
    let report = cleanup(&mut host, &options, confirm, &mut LogProgress::default())?;
    host.save(&store_path)
        .with_context(|| format!("failed to save store {}", store_path.display()))?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn html_main(config: Config, args: HtmlArgs) -> anyhow::Result<()> {
    let mut content = config.generate.content;
    apply_shape(&mut content, &args.shape);

    let seed = args
        .seed
        .or(config.generate.seed)
        .unwrap_or_else(|| fastrand::u64(..));
    let options = RandomizerOptions::default()
        .with_login_form(content.login_form)
        .with_writer(HtmlWriterOptions::default().with_doctype(args.doctype));
    let html = HtmlRandomizer::seeded(seed)
        .with_options(options)
        .random_html(content.max_depth, content.max_width, content.max_length)?;
    println!("{html}");
    Ok(())
}

fn apply_shape(content: &mut random_posts::ContentOptions, shape: &ShapeArgs) {
    if let Some(max_depth) = shape.max_depth {
        content.max_depth = max_depth;
    }
    if let Some(max_width) = shape.max_width {
        content.max_width = max_width;
    }
    if let Some(max_length) = shape.max_length {
        content.max_length = max_length;
    }
    content.login_form |= shape.login_form;
}

#[cfg(test)]
mod tests {
    use log::{Level, Log, Metadata};

    use super::logger;

    fn enabled(logger: &env_logger::Logger, level: Level, target: &str) -> bool {
        logger.enabled(&Metadata::builder().level(level).target(target).build())
    }

    #[test]
    fn defaults_log_both_crates_at_info() {
        let quiet = logger(false, None).build();
        assert!(enabled(&quiet, Level::Info, "lorem_html::generator"));
        assert!(!enabled(&quiet, Level::Debug, "lorem_html::generator"));
        assert!(!enabled(&quiet, Level::Info, "other_crate"));

        let verbose = logger(true, None).build();
        assert!(enabled(&verbose, Level::Debug, "lorem_html::generator"));
        assert!(enabled(&verbose, Level::Debug, "random_posts::generate"));
    }

    #[test]
    fn rust_log_directives_replace_the_defaults() {
        let all = logger(false, Some("debug")).build();
        assert!(enabled(&all, Level::Debug, "lorem_html::generator"));
        assert!(enabled(&all, Level::Debug, "random_posts::cleanup"));

        let quiet = logger(true, Some("random_posts=warn")).build();
        assert!(!enabled(&quiet, Level::Info, "random_posts::generate"));
        assert!(!enabled(&quiet, Level::Debug, "lorem_html::generator"));
    }
}
