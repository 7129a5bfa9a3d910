//! Generates marked terms, posts and featured images.

use std::collections::BTreeMap;

use ecow::{eco_format, EcoString};
use lorem_html::{
    to_plain_text, ucfirst, HtmlRandomizer, HtmlWriter, RandomSource, RandomizerOptions,
    TextProvider,
};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

use crate::error::Result;
use crate::host::Host;
use crate::model::{
    sanitize_text_field, AuthorRef, ImageRequest, ImageSize, ImageType, NewPost, PostId, TermId,
    UserId, DEFAULT_MARKER_KEY, MARKER_VALUE,
};
use crate::progress::Progress;
use crate::prompt::Confirm;
use crate::validate::{ensure_post_type, resolve_author, validate_taxonomies};


/// How post content is produced.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A random HTML tree.
    #[default]
    Html,
    /// Plain lorem-ipsum paragraphs.
    Paragraphs,
}

/// Shape of generated post content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ContentOptions {
    /// How content is produced.
    pub kind: ContentKind,
    /// Upper bound of the HTML tree depth.
    pub max_depth: u32,
    /// Upper bound of siblings at each level.
    pub max_width: u32,
    /// Upper bound of words in a sentence.
    pub max_length: u32,
    /// Prepends a login form to HTML content.
    pub login_form: bool,
}

impl Default for ContentOptions {
    fn default() -> Self {
        Self {
            kind: ContentKind::Html,
            max_depth: 5,
            max_width: 4,
            max_length: 10,
            login_form: false,
        }
    }
}

/// Options of [`generate`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct GenerateOptions {
    /// Number of posts to create.
    pub count: u32,
    /// Post type of the posts.
    pub post_type: EcoString,
    /// Post status of the posts.
    pub post_status: EcoString,
    /// Taxonomies to create terms in.
    pub taxonomies: Vec<EcoString>,
    /// Terms created per taxonomy.
    pub term_count: u32,
    /// Author of the posts.
    pub author: AuthorRef,
    /// Whether each post gets a featured image.
    pub featured_image: bool,
    /// Size of featured images.
    pub image_size: ImageSize,
    /// Category of featured images.
    pub image_type: ImageType,
    /// Shape of the content.
    pub content: ContentOptions,
    /// Meta key marking everything created.
    pub marker_key: EcoString,
    /// Seed of the random source. A random seed is drawn when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            count: 10,
            post_type: "post".into(),
            post_status: "publish".into(),
            taxonomies: Vec::new(),
            term_count: 3,
            author: AuthorRef::default(),
            featured_image: false,
            image_size: ImageSize::default(),
            image_type: ImageType::default(),
            content: ContentOptions::default(),
            marker_key: DEFAULT_MARKER_KEY.into(),
            seed: None,
        }
    }
}

/// What [`generate`] created.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct GenerateReport {
    /// New terms, by taxonomy.
    pub terms: BTreeMap<EcoString, Vec<TermId>>,
    /// New posts.
    pub posts: Vec<PostId>,
    /// New featured images.
    pub attachments: Vec<PostId>,
    /// Per-item failures that were skipped.
    pub warnings: Vec<EcoString>,
}

/// Creates terms and posts marked with the marker key.
///
/// The post type and the author are checked first and stop the run when
/// they are missing. After that every failure concerns a single term, post
/// or image: it is recorded as a warning and the run moves on.
pub fn generate<H: Host + ?Sized>(
    host: &mut H,
    options: &GenerateOptions,
    confirm: &mut dyn Confirm,
    progress: &mut dyn Progress,
) -> Result<GenerateReport> {
    ensure_post_type(host, &options.post_type)?;
    let author = resolve_author(host, &options.author)?;
    let taxonomies = validate_taxonomies(host, &options.taxonomies, confirm)?;

    let seed = options.seed.unwrap_or_else(|| fastrand::u64(..));
    log::debug!("generating with seed {seed}");
    let randomizer = HtmlRandomizer::seeded(seed).with_options(
        RandomizerOptions::default().with_login_form(options.content.login_form),
    );

    let mut worker = GenerateWorker {
        host,
        options,
        progress,
        randomizer,
        report: GenerateReport::default(),
    };
    worker.insert_terms(&taxonomies);
    worker.insert_posts(author.id);

    log::info!(
        "Created {} posts, {} terms and {} images.",
        worker.report.posts.len(),
        worker.report.terms.values().map(Vec::len).sum::<usize>(),
        worker.report.attachments.len()
    );
    Ok(worker.report)
}

struct GenerateWorker<'a, H: ?Sized> {
    host: &'a mut H,
    options: &'a GenerateOptions,
    progress: &'a mut dyn Progress,
    randomizer: HtmlRandomizer,
    report: GenerateReport,
}

impl<H: Host + ?Sized> GenerateWorker<'_, H> {
    fn warn(&mut self, message: EcoString) {
        log::warn!("{message}");
        self.report.warnings.push(message);
    }

    fn insert_terms(&mut self, taxonomies: &[EcoString]) {
        let term_count = self.options.term_count;
        if taxonomies.is_empty() || term_count == 0 {
            return;
        }
        log::info!(
            "Generating {term_count} separate terms for {} taxonomies.",
            taxonomies.len()
        );

        for taxonomy in taxonomies {
            let names: Vec<EcoString> = (0..term_count)
                .map(|_| sanitize_text_field(&ucfirst(&self.randomizer.text_mut().word())))
                .filter(|name| !name.is_empty())
                .collect();

            self.progress.start(
                "Inserting",
                names.len(),
                &format!("terms into the `{taxonomy}` taxonomy"),
            );
            for name in names {
                self.insert_term(&name, taxonomy);
                self.progress.tick();
            }
            self.progress.finish();
        }
    }

    fn insert_term(&mut self, name: &str, taxonomy: &EcoString) {
        if self.host.term_exists(name, taxonomy).is_some() {
            log::debug!("Term name - {name} - already exists.");
            return;
        }

        let id = match self.host.insert_term(name, taxonomy) {
            Ok(id) => id,
            Err(err) => {
                self.warn(eco_format!(
                    "Received an error inserting {name} term into the {taxonomy} taxonomy: {err}"
                ));
                return;
            }
        };

        if let Err(err) = self
            .host
            .add_term_meta(id, &self.options.marker_key, MARKER_VALUE)
        {
            self.warn(eco_format!("Error setting term meta for deletion: {err}"));
        }
        self.report
            .terms
            .entry(taxonomy.clone())
            .or_default()
            .push(id);
    }

    fn insert_posts(&mut self, author: UserId) {
        let count = self.options.count;
        if self.options.featured_image {
            log::warn!("Looks like you're adding featured images, this may be slightly slower.");
        }

        self.progress.start("Creating", count as usize, "posts");
        for _ in 0..count {
            if let Err(message) = self.insert_post(author) {
                self.warn(message);
            }
            self.progress.tick();
        }
        self.progress.finish();
    }

    fn insert_post(&mut self, author: UserId) -> Result<(), EcoString> {
        let (content, text) = self.post_content()?;
        if content.is_empty() {
            return Err("Skipped a post with empty content.".into());
        }
        let title = match title_from_text(&text, self.randomizer.rng_mut()) {
            Some(title) => title,
            None => self.randomizer.text_mut().sentence(6, true),
        };

        let post = NewPost {
            post_type: self.options.post_type.clone(),
            title,
            content,
            status: self.options.post_status.clone(),
            author,
            parent: None,
            meta: vec![(self.options.marker_key.clone(), MARKER_VALUE.into())],
        };
        let id = self.host.insert_post(post).map_err(|err| {
            eco_format!("Received an error when trying to insert a post, got: {err}")
        })?;
        self.report.posts.push(id);

        self.assign_terms(id);
        if self.options.featured_image {
            self.attach_image(id)?;
        }
        Ok(())
    }

    /// Returns the markup of a post and its plain text.
    fn post_content(&mut self) -> Result<(EcoString, EcoString), EcoString> {
        let content = &self.options.content;
        match content.kind {
            ContentKind::Html => {
                let document = self.randomizer.random_document(
                    content.max_depth,
                    content.max_width,
                    content.max_length,
                );
                let mut writer = HtmlWriter::with_options(self.randomizer.options().writer.clone());
                let markup = writer
                    .write_nodes(&document.body.children)
                    .and_then(|()| writer.into_string())
                    .map_err(|err| eco_format!("Failed to write post content: {err}"))?;
                Ok((markup, to_plain_text(&document.body.children)))
            }
            ContentKind::Paragraphs => {
                let count = self.randomizer.rng_mut().int(1, 10);
                let paragraphs = self.randomizer.text_mut().paragraphs(count);
                let text: EcoString = paragraphs.join("\n\n").into();
                Ok((text.clone(), text))
            }
        }
    }

    fn assign_terms(&mut self, post: PostId) {
        let assignments: Vec<(EcoString, Vec<TermId>)> = self
            .report
            .terms
            .iter()
            .filter(|(_, terms)| !terms.is_empty())
            .map(|(taxonomy, terms)| (taxonomy.clone(), terms.clone()))
            .collect();

        for (taxonomy, mut terms) in assignments {
            let rng = self.randomizer.rng_mut();
            RandomSource::shuffle(rng, &mut terms);
            let keep = rng.int(1, terms.len() as u32) as usize;
            terms.truncate(keep);

            if let Err(err) = self.host.set_object_terms(post, &terms, &taxonomy) {
                self.warn(eco_format!(
                    "Got an error when attempting to assign terms to post id {post}: {err}"
                ));
            }
        }
    }

    fn attach_image(&mut self, post: PostId) -> Result<(), EcoString> {
        let size = self.options.image_size;
        let request = ImageRequest {
            file_name: eco_format!(
                "placeholderImage_{}_{}x{}",
                self.randomizer.rng_mut().int(30948, 40982),
                size.width,
                size.height
            ),
            size,
            image_type: self.options.image_type,
        };

        let image = self
            .host
            .sideload_image(&request, post)
            .map_err(|err| eco_format!("Got an error with the image of post {post}: {err}"))?;
        self.report.attachments.push(image);

        self.host
            .update_post_meta(image, &self.options.marker_key, MARKER_VALUE)
            .map_err(|err| eco_format!("Error setting image meta for deletion: {err}"))?;
        self.host
            .set_post_thumbnail(post, image)
            .map_err(|err| eco_format!("Failed to set the featured image of {post}: {err}"))
    }
}

/// Derives a title from text: the second non-empty line (or the first if
/// there is only one), cut to between 1 and 12 words.
pub fn title_from_text<R: RandomSource + ?Sized>(text: &str, rng: &mut R) -> Option<EcoString> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let line = lines.get(1).or_else(|| lines.first())?;

    let max_words = rng.int(1, 12) as usize;
    let title = line
        .split_whitespace()
        .take(max_words)
        .collect::<Vec<_>>()
        .join(" ");
    Some(title.into())
}
