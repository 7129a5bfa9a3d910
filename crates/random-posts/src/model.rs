//! Content objects exchanged with the host.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use ecow::EcoString;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator, IntoStaticStr};

use crate::error::Error;

/// The meta key marking generated content.
pub const DEFAULT_MARKER_KEY: &str = "_jwrp_test_data";

/// The meta value stored under the marker key.
pub const MARKER_VALUE: &str = "1";

/// The post type of media attachments.
pub const ATTACHMENT: &str = "attachment";

/// The status of trashed posts.
pub const TRASH: &str = "trash";

macro_rules! id_type {
    ($(#[$attr:meta])* $name:ident) => {
        $(#[$attr])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

id_type!(
    /// Identifies a post. Attachments are posts too.
    PostId
);
id_type!(
    /// Identifies a taxonomy term.
    TermId
);
id_type!(
    /// Identifies a user.
    UserId
);

/// Categories of placeholder images.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ImageType {
    /// Abstract art.
    Abstract,
    /// Sports.
    Sports,
    /// City scenes.
    City,
    /// People.
    People,
    /// Transport.
    Transport,
    /// Animals.
    Animals,
    /// Food.
    Food,
    /// Nature.
    Nature,
    /// Business.
    #[default]
    Business,
    /// Cats.
    Cats,
    /// Fashion.
    Fashion,
    /// Nightlife.
    Nightlife,
    /// Technics.
    Technics,
}

impl ImageType {
    /// Lists the names of every image type.
    pub fn names() -> Vec<&'static str> {
        ImageType::iter().map(<&'static str>::from).collect()
    }
}

/// Width and height of a placeholder image, written as `"W,H"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ImageSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Default for ImageSize {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

impl FromStr for ImageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidImageSize(s.into());
        let (width, height) = s.split_once(',').ok_or_else(invalid)?;
        let parse = |v: &str| v.trim().parse::<u32>().ok().filter(|v| *v > 0);
        match (parse(width), parse(height)) {
            (Some(width), Some(height)) => Ok(Self { width, height }),
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for ImageSize {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ImageSize> for String {
    fn from(size: ImageSize) -> Self {
        size.to_string()
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.width, self.height)
    }
}

/// A request to store a placeholder image as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRequest {
    /// File name without extension, e.g. `placeholderImage_31337_1024x768`.
    pub file_name: EcoString,
    /// Dimensions of the image.
    pub size: ImageSize,
    /// Category of the image.
    pub image_type: ImageType,
}

/// Refers to a user by id, e-mail address or login.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AuthorRef {
    /// A user id.
    Id(UserId),
    /// An e-mail address.
    Email(EcoString),
    /// A login name.
    Login(EcoString),
}

impl Default for AuthorRef {
    fn default() -> Self {
        AuthorRef::Id(UserId(1))
    }
}

impl FromStr for AuthorRef {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(Error::UnknownAuthor(s.into()));
        }
        if let Ok(id) = s.parse::<u64>() {
            return Ok(AuthorRef::Id(UserId(id)));
        }
        if s.contains('@') {
            return Ok(AuthorRef::Email(s.into()));
        }
        Ok(AuthorRef::Login(s.into()))
    }
}

impl TryFrom<String> for AuthorRef {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AuthorRef> for String {
    fn from(author: AuthorRef) -> Self {
        author.to_string()
    }
}

impl fmt::Display for AuthorRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthorRef::Id(id) => write!(f, "{id}"),
            AuthorRef::Email(email) => f.write_str(email),
            AuthorRef::Login(login) => f.write_str(login),
        }
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// The user id.
    pub id: UserId,
    /// The login name.
    pub login: EcoString,
    /// The e-mail address.
    pub email: EcoString,
}

/// A post to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewPost {
    /// The post type, e.g. `post`.
    pub post_type: EcoString,
    /// The title.
    pub title: EcoString,
    /// The content markup.
    pub content: EcoString,
    /// The post status, e.g. `publish`.
    pub status: EcoString,
    /// The author.
    pub author: UserId,
    /// The parent post, set for attachments.
    pub parent: Option<PostId>,
    /// Meta entries stored along with the post.
    pub meta: Vec<(EcoString, EcoString)>,
}

/// A stored post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct Post {
    /// The post id.
    pub id: PostId,
    /// The post type.
    pub post_type: EcoString,
    /// The title.
    pub title: EcoString,
    /// The content markup.
    pub content: EcoString,
    /// The post status.
    pub status: EcoString,
    /// The author.
    pub author: UserId,
    /// The parent post.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<PostId>,
    /// Meta entries.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<EcoString, EcoString>,
    /// Assigned terms, by taxonomy.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub terms: BTreeMap<EcoString, Vec<TermId>>,
    /// The featured image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<PostId>,
}

impl Post {
    /// Whether the post carries `key` with the marker value.
    pub fn is_marked(&self, key: &str) -> bool {
        self.meta.get(key).is_some_and(|value| value == MARKER_VALUE)
    }
}

/// A stored taxonomy term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    /// The term id.
    pub id: TermId,
    /// The display name.
    pub name: EcoString,
    /// The URL-friendly name.
    pub slug: EcoString,
    /// The taxonomy holding the term.
    pub taxonomy: EcoString,
    /// Meta entries.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub meta: BTreeMap<EcoString, EcoString>,
}

impl Term {
    /// Whether the term carries `key` with the marker value.
    pub fn is_marked(&self, key: &str) -> bool {
        self.meta.get(key).is_some_and(|value| value == MARKER_VALUE)
    }
}

/// Selects terms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TermQuery {
    /// Taxonomies to search. Empty matches nothing.
    pub taxonomies: Vec<EcoString>,
    /// Only terms marked with this key.
    pub marker_key: Option<EcoString>,
}

/// Selects posts.
///
/// Trashed posts are never returned, matching the host's `any` status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostQuery {
    /// Post types to search. Empty matches nothing.
    pub post_types: Vec<EcoString>,
    /// Only posts by this author.
    pub author: Option<UserId>,
    /// Only posts marked with this key.
    pub marker_key: Option<EcoString>,
}

/// Turns a name into a lowercase, dash-separated slug.
pub fn slugify(name: &str) -> EcoString {
    let mut slug = EcoString::new();
    for word in name
        .split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
    {
        if !slug.is_empty() {
            slug.push('-');
        }
        slug.push_str(&word.to_lowercase());
    }
    slug
}

/// Strips tags and control characters and collapses whitespace, making a
/// string safe to use as a plain-text field.
pub fn sanitize_text_field(text: &str) -> EcoString {
    let mut stripped = String::with_capacity(text.len());
    let mut in_tag = false;
    for c in text.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            c if c.is_control() => stripped.push(' '),
            c => stripped.push(c),
        }
    }
    let words: Vec<_> = stripped.split_whitespace().collect();
    words.join(" ").into()
}
