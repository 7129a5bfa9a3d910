//! An in-memory host, persisted as JSON.

use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use ecow::{eco_format, EcoString};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, StoreError, StoreResult};
use crate::host::{ContentStore, MediaStore, UserLookup};
use crate::model::{
    slugify, ImageRequest, NewPost, Post, PostId, PostQuery, Term, TermId, TermQuery, User,
    UserId, ATTACHMENT, TRASH,
};

/// A host keeping every object in memory.
///
/// A fresh host registers the `post`, `page` and `attachment` post types,
/// the `category` and `post_tag` taxonomies and an `admin` user with id 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct MemoryHost {
    post_types: BTreeSet<EcoString>,
    taxonomies: BTreeSet<EcoString>,
    users: Vec<User>,
    #[serde(default)]
    terms: BTreeMap<TermId, Term>,
    #[serde(default)]
    posts: BTreeMap<PostId, Post>,
    #[serde(default)]
    last_id: u64,
}

impl Default for MemoryHost {
    fn default() -> Self {
        Self::empty()
            .with_post_type("post")
            .with_post_type("page")
            .with_post_type(ATTACHMENT)
            .with_taxonomy("category")
            .with_taxonomy("post_tag")
            .with_user(User {
                id: UserId(1),
                login: "admin".into(),
                email: "admin@example.org".into(),
            })
    }
}

impl MemoryHost {
    /// Creates a host with nothing registered.
    pub fn empty() -> Self {
        Self {
            post_types: BTreeSet::new(),
            taxonomies: BTreeSet::new(),
            users: Vec::new(),
            terms: BTreeMap::new(),
            posts: BTreeMap::new(),
            last_id: 0,
        }
    }

    /// Registers a post type.
    pub fn with_post_type(mut self, post_type: &str) -> Self {
        self.post_types.insert(post_type.into());
        self
    }

    /// Registers a taxonomy.
    pub fn with_taxonomy(mut self, taxonomy: &str) -> Self {
        self.taxonomies.insert(taxonomy.into());
        self
    }

    /// Registers a user.
    pub fn with_user(mut self, user: User) -> Self {
        self.users.retain(|u| u.id != user.id);
        self.users.push(user);
        self
    }

    /// Reads a host from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content, &path.display().to_string())
    }

    /// Reads a host from a JSON file, or creates a default one if the file
    /// does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::info!("store {} does not exist, starting empty", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parses a host from JSON.
    pub fn from_json(content: &str, source_name: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|err| Error::Parse {
            source_name: source_name.into(),
            message: eco_format!("{err}"),
        })
    }

    /// Writes the host to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self).map_err(|err| Error::Parse {
            source_name: path.display().to_string().into(),
            message: eco_format!("{err}"),
        })?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Gets a post by id.
    pub fn post(&self, id: PostId) -> Option<&Post> {
        self.posts.get(&id)
    }

    /// Iterates over every post, trashed ones included.
    pub fn posts(&self) -> impl Iterator<Item = &Post> {
        self.posts.values()
    }

    /// Gets a term by id.
    pub fn term(&self, id: TermId) -> Option<&Term> {
        self.terms.get(&id)
    }

    /// Iterates over every term.
    pub fn terms(&self) -> impl Iterator<Item = &Term> {
        self.terms.values()
    }

    fn next_id(&mut self) -> u64 {
        self.last_id += 1;
        self.last_id
    }

    fn post_mut(&mut self, id: PostId) -> StoreResult<&mut Post> {
        self.posts.get_mut(&id).ok_or(StoreError::PostNotFound(id))
    }
}

impl ContentStore for MemoryHost {
    fn post_type_exists(&self, post_type: &str) -> bool {
        self.post_types.contains(post_type)
    }

    fn taxonomy_exists(&self, taxonomy: &str) -> bool {
        self.taxonomies.contains(taxonomy)
    }

    fn term_exists(&self, name: &str, taxonomy: &str) -> Option<TermId> {
        let slug = slugify(name);
        self.terms
            .values()
            .find(|term| {
                term.taxonomy == taxonomy
                    && (term.name.eq_ignore_ascii_case(name) || term.slug == slug)
            })
            .map(|term| term.id)
    }

    fn insert_term(&mut self, name: &str, taxonomy: &str) -> StoreResult<TermId> {
        if !self.taxonomy_exists(taxonomy) {
            return Err(StoreError::UnknownTaxonomy(taxonomy.into()));
        }
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::EmptyName);
        }
        if self.term_exists(name, taxonomy).is_some() {
            return Err(StoreError::TermExists {
                name: name.into(),
                taxonomy: taxonomy.into(),
            });
        }

        let id = TermId(self.next_id());
        self.terms.insert(
            id,
            Term {
                id,
                name: name.into(),
                slug: slugify(name),
                taxonomy: taxonomy.into(),
                meta: BTreeMap::new(),
            },
        );
        Ok(id)
    }

    fn add_term_meta(&mut self, term: TermId, key: &str, value: &str) -> StoreResult<()> {
        let term = self
            .terms
            .get_mut(&term)
            .ok_or(StoreError::TermNotFound(term))?;
        term.meta.insert(key.into(), value.into());
        Ok(())
    }

    fn insert_post(&mut self, post: NewPost) -> StoreResult<PostId> {
        if !self.post_type_exists(&post.post_type) {
            return Err(StoreError::UnknownPostType(post.post_type));
        }
        if post.title.trim().is_empty() {
            return Err(StoreError::EmptyName);
        }

        let id = PostId(self.next_id());
        self.posts.insert(
            id,
            Post {
                id,
                post_type: post.post_type,
                title: post.title,
                content: post.content,
                status: post.status,
                author: post.author,
                parent: post.parent,
                meta: post.meta.into_iter().collect(),
                terms: BTreeMap::new(),
                thumbnail: None,
            },
        );
        Ok(id)
    }

    fn update_post_meta(&mut self, post: PostId, key: &str, value: &str) -> StoreResult<()> {
        self.post_mut(post)?.meta.insert(key.into(), value.into());
        Ok(())
    }

    fn set_object_terms(
        &mut self,
        post: PostId,
        terms: &[TermId],
        taxonomy: &str,
    ) -> StoreResult<()> {
        if !self.taxonomy_exists(taxonomy) {
            return Err(StoreError::UnknownTaxonomy(taxonomy.into()));
        }
        for term in terms {
            match self.terms.get(term) {
                Some(found) if found.taxonomy == taxonomy => {}
                _ => return Err(StoreError::TermNotFound(*term)),
            }
        }
        self.post_mut(post)?
            .terms
            .insert(taxonomy.into(), terms.to_vec());
        Ok(())
    }

    fn set_post_thumbnail(&mut self, post: PostId, thumbnail: PostId) -> StoreResult<()> {
        if !self.posts.contains_key(&thumbnail) {
            return Err(StoreError::PostNotFound(thumbnail));
        }
        self.post_mut(post)?.thumbnail = Some(thumbnail);
        Ok(())
    }

    fn find_terms(&self, query: &TermQuery) -> Vec<Term> {
        self.terms
            .values()
            .filter(|term| query.taxonomies.contains(&term.taxonomy))
            .filter(|term| query.marker_key.as_ref().is_none_or(|key| term.is_marked(key)))
            .cloned()
            .collect()
    }

    fn find_posts(&self, query: &PostQuery) -> Vec<PostId> {
        self.posts
            .values()
            .filter(|post| post.status != TRASH)
            .filter(|post| query.post_types.contains(&post.post_type))
            .filter(|post| query.author.is_none_or(|author| post.author == author))
            .filter(|post| query.marker_key.as_ref().is_none_or(|key| post.is_marked(key)))
            .map(|post| post.id)
            .collect()
    }

    fn delete_term(&mut self, term: TermId) -> StoreResult<()> {
        let removed = self
            .terms
            .remove(&term)
            .ok_or(StoreError::TermNotFound(term))?;
        for post in self.posts.values_mut() {
            if let Some(assigned) = post.terms.get_mut(&removed.taxonomy) {
                assigned.retain(|id| *id != term);
                if assigned.is_empty() {
                    post.terms.remove(&removed.taxonomy);
                }
            }
        }
        Ok(())
    }

    fn delete_post(&mut self, post: PostId, force: bool) -> StoreResult<()> {
        if !force {
            self.post_mut(post)?.status = TRASH.into();
            return Ok(());
        }

        self.posts
            .remove(&post)
            .ok_or(StoreError::PostNotFound(post))?;
        for other in self.posts.values_mut() {
            if other.thumbnail == Some(post) {
                other.thumbnail = None;
            }
        }
        Ok(())
    }
}

impl MediaStore for MemoryHost {
    fn sideload_image(&mut self, request: &ImageRequest, parent: PostId) -> StoreResult<PostId> {
        let author = self
            .posts
            .get(&parent)
            .ok_or(StoreError::PostNotFound(parent))?
            .author;
        self.insert_post(NewPost {
            post_type: ATTACHMENT.into(),
            title: request.file_name.clone(),
            content: EcoString::new(),
            status: "inherit".into(),
            author,
            parent: Some(parent),
            meta: vec![
                ("image_type".into(), request.image_type.to_string().into()),
                ("image_size".into(), request.size.to_string().into()),
            ],
        })
    }
}

impl UserLookup for MemoryHost {
    fn user_by_id(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|user| user.id == id).cloned()
    }

    fn user_by_email(&self, email: &str) -> Option<User> {
        self.users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .cloned()
    }

    fn user_by_login(&self, login: &str) -> Option<User> {
        self.users.iter().find(|user| user.login == login).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AuthorRef, MARKER_VALUE};

    fn new_post(title: &str) -> NewPost {
        NewPost {
            post_type: "post".into(),
            title: title.into(),
            content: "<p>Body.</p>".into(),
            status: "publish".into(),
            author: UserId(1),
            parent: None,
            meta: vec![("_marker".into(), MARKER_VALUE.into())],
        }
    }

    #[test]
    fn terms_are_unique_per_taxonomy() {
        let mut host = MemoryHost::default();
        let id = host.insert_term("Dolor", "category").unwrap();
        assert_eq!(host.term_exists("dolor", "category"), Some(id));
        assert_eq!(host.term_exists("Dolor", "post_tag"), None);

        let err = host.insert_term("Dolor", "category").unwrap_err();
        assert!(matches!(err, StoreError::TermExists { .. }));
        assert!(host.insert_term("Dolor", "post_tag").is_ok());
        assert_eq!(
            host.insert_term("x", "genre"),
            Err(StoreError::UnknownTaxonomy("genre".into()))
        );
        assert_eq!(host.insert_term("  ", "category"), Err(StoreError::EmptyName));
    }

    #[test]
    fn queries_filter_by_marker_and_skip_trash() {
        let mut host = MemoryHost::default();
        let marked = host.insert_post(new_post("Marked")).unwrap();
        let mut plain = new_post("Plain");
        plain.meta.clear();
        host.insert_post(plain).unwrap();
        let trashed = host.insert_post(new_post("Trashed")).unwrap();
        host.delete_post(trashed, false).unwrap();

        let query = PostQuery {
            post_types: vec!["post".into()],
            author: Some(UserId(1)),
            marker_key: Some("_marker".into()),
        };
        assert_eq!(host.find_posts(&query), vec![marked]);
        assert_eq!(host.post(trashed).map(|p| p.status.as_str()), Some(TRASH));
    }

    #[test]
    fn deleting_terms_unassigns_them() {
        let mut host = MemoryHost::default();
        let post = host.insert_post(new_post("Post")).unwrap();
        let a = host.insert_term("Alpha", "category").unwrap();
        let b = host.insert_term("Beta", "category").unwrap();
        host.set_object_terms(post, &[a, b], "category").unwrap();

        host.delete_term(a).unwrap();
        assert_eq!(host.post(post).unwrap().terms["category"], vec![b]);
        host.delete_term(b).unwrap();
        assert!(host.post(post).unwrap().terms.is_empty());
        assert_eq!(host.delete_term(b), Err(StoreError::TermNotFound(b)));
    }

    #[test]
    fn terms_of_another_taxonomy_are_rejected() {
        let mut host = MemoryHost::default();
        let post = host.insert_post(new_post("Post")).unwrap();
        let tag = host.insert_term("Gamma", "post_tag").unwrap();
        assert_eq!(
            host.set_object_terms(post, &[tag], "category"),
            Err(StoreError::TermNotFound(tag))
        );
    }

    #[test]
    fn sideloaded_images_are_attachments() {
        let mut host = MemoryHost::default();
        let post = host.insert_post(new_post("Post")).unwrap();
        let request = ImageRequest {
            file_name: "placeholderImage_31000_640x480".into(),
            size: "640,480".parse().unwrap(),
            image_type: Default::default(),
        };
        let image = host.sideload_image(&request, post).unwrap();
        host.set_post_thumbnail(post, image).unwrap();

        let attachment = host.post(image).unwrap();
        assert_eq!(attachment.post_type, ATTACHMENT);
        assert_eq!(attachment.parent, Some(post));
        assert_eq!(host.post(post).unwrap().thumbnail, Some(image));

        host.delete_post(image, true).unwrap();
        assert_eq!(host.post(post).unwrap().thumbnail, None);
    }

    #[test]
    fn authors_resolve_by_any_reference() {
        let host = MemoryHost::default();
        for author in ["1", "admin", "ADMIN@example.org"] {
            let author: AuthorRef = author.parse().unwrap();
            assert_eq!(host.resolve_author(&author).map(|u| u.id), Some(UserId(1)));
        }
        assert!(host.resolve_author(&AuthorRef::Id(UserId(2))).is_none());
    }

    #[test]
    fn store_round_trips_through_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");

        let mut host = MemoryHost::default();
        let post = host.insert_post(new_post("Saved")).unwrap();
        host.save(&path).unwrap();

        let loaded = MemoryHost::load(&path).unwrap();
        assert_eq!(loaded, host);
        assert_eq!(loaded.post(post).unwrap().title, "Saved");

        let missing = MemoryHost::load_or_default(&dir.path().join("missing.json")).unwrap();
        assert_eq!(missing, MemoryHost::default());
    }

    #[test]
    fn malformed_store_is_a_parse_error() {
        let err = MemoryHost::from_json("{ not json", "inline").unwrap_err();
        assert!(matches!(err, Error::Parse { .. }));
    }
}
