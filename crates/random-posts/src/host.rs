//! Capabilities of the content-management host.
//!
//! The workflows never talk to a concrete system. They are generic over
//! these traits, so a real host, the in-memory [`MemoryHost`] or a test
//! double with injected failures can all be driven the same way.
//!
//! [`MemoryHost`]: crate::memory::MemoryHost

use crate::error::StoreResult;
use crate::model::{
    AuthorRef, ImageRequest, NewPost, PostId, PostQuery, Term, TermId, TermQuery, User, UserId,
};

/// Posts, taxonomies, terms and their meta.
pub trait ContentStore {
    /// Whether the post type is registered.
    fn post_type_exists(&self, post_type: &str) -> bool;

    /// Whether the taxonomy is registered.
    fn taxonomy_exists(&self, taxonomy: &str) -> bool;

    /// Finds a term of `taxonomy` by name or slug.
    fn term_exists(&self, name: &str, taxonomy: &str) -> Option<TermId>;

    /// Inserts a term, failing if it already exists.
    fn insert_term(&mut self, name: &str, taxonomy: &str) -> StoreResult<TermId>;

    /// Adds a meta entry to a term.
    fn add_term_meta(&mut self, term: TermId, key: &str, value: &str) -> StoreResult<()>;

    /// Inserts a post with its meta entries.
    fn insert_post(&mut self, post: NewPost) -> StoreResult<PostId>;

    /// Sets a meta entry of a post.
    fn update_post_meta(&mut self, post: PostId, key: &str, value: &str) -> StoreResult<()>;

    /// Replaces the terms of `taxonomy` assigned to a post.
    fn set_object_terms(&mut self, post: PostId, terms: &[TermId], taxonomy: &str)
        -> StoreResult<()>;

    /// Sets the featured image of a post.
    fn set_post_thumbnail(&mut self, post: PostId, thumbnail: PostId) -> StoreResult<()>;

    /// Lists the terms matching a query.
    fn find_terms(&self, query: &TermQuery) -> Vec<Term>;

    /// Lists the ids of the posts matching a query, trashed posts excluded.
    fn find_posts(&self, query: &PostQuery) -> Vec<PostId>;

    /// Deletes a term. Terms have no trash.
    fn delete_term(&mut self, term: TermId) -> StoreResult<()>;

    /// Deletes a post for good with `force`, or moves it to the trash.
    fn delete_post(&mut self, post: PostId, force: bool) -> StoreResult<()>;
}

/// Media attachments.
pub trait MediaStore {
    /// Stores a placeholder image as an attachment of `parent` and returns the
    /// attachment's id.
    fn sideload_image(&mut self, request: &ImageRequest, parent: PostId) -> StoreResult<PostId>;
}

/// Users.
pub trait UserLookup {
    /// Finds a user by id.
    fn user_by_id(&self, id: UserId) -> Option<User>;

    /// Finds a user by e-mail address.
    fn user_by_email(&self, email: &str) -> Option<User>;

    /// Finds a user by login name.
    fn user_by_login(&self, login: &str) -> Option<User>;

    /// Resolves an author reference to a user.
    fn resolve_author(&self, author: &AuthorRef) -> Option<User> {
        match author {
            AuthorRef::Id(id) => self.user_by_id(*id),
            AuthorRef::Email(email) => self.user_by_email(email),
            AuthorRef::Login(login) => self.user_by_login(login),
        }
    }
}

/// Everything the generate and cleanup workflows need from a host.
pub trait Host: ContentStore + MediaStore + UserLookup {}

impl<T: ContentStore + MediaStore + UserLookup + ?Sized> Host for T {}
