//! Checks shared by the generate and cleanup workflows.

use ecow::EcoString;

use crate::error::{Error, Result};
use crate::host::{ContentStore, UserLookup};
use crate::model::{AuthorRef, User};
use crate::prompt::Confirm;

/// Drops empty slugs and checks the rest are registered.
///
/// Unknown taxonomies are reported and the user is asked whether to ignore
/// them; declining aborts, accepting keeps only the registered ones.
pub fn validate_taxonomies<H: ContentStore + ?Sized>(
    host: &H,
    taxonomies: &[EcoString],
    confirm: &mut dyn Confirm,
) -> Result<Vec<EcoString>> {
    let mut known = Vec::new();
    let mut unknown = Vec::new();
    for taxonomy in taxonomies.iter().map(|t| t.trim()).filter(|t| !t.is_empty()) {
        let target = if host.taxonomy_exists(taxonomy) {
            &mut known
        } else {
            &mut unknown
        };
        if !target.iter().any(|t: &EcoString| t == taxonomy) {
            target.push(EcoString::from(taxonomy));
        }
    }

    if !unknown.is_empty() {
        log::warn!(
            "The following taxonomies seem to not be registered: {}",
            unknown.join(",")
        );
        let question = "Would you like to ignore those and continue?";
        if !confirm.confirm(question) {
            return Err(Error::Aborted(question.into()));
        }
    }

    Ok(known)
}

/// Resolves the author, failing if no such user exists.
pub fn resolve_author<H: UserLookup + ?Sized>(host: &H, author: &AuthorRef) -> Result<User> {
    host.resolve_author(author)
        .ok_or_else(|| Error::UnknownAuthor(author.to_string().into()))
}

/// Checks that the post type is registered.
pub fn ensure_post_type<H: ContentStore + ?Sized>(host: &H, post_type: &str) -> Result<()> {
    if host.post_type_exists(post_type) {
        Ok(())
    } else {
        Err(Error::UnknownPostType(post_type.into()))
    }
}

/// Splits a comma separated list, dropping empty entries.
pub fn split_list(list: &str) -> Vec<EcoString> {
    list.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(EcoString::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemoryHost;
    use crate::model::UserId;
    use crate::prompt::{AssumeYes, Decline};

    fn slugs(list: &str) -> Vec<EcoString> {
        split_list(list)
    }

    #[test]
    fn known_taxonomies_pass_without_asking() {
        let host = MemoryHost::default();
        let kept = validate_taxonomies(&host, &slugs("category,,post_tag,category"), &mut Decline)
            .unwrap();
        assert_eq!(kept, ["category", "post_tag"]);
    }

    #[test]
    fn unknown_taxonomies_need_confirmation() {
        let host = MemoryHost::default();
        let input = slugs("category,genre");

        let kept = validate_taxonomies(&host, &input, &mut AssumeYes).unwrap();
        assert_eq!(kept, ["category"]);

        let err = validate_taxonomies(&host, &input, &mut Decline).unwrap_err();
        assert!(matches!(err, Error::Aborted(_)));
    }

    #[test]
    fn missing_author_is_an_error() {
        let host = MemoryHost::default();
        assert!(resolve_author(&host, &AuthorRef::Id(UserId(1))).is_ok());
        let err = resolve_author(&host, &AuthorRef::Login("nobody".into())).unwrap_err();
        insta::assert_snapshot!(err, @"There was an error getting the author for nobody, verify they exist.");
    }

    #[test]
    fn post_types_must_be_registered() {
        let host = MemoryHost::default();
        assert!(ensure_post_type(&host, "page").is_ok());
        let err = ensure_post_type(&host, "product").unwrap_err();
        insta::assert_snapshot!(err, @"The product post type does not exist, make sure it is registered properly.");
    }
}
