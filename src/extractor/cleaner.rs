use ammonia::Builder;

/// Strip non-content tags (and their contents) before content selection.
///
/// `script` and `style` are cleaned by ammonia's defaults; chrome elements
/// like nav bars and footers must first be removed from the allowed set so
/// they can be content-cleaned instead of merely unwrapped. Class/id/role
/// attributes survive because the container strategies select on them.
pub fn strip_noise(html: &str) -> String {
    let mut builder = Builder::default();
    builder
        .rm_tags(["nav", "header", "footer", "aside"])
        .add_clean_content_tags([
            "nav", "header", "footer", "aside", "iframe", "noscript", "form", "title",
        ])
        .add_tags(["article", "main", "section"])
        .add_generic_attributes(["class", "id", "role"]);
    builder.clean(html).to_string()
}
