//! The stock section shapes every installation starts with.
//!
//! Mirrors what the authoring side ships out of the box: shared `Link`,
//! `Image`, `Page`, and `NavigationItem` definitions, a set of anonymous
//! input-hint entries for the admin panel (menu, phones, emails, socials,
//! popular lists), and the two renderable blocks `WelcomeBanner` and
//! `Content`. Registration goes through the ordinary guarded `register`
//! path, so re-running it replaces the keyed blocks in place.

use serde_json::json;

use crate::catalog::{BlockMeta, SchemaCatalog};
use crate::error::SchemaError;
use crate::shape::{Field, Shape};

/// Register the shared definitions, anonymous input hints, and stock
/// blocks on `catalog`.
///
/// # Errors
///
/// Returns [`SchemaError::Compile`] if any builtin shape fails validator
/// compilation.
pub fn register_builtins(catalog: &SchemaCatalog) -> Result<(), SchemaError> {
    catalog.define("Link", link());
    catalog.define("Image", image());
    catalog.define("Page", page());
    catalog.define("NavigationItem", navigation_item());

    catalog.register(BlockMeta::anonymous().input_type("link"), Shape::lazy("Link"))?;
    catalog.register(
        BlockMeta::anonymous().input_type("image"),
        Shape::lazy("Image"),
    )?;
    catalog.register(
        BlockMeta::anonymous().input_type("menu"),
        Shape::array(Shape::lazy("NavigationItem"))
            .describe("Menu")
            .default_value(default_menu()),
    )?;
    catalog.register(
        BlockMeta::anonymous().input_type("phones"),
        Shape::array(Shape::lazy("Link"))
            .describe("Phones")
            .default_value(json!([
                { "title": "+11 222 333 444", "url": "tel:+11222333444", "is_external": false },
                { "title": "+11 222 333 555", "url": "tel:+11222333555", "is_external": false },
            ])),
    )?;
    catalog.register(
        BlockMeta::anonymous().input_type("emails"),
        Shape::array(Shape::lazy("Link"))
            .describe("Emails")
            .default_value(json!([
                { "title": "email@example.com", "url": "mailto:email@example.com", "is_external": false },
                { "title": "email2@example.com", "url": "mailto:email2@example.com", "is_external": false },
            ])),
    )?;
    catalog.register(
        BlockMeta::anonymous().input_type("socials"),
        Shape::array(social_media())
            .describe("Socials")
            .default_value(json!([
                {
                    "name": "Facebook",
                    "url": { "title": "Facebook", "url": "https://facebook.com", "is_external": true },
                    "icon": "icon-facebook",
                },
                {
                    "name": "Twitter",
                    "url": { "title": "Twitter", "url": "https://twitter.com", "is_external": true },
                    "icon": "icon-twitter",
                },
            ])),
    )?;
    catalog.register(
        BlockMeta::anonymous().input_type("popular_categories"),
        Shape::array(Shape::lazy("Page"))
            .describe("Popular categories")
            .default_value(json!([])),
    )?;
    catalog.register(
        BlockMeta::anonymous().input_type("popular_items"),
        Shape::array(Shape::lazy("Page"))
            .describe("Popular items")
            .default_value(json!([])),
    )?;

    catalog.register(
        BlockMeta::keyed("WelcomeBanner")
            .title("Welcome Banner")
            .description("Attractive welcome banner for new installations with features and CTAs")
            .renderer("welcome-banner"),
        welcome_banner(),
    )?;
    catalog.register(
        BlockMeta::keyed("Content")
            .title("Content")
            .description("Content section for pages")
            .renderer("content"),
        content(),
    )?;

    Ok(())
}

fn link() -> Shape {
    Shape::object([
        Field::new(
            "title",
            Shape::string()
                .describe("Link title")
                .default_value(json!("Link title")),
        )
        .optional(),
        Field::new("url", Shape::string().default_value(json!("/"))),
        Field::new("icon", Shape::string().describe("Link icon")).optional(),
        Field::new(
            "is_external",
            Shape::boolean()
                .describe("Is external")
                .default_value(json!(false)),
        ),
    ])
}

const DEFAULT_IMAGE_SIZE: i64 = 300;

fn image() -> Shape {
    Shape::object([
        Field::new(
            "width",
            Shape::number()
                .describe("Width in pixels")
                .default_value(json!(DEFAULT_IMAGE_SIZE)),
        )
        .optional(),
        Field::new(
            "height",
            Shape::number()
                .describe("Height in pixels")
                .default_value(json!(DEFAULT_IMAGE_SIZE)),
        )
        .optional(),
        Field::new(
            "source",
            Shape::string()
                .describe("Image source")
                .default_value(json!("https://placehold.co/400")),
        )
        .optional(),
        Field::new(
            "alt",
            Shape::string()
                .describe("Alt text")
                .default_value(json!("Alt text")),
        )
        .optional(),
    ])
}

fn page() -> Shape {
    Shape::object([
        Field::new("id", Shape::integer().describe("Page ID").default_value(json!(0))),
        Field::new(
            "parent_id",
            Shape::integer()
                .describe("Parent ID")
                .nullable()
                .default_value(json!(null)),
        ),
        Field::new(
            "name",
            Shape::string()
                .describe("Page name")
                .default_value(json!("Page name")),
        ),
        Field::new(
            "slug",
            Shape::string().describe("Page slug").default_value(json!("slug")),
        ),
        Field::new(
            "url",
            Shape::string().describe("Page URL").default_value(json!("url")),
        ),
        Field::new("image", Shape::lazy("Image").nullable()),
        Field::new("banner", Shape::lazy("Image").nullable()),
        Field::new(
            "heading",
            Shape::string()
                .describe("Page heading")
                .default_value(json!("heading")),
        ),
        Field::new(
            "summary",
            Shape::string()
                .describe("Page summary")
                .default_value(json!("summary")),
        ),
        Field::new(
            "is_root",
            Shape::boolean().describe("Is root").default_value(json!(false)),
        ),
        Field::new(
            "depth",
            Shape::integer().describe("Depth").default_value(json!(0)),
        ),
    ])
}

fn navigation_item() -> Shape {
    Shape::object([
        Field::new("title", Shape::string()),
        Field::new("url", Shape::one_of([Shape::string(), Shape::lazy("Link")])),
        Field::new("active", Shape::boolean()).optional(),
        Field::new("children", Shape::array(Shape::lazy("NavigationItem"))).optional(),
    ])
}

fn default_menu() -> serde_json::Value {
    json!([
        { "title": "Home", "url": "/", "active": true },
        { "title": "About", "url": "/about" },
        {
            "title": "Contact",
            "url": "/contact",
            "children": [
                { "title": "Contact 1", "url": "/contact/1" },
                { "title": "Contact 2", "url": "/contact/2" },
            ],
        },
    ])
}

fn social_media() -> Shape {
    Shape::object([
        Field::new(
            "name",
            Shape::string()
                .describe("Social media name")
                .default_value(json!("Social media name")),
        ),
        Field::new("url", Shape::lazy("Link")),
        Field::new("icon", Shape::string()).optional(),
        Field::new("image", Shape::lazy("Image")).optional(),
    ])
}

fn welcome_banner() -> Shape {
    Shape::object([
        Field::new(
            "title",
            Shape::string()
                .describe("Welcome banner title")
                .default_value(json!("Welcome to Plinth")),
        ),
        Field::new(
            "subtitle",
            Shape::string()
                .describe("Subtitle or description text")
                .default_value(json!(
                    "Get started building beautiful pages with our block-based \
                     content management system. Create, customize, and manage \
                     your content effortlessly."
                )),
        )
        .optional(),
        Field::new(
            "primary_cta",
            Shape::lazy("Link").describe("Primary call-to-action button"),
        ),
        Field::new(
            "secondary_cta",
            Shape::lazy("Link").describe("Secondary call-to-action button"),
        )
        .optional(),
        Field::new(
            "background_image",
            Shape::lazy("Image").describe("Optional background image"),
        )
        .optional(),
        Field::new(
            "features",
            Shape::array(Shape::object([
                Field::new(
                    "icon",
                    Shape::enumeration(["sparkles", "zap", "rocket"])
                        .describe("Feature icon")
                        .default_value(json!("sparkles")),
                ),
                Field::new("title", Shape::string().describe("Feature title")),
                Field::new("description", Shape::string().describe("Feature description"))
                    .optional(),
            ]))
            .describe("Feature highlights")
            .default_value(json!([
                {
                    "icon": "sparkles",
                    "title": "Easy to Use",
                    "description": "Intuitive block-based editor",
                },
                {
                    "icon": "zap",
                    "title": "Fast & Powerful",
                    "description": "Built with modern technology",
                },
                {
                    "icon": "rocket",
                    "title": "Flexible",
                    "description": "Customize everything you need",
                },
            ])),
        ),
        Field::new(
            "style",
            Shape::enumeration(["gradient", "solid", "image"])
                .describe("Background style variant")
                .default_value(json!("gradient")),
        ),
    ])
}

fn content() -> Shape {
    Shape::object([
        Field::new(
            "container",
            Shape::boolean()
                .describe("Enable container")
                .default_value(json!(true)),
        ),
        Field::new(
            "style",
            Shape::enumeration(["primary", "secondary", "basic"])
                .describe("Background style variant")
                .default_value(json!("primary")),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::synth::synthesize;
    use pretty_assertions::assert_eq;

    #[test]
    fn builtins_register_expected_entries() {
        let catalog = SchemaCatalog::new();
        register_builtins(&catalog).unwrap();

        assert_eq!(
            catalog.ids(),
            vec!["Content".to_string(), "WelcomeBanner".to_string()]
        );
        assert_eq!(catalog.anonymous_entries().len(), 8);
    }

    #[test]
    fn keyed_builtins_reregister_without_duplicating() {
        let catalog = SchemaCatalog::new();
        register_builtins(&catalog).unwrap();
        register_builtins(&catalog).unwrap();

        assert_eq!(
            catalog.ids(),
            vec!["Content".to_string(), "WelcomeBanner".to_string()]
        );
    }

    #[test]
    fn menu_hint_synthesizes_default_menu() {
        let catalog = SchemaCatalog::new();
        register_builtins(&catalog).unwrap();

        let menu = catalog
            .anonymous_entries()
            .into_iter()
            .find(|entry| entry.meta.input_type.as_deref() == Some("menu"))
            .expect("menu hint registered");
        assert_eq!(synthesize(&menu.shape, &catalog.definitions()), default_menu());
    }

    #[test]
    fn welcome_banner_validates_stored_data() {
        let catalog = SchemaCatalog::new();
        register_builtins(&catalog).unwrap();
        let banner = catalog.lookup("WelcomeBanner").unwrap();

        let valid = json!({
            "title": "Hello",
            "primary_cta": { "url": "/start", "is_external": false },
            "features": [],
            "style": "solid",
        });
        assert!(banner.validate(&valid).is_ok());

        let invalid = json!({
            "title": "Hello",
            "primary_cta": { "url": "/start", "is_external": false },
            "features": [],
            "style": "neon",
        });
        assert!(banner.validate(&invalid).is_err());
    }

    #[test]
    fn welcome_banner_example_covers_required_fields() {
        let catalog = SchemaCatalog::new();
        register_builtins(&catalog).unwrap();
        let banner = catalog.lookup("WelcomeBanner").unwrap();

        let example = synthesize(&banner.shape, &catalog.definitions());
        assert_eq!(example["title"], json!("Welcome to Plinth"));
        assert_eq!(example["style"], json!("gradient"));
        assert_eq!(example["primary_cta"]["url"], json!("/"));
        assert!(example.get("secondary_cta").is_none());
    }
}
