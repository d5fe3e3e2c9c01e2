// crates/render/src/template.rs

//! Handlebars template registry.
//!
//! The registry is built once at startup: embedded default templates are
//! registered first, then any `.hbs` files found in a theme directory
//! override them by stem. Rendering afterwards is read-only, so the registry
//! can be shared across request handlers without locking.

use crate::error::RenderError;
use handlebars::{
    handlebars_helper, Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext,
};
use handlebars_misc_helpers as misc;
use serde::Serialize;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Default templates compiled into the binary. A site works with no theme
/// directory at all.
const EMBEDDED: &[(&str, &str)] = &[
    ("layout", include_str!("../templates/layout.hbs")),
    ("home", include_str!("../templates/home.hbs")),
    ("blog", include_str!("../templates/blog.hbs")),
    ("post", include_str!("../templates/post.hbs")),
    ("page", include_str!("../templates/page.hbs")),
    ("contact", include_str!("../templates/contact.hbs")),
    (
        "contact_thanks",
        include_str!("../templates/contact_thanks.hbs"),
    ),
    ("not_found", include_str!("../templates/not_found.hbs")),
];

/// Writes the full render context as pretty JSON. Debugging aid for theme
/// authors: `{{dump_root}}`.
#[derive(Clone, Copy)]
struct DumpRoot;

impl HelperDef for DumpRoot {
    fn call<'reg: 'rc, 'rc>(
        &self,
        _h: &Helper<'rc>,
        _r: &Handlebars<'reg>,
        ctx: &Context,
        _rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let json = ctx.data();
        let s = serde_json::to_string_pretty(json).unwrap_or_else(|_| "<invalid json>".to_string());
        out.write(s.as_str())?;
        Ok(())
    }
}

pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
}

impl TemplateRegistry {
    /// Build a registry holding only the embedded defaults.
    pub fn new() -> Result<Self, RenderError> {
        handlebars_helper!(dump_json: |v: Json| {
            serde_json::to_string_pretty(&v).unwrap_or_else(|_| "<invalid json>".into())
        });

        let mut hbs = Handlebars::new();
        misc::register(&mut hbs);
        hbs.register_helper("dump", Box::new(dump_json));
        hbs.register_helper("dump_root", Box::new(DumpRoot));

        for (name, src) in EMBEDDED {
            hbs.register_template_string(name, src)?;
        }

        Ok(Self { handlebars: hbs })
    }

    /// Build a registry with theme overrides from `theme_dir`. Each
    /// `<stem>.hbs` file replaces the embedded template of the same stem;
    /// unknown stems register as additional templates.
    pub fn with_theme_dir(theme_dir: &Path) -> Result<Self, RenderError> {
        let mut registry = Self::new()?;

        let entries = fs::read_dir(theme_dir)?;
        let mut count = 0usize;
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("hbs") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let src = fs::read_to_string(&path)?;
            registry
                .handlebars
                .register_template_string(stem, &src)
                .map_err(|e| RenderError::Template(format!("{}: {e}", path.display())))?;
            debug!(template = stem, path = %path.display(), "theme template registered");
            count += 1;
        }

        info!(dir = %theme_dir.display(), count, "theme templates loaded");
        Ok(registry)
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    pub fn render_to_string<M: Serialize>(
        &self,
        template_name: &str,
        model: &M,
    ) -> Result<String, RenderError> {
        if !self.handlebars.has_template(template_name) {
            return Err(RenderError::UnknownTemplate(template_name.to_owned()));
        }
        Ok(self.handlebars.render(template_name, model)?)
    }
}
