use std::io::Read;

use brace_layout::{Canvas, Constraint, Intent, ViewId};
use color_eyre::eyre::{self, bail, eyre, Context};
use indexmap::IndexMap;
use serde::Deserialize;

/// The name of the implicit view every scene is laid out in.
pub const ROOT: &str = "root";

/// A JSON description of a view tree and the intents declared on each view.
///
/// ```json
/// {
///   "views": {
///     "card": { "layout": ["left 10%", "right 10%", "top 20%", "height 50%"] },
///     "title": { "parent": "card", "layout": ["width 100%", "height <=40"] },
///     "ghost": { "parent": null, "layout": ["size 50%"] }
///   }
/// }
/// ```
///
/// `parent` defaults to the root view, `null` leaves the view detached. Parents have to be
/// declared before their children.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Scene {
    #[serde(default)]
    pub views: IndexMap<String, ViewSpec>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ViewSpec {
    #[serde(default = "root_parent")]
    pub parent: Option<String>,
    #[serde(default)]
    pub layout: Vec<Declaration>,
}

fn root_parent() -> Option<String> {
    Some(ROOT.to_owned())
}

/// One intent and its operand, written `"<intent> <constraint>"`, e.g. `"right <=20"`.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct Declaration {
    pub intent: Intent,
    pub constraint: Constraint,
}

impl TryFrom<String> for Declaration {
    type Error = eyre::Report;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let (intent, constraint) = value
            .trim()
            .split_once(char::is_whitespace)
            .ok_or_else(|| eyre!("expected `<intent> <constraint>`, found `{value}`"))?;
        Ok(Self {
            intent: intent.parse()?,
            constraint: constraint.parse()?,
        })
    }
}

/// A scene whose intents have been issued, ready to be solved.
#[derive(Debug)]
pub struct Layout {
    pub canvas: Canvas,
    pub root: ViewId,
    /// Every view by name, in declaration order, starting with the root.
    pub views: IndexMap<String, ViewId>,
}

impl Scene {
    pub fn from_reader(reader: impl Read) -> eyre::Result<Self> {
        serde_json::from_reader(reader).wrap_err("Failed to parse scene")
    }

    pub fn build(&self) -> eyre::Result<Layout> {
        let mut canvas = Canvas::new();
        let root = canvas.add_root();
        let mut views = IndexMap::with_capacity(self.views.len() + 1);
        views.insert(ROOT.to_owned(), root);

        for (name, declared) in &self.views {
            if views.contains_key(name) {
                bail!("View `{name}` clashes with the implicit root view");
            }

            let view = match &declared.parent {
                Some(parent) => {
                    let Some(&parent) = views.get(parent) else {
                        bail!("View `{name}` is declared before its parent `{parent}`");
                    };
                    canvas.add_view(parent)
                }
                None => canvas.add_detached_view(),
            };
            views.insert(name.clone(), view);

            declared
                .layout
                .iter()
                .fold(canvas.anchor(view), |anchor, declaration| {
                    anchor.apply(declaration.intent, declaration.constraint)
                });
            tracing::debug!(
                %view,
                name = name.as_str(),
                declarations = declared.layout.len(),
                "declared view"
            );
        }

        Ok(Layout {
            canvas,
            root,
            views,
        })
    }
}
