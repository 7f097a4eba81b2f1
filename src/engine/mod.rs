//! View engine - template resolution and delegated rendering
//!
//! The engine owns an ordered list of [`ViewLocation`]s and a host
//! `minijinja` environment. Resolution maps a logical template name to a
//! source by probing the locations in order; the source is compiled into the
//! environment once and cached under its logical name. Rendering is fully
//! delegated to the host engine, which owns parsing, compilation, and HTML
//! encoding.
//!
//! Everything here is single-threaded by design: each render call executes
//! synchronously within the caller that triggered it, and the template cache
//! is confined to one thread.

mod location;

pub use location::{FoundTemplate, ViewLocation, DEFAULT_PATTERN};

use std::cell::RefCell;
use std::collections::BTreeMap;

use minijinja::{AutoEscape, Environment, UndefinedBehavior, Value};
use tracing::debug;

use crate::config::ViewConfig;
use crate::error::RenderError;

/// Resolves logical template names across registered locations and renders
/// them through the host engine.
#[derive(Debug)]
pub struct ViewEngine {
    locations: Vec<ViewLocation>,
    // Interior mutability: loading compiles into the environment on first
    // resolution, while render calls only need a shared borrow.
    env: RefCell<Environment<'static>>,
}

impl ViewEngine {
    /// Create an engine over the given locations.
    ///
    /// HTML auto-escaping is always on. Undefined template variables are
    /// strict errors by default; see [`ViewEngine::with_strict`].
    pub fn new(locations: Vec<ViewLocation>) -> Self {
        let mut env = Environment::new();
        env.set_auto_escape_callback(|_| AutoEscape::Html);
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        Self {
            locations,
            env: RefCell::new(env),
        }
    }

    /// Create an engine from a loaded [`ViewConfig`]
    pub fn from_config(config: &ViewConfig) -> Self {
        let locations = config
            .locations
            .iter()
            .map(|loc| ViewLocation::directory_with_patterns(loc.root.clone(), loc.patterns.clone()))
            .collect();
        Self::new(locations).with_strict(config.strict)
    }

    /// Set whether undefined template variables are errors (strict) or render
    /// as empty output (lenient)
    pub fn with_strict(mut self, strict: bool) -> Self {
        let behavior = if strict {
            UndefinedBehavior::Strict
        } else {
            UndefinedBehavior::Lenient
        };
        self.env.get_mut().set_undefined_behavior(behavior);
        self
    }

    /// Resolve a logical template name, loading and compiling it on first use.
    ///
    /// Fails with [`RenderError::EmptyTemplateName`] for a blank name without
    /// probing any location, and with [`RenderError::TemplateNotFound`] -
    /// enumerating every probed candidate - when no location contains the
    /// template.
    pub fn resolve(&self, name: &str) -> Result<(), RenderError> {
        if name.trim().is_empty() {
            return Err(RenderError::EmptyTemplateName);
        }
        if self.env.borrow().get_template(name).is_ok() {
            return Ok(());
        }

        let mut searched = Vec::new();
        for loc in &self.locations {
            match loc.lookup(name)? {
                Some(found) => {
                    debug!(template = name, origin = %found.origin, "resolved partial template");
                    self.env
                        .borrow_mut()
                        .add_template_owned(name.to_string(), found.source)
                        .map_err(|e| RenderError::Template {
                            name: name.to_string(),
                            source: e,
                        })?;
                    return Ok(());
                }
                None => searched.extend(loc.candidates(name)),
            }
        }

        Err(RenderError::TemplateNotFound {
            name: name.to_string(),
            searched,
        })
    }

    /// Resolve `name` and render it against the given context map
    pub fn render(
        &self,
        name: &str,
        context: &BTreeMap<String, Value>,
    ) -> Result<String, RenderError> {
        self.resolve(name)?;
        let env = self.env.borrow();
        let template = env.get_template(name).map_err(|e| RenderError::Template {
            name: name.to_string(),
            source: e,
        })?;
        template.render(context).map_err(|e| RenderError::Template {
            name: name.to_string(),
            source: e,
        })
    }
}
