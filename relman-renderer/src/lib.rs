//! # relman-renderer
//!
//! String templating for URLs and version strings, and the Tera engine that renders
//! plugin update-site descriptors.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use relman_renderer::{ParamTemplate, TemplateParams, UpdateSiteRenderer};
//! use relman_core::types::ChannelEntry;
//!
//! fn render(entries: &[ChannelEntry]) {
//!     let tpl = ParamTemplate::new("$tag-$version").unwrap();
//!     let params = TemplateParams::new().with("tag", "20.0").with("version", "193");
//!     println!("{}", tpl.substitute(&params).unwrap());
//!
//!     if let Ok(renderer) = UpdateSiteRenderer::new() {
//!         if let Ok(xml) = renderer.render(entries) {
//!             println!("{xml}");
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;
pub mod template;

pub use context::{PluginCtx, SiteContext};
pub use engine::{TemplateEngine, UpdateSiteRenderer, DESCRIPTOR_TEMPLATE};
pub use error::{RenderError, TemplateError};
pub use template::{render_str, ParamTemplate, TemplateParams};
