//! Tera rendering engine: [`TemplateEngine`] and [`UpdateSiteRenderer`].
//!
//! The descriptor layout is:
//!
//! ```text
//! plugin-repository
//!   Category name="Build"
//!     idea-plugin            (one per entry)
//!       id
//!       idea-version since-build="<v>.0" until-build="<v>.*"
//!       name
//!       version
//!       download-url
//! ```

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tera::Tera;

use relman_core::types::ChannelEntry;

use crate::context::SiteContext;
use crate::error::RenderError;

/// Template name of the update-site descriptor.
pub const DESCRIPTOR_TEMPLATE: &str = "plugin_repository.xml.tera";

// ---------------------------------------------------------------------------
// Embedded templates: baked into the binary at compile time via include_str!
// ---------------------------------------------------------------------------

const TPLS: &[(&str, &str)] = &[(
    DESCRIPTOR_TEMPLATE,
    include_str!("templates/plugin_repository.xml.tera"),
)];

// ---------------------------------------------------------------------------
// Template loading helpers
// ---------------------------------------------------------------------------

fn io_err(path: impl Into<PathBuf>, source: std::io::Error) -> RenderError {
    RenderError::Io { path: path.into(), source }
}

fn normalize_template_name(path: &Path) -> String {
    path.to_string_lossy()
        .replace('\\', "/")
        .to_lowercase()
}

fn collect_template_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<(), RenderError> {
    let entries = std::fs::read_dir(dir).map_err(|e| io_err(dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| io_err(dir, e))?;
        let path = entry.path();
        let meta = entry.metadata().map_err(|e| io_err(&path, e))?;
        if meta.is_dir() {
            collect_template_files(&path, out)?;
        } else if meta.is_file() {
            out.push(path);
        }
    }
    Ok(())
}

fn load_user_templates(dir: &Path) -> Result<Vec<(String, String)>, RenderError> {
    if !dir.exists() {
        return Ok(vec![]);
    }
    let mut files = Vec::new();
    collect_template_files(dir, &mut files)?;
    let mut templates = Vec::new();
    for path in files {
        if path.extension().and_then(|s| s.to_str()) != Some("tera") {
            continue;
        }
        let rel = path.strip_prefix(dir).unwrap_or(path.as_path());
        let name = normalize_template_name(rel);
        let contents = std::fs::read_to_string(&path).map_err(|e| io_err(&path, e))?;
        templates.push((name, contents));
    }
    Ok(templates)
}

fn build_tera(user_template_dir: Option<&Path>) -> Result<Tera, RenderError> {
    let mut templates: HashMap<String, String> = HashMap::new();
    for (name, content) in TPLS {
        templates.insert(
            normalize_template_name(Path::new(name)),
            (*content).to_string(),
        );
    }
    if let Some(dir) = user_template_dir {
        for (name, content) in load_user_templates(dir)? {
            templates.insert(name, content);
        }
    }

    let mut tera = Tera::default();
    // Escaping is explicit through the built-in `escape_xml` filter.
    tera.autoescape_on(vec![]);
    let items: Vec<(String, String)> = templates.into_iter().collect();
    tera.add_raw_templates(items)?;
    Ok(tera)
}

// ---------------------------------------------------------------------------
// TemplateEngine
// ---------------------------------------------------------------------------

/// Tera-based engine for rendering templates with optional user overrides.
///
/// `user_template_dir` may contain `.tera` files that override embedded defaults.
/// Template names are normalised to lowercase and relative paths.
pub struct TemplateEngine {
    tera: Tera,
}

impl TemplateEngine {
    /// Construct a new [`TemplateEngine`], loading embedded templates plus any
    /// overrides found in `user_template_dir`.
    pub fn new(user_template_dir: Option<&Path>) -> Result<Self, RenderError> {
        let tera = build_tera(user_template_dir)?;
        Ok(TemplateEngine { tera })
    }

    /// Render the descriptor template with the supplied context.
    pub fn render(&self, ctx: &SiteContext) -> Result<String, RenderError> {
        let tera_ctx = ctx.to_tera_context()?;
        Ok(self.tera.render(DESCRIPTOR_TEMPLATE, &tera_ctx)?)
    }
}

// ---------------------------------------------------------------------------
// UpdateSiteRenderer
// ---------------------------------------------------------------------------

/// Renders one channel's `plugin-repository` document.
///
/// Create once with [`UpdateSiteRenderer::new`] and reuse for both channels.
pub struct UpdateSiteRenderer {
    engine: TemplateEngine,
}

impl UpdateSiteRenderer {
    /// Construct a new [`UpdateSiteRenderer`] with the embedded template.
    pub fn new() -> Result<Self, RenderError> {
        Ok(UpdateSiteRenderer { engine: TemplateEngine::new(None)? })
    }

    /// Construct with `.tera` overrides from `dir`.
    pub fn with_template_dir(dir: &Path) -> Result<Self, RenderError> {
        Ok(UpdateSiteRenderer { engine: TemplateEngine::new(Some(dir))? })
    }

    /// Render a descriptor containing one `idea-plugin` per entry, in order.
    pub fn render(&self, entries: &[ChannelEntry]) -> Result<String, RenderError> {
        self.engine.render(&SiteContext::from_entries(entries))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use relman_core::types::PlatformVersion;

    fn entry(id: &str, name: &str, version: &str) -> ChannelEntry {
        ChannelEntry {
            version: PlatformVersion::from(version),
            url: format!("https://example.com/{version}.zip"),
            plugin_version: format!("20.0-{version}"),
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[test]
    fn renderer_new_succeeds() {
        UpdateSiteRenderer::new().expect("UpdateSiteRenderer::new should succeed with embedded templates");
    }

    #[test]
    fn single_entry_nests_idea_version_under_idea_plugin() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let xml = renderer.render(&[entry("x", "X", "193")]).unwrap();

        let plugin_start = xml.find("<idea-plugin>").expect("idea-plugin element");
        let plugin_end = xml.find("</idea-plugin>").expect("idea-plugin close");
        let plugin = &xml[plugin_start..plugin_end];
        assert!(plugin.contains("<id>x</id>"));
        assert!(plugin.contains("<name>X</name>"));
        assert!(plugin.contains(r#"<idea-version since-build="193.0" until-build="193.*"/>"#));
        assert!(plugin.contains("<version>20.0-193</version>"));
        assert!(plugin.contains("<download-url>https://example.com/193.zip</download-url>"));
    }

    #[test]
    fn root_and_category_wrap_all_plugins() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let xml = renderer
            .render(&[entry("a", "A", "193"), entry("b", "B", "201")])
            .unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<plugin-repository>"));
        assert!(xml.contains(r#"<Category name="Build">"#));
        assert_eq!(xml.matches("<idea-plugin>").count(), 2);
        assert!(xml.find("<id>a</id>").unwrap() < xml.find("<id>b</id>").unwrap());
        assert!(xml.trim_end().ends_with("</plugin-repository>"));
    }

    #[test]
    fn empty_entries_render_empty_category() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let xml = renderer.render(&[]).unwrap();
        assert!(xml.contains(r#"<Category name="Build">"#));
        assert!(!xml.contains("<idea-plugin>"));
    }

    #[test]
    fn values_are_xml_escaped() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let mut e = entry("x", "Tom & Jerry <beta>", "193");
        e.url = "https://example.com/a.zip?x=1&y=2".to_string();
        let xml = renderer.render(&[e]).unwrap();
        assert!(xml.contains("<name>Tom &amp; Jerry &lt;beta&gt;</name>"));
        assert!(xml.contains("a.zip?x=1&amp;y=2"));
    }

    #[test]
    fn urls_keep_their_slashes() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let xml = renderer.render(&[entry("x", "X", "193")]).unwrap();
        assert!(!xml.contains("&#x2F;"));
    }

    #[test]
    fn no_crlf_in_rendered_output() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let xml = renderer.render(&[entry("x", "X", "193")]).unwrap();
        assert!(!xml.contains('\r'));
    }

    #[test]
    fn quotes_are_escaped_in_text_and_attributes() {
        let renderer = UpdateSiteRenderer::new().unwrap();
        let mut e = entry("x", r#"Tom & Jerry <beta> "q" 'a'"#, r#"19"3"#);
        e.plugin_version = "a\"b'c".to_string();
        let xml = renderer.render(&[e]).unwrap();
        assert!(xml.contains(
            "<name>Tom &amp; Jerry &lt;beta&gt; &quot;q&quot; &apos;a&apos;</name>"
        ));
        assert!(xml.contains("<version>a&quot;b&apos;c</version>"));
        assert!(xml.contains(r#"since-build="19&quot;3.0""#));
    }
}
