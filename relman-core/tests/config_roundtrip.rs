use std::path::PathBuf;

use relman_core::config::{self, Config, ReleaseSyncConfig, UpdateSiteConfig};
use relman_core::types::{PlatformVersion, PluginRepoDescriptor};
use tempfile::TempDir;

fn full_config() -> Config {
    let mut plugin_repos = std::collections::BTreeMap::new();
    plugin_repos.insert(
        "acme/plugin".to_string(),
        PluginRepoDescriptor {
            id: "com.acme.plugin".to_string(),
            name: "Acme Plugin".to_string(),
            versions: vec![PlatformVersion::from("193"), PlatformVersion::from("201")],
            version_tpl: "$tag-$version".to_string(),
        },
    );
    Config {
        api_base: "https://ghe.example.com/api/v3".to_string(),
        token: None,
        releases: Some(ReleaseSyncConfig {
            owner: "acme".to_string(),
            repo: "artifacts".to_string(),
            platform_versions: vec![PlatformVersion::from("193")],
            asset_version_tpl: "$version-$tag".to_string(),
            artifactory_url_tpl: "https://repo.example.com/$tpl_version.zip".to_string(),
            tag_limit: 3,
        }),
        update_site: Some(UpdateSiteConfig {
            output_dir: PathBuf::from("site"),
            template_dir: None,
            plugin_repos,
        }),
    }
}

#[test]
fn saved_yaml_loads_back_identically() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("config.yaml");
    let config = full_config();
    std::fs::write(&path, serde_yaml::to_string(&config).expect("serialize")).expect("write");

    let loaded = config::load_at(&path).expect("load");
    assert_eq!(loaded, config);
}

#[test]
fn token_is_not_serialized_when_absent() {
    let yaml = serde_yaml::to_string(&full_config()).expect("serialize");
    assert!(!yaml.contains("token"));
}
