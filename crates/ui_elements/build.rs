use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ElementManifest {
    schema_version: u32,
    kind: String,
    tag: String,
    observed_attributes: Vec<String>,
    slots: Vec<String>,
    emits: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Preconnect {
    href: String,
    #[serde(default)]
    cross_origin: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FontConfig {
    primary: String,
    fallback: String,
    stylesheet_url: String,
    family_marker: String,
    preconnect: Vec<Preconnect>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct ThemeConfig {
    schema_version: u32,
    font: FontConfig,
}

fn element_manifest_paths(root: &Path) -> Vec<PathBuf> {
    ["badge", "button", "card", "modal"]
        .iter()
        .map(|name| root.join("elements").join(format!("{name}.element.toml")))
        .collect()
}

fn is_valid_tag(tag: &str) -> bool {
    tag.starts_with(|ch: char| ch.is_ascii_lowercase())
        && tag.contains('-')
        && tag
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || matches!(ch, '-' | '.' | '_'))
}

fn read_toml<T: for<'de> Deserialize<'de>>(path: &Path) -> T {
    println!("cargo:rerun-if-changed={}", path.display());
    let raw = fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("failed to read {}: {err}", path.display()));
    toml::from_str(&raw).unwrap_or_else(|err| panic!("failed to parse {}: {err}", path.display()))
}

fn main() {
    let crate_root = PathBuf::from(std::env::var("CARGO_MANIFEST_DIR").expect("manifest dir"));
    let mut manifests = Vec::<ElementManifest>::new();
    let mut seen_tags = BTreeSet::new();

    for path in element_manifest_paths(&crate_root) {
        let manifest: ElementManifest = read_toml(&path);
        if manifest.schema_version != 1 {
            panic!(
                "element manifest schema mismatch in {}: expected 1 found {}",
                path.display(),
                manifest.schema_version
            );
        }
        if !is_valid_tag(&manifest.tag) {
            panic!("invalid custom element tag `{}` in {}", manifest.tag, path.display());
        }
        if !seen_tags.insert(manifest.tag.clone()) {
            panic!("duplicate custom element tag `{}` in {}", manifest.tag, path.display());
        }
        manifests.push(manifest);
    }

    manifests.sort_by(|a, b| a.kind.cmp(&b.kind));

    let theme_path = crate_root.join("theme.toml");
    let theme: ThemeConfig = read_toml(&theme_path);
    if theme.schema_version != 1 {
        panic!(
            "theme schema mismatch in {}: expected 1 found {}",
            theme_path.display(),
            theme.schema_version
        );
    }

    let manifest_json =
        serde_json::to_string_pretty(&manifests).expect("serialize element manifest catalog");
    let theme_json = serde_json::to_string_pretty(&theme).expect("serialize theme config");
    let generated = format!(
        "/// Build-time generated element manifest catalog JSON.\n\
pub const ELEMENT_MANIFEST_CATALOG_JSON: &str = r##\"{}\"##;\n\n\
/// Build-time generated theme configuration JSON.\n\
pub const THEME_CONFIG_JSON: &str = r##\"{}\"##;\n",
        manifest_json, theme_json
    );

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").expect("OUT_DIR"));
    let out_file = out_dir.join("element_catalog_generated.rs");
    fs::write(&out_file, generated)
        .unwrap_or_else(|err| panic!("failed to write {}: {err}", out_file.display()));
}
