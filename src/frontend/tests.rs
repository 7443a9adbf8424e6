use super::loader::parse_descriptor;
use super::*;
use crate::args::DescriptorFormat;
use crate::error::FrontendError;
use std::path::{Path, PathBuf};
use tempfile::tempdir;

const VARIANT_AUTUMN: &str = r#"
[tailwind]
sans_font = ["Nunito", "sans-serif"]
plugins = ["daisyui"]
themes = ["autumn"]
"#;

const VARIANT_MULTI: &str = r#"
[tailwind]
plugins = ["daisyui"]
themes = ["light", "dark", "cupcake", "retro", "forest", "lofi"]
"#;

fn write_file(dir: &Path, name: &str, content: &str) -> Result<PathBuf, String> {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).map_err(|err| format!("mkdir failed: {}", err))?;
    }
    std::fs::write(&path, content).map_err(|err| format!("write {} failed: {}", name, err))?;
    Ok(path)
}

fn descriptor(content: &str) -> Result<FrontendDescriptor, String> {
    parse_descriptor(content, DescriptorFormat::Toml)
}

#[test]
fn default_config_matches_build_literals() -> Result<(), String> {
    let config = FrontendConfig::default();
    validate_config(&config).map_err(|err| err.to_string())?;
    if config.compatibility_date != "2024-04-03" || !config.devtools {
        return Err("Unexpected top-level values".to_owned());
    }
    if config.modules
        != [
            "@nuxtjs/tailwindcss",
            "@nuxtjs/color-mode",
            "@formkit/auto-animate/nuxt",
        ]
    {
        return Err(format!("Unexpected modules: {:?}", config.modules));
    }
    if config.css != ["@/assets/css/tailwind.css"] || config.links.len() != 2 {
        return Err("Unexpected stylesheets".to_owned());
    }
    if config.color_mode.preference != ColorPreference::System
        || config.color_mode.data_value != "theme"
        || !config.color_mode.class_suffix.is_empty()
    {
        return Err("Unexpected color mode".to_owned());
    }
    if config.tailwind.plugins != ["daisyui"] || !config.tailwind.themes.is_empty() {
        return Err("Unexpected tailwind defaults".to_owned());
    }
    Ok(())
}

#[test]
fn default_config_round_trips_through_toml() -> Result<(), String> {
    let config = FrontendConfig::default();
    let rendered =
        render_config(&config, DescriptorFormat::Toml).map_err(|err| err.to_string())?;
    let parsed = descriptor(&rendered)?.resolve();
    if parsed != config {
        return Err(format!("Round trip changed the config:\n{}", rendered));
    }
    Ok(())
}

#[test]
fn validation_rejects_bad_values() -> Result<(), String> {
    let mut bad_date = FrontendConfig::default();
    bad_date.compatibility_date = "2024-13-40".to_owned();
    if !matches!(
        validate_config(&bad_date),
        Err(FrontendError::InvalidCompatibilityDate { .. })
    ) {
        return Err("Expected invalid date".to_owned());
    }

    let mut duplicate_module = FrontendConfig::default();
    duplicate_module
        .modules
        .push("@nuxtjs/color-mode".to_owned());
    if !matches!(
        validate_config(&duplicate_module),
        Err(FrontendError::DuplicateModule { .. })
    ) {
        return Err("Expected duplicate module".to_owned());
    }

    let mut bad_link = FrontendConfig::default();
    bad_link.links.push(HeadLink::stylesheet("ftp://example.com/a.css"));
    if !matches!(
        validate_config(&bad_link),
        Err(FrontendError::UnsupportedLinkScheme { index: 2, .. })
    ) {
        return Err("Expected unsupported link scheme".to_owned());
    }

    let mut bad_font = FrontendConfig::default();
    bad_font.tailwind.sans_font = Some(Vec::new());
    if !matches!(
        validate_config(&bad_font),
        Err(FrontendError::EmptyFontFamily)
    ) {
        return Err("Expected empty font family".to_owned());
    }
    Ok(())
}

#[test]
fn unify_rejects_divergent_variants() -> Result<(), String> {
    let variants = vec![
        (PathBuf::from("a/frontend.toml"), descriptor(VARIANT_AUTUMN)?),
        (PathBuf::from("b/frontend.toml"), descriptor(VARIANT_MULTI)?),
    ];
    match unify(&variants, None) {
        Err(FrontendError::ConflictingDefinition {
            field: "tailwind.themes",
            ..
        }) => Ok(()),
        Err(err) => Err(format!("Unexpected error: {}", err)),
        Ok(_) => Err("Expected conflicting themes".to_owned()),
    }
}

#[test]
fn unify_with_prefer_takes_preferred_values() -> Result<(), String> {
    let preferred = PathBuf::from("b/frontend.toml");
    let variants = vec![
        (PathBuf::from("a/frontend.toml"), descriptor(VARIANT_AUTUMN)?),
        (preferred.clone(), descriptor(VARIANT_MULTI)?),
    ];
    let merged = unify(&variants, Some(&preferred))
        .map_err(|err| err.to_string())?
        .resolve();
    if merged.tailwind.themes.len() != 6 {
        return Err(format!("Unexpected themes: {:?}", merged.tailwind.themes));
    }
    // Only the first variant sets a font, so it merges without conflict.
    if merged.tailwind.sans_font != TailwindConfig::autumn().sans_font {
        return Err("Expected font from the only variant defining it".to_owned());
    }
    validate_config(&merged).map_err(|err| err.to_string())
}

#[test]
fn unify_merges_identical_and_disjoint_keys() -> Result<(), String> {
    let variants = vec![
        (PathBuf::from("one.toml"), descriptor(VARIANT_AUTUMN)?),
        (
            PathBuf::from("two.toml"),
            descriptor("devtools = false\n[tailwind]\nthemes = [\"autumn\"]\n")?,
        ),
    ];
    let merged = unify(&variants, None)
        .map_err(|err| err.to_string())?
        .resolve();
    if merged.devtools || merged.tailwind != TailwindConfig::autumn() {
        return Err(format!("Unexpected merge: {:?}", merged));
    }
    Ok(())
}

#[test]
fn unify_checks_inputs() -> Result<(), String> {
    if !matches!(unify(&[], None), Err(FrontendError::NothingToUnify)) {
        return Err("Expected empty input to fail".to_owned());
    }
    let variants = vec![(PathBuf::from("one.toml"), FrontendDescriptor::default())];
    if !matches!(
        unify(&variants, Some(Path::new("other.toml"))),
        Err(FrontendError::PreferredNotInInputs { .. })
    ) {
        return Err("Expected unknown prefer to fail".to_owned());
    }
    Ok(())
}

#[test]
fn load_descriptor_reads_json_and_rejects_unknown_keys() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    let path = write_file(
        dir.path(),
        "frontend.json",
        r#"{"devtools": false, "color_mode": {"preference": "dark"}}"#,
    )?;
    let config = load_descriptor(&path)
        .map_err(|err| err.to_string())?
        .resolve();
    if config.devtools || config.color_mode.preference != ColorPreference::Dark {
        return Err(format!("Unexpected config: {:?}", config));
    }
    if config.modules.len() != 3 {
        return Err("Missing keys should take defaults".to_owned());
    }

    let path = write_file(dir.path(), "bad.toml", "themes = [\"autumn\"]\n")?;
    if !matches!(
        load_descriptor(&path),
        Err(FrontendError::ParseDescriptor { .. })
    ) {
        return Err("Expected unknown top-level key to fail".to_owned());
    }
    let path = write_file(dir.path(), "frontend.yaml", "devtools: true\n")?;
    if !matches!(
        load_descriptor(&path),
        Err(FrontendError::UnsupportedDescriptor { .. })
    ) {
        return Err("Expected yaml to be rejected".to_owned());
    }
    Ok(())
}

#[test]
fn scan_reports_divergent_duplicates() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    write_file(dir.path(), "nuxt.config.ts", "export default {}")?;
    write_file(dir.path(), "tailwind.config.js", "themes: ['autumn']")?;
    write_file(dir.path(), "legacy/tailwind.config.js", "themes: six")?;
    write_file(dir.path(), "node_modules/pkg/tailwind.config.js", "ignored")?;

    let report = scan_duplicates(dir.path()).map_err(|err| err.to_string())?;
    if report.is_clean() || report.duplicates.len() != 1 {
        return Err(format!("Unexpected duplicates: {:?}", report.duplicates));
    }
    let group = report
        .duplicates
        .first()
        .ok_or_else(|| "Missing group".to_owned())?;
    if group.kind != "tailwind.config" || group.files.len() != 2 || group.identical {
        return Err(format!("Unexpected group: {:?}", group));
    }
    if report.config_files != 3 {
        return Err(format!("Unexpected config count: {}", report.config_files));
    }
    Ok(())
}

#[test]
fn scan_flags_identical_copies_and_clean_trees() -> Result<(), String> {
    let dir = tempdir().map_err(|err| format!("tempdir failed: {}", err))?;
    write_file(dir.path(), "frontend.toml", "devtools = true\n")?;
    let report = scan_duplicates(dir.path()).map_err(|err| err.to_string())?;
    if !report.is_clean() {
        return Err("Single descriptor should be clean".to_owned());
    }

    write_file(dir.path(), "copy/frontend.toml", "devtools = true\n")?;
    let report = scan_duplicates(dir.path()).map_err(|err| err.to_string())?;
    match report.duplicates.as_slice() {
        [group] if group.identical && group.kind == "frontend" => Ok(()),
        other => Err(format!("Unexpected duplicates: {:?}", other)),
    }
}
