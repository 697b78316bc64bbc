#[test]
fn test_readme_deps() {
    version_sync::assert_markdown_deps_updated!("README.md");
}

#[test]
fn test_html_root_url() {
    version_sync::assert_html_root_url_updated!("src/lib.rs");
}

#[test]
fn test_changelog_mentions_version() {
    if std::fs::metadata("CHANGELOG.md").is_ok() {
        version_sync::assert_contains_regex!("CHANGELOG.md", r"## \[{version}\]");
    }
}
