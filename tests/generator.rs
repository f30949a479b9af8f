use logmigrate::core::generator::{extract_fragments, extract_level, module_tag};
use logmigrate::core::CallGenerator;
use std::path::PathBuf;

fn auth_path() -> PathBuf {
    PathBuf::from(
        "/src/hadoop-common-project/hadoop-common/src/main/java/org/apache/hadoop/security/Auth.java",
    )
}

#[test]
fn generator_builds_tagged_call_from_concatenation() {
    let generator = CallGenerator::new("org.apache.hadoop", 6);
    let call = generator.generate(r#"LOG.info("User logged in" + userId);"#, &auth_path());

    assert_eq!(
        call,
        r#"LOG.USER_LOGGED_IN(userId).tag("org.apache.hadoop.security").info();"#
    );
}

#[test]
fn generator_declines_ambiguous_literals() {
    let generator = CallGenerator::new("org.apache.hadoop", 6);

    let three_quotes = generator.generate(r#"LOG.debug("a \"quoted\" b");"#, &auth_path());
    assert!(three_quotes.starts_with("LOG.("));

    let braces = generator.generate(r#"LOG.debug("user {}", id);"#, &auth_path());
    assert_eq!(braces, r#"LOG.().tag("org.apache.hadoop.security").debug();"#);
}

#[test]
fn generator_skips_fragments_for_multi_line_calls() {
    let generator = CallGenerator::new("org.apache.hadoop", 6);
    let call = generator.generate(r#"LOG.error("Failed to renew token " + token"#, &auth_path());

    assert_eq!(call, r#"LOG.().tag("org.apache.hadoop.security").error();"#);
}

#[test]
fn tag_never_exceeds_configured_depth() {
    let mut path = PathBuf::from("/checkout/module");
    for segment in ["org", "apache", "hadoop", "a", "b", "c", "d", "e", "f", "g"] {
        path.push(segment);
    }
    path.push("Deep.java");

    for depth in 1..=12 {
        let tag = module_tag(&path, "org.apache.hadoop", depth);
        assert!(tag.split('.').count() <= depth);
        assert!(tag.starts_with("org"));
    }
    assert_eq!(
        module_tag(&path, "org.apache.hadoop", 6),
        "org.apache.hadoop.a.b.c"
    );
}

#[test]
fn namespace_found_at_any_depth() {
    let path = PathBuf::from("/a/b/c/d/e/f/org/apache/hadoop/ipc/Server.java");
    assert_eq!(module_tag(&path, "org.apache.hadoop", 6), "org.apache.hadoop.ipc");
}

#[test]
fn level_and_fragments_are_independent_of_generator() {
    assert_eq!(extract_level(r#"LOG.trace("x");"#), "trace");
    let fragments = extract_fragments(r#"LOG.info("Opened file" + path);"#);
    assert_eq!(fragments.message, "OPENED_FILE");
    assert_eq!(fragments.argument, "path");
}
