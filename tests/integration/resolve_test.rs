//! Integration tests for top-level and nested reference resolution
//!
//! Modules are written to a temporary `appData/` tree and resolved through the
//! public `Resolver` API.

use std::fs;

use crate::common::{TestFixture, child_names, tests_doc};
use xmltest::{ModuleLoader, ResolveError};

// ============================================================================
// Top-level references
// ============================================================================

#[test]
fn test_bare_reference_round_trip() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<Foo><step n="1"/></Foo><test id="Foo"/>"#),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    assert_eq!(config.resolved_tests.len(), 1);
    let foo = &config.resolved_tests[0];
    assert_eq!(foo.name, "Foo");
    assert_eq!(child_names(foo), vec!["step"]);
    assert_eq!(foo.children[0].attributes["n"], "1");
    assert_eq!(foo.origin_module.as_deref(), Some(root.as_path()));
}

#[test]
fn test_qualified_reference_is_renamed_and_stamped() {
    let fixture = TestFixture::new();
    let module = fixture.create_module("pkg/Mod.xml", &tests_doc("<Bar><step/></Bar>"));
    let root = fixture.create_module("full.xml", &tests_doc(r#"<test id="pkg/Mod/Bar"/>"#));

    let config = fixture.resolve(&root).expect("Should resolve");

    let bar = &config.resolved_tests[0];
    assert_eq!(bar.name, "pkg.Mod.Bar");
    assert_eq!(bar.origin_module.as_deref(), Some(module.as_path()));
    assert_eq!(
        bar.origin_module.as_deref(),
        Some(fixture.configs_root().join("pkg").join("Mod.xml").as_path())
    );
    assert_eq!(child_names(bar), vec!["step"]);
}

#[test]
fn test_common_module_reference() {
    let fixture = TestFixture::new();
    fixture.create_common_module("common.xml", &tests_doc("<Login><step/></Login>"));
    fixture.create_common_module(
        "auth/flows.xml",
        &tests_doc("<Logout><step/></Logout>"),
    );
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<test id="common/Login"/><test id="common/auth/flows/Logout"/>"#),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    let names: Vec<_> = config.resolved_tests.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["common.Login", "common.auth.flows.Logout"]);
    assert_eq!(
        config.resolved_tests[1].origin_module.as_deref(),
        Some(fixture.common_root().join("auth").join("flows.xml").as_path())
    );
}

#[test]
fn test_top_level_order_follows_document_order() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<A/><B/><test id="B"/><test id="A"/><test id="B"/>"#),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    let names: Vec<_> = config.resolved_tests.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["B", "A", "B"]);
}

#[test]
fn test_missing_top_level_declaration() {
    let fixture = TestFixture::new();
    let root = fixture.create_module("full.xml", &tests_doc(r#"<Foo/><test id="Ghost"/>"#));

    let err = fixture.resolve(&root).unwrap_err();

    assert!(
        matches!(err, ResolveError::UnresolvedReference { ref id } if id == "Ghost"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_qualified_reference_to_missing_declaration() {
    let fixture = TestFixture::new();
    let module = fixture.create_module("pkg/Mod.xml", &tests_doc("<Other/>"));
    let root = fixture.create_module("full.xml", &tests_doc(r#"<test id="pkg/Mod/Bar"/>"#));

    let err = fixture.resolve(&root).unwrap_err();

    assert!(matches!(
        err,
        ResolveError::DeclarationNotFound { ref name, module: ref searched }
            if name == "Bar" && searched == &module
    ));
}

#[test]
fn test_top_level_reference_without_id() {
    let fixture = TestFixture::new();
    let root = fixture.create_module("full.xml", &tests_doc("<Foo/><test/>"));

    let err = fixture.resolve(&root).unwrap_err();

    assert!(matches!(
        err,
        ResolveError::MissingAttribute { ref node, ref attribute }
            if node == "test" && attribute == "id"
    ));
}

#[test]
fn test_reference_free_tree_passes_through() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<Foo x="1"><group name="g"><step n="1"/><step n="2"/></group></Foo><test id="Foo"/>"#),
    );

    let layout = fixture.layout();
    let mut expected = ModuleLoader::new(&layout)
        .get_declaration(&root, "Foo")
        .expect("Should find Foo");
    expected.origin_module = Some(root.clone());

    let config = fixture.resolve(&root).expect("Should resolve");

    assert_eq!(config.resolved_tests, vec![expected]);
}

#[test]
fn test_root_source_is_retained() {
    let fixture = TestFixture::new();
    let source = tests_doc(r#"<Foo/><test id="Foo"/>"#);
    let root = fixture.create_module("full.xml", &source);

    let config = fixture.resolve(&root).expect("Should resolve");

    assert_eq!(config.source.as_deref(), Some(source.as_str()));
    assert_eq!(config.unresolved_tests.len(), 1);
}

// ============================================================================
// Nested references
// ============================================================================

#[test]
fn test_nested_bare_references_expand_at_every_level() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(
            r#"<A><test id="B"/><step n="a"/></A>
<B><test id="C"/></B>
<C><step n="c"/></C>
<test id="A"/>"#,
        ),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    let a = &config.resolved_tests[0];
    assert_eq!(child_names(a), vec!["B", "step"]);
    let b = &a.children[0];
    assert_eq!(child_names(b), vec!["C"]);
    let c = &b.children[0];
    assert_eq!(child_names(c), vec!["step"]);
    assert_eq!(c.children[0].attributes["n"], "c");
}

#[test]
fn test_same_declaration_reused_in_siblings() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(
            r#"<Login><step n="login"/></Login>
<Suite><test id="Login"/><step n="work"/><test id="Login"/></Suite>
<test id="Suite"/>"#,
        ),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    assert_eq!(
        child_names(&config.resolved_tests[0]),
        vec!["Login", "step", "Login"]
    );
}

#[test]
fn test_nested_missing_declaration() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<A><test id="Ghost"/></A><test id="A"/>"#),
    );

    let err = fixture.resolve(&root).unwrap_err();

    assert!(matches!(
        err,
        ResolveError::DeclarationNotFound { ref name, ref module }
            if name == "Ghost" && module == &root
    ));
}

#[test]
fn test_nested_reference_without_id() {
    let fixture = TestFixture::new();
    let root = fixture.create_module("full.xml", &tests_doc(r#"<A><test/></A><test id="A"/>"#));

    assert!(matches!(
        fixture.resolve(&root),
        Err(ResolveError::MissingAttribute { .. })
    ));
}

#[test]
fn test_nested_qualified_reference_from_root() {
    let fixture = TestFixture::new();
    let module = fixture.create_module("pkg/Mod.xml", &tests_doc(r#"<B><step n="b"/></B>"#));
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<A><test id="pkg/Mod/B"/></A><test id="A"/>"#),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    let b = &config.resolved_tests[0].children[0];
    assert_eq!(b.name, "pkg.Mod.B");
    assert_eq!(b.origin_module.as_deref(), Some(module.as_path()));
    assert_eq!(child_names(b), vec!["step"]);
}

#[test]
fn test_two_hop_chain_resolves_inside_declaring_module() {
    let fixture = TestFixture::new();
    let module = fixture.create_module(
        "pkg/Mod.xml",
        &tests_doc(r#"<B><step n="b"/><test id="C"/></B><C><step n="c"/></C>"#),
    );
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<A><test id="pkg/Mod/B"/></A><test id="A"/>"#),
    );

    let config = fixture.resolve(&root).expect("Should resolve");

    let b = &config.resolved_tests[0].children[0];
    assert_eq!(child_names(b), vec!["step", "C"]);
    let c = &b.children[1];
    assert_eq!(c.origin_module.as_deref(), Some(module.as_path()));
    assert_eq!(c.children[0].attributes["n"], "c");
}

#[test]
fn test_tree_from_other_module_resolves_against_that_module() {
    let fixture = TestFixture::new();
    fixture.create_common_module(
        "common.xml",
        &tests_doc(r#"<Teardown><step n="teardown"/></Teardown>"#),
    );
    let suite = fixture.create_module(
        "pkg/Suite.xml",
        &tests_doc(
            r#"<Smoke><test id="Setup"/><test id="common/Teardown"/></Smoke>
<Setup><step n="setup"/></Setup>"#,
        ),
    );
    let root = fixture.create_module("full.xml", &tests_doc(r#"<test id="pkg/Suite/Smoke"/>"#));

    let config = fixture.resolve(&root).expect("Should resolve");

    let smoke = &config.resolved_tests[0];
    assert_eq!(smoke.name, "pkg.Suite.Smoke");
    assert_eq!(child_names(smoke), vec!["Setup", "common.Teardown"]);
    assert_eq!(smoke.children[0].origin_module.as_deref(), Some(suite.as_path()));
    assert_eq!(
        smoke.children[1].origin_module.as_deref(),
        Some(fixture.common_root().join("common.xml").as_path())
    );
}

#[test]
fn test_tree_from_other_module_does_not_see_root_declarations() {
    let fixture = TestFixture::new();
    let suite = fixture.create_module(
        "pkg/Suite.xml",
        &tests_doc(r#"<Smoke><test id="OnlyInRoot"/></Smoke>"#),
    );
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<OnlyInRoot/><test id="pkg/Suite/Smoke"/>"#),
    );

    let err = fixture.resolve(&root).unwrap_err();

    assert!(matches!(
        err,
        ResolveError::DeclarationNotFound { ref name, ref module }
            if name == "OnlyInRoot" && module == &suite
    ));
}

#[test]
fn test_other_module_sees_its_imports() {
    let fixture = TestFixture::new();
    fixture.create_common_module("common.xml", &tests_doc(r#"<Login><step n="login"/></Login>"#));
    fixture.create_module(
        "pkg/Suite.xml",
        &tests_doc(r#"<import module="common"/><Smoke><test id="Login"/></Smoke>"#),
    );
    let root = fixture.create_module("full.xml", &tests_doc(r#"<test id="pkg/Suite/Smoke"/>"#));

    let config = fixture.resolve(&root).expect("Should resolve");

    let login = &config.resolved_tests[0].children[0];
    assert_eq!(login.name, "Login");
    assert_eq!(login.children[0].attributes["n"], "login");
}

// ============================================================================
// Failure is all-or-nothing
// ============================================================================

#[test]
fn test_one_bad_reference_fails_whole_resolution() {
    let fixture = TestFixture::new();
    let root = fixture.create_module(
        "full.xml",
        &tests_doc(r#"<Good><step/></Good><Bad><test id="Ghost"/></Bad><test id="Good"/><test id="Bad"/>"#),
    );

    assert!(fixture.resolve(&root).is_err());
}

#[test]
fn test_missing_root_file() {
    let fixture = TestFixture::new();
    let missing = fixture.configs_root().join("missing.xml");

    let err = fixture.resolve(&missing).unwrap_err();

    assert!(matches!(err, ResolveError::Io { ref path, .. } if path == &missing));
}

#[test]
fn test_malformed_root_file() {
    let fixture = TestFixture::new();
    let root = fixture.create_module("full.xml", "<tests><Foo></tests>");

    assert!(matches!(
        fixture.resolve(&root),
        Err(ResolveError::Parse { .. })
    ));
}

#[test]
fn test_root_file_with_invalid_utf8() {
    let fixture = TestFixture::new();
    let root = fixture.configs_root().join("bad.xml");
    fs::write(&root, b"<tests><A x=\"\xff\"/><test id=\"A\"/></tests>").unwrap();

    let err = fixture.resolve(&root).unwrap_err();

    assert!(
        matches!(err, ResolveError::Parse { ref path, .. } if path == &root),
        "unexpected error: {err}"
    );
}
