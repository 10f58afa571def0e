//! Descriptor resolution: nesting, conditions, keyframes and values.

use vcss::{
    CalcExpr, Condition, Config, Keyframes, Registry, StyleRule, UnitPolicy, VcssError, calc,
    fallback_var,
};

// ============================================================================
// ORDERING
// ============================================================================

#[test]
fn test_base_then_hover_then_media() {
    let registry = Registry::default();
    let mut file = registry.file("button.css.rs");
    let button = file
        .style(
            "button",
            StyleRule::new()
                .media("(min-width: 768px)", StyleRule::new().prop("padding", 12))
                .pseudo(":hover", StyleRule::new().prop("color", "yellow"))
                .prop("color", "white"),
        )
        .unwrap();

    let css = registry.finalize();
    let sel = button.selector();
    let expected = format!(
        "{sel} {{\n  color: white;\n}}\n\
         {sel}:hover {{\n  color: yellow;\n}}\n\
         @media (min-width: 768px) {{\n  {sel} {{\n    padding: 12px;\n  }}\n}}\n"
    );
    assert_eq!(css, expected);
}

#[test]
fn test_declarations_keep_authored_order() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    file.global_style(
        "body",
        StyleRule::new()
            .prop("margin", 0)
            .prop("fontFamily", "system-ui")
            .prop("color", "black")
            .prop("margin", 8),
    )
    .unwrap();

    insta::assert_snapshot!(registry.finalize(), @r"
    body {
      margin: 8px;
      font-family: system-ui;
      color: black;
    }
    ");
}

#[test]
fn test_vars_precede_properties() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let gap = file.create_var("gap");
    file.global_style(
        ".grid",
        StyleRule::new().prop("gap", &gap).var(&gap, "4px"),
    )
    .unwrap();

    let css = registry.finalize();
    assert_eq!(
        css,
        format!(
            ".grid {{\n  {name}: 4px;\n  gap: var({name});\n}}\n",
            name = gap.name()
        )
    );
}

// ============================================================================
// SELECTORS
// ============================================================================

#[test]
fn test_parent_selector_substitution() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let item = file
        .style(
            "item",
            StyleRule::new()
                .selector(".dark &", StyleRule::new().prop("color", "white"))
                .selector("&:not(:last-child)", StyleRule::new().prop("marginBottom", 4)),
        )
        .unwrap();

    let css = registry.finalize();
    assert!(css.contains(&format!(".dark {} {{", item.selector())));
    assert!(css.contains(&format!("{}:not(:last-child) {{\n  margin-bottom: 4px;", item.selector())));
}

#[test]
fn test_deep_nesting_composes_selectors() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let link = file
        .style(
            "link",
            StyleRule::new().pseudo(
                ":hover",
                StyleRule::new().selector(".nav &", StyleRule::new().prop("color", "red")),
            ),
        )
        .unwrap();

    let css = registry.finalize();
    assert!(css.starts_with(&format!(".nav {}:hover {{", link.selector())));
}

#[test]
fn test_selector_lists_multiply() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    file.global_style(
        "h1, h2",
        StyleRule::new().selector("&:hover, &:focus", StyleRule::new().prop("color", "red")),
    )
    .unwrap();

    let css = registry.finalize();
    assert!(css.starts_with("h1:hover, h1:focus, h2:hover, h2:focus {"));
}

#[test]
fn test_selector_targeting_child_is_rejected() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let err = file
        .style(
            "list",
            StyleRule::new().selector("& > li", StyleRule::new().prop("margin", 0)),
        )
        .unwrap_err();

    assert!(matches!(err, VcssError::InvalidSelector { ref selector, .. } if selector == "& > li"));
    assert!(registry.is_empty());
}

#[test]
fn test_pseudo_without_colon_is_rejected() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let err = file
        .style("a", StyleRule::new().pseudo("hover", StyleRule::new().prop("color", "red")))
        .unwrap_err();
    assert_eq!(err, VcssError::InvalidPseudo("hover".into()));
}

#[test]
fn test_pseudo_list_cannot_escape_owner() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let err = file
        .style(
            "btn",
            StyleRule::new().pseudo(":hover, :focus", StyleRule::new().prop("color", "red")),
        )
        .unwrap_err();

    assert_eq!(err, VcssError::InvalidPseudo(":hover, :focus".into()));
    assert!(registry.is_empty());
}

#[test]
fn test_selector_list_targeting_owner_is_accepted() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let btn = file
        .style(
            "btn",
            StyleRule::new().selector("&:hover, &:focus", StyleRule::new().prop("color", "red")),
        )
        .unwrap();

    let css = registry.finalize();
    let sel = btn.selector();
    assert!(css.starts_with(&format!("{sel}:hover, {sel}:focus {{")));
}

// ============================================================================
// CONDITIONS
// ============================================================================

#[test]
fn test_identical_conditions_share_wrapper() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let small = StyleRule::new().prop("padding", 4);
    file.style("a", StyleRule::new().media("(max-width: 600px)", small.clone()))
        .unwrap();
    file.style("b", StyleRule::new().media("(max-width: 600px)", small))
        .unwrap();

    let css = registry.finalize();
    assert_eq!(css.matches("@media (max-width: 600px)").count(), 1);
}

#[test]
fn test_nested_conditions_build_chain() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let grid = file
        .style(
            "grid",
            StyleRule::new().supports(
                "(display: grid)",
                StyleRule::new().container("(min-width: 400px)", StyleRule::new().prop("display", "grid")),
            ),
        )
        .unwrap();

    let css = registry.finalize();
    assert_eq!(
        css,
        format!(
            "@supports (display: grid) {{\n  @container (min-width: 400px) {{\n    {} {{\n      display: grid;\n    }}\n  }}\n}}\n",
            grid.selector()
        )
    );
}

#[test]
fn test_resolver_reports_condition_chain() {
    let registry = Registry::default();
    let mut scope = vcss::FileScope::new("a.css.rs", registry.config());
    let resolver = vcss::Resolver::new(&registry.config().units, &registry);
    let rules = resolver
        .resolve(
            &StyleRule::new().media(
                "screen",
                StyleRule::new().supports("(gap: 1px)", StyleRule::new().prop("gap", 1)),
            ),
            ".x",
            &mut scope,
        )
        .unwrap();

    assert_eq!(
        rules[0].conditions,
        vec![
            Condition::Media("screen".into()),
            Condition::Supports("(gap: 1px)".into())
        ]
    );
}

// ============================================================================
// KEYFRAMES
// ============================================================================

#[test]
fn test_inline_keyframes_are_named_and_substituted() {
    let registry = Registry::default();
    let mut file = registry.file("spin.css.rs");
    file.style(
        "spinner",
        StyleRule::new()
            .prop("animation", "@keyframes 1s linear infinite")
            .keyframes(
                Keyframes::new()
                    .frame("from", StyleRule::new().prop("transform", "rotate(0deg)"))
                    .frame("to", StyleRule::new().prop("transform", "rotate(360deg)")),
            ),
    )
    .unwrap();

    let css = registry.finalize();
    assert!(!css.contains("animation: @keyframes"));
    let start = css.find("@keyframes ").unwrap() + "@keyframes ".len();
    let name = &css[start..start + css[start..].find(' ').unwrap()];
    assert!(name.starts_with("keyframes__"));
    assert!(css.contains(&format!("animation: {name} 1s linear infinite;")));
}

#[test]
fn test_standalone_keyframes() {
    let registry = Registry::default();
    let mut file = registry.file("fade.css.rs");
    let fade = file
        .keyframes(
            "fade",
            Keyframes::new()
                .frame("0%", StyleRule::new().prop("opacity", 0))
                .frame("100%", StyleRule::new().prop("opacity", 1)),
        )
        .unwrap();
    file.global_keyframes("pulse", Keyframes::new().frame("50%", StyleRule::new().prop("scale", 1.1)))
        .unwrap();

    let css = registry.finalize();
    assert!(css.starts_with(&format!("@keyframes {fade} {{\n  0% {{\n    opacity: 0;\n  }}\n")));
    assert!(css.contains("@keyframes pulse {\n  50% {\n    scale: 1.1;\n  }\n}\n"));
}

// ============================================================================
// VALUES
// ============================================================================

#[test]
fn test_calc_values_render() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let x = file.create_var("x");
    file.global_style(
        ".a",
        StyleRule::new().prop("width", calc(&x).divide(2).unwrap().multiply(4).unwrap()),
    )
    .unwrap();

    let css = registry.finalize();
    assert!(css.contains(&format!("width: calc((var({}) / 2) * 4);", x.name())));
}

#[test]
fn test_atomic_calc_number_gets_property_unit() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    file.global_style(
        ".a",
        StyleRule::new()
            .prop("width", calc(2))
            .prop("opacity", CalcExpr::from(0.5))
            .prop("margin", calc(0)),
    )
    .unwrap();

    insta::assert_snapshot!(registry.finalize(), @r"
    .a {
      width: 2px;
      opacity: 0.5;
      margin: 0;
    }
    ");
}

#[test]
fn test_fallback_var_renders_chain() {
    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let a = file.create_var("a");
    let b = file.create_var("b");
    file.global_style(".x", StyleRule::new().prop("color", fallback_var(&[&a, &b], "blue")))
        .unwrap();

    let css = registry.finalize();
    assert!(css.contains(&format!("color: var({}, var({}, blue));", a.name(), b.name())));
}

#[test]
fn test_unknown_variable_is_rejected() {
    let other = Registry::default();
    let foreign = other.file("other.css.rs").create_var("foreign");

    let registry = Registry::default();
    let mut file = registry.file("a.css.rs");
    let err = file
        .style("a", StyleRule::new().prop("color", &foreign))
        .unwrap_err();
    assert_eq!(
        err,
        VcssError::UnresolvedVariableReference(foreign.name().to_string())
    );

    let err = file
        .style("b", StyleRule::new().prop("width", calc("100%").subtract(&foreign)))
        .unwrap_err();
    assert!(matches!(err, VcssError::UnresolvedVariableReference(_)));
}

#[test]
fn test_unit_policy_is_configurable() {
    let registry = Registry::new(
        Config::default().with_units(UnitPolicy::new().with_default_unit("rem").with_unitless("tab-size")),
    );
    let mut file = registry.file("a.css.rs");
    file.global_style(
        "pre",
        StyleRule::new()
            .prop("padding", 1.5)
            .prop("tabSize", 4)
            .prop("lineHeight", 1.4)
            .prop("margin", 0),
    )
    .unwrap();

    insta::assert_snapshot!(registry.finalize(), @r"
    pre {
      padding: 1.5rem;
      tab-size: 4;
      line-height: 1.4;
      margin: 0;
    }
    ");
}
