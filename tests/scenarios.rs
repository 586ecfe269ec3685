//! End-to-end behavior of the project: variables, styles and the cascade
//! working together.

use stylecascade::{
    Breakpoint, ColorValue, ComputedValue, Error, PropertyValue, Project, PseudoState,
    ResolvedValue, StyleAxis, StyleProperty, Value, VariableType, VariableValue,
};

fn color(text: &str) -> ColorValue {
    ColorValue::parse(text).unwrap()
}

fn computed(text: &str) -> ComputedValue {
    ComputedValue::Value(Value::Color(color(text)))
}

#[test]
fn test_dark_mode_binding_survives_pseudo_fallback() {
    let mut project = Project::new();
    let c = project.create_collection("C").unwrap();
    let dark = project.create_mode(c, "Dark").unwrap();
    let bg = project
        .create_variable(
            c,
            "bg",
            VariableType::Color,
            color("#fff"),
            [(dark, VariableValue::from(color("#000")))],
        )
        .unwrap();
    let s = project.create_style("S", None).unwrap();
    project
        .set_property(s, StyleProperty::BackgroundColor, bg, StyleAxis::default())
        .unwrap();
    project
        .set_variable_mode(s, c, dark, StyleAxis::default())
        .unwrap();

    let cascade = project.cascade();
    for pseudo in [PseudoState::None, PseudoState::Hover] {
        let props = cascade
            .resolve_properties(&[s], Breakpoint::Main, pseudo)
            .unwrap();
        assert_eq!(props[&StyleProperty::BackgroundColor], computed("#000"));
    }
}

#[test]
fn test_remove_collection_referenced_by_style_requires_force() {
    let mut project = Project::new();
    let c = project.create_collection("C").unwrap();
    let bg = project
        .create_variable(c, "bg", VariableType::Color, color("#fff"), [])
        .unwrap();
    let s = project.create_style("S", None).unwrap();
    project
        .set_property(s, StyleProperty::BackgroundColor, bg, StyleAxis::default())
        .unwrap();

    assert!(matches!(
        project.remove_collection(c, false),
        Err(Error::NotEmptyOrForced { .. })
    ));
    assert!(project.variables().collection(c).is_ok());

    project.remove_collection(c, true).unwrap();
    assert!(project.variables().collection(c).is_err());
    assert!(project.variables().variable(bg).is_err());
    // The style keeps the value it was showing.
    let resolved = project
        .cascade()
        .resolve_property(&[s], StyleProperty::BackgroundColor, Breakpoint::Main, PseudoState::None)
        .unwrap();
    assert_eq!(resolved, Some(computed("#fff")));
}

#[test]
fn test_combo_precedence() {
    let mut project = Project::new();
    let a = project.create_style("A", None).unwrap();
    let b = project.create_style("B", Some(a)).unwrap();
    project
        .set_property_str(a, "color", "red", StyleAxis::default())
        .unwrap();

    let color_of = |project: &Project| {
        project
            .cascade()
            .resolve_properties(&[a, b], Breakpoint::Main, PseudoState::None)
            .unwrap()
            .remove(&StyleProperty::Color)
    };
    assert_eq!(color_of(&project), Some(computed("red")));

    project
        .set_property_str(b, "color", "blue", StyleAxis::default())
        .unwrap();
    assert_eq!(color_of(&project), Some(computed("blue")));
}

#[test]
fn test_breakpoint_fallback_is_monotonic() {
    let mut project = Project::new();
    let s = project.create_style("S", None).unwrap();
    project
        .set_property_str(s, "width", "100%", StyleAxis::default())
        .unwrap();

    let width_at = |project: &Project, bp| {
        project
            .cascade()
            .resolve_property(&[s], StyleProperty::Width, bp, PseudoState::None)
            .unwrap()
            .map(|v| v.to_string())
    };
    for bp in Breakpoint::ALL {
        assert_eq!(width_at(&project, bp).as_deref(), Some("100%"), "at {bp}");
    }

    project
        .set_property_str(s, "width", "50%", StyleAxis::at(Breakpoint::Small))
        .unwrap();
    for bp in Breakpoint::ALL {
        let expected = match bp {
            Breakpoint::Small | Breakpoint::Tiny => "50%",
            _ => "100%",
        };
        assert_eq!(width_at(&project, bp).as_deref(), Some(expected), "at {bp}");
    }
}

#[test]
fn test_alias_cycle_is_rejected() {
    let mut project = Project::new();
    let c = project.create_collection("Theme").unwrap();
    let a = project
        .create_variable(c, "a", VariableType::Color, color("#111"), [])
        .unwrap();
    let b = project
        .create_variable(c, "b", VariableType::Color, a, [])
        .unwrap();

    let err = project.set_value(a, b, None).unwrap_err();
    match err {
        Error::AliasCycle { path } => assert_eq!(path, ["a", "b", "a"]),
        other => panic!("expected AliasCycle, got {other:?}"),
    }
    assert_eq!(
        project.variables().resolve(b, None).unwrap(),
        ResolvedValue::Value(Value::Color(color("#111")))
    );
}

#[test]
fn test_setters_are_idempotent() {
    let mut project = Project::new();
    let c = project.create_collection("Theme").unwrap();
    let v = project
        .create_variable(c, "fg", VariableType::Color, color("#123"), [])
        .unwrap();
    let s = project.create_style("S", None).unwrap();
    let axis = StyleAxis::new(Breakpoint::Medium, PseudoState::Focus);

    let snapshot = |project: &Project| {
        (
            project.get_value(v, None, true).unwrap(),
            project
                .cascade()
                .resolve_properties(&[s], Breakpoint::Small, PseudoState::Focus)
                .unwrap(),
        )
    };

    project.set_value(v, color("#456"), None).unwrap();
    project
        .set_property(s, StyleProperty::Color, v, axis)
        .unwrap();
    let once = snapshot(&project);

    project.set_value(v, color("#456"), None).unwrap();
    project
        .set_property(s, StyleProperty::Color, v, axis)
        .unwrap();
    assert_eq!(snapshot(&project), once);
}

#[test]
fn test_property_roundtrip_at_every_axis() {
    let mut project = Project::new();
    let s = project.create_style("S", None).unwrap();
    for breakpoint in Breakpoint::ALL {
        for pseudo in PseudoState::ALL {
            let axis = StyleAxis::new(breakpoint, pseudo);
            let value = PropertyValue::Keyword("grid".to_string());
            project
                .set_property(s, StyleProperty::Display, value.clone(), axis)
                .unwrap();
            assert_eq!(
                project.get_property(s, StyleProperty::Display, axis).unwrap(),
                Some(&value)
            );
        }
    }
}

#[test]
fn test_parse_errors_name_the_bad_token() {
    assert!(matches!(
        "hover".parse::<Breakpoint>(),
        Err(Error::InvalidAxisValue { axis: "breakpoint", .. })
    ));
    assert!(matches!(
        "hovering".parse::<PseudoState>(),
        Err(Error::InvalidAxisValue { .. })
    ));
    assert!(matches!(
        StyleProperty::from_name("colour"),
        Err(Error::UnknownProperty { .. })
    ));
}
