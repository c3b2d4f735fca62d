use rtg::constants::RESERVED_NAMES;
use rtg::error::Error;
use rtg::options::{ProjectOptions, StateLibrary, UiLibrary};
use rtg::registry::Registry;
use rtg::validation::{validate_options, validate_project_name, validate_template};

#[test]
fn test_valid_project_names() {
    let longest = "x".repeat(50);
    for name in ["my-app", "my_app", "MyApp2", "app.v2", "a", longest.as_str()] {
        assert!(validate_project_name(name).is_ok(), "{name} should be valid");
    }
}

#[test]
fn test_invalid_project_names() {
    let long = "x".repeat(51);
    for name in ["", ".hidden", "-app", "app.", "my app", "app/../x", "émoji", long.as_str()] {
        match validate_project_name(name) {
            Err(Error::InvalidProjectName { .. }) => (),
            other => panic!("{name:?} should be rejected, got {other:?}"),
        }
    }
}

#[test]
fn test_reserved_names_are_case_insensitive() {
    for name in RESERVED_NAMES {
        assert!(validate_project_name(&name.to_uppercase()).is_err(), "{name} is reserved");
        assert!(validate_project_name(name).is_err(), "{name} is reserved");
    }
}

#[test]
fn test_unknown_template_lists_available_names() {
    let registry = Registry::builtin();
    assert!(validate_template("react", &registry).is_ok());

    match validate_template("svelte", &registry) {
        Err(err @ Error::UnknownTemplate { .. }) => {
            let message = err.to_string();
            for name in registry.names() {
                assert!(message.contains(name), "{message} should mention {name}");
            }
        }
        other => panic!("Expected UnknownTemplate, got {other:?}"),
    }
}

#[test]
fn test_unsupported_addons() {
    let mut template = Registry::builtin().get("react").unwrap().clone();
    template.addons = vec!["tailwind".to_string()];

    let options = ProjectOptions {
        ui: Some(UiLibrary::Tailwind),
        ..Default::default()
    };
    assert!(validate_options(&template, &options).is_ok());

    let mut options = ProjectOptions {
        ui: Some(UiLibrary::Mui),
        ..Default::default()
    };
    options.select_state(StateLibrary::Redux);
    match validate_options(&template, &options) {
        Err(Error::UnsupportedAddons { unsupported, supported, .. }) => {
            assert_eq!(unsupported, "mui, redux");
            assert_eq!(supported, "tailwind");
        }
        other => panic!("Expected UnsupportedAddons, got {other:?}"),
    }
}
