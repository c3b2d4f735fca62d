use clap::Parser;
use rtg::cli::{Args, Commands};
use rtg::options::{PackageManager, StateLibrary, UiLibrary};
use std::ffi::OsString;
use std::path::PathBuf;

fn make_args(args: &[&str]) -> Vec<OsString> {
    let mut res = vec![OsString::from("rtg-template")];
    res.extend(args.iter().map(OsString::from));
    res
}

#[test]
fn test_basic_args() {
    let parsed = Args::try_parse_from(make_args(&["react", "my-app"])).unwrap();

    assert_eq!(parsed.template.as_deref(), Some("react"));
    assert_eq!(parsed.project_name.as_deref(), Some("my-app"));
    assert_eq!(parsed.command, None);
    assert!(!parsed.is_interactive());
    assert_eq!(parsed.directory, PathBuf::from("."));

    let options = parsed.project_options();
    assert!(!options.typescript);
    assert!(options.route);
    assert!(options.install);
    assert!(options.git);
    assert_eq!(options.ui, None);
    assert!(options.state.is_empty());
    assert_eq!(options.package_manager, PackageManager::Npm);
}

#[test]
fn test_all_flags() {
    let args = make_args(&[
        "--typescript",
        "--mui",
        "--redux",
        "--tanstack-query",
        "--no-route",
        "--no-install",
        "--no-git",
        "--directory",
        "/tmp/projects",
        "--repo",
        "github:user/template",
        "--package-manager",
        "pnpm",
        "--verbose",
        "react",
        "my-app",
    ]);
    let parsed = Args::try_parse_from(args).unwrap();
    assert!(parsed.verbose);

    let options = parsed.project_options();
    assert!(options.typescript);
    assert_eq!(options.ui, Some(UiLibrary::Mui));
    assert_eq!(options.state, vec![StateLibrary::Redux, StateLibrary::TanstackQuery]);
    assert!(!options.route);
    assert!(!options.install);
    assert!(!options.git);
    assert_eq!(options.directory, PathBuf::from("/tmp/projects"));
    assert_eq!(options.repo.as_deref(), Some("github:user/template"));
    assert_eq!(options.package_manager, PackageManager::Pnpm);
}

#[test]
fn test_short_flags() {
    let args = make_args(&["-t", "-v", "-d", "out", "react", "my-app"]);
    let parsed = Args::try_parse_from(args).unwrap();

    assert!(parsed.typescript);
    assert!(parsed.verbose);
    assert_eq!(parsed.directory, PathBuf::from("out"));
}

#[test]
fn test_redux_toolkit_implies_redux() {
    let parsed = Args::try_parse_from(make_args(&["--redux-toolkit", "react", "my-app"])).unwrap();
    assert_eq!(parsed.project_options().state, vec![StateLibrary::Redux]);

    let args = make_args(&["--redux", "--redux-toolkit", "react", "my-app"]);
    let parsed = Args::try_parse_from(args).unwrap();
    assert_eq!(parsed.project_options().state, vec![StateLibrary::Redux]);
}

#[test]
fn test_ui_flags_are_exclusive() {
    let result = Args::try_parse_from(make_args(&["--tailwind", "--chakra", "react", "my-app"]));
    assert!(result.is_err());

    let args = make_args(&["--styled-components", "react", "my-app"]);
    let parsed = Args::try_parse_from(args).unwrap();
    assert_eq!(parsed.ui(), Some(UiLibrary::StyledComponents));
}

#[test]
fn test_list_subcommand_and_alias() {
    let parsed = Args::try_parse_from(make_args(&["list"])).unwrap();
    assert_eq!(parsed.command, Some(Commands::List));

    let parsed = Args::try_parse_from(make_args(&["ls"])).unwrap();
    assert_eq!(parsed.command, Some(Commands::List));
}

#[test]
fn test_interactive_surfaces() {
    let parsed = Args::try_parse_from(make_args(&["i"])).unwrap();
    assert!(parsed.is_interactive());

    let parsed = Args::try_parse_from(make_args(&["interactive"])).unwrap();
    assert!(parsed.is_interactive());

    let parsed = Args::try_parse_from(make_args(&["-i"])).unwrap();
    assert!(parsed.is_interactive());
    assert_eq!(parsed.template, None);
}

#[test]
fn test_bare_invocation_is_interactive() {
    let parsed = Args::try_parse_from(make_args(&[])).unwrap();
    assert!(parsed.is_interactive());

    let parsed = Args::try_parse_from(make_args(&["--typescript"])).unwrap();
    assert!(parsed.is_interactive());

    let parsed = Args::try_parse_from(make_args(&["react"])).unwrap();
    assert!(!parsed.is_interactive());

    let parsed = Args::try_parse_from(make_args(&["list"])).unwrap();
    assert!(!parsed.is_interactive());
}

#[test]
fn test_unknown_package_manager() {
    let result = Args::try_parse_from(make_args(&["--package-manager", "bun", "react", "my-app"]));
    assert!(result.is_err());
}

#[test]
fn test_too_many_args() {
    let result = Args::try_parse_from(make_args(&["react", "my-app", "extra"]));
    assert!(result.is_err());
}
