use std::cell::RefCell;
use std::collections::VecDeque;

use rtg::error::Result;
use rtg::options::{PackageManager, StateLibrary, UiLibrary};
use rtg::prompt::{prompt_project, Prompter};
use rtg::registry::Registry;

/// Answers prompts from a fixed script, in order.
#[derive(Default)]
struct ScriptedPrompter {
    selections: RefCell<VecDeque<usize>>,
    multi_selections: RefCell<VecDeque<Vec<usize>>>,
    inputs: RefCell<VecDeque<String>>,
    confirmations: RefCell<VecDeque<bool>>,
}

impl Prompter for ScriptedPrompter {
    fn select(&self, _prompt: &str, _items: &[String], default: usize) -> Result<usize> {
        Ok(self.selections.borrow_mut().pop_front().unwrap_or(default))
    }

    fn multi_select(&self, _prompt: &str, _items: &[String]) -> Result<Vec<usize>> {
        Ok(self.multi_selections.borrow_mut().pop_front().unwrap_or_default())
    }

    fn input(&self, _prompt: &str, default: &str) -> Result<String> {
        Ok(self.inputs.borrow_mut().pop_front().unwrap_or_else(|| default.to_string()))
    }

    fn confirm(&self, _prompt: &str, default: bool) -> Result<bool> {
        Ok(self.confirmations.borrow_mut().pop_front().unwrap_or(default))
    }
}

#[test]
fn test_defaults() {
    let answers = prompt_project(&ScriptedPrompter::default(), &Registry::builtin()).unwrap();

    assert_eq!(answers.template, "react");
    assert_eq!(answers.project_name, "my-react-app");
    assert!(!answers.options.typescript);
    assert_eq!(answers.options.ui, None);
    assert!(answers.options.state.is_empty());
    assert!(answers.options.route);
    assert!(answers.options.install);
    assert!(answers.options.git);
    assert_eq!(answers.options.package_manager, PackageManager::Npm);
}

#[test]
fn test_scripted_answers() {
    let prompter = ScriptedPrompter {
        // template, UI library, package manager
        selections: RefCell::new(VecDeque::from([0, 3, 2])),
        multi_selections: RefCell::new(VecDeque::from([vec![1, 0]])),
        inputs: RefCell::new(VecDeque::from(["dashboard".to_string()])),
        // typescript, router, install, git
        confirmations: RefCell::new(VecDeque::from([true, false, false, true])),
    };

    let answers = prompt_project(&prompter, &Registry::builtin()).unwrap();

    assert_eq!(answers.project_name, "dashboard");
    assert!(answers.options.typescript);
    assert_eq!(answers.options.ui, Some(UiLibrary::Mui));
    assert_eq!(answers.options.state, vec![StateLibrary::Redux, StateLibrary::TanstackQuery]);
    assert!(!answers.options.route);
    assert!(!answers.options.install);
    assert!(answers.options.git);
    assert_eq!(answers.options.package_manager, PackageManager::Pnpm);
}

#[test]
fn test_typescript_template_skips_typescript_question() {
    let prompter = ScriptedPrompter {
        selections: RefCell::new(VecDeque::from([1])),
        confirmations: RefCell::new(VecDeque::from([false])),
        ..Default::default()
    };

    let answers = prompt_project(&prompter, &Registry::builtin()).unwrap();

    assert_eq!(answers.template, "react-ts");
    assert!(!answers.options.typescript);
    // The first confirmation answered the router question.
    assert!(!answers.options.route);
}

#[test]
fn test_out_of_range_selection() {
    let prompter = ScriptedPrompter {
        selections: RefCell::new(VecDeque::from([7])),
        ..Default::default()
    };
    assert!(prompt_project(&prompter, &Registry::builtin()).is_err());
}
