//! Resolved project options and the per-invocation materialization context.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

/// UI library add-ons. At most one can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UiLibrary {
    Tailwind,
    StyledComponents,
    Mui,
    Chakra,
}

impl UiLibrary {
    /// Every UI library, in catalog declaration order.
    pub const ALL: [UiLibrary; 4] =
        [UiLibrary::Tailwind, UiLibrary::StyledComponents, UiLibrary::Mui, UiLibrary::Chakra];

    /// Add-on catalog name.
    pub fn addon_name(&self) -> &'static str {
        match self {
            UiLibrary::Tailwind => "tailwind",
            UiLibrary::StyledComponents => "styled-components",
            UiLibrary::Mui => "mui",
            UiLibrary::Chakra => "chakra",
        }
    }

    /// Package the library is known by in the project's library manifest.
    pub fn package(&self) -> &'static str {
        match self {
            UiLibrary::Tailwind => "tailwindcss",
            UiLibrary::StyledComponents => "styled-components",
            UiLibrary::Mui => "@mui/material",
            UiLibrary::Chakra => "@chakra-ui/react",
        }
    }

    /// Human readable label used by the interactive prompts.
    pub fn label(&self) -> &'static str {
        match self {
            UiLibrary::Tailwind => "Tailwind CSS",
            UiLibrary::StyledComponents => "Styled Components",
            UiLibrary::Mui => "Material-UI (MUI)",
            UiLibrary::Chakra => "Chakra UI",
        }
    }
}

/// State-management add-ons. Any combination can be selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum StateLibrary {
    Redux,
    TanstackQuery,
}

impl StateLibrary {
    pub const ALL: [StateLibrary; 2] = [StateLibrary::Redux, StateLibrary::TanstackQuery];

    pub fn addon_name(&self) -> &'static str {
        match self {
            StateLibrary::Redux => "redux",
            StateLibrary::TanstackQuery => "tanstack-query",
        }
    }

    pub fn package(&self) -> &'static str {
        match self {
            StateLibrary::Redux => "@reduxjs/toolkit",
            StateLibrary::TanstackQuery => "@tanstack/react-query",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StateLibrary::Redux => "Redux Toolkit",
            StateLibrary::TanstackQuery => "TanStack Query (React Query)",
        }
    }
}

/// Package manager used for the install step and the next-step guidance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PackageManager {
    #[default]
    Npm,
    Yarn,
    Pnpm,
}

impl PackageManager {
    pub const ALL: [PackageManager; 3] =
        [PackageManager::Npm, PackageManager::Yarn, PackageManager::Pnpm];

    pub fn program(&self) -> &'static str {
        match self {
            PackageManager::Npm => "npm",
            PackageManager::Yarn => "yarn",
            PackageManager::Pnpm => "pnpm",
        }
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

/// The set of decisions a user made, from flags or from prompts.
#[derive(Debug, Clone)]
pub struct ProjectOptions {
    pub typescript: bool,
    pub ui: Option<UiLibrary>,
    pub state: Vec<StateLibrary>,
    pub route: bool,
    pub install: bool,
    pub git: bool,
    pub package_manager: PackageManager,
    /// Template source overriding the registry's one.
    pub repo: Option<String>,
    /// Directory the project directory is created in.
    pub directory: PathBuf,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            typescript: false,
            ui: None,
            state: Vec::new(),
            route: true,
            install: true,
            git: true,
            package_manager: PackageManager::default(),
            repo: None,
            directory: PathBuf::from("."),
        }
    }
}

impl ProjectOptions {
    /// Applies the legacy flags on top of their modern equivalents.
    ///
    /// `--redux-toolkit` always implies `--redux` and `--no-route` always
    /// disables routing. Neither legacy flag can switch a feature back off.
    pub fn with_legacy_flags(mut self, redux_toolkit: bool, no_route: bool) -> Self {
        if redux_toolkit {
            self.select_state(StateLibrary::Redux);
        }
        if no_route {
            self.route = false;
        }
        self
    }

    /// Adds a state library, keeping the declaration order and no duplicates.
    pub fn select_state(&mut self, library: StateLibrary) {
        if !self.state.contains(&library) {
            self.state.push(library);
            self.state.sort();
        }
    }

    pub fn has_state(&self, library: StateLibrary) -> bool {
        self.state.contains(&library)
    }

    pub fn has_ui(&self, library: UiLibrary) -> bool {
        self.ui == Some(library)
    }

    /// Selected add-on names: UI library first, then state management,
    /// each in catalog declaration order.
    pub fn selected_addons(&self) -> Vec<&'static str> {
        let ui = UiLibrary::ALL
            .iter()
            .filter(|library| self.has_ui(**library))
            .map(UiLibrary::addon_name);
        let state = StateLibrary::ALL
            .iter()
            .filter(|library| self.has_state(**library))
            .map(StateLibrary::addon_name);
        ui.chain(state).collect()
    }
}

/// Everything a pipeline stage needs to know about the current invocation.
#[derive(Debug, Clone)]
pub struct MaterializationContext {
    pub project_name: String,
    pub options: ProjectOptions,
    /// Absolute path of the project directory.
    pub target: PathBuf,
}

impl MaterializationContext {
    pub fn new<S: Into<String>>(project_name: S, options: ProjectOptions) -> Self {
        let project_name = project_name.into();
        let base = if options.directory.is_absolute() {
            options.directory.clone()
        } else {
            std::env::current_dir().unwrap_or_default().join(&options.directory)
        };
        let target = base.join(&project_name);
        Self {
            project_name,
            options,
            target,
        }
    }
}
