//! Scaffolding fragments generated by the tool.
//! Each fragment is a complete file covering both the JavaScript and the
//! TypeScript flavour, selected through the `typescript` context flag.

use serde_json::json;

use crate::error::Result;
use crate::renderer::TemplateRenderer;

/// Application entry module (`src/main.jsx` / `src/main.tsx`).
pub const ENTRY: &str = r#"import React from 'react'
import ReactDOM from 'react-dom/client'
{% for wrapper in wrappers %}
{% for line in wrapper.imports %}
{{ line }}
{% endfor %}
{% endfor %}
import App from './App'
{% if stylesheet %}
import './index.css'
{% endif %}

ReactDOM.createRoot(document.getElementById('root'){% if typescript %}!{% endif %}).render(
  <React.StrictMode>
{% for wrapper in wrappers %}
    {{ wrapper.indent }}{{ wrapper.open }}
{% endfor %}
    {{ app_indent }}<App />
{% for wrapper in wrappers|reverse %}
    {{ wrapper.indent }}{{ wrapper.close }}
{% endfor %}
  </React.StrictMode>,
)
"#;

/// Route list component (`src/routes/AppRoutes.*`).
pub const ROUTES: &str = r#"import { Routes, Route } from 'react-router-dom'
{% if typescript %}
import type { ReactElement } from 'react'
{% endif %}
import Home from '../pages/Home'

const AppRoutes = (){% if typescript %}: ReactElement{% endif %} => {
  return (
    <Routes>
      <Route path="/" element={<Home />} />
      {/* Add more routes here */}
    </Routes>
  )
}

export default AppRoutes
"#;

/// Home page component (`src/pages/Home.*`).
pub const HOME_PAGE: &str = r#"{% if typescript %}
import type { ReactElement } from 'react'

{% endif %}
const Home = (){% if typescript %}: ReactElement{% endif %} => {
  return (
    <div className="home">
      <h1>Welcome to {{ project_title }}</h1>
      <p>Start building your app by editing the files in the src directory.</p>
    </div>
  )
}

export default Home
"#;

/// Redux store configuration (`src/store/index.*`).
pub const STORE: &str = r#"import { configureStore } from '@reduxjs/toolkit'
import counterReducer from './counterSlice'

export const store = configureStore({
  reducer: {
    counter: counterReducer,
  },
})
{% if typescript %}

export type RootState = ReturnType<typeof store.getState>
export type AppDispatch = typeof store.dispatch
{% endif %}
"#;

/// Example reducer slice (`src/store/counterSlice.*`).
pub const COUNTER_SLICE: &str = r#"import { createSlice } from '@reduxjs/toolkit'
{% if typescript %}
import type { PayloadAction } from '@reduxjs/toolkit'

interface CounterState {
  value: number
}

const initialState: CounterState = {
  value: 0,
}
{% else %}

const initialState = {
  value: 0,
}
{% endif %}

export const counterSlice = createSlice({
  name: 'counter',
  initialState,
  reducers: {
    increment: (state) => {
      state.value += 1
    },
    decrement: (state) => {
      state.value -= 1
    },
    incrementByAmount: (state, action{% if typescript %}: PayloadAction<number>{% endif %}) => {
      state.value += action.payload
    },
  },
})

export const { increment, decrement, incrementByAmount } = counterSlice.actions

export default counterSlice.reducer
"#;

/// Store hooks (`src/store/hooks.*`).
pub const STORE_HOOKS: &str = r#"import { useDispatch, useSelector } from 'react-redux'
{% if typescript %}
import type { AppDispatch, RootState } from './index'

export const useAppDispatch = useDispatch.withTypes<AppDispatch>()
export const useAppSelector = useSelector.withTypes<RootState>()
{% else %}

export const useAppDispatch = () => useDispatch()
export const useAppSelector = useSelector
{% endif %}
"#;

/// Shared query client (`src/lib/query-client.*`).
pub const QUERY_CLIENT: &str = r#"import { QueryClient } from '@tanstack/react-query'

export const queryClient = new QueryClient({
  defaultOptions: {
    queries: {
      staleTime: 1000 * 60 * 5,
      retry: 1,
    },
  },
})
"#;

/// Compiler configuration added when a JavaScript template is converted.
pub const TSCONFIG: &str = r#"{
  "compilerOptions": {
    "target": "ES2020",
    "useDefineForClassFields": true,
    "lib": ["ES2020", "DOM", "DOM.Iterable"],
    "module": "ESNext",
    "skipLibCheck": true,
    "moduleResolution": "bundler",
    "allowImportingTsExtensions": true,
    "resolveJsonModule": true,
    "isolatedModules": true,
    "noEmit": true,
    "jsx": "react-jsx",
    "strict": true,
    "noUnusedLocals": true,
    "noUnusedParameters": true,
    "noFallthroughCasesInSwitch": true
  },
  "include": ["src"],
  "references": [{ "path": "./tsconfig.node.json" }]
}
"#;

pub const TSCONFIG_NODE: &str = r#"{
  "compilerOptions": {
    "composite": true,
    "skipLibCheck": true,
    "module": "ESNext",
    "moduleResolution": "bundler",
    "allowSyntheticDefaultImports": true
  },
  "include": ["vite.config.ts", "vite.config.js"]
}
"#;

pub const VITE_ENV: &str = "/// <reference types=\"vite/client\" />\n";

/// ESLint configuration written by the linting setup.
pub const ESLINTRC: &str = r#"module.exports = {
  root: true,
  env: {
    browser: true,
    es2021: true,
  },
  extends: [
    'eslint:recommended',
    'plugin:react/recommended',
    'plugin:react-hooks/recommended',
{% if typescript %}
    'plugin:@typescript-eslint/recommended',
{% endif %}
    'prettier',
  ],
  ignorePatterns: ['dist', '.eslintrc.cjs'],
{% if typescript %}
  parser: '@typescript-eslint/parser',
{% endif %}
  parserOptions: {
    ecmaFeatures: {
      jsx: true,
    },
    ecmaVersion: 'latest',
    sourceType: 'module',
  },
  plugins: ['react', 'react-refresh', {% if typescript %}'@typescript-eslint', {% endif %}'prettier'],
  rules: {
    'prettier/prettier': 'error',
    'react/react-in-jsx-scope': 'off',
    'react-refresh/only-export-components': ['warn', { allowConstantExport: true }],
  },
  settings: {
    react: {
      version: 'detect',
    },
  },
}
"#;

pub const PRETTIERRC: &str = r#"{
  "semi": true,
  "trailingComma": "es5",
  "singleQuote": true,
  "printWidth": 80,
  "tabWidth": 2,
  "useTabs": false
}
"#;

/// A component wrapping `<App />` in the entry module.
struct Wrapper {
    imports: &'static [&'static str],
    open: &'static str,
    close: &'static str,
}

const ROUTER_WRAPPER: Wrapper = Wrapper {
    imports: &["import { BrowserRouter } from 'react-router-dom'"],
    open: "<BrowserRouter>",
    close: "</BrowserRouter>",
};

const REDUX_WRAPPER: Wrapper = Wrapper {
    imports: &["import { Provider } from 'react-redux'", "import { store } from './store'"],
    open: "<Provider store={store}>",
    close: "</Provider>",
};

const QUERY_WRAPPER: Wrapper = Wrapper {
    imports: &[
        "import { QueryClientProvider } from '@tanstack/react-query'",
        "import { queryClient } from './lib/query-client'",
    ],
    open: "<QueryClientProvider client={queryClient}>",
    close: "</QueryClientProvider>",
};

/// Feature switches the entry module depends on.
#[derive(Debug, Clone, Copy, Default)]
pub struct EntryFeatures {
    pub typescript: bool,
    pub route: bool,
    pub redux: bool,
    pub query: bool,
    pub stylesheet: bool,
}

/// Renders the entry module for the given feature combination.
pub fn render_entry(renderer: &dyn TemplateRenderer, features: EntryFeatures) -> Result<String> {
    let selected: Vec<&Wrapper> = [
        (features.redux, &REDUX_WRAPPER),
        (features.query, &QUERY_WRAPPER),
        (features.route, &ROUTER_WRAPPER),
    ]
    .into_iter()
    .filter_map(|(enabled, wrapper)| enabled.then_some(wrapper))
    .collect();

    let wrappers: Vec<serde_json::Value> = selected
        .iter()
        .enumerate()
        .map(|(depth, wrapper)| {
            json!({
                "imports": wrapper.imports,
                "open": wrapper.open,
                "close": wrapper.close,
                "indent": "  ".repeat(depth),
            })
        })
        .collect();

    let context = json!({
        "typescript": features.typescript,
        "stylesheet": features.stylesheet,
        "app_indent": "  ".repeat(selected.len()),
        "wrappers": wrappers,
    });
    renderer.render(ENTRY, &context)
}

/// Renders a fragment whose only switch is the TypeScript flavour.
pub fn render_flavoured(
    renderer: &dyn TemplateRenderer,
    fragment: &str,
    typescript: bool,
    project_title: &str,
) -> Result<String> {
    renderer.render(fragment, &json!({ "typescript": typescript, "project_title": project_title }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::MiniJinjaRenderer;

    #[test]
    fn test_entry_with_router_and_redux() {
        let renderer = MiniJinjaRenderer::new();
        let entry = render_entry(
            &renderer,
            EntryFeatures {
                typescript: true,
                route: true,
                redux: true,
                stylesheet: true,
                query: false,
            },
        )
        .unwrap();

        assert!(entry.contains("import { BrowserRouter } from 'react-router-dom'\n"));
        assert!(entry.contains("document.getElementById('root')!"));
        assert!(entry.contains(
            "    <Provider store={store}>\n      <BrowserRouter>\n        <App />\n      </BrowserRouter>\n    </Provider>\n"
        ));
        assert!(entry.contains("import './index.css'"));
    }

    #[test]
    fn test_entry_without_wrappers() {
        let renderer = MiniJinjaRenderer::new();
        let entry = render_entry(&renderer, EntryFeatures::default()).unwrap();

        assert!(!entry.contains("react-router-dom"));
        assert!(!entry.contains("index.css"));
        assert!(entry.contains("  <React.StrictMode>\n    <App />\n  </React.StrictMode>,\n"));
    }

    #[test]
    fn test_store_flavours() {
        let renderer = MiniJinjaRenderer::new();
        let typed = render_flavoured(&renderer, STORE, true, "").unwrap();
        let untyped = render_flavoured(&renderer, STORE, false, "").unwrap();

        assert!(typed.contains("export type RootState"));
        assert!(!untyped.contains("export type"));
    }
}
