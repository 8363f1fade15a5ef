//! Source rules for `src/`, checked at test time.
//!
//! Counted antipatterns carry a budget that only goes down. Layering rules
//! keep browser bindings inside the modules that adapt them, so everything
//! else stays testable against the in-memory backends.
#![cfg(not(target_arch = "wasm32"))]

use std::fs;
use std::path::Path;

struct Budget {
    pattern: &'static str,
    max: usize,
    hint: &'static str,
}

const BUDGETS: &[Budget] = &[
    Budget { pattern: ".unwrap()", max: 0, hint: "propagate with ? or log and fall back" },
    // The email pattern is a compile-time constant.
    Budget { pattern: ".expect(", max: 1, hint: "propagate with ? or log and fall back" },
    Budget { pattern: "panic!(", max: 0, hint: "the page must degrade, not abort" },
    Budget { pattern: "unreachable!(", max: 0, hint: "make the state unrepresentable" },
    Budget { pattern: "todo!(", max: 0, hint: "finish it or leave it out" },
    Budget { pattern: "unimplemented!(", max: 0, hint: "finish it or leave it out" },
    Budget { pattern: "let _ =", max: 0, hint: "inspect the result and log it" },
    Budget { pattern: ".ok()", max: 0, hint: "match the error and log it" },
    Budget { pattern: "#[allow(dead_code)]", max: 0, hint: "delete the code" },
];

/// Files that adapt the browser behind the crate's backend traits.
const BROWSER_FILES: &[&str] = &[
    "src/web/",
    "src/boot.rs",
    "src/schedule/browser.rs",
    "src/storage/browser.rs",
    "src/net/gloo_transport.rs",
];

/// Patterns that may only appear under the listed paths.
const CONFINED: &[(&str, &[&str])] = &[
    ("web_sys::", BROWSER_FILES),
    ("js_sys::", BROWSER_FILES),
    ("wasm_bindgen", BROWSER_FILES),
    ("gloo_net::", &["src/net/gloo_transport.rs"]),
    ("gloo_timers::", &["src/schedule/browser.rs"]),
    ("reqwest::", &["src/net/reqwest_transport.rs"]),
    // Leaked closures are only acceptable for page-lifetime listeners.
    (".forget()", &["src/web/", "src/boot.rs"]),
];

/// Browser modules must be declared behind the `hydrate` feature.
const HYDRATE_ONLY: &[(&str, &str)] = &[
    ("src/lib.rs", "pub mod boot;"),
    ("src/lib.rs", "pub mod web;"),
    ("src/schedule/mod.rs", "pub mod browser;"),
    ("src/storage/mod.rs", "pub mod browser;"),
    ("src/net/mod.rs", "pub mod gloo_transport;"),
];

struct Source {
    path: String,
    text: String,
}

impl Source {
    fn is_test(&self) -> bool {
        self.path.ends_with("_test.rs")
    }

    /// Non-comment lines containing `pattern`, with line numbers.
    fn hits(&self, pattern: &str) -> Vec<usize> {
        self.text
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim_start().starts_with("//"))
            .filter(|(_, line)| line.contains(pattern))
            .map(|(i, _)| i + 1)
            .collect()
    }
}

fn walk(dir: &Path, out: &mut Vec<Source>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let text = fs::read_to_string(&path).unwrap_or_default();
            let path = path.to_string_lossy().replace('\\', "/");
            out.push(Source { path, text });
        }
    }
}

fn sources() -> Vec<Source> {
    let mut out = Vec::new();
    walk(Path::new("src"), &mut out);
    out.sort_by(|a, b| a.path.cmp(&b.path));
    assert!(!out.is_empty(), "no sources found; run from the crate root");
    out
}

fn production() -> Vec<Source> {
    sources().into_iter().filter(|s| !s.is_test()).collect()
}

#[test]
fn antipattern_budgets_hold() {
    let files = production();
    let mut report = Vec::new();
    for budget in BUDGETS {
        let found: Vec<String> = files
            .iter()
            .flat_map(|file| {
                file.hits(budget.pattern).into_iter().map(|line| format!("  {}:{line}", file.path))
            })
            .collect();
        if found.len() > budget.max {
            report.push(format!(
                "`{}`: {} found, budget {} ({})\n{}",
                budget.pattern,
                found.len(),
                budget.max,
                budget.hint,
                found.join("\n"),
            ));
        }
    }
    assert!(report.is_empty(), "budgets exceeded:\n{}", report.join("\n"));
}

#[test]
fn browser_bindings_stay_in_adapter_modules() {
    let mut report = Vec::new();
    for file in production() {
        for (pattern, allowed) in CONFINED {
            if allowed.iter().any(|prefix| file.path.starts_with(prefix)) {
                continue;
            }
            for line in file.hits(pattern) {
                report.push(format!("  {}:{line} uses `{pattern}`", file.path));
            }
        }
    }
    assert!(report.is_empty(), "bindings outside their adapters:\n{}", report.join("\n"));
}

#[test]
fn browser_modules_are_hydrate_gated() {
    for (parent, decl) in HYDRATE_ONLY {
        let text = fs::read_to_string(parent).unwrap_or_default();
        let lines: Vec<&str> = text.lines().map(str::trim).collect();
        let at = lines.iter().position(|line| line == decl);
        let Some(at) = at else {
            panic!("{parent} does not declare `{decl}`");
        };
        let gate = lines[..at].iter().rev().find(|line| !line.is_empty());
        assert_eq!(
            gate.copied(),
            Some(r#"#[cfg(feature = "hydrate")]"#),
            "`{decl}` in {parent} must be behind the hydrate feature",
        );
    }
}

#[test]
fn every_test_file_is_included() {
    let all = sources();
    let orphans: Vec<&str> = all
        .iter()
        .filter(|s| s.is_test())
        .filter(|test| {
            let name = test.path.rsplit('/').next().unwrap_or_default();
            let include = format!(r#"#[path = "{name}"]"#);
            let dir = &test.path[..test.path.len() - name.len()];
            !all.iter().any(|s| s.path.starts_with(dir) && s.text.contains(&include))
        })
        .map(|s| s.path.as_str())
        .collect();
    assert!(orphans.is_empty(), "test files never compiled: {orphans:?}");
}
