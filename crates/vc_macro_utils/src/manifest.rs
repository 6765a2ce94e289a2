use std::collections::BTreeMap;
use std::env;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};
use std::time::SystemTime;

use toml_edit::{Document, Item, Table};

const FACADE_NAME: &str = "vc_json_kit";
const CRATE_PREFIX: &str = "vc_";
const DEPENDENCY_TABLES: [&str; 2] = ["dependencies", "dev-dependencies"];

/// A cached view of the invoking crate's `Cargo.toml`.
///
/// Generated code must name runtime items through a path that resolves
/// in the crate expanding the macro, which depends on how that crate
/// declares its dependencies.
///
/// # Example
///
/// ```rust
/// # use vc_macro_utils::Manifest;
/// let p: syn::Path = Manifest::shared(|m| m.get_crate_path("vc_json"));
/// ```
///
/// # Resolution rules
///
/// Each dependency table is searched in turn, `dependencies` first and
/// `dev-dependencies` second:
///
/// 1. The package is a dependency: `::local_name`, where `local_name` is the
///    dependency key, so `json = { package = "vc_json" }` yields `::json`.
/// 2. The package name starts with `vc_` and the facade `vc_json_kit` is a
///    dependency: `::vc_json_kit::short_name`, e.g. `::vc_json_kit::json`.
///
/// Otherwise the absolute path `::crate_name` is returned.
///
/// ## Note
///
/// A crate expanding its own derive sees `::crate_name`, which only
/// resolves with `extern crate self as crate_name;` in its root.
#[derive(Debug)]
pub struct Manifest {
    document: Document<Box<str>>,
    modified_time: SystemTime,
}

impl Manifest {
    /// Runs `func` with the [`Manifest`] of the crate being compiled.
    ///
    /// Manifests are cached per path and re-read when the file changes.
    /// Reading still needs a global lock, so macros should resolve their
    /// paths once per invocation.
    pub fn shared<R>(func: impl FnOnce(&Self) -> R) -> R {
        static MANIFESTS: RwLock<BTreeMap<PathBuf, Manifest>> = RwLock::new(BTreeMap::new());

        let path = manifest_path();
        let modified_time = std::fs::metadata(&path)
            .and_then(|metadata| metadata.modified())
            .unwrap_or_else(|err| panic!("Cannot stat cargo manifest {}: {err}", path.display()));

        {
            let manifests = MANIFESTS.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(manifest) = manifests.get(&path)
                && manifest.modified_time == modified_time
            {
                return func(manifest);
            }
        }

        let manifest = Manifest {
            document: read_document(&path),
            modified_time,
        };
        let result = func(&manifest);

        MANIFESTS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(path, manifest);

        result
    }

    /// Returns the path under which package `name` is reachable.
    ///
    /// See the type documentation for the resolution rules.
    #[inline(never)]
    pub fn get_crate_path(&self, name: &str) -> syn::Path {
        DEPENDENCY_TABLES
            .iter()
            .filter_map(|key| match self.document.get(key) {
                Some(Item::Table(deps)) => Some(deps),
                _ => None,
            })
            .find_map(|deps| resolve(deps, name))
            .unwrap_or_else(|| absolute_path(name))
    }
}

fn resolve(deps: &Table, name: &str) -> Option<syn::Path> {
    if let Some(local) = local_name(deps, name) {
        return Some(absolute_path(&local));
    }

    let module = name.strip_prefix(CRATE_PREFIX)?;
    let facade = local_name(deps, FACADE_NAME)?;
    let mut path = absolute_path(&facade);
    path.segments.push(parse(module));
    Some(path)
}

/// The identifier a dependency on `package` is imported as.
fn local_name(deps: &Table, package: &str) -> Option<String> {
    let key = if deps.contains_key(package) {
        package
    } else {
        deps.iter()
            .find(|(_, item)| item.get("package").and_then(Item::as_str) == Some(package))
            .map(|(key, _)| key)?
    };
    Some(key.replace('-', "_"))
}

fn absolute_path(name: &str) -> syn::Path {
    parse(&format!("::{name}"))
}

fn parse<T: syn::parse::Parse>(text: &str) -> T {
    syn::parse_str(text).unwrap_or_else(|err| panic!("`{text}` is not a valid path: {err}"))
}

#[inline(never)]
fn manifest_path() -> PathBuf {
    let mut path = env::var_os("CARGO_MANIFEST_DIR")
        .map(PathBuf::from)
        .expect("CARGO_MANIFEST_DIR should be auto-defined by cargo.");
    path.push("Cargo.toml");
    path
}

#[inline(never)]
fn read_document(path: &Path) -> Document<Box<str>> {
    let text = std::fs::read_to_string(path)
        .unwrap_or_else(|err| panic!("Unable to read cargo manifest {}: {err}", path.display()));
    Document::parse(text.into_boxed_str())
        .unwrap_or_else(|err| panic!("Failed to parse cargo manifest {}: {err}", path.display()))
}
