//! Language names and their aliases
//!
//! Rules in the database use whatever spelling their authors chose
//! (`py`, `python3`, `golang`, ...). Filtering and run codes always work on
//! the base name, the first entry of each row below.

use std::collections::BTreeSet;

/// Display name and known spellings for every language. The first spelling
/// is the base name.
pub const LANGUAGES: &[(&str, &[&str])] = &[
    ("Apex", &["apex"]),
    ("Bash", &["bash", "sh"]),
    ("C", &["c"]),
    ("Cairo", &["cairo"]),
    ("Clojure", &["clojure"]),
    ("C++", &["cpp", "c++"]),
    ("C#", &["csharp", "c#", "cs"]),
    ("Dart", &["dart"]),
    ("Dockerfile", &["dockerfile", "docker"]),
    ("Elixir", &["ex", "elixir"]),
    ("Generic", &["generic"]),
    ("Go", &["go", "golang"]),
    ("HTML", &["html"]),
    ("Java", &["java"]),
    ("JavaScript", &["js", "javascript"]),
    ("JSON", &["json"]),
    ("Jsonnet", &["jsonnet"]),
    ("JSX", &["js", "javascript"]),
    ("Julia", &["julia"]),
    ("Kotlin", &["kt", "kotlin"]),
    ("Lisp", &["lisp"]),
    ("Lua", &["lua"]),
    ("OCaml", &["ocaml"]),
    ("PHP", &["php"]),
    ("Python", &["python", "python2", "python3", "py"]),
    ("R", &["r"]),
    ("Ruby", &["ruby"]),
    ("Rust", &["rust"]),
    ("Scala", &["scala"]),
    ("Scheme", &["scheme"]),
    ("Solidity", &["solidity", "sol"]),
    ("Swift", &["swift"]),
    ("Terraform", &["tf", "hcl", "terraform"]),
    ("TypeScript", &["ts", "typescript"]),
    ("YAML", &["yaml"]),
    ("XML", &["xml"]),
];

/// Resolve an alias to its base name. Unknown names are returned unchanged.
///
/// ```rust
/// use semgrep_search::filters::languages::resolve_alias;
///
/// assert_eq!(resolve_alias("py"), "python");
/// assert_eq!(resolve_alias("python"), "python");
/// assert_eq!(resolve_alias("brainfuck"), "brainfuck");
/// ```
pub fn resolve_alias(name: &str) -> &str {
    LANGUAGES
        .iter()
        .find_map(|(_, names)| names[1..].contains(&name).then_some(names[0]))
        .unwrap_or(name)
}

/// Resolve every name in `names` to its base name
pub fn normalize<I, S>(names: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .map(|name| resolve_alias(name.as_ref()).to_string())
        .collect()
}
