use std::env;

fn main() {
    // Man pages are only built on request; the generate-man command covers the rest
    if env::var("PROFILE").unwrap_or_default() != "release" && env::var("GENERATE_MAN").is_err() {
        return;
    }

    println!("cargo:rerun-if-changed=src/cli/mod.rs");
    println!("cargo:rerun-if-changed=src/cli/commands/mod.rs");
    println!("cargo:rerun-if-env-changed=GENERATE_MAN");
}
