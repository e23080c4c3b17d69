use std::process::Command;
use vergen::EmitBuilder;

fn main() {
    let is_git_available = Command::new("git")
        .args(["rev-parse", "--git-dir"])
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false);

    let result = if is_git_available {
        EmitBuilder::builder()
            .build_timestamp()
            .git_sha(true)
            .emit()
    } else {
        // Outside a checkout the handlers still need the variable.
        println!("cargo:rustc-env=VERGEN_GIT_SHA=unknown");
        EmitBuilder::builder().build_timestamp().emit()
    };

    result.expect("Unable to generate build metadata");
}
