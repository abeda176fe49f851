use std::process::Command;

// Stamps the short git SHA into `ledgerlift --version` output.
fn main() {
    let crate_dir = std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
    let workspace = format!("{}/..", crate_dir);

    println!("cargo:rerun-if-changed={}/.git/HEAD", workspace);

    let sha = git_short_sha(&workspace).unwrap_or_else(|| "unknown".to_string());
    println!("cargo:rustc-env=LEDGERLIFT_BUILD_SHA={}", sha);
}

fn git_short_sha(workspace: &str) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", workspace, "rev-parse", "--short", "HEAD"])
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    let sha = String::from_utf8_lossy(&out.stdout).trim().to_string();
    (!sha.is_empty()).then_some(sha)
}
