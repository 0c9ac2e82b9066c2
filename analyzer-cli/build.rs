use std::process::Command;

fn git(repo_root: &str, args: &[&str]) -> Option<String> {
    let out = Command::new("git")
        .args(["-C", repo_root])
        .args(args)
        .output()
        .ok()?;
    if !out.status.success() {
        return None;
    }
    Some(String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-env-changed=ANALYZER_BUILD_SHA");

    // Source tarballs have no .git; packagers pass the revision in instead
    let sha = match std::env::var("ANALYZER_BUILD_SHA") {
        Ok(sha) if !sha.trim().is_empty() => sha.trim().to_string(),
        _ => {
            let manifest_dir =
                std::env::var("CARGO_MANIFEST_DIR").unwrap_or_else(|_| ".".to_string());
            let repo_root = format!("{}/..", manifest_dir);
            println!("cargo:rerun-if-changed={}/.git/HEAD", repo_root);
            println!("cargo:rerun-if-changed={}/.git/index", repo_root);

            match git(&repo_root, &["rev-parse", "--short", "HEAD"]).filter(|s| !s.is_empty()) {
                Some(sha) => {
                    let dirty = git(&repo_root, &["status", "--porcelain", "--untracked-files=no"])
                        .is_some_and(|s| !s.is_empty());
                    if dirty { format!("{sha}-dirty") } else { sha }
                }
                None => "unknown".to_string(),
            }
        }
    };

    println!("cargo:rustc-env=ANALYZER_BUILD_SHA={}", sha);
}
