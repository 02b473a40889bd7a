use std::process::Command;

fn main() {
    // Bake the current git commit into the binary for `classdemo version`
    let commit = Command::new("git")
        .args(["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "unknown".to_string());

    println!("cargo:rustc-env=CLASSDEMO_COMMIT={}", commit);
    println!("cargo:rerun-if-changed=.git/HEAD");
}
