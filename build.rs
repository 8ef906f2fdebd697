use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn git(args: &[&str]) -> anyhow::Result<String> {
    let output = Command::new("git").args(args).output()?;
    if !output.status.success() {
        anyhow::bail!(
            "git {}: {}",
            args.join(" "),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Builds from a source archive have no repository to ask, so git failures
/// fall back to a placeholder. Setting `RSAN_REQUIRE_GIT` turns them into
/// build errors instead.
fn git_or_placeholder(args: &[&str]) -> String {
    match git(args) {
        Ok(s) => s,
        Err(e) => {
            if std::env::var("RSAN_REQUIRE_GIT").is_ok() {
                panic!("{e}\nUnset the environment variable `RSAN_REQUIRE_GIT` to build without repository info");
            }
            String::from("nogit")
        }
    }
}

fn main() {
    println!("cargo:rerun-if-env-changed=RSAN_REQUIRE_GIT");

    let commit = git_or_placeholder(&["log", "-n", "1", "--pretty=format:%H"]);
    let branch = git_or_placeholder(&["branch", "--show-current"]);

    println!(
        "cargo:rustc-env=RSAN_VERSION_INFO={}-{}",
        env!("CARGO_PKG_VERSION"),
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z")
    );

    println!(
        "cargo:rustc-env=RSAN_GIT_INFO={}-{}",
        branch,
        &commit[..8.min(commit.len())]
    );
}
