// libgit2 build step

use anyhow::Result;

use crate::tools::implementations::ext_lib::ExternalLibrary;
use crate::tools::registry::Tool;
use crate::tools::types::{ArgumentSpec, ToolArgs, ToolContext};

const LIBGIT2: ExternalLibrary = ExternalLibrary {
    name: "libgit2",
    source_dir: "libgit2",
    build_dir: "libgit2",
    archive_windows: "git2.lib",
    archive_unix: "libgit2.a",
    cmake_flags: &[
        "-DBUILD_SHARED_LIBS=OFF",
        "-DBUILD_TESTS=OFF",
        "-DBUILD_CLI=OFF",
    ],
};

pub struct BuildLibgit2Tool;

impl Tool for BuildLibgit2Tool {
    fn name(&self) -> &str {
        "build-libgit2"
    }

    fn description(&self) -> &str {
        "Build the libgit2 static library"
    }

    fn category(&self) -> &str {
        "build"
    }

    fn arguments(&self) -> Vec<ArgumentSpec> {
        vec![
            ArgumentSpec::string("config", "Build configuration")
                .default_str("Release")
                .choices(["Debug", "Release"]),
            ArgumentSpec::bool("clean", "Rebuild from scratch").default_bool(false),
        ]
    }

    fn execute(&self, args: &ToolArgs, ctx: &ToolContext) -> Result<i32> {
        LIBGIT2.build(
            ctx.root_dir(),
            args.str_or("config", "Release"),
            args.flag("clean"),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::implementations::testutil::NOOP_INVOKER;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_missing_sources_is_an_error() {
        let dir = TempDir::new().unwrap();
        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        assert_eq!(BuildLibgit2Tool.execute(&ToolArgs::new(), &ctx).unwrap(), 1);
    }

    #[test]
    fn test_existing_archive_skips_the_build() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("third_party/libgit2")).unwrap();
        let ext_libs = dir.path().join("build_ext_libs");
        fs::create_dir_all(&ext_libs).unwrap();
        fs::write(ext_libs.join(LIBGIT2.archive_name()), "").unwrap();

        let ctx = ToolContext::new(dir.path(), &NOOP_INVOKER);
        assert_eq!(BuildLibgit2Tool.execute(&ToolArgs::new(), &ctx).unwrap(), 0);
    }
}
