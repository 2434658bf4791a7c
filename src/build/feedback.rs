use colored::*;

/// Turns `go build` error output into a short hint for the user.
pub struct FeedbackAnalyzer;

impl FeedbackAnalyzer {
    pub fn analyze(output: &str) -> Option<String> {
        // Toolchain knows the pair but refuses it (stale catalog, custom GOROOT)
        if output.contains("unsupported GOOS/GOARCH pair") {
            return Some(format!(
                "This toolchain cannot target that pair. Run {} to see what it supports.",
                "gxb list".bold().green()
            ));
        }

        // cgo packages need a C cross-compiler for the target
        if output.contains("build constraints exclude all Go files")
            || output.contains("requires cgo")
            || output.contains("C compiler")
        {
            return Some(format!(
                "It looks like a {} problem.\nCross builds run with cgo disabled unless a C cross-compiler is set; try {} or limit targets with {}.",
                "cgo".bold().red(),
                "CGO_ENABLED=0".bold().yellow(),
                "--target".bold().yellow()
            ));
        }

        if output.contains("go.mod file not found") || output.contains("cannot find main module") {
            return Some(format!(
                "No {} found. Point gxb at the module root or run {}.",
                "go.mod".bold().yellow(),
                "go mod init".bold().green()
            ));
        }

        if output.contains("is not a main package") || output.contains("no Go files in") {
            return Some(format!(
                "The project path has no {}. Pass the directory that holds {}.",
                "main package".bold().red(),
                "func main()".bold().yellow()
            ));
        }

        None
    }
}
