//! Command line entry point (native).

#[cfg(feature = "native")]
mod cli {
    use anyhow::{Context, Result};
    use clap::{Parser, ValueEnum};
    use pagesmith_app::{Editor, FileDownload};
    use pagesmith_core::EditorConfig;
    use pagesmith_render::ExportFormat;
    use std::path::PathBuf;

    #[derive(Debug, Clone, Copy, ValueEnum)]
    enum Format {
        Json,
        Html,
        Pdf,
    }

    impl From<Format> for ExportFormat {
        fn from(format: Format) -> Self {
            match format {
                Format::Json => ExportFormat::Json,
                Format::Html => ExportFormat::Html,
                Format::Pdf => ExportFormat::Pdf,
            }
        }
    }

    /// Render an exported template file as JSON, HTML or PDF.
    #[derive(Debug, Parser)]
    #[command(name = "pagesmith", version, about)]
    struct Args {
        /// Exported template JSON to read.
        input: PathBuf,

        /// Output format.
        #[arg(short, long, value_enum, default_value_t = Format::Pdf)]
        format: Format,

        /// Directory the output is written to.
        #[arg(short, long, default_value = ".")]
        out: PathBuf,

        /// Output file name without extension. Defaults to the input file stem.
        #[arg(short, long)]
        name: Option<String>,
    }

    fn run(args: &Args) -> Result<()> {
        let text = std::fs::read_to_string(&args.input)
            .with_context(|| format!("Failed to read {}", args.input.display()))?;

        let mut editor = Editor::new(EditorConfig::default());
        let count = editor
            .import_json(&text)
            .with_context(|| format!("Failed to import {}", args.input.display()))?;
        log::info!("Loaded {} items from {}", count, args.input.display());

        let name = args.name.clone().unwrap_or_else(|| {
            args.input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_else(|| "template".to_string())
        });
        editor.export(args.format.into(), &name, &mut FileDownload::new(&args.out))?;
        Ok(())
    }

    pub fn main() -> std::process::ExitCode {
        env_logger::init();
        let args = Args::parse();
        match run(&args) {
            Ok(()) => std::process::ExitCode::SUCCESS,
            Err(e) => {
                log::error!("{:#}", e);
                eprintln!("error: {:#}", e);
                std::process::ExitCode::FAILURE
            }
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use pagesmith_app::EditorError;
        use pagesmith_core::ImportError;
        use tempfile::TempDir;

        const TEMPLATE: &str = r#"{
            "pageItems": [{
                "id": "t1", "type": "text", "label": "Invoice", "value": "invoiceName",
                "position": {"x": 10, "y": 10}, "size": {"width": 200, "height": 32}
            }],
            "exportDate": "2024-05-01T10:00:00.000Z",
            "pageSize": "A4"
        }"#;

        fn args(input: PathBuf, out: PathBuf, format: Format) -> Args {
            Args {
                input,
                format,
                out,
                name: None,
            }
        }

        #[test]
        fn test_converts_template_to_html() {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("invoice.json");
            std::fs::write(&input, TEMPLATE).unwrap();

            run(&args(input, dir.path().to_path_buf(), Format::Html)).unwrap();

            let html = std::fs::read_to_string(dir.path().join("invoice.html")).unwrap();
            assert!(html.contains("Invoice"));
        }

        #[test]
        fn test_missing_input_keeps_io_source() {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("missing.json");
            let err = run(&args(input, dir.path().to_path_buf(), Format::Pdf)).unwrap_err();

            assert!(err.to_string().starts_with("Failed to read"));
            assert!(err.downcast_ref::<std::io::Error>().is_some());
        }

        #[test]
        fn test_invalid_template_keeps_import_error() {
            let dir = TempDir::new().unwrap();
            let input = dir.path().join("bad.json");
            std::fs::write(&input, r#"{"pageItems": 3}"#).unwrap();

            let err = run(&args(input, dir.path().to_path_buf(), Format::Json)).unwrap_err();
            assert!(matches!(
                err.downcast_ref::<EditorError>(),
                Some(EditorError::Import(ImportError::InvalidFormat))
            ));
            assert!(format!("{:#}", err).contains("invalid format"));
        }
    }
}

#[cfg(feature = "native")]
fn main() -> std::process::ExitCode {
    cli::main()
}

#[cfg(not(feature = "native"))]
fn main() {
    eprintln!("Native feature not enabled. Use `cargo run --features native`");
}
