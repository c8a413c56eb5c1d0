use std::fs;
use std::path::{Path, PathBuf};

const INPUT_HEADER: &str = "=== INPUT ===";
const OUTPUT_HEADER: &str = "=== OUTPUT ===";

/// One `*.golden` file: the input it was recorded for and the expected output.
struct Golden {
    input: String,
    output: String,
}

impl Golden {
    fn parse(contents: &str) -> Option<Self> {
        let body = contents.strip_prefix(INPUT_HEADER)?.strip_prefix('\n')?;
        let (input, output) = body.split_once(OUTPUT_HEADER)?;
        Some(Self {
            input: input.strip_suffix('\n').unwrap_or(input).to_string(),
            output: output.strip_prefix('\n').unwrap_or(output).to_string(),
        })
    }

    fn render(input: &str, output: &str) -> String {
        format!("{INPUT_HEADER}\n{input}\n{OUTPUT_HEADER}\n{}", normalize_output(output))
    }
}

/// Compares `render(input)` with the recorded output for every `*.{input_ext}` case in `dir`.
///
/// Inputs lose one trailing newline before rendering. A golden file recorded for a different
/// input fails the test. `BLESS=1` rewrites every golden file; a missing one is written and the
/// test fails so it can be reviewed.
pub fn run_golden_dir<F>(test_name: &str, dir: &Path, input_ext: &str, golden_ext: &str, mut render: F)
where
    F: FnMut(&str) -> String,
{
    let mut cases: Vec<PathBuf> = fs::read_dir(dir)
        .unwrap_or_else(|e| panic!("failed to read case dir {dir:?}: {e}"))
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(input_ext))
        .collect();
    cases.sort();
    assert!(!cases.is_empty(), "no *.{input_ext} cases in {dir:?}");

    let bless = std::env::var("BLESS").is_ok();

    for case in cases {
        let source = fs::read_to_string(&case)
            .unwrap_or_else(|e| panic!("failed to read {case:?}: {e}"));
        let input = source.strip_suffix('\n').unwrap_or(&source);
        let actual = render(input);
        let golden_path = case.with_extension(golden_ext);

        let recorded = fs::read_to_string(&golden_path).ok();
        if bless || recorded.is_none() {
            fs::write(&golden_path, Golden::render(input, &actual))
                .unwrap_or_else(|e| panic!("failed to write {golden_path:?}: {e}"));
            assert!(
                bless,
                "wrote missing golden file {golden_path:?}; review it, then re-run `cargo test {test_name}`"
            );
            continue;
        }

        let golden = recorded
            .as_deref()
            .and_then(Golden::parse)
            .unwrap_or_else(|| panic!("malformed golden file {golden_path:?}"));
        assert_eq!(
            golden.input, input,
            "{golden_path:?} was recorded for another input; run `BLESS=1 cargo test {test_name}`"
        );
        assert_eq!(
            normalize_output(&golden.output),
            normalize_output(&actual),
            "golden mismatch for {case:?}; to update: `BLESS=1 cargo test {test_name}`"
        );
    }
}

// Only trailing whitespace per line is normalized; rendered texts are fenced with `|`.
fn normalize_output(s: &str) -> String {
    s.lines().map(|line| format!("{}\n", line.trim_end())).collect()
}
