/*!
 * valkit self-test program
 *
 * Runs the shared compatibility vectors and a short filesystem scenario
 * against the library, prints a colored report and exits non-zero when any
 * check fails. A JSON summary is written when `VALKIT_RESULTS_DIR` is set.
 *
 * Environment:
 * - `VALKIT_VECTORS`: path of an alternative vector file
 * - `VALKIT_RESULTS_DIR`: directory receiving `rust-results.json`
 * - `RUST_LOG`: log filter for the library's tracing output
 */

#![warn(clippy::all, clippy::pedantic)]
#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::Utc;
use colored::Colorize;
use serde::Serialize;
use serde_json::Value;
use tracing_subscriber::EnvFilter;

use valkit::{
    base64_decode_lazy, convert_utf8_to_ascii, create_directory_if_not_exists, get_json_value,
    get_valid_bool, get_valid_int_range, get_valid_num_range, get_valid_tokens, is_dir, is_file,
    mkdir_sync_recursively, test_email, test_number, test_sha2, test_uuid, ModulePaths,
};

const VECTORS_ENV: &str = "VALKIT_VECTORS";
const RESULTS_DIR_ENV: &str = "VALKIT_RESULTS_DIR";

// Embedded vectors keep the binary self-contained
const DEFAULT_VECTORS_JSON: &str = include_str!("../../tests/fixtures/compat-vectors.json");

/* Report structures */
#[derive(Debug, Serialize)]
struct SectionResult {
    name: String,
    passed: bool,
    total: usize,
    failures: Vec<String>,
}

#[derive(Debug, Serialize)]
struct SelfTestResults {
    library: String,
    version: String,
    timestamp: String,
    sections: Vec<SectionResult>,
    passed: bool,
}

/* Logger */
struct Logger;

impl Logger {
    fn banner(msg: &str) {
        println!("{}", "═══════════════════════════════════════════".blue());
        println!("{}", msg.blue().bold());
        println!("{}", "═══════════════════════════════════════════".blue());
    }

    fn section(section: &SectionResult) {
        let status = if section.passed {
            "PASS".green().bold()
        } else {
            "FAIL".red().bold()
        };
        println!("  {}: {} ({} checks)", status, section.name, section.total);
        for failure in &section.failures {
            println!("    {}", failure.red());
        }
    }
}

/// Collects the outcome of the checks in one section
struct Section {
    name: &'static str,
    total: usize,
    failures: Vec<String>,
}

impl Section {
    const fn new(name: &'static str) -> Self {
        Self {
            name,
            total: 0,
            failures: Vec::new(),
        }
    }

    fn check<T: PartialEq + std::fmt::Debug>(&mut self, case: &str, actual: T, expected: T) {
        self.total += 1;
        if actual != expected {
            self.failures
                .push(format!("{case}: expected {expected:?}, got {actual:?}"));
        }
    }

    fn finish(self) -> SectionResult {
        SectionResult {
            name: self.name.to_string(),
            passed: self.failures.is_empty(),
            total: self.total,
            failures: self.failures,
        }
    }
}

fn load_vectors() -> Result<Value> {
    match std::env::var(VECTORS_ENV) {
        Ok(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Cannot open vector file: {path}"))?;
            serde_json::from_str(&content).with_context(|| format!("Failed to parse {path}"))
        }
        Err(_) => serde_json::from_str(DEFAULT_VECTORS_JSON)
            .context("Failed to parse embedded vectors"),
    }
}

fn cases<'a>(vectors: &'a Value, section: &str) -> &'a [Value] {
    vectors[section]
        .as_array()
        .map(Vec::as_slice)
        .unwrap_or_default()
}

fn case_name(case: &Value) -> &str {
    case["name"].as_str().unwrap_or("unnamed")
}

fn run_validators(vectors: &Value) -> SectionResult {
    let mut section = Section::new("validators");
    for case in cases(vectors, "validators") {
        let input = &case["input"];
        let actual = match case["validator"].as_str().unwrap_or_default() {
            "number" => test_number(input),
            "sha2" => test_sha2(input),
            "uuid" => test_uuid(input),
            "email" => test_email(input),
            other => {
                section.total += 1;
                section
                    .failures
                    .push(format!("{}: unknown validator '{other}'", case_name(case)));
                continue;
            }
        };
        section.check(case_name(case), actual, case["expected"].as_bool() == Some(true));
    }
    section.finish()
}

fn run_transliteration(vectors: &Value) -> SectionResult {
    let mut section = Section::new("transliteration");
    for case in cases(vectors, "transliteration") {
        let actual = convert_utf8_to_ascii(case["input"].as_str().unwrap_or_default(), None);
        section.check(
            case_name(case),
            actual.as_str(),
            case["expected"].as_str().unwrap_or_default(),
        );
    }
    section.finish()
}

fn run_integers(vectors: &Value) -> SectionResult {
    let mut section = Section::new("integers");
    for case in cases(vectors, "integers") {
        let default = case["default"].as_i64().unwrap_or_default();
        let actual = get_valid_int_range(
            &case["input"],
            case["min"].clone(),
            case["max"].clone(),
            default,
        );
        section.check(case_name(case), Some(actual), case["expected"].as_i64());
    }
    section.finish()
}

fn run_numbers(vectors: &Value) -> SectionResult {
    let mut section = Section::new("numbers");
    for case in cases(vectors, "numbers") {
        let default = case["default"].as_f64().unwrap_or_default();
        let actual = get_valid_num_range(
            &case["input"],
            case["min"].clone(),
            case["max"].clone(),
            default,
        );
        section.check(case_name(case), Some(actual), case["expected"].as_f64());
    }
    section.finish()
}

fn run_booleans(vectors: &Value) -> SectionResult {
    let mut section = Section::new("booleans");
    for case in cases(vectors, "booleans") {
        let default = case["default"].as_bool().unwrap_or_default();
        section.check(
            case_name(case),
            get_valid_bool(&case["input"], default),
            case["expected"].as_bool().unwrap_or_default(),
        );
    }
    section.finish()
}

fn run_tokens(vectors: &Value) -> SectionResult {
    let mut section = Section::new("tokens");
    for case in cases(vectors, "tokens") {
        let expected: Vec<String> = cases(case, "expected")
            .iter()
            .filter_map(|token| token.as_str().map(str::to_string))
            .collect();
        section.check(
            case_name(case),
            get_valid_tokens(&case["input"], Vec::<String>::new()),
            expected,
        );
    }
    section.finish()
}

fn run_base64(vectors: &Value) -> SectionResult {
    let mut section = Section::new("base64");
    for case in cases(vectors, "base64") {
        let input = case["input"].as_str().unwrap_or_default();
        section.check(
            case_name(case),
            base64_decode_lazy(input, None::<String>),
            case["expected"].as_str().map(str::to_string),
        );
    }
    section.finish()
}

fn run_json(vectors: &Value) -> SectionResult {
    let mut section = Section::new("json");
    for case in cases(vectors, "json") {
        section.check(
            case_name(case),
            get_json_value(&case["input"], Value::Null),
            case["expected"].clone(),
        );
    }
    section.finish()
}

/// Directory creation, existence checks and dependency lookup below `root`
fn run_filesystem(root: &Path) -> SectionResult {
    let mut section = Section::new("filesystem");

    let nested = root.join("a/b/c");
    section.check("mkdir nested", mkdir_sync_recursively(&nested, None).is_ok(), true);
    section.check("mkdir existing", mkdir_sync_recursively(&nested, None).is_ok(), true);
    section.check("is_dir nested", is_dir([&nested]), true);

    let file = root.join("a/file.txt");
    section.check("write file", fs::write(&file, "valkit").is_ok(), true);
    section.check("is_file", is_file([root, Path::new("a"), Path::new("file.txt")]), true);
    section.check("is_dir on file", is_dir([&file]), false);
    section.check("create below file", create_directory_if_not_exists(file.join("x"), None), false);

    let package = root.join("node_modules/demo-lib");
    section.check("install package", create_directory_if_not_exists(&package, None), true);
    let start = root.join("app/src");
    section.check("create app", create_directory_if_not_exists(&start, None), true);

    let paths = ModulePaths::new().with_start_dir(&start);
    section.check("find package", paths.find("demo-lib"), Some(package.clone()));
    section.check("find missing", paths.find("missing-lib"), None);
    section.check(
        "root path",
        paths.make_root_path("demo-lib", ["dist", "demo.min.js"]),
        package.join("dist/demo.min.js"),
    );
    section.check(
        "fallback path",
        paths.resolve("missing-lib", None),
        PathBuf::from("node_modules/missing-lib"),
    );

    section.finish()
}

struct SelfTestRunner {
    vectors: Value,
    results: SelfTestResults,
}

impl SelfTestRunner {
    fn new() -> Result<Self> {
        let vectors = load_vectors()?;
        let results = SelfTestResults {
            library: env!("CARGO_PKG_NAME").to_string(),
            version: valkit::VERSION.to_string(),
            timestamp: Utc::now().format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string(),
            sections: Vec::new(),
            passed: false,
        };
        Ok(Self { vectors, results })
    }

    fn run_all_tests(&mut self) -> Result<()> {
        Logger::banner("         valkit Self-Test Suite");

        let vectors = &self.vectors;
        let mut sections = vec![
            run_validators(vectors),
            run_transliteration(vectors),
            run_integers(vectors),
            run_numbers(vectors),
            run_booleans(vectors),
            run_tokens(vectors),
            run_base64(vectors),
            run_json(vectors),
        ];

        let scratch = std::env::temp_dir().join(format!("valkit-self-test-{}", std::process::id()));
        sections.push(run_filesystem(&scratch));
        if let Err(e) = fs::remove_dir_all(&scratch) {
            tracing::warn!("Could not remove {}: {}", scratch.display(), e);
        }

        for section in &sections {
            Logger::section(section);
        }

        self.results.passed = sections.iter().all(|s| s.passed);
        self.results.sections = sections;

        self.save_results()?;
        self.display_summary();
        Ok(())
    }

    fn save_results(&self) -> Result<()> {
        let Ok(results_dir) = std::env::var(RESULTS_DIR_ENV) else {
            return Ok(());
        };

        fs::create_dir_all(&results_dir)
            .with_context(|| format!("Failed to create results directory: {results_dir}"))?;
        let results_path = Path::new(&results_dir).join("rust-results.json");
        let json_output =
            serde_json::to_string_pretty(&self.results).context("Failed to serialize results")?;
        fs::write(&results_path, json_output)
            .with_context(|| format!("Cannot create results file: {}", results_path.display()))?;

        println!("\n{} {}", "Results saved to:".blue(), results_path.display());
        Ok(())
    }

    fn display_summary(&self) {
        let total = self.results.sections.len();
        let passed = self.results.sections.iter().filter(|s| s.passed).count();

        println!();
        println!("Library: {} v{}", self.results.library, self.results.version);
        println!("Timestamp: {}", self.results.timestamp);
        let summary = format!("Sections Passed: {passed}/{total}");
        if self.results.passed {
            println!("{}", summary.green().bold());
        } else {
            println!("{}", summary.red().bold());
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mut runner = SelfTestRunner::new().context("Failed to initialize test runner")?;
    runner.run_all_tests().context("Test execution failed")?;

    if !runner.results.passed {
        std::process::exit(1);
    }
    Ok(())
}
