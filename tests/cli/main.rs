use std::{
    fs,
    path::{Path, PathBuf},
    process::Command,
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use serde_json::{Value, json};
use tempfile::TempDir;
use tokio::runtime::Runtime;
use wiremock::{
    Mock, MockServer, Request, Respond, ResponseTemplate,
    matchers::{body_partial_json, header, method, path},
};

mod detect;
mod init;
mod translate;

const BIN_NAME: &str = "lingo";

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    pub fn with_file(path: &str, content: &str) -> Result<Self> {
        let test = Self::new()?;
        test.write_file(path, content)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn translate_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("translate");
        cmd
    }

    pub fn detect_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("detect");
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

/// Local translation API that answers every request by prefixing each text
/// with `[<target language>] `.
///
/// Requests for a language listed in `failing` get a 500 response.
pub struct StubApi {
    uri: String,
    _server: MockServer,
    _runtime: Runtime,
}

impl StubApi {
    pub fn start(failing: &[&str]) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let server = runtime.block_on(async {
            let server = MockServer::start().await;
            for language in failing {
                Mock::given(method("POST"))
                    .and(path("/translate"))
                    .and(body_partial_json(json!({ "targetLanguage": language })))
                    .respond_with(
                        ResponseTemplate::new(500)
                            .set_body_json(json!({ "error": "engine unavailable" })),
                    )
                    .with_priority(1)
                    .mount(&server)
                    .await;
            }
            Mock::given(method("POST"))
                .and(path("/translate"))
                .and(header("Authorization", "Bearer test-key"))
                .respond_with(EchoUnits)
                .mount(&server)
                .await;
            server
        });

        Ok(Self {
            uri: server.uri(),
            _server: server,
            _runtime: runtime,
        })
    }

    pub fn url(&self) -> &str {
        &self.uri
    }
}

struct EchoUnits;

impl Respond for EchoUnits {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let Some(body) = request.body_json::<Value>().ok() else {
            return ResponseTemplate::new(400);
        };

        let target = body["targetLanguage"].as_str().unwrap_or_default();
        let units: Vec<Value> = body["units"]
            .as_array()
            .map(Vec::as_slice)
            .unwrap_or_default()
            .iter()
            .map(|unit| {
                json!({
                    "key": unit["key"],
                    "text": format!("[{}] {}", target, unit["text"].as_str().unwrap_or_default()),
                })
            })
            .collect();
        let count = units.len();

        ResponseTemplate::new(200).set_body_json(json!({
            "units": units,
            "usage": { "inputUnits": count, "outputUnits": count, "characters": 0 },
            "finishReason": "completed",
        }))
    }
}
