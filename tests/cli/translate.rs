use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, StubApi};

const SOURCE: &str = r#"{
  "greeting": "Hello",
  "nav": {
    "home": "Home"
  }
}"#;

#[test]
fn test_translate_file_based() -> Result<()> {
    let api = StubApi::start(&[])?;
    let test = CliTest::with_file("locales/en.json", SOURCE)?;

    let output = test
        .translate_command()
        .args(["locales/en.json", "-l", "es,fr"])
        .args(["--api-url", api.url()])
        .env("LINGO_API_KEY", "test-key")
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("Source: locales/en.json (en, file-based)"));
    assert!(stdout.contains("es  locales/es.json  2 translated"));
    assert!(stdout.contains("Translated 2 language(s)"));

    assert_eq!(
        test.read_file("locales/es.json")?,
        "{\n  \"greeting\": \"[es] Hello\",\n  \"nav\": {\n    \"home\": \"[es] Home\"\n  }\n}\n"
    );
    assert!(test.read_file("locales/fr.json")?.contains("[fr] Hello"));

    Ok(())
}

#[test]
fn test_translate_detects_languages_from_folders() -> Result<()> {
    let api = StubApi::start(&[])?;
    let test = CliTest::with_file("locales/en/common.json", SOURCE)?;
    test.write_file("locales/de/common.json", "{}")?;
    test.write_file("locales/ja/other.json", "{}")?;

    let output = test
        .translate_command()
        .args(["locales/en/common.json", "--api-url", api.url()])
        .env("LINGO_API_KEY", "test-key")
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    // The existing German file is kept; the new one gets a disambiguator.
    assert_eq!(test.read_file("locales/de/common.json")?, "{}");
    assert!(test.read_file("locales/de/common (1).json")?.contains("[de] Hello"));
    // Directories without the source file name are not target languages.
    assert!(!test.root().join("locales/ja/common.json").exists());

    Ok(())
}

#[test]
fn test_translate_update_fills_missing_keys() -> Result<()> {
    let api = StubApi::start(&[])?;
    let test = CliTest::with_file("l10n/app_en.arb", r#"{
  "@@locale": "en",
  "title": "Title",
  "@title": { "description": "Page title" },
  "save": "Save"
}"#)?;
    test.write_file("l10n/app_pt_BR.arb", r#"{ "@@locale": "pt_BR", "title": "Título" }"#)?;

    let output = test
        .translate_command()
        .args(["l10n/app_en.arb", "--update", "--api-url", api.url()])
        .env("LINGO_API_KEY", "test-key")
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(stdout.contains("1 translated, 1 kept"));

    let updated: serde_json::Value = serde_json::from_str(&test.read_file("l10n/app_pt_BR.arb")?)?;
    assert_eq!(updated["@@locale"], "pt_BR");
    assert_eq!(updated["title"], "Título");
    assert_eq!(updated["save"], "[pt-BR] Save");
    assert_eq!(updated["@title"]["description"], "Page title");

    Ok(())
}

#[test]
fn test_translate_partial_failure_exits_one() -> Result<()> {
    let api = StubApi::start(&["fr"])?;
    let test = CliTest::with_file("en.json", SOURCE)?;

    let output = test
        .translate_command()
        .args(["en.json", "-l", "es,fr", "--api-url", api.url()])
        .env("LINGO_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(test.root().join("es.json").exists());
    assert!(!test.root().join("fr.json").exists());
    assert!(String::from_utf8(output.stderr)?.contains("error: fr:"));

    Ok(())
}

#[test]
fn test_translate_dry_run_writes_nothing() -> Result<()> {
    let test = CliTest::with_file("locales/en-US.json", SOURCE)?;
    test.write_file("locales/es.json", "{}")?;

    let output = test
        .translate_command()
        .args(["locales/en-US.json", "-l", "es,pt_br", "--dry-run"])
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(output.status.success());
    assert!(stdout.contains("Would write 2 file(s):"));
    assert!(stdout.contains("es     locales/es (1).json"));
    assert!(stdout.contains("pt-BR  locales/pt-BR.json"));
    assert!(!test.root().join("locales/pt-BR.json").exists());

    Ok(())
}

#[test]
fn test_translate_without_languages_exits_one() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", SOURCE)?;

    let output = test
        .translate_command()
        .args(["locales/en.json", "--api-url", "http://127.0.0.1:9"])
        .env("LINGO_API_KEY", "test-key")
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains("no target languages found"));

    Ok(())
}

#[test]
fn test_translate_invalid_language_is_error() -> Result<()> {
    let test = CliTest::with_file("en.json", SOURCE)?;

    let output = test
        .translate_command()
        .args(["en.json", "-l", "es,not a tag", "--dry-run"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Invalid target language(s): not a tag."));

    Ok(())
}

#[test]
fn test_translate_requires_api_key() -> Result<()> {
    let test = CliTest::with_file("en.json", SOURCE)?;

    let output = test
        .translate_command()
        .args(["en.json", "-l", "es", "--api-url", "http://127.0.0.1:9"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("No API key provided."));

    Ok(())
}

#[test]
fn test_translate_uses_config_file() -> Result<()> {
    let api = StubApi::start(&[])?;
    let test = CliTest::with_file("messages/en.jsonc", "{\n  // greeting\n  \"hi\": \"Hi\",\n}")?;
    test.write_file(
        ".lingorc.json",
        &format!(
            r#"{{ "targetLanguages": ["it"], "apiUrl": "{}", "concurrency": 1 }}"#,
            api.url()
        ),
    )?;

    let output = test
        .translate_command()
        .arg("messages/en.jsonc")
        .env("LINGO_API_KEY", "test-key")
        .output()?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(test.read_file("messages/it.jsonc")?, "{\n  \"hi\": \"[it] Hi\"\n}\n");

    Ok(())
}

#[test]
fn test_translate_missing_source_is_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.translate_command().args(["en.json", "-l", "es"]).output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("Source file 'en.json' does not exist."));

    Ok(())
}
