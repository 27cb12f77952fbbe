use anyhow::Result;

use crate::CliTest;

#[test]
fn test_detect_file_based() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", "{}")?;
    test.write_file("locales/fr.json", "{}")?;
    test.write_file("locales/zh_hant_tw.json", "{}")?;
    test.write_file("locales/README.md", "")?;

    let output = test.detect_command().arg("locales/en.json").output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "Source: locales/en.json (en, file-based)\n\
         Targets:\n\
         \x20 fr          locales/fr.json (update)\n\
         \x20 zh-Hant-TW  locales/zh-Hant-TW.json\n"
    );

    Ok(())
}

#[test]
fn test_detect_shopify_theme() -> Result<()> {
    let test = CliTest::with_file("locales/en.default.schema.json", "{}")?;
    test.write_file("locales/de.schema.json", "{}")?;
    test.write_file("locales/de.json", "{}")?;

    let output = test
        .detect_command()
        .arg("locales/en.default.schema.json")
        .output()?;

    let stdout = String::from_utf8(output.stdout)?;
    assert!(output.status.success());
    assert!(stdout.contains("(en, shopify-theme)"));
    assert!(stdout.contains("de  locales/de.schema.json (update)"));
    assert!(!stdout.contains("locales/de.json"));

    Ok(())
}

#[test]
fn test_detect_declared_layout_mismatch() -> Result<()> {
    let test = CliTest::with_file("locales/en.json", "{}")?;

    let output = test
        .detect_command()
        .args(["locales/en.json", "--layout", "arb-file-based"])
        .output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8(output.stderr)?.contains("does not follow the arb-file-based layout"));

    Ok(())
}

#[test]
fn test_detect_nothing_found() -> Result<()> {
    let test = CliTest::with_file("i18n/en/app.json", "{}")?;

    let output = test.detect_command().arg("i18n/en/app.json").output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8(output.stderr)?.contains("no target languages found"));

    Ok(())
}

#[test]
fn test_detect_folder_based_with_tag_like_file_names() -> Result<()> {
    let test = CliTest::with_file("locales/en/ui.json", "{}")?;
    test.write_file("locales/en/app.json", "{}")?;
    test.write_file("locales/es/ui.json", "{}")?;
    test.write_file("locales/fr/app.json", "{}")?;

    let output = test.detect_command().arg("locales/en/ui.json").output()?;

    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout)?,
        "Source: locales/en/ui.json (en, folder-based)\n\
         Targets:\n\
         \x20 es  locales/es/ui.json (update)\n"
    );

    Ok(())
}
