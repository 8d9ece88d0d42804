use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

const DEPLOY_YAML: &str = r#"service: ${service.name}
namespace: ${infra.kubernetes.namespace}
tag: ${pipeline.variables.tag}
missing: ${unknown.key}
"#;

#[test]
fn test_translate_replaces_supported_expressions() -> Result<()> {
    let test = CliTest::with_file("deploy/app.yaml", DEPLOY_YAML)?;

    assert_cmd_snapshot!(test.translate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────────────────────────────────────────────────────────────────────┐
    │ Equivalent Expressions                                                 │
    ├───────────────────────────────┬────────────┬───────────────────────────┤
    │ First Gen                     │ Supported? │ Next Gen                  │
    ├───────────────────────────────┼────────────┼───────────────────────────┤
    │ ${infra.kubernetes.namespace} │ Yes        │ <+infra.namespace>        │
    │ ${pipeline.variables.tag}     │ Yes        │ <+pipeline.variables.tag> │
    │ ${service.name}               │ Yes        │ <+service.name>           │
    │ ${unknown.key}                │ No         │                           │
    └───────────────────────────────┴────────────┴───────────────────────────┘
    ┌─────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
    │ Files containing expressions                                                                                │
    ├─────────────────┬───────────────────────────────────────────────────────────────────────────────────────────┤
    │ File            │ Expressions                                                                               │
    ├─────────────────┼───────────────────────────────────────────────────────────────────────────────────────────┤
    │ deploy/app.yaml │ ${service.name}, ${infra.kubernetes.namespace}, ${pipeline.variables.tag}, ${unknown.key} │
    └─────────────────┴───────────────────────────────────────────────────────────────────────────────────────────┘
    ┌──────────────────────────────────┐
    │ Expressions not replaced         │
    ├─────────────────┬────────────────┤
    │ File            │ Expressions    │
    ├─────────────────┼────────────────┤
    │ deploy/app.yaml │ ${unknown.key} │
    └─────────────────┴────────────────┘
    ✓ Replaced expressions in 1 file
    ✘ 1 expression could not be replaced

    ----- stderr -----
    ");

    assert_eq!(
        test.read_file("deploy/app.yaml")?,
        r#"service: <+service.name>
namespace: <+infra.namespace>
tag: <+pipeline.variables.tag>
missing: ${unknown.key}
"#
    );
    Ok(())
}

#[test]
fn test_translate_dry_run_leaves_files_untouched() -> Result<()> {
    let test = CliTest::with_file("deploy/app.yaml", DEPLOY_YAML)?;

    assert_cmd_snapshot!(test.translate_command().arg("--dry-run"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────────────────────────────────────────────────────────────────────┐
    │ Equivalent Expressions                                                 │
    ├───────────────────────────────┬────────────┬───────────────────────────┤
    │ First Gen                     │ Supported? │ Next Gen                  │
    ├───────────────────────────────┼────────────┼───────────────────────────┤
    │ ${infra.kubernetes.namespace} │ Yes        │ <+infra.namespace>        │
    │ ${pipeline.variables.tag}     │ Yes        │ <+pipeline.variables.tag> │
    │ ${service.name}               │ Yes        │ <+service.name>           │
    │ ${unknown.key}                │ No         │                           │
    └───────────────────────────────┴────────────┴───────────────────────────┘
    ┌─────────────────────────────────────────────────────────────────────────────────────────────────────────────┐
    │ Files containing expressions                                                                                │
    ├─────────────────┬───────────────────────────────────────────────────────────────────────────────────────────┤
    │ File            │ Expressions                                                                               │
    ├─────────────────┼───────────────────────────────────────────────────────────────────────────────────────────┤
    │ deploy/app.yaml │ ${service.name}, ${infra.kubernetes.namespace}, ${pipeline.variables.tag}, ${unknown.key} │
    └─────────────────┴───────────────────────────────────────────────────────────────────────────────────────────┘
    note: Dry run: skipped replacement in 1 file

    ----- stderr -----
    ");

    assert_eq!(test.read_file("deploy/app.yaml")?, DEPLOY_YAML);
    Ok(())
}

#[test]
fn test_translate_dry_run_from_config() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "${env.name}\n")?;
    test.write_file(".exprmigrc.json", r#"{ "dryRun": true }"#)?;

    let output = run(test.translate_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(test.read_file("app.yaml")?, "${env.name}\n");
    Ok(())
}

#[test]
fn test_translate_no_expressions() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "key: value\n")?;

    assert_cmd_snapshot!(test.translate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Scanned 1 file - no files found containing expressions

    ----- stderr -----
    ");

    assert_eq!(test.read_file("app.yaml")?, "key: value\n");
    Ok(())
}

#[test]
fn test_translate_twice_is_idempotent() -> Result<()> {
    let test = CliTest::with_file("deploy/app.yaml", DEPLOY_YAML)?;

    run(test.translate_command())?;
    let first = test.read_file("deploy/app.yaml")?;

    // Only the unresolved expression is still found
    assert_cmd_snapshot!(test.translate_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌────────────────────────────────────────┐
    │ Equivalent Expressions                 │
    ├────────────────┬────────────┬──────────┤
    │ First Gen      │ Supported? │ Next Gen │
    ├────────────────┼────────────┼──────────┤
    │ ${unknown.key} │ No         │          │
    └────────────────┴────────────┴──────────┘
    ┌──────────────────────────────────┐
    │ Files containing expressions     │
    ├─────────────────┬────────────────┤
    │ File            │ Expressions    │
    ├─────────────────┼────────────────┤
    │ deploy/app.yaml │ ${unknown.key} │
    └─────────────────┴────────────────┘
    ┌──────────────────────────────────┐
    │ Expressions not replaced         │
    ├─────────────────┬────────────────┤
    │ File            │ Expressions    │
    ├─────────────────┼────────────────┤
    │ deploy/app.yaml │ ${unknown.key} │
    └─────────────────┴────────────────┘
    ✓ Replaced expressions in 0 files
    ✘ 1 expression could not be replaced

    ----- stderr -----
    ");

    assert_eq!(test.read_file("deploy/app.yaml")?, first);
    Ok(())
}

#[test]
fn test_translate_secret_scope_flag() -> Result<()> {
    let test = CliTest::with_file(
        "run.sh",
        r#"curl -H "token: ${secrets.getValue("My Key")}""#,
    )?;

    let mut cmd = test.translate_command();
    cmd.args(["--file-extensions", "sh", "--secret-scope", "account"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_file("run.sh")?,
        r#"curl -H "token: <+secrets.getValue("Account.myKey")>""#
    );
    Ok(())
}

#[test]
fn test_translate_field_prefix_without_dot() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "a: ${app.defaultsX}\nb: ${serviceVariablesFoo}\n")?;

    let output = run(test.translate_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_file("app.yaml")?,
        "a: <+variable.app.defaultsX>\nb: <+serviceVariables.serviceVariablesFoo>\n"
    );
    assert!(!output.stdout.contains("Expressions not replaced"));
    Ok(())
}

#[test]
fn test_translate_only_matching_extensions() -> Result<()> {
    let test = CliTest::with_file("run.sh", "echo ${env.name}\n")?;
    test.write_file("values.yaml", "env: ${env.name}\n")?;

    let mut cmd = test.translate_command();
    cmd.args(["--file-extensions", "sh"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(test.read_file("run.sh")?, "echo <+env.name>\n");
    assert_eq!(test.read_file("values.yaml")?, "env: ${env.name}\n");
    Ok(())
}

#[test]
fn test_translate_source_root_flag() -> Result<()> {
    let test = CliTest::with_file("pipelines/app.yaml", "${app.name}\n")?;
    test.write_file("other/app.yaml", "${app.name}\n")?;

    let mut cmd = test.translate_command();
    cmd.args(["--source-root", "pipelines"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(test.read_file("pipelines/app.yaml")?, "<+project.name>\n");
    assert_eq!(test.read_file("other/app.yaml")?, "${app.name}\n");
    Ok(())
}

#[test]
fn test_translate_ignores_from_config() -> Result<()> {
    let test = CliTest::with_file("vendor/chart.yaml", "${env.name}\n")?;
    test.write_file("app.yaml", "${env.name}\n")?;
    test.write_file(".exprmigrc.json", r#"{ "ignores": ["vendor/**"] }"#)?;

    let output = run(test.translate_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(test.read_file("app.yaml")?, "<+env.name>\n");
    assert_eq!(test.read_file("vendor/chart.yaml")?, "${env.name}\n");
    Ok(())
}

#[test]
fn test_translate_custom_expressions_override_builtin() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "name: ${service.name}\nid: ${custom.id}\n")?;
    test.write_file(
        "custom.yaml",
        "service.name: \"X\"\ncustom.id: \"<+pipeline.sequenceId>\"\n",
    )?;
    test.write_file(
        ".exprmigrc.json",
        r#"{ "customExpressionsFile": "custom.yaml" }"#,
    )?;

    let output = run(test.translate_command())?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert_eq!(
        test.read_file("app.yaml")?,
        "name: X\nid: <+pipeline.sequenceId>\n"
    );
    Ok(())
}

#[test]
fn test_translate_malformed_custom_expressions_is_fatal() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "${service.name}\n")?;
    test.write_file("custom.yaml", "- not\n- a mapping\n")?;

    let mut cmd = test.translate_command();
    cmd.args(["--custom-expressions", "custom.yaml"]);
    let output = run(cmd)?;

    assert_eq!(output.code, Some(2));
    assert!(
        output
            .stderr
            .contains("malformed custom expressions file"),
        "stderr: {}",
        output.stderr
    );
    assert_eq!(test.read_file("app.yaml")?, "${service.name}\n");
    Ok(())
}

#[test]
fn test_translate_fail_on_unresolved() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "${unknown.key} ${env.name}\n")?;

    assert_cmd_snapshot!(test.translate_command().arg("--fail-on-unresolved"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    ┌───────────────────────────────────────────┐
    │ Equivalent Expressions                    │
    ├────────────────┬────────────┬─────────────┤
    │ First Gen      │ Supported? │ Next Gen    │
    ├────────────────┼────────────┼─────────────┤
    │ ${env.name}    │ Yes        │ <+env.name> │
    │ ${unknown.key} │ No         │             │
    └────────────────┴────────────┴─────────────┘
    ┌────────────────────────────────────────┐
    │ Files containing expressions           │
    ├──────────┬─────────────────────────────┤
    │ File     │ Expressions                 │
    ├──────────┼─────────────────────────────┤
    │ app.yaml │ ${unknown.key}, ${env.name} │
    └──────────┴─────────────────────────────┘
    ┌───────────────────────────┐
    │ Expressions not replaced  │
    ├──────────┬────────────────┤
    │ File     │ Expressions    │
    ├──────────┼────────────────┤
    │ app.yaml │ ${unknown.key} │
    └──────────┴────────────────┘
    ✓ Replaced expressions in 1 file
    ✘ 1 expression could not be replaced

    ----- stderr -----
    ");

    assert_eq!(test.read_file("app.yaml")?, "${unknown.key} <+env.name>\n");
    Ok(())
}

#[test]
fn test_translate_invalid_config_is_error() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "${env.name}\n")?;
    test.write_file(".exprmigrc.json", r#"{ "secretScope": "galaxy" }"#)?;

    let _guard = test.snapshot_settings().bind_to_scope();
    assert_cmd_snapshot!(test.translate_command(), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to parse config file: "[TEMP_DIR]/.exprmigrc.json": unknown variant `galaxy`, expected one of `none`, `account`, `org`
    "#);

    assert_eq!(test.read_file("app.yaml")?, "${env.name}\n");
    Ok(())
}

#[test]
fn test_translate_logs_to_stderr() -> Result<()> {
    let test = CliTest::with_file("app.yaml", "${env.name}\n")?;

    let mut cmd = test.translate_command();
    cmd.env("EXPRMIG_LOG", "info");
    let output = run(cmd)?;

    assert_eq!(output.code, Some(0), "stderr: {}", output.stderr);
    assert!(output.stderr.contains("Replaced expressions in"));
    assert!(!output.stdout.contains("INFO"));
    Ok(())
}
