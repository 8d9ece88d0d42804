use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, run};

#[test]
fn test_resolve_tokens_and_bare_keys() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.resolve_command();
    cmd.args(["${service.name}", "pipeline.variables.foo", "unknown.key"]);

    assert_cmd_snapshot!(cmd, @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌─────────────────────────────────────────────────────────────────┐
    │ Equivalent Expressions                                          │
    ├────────────────────────┬────────────┬───────────────────────────┤
    │ First Gen              │ Supported? │ Next Gen                  │
    ├────────────────────────┼────────────┼───────────────────────────┤
    │ ${service.name}        │ Yes        │ <+service.name>           │
    │ pipeline.variables.foo │ Yes        │ <+pipeline.variables.foo> │
    │ unknown.key            │ No         │                           │
    └────────────────────────┴────────────┴───────────────────────────┘

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_resolve_secret_with_org_scope() -> Result<()> {
    let test = CliTest::new()?;

    let mut cmd = test.resolve_command();
    cmd.args([r#"${secrets.getValue("Db Password")}"#, "--secret-scope", "org"]);

    assert_cmd_snapshot!(cmd, @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ┌─────────────────────────────────────────────────────────────────────────────────────────┐
    │ Equivalent Expressions                                                                  │
    ├────────────────────────────────────┬────────────┬───────────────────────────────────────┤
    │ First Gen                          │ Supported? │ Next Gen                              │
    ├────────────────────────────────────┼────────────┼───────────────────────────────────────┤
    │ ${secrets.getValue("Db Password")} │ Yes        │ <+secrets.getValue("Org.dbPassword")> │
    └────────────────────────────────────┴────────────┴───────────────────────────────────────┘

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_resolve_requires_expressions() -> Result<()> {
    let test = CliTest::new()?;

    let output = run(test.resolve_command())?;

    // clap usage errors exit with 2
    assert_eq!(output.code, Some(2));
    Ok(())
}
