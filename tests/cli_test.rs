use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;

#[test]
fn test_help_lists_options() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("policy-pay"));
    cmd.arg("--help");

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--bind"))
        .stdout(predicate::str::contains("--minimum-fee"))
        .stdout(predicate::str::contains("--fee-rate"))
        .stdout(predicate::str::contains("--tax-rate"))
        .stdout(predicate::str::contains("--log-json"));

    Ok(())
}

#[test]
fn test_negative_tax_rate_refuses_to_start() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("policy-pay"));
    cmd.args(["--bind", "127.0.0.1:0", "--tax-rate=-0.01"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("tax rate must not be negative"));

    Ok(())
}

#[test]
fn test_invalid_bind_address_rejected() -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = Command::new(cargo_bin!("policy-pay"));
    cmd.args(["--bind", "not-an-address"]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("--bind"));

    Ok(())
}
