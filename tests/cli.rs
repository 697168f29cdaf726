use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn varcart(home: &Path) -> Command {
    let mut cmd = Command::cargo_bin("varcart").unwrap();
    cmd.env("VARCART_HOME", home).env_remove("VARCART_LOG");
    cmd
}

fn seed_catalog(home: &Path) {
    for ty in ["Size", "Color"] {
        varcart(home)
            .args(["catalog", "add-type", ty])
            .assert()
            .success();
    }
    for size in ["S", "M"] {
        varcart(home)
            .args(["catalog", "add-value", "Size", size])
            .assert()
            .success();
    }
    for color in ["Red", "Blue", "Green"] {
        varcart(home)
            .args(["catalog", "add-value", "Color", color])
            .assert()
            .success();
    }
}

fn create_product(home: &Path, title: &str) -> String {
    let output = varcart(home)
        .args(["--json", "product", "new", title])
        .output()
        .unwrap();
    assert!(output.status.success());

    let output = varcart(home)
        .args(["--json", "product", "list"])
        .output()
        .unwrap();
    let products: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    products
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["title"] == title)
        .unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string()
}

#[test]
fn test_generate_preview_table() {
    let temp_dir = tempfile::tempdir().unwrap();
    varcart(temp_dir.path())
        .args(["generate", "--select", "Size=S,M", "--select", "Color=Red,Blue"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Size"))
        .stdout(predicate::str::contains("Color"))
        .stdout(predicate::str::contains("Blue"))
        .stdout(predicate::str::contains("0.00"));

    // Previews never touch the store.
    assert!(!temp_dir.path().join("products.json").exists());
}

#[test]
fn test_generate_with_empty_factor() {
    let temp_dir = tempfile::tempdir().unwrap();
    varcart(temp_dir.path())
        .args(["generate", "--select", "Size=S,M", "--select", "Color="])
        .assert()
        .success()
        .stdout(predicate::str::contains("No rows yet."));
}

#[test]
fn test_generate_json_rows() {
    let temp_dir = tempfile::tempdir().unwrap();
    let output = varcart(temp_dir.path())
        .args(["--json", "generate", "--select", "Size=S,M", "--select", "Color=Red"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rows = rows.as_array().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1]["key"], 2);
    assert_eq!(rows[1]["Size"], "M");
    assert_eq!(rows[1]["Color"], "Red");
    assert_eq!(rows[1]["stock"], 0);
}

#[test]
fn test_catalog_management() {
    let temp_dir = tempfile::tempdir().unwrap();
    seed_catalog(temp_dir.path());

    varcart(temp_dir.path())
        .args(["catalog", "add-type", "size"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    varcart(temp_dir.path())
        .args(["catalog", "disable", "Color", "Green"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Color/Green disabled"));

    varcart(temp_dir.path())
        .args(["catalog", "list", "--search", "inactive"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Green"))
        .stdout(predicate::str::contains("Blue").not());
}

#[test]
fn test_product_edit_and_show() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed_catalog(home);
    let id = create_product(home, "Linen Shirt");

    varcart(home)
        .args([
            "product",
            "edit",
            &id,
            "--types",
            "Size,Color",
            "--values",
            "Size=S,M",
            "--values",
            "Color=Red,Blue",
            "--set",
            "3:stock=15",
            "--set",
            "3:price=19.5",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 4 variant(s)"));

    // Adding a color keeps the M/Red inventory.
    varcart(home)
        .args(["product", "edit", &id, "--values", "Color=Red,Blue,Green"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved 6 variant(s)"));

    let output = varcart(home)
        .args(["--json", "product", "show", &id])
        .output()
        .unwrap();
    let product: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let variants = product["variations"][0]["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 6);
    let m_red = variants
        .iter()
        .find(|v| {
            v["data"][0]["value"] == "M" && v["data"][1]["value"] == "Red"
        })
        .unwrap();
    assert_eq!(m_red["stock"], 15);
    assert_eq!(m_red["price"], 19.5);
    assert_eq!(m_red["data"][0]["label"], "Size");
}

#[test]
fn test_edit_rejects_inactive_value() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    seed_catalog(home);
    let id = create_product(home, "Hat");

    varcart(home)
        .args(["catalog", "disable", "Color", "Green"])
        .assert()
        .success();

    varcart(home)
        .args([
            "product",
            "edit",
            &id,
            "--types",
            "Color",
            "--values",
            "Color=Green",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("inactive"));
}

#[test]
fn test_edit_unknown_product() {
    let temp_dir = tempfile::tempdir().unwrap();
    varcart(temp_dir.path())
        .args([
            "product",
            "edit",
            "0b5a6ad0-9a41-4a43-9a37-3c5b8d2f8e11",
            "--types",
            "Size",
        ])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found"));
}

#[test]
fn test_show_empty_product() {
    let temp_dir = tempfile::tempdir().unwrap();
    let id = create_product(temp_dir.path(), "Blank");
    varcart(temp_dir.path())
        .args(["product", "show", &id])
        .assert()
        .success()
        .stdout(predicate::str::contains("Blank"))
        .stdout(predicate::str::contains("No rows yet."));
}

#[test]
fn test_config_roundtrip() {
    let temp_dir = tempfile::tempdir().unwrap();
    varcart(temp_dir.path())
        .args(["config", "inactive-values", "drop"])
        .assert()
        .success()
        .stdout(predicate::str::contains("inactive-values set to drop"));

    varcart(temp_dir.path())
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("inactive-values = drop"))
        .stdout(predicate::str::contains("output = table"));
}

#[test]
fn test_dir_flag_overrides_home() {
    let home = tempfile::tempdir().unwrap();
    let other = tempfile::tempdir().unwrap();
    varcart(home.path())
        .args(["--dir", other.path().to_str().unwrap(), "catalog", "add-type", "Size"])
        .assert()
        .success();

    assert!(other.path().join("catalog.json").exists());
    assert!(!home.path().join("catalog.json").exists());
}

#[test]
fn test_product_delete() {
    let temp_dir = tempfile::tempdir().unwrap();
    let home = temp_dir.path();
    let keep = create_product(home, "Hat");
    let gone = create_product(home, "Scarf");

    varcart(home)
        .args(["product", "delete", &gone])
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted product: Scarf"));

    varcart(home)
        .args(["product", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains(keep.as_str()))
        .stdout(predicate::str::contains("Scarf").not());

    varcart(home)
        .args(["product", "rm", &gone])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Product not found"));
}

#[test]
fn test_generate_rejects_repeated_type() {
    let temp_dir = tempfile::tempdir().unwrap();
    varcart(temp_dir.path())
        .args(["generate", "--select", "Size=S,M", "--select", "Size=L"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("given more than once: Size"));
}

#[test]
fn test_row_field_names_are_not_attribute_types() {
    let temp_dir = tempfile::tempdir().unwrap();
    varcart(temp_dir.path())
        .args(["catalog", "add-type", "Price"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved"));

    varcart(temp_dir.path())
        .args(["generate", "--select", "stock=Low"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("reserved"));
}
