use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const INVOICE: &str = "\
PROCOQUIM S.A.S NIT 900.123.456-7
FACTURA ELECTRÓNICA DE VENTA No. PCQP 4521
Fecha Generación 01/03/2024 Fecha Expedición 02/03/2024 Fecha Vencimiento 01/04/2024
Señores LAVANDERIA LA ESPAÑOLA
(601) 555 0101
Item Descripción Unidad Cantidad Valor Unitario Valor Bruto IVA Valor Total
1 ACIDO ACETICO X 20 KG Kilogramo 20 12,000.00 240,000.00 19 % 285,600.00
2 HIPOCLORITO DE SODIO AL 15% Litro 100 1,500.50 150,050.00 19 % 178,559.50
3 TAMBOR PLASTICO 220 L Unidad 2 35,000.00 70,000.00 19 % 83,300.00
4 PEROXIDO DE HIDROGENO Litro 10 5,000.00 50,000.00 19 % 59,500.00
Total Bruto 510,050.00
IVA 19% 96,909.50
Total a Pagar 606,959.50
";

const PRICE_LIST: &str = "\
🛍️ PRODUCTOS,💰 PRECIO BASE,PROVEEDOR
ACIDO ACETICO TECNICO,10000,PROCOQUIM
HIPOCLORITO DE SODIO AL 13%,1400,PROCOQUIM
SODA CAUSTICA,4500,OTRO
";

fn pricesync() -> Command {
    Command::cargo_bin("pricesync").unwrap()
}

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

/// Config file inside the temp dir so tests never touch the user's config.
fn config_arg(dir: &TempDir) -> String {
    dir.path().join("config.json").display().to_string()
}

#[test]
fn parse_text_summary() {
    let dir = TempDir::new().unwrap();
    let invoice = write(&dir, "factura.txt", INVOICE);

    pricesync()
        .args(["parse", "-f", "text"])
        .arg(&invoice)
        .assert()
        .success()
        .stdout(predicate::str::contains("Invoice: 4521"))
        .stdout(predicate::str::contains("LAVANDERIA LA ESPAÑOLA"))
        .stdout(predicate::str::contains("HIPOCLORITO DE SODIO AL 13%"))
        .stdout(predicate::str::contains("chemical: 3, packaging: 1, corrected: 1"))
        .stdout(predicate::str::contains("Total: $ 606.959,50"));
}

#[test]
fn parse_json_output_file() {
    let dir = TempDir::new().unwrap();
    let invoice = write(&dir, "factura.txt", INVOICE);
    let output = dir.path().join("factura.json");

    pricesync()
        .arg("parse")
        .arg(&invoice)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Output written to"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["invoice_number"], "4521");
    assert_eq!(json["supplier"], "PROCOQUIM S.A.S");
    assert_eq!(json["item_count"], 4);
    assert_eq!(json["line_items"][1]["was_name_corrected"], true);
}

#[test]
fn parse_rejects_unsupported_file() {
    let dir = TempDir::new().unwrap();
    let sheet = write(&dir, "precios.xlsx", "not really a workbook");

    pricesync()
        .arg("parse")
        .arg(&sheet)
        .assert()
        .failure()
        .stderr(predicate::str::contains("unsupported input"));
}

#[test]
fn parse_rejects_short_text() {
    let dir = TempDir::new().unwrap();
    let invoice = write(&dir, "factura.txt", "No. PCQP 1");

    pricesync()
        .arg("parse")
        .arg(&invoice)
        .assert()
        .failure()
        .stderr(predicate::str::contains("insufficient content"));
}

#[test]
fn update_writes_new_prices() {
    let dir = TempDir::new().unwrap();
    let invoice = write(&dir, "factura.txt", INVOICE);
    let catalog = write(&dir, "precios.csv", PRICE_LIST);
    let output = dir.path().join("nuevos.csv");

    pricesync()
        .arg("update")
        .arg(&invoice)
        .arg(&catalog)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Matched 2 of 3 products"))
        .stdout(predicate::str::contains("PEROXIDO DE HIDROGENO"))
        .stdout(predicate::str::contains("Updated 2 prices"));

    let updated = fs::read_to_string(&output).unwrap();
    assert_eq!(
        updated,
        "🛍️ PRODUCTOS,💰 PRECIO BASE,PROVEEDOR\n\
         ACIDO ACETICO TECNICO,12000.00,PROCOQUIM\n\
         HIPOCLORITO DE SODIO AL 13%,1500.50,PROCOQUIM\n\
         SODA CAUSTICA,4500,OTRO\n"
    );

    // the input price list is left alone
    assert_eq!(fs::read_to_string(&catalog).unwrap(), PRICE_LIST);
}

#[test]
fn update_default_output_name() {
    let dir = TempDir::new().unwrap();
    let invoice = write(&dir, "factura.txt", INVOICE);
    let catalog = write(&dir, "precios.csv", PRICE_LIST);

    pricesync()
        .arg("update")
        .arg(&invoice)
        .arg(&catalog)
        .args(["--report", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"updated_rows\""));

    let written: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("precios_updated_") && name.ends_with(".csv"))
        .collect();
    assert_eq!(written.len(), 1);
}

#[test]
fn update_reports_missing_column() {
    let dir = TempDir::new().unwrap();
    let invoice = write(&dir, "factura.txt", INVOICE);
    let catalog = write(&dir, "precios.csv", "PRODUCTO,PRECIO\nFORMOL,2500\n");

    pricesync()
        .arg("update")
        .arg(&invoice)
        .arg(&catalog)
        .assert()
        .failure()
        .stderr(predicate::str::contains("update error"))
        .stderr(predicate::str::contains("PRODUCTOS"));
}

#[test]
fn update_uses_configured_columns() {
    let dir = TempDir::new().unwrap();
    let config = config_arg(&dir);
    let invoice = write(&dir, "factura.txt", INVOICE);
    let catalog = write(&dir, "precios.csv", "PRODUCTO,PRECIO\nACIDO ACETICO,9000\n");
    let output = dir.path().join("nuevos.csv");

    for (key, value) in [("catalog.name_column", "PRODUCTO"), ("catalog.price_column", "PRECIO")] {
        pricesync()
            .args(["-c", config.as_str(), "config", "set", key, value])
            .assert()
            .success();
    }

    pricesync()
        .args(["-c", config.as_str(), "update"])
        .arg(&invoice)
        .arg(&catalog)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "PRODUCTO,PRECIO\nACIDO ACETICO,12000.00\n"
    );
}

#[test]
fn config_set_and_get() {
    let dir = TempDir::new().unwrap();
    let config = config_arg(&dir);

    pricesync()
        .args(["-c", config.as_str(), "config", "get", "matching.threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("75.0"));

    pricesync()
        .args(["-c", config.as_str(), "config", "set", "matching.threshold", "80"])
        .assert()
        .success();

    pricesync()
        .args(["-c", config.as_str(), "config", "get", "matching.threshold"])
        .assert()
        .success()
        .stdout(predicate::str::contains("80"));

    pricesync()
        .args(["-c", config.as_str(), "config", "set", "matching.nope", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Configuration key not found"));

    assert!(Path::new(&config).exists());
}

#[test]
fn config_init_refuses_overwrite() {
    let dir = TempDir::new().unwrap();
    let config = config_arg(&dir);

    pricesync()
        .args(["-c", config.as_str(), "config", "init"])
        .assert()
        .success();

    pricesync()
        .args(["-c", config.as_str(), "config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}
