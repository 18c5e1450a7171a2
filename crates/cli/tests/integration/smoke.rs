use std::{fs, path::Path, process::Command};

const REGISTRY: &str = r#"{
    "types": [
        { "name": "GetFoo", "kind": "complex", "fields": [
            { "name": "Id", "type": { "primitive": "int" } }
        ] },
        { "name": "FooResponse", "kind": "complex", "fields": [
            { "name": "Names", "type": { "primitive": "string" }, "array": true }
        ] },
        { "name": "Ping", "kind": "complex" },
        { "name": "Unused", "kind": "complex" }
    ],
    "operations": [
        { "name": "Op1", "request": "GetFoo", "response": "FooResponse" },
        { "name": "Op2", "request": "Ping" }
    ]
}"#;

fn soapdoc<I>(cwd: impl AsRef<Path>, args: I) -> Command
where
    I: IntoIterator<Item = &'static str>,
{
    let bin = env!("CARGO_BIN_EXE_soapdoc");

    let mut cmd = Command::new(bin);
    cmd.current_dir(cwd)
        .args(args)
        .env_remove("SOAP_WEB_HOST_URL")
        .env_remove("SOAP_TARGET_NAMESPACE");
    cmd
}

#[test]
fn soapdoc_smoke_tests() {
    let tmp_dir = tempfile::tempdir().expect("Failed to create tempdir");
    fs::write(tmp_dir.path().join("registry.json"), REGISTRY).unwrap();

    let output = soapdoc(tmp_dir.path(), ["xsd", "registry.json", "--include-all-types"])
        .output()
        .unwrap();
    assert!(output.status.success());
    let xsd = String::from_utf8(output.stdout).unwrap();
    assert!(xsd.contains(r#"<xs:complexType name="Unused">"#));
    assert!(xsd.contains(r#"targetNamespace="http://tempuri.org/types""#));

    let output = soapdoc(
        tmp_dir.path(),
        [
            "wsdl",
            "registry.json",
            "--binding",
            "soap12",
            "--base-uri",
            "https://api.example.com/services",
            "-o",
            "service.wsdl",
        ],
    )
    .output()
    .unwrap();
    assert!(output.status.success());

    let wsdl = fs::read_to_string(tmp_dir.path().join("service.wsdl")).unwrap();
    assert!(wsdl.contains(r#"<wsdl:service name="SyncReply">"#));
    assert!(wsdl.contains(
        r#"<soap12:address location="https://api.example.com/services/soap12"/>"#
    ));
    assert!(!wsdl.contains("Unused"));
}

#[test]
fn soapdoc_reports_generation_errors() {
    let tmp_dir = tempfile::tempdir().expect("Failed to create tempdir");
    fs::write(
        tmp_dir.path().join("registry.json"),
        r#"{ "operations": [ { "request": "Missing" } ] }"#,
    )
    .unwrap();

    let output = soapdoc(tmp_dir.path(), ["wsdl", "registry.json"])
        .output()
        .unwrap();
    assert!(!output.status.success());

    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("Type 'Missing' referenced by operation 'Missing' is not registered"));
}
