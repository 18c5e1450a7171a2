// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use anyhow::{Context, Result};
use std::{
    fs::File,
    io::{BufReader, Write, stdout},
    path::Path,
};
use xsd_introspection::OperationRegistry;

pub fn open_file_for_output(output: Option<&Path>) -> Result<Box<dyn Write + Send>> {
    if let Some(output) = output {
        let file = File::create(output)
            .with_context(|| format!("Failed to create `{}`", output.display()))?;
        Ok(Box::new(file))
    } else {
        Ok(Box::new(stdout()))
    }
}

pub fn load_registry(path: &Path) -> Result<OperationRegistry> {
    let file =
        File::open(path).with_context(|| format!("Failed to open `{}`", path.display()))?;

    OperationRegistry::from_reader(BufReader::new(file))
        .with_context(|| format!("Failed to load operation registry from `{}`", path.display()))
}

pub fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    let mut writer = open_file_for_output(output)?;
    writer.write_all(content.as_bytes())?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn load_registry_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("registry.json");
        fs::write(&path, r#"{ "types": [ { "name": "Ping", "kind": "complex" } ] }"#).unwrap();

        let registry = load_registry(&path).unwrap();
        assert!(registry.get_type("Ping").is_some());

        let missing = dir.path().join("missing.json");
        let err = load_registry(&missing).unwrap_err();
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.xml");

        write_output(Some(&path), "<a/>").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "<a/>\n");
    }
}
