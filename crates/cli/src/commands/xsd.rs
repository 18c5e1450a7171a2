// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::path::PathBuf;

use anyhow::Result;
use clap::{ArgMatches, Command};
use common::env_const::get_target_namespace;
use soap_env::SystemEnvironment;
use xsd_introspection::{XsdGenerator, XsdMetadata};

use crate::commands::command::{
    CommandDefinition, flash_arg, generation_modes, get, get_required, include_all_types_arg,
    output_arg, registry_arg,
};
use crate::util::{load_registry, write_output};

pub(crate) struct XsdCommandDefinition {}

impl CommandDefinition for XsdCommandDefinition {
    fn command(&self) -> Command {
        Command::new("xsd")
            .about("Generate the XML Schema of the service's types")
            .arg(registry_arg())
            .arg(flash_arg())
            .arg(include_all_types_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let registry_path: PathBuf = get_required(matches, "registry")?;
        let output: Option<PathBuf> = get(matches, "output");
        let modes = generation_modes(matches);

        let registry = load_registry(&registry_path)?;
        let target_namespace = get_target_namespace(&SystemEnvironment);

        let metadata = XsdMetadata::new(&registry, modes).resolve()?;
        let xsd = XsdGenerator::new(&metadata.types, &target_namespace, modes).generate()?;

        tracing::debug!(types = metadata.types.len(), "Generated XSD");
        write_output(output.as_deref(), &xsd)
    }
}
