// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{path::PathBuf, sync::Arc};

use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueEnum, builder::PossibleValue};
use colored::Colorize;
use common::env_const::{SOAP_WEB_HOST_URL, get_web_host_url};
use soap_env::{Environment, MapEnvironment, SystemEnvironment};
use wsdl_router::{BindingKind, WsdlMetadataHandler};

use crate::commands::command::{
    CommandDefinition, flash_arg, generation_modes, get, get_required, include_all_types_arg,
    output_arg, registry_arg,
};
use crate::util::{load_registry, write_output};

const DEFAULT_BASE_URI: &str = "http://localhost/";

pub(crate) struct WsdlCommandDefinition {}

impl CommandDefinition for WsdlCommandDefinition {
    fn command(&self) -> Command {
        Command::new("wsdl")
            .about("Generate the WSDL document of the service")
            .arg(registry_arg())
            .arg(
                Arg::new("binding")
                    .long("binding")
                    .short('b')
                    .value_parser(clap::builder::EnumValueParser::<Binding>::new())
                    .help("SOAP binding to describe")
                    .default_value("soap11"),
            )
            .arg(
                Arg::new("base-uri")
                    .long("base-uri")
                    .help("The URL the service's endpoints live under. Default: SOAP_WEB_HOST_URL or http://localhost/")
                    .num_args(1),
            )
            .arg(flash_arg())
            .arg(include_all_types_arg())
            .arg(output_arg())
    }

    fn execute(&self, matches: &ArgMatches) -> Result<()> {
        let registry_path: PathBuf = get_required(matches, "registry")?;
        let output: Option<PathBuf> = get(matches, "output");
        let binding: Binding = get(matches, "binding").unwrap_or(Binding::Soap11);
        let binding_kind = binding.kind();
        let modes = generation_modes(matches);

        let base_uri_arg: Option<String> = get(matches, "base-uri");
        let env = command_env(base_uri_arg.as_deref(), Arc::new(SystemEnvironment));

        let base_uri = get_web_host_url(&env)?.unwrap_or_else(|| DEFAULT_BASE_URI.to_string());
        let endpoint = format!("{base_uri}{}", binding_kind.path_segment());

        let registry = Arc::new(load_registry(&registry_path)?);
        let handler = WsdlMetadataHandler::new(registry, Arc::new(env), binding_kind);
        let wsdl = handler.generate_document(&endpoint, &base_uri, modes)?;

        write_output(output.as_deref(), &wsdl)?;

        if let Some(output) = output {
            eprintln!(
                "{}",
                format!("Wrote {binding_kind} WSDL to {}", output.display()).green()
            );
        }
        Ok(())
    }
}

/// The host environment, with `--base-uri` taking the place of the configured web host URL.
fn command_env(base_uri: Option<&str>, host_env: Arc<dyn Environment>) -> MapEnvironment {
    let env = MapEnvironment::new_with_fallback(host_env);
    match base_uri {
        Some(base_uri) => env.with(SOAP_WEB_HOST_URL, base_uri),
        None => env,
    }
}

#[derive(Clone, Copy, Debug)]
enum Binding {
    Soap11,
    Soap12,
}

impl Binding {
    fn kind(self) -> BindingKind {
        match self {
            Self::Soap11 => BindingKind::Soap11,
            Self::Soap12 => BindingKind::Soap12,
        }
    }
}

impl ValueEnum for Binding {
    fn value_variants<'a>() -> &'a [Self] {
        &[Self::Soap11, Self::Soap12]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        Some(PossibleValue::new(self.kind().path_segment()))
    }
}
