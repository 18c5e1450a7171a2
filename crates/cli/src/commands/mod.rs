//! Top level subcommands

pub(crate) mod command;
pub(crate) mod wsdl;
pub(crate) mod xsd;
