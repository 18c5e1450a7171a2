// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! A thin layer over `quick_xml::Writer` for emitting indented documents element by element.

use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum XmlError {
    #[error("Failed to write XML: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to write XML: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("Generated XML is not valid UTF-8: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

pub struct XmlWriter {
    writer: Writer<Vec<u8>>,
}

impl XmlWriter {
    pub fn new() -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        }
    }

    pub fn declaration(&mut self) -> Result<(), XmlError> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        Ok(())
    }

    /// Open `name`. Attribute values are escaped.
    pub fn start(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), XmlError> {
        self.writer
            .write_event(Event::Start(element(name, attributes)))?;
        Ok(())
    }

    pub fn empty(&mut self, name: &str, attributes: &[(&str, &str)]) -> Result<(), XmlError> {
        self.writer
            .write_event(Event::Empty(element(name, attributes)))?;
        Ok(())
    }

    pub fn end(&mut self, name: &str) -> Result<(), XmlError> {
        self.writer.write_event(Event::End(BytesEnd::new(name)))?;
        Ok(())
    }

    /// Write already well-formed markup as is.
    pub fn raw(&mut self, markup: &str) -> Result<(), XmlError> {
        self.writer
            .write_event(Event::Text(BytesText::from_escaped(markup)))?;
        Ok(())
    }

    pub fn finish(self) -> Result<String, XmlError> {
        Ok(String::from_utf8(self.writer.into_inner())?)
    }
}

impl Default for XmlWriter {
    fn default() -> Self {
        Self::new()
    }
}

fn element<'a>(name: &'a str, attributes: &[(&'a str, &'a str)]) -> BytesStart<'a> {
    let mut element = BytesStart::new(name);
    for attribute in attributes {
        element.push_attribute(*attribute);
    }
    element
}
