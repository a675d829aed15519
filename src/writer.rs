// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Project description writer.
//!
//! Serialize a [`ProjectDescription`] into `.project` XML. Output is fully
//! determined by the description and the line separator, so the same
//! description always produces the same bytes. This keeps version control
//! diffs of `.project` files quiet.
//!
//! # Layout
//!
//! Elements are written in a fixed order: name, comment, referenced projects,
//! build specification, natures, linked resources, then resource filters.
//! Linked resources and resource filters are left out entirely when empty.
//! Nesting is indented with one tab per level, and every line is terminated
//! by the line separator given by the caller.

use crate::{
    location::{path_from_uri, uri_from_path},
    model::{BuildCommand, FilterDescription, LinkDescription, ProjectDescription},
    tag,
};

use quick_xml::escape::escape;
use std::io::Write;
use tracing::{debug, instrument};

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Write project description to output stream.
///
/// Convenience wrapper around [`ProjectDescriptionWriter::write`].
///
/// # Errors
///
/// - Return [`WriteError::Io`] if output cannot be written to.
pub fn write(
    description: &ProjectDescription,
    output: impl Write,
    line_separator: impl Into<String>,
) -> Result<()> {
    ProjectDescriptionWriter::new(line_separator).write(description, output)
}

/// Deterministic project description writer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDescriptionWriter {
    line_separator: String,
}

impl ProjectDescriptionWriter {
    /// Construct new writer terminating each line with given separator.
    pub fn new(line_separator: impl Into<String>) -> Self {
        Self {
            line_separator: line_separator.into(),
        }
    }

    /// Write project description to output stream.
    ///
    /// The whole document is rendered first, then written out and flushed in
    /// one go.
    ///
    /// # Errors
    ///
    /// - Return [`WriteError::Io`] if output cannot be written to.
    #[instrument(skip(self, description, output), level = "debug")]
    pub fn write(&self, description: &ProjectDescription, mut output: impl Write) -> Result<()> {
        let document = self.to_xml(description);
        debug!(
            "write project description {:?} ({} bytes)",
            description.name.as_deref().unwrap_or_default(),
            document.len()
        );
        output.write_all(document.as_bytes())?;
        output.flush()?;

        Ok(())
    }

    /// Render project description as XML document.
    pub fn to_xml(&self, description: &ProjectDescription) -> String {
        let mut doc = Document::new(&self.line_separator);
        doc.line(XML_DECLARATION);
        doc.open(tag::PROJECT_DESCRIPTION);
        doc.leaf(tag::NAME, description.name.as_deref().unwrap_or_default());
        doc.leaf(tag::COMMENT, &description.comment);

        doc.open(tag::PROJECTS);
        for project in &description.referenced_projects {
            doc.leaf(tag::PROJECT, project);
        }
        doc.close(tag::PROJECTS);

        doc.open(tag::BUILD_SPEC);
        for command in &description.build_spec {
            doc.build_command(command);
        }
        doc.close(tag::BUILD_SPEC);

        doc.open(tag::NATURES);
        for nature in &description.nature_ids {
            doc.leaf(tag::NATURE, nature);
        }
        doc.close(tag::NATURES);

        if description.has_links() {
            doc.open(tag::LINKED_RESOURCES);
            for link in description.links() {
                doc.link(link);
            }
            doc.close(tag::LINKED_RESOURCES);
        }

        if !description.filters.is_empty() {
            doc.open(tag::FILTERED_RESOURCES);
            for filter in &description.filters {
                doc.filter(filter);
            }
            doc.close(tag::FILTERED_RESOURCES);
        }

        doc.close(tag::PROJECT_DESCRIPTION);
        doc.finish()
    }
}

/// XML document under construction.
struct Document<'a> {
    out: String,
    line_separator: &'a str,
    depth: usize,
}

impl<'a> Document<'a> {
    fn new(line_separator: &'a str) -> Self {
        Self {
            out: String::new(),
            line_separator,
            depth: 0,
        }
    }

    fn line(&mut self, content: &str) {
        for _ in 0..self.depth {
            self.out.push('\t');
        }
        self.out.push_str(content);
        self.out.push_str(self.line_separator);
    }

    fn open(&mut self, name: &str) {
        self.line(&format!("<{name}>"));
        self.depth += 1;
    }

    fn close(&mut self, name: &str) {
        self.depth = self.depth.saturating_sub(1);
        self.line(&format!("</{name}>"));
    }

    fn leaf(&mut self, name: &str, text: &str) {
        self.line(&format!("<{name}>{}</{name}>", escape(text)));
    }

    fn build_command(&mut self, command: &BuildCommand) {
        self.open(tag::BUILD_COMMAND);
        self.leaf(tag::NAME, &command.builder_name);
        self.open(tag::ARGUMENTS);
        for (key, value) in &command.arguments {
            self.open(tag::DICTIONARY);
            self.leaf(tag::KEY, key);
            self.leaf(tag::VALUE, value.as_deref().unwrap_or_default());
            self.close(tag::DICTIONARY);
        }
        self.close(tag::ARGUMENTS);
        self.close(tag::BUILD_COMMAND);
    }

    fn link(&mut self, link: &LinkDescription) {
        self.open(tag::LINK);
        self.leaf(tag::NAME, &link.path);
        if let Some(resource_type) = link.resource_type {
            self.leaf(tag::TYPE, &resource_type.code().to_string());
        }

        // INVARIANT: Only use local path form if it maps back to the same URI.
        match path_from_uri(&link.location)
            .filter(|path| uri_from_path(path).is_ok_and(|uri| uri == link.location))
        {
            Some(path) => self.leaf(tag::LOCATION, &path),
            None => self.leaf(tag::LOCATION_URI, link.location.as_str()),
        }
        self.close(tag::LINK);
    }

    fn filter(&mut self, filter: &FilterDescription) {
        self.open(tag::FILTER);
        self.leaf(tag::ID, &filter.id);
        self.leaf(tag::NAME, &filter.name);
        self.leaf(tag::TYPE, &filter.filter_type);
        if let Some(matcher) = &filter.matcher {
            self.open(tag::MATCHER);
            self.leaf(tag::ID, &matcher.id);
            self.leaf(tag::ARGUMENTS, &matcher.arguments);
            self.close(tag::MATCHER);
        }
        self.close(tag::FILTER);
    }

    fn finish(self) -> String {
        self.out
    }
}

/// Project description writing error types.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// Output stream cannot be written to.
    #[error("failed to write project description")]
    Io(#[from] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = WriteError> = std::result::Result<T, E>;
