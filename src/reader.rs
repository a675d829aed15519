// SPDX-FileCopyrightText: 2025 Jason Pena <jasonpena@awkless.com>
// SPDX-License-Identifier: MIT

//! Project description reader.
//!
//! Read `.project` XML into a [`ProjectDescription`]. The reader prefers a
//! degraded result over no result at all. Only two things stop it from
//! producing a description: failing to read the input stream, and a root
//! element that is not `<projectDescription>`.
//!
//! # Recovery Rules
//!
//! The input is first folded into a small element tree of the elements that
//! get interpreted. If the XML breaks
//! somewhere after the root element was opened, every element still open at
//! that point is closed, and whatever made it into the tree is interpreted as
//! usual. Inside the tree, each field is interpreted on its own:
//!
//! - Unknown elements are skipped.
//! - Text is trimmed, so values may be spread across multiple lines.
//! - A broken entry, e.g., a build command without a `<name>` element, is
//!   dropped while its siblings are kept. An empty `<name>` is not broken.
//! - Content below elements that are never interpreted is skipped while
//!   parsing, so arbitrarily deep nesting costs no stack.
//! - A linked resource with an unparsable type code is kept, but without a
//!   resource type.
//!
//! Every dropped or degraded entry is recorded as a [`ReadProblem`], which can
//! be inspected through [`ProjectDescriptionReader::problems`].

use crate::{
    location::{parse_uri, uri_from_path},
    model::{
        BuildCommand, FilterDescription, FilterMatcher, LinkDescription, ProjectDescription,
        ResourceType,
    },
    tag,
};

use quick_xml::{events::Event, Reader};
use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    io::Read,
};
use tracing::{debug, instrument, warn};

/// Read project description from input stream.
///
/// Convenience wrapper around [`ProjectDescriptionReader::read`] that throws
/// away any recorded problems.
///
/// # Errors
///
/// - Return [`ReadError::Io`] if input cannot be read.
pub fn read(input: impl Read) -> Result<Option<ProjectDescription>> {
    ProjectDescriptionReader::new().read(input)
}

/// Best-effort project description reader.
///
/// Keeps track of the problems found during the last read.
#[derive(Debug, Default)]
pub struct ProjectDescriptionReader {
    problems: Vec<ReadProblem>,
}

impl ProjectDescriptionReader {
    /// Construct new reader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read project description from input stream.
    ///
    /// Input is consumed entirely before it gets parsed. Returns [`None`] if
    /// input does not contain a root element, or if the root element is not
    /// `<projectDescription>`.
    ///
    /// # Errors
    ///
    /// - Return [`ReadError::Io`] if input cannot be read, or is not valid
    ///   UTF-8.
    #[instrument(skip(self, input), level = "debug")]
    pub fn read(&mut self, mut input: impl Read) -> Result<Option<ProjectDescription>> {
        let mut content = String::new();
        input.read_to_string(&mut content)?;

        Ok(self.read_str(&content))
    }

    /// Read project description from string slice.
    ///
    /// Same as [`ProjectDescriptionReader::read`], minus the stream handling.
    pub fn read_str(&mut self, content: &str) -> Option<ProjectDescription> {
        self.problems.clear();

        let root = self.parse_tree(content)?;
        if root.name != tag::PROJECT_DESCRIPTION {
            warn!(
                "expected <{}> as root element, found <{}>",
                tag::PROJECT_DESCRIPTION,
                root.name
            );
            return None;
        }

        Some(self.project_description(&root))
    }

    /// Problems recorded during last read.
    pub fn problems(&self) -> &[ReadProblem] {
        &self.problems
    }

    /// Consume reader, and take problems recorded during last read.
    pub fn into_problems(self) -> Vec<ReadProblem> {
        self.problems
    }

    fn problem(&mut self, element: impl Into<String>, message: impl Into<String>) {
        let problem = ReadProblem {
            element: element.into(),
            message: message.into(),
        };
        warn!("{problem}");
        self.problems.push(problem);
    }

    fn parse_tree(&mut self, content: &str) -> Option<Element> {
        let mut reader = Reader::from_str(content);
        let mut open: Vec<Element> = Vec::new();
        let mut root: Option<Element> = None;
        let mut broken = false;
        // Depth inside a subtree whose content is never interpreted.
        let mut skipped = 0usize;

        while root.is_none() {
            match reader.read_event() {
                Ok(Event::Start(_)) if skipped > 0 => skipped += 1,
                Ok(Event::Start(start)) => {
                    if keeps_children(&open) {
                        open.push(Element::new(start.local_name().as_ref()));
                    } else {
                        skipped = 1;
                    }
                }
                Ok(Event::Empty(start)) => {
                    if skipped == 0 && keeps_children(&open) {
                        close(&mut open, &mut root, Element::new(start.local_name().as_ref()));
                    }
                }
                Ok(Event::End(_)) if skipped > 0 => skipped -= 1,
                Ok(Event::End(_)) => {
                    if let Some(element) = open.pop() {
                        close(&mut open, &mut root, element);
                    }
                }
                Ok(Event::Text(_) | Event::CData(_)) if skipped > 0 => {}
                Ok(Event::Text(text)) => {
                    let Some(element) = open.last_mut() else {
                        continue;
                    };
                    match text.unescape() {
                        Ok(text) => element.text.push_str(&text),
                        Err(err) => {
                            let name = element.name.clone();
                            element.text.push_str(&String::from_utf8_lossy(&text));
                            self.problem(name, format!("cannot unescape text: {err}"));
                        }
                    }
                }
                Ok(Event::CData(data)) => {
                    if let Some(element) = open.last_mut() {
                        element.text.push_str(&String::from_utf8_lossy(&data.into_inner()));
                    }
                }
                Ok(Event::Eof) => break,
                Ok(_) => {}
                Err(err) => {
                    let element = open.last().map_or_else(String::new, |el| el.name.clone());
                    self.problem(
                        element,
                        format!("malformed XML at byte {}: {err}", reader.buffer_position()),
                    );
                    broken = true;
                    break;
                }
            }
        }

        if !open.is_empty() && !broken {
            let element = open.last().map_or_else(String::new, |el| el.name.clone());
            self.problem(element, "document ends before element is closed");
        }

        // INVARIANT: Close whatever is still open so partial content survives.
        while let Some(element) = open.pop() {
            close(&mut open, &mut root, element);
        }

        root
    }

    fn project_description(&mut self, root: &Element) -> ProjectDescription {
        let mut description = ProjectDescription::new();
        for child in &root.children {
            match child.name.as_str() {
                tag::NAME => description.name = non_empty(child.text()),
                tag::COMMENT => description.comment = child.text().to_owned(),
                tag::PROJECTS => {
                    description.referenced_projects = string_list(child, tag::PROJECT)
                }
                tag::NATURES => description.nature_ids = string_list(child, tag::NATURE),
                tag::BUILD_SPEC => description.build_spec = self.build_spec(child),
                tag::LINKED_RESOURCES => {
                    for link in self.links(child) {
                        let path = link.path.clone();
                        if description.set_link(link).is_some() {
                            self.problem(
                                tag::LINK,
                                format!("duplicate link {path:?}, keeping the last one"),
                            );
                        }
                    }
                }
                tag::FILTERED_RESOURCES => description.filters = filters(child),
                other => debug!("skip unknown element <{other}>"),
            }
        }

        description
    }

    fn build_spec(&mut self, element: &Element) -> Vec<BuildCommand> {
        let mut commands = Vec::new();
        for child in &element.children {
            if child.name != tag::BUILD_COMMAND {
                self.problem(
                    format!("{}/{}", tag::BUILD_SPEC, child.name),
                    "not a build command, skipped",
                );
                continue;
            }

            if let Some(command) = self.build_command(child) {
                commands.push(command);
            }
        }

        commands
    }

    fn build_command(&mut self, element: &Element) -> Option<BuildCommand> {
        let Some(builder_name) = element.last_child(tag::NAME).map(Element::text) else {
            self.problem(tag::BUILD_COMMAND, "missing builder name, skipped");
            return None;
        };

        let mut command = BuildCommand::new(builder_name);
        for arguments in element.children_named(tag::ARGUMENTS) {
            for entry in &arguments.children {
                if entry.name != tag::DICTIONARY {
                    self.problem(
                        format!("{}/{}", tag::ARGUMENTS, entry.name),
                        "argument outside of dictionary, skipped",
                    );
                    continue;
                }

                let Some(key) = entry.last_child(tag::KEY).map(Element::text) else {
                    self.problem(tag::DICTIONARY, "missing argument key, skipped");
                    continue;
                };
                let value = entry.last_child(tag::VALUE).map_or("", Element::text);
                command.set_argument(key, Some(value));
            }
        }

        Some(command)
    }

    fn links(&mut self, element: &Element) -> Vec<LinkDescription> {
        element
            .children_named(tag::LINK)
            .filter_map(|child| self.link(child))
            .collect()
    }

    fn link(&mut self, element: &Element) -> Option<LinkDescription> {
        let mut path = None;
        let mut type_code = None;
        let mut location = None;
        for child in &element.children {
            match child.name.as_str() {
                tag::NAME => path = Some(child.text().to_owned()),
                tag::TYPE => type_code = Some(child.text()),
                tag::LOCATION => location = Some(uri_from_path(child.text())),
                tag::LOCATION_URI => location = Some(parse_uri(child.text())),
                _ => {}
            }
        }

        let Some(path) = path else {
            self.problem(tag::LINK, "missing link name, skipped");
            return None;
        };

        let location = match location {
            Some(Ok(location)) => location,
            Some(Err(err)) => {
                self.problem(tag::LINK, format!("link {path:?}: {err}, skipped"));
                return None;
            }
            None => {
                self.problem(tag::LINK, format!("link {path:?} has no location, skipped"));
                return None;
            }
        };

        let resource_type = type_code
            .and_then(|code| code.parse::<u32>().ok())
            .and_then(ResourceType::from_code);
        if resource_type.is_none() {
            self.problem(
                format!("{}/{}", tag::LINK, tag::TYPE),
                format!(
                    "link {path:?} has invalid resource type {:?}",
                    type_code.unwrap_or_default()
                ),
            );
        }

        Some(LinkDescription {
            path,
            resource_type,
            location,
        })
    }
}

fn string_list(element: &Element, item: &str) -> Vec<String> {
    element
        .children_named(item)
        .map(|child| child.text().to_owned())
        .collect()
}

fn filters(element: &Element) -> Vec<FilterDescription> {
    element
        .children_named(tag::FILTER)
        .map(|filter| FilterDescription {
            id: filter.last_text(tag::ID),
            name: filter.last_text(tag::NAME),
            filter_type: filter.last_text(tag::TYPE),
            matcher: filter.last_child(tag::MATCHER).map(|matcher| FilterMatcher {
                id: matcher.last_text(tag::ID),
                arguments: matcher.last_text(tag::ARGUMENTS),
            }),
        })
        .collect()
}

fn non_empty(text: &str) -> Option<String> {
    (!text.is_empty()).then(|| text.to_owned())
}

/// Whether children of the innermost open element get interpreted.
///
/// Only the root and the containers along the known element paths hold
/// children. Everything below any other element is skipped while parsing, so
/// the tree never grows deeper than the dialect itself, no matter how deeply
/// the input nests unknown elements.
fn keeps_children(open: &[Element]) -> bool {
    let path = open.iter().map(|el| el.name.as_str()).collect::<Vec<_>>();
    matches!(
        path.as_slice(),
        []
            | [tag::PROJECT_DESCRIPTION]
            | [
                tag::PROJECT_DESCRIPTION,
                tag::PROJECTS
                    | tag::NATURES
                    | tag::BUILD_SPEC
                    | tag::LINKED_RESOURCES
                    | tag::FILTERED_RESOURCES
            ]
            | [tag::PROJECT_DESCRIPTION, tag::BUILD_SPEC, tag::BUILD_COMMAND]
            | [tag::PROJECT_DESCRIPTION, tag::BUILD_SPEC, tag::BUILD_COMMAND, tag::ARGUMENTS]
            | [
                tag::PROJECT_DESCRIPTION,
                tag::BUILD_SPEC,
                tag::BUILD_COMMAND,
                tag::ARGUMENTS,
                tag::DICTIONARY
            ]
            | [tag::PROJECT_DESCRIPTION, tag::LINKED_RESOURCES, tag::LINK]
            | [tag::PROJECT_DESCRIPTION, tag::FILTERED_RESOURCES, tag::FILTER]
            | [tag::PROJECT_DESCRIPTION, tag::FILTERED_RESOURCES, tag::FILTER, tag::MATCHER]
    )
}

fn close(open: &mut [Element], root: &mut Option<Element>, element: Element) {
    match open.last_mut() {
        Some(parent) => parent.children.push(element),
        None => *root = Some(element),
    }
}

/// Parsed XML element.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    children: Vec<Element>,
}

impl Element {
    fn new(name: &[u8]) -> Self {
        Self {
            name: String::from_utf8_lossy(name).into_owned(),
            ..Self::default()
        }
    }

    fn text(&self) -> &str {
        self.text.trim()
    }

    fn children_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Element> + 'a {
        self.children.iter().filter(move |child| child.name == name)
    }

    fn last_child(&self, name: &str) -> Option<&Element> {
        self.children.iter().rev().find(|child| child.name == name)
    }

    fn last_text(&self, name: &str) -> String {
        self.last_child(name)
            .map(|child| child.text().to_owned())
            .unwrap_or_default()
    }
}

/// Problem found while reading a project description.
///
/// Problems never stop a read. They describe an entry that was dropped, or
/// kept in degraded form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadProblem {
    /// Element the problem was found in.
    pub element: String,

    /// What went wrong.
    pub message: String,
}

impl Display for ReadProblem {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> FmtResult {
        write!(fmt, "<{}>: {}", self.element, self.message)
    }
}

/// Project description reading error types.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    /// Input stream cannot be read.
    #[error("failed to read project description")]
    Io(#[from] std::io::Error),
}

/// Friendly result alias :3
pub type Result<T, E = ReadError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;
    use pretty_assertions::assert_eq;
    use url::Url;

    fn read_with_problems(content: &str) -> (Option<ProjectDescription>, Vec<ReadProblem>) {
        let mut reader = ProjectDescriptionReader::new();
        let description = reader.read_str(content);
        (description, reader.into_problems())
    }

    #[test]
    fn reject_unexpected_root_element() {
        let content = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <homeDescription>
            	<name>abc</name>
            	<comment></comment>
            	<projects>
            	</projects>
            	<buildSpec>
            		<buildCommand>
            			<name>org.eclipse.jdt.core.javabuilder</name>
            			<arguments>
            			</arguments>
            		</buildCommand>
            	</buildSpec>
            	<natures>
            	<nature>org.eclipse.jdt.core.javanature</nature>
            	</natures>
            	<linkedResources>
            		<link>
            			<name>newLink</name>
            			<type>2</type>
            			<location>/abc/def</location>
            		</link>
            	</linkedResources>
            </homeDescription>
        "#};

        let (description, _) = read_with_problems(content);
        assert_eq!(description, None);
    }

    #[test]
    fn unknown_elements_leave_empty_description() {
        let content = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<bogusname>abc</bogusname>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        assert_eq!(description, Some(ProjectDescription::new()));
        assert!(problems.is_empty());
    }

    #[test]
    fn skip_malformed_build_command() {
        let content = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<name>abc</name>
            	<comment></comment>
            	<projects>
            	</projects>
            	<buildSpec>
            		<badBuildCommand>
            			<name>org.eclipse.jdt.core.javabuilder</name>
            			<arguments>
            			</arguments>
            		</badBuildCommand>
            	</buildSpec>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        assert_eq!(description, Some(ProjectDescription::with_name("abc")));
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].element, "buildSpec/badBuildCommand");
    }

    #[test]
    fn keep_link_with_invalid_resource_type() -> anyhow::Result<()> {
        let content = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<name>abc</name>
            	<comment></comment>
            	<projects>
            	</projects>
            	<buildSpec>
            	</buildSpec>
            	<natures>
            	</natures>
            	<linkedResources>
            		<link>
            			<name>newLink</name>
            			<type>foobar</type>
            			<location>/abc/def</location>
            		</link>
            	</linkedResources>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        let description = description.expect("project description");
        assert_eq!(description.name.as_deref(), Some("abc"));
        assert_eq!(description.comment, "");
        assert!(description.referenced_projects.is_empty());
        assert!(description.nature_ids.is_empty());
        assert!(description.build_spec.is_empty());

        let link = description.link("newLink").expect("link");
        assert_eq!(link.resource_type, None);
        assert_eq!(link.location, Url::parse("file:///abc/def")?);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].element, "link/type");

        Ok(())
    }

    #[test]
    fn trim_multi_line_values() {
        let multi_line = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<name>
                  abc
               </name>
            	<charset>
            		ISO-8859-1
            	</charset>
            	<comment>This is the comment.</comment>
            	<projects>
            	   <project>
                     org.eclipse.core.boot
                  </project>
            	</projects>
            	<buildSpec>
            		<buildCommand>
            			<name>
                          org.eclipse.jdt.core.javabuilder
                       </name>
            			<arguments>
            				<dictionary>
            					<key>
                                  thisIsTheKey
                               </key>
            					<value>thisIsTheValue</value>
            				</dictionary>
            			</arguments>
            		</buildCommand>
            	</buildSpec>
            	<natures>
            	   <nature>
                     org.eclipse.jdt.core.javanature
                  </nature>
            	</natures>
            	<linkedResources>
            		<link>
            			<name>newLink</name>
            			<type>
                          2
                       </type>
            			<location>/abc/def</location>
            		</link>
            	</linkedResources>
            </projectDescription>
        "#};
        let single_line = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<name>abc</name>
            	<charset>ISO-8859-1</charset>
            	<comment>This is the comment.</comment>
            	<projects>
            	   <project>org.eclipse.core.boot</project>
            	</projects>
            	<buildSpec>
            		<buildCommand>
            			<name>org.eclipse.jdt.core.javabuilder</name>
            			<arguments>
            				<dictionary>
            					<key>thisIsTheKey</key>
            					<value>thisIsTheValue</value>
            				</dictionary>
            			</arguments>
            		</buildCommand>
            	</buildSpec>
            	<natures>
            	   <nature>org.eclipse.jdt.core.javanature</nature>
            	</natures>
            	<linkedResources>
            		<link>
            			<name>newLink</name>
            			<type>2</type>
            			<location>/abc/def</location>
            		</link>
            	</linkedResources>
            </projectDescription>
        "#};

        let (multi, _) = read_with_problems(multi_line);
        let (single, _) = read_with_problems(single_line);
        let multi = multi.expect("project description");
        assert_eq!(multi, single.expect("project description"));
        assert_eq!(
            multi.build_spec[0].argument("thisIsTheKey"),
            Some("thisIsTheValue")
        );
    }

    #[test]
    fn location_and_location_uri_agree() {
        let content = indoc! {r#"
            <projectDescription>
            	<linkedResources>
            		<link>
            			<name>by-path</name>
            			<type>1</type>
            			<location>/eclipse/dev//i0218///contexts.xml</location>
            		</link>
            		<link>
            			<name>by-uri</name>
            			<type>1</type>
            			<locationURI>file:///eclipse/dev/i0218/contexts.xml</locationURI>
            		</link>
            	</linkedResources>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        let description = description.expect("project description");
        assert!(problems.is_empty());
        assert_eq!(
            description.link_location("by-path"),
            description.link_location("by-uri")
        );
    }

    #[test]
    fn skip_links_without_usable_location() {
        let content = indoc! {r#"
            <projectDescription>
            	<linkedResources>
            		<link>
            			<name>relative</name>
            			<type>2</type>
            			<location>PARENT-1-PROJECT_LOC/abc</location>
            		</link>
            		<link>
            			<name>nowhere</name>
            			<type>2</type>
            		</link>
            		<link>
            			<type>2</type>
            			<location>/abc</location>
            		</link>
            	</linkedResources>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        assert!(!description.expect("project description").has_links());
        assert_eq!(problems.len(), 3);
    }

    #[test]
    fn pass_through_resource_filters() {
        let content = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<name>rome_dfw</name>
            		<comment></comment>
            	<projects>
            	</projects>
            	<linkedResources>
            		<link>
            			<name>OcdTargetPlugin</name>
            			<type>2</type>
            			<location>M:/lcruaud.dfw-main-validation/HSI_api/OcdTargetPlugin</location>
            		</link>
            	</linkedResources>
            	<filteredResources>
            		<filter>
            			<id>1264174785480</id>
            			<name></name>
            			<type>22</type>
            			<matcher>
            				<id>org.eclipse.ui.ide.patternFilterMatcher</id>
            				<arguments>*:*</arguments>
            			</matcher>
            		</filter>
            	</filteredResources>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        let description = description.expect("project description");
        assert!(problems.is_empty());
        assert_eq!(
            description.filters,
            vec![FilterDescription {
                id: "1264174785480".into(),
                name: String::new(),
                filter_type: "22".into(),
                matcher: Some(FilterMatcher {
                    id: "org.eclipse.ui.ide.patternFilterMatcher".into(),
                    arguments: "*:*".into(),
                }),
            }]
        );
        assert_eq!(
            description
                .link_location("OcdTargetPlugin")
                .map(Url::as_str),
            Some("file:///M:/lcruaud.dfw-main-validation/HSI_api/OcdTargetPlugin")
        );
    }

    #[test]
    fn keep_partial_content_of_truncated_document() {
        let content = indoc! {r#"
            <?xml version="1.0" encoding="UTF-8"?>
            <projectDescription>
            	<name>abc</name>
            	<natures>
            		<nature>org.eclipse.jdt.core.javanature</nature>
        "#};

        let (description, problems) = read_with_problems(content);
        let description = description.expect("project description");
        assert_eq!(description.name.as_deref(), Some("abc"));
        assert_eq!(description.nature_ids, vec!["org.eclipse.jdt.core.javanature"]);
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn no_root_element() {
        let (description, _) = read_with_problems("");
        assert_eq!(description, None);

        let (description, _) = read_with_problems("not xml at all");
        assert_eq!(description, None);
    }

    #[test]
    fn argument_without_value_reads_as_empty() {
        let content = indoc! {r#"
            <projectDescription>
            	<buildSpec>
            		<buildCommand>
            			<name>MyCommand</name>
            			<arguments>
            				<dictionary>
            					<key>NullArg</key>
            					<value></value>
            				</dictionary>
            				<dictionary>
            					<key>MissingValue</key>
            				</dictionary>
            				<dictionary>
            					<value>no key</value>
            				</dictionary>
            			</arguments>
            		</buildCommand>
            	</buildSpec>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        let description = description.expect("project description");
        let command = &description.build_spec[0];
        assert_eq!(command.arguments.len(), 2);
        assert_eq!(command.argument("NullArg"), Some(""));
        assert_eq!(command.argument("MissingValue"), Some(""));
        assert_eq!(problems.len(), 1);
    }

    #[test]
    fn skip_deeply_nested_unknown_elements() {
        let depth = 100_000;
        let content = format!(
            "<projectDescription><name>abc</name>{}{}<natures><nature>n</nature></natures></projectDescription>",
            "<x>".repeat(depth),
            "</x>".repeat(depth),
        );

        let (description, problems) = read_with_problems(&content);
        let description = description.expect("project description");
        assert_eq!(description.name.as_deref(), Some("abc"));
        assert_eq!(description.nature_ids, vec!["n"]);
        assert!(problems.is_empty(), "{problems:?}");
    }

    #[test]
    fn skip_deeply_nested_elements_in_known_containers() {
        let depth = 100_000;
        let content = format!(
            "<projectDescription><buildSpec><buildCommand><name>b</name><arguments><dictionary>\
             <key>k</key><value>{}v{}</value></dictionary></arguments></buildCommand></buildSpec>\
             </projectDescription>",
            "<x>".repeat(depth),
            "</x>".repeat(depth),
        );

        let (description, _) = read_with_problems(&content);
        let description = description.expect("project description");
        assert_eq!(description.build_spec[0].argument("k"), Some(""));
    }

    #[test]
    fn keep_entries_with_empty_names() {
        let content = indoc! {r#"
            <projectDescription>
            	<projects>
            		<project></project>
            	</projects>
            	<buildSpec>
            		<buildCommand>
            			<name></name>
            		</buildCommand>
            		<buildCommand>
            			<arguments>
            			</arguments>
            		</buildCommand>
            	</buildSpec>
            </projectDescription>
        "#};

        let (description, problems) = read_with_problems(content);
        let description = description.expect("project description");
        assert_eq!(description.referenced_projects, vec![String::new()]);
        assert_eq!(description.build_spec, vec![BuildCommand::new("")]);
        assert_eq!(problems.len(), 1);
        assert_eq!(problems[0].element, "buildCommand");
    }

    #[test]
    fn propagate_io_failure() {
        struct Broken;

        impl Read for Broken {
            fn read(&mut self, _: &mut [u8]) -> std::io::Result<usize> {
                Err(std::io::Error::other("disk on fire"))
            }
        }

        assert!(matches!(read(Broken), Err(ReadError::Io(_))));
    }
}
