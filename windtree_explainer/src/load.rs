// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reading a generated Windtree SVG into a [`Document`].

use kurbo::Rect;
use svg::node::Attributes;
use svg::node::element::tag::{self, Type};
use svg::parser::Event;
use windtree_geometry::parse_view_box;

use crate::{Document, DocumentBuilder, LoadError, NodeSpec};

impl Document {
    /// Parses a generated SVG document.
    ///
    /// Recognized structure:
    /// - root `<svg viewBox=...>`;
    /// - `<g class="segment" id=...>` groups whose `<path>` descendants are
    ///   the segment's pieces;
    /// - `<g class="treenode" [id] [parent] segments="...">` groups holding a
    ///   bounds `<rect>`, a `<text class="winding_number">` and optional
    ///   `<path class="shortcut">` pieces. A node group nested inside another
    ///   one without a `parent` attribute is a child of the enclosing node;
    /// - `<path class="original">` copies of the input.
    ///
    /// Everything else is ignored.
    pub fn from_svg_str(content: &str) -> Result<Self, LoadError> {
        let mut loader = Loader::default();
        for event in svg::read(content)? {
            loader.event(event)?;
        }
        loader.finish()
    }
}

#[derive(Debug)]
enum Scope {
    Segment {
        name: String,
        pieces: Vec<String>,
    },
    Node {
        slot: usize,
        spec: NodeSpec,
        has_bounds: bool,
        has_winding: bool,
    },
    Other,
}

#[derive(Debug, Default)]
struct Loader {
    builder: Option<DocumentBuilder>,
    stack: Vec<Scope>,
    /// Tree nodes in opening order, filled in as their groups close.
    nodes: Vec<Option<NodeSpec>>,
    in_winding_text: bool,
}

impl Loader {
    fn event(&mut self, event: Event<'_>) -> Result<(), LoadError> {
        match event {
            Event::Error(err) => return Err(LoadError::Parse(err.to_string())),
            Event::Tag(tag::SVG, Type::Start | Type::Empty, attrs) => {
                if self.builder.is_none() {
                    let view_box = attr(&attrs, "viewBox")
                        .ok_or(LoadError::MissingElement("root viewBox"))?;
                    self.builder = Some(DocumentBuilder::new(parse_view_box(&view_box)?));
                }
            }
            Event::Tag(tag::Group, Type::Start, attrs) => self.open_group(&attrs)?,
            Event::Tag(tag::Group, Type::Empty, attrs) => {
                self.open_group(&attrs)?;
                self.close_group()?;
            }
            Event::Tag(tag::Group, Type::End, _) => self.close_group()?,
            Event::Tag(tag::Path, Type::Start | Type::Empty, attrs) => self.path(&attrs)?,
            Event::Tag(tag::Rectangle, Type::Start | Type::Empty, attrs) => self.rect(&attrs),
            Event::Tag(tag::Text, Type::Start, attrs) => {
                self.in_winding_text =
                    has_class(&attrs, "winding_number") && self.innermost_node().is_some();
            }
            Event::Tag(tag::Text, Type::End, _) => self.in_winding_text = false,
            Event::Text(text) if self.in_winding_text => self.winding_text(text)?,
            _ => {}
        }
        Ok(())
    }

    fn builder(&mut self) -> Result<&mut DocumentBuilder, LoadError> {
        self.builder
            .as_mut()
            .ok_or(LoadError::MissingElement("root <svg> element"))
    }

    fn open_group(&mut self, attrs: &Attributes) -> Result<(), LoadError> {
        self.builder()?;
        let scope = if has_class(attrs, "segment") {
            Scope::Segment {
                name: attr(attrs, "id").ok_or(LoadError::MissingElement("segment id"))?,
                pieces: Vec::new(),
            }
        } else if has_class(attrs, "treenode") {
            let segments = attr(attrs, "segments")
                .map(|list| list.split_whitespace().map(str::to_owned).collect())
                .unwrap_or_default();
            let slot = self.nodes.len();
            let parent = attr(attrs, "parent").or_else(|| self.enclosing_node_name());
            self.nodes.push(None);
            Scope::Node {
                slot,
                spec: NodeSpec {
                    name: Some(attr(attrs, "id").unwrap_or_else(|| format!("node{slot}"))),
                    parent,
                    segments,
                    ..NodeSpec::default()
                },
                has_bounds: false,
                has_winding: false,
            }
        } else {
            Scope::Other
        };
        self.stack.push(scope);
        Ok(())
    }

    fn close_group(&mut self) -> Result<(), LoadError> {
        let Some(scope) = self.stack.pop() else {
            return Err(LoadError::Parse("unbalanced </g>".into()));
        };
        match scope {
            Scope::Segment { name, pieces } => {
                self.builder()?
                    .segment(&name, pieces.iter().map(String::as_str))?;
            }
            Scope::Node {
                slot,
                spec,
                has_bounds,
                has_winding,
            } => {
                if !has_bounds {
                    return Err(LoadError::MissingElement("tree node bounds <rect>"));
                }
                if !has_winding {
                    return Err(LoadError::MissingElement("tree node winding_number text"));
                }
                self.nodes[slot] = Some(spec);
            }
            Scope::Other => {}
        }
        Ok(())
    }

    fn path(&mut self, attrs: &Attributes) -> Result<(), LoadError> {
        if has_class(attrs, "original") {
            self.builder()?.original_path();
            return Ok(());
        }
        let Some(data) = attr(attrs, "d") else {
            return Ok(());
        };
        let shortcut = has_class(attrs, "shortcut");
        let owner = self
            .stack
            .iter_mut()
            .rev()
            .find(|s| !matches!(s, Scope::Other));
        match owner {
            Some(Scope::Segment { pieces, .. }) => pieces.push(data),
            Some(Scope::Node { spec, .. }) if shortcut => spec.shortcuts.push(data),
            _ => {}
        }
        Ok(())
    }

    fn rect(&mut self, attrs: &Attributes) {
        if has_class(attrs, "segment_bounding_box") {
            return;
        }
        let Some(Scope::Node {
            spec, has_bounds, ..
        }) = self.innermost_node()
        else {
            return;
        };
        if *has_bounds {
            return;
        }
        let num = |name| {
            attr(attrs, name)
                .and_then(|v| v.trim().parse::<f64>().ok())
                .unwrap_or(0.0)
        };
        let (x, y) = (num("x"), num("y"));
        spec.bounds = Rect::new(x, y, x + num("width"), y + num("height"));
        *has_bounds = true;
    }

    fn winding_text(&mut self, text: &str) -> Result<(), LoadError> {
        let Some(Scope::Node {
            spec, has_winding, ..
        }) = self.innermost_node()
        else {
            return Ok(());
        };
        let trimmed = text.trim();
        spec.base_winding =
            trimmed
                .parse()
                .map_err(|_| LoadError::InvalidWindingNumber {
                    node: spec.name.clone().unwrap_or_default(),
                    text: trimmed.to_owned(),
                })?;
        *has_winding = true;
        Ok(())
    }

    fn innermost_node(&mut self) -> Option<&mut Scope> {
        self.stack
            .iter_mut()
            .rev()
            .find(|s| !matches!(s, Scope::Other))
            .filter(|s| matches!(s, Scope::Node { .. }))
    }

    fn enclosing_node_name(&self) -> Option<String> {
        self.stack.iter().rev().find_map(|s| match s {
            Scope::Node { spec, .. } => spec.name.clone(),
            _ => None,
        })
    }

    // Nodes are registered in opening order so that enclosing nodes precede
    // the nodes nested in them.
    fn finish(mut self) -> Result<Document, LoadError> {
        if !self.stack.is_empty() {
            return Err(LoadError::Parse("unclosed <g>".into()));
        }
        let mut builder = self
            .builder
            .take()
            .ok_or(LoadError::MissingElement("root <svg> element"))?;
        for spec in self.nodes.into_iter().flatten() {
            builder.node(spec)?;
        }
        builder.finish()
    }
}

fn attr(attrs: &Attributes, name: &str) -> Option<String> {
    attrs.get(name).map(ToString::to_string)
}

fn has_class(attrs: &Attributes, class: &str) -> bool {
    attrs
        .get("class")
        .is_some_and(|v| v.to_string().split_whitespace().any(|c| c == class))
}
