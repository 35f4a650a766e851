// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{BezPath, Rect};
use svg::node::Attributes;
use svg::node::element::tag::{self, Type};
use svg::parser::Event;
use windtree_geometry::{GeometryError, parse_view_box};

use crate::BuildError;

/// Attributes as sorted `(name, value)` pairs.
pub(crate) type AttrList = Vec<(String, String)>;

/// A `<path>` of the input drawing.
#[derive(Clone, Debug)]
pub(crate) struct InputPath {
    /// Every attribute except `d`.
    pub(crate) attributes: AttrList,
    pub(crate) path: BezPath,
}

/// The parts of the input drawing the build uses.
#[derive(Clone, Debug)]
pub(crate) struct InputDrawing {
    pub(crate) root: AttrList,
    pub(crate) view_box: Rect,
    pub(crate) paths: Vec<InputPath>,
}

pub(crate) fn read_input(content: &str) -> Result<InputDrawing, BuildError> {
    let mut root = None;
    let mut paths = Vec::new();
    let parser = svg::read(content).map_err(|e| BuildError::Parse(e.to_string()))?;
    for event in parser {
        match event {
            Event::Error(err) => return Err(BuildError::Parse(err.to_string())),
            Event::Tag(tag::SVG, Type::Start | Type::Empty, attrs) if root.is_none() => {
                root = Some(sorted(&attrs));
            }
            Event::Tag(tag::Path, Type::Start | Type::Empty, attrs) => {
                let index = paths.len();
                let data = attrs
                    .get("d")
                    .map(ToString::to_string)
                    .ok_or(BuildError::MissingPathData { index })?;
                let path = BezPath::from_svg(&data)
                    .map_err(|source| GeometryError::InvalidPathData { data, source })?;
                let mut attributes = sorted(&attrs);
                attributes.retain(|(k, _)| k != "d");
                paths.push(InputPath { attributes, path });
            }
            _ => {}
        }
    }
    let root = root.ok_or(BuildError::MissingViewBox)?;
    let (_, view_box) = root
        .iter()
        .find(|(k, _)| k == "viewBox")
        .ok_or(BuildError::MissingViewBox)?;
    let view_box = parse_view_box(view_box)?;
    Ok(InputDrawing {
        root,
        view_box,
        paths,
    })
}

fn sorted(attrs: &Attributes) -> AttrList {
    let mut list: AttrList = attrs
        .iter()
        .map(|(k, v)| (k.clone(), v.to_string()))
        .collect();
    list.sort();
    list
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_root_and_paths() {
        let input = read_input(
            r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 64 32">
  <path d="M 1 1 L 10 1" stroke="red"/>
  <g><path d="M 2 2 L 3 3"/></g>
</svg>"#,
        )
        .unwrap();
        assert_eq!(input.view_box, Rect::new(0.0, 0.0, 64.0, 32.0));
        assert_eq!(input.paths.len(), 2);
        assert_eq!(
            input.paths[0].attributes,
            [("stroke".to_owned(), "red".to_owned())]
        );
        assert!(input.root.iter().any(|(k, _)| k == "xmlns"));
    }

    #[test]
    fn missing_view_box_and_data_are_errors() {
        assert!(matches!(
            read_input("<svg><path d=\"M 0 0 L 1 1\"/></svg>"),
            Err(BuildError::MissingViewBox)
        ));
        assert!(matches!(
            read_input("<svg viewBox=\"0 0 1 1\"><path/></svg>"),
            Err(BuildError::MissingPathData { index: 0 })
        ));
        assert!(matches!(
            read_input("<svg viewBox=\"0 0 1 1\"><path d=\"M 0 0 X\"/></svg>"),
            Err(BuildError::Geometry(GeometryError::InvalidPathData { .. }))
        ));
    }
}
