// Copyright 2025 the Windtree Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size};

use crate::GeometryError;

/// Parses an SVG `viewBox` attribute (`min-x min-y width height`).
///
/// Values may be separated by whitespace and/or commas. The width and height
/// must be positive.
pub fn parse_view_box(value: &str) -> Result<Rect, GeometryError> {
    let invalid = || GeometryError::InvalidViewBox(value.to_owned());
    let numbers = value
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|s| !s.is_empty())
        .map(str::parse::<f64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| invalid())?;
    let [x, y, width, height] = numbers[..] else {
        return Err(invalid());
    };
    if !(width > 0.0 && height > 0.0) || !x.is_finite() || !y.is_finite() {
        return Err(invalid());
    }
    Ok(Rect::from_origin_size(Point::new(x, y), Size::new(width, height)))
}
