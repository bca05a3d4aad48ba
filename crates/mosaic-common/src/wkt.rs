//! Parsing of WKT `POLYGON` text into coordinate rings.
//!
//! Accepts `POLYGON((x1 y1, x2 y2, ..., x1 y1), (hole...))`. Coordinates are
//! taken as-is, so rings may be in degrees or in CRS units.

use crate::error::{GridError, GridResult};

/// Rings of a polygon: the exterior first, then any holes.
pub type Rings = Vec<Vec<(f64, f64)>>;

fn invalid(message: impl Into<String>) -> GridError {
    GridError::invalid_parameter("wkt", message)
}

/// Parse a WKT POLYGON. Every ring needs at least 4 points and must be closed.
pub fn parse_polygon(text: &str) -> GridResult<Rings> {
    let text = text.trim();
    let keyword = "POLYGON";

    if !text
        .get(..keyword.len())
        .is_some_and(|k| k.eq_ignore_ascii_case(keyword))
    {
        return Err(invalid(format!("expected POLYGON, got '{}'", text)));
    }

    // Find the outer parentheses
    let start = text
        .find('(')
        .ok_or_else(|| invalid("missing opening parenthesis"))?;
    let end = text
        .rfind(')')
        .ok_or_else(|| invalid("missing closing parenthesis"))?;
    if end <= start {
        return Err(invalid("invalid parenthesis order"));
    }
    if !text[keyword.len()..start].trim().is_empty() {
        return Err(invalid(format!("unexpected text before '(' in '{}'", text)));
    }
    if !text[end + 1..].trim().is_empty() {
        return Err(invalid(format!("unexpected text after ')' in '{}'", text)));
    }

    let body = text[start + 1..end].trim();
    if body.is_empty() {
        return Err(invalid("polygon has no rings"));
    }

    let mut rings = Vec::new();
    let mut rest = body;
    while !rest.is_empty() {
        let open = rest
            .strip_prefix('(')
            .ok_or_else(|| invalid(format!("expected '(' at '{}'", rest)))?;
        let close = open
            .find(')')
            .ok_or_else(|| invalid("unterminated ring"))?;
        rings.push(parse_ring(&open[..close])?);

        rest = open[close + 1..].trim_start();
        if let Some(next) = rest.strip_prefix(',') {
            rest = next.trim_start();
            if rest.is_empty() {
                return Err(invalid("trailing comma after ring"));
            }
        } else if !rest.is_empty() {
            return Err(invalid(format!("unexpected text '{}'", rest)));
        }
    }

    Ok(rings)
}

fn parse_ring(ring: &str) -> GridResult<Vec<(f64, f64)>> {
    let points = ring
        .split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(invalid(format!("expected 'x y', got '{}'", pair.trim())));
            }
            let x: f64 = parts[0]
                .parse()
                .map_err(|_| invalid(format!("invalid coordinate '{}'", parts[0])))?;
            let y: f64 = parts[1]
                .parse()
                .map_err(|_| invalid(format!("invalid coordinate '{}'", parts[1])))?;
            if !x.is_finite() || !y.is_finite() {
                return Err(invalid(format!("non-finite coordinate '{}'", pair.trim())));
            }
            Ok((x, y))
        })
        .collect::<GridResult<Vec<_>>>()?;

    if points.len() < 4 {
        return Err(invalid(
            "ring must have at least 4 points (including the closing point)",
        ));
    }
    if points.first() != points.last() {
        return Err(invalid("ring is not closed"));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_polygon() {
        let rings = parse_polygon("POLYGON((0 0, 40 0, 40 40, 0 40, 0 0))").unwrap();
        assert_eq!(rings.len(), 1);
        assert_eq!(rings[0][1], (40.0, 0.0));
        assert_eq!(rings[0].len(), 5);
    }

    #[test]
    fn test_parse_with_hole_and_spacing() {
        let rings = parse_polygon(
            " polygon ( (0 0,10 0,10 10,0 10,0 0) , (2 2, 4 2, 4 4, 2 2) ) ",
        )
        .unwrap();
        assert_eq!(rings.len(), 2);
        assert_eq!(rings[1][2], (4.0, 4.0));
    }

    #[test]
    fn test_parse_metric_coordinates() {
        let rings =
            parse_polygon("POLYGON((-2500000 -2500000,2500000 -2500000,2500000 2500000,-2500000 -2500000))")
                .unwrap();
        assert_eq!(rings[0][2], (2500000.0, 2500000.0));
    }

    #[test]
    fn test_parse_errors() {
        for text in [
            "POINT(1 2)",
            "POLYGON",
            "POLYGON()",
            "POLYGON((0 0, 1 0, 0 0))",
            "POLYGON((0 0, 1 0, 1 1, 0 1))",
            "POLYGON((0 0, 1 0, 1 x, 0 0))",
            "POLYGON((0 0 5, 1 0 5, 1 1 5, 0 0 5))",
            "POLYGON((0 0, 1 0, 1 1, 0 0)),",
            "POLYGON((0 0, 1 0, 1 1, 0 0) (0 0, 1 0, 1 1, 0 0))",
            "POLYGONZ((0 0, 1 0, 1 1, 0 0))",
        ] {
            let err = parse_polygon(text).unwrap_err();
            assert_eq!(err.param(), Some("wkt"), "{}", text);
        }
    }
}
